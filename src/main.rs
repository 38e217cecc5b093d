use bpsim::{Scenario, ScenarioConfig};
use bpsim::{bench_rebuild, bench_step_curve};
use bpsim::run_2d;

use anyhow::Result;
use clap::Parser;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "scenario.yaml")]
    file_name: String,

    /// Run the interactive console instead of the viewer
    #[arg(long)]
    repl: bool,

    /// Print benchmark curves and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig = serde_yaml::from_reader(reader)?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.bench {
        bench_step_curve();
        bench_rebuild();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg);

    if args.repl {
        bpsim::ui::repl::run(&mut scenario.manager)?;
        let path = bpsim::metrics::export::store_to_file(
            scenario.manager.metrics(),
            &PathBuf::from("Measurements"),
        )?;
        println!("{}", path.display());
    } else {
        run_2d(scenario);
    }

    Ok(())
}
