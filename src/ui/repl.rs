//! Interactive console driving the particle manager.
//!
//! Reads commands line by line from stdin until `exit` or end of input.
//! This is the only mutation entry point into the manager besides the
//! viewer's step system.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::simulation::engine::IndexKind;
use crate::simulation::manager::ParticleManager;
use crate::ui::commands::{self, Command};

pub fn run(manager: &mut ParticleManager) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Enter a command: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // end of input
        };
        let line = line?;

        match commands::parse(&line) {
            Ok(Command::Exit) => break,
            Ok(command) => apply(command, manager),
            Err(err) => println!("{err}"),
        }
    }

    Ok(())
}

fn apply(command: Command, manager: &mut ParticleManager) {
    match command {
        Command::SwitchTo { kind, count } => {
            manager.switch_index(kind);
            manager.set_body_count(count);
        }
        Command::ScaleVelocity { factor } => manager.scale_velocity(factor),
        Command::Start => {
            let dt = manager.params().dt;
            let start = Instant::now();
            manager.step(dt);
            println!(
                "Time taken: {} milliseconds",
                start.elapsed().as_millis()
            );
        }
        Command::Test => run_sweep(manager),
        Command::ToggleLines => manager.toggle_lines(),
        Command::Help => println!("{}", commands::HELP_TEXT),
        Command::Exit => {}
    }
}

/// One step per strategy over growing populations; measurements land in
/// the manager's collector for the CSV export at shutdown.
fn run_sweep(manager: &mut ParticleManager) {
    let dt = manager.params().dt;
    for i in 1..=10 {
        let n = i * 1000;
        println!("Test running for {n} elements");
        for kind in [IndexKind::QuadTree, IndexKind::Grid, IndexKind::Bvh] {
            manager.switch_index(kind);
            manager.set_body_count(n);
            manager.step(dt);
        }
    }
}
