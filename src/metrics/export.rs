//! CSV export of collected measurements.
//!
//! Writes one `measurement_<unix-seconds>.csv` per run, joining each timing
//! row with the size recorded under the same key.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

use crate::metrics::collector::MeasurementCollector;

pub fn store_to_file(
    collector: &MeasurementCollector,
    directory: &Path,
) -> anyhow::Result<PathBuf> {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_secs();

    fs::create_dir_all(directory)
        .with_context(|| format!("creating measurement directory {}", directory.display()))?;
    let path = directory.join(format!("measurement_{stamp}.csv"));
    let mut file = fs::File::create(&path)
        .with_context(|| format!("creating measurement file {}", path.display()))?;

    writeln!(
        file,
        "Function Name, Number of Items, Execution time (miliseconds), Memory space (kilobytes)"
    )?;
    for (key, (count, elapsed_ms)) in collector.timings() {
        let kilobytes = collector
            .sizes()
            .get(key)
            .map(|&(_, bytes)| bytes as f64 / 1000.0)
            .unwrap_or(0.0);
        writeln!(file, "{key}, {count}, {elapsed_ms}, {kilobytes}")?;
    }

    Ok(path)
}
