//! Library of functions and structs to post-process benchmark energy
//! measurements.
//!
//! Measurement files are CSV tables produced by frequency-scaling benchmark
//! runs: one row per kernel execution sample, with the kernel name, the
//! core/memory frequency pair it ran under, the kernel time and the energy
//! drawn. Processing is a single pipeline per kernel: load the table, derive
//! per-row metrics (EDP, ED2P, min-max normalized columns), then compute
//! baseline-relative objectives (speedup, normalized energy) and extract the
//! Pareto front over them. The binaries under `src/bin` wrap these functions
//! with directory iteration and CSV/SVG output.

#![deny(missing_docs)]

extern crate csv;
#[macro_use]
extern crate error_chain;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate plotters;
#[cfg(test)]
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate toml;

pub mod errors;

mod metrics;
pub use metrics::add_energy_metrics;
pub use metrics::normalize_column;
pub use metrics::ENERGY_COLUMN;
pub use metrics::TIME_COLUMN;

mod pareto;
pub use pareto::pareto_front;
pub use pareto::staircase;
pub use pareto::ObjectivePoint;
pub use pareto::Segment;

mod plot;
pub use plot::metric_chart;
pub use plot::pareto_chart;

mod setting;
pub use setting::Setting;

mod speedup;
pub use speedup::baseline_row;
pub use speedup::relative_to_baseline;
pub use speedup::ConfigPoint;
pub use speedup::CORE_FREQ_COLUMN;
pub use speedup::MAX_ENERGY_COLUMN;
pub use speedup::MEMORY_FREQ_COLUMN;

mod table;
pub use table::Table;
pub use table::KERNEL_COLUMN;

use errors::*;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns all CSV files in `dir`, sorted by path so that every run processes
/// a directory in the same order regardless of how the OS lists it.
pub fn csv_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries =
        fs::read_dir(dir).chain_err(|| format!("failed to read directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry =
            entry.chain_err(|| format!("failed to list directory {}", dir.display()))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("csv") {
            files.push(path);
        }
    }

    Ok(files.into_iter().sorted().collect())
}
