//! Draws per-kernel EDP and ED2P scatter charts against core frequency.
//!
//! The lowest frequency steps blow up both metrics and flatten the rest of
//! the chart, so rows at or below `--min-core-freq` are left out of the
//! scatter. The baseline marker is taken from the unfiltered table.

extern crate energy_eval;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate structopt;

use energy_eval::errors::*;
use energy_eval::{baseline_row, csv_files, metric_chart, Setting, Table, CORE_FREQ_COLUMN};
use std::fs;
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

const MAX_EDP_COLUMN: &'static str = "max-edp";
const MAX_ED2P_COLUMN: &'static str = "max-ed2p";

#[derive(StructOpt, Debug)]
#[structopt(name = "edp")]
#[structopt(about = "Per-kernel EDP/ED2P charts against core frequency")]
struct Opt {
    /// Directory with kernel measurements over all frequency configurations.
    #[structopt(help = "Input directory", parse(from_os_str))]
    input_dir: PathBuf,

    /// Directory the EDP charts are written to.
    #[structopt(help = "EDP output directory", parse(from_os_str))]
    edp_dir: PathBuf,

    /// Directory the ED2P charts are written to.
    #[structopt(help = "ED2P output directory", parse(from_os_str))]
    ed2p_dir: PathBuf,

    /// TOML file with the baseline configuration.
    #[structopt(long = "setting", parse(from_os_str))]
    setting: Option<PathBuf>,

    /// Baseline core frequency in MHz (overrides the setting file).
    #[structopt(long = "core-freq")]
    core_freq: Option<u32>,

    /// Baseline memory frequency in MHz (overrides the setting file).
    #[structopt(long = "memory-freq")]
    memory_freq: Option<u32>,

    /// Exclude rows with a core frequency at or below this value from the
    /// scatter.
    #[structopt(long = "min-core-freq", default_value = "800")]
    min_core_freq: u32,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let setting = match Setting::resolve(
        opt.setting.as_ref().map(|p| p.as_path()),
        opt.core_freq,
        opt.memory_freq,
    ) {
        Ok(setting) => setting,
        Err(ref e) => {
            report("invalid baseline setting", e);
            process::exit(1);
        }
    };

    let files = match csv_files(&opt.input_dir) {
        Ok(files) => files,
        Err(ref e) => {
            report("failed to list the input directory", e);
            process::exit(1);
        }
    };
    fs::create_dir_all(&opt.edp_dir).expect("failed to create the EDP output directory");
    fs::create_dir_all(&opt.ed2p_dir).expect("failed to create the ED2P output directory");

    let mut failed = 0;
    for file in &files {
        let groups = match Table::from_path(file).and_then(|t| t.group_by_kernel()) {
            Ok(groups) => groups,
            Err(ref e) => {
                report(&format!("skipping {}", file.display()), e);
                failed += 1;
                continue;
            }
        };

        for (kernel, kernel_table) in groups {
            match plot_kernel(&kernel, &kernel_table, &setting, &opt) {
                Ok(()) => info!("{}: wrote EDP and ED2P charts", kernel),
                Err(ref e) => {
                    report(&format!("kernel `{}` failed", kernel), e);
                    failed += 1;
                }
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn plot_kernel(kernel: &str, table: &Table, setting: &Setting, opt: &Opt) -> Result<()> {
    let base = baseline_row(kernel, table, setting)?;

    let cores = table.f64_column(CORE_FREQ_COLUMN)?;
    let edp = table.f64_column(MAX_EDP_COLUMN)?;
    let ed2p = table.f64_column(MAX_ED2P_COLUMN)?;

    let scatter = |values: &[f64]| {
        cores
            .iter()
            .zip(values.iter())
            .filter(|&(&core, _)| core > opt.min_core_freq as f64)
            .map(|(&core, &v)| (core, v))
            .collect::<Vec<(f64, f64)>>()
    };

    metric_chart(
        kernel,
        "EDP",
        &scatter(&edp),
        (cores[base], edp[base]),
        &opt.edp_dir.join(format!("{}_edp.svg", kernel)),
    )?;
    metric_chart(
        kernel,
        "ED2P",
        &scatter(&ed2p),
        (cores[base], ed2p[base]),
        &opt.ed2p_dir.join(format!("{}_ed2p.svg", kernel)),
    )?;
    Ok(())
}
