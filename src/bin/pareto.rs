//! Draws one speedup/normalized-energy chart per kernel, with the Pareto
//! front over all measured frequency configurations.
//!
//! Every input file may hold several kernels; rows are grouped by kernel
//! name and each kernel gets its own `<kernel>.svg`. Relative metrics are
//! computed against the baseline configuration (device default frequencies
//! unless overridden).

extern crate energy_eval;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate structopt;

use energy_eval::errors::*;
use energy_eval::{csv_files, pareto_chart, relative_to_baseline, Setting, Table};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "pareto")]
#[structopt(about = "Per-kernel speedup/energy charts with Pareto fronts")]
struct Opt {
    /// Directory with kernel measurements over all frequency configurations.
    #[structopt(help = "Input directory", parse(from_os_str))]
    input_dir: PathBuf,

    /// Directory the SVG charts are written to.
    #[structopt(help = "Output directory", parse(from_os_str))]
    output_dir: PathBuf,

    /// TOML file with the baseline configuration.
    #[structopt(long = "setting", parse(from_os_str))]
    setting: Option<PathBuf>,

    /// Baseline core frequency in MHz (overrides the setting file).
    #[structopt(long = "core-freq")]
    core_freq: Option<u32>,

    /// Baseline memory frequency in MHz (overrides the setting file).
    #[structopt(long = "memory-freq")]
    memory_freq: Option<u32>,
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
    fs::create_dir_all(&opt.output_dir).expect("failed to create the output directory");

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
            match plot_kernel(&kernel, &kernel_table, &setting, &opt.output_dir) {
                Ok(out) => info!("{}: wrote {}", kernel, out.display()),
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

fn plot_kernel(
    kernel: &str,
    table: &Table,
    setting: &Setting,
    outdir: &Path,
) -> Result<PathBuf> {
    let points = relative_to_baseline(kernel, table, setting)?;
    let out = outdir.join(format!("{}.svg", kernel));
    pareto_chart(kernel, &points, &out)?;
    Ok(out)
}
