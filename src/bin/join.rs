//! Joins benchmark measurement files with kernel feature files column-wise.
//!
//! Both directories are listed in sorted order and paired positionally. Each
//! feature table's leading kernel-name column is dropped before the join so
//! that the merged table carries the name only once. The output is named
//! `merged<kernel-name>.csv` after the first kernel-name value of the
//! measurement table.

extern crate energy_eval;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate structopt;

use energy_eval::errors::*;
use energy_eval::{csv_files, Table, KERNEL_COLUMN};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "join")]
#[structopt(about = "Join measurement files with kernel feature files")]
struct Opt {
    /// Directory with the benchmark measurement CSV files.
    #[structopt(help = "Measurement directory", parse(from_os_str))]
    bench_dir: PathBuf,

    /// Directory with the kernel feature CSV files.
    #[structopt(help = "Feature directory", parse(from_os_str))]
    features_dir: PathBuf,

    /// Directory the joined CSV files are written to.
    #[structopt(help = "Output directory", parse(from_os_str))]
    output_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let bench = match csv_files(&opt.bench_dir) {
        Ok(files) => files,
        Err(ref e) => {
            report("failed to list the measurement directory", e);
            process::exit(1);
        }
    };
    let features = match csv_files(&opt.features_dir) {
        Ok(files) => files,
        Err(ref e) => {
            report("failed to list the feature directory", e);
            process::exit(1);
        }
    };
    if bench.len() != features.len() {
        warn!(
            "{} measurement files but {} feature files; unpaired files are ignored",
            bench.len(),
            features.len()
        );
    }
    fs::create_dir_all(&opt.output_dir).expect("failed to create the output directory");

    let mut failed = 0;
    for (bench_file, features_file) in bench.iter().zip(features.iter()) {
        match join_pair(bench_file, features_file, &opt.output_dir) {
            Ok(out) => info!(
                "{} + {} -> {}",
                bench_file.display(),
                features_file.display(),
                out.display()
            ),
            Err(ref e) => {
                report(&format!("skipping {}", bench_file.display()), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn join_pair(bench: &Path, features: &Path, outdir: &Path) -> Result<PathBuf> {
    let bench_table = Table::from_path(bench)?;
    let features_table = Table::from_path(features)?;

    let joined = bench_table.join(&features_table.drop_column(0))?;
    let kernel = joined.cell(0, KERNEL_COLUMN)?.to_string();

    let out = outdir.join(format!("merged{}.csv", kernel));
    joined.write_to_path(&out)?;
    Ok(out)
}
