//! Appends `edp` and `ed2p` columns to every measurement CSV in a directory.
//!
//! Each input file becomes `<stem>_energy_metrics.csv` in the output
//! directory. Files that already carry the derived columns are skipped with a
//! warning; a malformed file is reported and does not stop the remaining
//! files. Files are independent, so they are processed in parallel.

extern crate energy_eval;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate rayon;
extern crate structopt;

use energy_eval::errors::*;
use energy_eval::{add_energy_metrics, csv_files, Table};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "metrics")]
#[structopt(about = "Append edp/ed2p columns to benchmark measurement files")]
struct Opt {
    /// Directory with the measurement CSV files.
    #[structopt(help = "Input directory", parse(from_os_str))]
    input_dir: PathBuf,

    /// Directory the derived CSV files are written to.
    #[structopt(help = "Output directory", parse(from_os_str))]
    output_dir: PathBuf,
}

fn main() {
    env_logger::init();
    let opt = Opt::from_args();

    let files = match csv_files(&opt.input_dir) {
        Ok(files) => files,
        Err(ref e) => {
            report("failed to list the input directory", e);
            process::exit(1);
        }
    };
    fs::create_dir_all(&opt.output_dir).expect("failed to create the output directory");

    let failed = files
        .par_iter()
        .filter(|file| match process_file(file, &opt.output_dir) {
            Ok(()) => false,
            Err(ref e) => {
                report(&format!("skipping {}", file.display()), e);
                true
            }
        })
        .count();

    if failed > 0 {
        error!("{} of {} files failed", failed, files.len());
        process::exit(1);
    }
}

fn process_file(file: &Path, outdir: &Path) -> Result<()> {
    let table = Table::from_path(file)?;
    if table.has_column("edp") || table.has_column("ed2p") {
        warn!("{}: already carries derived metrics, skipped", file.display());
        return Ok(());
    }

    let derived = add_energy_metrics(&table)?;

    let stem = match file.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem,
        None => return Err(format!("non-UTF-8 file name: {}", file.display()).into()),
    };
    let out = outdir.join(format!("{}_energy_metrics.csv", stem));
    derived.write_to_path(&out)?;
    info!("{} -> {}", file.display(), out.display());
    Ok(())
}
