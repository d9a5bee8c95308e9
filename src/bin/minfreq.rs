//! Reports the core frequency with the lowest mean energy for every merged
//! kernel table.
//!
//! One line per file on stdout: `kernel-name, core-freq`. Run against a
//! directory of merged (optionally normalized) tables; the frequency is
//! printed as it appears in the file.

extern crate energy_eval;
extern crate env_logger;
extern crate structopt;

use energy_eval::errors::*;
use energy_eval::{csv_files, Table, CORE_FREQ_COLUMN, KERNEL_COLUMN};
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;

const MEAN_ENERGY_COLUMN: &'static str = "mean-energy [J]";

#[derive(StructOpt, Debug)]
#[structopt(name = "minfreq")]
#[structopt(about = "Report the core frequency with minimum mean energy per kernel")]
struct Opt {
    /// Directory with the merged per-kernel CSV files.
    #[structopt(help = "Input directory", parse(from_os_str))]
    input_dir: PathBuf,
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

    let mut failed = 0;
    for file in &files {
        match min_energy_row(file) {
            Ok((kernel, core_freq)) => println!("{}, {}", kernel, core_freq),
            Err(ref e) => {
                report(&format!("skipping {}", file.display()), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn min_energy_row(file: &Path) -> Result<(String, String)> {
    let table = Table::from_path(file)?;
    let energies = table.f64_column(MEAN_ENERGY_COLUMN)?;

    let best = energies
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.partial_cmp(b.1).expect("non-finite energy"))
        .map(|(i, _)| i);
    match best {
        Some(i) => Ok((
            table.cell(i, KERNEL_COLUMN)?.to_string(),
            table.cell(i, CORE_FREQ_COLUMN)?.to_string(),
        )),
        None => Err(ErrorKind::ShapeMismatch(format!("{} has no rows", file.display())).into()),
    }
}
