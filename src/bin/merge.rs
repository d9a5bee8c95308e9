//! Merges per-run measurement files into one table per kernel.
//!
//! Measurement file names are the kernel name followed by five `_`-separated
//! run fields (frequencies, run id, and so on); every file belonging to a
//! requested kernel is loaded and the tables are concatenated row-wise into
//! `merged_<kernel>.csv`. With `--normalize` the merged table's core
//! frequency column is min-max rescaled over its distinct values.

extern crate energy_eval;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate structopt;

use energy_eval::errors::*;
use energy_eval::{csv_files, normalize_column, Table, CORE_FREQ_COLUMN};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "merge")]
#[structopt(about = "Merge per-run measurement files into one table per kernel")]
struct Opt {
    /// Directory with the per-run measurement CSV files.
    #[structopt(help = "Input directory", parse(from_os_str))]
    input_dir: PathBuf,

    /// Directory the merged CSV files are written to.
    #[structopt(help = "Output directory", parse(from_os_str))]
    output_dir: PathBuf,

    /// Kernels to merge; repeat the flag for several kernels.
    #[structopt(short = "k", long = "kernel", required = true, number_of_values = 1)]
    kernels: Vec<String>,

    /// Min-max normalize the core frequency column of every merged table.
    #[structopt(long = "normalize")]
    normalize: bool,
}

/// The kernel a measurement file belongs to: its stem with the five trailing
/// `_`-separated run fields removed. `None` for files named differently.
fn kernel_of(stem: &str) -> Option<&str> {
    let mut end = stem.len();
    for _ in 0..5 {
        end = stem[..end].rfind('_')?;
    }
    Some(&stem[..end])
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

    let mut failed = 0;
    for kernel in &opt.kernels {
        let group = files
            .iter()
            .filter(|f| {
                f.file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(kernel_of)
                    .map_or(false, |k| k == kernel.as_str())
            })
            .collect::<Vec<_>>();

        if group.is_empty() {
            warn!("no measurement files for kernel `{}`", kernel);
            continue;
        }

        match merge_kernel(kernel, &group, opt.normalize, &opt.output_dir) {
            Ok(out) => info!("merged {} files into {}", group.len(), out.display()),
            Err(ref e) => {
                report(&format!("kernel `{}` failed", kernel), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn merge_kernel(
    kernel: &str,
    files: &[&PathBuf],
    normalize: bool,
    outdir: &Path,
) -> Result<PathBuf> {
    let mut tables = Vec::new();
    for file in files {
        tables.push(Table::from_path(file)?);
    }

    let mut merged = Table::concat(&tables)?;
    if normalize {
        merged = normalize_column(&merged, CORE_FREQ_COLUMN)?;
    }

    let out = outdir.join(format!("merged_{}.csv", kernel));
    merged.write_to_path(&out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::kernel_of;

    #[test]
    fn kernel_name_is_the_stem_without_run_fields() {
        assert_eq!(kernel_of("matrix_mul_1312_877_run_0_log"), Some("matrix_mul"));
        assert_eq!(kernel_of("sobel_1312_877_run_0_log"), Some("sobel"));
        // too few run fields
        assert_eq!(kernel_of("sobel_1312"), None);
    }
}
