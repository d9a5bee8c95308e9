//! Baseline-relative speedup and normalized energy.

use errors::*;
use metrics;
use pareto::ObjectivePoint;
use setting::Setting;
use table::Table;

/// Name of the column holding the core frequency in MHz.
pub const CORE_FREQ_COLUMN: &'static str = "core-freq";

/// Name of the column holding the memory frequency in MHz.
pub const MEMORY_FREQ_COLUMN: &'static str = "memory-freq";

/// Name of the column holding the maximum energy drawn in joules.
pub const MAX_ENERGY_COLUMN: &'static str = "max-energy [J]";

/// A configuration's objective sample together with the frequency pair it
/// was measured under.
#[derive(Debug, Clone, Copy)]
pub struct ConfigPoint {
    /// Core frequency of this configuration, MHz.
    pub core_freq: f64,

    /// Memory frequency of this configuration, MHz.
    pub memory_freq: f64,

    /// Speedup and normalized energy against the baseline.
    pub point: ObjectivePoint,
}

/// Finds the row measured under the baseline frequency pair.
///
/// Returns the first matching row when the baseline configuration was
/// measured more than once. A kernel with no baseline row fails loudly:
/// every relative metric downstream depends on it.
pub fn baseline_row(kernel: &str, table: &Table, baseline: &Setting) -> Result<usize> {
    let cores = table.f64_column(CORE_FREQ_COLUMN)?;
    let memories = table.f64_column(MEMORY_FREQ_COLUMN)?;

    let found = (0..table.len()).find(|&i| {
        cores[i] == baseline.core_freq as f64 && memories[i] == baseline.memory_freq as f64
    });
    match found {
        Some(i) => Ok(i),
        None => bail!(ErrorKind::MissingBaseline(
            kernel.to_string(),
            baseline.core_freq,
            baseline.memory_freq
        )),
    }
}

/// Computes every configuration's speedup and normalized energy for one
/// kernel's table: speedup is baseline time over row time, normalized energy
/// is row max-energy over baseline max-energy. Row order is preserved.
pub fn relative_to_baseline(
    kernel: &str,
    table: &Table,
    baseline: &Setting,
) -> Result<Vec<ConfigPoint>> {
    let base = baseline_row(kernel, table, baseline)?;

    let times = table.f64_column(metrics::TIME_COLUMN)?;
    let energies = table.f64_column(MAX_ENERGY_COLUMN)?;
    let cores = table.f64_column(CORE_FREQ_COLUMN)?;
    let memories = table.f64_column(MEMORY_FREQ_COLUMN)?;

    let base_time = times[base];
    let base_energy = energies[base];

    Ok((0..table.len())
        .map(|i| ConfigPoint {
            core_freq: cores[i],
            memory_freq: memories[i],
            point: ObjectivePoint::new(base_time / times[i], energies[i] / base_energy),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel_table() -> Table {
        let data = "\
kernel-name,core-freq,memory-freq,kernel-time [s],max-energy [J]
sobel,1312,877,10.0,100.0
sobel,800,877,5.0,120.0
sobel,585,877,20.0,50.0";
        Table::from_reader(data.as_bytes(), "sobel").unwrap()
    }

    #[test]
    fn speedup_and_normalized_energy_against_baseline() {
        let points = relative_to_baseline("sobel", &kernel_table(), &Setting::default()).unwrap();
        assert_eq!(points.len(), 3);

        // the baseline row itself sits at (1, 1)
        assert_eq!(points[0].point.speedup, 1.0);
        assert_eq!(points[0].point.energy, 1.0);

        // kernel-time 5 at max-energy 120 -> speedup 2.0, energy 1.2
        assert_eq!(points[1].core_freq, 800.0);
        assert_eq!(points[1].point.speedup, 2.0);
        assert_eq!(points[1].point.energy, 1.2);

        assert_eq!(points[2].point.speedup, 0.5);
        assert_eq!(points[2].point.energy, 0.5);
    }

    #[test]
    fn missing_baseline_names_the_kernel_and_frequencies() {
        let baseline = Setting {
            core_freq: 999,
            memory_freq: 877,
        };
        let err = relative_to_baseline("sobel", &kernel_table(), &baseline).unwrap_err();
        match *err.kind() {
            ErrorKind::MissingBaseline(ref kernel, core, memory) => {
                assert_eq!(kernel, "sobel");
                assert_eq!(core, 999);
                assert_eq!(memory, 877);
            }
            ref k => panic!("unexpected error: {:?}", k),
        }
    }

    #[test]
    fn duplicate_baseline_rows_use_the_first_match() {
        let data = "\
kernel-name,core-freq,memory-freq,kernel-time [s],max-energy [J]
sobel,1312,877,10.0,100.0
sobel,1312,877,40.0,400.0
sobel,800,877,5.0,120.0";
        let table = Table::from_reader(data.as_bytes(), "sobel").unwrap();
        let points = relative_to_baseline("sobel", &table, &Setting::default()).unwrap();
        assert_eq!(points[2].point.speedup, 2.0);
        assert_eq!(points[2].point.energy, 1.2);
    }
}
