//! Derived per-row energy metrics and column normalization.

use errors::*;
use table::Table;

/// Name of the column holding the kernel execution time in seconds.
pub const TIME_COLUMN: &'static str = "kernel-time [s]";

/// Name of the column holding the energy drawn in joules.
pub const ENERGY_COLUMN: &'static str = "energy [J]";

/// Returns a new table with `edp` and `ed2p` columns appended.
///
/// EDP is time x energy; ED2P is time^2 x energy, both computed per row. A
/// row with a missing or non-numeric time/energy field fails the whole table;
/// the caller reports the file and moves on to its other inputs.
pub fn add_energy_metrics(table: &Table) -> Result<Table> {
    let times = table.f64_column(TIME_COLUMN)?;
    let energies = table.f64_column(ENERGY_COLUMN)?;

    let edp = times
        .iter()
        .zip(energies.iter())
        .map(|(t, e)| t * e)
        .collect::<Vec<f64>>();
    let ed2p = times
        .iter()
        .zip(energies.iter())
        .map(|(t, e)| t * t * e)
        .collect::<Vec<f64>>();

    let table = table.push_column("edp", &edp)?;
    table.push_column("ed2p", &ed2p)
}

/// Min-max normalizes a column in place of its old values, returning a new
/// table.
///
/// The minimum and maximum are taken over the set of distinct values of the
/// column. A column whose distinct set is a single value (or an empty table)
/// cannot be normalized and fails with `DegenerateColumn`; single-frequency
/// datasets do occur and never produce NaN output.
pub fn normalize_column(table: &Table, column: &str) -> Result<Table> {
    let values = table.f64_column(column)?;

    let mut distinct = values.clone();
    distinct.sort_by(|a, b| a.partial_cmp(b).expect("non-finite value in column"));
    distinct.dedup();

    let (min, max) = match (distinct.first(), distinct.last()) {
        (Some(&min), Some(&max)) if min != max => (min, max),
        (Some(&min), Some(_)) => bail!(ErrorKind::DegenerateColumn(
            column.to_string(),
            format!("every value is {}", min)
        )),
        _ => bail!(ErrorKind::DegenerateColumn(
            column.to_string(),
            "the table has no rows".to_string()
        )),
    };

    let normalized = values
        .iter()
        .map(|v| (v - min) / (max - min))
        .collect::<Vec<f64>>();
    table.replace_column(column, &normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn table_of(columns: &[(&str, &[f64])]) -> Table {
        let headers = columns.iter().map(|&(n, _)| n.to_string()).collect::<Vec<_>>();
        let len = columns[0].1.len();
        let rows = (0..len)
            .map(|i| columns.iter().map(|&(_, vs)| vs[i].to_string()).collect())
            .collect();
        Table::new("test", headers, rows)
    }

    #[test]
    fn edp_and_ed2p_for_random_samples() {
        let mut rng = rand::thread_rng();
        let times = (0..64)
            .map(|_| rng.gen_range(1e-6f64..10.0))
            .collect::<Vec<f64>>();
        let energies = (0..64)
            .map(|_| rng.gen_range(1e-6f64..100.0))
            .collect::<Vec<f64>>();

        let table = table_of(&[(TIME_COLUMN, &times), (ENERGY_COLUMN, &energies)]);
        let derived = add_energy_metrics(&table).unwrap();
        let edp = derived.f64_column("edp").unwrap();
        let ed2p = derived.f64_column("ed2p").unwrap();

        for i in 0..times.len() {
            // the written table keeps 8 decimals, so compare to that precision
            assert!((edp[i] - times[i] * energies[i]).abs() < 5e-9);
            assert!((ed2p[i] - times[i] * times[i] * energies[i]).abs() < 5e-9);
        }
    }

    #[test]
    fn deriving_twice_is_refused() {
        let table = table_of(&[(TIME_COLUMN, &[1.0]), (ENERGY_COLUMN, &[2.0])]);
        let derived = add_energy_metrics(&table).unwrap();
        assert!(add_energy_metrics(&derived).is_err());
    }

    #[test]
    fn missing_energy_column_is_an_error() {
        let table = table_of(&[(TIME_COLUMN, &[1.0])]);
        assert!(add_energy_metrics(&table).is_err());
    }

    #[test]
    fn normalization_of_core_frequencies() {
        let table = table_of(&[("core-freq", &[800.0, 1000.0, 1312.0])]);
        let normalized = normalize_column(&table, "core-freq").unwrap();
        assert_eq!(
            normalized.f64_column("core-freq").unwrap(),
            vec![0.0, 0.390625, 1.0]
        );
    }

    #[test]
    fn normalization_is_idempotent_on_a_unit_range() {
        let table = table_of(&[("core-freq", &[800.0, 940.0, 1000.0, 1312.0])]);
        let once = normalize_column(&table, "core-freq").unwrap();
        let twice = normalize_column(&once, "core-freq").unwrap();
        assert_eq!(
            once.f64_column("core-freq").unwrap(),
            twice.f64_column("core-freq").unwrap()
        );
    }

    #[test]
    fn degenerate_column_is_an_error() {
        let table = table_of(&[("core-freq", &[1000.0, 1000.0, 1000.0])]);
        let err = normalize_column(&table, "core-freq").unwrap_err();
        match *err.kind() {
            ErrorKind::DegenerateColumn(ref column, _) => assert_eq!(column, "core-freq"),
            ref k => panic!("unexpected error: {:?}", k),
        }
    }
}
