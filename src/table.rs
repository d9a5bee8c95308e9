//! In-memory model of a measurement table.
//!
//! A table keeps every cell as raw text and parses named columns to numbers on
//! demand. Measurement files differ in which derived columns they already
//! carry (`max-edp`, `mean-energy [J]`, feature columns from other tools), so
//! the table never interprets columns it was not asked about and writes them
//! back untouched.

use csv;
use errors::*;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Name of the column holding the kernel identifier.
pub const KERNEL_COLUMN: &'static str = "kernel-name";

/// An ordered sequence of measurement rows sharing one header schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    source: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table from parts. `source` identifies the table in error
    /// messages (a file name for loaded tables).
    pub fn new(source: &str, headers: Vec<String>, rows: Vec<Vec<String>>) -> Table {
        Table {
            source: source.to_string(),
            headers: headers,
            rows: rows,
        }
    }

    /// Loads a table from a CSV file with a header line.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Table> {
        let source = path.as_ref().display().to_string();
        let file = ::std::fs::File::open(path.as_ref())
            .chain_err(|| format!("failed to open {}", source))?;
        Table::from_reader(file, &source)
    }

    /// Loads a table from any reader. Rows with a field count different from
    /// the header fail the whole table.
    pub fn from_reader<R: Read>(rdr: R, source: &str) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers = reader
            .headers()
            .chain_err(|| format!("failed to read the header line of {}", source))?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<String>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.chain_err(|| format!("failed to read {}", source))?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        debug!("{}: loaded {} rows, {} columns", source, rows.len(), headers.len());

        Ok(Table {
            source: source.to_string(),
            headers: headers,
            rows: rows,
        })
    }

    /// The identifier used for this table in error messages.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The header names, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        match self.headers.iter().position(|h| h == name) {
            Some(i) => Ok(i),
            None => Err(ErrorKind::MissingColumn(self.source.clone(), name.to_string()).into()),
        }
    }

    /// Returns one cell as raw text.
    pub fn cell(&self, row: usize, column: &str) -> Result<&str> {
        let idx = self.column_index(column)?;
        match self.rows.get(row) {
            Some(r) => Ok(&r[idx]),
            None => bail!(ErrorKind::ShapeMismatch(format!(
                "{} has no row {}",
                self.source, row
            ))),
        }
    }

    /// Parses a whole column as finite floats. Any non-numeric (or NaN/inf)
    /// field fails the table; malformed values are never coerced.
    pub fn f64_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(name)?;
        let mut values = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let field = &row[idx];
            let parsed = field.parse::<f64>().ok().filter(|v| v.is_finite());
            match parsed {
                Some(v) => values.push(v),
                // line numbers are 1-based and count the header line
                None => bail!(ErrorKind::BadField(
                    self.source.clone(),
                    name.to_string(),
                    i + 2,
                    field.clone()
                )),
            }
        }
        Ok(values)
    }

    /// Returns a new table with a numeric column appended, formatted with
    /// 8 decimal places.
    pub fn push_column(&self, name: &str, values: &[f64]) -> Result<Table> {
        if self.has_column(name) {
            bail!(ErrorKind::DuplicateColumn(
                self.source.clone(),
                name.to_string()
            ));
        }
        if values.len() != self.rows.len() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "column `{}` has {} values for {} rows of {}",
                name,
                values.len(),
                self.rows.len(),
                self.source
            )));
        }

        let mut headers = self.headers.clone();
        headers.push(name.to_string());
        let rows = self.rows
            .iter()
            .zip(values.iter())
            .map(|(row, v)| {
                let mut row = row.clone();
                row.push(format!("{:.8}", v));
                row
            })
            .collect();

        Ok(Table {
            source: self.source.clone(),
            headers: headers,
            rows: rows,
        })
    }

    /// Returns a new table with an existing numeric column overwritten,
    /// formatted with 8 decimal places.
    pub fn replace_column(&self, name: &str, values: &[f64]) -> Result<Table> {
        let idx = self.column_index(name)?;
        if values.len() != self.rows.len() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "column `{}` has {} values for {} rows of {}",
                name,
                values.len(),
                self.rows.len(),
                self.source
            )));
        }

        let rows = self.rows
            .iter()
            .zip(values.iter())
            .map(|(row, v)| {
                let mut row = row.clone();
                row[idx] = format!("{:.8}", v);
                row
            })
            .collect();

        Ok(Table {
            source: self.source.clone(),
            headers: self.headers.clone(),
            rows: rows,
        })
    }

    /// Concatenates tables row-wise. All tables must share the same header
    /// schema.
    pub fn concat(tables: &[Table]) -> Result<Table> {
        let first = match tables.first() {
            Some(t) => t,
            None => bail!(ErrorKind::ShapeMismatch(
                "nothing to concatenate".to_string()
            )),
        };

        let mut rows = first.rows.clone();
        for table in &tables[1..] {
            if table.headers != first.headers {
                bail!(ErrorKind::ShapeMismatch(format!(
                    "{} and {} have different headers",
                    first.source, table.source
                )));
            }
            rows.extend(table.rows.iter().cloned());
        }

        Ok(Table {
            source: format!("merged from {}", first.source),
            headers: first.headers.clone(),
            rows: rows,
        })
    }

    /// Concatenates another table column-wise. Both tables must have the same
    /// row count.
    pub fn join(&self, other: &Table) -> Result<Table> {
        if self.rows.len() != other.rows.len() {
            bail!(ErrorKind::ShapeMismatch(format!(
                "{} has {} rows but {} has {}",
                self.source,
                self.rows.len(),
                other.source,
                other.rows.len()
            )));
        }

        let mut headers = self.headers.clone();
        headers.extend(other.headers.iter().cloned());
        let rows = self.rows
            .iter()
            .zip(other.rows.iter())
            .map(|(a, b)| {
                let mut row = a.clone();
                row.extend(b.iter().cloned());
                row
            })
            .collect();

        Ok(Table {
            source: self.source.clone(),
            headers: headers,
            rows: rows,
        })
    }

    /// Returns a copy without the column at `index`. Used to strip a
    /// redundant leading kernel-name column before a join.
    pub fn drop_column(&self, index: usize) -> Table {
        let strip = |row: &Vec<String>| {
            row.iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, f)| f.clone())
                .collect::<Vec<String>>()
        };

        Table {
            source: self.source.clone(),
            headers: strip(&self.headers),
            rows: self.rows.iter().map(strip).collect(),
        }
    }

    /// Groups rows by kernel name, preserving the order in which kernels
    /// first appear. Rows of one kernel need not be contiguous in the file.
    pub fn group_by_kernel(&self) -> Result<Vec<(String, Table)>> {
        let idx = self.column_index(KERNEL_COLUMN)?;

        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, Vec<Vec<String>>)> = Vec::new();
        for row in &self.rows {
            let name = &row[idx];
            let slot = match slots.get(name) {
                Some(&s) => s,
                None => {
                    slots.insert(name.clone(), groups.len());
                    groups.push((name.clone(), Vec::new()));
                    groups.len() - 1
                }
            };
            groups[slot].1.push(row.clone());
        }

        Ok(groups
            .into_iter()
            .map(|(name, rows)| {
                let table = Table {
                    source: format!("{} [kernel {}]", self.source, name),
                    headers: self.headers.clone(),
                    rows: rows,
                };
                (name, table)
            })
            .collect())
    }

    /// Writes the table as CSV, header line first.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())
            .chain_err(|| format!("failed to create {}", path.as_ref().display()))?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let data = "\
kernel-name,core-freq,memory-freq,kernel-time [s],energy [J]
sobel,800,877,0.5,10.0
matrix_mul,1000,877,0.25,12.5
sobel,1312,877,0.125,20.0";
        Table::from_reader(data.as_bytes(), "sample").unwrap()
    }

    #[test]
    fn load_and_parse_columns() {
        let table = sample();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.f64_column("kernel-time [s]").unwrap(), vec![0.5, 0.25, 0.125]);
        assert_eq!(table.cell(1, "kernel-name").unwrap(), "matrix_mul");
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = sample().f64_column("max-energy [J]").unwrap_err();
        match *err.kind() {
            ErrorKind::MissingColumn(_, ref column) => assert_eq!(column, "max-energy [J]"),
            ref k => panic!("unexpected error: {:?}", k),
        }
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        let data = "\
kernel-name,kernel-time [s]
sobel,0.5
sobel,n/a";
        let table = Table::from_reader(data.as_bytes(), "bad").unwrap();
        let err = table.f64_column("kernel-time [s]").unwrap_err();
        match *err.kind() {
            ErrorKind::BadField(_, _, line, ref value) => {
                assert_eq!(line, 3);
                assert_eq!(value, "n/a");
            }
            ref k => panic!("unexpected error: {:?}", k),
        }
    }

    #[test]
    fn nan_field_is_rejected() {
        let data = "kernel-time [s]\nNaN";
        let table = Table::from_reader(data.as_bytes(), "nan").unwrap();
        assert!(table.f64_column("kernel-time [s]").is_err());
    }

    #[test]
    fn push_column_appends_with_fixed_format() {
        let table = sample();
        let derived = table.push_column("edp", &[5.0, 3.125, 2.5]).unwrap();
        assert_eq!(derived.headers().last().unwrap(), "edp");
        assert_eq!(derived.cell(0, "edp").unwrap(), "5.00000000");
        // the original table is untouched
        assert!(!table.has_column("edp"));
    }

    #[test]
    fn push_column_refuses_duplicates() {
        let table = sample();
        assert!(table.push_column("energy [J]", &[0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn group_by_kernel_handles_interleaved_rows() {
        let groups = sample().group_by_kernel().unwrap();
        let names = groups.iter().map(|&(ref n, _)| n.clone()).collect::<Vec<_>>();
        assert_eq!(names, vec!["sobel", "matrix_mul"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn concat_requires_matching_headers() {
        let a = sample();
        let b = Table::from_reader("kernel-name\nsobel".as_bytes(), "other").unwrap();
        assert!(Table::concat(&[a.clone(), b]).is_err());
        let merged = Table::concat(&[a.clone(), a]).unwrap();
        assert_eq!(merged.len(), 6);
    }

    #[test]
    fn join_requires_matching_row_counts() {
        let a = sample();
        let features = Table::from_reader(
            "kernel-name,mem-access\nsobel,1\nmatrix_mul,2\nsobel,3".as_bytes(),
            "features",
        ).unwrap();
        let joined = a.join(&features.drop_column(0)).unwrap();
        assert_eq!(joined.headers().len(), 6);
        assert_eq!(joined.cell(2, "mem-access").unwrap(), "3");

        let short = Table::from_reader("x\n1".as_bytes(), "short").unwrap();
        assert!(a.join(&short).is_err());
    }
}
