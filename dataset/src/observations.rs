use std::{io, path::Path};

use nalgebra::{DMatrix, DVector};

use crate::{Error, Result};

/// Tokens treated as a missing field, in addition to the empty string
const MISSING: [&str; 6] = ["NA", "N/A", "NaN", "nan", "null", "None"];

#[inline(always)]
fn is_missing(field: &str) -> bool {
    field.is_empty() || MISSING.iter().any(|m| *m == field)
}

/// Named numeric columns over an ordered set of observations.
/// Rows are observations, columns are fields. No value is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    values: DMatrix<f64>,
}

impl Dataset {
    /// Build a dataset from equally long named columns
    ///
    /// # Panics
    /// If the columns differ in length
    pub fn from_columns<S: AsRef<str>>(columns: &[(S, Vec<f64>)]) -> Self {
        let nrows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        assert!(
            columns.iter().all(|(_, c)| c.len() == nrows),
            "all columns must have the same length"
        );

        let names = columns.iter().map(|(n, _)| n.as_ref().to_string()).collect();
        let values = DMatrix::from_fn(nrows, columns.len(), |i, j| columns[j].1[i]);

        Self { names, values }
    }

    /// Load `columns` from a csv file with a header row.
    /// See [`Dataset::from_reader`].
    pub fn load_csv<P: AsRef<Path>>(path: P, columns: &[&str]) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        info!("loading {}", path.as_ref().display());

        Self::read(reader, columns)
    }

    /// Load `columns` from csv data with a header row.
    /// Rows with any missing field, in any column, are dropped.
    pub fn from_reader<R: io::Read>(rdr: R, columns: &[&str]) -> Result<Self> {
        let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);

        Self::read(reader, columns)
    }

    fn read<R: io::Read>(mut reader: csv::Reader<R>, columns: &[&str]) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let indices = columns
            .iter()
            .map(|c| {
                headers
                    .iter()
                    .position(|h| h == *c)
                    .ok_or_else(|| Error::MissingColumn(c.to_string()))
            })
            .collect::<Result<Vec<usize>>>()?;

        let mut data: Vec<f64> = Vec::new();
        let mut nrows = 0;
        let mut dropped = 0;
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            if record.iter().any(is_missing) {
                dropped += 1;
                continue;
            }

            for (column, idx) in columns.iter().zip(indices.iter()) {
                let field = &record[*idx];
                let not_a_number = || Error::NotANumber {
                    row,
                    column: column.to_string(),
                    value: field.to_string(),
                };
                // `f64::from_str` accepts "inf" and "NAN" in any case
                let value = field.parse::<f64>().map_err(|_| not_a_number())?;
                if !value.is_finite() {
                    return Err(not_a_number());
                }
                data.push(value);
            }
            nrows += 1;
        }
        info!("loaded {} rows, dropped {} with missing fields", nrows, dropped);

        Ok(Self {
            names: columns.iter().map(|c| c.to_string()).collect(),
            values: DMatrix::from_row_slice(nrows, columns.len(), &data),
        })
    }

    /// Column names, in column order
    #[inline(always)]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The raw matrix, one row per observation
    #[inline(always)]
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Number of observations
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// True if there are no observations
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Position of the column called `name`
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// A copy of the column called `name`
    pub fn column(&self, name: &str) -> Result<DVector<f64>> {
        let idx = self.column_index(name)?;
        Ok(self.values.column(idx).into_owned())
    }

    /// Smallest and largest value of a column, `None` if empty
    pub fn min_max(&self, name: &str) -> Result<Option<(f64, f64)>> {
        let idx = self.column_index(name)?;
        if self.is_empty() {
            return Ok(None);
        }
        let column = self.values.column(idx);
        Ok(Some((column.min(), column.max())))
    }

    /// A new dataset holding only the given rows, in the given order
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            values: self.values.select_rows(rows.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
handle,cc_rating,cf_rating
alice,1500,1200
bob,,1300
carol,1700,NaN
,1750,1450
dave,1800,1500
erin, 1900 ,1600
";

    #[test]
    fn drops_rows_with_missing_fields() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let ds = Dataset::from_reader(CSV.as_bytes(), &["cc_rating", "cf_rating"]).unwrap();
        assert_eq!(ds.nrows(), 3);
        assert_eq!(ds.names(), &["cc_rating".to_string(), "cf_rating".to_string()]);
        assert_eq!(
            ds.column("cc_rating").unwrap(),
            DVector::from_vec(vec![1500.0, 1800.0, 1900.0])
        );
        assert_eq!(
            ds.column("cf_rating").unwrap(),
            DVector::from_vec(vec![1200.0, 1500.0, 1600.0])
        );
        assert_eq!(ds.min_max("cf_rating").unwrap(), Some((1200.0, 1600.0)));
    }

    #[test]
    fn missing_column() {
        let err = Dataset::from_reader(CSV.as_bytes(), &["cc_rating", "lc_rating"]).unwrap_err();
        assert!(matches!(err, Error::MissingColumn(c) if c == "lc_rating"));
    }

    #[test]
    fn not_a_number_names_row_and_column() {
        let csv = "a,b\n1,2\n3,x\n";
        match Dataset::from_reader(csv.as_bytes(), &["a", "b"]) {
            Err(Error::NotANumber { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "b");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn non_finite_values_rejected() {
        for token in ["NAN", "inf", "-Infinity"] {
            let csv = format!("a,b\n1,2\n3,{}\n", token);
            match Dataset::from_reader(csv.as_bytes(), &["a", "b"]) {
                Err(Error::NotANumber { row, column, value }) => {
                    assert_eq!(row, 1);
                    assert_eq!(column, "b");
                    assert_eq!(value, token);
                }
                other => panic!("unexpected: {:?}", other),
            }
        }
    }

    #[test]
    fn empty_file_yields_empty_dataset() {
        let ds = Dataset::from_reader("a,b\n".as_bytes(), &["a", "b"]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.min_max("a").unwrap(), None);
    }

    #[test]
    fn select_rows_keeps_names() {
        let ds = Dataset::from_columns(&[("x", vec![1.0, 2.0, 3.0]), ("y", vec![4.0, 5.0, 6.0])]);
        let sub = ds.select_rows(&[2, 0]);
        assert_eq!(sub.names(), ds.names());
        assert_eq!(sub.column("y").unwrap(), DVector::from_vec(vec![6.0, 4.0]));
    }
}
