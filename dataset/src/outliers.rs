use std::{fmt, str::FromStr};

use crate::{Dataset, Error, Result};

/// The `q`-quantile of already sorted values, linearly interpolating between
/// the two closest ranks. `q` is clamped to `[0, 1]`. `None` for no values
/// or a NaN `q`.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || q.is_nan() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Inclusive range of non-outlying values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// `Q1 - fence * IQR`
    pub lower: f64,
    /// `Q3 + fence * IQR`
    pub upper: f64,
}

impl Bounds {
    /// Tukey fences of `values`, `None` for no values
    pub fn tukey(values: impl IntoIterator<Item = f64>, fence: f64) -> Option<Self> {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            lower: q1 - fence * iqr,
            upper: q3 + fence * iqr,
        })
    }

    /// True if `value` lies within the bounds, inclusive
    #[inline(always)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// How the per column filters compose
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Columns are filtered one after another, each on what the previous ones
    /// retained. The result depends on the column order.
    #[default]
    Cascading,
    /// Bounds for every column are computed on the input, and a row is kept only
    /// if it is within all of them. Independent of the column order.
    Simultaneous,
}

impl FromStr for FilterMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cascading" => Ok(Self::Cascading),
            "simultaneous" => Ok(Self::Simultaneous),
            _ => Err(Error::UnknownFilterMode(s.to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cascading => write!(f, "cascading"),
            Self::Simultaneous => write!(f, "simultaneous"),
        }
    }
}

/// Removes rows outside of the interquartile range fences of one or more columns
#[derive(Debug, Clone, PartialEq)]
pub struct IqrFilter {
    columns: Vec<String>,
    mode: FilterMode,
    fence: f64,
}

impl IqrFilter {
    /// Filter on `columns` in cascading mode with the usual fence of 1.5
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            mode: FilterMode::default(),
            fence: 1.5,
        }
    }

    /// Change how columns compose
    pub fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Change the IQR multiplier
    pub fn with_fence(mut self, fence: f64) -> Self {
        self.fence = fence;
        self
    }

    /// The filtered columns, in application order
    #[inline(always)]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The composition mode
    #[inline(always)]
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// The IQR multiplier
    #[inline(always)]
    pub fn fence(&self) -> f64 {
        self.fence
    }

    /// Return the rows of `dataset` that are not outliers
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        let indices = self
            .columns
            .iter()
            .map(|c| dataset.column_index(c))
            .collect::<Result<Vec<usize>>>()?;

        let filtered = match self.mode {
            FilterMode::Cascading => self.cascading(dataset, &indices),
            FilterMode::Simultaneous => self.simultaneous(dataset, &indices),
        };
        info!(
            "{} outlier filter on {:?}: {} -> {} rows",
            self.mode,
            self.columns,
            dataset.nrows(),
            filtered.nrows()
        );

        Ok(filtered)
    }

    fn cascading(&self, dataset: &Dataset, indices: &[usize]) -> Dataset {
        let mut working = dataset.clone();
        for (name, idx) in self.columns.iter().zip(indices) {
            let column = working.values().column(*idx);
            let bounds = match Bounds::tukey(column.iter().copied(), self.fence) {
                Some(b) => b,
                None => break,
            };
            let keep: Vec<usize> = column
                .iter()
                .enumerate()
                .filter(|(_, v)| bounds.contains(**v))
                .map(|(i, _)| i)
                .collect();
            debug!(
                "{}: bounds [{}, {}], keeping {} of {}",
                name,
                bounds.lower,
                bounds.upper,
                keep.len(),
                working.nrows()
            );

            working = working.select_rows(&keep);
        }

        working
    }

    fn simultaneous(&self, dataset: &Dataset, indices: &[usize]) -> Dataset {
        let values = dataset.values();
        let bounds: Vec<(usize, Bounds)> = indices
            .iter()
            .filter_map(|idx| {
                Bounds::tukey(values.column(*idx).iter().copied(), self.fence).map(|b| (*idx, b))
            })
            .collect();
        for ((_, b), name) in bounds.iter().zip(self.columns.iter()) {
            debug!("{}: bounds [{}, {}]", name, b.lower, b.upper);
        }

        let keep: Vec<usize> = (0..dataset.nrows())
            .filter(|i| bounds.iter().all(|(j, b)| b.contains(values[(*i, *j)])))
            .collect();

        dataset.select_rows(&keep)
    }
}
