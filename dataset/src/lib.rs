//! Loading of paired observations and interquartile range outlier removal

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod errors;
mod observations;
mod outliers;

pub use errors::{Error, Result};
pub use observations::Dataset;
pub use outliers::{quantile, Bounds, FilterMode, IqrFilter};
