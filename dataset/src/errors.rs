use thiserror::Error;

/// Convenient result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors while loading or filtering a dataset
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying csv reader failed
    #[error("reading csv: {0}")]
    Csv(#[from] csv::Error),

    /// A requested column is not present
    #[error("missing column `{0}`")]
    MissingColumn(String),

    /// A field is present but not numeric
    #[error("row {row}, column `{column}`: `{value}` is not a number")]
    NotANumber {
        /// Zero based data row, not counting the header
        row: usize,
        /// Column name
        column: String,
        /// The raw field
        value: String,
    },

    /// Unrecognized outlier filter mode
    #[error("unknown filter mode `{0}`, expected `cascading` or `simultaneous`")]
    UnknownFilterMode(String),
}
