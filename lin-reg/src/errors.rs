use thiserror::Error;

/// Convenient result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while fitting or evaluating a model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// There is nothing to fit on
    #[error("cannot fit on an empty set of samples")]
    EmptySamples,

    /// Inputs and targets disagree in length
    #[error("inputs have {inputs} samples but targets have {targets}")]
    LengthMismatch {
        /// Number of inputs
        inputs: usize,
        /// Number of targets
        targets: usize,
    },

    /// A hyperparameter is outside of its domain
    #[error("invalid hyperparameter `{name}`: {value}")]
    InvalidHyperparameter {
        /// Name of the offending hyperparameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// All targets are equal, so SS_tot is zero
    #[error("R² is undefined: the targets have zero variance")]
    ZeroVariance,

    /// `x = (y - b) / w` has no solution for `w == 0`
    #[error("inverse prediction is undefined for a weight of zero")]
    ZeroWeight,
}
