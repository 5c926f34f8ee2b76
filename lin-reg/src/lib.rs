//! Univariate linear regression fitted by batch gradient descent,
//! with an L2 penalty on the slope.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod errors;
mod gradient_descent;
mod model;
mod objective;
mod observer;
mod report;
mod samples;

pub use errors::{Error, Result};
pub use gradient_descent::{Fit, GradientDescent, GradientDescentParams};
pub use model::{predict, LinearModel};
pub use objective::{cost, gradient, Gradient, Objective, RegularizedMse};
pub use observer::{CostHistory, IterationObserver, ProgressLogger, Step};
pub use report::{r_squared, Summary};
pub use samples::Samples;

use nalgebra::DVector;

/// Generic way of fitting a linear model `y = w * x + b`
pub trait LinReg {
    /// Fit the model, mapping inputs to targets
    ///
    /// # Parameters
    /// inputs: The explanatory variable, one entry per observation
    /// targets: The observed responses, same length as `inputs`
    /// initial: The parameters to start from
    fn fit(
        &self,
        inputs: &DVector<f64>,
        targets: &DVector<f64>,
        initial: LinearModel,
    ) -> Result<Fit>;
}
