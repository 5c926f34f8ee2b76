use crate::{predict, Error, LinearModel, Result, Samples};

/// Partial derivatives of the cost, as raw sums over the samples.
/// Whoever applies them divides by the sample count exactly once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// With respect to the weight
    pub dw: f64,
    /// With respect to the bias
    pub db: f64,
}

/// Regularized mean squared error:
/// `(1/2m) * sum((w*x + b - y)^2) + (lambda/2m) * w^2`.
/// The bias is never penalized.
pub fn cost(samples: &Samples, weight: f64, bias: f64, reg_lambda: f64) -> f64 {
    let m = samples.len() as f64;
    let error = predict(samples.inputs(), weight, bias) - samples.targets();

    let mse = error.norm_squared() / (2.0 * m);
    let regularization = (reg_lambda / (2.0 * m)) * weight.powi(2);

    mse + regularization
}

/// Unnormalized gradient of [`cost`]:
/// `dw = sum(x * (w*x + b - y)) + lambda * w` and `db = sum(w*x + b - y)`
pub fn gradient(samples: &Samples, weight: f64, bias: f64, reg_lambda: f64) -> Gradient {
    let error = predict(samples.inputs(), weight, bias) - samples.targets();

    Gradient {
        dw: samples.inputs().dot(&error) + reg_lambda * weight,
        db: error.sum(),
    }
}

/// The function minimized by the optimizer, along with its gradient
pub trait Objective {
    /// Scalar cost of `model` over `samples`
    fn cost(&self, samples: &Samples, model: &LinearModel) -> f64;

    /// Unnormalized gradient of `cost` at `model`
    fn gradient(&self, samples: &Samples, model: &LinearModel) -> Gradient;
}

/// Mean squared error with an L2 penalty on the weight, aka ridge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularizedMse {
    reg_lambda: f64,
}

impl RegularizedMse {
    /// Create the objective with a non-negative regularization strength
    pub fn new(reg_lambda: f64) -> Result<Self> {
        if !reg_lambda.is_finite() || reg_lambda < 0.0 {
            return Err(Error::InvalidHyperparameter {
                name: "reg_lambda",
                value: reg_lambda,
            });
        }
        Ok(Self { reg_lambda })
    }

    /// Plain mean squared error
    #[inline(always)]
    pub fn unregularized() -> Self {
        Self { reg_lambda: 0.0 }
    }

    /// Regularization strength
    #[inline(always)]
    pub fn reg_lambda(&self) -> f64 {
        self.reg_lambda
    }
}

impl Objective for RegularizedMse {
    #[inline(always)]
    fn cost(&self, samples: &Samples, model: &LinearModel) -> f64 {
        cost(samples, model.weight, model.bias, self.reg_lambda)
    }

    #[inline(always)]
    fn gradient(&self, samples: &Samples, model: &LinearModel) -> Gradient {
        gradient(samples, model.weight, model.bias, self.reg_lambda)
    }
}
