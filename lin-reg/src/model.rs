use nalgebra::DVector;

use crate::{Error, Result};

/// Vectorized model evaluation `w * x + b` over all inputs
pub fn predict(inputs: &DVector<f64>, weight: f64, bias: f64) -> DVector<f64> {
    inputs.map(|x| weight * x + bias)
}

/// The parameter vector of a univariate linear model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    /// Slope
    pub weight: f64,
    /// Intercept
    pub bias: f64,
}

impl LinearModel {
    /// Create a new model from its slope and intercept
    #[inline(always)]
    pub fn new(weight: f64, bias: f64) -> Self {
        Self { weight, bias }
    }

    /// Evaluate the model at every input
    #[inline(always)]
    pub fn predict(&self, inputs: &DVector<f64>) -> DVector<f64> {
        predict(inputs, self.weight, self.bias)
    }

    /// Map a single input onto the response scale
    #[inline(always)]
    pub fn predict_forward(&self, x: f64) -> f64 {
        self.weight * x + self.bias
    }

    /// Solve `y = w * x + b` for `x`
    pub fn predict_inverse(&self, y: f64) -> Result<f64> {
        if self.weight == 0.0 {
            return Err(Error::ZeroWeight);
        }
        Ok((y - self.bias) / self.weight)
    }
}

impl std::fmt::Display for LinearModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "y = ({:.6})x + ({:.2})", self.weight, self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_vectorized() {
        let x = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        assert_eq!(predict(&x, 3.0, 1.0), DVector::from_vec(vec![1.0, 4.0, 7.0]));
    }

    #[test]
    fn forward_and_inverse() {
        let model = LinearModel::new(0.5, -10.0);
        let y = model.predict_forward(1600.0);
        assert_eq!(y, 790.0);
        assert_eq!(model.predict_inverse(y).unwrap(), 1600.0);
    }

    #[test]
    fn inverse_with_zero_weight() {
        let model = LinearModel::new(0.0, 3.0);
        assert_eq!(model.predict_inverse(3.0), Err(Error::ZeroWeight));
    }
}
