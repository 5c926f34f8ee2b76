use nalgebra::DVector;

use crate::{Error, Result};

/// Paired inputs and targets that are known to be non-empty and of equal length
#[derive(Debug, Clone, Copy)]
pub struct Samples<'a> {
    inputs: &'a DVector<f64>,
    targets: &'a DVector<f64>,
}

impl<'a> Samples<'a> {
    /// Pair up `inputs` and `targets`, rejecting empty or mismatched data.
    pub fn new(inputs: &'a DVector<f64>, targets: &'a DVector<f64>) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(Error::LengthMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        if inputs.is_empty() {
            return Err(Error::EmptySamples);
        }

        Ok(Self { inputs, targets })
    }

    /// The explanatory variable
    #[inline(always)]
    pub fn inputs(&self) -> &'a DVector<f64> {
        self.inputs
    }

    /// The response variable
    #[inline(always)]
    pub fn targets(&self) -> &'a DVector<f64> {
        self.targets
    }

    /// Number of samples, never zero
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false, kept for symmetry with `len`
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_reject_empty() {
        let empty = DVector::<f64>::zeros(0);
        assert_eq!(Samples::new(&empty, &empty).unwrap_err(), Error::EmptySamples);
    }

    #[test]
    fn samples_reject_mismatch() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DVector::from_vec(vec![1.0, 2.0]);
        assert_eq!(
            Samples::new(&x, &y).unwrap_err(),
            Error::LengthMismatch {
                inputs: 3,
                targets: 2
            }
        );
    }
}
