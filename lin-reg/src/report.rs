use std::fmt;

use crate::{Error, LinearModel, Objective, Result, Samples};

/// Coefficient of determination `1 - SS_res / SS_tot` of `model` on `samples`
pub fn r_squared(samples: &Samples, model: &LinearModel) -> Result<f64> {
    let targets = samples.targets();
    // the mean of identical values is not always exact, so test for them directly
    if targets.max() == targets.min() {
        return Err(Error::ZeroVariance);
    }
    let mean = targets.mean();

    let ss_tot = targets.map(|y| (y - mean).powi(2)).sum();
    let ss_res = (targets - model.predict(samples.inputs())).norm_squared();

    Ok(1.0 - ss_res / ss_tot)
}

/// Fit quality of a trained model
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// The trained parameters
    pub model: LinearModel,
    /// `None` when the targets have zero variance
    pub r_squared: Option<f64>,
    /// Objective value at `model`
    pub final_cost: f64,
    /// Number of samples the model was evaluated on
    pub n_samples: usize,
}

impl Summary {
    /// Evaluate `model` on `samples` under `objective`
    pub fn new<O: Objective>(samples: &Samples, model: LinearModel, objective: &O) -> Result<Self> {
        let r_squared = match r_squared(samples, &model) {
            Ok(r2) => Some(r2),
            Err(Error::ZeroVariance) => {
                warn!("targets have zero variance, R² is undefined");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            model,
            r_squared,
            final_cost: objective.cost(samples, &model),
            n_samples: samples.len(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "{}", rule)?;
        writeln!(f, "MODEL SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Final Model: {}", self.model)?;
        writeln!(f, "Weight (w): {:.6}", self.model.weight)?;
        writeln!(f, "Bias (b): {:.2}", self.model.bias)?;
        match self.r_squared {
            Some(r2) => writeln!(f, "R² Score: {:.6}", r2)?,
            None => writeln!(f, "R² Score: undefined (targets have zero variance)")?,
        }
        writeln!(f, "Final Cost: {:.4}", self.final_cost)?;
        writeln!(f, "Samples: {}", self.n_samples)?;
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;
    use round::round;

    use super::*;
    use crate::RegularizedMse;

    #[test]
    fn perfect_fit() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DVector::from_vec(vec![3.0, 5.0, 7.0]);
        let samples = Samples::new(&x, &y).unwrap();
        assert_eq!(r_squared(&samples, &LinearModel::new(2.0, 1.0)).unwrap(), 1.0);
    }

    #[test]
    fn mean_predictor_scores_zero() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DVector::from_vec(vec![3.0, 5.0, 7.0]);
        let samples = Samples::new(&x, &y).unwrap();
        assert_eq!(round(r_squared(&samples, &LinearModel::new(0.0, 5.0)).unwrap(), 9), 0.0);
    }

    #[test]
    fn constant_targets_are_undefined() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DVector::from_vec(vec![4.0, 4.0, 4.0]);
        let samples = Samples::new(&x, &y).unwrap();
        assert_eq!(
            r_squared(&samples, &LinearModel::new(1.0, 0.0)),
            Err(Error::ZeroVariance)
        );

        let summary =
            Summary::new(&samples, LinearModel::new(0.0, 4.0), &RegularizedMse::unregularized())
                .unwrap();
        assert_eq!(summary.r_squared, None);
        assert_eq!(summary.final_cost, 0.0);
        assert!(summary.to_string().contains("undefined"));
    }

    #[test]
    fn inexact_constant_targets_are_undefined() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DVector::from_vec(vec![0.1, 0.1, 0.1]);
        let samples = Samples::new(&x, &y).unwrap();
        assert_ne!(y.mean(), 0.1);
        assert_eq!(
            r_squared(&samples, &LinearModel::new(1.0, 0.0)),
            Err(Error::ZeroVariance)
        );
    }
}
