use nalgebra::DVector;

use crate::{
    CostHistory, Error, IterationObserver, LinReg, LinearModel, Objective, ProgressLogger,
    RegularizedMse, Result, Samples, Step,
};

/// The hyperparameters of a gradient descent run
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescentParams {
    /// Step size, scaled by `1 / m` in each update
    pub learning_rate: f64,
    /// Fixed iteration budget, there is no early stopping
    pub iterations: usize,
    /// Record the cost every `history_stride` iterations
    pub history_stride: usize,
    /// Log progress every `log_stride` iterations
    pub log_stride: usize,
}

impl Default for GradientDescentParams {
    fn default() -> Self {
        Self {
            learning_rate: 3.3e-7,
            iterations: 100_000,
            history_stride: 1_000,
            log_stride: 10_000,
        }
    }
}

impl GradientDescentParams {
    /// Check every hyperparameter against its domain
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::InvalidHyperparameter {
                name: "learning_rate",
                value: self.learning_rate,
            });
        }
        if self.history_stride == 0 {
            return Err(Error::InvalidHyperparameter {
                name: "history_stride",
                value: 0.0,
            });
        }
        if self.log_stride == 0 {
            return Err(Error::InvalidHyperparameter {
                name: "log_stride",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct Fit {
    /// Parameters after the last iteration
    pub model: LinearModel,
    /// Sampled cost trajectory
    pub history: CostHistory,
}

/// Batch gradient descent with simultaneous parameter updates
#[derive(Debug, Clone)]
pub struct GradientDescent<O = RegularizedMse> {
    params: GradientDescentParams,
    objective: O,
}

impl GradientDescent<RegularizedMse> {
    /// Gradient descent on the ridge objective with strength `reg_lambda`
    pub fn new(params: GradientDescentParams, reg_lambda: f64) -> Result<Self> {
        Ok(Self::with_objective(params, RegularizedMse::new(reg_lambda)?))
    }
}

impl<O: Objective> GradientDescent<O> {
    /// Gradient descent on an arbitrary objective
    pub fn with_objective(params: GradientDescentParams, objective: O) -> Self {
        Self { params, objective }
    }

    /// The hyperparameters
    #[inline(always)]
    pub fn params(&self) -> &GradientDescentParams {
        &self.params
    }

    /// The minimized objective
    #[inline(always)]
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Run the full iteration budget, recording the cost every `history_stride`
    /// iterations and logging every `log_stride` iterations.
    pub fn train(
        &self,
        inputs: &DVector<f64>,
        targets: &DVector<f64>,
        initial: LinearModel,
    ) -> Result<Fit> {
        self.params.validate()?;

        let mut history = CostHistory::new(self.params.history_stride);
        let mut progress = ProgressLogger::new(self.params.log_stride);
        let mut observers: [&mut dyn IterationObserver; 2] = [&mut history, &mut progress];
        let model = self.train_with(inputs, targets, initial, &mut observers)?;

        if let Some(i) = history.first_non_finite() {
            warn!("cost became non-finite at iteration {}, the learning rate is likely too large", i);
        } else if !history.is_non_increasing() {
            warn!("cost increased during training, the learning rate is likely too large");
        }

        Ok(Fit { model, history })
    }

    /// Run the full iteration budget, notifying each observer whenever it is due.
    /// The cost is only evaluated on iterations where at least one observer is due.
    pub fn train_with(
        &self,
        inputs: &DVector<f64>,
        targets: &DVector<f64>,
        initial: LinearModel,
        observers: &mut [&mut dyn IterationObserver],
    ) -> Result<LinearModel> {
        let samples = Samples::new(inputs, targets)?;
        self.params.validate()?;
        if observers.iter().any(|o| o.stride() == 0) {
            return Err(Error::InvalidHyperparameter {
                name: "observer stride",
                value: 0.0,
            });
        }

        let m = samples.len() as f64;
        let alpha = self.params.learning_rate;
        debug!(
            "training on {} samples for {} iterations, alpha: {}",
            samples.len(),
            self.params.iterations,
            alpha
        );

        let mut model = initial;
        for i in 0..self.params.iterations {
            let grad = self.objective.gradient(&samples, &model);

            model = LinearModel {
                weight: model.weight - (alpha / m) * grad.dw,
                bias: model.bias - (alpha / m) * grad.db,
            };

            if observers.iter().any(|o| i % o.stride() == 0) {
                let step = Step {
                    iteration: i,
                    model,
                    cost: self.objective.cost(&samples, &model),
                };
                for o in observers.iter_mut().filter(|o| i % o.stride() == 0) {
                    o.observe(&step);
                }
            }
        }

        Ok(model)
    }
}

impl<O: Objective> LinReg for GradientDescent<O> {
    #[inline(always)]
    fn fit(
        &self,
        inputs: &DVector<f64>,
        targets: &DVector<f64>,
        initial: LinearModel,
    ) -> Result<Fit> {
        self.train(inputs, targets, initial)
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;
    use crate::cost;

    fn line() -> (DVector<f64>, DVector<f64>) {
        (
            DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            DVector::from_vec(vec![3.0, 5.0, 7.0, 9.0, 11.0]),
        )
    }

    fn params(learning_rate: f64, iterations: usize) -> GradientDescentParams {
        GradientDescentParams {
            learning_rate,
            iterations,
            history_stride: 100,
            log_stride: 1_000,
        }
    }

    #[test]
    fn converges_on_exact_line() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let (x, y) = line();
        let gd = GradientDescent::new(params(0.05, 10_000), 0.0).unwrap();
        let fit = gd.train(&x, &y, LinearModel::new(0.0, 0.0)).unwrap();
        info!("fit: {}", fit.model);

        assert!((fit.model.weight - 2.0).abs() < 1e-3);
        assert!((fit.model.bias - 1.0).abs() < 1e-3);
        assert_eq!(round(fit.model.weight, 3), 2.0);
        assert_eq!(round(fit.model.bias, 3), 1.0);

        let samples = Samples::new(&x, &y).unwrap();
        assert!(cost(&samples, fit.model.weight, fit.model.bias, 0.0) < 1e-6);
        assert_eq!(fit.history.len(), 100);
    }

    #[test]
    fn zero_iterations_is_identity() {
        let (x, y) = line();
        let initial = LinearModel::new(1.0, -185.0);
        let gd = GradientDescent::new(params(0.05, 0), 0.0).unwrap();
        let fit = gd.train(&x, &y, initial).unwrap();

        assert_eq!(fit.model, initial);
        assert!(fit.history.is_empty());
    }

    #[test]
    fn empty_samples_fail_before_iterating() {
        let empty = DVector::<f64>::zeros(0);
        let gd = GradientDescent::new(params(0.05, 0), 0.0).unwrap();
        let err = gd.train(&empty, &empty, LinearModel::new(0.0, 0.0)).unwrap_err();
        assert_eq!(err, Error::EmptySamples);
    }

    #[test]
    fn invalid_learning_rate() {
        let (x, y) = line();
        let gd = GradientDescent::new(params(0.0, 10), 0.0).unwrap();
        assert_eq!(
            gd.train(&x, &y, LinearModel::new(0.0, 0.0)).unwrap_err(),
            Error::InvalidHyperparameter {
                name: "learning_rate",
                value: 0.0
            }
        );
    }

    #[test]
    fn deterministic() {
        let (x, y) = line();
        let gd = GradientDescent::new(params(0.01, 2_000), 0.5).unwrap();
        let a = gd.train(&x, &y, LinearModel::new(0.3, 0.1)).unwrap();
        let b = gd.train(&x, &y, LinearModel::new(0.3, 0.1)).unwrap();

        assert_eq!(a.model.weight.to_bits(), b.model.weight.to_bits());
        assert_eq!(a.model.bias.to_bits(), b.model.bias.to_bits());
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn cost_non_increasing_for_stable_rate() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let y = DVector::from_vec(vec![2.9, 5.3, 6.8, 9.4, 10.7, 13.2]);
        let gd = GradientDescent::with_objective(
            GradientDescentParams {
                learning_rate: 0.02,
                iterations: 500,
                history_stride: 5,
                log_stride: 100,
            },
            RegularizedMse::unregularized(),
        );
        let fit = gd.train(&x, &y, LinearModel::new(0.0, 0.0)).unwrap();

        assert_eq!(fit.history.len(), 100);
        assert!(fit.history.is_non_increasing());
        assert!(!fit.history.diverged());
    }

    #[test]
    fn regularization_shrinks_weight() {
        let (x, y) = line();
        let initial = LinearModel::new(0.0, 0.0);
        let plain = GradientDescent::new(params(0.05, 20_000), 0.0)
            .unwrap()
            .train(&x, &y, initial)
            .unwrap();
        let ridge = GradientDescent::new(params(0.05, 20_000), 10.0)
            .unwrap()
            .train(&x, &y, initial)
            .unwrap();

        assert!(ridge.model.weight.abs() < plain.model.weight.abs());
        // closed form with an unpenalized intercept: Sxy / (Sxx + lambda) = 20 / 20
        assert_eq!(round(ridge.model.weight, 3), 1.0);
    }

    #[test]
    fn divergence_propagates() {
        let (x, y) = line();
        let gd = GradientDescent::new(params(1.0, 2_000), 0.0).unwrap();
        let fit = gd.train(&x, &y, LinearModel::new(0.0, 0.0)).unwrap();

        assert!(fit.history.diverged());
        assert!(!fit.model.weight.is_finite());
    }

    struct Counter {
        stride: usize,
        seen: Vec<usize>,
    }

    impl IterationObserver for Counter {
        fn stride(&self) -> usize {
            self.stride
        }

        fn observe(&mut self, step: &Step) {
            self.seen.push(step.iteration);
        }
    }

    #[test]
    fn observers_fire_independently() {
        let (x, y) = line();
        let gd = GradientDescent::new(params(0.01, 10), 0.0).unwrap();
        let mut threes = Counter {
            stride: 3,
            seen: vec![],
        };
        let mut fives = Counter {
            stride: 5,
            seen: vec![],
        };
        let mut observers: [&mut dyn IterationObserver; 2] = [&mut threes, &mut fives];
        gd.train_with(&x, &y, LinearModel::new(0.0, 0.0), &mut observers)
            .unwrap();

        assert_eq!(threes.seen, vec![0, 3, 6, 9]);
        assert_eq!(fives.seen, vec![0, 5]);
    }

    #[test]
    fn zero_stride_observer_rejected() {
        let (x, y) = line();
        let gd = GradientDescent::new(params(0.01, 10), 0.0).unwrap();
        let mut never = Counter {
            stride: 0,
            seen: vec![],
        };
        let mut observers: [&mut dyn IterationObserver; 1] = [&mut never];
        assert!(matches!(
            gd.train_with(&x, &y, LinearModel::new(0.0, 0.0), &mut observers),
            Err(Error::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn history_sampled_after_update() {
        let (x, y) = line();
        let gd = GradientDescent::new(params(0.01, 1), 0.0).unwrap();
        let fit = gd.train(&x, &y, LinearModel::new(0.0, 0.0)).unwrap();

        let samples = Samples::new(&x, &y).unwrap();
        let expected = cost(&samples, fit.model.weight, fit.model.bias, 0.0);
        assert_eq!(fit.history.samples(), &[(0, expected)]);
    }
}
