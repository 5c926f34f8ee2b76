use crate::LinearModel;

/// Snapshot handed to observers after an update has been applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Zero based iteration index
    pub iteration: usize,
    /// Parameters after this iteration's update
    pub model: LinearModel,
    /// Cost evaluated at `model`
    pub cost: f64,
}

/// A periodic callback of the gradient descent loop.
/// `observe` is invoked on every iteration `i` with `i % stride() == 0`.
pub trait IterationObserver {
    /// How many iterations lie between two observations, at least 1
    fn stride(&self) -> usize;

    /// Handle a due iteration
    fn observe(&mut self, step: &Step);
}

/// Records the cost at a fixed stride
#[derive(Debug, Clone, PartialEq)]
pub struct CostHistory {
    stride: usize,
    samples: Vec<(usize, f64)>,
}

impl CostHistory {
    /// Create an empty history sampling every `stride` iterations
    pub fn new(stride: usize) -> Self {
        Self {
            stride,
            samples: Vec::new(),
        }
    }

    /// The recorded `(iteration, cost)` pairs in order
    #[inline(always)]
    pub fn samples(&self) -> &[(usize, f64)] {
        &self.samples
    }

    /// Number of recorded samples
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if nothing has been recorded
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The most recent sample
    #[inline(always)]
    pub fn last(&self) -> Option<&(usize, f64)> {
        self.samples.last()
    }

    /// Iteration of the first NaN or infinite cost
    pub fn first_non_finite(&self) -> Option<usize> {
        self.samples
            .iter()
            .find(|(_, cost)| !cost.is_finite())
            .map(|(i, _)| *i)
    }

    /// True if every recorded cost is finite
    #[inline(always)]
    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    /// True if the cost never went up between two samples
    pub fn is_non_increasing(&self) -> bool {
        self.samples.windows(2).all(|w| w[1].1 <= w[0].1)
    }

    /// Either non-finite or increasing somewhere
    #[inline(always)]
    pub fn diverged(&self) -> bool {
        !self.is_finite() || !self.is_non_increasing()
    }
}

impl IterationObserver for CostHistory {
    #[inline(always)]
    fn stride(&self) -> usize {
        self.stride
    }

    #[inline(always)]
    fn observe(&mut self, step: &Step) {
        self.samples.push((step.iteration, step.cost));
    }
}

/// Logs training progress at `info` level
#[derive(Debug, Clone, Copy)]
pub struct ProgressLogger {
    stride: usize,
}

impl ProgressLogger {
    /// Log every `stride` iterations
    pub fn new(stride: usize) -> Self {
        Self { stride }
    }
}

impl IterationObserver for ProgressLogger {
    #[inline(always)]
    fn stride(&self) -> usize {
        self.stride
    }

    fn observe(&mut self, step: &Step) {
        info!(
            "iteration {:6}: cost {:0.2}, w: {:0.6}, b: {:0.6}",
            step.iteration, step.cost, step.model.weight, step.model.bias
        );
    }
}
