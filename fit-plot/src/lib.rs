#[macro_use]
extern crate log;

mod extent;
mod plot;

pub use extent::extent;
pub use plot::{plot_cost_history, plot_regression};

pub type Series = Vec<(f64, f64)>;

pub type PlotResult = Result<(), Box<dyn std::error::Error>>;
