#[macro_use]
extern crate log;

use clap::Parser;
use lin_reg::{
    GradientDescent, GradientDescentParams, LinReg, LinearModel, Objective, RegularizedMse,
    Samples,
};
use nalgebra::DVector;
use nanorand::{Rng, WyRand};

/// Fit a noisy `y = 2x + 3` line and compare against the truth
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for the noise
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Noise is drawn uniformly from [-noise, noise]
    #[arg(long, default_value_t = 0.5)]
    noise: f64,

    #[arg(long, default_value_t = 0.01)]
    learning_rate: f64,

    #[arg(long, default_value_t = 1000)]
    iterations: usize,
}

fn main() -> Result<(), lin_reg::Error> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();
    let args = Args::parse();

    let mut rng = WyRand::new_seed(args.seed);
    let x = DVector::from_fn(10, |i, _| (i + 1) as f64);
    let y = x.map(|x| 2.0 * x + 3.0 + (rng.generate::<f64>() * 2.0 - 1.0) * args.noise);
    info!("x: {}", x.transpose());
    info!("y: {}", y.transpose());

    let objective = RegularizedMse::unregularized();
    let samples = Samples::new(&x, &y)?;
    let initial = LinearModel::new(0.0, 0.0);
    let initial_cost = objective.cost(&samples, &initial);
    info!("initial parameters: w={}, b={}, cost: {:.4}", initial.weight, initial.bias, initial_cost);

    let gd = GradientDescent::with_objective(
        GradientDescentParams {
            learning_rate: args.learning_rate,
            iterations: args.iterations,
            history_stride: 100,
            log_stride: 100,
        },
        objective,
    );
    let fit = gd.fit(&x, &y, initial)?;

    let final_cost = objective.cost(&samples, &fit.model);
    println!("final model: y = {:.4}x + {:.4}", fit.model.weight, fit.model.bias);
    println!("expected:    y ~ 2.0000x + 3.0000");
    println!("final cost: {:.4}, reduced by {:.4}", final_cost, initial_cost - final_cost);

    let predictions = fit.model.predict(&x);
    for i in (0..x.len()).step_by(3) {
        println!("  x={:.0}: y_true={:.2}, y_pred={:.2}", x[i], y[i], predictions[i]);
    }

    Ok(())
}
