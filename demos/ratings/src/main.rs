#[macro_use]
extern crate log;

mod convert;
mod history_csv;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use dataset::{Dataset, FilterMode, IqrFilter};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use lin_reg::{GradientDescent, GradientDescentParams, LinearModel, Samples, Summary};

use convert::{convert, Platform};
use history_csv::write_history;

const INITIAL_WEIGHT: f64 = 1.0;
const INITIAL_BIAS: f64 = -185.0;
const REG_LAMBDA: f64 = 1000.0;
const PLOT_DIMS: (u32, u32) = (1200, 900);

/// Fit Codeforces ratings against CodeChef ratings with gradient descent
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Csv file with one row per contestant
    #[arg(long, default_value = "final_cccf.csv")]
    data: PathBuf,

    /// Column holding the input rating
    #[arg(long, default_value = "cc_rating")]
    x_column: String,

    /// Column holding the target rating
    #[arg(long, default_value = "cf_rating")]
    y_column: String,

    /// Columns to remove outliers from, in application order
    #[arg(long, value_delimiter = ',', default_value = "cf_rating,cc_rating")]
    filter_columns: Vec<String>,

    /// `cascading` or `simultaneous`
    #[arg(long, default_value_t = FilterMode::Cascading)]
    filter_mode: FilterMode,

    #[arg(long, default_value_t = GradientDescentParams::default().learning_rate)]
    learning_rate: f64,

    #[arg(long, default_value_t = GradientDescentParams::default().iterations)]
    iterations: usize,

    #[arg(long, default_value_t = INITIAL_WEIGHT, allow_negative_numbers = true)]
    initial_weight: f64,

    #[arg(long, default_value_t = INITIAL_BIAS, allow_negative_numbers = true)]
    initial_bias: f64,

    /// L2 penalty on the weight
    #[arg(long, default_value_t = REG_LAMBDA)]
    reg_lambda: f64,

    /// Record the cost every this many iterations
    #[arg(long, default_value_t = GradientDescentParams::default().history_stride)]
    history_stride: usize,

    /// Log progress every this many iterations
    #[arg(long, default_value_t = GradientDescentParams::default().log_stride)]
    log_stride: usize,

    /// Write the cost history as csv
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Directory to render the cost curve and regression line into
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// CodeChef ratings to convert after training
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    predict: Vec<f64>,

    /// Prompt for ratings to convert after training
    #[arg(long)]
    interactive: bool,
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let args = Args::parse();
    let (samples_x, samples_y) = load(&args)?;

    let params = GradientDescentParams {
        learning_rate: args.learning_rate,
        iterations: args.iterations,
        history_stride: args.history_stride,
        log_stride: args.log_stride,
    };
    let gd = GradientDescent::new(params, args.reg_lambda)?;
    info!(
        "starting gradient descent with learning rate: {}, iterations: {}, initial w: {}, initial b: {}, lambda: {}",
        args.learning_rate, args.iterations, args.initial_weight, args.initial_bias, args.reg_lambda
    );

    let t0 = Instant::now();
    let fit = gd
        .train(&samples_x, &samples_y, LinearModel::new(args.initial_weight, args.initial_bias))
        .context("training")?;
    info!("training done in {}ms", t0.elapsed().as_millis());

    let samples = Samples::new(&samples_x, &samples_y)?;
    let summary = Summary::new(&samples, fit.model, gd.objective())?;
    println!("{}", summary);

    if let Some(path) = &args.history_out {
        write_history(path, &fit.history)?;
    }
    if let Some(dir) = &args.plot_dir {
        plot(dir, &args, &samples, &fit.model, fit.history.samples())?;
    }

    for rating in &args.predict {
        match convert(&fit.model, Platform::CodeChef, *rating) {
            Ok(c) => println!("{}", c),
            Err(e) => error!("cannot convert {}: {}", rating, e),
        }
    }
    if args.interactive {
        interactive(&fit.model)?;
    }

    Ok(())
}

/// Load, clean and split the dataset into inputs and targets
fn load(args: &Args) -> Result<(nalgebra::DVector<f64>, nalgebra::DVector<f64>)> {
    let mut columns = vec![args.x_column.as_str(), args.y_column.as_str()];
    for c in &args.filter_columns {
        if !columns.contains(&c.as_str()) {
            columns.push(c.as_str());
        }
    }

    let raw = Dataset::load_csv(&args.data, &columns)
        .with_context(|| format!("loading {}", args.data.display()))?;
    let clean = IqrFilter::new(args.filter_columns.iter().cloned())
        .with_mode(args.filter_mode)
        .apply(&raw)
        .context("removing outliers")?;

    info!("{} training samples", clean.nrows());
    for c in [&args.x_column, &args.y_column] {
        if let Some((min, max)) = clean.min_max(c)? {
            info!("{} range: [{:.0}, {:.0}]", c, min, max);
        }
    }

    Ok((clean.column(&args.x_column)?, clean.column(&args.y_column)?))
}

fn plot(
    dir: &Path,
    args: &Args,
    samples: &Samples,
    model: &LinearModel,
    history: &[(usize, f64)],
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let filename = dir.join("cost_history.png");
    fit_plot::plot_cost_history(history, &filename.to_string_lossy(), PLOT_DIMS)
        .map_err(|e| anyhow!("plotting cost history: {}", e))?;

    let observations: fit_plot::Series = samples
        .inputs()
        .iter()
        .zip(samples.targets().iter())
        .map(|(x, y)| (*x, *y))
        .collect();
    let filename = dir.join("regression.png");
    fit_plot::plot_regression(
        &observations,
        |x| model.predict_forward(x),
        (args.x_column.as_str(), args.y_column.as_str()),
        &filename.to_string_lossy(),
        PLOT_DIMS,
    )
    .map_err(|e| anyhow!("plotting regression: {}", e))?;

    Ok(())
}

/// Convert ratings typed in by the user until they quit
fn interactive(model: &LinearModel) -> Result<()> {
    let theme = ColorfulTheme::default();
    let choices = ["CodeChef -> Codeforces", "Codeforces -> CodeChef", "Quit"];
    loop {
        let from = match Select::with_theme(&theme)
            .with_prompt("Convert")
            .items(&choices)
            .default(0)
            .interact()?
        {
            0 => Platform::CodeChef,
            1 => Platform::Codeforces,
            _ => return Ok(()),
        };
        let rating: f64 = Input::with_theme(&theme)
            .with_prompt(format!("{} rating", from))
            .interact_text()?;

        match convert(model, from, rating) {
            Ok(c) => println!("{}", c),
            Err(e) => println!("cannot convert {}: {}", rating, e),
        }
    }
}
