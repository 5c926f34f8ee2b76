use plotters::prelude::*;

use super::{extent, PlotResult, Series};

/// Render the sampled cost against the iteration index.
/// Non-finite samples are skipped.
pub fn plot_cost_history(history: &[(usize, f64)], filename: &str, dims: (u32, u32)) -> PlotResult {
    let points: Series = history
        .iter()
        .filter(|(_, c)| c.is_finite())
        .map(|(i, c)| (*i as f64, *c))
        .collect();
    if points.len() < history.len() {
        warn!("skipping {} non-finite cost samples", history.len() - points.len());
    }
    let (x_min, x_max) = match extent(points.iter().map(|p| p.0)) {
        Some(r) => r,
        None => {
            warn!("no finite cost samples, not plotting {}", filename);
            return Ok(());
        }
    };
    let (y_min, y_max) = extent(points.iter().map(|p| p.1)).unwrap_or((0.0, 1.0));
    info!("n_samples: {}, cost_min: {}, cost_max: {}", points.len(), y_min, y_max);

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(70)
        .caption(
            "Cost Function History During Gradient Descent",
            ("sans-serif", 30).into_font().with_color(&BLACK),
        )
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_desc("Iteration")
        .y_desc("Cost")
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.2}", v))
        .draw()?;

    cc0.draw_series(LineSeries::new(points, &BLUE))?
        .label("cost")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    cc0.configure_series_labels().border_style(&BLACK).draw()?;

    root_area.present()?;
    info!("successfully plotted to {}", filename);

    Ok(())
}

/// Render the observations as a scatter along with the fitted line `fitted`
/// over the observed input range.
pub fn plot_regression<F>(
    observations: &Series,
    fitted: F,
    labels: (&str, &str),
    filename: &str,
    dims: (u32, u32),
) -> PlotResult
where
    F: Fn(f64) -> f64,
{
    let (x_min, x_max) = match extent(observations.iter().map(|p| p.0)) {
        Some(r) => r,
        None => {
            warn!("no observations, not plotting {}", filename);
            return Ok(());
        }
    };
    let line: Series = (0..100)
        .map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / 99.0;
            (x, fitted(x))
        })
        .collect();
    let (y_min, y_max) = extent(observations.iter().chain(line.iter()).map(|p| p.1))
        .unwrap_or((0.0, 1.0));

    let root_area = BitMapBackend::new(filename, dims).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut cc0 = ChartBuilder::on(&root_area)
        .margin(5)
        .set_all_label_area_size(70)
        .caption(
            format!("Linear Regression: {} vs {}", labels.0, labels.1),
            ("sans-serif", 30).into_font().with_color(&BLACK),
        )
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    cc0.configure_mesh()
        .x_labels(20)
        .y_labels(20)
        .x_desc(labels.0)
        .y_desc(labels.1)
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    cc0.draw_series(
        observations
            .iter()
            .map(|(x, y)| Circle::new((*x, *y), 2, BLUE.mix(0.5).filled())),
    )?
    .label("training data")
    .legend(|(x, y)| Circle::new((x + 10, y), 3, BLUE.filled()));
    cc0.draw_series(LineSeries::new(line, RED.stroke_width(2)))?
        .label("fitted line")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));
    cc0.configure_series_labels().border_style(&BLACK).draw()?;

    root_area.present()?;
    info!("successfully plotted to {}", filename);

    Ok(())
}
