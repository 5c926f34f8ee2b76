use std::{io, path::Path};

use anyhow::{Context, Result};
use lin_reg::CostHistory;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct HistoryRecord {
    iteration: usize,
    cost: f64,
}

/// Write the sampled cost trajectory to a csv file
pub(crate) fn write_history<P: AsRef<Path>>(path: P, history: &CostHistory) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())
        .with_context(|| format!("creating {}", path.as_ref().display()))?;
    write_history_to(file, history)?;
    info!("wrote {} cost samples to {}", history.len(), path.as_ref().display());

    Ok(())
}

fn write_history_to<W: io::Write>(out: W, history: &CostHistory) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for (iteration, cost) in history.samples() {
        wtr.serialize(HistoryRecord {
            iteration: *iteration,
            cost: *cost,
        })
        .context("writing cost sample")?;
    }
    wtr.flush().context("flushing cost history")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use lin_reg::{IterationObserver, LinearModel, Step};

    use super::*;

    #[test]
    fn history_as_csv() {
        let mut history = CostHistory::new(1000);
        for (iteration, cost) in [(0, 12.5), (1000, 3.25)] {
            history.observe(&Step {
                iteration,
                model: LinearModel::new(1.0, 0.0),
                cost,
            });
        }

        let mut out = Vec::new();
        write_history_to(&mut out, &history).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "iteration,cost\n0,12.5\n1000,3.25\n");
    }
}
