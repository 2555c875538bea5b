//! Regress command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use fermiq_vqc::{Ansatz, OptimizerKind, RegressionTask};
use tracing::info;

use super::common::{progress_bar, write_series};
use super::config::RunConfig;

/// Execute the regress command.
pub fn execute(
    model: Ansatz,
    config: Option<&Path>,
    iterations: Option<usize>,
    export: Option<&Path>,
) -> Result<()> {
    let settings = RunConfig::load(config)
        .context("Failed to load run configuration")?
        .regression;

    let mut task = RegressionTask::preset(model);
    if let Some(n) = iterations.or(settings.iterations) {
        task.iterations = n;
    }
    if let Some(s) = settings.stepsize {
        match &mut task.optimizer {
            OptimizerKind::Nesterov { stepsize, .. } | OptimizerKind::Adam { stepsize } => {
                *stepsize = s;
            }
        }
    }
    info!(
        ansatz = %model,
        iterations = task.iterations,
        optimizer = ?task.optimizer,
        "resolved regression settings"
    );

    println!(
        "{} Fitting {} circuit: {} points, {} steps",
        style("→").cyan().bold(),
        style(model).yellow(),
        task.n_points,
        task.iterations
    );

    let pb = progress_bar(task.iterations, "fit")?;
    let report = task.fit_observed(|step, loss| {
        if task.reports_step(step) {
            pb.println(format!("  step {step:>4}  loss {loss:.6}"));
        }
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    println!(
        "{} Loss {:.6} → {}",
        style("✓").green().bold(),
        report.initial_loss,
        style(format!("{:.6}", report.final_loss())).green()
    );
    println!(
        "  Weights: [{}]",
        report
            .weights
            .iter()
            .map(|w| format!("{w:.4}"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    println!("\n  {:>8}  {:>10}  {:>10}", "x", "target", "fit");
    let data = &report.dataset;
    for ((x, y), p) in data.inputs.iter().zip(&data.targets).zip(&report.predictions) {
        println!("  {x:>8.4}  {y:>10.4}  {p:>10.4}");
    }

    if let Some(path) = export {
        write_series(path, "loss", &report.losses)?;
    }
    Ok(())
}
