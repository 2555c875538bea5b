//! Training runs for the stock regression tasks.

use fermiq_vqc::{Adam, Ansatz, NesterovMomentum, RegressionTask};

#[test]
fn linear_preset_reduces_loss() {
    let report = RegressionTask::preset(Ansatz::Linear).fit().unwrap();
    assert_eq!(report.losses.len(), 100);
    assert!(report.final_loss() < report.losses[0]);
    assert!(report.final_loss() < 0.9);
    assert_eq!(report.predictions.len(), 20);
}

#[test]
fn layered_preset_reduces_loss() {
    let report = RegressionTask::preset(Ansatz::Layered).fit().unwrap();
    assert_eq!(report.losses.len(), 250);
    assert!(report.final_loss() < report.losses[0]);
    assert!(report.final_loss() < 1.0);
}

#[test]
fn entangled_preset_beats_layered() {
    let layered = RegressionTask::preset(Ansatz::Layered).fit().unwrap();
    let entangled = RegressionTask::preset(Ansatz::Entangled).fit().unwrap();
    assert!(entangled.final_loss() < 0.1);
    assert!(entangled.final_loss() < layered.final_loss());
}

#[test]
fn observer_sees_every_step() {
    let mut task = RegressionTask::preset(Ansatz::Linear);
    task.iterations = 5;
    let mut seen = Vec::new();
    let report = task.fit_observed(|step, loss| seen.push((step, loss))).unwrap();
    assert_eq!(seen.len(), 5);
    assert_eq!(seen[4].0, 4);
    assert_eq!(seen.iter().map(|s| s.1).collect::<Vec<_>>(), report.losses);
}

#[test]
fn explicit_optimizer_matches_configured_one() {
    let mut task = RegressionTask::preset(Ansatz::Linear);
    task.iterations = 8;
    let configured = task.fit().unwrap();
    let explicit = task
        .fit_with(&mut NesterovMomentum::new(0.1, 0.9), |_, _| {})
        .unwrap();
    assert_eq!(configured.weights, explicit.weights);
}

#[test]
fn adam_also_fits_linear_target() {
    let task = RegressionTask::preset(Ansatz::Linear);
    let report = task.fit_with(&mut Adam::new(0.05), |_, _| {}).unwrap();
    assert!(report.final_loss() < report.initial_loss);
}

#[test]
fn zero_iterations_reports_initial_loss() {
    let mut task = RegressionTask::preset(Ansatz::Layered);
    task.iterations = 0;
    let report = task.fit().unwrap();
    assert!(report.losses.is_empty());
    assert_eq!(report.final_loss(), report.initial_loss);
    assert_eq!(report.weights, task.initial_weights);
}
