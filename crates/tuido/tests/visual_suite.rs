//! End-to-end run of the visual scenario suite, plus the cross-cutting
//! properties the suite relies on.

use std::sync::Arc;
use std::time::Duration;

use tuido::AppConfig;
use tuido::scenarios::{VisualCtx, scenarios};
use tuido_core::{Event, KeyCode, TestClock};
use tuido_harness::{
    Scenario, ScenarioCategory, ScenarioContext, ScenarioResult, ScenarioRunner, ScenarioStatus,
    buffer_to_text,
};
use tuido_runtime::ProgramSimulator;

#[test]
fn the_whole_suite_passes() {
    let mut runner = ScenarioRunner::new(scenarios());
    let mut ctx = VisualCtx::default();
    runner.run_all(&mut ctx);

    let report = runner.report();
    assert_eq!(report.total, scenarios().len());
    assert_eq!(
        report.failed,
        0,
        "failing scenarios:\n{}",
        report
            .results
            .iter()
            .filter(|r| r.status == ScenarioStatus::Failed)
            .map(|r| format!("{}: {:?} {:?}", r.id, r.message, r.details))
            .collect::<Vec<_>>()
            .join("\n")
    );
    assert_eq!(report.passed, report.total);
}

#[test]
fn suite_report_serializes_with_every_scenario() {
    let mut runner = ScenarioRunner::new(scenarios());
    let mut ctx = VisualCtx::default();
    runner.run_all(&mut ctx);

    let json = runner.report().to_json();
    for scenario in scenarios() {
        assert!(json.contains(scenario.id), "report missing {}", scenario.id);
    }
}

#[test]
fn a_panicking_scenario_does_not_poison_the_rest() {
    fn exploding(_: &mut VisualCtx) -> ScenarioResult {
        panic!("deliberate failure");
    }

    let mut suite = vec![Scenario {
        id: "exploding",
        name: "Exploding",
        category: ScenarioCategory::Integration,
        description: "always panics",
        run: exploding,
    }];
    suite.extend(scenarios());

    let mut runner = ScenarioRunner::new(suite);
    let mut ctx = VisualCtx::default();
    runner.run_all(&mut ctx);

    let report = runner.report();
    assert_eq!(report.failed, 1);
    assert_eq!(report.passed, report.total - 1);

    let first = &report.results[0];
    assert_eq!(first.status, ScenarioStatus::Failed);
    assert!(first.message.as_deref().unwrap().contains("deliberate failure"));
}

#[test]
fn suite_is_deterministic_across_runs() {
    fn run_once() -> String {
        let mut runner = ScenarioRunner::new(scenarios());
        let mut ctx = VisualCtx::default();
        runner.run_all(&mut ctx);
        runner
            .report()
            .results
            .iter()
            .map(|r| format!("{}={:?}", r.id, r.status))
            .collect::<Vec<_>>()
            .join(",")
    }
    assert_eq!(run_once(), run_once());
}

#[test]
fn full_app_create_flow_under_the_simulator() {
    let clock = Arc::new(TestClock::new());
    let mut sim = ProgramSimulator::new(tuido::AppModel::new(
        clock.clone(),
        AppConfig::default(),
    ));
    sim.init();

    sim.type_str("Integration task");
    sim.inject_event(Event::key_code(KeyCode::Tab));
    sim.type_str("spanning every crate");
    sim.inject_event(Event::key_code(KeyCode::Enter));

    // Pending: the heading shows the loading marker.
    let text = buffer_to_text(sim.capture_frame(80, 24));
    assert!(text.contains("adding…"), "loading marker missing:\n{text}");

    clock.advance(Duration::from_millis(600));
    sim.inject_event(Event::Tick);

    let text = buffer_to_text(sim.capture_frame(80, 24));
    assert!(text.contains("Integration task"));
    assert!(text.contains("[ ]"));
    assert_eq!(sim.model().tasks().store().len(), 1);

    let task = &sim.model().tasks().store().tasks()[0];
    assert_eq!(task.description, "spanning every crate");
    assert!(!task.completed);
    assert!(task.updated_at >= task.created_at);
}

#[test]
fn context_reset_restores_a_clean_slate() {
    let mut ctx = VisualCtx::default();
    ctx.type_str("Some task");
    ctx.press(KeyCode::Enter);
    ctx.settle();
    assert_eq!(ctx.screen().store().len(), 1);

    ctx.reset();
    assert!(ctx.screen().store().is_empty());
    assert!(ctx.screen().last_submitted().is_none());
    assert!(!ctx.screen().is_loading());
}
