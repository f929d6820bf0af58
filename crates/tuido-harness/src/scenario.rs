#![forbid(unsafe_code)]

//! Scenario definitions and the sequential runner.
//!
//! A scenario is a named, categorized behavioral test executed against a
//! shared context. The runner executes scenarios one at a time in declaration
//! order, isolates failures per scenario (a panic becomes a failed result),
//! and stores results keyed by scenario id until cleared.

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::Serialize;
use tracing::{debug, info};

/// Scenario grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioCategory {
    /// Exercises the form engine.
    Form,
    /// Exercises the task list view.
    List,
    /// Exercises the full create/toggle/delete flow.
    Integration,
}

impl ScenarioCategory {
    /// Short label for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::List => "list",
            Self::Integration => "integration",
        }
    }
}

/// Per-scenario execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenarioStatus {
    /// Not yet run (or cleared).
    #[default]
    Idle,
    /// Currently executing.
    Running,
    /// Last run passed.
    Passed,
    /// Last run failed.
    Failed,
}

/// The outcome of one scenario execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    /// Whether the scenario's assertions held.
    pub passed: bool,
    /// One-line human-readable outcome.
    pub message: String,
    /// Optional actual-vs-expected detail for debugging.
    pub details: Option<String>,
}

impl ScenarioResult {
    /// A passing result.
    #[must_use]
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            details: None,
        }
    }

    /// A failing result.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: None,
        }
    }

    /// Attach actual-vs-expected details (builder).
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// A statically defined behavioral scenario over a context `C`.
pub struct Scenario<C> {
    /// Stable identifier; results are keyed by it.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Grouping.
    pub category: ScenarioCategory,
    /// What the scenario verifies.
    pub description: &'static str,
    /// The execution function.
    pub run: fn(&mut C) -> ScenarioResult,
}

/// Shared state scenarios run against.
///
/// The runner resets the context on [`clear`](ScenarioRunner::clear) and
/// settles it between scenarios so pending asynchronous effects from one
/// scenario cannot leak into the next.
pub trait ScenarioContext {
    /// Let pending timed effects complete (the settle-delay analogue).
    fn settle(&mut self);

    /// Reset to initial state: empty collection, no pending effects.
    fn reset(&mut self);
}

/// Sequential scenario runner with per-scenario isolation.
pub struct ScenarioRunner<C> {
    scenarios: Vec<Scenario<C>>,
    results: HashMap<&'static str, ScenarioResult>,
    /// Id of the scenario currently executing (for UI highlighting).
    current: Option<&'static str>,
    /// Whether a run-all pass is in progress.
    running: bool,
}

impl<C: ScenarioContext> ScenarioRunner<C> {
    /// Create a runner over a fixed scenario list.
    #[must_use]
    pub fn new(scenarios: Vec<Scenario<C>>) -> Self {
        Self {
            scenarios,
            results: HashMap::new(),
            current: None,
            running: false,
        }
    }

    /// The scenario list, in declaration order.
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario<C>] {
        &self.scenarios
    }

    /// Number of scenarios.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the runner has no scenarios.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// The result for a scenario, if it has run since the last clear.
    #[must_use]
    pub fn result(&self, id: &str) -> Option<&ScenarioResult> {
        self.results.get(id)
    }

    /// Current status of a scenario.
    #[must_use]
    pub fn status(&self, id: &str) -> ScenarioStatus {
        if self.current == Some(id) && self.running {
            return ScenarioStatus::Running;
        }
        match self.results.get(id) {
            Some(r) if r.passed => ScenarioStatus::Passed,
            Some(_) => ScenarioStatus::Failed,
            None => ScenarioStatus::Idle,
        }
    }

    /// Id of the scenario currently executing, if any.
    #[must_use]
    pub fn current(&self) -> Option<&'static str> {
        self.current
    }

    /// Whether a run-all pass is in progress.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Count of stored passing results.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.values().filter(|r| r.passed).count()
    }

    /// Count of stored failing results.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.values().filter(|r| !r.passed).count()
    }

    /// Run every scenario sequentially in declaration order.
    ///
    /// The context settles between scenarios; a failure (or panic) in one
    /// scenario never aborts the rest of the run.
    pub fn run_all(&mut self, ctx: &mut C) {
        self.running = true;
        info!(target: "tuido::harness", total = self.scenarios.len(), "run started");
        for i in 0..self.scenarios.len() {
            let id = self.scenarios[i].id;
            self.current = Some(id);
            ctx.settle();
            let result = Self::execute(&self.scenarios[i], ctx);
            debug!(
                target: "tuido::harness",
                id,
                passed = result.passed,
                message = %result.message,
                "scenario finished"
            );
            self.results.insert(id, result);
            ctx.settle();
        }
        self.current = None;
        self.running = false;
        info!(
            target: "tuido::harness",
            passed = self.passed_count(),
            failed = self.failed_count(),
            "run finished"
        );
    }

    /// Run a single scenario by id. Unknown ids are ignored.
    pub fn run_one(&mut self, ctx: &mut C, id: &str) {
        let Some(index) = self.scenarios.iter().position(|s| s.id == id) else {
            return;
        };
        let id = self.scenarios[index].id;
        self.current = Some(id);
        self.running = true;
        ctx.settle();
        let result = Self::execute(&self.scenarios[index], ctx);
        self.results.insert(id, result);
        ctx.settle();
        self.current = None;
        self.running = false;
    }

    /// Clear all results and reset the context to its initial state.
    pub fn clear(&mut self, ctx: &mut C) {
        self.results.clear();
        self.current = None;
        self.running = false;
        ctx.reset();
    }

    /// Execute one scenario, converting a panic into a failed result.
    fn execute(scenario: &Scenario<C>, ctx: &mut C) -> ScenarioResult {
        let run = scenario.run;
        match catch_unwind(AssertUnwindSafe(|| run(ctx))) {
            Ok(result) => result,
            Err(payload) => {
                let message = if let Some(s) = payload.downcast_ref::<&str>() {
                    (*s).to_string()
                } else if let Some(s) = payload.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "scenario panicked".to_string()
                };
                ScenarioResult::fail(format!("panicked: {message}"))
            }
        }
    }

    /// Structured report of the latest results.
    #[must_use]
    pub fn report(&self) -> RunReport {
        let results = self
            .scenarios
            .iter()
            .map(|s| ReportEntry {
                id: s.id,
                name: s.name,
                category: s.category,
                status: self.status(s.id),
                message: self.results.get(s.id).map(|r| r.message.clone()),
                details: self.results.get(s.id).and_then(|r| r.details.clone()),
            })
            .collect();
        RunReport {
            total: self.scenarios.len(),
            passed: self.passed_count(),
            failed: self.failed_count(),
            results,
        }
    }
}

/// One scenario's line in a [`RunReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ScenarioCategory,
    #[serde(serialize_with = "serialize_status")]
    pub status: ScenarioStatus,
    pub message: Option<String>,
    pub details: Option<String>,
}

/// Snapshot of a full run, serializable to JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ReportEntry>,
}

impl RunReport {
    /// Render as pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("report serializes")
    }
}

fn serialize_status<S: serde::Serializer>(
    status: &ScenarioStatus,
    ser: S,
) -> Result<S::Ok, S::Error> {
    let s = match status {
        ScenarioStatus::Idle => "idle",
        ScenarioStatus::Running => "running",
        ScenarioStatus::Passed => "passed",
        ScenarioStatus::Failed => "failed",
    };
    ser.serialize_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeCtx {
        settles: usize,
        resets: usize,
        trace: Vec<&'static str>,
    }

    impl ScenarioContext for FakeCtx {
        fn settle(&mut self) {
            self.settles += 1;
        }

        fn reset(&mut self) {
            self.resets += 1;
            self.trace.clear();
        }
    }

    fn passing(id: &'static str) -> Scenario<FakeCtx> {
        fn run(_: &mut FakeCtx) -> ScenarioResult {
            ScenarioResult::pass("ok")
        }
        Scenario {
            id,
            name: id,
            category: ScenarioCategory::Form,
            description: "always passes",
            run,
        }
    }

    fn runner() -> ScenarioRunner<FakeCtx> {
        fn first(ctx: &mut FakeCtx) -> ScenarioResult {
            ctx.trace.push("first");
            ScenarioResult::pass("first ok")
        }
        fn second(ctx: &mut FakeCtx) -> ScenarioResult {
            ctx.trace.push("second");
            ScenarioResult::fail("second failed").with_details("expected 1, got 2")
        }
        fn third(ctx: &mut FakeCtx) -> ScenarioResult {
            ctx.trace.push("third");
            panic!("boom");
        }
        fn fourth(ctx: &mut FakeCtx) -> ScenarioResult {
            ctx.trace.push("fourth");
            ScenarioResult::pass("fourth ok")
        }
        ScenarioRunner::new(vec![
            Scenario {
                id: "first",
                name: "First",
                category: ScenarioCategory::Form,
                description: "",
                run: first,
            },
            Scenario {
                id: "second",
                name: "Second",
                category: ScenarioCategory::List,
                description: "",
                run: second,
            },
            Scenario {
                id: "third",
                name: "Third",
                category: ScenarioCategory::Integration,
                description: "",
                run: third,
            },
            Scenario {
                id: "fourth",
                name: "Fourth",
                category: ScenarioCategory::Integration,
                description: "",
                run: fourth,
            },
        ])
    }

    #[test]
    fn run_all_executes_in_declaration_order() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        assert_eq!(ctx.trace, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn panic_becomes_failed_result_and_run_continues() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        let result = runner.result("third").unwrap();
        assert!(!result.passed);
        assert!(result.message.contains("boom"));
        assert_eq!(runner.status("fourth"), ScenarioStatus::Passed);
    }

    #[test]
    fn counts_reflect_results() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        assert_eq!(runner.passed_count(), 2);
        assert_eq!(runner.failed_count(), 2);
    }

    #[test]
    fn settle_runs_between_scenarios() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        // Two settles per scenario (before and after).
        assert_eq!(ctx.settles, 8);
    }

    #[test]
    fn statuses_before_and_after_run() {
        let mut runner = runner();
        assert_eq!(runner.status("first"), ScenarioStatus::Idle);
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        assert_eq!(runner.status("first"), ScenarioStatus::Passed);
        assert_eq!(runner.status("second"), ScenarioStatus::Failed);
        assert!(!runner.is_running());
        assert_eq!(runner.current(), None);
    }

    #[test]
    fn run_one_only_touches_target() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_one(&mut ctx, "second");
        assert_eq!(runner.status("second"), ScenarioStatus::Failed);
        assert_eq!(runner.status("first"), ScenarioStatus::Idle);
        assert_eq!(ctx.trace, vec!["second"]);
    }

    #[test]
    fn run_one_unknown_id_is_ignored() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_one(&mut ctx, "missing");
        assert_eq!(ctx.trace, Vec::<&str>::new());
    }

    #[test]
    fn clear_resets_results_and_context() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        runner.clear(&mut ctx);
        assert_eq!(runner.status("first"), ScenarioStatus::Idle);
        assert_eq!(runner.passed_count(), 0);
        assert_eq!(ctx.resets, 1);
    }

    #[test]
    fn rerun_overwrites_previous_result() {
        let mut runner = ScenarioRunner::new(vec![passing("only")]);
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        runner.run_all(&mut ctx);
        assert_eq!(runner.passed_count(), 1);
    }

    #[test]
    fn report_lists_all_scenarios_in_order() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        let report = runner.report();
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 2);
        let ids: Vec<&str> = report.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["first", "second", "third", "fourth"]);
    }

    #[test]
    fn report_serializes_to_json() {
        let mut runner = runner();
        let mut ctx = FakeCtx::default();
        runner.run_all(&mut ctx);
        let json = runner.report().to_json();
        assert!(json.contains("\"passed\": 2"));
        assert!(json.contains("\"second failed\""));
        assert!(json.contains("\"integration\""));
    }
}
