#![forbid(unsafe_code)]

//! The visual scenario suite.
//!
//! Scenarios drive a simulated tasks screen through synthetic terminal
//! events — the same wiring the interactive program uses — then assert on
//! captured frame text and on typed handles into the model. The shared
//! [`VisualCtx`] holds the simulator, the manually advanced test clock, and
//! the configuration; no scenario ever waits on a real timer.

use std::sync::Arc;
use std::time::Duration;

use tuido_core::{Event, KeyCode, TestClock};
use tuido_harness::{
    Scenario, ScenarioCategory, ScenarioContext, ScenarioResult, buffer_to_text,
};
use tuido_render::Frame;
use tuido_runtime::{Cmd, Model, ProgramSimulator};

use crate::config::AppConfig;
use crate::form::Field;
use crate::screens::tasks::{EMPTY_STATE_TEXT, TasksScreen};
use crate::tasks::{Priority, TaskDraft};

/// Capture dimensions for scenario frames.
const CAPTURE_WIDTH: u16 = 70;
const CAPTURE_HEIGHT: u16 = 24;

/// Message wrapper so the tasks screen can run under the simulator.
pub struct FixtureMsg(pub Event);

impl From<Event> for FixtureMsg {
    fn from(event: Event) -> Self {
        Self(event)
    }
}

/// The tasks screen as a simulatable model.
pub struct TasksFixture {
    /// The screen under test.
    pub screen: TasksScreen,
}

impl Model for TasksFixture {
    type Message = FixtureMsg;

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        self.screen.handle_event(&msg.0);
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.bounds();
        self.screen.view(area, frame);
    }
}

/// Shared context the scenarios run against.
pub struct VisualCtx {
    clock: Arc<TestClock>,
    config: AppConfig,
    sim: ProgramSimulator<TasksFixture>,
}

impl Default for VisualCtx {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl VisualCtx {
    /// Create a context with a fresh clock and simulated tasks screen.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let clock = Arc::new(TestClock::new());
        let sim = Self::build_sim(&clock, config);
        Self { clock, config, sim }
    }

    fn build_sim(clock: &Arc<TestClock>, config: AppConfig) -> ProgramSimulator<TasksFixture> {
        let mut sim = ProgramSimulator::new(TasksFixture {
            screen: TasksScreen::new(clock.clone(), config),
        });
        sim.init();
        sim
    }

    /// The screen under test.
    #[must_use]
    pub fn screen(&self) -> &TasksScreen {
        &self.sim.model().screen
    }

    /// Mutable access to the screen, for setup and direct mutator scenarios.
    pub fn screen_mut(&mut self) -> &mut TasksScreen {
        &mut self.sim.model_mut().screen
    }

    /// Type a string as individual key events.
    pub fn type_str(&mut self, text: &str) {
        self.sim.type_str(text);
    }

    /// Press a key.
    pub fn press(&mut self, code: KeyCode) {
        self.sim.inject_event(Event::key_code(code));
    }

    /// Advance the clock by `amount` and deliver a tick.
    pub fn advance(&mut self, amount: Duration) {
        self.clock.advance(amount);
        self.sim.inject_event(Event::Tick);
    }

    /// Capture the rendered screen as text.
    pub fn capture(&mut self) -> String {
        buffer_to_text(self.sim.capture_frame(CAPTURE_WIDTH, CAPTURE_HEIGHT))
    }

    /// Run a full create flow: type a title, submit, settle.
    fn create_task(&mut self, title: &str) {
        self.type_str(title);
        self.press(KeyCode::Enter);
        self.settle();
    }
}

impl ScenarioContext for VisualCtx {
    fn settle(&mut self) {
        self.clock.advance(self.config.settle);
        self.sim.inject_event(Event::Tick);
    }

    fn reset(&mut self) {
        self.sim = Self::build_sim(&self.clock, self.config);
    }
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

fn expect_contains(capture: &str, needle: &str, pass: &str) -> ScenarioResult {
    if capture.contains(needle) {
        ScenarioResult::pass(pass)
    } else {
        ScenarioResult::fail(format!("expected screen to contain {needle:?}"))
            .with_details(trimmed_capture(capture))
    }
}

fn expect_absent(capture: &str, needle: &str, pass: &str) -> ScenarioResult {
    if capture.contains(needle) {
        ScenarioResult::fail(format!("expected screen not to contain {needle:?}"))
            .with_details(trimmed_capture(capture))
    } else {
        ScenarioResult::pass(pass)
    }
}

/// Non-empty capture lines, for failure details.
fn trimmed_capture(capture: &str) -> String {
    capture
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

/// The statically defined suite, in execution order.
#[must_use]
pub fn scenarios() -> Vec<Scenario<VisualCtx>> {
    vec![
        Scenario {
            id: "form-required-title",
            name: "Empty title is rejected",
            category: ScenarioCategory::Form,
            description: "Submitting an empty form shows the required-title error and never reaches the store",
            run: form_required_title,
        },
        Scenario {
            id: "form-title-too-short",
            name: "Short title is rejected",
            category: ScenarioCategory::Form,
            description: "A two-character title reports the minimum-length rule",
            run: form_title_too_short,
        },
        Scenario {
            id: "form-title-too-long",
            name: "Overlong title is rejected",
            category: ScenarioCategory::Form,
            description: "A 101-character title reports the maximum-length rule",
            run: form_title_too_long,
        },
        Scenario {
            id: "form-description-too-long",
            name: "Overlong description is rejected",
            category: ScenarioCategory::Form,
            description: "A 501-character description reports the description cap",
            run: form_description_too_long,
        },
        Scenario {
            id: "form-touched-gating",
            name: "Errors wait for blur",
            category: ScenarioCategory::Form,
            description: "An invalid untouched field shows no error until focus leaves it",
            run: form_touched_gating,
        },
        Scenario {
            id: "form-submit-atomic",
            name: "Submit touches all fields at once",
            category: ScenarioCategory::Form,
            description: "The frame right after a failed submit shows every field touched with its error",
            run: form_submit_atomic,
        },
        Scenario {
            id: "form-create-resets",
            name: "Create mode resets after submit",
            category: ScenarioCategory::Form,
            description: "A successful create-mode submission clears values, touched flags, and errors",
            run: form_create_resets,
        },
        Scenario {
            id: "form-edit-keeps-values",
            name: "Edit mode keeps values",
            category: ScenarioCategory::Form,
            description: "A form seeded with an existing title does not reset after submitting",
            run: form_edit_keeps_values,
        },
        Scenario {
            id: "list-empty-state",
            name: "Empty list shows placeholder",
            category: ScenarioCategory::List,
            description: "An empty collection renders the stable empty-state text",
            run: list_empty_state,
        },
        Scenario {
            id: "list-order",
            name: "Rows follow collection order",
            category: ScenarioCategory::List,
            description: "The newest task renders above older ones",
            run: list_order,
        },
        Scenario {
            id: "list-toggle",
            name: "Toggle flips completion only",
            category: ScenarioCategory::List,
            description: "Space flips completed and bumps updated_at, leaving every other field alone",
            run: list_toggle,
        },
        Scenario {
            id: "list-delete",
            name: "Delete removes the selected row",
            category: ScenarioCategory::List,
            description: "Deleting one task preserves the order of the rest",
            run: list_delete,
        },
        Scenario {
            id: "list-delete-idempotent",
            name: "Deleting a ghost changes nothing",
            category: ScenarioCategory::List,
            description: "Deleting an unknown id leaves the collection identical",
            run: list_delete_idempotent,
        },
        Scenario {
            id: "list-delete-label",
            name: "Delete labels quote the title",
            category: ScenarioCategory::List,
            description: "The delete control's label embeds the title verbatim, quotes included",
            run: list_delete_label,
        },
        Scenario {
            id: "flow-create",
            name: "Full create flow",
            category: ScenarioCategory::Integration,
            description: "Typing title, description, and priority creates a matching task at the front",
            run: flow_create,
        },
        Scenario {
            id: "flow-latency",
            name: "Creation waits out the latency",
            category: ScenarioCategory::Integration,
            description: "The store stays empty and the form disabled until the creation delay elapses",
            run: flow_latency,
        },
    ]
}

fn form_required_title(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.press(KeyCode::Enter);
    let capture = ctx.capture();

    if ctx.screen().last_submitted().is_some() {
        return ScenarioResult::fail("creation callback ran despite an empty title");
    }
    if !ctx.screen().store().is_empty() {
        return ScenarioResult::fail("a task was created despite an empty title");
    }
    expect_contains(
        &capture,
        "Title is required",
        "empty title rejected with the required error",
    )
}

fn form_title_too_short(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str("ab");
    ctx.press(KeyCode::Enter);
    let capture = ctx.capture();

    if ctx.screen().last_submitted().is_some() {
        return ScenarioResult::fail("creation callback ran despite a short title");
    }
    expect_contains(
        &capture,
        "at least 3 characters",
        "two-character title rejected with the minimum-length error",
    )
}

fn form_title_too_long(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str(&"x".repeat(101));
    ctx.press(KeyCode::Enter);
    let capture = ctx.capture();

    if ctx.screen().last_submitted().is_some() {
        return ScenarioResult::fail("creation callback ran despite an overlong title");
    }
    expect_contains(
        &capture,
        "at most 100 characters",
        "101-character title rejected with the maximum-length error",
    )
}

fn form_description_too_long(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str("Valid title");
    ctx.press(KeyCode::Tab);
    ctx.type_str(&"d".repeat(501));
    ctx.press(KeyCode::Enter);
    let capture = ctx.capture();

    if ctx.screen().last_submitted().is_some() {
        return ScenarioResult::fail("creation callback ran despite an overlong description");
    }
    expect_contains(
        &capture,
        "at most 500 characters",
        "501-character description rejected with the description cap",
    )
}

fn form_touched_gating(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str("ab");
    let before_blur = ctx.capture();
    if before_blur.contains("at least 3 characters") {
        return ScenarioResult::fail("error shown before the field was touched")
            .with_details(trimmed_capture(&before_blur));
    }

    ctx.press(KeyCode::Tab);
    let after_blur = ctx.capture();
    expect_contains(
        &after_blur,
        "at least 3 characters",
        "error hidden until blur, visible after",
    )
}

fn form_submit_atomic(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.press(KeyCode::Enter);

    // The very next observable state: all fields touched, errors visible.
    let capture = ctx.capture();
    for field in Field::ALL {
        if !ctx.screen().form().is_touched(field) {
            return ScenarioResult::fail(format!(
                "{} not touched in the frame after submit",
                field.label()
            ));
        }
    }
    expect_contains(
        &capture,
        "Title is required",
        "one submit marks every field touched with errors visible together",
    )
}

fn form_create_resets(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str("Buy groceries");
    ctx.press(KeyCode::Tab);
    ctx.type_str("weekly run");
    ctx.press(KeyCode::Enter);
    ctx.settle();

    let form = ctx.screen().form();
    if form.title_value() != "" || form.description_value() != "" {
        return ScenarioResult::fail("form kept values after a create-mode submit").with_details(
            format!(
                "title={:?} description={:?}",
                form.title_value(),
                form.description_value()
            ),
        );
    }
    if form.priority() != Priority::Medium {
        return ScenarioResult::fail("priority did not reset to medium");
    }
    if Field::ALL.iter().any(|f| form.is_touched(*f)) {
        return ScenarioResult::fail("touched flags survived the reset");
    }
    if ctx.screen().store().len() != 1 {
        return ScenarioResult::fail("expected exactly one created task");
    }
    ScenarioResult::pass("create-mode form reset to defaults after submitting")
}

fn form_edit_keeps_values(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    let seed = TaskDraft {
        title: "Existing task".into(),
        description: "already written".into(),
        priority: Priority::High,
    };
    ctx.screen_mut().seed_form(&seed);

    ctx.press(KeyCode::Enter);
    ctx.settle();

    let form = ctx.screen().form();
    if form.title_value() != "Existing task" {
        return ScenarioResult::fail("edit-mode form reset its title")
            .with_details(format!("title={:?}", form.title_value()));
    }
    if form.priority() != Priority::High {
        return ScenarioResult::fail("edit-mode form reset its priority");
    }
    ScenarioResult::pass("edit-mode form kept its values after submitting")
}

fn list_empty_state(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    let capture = ctx.capture();
    expect_contains(
        &capture,
        EMPTY_STATE_TEXT,
        "empty collection renders the placeholder",
    )
}

fn list_order(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.create_task("first created");
    ctx.create_task("second created");

    let capture = ctx.capture();
    let result = expect_absent(&capture, EMPTY_STATE_TEXT, "");
    if !result.passed {
        return result;
    }
    match (capture.find("second created"), capture.find("first created")) {
        (Some(newer), Some(older)) if newer < older => {
            ScenarioResult::pass("newest task renders above the older one")
        }
        (Some(_), Some(_)) => ScenarioResult::fail("rows out of order")
            .with_details(trimmed_capture(&capture)),
        _ => ScenarioResult::fail("expected both task rows on screen")
            .with_details(trimmed_capture(&capture)),
    }
}

fn list_toggle(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.create_task("toggle me");
    let before = ctx.screen().store().tasks()[0].clone();

    ctx.press(KeyCode::Escape);
    ctx.advance(Duration::from_millis(50));
    ctx.press(KeyCode::Char(' '));

    let after = ctx.screen().store().tasks()[0].clone();
    if !after.completed {
        return ScenarioResult::fail("completed flag did not flip");
    }
    if after.updated_at <= before.updated_at {
        return ScenarioResult::fail("updated_at was not bumped");
    }
    if after.title != before.title
        || after.description != before.description
        || after.priority != before.priority
        || after.created_at != before.created_at
        || after.id != before.id
    {
        return ScenarioResult::fail("toggle changed more than completed/updated_at")
            .with_details(format!("before={before:?}\nafter={after:?}"));
    }
    let capture = ctx.capture();
    expect_contains(&capture, "[x]", "toggle flipped completion and nothing else")
}

fn list_delete(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.create_task("keep me");
    ctx.create_task("delete me");

    ctx.press(KeyCode::Escape);
    ctx.press(KeyCode::Char('d'));

    let titles: Vec<&str> = ctx
        .screen()
        .store()
        .tasks()
        .iter()
        .map(|t| t.title.as_str())
        .collect();
    if titles != ["keep me"] {
        return ScenarioResult::fail("unexpected tasks after delete")
            .with_details(format!("titles={titles:?}"));
    }
    let capture = ctx.capture();
    expect_absent(&capture, "delete me", "selected row deleted, order preserved")
}

fn list_delete_idempotent(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.create_task("survivor");
    let before = ctx.screen().store().tasks().to_vec();

    // Context mutator path: the id cannot exist.
    ctx.screen_mut().delete_task("no-such-id");

    let after = ctx.screen().store().tasks().to_vec();
    if before == after {
        ScenarioResult::pass("deleting an unknown id left the collection identical")
    } else {
        ScenarioResult::fail("collection changed on a ghost delete")
            .with_details(format!("before={} after={}", before.len(), after.len()))
    }
}

fn list_delete_label(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.create_task(r#"say "hello" task"#);
    ctx.press(KeyCode::Escape);

    let capture = ctx.capture();
    expect_contains(
        &capture,
        r#"Delete task "say "hello" task""#,
        "delete label embeds the quoted title verbatim",
    )
}

fn flow_create(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str("Test Task Visual");
    ctx.press(KeyCode::Tab);
    ctx.type_str("Descripción de prueba");
    ctx.press(KeyCode::Tab);
    ctx.press(KeyCode::Right); // medium -> high
    ctx.press(KeyCode::Enter);

    let Some(submitted) = ctx.screen().last_submitted().cloned() else {
        return ScenarioResult::fail("creation callback never ran");
    };
    let expected = TaskDraft {
        title: "Test Task Visual".into(),
        description: "Descripción de prueba".into(),
        priority: Priority::High,
    };
    if submitted != expected {
        return ScenarioResult::fail("submitted payload does not match the typed values")
            .with_details(format!("expected={expected:?}\nactual={submitted:?}"));
    }

    ctx.settle();
    let store = ctx.screen().store();
    if store.len() != 1 {
        return ScenarioResult::fail(format!("expected 1 task, found {}", store.len()));
    }
    let task = &store.tasks()[0];
    if task.title != expected.title
        || task.description != expected.description
        || task.priority != expected.priority
        || task.completed
    {
        return ScenarioResult::fail("created task does not match the submission")
            .with_details(format!("task={task:?}"));
    }
    let capture = ctx.capture();
    expect_contains(
        &capture,
        "Test Task Visual",
        "typed values created a matching task at the front",
    )
}

fn flow_latency(ctx: &mut VisualCtx) -> ScenarioResult {
    ctx.reset();
    ctx.type_str("Slow creation");
    ctx.press(KeyCode::Enter);

    let mid_capture = ctx.capture();
    if !ctx.screen().is_loading() || !ctx.screen().form().is_disabled() {
        return ScenarioResult::fail("loading flag or disabled form missing mid-creation");
    }
    if !ctx.screen().store().is_empty() {
        return ScenarioResult::fail("task committed before the latency elapsed");
    }
    let result = expect_contains(&mid_capture, "adding…", "");
    if !result.passed {
        return result;
    }

    // Short of the 500 ms deadline: still pending.
    ctx.advance(Duration::from_millis(300));
    if !ctx.screen().store().is_empty() {
        return ScenarioResult::fail("task committed 200 ms early");
    }

    // Past the deadline: committed, form re-enabled.
    ctx.advance(Duration::from_millis(300));
    if ctx.screen().store().len() != 1 {
        return ScenarioResult::fail("task never committed after the latency");
    }
    if ctx.screen().is_loading() || ctx.screen().form().is_disabled() {
        return ScenarioResult::fail("loading flag or disabled form survived the commit");
    }
    ScenarioResult::pass("creation stayed pending for the latency, then committed once")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuido_harness::{ScenarioRunner, ScenarioStatus};

    #[test]
    fn suite_has_unique_ids() {
        let suite = scenarios();
        let mut ids: Vec<&str> = suite.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), suite.len());
    }

    #[test]
    fn suite_covers_all_categories() {
        let suite = scenarios();
        for category in [
            ScenarioCategory::Form,
            ScenarioCategory::List,
            ScenarioCategory::Integration,
        ] {
            assert!(suite.iter().any(|s| s.category == category));
        }
    }

    #[test]
    fn every_scenario_passes() {
        let mut runner = ScenarioRunner::new(scenarios());
        let mut ctx = VisualCtx::default();
        runner.run_all(&mut ctx);

        let report = runner.report();
        let failures: Vec<String> = report
            .results
            .iter()
            .filter(|r| r.status != ScenarioStatus::Passed)
            .map(|r| format!("{}: {:?} {:?}", r.id, r.message, r.details))
            .collect();
        assert!(failures.is_empty(), "failed scenarios:\n{}", failures.join("\n"));
    }

    #[test]
    fn clear_resets_context_collection() {
        let mut runner = ScenarioRunner::new(scenarios());
        let mut ctx = VisualCtx::default();
        runner.run_all(&mut ctx);
        runner.clear(&mut ctx);
        assert!(ctx.screen().store().is_empty());
        assert_eq!(runner.passed_count(), 0);
    }
}
