#![forbid(unsafe_code)]

//! The tasks screen: the create-task form above the task list.
//!
//! This screen is the container: it owns the authoritative task collection,
//! wires the form's submissions into it, and simulates asynchronous creation
//! latency. A submitted draft is held pending until the injected clock passes
//! the latency deadline; while pending, a loading flag is asserted and the
//! form is disabled. Once scheduled, a creation always commits — there is no
//! abort path.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use tuido_core::{Clock, Event, KeyCode, KeyEvent, KeyEventKind, Rect};
use tuido_render::{Frame, Style};
use tuido_widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget};

use crate::config::AppConfig;
use crate::form::{FORM_HEIGHT, FormOutcome, TaskForm};
use crate::tasks::{Priority, Task, TaskDraft, TaskStore};
use crate::theme;

/// Stable empty-state line, distinguishable from any populated list.
pub const EMPTY_STATE_TEXT: &str = "No tasks available";

/// Which pane receives key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneFocus {
    Form,
    List,
}

/// A submitted draft waiting out the simulated creation latency.
#[derive(Debug, Clone)]
struct PendingCreate {
    draft: TaskDraft,
    ready_at: DateTime<Utc>,
}

/// The tasks screen.
pub struct TasksScreen {
    form: TaskForm,
    store: TaskStore,
    list_state: ListState,
    focus: PaneFocus,
    pending: Option<PendingCreate>,
    last_submitted: Option<TaskDraft>,
    clock: Arc<dyn Clock>,
    config: AppConfig,
}

impl TasksScreen {
    /// Create the screen with an injected clock and configuration.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: AppConfig) -> Self {
        Self {
            form: TaskForm::new(),
            store: TaskStore::new(),
            list_state: ListState::default(),
            focus: PaneFocus::Form,
            pending: None,
            last_submitted: None,
            clock,
            config,
        }
    }

    /// Replace the form with one seeded from existing values (edit mode).
    pub fn seed_form(&mut self, draft: &TaskDraft) {
        self.form = TaskForm::seeded(draft);
    }

    // --- Accessors ---

    /// The task collection owner.
    #[must_use]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The form engine.
    #[must_use]
    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    /// The most recent submitted draft, if any.
    #[must_use]
    pub fn last_submitted(&self) -> Option<&TaskDraft> {
        self.last_submitted.as_ref()
    }

    /// Whether a creation is pending (form disabled, loading shown).
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Which pane currently receives key events.
    #[must_use]
    pub fn focus(&self) -> PaneFocus {
        self.focus
    }

    /// Id of the task selected in the list, if any.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.list_state
            .selected()
            .and_then(|i| self.store.tasks().get(i))
    }

    // --- Event handling ---

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        if matches!(event, Event::Tick) {
            self.poll_pending();
            return;
        }

        if let Event::Key(key) = event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
            && key.code == KeyCode::Escape
        {
            self.toggle_focus();
            return;
        }

        match self.focus {
            PaneFocus::Form => {
                match self.form.handle_event(event) {
                    FormOutcome::Submitted(draft) => self.begin_create(draft),
                    FormOutcome::Changed | FormOutcome::Ignored => {}
                }
            }
            PaneFocus::List => {
                if let Event::Key(key) = event
                    && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
                {
                    self.handle_list_key(key);
                }
            }
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PaneFocus::Form => {
                if self.list_state.selected().is_none() && !self.store.is_empty() {
                    self.list_state.select(Some(0));
                }
                PaneFocus::List
            }
            PaneFocus::List => PaneFocus::Form,
        };
    }

    fn handle_list_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Up => self.list_state.select_prev(self.store.len()),
            KeyCode::Down => self.list_state.select_next(self.store.len()),
            KeyCode::Char(' ') => {
                if let Some(task) = self.selected_task() {
                    let id = task.id.clone();
                    self.toggle_task(&id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(task) = self.selected_task() {
                    let id = task.id.clone();
                    self.delete_task(&id);
                }
            }
            _ => {}
        }
    }

    /// Record the submission and schedule the creation.
    fn begin_create(&mut self, draft: TaskDraft) {
        let ready_at = self.clock.now()
            + chrono::TimeDelta::from_std(self.config.create_latency).expect("latency fits");
        info!(target: "tuido::tasks", title = %draft.title, "creation scheduled");
        self.last_submitted = Some(draft.clone());
        self.pending = Some(PendingCreate { draft, ready_at });
        self.form.set_disabled(true);
    }

    /// Commit the pending creation once its deadline has passed.
    fn poll_pending(&mut self) {
        let now = self.clock.now();
        let due = self.pending.as_ref().is_some_and(|p| now >= p.ready_at);
        if due && let Some(pending) = self.pending.take() {
            let id = self.store.create(pending.draft, now);
            debug!(target: "tuido::tasks", %id, "task created");
            self.form.set_disabled(false);
        }
    }

    /// Flip a task's completion state.
    pub fn toggle_task(&mut self, id: &str) {
        self.store.toggle(id, self.clock.now());
    }

    /// Delete a task and clamp the selection.
    pub fn delete_task(&mut self, id: &str) {
        self.store.delete(id);
        self.list_state.clamp(self.store.len());
    }

    // --- Rendering ---

    /// Render the screen: form, list heading, list, status line.
    pub fn view(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let (form_area, rest) = area.split_top(FORM_HEIGHT);
        self.form.render(form_area, frame);

        let (heading, rest) = rest.split_top(1);
        let count = self.store.len();
        let heading_text = if self.is_loading() {
            format!("Tasks ({count}) — adding…")
        } else {
            format!("Tasks ({count})")
        };
        Paragraph::new(heading_text)
            .style(Style::new().fg(theme::fg::PRIMARY).bold())
            .render(heading, frame);

        let (list_area, status_area) = rest.split_top(rest.height.saturating_sub(1));
        if self.store.is_empty() {
            Paragraph::new(EMPTY_STATE_TEXT)
                .style(Style::new().fg(theme::fg::MUTED))
                .render(list_area, frame);
        } else {
            let items: Vec<ListItem> = self.store.tasks().iter().map(task_row).collect();
            let list = List::new(items)
                .highlight_symbol("> ")
                .highlight_style(Style::new().reverse());
            let mut state = self.list_state.clone();
            if self.focus != PaneFocus::List {
                state.select(None);
            }
            StatefulWidget::render(&list, list_area, frame, &mut state);
        }

        let status = match (self.focus, self.selected_task()) {
            (PaneFocus::List, Some(task)) => {
                format!("{} [d]   Space: toggle   Esc: form", task.delete_label())
            }
            (PaneFocus::List, None) => "Esc: back to form".to_string(),
            (PaneFocus::Form, _) => "Esc: task list   F2: test suite".to_string(),
        };
        Paragraph::new(status)
            .style(Style::new().fg(theme::fg::MUTED))
            .render(status_area, frame);
    }
}

/// One task as a list row.
///
/// The completion marker derives purely from `task.completed`; the short id
/// is the row's stable lookup marker.
fn task_row(task: &Task) -> ListItem {
    let marker = if task.completed { "[x]" } else { "[ ]" };
    let row = format!(
        "{marker} {} {} ({})",
        task.short_id(),
        task.title,
        task.priority
    );
    let style = if task.completed {
        Style::new().fg(theme::fg::MUTED).dim().strikethrough()
    } else {
        Style::new().fg(priority_color(task.priority))
    };
    ListItem::new(row).style(style)
}

const fn priority_color(priority: Priority) -> tuido_render::Rgb {
    match priority {
        Priority::Low => theme::priority::LOW,
        Priority::Medium => theme::priority::MEDIUM,
        Priority::High => theme::priority::HIGH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tuido_core::TestClock;
    use tuido_harness::buffer_to_text;

    fn screen() -> (Arc<TestClock>, TasksScreen) {
        let clock = Arc::new(TestClock::new());
        let screen = TasksScreen::new(clock.clone(), AppConfig::default());
        (clock, screen)
    }

    fn press(screen: &mut TasksScreen, code: KeyCode) {
        screen.handle_event(&Event::key_code(code));
    }

    fn type_str(screen: &mut TasksScreen, s: &str) {
        for c in s.chars() {
            screen.handle_event(&Event::key(c));
        }
    }

    fn submit_valid(screen: &mut TasksScreen, title: &str) {
        type_str(screen, title);
        press(screen, KeyCode::Enter);
    }

    fn settle(clock: &TestClock, screen: &mut TasksScreen) {
        clock.advance(Duration::from_millis(600));
        screen.handle_event(&Event::Tick);
    }

    fn capture(screen: &TasksScreen) -> String {
        let mut frame = Frame::new(70, 24);
        screen.view(frame.bounds(), &mut frame);
        buffer_to_text(&frame.buffer)
    }

    #[test]
    fn submit_schedules_creation_with_loading() {
        let (_clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");

        assert!(screen.is_loading());
        assert!(screen.form().is_disabled());
        assert!(screen.store().is_empty());
        assert_eq!(screen.last_submitted().unwrap().title, "Buy milk");
    }

    #[test]
    fn creation_commits_only_after_latency() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");

        clock.advance(Duration::from_millis(100));
        screen.handle_event(&Event::Tick);
        assert!(screen.store().is_empty(), "latency not elapsed yet");
        assert!(screen.is_loading());

        clock.advance(Duration::from_millis(400));
        screen.handle_event(&Event::Tick);
        assert_eq!(screen.store().len(), 1);
        assert!(!screen.is_loading());
        assert!(!screen.form().is_disabled());

        let task = &screen.store().tasks()[0];
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn new_tasks_prepend() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "first task");
        settle(&clock, &mut screen);
        submit_valid(&mut screen, "second task");
        settle(&clock, &mut screen);

        let titles: Vec<&str> = screen
            .store()
            .tasks()
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["second task", "first task"]);
    }

    #[test]
    fn invalid_submit_reaches_no_store() {
        let (_clock, mut screen) = screen();
        press(&mut screen, KeyCode::Enter);
        assert!(screen.store().is_empty());
        assert!(screen.last_submitted().is_none());
        assert!(!screen.is_loading());
    }

    #[test]
    fn typing_is_ignored_while_loading() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");
        type_str(&mut screen, "ignored");
        assert_eq!(screen.form().title_value(), "");
        settle(&clock, &mut screen);
        assert_eq!(screen.store().len(), 1);
    }

    #[test]
    fn escape_toggles_pane_focus() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");
        settle(&clock, &mut screen);

        assert_eq!(screen.focus(), PaneFocus::Form);
        press(&mut screen, KeyCode::Escape);
        assert_eq!(screen.focus(), PaneFocus::List);
        assert!(screen.selected_task().is_some());
        press(&mut screen, KeyCode::Escape);
        assert_eq!(screen.focus(), PaneFocus::Form);
    }

    #[test]
    fn space_toggles_selected_task() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");
        settle(&clock, &mut screen);
        press(&mut screen, KeyCode::Escape);

        clock.advance(Duration::from_millis(50));
        press(&mut screen, KeyCode::Char(' '));
        let task = &screen.store().tasks()[0];
        assert!(task.completed);
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn delete_key_removes_selected_task() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "first task");
        settle(&clock, &mut screen);
        submit_valid(&mut screen, "second task");
        settle(&clock, &mut screen);

        press(&mut screen, KeyCode::Escape);
        press(&mut screen, KeyCode::Char('d'));
        assert_eq!(screen.store().len(), 1);
        assert_eq!(screen.store().tasks()[0].title, "first task");
        // Selection stays valid.
        assert!(screen.selected_task().is_some());
    }

    #[test]
    fn empty_store_renders_empty_state() {
        let (_clock, screen) = screen();
        assert!(capture(&screen).contains(EMPTY_STATE_TEXT));
    }

    #[test]
    fn populated_store_renders_rows_in_order() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "first task");
        settle(&clock, &mut screen);
        submit_valid(&mut screen, "second task");
        settle(&clock, &mut screen);

        let text = capture(&screen);
        assert!(!text.contains(EMPTY_STATE_TEXT));
        let first = text.find("first task").unwrap();
        let second = text.find("second task").unwrap();
        assert!(second < first, "newest task renders above older");
        assert!(text.contains("[ ]"));
        assert!(text.contains(screen.store().tasks()[0].short_id()));
    }

    #[test]
    fn completed_task_renders_checked_marker() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");
        settle(&clock, &mut screen);
        let id = screen.store().tasks()[0].id.clone();
        screen.toggle_task(&id);
        assert!(capture(&screen).contains("[x]"));
    }

    #[test]
    fn loading_heading_shows_while_pending() {
        let (_clock, mut screen) = screen();
        submit_valid(&mut screen, "Buy milk");
        assert!(capture(&screen).contains("adding…"));
    }

    #[test]
    fn status_line_exposes_delete_label_with_quotes() {
        let (clock, mut screen) = screen();
        submit_valid(&mut screen, r#"say "hi" task"#);
        settle(&clock, &mut screen);
        press(&mut screen, KeyCode::Escape);
        let text = capture(&screen);
        assert!(text.contains(r#"Delete task "say "hi" task""#));
    }
}
