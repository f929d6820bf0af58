#![forbid(unsafe_code)]

//! The test-suite screen: scenario list, run controls, and results.
//!
//! Runs the visual scenarios synchronously against their own simulated tasks
//! screen; with the manual test clock a full run finishes without any real
//! waiting, so the UI never blocks perceptibly.

use tuido_core::{Event, KeyCode, KeyEvent, KeyEventKind, Rect};
use tuido_render::{Frame, Style};
use tuido_widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget};

use crate::config::AppConfig;
use crate::scenarios::{VisualCtx, scenarios};
use crate::theme;
use tuido_harness::{RunReport, ScenarioRunner, ScenarioStatus};

/// The suite screen.
pub struct SuiteScreen {
    runner: ScenarioRunner<VisualCtx>,
    ctx: VisualCtx,
    list_state: ListState,
}

impl SuiteScreen {
    /// Create the screen with its own scenario context.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            runner: ScenarioRunner::new(scenarios()),
            ctx: VisualCtx::new(config),
            list_state,
        }
    }

    /// The scenario runner (for reports and assertions).
    #[must_use]
    pub fn runner(&self) -> &ScenarioRunner<VisualCtx> {
        &self.runner
    }

    /// Structured report of the latest results.
    #[must_use]
    pub fn report(&self) -> RunReport {
        self.runner.report()
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
        {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('r') => self.runner.run_all(&mut self.ctx),
            KeyCode::Char('c') => self.runner.clear(&mut self.ctx),
            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    self.runner.run_one(&mut self.ctx, id);
                }
            }
            KeyCode::Up => self.list_state.select_prev(self.runner.len()),
            KeyCode::Down => self.list_state.select_next(self.runner.len()),
            _ => {}
        }
    }

    fn selected_id(&self) -> Option<&'static str> {
        self.list_state
            .selected()
            .and_then(|i| self.runner.scenarios().get(i))
            .map(|s| s.id)
    }

    /// Render the screen: header, summary, scenario rows, detail pane.
    pub fn view(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        let (header, rest) = area.split_top(1);
        Paragraph::new("Visual test suite — r: run all   Enter: run selected   c: clear")
            .style(Style::new().fg(theme::fg::PRIMARY).bold())
            .render(header, frame);

        let (summary, rest) = rest.split_top(1);
        let idle = self.runner.len() - self.runner.passed_count() - self.runner.failed_count();
        let summary_style = if self.runner.failed_count() > 0 {
            Style::new().fg(theme::accent::ERROR)
        } else if self.runner.passed_count() > 0 {
            Style::new().fg(theme::accent::SUCCESS)
        } else {
            Style::new().fg(theme::fg::MUTED)
        };
        Paragraph::new(format!(
            "{} passed, {} failed, {} not run",
            self.runner.passed_count(),
            self.runner.failed_count(),
            idle
        ))
        .style(summary_style)
        .render(summary, frame);

        let detail_height = 3;
        let (list_area, detail_area) =
            rest.split_top(rest.height.saturating_sub(detail_height));

        let items: Vec<ListItem> = self
            .runner
            .scenarios()
            .iter()
            .map(|s| {
                let status = self.runner.status(s.id);
                let glyph = status_glyph(status);
                let message = self
                    .runner
                    .result(s.id)
                    .map(|r| format!(" — {}", r.message))
                    .unwrap_or_default();
                ListItem::new(format!(
                    "{glyph} [{}] {}{message}",
                    s.category.label(),
                    s.name
                ))
                .style(status_style(status))
            })
            .collect();
        let list = List::new(items).highlight_symbol("> ");
        let mut state = self.list_state.clone();
        StatefulWidget::render(&list, list_area, frame, &mut state);

        self.render_detail(detail_area, frame);
    }

    fn render_detail(&self, area: Rect, frame: &mut Frame) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(scenario) = self.runner.scenarios().get(index) else {
            return;
        };
        let mut lines = vec![scenario.description.to_string()];
        if let Some(result) = self.runner.result(scenario.id)
            && let Some(details) = &result.details
            && !result.passed
        {
            lines.extend(details.lines().take(2).map(String::from));
        }
        Paragraph::new(lines.join("\n"))
            .style(Style::new().fg(theme::fg::MUTED))
            .render(area, frame);
    }
}

const fn status_glyph(status: ScenarioStatus) -> &'static str {
    match status {
        ScenarioStatus::Idle => "·",
        ScenarioStatus::Running => "▶",
        ScenarioStatus::Passed => "✓",
        ScenarioStatus::Failed => "✗",
    }
}

fn status_style(status: ScenarioStatus) -> Style {
    match status {
        ScenarioStatus::Idle => Style::new().fg(theme::fg::MUTED),
        ScenarioStatus::Running => Style::new().fg(theme::accent::WARN),
        ScenarioStatus::Passed => Style::new().fg(theme::accent::SUCCESS),
        ScenarioStatus::Failed => Style::new().fg(theme::accent::ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuido_harness::buffer_to_text;

    fn capture(screen: &SuiteScreen) -> String {
        let mut frame = Frame::new(90, 30);
        screen.view(frame.bounds(), &mut frame);
        buffer_to_text(&frame.buffer)
    }

    fn press(screen: &mut SuiteScreen, code: KeyCode) {
        screen.handle_event(&Event::key_code(code));
    }

    #[test]
    fn fresh_screen_shows_idle_suite() {
        let screen = SuiteScreen::new(AppConfig::default());
        let text = capture(&screen);
        assert!(text.contains("Visual test suite"));
        assert!(text.contains("0 passed, 0 failed"));
        assert!(text.contains("· [form]"));
    }

    #[test]
    fn run_all_marks_every_scenario() {
        let mut screen = SuiteScreen::new(AppConfig::default());
        press(&mut screen, KeyCode::Char('r'));
        let report = screen.report();
        assert_eq!(report.passed + report.failed, report.total);
        assert_eq!(report.failed, 0, "suite should be green: {:?}", report);
        assert!(capture(&screen).contains('✓'));
    }

    #[test]
    fn run_one_only_runs_selection() {
        let mut screen = SuiteScreen::new(AppConfig::default());
        press(&mut screen, KeyCode::Enter);
        let report = screen.report();
        assert_eq!(report.passed, 1);
        assert_eq!(
            screen.runner().status(screen.runner().scenarios()[0].id),
            ScenarioStatus::Passed
        );
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut screen = SuiteScreen::new(AppConfig::default());
        press(&mut screen, KeyCode::Char('r'));
        press(&mut screen, KeyCode::Char('c'));
        let text = capture(&screen);
        assert!(text.contains("0 passed, 0 failed"));
        assert!(!text.contains('✓'));
    }

    #[test]
    fn navigation_moves_selection() {
        let mut screen = SuiteScreen::new(AppConfig::default());
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Down);
        press(&mut screen, KeyCode::Up);
        assert_eq!(screen.list_state.selected(), Some(1));
    }
}
