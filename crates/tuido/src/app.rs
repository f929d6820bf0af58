#![forbid(unsafe_code)]

//! The top-level application model: screen routing and chrome.

use std::sync::Arc;

use tuido_core::{Clock, Event, KeyCode, KeyEvent, KeyEventKind, Rect};
use tuido_render::{Frame, Style};
use tuido_runtime::{Cmd, Model};
use tuido_widgets::{Paragraph, Widget};

use crate::config::AppConfig;
use crate::screens::{SuiteScreen, TasksScreen};
use crate::theme;

/// The two screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Tasks,
    Suite,
}

/// Application message: a wrapped terminal event.
pub struct AppMsg(pub Event);

impl From<Event> for AppMsg {
    fn from(event: Event) -> Self {
        Self(event)
    }
}

/// The application model.
pub struct AppModel {
    screen: ScreenId,
    tasks: TasksScreen,
    suite: SuiteScreen,
    config: AppConfig,
}

impl AppModel {
    /// Build the app with an injected clock and configuration.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, config: AppConfig) -> Self {
        Self {
            screen: ScreenId::Tasks,
            tasks: TasksScreen::new(clock, config),
            suite: SuiteScreen::new(config),
            config,
        }
    }

    /// The active screen.
    #[must_use]
    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    /// The tasks screen.
    #[must_use]
    pub fn tasks(&self) -> &TasksScreen {
        &self.tasks
    }

    /// The suite screen.
    #[must_use]
    pub fn suite(&self) -> &SuiteScreen {
        &self.suite
    }

    /// Global keys that bypass screen routing. Returns `None` when the event
    /// should fall through to the active screen.
    fn handle_global_key(&mut self, key: &KeyEvent) -> Option<Cmd<AppMsg>> {
        match key.code {
            KeyCode::F(1) => {
                self.screen = ScreenId::Tasks;
                Some(Cmd::none())
            }
            KeyCode::F(2) => {
                self.screen = ScreenId::Suite;
                Some(Cmd::none())
            }
            KeyCode::Char('c') if key.ctrl() => Some(Cmd::quit()),
            // Plain 'q' quits only outside the form screen, where it could
            // just as well be typed text.
            KeyCode::Char('q') if self.screen == ScreenId::Suite => Some(Cmd::quit()),
            _ => None,
        }
    }
}

impl Model for AppModel {
    type Message = AppMsg;

    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::tick(self.config.tick_interval)
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        let AppMsg(event) = msg;

        if let Event::Key(key) = &event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
            && let Some(cmd) = self.handle_global_key(key)
        {
            return cmd;
        }

        // Ticks always reach the tasks screen so pending creations commit
        // even while another screen is in front.
        if matches!(event, Event::Tick) {
            self.tasks.handle_event(&event);
            return Cmd::none();
        }

        match self.screen {
            ScreenId::Tasks => self.tasks.handle_event(&event),
            ScreenId::Suite => self.suite.handle_event(&event),
        }
        Cmd::none()
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.bounds();
        if area.is_empty() {
            return;
        }
        let (tab_bar, rest) = area.split_top(1);

        let tabs = match self.screen {
            ScreenId::Tasks => " tuido   [F1] Tasks*  [F2] Tests ",
            ScreenId::Suite => " tuido   [F1] Tasks   [F2] Tests* ",
        };
        Paragraph::new(tabs)
            .style(Style::new().fg(theme::accent::PRIMARY).bold())
            .render(tab_bar, frame);

        let body = Rect::new(rest.x + 1, rest.y, rest.width.saturating_sub(2), rest.height);
        match self.screen {
            ScreenId::Tasks => self.tasks.view(body, frame),
            ScreenId::Suite => self.suite.view(body, frame),
        }
    }
}
