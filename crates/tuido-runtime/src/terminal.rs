#![forbid(unsafe_code)]

//! Terminal driver: raw mode, event loop, and diffed presentation.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event as cte;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{execute, queue};
use tracing::debug;
use tuido_core::Event;
use tuido_render::{Buffer, Cell, Frame, Rgb, StyleFlags};

use crate::program::{Cmd, Model};

/// Poll timeout used when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Configuration for a [`Program`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramConfig {
    /// Tick interval requested before the model's own `Cmd::Tick`.
    pub tick: Option<Duration>,
}

impl ProgramConfig {
    /// Schedule ticks from startup (builder).
    #[must_use]
    pub fn with_tick(mut self, interval: Duration) -> Self {
        self.tick = Some(interval);
        self
    }
}

/// Restores the terminal when dropped, including on panic.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, LeaveAlternateScreen, Show, ResetColor);
        let _ = disable_raw_mode();
    }
}

/// Runs a [`Model`] against a real terminal.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
}

impl<M: Model> Program<M> {
    /// Create a program with default configuration.
    pub fn new(model: M) -> Self {
        Self {
            model,
            config: ProgramConfig::default(),
        }
    }

    /// Replace the configuration (builder).
    #[must_use]
    pub fn with_config(mut self, config: ProgramConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the event loop until the model quits.
    ///
    /// The terminal is restored on every exit path, panics included.
    pub fn run(mut self) -> io::Result<()> {
        let mut out = io::stdout();
        let _guard = TerminalGuard::enter(&mut out)?;

        let (mut width, mut height) = terminal::size()?;
        let mut running = true;
        let mut tick_rate = self.config.tick;
        let mut next_tick = tick_rate.map(|rate| Instant::now() + rate);
        let mut prev: Option<Buffer> = None;

        let cmd = self.model.init();
        execute_cmd(&mut self.model, cmd, &mut running, &mut tick_rate);
        if tick_rate.is_some() && next_tick.is_none() {
            next_tick = tick_rate.map(|rate| Instant::now() + rate);
        }
        present_model(&self.model, width, height, &mut prev, &mut out)?;

        while running {
            let timeout = next_tick.map_or(IDLE_POLL, |t| {
                t.saturating_duration_since(Instant::now()).min(IDLE_POLL)
            });

            let mut dispatched = false;
            if cte::poll(timeout)? {
                let raw = cte::read()?;
                if let Some(event) = Event::from_crossterm(raw) {
                    if let Event::Resize {
                        width: w,
                        height: h,
                    } = event
                    {
                        width = w;
                        height = h;
                        prev = None;
                    }
                    let cmd = self.model.update(M::Message::from(event));
                    execute_cmd(&mut self.model, cmd, &mut running, &mut tick_rate);
                    dispatched = true;
                }
            }

            if let (Some(rate), Some(due)) = (tick_rate, next_tick)
                && Instant::now() >= due
            {
                let cmd = self.model.update(M::Message::from(Event::Tick));
                execute_cmd(&mut self.model, cmd, &mut running, &mut tick_rate);
                next_tick = Some(due + rate);
                dispatched = true;
            }
            if next_tick.is_none() {
                next_tick = tick_rate.map(|rate| Instant::now() + rate);
            }

            if dispatched {
                present_model(&self.model, width, height, &mut prev, &mut out)?;
            }
        }

        Ok(())
    }
}

fn execute_cmd<M: Model>(
    model: &mut M,
    cmd: Cmd<M::Message>,
    running: &mut bool,
    tick_rate: &mut Option<Duration>,
) {
    match cmd {
        Cmd::None => {}
        Cmd::Quit => *running = false,
        Cmd::Msg(m) => {
            let next = model.update(m);
            execute_cmd(model, next, running, tick_rate);
        }
        Cmd::Batch(cmds) => {
            for c in cmds {
                execute_cmd(model, c, running, tick_rate);
                if !*running {
                    break;
                }
            }
        }
        Cmd::Tick(interval) => *tick_rate = Some(interval),
        Cmd::Log(text) => debug!(target: "tuido::runtime", "{text}"),
    }
}

fn present_model<M: Model>(
    model: &M,
    width: u16,
    height: u16,
    prev: &mut Option<Buffer>,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut frame = Frame::new(width, height);
    model.view(&mut frame);
    present(out, prev.as_ref(), &frame.buffer, frame.cursor())?;
    *prev = Some(frame.buffer);
    Ok(())
}

/// Write a buffer to the terminal, skipping rows unchanged since `prev`.
pub fn present(
    out: &mut impl Write,
    prev: Option<&Buffer>,
    buf: &Buffer,
    cursor: Option<(u16, u16)>,
) -> io::Result<()> {
    for y in 0..buf.height() {
        if let Some(prev) = prev
            && prev.width() == buf.width()
            && prev.row_cells(y) == buf.row_cells(y)
        {
            continue;
        }
        queue!(out, MoveTo(0, y))?;
        write_row(out, buf, y)?;
    }

    match cursor {
        Some((x, y)) => queue!(out, MoveTo(x, y), Show)?,
        None => queue!(out, Hide)?,
    }
    out.flush()
}

fn write_row(out: &mut impl Write, buf: &Buffer, y: u16) -> io::Result<()> {
    let mut current: Option<(Option<Rgb>, Option<Rgb>, StyleFlags)> = None;
    for cell in buf.row_cells(y) {
        if cell.is_continuation() {
            continue;
        }
        let style = (cell.fg, cell.bg, cell.attrs);
        if current != Some(style) {
            apply_cell_style(out, cell)?;
            current = Some(style);
        }
        match cell.content.as_char() {
            Some(c) => queue!(out, Print(c))?,
            None => queue!(out, Print(' '))?,
        }
    }
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_cell_style(out: &mut impl Write, cell: &Cell) -> io::Result<()> {
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    if let Some(fg) = cell.fg {
        queue!(out, SetForegroundColor(to_color(fg)))?;
    }
    if let Some(bg) = cell.bg {
        queue!(out, SetBackgroundColor(to_color(bg)))?;
    }
    for attr in to_attributes(cell.attrs) {
        queue!(out, SetAttribute(attr))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn to_attributes(flags: StyleFlags) -> Vec<Attribute> {
    let mut attrs = Vec::new();
    if flags.contains(StyleFlags::BOLD) {
        attrs.push(Attribute::Bold);
    }
    if flags.contains(StyleFlags::DIM) {
        attrs.push(Attribute::Dim);
    }
    if flags.contains(StyleFlags::ITALIC) {
        attrs.push(Attribute::Italic);
    }
    if flags.contains(StyleFlags::UNDERLINE) {
        attrs.push(Attribute::Underlined);
    }
    if flags.contains(StyleFlags::REVERSE) {
        attrs.push(Attribute::Reverse);
    }
    if flags.contains(StyleFlags::STRIKETHROUGH) {
        attrs.push(Attribute::CrossedOut);
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with(text: &str) -> Buffer {
        let mut buf = Buffer::new(10, 2);
        for (i, c) in text.chars().enumerate() {
            buf.set(i as u16, 0, Cell::from_char(c));
        }
        buf
    }

    #[test]
    fn present_writes_row_characters() {
        let buf = buffer_with("hello");
        let mut out = Vec::new();
        present(&mut out, None, &buf, None).unwrap();
        let text = String::from_utf8_lossy(&out).to_string();
        assert!(text.contains("hello"));
    }

    #[test]
    fn present_skips_unchanged_rows() {
        let buf = buffer_with("hello");
        let mut first = Vec::new();
        present(&mut first, None, &buf, None).unwrap();

        let mut second = Vec::new();
        present(&mut second, Some(&buf), &buf, None).unwrap();
        let text = String::from_utf8_lossy(&second).to_string();
        assert!(!text.contains("hello"));
    }

    #[test]
    fn present_rewrites_changed_rows() {
        let before = buffer_with("hello");
        let after = buffer_with("world");
        let mut out = Vec::new();
        present(&mut out, Some(&before), &after, None).unwrap();
        let text = String::from_utf8_lossy(&out).to_string();
        assert!(text.contains("world"));
    }

    #[test]
    fn size_change_invalidates_diff() {
        let before = Buffer::new(5, 2);
        let after = Buffer::new(10, 2);
        let mut out = Vec::new();
        present(&mut out, Some(&before), &after, None).unwrap();
        // All rows rewritten: two MoveTo sequences present.
        assert!(!out.is_empty());
    }

    #[test]
    fn to_attributes_maps_flags() {
        let attrs = to_attributes(StyleFlags::BOLD | StyleFlags::REVERSE);
        assert_eq!(attrs, vec![Attribute::Bold, Attribute::Reverse]);
        assert!(to_attributes(StyleFlags::empty()).is_empty());
    }

    #[test]
    fn to_color_preserves_components() {
        let c = to_color(Rgb::new(1, 2, 3));
        assert_eq!(c, Color::Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn config_builder_sets_tick() {
        let config = ProgramConfig::default().with_tick(Duration::from_millis(100));
        assert_eq!(config.tick, Some(Duration::from_millis(100)));
    }
}
