#![forbid(unsafe_code)]

//! The task form: field state, validation rules, touched tracking, and the
//! submit protocol.
//!
//! Validation timing: a field only shows errors once it has been touched
//! (focus left it, or a submit attempt forced it). A submit attempt marks all
//! fields touched and revalidates them inside one state transition, so any
//! frame rendered afterwards observes the complete touched+error update —
//! never a partial one.

use tuido_core::{Event, KeyCode, KeyEvent, KeyEventKind, Rect};
use tuido_render::Frame;
use tuido_widgets::{Choice, FieldErrorLine, Paragraph, TextInput, Widget};

use crate::tasks::{Priority, TaskDraft};
use crate::theme;

/// Minimum trimmed title length.
pub const TITLE_MIN: usize = 3;
/// Maximum trimmed title length.
pub const TITLE_MAX: usize = 100;
/// Maximum raw description length.
pub const DESCRIPTION_MAX: usize = 500;

/// Rows the rendered form occupies.
pub const FORM_HEIGHT: u16 = 11;

/// The form's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Priority,
}

impl Field {
    /// All fields in focus order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Description, Self::Priority];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Priority => "Priority",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Title => 0,
            Self::Description => 1,
            Self::Priority => 2,
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Priority,
            Self::Priority => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Priority,
            Self::Description => Self::Title,
            Self::Priority => Self::Description,
        }
    }
}

/// A field-scoped validation error.
///
/// Checked in declaration order per field; only the first failing rule is
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be at least 3 characters")]
    TitleTooShort,
    #[error("Title must be at most 100 characters")]
    TitleTooLong,
    #[error("Description must be at most 500 characters")]
    DescriptionTooLong,
    #[error("Priority must be low, medium, or high")]
    PriorityInvalid,
}

/// Validate a title value: required, then too short, then too long.
///
/// Length rules count Unicode scalars of the trimmed value.
#[must_use]
pub fn validate_title(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::TitleRequired);
    }
    let len = trimmed.chars().count();
    if len < TITLE_MIN {
        Some(FieldError::TitleTooShort)
    } else if len > TITLE_MAX {
        Some(FieldError::TitleTooLong)
    } else {
        None
    }
}

/// Validate a description value: optional, but capped at 500 raw characters.
#[must_use]
pub fn validate_description(value: &str) -> Option<FieldError> {
    if value.chars().count() > DESCRIPTION_MAX {
        Some(FieldError::DescriptionTooLong)
    } else {
        None
    }
}

/// Validate a priority label against the closed set.
#[must_use]
pub fn validate_priority(value: &str) -> Option<FieldError> {
    value
        .parse::<Priority>()
        .err()
        .map(|_| FieldError::PriorityInvalid)
}

/// Whether the form resets after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// No seed title: values reset to defaults after a successful submit.
    Create,
    /// Seeded with existing data: values are kept after submit.
    Edit,
}

/// What an event did to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The event was not for the form, or changed nothing.
    Ignored,
    /// Field values, focus, or errors changed.
    Changed,
    /// All fields validated; the draft is ready for the container.
    ///
    /// Yielded exactly once per successful submit.
    Submitted(TaskDraft),
}

/// The task form engine.
#[derive(Debug)]
pub struct TaskForm {
    title: TextInput,
    description: TextInput,
    priority: Choice,
    focused: Field,
    touched: [bool; 3],
    errors: [Option<FieldError>; 3],
    mode: FormMode,
    disabled: bool,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskForm {
    /// Create an empty form in create mode.
    #[must_use]
    pub fn new() -> Self {
        let mut form = Self {
            title: TextInput::new().with_placeholder("What needs doing?"),
            description: TextInput::new().with_placeholder("Optional details"),
            priority: Self::priority_choice(Priority::default()),
            focused: Field::Title,
            touched: [false; 3],
            errors: [None; 3],
            mode: FormMode::Create,
            disabled: false,
        };
        form.sync_focus();
        form
    }

    /// Create a form seeded with existing values.
    ///
    /// A non-empty seed title puts the form in edit mode, which keeps values
    /// after a successful submit instead of resetting them.
    #[must_use]
    pub fn seeded(draft: &TaskDraft) -> Self {
        let mut form = Self::new();
        form.title.set_value(draft.title.clone());
        form.description.set_value(draft.description.clone());
        form.priority = Self::priority_choice(draft.priority);
        form.mode = if draft.title.is_empty() {
            FormMode::Create
        } else {
            FormMode::Edit
        };
        form.sync_focus();
        form
    }

    fn priority_choice(selected: Priority) -> Choice {
        let index = Priority::ALL
            .iter()
            .position(|p| *p == selected)
            .unwrap_or(0);
        Choice::new(Priority::ALL.iter().map(|p| p.as_str().to_string()).collect())
            .with_selected(index)
            .with_selected_style(
                tuido_render::Style::new()
                    .fg(theme::accent::PRIMARY)
                    .reverse(),
            )
    }

    // --- Accessors ---

    /// Current raw title value.
    #[must_use]
    pub fn title_value(&self) -> &str {
        self.title.value()
    }

    /// Current raw description value.
    #[must_use]
    pub fn description_value(&self) -> &str {
        self.description.value()
    }

    /// Currently selected priority.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
            .selected_label()
            .parse()
            .unwrap_or_default()
    }

    /// Currently focused field.
    #[must_use]
    pub fn focused(&self) -> Field {
        self.focused
    }

    /// The current error for a field, if any.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors[field.index()]
    }

    /// Whether a field has been touched.
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.touched[field.index()]
    }

    /// The form's mode.
    #[must_use]
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Whether the form is disabled (creation pending).
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Enable or disable the form. A disabled form ignores all events.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // --- Event handling ---

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: &Event) -> FormOutcome {
        if self.disabled {
            return FormOutcome::Ignored;
        }
        if let Event::Key(key) = event
            && (key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat)
        {
            return self.handle_key(key, event);
        }
        FormOutcome::Ignored
    }

    fn handle_key(&mut self, key: &KeyEvent, event: &Event) -> FormOutcome {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.blur_and_focus(self.focused.next());
                FormOutcome::Changed
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.blur_and_focus(self.focused.prev());
                FormOutcome::Changed
            }
            KeyCode::Enter => self.submit(),
            _ => self.route_to_focused(event),
        }
    }

    /// Blur the current field (mark touched + validate) and focus another.
    fn blur_and_focus(&mut self, next: Field) {
        let current = self.focused;
        self.touched[current.index()] = true;
        self.errors[current.index()] = self.validate(current);
        self.focused = next;
        self.sync_focus();
    }

    fn route_to_focused(&mut self, event: &Event) -> FormOutcome {
        let changed = match self.focused {
            Field::Title => self.title.handle_event(event),
            Field::Description => self.description.handle_event(event),
            Field::Priority => self.priority.handle_event(event),
        };
        if !changed {
            return FormOutcome::Ignored;
        }
        // Touched fields revalidate live on every edit.
        let focused = self.focused;
        if self.touched[focused.index()] {
            self.errors[focused.index()] = self.validate(focused);
        }
        FormOutcome::Changed
    }

    /// The submit protocol.
    ///
    /// Marks every field touched and revalidates all of them in this single
    /// transition. On any failure the draft is withheld; on success the draft
    /// is yielded once and, in create mode only, the form resets.
    fn submit(&mut self) -> FormOutcome {
        self.touched = [true; 3];
        self.errors = [
            self.validate(Field::Title),
            self.validate(Field::Description),
            self.validate(Field::Priority),
        ];
        if self.errors.iter().any(Option::is_some) {
            return FormOutcome::Changed;
        }

        let draft = TaskDraft {
            title: self.title.value().trim().to_string(),
            description: self.description.value().to_string(),
            priority: self.priority(),
        };
        if self.mode == FormMode::Create {
            self.reset();
        }
        FormOutcome::Submitted(draft)
    }

    fn validate(&self, field: Field) -> Option<FieldError> {
        match field {
            Field::Title => validate_title(self.title.value()),
            Field::Description => validate_description(self.description.value()),
            Field::Priority => validate_priority(self.priority.selected_label()),
        }
    }

    /// Reset values, touched flags, and errors to defaults.
    pub fn reset(&mut self) {
        self.title.clear();
        self.description.clear();
        self.priority = Self::priority_choice(Priority::default());
        self.touched = [false; 3];
        self.errors = [None; 3];
        self.focused = Field::Title;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.title.set_focused(self.focused == Field::Title);
        self.description.set_focused(self.focused == Field::Description);
    }

    // --- Rendering ---

    /// Render the form.
    ///
    /// Layout is three label/input/error row triplets plus a footer. Error
    /// rows stay at fixed offsets so external checks can find them; a field's
    /// error renders only once the field is touched.
    pub fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }

        let rows: [(Field, u16); 3] = [
            (Field::Title, 0),
            (Field::Description, 3),
            (Field::Priority, 6),
        ];

        for (field, top) in rows {
            self.render_label(field, area.row(top), frame);
            let input_area = area.row(top + 1);
            match field {
                Field::Title => self.render_input(&self.title, input_area, frame),
                Field::Description => self.render_input(&self.description, input_area, frame),
                Field::Priority => self.priority.render(indent(input_area), frame),
            }
            if self.is_touched(field)
                && let Some(error) = self.error(field)
            {
                FieldErrorLine::new(error.to_string()).render(indent(area.row(top + 2)), frame);
            }
        }

        let footer = if self.disabled {
            Paragraph::new("Adding task…").style(tuido_render::Style::new().fg(theme::fg::MUTED))
        } else {
            Paragraph::new("Enter: add task   Tab: next field")
                .style(tuido_render::Style::new().fg(theme::fg::MUTED))
        };
        footer.render(area.row(10), frame);
    }

    fn render_label(&self, field: Field, area: Rect, frame: &mut Frame) {
        let style = if self.focused == field && !self.disabled {
            tuido_render::Style::new().fg(theme::accent::PRIMARY).bold()
        } else {
            tuido_render::Style::new().fg(theme::fg::PRIMARY)
        };
        Paragraph::new(field.label()).style(style).render(area, frame);
    }

    fn render_input(&self, input: &TextInput, area: Rect, frame: &mut Frame) {
        let area = indent(area);
        input.render(area, frame);
        if self.disabled {
            frame.set_cursor(None);
        }
    }
}

/// Indent a row by two columns.
fn indent(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(2),
        area.y,
        area.width.saturating_sub(2),
        area.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code))
    }

    fn type_str(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.handle_event(&Event::key(c));
        }
    }

    fn submit(form: &mut TaskForm) -> FormOutcome {
        form.handle_event(&press(KeyCode::Enter))
    }

    // --- Validation rules ---

    #[test]
    fn title_required_beats_too_short() {
        assert_eq!(validate_title(""), Some(FieldError::TitleRequired));
        assert_eq!(validate_title("   "), Some(FieldError::TitleRequired));
    }

    #[test]
    fn title_too_short_under_three_chars() {
        assert_eq!(validate_title("ab"), Some(FieldError::TitleTooShort));
        assert_eq!(validate_title(" ab "), Some(FieldError::TitleTooShort));
        assert_eq!(validate_title("abc"), None);
    }

    #[test]
    fn title_too_long_over_hundred_chars() {
        let long = "x".repeat(101);
        assert_eq!(validate_title(&long), Some(FieldError::TitleTooLong));
        assert_eq!(validate_title(&"x".repeat(100)), None);
    }

    #[test]
    fn title_trims_before_length_check() {
        let padded = format!("  {}  ", "x".repeat(100));
        assert_eq!(validate_title(&padded), None);
    }

    #[test]
    fn title_counts_chars_not_bytes() {
        // 100 two-byte characters stay within the limit.
        assert_eq!(validate_title(&"é".repeat(100)), None);
        assert_eq!(
            validate_title(&"é".repeat(101)),
            Some(FieldError::TitleTooLong)
        );
    }

    #[test]
    fn description_is_optional_but_capped_raw() {
        assert_eq!(validate_description(""), None);
        assert_eq!(validate_description(&"x".repeat(500)), None);
        assert_eq!(
            validate_description(&"x".repeat(501)),
            Some(FieldError::DescriptionTooLong)
        );
        // No trimming: 501 spaces still exceed the cap.
        assert_eq!(
            validate_description(&" ".repeat(501)),
            Some(FieldError::DescriptionTooLong)
        );
    }

    #[test]
    fn priority_accepts_only_the_closed_set() {
        assert_eq!(validate_priority("low"), None);
        assert_eq!(validate_priority("medium"), None);
        assert_eq!(validate_priority("high"), None);
        assert_eq!(
            validate_priority("urgent"),
            Some(FieldError::PriorityInvalid)
        );
    }

    proptest! {
        #[test]
        fn exactly_one_title_rule_applies(value in "\\PC{0,120}") {
            let trimmed = value.trim();
            let expected = if trimmed.is_empty() {
                Some(FieldError::TitleRequired)
            } else if trimmed.chars().count() < TITLE_MIN {
                Some(FieldError::TitleTooShort)
            } else if trimmed.chars().count() > TITLE_MAX {
                Some(FieldError::TitleTooLong)
            } else {
                None
            };
            prop_assert_eq!(validate_title(&value), expected);
        }

        #[test]
        fn description_error_iff_over_cap(len in 0usize..600) {
            let value = "a".repeat(len);
            let expected = len > DESCRIPTION_MAX;
            prop_assert_eq!(validate_description(&value).is_some(), expected);
        }
    }

    // --- Touched gating ---

    #[test]
    fn untouched_fields_report_no_errors() {
        let mut form = TaskForm::new();
        type_str(&mut form, "ab");
        assert_eq!(form.error(Field::Title), None);
        assert!(!form.is_touched(Field::Title));
    }

    #[test]
    fn blur_marks_touched_and_validates() {
        let mut form = TaskForm::new();
        type_str(&mut form, "ab");
        form.handle_event(&press(KeyCode::Tab));
        assert!(form.is_touched(Field::Title));
        assert_eq!(form.error(Field::Title), Some(FieldError::TitleTooShort));
    }

    #[test]
    fn touched_field_revalidates_live() {
        let mut form = TaskForm::new();
        type_str(&mut form, "ab");
        form.handle_event(&press(KeyCode::Tab));
        form.handle_event(&press(KeyCode::BackTab));
        assert_eq!(form.error(Field::Title), Some(FieldError::TitleTooShort));
        type_str(&mut form, "c");
        assert_eq!(form.error(Field::Title), None);
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut form = TaskForm::new();
        assert_eq!(form.focused(), Field::Title);
        form.handle_event(&press(KeyCode::Tab));
        assert_eq!(form.focused(), Field::Description);
        form.handle_event(&press(KeyCode::Tab));
        assert_eq!(form.focused(), Field::Priority);
        form.handle_event(&press(KeyCode::Tab));
        assert_eq!(form.focused(), Field::Title);
        form.handle_event(&press(KeyCode::BackTab));
        assert_eq!(form.focused(), Field::Priority);
    }

    // --- Submit protocol ---

    #[test]
    fn submit_with_empty_title_withholds_draft() {
        let mut form = TaskForm::new();
        let outcome = submit(&mut form);
        assert_eq!(outcome, FormOutcome::Changed);
        assert_eq!(form.error(Field::Title), Some(FieldError::TitleRequired));
    }

    #[test]
    fn submit_marks_all_fields_touched_atomically() {
        let mut form = TaskForm::new();
        submit(&mut form);
        for field in Field::ALL {
            assert!(form.is_touched(field), "{field:?} not touched");
        }
    }

    #[test]
    fn successful_submit_yields_trimmed_draft_once() {
        let mut form = TaskForm::new();
        type_str(&mut form, "  Buy milk  ");
        form.handle_event(&press(KeyCode::Tab));
        type_str(&mut form, "2 liters");
        form.handle_event(&press(KeyCode::Tab));
        form.handle_event(&press(KeyCode::Right)); // medium -> high

        let outcome = submit(&mut form);
        let FormOutcome::Submitted(draft) = outcome else {
            panic!("expected submission, got {outcome:?}");
        };
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, "2 liters");
        assert_eq!(draft.priority, Priority::High);
    }

    #[test]
    fn create_mode_resets_after_submit() {
        let mut form = TaskForm::new();
        type_str(&mut form, "Buy milk");
        let FormOutcome::Submitted(_) = submit(&mut form) else {
            panic!("expected submission");
        };
        assert_eq!(form.title_value(), "");
        assert_eq!(form.priority(), Priority::Medium);
        assert_eq!(form.focused(), Field::Title);
        for field in Field::ALL {
            assert!(!form.is_touched(field));
            assert_eq!(form.error(field), None);
        }
    }

    #[test]
    fn edit_mode_keeps_values_after_submit() {
        let seed = TaskDraft {
            title: "Existing task".into(),
            description: "old notes".into(),
            priority: Priority::High,
        };
        let mut form = TaskForm::seeded(&seed);
        assert_eq!(form.mode(), FormMode::Edit);

        let FormOutcome::Submitted(draft) = submit(&mut form) else {
            panic!("expected submission");
        };
        assert_eq!(draft.title, "Existing task");
        assert_eq!(form.title_value(), "Existing task");
        assert_eq!(form.priority(), Priority::High);
    }

    #[test]
    fn empty_seed_title_stays_in_create_mode() {
        let seed = TaskDraft {
            title: String::new(),
            description: "notes".into(),
            priority: Priority::Low,
        };
        let form = TaskForm::seeded(&seed);
        assert_eq!(form.mode(), FormMode::Create);
    }

    #[test]
    fn failed_submit_leaves_values_intact() {
        let mut form = TaskForm::new();
        type_str(&mut form, "ab");
        submit(&mut form);
        assert_eq!(form.title_value(), "ab");
        assert_eq!(form.error(Field::Title), Some(FieldError::TitleTooShort));
    }

    #[test]
    fn disabled_form_ignores_everything() {
        let mut form = TaskForm::new();
        form.set_disabled(true);
        type_str(&mut form, "abc");
        assert_eq!(form.title_value(), "");
        assert_eq!(submit(&mut form), FormOutcome::Ignored);
    }

    // --- Rendering ---

    fn frame_text(form: &TaskForm) -> String {
        let mut frame = Frame::new(60, FORM_HEIGHT);
        form.render(frame.bounds(), &mut frame);
        capture_text(&frame)
    }

    fn capture_text(frame: &Frame) -> String {
        let mut out = String::new();
        for y in 0..frame.height() {
            for cell in frame.buffer.row_cells(y) {
                if cell.is_continuation() {
                    continue;
                }
                out.push(cell.content.as_char().unwrap_or(' '));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn render_shows_no_error_before_touch() {
        let mut form = TaskForm::new();
        type_str(&mut form, "ab");
        assert!(!frame_text(&form).contains("Title must be"));
    }

    #[test]
    fn render_shows_error_after_submit() {
        let mut form = TaskForm::new();
        submit(&mut form);
        let text = frame_text(&form);
        assert!(text.contains("⚠ Title is required"));
    }

    #[test]
    fn render_shows_loading_footer_when_disabled() {
        let mut form = TaskForm::new();
        form.set_disabled(true);
        assert!(frame_text(&form).contains("Adding task…"));
    }

    #[test]
    fn render_shows_placeholders_when_empty() {
        let form = TaskForm::new();
        let text = frame_text(&form);
        assert!(text.contains("What needs doing?"));
        assert!(text.contains("Optional details"));
    }
}
