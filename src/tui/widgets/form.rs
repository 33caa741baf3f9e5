//! Reusable form widget for the application and payment screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Height of a row of input boxes.
const FIELD_ROW_HEIGHT: u16 = 3;
/// Height of a section heading.
const HEADING_HEIGHT: u16 = 1;

/// What kind of input a [`FormField`] accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text typed character by character.
    Text,
    /// One of a fixed list of options, cycled with Left/Right.
    Choice(Vec<String>),
}

/// A single field within a [`Form`].
#[derive(Debug, Clone)]
pub struct FormField {
    /// Display label shown in the field's border.
    pub label: String,
    /// Current value. For choice fields, the selected option.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
    /// Whether the field is marked as required.
    pub required: bool,
    /// Whether the user has left the field or attempted a submit.
    pub touched: bool,
    /// Text or choice input.
    pub kind: FieldKind,
}

impl FormField {
    /// Creates a new text field.
    pub fn new(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
            required,
            touched: false,
            kind: FieldKind::Text,
        }
    }

    /// Creates a required choice field with the first option selected.
    pub fn choice(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            value: options.first().cloned().unwrap_or_default(),
            kind: FieldKind::Choice(options),
            ..Self::new(label, true)
        }
    }

    /// Returns the error to display: only once the field has been touched.
    pub fn visible_error(&self) -> Option<&str> {
        self.error.as_deref().filter(|_| self.touched)
    }
}

/// A multi-field form with focus management.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Moves focus to the given field, ignoring out-of-bounds indices.
    pub fn set_focus(&mut self, index: usize) {
        if index < self.fields.len() {
            self.focus = index;
        }
    }

    /// Marks the focused field touched and moves to the next, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.touch(self.focus);
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Marks the focused field touched and moves to the previous, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.touch(self.focus);
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Inserts a character at the end of the focused text field.
    pub fn insert_char(&mut self, ch: char) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Text
        {
            field.value.push(ch);
        }
    }

    /// Deletes the last character from the focused text field.
    pub fn delete_char(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus)
            && field.kind == FieldKind::Text
        {
            field.value.pop();
        }
    }

    /// Selects the next or previous option of the focused choice field, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(field) = self.fields.get_mut(self.focus) else {
            return;
        };
        let FieldKind::Choice(options) = &field.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let pos = options.iter().position(|o| *o == field.value).unwrap_or(0);
        let next = if forward {
            (pos + 1) % options.len()
        } else {
            (pos + options.len() - 1) % options.len()
        };
        field.value = options[next].clone();
    }

    /// Replaces the value of the field at `index`.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(index) {
            field.value = value.into();
        }
    }

    /// Marks the field at `index` as touched.
    pub fn touch(&mut self, index: usize) {
        if let Some(field) = self.fields.get_mut(index) {
            field.touched = true;
        }
    }

    /// Marks every field as touched, as a submit attempt does.
    pub fn touch_all(&mut self) {
        for field in &mut self.fields {
            field.touched = true;
        }
    }

    /// Sets an error message on a field by index.
    pub fn set_error(&mut self, index: usize, error: String) {
        if let Some(field) = self.fields.get_mut(index) {
            field.error = Some(error);
        }
    }

    /// Clears all field errors.
    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Returns `true` if any field has an error set.
    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Returns the value of the field at `index`, or an empty string if out of bounds.
    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

/// One row of a form's on-screen layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    /// A section heading.
    Heading(&'static str),
    /// Field indices laid out side by side.
    Fields(&'static [usize]),
}

impl FormRow {
    fn height(self) -> u16 {
        match self {
            FormRow::Heading(_) => HEADING_HEIGHT,
            FormRow::Fields(_) => FIELD_ROW_HEIGHT,
        }
    }
}

/// Returns the first layout row to draw so the row holding `focus` fits in `height`.
pub fn first_visible_row(layout: &[FormRow], focus: usize, height: u16) -> usize {
    let Some(focus_row) = layout
        .iter()
        .position(|row| matches!(row, FormRow::Fields(fields) if fields.contains(&focus)))
    else {
        return 0;
    };
    let mut start = 0;
    while start < focus_row
        && layout[start..=focus_row]
            .iter()
            .map(|row| row.height())
            .sum::<u16>()
            > height
    {
        start += 1;
    }
    start
}

/// Renders a form within the given area, scrolled to keep the focused field visible.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, layout: &[FormRow], frame: &mut Frame, area: Rect) {
    let start = first_visible_row(layout, form.focus, area.height);
    let bottom = area.y + area.height;
    let mut y = area.y;

    for row in &layout[start..] {
        let height = row.height();
        if y + height > bottom {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        match row {
            FormRow::Heading(title) => {
                let heading = Paragraph::new(Span::styled(
                    *title,
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ));
                frame.render_widget(heading, row_area);
            }
            FormRow::Fields(indices) => {
                let columns = Layout::horizontal(
                    indices
                        .iter()
                        .map(|_| Constraint::Ratio(1, indices.len() as u32)),
                )
                .split(row_area);
                for (column, &index) in columns.iter().zip(indices.iter()) {
                    if let Some(field) = form.fields.get(index) {
                        draw_field(field, index == form.focus, frame, *column);
                    }
                }
            }
        }
        y += height;
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
fn draw_field(field: &FormField, is_focused: bool, frame: &mut Frame, area: Rect) {
    let error = field.visible_error();
    let border_color = if error.is_some() {
        Color::Red
    } else if is_focused {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };

    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let spans = match field.kind {
        FieldKind::Text => {
            let mut spans = vec![Span::raw(field.value.as_str())];
            if is_focused {
                spans.push(Span::styled(
                    "\u{2588}",
                    Style::default().add_modifier(Modifier::SLOW_BLINK),
                ));
            }
            spans
        }
        FieldKind::Choice(_) if is_focused => vec![
            Span::styled("\u{25c0} ", Style::default().fg(Color::Yellow)),
            Span::raw(field.value.as_str()),
            Span::styled(" \u{25b6}", Style::default().fg(Color::Yellow)),
        ],
        FieldKind::Choice(_) => vec![Span::raw(field.value.as_str())],
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);

    // Error overlaps the bottom border of the field.
    if let Some(err) = error {
        let error_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        let err_area = Rect {
            x: area.x + 2,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(error_line, err_area);
    }
}
