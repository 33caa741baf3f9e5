//! Details screen: the first wizard step, collecting the application itself.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{
    ApplicationDraft, DraftField, DraftInput, FinancialYear, NameInput, NamePart, PaymentOption,
    Person, normalize_name,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{Form, FormField, FormRow, draw_form};

/// Field index for the financial year choice.
const FINANCIAL_YEAR: usize = 0;
/// First of the child's three name fields.
const CHILD_NAME: usize = 1;
/// Field index for the date of birth.
const DATE_OF_BIRTH: usize = 4;
/// Field index for the time of birth.
const TIME_OF_BIRTH: usize = 5;
/// First of the father's three name fields.
const FATHER_NAME: usize = 6;
/// First of the mother's three name fields.
const MOTHER_NAME: usize = 9;
/// Field index for the hospital name or address.
const HOSPITAL_NAME: usize = 12;
/// First of the applicant's three name fields.
const APPLICANT_NAME: usize = 13;
/// Field index for the applicant's mobile number.
const MOBILE_NO: usize = 16;
/// Field index for the number of copies.
const COPIES: usize = 17;
/// Field index for the payment option choice.
const PAYMENT_OPTION: usize = 18;

static LAYOUT: &[FormRow] = &[
    FormRow::Heading("Basic Details"),
    FormRow::Fields(&[FINANCIAL_YEAR]),
    FormRow::Heading("Child's Details"),
    FormRow::Fields(&[CHILD_NAME, CHILD_NAME + 1, CHILD_NAME + 2]),
    FormRow::Fields(&[DATE_OF_BIRTH, TIME_OF_BIRTH]),
    FormRow::Heading("Parents' Details"),
    FormRow::Heading(Person::Father.heading()),
    FormRow::Fields(&[FATHER_NAME, FATHER_NAME + 1, FATHER_NAME + 2]),
    FormRow::Heading(Person::Mother.heading()),
    FormRow::Fields(&[MOTHER_NAME, MOTHER_NAME + 1, MOTHER_NAME + 2]),
    FormRow::Heading("Hospital Details"),
    FormRow::Fields(&[HOSPITAL_NAME]),
    FormRow::Heading("Applicant Details"),
    FormRow::Fields(&[APPLICANT_NAME, APPLICANT_NAME + 1, APPLICANT_NAME + 2]),
    FormRow::Fields(&[MOBILE_NO]),
    FormRow::Heading("Certificate Details"),
    FormRow::Fields(&[COPIES, PAYMENT_OPTION]),
];

fn name_base(person: Person) -> usize {
    match person {
        Person::Child => CHILD_NAME,
        Person::Father => FATHER_NAME,
        Person::Mother => MOTHER_NAME,
        Person::Applicant => APPLICANT_NAME,
    }
}

fn name_index(person: Person, part: NamePart) -> usize {
    let offset = match part {
        NamePart::First => 0,
        NamePart::Middle => 1,
        NamePart::Last => 2,
    };
    name_base(person) + offset
}

/// Returns the person and name part edited by the field at `index`, if any.
fn name_at(index: usize) -> Option<(Person, NamePart)> {
    Person::all()
        .iter()
        .flat_map(|&person| NamePart::all().iter().map(move |&part| (person, part)))
        .find(|&(person, part)| name_index(person, part) == index)
}

fn field_index(field: DraftField) -> usize {
    match field {
        DraftField::FinancialYear => FINANCIAL_YEAR,
        DraftField::Name(person, part) => name_index(person, part),
        DraftField::DateOfBirth => DATE_OF_BIRTH,
        DraftField::TimeOfBirth => TIME_OF_BIRTH,
        DraftField::HospitalName => HOSPITAL_NAME,
        DraftField::MobileNo => MOBILE_NO,
        DraftField::Copies => COPIES,
        DraftField::PaymentOption => PAYMENT_OPTION,
    }
}

fn name_fields() -> impl Iterator<Item = FormField> {
    NamePart::all()
        .iter()
        .map(|part| FormField::new(part.label(), true))
}

/// State for the details screen.
#[derive(Debug, Clone)]
pub struct ApplicationFormState {
    form: Form,
    choices: Vec<FinancialYear>,
}

impl ApplicationFormState {
    /// Creates an empty form offering the financial years ending at `current_year`.
    pub fn new(current_year: i32) -> Self {
        let choices = FinancialYear::choices(current_year);

        let mut fields = vec![FormField::choice(
            "Financial Year",
            choices.iter().map(ToString::to_string).collect(),
        )];
        fields.extend(name_fields());
        fields.push(FormField::new("Date of Birth (YYYY-MM-DD)", true));
        fields.push(FormField::new("Time of Birth (HH:MM)", true));
        fields.extend(name_fields());
        fields.extend(name_fields());
        fields.push(FormField::new("Hospital Name/Address", true));
        fields.extend(name_fields());
        fields.push(FormField::new("Mobile Number", true));
        fields.push(FormField::new("Number of Copies", true));
        fields.push(FormField::choice(
            "Payment Option",
            PaymentOption::all()
                .iter()
                .map(|o| o.label().to_string())
                .collect(),
        ));

        let mut state = Self {
            form: Form::new(fields),
            choices,
        };
        state.refresh_errors();
        state
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Collects the current field values.
    pub fn input(&self) -> DraftInput {
        let mut input = DraftInput {
            financial_year: self.form.value(FINANCIAL_YEAR).to_string(),
            child_name: NameInput::default(),
            date_of_birth: self.form.value(DATE_OF_BIRTH).to_string(),
            time_of_birth: self.form.value(TIME_OF_BIRTH).to_string(),
            father_name: NameInput::default(),
            mother_name: NameInput::default(),
            hospital_name: self.form.value(HOSPITAL_NAME).to_string(),
            applicant_name: NameInput::default(),
            mobile_no: self.form.value(MOBILE_NO).to_string(),
            copies: self.form.value(COPIES).to_string(),
            payment_option: PaymentOption::from_label(self.form.value(PAYMENT_OPTION))
                .unwrap_or_default(),
        };
        for &person in Person::all() {
            let name = input.name_mut(person);
            for &part in NamePart::all() {
                name.set_part(part, self.form.value(name_index(person, part)));
            }
        }
        input
    }

    /// Re-capitalizes the focused field if it holds part of a name.
    fn normalize_focused(&mut self) {
        let focus = self.form.focus();
        if name_at(focus).is_some() {
            let normalized = normalize_name(self.form.value(focus));
            self.form.set_value(focus, normalized);
        }
    }

    /// Re-runs validation, attaching one message per invalid field.
    ///
    /// Messages are only displayed for touched fields.
    fn refresh_errors(&mut self) -> Option<ApplicationDraft> {
        self.form.clear_errors();
        match self.input().validate(&self.choices) {
            Ok(draft) => Some(draft),
            Err(errors) => {
                for (field, error) in errors.iter() {
                    self.form.set_error(field_index(*field), error.to_string());
                }
                None
            }
        }
    }

    /// Touches every field and advances if the whole form is valid.
    fn submit(&mut self) -> Action {
        self.form.touch_all();
        match self.refresh_errors() {
            Some(draft) => Action::Advance(draft),
            None => {
                let invalid = self.form.fields().iter().filter(|f| f.error.is_some()).count();
                tracing::debug!(invalid, "details step rejected");
                Action::None
            }
        }
    }
}

impl ScreenState for ApplicationFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        let action = match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Left => {
                self.form.cycle_choice(false);
                Action::None
            }
            KeyCode::Right => {
                self.form.cycle_choice(true);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                self.normalize_focused();
                Action::None
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.insert_char(ch);
                self.normalize_focused();
                Action::None
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Esc => return Action::Quit,
            _ => return Action::None,
        };
        self.refresh_errors();
        action
    }
}

/// Renders the details screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_details(state: &ApplicationFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Birth Certificate Application Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [form_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    draw_form(state.form(), LAYOUT, frame, form_area);

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  \u{2190}/\u{2192}: choose  Enter: next  Esc: quit  F1: help",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;

    const YEAR: i32 = 2024;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn shift_press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_into(state: &mut ApplicationFormState, index: usize, s: &str) {
        state.form.set_focus(index);
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn type_name(state: &mut ApplicationFormState, person: Person, name: [&str; 3]) {
        for (&part, value) in NamePart::all().iter().zip(name) {
            type_into(state, name_index(person, part), value);
        }
    }

    fn fill_valid_form(state: &mut ApplicationFormState) {
        type_name(state, Person::Child, ["Arun", "Kumar", "Sharma"]);
        type_into(state, DATE_OF_BIRTH, "2024-03-15");
        type_into(state, TIME_OF_BIRTH, "09:45");
        type_name(state, Person::Father, ["Rajesh", "Kumar", "Sharma"]);
        type_name(state, Person::Mother, ["Sunita", "Devi", "Sharma"]);
        type_into(state, HOSPITAL_NAME, "City Hospital");
        type_name(state, Person::Applicant, ["Rajesh", "Kumar", "Sharma"]);
        type_into(state, MOBILE_NO, "9876543210");
        type_into(state, COPIES, "2");
        state.form.set_focus(0);
    }

    fn submit(state: &mut ApplicationFormState) -> Action {
        state.handle_key(press(KeyCode::Enter))
    }

    mod field_map {
        use super::*;

        #[test]
        fn name_indices_hold_name_labels() {
            let state = ApplicationFormState::new(YEAR);
            for &person in Person::all() {
                for &part in NamePart::all() {
                    let index = name_index(person, part);
                    assert_eq!(state.form().fields()[index].label, part.label());
                    assert_eq!(name_at(index), Some((person, part)));
                }
            }
        }

        #[test]
        fn non_name_fields_are_not_names() {
            for index in [
                FINANCIAL_YEAR,
                DATE_OF_BIRTH,
                TIME_OF_BIRTH,
                HOSPITAL_NAME,
                MOBILE_NO,
                COPIES,
                PAYMENT_OPTION,
            ] {
                assert_eq!(name_at(index), None, "field {index}");
            }
        }

        #[test]
        fn layout_covers_every_field_once() {
            let state = ApplicationFormState::new(YEAR);
            let mut seen: Vec<usize> = LAYOUT
                .iter()
                .filter_map(|row| match row {
                    FormRow::Fields(fields) => Some(*fields),
                    FormRow::Heading(_) => None,
                })
                .flatten()
                .copied()
                .collect();
            seen.sort_unstable();
            let expected: Vec<usize> = (0..state.form().fields().len()).collect();
            assert_eq!(seen, expected);
        }
    }

    mod typing {
        use super::*;

        #[test]
        fn name_is_capitalized_while_typing() {
            let mut state = ApplicationFormState::new(YEAR);
            type_into(&mut state, CHILD_NAME, "ABC");
            assert_eq!(state.form().value(CHILD_NAME), "Abc");
        }

        #[test]
        fn mixed_case_name_normalized_for_every_person() {
            let mut state = ApplicationFormState::new(YEAR);
            for &person in Person::all() {
                for &part in NamePart::all() {
                    type_into(&mut state, name_index(person, part), "sHaRmA");
                    assert_eq!(
                        state.form().value(name_index(person, part)),
                        "Sharma",
                        "{person:?} {part:?}"
                    );
                }
            }
        }

        #[test]
        fn backspace_keeps_normalized_name() {
            let mut state = ApplicationFormState::new(YEAR);
            type_into(&mut state, FATHER_NAME, "raj");
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.form().value(FATHER_NAME), "Ra");
        }

        #[test]
        fn other_fields_keep_their_case() {
            let mut state = ApplicationFormState::new(YEAR);
            type_into(&mut state, HOSPITAL_NAME, "CITY hospital");
            assert_eq!(state.form().value(HOSPITAL_NAME), "CITY hospital");
        }

        #[test]
        fn control_chars_are_not_typed() {
            let mut state = ApplicationFormState::new(YEAR);
            state.form.set_focus(HOSPITAL_NAME);
            state.handle_key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            });
            assert_eq!(state.form().value(HOSPITAL_NAME), "");
        }
    }

    mod choices {
        use super::*;

        #[test]
        fn financial_year_defaults_to_current() {
            let state = ApplicationFormState::new(YEAR);
            assert_eq!(state.input().financial_year, "2024-2025");
        }

        #[test]
        fn right_selects_older_financial_year() {
            let mut state = ApplicationFormState::new(YEAR);
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.input().financial_year, "2023-2024");
            state.handle_key(press(KeyCode::Left));
            state.handle_key(press(KeyCode::Left));
            assert_eq!(state.input().financial_year, "2015-2016");
        }

        #[test]
        fn payment_option_defaults_to_upi_and_cycles() {
            let mut state = ApplicationFormState::new(YEAR);
            assert_eq!(state.input().payment_option, PaymentOption::Upi);
            state.form.set_focus(PAYMENT_OPTION);
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.input().payment_option, PaymentOption::NetBanking);
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.input().payment_option, PaymentOption::Card);
        }

        #[test]
        fn arrows_on_text_field_do_nothing() {
            let mut state = ApplicationFormState::new(YEAR);
            type_into(&mut state, COPIES, "2");
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.form().value(COPIES), "2");
        }
    }

    mod tab_cycling {
        use super::*;

        #[test]
        fn tab_moves_forward() {
            let mut state = ApplicationFormState::new(YEAR);
            state.handle_key(press(KeyCode::Tab));
            assert_eq!(state.form().focus(), CHILD_NAME);
        }

        #[test]
        fn backtab_wraps_to_last_field() {
            let mut state = ApplicationFormState::new(YEAR);
            state.handle_key(shift_press(KeyCode::BackTab));
            assert_eq!(state.form().focus(), PAYMENT_OPTION);
        }

        #[test]
        fn leaving_empty_field_shows_its_error_only() {
            let mut state = ApplicationFormState::new(YEAR);
            state.form.set_focus(CHILD_NAME);
            state.handle_key(press(KeyCode::Tab));
            let fields = state.form().fields();
            assert_eq!(
                fields[CHILD_NAME].visible_error(),
                Some("First name is required")
            );
            assert_eq!(fields[CHILD_NAME + 1].visible_error(), None);
            assert_eq!(fields[MOBILE_NO].visible_error(), None);
        }
    }

    mod valid_submit {
        use super::*;

        #[test]
        fn advances_with_entered_values() {
            let mut state = ApplicationFormState::new(YEAR);
            fill_valid_form(&mut state);
            match submit(&mut state) {
                Action::Advance(draft) => {
                    assert_eq!(draft.financial_year, FinancialYear::new(2024));
                    assert_eq!(draft.child_name.first_name, "Arun");
                    assert_eq!(draft.child_name.middle_name, "Kumar");
                    assert_eq!(draft.child_name.last_name, "Sharma");
                    assert_eq!(
                        draft.date_of_birth,
                        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
                    );
                    assert_eq!(
                        draft.time_of_birth,
                        NaiveTime::from_hms_opt(9, 45, 0).unwrap()
                    );
                    assert_eq!(draft.mother_name.first_name, "Sunita");
                    assert_eq!(draft.hospital_name, "City Hospital");
                    assert_eq!(draft.applicant_name.first_name, "Rajesh");
                    assert_eq!(draft.mobile_no, "9876543210");
                    assert_eq!(draft.copies, 2);
                    assert_eq!(draft.payment_option, PaymentOption::Upi);
                }
                other => panic!("expected Advance, got {other:?}"),
            }
            assert!(!state.form().has_errors());
        }

        #[test]
        fn ten_digit_mobile_accepted() {
            let mut state = ApplicationFormState::new(YEAR);
            fill_valid_form(&mut state);
            state.form.set_value(MOBILE_NO, "1234567890");
            assert!(matches!(submit(&mut state), Action::Advance(_)));
        }
    }

    mod invalid_submit {
        use super::*;

        #[test]
        fn empty_submit_shows_all_errors() {
            let mut state = ApplicationFormState::new(YEAR);
            let action = submit(&mut state);
            assert_eq!(action, Action::None);
            let fields = state.form().fields();
            for (index, field) in fields.iter().enumerate() {
                let expect_error = index != FINANCIAL_YEAR && index != PAYMENT_OPTION;
                assert_eq!(
                    field.visible_error().is_some_and(|e| !e.is_empty()),
                    expect_error,
                    "field {index} ({})",
                    field.label
                );
            }
            assert_eq!(
                fields[HOSPITAL_NAME].visible_error(),
                Some("Hospital name/address is required")
            );
            assert_eq!(
                fields[DATE_OF_BIRTH].visible_error(),
                Some("Date of birth is required")
            );
        }

        #[test]
        fn each_missing_field_blocks_advance() {
            let required = (CHILD_NAME..=COPIES).collect::<Vec<_>>();
            for index in required {
                let mut state = ApplicationFormState::new(YEAR);
                fill_valid_form(&mut state);
                state.form.set_value(index, "");
                assert_eq!(submit(&mut state), Action::None, "field {index}");
                assert!(
                    state.form().fields()[index].visible_error().is_some(),
                    "field {index} should show an error"
                );
            }
        }

        #[test]
        fn wrong_length_mobile_rejected() {
            for mobile in ["123456789", "12345678901"] {
                let mut state = ApplicationFormState::new(YEAR);
                fill_valid_form(&mut state);
                state.form.set_value(MOBILE_NO, mobile);
                assert_eq!(submit(&mut state), Action::None);
                assert_eq!(
                    state.form().fields()[MOBILE_NO].visible_error(),
                    Some("Mobile number must be exactly 10 digits")
                );
            }
        }

        #[test]
        fn errors_cleared_once_fixed() {
            let mut state = ApplicationFormState::new(YEAR);
            submit(&mut state);
            assert!(state.form().has_errors());
            fill_valid_form(&mut state);
            assert!(matches!(submit(&mut state), Action::Advance(_)));
            assert!(!state.form().has_errors());
        }

        #[test]
        fn malformed_date_rejected() {
            let mut state = ApplicationFormState::new(YEAR);
            fill_valid_form(&mut state);
            state.form.set_value(DATE_OF_BIRTH, "15/03/2024");
            assert_eq!(submit(&mut state), Action::None);
            assert_eq!(
                state.form().fields()[DATE_OF_BIRTH].visible_error(),
                Some("invalid date 15/03/2024, expected YYYY-MM-DD")
            );
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn esc_quits() {
            let mut state = ApplicationFormState::new(YEAR);
            assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::Quit);
        }

        #[test]
        fn unhandled_key_returns_none() {
            let mut state = ApplicationFormState::new(YEAR);
            assert_eq!(state.handle_key(press(KeyCode::F(5))), Action::None);
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render_details(state: &ApplicationFormState, width: u16, height: u16) -> String {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| {
                    draw_details(state, frame, frame.area());
                })
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn renders_title_sections_and_footer() {
            let state = ApplicationFormState::new(YEAR);
            let output = render_details(&state, 100, 40);
            assert!(output.contains("Birth Certificate Application Form"));
            assert!(output.contains("Basic Details"));
            assert!(output.contains("Child's Details"));
            assert!(output.contains("Certificate Details"));
            assert!(output.contains("2024-2025"));
            assert!(output.contains("Enter: next"));
        }

        #[test]
        fn renders_errors_after_submit() {
            let mut state = ApplicationFormState::new(YEAR);
            submit(&mut state);
            let output = render_details(&state, 100, 40);
            assert!(output.contains("First name is required"));
        }

        #[test]
        fn scrolls_to_focused_field() {
            let mut state = ApplicationFormState::new(YEAR);
            type_into(&mut state, COPIES, "7");
            let output = render_details(&state, 100, 12);
            assert!(output.contains("Number of Copies"));
            assert!(!output.contains("Basic Details"));
        }
    }
}
