use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::financial_year::{FinancialYear, validate_financial_year};
use super::name::{NameInput, NamePart, Person, PersonName};
use super::payment_option::PaymentOption;
use super::validation::{
    FieldErrors, parse_copies, parse_date_of_birth,
    parse_time_of_birth, validate_mobile_no, validate_name_part, validate_required,
};

/// Identifies a single field on the details step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    FinancialYear,
    Name(Person, NamePart),
    DateOfBirth,
    TimeOfBirth,
    HospitalName,
    MobileNo,
    Copies,
    PaymentOption,
}

/// A validated application, frozen when the applicant moves on to payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub financial_year: FinancialYear,
    pub child_name: PersonName,
    pub date_of_birth: NaiveDate,
    pub time_of_birth: NaiveTime,
    pub father_name: PersonName,
    pub mother_name: PersonName,
    pub hospital_name: String,
    pub applicant_name: PersonName,
    pub mobile_no: String,
    pub copies: u32,
    pub payment_option: PaymentOption,
}

/// Details-step values as typed, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftInput {
    pub financial_year: String,
    pub child_name: NameInput,
    pub date_of_birth: String,
    pub time_of_birth: String,
    pub father_name: NameInput,
    pub mother_name: NameInput,
    pub hospital_name: String,
    pub applicant_name: NameInput,
    pub mobile_no: String,
    pub copies: String,
    pub payment_option: PaymentOption,
}

impl DraftInput {
    /// Creates an empty input with `financial_year` and UPI pre-selected.
    pub fn new(financial_year: FinancialYear) -> Self {
        Self {
            financial_year: financial_year.to_string(),
            child_name: NameInput::default(),
            date_of_birth: String::new(),
            time_of_birth: String::new(),
            father_name: NameInput::default(),
            mother_name: NameInput::default(),
            hospital_name: String::new(),
            applicant_name: NameInput::default(),
            mobile_no: String::new(),
            copies: String::new(),
            payment_option: PaymentOption::default(),
        }
    }

    /// Returns the name input for `person`.
    pub fn name(&self, person: Person) -> &NameInput {
        match person {
            Person::Child => &self.child_name,
            Person::Father => &self.father_name,
            Person::Mother => &self.mother_name,
            Person::Applicant => &self.applicant_name,
        }
    }

    /// Returns the name input for `person`, mutably.
    pub fn name_mut(&mut self, person: Person) -> &mut NameInput {
        match person {
            Person::Child => &mut self.child_name,
            Person::Father => &mut self.father_name,
            Person::Mother => &mut self.mother_name,
            Person::Applicant => &mut self.applicant_name,
        }
    }

    /// Validates every field against the offered financial-year `choices`.
    ///
    /// All fields are checked so the caller can show every error at once.
    pub fn validate(
        &self,
        choices: &[FinancialYear],
    ) -> Result<ApplicationDraft, FieldErrors<DraftField>> {
        let mut errors = FieldErrors::default();

        let financial_year = errors.check(
            DraftField::FinancialYear,
            validate_financial_year(&self.financial_year, choices),
        );
        let child_name = self.validate_name(Person::Child, &mut errors);
        let date_of_birth = errors.check(
            DraftField::DateOfBirth,
            parse_date_of_birth(&self.date_of_birth),
        );
        let time_of_birth = errors.check(
            DraftField::TimeOfBirth,
            parse_time_of_birth(&self.time_of_birth),
        );
        let father_name = self.validate_name(Person::Father, &mut errors);
        let mother_name = self.validate_name(Person::Mother, &mut errors);
        errors.check(
            DraftField::HospitalName,
            validate_required(&self.hospital_name, "Hospital name/address"),
        );
        let applicant_name = self.validate_name(Person::Applicant, &mut errors);
        errors.check(DraftField::MobileNo, validate_mobile_no(&self.mobile_no));
        let copies = errors.check(DraftField::Copies, parse_copies(&self.copies));

        match (
            financial_year,
            child_name,
            date_of_birth,
            time_of_birth,
            father_name,
            mother_name,
            applicant_name,
            copies,
        ) {
            (
                Some(financial_year),
                Some(child_name),
                Some(date_of_birth),
                Some(time_of_birth),
                Some(father_name),
                Some(mother_name),
                Some(applicant_name),
                Some(copies),
            ) if errors.is_empty() => Ok(ApplicationDraft {
                financial_year,
                child_name,
                date_of_birth,
                time_of_birth,
                father_name,
                mother_name,
                hospital_name: self.hospital_name.clone(),
                applicant_name,
                mobile_no: self.mobile_no.clone(),
                copies,
                payment_option: self.payment_option,
            }),
            _ => Err(errors),
        }
    }

    fn validate_name(
        &self,
        person: Person,
        errors: &mut FieldErrors<DraftField>,
    ) -> Option<PersonName> {
        let input = self.name(person);
        let mut valid = true;
        for &part in NamePart::all() {
            let result = validate_name_part(input.part(part), part.required_label());
            valid &= errors
                .check(DraftField::Name(person, part), result)
                .is_some();
        }
        valid.then(|| PersonName {
            first_name: input.first_name.clone(),
            middle_name: input.middle_name.clone(),
            last_name: input.last_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidationError;

    fn choices() -> Vec<FinancialYear> {
        FinancialYear::choices(2024)
    }

    fn name(first: &str, middle: &str, last: &str) -> NameInput {
        NameInput {
            first_name: first.into(),
            middle_name: middle.into(),
            last_name: last.into(),
        }
    }

    fn valid_input() -> DraftInput {
        DraftInput {
            financial_year: "2024-2025".into(),
            child_name: name("Arun", "Kumar", "Sharma"),
            date_of_birth: "2024-03-15".into(),
            time_of_birth: "09:45".into(),
            father_name: name("Rajesh", "Kumar", "Sharma"),
            mother_name: name("Sunita", "Devi", "Sharma"),
            hospital_name: "City Hospital".into(),
            applicant_name: name("Rajesh", "Kumar", "Sharma"),
            mobile_no: "9876543210".into(),
            copies: "2".into(),
            payment_option: PaymentOption::Upi,
        }
    }

    mod valid {
        use super::*;

        #[test]
        fn preserves_values() {
            let draft = valid_input().validate(&choices()).unwrap();
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
            assert_eq!(draft.mobile_no, "9876543210");
            assert_eq!(draft.copies, 2);
            assert_eq!(draft.payment_option, PaymentOption::Upi);
        }

        #[test]
        fn whitespace_hospital_name_is_present() {
            let mut input = valid_input();
            input.hospital_name = "   ".into();
            let draft = input.validate(&choices()).unwrap();
            assert_eq!(draft.hospital_name, "   ");
        }

        #[test]
        fn keeps_selected_payment_option() {
            let mut input = valid_input();
            input.payment_option = PaymentOption::Card;
            let draft = input.validate(&choices()).unwrap();
            assert_eq!(draft.payment_option, PaymentOption::Card);
        }

        #[test]
        fn name_accessor_matches_fields() {
            let draft = valid_input().validate(&choices()).unwrap();
            assert_eq!(draft.father_name.first_name, "Rajesh");
            assert_eq!(draft.mother_name.middle_name, "Devi");
        }
    }

    mod invalid {
        use super::*;

        #[test]
        fn empty_input_reports_every_required_field() {
            let input = DraftInput::new(FinancialYear::new(2024));
            let errors = input.validate(&choices()).unwrap_err();

            // 12 name parts + date + time + hospital + mobile + copies
            assert_eq!(errors.len(), 17);
            for &person in Person::all() {
                for &part in NamePart::all() {
                    assert_eq!(
                        errors.get(DraftField::Name(person, part)),
                        Some(&ValidationError::Required(part.required_label()))
                    );
                }
            }
            assert!(errors.get(DraftField::FinancialYear).is_none());
            assert!(errors.get(DraftField::PaymentOption).is_none());
            assert!(errors.iter().all(|(_, e)| !e.to_string().is_empty()));
        }

        #[test]
        fn each_empty_field_is_reported() {
            let blankers: &[(DraftField, fn(&mut DraftInput))] = &[
                (DraftField::FinancialYear, |i| i.financial_year.clear()),
                (DraftField::DateOfBirth, |i| i.date_of_birth.clear()),
                (DraftField::TimeOfBirth, |i| i.time_of_birth.clear()),
                (DraftField::HospitalName, |i| i.hospital_name.clear()),
                (DraftField::MobileNo, |i| i.mobile_no.clear()),
                (DraftField::Copies, |i| i.copies.clear()),
                (
                    DraftField::Name(Person::Applicant, NamePart::Middle),
                    |i| i.applicant_name.middle_name.clear(),
                ),
            ];
            for (field, blank) in blankers {
                let mut input = valid_input();
                blank(&mut input);
                let errors = input.validate(&choices()).unwrap_err();
                assert_eq!(errors.len(), 1, "{field:?} should be the only error");
                assert!(
                    matches!(errors.get(*field), Some(ValidationError::Required(_))),
                    "{field:?} should be required"
                );
            }
        }

        #[test]
        fn malformed_name_rejected() {
            let mut input = valid_input();
            input.father_name.last_name = "sHARMA".into();
            let errors = input.validate(&choices()).unwrap_err();
            assert_eq!(
                errors.get(DraftField::Name(Person::Father, NamePart::Last)),
                Some(&ValidationError::NotCapitalized("sHARMA".into()))
            );
        }

        #[test]
        fn mobile_digit_counts() {
            for (mobile, ok) in [
                ("123456789", false),
                ("12345678901", false),
                ("1234567890", true),
            ] {
                let mut input = valid_input();
                input.mobile_no = mobile.into();
                assert_eq!(input.validate(&choices()).is_ok(), ok, "mobile {mobile}");
            }
        }

        #[test]
        fn unoffered_financial_year_rejected() {
            let mut input = valid_input();
            input.financial_year = "2030-2031".into();
            let errors = input.validate(&choices()).unwrap_err();
            assert_eq!(
                errors.get(DraftField::FinancialYear),
                Some(&ValidationError::UnknownFinancialYear("2030-2031".into()))
            );
        }

        #[test]
        fn zero_copies_rejected() {
            let mut input = valid_input();
            input.copies = "0".into();
            let errors = input.validate(&choices()).unwrap_err();
            assert_eq!(
                errors.get(DraftField::Copies),
                Some(&ValidationError::InvalidCopies("0".into()))
            );
        }

        #[test]
        fn unparseable_date_rejected() {
            let mut input = valid_input();
            input.date_of_birth = "yesterday".into();
            let errors = input.validate(&choices()).unwrap_err();
            assert_eq!(
                errors.get(DraftField::DateOfBirth),
                Some(&ValidationError::InvalidDate("yesterday".into()))
            );
        }
    }

    #[test]
    fn new_preselects_year_and_upi() {
        let input = DraftInput::new(FinancialYear::new(2026));
        assert_eq!(input.financial_year, "2026-2027");
        assert_eq!(input.payment_option, PaymentOption::Upi);
        assert!(input.child_name.first_name.is_empty());
    }

    #[test]
    fn name_mut_updates_person() {
        let mut input = DraftInput::new(FinancialYear::new(2024));
        input
            .name_mut(Person::Mother)
            .set_part(NamePart::First, "SUNITA");
        assert_eq!(input.name(Person::Mother).first_name, "Sunita");
    }

    #[test]
    fn draft_serializes_camel_case() {
        let draft = valid_input().validate(&choices()).unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["financialYear"], "2024-2025");
        assert_eq!(json["childName"]["firstName"], "Arun");
        assert_eq!(json["dateOfBirth"], "2024-03-15");
        assert_eq!(json["timeOfBirth"], "09:45:00");
        assert_eq!(json["mobileNo"], "9876543210");
        assert_eq!(json["copies"], 2);
        assert_eq!(json["paymentOption"], "UPI");
    }
}
