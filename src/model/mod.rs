mod draft;
mod financial_year;
mod name;
mod payment;
mod payment_option;
mod validation;

pub use draft::{ApplicationDraft, DraftField, DraftInput};
pub use financial_year::{FinancialYear, OFFERED_YEARS, validate_financial_year};
pub use name::{NameInput, NamePart, Person, PersonName};
pub use payment::{
    PaymentField, PaymentInput, PaymentProof, PaymentSubmission, ProofError, ProofKind,
};
pub use payment_option::PaymentOption;
pub use validation::{
    DATE_FORMAT, FieldErrors, TIME_FORMAT, ValidationError, normalize_name, parse_copies,
    parse_date_of_birth, parse_time_of_birth, validate_mobile_no, validate_name_part,
    validate_required, validate_utr_number,
};
