use std::fmt;

use serde::{Deserialize, Serialize};

/// How the applicant pays the certificate fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentOption {
    #[default]
    #[serde(rename = "UPI")]
    Upi,
    NetBanking,
    Card,
}

static ALL_OPTIONS: &[PaymentOption] = &[
    PaymentOption::Upi,
    PaymentOption::NetBanking,
    PaymentOption::Card,
];

impl PaymentOption {
    /// Returns the label shown to the applicant.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentOption::Upi => "UPI",
            PaymentOption::NetBanking => "Net Banking",
            PaymentOption::Card => "Card",
        }
    }

    /// Returns all payment options in display order.
    pub fn all() -> &'static [PaymentOption] {
        ALL_OPTIONS
    }

    /// Looks up an option by its display label.
    pub fn from_label(label: &str) -> Option<PaymentOption> {
        ALL_OPTIONS.iter().copied().find(|o| o.label() == label)
    }
}

#[mutants::skip]
impl fmt::Display for PaymentOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
