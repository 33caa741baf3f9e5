use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::validation::{FieldErrors, ValidationError, validate_utr_number};

/// File extensions accepted as images for a payment proof.
static IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff", "heic", "svg",
];

/// Errors raised while attaching a payment-proof file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProofError {
    #[error("unsupported payment proof type {0}, expected an image or PDF")]
    UnsupportedType(String),
    #[error("payment proof file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// The kind of document attached as payment proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    Image,
    Pdf,
}

impl ProofKind {
    /// Determines the kind from a path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<ProofKind> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        if ext == "pdf" {
            Some(ProofKind::Pdf)
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(ProofKind::Image)
        } else {
            None
        }
    }
}

/// A reference to an attached receipt. Only images and PDFs can be attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentProof {
    path: PathBuf,
    kind: ProofKind,
}

impl PaymentProof {
    /// Attaches the file at `path`.
    ///
    /// The file type is checked before the file's existence so that a typo in
    /// the extension is reported as such.
    pub fn capture(path: impl AsRef<Path>) -> Result<Self, ProofError> {
        let path = path.as_ref();
        let kind = ProofKind::from_path(path)
            .ok_or_else(|| ProofError::UnsupportedType(path.display().to_string()))?;
        if !path.is_file() {
            return Err(ProofError::NotFound(path.to_path_buf()));
        }
        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    /// Path of the attached file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Kind of the attached file.
    pub fn kind(&self) -> ProofKind {
        self.kind
    }
}

/// Identifies a single field on the payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentField {
    QrCodeScanned,
    PaymentProof,
    UtrNumber,
}

/// A validated payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    pub qr_code_scanned: bool,
    pub payment_proof: PaymentProof,
    pub utr_number: String,
}

/// Payment-step values as entered, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentInput {
    pub qr_code_scanned: bool,
    pub payment_proof: Option<PaymentProof>,
    pub utr_number: String,
}

impl PaymentInput {
    /// Records that the QR code was scanned. There is no way to undo this.
    pub fn mark_scanned(&mut self) {
        self.qr_code_scanned = true;
    }

    /// Validates every field, reporting all failures together.
    pub fn validate(&self) -> Result<PaymentSubmission, FieldErrors<PaymentField>> {
        let mut errors = FieldErrors::default();

        let scanned = if self.qr_code_scanned {
            Ok(())
        } else {
            Err(ValidationError::QrCodeNotScanned)
        };
        errors.check(PaymentField::QrCodeScanned, scanned);
        let proof = errors.check(
            PaymentField::PaymentProof,
            self.payment_proof
                .clone()
                .ok_or(ValidationError::Required("Payment proof")),
        );
        errors.check(
            PaymentField::UtrNumber,
            validate_utr_number(&self.utr_number),
        );

        match proof {
            Some(payment_proof) if errors.is_empty() => Ok(PaymentSubmission {
                qr_code_scanned: true,
                payment_proof,
                utr_number: self.utr_number.clone(),
            }),
            _ => Err(errors),
        }
    }
}
