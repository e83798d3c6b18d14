//! Required-field validation

use crate::file_guard::MAX_FILES;
use crate::state::{FieldId, FormState, ReviewedAnswer};
use thiserror::Error;

/// First rule the form violates, in check order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your organization name.")]
    MissingOrganization,
    #[error("Please indicate whether you have reviewed the documents.")]
    ReviewNotAnswered,
    #[error("You must review the documents before you can submit this form.")]
    NotReviewed,
    #[error("Please describe your changes (or enter \"No changes.\").")]
    MissingChanges,
    #[error("You must confirm the agreement.")]
    AgreementNotConfirmed,
    #[error("Please enter your full name as a signature.")]
    MissingSignature,
    #[error("You can attach at most {max} files (selected {count}).")]
    TooManyFiles { count: usize, max: usize },
}

impl ValidationError {
    /// Field that should receive focus when this error is reported
    pub fn field(&self) -> FieldId {
        match self {
            Self::MissingOrganization => FieldId::OrganizationName,
            Self::ReviewNotAnswered | Self::NotReviewed => FieldId::ReviewedAnswer,
            Self::MissingChanges => FieldId::ChangesDescription,
            Self::AgreementNotConfirmed => FieldId::AgreementConfirmed,
            Self::MissingSignature => FieldId::SignatureName,
            Self::TooManyFiles { .. } => FieldId::Files,
        }
    }
}

/// Whether validation failures should be reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporting {
    /// Alert and move focus
    Alert,
    /// Silent pass/fail
    Quiet,
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Run the ordered checks; the first failing rule wins.
pub fn validate(form: &FormState) -> Result<(), ValidationError> {
    if is_blank(&form.organization_name) {
        return Err(ValidationError::MissingOrganization);
    }
    match form.reviewed_answer {
        ReviewedAnswer::Unset => return Err(ValidationError::ReviewNotAnswered),
        ReviewedAnswer::No => return Err(ValidationError::NotReviewed),
        ReviewedAnswer::Yes => {
            if is_blank(&form.changes_description) {
                return Err(ValidationError::MissingChanges);
            }
        }
    }
    if !form.agreement_confirmed {
        return Err(ValidationError::AgreementNotConfirmed);
    }
    if is_blank(&form.signature_name) {
        return Err(ValidationError::MissingSignature);
    }
    // The file guard should already have enforced this.
    if form.selected_files.len() > MAX_FILES {
        return Err(ValidationError::TooManyFiles {
            count: form.selected_files.len(),
            max: MAX_FILES,
        });
    }
    Ok(())
}
