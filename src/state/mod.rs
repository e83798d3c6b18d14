//! Form state module

mod field;
mod form;

pub use field::FieldId;
pub use form::{FileRef, FormState, ReviewedAnswer};
