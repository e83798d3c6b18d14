//! Formgate - review-gated submission form
//!
//! The core of a form that only opens once the submitter confirms the
//! documents were reviewed. It limits file selections on the client,
//! validates required fields, renders an escaped preview and submits either
//! as a JSON preview (no endpoint configured) or as a multipart upload.
//!
//! Front ends feed events to [`FormController`] and apply the returned
//! [`UiCommand`]s to their display surfaces.

pub mod branching;
pub mod config;
pub mod controller;
pub mod file_guard;
pub mod payload;
pub mod preview;
pub mod state;
pub mod submit;
pub mod validate;

pub use config::FormConfig;
pub use controller::{FormController, StatusKind, SubmitStep, UiCommand};
pub use payload::{Payload, PayloadFile};
pub use preview::{Html, PreviewDocument};
pub use state::{FieldId, FileRef, FormState, ReviewedAnswer};
pub use submit::{
    HttpUploader, SubmissionPhase, SubmitError, UploadJob, UploadRequest, Uploader,
};
pub use validate::{validate, ValidationError};
