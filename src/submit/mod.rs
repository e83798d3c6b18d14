//! Submission pipeline: phases, upload jobs and the HTTP uploader

mod error;
mod pipeline;
mod uploader;

pub use error::SubmitError;
pub use pipeline::{SubmissionPhase, UploadJob};
pub use uploader::{
    default_acknowledgement, file_field_name, HttpUploader, UploadRequest, Uploader, PAYLOAD_FIELD,
};

#[cfg(test)]
pub use uploader::MockUploader;
