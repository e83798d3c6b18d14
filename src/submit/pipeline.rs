//! Submission state machine pieces

use super::error::SubmitError;
use super::uploader::{UploadRequest, Uploader};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Phases of one submit action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Validating,
    /// Gate or validation refused the submission
    Blocked,
    /// No endpoint configured; the payload was shown instead of sent
    PreviewOnly,
    /// Request in flight
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionPhase {
    /// Whether the run ends in this phase (before returning to idle)
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Blocked | Self::PreviewOnly | Self::Succeeded | Self::Failed
        )
    }
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Blocked => "blocked",
            Self::PreviewOnly => "preview-only",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A pending network upload.
///
/// Owns everything it needs so it can run on a spawned task while the UI
/// keeps handling events.
#[derive(Clone)]
pub struct UploadJob {
    uploader: Arc<dyn Uploader>,
    request: UploadRequest,
}

impl UploadJob {
    pub fn new(uploader: Arc<dyn Uploader>, request: UploadRequest) -> Self {
        Self { uploader, request }
    }

    /// Issue the single request attempt
    pub async fn run(self) -> Result<Value, SubmitError> {
        self.uploader.upload(self.request).await
    }
}

impl fmt::Debug for UploadJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadJob")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}
