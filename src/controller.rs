//! Event handlers for the submission form
//!
//! [`FormController`] owns the [`FormState`] and reacts to the discrete
//! events a front end delivers: answer changed, files changed, preview
//! requested, submit triggered and response received. Handlers never touch
//! a display surface; they return [`UiCommand`]s for the front end to apply.

use crate::branching::branch_display;
use crate::config::FormConfig;
use crate::file_guard::guard_selection;
use crate::payload::{build_payload, Clock, Payload, SystemClock};
use crate::preview::{render_preview, Html, PreviewDocument};
use crate::state::{FieldId, FileRef, FormState, ReviewedAnswer};
use crate::submit::{
    HttpUploader, SubmissionPhase, SubmitError, UploadJob, UploadRequest, Uploader,
};
use crate::validate::{validate, Reporting, ValidationError};
use serde_json::Value;
use std::sync::Arc;

/// Alert shown when submit is triggered while a request is outstanding
pub const SUBMISSION_IN_PROGRESS: &str = "A submission is already in progress.";

/// Tone of the status region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Display instruction for the front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Blocking alert
    Alert(Html),
    Focus(FieldId),
    /// Show (`Some`) or hide (`None`) the warning region
    SetWarning(Option<Html>),
    SetDependentVisible(bool),
    /// Empty the file input
    ClearFileSelection,
    ClearStatus,
    SetStatus { kind: StatusKind, html: Html },
    ScrollStatusIntoView,
    ShowPreview(PreviewDocument),
    /// Return every input to its initial empty value
    ResetForm,
}

/// Result of one step of the submission pipeline
#[derive(Debug)]
pub struct SubmitStep {
    /// Phase the step ended in
    pub phase: SubmissionPhase,
    pub commands: Vec<UiCommand>,
    /// Upload to run when `phase` is `Submitting`
    pub job: Option<UploadJob>,
}

impl SubmitStep {
    fn done(phase: SubmissionPhase, commands: Vec<UiCommand>) -> Self {
        Self {
            phase,
            commands,
            job: None,
        }
    }
}

fn branch_commands(answer: ReviewedAnswer) -> Vec<UiCommand> {
    let display = branch_display(answer);
    vec![
        UiCommand::SetWarning(display.warning),
        UiCommand::SetDependentVisible(display.dependent_visible),
    ]
}

fn alert_commands(err: &ValidationError) -> Vec<UiCommand> {
    vec![
        UiCommand::Alert(Html::text(&err.to_string())),
        UiCommand::Focus(err.field()),
    ]
}

/// Owner of the form state and the submission pipeline
pub struct FormController {
    form: FormState,
    uploader: Option<Arc<dyn Uploader>>,
    clock: Arc<dyn Clock>,
    phase: SubmissionPhase,
}

impl FormController {
    /// Controller posting through `uploader`, or preview-only when `None`
    pub fn new(uploader: Option<Arc<dyn Uploader>>) -> Self {
        Self {
            form: FormState::default(),
            uploader,
            clock: Arc::new(SystemClock),
            phase: SubmissionPhase::Idle,
        }
    }

    /// Controller for the configured endpoint
    pub fn from_config(config: &FormConfig) -> Result<Self, SubmitError> {
        let uploader: Option<Arc<dyn Uploader>> = match config.endpoint() {
            Some(endpoint) => Some(Arc::new(HttpUploader::new(endpoint)?)),
            None => None,
        };
        Ok(Self::new(uploader))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Text edits go straight to the state; they need no display changes.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    pub fn has_endpoint(&self) -> bool {
        self.uploader.is_some()
    }

    /// Display state for a freshly loaded form
    pub fn init(&self) -> Vec<UiCommand> {
        branch_commands(self.form.reviewed_answer)
    }

    /// Reviewed-answer selection changed
    pub fn on_answer_changed(&mut self, answer: ReviewedAnswer) -> Vec<UiCommand> {
        self.form.reviewed_answer = answer;
        branch_commands(answer)
    }

    /// File input produced a new selection
    pub fn on_files_changed(&mut self, files: Vec<FileRef>) -> Vec<UiCommand> {
        let (accepted, rejected) = guard_selection(files);
        self.form.selected_files = accepted;
        match rejected {
            Some(reason) => vec![
                UiCommand::ClearFileSelection,
                UiCommand::Alert(Html::text(&reason.to_string())),
            ],
            None => Vec::new(),
        }
    }

    /// Validate the current state, alerting unless `reporting` is quiet
    pub fn check(&self, reporting: Reporting) -> (bool, Vec<UiCommand>) {
        match validate(&self.form) {
            Ok(()) => (true, Vec::new()),
            Err(err) => {
                tracing::debug!(?err, "Validation failed");
                let commands = match reporting {
                    Reporting::Alert => alert_commands(&err),
                    Reporting::Quiet => Vec::new(),
                };
                (false, commands)
            }
        }
    }

    /// Fresh payload stamped with the current time
    pub fn build_payload(&self) -> Payload {
        build_payload(&self.form, self.clock.as_ref())
    }

    /// Preview requested: render whatever is filled in so far
    pub fn on_preview(&self) -> Vec<UiCommand> {
        let (ready, _) = self.check(Reporting::Quiet);
        let payload = self.build_payload();
        vec![UiCommand::ShowPreview(render_preview(&payload, ready))]
    }

    /// Submit triggered: gate, validate, build, then preview or hand back an upload
    pub fn begin_submit(&mut self) -> SubmitStep {
        if self.is_submitting() {
            tracing::warn!("Submit ignored while a request is in flight");
            return SubmitStep::done(
                SubmissionPhase::Blocked,
                vec![UiCommand::Alert(Html::text(SUBMISSION_IN_PROGRESS))],
            );
        }

        let mut commands = vec![UiCommand::ClearStatus];

        // Hard gate, even if the front end hid the section.
        let gate = match self.form.reviewed_answer {
            ReviewedAnswer::Unset => Some(ValidationError::ReviewNotAnswered),
            ReviewedAnswer::No => Some(ValidationError::NotReviewed),
            ReviewedAnswer::Yes => None,
        };
        if let Some(err) = gate {
            tracing::info!(phase = %SubmissionPhase::Blocked, "Submission gated: {err}");
            commands.extend(alert_commands(&err));
            return SubmitStep::done(SubmissionPhase::Blocked, commands);
        }

        tracing::debug!(phase = %SubmissionPhase::Validating, "Validating submission");
        let (valid, alerts) = self.check(Reporting::Alert);
        if !valid {
            commands.extend(alerts);
            return SubmitStep::done(SubmissionPhase::Blocked, commands);
        }

        let payload = self.build_payload();

        let Some(uploader) = self.uploader.clone() else {
            return match payload.to_json_pretty() {
                Ok(json) => {
                    tracing::info!(phase = %SubmissionPhase::PreviewOnly, "No endpoint configured");
                    let mut html = Html::markup("<pre>");
                    html.push_text(&json).push_markup("</pre>");
                    commands.push(UiCommand::SetStatus {
                        kind: StatusKind::Info,
                        html,
                    });
                    commands.push(UiCommand::ScrollStatusIntoView);
                    SubmitStep::done(SubmissionPhase::PreviewOnly, commands)
                }
                Err(err) => {
                    commands.extend(failure_commands(&SubmitError::from(err)));
                    SubmitStep::done(SubmissionPhase::Failed, commands)
                }
            };
        };

        let payload_json = match payload.to_json() {
            Ok(json) => json,
            Err(err) => {
                commands.extend(failure_commands(&SubmitError::from(err)));
                return SubmitStep::done(SubmissionPhase::Failed, commands);
            }
        };

        self.phase = SubmissionPhase::Submitting;
        tracing::info!(phase = %self.phase, files = self.form.selected_files.len(), "Submitting");
        commands.push(UiCommand::SetStatus {
            kind: StatusKind::Info,
            html: Html::text("Submitting..."),
        });

        let job = UploadJob::new(
            uploader,
            UploadRequest {
                payload_json,
                files: self.form.selected_files.clone(),
            },
        );
        SubmitStep {
            phase: SubmissionPhase::Submitting,
            commands,
            job: Some(job),
        }
    }

    /// Response received for the outstanding upload
    pub fn finish_submit(&mut self, result: Result<Value, SubmitError>) -> SubmitStep {
        self.phase = SubmissionPhase::Idle;
        match result {
            Ok(body) => {
                tracing::info!(phase = %SubmissionPhase::Succeeded, "Submission complete");
                let mut html = Html::text("Submitted successfully. Server response: ");
                html.push_markup("<code>")
                    .push_text(&body.to_string())
                    .push_markup("</code>");

                self.form.reset();
                let mut commands = vec![
                    UiCommand::SetStatus {
                        kind: StatusKind::Success,
                        html,
                    },
                    UiCommand::ResetForm,
                ];
                commands.extend(branch_commands(self.form.reviewed_answer));
                SubmitStep::done(SubmissionPhase::Succeeded, commands)
            }
            Err(err) => {
                tracing::warn!(phase = %SubmissionPhase::Failed, "Submission failed: {err}");
                SubmitStep::done(SubmissionPhase::Failed, failure_commands(&err))
            }
        }
    }

    /// Whole pipeline in one call, awaiting the upload inline
    pub async fn submit(&mut self) -> SubmitStep {
        let mut step = self.begin_submit();
        let Some(job) = step.job.take() else {
            return step;
        };
        let result = job.run().await;
        let mut finished = self.finish_submit(result);
        step.commands.append(&mut finished.commands);
        finished.commands = step.commands;
        finished
    }
}

fn failure_commands(err: &SubmitError) -> Vec<UiCommand> {
    let mut html = Html::text("Submission failed: ");
    html.push_text(&err.to_string());
    vec![UiCommand::SetStatus {
        kind: StatusKind::Error,
        html,
    }]
}
