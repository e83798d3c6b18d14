//! Payload construction

use crate::state::{FormState, ReviewedAnswer};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// File entry of the payload: name and size only, never content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadFile {
    pub name: String,
    pub size: u64,
}

/// Immutable snapshot of the form sent to preview or to the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub organization_name: String,
    pub reviewed_answer: ReviewedAnswer,
    pub changes_description: String,
    pub agreement_confirmed: bool,
    pub signature_name: String,
    pub files: Vec<PayloadFile>,
    pub submitted_at_timestamp: String,
}

impl Payload {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Source of the construction-time timestamp
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build a payload stamped with `at`
pub fn build_payload_at(form: &FormState, at: DateTime<Utc>) -> Payload {
    Payload {
        organization_name: form.organization_name.trim().to_string(),
        reviewed_answer: form.reviewed_answer,
        changes_description: form.changes_description.trim().to_string(),
        agreement_confirmed: form.agreement_confirmed,
        signature_name: form.signature_name.trim().to_string(),
        files: form
            .selected_files
            .iter()
            .map(|f| PayloadFile {
                name: f.name.clone(),
                size: f.size,
            })
            .collect(),
        submitted_at_timestamp: format_timestamp(at),
    }
}

/// Build a payload stamped with the clock's current time
pub fn build_payload(form: &FormState, clock: &dyn Clock) -> Payload {
    build_payload_at(form, clock.now())
}
