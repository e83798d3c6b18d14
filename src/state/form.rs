//! Form state owned by the UI layer

use super::field::FieldId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Three-valued answer to "have the documents been reviewed?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewedAnswer {
    #[default]
    #[serde(rename = "")]
    Unset,
    Yes,
    No,
}

impl ReviewedAnswer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Yes => "yes",
            Self::No => "no",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Cycle unset -> yes -> no -> unset (used by the radio input)
    pub fn cycle(&self) -> Self {
        match self {
            Self::Unset => Self::Yes,
            Self::Yes => Self::No,
            Self::No => Self::Unset,
        }
    }
}

impl fmt::Display for ReviewedAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata mirror of a user-selected file.
///
/// Only `name` and `size` take part in validation and in the payload. The
/// source path is forwarded to the uploader, which reads the content when
/// the multipart body is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileRef {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }

    /// Stat a file on disk
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, metadata.len(), path))
    }
}

/// Current values of every input on the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub organization_name: String,
    pub reviewed_answer: ReviewedAnswer,
    pub changes_description: String,
    pub agreement_confirmed: bool,
    pub signature_name: String,
    pub selected_files: Vec<FileRef>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text value of a text field, `None` for non-text fields
    pub fn text(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::OrganizationName => Some(&self.organization_name),
            FieldId::ChangesDescription => Some(&self.changes_description),
            FieldId::SignatureName => Some(&self.signature_name),
            _ => None,
        }
    }

    /// Mutable text value of a text field, `None` for non-text fields
    pub fn text_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::OrganizationName => Some(&mut self.organization_name),
            FieldId::ChangesDescription => Some(&mut self.changes_description),
            FieldId::SignatureName => Some(&mut self.signature_name),
            _ => None,
        }
    }

    /// Return every field to its initial empty value
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
