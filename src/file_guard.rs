//! Client-side limits on the file selection
//!
//! Advisory only: keeps obviously oversized submissions from leaving the
//! client. The receiving endpoint has to enforce its own limits.

use crate::state::FileRef;
use thiserror::Error;

/// Maximum number of files per submission
pub const MAX_FILES: usize = 5;

/// Maximum size of a single file (8 MiB)
pub const MAX_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Why a selection was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionRejected {
    #[error("You can attach at most {max} files (selected {count}).")]
    TooManyFiles { count: usize, max: usize },
    #[error("\"{name}\" is larger than the 8 MB limit.")]
    FileTooLarge { name: String, size: u64 },
}

/// Check a new selection against the count and size limits.
///
/// Duplicate names are allowed; nothing is normalized.
pub fn check_selection(files: &[FileRef]) -> Result<(), SelectionRejected> {
    if files.len() > MAX_FILES {
        return Err(SelectionRejected::TooManyFiles {
            count: files.len(),
            max: MAX_FILES,
        });
    }
    if let Some(file) = files.iter().find(|f| f.size > MAX_FILE_SIZE) {
        return Err(SelectionRejected::FileTooLarge {
            name: file.name.clone(),
            size: file.size,
        });
    }
    Ok(())
}

/// Accept `files` or return an empty selection with the reason.
pub fn guard_selection(files: Vec<FileRef>) -> (Vec<FileRef>, Option<SelectionRejected>) {
    match check_selection(&files) {
        Ok(()) => (files, None),
        Err(reason) => {
            tracing::info!("File selection rejected: {reason}");
            (Vec::new(), Some(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(count: usize, size: u64) -> Vec<FileRef> {
        (0..count)
            .map(|i| FileRef::new(format!("file{i}.bin"), size, format!("file{i}.bin")))
            .collect()
    }

    #[test]
    fn test_accepts_up_to_limit() {
        let (accepted, rejected) = guard_selection(files(MAX_FILES, 1));
        assert_eq!(accepted.len(), MAX_FILES);
        assert!(rejected.is_none());
    }

    #[test]
    fn test_rejects_six_files() {
        let (accepted, rejected) = guard_selection(files(6, 1));
        assert!(accepted.is_empty());
        assert_eq!(
            rejected,
            Some(SelectionRejected::TooManyFiles { count: 6, max: 5 })
        );
    }

    #[test]
    fn test_exact_size_limit_is_allowed() {
        assert!(check_selection(&files(1, MAX_FILE_SIZE)).is_ok());
    }

    #[test]
    fn test_rejects_one_byte_over() {
        let mut selection = files(2, 100);
        selection.push(FileRef::new("big.iso", MAX_FILE_SIZE + 1, "big.iso"));
        let (accepted, rejected) = guard_selection(selection);
        assert!(accepted.is_empty());
        assert!(matches!(
            rejected,
            Some(SelectionRejected::FileTooLarge { ref name, .. }) if name == "big.iso"
        ));
    }

    #[test]
    fn test_count_checked_before_size() {
        let err = check_selection(&files(7, MAX_FILE_SIZE * 2)).unwrap_err();
        assert!(matches!(err, SelectionRejected::TooManyFiles { .. }));
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let selection = vec![
            FileRef::new("same.txt", 1, "a/same.txt"),
            FileRef::new("same.txt", 1, "b/same.txt"),
        ];
        let (accepted, rejected) = guard_selection(selection);
        assert_eq!(accepted.len(), 2);
        assert!(rejected.is_none());
    }

    #[test]
    fn test_empty_selection_allowed() {
        assert!(check_selection(&[]).is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SelectionRejected::TooManyFiles { count: 6, max: 5 }.to_string(),
            "You can attach at most 5 files (selected 6)."
        );
        assert_eq!(
            SelectionRejected::FileTooLarge {
                name: "a.pdf".to_string(),
                size: 1
            }
            .to_string(),
            "\"a.pdf\" is larger than the 8 MB limit."
        );
    }
}
