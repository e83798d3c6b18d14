//! Visibility of the dependent section driven by the reviewed answer

use crate::preview::Html;
use crate::state::ReviewedAnswer;

/// Warning shown when the documents have not been reviewed
pub const NOT_REVIEWED_WARNING: &str =
    "You must review the documents before you can submit this form.";

/// Display state of the warning region and the dependent section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchDisplay {
    pub warning: Option<Html>,
    pub dependent_visible: bool,
}

/// Compute what the branching regions should show for `answer`.
///
/// Unset keeps the dependent section visible; submission is blocked later
/// by validation. "No" hides the section instead of disabling it.
pub fn branch_display(answer: ReviewedAnswer) -> BranchDisplay {
    match answer {
        ReviewedAnswer::No => BranchDisplay {
            warning: Some(Html::text(NOT_REVIEWED_WARNING)),
            dependent_visible: false,
        },
        ReviewedAnswer::Unset | ReviewedAnswer::Yes => BranchDisplay {
            warning: None,
            dependent_visible: true,
        },
    }
}
