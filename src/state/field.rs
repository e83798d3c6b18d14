//! Form field identifiers

/// Identifies a single input on the submission form.
///
/// Used as a focus target by the validator and for keyboard navigation
/// in the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldId {
    #[default]
    OrganizationName,
    ReviewedAnswer,
    ChangesDescription,
    AgreementConfirmed,
    SignatureName,
    Files,
}

impl FieldId {
    /// All fields in display order
    pub const ALL: [FieldId; 6] = [
        FieldId::OrganizationName,
        FieldId::ReviewedAnswer,
        FieldId::ChangesDescription,
        FieldId::AgreementConfirmed,
        FieldId::SignatureName,
        FieldId::Files,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::OrganizationName => "Organization name",
            Self::ReviewedAnswer => "Have you reviewed the documents?",
            Self::ChangesDescription => "Describe your changes",
            Self::AgreementConfirmed => "I confirm the agreement",
            Self::SignatureName => "Full name (signature)",
            Self::Files => "Attachments",
        }
    }

    /// Whether the field belongs to the section hidden when the answer is "no"
    pub fn is_dependent(&self) -> bool {
        !matches!(self, Self::OrganizationName | Self::ReviewedAnswer)
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::ChangesDescription)
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Next field, wrapping around. Fields rejected by `visible` are skipped.
    pub fn next(&self, visible: impl Fn(FieldId) -> bool) -> FieldId {
        let start = self.index();
        (1..=Self::ALL.len())
            .map(|step| Self::ALL[(start + step) % Self::ALL.len()])
            .find(|f| visible(*f))
            .unwrap_or(*self)
    }

    /// Previous field, wrapping around. Fields rejected by `visible` are skipped.
    pub fn prev(&self, visible: impl Fn(FieldId) -> bool) -> FieldId {
        let start = self.index();
        let len = Self::ALL.len();
        (1..=len)
            .map(|step| Self::ALL[(start + len - step) % len])
            .find(|f| visible(*f))
            .unwrap_or(*self)
    }
}
