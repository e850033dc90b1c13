//! Diagnostics reported back to the plugin host
//!
//! Mirrors the severity/summary/detail shape of Terraform diagnostics: every
//! provider operation returns a (possibly empty) list of these instead of a
//! bare error, so warnings and errors travel the same channel.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

/// Ordered collection of diagnostics; empty means success.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single error diagnostic.
    pub fn error(summary: impl Into<String>, detail: impl Display) -> Self {
        let mut diags = Self::new();
        diags.push_error(summary, detail);
        diags
    }

    /// Error diagnostic for a failed CRUD operation, labeled with the
    /// operation name from its `ResourceOperationConfig`.
    pub fn operation_error(operation: &str, detail: impl Display) -> Self {
        Self::error(format!("{} failed", operation), detail)
    }

    pub fn push_error(&mut self, summary: impl Into<String>, detail: impl Display) {
        self.0.push(Diagnostic {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.to_string(),
        });
    }

    pub fn push_warning(&mut self, summary: impl Into<String>, detail: impl Display) {
        self.0.push(Diagnostic {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.to_string(),
        });
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_means_success() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert!(!diags.has_errors());
    }

    #[test]
    fn warnings_are_not_errors() {
        let mut diags = Diagnostics::new();
        diags.push_warning("deprecated attribute", "use `labels` instead");
        assert!(!diags.is_empty());
        assert!(!diags.has_errors());
    }

    #[test]
    fn operation_error_carries_label() {
        let diags = Diagnostics::operation_error("RepositoryCreate", "boom");
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "RepositoryCreate failed");
        assert_eq!(diag.detail, "boom");
    }
}
