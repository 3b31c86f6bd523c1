//! Core types for validation results and messages.

use std::fmt;

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Suggestion => "suggestion",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub text: String,
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.text)
    }
}

/// Result of validating one artifact.
///
/// `ok` is false exactly when at least one error-severity message was
/// recorded; warnings and suggestions never fail a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    ok: bool,
    messages: Vec<ValidationMessage>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::pass()
    }
}

impl ValidationResult {
    /// Create a passing result with no messages.
    pub fn pass() -> Self {
        Self {
            ok: true,
            messages: Vec::new(),
        }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    pub fn push(&mut self, severity: Severity, text: impl Into<String>) {
        if severity == Severity::Error {
            self.ok = false;
        }
        self.messages.push(ValidationMessage {
            severity,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(Severity::Error, text);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(Severity::Warning, text);
    }

    pub fn suggestion(&mut self, text: impl Into<String>) {
        self.push(Severity::Suggestion, text);
    }

    /// Number of messages at the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.messages
            .iter()
            .filter(|m| m.severity == severity)
            .count()
    }

    /// One-line summary such as `valid (2 warnings)` or `1 error, 1 suggestion`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [Severity::Error, Severity::Warning, Severity::Suggestion]
            .into_iter()
            .filter_map(|severity| {
                let n = self.count(severity);
                (n > 0).then(|| {
                    let plural = if n == 1 { "" } else { "s" };
                    format!("{} {}{}", n, severity, plural)
                })
            })
            .collect();

        match (self.ok, parts.is_empty()) {
            (true, true) => "valid".to_string(),
            (true, false) => format!("valid ({})", parts.join(", ")),
            (false, _) => parts.join(", "),
        }
    }
}
