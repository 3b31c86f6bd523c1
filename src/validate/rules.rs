//! Static text-pattern rules.
//!
//! Each rule is a regex plus what its presence (or absence) means. Structural
//! checks live in the per-kind validators; this table only covers what can be
//! decided from the raw text.

use super::types::{Severity, ValidationResult};
use crate::request::Kind;
use regex::Regex;
use std::sync::LazyLock;

/// Which part of the artifact a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    /// Every document of the artifact.
    Any,
    /// Only Kubernetes workload documents (Deployment and friends).
    Workload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// The finding is raised when the pattern matches.
    Present,
    /// The finding is raised when the pattern does not match.
    Absent,
}

struct TextRule {
    kind: Kind,
    scope: Scope,
    pattern: &'static str,
    trigger: Trigger,
    severity: Severity,
    message: &'static str,
}

const RULES: &[TextRule] = &[
    TextRule {
        kind: Kind::K8s,
        scope: Scope::Workload,
        pattern: r"runAsNonRoot:\s*true",
        trigger: Trigger::Absent,
        severity: Severity::Warning,
        message: "runAsNonRoot is not set; containers may run as root",
    },
    TextRule {
        kind: Kind::K8s,
        scope: Scope::Workload,
        pattern: r"(?m)^\s*limits:",
        trigger: Trigger::Absent,
        severity: Severity::Warning,
        message: "no resource limits set",
    },
    TextRule {
        kind: Kind::K8s,
        scope: Scope::Workload,
        pattern: r"(?m)^\s*livenessProbe:",
        trigger: Trigger::Absent,
        severity: Severity::Warning,
        message: "no livenessProbe configured",
    },
    TextRule {
        kind: Kind::K8s,
        scope: Scope::Workload,
        pattern: r"(?m)^\s*readinessProbe:",
        trigger: Trigger::Absent,
        severity: Severity::Warning,
        message: "no readinessProbe configured",
    },
    TextRule {
        kind: Kind::K8s,
        scope: Scope::Any,
        pattern: r"privileged:\s*true",
        trigger: Trigger::Present,
        severity: Severity::Warning,
        message: "privileged containers are enabled",
    },
    TextRule {
        kind: Kind::K8s,
        scope: Scope::Workload,
        pattern: r"(?m)^\s*-?\s*image:\s*\S+:latest\s*$",
        trigger: Trigger::Present,
        severity: Severity::Warning,
        message: "container image uses the :latest tag",
    },
    TextRule {
        kind: Kind::Terraform,
        scope: Scope::Any,
        pattern: r#"(?m)^\s*(?:access_key|secret_key)\s*=\s*"[^"$]+""#,
        trigger: Trigger::Present,
        severity: Severity::Warning,
        message: "hard-coded cloud credentials found; use variables or the provider's credential chain",
    },
    TextRule {
        kind: Kind::Terraform,
        scope: Scope::Any,
        pattern: r"(?m)^\s*encrypted\s*=\s*false",
        trigger: Trigger::Present,
        severity: Severity::Warning,
        message: "encryption is explicitly disabled",
    },
    TextRule {
        kind: Kind::Docker,
        scope: Scope::Any,
        pattern: r"(?mi)^\s*ENV\s+\S*(?:PASSWORD|SECRET|TOKEN|API_KEY)\S*[\s=]",
        trigger: Trigger::Present,
        severity: Severity::Warning,
        message: "secret-looking value baked into the image with ENV",
    },
    TextRule {
        kind: Kind::Docker,
        scope: Scope::Any,
        pattern: r"(?mi)^\s*ADD\s",
        trigger: Trigger::Present,
        severity: Severity::Suggestion,
        message: "prefer COPY over ADD unless extracting a local archive",
    },
    TextRule {
        kind: Kind::Cicd,
        scope: Scope::Any,
        pattern: r"(?m)^\s*-?\s*uses:\s*[^@\s]+\s*$",
        trigger: Trigger::Present,
        severity: Severity::Warning,
        message: "action reference is not pinned to a version",
    },
];

static COMPILED: LazyLock<Vec<(Regex, &'static TextRule)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| {
            let regex = Regex::new(rule.pattern).expect("validation rule regex is valid");
            (regex, rule)
        })
        .collect()
});

/// Apply every rule for `kind` and `scope` to `text`.
///
/// `label` prefixes each message (e.g. `Deployment/web`); pass an empty
/// string for none.
pub(super) fn apply(kind: Kind, scope: Scope, label: &str, text: &str, result: &mut ValidationResult) {
    for (regex, rule) in COMPILED.iter() {
        if rule.kind != kind || !scope_matches(rule.scope, scope) {
            continue;
        }

        let matched = regex.is_match(text);
        let fire = match rule.trigger {
            Trigger::Present => matched,
            Trigger::Absent => !matched,
        };

        if fire {
            let text = if label.is_empty() {
                rule.message.to_string()
            } else {
                format!("{}: {}", label, rule.message)
            };
            result.push(rule.severity, text);
        }
    }
}

/// A workload document gets both workload and general rules.
fn scope_matches(rule: Scope, document: Scope) -> bool {
    match document {
        Scope::Workload => true,
        Scope::Any => rule == Scope::Any,
    }
}
