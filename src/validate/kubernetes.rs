//! Kubernetes manifest validation.

use super::rules::{self, Scope};
use super::types::ValidationResult;
use super::yaml;
use crate::request::Kind;
use serde_yaml::Value;

/// Kinds whose pod template gets the workload rules.
const WORKLOAD_KINDS: &[&str] = &[
    "Deployment",
    "StatefulSet",
    "DaemonSet",
    "ReplicaSet",
    "Job",
    "CronJob",
    "Pod",
];

/// Validate every document in a (possibly multi-document) manifest.
pub(super) fn validate_manifests(content: &str) -> ValidationResult {
    let mut result = ValidationResult::pass();
    let documents = yaml::documents(content);

    if documents.is_empty() {
        result.error("manifest contains no YAML documents");
        return result;
    }

    for (index, text) in documents.iter().enumerate() {
        let position = index + 1;
        let value = match yaml::parse(text) {
            Ok(value) => value,
            Err(message) => {
                result.error(format!("document {}: {}", position, message));
                continue;
            }
        };

        if !value.is_mapping() {
            result.error(format!("document {}: top level is not a mapping", position));
            continue;
        }

        let label = document_label(&value, position);
        check_required_fields(&value, &label, &mut result);

        let kind = value.get("kind").and_then(Value::as_str).unwrap_or_default();
        match kind {
            "Deployment" | "StatefulSet" => check_deployment(&value, &label, &mut result),
            "Service" => check_service(&value, &label, &mut result),
            _ => {}
        }

        let scope = if WORKLOAD_KINDS.contains(&kind) {
            Scope::Workload
        } else {
            Scope::Any
        };
        rules::apply(Kind::K8s, scope, &label, text, &mut result);
    }

    result
}

/// `Kind/name` when both are known, else `document N`.
fn document_label(value: &Value, position: usize) -> String {
    let kind = value.get("kind").and_then(Value::as_str);
    let name = yaml::field(value, "metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str);

    match (kind, name) {
        (Some(kind), Some(name)) => format!("{}/{}", kind, name),
        (Some(kind), None) => format!("document {} ({})", position, kind),
        _ => format!("document {}", position),
    }
}

fn check_required_fields(value: &Value, label: &str, result: &mut ValidationResult) {
    for key in ["apiVersion", "kind", "metadata"] {
        if !yaml::has(value, key) {
            result.error(format!("{}: missing required field '{}'", label, key));
        }
    }

    let unnamed = yaml::field(value, "metadata").is_some_and(|m| !yaml::has(m, "name"));
    if unnamed {
        result.error(format!("{}: missing required field 'metadata.name'", label));
    }
}

fn check_deployment(value: &Value, label: &str, result: &mut ValidationResult) {
    let Some(spec) = yaml::field(value, "spec").filter(|s| !s.is_null()) else {
        result.error(format!("{}: missing 'spec'", label));
        return;
    };

    if !yaml::has(spec, "replicas") {
        result.warning(format!("{}: spec.replicas is not set", label));
    }

    let pod_security = yaml::field(spec, "template")
        .and_then(|t| yaml::field(t, "spec"))
        .is_some_and(|pod| yaml::has(pod, "securityContext"));
    if !pod_security {
        result.suggestion(format!(
            "{}: add a pod securityContext (runAsNonRoot, fsGroup)",
            label
        ));
    }
}

fn check_service(value: &Value, label: &str, result: &mut ValidationResult) {
    let Some(spec) = yaml::field(value, "spec").filter(|s| !s.is_null()) else {
        result.error(format!("{}: missing 'spec'", label));
        return;
    };

    if !yaml::has(spec, "ports") {
        result.error(format!("{}: missing 'spec.ports'", label));
    }
}
