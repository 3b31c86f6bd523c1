//! CI/CD pipeline validation for GitHub Actions and GitLab CI.

use super::rules::{self, Scope};
use super::types::ValidationResult;
use super::yaml;
use crate::request::{Kind, Platform};
use serde_yaml::{Mapping, Value};

/// Top-level GitLab keys that are not jobs.
const GITLAB_RESERVED: &[&str] = &[
    "default",
    "include",
    "stages",
    "variables",
    "workflow",
    "image",
    "services",
    "cache",
    "before_script",
    "after_script",
];

/// The platform a pipeline file belongs to, judged by its filename.
pub(super) fn platform_for(filename: &str) -> Platform {
    if filename.ends_with(".gitlab-ci.yml") || filename.ends_with(".gitlab-ci.yaml") {
        Platform::Gitlab
    } else {
        Platform::Github
    }
}

pub(super) fn validate_pipeline(filename: &str, content: &str) -> ValidationResult {
    let mut result = ValidationResult::pass();
    let documents = yaml::documents(content);

    let Some(document) = documents.first() else {
        result.error("pipeline file is empty");
        return result;
    };
    if documents.len() > 1 {
        result.warning("pipeline file contains more than one YAML document; only the first is used");
    }

    let value = match yaml::parse(document) {
        Ok(value) => value,
        Err(message) => {
            result.error(message);
            return result;
        }
    };

    let Some(root) = value.as_mapping() else {
        result.error("top level is not a mapping");
        return result;
    };

    match platform_for(filename) {
        Platform::Github => check_github(root, &mut result),
        Platform::Gitlab => check_gitlab(root, &mut result),
    }

    rules::apply(Kind::Cicd, Scope::Any, "", content, &mut result);
    result
}

fn check_github(root: &Mapping, result: &mut ValidationResult) {
    // YAML 1.1 parsers read a bare `on` key as boolean true.
    let has_trigger = root.contains_key("on") || root.contains_key(Value::Bool(true));
    if !has_trigger {
        result.error("workflow has no 'on' trigger");
    }

    match root.get("jobs") {
        None | Some(Value::Null) => result.error("workflow has no 'jobs'"),
        Some(Value::Mapping(jobs)) if jobs.is_empty() => result.error("workflow defines no jobs"),
        Some(Value::Mapping(jobs)) => {
            for (name, job) in jobs {
                let name = name.as_str().unwrap_or("?");
                let runs = job.as_mapping().is_some_and(|j| {
                    j.contains_key("runs-on") || j.contains_key("uses")
                });
                if !runs {
                    result.error(format!("job '{}' has no 'runs-on'", name));
                }
            }
        }
        Some(_) => result.error("'jobs' must be a mapping"),
    }
}

fn check_gitlab(root: &Mapping, result: &mut ValidationResult) {
    if !root.contains_key("stages") {
        result.warning("no 'stages' defined; jobs fall back to the default stages");
    }

    let job_count = root
        .iter()
        .filter(|(key, value)| {
            let Some(key) = key.as_str() else {
                return false;
            };
            if GITLAB_RESERVED.contains(&key) || key.starts_with('.') {
                return false;
            }
            value.as_mapping().is_some_and(|job| {
                ["script", "trigger", "extends", "run"]
                    .iter()
                    .any(|k| job.contains_key(*k))
            })
        })
        .count();

    if job_count == 0 {
        result.error("pipeline defines no jobs");
    }
}
