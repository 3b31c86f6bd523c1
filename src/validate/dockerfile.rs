//! Dockerfile validation.

use super::rules::{self, Scope};
use super::types::ValidationResult;
use crate::request::Kind;

/// One logical instruction, with continuation lines joined.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Instruction {
    keyword: String,
    args: String,
    line: usize,
}

pub(super) fn validate_dockerfile(content: &str) -> ValidationResult {
    let mut result = ValidationResult::pass();

    if content.trim().is_empty() {
        result.error("Dockerfile is empty");
        return result;
    }

    let instructions = parse_instructions(content);
    if instructions.is_empty() {
        result.error("Dockerfile contains no instructions");
        return result;
    }

    match instructions.iter().find(|i| i.keyword != "ARG") {
        Some(first) if first.keyword != "FROM" => result.error(format!(
            "Dockerfile must start with FROM (found {} on line {})",
            first.keyword, first.line
        )),
        None => result.error("Dockerfile has no FROM instruction"),
        _ => {}
    }

    check_base_images(&instructions, &mut result);
    check_user(&instructions, &mut result);

    if !instructions.iter().any(|i| i.keyword == "WORKDIR") {
        result.suggestion("no WORKDIR set; files land in the image root");
    }
    if !instructions.iter().any(|i| i.keyword == "HEALTHCHECK") {
        result.suggestion("no HEALTHCHECK defined");
    }

    check_layer_order(&instructions, &mut result);

    rules::apply(Kind::Docker, Scope::Any, "", content, &mut result);
    result
}

fn parse_instructions(content: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pending: Option<Instruction> = None;

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();

        if pending.is_none() && (line.is_empty() || line.starts_with('#')) {
            continue;
        }

        let (text, continues) = match line.strip_suffix('\\') {
            Some(head) => (head.trim_end(), true),
            None => (line, false),
        };

        match pending.as_mut() {
            Some(current) => {
                if !text.starts_with('#') && !text.is_empty() {
                    current.args.push(' ');
                    current.args.push_str(text);
                }
            }
            None => {
                let (keyword, args) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
                pending = Some(Instruction {
                    keyword: keyword.to_ascii_uppercase(),
                    args: args.trim().to_string(),
                    line: index + 1,
                });
            }
        }

        if !continues {
            instructions.extend(pending.take());
        }
    }

    instructions.extend(pending);
    instructions
}

/// Stage aliases declared with `FROM image AS name`.
fn stage_aliases(instructions: &[Instruction]) -> Vec<String> {
    instructions
        .iter()
        .filter(|i| i.keyword == "FROM")
        .filter_map(|i| {
            let words: Vec<&str> = i.args.split_whitespace().collect();
            words
                .iter()
                .position(|w| w.eq_ignore_ascii_case("as"))
                .and_then(|pos| words.get(pos + 1))
                .map(|alias| alias.to_ascii_lowercase())
        })
        .collect()
}

fn check_base_images(instructions: &[Instruction], result: &mut ValidationResult) {
    let aliases = stage_aliases(instructions);

    for from in instructions.iter().filter(|i| i.keyword == "FROM") {
        let Some(image) = from.args.split_whitespace().find(|w| !w.starts_with("--")) else {
            result.error(format!("FROM on line {} names no image", from.line));
            continue;
        };

        if image.eq_ignore_ascii_case("scratch")
            || aliases.contains(&image.to_ascii_lowercase())
            || image.contains('@')
            || image.contains('$')
        {
            continue;
        }

        match image_tag(image) {
            Some("latest") => result.warning(format!(
                "base image '{}' uses the :latest tag; pin a version",
                image
            )),
            None => result.warning(format!(
                "base image '{}' has no tag; pin a version",
                image
            )),
            Some(_) => {}
        }
    }
}

/// The tag of an image reference, ignoring a registry port.
fn image_tag(image: &str) -> Option<&str> {
    let name = image.rsplit('/').next().unwrap_or(image);
    name.split_once(':').map(|(_, tag)| tag)
}

/// Only the final stage's USER decides who the container runs as.
fn check_user(instructions: &[Instruction], result: &mut ValidationResult) {
    if !instructions.iter().any(|i| i.keyword == "USER") {
        result.warning("no USER instruction; the container will run as root");
        return;
    }

    let final_stage_start = instructions
        .iter()
        .rposition(|i| i.keyword == "FROM")
        .unwrap_or(0);
    let last_user = instructions[final_stage_start..]
        .iter()
        .rev()
        .find(|i| i.keyword == "USER");

    match last_user {
        None => result.warning("final stage has no USER instruction; the container will run as root"),
        Some(user) => {
            let name = user.args.split(':').next().unwrap_or_default().trim();
            if name == "root" || name == "0" {
                result.warning(format!("USER on line {} is root", user.line));
            }
        }
    }
}

/// Within a stage, a COPY after the first RUN invalidates the cache of
/// every later layer whenever the copied files change.
fn check_layer_order(instructions: &[Instruction], result: &mut ValidationResult) {
    let mut first_run: Option<usize> = None;

    for instruction in instructions {
        match instruction.keyword.as_str() {
            "FROM" => first_run = None,
            "RUN" if first_run.is_none() => first_run = Some(instruction.line),
            "COPY" if first_run.is_some() && !instruction.args.starts_with("--from") => {
                result.suggestion(format!(
                    "COPY on line {} follows RUN; copy dependency manifests and install before copying sources",
                    instruction.line
                ));
                return;
            }
            _ => {}
        }
    }
}
