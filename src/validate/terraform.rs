//! Terraform (HCL) validation.
//!
//! There is no HCL parser here; a small scanner tracks strings, comments and
//! heredocs so brace balance is only counted over real block structure.

use super::rules::{self, Scope};
use super::types::ValidationResult;
use crate::request::Kind;
use regex::Regex;
use std::sync::LazyLock;

static PROVIDER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*provider\s+"[^"]+"\s*\{"#).expect("provider block regex is valid")
});

static TERRAFORM_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*terraform\s*\{").expect("terraform block regex is valid")
});

static HEREDOC_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<<-?\s*([A-Za-z_][A-Za-z0-9_]*)\s*$").expect("heredoc regex is valid")
});

pub(super) fn validate_terraform(filename: &str, content: &str) -> ValidationResult {
    let mut result = ValidationResult::pass();

    if content.trim().is_empty() {
        result.error("file is empty");
        return result;
    }

    scan_structure(content, &mut result);

    if is_main_file(filename) {
        if !PROVIDER_BLOCK.is_match(content) {
            result.warning("no provider block found");
        }
        if !TERRAFORM_BLOCK.is_match(content) {
            result.suggestion("add a terraform {} block pinning required_version and providers");
        }
    }

    rules::apply(Kind::Terraform, Scope::Any, "", content, &mut result);
    result
}

fn is_main_file(filename: &str) -> bool {
    filename.rsplit('/').next() == Some("main.tf")
}

/// Scanner state carried between lines.
#[derive(Default)]
struct Scanner {
    depth: i64,
    opened: usize,
    closed: usize,
    in_block_comment: bool,
    heredoc: Option<String>,
}

fn scan_structure(content: &str, result: &mut ValidationResult) {
    let mut scanner = Scanner::default();
    let mut reported_extra_close = false;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;

        if let Some(terminator) = &scanner.heredoc {
            if line.trim() == terminator.as_str() {
                scanner.heredoc = None;
            }
            continue;
        }

        match scanner.scan_line(line) {
            LineOutcome::Ok => {}
            LineOutcome::UnterminatedString => {
                result.error(format!("unterminated string on line {}", line_number));
            }
        }

        if scanner.depth < 0 && !reported_extra_close {
            result.error(format!("unexpected '}}' on line {}", line_number));
            reported_extra_close = true;
        }

        if !scanner.in_block_comment
            && let Some(caps) = HEREDOC_START.captures(line)
        {
            scanner.heredoc = Some(caps[1].to_string());
        }
    }

    if scanner.heredoc.is_some() {
        result.error("unterminated heredoc at end of file");
    }
    if scanner.in_block_comment {
        result.error("unterminated /* comment at end of file");
    }
    if scanner.opened != scanner.closed {
        result.error(format!(
            "unbalanced braces: {} opening, {} closing",
            scanner.opened, scanner.closed
        ));
    }
}

enum LineOutcome {
    Ok,
    UnterminatedString,
}

impl Scanner {
    fn scan_line(&mut self, line: &str) -> LineOutcome {
        let mut chars = line.chars().peekable();
        let mut in_string = false;
        // Depth of `${ ... }` interpolation inside the current string.
        let mut interpolation = 0usize;

        while let Some(c) = chars.next() {
            if self.in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.in_block_comment = false;
                }
                continue;
            }

            if in_string {
                match c {
                    '\\' => {
                        chars.next();
                    }
                    '$' if chars.peek() == Some(&'{') => {
                        chars.next();
                        interpolation += 1;
                    }
                    '}' if interpolation > 0 => interpolation -= 1,
                    '"' if interpolation > 0 => skip_nested_string(&mut chars),
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            match c {
                '"' => in_string = true,
                '#' => break,
                '/' if chars.peek() == Some(&'/') => break,
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    self.in_block_comment = true;
                }
                '{' => {
                    self.depth += 1;
                    self.opened += 1;
                }
                '}' => {
                    self.depth -= 1;
                    self.closed += 1;
                }
                _ => {}
            }
        }

        if in_string {
            LineOutcome::UnterminatedString
        } else {
            LineOutcome::Ok
        }
    }
}

/// Consume a string literal nested inside an interpolation, up to its closing quote.
fn skip_nested_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => return,
            _ => {}
        }
    }
}
