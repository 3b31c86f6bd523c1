//! Placeholder substitution for prompt templates.
//!
//! `{name}` is replaced by the value bound to `name`; `{{` and `}}` produce
//! literal braces. A placeholder with no binding is an error.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("placeholder '{{{name}}}' at byte {offset} has no value")]
    Unbound { name: String, offset: usize },

    #[error("placeholder opened at byte {offset} is never closed")]
    Unclosed { offset: usize },

    #[error("empty placeholder at byte {offset}")]
    Empty { offset: usize },
}

impl From<TemplateError> for crate::error::InfraError {
    fn from(err: TemplateError) -> Self {
        crate::error::InfraError::Template(err.to_string())
    }
}

/// Substitute every placeholder in `template` from `bindings`.
pub fn render_template(
    template: &str,
    bindings: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 256);
    let mut offset = 0;

    while let Some(rel) = template[offset..].find(['{', '}']) {
        let at = offset + rel;
        out.push_str(&template[offset..at]);
        let rest = &template[at..];

        if rest.starts_with("{{") || rest.starts_with("}}") {
            out.push_str(&rest[..1]);
            offset = at + 2;
            continue;
        }
        if rest.starts_with('}') {
            out.push('}');
            offset = at + 1;
            continue;
        }

        let close = rest.find('}').ok_or(TemplateError::Unclosed { offset: at })?;
        let name = rest[1..close].trim();
        if name.is_empty() {
            return Err(TemplateError::Empty { offset: at });
        }
        let value = bindings.get(name).ok_or_else(|| TemplateError::Unbound {
            name: name.to_string(),
            offset: at,
        })?;
        out.push_str(value);
        offset = at + close + 1;
    }

    out.push_str(&template[offset..]);
    Ok(out)
}
