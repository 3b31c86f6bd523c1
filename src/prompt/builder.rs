//! Turns a [`GenerationRequest`] into the prompt sent to the AI service.

use super::template::render_template;
use super::templates::{instructions_template, provider_docs, requirements_template};
use crate::error::{InfraError, Result};
use crate::request::{GenerationRequest, Kind};
use std::collections::HashMap;

/// A rendered prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// The requirements block alone; reproduced in the implementation guide.
    pub requirements: String,
    /// Full text sent to the model.
    pub text: String,
}

/// Build the prompt for a request.
///
/// Fails with [`InfraError::MissingFlag`] when a required option is absent or
/// blank. Every other declared option falls back to its default.
pub fn build_prompt(request: &GenerationRequest) -> Result<Prompt> {
    let kind = request.kind();
    let mut vars = HashMap::new();

    for spec in kind.option_specs() {
        let value = request.resolved(spec.name).map(str::trim).unwrap_or("");
        if spec.required && value.is_empty() {
            return Err(InfraError::MissingFlag(spec.flag.to_string()));
        }
        vars.insert(spec.name.to_string(), value.to_string());
    }

    add_derived_vars(request, &mut vars);

    let requirements = render_template(requirements_template(kind), &vars)?;
    vars.insert("requirements".to_string(), requirements.clone());
    let text = render_template(instructions_template(kind), &vars)?;

    log::debug!(
        "built {} prompt ({} chars) from options {:?}",
        kind,
        text.len(),
        request.options()
    );

    Ok(Prompt { requirements, text })
}

/// Variables computed from the declared options rather than supplied directly.
fn add_derived_vars(request: &GenerationRequest, vars: &mut HashMap<String, String>) {
    match request.kind() {
        Kind::K8s => {}
        Kind::Terraform => {
            let cloud = vars.get("cloud").cloned().unwrap_or_default();
            vars.insert("cloud_upper".to_string(), cloud.to_uppercase());
            vars.insert("provider_docs".to_string(), provider_docs(&cloud).to_string());
        }
        Kind::Docker => {
            let base_image = vars.get("base_image").cloned().unwrap_or_default();
            let line = if base_image.is_empty() {
                String::new()
            } else {
                format!("- Using base image: {}\n", base_image)
            };
            vars.insert("base_image_line".to_string(), line);
        }
        Kind::Cicd => {
            let platform = request.platform();
            vars.insert("platform".to_string(), platform.as_str().to_string());
            vars.insert(
                "platform_upper".to_string(),
                platform.as_str().to_uppercase(),
            );
            vars.insert("platform_docs".to_string(), platform.docs_url().to_string());
            vars.insert(
                "pipeline_path".to_string(),
                platform.pipeline_path().to_string(),
            );
        }
    }
}
