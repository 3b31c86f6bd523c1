//! Request and artifact types shared by every pipeline stage.
//!
//! A [`GenerationRequest`] is assembled once by the CLI dispatcher and then
//! only read. [`GeneratedArtifact`]s are produced from the AI response and
//! written to disk verbatim.

use clap::ValueEnum;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default flag values, shared by the CLI definitions and the prompt builder.
pub mod defaults {
    pub const REPLICAS: &str = "3";
    pub const PORT: &str = "8080";
    pub const MEMORY: &str = "512Mi";
    pub const CPU: &str = "250m";
    pub const CLOUD: &str = "aws";
    pub const SERVICE: &str = "vpc";
    pub const REGION: &str = "us-east-1";
    pub const PLATFORM: &str = "github";
    pub const DEPLOY_TARGET: &str = "kubernetes";
}

/// Category of infrastructure code requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    K8s,
    Terraform,
    Docker,
    Cicd,
}

impl Kind {
    /// All kinds, in CLI order.
    #[cfg(test)]
    pub const ALL: [Kind; 4] = [Kind::K8s, Kind::Terraform, Kind::Docker, Kind::Cicd];

    /// Machine name used in logs and option tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::K8s => "k8s",
            Kind::Terraform => "terraform",
            Kind::Docker => "docker",
            Kind::Cicd => "cicd",
        }
    }

    /// Human title used in the guide and console banners.
    pub fn title(self) -> &'static str {
        match self {
            Kind::K8s => "Kubernetes",
            Kind::Terraform => "Terraform",
            Kind::Docker => "Docker",
            Kind::Cicd => "CI/CD",
        }
    }

    /// Options this kind understands, in prompt order.
    pub fn option_specs(self) -> &'static [OptionSpec] {
        match self {
            Kind::K8s => K8S_OPTIONS,
            Kind::Terraform => TERRAFORM_OPTIONS,
            Kind::Docker => DOCKER_OPTIONS,
            Kind::Cicd => CICD_OPTIONS,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CI/CD platform a pipeline is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Platform {
    /// GitHub Actions workflow.
    #[default]
    Github,
    /// GitLab CI pipeline.
    Gitlab,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Github => "github",
            Platform::Gitlab => "gitlab",
        }
    }

    /// Parse a platform name; matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Some(Platform::Github),
            "gitlab" => Some(Platform::Gitlab),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Platform::Github => "GitHub Actions",
            Platform::Gitlab => "GitLab CI",
        }
    }

    /// Path of the pipeline file, relative to the output directory.
    pub fn pipeline_path(self) -> &'static str {
        match self {
            Platform::Github => ".github/workflows/deploy.yml",
            Platform::Gitlab => ".gitlab-ci.yml",
        }
    }

    /// Root of the platform's CI documentation.
    pub fn docs_url(self) -> &'static str {
        match self {
            Platform::Github => "https://docs.github.com/en/actions",
            Platform::Gitlab => "https://docs.gitlab.com/ee/ci/",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of one generator option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Key in [`GenerationRequest::options`].
    pub name: &'static str,
    /// CLI flag reported when a required option is missing.
    pub flag: &'static str,
    /// Whether the option must be supplied.
    pub required: bool,
    /// Value used when the option is absent (ignored for required options).
    pub default: &'static str,
}

const fn required(name: &'static str, flag: &'static str) -> OptionSpec {
    OptionSpec {
        name,
        flag,
        required: true,
        default: "",
    }
}

const fn optional(name: &'static str, flag: &'static str, default: &'static str) -> OptionSpec {
    OptionSpec {
        name,
        flag,
        required: false,
        default,
    }
}

const K8S_OPTIONS: &[OptionSpec] = &[
    required("app", "--app"),
    optional("replicas", "--replicas", defaults::REPLICAS),
    optional("port", "--port", defaults::PORT),
    optional("memory", "--memory", defaults::MEMORY),
    optional("cpu", "--cpu", defaults::CPU),
];

const TERRAFORM_OPTIONS: &[OptionSpec] = &[
    optional("cloud", "--cloud", defaults::CLOUD),
    optional("service", "--service", defaults::SERVICE),
    optional("region", "--region", defaults::REGION),
];

const DOCKER_OPTIONS: &[OptionSpec] = &[
    required("app", "--app"),
    optional("base_image", "--base-image", ""),
    optional("port", "--port", defaults::PORT),
];

const CICD_OPTIONS: &[OptionSpec] = &[
    optional("platform", "--platform", defaults::PLATFORM),
    optional("deploy_target", "--deploy-target", defaults::DEPLOY_TARGET),
];

/// A fully assembled generation request.
///
/// Built with [`GenerationRequest::new`] and the `with_*` methods; there are
/// no mutators once the value has been handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    kind: Kind,
    options: BTreeMap<String, String>,
    output_dir: PathBuf,
}

impl GenerationRequest {
    pub fn new(kind: Kind, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            options: BTreeMap::new(),
            output_dir: output_dir.into(),
        }
    }

    /// Set an option value.
    pub fn with_option(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.options.insert(name.into(), value.to_string());
        self
    }

    /// Set an option value only when one is present.
    pub fn with_optional(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.with_option(name, value),
            None => self,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Value explicitly supplied for `name`, if any.
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    /// Value for `name`, falling back to the kind's declared default.
    pub fn resolved(&self, name: &str) -> Option<&str> {
        self.option(name).or_else(|| {
            self.kind
                .option_specs()
                .iter()
                .find(|spec| spec.name == name && !spec.required)
                .map(|spec| spec.default)
        })
    }

    /// CI platform for this request; unknown values fall back to GitHub.
    pub fn platform(&self) -> Platform {
        self.resolved("platform")
            .and_then(Platform::parse)
            .unwrap_or_default()
    }
}

/// Where an artifact's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    /// Text returned by the AI service.
    Generated,
    /// Fixed companion content shipped with the tool (e.g. `.dockerignore`).
    Static,
}

/// A single output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Path relative to the output directory, with forward slashes.
    pub filename: String,
    pub content: String,
    pub source_kind: Kind,
    pub origin: ArtifactOrigin,
}

impl GeneratedArtifact {
    /// An artifact holding AI-generated text.
    pub fn generated(filename: impl Into<String>, content: impl Into<String>, kind: Kind) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            source_kind: kind,
            origin: ArtifactOrigin::Generated,
        }
    }

    /// An artifact holding fixed companion content.
    pub fn companion(filename: impl Into<String>, content: impl Into<String>, kind: Kind) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            source_kind: kind,
            origin: ArtifactOrigin::Static,
        }
    }
}
