//! Splitting raw AI text into output artifacts.
//!
//! Multi-file kinds are asked to separate files with a marker:
//!
//! ```text
//! ---
//! # FILE: deployment.yaml
//! ```
//!
//! Models do not always comply, so each kind has a fallback: Kubernetes
//! output is split on YAML document separators and named after each
//! document's `kind:`, Terraform output becomes a single `main.tf`.
//! Markdown code fences are stripped everywhere.

use crate::error::{InfraError, Result};
use crate::guide::GUIDE_FILENAME;
use crate::request::{GeneratedArtifact, GenerationRequest, Kind};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static FILE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:---[ \t]*\r?\n)?[ \t]*#[ \t]*FILE:[ \t]*(\S+)[ \t]*\r?$")
        .expect("file marker regex is valid")
});

static FENCE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*```[A-Za-z0-9_+.-]*[ \t]*\r?$\n?").expect("fence regex is valid")
});

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)^[ \t]*```[^\n]*\n(.*?)^[ \t]*```[ \t]*\r?$")
        .expect("fenced block regex is valid")
});

static DOCUMENT_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---[ \t]*\r?$").expect("separator regex is valid"));

static TOP_LEVEL_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^kind:[ \t]*([A-Za-z0-9]+)").expect("kind regex is valid")
});

const DOCKERIGNORE_BASE: &str = "\
# Git
.git
.gitignore

# Environment and secrets
.env
.env.*

# IDE
.vscode/
.idea/
*.swp

# OS
.DS_Store
Thumbs.db

# Docs
*.md
!README.md

# Build
dist/
build/
";

/// Split the AI response for `request` into artifacts, in output order.
///
/// Fails with [`InfraError::AiResponseEmpty`] when the text is blank or no
/// artifact with content can be recovered from it.
pub fn extract_artifacts(request: &GenerationRequest, raw: &str) -> Result<Vec<GeneratedArtifact>> {
    if raw.trim().is_empty() {
        return Err(InfraError::AiResponseEmpty(
            "response contained no text".to_string(),
        ));
    }

    let kind = request.kind();
    let mut artifacts = match kind {
        Kind::K8s => extract_kubernetes(raw),
        Kind::Terraform => extract_terraform(raw),
        Kind::Docker => vec![GeneratedArtifact::generated(
            "Dockerfile",
            single_file_content(raw),
            kind,
        )],
        Kind::Cicd => vec![GeneratedArtifact::generated(
            request.platform().pipeline_path(),
            single_file_content(raw),
            kind,
        )],
    };

    artifacts.retain(|artifact| {
        let keep = !artifact.content.trim().is_empty();
        if !keep {
            log::warn!("dropping empty section '{}' from AI response", artifact.filename);
        }
        keep
    });

    if artifacts.is_empty() {
        return Err(InfraError::AiResponseEmpty(format!(
            "no {} content could be extracted from the response",
            kind.title()
        )));
    }

    if kind == Kind::Docker {
        let app = request.resolved("app").unwrap_or_default();
        artifacts.push(GeneratedArtifact::companion(
            ".dockerignore",
            dockerignore_for(app),
            kind,
        ));
    }

    Ok(artifacts)
}

fn extract_kubernetes(raw: &str) -> Vec<GeneratedArtifact> {
    if let Some(sections) = split_on_markers(raw) {
        return into_artifacts(sections, Kind::K8s);
    }

    let body = fenced_or_whole(raw, "\n---\n");
    let mut sections = Vec::new();
    for (index, doc) in DOCUMENT_SEPARATOR
        .split(&body)
        .map(str::trim)
        .filter(|doc| !doc.is_empty())
        .enumerate()
    {
        let name = match TOP_LEVEL_KIND.captures(doc) {
            Some(caps) => format!("{}.yaml", caps[1].to_lowercase()),
            None => format!("manifest-{}.yaml", index + 1),
        };
        sections.push((name, doc.to_string()));
    }
    into_artifacts(sections, Kind::K8s)
}

fn extract_terraform(raw: &str) -> Vec<GeneratedArtifact> {
    match split_on_markers(raw) {
        Some(sections) => into_artifacts(sections, Kind::Terraform),
        None => vec![GeneratedArtifact::generated(
            "main.tf",
            fenced_or_whole(raw, "\n\n"),
            Kind::Terraform,
        )],
    }
}

/// Content for kinds that produce exactly one file.
fn single_file_content(raw: &str) -> String {
    match split_on_markers(raw) {
        Some(sections) => sections
            .into_iter()
            .next()
            .map(|(_, content)| content)
            .unwrap_or_default(),
        None => first_fenced_block(raw).unwrap_or_else(|| strip_fences(raw)),
    }
}

/// Sections delimited by `# FILE:` markers, or `None` when there are none.
///
/// Text before the first marker is commentary and is discarded. Within a
/// section the first fenced block wins, so prose around it is dropped too.
fn split_on_markers(raw: &str) -> Option<Vec<(String, String)>> {
    let markers: Vec<_> = FILE_MARKER.captures_iter(raw).collect();
    if markers.is_empty() {
        return None;
    }

    let mut sections = Vec::with_capacity(markers.len());
    for (i, caps) in markers.iter().enumerate() {
        let whole = caps.get(0)?;
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(raw.len(), |m| m.start());
        let name = clean_filename(&caps[1]);
        let section = &raw[whole.end()..end];
        let content = first_fenced_block(section).unwrap_or_else(|| strip_fences(section));
        sections.push((name, content));
    }
    Some(sections)
}

fn into_artifacts(sections: Vec<(String, String)>, kind: Kind) -> Vec<GeneratedArtifact> {
    // The guide is written after the artifacts and would overwrite a namesake.
    let mut seen = HashSet::from([GUIDE_FILENAME.to_string()]);
    sections
        .into_iter()
        .map(|(name, content)| {
            let name = unique_name(&name, &mut seen);
            GeneratedArtifact::generated(name, content, kind)
        })
        .collect()
}

/// `name`, or `stem-N.ext` when `name` has already been used.
fn unique_name(name: &str, seen: &mut HashSet<String>) -> String {
    if seen.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
        _ => (name, String::new()),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}{}", stem, n, ext);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

fn clean_filename(raw: &str) -> String {
    raw.trim_matches(|c| matches!(c, '`' | '*' | '"' | '\'' | ':'))
        .to_string()
}

/// Remove Markdown fence lines and surrounding whitespace.
pub(crate) fn strip_fences(text: &str) -> String {
    FENCE_LINE.replace_all(text, "").trim().to_string()
}

fn first_fenced_block(text: &str) -> Option<String> {
    FENCED_BLOCK
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|block| !block.is_empty())
}

/// All fenced blocks joined with `joiner`, or the fence-stripped text.
fn fenced_or_whole(text: &str, joiner: &str) -> String {
    let blocks: Vec<String> = FENCED_BLOCK
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|block| !block.is_empty())
        .collect();
    if blocks.is_empty() {
        strip_fences(text)
    } else {
        blocks.join(joiner)
    }
}

fn dockerignore_for(app: &str) -> String {
    let extra = match app.to_ascii_lowercase().as_str() {
        "python" | "flask" | "django" | "fastapi" => {
            "\n# Python\n__pycache__\n*.pyc\n*.pyo\n*.pyd\n*.egg-info\nvenv/\n.venv/\n"
        }
        "nodejs" | "node" | "express" | "react" | "nextjs" => {
            "\n# Node\nnode_modules/\nnpm-debug.log\ncoverage/\n"
        }
        "java" | "spring" | "springboot" => "\n# Java\ntarget/\n*.class\n.gradle/\n",
        "go" | "golang" => "\n# Go\nbin/\nvendor/\n",
        _ => "",
    };
    format!("{}{}", DOCKERIGNORE_BASE, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ArtifactOrigin, Platform};
    use crate::test_support::{DOCKER_RESPONSE, GITHUB_RESPONSE, K8S_RESPONSE, TERRAFORM_RESPONSE};

    fn names(artifacts: &[GeneratedArtifact]) -> Vec<&str> {
        artifacts.iter().map(|a| a.filename.as_str()).collect()
    }

    fn request(kind: Kind) -> GenerationRequest {
        GenerationRequest::new(kind, "out").with_option("app", "python")
    }

    #[test]
    fn k8s_marker_split() {
        let artifacts = extract_artifacts(&request(Kind::K8s), K8S_RESPONSE).unwrap();
        assert_eq!(
            names(&artifacts),
            ["deployment.yaml", "service.yaml", "configmap.yaml"]
        );
        assert!(artifacts[0].content.starts_with("apiVersion: apps/v1"));
        assert!(!artifacts[0].content.contains("```"));
        assert!(artifacts[2].content.ends_with("LOG_LEVEL: info"));
    }

    #[test]
    fn k8s_fallback_names_documents_by_kind() {
        let raw = "```yaml\napiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: a\n---\napiVersion: v1\nkind: Service\nmetadata:\n  name: a\n---\nfoo: bar\n```";
        let artifacts = extract_artifacts(&request(Kind::K8s), raw).unwrap();
        assert_eq!(
            names(&artifacts),
            ["deployment.yaml", "service.yaml", "manifest-3.yaml"]
        );
    }

    #[test]
    fn k8s_duplicate_names_get_suffix() {
        let raw = "kind: Service\nmetadata:\n  name: a\n---\nkind: Service\nmetadata:\n  name: b\n";
        let artifacts = extract_artifacts(&request(Kind::K8s), raw).unwrap();
        assert_eq!(names(&artifacts), ["service.yaml", "service-2.yaml"]);
    }

    #[test]
    fn terraform_marker_split() {
        let artifacts = extract_artifacts(&request(Kind::Terraform), TERRAFORM_RESPONSE).unwrap();
        assert_eq!(names(&artifacts), ["main.tf", "variables.tf", "outputs.tf"]);
        assert!(artifacts[0].content.starts_with("terraform {"));
    }

    #[test]
    fn terraform_without_markers_is_main_tf() {
        let raw = "```hcl\nresource \"aws_s3_bucket\" \"b\" {}\n```\nThat's it!";
        let artifacts = extract_artifacts(&request(Kind::Terraform), raw).unwrap();
        assert_eq!(names(&artifacts), ["main.tf"]);
        assert_eq!(artifacts[0].content, "resource \"aws_s3_bucket\" \"b\" {}");
    }

    #[test]
    fn terraform_fenced_blocks_without_markers_join_as_hcl() {
        let raw = "Here is main.tf:\n```hcl\nprovider \"aws\" {\n  region = var.region\n}\n```\nAnd variables.tf:\n```hcl\nvariable \"region\" {\n  default = \"us-east-1\"\n}\n```";
        let artifacts = extract_artifacts(&request(Kind::Terraform), raw).unwrap();

        assert_eq!(names(&artifacts), ["main.tf"]);
        let content = &artifacts[0].content;
        assert!(!content.contains("---"));
        assert!(!content.contains("And variables.tf"));
        assert_eq!(
            content,
            "provider \"aws\" {\n  region = var.region\n}\n\nvariable \"region\" {\n  default = \"us-east-1\"\n}"
        );
    }

    #[test]
    fn marker_sections_drop_trailing_commentary() {
        let raw = "---\n# FILE: service.yaml\n```yaml\nkind: Service\n```\n---\n# FILE: configmap.yaml\n```yaml\napiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: app\ndata:\n  LOG_LEVEL: info\n```\n\nThese manifests follow Kubernetes best practices. Apply them with kubectl.";
        let artifacts = extract_artifacts(&request(Kind::K8s), raw).unwrap();

        assert_eq!(names(&artifacts), ["service.yaml", "configmap.yaml"]);
        assert_eq!(artifacts[0].content, "kind: Service");
        assert!(artifacts[1].content.ends_with("LOG_LEVEL: info"));
        assert!(!artifacts[1].content.contains("best practices"));
    }

    #[test]
    fn unfenced_marker_section_keeps_its_text() {
        let raw = "# FILE: outputs.tf\noutput \"id\" {\n  value = 1\n}\n";
        let artifacts = extract_artifacts(&request(Kind::Terraform), raw).unwrap();
        assert_eq!(artifacts[0].content, "output \"id\" {\n  value = 1\n}");
    }

    #[test]
    fn marker_named_like_guide_is_renamed() {
        let raw = "---\n# FILE: main.tf\nlocals {}\n---\n# FILE: IMPLEMENTATION_GUIDE.md\n# Notes\n";
        let artifacts = extract_artifacts(&request(Kind::Terraform), raw).unwrap();
        assert_eq!(names(&artifacts), ["main.tf", "IMPLEMENTATION_GUIDE-2.md"]);
    }

    #[test]
    fn docker_yields_dockerfile_and_dockerignore() {
        let artifacts = extract_artifacts(&request(Kind::Docker), DOCKER_RESPONSE).unwrap();
        assert_eq!(names(&artifacts), ["Dockerfile", ".dockerignore"]);
        assert!(artifacts[0].content.starts_with("# Build stage\nFROM python:3.11-slim"));
        assert_eq!(artifacts[0].origin, ArtifactOrigin::Generated);
        assert_eq!(artifacts[1].origin, ArtifactOrigin::Static);
        assert!(artifacts[1].content.contains("__pycache__"));
    }

    #[test]
    fn docker_ignores_prose_around_code_block() {
        let raw = "Sure! Here is the Dockerfile:\n\n```dockerfile\nFROM alpine:3.20\n```\n\nBuild it with docker build.";
        let artifacts = extract_artifacts(&request(Kind::Docker), raw).unwrap();
        assert_eq!(artifacts[0].content, "FROM alpine:3.20");
    }

    #[test]
    fn dockerignore_varies_by_app() {
        assert!(dockerignore_for("nodejs").contains("node_modules/"));
        assert!(dockerignore_for("go").contains("vendor/"));
        assert!(!dockerignore_for("rust").contains("node_modules/"));
    }

    #[test]
    fn cicd_path_follows_platform() {
        let github = GenerationRequest::new(Kind::Cicd, "out");
        let artifacts = extract_artifacts(&github, GITHUB_RESPONSE).unwrap();
        assert_eq!(names(&artifacts), [Platform::Github.pipeline_path()]);
        assert!(artifacts[0].content.starts_with("name: Deploy"));

        let gitlab = GenerationRequest::new(Kind::Cicd, "out").with_option("platform", "gitlab");
        let artifacts = extract_artifacts(&gitlab, "stages:\n  - build\n").unwrap();
        assert_eq!(names(&artifacts), [".gitlab-ci.yml"]);
    }

    #[test]
    fn blank_response_is_empty_error() {
        for kind in Kind::ALL {
            let err = extract_artifacts(&request(kind), "  \n ").unwrap_err();
            assert!(matches!(err, InfraError::AiResponseEmpty(_)));
        }
    }

    #[test]
    fn fences_only_response_is_empty_error() {
        let err = extract_artifacts(&request(Kind::Docker), "```dockerfile\n```").unwrap_err();
        assert!(matches!(err, InfraError::AiResponseEmpty(_)));
    }

    #[test]
    fn empty_marker_sections_are_dropped() {
        let raw = "---\n# FILE: main.tf\nprovider \"aws\" {}\n---\n# FILE: variables.tf\n\n";
        let artifacts = extract_artifacts(&request(Kind::Terraform), raw).unwrap();
        assert_eq!(names(&artifacts), ["main.tf"]);
    }

    #[test]
    fn marker_filenames_are_cleaned() {
        let raw = "# FILE: `deployment.yaml`\nkind: Deployment\n";
        let artifacts = extract_artifacts(&request(Kind::K8s), raw).unwrap();
        assert_eq!(names(&artifacts), ["deployment.yaml"]);
    }

    #[test]
    fn unique_name_without_extension() {
        let mut seen = HashSet::new();
        assert_eq!(unique_name("Dockerfile", &mut seen), "Dockerfile");
        assert_eq!(unique_name("Dockerfile", &mut seen), "Dockerfile-2");
        assert_eq!(unique_name("Dockerfile", &mut seen), "Dockerfile-3");
    }
}
