//! `IMPLEMENTATION_GUIDE.md` rendering.

use crate::docs;
use crate::request::{GeneratedArtifact, GenerationRequest, Kind, Platform};
use crate::validate::ValidationResult;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// File name of the guide inside the output directory.
pub const GUIDE_FILENAME: &str = "IMPLEMENTATION_GUIDE.md";

/// One generated file and, unless it is a static companion, its validation.
#[derive(Debug, Clone, Copy)]
pub struct GuideFile<'a> {
    pub artifact: &'a GeneratedArtifact,
    pub validation: Option<&'a ValidationResult>,
}

/// Render the implementation guide.
pub fn render_guide(
    request: &GenerationRequest,
    requirements: &str,
    files: &[GuideFile<'_>],
    generated_at: DateTime<Utc>,
) -> String {
    let kind = request.kind();
    let mut out = String::new();

    let _ = writeln!(out, "# {} Implementation Guide\n", kind.title());
    let _ = writeln!(
        out,
        "_Generated {}_\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    out.push_str("## Overview\n\n");
    let _ = writeln!(out, "{}\n", overview(request));

    out.push_str("## Requirements\n\n");
    let _ = writeln!(out, "```text\n{}\n```\n", requirements.trim());

    out.push_str("## Generated Files\n\n");
    for file in files {
        let _ = writeln!(
            out,
            "- `{}`: {}",
            file.artifact.filename,
            describe_file(&file.artifact.filename)
        );
    }
    out.push('\n');

    out.push_str("## Deployment Steps\n\n");
    out.push_str(&deploy_steps(request));
    out.push('\n');

    out.push_str("## Validation Results\n\n");
    out.push_str(&validation_section(files));
    out.push('\n');

    out.push_str(&docs::render_section(request, files.iter().map(|f| f.artifact)));
    out.push('\n');

    out.push_str("## Security Checklist\n\n");
    for item in security_checklist(kind) {
        let _ = writeln!(out, "- [ ] {}", item);
    }
    out.push('\n');

    out.push_str("## Customization\n\n");
    for item in customization(kind) {
        let _ = writeln!(out, "- {}", item);
    }
    out.push('\n');

    out.push_str("## Official Documentation\n\n");
    for (title, url) in official_links(request) {
        let _ = writeln!(out, "- [{}]({})", title, url);
    }
    out.push('\n');

    out.push_str("---\n\n");
    out.push_str(
        "_Generated by InfraAgent. Review all generated code before applying it to a real environment._\n",
    );

    out
}

fn overview(request: &GenerationRequest) -> String {
    let value = |name: &str| request.resolved(name).unwrap_or_default().to_string();

    match request.kind() {
        Kind::K8s => format!(
            "Kubernetes manifests for `{}` running {} replicas on port {}.",
            value("app"),
            value("replicas"),
            value("port")
        ),
        Kind::Terraform => format!(
            "Terraform configuration for a {} {} in {}.",
            value("cloud").to_ascii_uppercase(),
            value("service"),
            value("region")
        ),
        Kind::Docker => format!(
            "A production Dockerfile for a {} application listening on port {}.",
            value("app"),
            value("port")
        ),
        Kind::Cicd => format!(
            "A {} pipeline that builds, tests and deploys to {}.",
            request.platform().title(),
            value("deploy_target")
        ),
    }
}

/// A short description of a generated file, chosen by its name.
pub fn describe_file(filename: &str) -> &'static str {
    let name = filename.rsplit('/').next().unwrap_or(filename).to_ascii_lowercase();
    let stem = name.split('.').next().unwrap_or_default();

    match name.as_str() {
        "dockerfile" => return "container image build instructions",
        ".dockerignore" => return "files excluded from the Docker build context",
        ".gitlab-ci.yml" => return "GitLab CI/CD pipeline definition",
        "main.tf" => return "provider configuration and core resources",
        "variables.tf" => return "input variables",
        "outputs.tf" => return "output values",
        "versions.tf" | "providers.tf" => return "Terraform and provider version constraints",
        "terraform.tfvars" => return "variable values",
        _ => {}
    }

    if filename.contains(".github/workflows/") {
        return "GitHub Actions workflow";
    }

    match stem {
        "deployment" => "Deployment running the application pods",
        "service" => "Service exposing the pods on the network",
        "configmap" => "ConfigMap holding non-secret configuration",
        "secret" => "Secret holding sensitive configuration",
        "ingress" => "Ingress routing external HTTP traffic",
        "hpa" | "horizontalpodautoscaler" => "HorizontalPodAutoscaler scaling the deployment",
        "namespace" => "Namespace for the application",
        "statefulset" => "StatefulSet running stateful pods",
        _ if name.ends_with(".tf") => "Terraform configuration",
        _ if name.ends_with(".yaml") || name.ends_with(".yml") => "Kubernetes manifest",
        _ => "generated file",
    }
}

fn deploy_steps(request: &GenerationRequest) -> String {
    let dir = request.output_dir().display();
    let app = request.resolved("app").unwrap_or("app");
    let port = request.resolved("port").unwrap_or_default();

    match request.kind() {
        Kind::K8s => format!(
            "1. Review the manifests in `{dir}`.\n\
             2. Apply them:\n\n   ```bash\n   kubectl apply -f {dir}/\n   ```\n\n\
             3. Watch the rollout:\n\n   ```bash\n   kubectl rollout status deployment/{app}\n   kubectl get pods -l app={app}\n   ```\n",
        ),
        Kind::Terraform => format!(
            "1. Configure credentials for your cloud provider.\n\
             2. Initialise and review the plan:\n\n   ```bash\n   cd {dir}\n   terraform init\n   terraform plan -out=tfplan\n   ```\n\n\
             3. Apply the plan:\n\n   ```bash\n   terraform apply tfplan\n   ```\n",
        ),
        Kind::Docker => format!(
            "1. Copy `Dockerfile` and `.dockerignore` from `{dir}` into your project root.\n\
             2. Build the image:\n\n   ```bash\n   docker build -t {app}:1.0.0 .\n   ```\n\n\
             3. Run it:\n\n   ```bash\n   docker run --rm -p {port}:{port} {app}:1.0.0\n   ```\n",
        ),
        Kind::Cicd => match request.platform() {
            Platform::Github => format!(
                "1. Copy `{dir}/.github/workflows/deploy.yml` into your repository.\n\
                 2. Add the credentials the workflow references under Settings > Secrets and variables > Actions.\n\
                 3. Push to the default branch to trigger the workflow.\n",
            ),
            Platform::Gitlab => format!(
                "1. Copy `{dir}/.gitlab-ci.yml` to your repository root.\n\
                 2. Add the credentials the pipeline references under Settings > CI/CD > Variables.\n\
                 3. Push to trigger the pipeline.\n",
            ),
        },
    }
}

fn validation_section(files: &[GuideFile<'_>]) -> String {
    let mut out = String::new();

    for file in files {
        let Some(result) = file.validation else {
            let _ = writeln!(out, "- `{}`: not validated (static file)", file.artifact.filename);
            continue;
        };

        if result.messages().is_empty() {
            let _ = writeln!(out, "- `{}`: ✅ no issues found", file.artifact.filename);
            continue;
        }

        let marker = if result.ok() { "⚠️" } else { "❌" };
        let _ = writeln!(out, "- `{}`: {} {}", file.artifact.filename, marker, result.summary());
        for message in result.messages() {
            let _ = writeln!(out, "  - {}", message);
        }
    }

    out
}

fn security_checklist(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::K8s => &[
            "Containers run as a non-root user",
            "CPU and memory limits are set",
            "Liveness and readiness probes are configured",
            "Secrets are stored in Secret objects, not ConfigMaps",
            "Images are pinned to a version, not `latest`",
        ],
        Kind::Terraform => &[
            "No credentials are hard-coded; use environment variables or a credential chain",
            "Remote state is configured with encryption and locking",
            "Security groups only open the ports you need",
            "Resources are tagged for ownership and cost tracking",
        ],
        Kind::Docker => &[
            "The final stage runs as a non-root USER",
            "Base images are pinned to a version",
            "No secrets are baked into the image",
            "`.dockerignore` excludes `.env` and VCS metadata",
            "A HEALTHCHECK is defined",
        ],
        Kind::Cicd => &[
            "Secrets come from the platform's secret store",
            "Third-party actions or images are pinned to a version",
            "Deploy jobs only run on protected branches",
            "Tests must pass before deployment",
        ],
    }
}

fn customization(kind: Kind) -> &'static [&'static str] {
    match kind {
        Kind::K8s => &[
            "Adjust `replicas` and resource requests/limits to match observed load",
            "Replace the image reference with your registry path",
            "Add an Ingress or change the Service type to control exposure",
        ],
        Kind::Terraform => &[
            "Override defaults in `variables.tf` or a `terraform.tfvars` file",
            "Add a `backend` block for remote state",
            "Split resources into modules as the configuration grows",
        ],
        Kind::Docker => &[
            "Change the base image tag to the runtime version you need",
            "Adjust `EXPOSE` and the start command for your application",
            "Extend `.dockerignore` with project-specific build output",
        ],
        Kind::Cicd => &[
            "Adjust branch filters and triggers",
            "Add caching for dependency directories",
            "Add environments and manual approvals for production deploys",
        ],
    }
}

fn official_links(request: &GenerationRequest) -> Vec<(&'static str, &'static str)> {
    match request.kind() {
        Kind::K8s => vec![
            ("Kubernetes documentation", "https://kubernetes.io/docs/"),
            ("kubectl reference", "https://kubernetes.io/docs/reference/kubectl/"),
            (
                "Configuration best practices",
                "https://kubernetes.io/docs/concepts/configuration/overview/",
            ),
        ],
        Kind::Terraform => {
            let provider = match request.resolved("cloud").unwrap_or_default() {
                "azure" => "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs",
                "gcp" => "https://registry.terraform.io/providers/hashicorp/google/latest/docs",
                _ => "https://registry.terraform.io/providers/hashicorp/aws/latest/docs",
            };
            vec![
                ("Terraform documentation", "https://developer.hashicorp.com/terraform/docs"),
                ("Provider documentation", provider),
                (
                    "Terraform style guide",
                    "https://developer.hashicorp.com/terraform/language/style",
                ),
            ]
        }
        Kind::Docker => vec![
            ("Dockerfile reference", "https://docs.docker.com/reference/dockerfile/"),
            (
                "Dockerfile best practices",
                "https://docs.docker.com/develop/dev-best-practices/dockerfile-best-practices/",
            ),
            ("Multi-stage builds", "https://docs.docker.com/develop/develop-images/multistage-build/"),
        ],
        Kind::Cicd => match request.platform() {
            Platform::Github => vec![
                ("GitHub Actions documentation", "https://docs.github.com/en/actions"),
                (
                    "Workflow syntax",
                    "https://docs.github.com/en/actions/using-workflows/workflow-syntax-for-github-actions",
                ),
            ],
            Platform::Gitlab => vec![
                ("GitLab CI/CD documentation", "https://docs.gitlab.com/ee/ci/"),
                ("`.gitlab-ci.yml` reference", "https://docs.gitlab.com/ee/ci/yaml/"),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ArtifactOrigin;
    use crate::validate::validate_artifact;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    fn render(request: &GenerationRequest, artifacts: &[GeneratedArtifact]) -> String {
        let results: Vec<Option<ValidationResult>> = artifacts.iter().map(validate_artifact).collect();
        let files: Vec<GuideFile<'_>> = artifacts
            .iter()
            .zip(&results)
            .map(|(artifact, validation)| GuideFile {
                artifact,
                validation: validation.as_ref(),
            })
            .collect();
        render_guide(request, "- App: demo", &files, fixed_time())
    }

    #[test]
    fn test_sections_appear_in_order() {
        let request = GenerationRequest::new(Kind::K8s, "out").with_option("app", "demo");
        let artifacts = vec![GeneratedArtifact::generated(
            "service.yaml",
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: demo\nspec:\n  ports:\n    - port: 80\n",
            Kind::K8s,
        )];
        let guide = render(&request, &artifacts);

        let headings = [
            "# Kubernetes Implementation Guide",
            "_Generated 2025-03-14 09:30:00 UTC_",
            "## Overview",
            "## Requirements",
            "## Generated Files",
            "## Deployment Steps",
            "## Validation Results",
            "## Documentation References",
            "## Security Checklist",
            "## Customization",
            "## Official Documentation",
            "_Generated by InfraAgent.",
        ];
        let mut last = 0;
        for heading in headings {
            let pos = guide[last..]
                .find(heading)
                .unwrap_or_else(|| panic!("{heading} missing or out of order"));
            last += pos;
        }
    }

    #[test]
    fn test_clean_file_gets_check_mark() {
        let request = GenerationRequest::new(Kind::K8s, "out").with_option("app", "demo");
        let artifacts = vec![GeneratedArtifact::generated(
            "service.yaml",
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: demo\nspec:\n  ports:\n    - port: 80\n",
            Kind::K8s,
        )];
        let guide = render(&request, &artifacts);
        assert!(guide.contains("- `service.yaml`: ✅ no issues found"));
    }

    #[test]
    fn test_findings_are_listed_with_severity() {
        let request = GenerationRequest::new(Kind::Docker, "out").with_option("app", "node");
        let artifacts = vec![
            GeneratedArtifact::generated("Dockerfile", "FROM node\nCMD [\"node\"]\n", Kind::Docker),
            GeneratedArtifact::companion(".dockerignore", ".git\n", Kind::Docker),
        ];
        assert_eq!(artifacts[1].origin, ArtifactOrigin::Static);

        let guide = render(&request, &artifacts);
        assert!(guide.contains("- `Dockerfile`: ⚠️"));
        assert!(guide.contains("  - [warning] no USER instruction"));
        assert!(guide.contains("  - [suggestion] no HEALTHCHECK defined"));
        assert!(guide.contains("- `.dockerignore`: not validated (static file)"));
    }

    #[test]
    fn test_cicd_links_follow_platform() {
        let artifacts = vec![GeneratedArtifact::generated(
            ".gitlab-ci.yml",
            "stages: [test]\ntest:\n  script: [make]\n",
            Kind::Cicd,
        )];
        let request = GenerationRequest::new(Kind::Cicd, "out").with_option("platform", "gitlab");
        let guide = render(&request, &artifacts);

        assert!(guide.contains("[GitLab CI/CD documentation](https://docs.gitlab.com/ee/ci/)"));
        assert!(guide.contains("Settings > CI/CD > Variables"));
        assert!(guide.contains("A GitLab CI pipeline"));
    }

    #[test]
    fn test_describe_file() {
        assert_eq!(describe_file("Dockerfile"), "container image build instructions");
        assert_eq!(describe_file(".github/workflows/deploy.yml"), "GitHub Actions workflow");
        assert_eq!(describe_file("deployment.yaml"), "Deployment running the application pods");
        assert_eq!(describe_file("service-2.yaml"), "Kubernetes manifest");
        assert_eq!(describe_file("network.tf"), "Terraform configuration");
    }

    #[test]
    fn test_terraform_overview_and_provider_link() {
        let request = GenerationRequest::new(Kind::Terraform, "out")
            .with_option("cloud", "gcp")
            .with_option("service", "gke");
        let artifacts = vec![GeneratedArtifact::generated(
            "main.tf",
            "terraform {}\nprovider \"google\" {}\n",
            Kind::Terraform,
        )];
        let guide = render(&request, &artifacts);

        assert!(guide.contains("Terraform configuration for a GCP gke in us-east-1."));
        assert!(guide.contains("hashicorp/google/latest/docs"));
    }
}
