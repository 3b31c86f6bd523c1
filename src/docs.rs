//! Links from generated code to official documentation.
//!
//! Each kind has a fixed table of field (or instruction, or resource type)
//! to URL. Fields are discovered in the generated text and reported in table
//! order, once each.

use crate::request::{ArtifactOrigin, GeneratedArtifact, GenerationRequest, Kind, Platform};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

const K8S_LINKS: &[(&str, &str)] = &[
    ("apiVersion", "https://kubernetes.io/docs/reference/kubernetes-api/"),
    ("Deployment", "https://kubernetes.io/docs/concepts/workloads/controllers/deployment/"),
    ("StatefulSet", "https://kubernetes.io/docs/concepts/workloads/controllers/statefulset/"),
    ("spec.replicas", "https://kubernetes.io/docs/concepts/workloads/controllers/deployment/#replicas"),
    ("spec.strategy", "https://kubernetes.io/docs/concepts/workloads/controllers/deployment/#strategy"),
    ("containers", "https://kubernetes.io/docs/concepts/containers/"),
    ("image", "https://kubernetes.io/docs/concepts/containers/images/"),
    (
        "livenessProbe",
        "https://kubernetes.io/docs/tasks/configure-pod-container/configure-liveness-readiness-startup-probes/",
    ),
    (
        "readinessProbe",
        "https://kubernetes.io/docs/tasks/configure-pod-container/configure-liveness-readiness-startup-probes/#define-readiness-probes",
    ),
    ("resources", "https://kubernetes.io/docs/concepts/configuration/manage-resources-containers/"),
    (
        "resources.requests",
        "https://kubernetes.io/docs/concepts/configuration/manage-resources-containers/#resource-requests-and-limits-of-pod-and-container",
    ),
    (
        "resources.limits",
        "https://kubernetes.io/docs/concepts/configuration/manage-resources-containers/#resource-requests-and-limits-of-pod-and-container",
    ),
    ("securityContext", "https://kubernetes.io/docs/tasks/configure-pod-container/security-context/"),
    (
        "runAsNonRoot",
        "https://kubernetes.io/docs/tasks/configure-pod-container/security-context/#set-the-security-context-for-a-pod",
    ),
    ("Service", "https://kubernetes.io/docs/concepts/services-networking/service/"),
    (
        "Service.type",
        "https://kubernetes.io/docs/concepts/services-networking/service/#publishing-services-service-types",
    ),
    ("Ingress", "https://kubernetes.io/docs/concepts/services-networking/ingress/"),
    ("ConfigMap", "https://kubernetes.io/docs/concepts/configuration/configmap/"),
    ("Secret", "https://kubernetes.io/docs/concepts/configuration/secret/"),
    ("HorizontalPodAutoscaler", "https://kubernetes.io/docs/tasks/run-application/horizontal-pod-autoscale/"),
    ("namespace", "https://kubernetes.io/docs/concepts/overview/working-with-objects/namespaces/"),
    ("labels", "https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/"),
    ("selector", "https://kubernetes.io/docs/concepts/overview/working-with-objects/labels/#label-selectors"),
];

const TERRAFORM_LINKS: &[(&str, &str)] = &[
    ("aws_vpc", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/vpc"),
    ("aws_subnet", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/subnet"),
    (
        "aws_internet_gateway",
        "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/internet_gateway",
    ),
    ("aws_nat_gateway", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/nat_gateway"),
    ("aws_route_table", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/route_table"),
    (
        "aws_security_group",
        "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/security_group",
    ),
    ("aws_db_instance", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/db_instance"),
    ("aws_rds_cluster", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/rds_cluster"),
    ("aws_eks_cluster", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/eks_cluster"),
    ("aws_s3_bucket", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/s3_bucket"),
    ("aws_iam_role", "https://registry.terraform.io/providers/hashicorp/aws/latest/docs/resources/iam_role"),
    ("terraform", "https://developer.hashicorp.com/terraform/language/terraform"),
    ("provider", "https://developer.hashicorp.com/terraform/language/providers"),
    ("variable", "https://developer.hashicorp.com/terraform/language/values/variables"),
    ("output", "https://developer.hashicorp.com/terraform/language/values/outputs"),
    ("locals", "https://developer.hashicorp.com/terraform/language/values/locals"),
    ("module", "https://developer.hashicorp.com/terraform/language/modules"),
];

const DOCKER_LINKS: &[(&str, &str)] = &[
    ("FROM", "https://docs.docker.com/engine/reference/builder/#from"),
    ("ARG", "https://docs.docker.com/engine/reference/builder/#arg"),
    ("RUN", "https://docs.docker.com/engine/reference/builder/#run"),
    ("COPY", "https://docs.docker.com/engine/reference/builder/#copy"),
    ("ADD", "https://docs.docker.com/engine/reference/builder/#add"),
    ("WORKDIR", "https://docs.docker.com/engine/reference/builder/#workdir"),
    ("ENV", "https://docs.docker.com/engine/reference/builder/#env"),
    ("EXPOSE", "https://docs.docker.com/engine/reference/builder/#expose"),
    ("ENTRYPOINT", "https://docs.docker.com/engine/reference/builder/#entrypoint"),
    ("CMD", "https://docs.docker.com/engine/reference/builder/#cmd"),
    ("USER", "https://docs.docker.com/engine/reference/builder/#user"),
    ("HEALTHCHECK", "https://docs.docker.com/engine/reference/builder/#healthcheck"),
    ("multi-stage", "https://docs.docker.com/develop/develop-images/multistage-build/"),
    ("best-practices", "https://docs.docker.com/develop/dev-best-practices/dockerfile-best-practices/"),
];

const CICD_LINKS: &[(&str, &str)] = &[
    ("github-actions", "https://docs.github.com/en/actions"),
    (
        "workflow-syntax",
        "https://docs.github.com/en/actions/using-workflows/workflow-syntax-for-github-actions",
    ),
    ("gitlab-ci", "https://docs.gitlab.com/ee/ci/"),
    ("gitlab-ci-yaml", "https://docs.gitlab.com/ee/ci/yaml/"),
];

static YAML_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:-[ \t]+)?([A-Za-z][A-Za-z0-9_-]*):").expect("yaml key regex is valid")
});

static YAML_KIND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^kind:[ \t]*([A-Za-z0-9]+)").expect("yaml kind regex is valid")
});

static DOCKER_INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([A-Za-z]+)[ \t]").expect("instruction regex is valid")
});

static TF_LABELLED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*(resource|data)[ \t]+"([A-Za-z0-9_]+)""#)
        .expect("terraform resource regex is valid")
});

static TF_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([a-z]+)[ \t]*[\x22{]").expect("terraform keyword regex is valid")
});

static GITLAB_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:stages|before_script|include):|^[ \t]+script:")
        .expect("gitlab marker regex is valid")
});

fn table(kind: Kind) -> &'static [(&'static str, &'static str)] {
    match kind {
        Kind::K8s => K8S_LINKS,
        Kind::Terraform => TERRAFORM_LINKS,
        Kind::Docker => DOCKER_LINKS,
        Kind::Cicd => CICD_LINKS,
    }
}

/// Landing page used when a field has no specific entry.
pub fn docs_root(kind: Kind) -> &'static str {
    match kind {
        Kind::K8s => "https://kubernetes.io/docs/",
        Kind::Terraform => "https://developer.hashicorp.com/terraform/docs",
        Kind::Docker => "https://docs.docker.com/reference/dockerfile/",
        Kind::Cicd => "https://docs.github.com/en/actions",
    }
}

/// Documentation URL for `field`.
///
/// Terraform resource types outside the table map onto their registry page
/// when the provider prefix is known; anything else gets [`docs_root`].
pub fn doc_link(field: &str, kind: Kind) -> String {
    if let Some((_, url)) = table(kind).iter().find(|(name, _)| *name == field) {
        return url.to_string();
    }

    if kind == Kind::Terraform
        && let Some(url) = registry_link(field)
    {
        return url;
    }

    docs_root(kind).to_string()
}

/// A `# Reference: <url>` comment line for `field`.
pub fn reference_comment(field: &str, kind: Kind) -> String {
    format!("# Reference: {}", doc_link(field, kind))
}

/// Registry page for a resource type, or for `data.<type>` data sources.
fn registry_link(field: &str) -> Option<String> {
    let (section, type_name) = match field.strip_prefix("data.") {
        Some(type_name) => ("data-sources", type_name),
        None => ("resources", field),
    };
    let (provider, rest) = type_name.split_once('_')?;
    let namespace = match provider {
        "aws" | "azurerm" | "google" | "kubernetes" | "helm" | "random" => "hashicorp",
        _ => return None,
    };
    Some(format!(
        "https://registry.terraform.io/providers/{}/{}/latest/docs/{}/{}",
        namespace, provider, section, rest
    ))
}

/// Documented fields that appear in `content`, in table order.
///
/// Terraform resource types without a table entry follow the table entries
/// in order of first appearance.
pub fn find_fields(kind: Kind, content: &str) -> Vec<String> {
    match kind {
        Kind::K8s => {
            let found = yaml_names(content);
            select(kind, |field| match field.split_once('.') {
                Some((parent, child)) => found.contains(parent) && found.contains(child),
                None => found.contains(field),
            })
        }
        Kind::Terraform => {
            // Data sources are reported as `data.<type>` to keep their own URL.
            let labels = TF_LABELLED_BLOCK.captures_iter(content).map(|caps| match &caps[1] {
                "data" => format!("data.{}", &caps[2]),
                _ => caps[2].to_string(),
            });
            let keywords = TF_KEYWORD
                .captures_iter(content)
                .map(|caps| caps[1].to_string());

            let mut found: Vec<String> = Vec::new();
            for name in labels.chain(keywords) {
                if !found.contains(&name) {
                    found.push(name);
                }
            }

            let mut fields = select(kind, |field| found.iter().any(|f| f == field));
            for extra in found {
                if registry_link(&extra).is_some() && !fields.contains(&extra) {
                    fields.push(extra);
                }
            }
            fields
        }
        Kind::Docker => {
            let instructions: HashSet<String> = DOCKER_INSTRUCTION
                .captures_iter(content)
                .map(|caps| caps[1].to_ascii_uppercase())
                .collect();
            let stages = DOCKER_INSTRUCTION
                .captures_iter(content)
                .filter(|caps| caps[1].eq_ignore_ascii_case("FROM"))
                .count();

            select(kind, |field| match field {
                "multi-stage" => stages > 1,
                "best-practices" => true,
                _ => instructions.contains(field),
            })
        }
        Kind::Cicd => {
            let gitlab = GITLAB_MARKER.is_match(content);
            select(kind, |field| field.starts_with("gitlab") == gitlab)
        }
    }
}

/// Keys and `kind:` values of a YAML text.
fn yaml_names(content: &str) -> HashSet<String> {
    YAML_KEY
        .captures_iter(content)
        .chain(YAML_KIND.captures_iter(content))
        .map(|caps| caps[1].to_string())
        .collect()
}

fn select(kind: Kind, present: impl Fn(&str) -> bool) -> Vec<String> {
    table(kind)
        .iter()
        .filter(|(field, _)| present(field))
        .map(|(field, _)| field.to_string())
        .collect()
}

/// Markdown section listing the documentation for every field found in the
/// generated artifacts. Static companion files are not scanned.
pub fn render_section<'a>(
    request: &GenerationRequest,
    artifacts: impl IntoIterator<Item = &'a GeneratedArtifact>,
) -> String {
    let kind = request.kind();
    let mut seen = HashSet::new();
    let mut out = String::from("## Documentation References\n\n");

    let fields: Vec<String> = artifacts
        .into_iter()
        .filter(|a| a.origin == ArtifactOrigin::Generated)
        .flat_map(|a| match kind {
            // The requested platform is authoritative for pipelines.
            Kind::Cicd => {
                let gitlab = request.platform() == Platform::Gitlab;
                select(kind, |field| field.starts_with("gitlab") == gitlab)
            }
            _ => find_fields(kind, &a.content),
        })
        .filter(|field| seen.insert(field.clone()))
        .collect();

    if fields.is_empty() {
        let (title, root) = match kind {
            Kind::Cicd => (request.platform().title(), request.platform().docs_url()),
            _ => (kind.title(), docs_root(kind)),
        };
        out.push_str(&format!("- {} documentation: {}\n", title, root));
        return out;
    }

    for field in &fields {
        out.push_str(&format!("- `{}`: {}\n", field, doc_link(field, kind)));
    }

    out.push_str("\nWhen editing a field, keep its reference next to it:\n\n```\n");
    out.push_str(&reference_comment(&fields[0], kind));
    out.push_str("\n```\n");
    out
}
