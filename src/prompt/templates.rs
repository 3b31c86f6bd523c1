//! Fixed prompt templates, one requirements block and one instruction block per kind.

use crate::request::Kind;

pub(super) const K8S_REQUIREMENTS: &str = "\
Generate Kubernetes deployment for:
- Application type: {app}
- Number of replicas: {replicas}
- Container port: {port}
- Memory limit: {memory}
- CPU limit: {cpu}

Requirements:
- Include LoadBalancer Service for external access
- Add ConfigMap for environment variables
- Implement health checks (liveness and readiness probes)
- Apply security best practices (non-root user, read-only filesystem)
- Add resource requests and limits
- Include proper labels and selectors";

pub(super) const TERRAFORM_REQUIREMENTS: &str = "\
Generate Terraform code for {cloud_upper} infrastructure:
- Cloud provider: {cloud}
- Service: {service}
- Region: {region}

Requirements:
- Provision the {service} service with networking isolated in private subnets
- Configure security groups or firewall rules with least privilege
- Enable encryption at rest
- Include proper tagging
- Use variables for configurable values
- Add outputs for important resource IDs";

pub(super) const DOCKER_REQUIREMENTS: &str = "\
Generate optimized Dockerfile for {app} application:
- Application type: {app}
{base_image_line}- Exposed port: {port}

Requirements:
- Use multi-stage build for optimization
- Run as non-root user
- Use minimal base image (alpine or slim variants)
- Implement layer caching best practices
- Add HEALTHCHECK
- Include security best practices
- Optimize for small image size";

pub(super) const CICD_REQUIREMENTS: &str = "\
Generate {platform_upper} CI/CD pipeline for:
- Platform: {platform}
- Deployment target: {deploy_target}

Requirements:
- Build stage: Build and test application
- Docker stage: Build and push Docker image
- Deploy stage: Deploy to {deploy_target}
- Include caching for dependencies
- Add proper secrets management
- Implement parallel execution where possible
- Add status badges";

const K8S_INSTRUCTIONS: &str = "\
You are an expert Kubernetes architect and DevOps engineer.

Generate PRODUCTION-READY Kubernetes YAML manifests based on these requirements:
{requirements}

CRITICAL INSTRUCTIONS:
1. Generate COMPLETE, working YAML (not snippets or examples)
2. Include EVERY required field for production use
3. Add inline comments with links to official Kubernetes documentation (https://kubernetes.io/docs/...)
4. Implement security best practices:
   - runAsNonRoot: true
   - readOnlyRootFilesystem: true (where applicable)
   - allowPrivilegeEscalation: false
   - Drop unnecessary capabilities
   - Resource limits enforced
5. Include health checks (liveness + readiness probes)
6. Use exact field names from the official Kubernetes API spec
7. No \"change-me\" placeholders
8. Include proper labels and selectors

Generate these files in order:
1. deployment.yaml - Complete Deployment manifest
2. service.yaml - Service for networking
3. configmap.yaml - ConfigMap for configuration

Separate each file with:
---
# FILE: filename.yaml
";

const TERRAFORM_INSTRUCTIONS: &str = "\
You are an expert Terraform architect specializing in {cloud_upper} infrastructure.

Generate PRODUCTION-READY Terraform code based on these requirements:
{requirements}

CRITICAL INSTRUCTIONS:
1. Generate complete Terraform code (not snippets)
2. Include a terraform block with required_version and required_providers
3. Include proper provider configuration
4. Add inline comments linking each resource to the Terraform Registry: {provider_docs}
5. Implement security best practices:
   - Private subnets for workloads
   - Encryption at rest
   - Least-privilege security rules
   - Logging where applicable
   - No hard-coded credentials
6. Use exact argument names from the official provider docs
7. Include proper resource dependencies
8. Use variables for configurable values

Generate these files in order:
1. main.tf - Main infrastructure resources
2. variables.tf - Input variables
3. outputs.tf - Output values

Separate each file with:
---
# FILE: filename.tf
";

const DOCKER_INSTRUCTIONS: &str = "\
You are an expert Docker architect.

Generate a PRODUCTION-READY, optimized Dockerfile based on these requirements:
{requirements}

CRITICAL INSTRUCTIONS:
1. Use multi-stage builds for optimization
2. Include comments with links to Docker documentation (https://docs.docker.com/...)
3. Every instruction MUST have a comment explaining its purpose
4. Implement security best practices:
   - Use specific version tags (not 'latest')
   - Run as non-root user
   - Use minimal base image (alpine/slim variants)
   - Don't include unnecessary packages
5. Optimize for layer caching:
   - Copy dependency files first
   - Copy source code last
6. Include HEALTHCHECK
7. Proper ENTRYPOINT and CMD usage

Return only the Dockerfile.
";

const CICD_INSTRUCTIONS: &str = "\
You are an expert DevOps engineer specializing in CI/CD pipelines.

Generate a PRODUCTION-READY {platform_upper} CI/CD pipeline based on these requirements:
{requirements}

CRITICAL INSTRUCTIONS:
1. Generate complete pipeline configuration (not snippets)
2. Include inline comments with links to official {platform} docs
3. Reference: {platform_docs}
4. Implement best practices:
   - Proper job dependencies
   - Caching where applicable
   - Secrets management
   - Parallel execution where possible
5. Include typical stages:
   - Build
   - Test
   - Deploy
6. Use specific action/image versions
7. Add proper error handling

Return only the contents of {pipeline_path}.
";

pub(super) fn requirements_template(kind: Kind) -> &'static str {
    match kind {
        Kind::K8s => K8S_REQUIREMENTS,
        Kind::Terraform => TERRAFORM_REQUIREMENTS,
        Kind::Docker => DOCKER_REQUIREMENTS,
        Kind::Cicd => CICD_REQUIREMENTS,
    }
}

pub(super) fn instructions_template(kind: Kind) -> &'static str {
    match kind {
        Kind::K8s => K8S_INSTRUCTIONS,
        Kind::Terraform => TERRAFORM_INSTRUCTIONS,
        Kind::Docker => DOCKER_INSTRUCTIONS,
        Kind::Cicd => CICD_INSTRUCTIONS,
    }
}

/// Registry documentation root for a cloud provider name.
pub(super) fn provider_docs(cloud: &str) -> &'static str {
    match cloud.to_ascii_lowercase().as_str() {
        "azure" | "azurerm" => "https://registry.terraform.io/providers/hashicorp/azurerm/latest/docs",
        "gcp" | "google" => "https://registry.terraform.io/providers/hashicorp/google/latest/docs",
        _ => "https://registry.terraform.io/providers/hashicorp/aws/latest/docs",
    }
}
