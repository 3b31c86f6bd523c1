//! Console summary printed after a successful run.

use super::generate::GenerationReport;
use crate::request::{GenerationRequest, Kind, Platform};

pub fn print_report(request: &GenerationRequest, report: &GenerationReport) {
    let dir = request.output_dir().display();

    println!();
    println!("✅ {} code generated successfully!", request.kind().title());
    println!();
    println!("Files written to {}:", dir);
    for (artifact, validation) in report.files() {
        let status = match validation {
            Some(result) => result.summary(),
            None => "static".to_string(),
        };
        println!("  - {} ({})", artifact.filename, status);
    }
    if let Some(guide) = report.guide_path() {
        println!("  - {}", guide.display());
    }

    println!();
    println!("Next steps:");
    for (i, step) in next_steps(request).iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}

fn next_steps(request: &GenerationRequest) -> Vec<String> {
    let dir = request.output_dir().display();
    let mut steps = match request.kind() {
        Kind::K8s => vec![
            format!("Review the manifests in {}", dir),
            format!("Apply them: kubectl apply -f {}/", dir),
        ],
        Kind::Terraform => vec![
            format!("cd {}", dir),
            "terraform init && terraform plan".to_string(),
        ],
        Kind::Docker => vec![
            format!("Copy Dockerfile and .dockerignore from {} into your project", dir),
            format!(
                "docker build -t {}:1.0.0 .",
                request.resolved("app").unwrap_or("app")
            ),
        ],
        Kind::Cicd => vec![
            format!(
                "Copy {} into your repository",
                request.platform().pipeline_path()
            ),
            match request.platform() {
                Platform::Github => "Add the required secrets under Settings > Secrets and variables > Actions",
                Platform::Gitlab => "Add the required variables under Settings > CI/CD > Variables",
            }
            .to_string(),
        ],
    };
    steps.push("Check IMPLEMENTATION_GUIDE.md for detailed instructions".to_string());
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_steps_end_with_guide() {
        for kind in Kind::ALL {
            let request = GenerationRequest::new(kind, "out").with_option("app", "go");
            let steps = next_steps(&request);
            assert!(steps.last().unwrap().contains("IMPLEMENTATION_GUIDE.md"));
        }
    }

    #[test]
    fn test_docker_steps_use_app_name() {
        let request = GenerationRequest::new(Kind::Docker, "out").with_option("app", "python");
        assert!(next_steps(&request).iter().any(|s| s == "docker build -t python:1.0.0 ."));
    }
}
