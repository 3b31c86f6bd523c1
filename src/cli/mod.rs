//! CLI argument parsing for infraagent.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; the pipeline lives in the
//! `commands` module.

use crate::request::{GenerationRequest, Kind, Platform, defaults};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// InfraAgent: generate infrastructure code from a short description.
///
/// Each subcommand builds a prompt from its flags, asks Gemini for the code,
/// validates what comes back, and writes the files together with an
/// IMPLEMENTATION_GUIDE.md into the output directory.
#[derive(Parser, Debug)]
#[command(name = "infraagent")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a YAML configuration file (default: ./infraagent.yaml if present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate Kubernetes manifests (Deployment, Service, ConfigMap).
    GenerateK8s(K8sArgs),

    /// Generate Terraform configuration (main.tf, variables.tf, outputs.tf).
    GenerateTerraform(TerraformArgs),

    /// Generate a production Dockerfile and .dockerignore.
    GenerateDocker(DockerArgs),

    /// Generate a CI/CD pipeline for GitHub Actions or GitLab CI.
    GenerateCicd(CicdArgs),
}

/// Flags shared by every generator.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output directory (default: OUTPUT_DIR, then the configured output_dir).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the prompt that would be sent and exit without calling the AI.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `generate-k8s`.
#[derive(Parser, Debug)]
pub struct K8sArgs {
    /// Application type or name (e.g. python-flask, nodejs-express).
    #[arg(long)]
    pub app: Option<String>,

    /// Number of replicas.
    #[arg(long, default_value = defaults::REPLICAS)]
    pub replicas: u32,

    /// Container port.
    #[arg(long, default_value = defaults::PORT)]
    pub port: u16,

    /// Memory limit.
    #[arg(long, default_value = defaults::MEMORY)]
    pub memory: String,

    /// CPU limit.
    #[arg(long, default_value = defaults::CPU)]
    pub cpu: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `generate-terraform`.
#[derive(Parser, Debug)]
pub struct TerraformArgs {
    /// Cloud provider (aws, azure, gcp).
    #[arg(long, default_value = defaults::CLOUD)]
    pub cloud: String,

    /// Service to provision (vpc, eks, rds, s3, ...).
    #[arg(long, default_value = defaults::SERVICE)]
    pub service: String,

    /// Region to deploy into.
    #[arg(long, default_value = defaults::REGION)]
    pub region: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `generate-docker`.
#[derive(Parser, Debug)]
pub struct DockerArgs {
    /// Application type (e.g. python, nodejs, java, go).
    #[arg(long)]
    pub app: Option<String>,

    /// Base image to build from; the model picks one when omitted.
    #[arg(long)]
    pub base_image: Option<String>,

    /// Port the application listens on.
    #[arg(long, default_value = defaults::PORT)]
    pub port: u16,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for `generate-cicd`.
#[derive(Parser, Debug)]
pub struct CicdArgs {
    /// CI/CD platform.
    #[arg(long, value_enum, default_value_t = Platform::Github)]
    pub platform: Platform,

    /// Where the pipeline deploys to.
    #[arg(long, default_value = defaults::DEPLOY_TARGET)]
    pub deploy_target: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Initialize logging from `-v`/`-q`; `RUST_LOG` still applies on top.
    pub fn init_logging(&self) {
        let level = if self.quiet {
            log::LevelFilter::Off
        } else {
            match self.verbose {
                0 => log::LevelFilter::Warn,
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                _ => log::LevelFilter::Trace,
            }
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .format_timestamp(None)
            .init();
    }
}

impl Command {
    /// Shared output flags of the selected generator.
    pub fn output_args(&self) -> &OutputArgs {
        match self {
            Command::GenerateK8s(args) => &args.output,
            Command::GenerateTerraform(args) => &args.output,
            Command::GenerateDocker(args) => &args.output,
            Command::GenerateCicd(args) => &args.output,
        }
    }

    /// Build the generation request for this command.
    ///
    /// `output_dir` is used when `--output` was not given.
    pub fn to_request(&self, output_dir: &Path) -> GenerationRequest {
        let dir = self
            .output_args()
            .output
            .clone()
            .unwrap_or_else(|| output_dir.to_path_buf());

        match self {
            Command::GenerateK8s(args) => GenerationRequest::new(Kind::K8s, dir)
                .with_optional("app", args.app.as_deref())
                .with_option("replicas", args.replicas)
                .with_option("port", args.port)
                .with_option("memory", &args.memory)
                .with_option("cpu", &args.cpu),
            Command::GenerateTerraform(args) => GenerationRequest::new(Kind::Terraform, dir)
                .with_option("cloud", &args.cloud)
                .with_option("service", &args.service)
                .with_option("region", &args.region),
            Command::GenerateDocker(args) => GenerationRequest::new(Kind::Docker, dir)
                .with_optional("app", args.app.as_deref())
                .with_optional("base_image", args.base_image.as_deref())
                .with_option("port", args.port),
            Command::GenerateCicd(args) => GenerationRequest::new(Kind::Cicd, dir)
                .with_option("platform", args.platform)
                .with_option("deploy_target", &args.deploy_target),
        }
    }
}
