//! Main CLI application structure

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{apply, automations, init, plan, seed_cmd, verify_cmd};
use crate::config::Settings;
use crate::remote::{HttpRemote, RetryPolicy};

#[derive(Parser)]
#[command(name = "scaffold")]
#[command(author, version, about = "Declarative ClickUp workspace provisioning")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Workspace document location
#[derive(Args)]
pub struct ConfigArg {
    /// Path to the workspace configuration document
    #[arg(long, short = 'c', default_value = "scaffold.yaml")]
    pub config: PathBuf,
}

/// Remote service credentials and endpoint
#[derive(Args)]
pub struct RemoteArgs {
    /// API token
    #[arg(long, env = "CLICKUP_API_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Workspace (team) identifier
    #[arg(long, env = "CLICKUP_TEAM_ID")]
    pub team: String,

    /// API base URL override
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter workspace configuration
    Init {
        /// Path for the new configuration file
        #[arg(default_value = "scaffold.yaml")]
        path: PathBuf,
    },

    /// Validate the configuration and show what would converge
    Plan {
        #[command(flatten)]
        config: ConfigArg,
    },

    /// Converge the remote workspace toward the configuration
    Apply {
        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        remote: RemoteArgs,

        /// Skip view creation
        #[arg(long)]
        skip_views: bool,

        /// Skip example seeding
        #[arg(long)]
        skip_examples: bool,
    },

    /// Check that required statuses exist remotely
    Verify {
        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Seed example projects (gated on status verification)
    Seed {
        #[command(flatten)]
        config: ConfigArg,

        #[command(flatten)]
        remote: RemoteArgs,
    },

    /// Print the manual setup guide for automations and statuses
    Automations {
        #[command(flatten)]
        config: ConfigArg,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Init { path } => init::run(&output, &path),
        Commands::Plan { config } => plan::run(&output, &config.config),
        Commands::Apply {
            config,
            remote,
            skip_views,
            skip_examples,
        } => apply::run(&output, &config.config, &remote, skip_views, skip_examples),
        Commands::Verify { config, remote } => verify_cmd::run(&output, &config.config, &remote),
        Commands::Seed { config, remote } => seed_cmd::run(&output, &config.config, &remote),
        Commands::Automations { config } => automations::run(&output, &config.config),
    }
}

/// Builds the HTTP client from flags, environment and user settings
pub(crate) fn connect(output: &Output, args: &RemoteArgs) -> Result<HttpRemote> {
    let settings = Settings::load()?;

    let policy = RetryPolicy {
        pace: Duration::from_millis(settings.pace_ms),
        ..RetryPolicy::default()
    };
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| settings.base_url.clone());

    output.verbose_ctx("remote", &format!("Using API root: {}", base_url));
    HttpRemote::new(base_url, args.token.clone(), args.team.clone(), policy)
}
