//! The seed command: example seeding against an existing workspace

use std::path::Path;

use anyhow::Result;

use super::app::{connect, RemoteArgs};
use super::output::Output;
use super::render;
use crate::config::WorkspaceConfig;
use crate::engine::{self, SeedOutcome};

pub fn run(output: &Output, config_path: &Path, remote_args: &RemoteArgs) -> Result<()> {
    let config = WorkspaceConfig::load(config_path)?;
    if config.examples.is_empty() {
        output.success("No example projects configured");
        return Ok(());
    }

    let remote = connect(output, remote_args)?;

    output.verbose_ctx("seed", "Discovering existing workspace structure");
    let workspace = engine::discover(&config, &remote)?;
    let verifications = engine::verify_all(&config, &remote, &workspace);

    let mut seeds = Vec::new();
    for project in &config.examples {
        let verification = verifications
            .iter()
            .find(|result| result.space == project.space)
            .cloned()
            .unwrap_or_else(|| crate::domain::VerificationResult {
                space: project.space.clone(),
                outcome: crate::domain::VerificationOutcome::NoListAvailable,
            });
        seeds.push(engine::seed(&remote, project, &workspace, &verification));
    }

    render::seeds(output, &seeds);

    let failed: usize = seeds
        .iter()
        .map(|seed| match &seed.outcome {
            SeedOutcome::Completed { failures, .. } => failures.len(),
            SeedOutcome::Skipped(_) => 0,
        })
        .sum();
    if failed > 0 {
        anyhow::bail!("{} task(s) failed to create", failed);
    }

    Ok(())
}
