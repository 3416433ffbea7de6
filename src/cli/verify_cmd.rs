//! The verify command: read-only status verification

use std::path::Path;

use anyhow::Result;

use super::app::{connect, RemoteArgs};
use super::output::Output;
use super::render;
use crate::config::WorkspaceConfig;
use crate::engine;

pub fn run(output: &Output, config_path: &Path, remote_args: &RemoteArgs) -> Result<()> {
    let config = WorkspaceConfig::load(config_path)?;
    let remote = connect(output, remote_args)?;

    output.verbose_ctx("verify", "Discovering existing workspace structure");
    let workspace = engine::discover(&config, &remote)?;

    let results = engine::verify_all(&config, &remote, &workspace);
    render::verifications(output, &results);

    let unsatisfied = results.iter().filter(|result| !result.satisfied()).count();
    if unsatisfied > 0 {
        anyhow::bail!("{} space(s) missing required statuses", unsatisfied);
    }

    Ok(())
}
