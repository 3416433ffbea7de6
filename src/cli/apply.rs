//! The apply command: full provisioning pipeline

use std::path::Path;

use anyhow::Result;

use super::app::{connect, RemoteArgs};
use super::output::Output;
use super::render;
use crate::config::WorkspaceConfig;
use crate::engine::{self, ApplyOptions};

pub fn run(
    output: &Output,
    config_path: &Path,
    remote_args: &RemoteArgs,
    skip_views: bool,
    skip_examples: bool,
) -> Result<()> {
    let config = WorkspaceConfig::load(config_path)?;
    output.verbose_ctx(
        "apply",
        &format!(
            "Loaded {} space(s), {} example(s) from {}",
            config.spaces.len(),
            config.examples.len(),
            config_path.display()
        ),
    );

    let remote = connect(output, remote_args)?;
    let options = ApplyOptions {
        skip_views,
        skip_examples,
    };

    let report = engine::run(&config, &remote, &options);
    render::report(output, &report);

    if report.has_failures() {
        anyhow::bail!(
            "{} resource(s) failed to converge; see the report above",
            report.failure_count()
        );
    }

    Ok(())
}
