//! The automations command: manual setup guide
//!
//! Automations and custom statuses cannot be created through the remote
//! API, so this command turns their definitions into a setup guide for the
//! ClickUp UI. It performs no remote calls.

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use super::render;
use crate::config::WorkspaceConfig;
use crate::domain::SetupInstruction;

pub fn run(output: &Output, config_path: &Path) -> Result<()> {
    let config = WorkspaceConfig::load(config_path)?;

    let mut instructions: Vec<SetupInstruction> = Vec::new();
    for space in &config.spaces {
        if let Some(automations) = config.automations.get(&space.category()) {
            instructions.extend(
                automations
                    .iter()
                    .map(|automation| automation.instruction(&space.name)),
            );
        }
    }

    if output.is_json() {
        let statuses: Vec<_> = config
            .spaces
            .iter()
            .filter_map(|space| {
                let required = config.required_statuses(&space.category());
                if required.is_empty() {
                    None
                } else {
                    Some(serde_json::json!({
                        "space": space.name,
                        "statuses": required,
                    }))
                }
            })
            .collect();
        output.data(&serde_json::json!({
            "automations": instructions,
            "statuses": statuses,
        }));
        return Ok(());
    }

    if instructions.is_empty() {
        println!("No automations configured.");
    } else {
        render::instructions(output, &instructions);
    }

    let mut any_statuses = false;
    for space in &config.spaces {
        let required = config.required_statuses(&space.category());
        if required.is_empty() {
            continue;
        }
        if !any_statuses {
            println!();
            println!("Statuses (create manually in the ClickUp UI):");
            any_statuses = true;
        }

        println!();
        println!("  Space: {}", space.name);
        for status in required {
            match &status.color {
                Some(color) => println!("    - {} ({})", status.name, color),
                None => println!("    - {}", status.name),
            }
        }
    }

    if any_statuses {
        println!();
        println!("To add statuses: open the space, open any list, click the");
        println!("status dropdown, then '+ Add Status'. Re-run 'scaffold verify'");
        println!("afterwards to unlock example seeding.");
    }

    Ok(())
}
