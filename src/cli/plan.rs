//! The plan command: offline validation and convergence preview

use std::path::Path;

use anyhow::Result;

use super::output::Output;
use crate::config::WorkspaceConfig;

pub fn run(output: &Output, config_path: &Path) -> Result<()> {
    let config = WorkspaceConfig::load(config_path)?;

    let folder_count: usize = config.spaces.iter().map(|s| s.folders.len()).sum();
    let list_count: usize = config
        .spaces
        .iter()
        .flat_map(|s| s.folders.iter())
        .map(|f| f.lists.len())
        .sum();
    let view_count: usize = config.views.values().map(Vec::len).sum();
    let automation_count: usize = config.automations.values().map(Vec::len).sum();

    if output.is_json() {
        output.data(&serde_json::json!({
            "config": config_path.display().to_string(),
            "spaces": config.spaces.len(),
            "folders": folder_count,
            "lists": list_count,
            "views": view_count,
            "automations": automation_count,
            "examples": config.examples.len(),
        }));
        return Ok(());
    }

    println!("Configuration is valid: {}", config_path.display());
    println!();

    for space in &config.spaces {
        let key = space.category();
        println!("Space: {} (category: {})", space.name, key);

        for folder in &space.folders {
            println!("  Folder: {}", folder.name);
            for list in &folder.lists {
                println!("    List: {}", list);
            }
        }

        if let Some(fields) = config.custom_fields.get(&key) {
            let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
            println!("  Fields (per list): {}", names.join(", "));
        }
        if !config.required_statuses(&key).is_empty() {
            let names: Vec<_> = config
                .required_statuses(&key)
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            println!("  Required statuses (manual): {}", names.join(", "));
        }
        if let Some(views) = config.views.get(&key) {
            println!("  Views: {}", views.len());
        }
        if let Some(automations) = config.automations.get(&key) {
            println!("  Automations (manual): {}", automations.len());
        }
        println!();
    }

    println!(
        "Totals: {} space(s), {} folder(s), {} list(s), {} view(s), {} automation(s), {} example(s)",
        config.spaces.len(),
        folder_count,
        list_count,
        view_count,
        automation_count,
        config.examples.len()
    );

    for example in &config.examples {
        let state = if example.enabled { "enabled" } else { "disabled" };
        println!(
            "Example: {} -> {}/{} ({} tasks, {})",
            example.name,
            example.space,
            example.folder,
            example.task_count(),
            state
        );
    }

    Ok(())
}
