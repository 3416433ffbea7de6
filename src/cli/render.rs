//! Text rendering of run reports
//!
//! JSON mode serializes the structures as-is; text mode renders the
//! end-of-run summary: per-kind tallies, every failure, every space's
//! verification outcome with exact missing names, view outcomes and seed
//! outcomes including skip reasons. Never a silent partial success.

use crate::domain::{SetupInstruction, VerificationOutcome, VerificationResult, ViewOutcome};
use crate::engine::{ResourceKind, RunReport, SeedOutcome, SeedReport, SkipReason, ViewRecord};

use super::output::Output;

/// Renders the full apply report
pub fn report(output: &Output, report: &RunReport) {
    if output.is_json() {
        output.data(report);
        return;
    }

    println!("Provisioned resources:");
    println!("{:<10} {:>8} {:>8} {:>8}", "KIND", "CREATED", "REUSED", "FAILED");
    println!("{}", "-".repeat(40));
    for kind in ResourceKind::ALL {
        let counts = report.counts(kind);
        println!(
            "{:<10} {:>8} {:>8} {:>8}",
            kind.label(),
            counts.created,
            counts.reused,
            counts.failed
        );
    }

    let failed: Vec<_> = report.failed_nodes().collect();
    if !failed.is_empty() {
        println!();
        println!("Failures:");
        for node in failed {
            if let crate::engine::NodeAction::Failed(reason) = &node.action {
                println!("  {} '{}' ({}): {}", node.kind.label(), node.name, node.scope, reason);
            }
        }
    }

    println!();
    verifications(output, &report.verifications);

    if !report.views.is_empty() {
        println!();
        views(&report.views);
    }

    if !report.instructions.is_empty() {
        println!();
        instructions(output, &report.instructions);
    }

    if !report.seeds.is_empty() {
        println!();
        seeds(output, &report.seeds);
    }
}

/// Renders per-space verification outcomes
pub fn verifications(output: &Output, results: &[VerificationResult]) {
    if output.is_json() {
        output.data(&results);
        return;
    }

    println!("Status verification:");
    for result in results {
        match &result.outcome {
            VerificationOutcome::Satisfied => {
                println!("  [ok] {}: all required statuses exist", result.space);
            }
            VerificationOutcome::MissingStatuses { missing } => {
                println!("  [!!] {}: missing statuses: {}", result.space, missing.join(", "));
            }
            VerificationOutcome::NoListAvailable => {
                println!("  [!!] {}: no list available to check statuses", result.space);
            }
            VerificationOutcome::CheckFailed { error } => {
                println!("  [!!] {}: status check failed: {}", result.space, error);
            }
        }
    }

    if results.iter().any(|result| !result.satisfied()) {
        println!();
        println!("Statuses cannot be created through the API. To add them:");
        println!("  1. Open the space in ClickUp and open any list");
        println!("  2. Click the status dropdown, then '+ Add Status'");
        println!("  3. Add each missing status, then re-run this command");
    }
}

fn views(records: &[ViewRecord]) {
    println!("Views:");
    for record in records {
        match &record.outcome {
            ViewOutcome::Supported { id } => {
                println!("  [ok] {} / {} ({})", record.space, record.name, id);
            }
            ViewOutcome::Unsupported => {
                println!(
                    "  [--] {} / {}: not supported by the API, create manually",
                    record.space, record.name
                );
            }
            ViewOutcome::Error { reason } => {
                println!("  [!!] {} / {}: {}", record.space, record.name, reason);
            }
        }
    }
}

/// Renders the manual automation setup guide
pub fn instructions(output: &Output, instructions: &[SetupInstruction]) {
    if output.is_json() {
        output.data(&instructions);
        return;
    }

    println!("Automations (create manually in the ClickUp UI):");
    for (index, instruction) in instructions.iter().enumerate() {
        println!();
        println!("  {}. {} [{}]", index + 1, instruction.automation, instruction.space);
        println!("     Trigger: {}", instruction.trigger);
        for action in &instruction.actions {
            println!("     Action:  {}", action);
        }
    }
}

/// Renders per-project seed outcomes
pub fn seeds(output: &Output, seeds: &[SeedReport]) {
    if output.is_json() {
        output.data(&seeds);
        return;
    }

    println!("Example projects:");
    for seed in seeds {
        match &seed.outcome {
            SeedOutcome::Completed { created, failures } if failures.is_empty() => {
                println!("  [ok] {}: {} tasks created", seed.project, created);
            }
            SeedOutcome::Completed { created, failures } => {
                println!(
                    "  [!!] {}: {} tasks created, {} failed",
                    seed.project,
                    created,
                    failures.len()
                );
                for failure in failures {
                    println!("       '{}': {}", failure.task, failure.error);
                }
            }
            SeedOutcome::Skipped(SkipReason::Disabled) => {
                println!("  [--] {}: disabled in configuration", seed.project);
            }
            SeedOutcome::Skipped(SkipReason::PrerequisitesMissing { missing }) => {
                if missing.is_empty() {
                    println!(
                        "  [--] {}: skipped, required statuses not verified",
                        seed.project
                    );
                } else {
                    println!(
                        "  [--] {}: skipped, missing statuses: {}",
                        seed.project,
                        missing.join(", ")
                    );
                }
            }
            SeedOutcome::Skipped(SkipReason::TargetMissing { target }) => {
                println!("  [--] {}: skipped, '{}' not provisioned", seed.project, target);
            }
        }
    }
}
