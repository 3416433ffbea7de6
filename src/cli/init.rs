//! The init command: starter workspace configuration

use std::fs;
use std::path::Path;

use anyhow::Result;

use super::output::Output;

/// Starter document: a development space and an operations space with the
/// definition sections filled in far enough to be applied as-is.
const STARTER: &str = r##"# Scaffold workspace configuration.
# Run 'scaffold plan' to validate, 'scaffold apply' to converge.

spaces:
  - name: Development
    key: development
    folders:
      - name: Datacenters Development
        lists:
          - Prefeasibility & Site Selection
          - Land Acquisition
          - Permitting & Licensing
          - Engineering & Design

  - name: Operations
    key: operations
    folders:
      - name: Solar PV Operations
        lists:
          - Performance Monitoring
          - Maintenance Management
          - Compliance & Reporting

custom_fields:
  development:
    - name: Budget
      type: currency
    - name: Project Phase
      type: drop_down
      options:
        - name: Prefeasibility
          color: "#f9d900"
        - name: Land Acquisition
          color: "#ff7800"
        - name: Permitting
          color: "#2ecd6f"
        - name: Engineering
          color: "#0231e8"
    - name: Partner
      type: short_text
    - name: Target Date
      type: date
  operations:
    - name: Capacity (MW)
      type: number
    - name: O&M Partner
      type: short_text
    - name: Monthly Target (MWh)
      type: number

statuses:
  development:
    - name: Not Started
      color: "#d3d3d3"
      type: open
    - name: In Planning
      color: "#f9d900"
    - name: Partner In Progress
      color: "#ff7800"
    - name: Awaiting Partner
      color: "#a875ff"
    - name: Review Required
      color: "#0231e8"
    - name: Completed
      color: "#2ecd6f"
      type: closed
  operations:
    - name: Scheduled
      color: "#d3d3d3"
      type: open
    - name: In Progress
      color: "#f9d900"
    - name: Partner Assigned
      color: "#ff7800"
    - name: Under Review
      color: "#a875ff"
    - name: Issue/Escalated
      color: "#e50000"
    - name: Completed
      color: "#2ecd6f"
      type: closed

views:
  development:
    - name: Director Dashboard
      type: board
      grouping: status
      filters:
        field: priority
        any_of: [urgent, high]
    - name: Project Pipeline
      type: table
      grouping: status
  operations:
    - name: Operations Board
      type: board
      grouping: status
    - name: Maintenance Calendar
      type: calendar

automations:
  development:
    - name: Escalate stalled partner work
      trigger:
        event: status_change
        status: Awaiting Partner
      action:
        type: add_comment
        comment: "Partner response pending - chase if older than 3 days."
  operations:
    - name: Flag escalated issues
      trigger:
        event: status_change
        status: Issue/Escalated
      action:
        type: add_comment
        comment: "Escalated - director review required."
      then:
        type: change_status
        status: Under Review

examples:
  - name: Datacenter Under Development
    space: development
    folder: Datacenters Development
    enabled: true
    tasks:
      - list: Prefeasibility & Site Selection
        tasks:
          - name: DC-Athens-001 Prefeasibility Study
            description: "5 MW datacenter facility in Athens industrial zone."
            status: Partner In Progress
            priority: 2
            due_in_days: 14
            custom_fields:
              Budget: 15000000
              Partner: "Technical Advisory Partners"
            subtasks:
              - name: Review site assessment report from technical partner
                status: In Planning
                priority: 2
                due_in_days: 3
              - name: Validate grid connection capacity with utility partner
                status: Awaiting Partner
                priority: 1
                due_in_days: 5
              - name: Review preliminary financial model
                status: Review Required
                priority: 2
                due_in_days: 7
      - list: Land Acquisition
        tasks:
          - name: Land title verification with legal partner
            status: Awaiting Partner
            priority: 1
            due_in_days: 8
          - name: Negotiate purchase terms with landowner
            status: In Planning
            priority: 1
            due_in_days: 15
  - name: Operating PV Park
    space: operations
    folder: Solar PV Operations
    enabled: true
    tasks:
      - list: Performance Monitoring
        tasks:
          - name: PV-Kozani-05 Performance Monitoring (50 MW)
            description: "Operating solar park in Kozani. Monthly target: 7,500 MWh."
            status: In Progress
            priority: 2
            custom_fields:
              "Capacity (MW)": 50
              "Monthly Target (MWh)": 7500
            subtasks:
              - name: Review daily production data from SCADA
                status: In Progress
                priority: 2
                due_in_days: 0
              - name: Weekly performance report to director
                status: Scheduled
                priority: 2
                due_in_days: 2
      - list: Maintenance Management
        tasks:
          - name: Q1 preventive maintenance with O&M partner
            status: Scheduled
            priority: 2
            due_in_days: 21
"##;

pub fn run(output: &Output, path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists, refusing to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, STARTER)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "created": path.display().to_string(),
        }));
    } else {
        output.success(&format!("Created starter configuration: {}", path.display()));
        println!();
        println!("Next steps:");
        println!("  1. Edit {} to match your workspace", path.display());
        println!("  2. scaffold plan -c {}", path.display());
        println!("  3. scaffold apply -c {}", path.display());
    }

    Ok(())
}
