//! Terminal output for the move and servers commands

use console::style;

use nexmove_core::RelocationPlan;
use nexmove_repo::{RelocationReport, Server, StepStatus};

/// Print the outcome of each step
pub fn report(plan: &RelocationPlan, report: &RelocationReport) {
    println!(
        "{} {}",
        style("Finished").green().bold(),
        style(plan.coordinate()).cyan()
    );
    println!("  from {}", plan.source());
    println!("  to   {}", plan.target());
    println!();

    for outcome in &report.steps {
        match outcome.status {
            StepStatus::Completed => {
                println!("  {} {}", style("✓").green(), outcome.step);
            }
            StepStatus::Skipped => {
                println!(
                    "  {} {} {}",
                    style("-").dim(),
                    outcome.step,
                    style("(skipped)").dim()
                );
            }
        }
    }
}

/// Server ids and usernames, never passwords
pub fn servers(servers: &[Server]) {
    if servers.is_empty() {
        println!("{}", style("No servers configured").yellow());
        return;
    }

    let width = servers.iter().map(|s| s.id.len()).max().unwrap_or(0);
    for server in servers {
        println!(
            "  {}  {}",
            style(format!("{:width$}", server.id, width = width)).cyan().bold(),
            server.username
        );
    }
}

pub fn interrupted() {
    eprintln!(
        "\n{} stopping before the next step",
        style("Interrupted,").yellow().bold()
    );
}
