//! Colored console output for scan results.

use crate::report::RunSummary;
use crate::types::{Classification, Severity};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Console output handler with colors and formatting.
///
/// Stateless apart from the verbosity flag; every line carries an
/// explicit severity tag.
pub struct ConsoleOutput {
    verbose: bool,
}

impl ConsoleOutput {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print a tagged line.
    pub fn print_tagged(&self, severity: Severity, message: &str) {
        println!("{} {}", tag(severity), message);
    }

    /// Print an info message.
    pub fn print_info(&self, message: &str) {
        self.print_tagged(Severity::Info, message);
    }

    /// Print progress detail (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.verbose {
            println!("{} {}", "[.]".dimmed(), message.dimmed());
        }
    }

    /// Print the outcome line for one declared dependency.
    pub fn print_outcome(&self, name: &str, outcome: &Classification) {
        match outcome {
            Classification::Allowed => {
                self.print_tagged(
                    Severity::Info,
                    &format!("Package '{}' is in the allowlist. Skipping.", name),
                );
            }
            Classification::LikelyTypo { suggestions } => {
                self.print_tagged(
                    Severity::TypoAlert,
                    &format!(
                        "Package '{}' may be a typo for: {}",
                        name,
                        suggestions.join(", ")
                    ),
                );
            }
            Classification::ConfusionRisk => {
                self.print_tagged(
                    Severity::ConfusionAlert,
                    &format!("Package '{}' exists on the public registry.", name),
                );
            }
            Classification::TyposquatRisk { suggestions } => {
                self.print_tagged(
                    Severity::TyposquatWarning,
                    &format!(
                        "Found similar public packages for '{}': {}",
                        name,
                        suggestions.join(", ")
                    ),
                );
            }
            Classification::Clean => {}
        }
    }

    /// Print the two-part end-of-run summary.
    pub fn print_summary(&self, summary: &RunSummary) {
        if !summary.typo_alerts().is_empty() {
            println!();
            println!("{}", "Potential typos detected in the manifest:".cyan());
            for alert in summary.typo_alerts() {
                println!(
                    "- '{}' may be a typo for: {}",
                    alert.name,
                    alert.suggestions.join(", ")
                );
            }
        }

        if !summary.risk_names().is_empty() {
            println!();
            println!(
                "{}",
                "Potential dependency confusion or typosquatting risks detected:"
                    .red()
                    .bold()
            );
            for risk in summary.risk_names() {
                println!("- {}", risk);
            }
        } else {
            println!();
            println!(
                "{}",
                "No potential dependency confusion or typosquatting risks detected.".green()
            );
        }
    }

    /// Create a spinner for the long namespace download.
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

fn tag(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Info => "[INFO]".green(),
        Severity::TypoAlert => "[TYPO ALERT]".cyan(),
        Severity::ConfusionAlert => "[ALERT]".red().bold(),
        Severity::TyposquatWarning => "[WARNING]".yellow(),
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false)
    }
}
