//! depsift - dependency confusion and typosquat scanner.
//!
//! CLI entry point.

use clap::Parser;
use depsift::{
    Allowlist, Config, ConsoleOutput, ManifestLoader, NpmClient, PackageManager, PypiClient,
    RegistryClient, RiskClassifier, RunSummary, SimilarityMatcher,
};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Exit status for a failed registry namespace fetch. Distinct from
/// generic failures: without the namespace the pip-style run cannot
/// classify anything.
const EXIT_NAMESPACE_FETCH_FAILED: u8 = 2;

fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging
    let filter = if config.verbose {
        EnvFilter::new("depsift=debug,info")
    } else {
        EnvFilter::new("depsift=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}

fn run(config: &Config) -> Result<(), ExitCode> {
    let console = ConsoleOutput::new(config.verbose);

    console.print_info("Loading declared dependencies from manifest...");
    let loader = ManifestLoader::new();
    let dependencies = match loader.load(&config.manifest, config.package_manager) {
        Ok(deps) => deps,
        Err(e) => {
            error!("Failed to load manifest: {}", e);
            return Err(ExitCode::FAILURE);
        }
    };

    let allowlist = Allowlist::load(&config.allowlist);
    let matcher = SimilarityMatcher::new(config.cutoff, config.max_suggestions);

    let registry: Box<dyn RegistryClient> = match config.package_manager {
        PackageManager::Pip => {
            let mut client = match PypiClient::new(config.timeout) {
                Ok(c) => c,
                Err(e) => {
                    error!("Failed to create registry client: {}", e);
                    return Err(ExitCode::FAILURE);
                }
            };

            let spinner = console.create_spinner("Fetching registry namespace...");
            match client.fetch_namespace() {
                Ok(count) => {
                    spinner.finish_and_clear();
                    console.print_info(&format!("Loaded {} registry names.", count));
                }
                Err(e) => {
                    spinner.finish_and_clear();
                    error!("{}", e);
                    return Err(ExitCode::from(EXIT_NAMESPACE_FETCH_FAILED));
                }
            }

            Box::new(client)
        }
        PackageManager::Npm => match NpmClient::new(config.timeout) {
            Ok(c) => Box::new(c),
            Err(e) => {
                error!("Failed to create registry client: {}", e);
                return Err(ExitCode::FAILURE);
            }
        },
    };

    let classifier = RiskClassifier::new(&allowlist, matcher, registry.as_ref());
    let mut summary = RunSummary::new();

    // One dependency at a time, in manifest order; every registry call
    // blocks until it returns or fails.
    for dependency in &dependencies {
        console.print_progress(&format!("Checking package: {}", dependency.name));
        let outcome = classifier.classify(dependency);
        console.print_outcome(&dependency.name, &outcome);
        summary.record(&dependency.name, &outcome);
    }

    console.print_summary(&summary);

    // Findings are advisory: the exit code stays zero however many
    // risks were reported.
    Ok(())
}
