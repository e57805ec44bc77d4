//! Check command implementation
//!
//! Prints the effective configuration and the registered pricing models.

use pricer_models::fourier::FourierConfig;
use pricer_models::models::ModelKind;
use tracing::info;

use super::facade_for;
use crate::config::CliConfig;
use crate::Result;

/// Registration and effective Fourier settings of one model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelStatus {
    /// Model kind
    pub kind: ModelKind,
    /// Whether the default registry provides a characteristic function
    pub registered: bool,
    /// Settings after applying configured overrides
    pub fourier: FourierConfig,
    /// Validation failure of `fourier`, if any
    pub problem: Option<String>,
}

/// Status of every model kind.
pub fn model_statuses(config: &CliConfig) -> Vec<ModelStatus> {
    ModelKind::ALL
        .into_iter()
        .map(|kind| {
            let facade = facade_for(config, kind);
            let fourier = facade.config_for(kind);
            ModelStatus {
                kind,
                registered: facade.registry().get(kind).is_ok(),
                fourier,
                problem: fourier.validate().err().map(|e| e.to_string()),
            }
        })
        .collect()
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking pricer configuration...");

    println!("Pricer System Check");
    println!("===================\n");

    println!("Build:");
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Parallelisation:");
    println!("  Rayon threads: {}", rayon::current_num_threads());
    println!("  CPU cores: {}", num_cpus::get());
    println!();

    println!("Configuration:");
    println!("  Log level: {}", config.general.log_level);
    println!("  Output format: {}", config.output.format);
    println!("  Precision: {}", config.output.precision);
    println!();

    println!("Models:");
    let statuses = model_statuses(config);
    for status in &statuses {
        let mark = if status.registered && status.problem.is_none() {
            "✓"
        } else {
            "✗"
        };
        let path = if status.kind.has_closed_form() {
            "closed form"
        } else {
            "fourier"
        };
        println!(
            "  {} {:<26} {:<12} alpha={} truncation={} nodes={} rule={} control_variate={}",
            mark,
            status.kind.name(),
            path,
            status.fourier.alpha,
            status.fourier.truncation,
            status.fourier.nodes,
            status.fourier.rule,
            status.fourier.control_variate
        );
        if let Some(problem) = &status.problem {
            println!("      {}", problem);
        }
    }
    println!();

    let failing = statuses.iter().filter(|s| s.problem.is_some()).count();
    if failing == 0 {
        println!("All checks passed.");
    } else {
        println!("{} model(s) have invalid Fourier settings.", failing);
    }

    Ok(())
}
