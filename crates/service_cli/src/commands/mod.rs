//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod compare;
pub mod grid;
pub mod price;

use std::io;

use pricer_models::models::ModelKind;
use pricer_models::pricing::PricingFacade;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{render, Tabular};
use crate::Result;

/// Facade configured for `kind` with the configured Fourier overrides.
pub(crate) fn facade_for(config: &CliConfig, kind: ModelKind) -> PricingFacade {
    PricingFacade::new().with_config(config.fourier.resolve(kind))
}

/// Renders `rows` to stdout, `format` taking precedence over the config.
pub(crate) fn print_rows<R: Tabular>(
    rows: &[R],
    format: Option<OutputFormat>,
    config: &CliConfig,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(
        rows,
        format.unwrap_or(config.output.format),
        config.output.precision,
        &mut out,
    )
}
