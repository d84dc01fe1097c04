//! CLI logic for the trellis layout tool.
//!
//! Reads a diagram document, lays it out and writes the result back as TOML.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, str::FromStr};

use log::info;

use trellis::{Engine, OccurrenceKind, TrellisError};

/// Run the trellis CLI application
///
/// Without `--container` every container of the input is laid out, innermost
/// first. With it, a single occurrence is applied to that container.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or structurally invalid documents
/// - An unknown `--container` or `--occurrence` value
/// - Serialization errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let occurrence = args
        .occurrence
        .as_deref()
        .map(parse_occurrence)
        .transpose()?;

    let source = fs::read_to_string(&args.input)?;

    let engine = Engine::new(app_config);
    let mut diagram = engine.parse(&source)?;

    match &args.container {
        Some(container) => {
            let outcome = engine.apply(&mut diagram, container, occurrence)?;
            info!(container, outcome:?; "Container laid out");
        }
        None => {
            let report = engine.relayout(&mut diagram);
            info!(
                occurrences = report.occurrences,
                disabled = report.disabled,
                writes = report.writes;
                "Diagram laid out"
            );
        }
    }

    let output = engine.render(&diagram)?;
    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Layout written successfully");

    Ok(())
}

fn parse_occurrence(value: &str) -> Result<OccurrenceKind, TrellisError> {
    OccurrenceKind::from_str(value)
        .map_err(|reason| TrellisError::Config(format!("{reason}: `{value}`")))
}
