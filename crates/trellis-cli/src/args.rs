//! Command-line argument definitions for the trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, which containers are laid out, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the trellis layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram document
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the laid-out output document
    #[arg(short, long, default_value = "out.toml")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Lay out only this container instead of the whole diagram
    #[arg(long)]
    pub container: Option<String>,

    /// Occurrence kind for --container
    /// (general, vertical, horizontal, single-child, auto-resize)
    #[arg(long, requires = "container")]
    pub occurrence: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
