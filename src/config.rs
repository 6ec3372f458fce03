//! Configuration for the chamber-control annotator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Controller address resolution (flag, environment, default)

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Environment variable consulted when `--controller` is not given.
pub const CONTROLLER_ENV_VAR: &str = "GCODE_CHAMBER_CONTROLLER";

/// Fallback controller address when neither flag nor environment set one.
const DEFAULT_CONTROLLER_HOST: &str = "192.168.1.100";

/// Command-line arguments for the chamber-control annotator
#[derive(Debug, Parser)]
#[command(name = "gcode-chamber")]
#[command(about = "Inject chamber-controller commands into a G-code file")]
#[command(version)]
pub struct Args {
    /// G-code file to annotate, rewritten in place
    pub gcode_file: PathBuf,

    /// Chamber controller address
    #[arg(long, help = "Controller host or host:port (e.g. '192.168.1.42')")]
    pub controller: Option<String>,

    /// Log level for the annotator
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// File to process
    pub gcode_file: PathBuf,
    /// Controller address, host or host:port
    pub controller_host: String,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments and environment
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Flag wins, then environment, then the baked-in default.
        let controller_host = args
            .controller
            .or_else(|| std::env::var(CONTROLLER_ENV_VAR).ok())
            .unwrap_or_else(|| DEFAULT_CONTROLLER_HOST.to_string());

        Ok(Config {
            gcode_file: args.gcode_file,
            controller_host,
            log_level: args.log_level,
        })
    }

    /// Configuration pointed at a given controller (useful for testing)
    pub fn with_controller(host: &str) -> Self {
        Config {
            gcode_file: PathBuf::new(),
            controller_host: host.to_string(),
            log_level: "info".to_string(),
        }
    }

    /// URL the controller accepts raw commands on
    pub fn gcode_endpoint(&self) -> String {
        format!("http://{}/gcode", self.controller_host)
    }
}
