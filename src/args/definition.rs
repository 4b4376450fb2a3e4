//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

/// modmirror - Mirror a Geode mod index to disk and serve it over HTTP
#[derive(Parser, Debug, Default)]
#[command(name = "modmirror")]
#[command(version)]
#[command(about = "Mirror a Geode mod index to disk and serve it over HTTP", long_about = None)]
pub struct Args {
    /// Settings file (default: ~/.config/modmirror/settings.conf)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listening port (overrides settings and PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory holding data/, analytics/ and logos/
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write daily rolling log files into this directory instead of stderr
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Run one full sync plus one analytics pass, then exit
    #[arg(long)]
    pub once: bool,

    /// Write a commented settings file if none exists, then exit
    #[arg(long)]
    pub init_config: bool,
}
