use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const PROFILES_FILE_NAME: &str = "profiles.toml";

/// Location of the profiles file inside a profiles directory.
pub fn profiles_path(profiles_dir: &Path) -> PathBuf {
    profiles_dir.join(PROFILES_FILE_NAME)
}

#[derive(Debug, Clone, Parser)]
#[command(name = "dbt-impala")]
#[command(about = "Impala connection adapter for dbt")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a profile target and print its connection info
    Debug {
        /// Directory containing profiles.toml
        #[arg(long, default_value = ".")]
        profiles_dir: PathBuf,

        #[arg(long)]
        profile: String,

        #[arg(long)]
        target: Option<String>,
    },
}
