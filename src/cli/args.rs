// CLI argument definitions using Clap

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// JSON-lines file of engine events ("-" reads stdin)
    #[arg(value_name = "EVENTS")]
    pub input: PathBuf,

    /// Configuration file (default: .rpreporterrc.toml lookup)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Write backend call records here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Screenshots directory (overrides the configuration)
    #[arg(long, value_name = "DIR")]
    pub screenshots: Option<PathBuf>,

    /// Launch name (overrides the configuration)
    #[arg(long)]
    pub launch: Option<String>,

    /// Create a launch-merge lock file while replaying
    #[arg(long, default_value_t = false)]
    pub merge: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LocksArgs {
    /// Lock directory (default: from configuration)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Configuration file (default: .rpreporterrc.toml lookup)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InitConfigArgs {
    /// Where to write the configuration
    #[arg(default_value = crate::config::CONFIG_FILE_NAME)]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long, default_value_t = false)]
    pub force: bool,
}
