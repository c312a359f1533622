pub mod args;

use clap::{Parser, Subcommand};

pub use args::{InitConfigArgs, LocksArgs, ReplayArgs};

/// Report test-engine lifecycle events to a test-reporting backend
#[derive(Parser, Debug)]
#[command(name = "rp-reporter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Correlate test-engine events with backend test items", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded event stream and emit the backend calls it produces
    Replay(ReplayArgs),

    /// List launch-merge lock files of launches still in progress
    Locks(LocksArgs),

    /// Create a default configuration file
    InitConfig(InitConfigArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_command() {
        let cli = Cli::try_parse_from([
            "rp-reporter",
            "-v",
            "replay",
            "events.jsonl",
            "--launch",
            "nightly",
            "--merge",
        ])
        .expect("valid arguments");

        assert!(cli.verbose);
        match cli.command {
            Commands::Replay(args) => {
                assert_eq!(args.input.to_str(), Some("events.jsonl"));
                assert_eq!(args.launch.as_deref(), Some("nightly"));
                assert!(args.merge);
                assert!(args.output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_config_default_path() {
        let cli = Cli::try_parse_from(["rp-reporter", "init-config"]).expect("valid arguments");
        match cli.command {
            Commands::InitConfig(args) => {
                assert_eq!(args.path.to_str(), Some(crate::config::CONFIG_FILE_NAME));
                assert!(!args.force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
