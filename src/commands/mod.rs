// Commands module - handles CLI command execution

use anyhow::Result;

use crate::cli::args::InitConfigArgs;
use crate::config::Config;

pub mod locks;
pub mod replay;

pub use locks::handle_locks;
pub use replay::{handle_replay, replay, ReplaySummary};

/// Write a default configuration file
pub fn handle_init_config(args: &InitConfigArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    std::fs::write(&args.path, Config::default().to_toml())?;
    println!("Configuration file created: {}", args.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rc.toml");
        std::fs::write(&path, "existing").unwrap();

        let result = handle_init_config(&InitConfigArgs {
            path: path.clone(),
            force: false,
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_init_config_writes_parsable_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("rc.toml");

        handle_init_config(&InitConfigArgs {
            path: path.clone(),
            force: false,
        })
        .unwrap();

        assert!(Config::load_from_file(&path).is_ok());
    }
}
