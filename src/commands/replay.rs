// Replay command - feed a recorded event stream through the reporter

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::args::ReplayArgs;
use crate::client::JsonLinesClient;
use crate::config::Config;
use crate::model::EngineEvent;
use crate::reporter::Reporter;

/// Outcome of a replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub skipped_lines: usize,
    pub failed_calls: usize,
}

/// Dispatch every event line, then wait for all remote calls.
///
/// Lines that are blank are ignored; lines that do not parse are logged
/// and skipped so one bad record does not abort the run.
pub async fn replay<R: BufRead>(reader: R, reporter: &mut Reporter) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read event line {}", index + 1))?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<EngineEvent>(&line) {
            Ok(event) => {
                reporter.handle(event);
                summary.events += 1;
            }
            Err(e) => {
                warn!("skipping line {}: {}", index + 1, e);
                summary.skipped_lines += 1;
            }
        }
    }

    reporter.flush().await;
    summary.failed_calls = reporter.failures();
    Ok(summary)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    if path.is_some() {
        config.apply_env();
    }
    Ok(config)
}

pub async fn handle_replay(args: &ReplayArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = &args.screenshots {
        config.artifacts.screenshots_dir = Some(dir.clone());
    }
    if let Some(launch) = &args.launch {
        config.launch.name = launch.clone();
    }
    if args.merge {
        config.launch.is_launch_merge_required = true;
    }
    config.validate()?;

    let client = match &args.output {
        Some(path) => JsonLinesClient::new(Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        )),
        None => JsonLinesClient::stdout(),
    };
    let mut reporter = Reporter::new(config, Arc::new(client));

    let summary = if args.input.as_os_str() == "-" {
        replay(std::io::stdin().lock(), &mut reporter).await?
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("failed to open {}", args.input.display()))?;
        replay(BufReader::new(file), &mut reporter).await?
    };

    info!(
        "replayed {} events ({} skipped lines, {} failed calls)",
        summary.events, summary.skipped_lines, summary.failed_calls
    );
    Ok(())
}
