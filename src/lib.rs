pub mod artifacts;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod logging;
pub mod merge;
pub mod model;
pub mod payload;
pub mod reporter;
pub mod session;
pub mod sink;
pub mod time;

pub use client::{ReportingClient, RecordingClient};
pub use config::Config;
pub use reporter::Reporter;
