// Artifacts module - logs and screenshots sent when an item finishes

pub mod locator;

pub use locator::{FsScreenshotLocator, NoScreenshots, ScreenshotLocator};

use crate::client::ReportingClient;
use crate::model::{ItemStatus, LogLevel, LogPayload, TempId};
use crate::sink::CompletionSink;
use tracing::debug;

const SCREENSHOT_MESSAGE: &str = "screenshot";

/// What the pipeline needs to know about a finishing test or hook
#[derive(Debug, Clone, Copy)]
pub struct FinishedItem<'a> {
    pub title: &'a str,
    pub status: Option<ItemStatus>,
    pub err: Option<&'a str>,
    pub test_file_name: Option<&'a str>,
}

/// Sends the finish-time logs of one item. Every send is detached.
pub struct Attacher<'a> {
    pub client: &'a dyn ReportingClient,
    pub locator: &'a dyn ScreenshotLocator,
    pub sink: &'a mut CompletionSink,
    pub time: i64,
}

impl Attacher<'_> {
    /// On failure one error log (message plus the failure screenshot, if
    /// any); then one info log per passed screenshot and per custom
    /// screenshot, in that order
    pub fn attach(&mut self, item: &TempId, finished: &FinishedItem<'_>, custom: &[String]) {
        if finished.status == Some(ItemStatus::Failed) {
            let completion = self.client.send_log(
                item,
                LogPayload {
                    message: finished.err.unwrap_or_default().to_string(),
                    level: LogLevel::Error,
                    time: self.time,
                },
                self.locator.failed_screenshot(finished.title),
            );
            self.sink.watch(completion, "Fail to save error log");
        }

        let screenshots = self
            .locator
            .passed_screenshots(finished.title)
            .into_iter()
            .chain(self.locator.custom_screenshots(custom, finished.test_file_name));

        for file in screenshots {
            debug!("attaching {} to {}", file.name, item);
            let completion = self.client.send_log(
                item,
                LogPayload {
                    message: SCREENSHOT_MESSAGE.to_string(),
                    level: LogLevel::Info,
                    time: self.time,
                },
                Some(file),
            );
            self.sink.watch(completion, "Fail to save passed log");
        }
    }
}
