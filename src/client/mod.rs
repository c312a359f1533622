// Client module - the reporting backend seam
//
// Every call returns immediately. Start calls hand back the temp id the
// reporter keeps using; the actual network outcome arrives later through
// the completion future.

pub mod jsonl;
pub mod recording;

use crate::model::{
    FinishItemPayload, FinishLaunchPayload, LogFile, LogPayload, StartItemPayload,
    StartLaunchPayload, TempId,
};
use futures::future::BoxFuture;
use futures::FutureExt;
use thiserror::Error;

pub use jsonl::JsonLinesClient;
pub use recording::{Call, Operation, RecordingClient};

/// Remote call failure, as reported by a completion signal
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend rejected {operation}: {message}")]
    Rejected {
        operation: &'static str,
        message: String,
    },

    #[error("failed to write call record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode call record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("completion was dropped before resolving")]
    Dropped,
}

/// Asynchronous completion of a remote call
pub type Completion = BoxFuture<'static, Result<(), ClientError>>;

/// A started launch or item: its handle plus the pending outcome
pub struct Issued {
    pub temp_id: TempId,
    pub completion: Completion,
}

impl Issued {
    pub fn new(temp_id: TempId, completion: Completion) -> Self {
        Self {
            temp_id,
            completion,
        }
    }
}

/// Completion that is already resolved
pub fn resolved(result: Result<(), ClientError>) -> Completion {
    futures::future::ready(result).boxed()
}

/// Reporting backend client
pub trait ReportingClient: Send + Sync {
    fn start_launch(&self, payload: StartLaunchPayload) -> Issued;

    fn finish_launch(&self, launch: &TempId, payload: FinishLaunchPayload) -> Completion;

    fn start_test_item(
        &self,
        payload: StartItemPayload,
        launch: &TempId,
        parent: Option<&TempId>,
    ) -> Issued;

    fn finish_test_item(&self, item: &TempId, payload: FinishItemPayload) -> Completion;

    fn send_log(&self, item: &TempId, log: LogPayload, file: Option<LogFile>) -> Completion;
}
