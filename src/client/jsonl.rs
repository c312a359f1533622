// Offline client - writes each call as one JSON line

use super::{resolved, ClientError, Completion, Issued, ReportingClient};
use crate::model::{
    FinishItemPayload, FinishLaunchPayload, LogFile, LogPayload, StartItemPayload,
    StartLaunchPayload, TempId,
};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::Mutex;
use uuid::Uuid;

/// Client that serialises every call to a writer instead of a network.
///
/// Temp ids are random v4 UUIDs, like the ones a real backend client hands
/// out before the server has answered.
pub struct JsonLinesClient {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesClient {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    fn emit(&self, record: Value) -> Completion {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => return resolved(Err(ClientError::Encode(e))),
        };
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = writeln!(out, "{}", line).and_then(|_| out.flush());
        resolved(result.map_err(ClientError::Io))
    }

    fn fresh_id() -> TempId {
        TempId::new(Uuid::new_v4().to_string())
    }
}

impl ReportingClient for JsonLinesClient {
    fn start_launch(&self, payload: StartLaunchPayload) -> Issued {
        let temp_id = Self::fresh_id();
        let completion = self.emit(json!({
            "call": "startLaunch",
            "tempId": temp_id,
            "payload": payload,
        }));
        Issued::new(temp_id, completion)
    }

    fn finish_launch(&self, launch: &TempId, payload: FinishLaunchPayload) -> Completion {
        self.emit(json!({
            "call": "finishLaunch",
            "tempId": launch,
            "payload": payload,
        }))
    }

    fn start_test_item(
        &self,
        payload: StartItemPayload,
        launch: &TempId,
        parent: Option<&TempId>,
    ) -> Issued {
        let temp_id = Self::fresh_id();
        let completion = self.emit(json!({
            "call": "startTestItem",
            "tempId": temp_id,
            "launchTempId": launch,
            "parentTempId": parent,
            "payload": payload,
        }));
        Issued::new(temp_id, completion)
    }

    fn finish_test_item(&self, item: &TempId, payload: FinishItemPayload) -> Completion {
        self.emit(json!({
            "call": "finishTestItem",
            "tempId": item,
            "payload": payload,
        }))
    }

    fn send_log(&self, item: &TempId, log: LogPayload, file: Option<LogFile>) -> Completion {
        self.emit(json!({
            "call": "sendLog",
            "tempId": item,
            "payload": log,
            "file": file,
        }))
    }
}
