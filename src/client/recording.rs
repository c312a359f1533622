// In-memory client that records every call

use super::{resolved, ClientError, Completion, Issued, ReportingClient};
use crate::model::{
    FinishItemPayload, FinishLaunchPayload, LogFile, LogPayload, StartItemPayload,
    StartLaunchPayload, TempId,
};
use futures::FutureExt;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

/// Remote operation kinds, used for failure injection and counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    StartLaunch,
    FinishLaunch,
    StartTestItem,
    FinishTestItem,
    SendLog,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::StartLaunch => "startLaunch",
            Operation::FinishLaunch => "finishLaunch",
            Operation::StartTestItem => "startTestItem",
            Operation::FinishTestItem => "finishTestItem",
            Operation::SendLog => "sendLog",
        }
    }
}

/// A recorded client call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    StartLaunch {
        temp_id: TempId,
        payload: StartLaunchPayload,
    },
    FinishLaunch {
        launch: TempId,
        payload: FinishLaunchPayload,
    },
    StartTestItem {
        temp_id: TempId,
        payload: StartItemPayload,
        launch: TempId,
        parent: Option<TempId>,
    },
    FinishTestItem {
        item: TempId,
        payload: FinishItemPayload,
    },
    SendLog {
        item: TempId,
        log: LogPayload,
        file: Option<LogFile>,
    },
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::StartLaunch { .. } => Operation::StartLaunch,
            Call::FinishLaunch { .. } => Operation::FinishLaunch,
            Call::StartTestItem { .. } => Operation::StartTestItem,
            Call::FinishTestItem { .. } => Operation::FinishTestItem,
            Call::SendLog { .. } => Operation::SendLog,
        }
    }
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_id: u64,
    failing: HashSet<Operation>,
    launch_finish_gate: Option<oneshot::Receiver<()>>,
}

/// Client that keeps every call in memory.
///
/// Cloning shares the underlying record, so a caller can hand one clone to
/// the reporter and inspect the calls through another.
#[derive(Clone, Default)]
pub struct RecordingClient {
    state: Arc<Mutex<State>>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every completion of the given operation reject
    pub fn fail(&self, operation: Operation) {
        self.state().failing.insert(operation);
    }

    /// Keep the next launch-finish completion pending until the returned
    /// sender fires (or is dropped, which rejects it)
    pub fn hold_launch_finish(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state().launch_finish_gate = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Start payloads in call order, with the handle each one received
    pub fn started_items(&self) -> Vec<(TempId, StartItemPayload, Option<TempId>)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::StartTestItem {
                    temp_id,
                    payload,
                    parent,
                    ..
                } => Some((temp_id.clone(), payload.clone(), parent.clone())),
                _ => None,
            })
            .collect()
    }

    /// Handle of the first started item with the given name
    pub fn item_named(&self, name: &str) -> Option<TempId> {
        self.started_items()
            .into_iter()
            .find(|(_, payload, _)| payload.name == name)
            .map(|(temp_id, _, _)| temp_id)
    }

    pub fn finishes_for(&self, item: &TempId) -> Vec<FinishItemPayload> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::FinishTestItem { item: id, payload } if id == item => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn logs_for(&self, item: &TempId) -> Vec<(LogPayload, Option<LogFile>)> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::SendLog { item: id, log, file } if id == item => {
                    Some((log.clone(), file.clone()))
                }
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> Completion {
        let operation = call.operation();
        let mut state = self.state();
        state.calls.push(call);
        if state.failing.contains(&operation) {
            resolved(Err(ClientError::Rejected {
                operation: operation.name(),
                message: "injected failure".to_string(),
            }))
        } else {
            resolved(Ok(()))
        }
    }

    fn next_id(&self, prefix: &str) -> TempId {
        let mut state = self.state();
        state.next_id += 1;
        TempId::new(format!("{}-{}", prefix, state.next_id))
    }
}

impl ReportingClient for RecordingClient {
    fn start_launch(&self, payload: StartLaunchPayload) -> Issued {
        let temp_id = self.next_id("launch");
        let completion = self.record(Call::StartLaunch {
            temp_id: temp_id.clone(),
            payload,
        });
        Issued::new(temp_id, completion)
    }

    fn finish_launch(&self, launch: &TempId, payload: FinishLaunchPayload) -> Completion {
        let completion = self.record(Call::FinishLaunch {
            launch: launch.clone(),
            payload,
        });
        match self.state().launch_finish_gate.take() {
            Some(gate) => async move {
                gate.await.map_err(|_| ClientError::Dropped)?;
                completion.await
            }
            .boxed(),
            None => completion,
        }
    }

    fn start_test_item(
        &self,
        payload: StartItemPayload,
        launch: &TempId,
        parent: Option<&TempId>,
    ) -> Issued {
        let temp_id = self.next_id("item");
        let completion = self.record(Call::StartTestItem {
            temp_id: temp_id.clone(),
            payload,
            launch: launch.clone(),
            parent: parent.cloned(),
        });
        Issued::new(temp_id, completion)
    }

    fn finish_test_item(&self, item: &TempId, payload: FinishItemPayload) -> Completion {
        self.record(Call::FinishTestItem {
            item: item.clone(),
            payload,
        })
    }

    fn send_log(&self, item: &TempId, log: LogPayload, file: Option<LogFile>) -> Completion {
        self.record(Call::SendLog {
            item: item.clone(),
            log,
            file,
        })
    }
}
