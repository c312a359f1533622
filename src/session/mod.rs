// Session module - per-launch bookkeeping
// Created by run start, dropped by run end

pub mod correlation;
pub mod finish_params;
pub mod hooks;
pub mod suites;

pub use correlation::IdTable;
pub use finish_params::{FinishParams, FinishParamsAccumulator};
pub use hooks::PendingHooks;
pub use suites::{SuiteFrame, SuiteStack};

use crate::merge::LaunchLock;
use crate::model::{ItemStatus, TempId};

/// The test currently between its start and end events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentTest {
    pub temp_id: TempId,
    pub start_time: i64,
}

/// All state of one launch
#[derive(Debug)]
pub struct Session {
    pub launch: TempId,
    pub launch_status: Option<ItemStatus>,
    pub items: IdTable,
    pub suites: SuiteStack,
    pub hooks: PendingHooks,
    pub params: FinishParamsAccumulator,
    pub current_test: Option<CurrentTest>,
    pub custom_screenshots: Vec<String>,
    pub lock: Option<LaunchLock>,
}

impl Session {
    pub fn new(launch: TempId) -> Self {
        Self {
            launch,
            launch_status: None,
            items: IdTable::new(),
            suites: SuiteStack::new(),
            hooks: PendingHooks::new(),
            params: FinishParamsAccumulator::new(),
            current_test: None,
            custom_screenshots: Vec::new(),
            lock: None,
        }
    }

    /// Item that user logs go to: the running test, else the innermost suite
    pub fn current_item(&self) -> Option<&TempId> {
        self.current_test
            .as_ref()
            .map(|test| &test.temp_id)
            .or_else(|| self.suites.peek().map(|frame| &frame.temp_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_item_prefers_running_test() {
        let mut session = Session::new(TempId::new("launch"));
        assert_eq!(session.current_item(), None);

        session.suites.push(SuiteFrame {
            temp_id: TempId::new("suite"),
            start_time: 1,
        });
        assert_eq!(session.current_item(), Some(&TempId::new("suite")));

        session.current_test = Some(CurrentTest {
            temp_id: TempId::new("test"),
            start_time: 2,
        });
        assert_eq!(session.current_item(), Some(&TempId::new("test")));
    }
}
