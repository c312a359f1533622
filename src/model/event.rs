// Engine events - what the test engine tells the reporter

use super::item::{Attribute, ItemStatus, LogFile, LogLevel};
use serde::{Deserialize, Serialize};

/// Suite start/end event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteEvent {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub title: String,
    pub start_time: i64,
    #[serde(default)]
    pub test_file_name: Option<String>,
}

/// Test start/end event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEvent {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub title: String,
    pub start_time: i64,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub err: Option<String>,
    #[serde(default)]
    pub test_file_name: Option<String>,
}

/// Hook kinds the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HookKind {
    BeforeSuite,
    AfterSuite,
    BeforeMethod,
    AfterMethod,
    #[serde(other)]
    Other,
}

/// Hook start/end event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookEvent {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: HookKind,
    #[serde(default)]
    pub status: Option<ItemStatus>,
    #[serde(default)]
    pub err: Option<String>,
    pub start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseIdRequest {
    pub test_case_id: String,
    #[serde(default)]
    pub suite_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub status: ItemStatus,
    #[serde(default)]
    pub suite_title: Option<String>,
}

/// User log routed to the current item or the launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogLevel,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub file: Option<LogFile>,
}

impl LogMessage {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            file: None,
        }
    }
}

/// Everything the reporter accepts, in a form that can be recorded and replayed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EngineEvent {
    RunStart,
    RunEnd,
    SuiteStart(SuiteEvent),
    SuiteEnd(SuiteEvent),
    TestStart(TestEvent),
    TestEnd(TestEvent),
    HookStart(HookEvent),
    HookEnd(HookEvent),
    AddAttributes { attributes: Vec<Attribute> },
    SetDescription { description: String },
    SetTestCaseId(TestCaseIdRequest),
    SetTestItemStatus(StatusRequest),
    SetLaunchStatus { status: ItemStatus },
    #[serde(rename_all = "camelCase")]
    SaveCustomScreenshotFilename { file_name: String },
    SendLogToCurrentItem(LogMessage),
    SendLaunchLog(LogMessage),
}
