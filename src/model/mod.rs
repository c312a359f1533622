// Model module - engine events and backend payloads

pub mod event;
pub mod item;

pub use event::{
    EngineEvent, HookEvent, HookKind, LogMessage, StatusRequest, SuiteEvent, TestCaseIdRequest,
    TestEvent,
};
pub use item::{
    Attribute, FinishItemPayload, FinishLaunchPayload, Issue, ItemStatus, ItemType, LaunchMode,
    LogFile, LogLevel, LogPayload, StartItemPayload, StartLaunchPayload, TempId,
};
