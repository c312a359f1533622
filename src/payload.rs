// Translate engine events into backend payloads

use crate::config::LaunchConfig;
use crate::model::{
    Attribute, FinishItemPayload, HookEvent, HookKind, Issue, ItemStatus, ItemType, StartItemPayload,
    StartLaunchPayload, SuiteEvent, TestEvent,
};

pub const AGENT_NAME: &str = env!("CARGO_PKG_NAME");
pub const AGENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `<file>/<title>` with forward slashes
pub fn code_ref(test_file_name: Option<&str>, title: &str) -> Option<String> {
    test_file_name.map(|file| format!("{}/{}", file.replace('\\', "/"), title))
}

pub fn launch_start(config: &LaunchConfig, start_time: i64) -> StartLaunchPayload {
    let mut attributes = config.attributes.clone();
    attributes.push(Attribute::system(
        "agent",
        format!("{}|{}", AGENT_NAME, AGENT_VERSION),
    ));

    StartLaunchPayload {
        name: config.name.clone(),
        start_time,
        description: config.description.clone(),
        attributes,
        mode: config.mode,
    }
}

pub fn suite_start(suite: &SuiteEvent) -> StartItemPayload {
    StartItemPayload {
        name: suite.title.clone(),
        item_type: ItemType::Suite,
        start_time: suite.start_time,
        code_ref: code_ref(suite.test_file_name.as_deref(), &suite.title),
        attributes: Vec::new(),
        description: None,
    }
}

pub fn test_start(test: &TestEvent) -> StartItemPayload {
    StartItemPayload {
        name: test.title.clone(),
        item_type: ItemType::Step,
        start_time: test.start_time,
        code_ref: code_ref(test.test_file_name.as_deref(), &test.title),
        attributes: Vec::new(),
        description: None,
    }
}

/// Base finish payload of a test, before deferred params are overlaid
pub fn test_finish(test: &TestEvent, end_time: i64) -> FinishItemPayload {
    FinishItemPayload {
        end_time,
        status: test.status,
        ..FinishItemPayload::default()
    }
}

/// Mark a skipped item NOT_ISSUE when skipped tests should not count as
/// defects. Judged on the final status, after any override.
pub fn mark_skipped_issue(finish: &mut FinishItemPayload, skipped_issue: bool) {
    finish.issue =
        (finish.status == Some(ItemStatus::Skipped) && !skipped_issue).then(Issue::not_issue);
}

pub fn hook_item_type(kind: HookKind) -> ItemType {
    match kind {
        HookKind::BeforeSuite => ItemType::BeforeSuite,
        HookKind::AfterSuite => ItemType::AfterSuite,
        HookKind::BeforeMethod => ItemType::BeforeMethod,
        HookKind::AfterMethod => ItemType::AfterMethod,
        HookKind::Other => ItemType::Step,
    }
}

pub fn hook_start(hook: &HookEvent) -> StartItemPayload {
    StartItemPayload {
        name: hook.title.clone(),
        item_type: hook_item_type(hook.kind),
        start_time: hook.start_time,
        code_ref: None,
        attributes: Vec::new(),
        description: None,
    }
}
