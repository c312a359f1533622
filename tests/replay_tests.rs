// Tests for replaying recorded event streams

use rp_reporter::client::{Operation, RecordingClient};
use rp_reporter::commands::{replay, ReplaySummary};
use rp_reporter::model::{ItemStatus, LogLevel};
use rp_reporter::time::ManualClock;
use rp_reporter::{Config, Reporter};
use std::io::Cursor;
use std::sync::Arc;

const RUN: &str = r#"
{"event":"runStart"}
{"event":"suiteStart","id":"s1","title":"Cart","startTime":100,"testFileName":"cart.cy.js"}
{"event":"hookStart","id":"h1","parentId":"s1","title":"before all","type":"beforeSuite","status":"passed","startTime":105}
{"event":"hookEnd","id":"h1","parentId":"s1","title":"before all","type":"beforeSuite","status":"passed","startTime":105}
{"event":"testStart","id":"t1","parentId":"s1","title":"adds item","startTime":200}
{"event":"addAttributes","attributes":[{"key":"browser","value":"chrome"}]}
{"event":"setTestCaseId","testCaseId":"TC-1"}
{"event":"sendLogToCurrentItem","level":"info","message":"clicked add"}
{"event":"testEnd","id":"t1","parentId":"s1","title":"adds item","startTime":200,"status":"failed","err":"expected 1 item"}
{"event":"setTestItemStatus","status":"skipped","suiteTitle":"Cart"}
{"event":"suiteEnd","id":"s1","title":"Cart","startTime":100}
{"event":"setLaunchStatus","status":"failed"}
{"event":"runEnd"}
"#;

#[tokio::test]
async fn test_replay_recorded_run() {
    // Arrange
    let client = RecordingClient::new();
    let mut reporter =
        Reporter::new(Config::default(), Arc::new(client.clone())).with_clock(ManualClock::new(9));

    // Act
    let summary = replay(Cursor::new(RUN), &mut reporter).await.unwrap();

    // Assert
    assert_eq!(
        summary,
        ReplaySummary {
            events: 13,
            skipped_lines: 0,
            failed_calls: 0,
        }
    );
    assert_eq!(client.count(Operation::StartLaunch), 1);
    assert_eq!(client.count(Operation::StartTestItem), 3);
    assert_eq!(client.count(Operation::FinishTestItem), 3);
    assert_eq!(client.count(Operation::FinishLaunch), 1);

    let hook = client.item_named("before all").unwrap();
    let (_, hook_start, _) = client
        .started_items()
        .into_iter()
        .find(|(id, _, _)| *id == hook)
        .unwrap();
    assert_eq!(hook_start.start_time, 99);

    let test = client.item_named("adds item").unwrap();
    let finish = &client.finishes_for(&test)[0];
    assert_eq!(finish.status, Some(ItemStatus::Failed));
    assert_eq!(finish.test_case_id.as_deref(), Some("TC-1"));
    assert_eq!(finish.attributes.len(), 1);
    let levels: Vec<LogLevel> = client
        .logs_for(&test)
        .into_iter()
        .map(|(log, _)| log.level)
        .collect();
    assert_eq!(levels, vec![LogLevel::Info, LogLevel::Error]);

    let suite = client.item_named("Cart").unwrap();
    assert_eq!(
        client.finishes_for(&suite)[0].status,
        Some(ItemStatus::Skipped)
    );
    assert!(reporter.session().is_none());
}

#[tokio::test]
async fn test_replay_skips_malformed_lines() {
    // Arrange
    let client = RecordingClient::new();
    let mut reporter = Reporter::new(Config::default(), Arc::new(client.clone()));
    let input = "{\"event\":\"runStart\"}\nnot json\n\n{\"event\":\"teleport\"}\n{\"event\":\"runEnd\"}\n";

    // Act
    let summary = replay(Cursor::new(input), &mut reporter).await.unwrap();

    // Assert
    assert_eq!(summary.events, 2);
    assert_eq!(summary.skipped_lines, 2);
    assert_eq!(client.count(Operation::FinishLaunch), 1);
}

#[tokio::test]
async fn test_replay_counts_failed_calls() {
    // Arrange
    let client = RecordingClient::new();
    client.fail(Operation::StartLaunch);
    let mut reporter = Reporter::new(Config::default(), Arc::new(client.clone()));

    // Act
    let summary = replay(Cursor::new(RUN), &mut reporter).await.unwrap();

    // Assert
    assert_eq!(summary.failed_calls, 1);
    assert_eq!(client.count(Operation::FinishLaunch), 1);
}
