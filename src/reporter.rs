// Reporter - turns engine lifecycle events into backend calls
//
// All handlers are synchronous: remote completions are parked in the
// completion sink, and local bookkeeping advances as if every call
// succeeded. Nothing here returns an error to the engine.

use crate::artifacts::{Attacher, FinishedItem, FsScreenshotLocator, NoScreenshots, ScreenshotLocator};
use crate::client::{Issued, ReportingClient};
use crate::config::Config;
use crate::merge::LaunchLock;
use crate::model::{
    Attribute, EngineEvent, FinishItemPayload, FinishLaunchPayload, HookEvent, HookKind, ItemStatus,
    LogMessage, LogPayload, StatusRequest, SuiteEvent, TempId, TestCaseIdRequest, TestEvent,
};
use crate::payload;
use crate::session::{CurrentTest, Session, SuiteFrame};
use crate::sink::CompletionSink;
use crate::time::{Clock, SystemClock};
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct Reporter {
    config: Config,
    client: Arc<dyn ReportingClient>,
    locator: Box<dyn ScreenshotLocator>,
    clock: Arc<dyn Clock>,
    sink: CompletionSink,
    session: Option<Session>,
}

impl Reporter {
    /// Create a reporter. Screenshot discovery follows
    /// `config.artifacts.screenshots_dir`.
    ///
    /// Handlers are meant to run inside a tokio runtime; without one,
    /// remote calls are issued but their completions are dropped and
    /// counted as failures.
    pub fn new(config: Config, client: Arc<dyn ReportingClient>) -> Self {
        let locator: Box<dyn ScreenshotLocator> = match &config.artifacts.screenshots_dir {
            Some(dir) => Box::new(FsScreenshotLocator::new(dir)),
            None => Box::new(NoScreenshots),
        };

        Self {
            config,
            client,
            locator,
            clock: Arc::new(SystemClock),
            sink: CompletionSink::new(),
            session: None,
        }
    }

    pub fn with_locator(mut self, locator: impl ScreenshotLocator + 'static) -> Self {
        self.locator = Box::new(locator);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// State of the launch in progress, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Remote calls that failed so far
    pub fn failures(&self) -> usize {
        self.sink.failures()
    }

    /// Wait until every issued remote call has resolved
    pub async fn flush(&mut self) {
        self.sink.drain().await;
    }

    /// Dispatch a recorded engine event
    pub fn handle(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::RunStart => self.run_start(),
            EngineEvent::RunEnd => self.run_end(),
            EngineEvent::SuiteStart(suite) => self.suite_start(&suite),
            EngineEvent::SuiteEnd(suite) => self.suite_end(&suite),
            EngineEvent::TestStart(test) => self.test_start(&test),
            EngineEvent::TestEnd(test) => self.test_end(&test),
            EngineEvent::HookStart(hook) => self.hook_start(&hook),
            EngineEvent::HookEnd(hook) => self.hook_end(&hook),
            EngineEvent::AddAttributes { attributes } => self.add_attributes(&attributes),
            EngineEvent::SetDescription { description } => self.set_description(description),
            EngineEvent::SetTestCaseId(request) => self.set_test_case_id(request),
            EngineEvent::SetTestItemStatus(request) => self.set_test_item_status(request),
            EngineEvent::SetLaunchStatus { status } => self.set_launch_status(status),
            EngineEvent::SaveCustomScreenshotFilename { file_name } => {
                self.save_custom_screenshot_filename(file_name)
            }
            EngineEvent::SendLogToCurrentItem(log) => self.send_log_to_current_item(log),
            EngineEvent::SendLaunchLog(log) => self.send_launch_log(log),
        }
    }

    pub fn run_start(&mut self) {
        if self.session.is_some() {
            warn!("launch already in progress; ignoring run start");
            return;
        }

        let start = payload::launch_start(&self.config.launch, self.clock.now_millis());
        let Issued {
            temp_id,
            completion,
        } = self.client.start_launch(start);
        self.sink.watch(completion, "Fail to start launch");

        let mut session = Session::new(temp_id);
        let launch = &self.config.launch;
        if launch.is_launch_merge_required {
            match LaunchLock::create(&self.config.merge.lock_dir, &launch.name, &session.launch) {
                Ok(lock) => session.lock = Some(lock),
                Err(e) => error!("{}", e),
            }
        }

        debug!(launch = %session.launch, "launch started");
        self.session = Some(session);
    }

    pub fn run_end(&mut self) {
        let Some(mut session) = self.session.take() else {
            no_launch("run end");
            return;
        };

        let completion = self.client.finish_launch(
            &session.launch,
            FinishLaunchPayload {
                end_time: self.clock.now_millis(),
                status: session.launch_status,
            },
        );

        // The lock must outlive the finish call: other processes read it
        // to decide whether this launch is still being reported.
        match session.lock.take() {
            Some(lock) => self
                .sink
                .watch_then(completion, "Fail to finish launch", move || {
                    if let Err(e) = lock.release() {
                        warn!("{}", e);
                    }
                }),
            None => self.sink.watch(completion, "Fail to finish launch"),
        }

        debug!(launch = %session.launch, "launch finished");
    }

    pub fn suite_start(&mut self, suite: &SuiteEvent) {
        let Some(session) = self.session.as_mut() else {
            no_launch("suite start");
            return;
        };

        let parent = session.items.resolve_parent(suite.parent_id.as_deref()).cloned();
        let Issued {
            temp_id,
            completion,
        } = self.client.start_test_item(
            payload::suite_start(suite),
            &session.launch,
            parent.as_ref(),
        );
        self.sink.watch(completion, "Fail to start suite");

        debug!(suite = %suite.id, item = %temp_id, "suite started");
        session.items.bind(&suite.id, temp_id.clone());
        session.suites.push(SuiteFrame {
            temp_id,
            start_time: suite.start_time,
        });
    }

    pub fn suite_end(&mut self, suite: &SuiteEvent) {
        let Some(session) = self.session.as_mut() else {
            no_launch("suite end");
            return;
        };

        let overrides = session.params.take_suite(&suite.title);
        match session.items.resolve(&suite.id) {
            Some(temp_id) => {
                let mut finish = FinishItemPayload {
                    end_time: self.clock.now_millis(),
                    ..FinishItemPayload::default()
                };
                overrides.apply_to(&mut finish);
                let completion = self.client.finish_test_item(temp_id, finish);
                self.sink.watch(completion, "Fail to finish suite");
                debug!(suite = %suite.id, item = %temp_id, "suite finished");
            }
            None => warn!("suite {} ended without being started", suite.id),
        }

        session.suites.pop();
    }

    pub fn test_start(&mut self, test: &TestEvent) {
        let Some(session) = self.session.as_mut() else {
            no_launch("test start");
            return;
        };

        session.custom_screenshots.clear();
        start_test(self.client.as_ref(), &mut self.sink, session, test);
    }

    pub fn test_end(&mut self, test: &TestEvent) {
        let Some(session) = self.session.as_mut() else {
            no_launch("test end");
            return;
        };

        let temp_id = match session.items.resolve(&test.id).cloned() {
            Some(temp_id) => temp_id,
            None => {
                debug!(test = %test.id, "test ended without start; starting it now");
                start_test(self.client.as_ref(), &mut self.sink, session, test)
            }
        };

        let now = self.clock.now_millis();
        Attacher {
            client: self.client.as_ref(),
            locator: self.locator.as_ref(),
            sink: &mut self.sink,
            time: now,
        }
        .attach(
            &temp_id,
            &FinishedItem {
                title: &test.title,
                status: test.status,
                err: test.err.as_deref(),
                test_file_name: test.test_file_name.as_deref(),
            },
            &session.custom_screenshots,
        );

        let mut finish = payload::test_finish(test, now);
        session.params.take_current().apply_to(&mut finish);
        payload::mark_skipped_issue(&mut finish, self.config.launch.skipped_issue);
        let completion = self.client.finish_test_item(&temp_id, finish);
        self.sink.watch(completion, "Fail to finish test");

        debug!(test = %test.id, item = %temp_id, "test finished");
        session.current_test = None;
    }

    pub fn hook_start(&mut self, hook: &HookEvent) {
        let Some(session) = self.session.as_mut() else {
            no_launch("hook start");
            return;
        };

        // Hooks arrive after the item they belong to has started, but must
        // sort before it on the backend.
        let mut staged = payload::hook_start(hook);
        match hook.kind {
            HookKind::BeforeSuite => {
                if let Some(frame) = session.suites.peek() {
                    staged.start_time = frame.start_time.saturating_sub(1);
                }
            }
            HookKind::BeforeMethod => {
                if let Some(test) = &session.current_test {
                    staged.start_time = test.start_time.saturating_sub(1);
                }
            }
            _ => {}
        }

        session.hooks.stage(&hook.id, staged);
    }

    pub fn hook_end(&mut self, hook: &HookEvent) {
        let Some(session) = self.session.as_mut() else {
            no_launch("hook end");
            return;
        };

        let Some(staged) = session.hooks.take(&hook.id) else {
            debug!(hook = %hook.id, "hook ended without start; ignoring");
            return;
        };

        let parent = session.items.resolve_parent(hook.parent_id.as_deref()).cloned();
        let Issued {
            temp_id,
            completion,
        } = self
            .client
            .start_test_item(staged, &session.launch, parent.as_ref());
        self.sink.watch(completion, "Fail to start hook");

        let now = self.clock.now_millis();
        Attacher {
            client: self.client.as_ref(),
            locator: self.locator.as_ref(),
            sink: &mut self.sink,
            time: now,
        }
        .attach(
            &temp_id,
            &FinishedItem {
                title: &hook.title,
                status: hook.status,
                err: hook.err.as_deref(),
                test_file_name: None,
            },
            &session.custom_screenshots,
        );

        let completion = self.client.finish_test_item(
            &temp_id,
            FinishItemPayload {
                end_time: now,
                status: hook.status,
                ..FinishItemPayload::default()
            },
        );
        self.sink.watch(completion, "Fail to finish hook");
        debug!(hook = %hook.id, item = %temp_id, "hook reported");
    }

    pub fn add_attributes(&mut self, attributes: &[Attribute]) {
        match self.session.as_mut() {
            Some(session) => session.params.add_attributes(attributes),
            None => no_launch("attributes"),
        }
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        match self.session.as_mut() {
            Some(session) => session.params.set_description(description),
            None => no_launch("description"),
        }
    }

    pub fn set_test_case_id(&mut self, request: TestCaseIdRequest) {
        match self.session.as_mut() {
            Some(session) => session.params.set_test_case_id(request),
            None => no_launch("test case id"),
        }
    }

    pub fn set_test_item_status(&mut self, request: StatusRequest) {
        match self.session.as_mut() {
            Some(session) => session.params.set_status(request),
            None => no_launch("item status"),
        }
    }

    pub fn set_launch_status(&mut self, status: ItemStatus) {
        match self.session.as_mut() {
            Some(session) => session.launch_status = Some(status),
            None => no_launch("launch status"),
        }
    }

    pub fn save_custom_screenshot_filename(&mut self, file_name: impl Into<String>) {
        match self.session.as_mut() {
            Some(session) => session.custom_screenshots.push(file_name.into()),
            None => no_launch("custom screenshot"),
        }
    }

    /// Log to the running test, else to the innermost open suite
    pub fn send_log_to_current_item(&mut self, log: LogMessage) {
        let Some(session) = self.session.as_ref() else {
            no_launch("item log");
            return;
        };
        let Some(item) = session.current_item() else {
            debug!("no open item; dropping log");
            return;
        };

        send_user_log(self.client.as_ref(), &mut self.sink, item, log, self.clock.now_millis());
    }

    pub fn send_launch_log(&mut self, log: LogMessage) {
        let Some(session) = self.session.as_ref() else {
            no_launch("launch log");
            return;
        };

        send_user_log(
            self.client.as_ref(),
            &mut self.sink,
            &session.launch,
            log,
            self.clock.now_millis(),
        );
    }
}

fn no_launch(what: &str) {
    warn!("no launch in progress; dropping {}", what);
}

/// Start a test item and make it the current test
fn start_test(
    client: &dyn ReportingClient,
    sink: &mut CompletionSink,
    session: &mut Session,
    test: &TestEvent,
) -> TempId {
    let start = payload::test_start(test);
    let start_time = start.start_time;
    let parent = session.items.resolve_parent(test.parent_id.as_deref()).cloned();
    let Issued {
        temp_id,
        completion,
    } = client.start_test_item(start, &session.launch, parent.as_ref());
    sink.watch(completion, "Fail to start test");

    debug!(test = %test.id, item = %temp_id, "test started");
    session.items.bind(&test.id, temp_id.clone());
    session.current_test = Some(CurrentTest {
        temp_id: temp_id.clone(),
        start_time,
    });
    temp_id
}

fn send_user_log(
    client: &dyn ReportingClient,
    sink: &mut CompletionSink,
    item: &TempId,
    log: LogMessage,
    time: i64,
) {
    let completion = client.send_log(
        item,
        LogPayload {
            message: log.message,
            level: log.level,
            time,
        },
        log.file,
    );
    sink.watch(completion, "Fail to send log");
}
