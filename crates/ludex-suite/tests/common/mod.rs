#![allow(dead_code)]

//! Shared mock infrastructure for the suite's integration tests.
//!
//! Provides programmable stand-ins for the three external drivers and a
//! recording report sink, so tests can script element presence, inject
//! failures, and assert on the exact calls the views and fixture made.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ludex_core::config::TestConfig;
use ludex_core::driver::{BrowserDriver, DeviceDriver, DriverError, GameDriver};
use ludex_core::element::{GameObject, Locator, LogRecord, WorldPosition};
use ludex_core::report::ReportSink;
use ludex_core::reporter::Reporter;
use ludex_suite::fixture::DriverFactory;
use tokio::sync::broadcast;

/// A call observed by the mock game driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Connect,
    Stop,
    Find(String),
    Click(String),
    Tap(String, u32),
    SetText(String, String),
    GetText(String),
    LoadScene(String),
    Screenshot,
}

struct Scripted {
    object: GameObject,
    /// Number of find attempts that report absence before the object appears.
    appear_after: u32,
    finds_seen: AtomicU32,
}

/// Game driver whose scene content is scripted per test.
pub struct MockGameDriver {
    objects: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<Call>>,
    logs: broadcast::Sender<LogRecord>,
    fail_connect: bool,
    fail_stop: bool,
    scene: String,
}

impl MockGameDriver {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            logs: broadcast::channel(64).0,
            fail_connect: false,
            fail_stop: false,
            scene: "MainMenu".to_string(),
        }
    }

    /// Script an object as present from the first lookup.
    pub fn with_object(self, object: GameObject) -> Self {
        self.with_object_after(object, 0)
    }

    /// Script an object that appears only after `appear_after` absent lookups.
    pub fn with_object_after(self, object: GameObject, appear_after: u32) -> Self {
        self.objects.lock().unwrap().insert(
            object.name.clone(),
            Scripted {
                object,
                appear_after,
                finds_seen: AtomicU32::new(0),
            },
        );
        self
    }

    pub fn failing_connect(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn failing_stop(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    /// Stream a log record to any listener.
    pub fn push_log(&self, record: LogRecord) {
        let _ = self.logs.send(record);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn screenshot_attempts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Screenshot))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Convenience constructor for a scripted object.
pub fn object(name: &str, enabled: bool) -> GameObject {
    GameObject {
        name: name.to_string(),
        id: 1,
        enabled,
        position: Some(WorldPosition { x: 1.0, y: 2.0, z: 3.0 }),
    }
}

#[async_trait]
impl GameDriver for MockGameDriver {
    async fn connect(&self) -> Result<(), DriverError> {
        self.record(Call::Connect);
        if self.fail_connect {
            return Err(DriverError::ConnectionLost("connection refused".to_string()));
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), DriverError> {
        self.record(Call::Stop);
        if self.fail_stop {
            return Err(DriverError::CommandFailed("stop failed".to_string()));
        }
        Ok(())
    }

    async fn find_object(&self, locator: &Locator) -> Result<GameObject, DriverError> {
        self.record(Call::Find(locator.name.to_string()));
        let objects = self.objects.lock().unwrap();
        match objects.get(locator.name) {
            Some(scripted) => {
                let seen = scripted.finds_seen.fetch_add(1, Ordering::SeqCst);
                if seen >= scripted.appear_after {
                    Ok(scripted.object.clone())
                } else {
                    Err(DriverError::NotFound(locator.name.to_string()))
                }
            }
            None => Err(DriverError::NotFound(locator.name.to_string())),
        }
    }

    async fn find_object_containing(
        &self,
        locator: &Locator,
    ) -> Result<GameObject, DriverError> {
        let objects = self.objects.lock().unwrap();
        objects
            .values()
            .find(|scripted| scripted.object.name.contains(locator.name))
            .map(|scripted| scripted.object.clone())
            .ok_or_else(|| DriverError::NotFound(locator.name.to_string()))
    }

    async fn click_object(&self, object: &GameObject) -> Result<(), DriverError> {
        self.record(Call::Click(object.name.clone()));
        Ok(())
    }

    async fn tap_object(&self, object: &GameObject, count: u32) -> Result<(), DriverError> {
        self.record(Call::Tap(object.name.clone(), count));
        Ok(())
    }

    async fn set_text(&self, object: &GameObject, text: &str) -> Result<(), DriverError> {
        self.record(Call::SetText(object.name.clone(), text.to_string()));
        Ok(())
    }

    async fn get_text(&self, object: &GameObject) -> Result<String, DriverError> {
        self.record(Call::GetText(object.name.clone()));
        Ok(format!("{} text", object.name))
    }

    async fn world_position(&self, object: &GameObject) -> Result<WorldPosition, DriverError> {
        object
            .position
            .ok_or_else(|| DriverError::CommandFailed("no position".to_string()))
    }

    async fn current_scene(&self) -> Result<String, DriverError> {
        Ok(self.scene.clone())
    }

    async fn load_scene(&self, scene: &str) -> Result<(), DriverError> {
        self.record(Call::LoadScene(scene.to_string()));
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.record(Call::Screenshot);
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }

    fn subscribe_logs(&self) -> broadcast::Receiver<LogRecord> {
        self.logs.subscribe()
    }
}

#[derive(Default)]
pub struct MockDeviceDriver {
    pub started: AtomicBool,
    pub quit_called: AtomicBool,
    pub fail_quit: AtomicBool,
}

#[async_trait]
impl DeviceDriver for MockDeviceDriver {
    async fn start(&self) -> Result<(), DriverError> {
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn quit(&self) -> Result<(), DriverError> {
        self.quit_called.store(true, Ordering::SeqCst);
        if self.fail_quit.load(Ordering::SeqCst) {
            return Err(DriverError::CommandFailed("device quit failed".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MockBrowserDriver {
    pub started: AtomicBool,
    pub quit_called: AtomicBool,
    pub navigated_to: Mutex<Option<String>>,
}

#[async_trait]
impl BrowserDriver for MockBrowserDriver {
    async fn start(&self) -> Result<(), DriverError> {
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        *self.navigated_to.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn quit(&self) -> Result<(), DriverError> {
        self.quit_called.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Report sink that records every step and attachment.
#[derive(Default)]
pub struct RecordingSink {
    pub steps: Mutex<Vec<String>>,
    pub attachments: Mutex<Vec<(String, String, Vec<u8>)>>,
}

impl RecordingSink {
    pub fn steps(&self) -> Vec<String> {
        self.steps.lock().unwrap().clone()
    }

    pub fn attachments(&self) -> Vec<(String, String, Vec<u8>)> {
        self.attachments.lock().unwrap().clone()
    }
}

impl ReportSink for RecordingSink {
    fn record_step(&self, name: &str) -> std::io::Result<()> {
        self.steps.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn add_attachment(&self, name: &str, content_type: &str, bytes: &[u8]) -> std::io::Result<()> {
        self.attachments.lock().unwrap().push((
            name.to_string(),
            content_type.to_string(),
            bytes.to_vec(),
        ));
        Ok(())
    }
}

/// Factory handing out the mocks above, with optional game-start failure.
pub struct MockFactory {
    pub game: Arc<MockGameDriver>,
    pub device: Arc<MockDeviceDriver>,
    pub browser: Arc<MockBrowserDriver>,
}

impl MockFactory {
    pub fn new(game: MockGameDriver) -> Self {
        Self {
            game: Arc::new(game),
            device: Arc::new(MockDeviceDriver::default()),
            browser: Arc::new(MockBrowserDriver::default()),
        }
    }
}

#[async_trait]
impl DriverFactory for MockFactory {
    async fn game(&self, _config: &TestConfig) -> Result<Arc<dyn GameDriver>, DriverError> {
        Ok(self.game.clone())
    }

    async fn device(&self, _config: &TestConfig) -> Result<Arc<dyn DeviceDriver>, DriverError> {
        Ok(self.device.clone())
    }

    async fn browser(&self, _config: &TestConfig) -> Result<Arc<dyn BrowserDriver>, DriverError> {
        Ok(self.browser.clone())
    }
}

/// Default configuration resolved with an empty environment.
pub fn test_config() -> TestConfig {
    TestConfig::from_lookup(|_| None)
}

/// Reporter writing under a unique temp directory so parallel tests don't
/// collide.
pub fn temp_reporter(sink: Arc<dyn ReportSink>, tag: &str) -> (Arc<Reporter>, PathBuf) {
    ludex_suite::logging::init();
    let dir = std::env::temp_dir().join(format!("ludex_suite_{tag}_{}", std::process::id()));
    let reporter = Arc::new(Reporter::with_output_dir(sink, &dir));
    (reporter, dir)
}
