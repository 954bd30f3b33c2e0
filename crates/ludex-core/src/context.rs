//! Per-run execution context.
//!
//! One [`RunContext`] is created during one-time setup and shared by
//! reference with every view and with the log-listener task. It carries the
//! driver bundle, the reporter, and the per-run log registry, replacing any
//! process-wide mutable state.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::driver::{BrowserDriver, DeviceDriver, GameDriver};
use crate::reporter::Reporter;

/// The automation handles available to a suite run.
///
/// The game driver is mandatory for the bundle's entire lifetime; the device
/// and browser handles are set once at construction according to the resolved
/// configuration and never change afterwards.
pub struct DriverBundle {
    pub game: Arc<dyn GameDriver>,
    pub device: Option<Arc<dyn DeviceDriver>>,
    pub browser: Option<Arc<dyn BrowserDriver>>,
}

impl DriverBundle {
    pub fn new(
        game: Arc<dyn GameDriver>,
        device: Option<Arc<dyn DeviceDriver>>,
        browser: Option<Arc<dyn BrowserDriver>>,
    ) -> Self {
        Self { game, device, browser }
    }
}

/// Per-run map from generated log-file name to path.
///
/// The log-listener task records files here as game log records arrive;
/// teardown drains the map and attaches every file to the report.
#[derive(Default)]
pub struct LogRegistry {
    entries: Mutex<HashMap<String, PathBuf>>,
}

impl LogRegistry {
    /// Record a log file. Recording the same name twice keeps the first path.
    pub async fn record(&self, name: impl Into<String>, path: impl Into<PathBuf>) {
        self.entries
            .lock()
            .await
            .entry(name.into())
            .or_insert_with(|| path.into());
    }

    /// Remove and return every recorded entry.
    pub async fn drain(&self) -> Vec<(String, PathBuf)> {
        self.entries.lock().await.drain().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

/// Shared state for one suite run.
pub struct RunContext {
    /// Unique identifier for this run.
    pub id: Uuid,

    /// When the run context was created.
    pub created_at: DateTime<Utc>,

    /// The automation handles for this run.
    pub drivers: DriverBundle,

    /// The run's reporter.
    pub reporter: Arc<Reporter>,

    /// Log files accumulated during the run.
    pub logs: LogRegistry,

    /// Name of the test currently executing, used by the log listener to
    /// pick the per-test log file. `None` outside a test body.
    current_test: RwLock<Option<String>>,
}

impl RunContext {
    pub fn new(drivers: DriverBundle, reporter: Arc<Reporter>) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            drivers,
            reporter,
            logs: LogRegistry::default(),
            current_test: RwLock::new(None),
        })
    }

    /// The mandatory game driver.
    pub fn game(&self) -> &Arc<dyn GameDriver> {
        &self.drivers.game
    }

    /// Mark `name` as the currently executing test.
    pub async fn set_current_test(&self, name: &str) {
        *self.current_test.write().await = Some(name.to_string());
    }

    /// Name of the currently executing test, if any.
    pub async fn current_test(&self) -> Option<String> {
        self.current_test.read().await.clone()
    }

    /// Clear the current-test marker.
    pub async fn clear_current_test(&self) {
        *self.current_test.write().await = None;
    }
}
