//! Run-scoped progress logging, screenshots, and report attachments.
//!
//! One [`Reporter`] exists per suite run, owned by the run context rather
//! than by process-wide static state. It forwards messages to `tracing` and
//! to the report sink, and captures screenshots through whichever game
//! driver has been bound to it.
//!
//! Nothing here ever fails a test: every screenshot, attachment, or sink
//! error is caught and logged, so reporting problems cannot mask the
//! primary test outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::driver::GameDriver;
use crate::report::{content_type_for, ReportSink};

/// Directory screenshots and per-test log files are written under,
/// relative to the working directory.
pub const OUTPUT_DIR: &str = "screenshots";

pub struct Reporter {
    sink: Arc<dyn ReportSink>,
    output_dir: PathBuf,
    driver: RwLock<Option<Arc<dyn GameDriver>>>,
}

impl Reporter {
    /// Create a reporter writing screenshots under [`OUTPUT_DIR`].
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self::with_output_dir(sink, OUTPUT_DIR)
    }

    /// Create a reporter with an explicit output directory.
    pub fn with_output_dir(sink: Arc<dyn ReportSink>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            sink,
            output_dir: output_dir.into(),
            driver: RwLock::new(None),
        }
    }

    /// Directory screenshots and log files are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Bind the active game driver for screenshot capture.
    ///
    /// Called by whichever component starts the driver.
    pub async fn bind_driver(&self, driver: Arc<dyn GameDriver>) {
        *self.driver.write().await = Some(driver);
    }

    /// Log a timestamped progress line and record it as a report step.
    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        info!("[{timestamp}] {message}");
        if let Err(e) = self.sink.record_step(message) {
            warn!("failed to record report step: {e}");
        }
    }

    /// Log a progress line without recording a report step.
    ///
    /// Used from inside the reporting paths themselves, where a recorded
    /// step would just restate the surrounding one.
    pub fn log_quiet(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        info!("[{timestamp}] {message}");
    }

    /// Log a progress line, then capture a screenshot.
    pub async fn log_with_screenshot(&self, message: &str) {
        self.log(message);
        self.take_screenshot(None).await;
    }

    /// Capture a screenshot and attach it to the report.
    ///
    /// The file is written under the output directory as `<name>.png`, where
    /// `name` defaults to `screenshot_<unix timestamp>`. A missing driver is
    /// a logged warning, not an error.
    pub async fn take_screenshot(&self, name: Option<&str>) {
        let driver = self.driver.read().await.clone();
        let Some(driver) = driver else {
            self.log_quiet("Cannot take screenshot: no game driver bound");
            return;
        };

        let file_name = match name {
            Some(name) => name.to_string(),
            None => format!("screenshot_{}", chrono::Utc::now().timestamp()),
        };

        let bytes = match driver.screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.log_quiet(&format!("Failed to take screenshot: {e}"));
                return;
            }
        };

        if let Err(e) = std::fs::create_dir_all(&self.output_dir) {
            self.log_quiet(&format!("Failed to create screenshot directory: {e}"));
            return;
        }
        let path = self.output_dir.join(format!("{file_name}.png"));
        if let Err(e) = std::fs::write(&path, &bytes) {
            self.log_quiet(&format!("Failed to write screenshot {}: {e}", path.display()));
            return;
        }

        if let Err(e) = self.sink.record_step(&format!("Screenshot taken: {file_name}")) {
            warn!("failed to record screenshot step: {e}");
        }
        if let Err(e) = self.sink.add_attachment(&file_name, "image/png", &bytes) {
            warn!("failed to attach screenshot: {e}");
        }
    }

    /// Attach an existing file to the report under its inferred content type.
    ///
    /// A missing file or read failure is logged, never propagated.
    pub async fn attach_file(&self, path: &Path, name: Option<&str>) {
        let file_name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        };

        if let Err(e) = self.sink.record_step(&format!("Attach file: {file_name}")) {
            warn!("failed to record attachment step: {e}");
        }

        if !path.exists() {
            self.log(&format!(
                "Cannot attach file: not found at {}",
                path.display()
            ));
            return;
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.log(&format!("Failed to read attachment {}: {e}", path.display()));
                return;
            }
        };

        let content_type = content_type_for(path);
        match self.sink.add_attachment(&file_name, content_type, &bytes) {
            Ok(()) => self.log(&format!("File attached to report: {file_name}")),
            Err(e) => self.log(&format!("Failed to attach file to report: {e}")),
        }
    }
}
