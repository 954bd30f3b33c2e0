//! Suite fixture: one-time setup, per-test hooks, one-time teardown.
//!
//! A [`Fixture`] walks one suite run through its lifecycle: start drivers,
//! attach the game log listener, construct views, run tests sequentially,
//! then flush log attachments and stop every driver. Setup failures are
//! captured rather than thrown and re-raised on every per-test setup, so a
//! broken environment fails each test fast instead of hanging the run.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use ludex_core::config::TestConfig;
use ludex_core::context::{DriverBundle, RunContext};
use ludex_core::driver::{BrowserDriver, DeviceDriver, DriverError, GameDriver};
use ludex_core::element::LogRecord;
use ludex_core::report::ReportSink;
use ludex_core::reporter::Reporter;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::SuiteError;
use crate::views::{GamePlayView, MainMenuView};

/// Produces the run's automation handles from the resolved configuration.
///
/// The real factory constructs the external driver clients; suite tests
/// inject programmable mocks through the same trait.
#[async_trait]
pub trait DriverFactory: Send + Sync {
    async fn game(&self, config: &TestConfig) -> Result<Arc<dyn GameDriver>, DriverError>;
    async fn device(&self, config: &TestConfig) -> Result<Arc<dyn DeviceDriver>, DriverError>;
    async fn browser(&self, config: &TestConfig) -> Result<Arc<dyn BrowserDriver>, DriverError>;
}

/// View instances available to every test in the run.
pub struct Views {
    pub main_menu: MainMenuView,
    pub gameplay: GamePlayView,
}

pub struct Fixture {
    reporter: Arc<Reporter>,
    ctx: Option<Arc<RunContext>>,
    views: Option<Views>,
    setup_error: Option<String>,
    log_task: Option<JoinHandle<()>>,
}

impl Fixture {
    /// One-time setup with a reporter writing under the default output dir.
    pub async fn start(
        config: &TestConfig,
        factory: &dyn DriverFactory,
        sink: Arc<dyn ReportSink>,
    ) -> Self {
        Self::start_with_reporter(config, factory, Arc::new(Reporter::new(sink))).await
    }

    /// One-time setup: start drivers, attach the log listener, build views.
    ///
    /// Never returns an error; any failure is captured into the fixture and
    /// re-raised by [`begin_test`](Fixture::begin_test).
    pub async fn start_with_reporter(
        config: &TestConfig,
        factory: &dyn DriverFactory,
        reporter: Arc<Reporter>,
    ) -> Self {
        reporter.log("One-time setup: starting all drivers");

        match Self::start_inner(config, factory, reporter.clone()).await {
            Ok((ctx, views, log_task)) => Self {
                reporter,
                ctx: Some(ctx),
                views: Some(views),
                setup_error: None,
                log_task: Some(log_task),
            },
            Err(e) => {
                reporter.log(&format!("Exception during one-time setup: {e}"));
                Self {
                    reporter,
                    ctx: None,
                    views: None,
                    setup_error: Some(e.to_string()),
                    log_task: None,
                }
            }
        }
    }

    async fn start_inner(
        config: &TestConfig,
        factory: &dyn DriverFactory,
        reporter: Arc<Reporter>,
    ) -> Result<(Arc<RunContext>, Views, JoinHandle<()>), SuiteError> {
        reporter.log(&format!("Platform: {:?}", config.platform));
        reporter.log(&format!("Device automation: {}", config.with_device));
        reporter.log(&format!("Browser automation: {}", config.with_browser));

        let device = if config.with_device {
            reporter.log("Starting device driver");
            let device = factory.device(config).await?;
            device.start().await?;
            Some(device)
        } else {
            None
        };

        let browser = if config.with_browser {
            reporter.log("Starting browser driver");
            let browser = factory.browser(config).await?;
            browser.start().await?;
            browser.navigate(&config.web_url).await?;
            Some(browser)
        } else {
            None
        };

        reporter.log(&format!(
            "Connecting to game automation server at {}:{}",
            config.server_host, config.server_port
        ));
        let game = factory.game(config).await?;
        game.connect().await?;
        reporter.bind_driver(game.clone()).await;
        reporter.log("Connected to the game");

        let ctx = RunContext::new(DriverBundle::new(game, device, browser), reporter);
        let log_task = spawn_log_listener(ctx.clone());

        let views = Views {
            main_menu: MainMenuView::new(ctx.clone()),
            gameplay: GamePlayView::new(ctx.clone()),
        };
        ctx.reporter.log("All view objects initialized");

        Ok((ctx, views, log_task))
    }

    /// The views, once setup succeeded.
    pub fn views(&self) -> Option<&Views> {
        self.views.as_ref()
    }

    /// The run context, once setup succeeded.
    pub fn ctx(&self) -> Option<&Arc<RunContext>> {
        self.ctx.as_ref()
    }

    /// Per-test setup.
    ///
    /// If one-time setup failed, the captured failure is re-raised here for
    /// every test in the run, and no test body gets to its assertions.
    pub async fn begin_test(&self, name: &str) -> Result<(), SuiteError> {
        if let Some(cause) = &self.setup_error {
            return Err(SuiteError::Setup(cause.clone()));
        }
        let Some(ctx) = &self.ctx else {
            return Err(SuiteError::Setup("drivers were never started".to_string()));
        };
        ctx.set_current_test(name).await;
        ctx.reporter.log(&format!("Starting test: {name}"));
        Ok(())
    }

    /// Per-test teardown: log the outcome, screenshot on failure.
    ///
    /// Runs even when one-time setup failed, so every test's completion
    /// status lands in the report; without a bound driver the failure
    /// screenshot degrades to a logged warning.
    pub async fn end_test(&self, name: &str, passed: bool) {
        let status = if passed { "passed" } else { "failed" };
        self.reporter
            .log(&format!("Test {name} completed with status: {status}"));
        if !passed {
            self.reporter.log("Test failed, taking screenshot for debugging");
            self.reporter
                .take_screenshot(Some(&format!("{name}_failed")))
                .await;
        }
        if let Some(ctx) = &self.ctx {
            ctx.clear_current_test().await;
        }
    }

    /// One-time teardown: flush log attachments, stop every driver.
    ///
    /// Always completes. Each attachment or stop failure is logged and the
    /// remaining work still runs.
    pub async fn teardown(mut self) {
        if let Some(task) = self.log_task.take() {
            task.abort();
        }

        let Some(ctx) = self.ctx.take() else {
            self.reporter.log("Teardown: no drivers to stop");
            return;
        };

        for (name, path) in ctx.logs.drain().await {
            ctx.reporter.attach_file(&path, Some(&name)).await;
        }

        if let Err(e) = ctx.drivers.game.stop().await {
            ctx.reporter.log(&format!("Error stopping game driver: {e}"));
        }
        if let Some(browser) = &ctx.drivers.browser {
            if let Err(e) = browser.quit().await {
                ctx.reporter.log(&format!("Error stopping browser driver: {e}"));
            }
        }
        if let Some(device) = &ctx.drivers.device {
            if let Err(e) = device.quit().await {
                ctx.reporter.log(&format!("Error stopping device driver: {e}"));
            }
        }

        ctx.reporter.log("All drivers stopped and cleanup completed");
    }
}

/// Drain the game's log stream into per-test files.
///
/// Each record is appended to `<output dir>/<test>-game-logs.txt` for the
/// test running when it arrives, and the file is recorded in the run's log
/// registry for attachment at teardown.
fn spawn_log_listener(ctx: Arc<RunContext>) -> JoinHandle<()> {
    let mut rx = ctx.game().subscribe_logs();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(record) => append_log_record(&ctx, &record).await,
                Err(RecvError::Lagged(missed)) => {
                    warn!("game log listener lagged, {missed} records dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

async fn append_log_record(ctx: &RunContext, record: &LogRecord) {
    let test = ctx
        .current_test()
        .await
        .unwrap_or_else(|| "suite".to_string());
    let file_name = format!("{test}-game-logs.txt");
    let path: PathBuf = ctx.reporter.output_dir().join(&file_name);

    let mut line = format!("[{:?}] {}\n", record.level, record.message);
    if let Some(trace) = &record.stack_trace {
        line.push_str(&format!("StackTrace: {trace}\n"));
    }

    if let Err(e) = append_line(&path, &line) {
        warn!("failed to append game log to {}: {e}", path.display());
        return;
    }
    ctx.logs.record(file_name, path).await;
}

fn append_line(path: &std::path::Path, line: &str) -> std::io::Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(line.as_bytes())
}
