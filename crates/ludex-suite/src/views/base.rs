//! Base page-object behavior shared by every view.
//!
//! A view is a thin wrapper over the run context's game driver: it resolves
//! named locators, waits with bounded polls, and translates the driver's
//! not-found signal into either data ([`Lookup`]) or a descriptive test
//! failure, depending on what the caller asked for.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ludex_core::context::RunContext;
use ludex_core::driver::DriverError;
use ludex_core::element::{GameObject, Locator, Lookup};
use ludex_core::poll::{poll_until, PollOutcome};

use crate::error::SuiteError;

/// Default deadline for presence waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default interval between poll attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Fixed pause after a gesture, giving the game a moment to settle.
pub const SETTLE: Duration = Duration::from_millis(500);

/// Element-interaction primitives available to every view.
///
/// All methods forward to the run context's game driver. Implementors only
/// provide [`ctx`](View::ctx).
#[async_trait]
pub trait View: Send + Sync {
    /// The run context this view is bound to.
    fn ctx(&self) -> &Arc<RunContext>;

    /// Poll for an element every `interval` until it appears or `timeout`
    /// elapses.
    ///
    /// Absence within the deadline is returned as [`Lookup::TimedOut`], not
    /// as an error; callers that treat absence as a failure use
    /// [`wait_for`](View::wait_for) instead.
    async fn wait_lookup(
        &self,
        locator: Locator,
        timeout: Duration,
        interval: Duration,
    ) -> Result<Lookup, SuiteError> {
        let driver = self.ctx().game().clone();
        let outcome = poll_until(timeout, interval, move || {
            let driver = driver.clone();
            async move {
                match driver.find_object(&locator).await {
                    Ok(object) => Some(Ok(object)),
                    Err(DriverError::NotFound(_)) => None,
                    Err(e) => Some(Err(e)),
                }
            }
        })
        .await;

        match outcome {
            PollOutcome::Completed(Ok(object)) => Ok(Lookup::Found(object)),
            PollOutcome::Completed(Err(e)) => Err(e.into()),
            PollOutcome::TimedOut => Ok(Lookup::TimedOut),
        }
    }

    /// Wait for an element to be present, failing descriptively on timeout.
    ///
    /// On timeout this logs with a screenshot and returns
    /// [`SuiteError::ElementMissing`] instead of the driver's raw timeout.
    async fn wait_for(
        &self,
        locator: Locator,
        timeout: Duration,
        interval: Duration,
    ) -> Result<GameObject, SuiteError> {
        let ctx = self.ctx();
        ctx.reporter
            .log(&format!("Waiting for element {locator} to be present"));

        match self.wait_lookup(locator, timeout, interval).await? {
            Lookup::Found(object) => Ok(object),
            _ => {
                ctx.reporter
                    .log_with_screenshot(&format!(
                        "Element {locator} was not found within {} seconds",
                        timeout.as_secs()
                    ))
                    .await;
                Err(SuiteError::ElementMissing { name: locator.name, timeout })
            }
        }
    }

    /// Wait for an element whose name contains the locator's name.
    ///
    /// Delegated to the driver's substring lookup; a timeout surfaces as the
    /// raw [`DriverError::Timeout`].
    async fn wait_for_containing(
        &self,
        locator: Locator,
        timeout: Duration,
        interval: Duration,
    ) -> Result<GameObject, SuiteError> {
        let driver = self.ctx().game().clone();
        let outcome = poll_until(timeout, interval, move || {
            let driver = driver.clone();
            async move {
                match driver.find_object_containing(&locator).await {
                    Ok(object) => Some(Ok(object)),
                    Err(DriverError::NotFound(_)) => None,
                    Err(e) => Some(Err(e)),
                }
            }
        })
        .await;

        match outcome {
            PollOutcome::Completed(Ok(object)) => Ok(object),
            PollOutcome::Completed(Err(e)) => Err(e.into()),
            PollOutcome::TimedOut => Err(DriverError::Timeout.into()),
        }
    }

    /// Wait for an element to be absent.
    ///
    /// A timeout surfaces as the raw [`DriverError::Timeout`].
    async fn wait_for_absent(
        &self,
        locator: Locator,
        timeout: Duration,
        interval: Duration,
    ) -> Result<(), SuiteError> {
        let driver = self.ctx().game().clone();
        let outcome = poll_until(timeout, interval, move || {
            let driver = driver.clone();
            async move {
                match driver.find_object(&locator).await {
                    Ok(_) => None,
                    Err(DriverError::NotFound(_)) => Some(Ok(())),
                    Err(e) => Some(Err(e)),
                }
            }
        })
        .await;

        match outcome {
            PollOutcome::Completed(Ok(())) => Ok(()),
            PollOutcome::Completed(Err(e)) => Err(e.into()),
            PollOutcome::TimedOut => Err(DriverError::Timeout.into()),
        }
    }

    /// Wait for an element with the default deadline, click it, then settle.
    async fn click(&self, locator: Locator) -> Result<(), SuiteError> {
        let object = self.wait_for(locator, DEFAULT_TIMEOUT, DEFAULT_INTERVAL).await?;
        self.ctx().game().click_object(&object).await?;
        tokio::time::sleep(SETTLE).await;
        Ok(())
    }

    /// Wait for an element with the default deadline, tap it `count` times,
    /// then settle.
    async fn tap(&self, locator: Locator, count: u32) -> Result<(), SuiteError> {
        let object = self.wait_for(locator, DEFAULT_TIMEOUT, DEFAULT_INTERVAL).await?;
        self.ctx().game().tap_object(&object, count).await?;
        tokio::time::sleep(SETTLE).await;
        Ok(())
    }

    /// Wait for an element with the default deadline, then set its text value.
    async fn set_text(&self, locator: Locator, text: &str) -> Result<(), SuiteError> {
        let object = self.wait_for(locator, DEFAULT_TIMEOUT, DEFAULT_INTERVAL).await?;
        self.ctx().game().set_text(&object, text).await?;
        Ok(())
    }

    /// Wait for an element with the default deadline, then read its text value.
    async fn text_of(&self, locator: Locator) -> Result<String, SuiteError> {
        let object = self.wait_for(locator, DEFAULT_TIMEOUT, DEFAULT_INTERVAL).await?;
        Ok(self.ctx().game().get_text(&object).await?)
    }

    /// Single immediate lookup; absence is data, not an error.
    async fn lookup(&self, locator: Locator) -> Result<Lookup, SuiteError> {
        match self.ctx().game().find_object(&locator).await {
            Ok(object) => Ok(Lookup::Found(object)),
            Err(DriverError::NotFound(_)) => Ok(Lookup::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// True if a single immediate lookup resolves the element.
    async fn is_present(&self, locator: Locator) -> Result<bool, SuiteError> {
        Ok(self.lookup(locator).await?.is_found())
    }

    /// Immediate lookup that treats absence as a descriptive failure.
    ///
    /// On absence this logs with a screenshot and returns
    /// [`SuiteError::ElementNotFound`].
    async fn find(&self, locator: Locator) -> Result<GameObject, SuiteError> {
        match self.lookup(locator).await? {
            Lookup::Found(object) => Ok(object),
            _ => {
                self.ctx()
                    .reporter
                    .log_with_screenshot(&format!("Element {locator} not found"))
                    .await;
                Err(SuiteError::ElementNotFound { name: locator.name })
            }
        }
    }

    /// Name of the currently loaded scene.
    async fn current_scene(&self) -> Result<String, SuiteError> {
        Ok(self.ctx().game().current_scene().await?)
    }

    /// Ask the game to load the named scene.
    async fn load_scene(&self, scene: &str) -> Result<(), SuiteError> {
        Ok(self.ctx().game().load_scene(scene).await?)
    }

    /// Capture a screenshot and write it to `path`.
    async fn save_screenshot(&self, path: &std::path::Path) -> Result<(), SuiteError> {
        let bytes = self.ctx().game().screenshot().await?;
        std::fs::write(path, bytes).map_err(DriverError::from)?;
        Ok(())
    }

    /// Unconditional pause.
    async fn settle(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
