//! Automation driver traits for backend-agnostic game UI automation.
//!
//! This module defines the three external collaborator surfaces a suite run
//! may hold: the mandatory [`GameDriver`] connecting to the running game, an
//! optional [`DeviceDriver`] for the mobile device hosting the build, and an
//! optional [`BrowserDriver`] for web builds. The wire protocols behind these
//! traits belong to the client libraries implementing them; this crate only
//! arranges calls against the trait surface, so tests can substitute
//! programmable mocks.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::element::{GameObject, Locator, LogRecord, WorldPosition};

/// Errors surfaced by automation driver operations.
///
/// Unifies failures from all backends behind a single type. `NotFound` is the
/// one variant presence checks treat as data rather than as a failure.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The named object was absent at lookup time.
    #[error("Object '{0}' not found")]
    NotFound(String),

    /// A bounded wait elapsed without the condition holding.
    #[error("Operation timed out")]
    Timeout,

    /// A command was rejected or failed on the server side.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The backend is not available or not connected.
    #[error("Not connected to automation backend")]
    NotConnected,

    /// The connection to the backend was lost mid-operation.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote-control client for the running game under test.
///
/// One instance is started per suite run and shared by every view. All
/// object-addressed methods take a [`Locator`] and resolve it on the server;
/// absence is reported as [`DriverError::NotFound`], never as a panic.
#[async_trait]
pub trait GameDriver: Send + Sync {
    /// Establish the connection to the automation server inside the game.
    async fn connect(&self) -> Result<(), DriverError>;

    /// Close the connection. Idempotent.
    async fn stop(&self) -> Result<(), DriverError>;

    /// Resolve a locator to an object, single immediate attempt.
    async fn find_object(&self, locator: &Locator) -> Result<GameObject, DriverError>;

    /// Resolve the first object whose name contains the locator's name.
    async fn find_object_containing(
        &self,
        locator: &Locator,
    ) -> Result<GameObject, DriverError>;

    /// Click a previously resolved object.
    async fn click_object(&self, object: &GameObject) -> Result<(), DriverError>;

    /// Tap a previously resolved object `count` times.
    async fn tap_object(&self, object: &GameObject, count: u32) -> Result<(), DriverError>;

    /// Set the text value of a resolved object (input fields, labels).
    async fn set_text(&self, object: &GameObject, text: &str) -> Result<(), DriverError>;

    /// Read the text value of a resolved object.
    async fn get_text(&self, object: &GameObject) -> Result<String, DriverError>;

    /// Read the world-space position of a resolved object.
    async fn world_position(&self, object: &GameObject) -> Result<WorldPosition, DriverError>;

    /// Name of the currently loaded scene.
    async fn current_scene(&self) -> Result<String, DriverError>;

    /// Ask the game to load the named scene.
    async fn load_scene(&self, scene: &str) -> Result<(), DriverError>;

    /// Capture a screenshot of the game viewport as raw PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>, DriverError>;

    /// Subscribe to the game's streamed log records.
    ///
    /// Each subscriber gets its own receiver; records sent while no receiver
    /// is listening are dropped by the channel, which is acceptable for a
    /// diagnostics stream.
    fn subscribe_logs(&self) -> broadcast::Receiver<LogRecord>;
}

/// Mobile-device automation handle, exposed only via lifecycle control.
#[async_trait]
pub trait DeviceDriver: Send + Sync {
    async fn start(&self) -> Result<(), DriverError>;
    async fn quit(&self) -> Result<(), DriverError>;
}

/// Browser automation handle for web builds.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn start(&self) -> Result<(), DriverError>;
    async fn navigate(&self, url: &str) -> Result<(), DriverError>;
    async fn quit(&self) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn driver_error_display() {
        let err = DriverError::NotFound("PlayButton".to_string());
        assert!(err.to_string().contains("PlayButton"));

        let err = DriverError::Timeout;
        assert!(err.to_string().contains("timed out"));

        let err = DriverError::CommandFailed("scene missing".to_string());
        assert!(err.to_string().contains("scene missing"));

        let err = DriverError::NotConnected;
        assert!(err.to_string().contains("Not connected"));

        let err = DriverError::ConnectionLost("reset by peer".to_string());
        assert!(err.to_string().contains("reset by peer"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe");
        let err: DriverError = io.into();
        assert!(matches!(err, DriverError::Io(_)));
    }
}
