//! User-visible test failures.
//!
//! Only element-resolution failures and a captured setup failure become test
//! failures; reporting and teardown errors are swallowed by the reporter and
//! fixture so they cannot mask the primary outcome.

use std::time::Duration;

use ludex_core::driver::DriverError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiteError {
    /// A presence wait exceeded its deadline.
    #[error(
        "Element '{name}' was not found within {} seconds. \
         Check that the element exists and that the game loaded correctly",
        .timeout.as_secs()
    )]
    ElementMissing { name: &'static str, timeout: Duration },

    /// An immediate find came up empty.
    #[error("Element '{name}' was not found. Verify the element exists in the current scene")]
    ElementNotFound { name: &'static str },

    /// The main menu panel is absent or disabled.
    #[error("Main menu is not visible, cannot start a new game")]
    MenuHidden,

    /// One-time setup failed; re-raised on every subsequent test.
    #[error("One-time setup failed: {0}")]
    Setup(String),

    /// A driver operation failed for a reason other than simple absence.
    #[error(transparent)]
    Driver(#[from] DriverError),
}
