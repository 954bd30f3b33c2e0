//! # ludex-suite
//!
//! Page-object views and the suite fixture for end-to-end UI tests against
//! a remotely automated game build.
//!
//! Tests construct a [`fixture::Fixture`] once per run, call
//! [`fixture::Fixture::begin_test`] / [`fixture::Fixture::end_test`] around
//! each test body, and interact with the game exclusively through the views.
//! The e2e suites live under `tests/`.

pub mod error;
pub mod fixture;
pub mod logging;
pub mod views;

pub use error::SuiteError;
