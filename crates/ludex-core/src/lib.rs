//! # ludex-core
//!
//! Core library for driving a remotely automated game build from an
//! end-to-end test suite.
//!
//! This crate provides the pieces a page-object suite is built on: the
//! backend-agnostic driver traits, the element model, environment-based
//! configuration, a bounded polling primitive, and run-scoped reporting.
//!
//! ## Modules
//!
//! - [`config`] - Typed settings resolved once from environment variables
//! - [`driver`] - `GameDriver` / `DeviceDriver` / `BrowserDriver` traits and errors
//! - [`element`] - Locators, resolved game objects, streamed log records
//! - [`poll`] - Single bounded poll loop used by every wait
//! - [`report`] - Report sink abstraction (steps and attachments)
//! - [`reporter`] - Run-scoped logging, screenshots, and attachments
//! - [`context`] - The driver bundle and per-run execution context

pub mod config;
pub mod context;
pub mod driver;
pub mod element;
pub mod poll;
pub mod report;
pub mod reporter;
