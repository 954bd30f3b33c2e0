//! Suite configuration resolved from process environment variables.
//!
//! Every setting has a documented default, used when the variable is unset,
//! empty, or fails to parse. Resolution never errors: a malformed value falls
//! back to the default rather than failing the run.
//!
//! # Example
//!
//! ```
//! use ludex_core::config::TestConfig;
//!
//! let config = TestConfig::from_env();
//! println!("connecting to {}:{}", config.server_host, config.server_port);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Target platform for the build under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Android,
    Ios,
    WebGl,
}

impl Platform {
    /// Parse a platform name case-insensitively. Unknown names resolve to
    /// `None` so the caller can fall back to the default.
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            "webgl" => Some(Platform::WebGl),
            _ => None,
        }
    }
}

/// Immutable configuration snapshot for one suite run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestConfig {
    /// Host of the game-automation server. `LUDEX_SERVER_HOST`, default `127.0.0.1`.
    pub server_host: String,
    /// Port of the game-automation server. `LUDEX_SERVER_PORT`, default `13000`.
    pub server_port: u16,
    /// App name registered with the automation server. `LUDEX_APP_NAME`, default `__default__`.
    pub app_name: String,
    /// Connect timeout. `LUDEX_CONNECT_TIMEOUT` in seconds, default `60`.
    pub connect_timeout: Duration,
    /// Target platform. `LUDEX_PLATFORM`, default `Android`.
    pub platform: Platform,
    /// Device identifier for mobile automation. `LUDEX_DEVICE_NAME`, default `android`.
    pub device_name: String,
    /// Application bundle identifier. `LUDEX_APP_BUNDLE_ID`, default `com.example.app`.
    pub app_bundle_id: String,
    /// Whether to start the mobile-device driver. `LUDEX_WITH_DEVICE`, default `false`.
    pub with_device: bool,
    /// Whether to start the browser driver. `LUDEX_WITH_BROWSER`, default `false`.
    pub with_browser: bool,
    /// URL of the hosted web build. `LUDEX_WEB_URL`, default `https://example.com/game`.
    pub web_url: String,
}

impl TestConfig {
    /// Resolve the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the configuration through an arbitrary lookup function.
    ///
    /// Tests pass a map-backed closure here instead of mutating the process
    /// environment, which is racy across parallel tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str, default: &str| -> String {
            match lookup(name) {
                Some(value) if !value.is_empty() => value,
                _ => default.to_string(),
            }
        };

        let port = get("LUDEX_SERVER_PORT", "13000").parse().unwrap_or(13000);
        let connect_timeout_secs: u64 =
            get("LUDEX_CONNECT_TIMEOUT", "60").parse().unwrap_or(60);
        let platform =
            Platform::parse(&get("LUDEX_PLATFORM", "Android")).unwrap_or(Platform::Android);

        Self {
            server_host: get("LUDEX_SERVER_HOST", "127.0.0.1"),
            server_port: port,
            app_name: get("LUDEX_APP_NAME", "__default__"),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            platform,
            device_name: get("LUDEX_DEVICE_NAME", "android"),
            app_bundle_id: get("LUDEX_APP_BUNDLE_ID", "com.example.app"),
            with_device: get("LUDEX_WITH_DEVICE", "false") == "true",
            with_browser: get("LUDEX_WITH_BROWSER", "false") == "true",
            web_url: get("LUDEX_WEB_URL", "https://example.com/game"),
        }
    }
}
