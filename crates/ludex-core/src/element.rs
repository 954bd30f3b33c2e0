//! Element model shared by all automation backends.
//!
//! These types describe named in-game objects as reported by the remote
//! game-automation server, plus the log records it streams back. They are
//! independent of any specific backend implementation.

use serde::{Deserialize, Serialize};

/// Locator strategy understood by the game-automation server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum By {
    /// Match by the object's name.
    Name,
    /// Match by a hierarchy path expression.
    Path,
    /// Match by the object's tag.
    Tag,
}

/// A (strategy, name) pair identifying a named in-game object.
///
/// Locators are defined as constants on each view. Name collisions are
/// resolved by the automation server, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    pub by: By,
    pub name: &'static str,
}

impl Locator {
    /// Locator matching by object name, the common case.
    pub const fn name(name: &'static str) -> Self {
        Self { by: By::Name, name }
    }

    /// Locator matching by hierarchy path.
    pub const fn path(path: &'static str) -> Self {
        Self { by: By::Path, name: path }
    }

    /// Locator matching by tag.
    pub const fn tag(tag: &'static str) -> Self {
        Self { by: By::Tag, name: tag }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A world-space position reported for a game object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A resolved in-game object as returned by the automation server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    /// The object's name in the scene hierarchy.
    pub name: String,

    /// The server-side instance id for follow-up commands.
    pub id: i64,

    /// Whether the object is currently enabled (active and interactable).
    #[serde(default)]
    pub enabled: bool,

    /// World-space position, when the server reports one.
    #[serde(default)]
    pub position: Option<WorldPosition>,
}

/// Severity of a streamed game log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

/// A single log record streamed from the game under test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    #[serde(default)]
    pub stack_trace: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Outcome of looking up an element.
///
/// Absence is data here, not an error: callers that expect an element to be
/// missing match on [`Lookup::NotFound`] instead of catching anything.
#[derive(Debug, Clone)]
pub enum Lookup {
    /// The element was resolved.
    Found(GameObject),
    /// The element was absent at lookup time.
    NotFound,
    /// A bounded wait elapsed without the element appearing.
    TimedOut,
}

impl Lookup {
    /// True if the element was resolved.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// The resolved object, if any.
    pub fn into_found(self) -> Option<GameObject> {
        match self {
            Lookup::Found(obj) => Some(obj),
            _ => None,
        }
    }
}
