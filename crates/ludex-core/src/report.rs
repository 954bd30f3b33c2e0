//! Report sink abstraction.
//!
//! The external test-reporting service is reduced to two operations: record a
//! named step and add a named attachment. [`JsonReport`] persists both as
//! JSON Lines for local runs and for inspection in tests; a real reporting
//! client implements the same trait.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Recording surface of the external report service.
pub trait ReportSink: Send + Sync {
    /// Record a named step in the report.
    fn record_step(&self, name: &str) -> std::io::Result<()>;

    /// Attach a named blob to the report.
    fn add_attachment(&self, name: &str, content_type: &str, bytes: &[u8])
        -> std::io::Result<()>;
}

/// Infer the attachment content type from a file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") | Some("log") => "text/plain",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("html") => "text/html",
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// One persisted report entry.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ReportEntry {
    Step {
        name: String,
        timestamp: chrono::DateTime<Utc>,
    },
    Attachment {
        name: String,
        content_type: String,
        /// Attachment bytes, base64-encoded.
        content: String,
        timestamp: chrono::DateTime<Utc>,
    },
}

/// JSON Lines report file, one entry per line.
pub struct JsonReport {
    writer: Mutex<BufWriter<std::fs::File>>,
    path: PathBuf,
}

impl JsonReport {
    /// Create (or truncate) the report file at `path`.
    pub fn create(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(&path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Path of the underlying report file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entry(&self, entry: &ReportEntry) -> std::io::Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "report lock poisoned"))?;
        writeln!(writer, "{line}")?;
        writer.flush()
    }
}

impl ReportSink for JsonReport {
    fn record_step(&self, name: &str) -> std::io::Result<()> {
        self.write_entry(&ReportEntry::Step {
            name: name.to_string(),
            timestamp: Utc::now(),
        })
    }

    fn add_attachment(
        &self,
        name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> std::io::Result<()> {
        self.write_entry(&ReportEntry::Attachment {
            name: name.to_string(),
            content_type: content_type.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(bytes),
            timestamp: Utc::now(),
        })
    }
}

/// Sink that discards everything, for runs without a report service.
pub struct NullReport;

impl ReportSink for NullReport {
    fn record_step(&self, _name: &str) -> std::io::Result<()> {
        Ok(())
    }

    fn add_attachment(
        &self,
        _name: &str,
        _content_type: &str,
        _bytes: &[u8],
    ) -> std::io::Result<()> {
        Ok(())
    }
}
