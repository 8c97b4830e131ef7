//! The [`EventSource`] trait and its local implementations.
//!
//! A source answers one question: which calendar instances touch a given
//! window. Queries are synchronous and are made fresh for every frame, so
//! sources hold no cache.

use std::path::{Path, PathBuf};

use calwatch_core::InstanceWindow;
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::row::EventRow;

/// A calendar backend that can be queried for instances.
///
/// # Example Implementation
///
/// ```ignore
/// struct PlatformSource { resolver: ContentResolver }
///
/// impl EventSource for PlatformSource {
///     fn name(&self) -> &str { "platform" }
///
///     fn query_instances(&self, window: &InstanceWindow) -> ProviderResult<Vec<EventRow>> {
///         self.resolver.instances(window.start, window.end).map_err(into_provider_error)
///     }
/// }
/// ```
pub trait EventSource: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Returns the rows of every instance that overlaps `window`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the backing store cannot be read.
    fn query_instances(&self, window: &InstanceWindow) -> ProviderResult<Vec<EventRow>>;
}

/// Keeps the rows a real instance query would return for `window`.
fn rows_in_window(rows: impl IntoIterator<Item = EventRow>, window: &InstanceWindow) -> Vec<EventRow> {
    rows.into_iter().filter(|row| row.occurs_in(window)).collect()
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    rows: Vec<EventRow>,
}

impl StaticSource {
    pub fn new(rows: Vec<EventRow>) -> Self {
        Self { rows }
    }

    /// A source with no events.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[EventRow] {
        &self.rows
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    fn query_instances(&self, window: &InstanceWindow) -> ProviderResult<Vec<EventRow>> {
        Ok(rows_in_window(self.rows.iter().cloned(), window))
    }
}

/// Rows read from a JSON array on disk.
///
/// The file is re-read on every query, so edits show up on the next frame.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes every row in the file.
    pub fn load(&self) -> ProviderResult<Vec<EventRow>> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            ProviderError::from_io(e, format!("failed to read {}", self.path.display()))
                .with_provider(self.name())
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ProviderError::invalid_response(format!("failed to parse {}", self.path.display()))
                .with_provider(self.name())
                .with_source(e)
        })
    }
}

impl EventSource for JsonFileSource {
    fn name(&self) -> &str {
        "json-file"
    }

    fn query_instances(&self, window: &InstanceWindow) -> ProviderResult<Vec<EventRow>> {
        let rows = self.load()?;
        let total = rows.len();
        let rows = rows_in_window(rows, window);
        debug!(path = %self.path.display(), total, matched = rows.len(), "loaded event rows");
        Ok(rows)
    }
}

/// A source that always fails.
///
/// Stands in for a backend that could not be set up, so the face still
/// renders (without arcs) and the failure is reported on every frame.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ProviderError,
}

impl ErrorSource {
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query_instances(&self, _window: &InstanceWindow) -> ProviderResult<Vec<EventRow>> {
        Err(ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name))
    }
}
