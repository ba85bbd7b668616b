use crate::error::{Error, Result};

/// The marker that opens a reasoning span.
pub const DEFAULT_OPEN: &str = "<think>";

/// The marker that closes a reasoning span.
pub const DEFAULT_CLOSE: &str = "</think>";

/// Text inserted between two consecutive reasoning spans.
pub const DEFAULT_SEPARATOR: &str = "\n";

/// The literal marker pair that delimits reasoning spans.
///
/// Markers are matched as plain, case-sensitive text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    open: String,
    close: String,
    separator: String,
}

impl Delimiters {
    /// Create a new marker pair, using the [`DEFAULT_SEPARATOR`] between
    /// reasoning spans.
    ///
    /// Both markers must be non-empty, and they must differ from each other.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() || close.is_empty() {
            return Err(Error::EmptyMarker);
        }

        if open == close {
            return Err(Error::IdenticalMarkers(open));
        }

        Ok(Self {
            open,
            close,
            separator: DEFAULT_SEPARATOR.to_owned(),
        })
    }

    /// Set the text that is inserted between two reasoning spans.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use]
    pub fn open(&self) -> &str {
        &self.open
    }

    #[must_use]
    pub fn close(&self) -> &str {
        &self.close
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: DEFAULT_OPEN.to_owned(),
            close: DEFAULT_CLOSE.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
        }
    }
}
