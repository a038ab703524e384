//! Error types for template lookup, parsing and rendering.
//!
//! [`RenderError`] keeps the engine's own message as its display text. Parse
//! failures and execution failures are separate variants so callers can tell a
//! broken template apart from bad data.

use std::io;

/// Error type for all [`Renderer`](crate::Renderer) operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A file pattern could not be compiled.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A file pattern matched nothing in the template source.
    #[error("pattern matches no files: `{0}`")]
    NoMatch(String),

    /// The template source failed to list or read a file.
    #[error("{path}: {source}")]
    Source {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A matched file contains syntax the engine cannot compile.
    #[error("{0}")]
    Parse(#[source] minijinja::Error),

    /// The template failed while being evaluated against data.
    #[error("{0}")]
    Execute(#[source] minijinja::Error),
}

impl RenderError {
    pub(crate) fn source_io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Source {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the template could not be loaded or compiled.
    ///
    /// Such failures are never cached; the next render retries the parse.
    pub fn is_parse(&self) -> bool {
        !matches!(self, RenderError::Execute(_))
    }

    /// Returns the underlying engine error, if there is one.
    pub fn engine_error(&self) -> Option<&minijinja::Error> {
        match self {
            RenderError::Parse(err) | RenderError::Execute(err) => Some(err),
            _ => None,
        }
    }
}
