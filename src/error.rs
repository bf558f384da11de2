//! Error handling for seo-microdata
//!
//! Every fallible operation in this crate returns [`Result<T>`] with a typed
//! [`Error`]. The variants mirror the three ways a render can fail:
//!
//! - [`Error::Configuration`] - the template file is missing or unreadable
//! - [`Error::Parse`] - the template source is malformed
//! - [`Error::Bind`] - the template references a field the bound record
//!   does not expose
//!
//! Configuration and parse failures indicate a broken deployment (a missing
//! or invalid template asset) and affect every render that touches that
//! template. Bind failures are fatal only to the call that produced them;
//! rendering a different record afterwards is unaffected.
//!
//! # Memory Efficiency
//!
//! Parse and bind messages use `Cow<'static, str>` so static messages
//! allocate nothing, while dynamic messages can still carry runtime context.

use std::borrow::Cow;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for template resolution, parsing, and binding
///
/// # Examples
///
/// ```rust,ignore
/// use seo_microdata::{Error, MicrodataRenderer};
///
/// let renderer = MicrodataRenderer::new("/srv/views/microdata");
/// match renderer.render("product", &data) {
///     Err(Error::Configuration { path, .. }) => {
///         eprintln!("missing template asset: {}", path.display());
///     }
///     Err(err) => eprintln!("render failed: {err}"),
///     Ok(markup) => page.push_str(markup.as_str()),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Template file missing or unreadable
    ///
    /// Carries the resolved path and the underlying I/O error. Retrying
    /// without fixing the deployment changes nothing, so callers should
    /// treat this as fatal for the affected template.
    #[error("configuration error: cannot read template {}: {source}", path.display())]
    Configuration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template source is not valid field-substitution syntax
    #[error("parse error: {0}")]
    Parse(Cow<'static, str>),

    /// Template references a field the bound record does not expose
    #[error("bind error: {0}")]
    Bind(Cow<'static, str>),
}

impl Error {
    /// Create a parse error with a static message
    ///
    /// Use this for compile-time known messages to avoid allocations.
    pub fn parse_static(msg: &'static str) -> Self {
        Error::Parse(Cow::Borrowed(msg))
    }

    /// Create a parse error with a message built at runtime
    pub fn parse_owned(msg: String) -> Self {
        Error::Parse(Cow::Owned(msg))
    }

    /// Create a bind error with a static message
    ///
    /// Use this for compile-time known messages to avoid allocations.
    pub fn bind_static(msg: &'static str) -> Self {
        Error::Bind(Cow::Borrowed(msg))
    }

    /// Create a bind error with a message built at runtime
    pub fn bind_owned(msg: String) -> Self {
        Error::Bind(Cow::Owned(msg))
    }

    /// True for failures caused by a broken template asset (missing file or
    /// invalid syntax) as opposed to a record that does not match the
    /// template's field references.
    pub fn is_template_defect(&self) -> bool {
        matches!(self, Error::Configuration { .. } | Error::Parse(_))
    }
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::parse_static("unclosed placeholder");
        assert_eq!(err.to_string(), "parse error: unclosed placeholder");

        let err = Error::bind_owned("unknown field `Nope`".to_string());
        assert_eq!(err.to_string(), "bind error: unknown field `Nope`");
    }

    #[test]
    fn test_configuration_preserves_path_and_cause() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = Error::Configuration {
            path: PathBuf::from("/srv/views/microdata/product.tmpl"),
            source: io_err,
        };

        assert!(err.to_string().contains("product.tmpl"));
        assert!(err.to_string().contains("no such file"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_template_defect() {
        let config = Error::Configuration {
            path: PathBuf::from("x.tmpl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(config.is_template_defect());
        assert!(Error::parse_static("bad syntax").is_template_defect());
        assert!(!Error::bind_static("missing field").is_template_defect());
    }
}
