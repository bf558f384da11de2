//! File-based template resolution and rendering
//!
//! [`MicrodataRenderer`] is the single entry point: configured once with
//! the directory holding the template files, it resolves
//! `<dir>/<name>.<extension>`, reads and parses the file, and binds the
//! supplied data into it. Every call re-reads and re-parses the file, so
//! on-disk template edits are picked up immediately; the per-call cost is
//! one read and parse of a file that is typically a few hundred bytes.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::markup::Markup;
use crate::template::Template;
use crate::value::BindValue;

/// Default template file extension
pub const DEFAULT_EXTENSION: &str = "tmpl";

/// Renders named templates from a configured directory
///
/// The templates directory is injected at construction and held for the
/// renderer's lifetime; nothing is read from the process environment. The
/// renderer keeps no mutable state, so one instance can serve concurrent
/// renders from multiple threads.
///
/// # Examples
///
/// ```rust,no_run
/// use seo_microdata::{ContactPoint, MicrodataRenderer, StructuredData};
///
/// # fn example() -> seo_microdata::Result<()> {
/// let renderer = MicrodataRenderer::new("app/views/microdata");
///
/// let contact = ContactPoint {
///     url: Some("https://example.com".into()),
///     telephone: Some("+1-555-0100".into()),
///     contact_type: Some("customer service".into()),
/// };
///
/// let markup = contact.render(&renderer)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MicrodataRenderer {
    templates_dir: PathBuf,
    extension: String,
}

impl MicrodataRenderer {
    /// Create a renderer reading templates from `templates_dir`, with the
    /// default `tmpl` file extension
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use a different template file extension (without the leading dot)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The configured templates directory
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Resolve the on-disk path for a template name
    ///
    /// A pure path join: no search across candidate roots, no existence
    /// check.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir
            .join(format!("{}.{}", name, self.extension))
    }

    /// Render the named template with `data`
    ///
    /// Fails with [`Error::Configuration`] when the template file cannot
    /// be read, [`Error::Parse`] when its syntax is invalid, and
    /// [`Error::Bind`] when it references a field `data` does not expose.
    /// A failure never degrades to empty output.
    pub fn render(&self, name: &str, data: &dyn BindValue) -> Result<Markup> {
        let path = self.template_path(name);
        let source = fs::read_to_string(&path).map_err(|source| Error::Configuration {
            path: path.clone(),
            source,
        })?;
        Template::parse(&source)?.bind(data)
    }
}
