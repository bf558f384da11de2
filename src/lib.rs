//! Structured-data ("microdata") fragment rendering for SEO rich results
//!
//! This crate renders machine-readable schema.org annotations - products,
//! sitelinks search boxes, contact points - as trusted HTML for embedding
//! into pages. Templates are plain files on disk using `{{ .FieldName }}`
//! placeholders; a [`MicrodataRenderer`] configured once with the templates
//! directory resolves a template by name, parses it, and binds a typed
//! record into it with context-aware escaping.
//!
//! Failures are loud: a missing template file, broken template syntax, and
//! a reference to a field the record does not have each surface as a typed
//! [`Error`], never as silently empty output.
//!
//! # Examples
//!
//! ```rust,no_run
//! use seo_microdata::{MicrodataRenderer, Product, StructuredData};
//!
//! # fn example() -> seo_microdata::Result<()> {
//! let renderer = MicrodataRenderer::new("app/views/microdata");
//!
//! let product = Product {
//!     name: Some("Widget".into()),
//!     sku: Some("W-1".into()),
//!     price: Some(9.99),
//!     price_currency: Some("USD".into()),
//!     ..Product::default()
//! };
//!
//! let markup = product.render(&renderer)?;
//! // `markup` is already escaped - embed it verbatim
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod escape;
pub mod markup;
pub mod records;
pub mod renderer;
pub mod template;
pub mod value;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{Error, Result};
pub use escape::EscapeContext;
pub use markup::Markup;
pub use records::{ContactPoint, Product, SiteSearch, StructuredData, DEFAULT_QUERY_INPUT};
pub use renderer::{MicrodataRenderer, DEFAULT_EXTENSION};
pub use template::Template;
pub use value::BindValue;
