//! Structured-data record types
//!
//! Three flat value records, one per supported schema type, each paired
//! with a template name through the [`StructuredData`] capability:
//!
//! - [`Product`] - product rich-result data (name, price, rating, ...)
//! - [`SiteSearch`] - a sitelinks search-box action
//! - [`ContactPoint`] - an organization contact point
//!
//! The records hold caller-supplied values as-is: no field is validated,
//! out-of-range values pass through unchanged, and validation is the
//! caller's concern. Every field is optional; unset fields bind as the
//! empty string and the template decides how that renders.

use std::borrow::Cow;
use std::fmt::Display;

use serde::Serialize;

use crate::error::Result;
use crate::markup::Markup;
use crate::renderer::MicrodataRenderer;
use crate::value::BindValue;

/// Fallback query-input specifier, substituted when a [`SiteSearch`]
/// leaves `query_input` unset or empty
pub const DEFAULT_QUERY_INPUT: &str = "required name=keyword";

/// Capability shared by the record types: each knows the name of the
/// template that renders it
///
/// The three records implement the same signature independently; there is
/// deliberately no shared base type, because they share no state or
/// behavior beyond this pairing.
pub trait StructuredData: BindValue {
    /// Name of the template this record binds into
    fn template_name(&self) -> &'static str;

    /// Render this record through `renderer`
    fn render(&self, renderer: &MicrodataRenderer) -> Result<Markup>
    where
        Self: Sized,
    {
        renderer.render(self.template_name(), self)
    }
}

/// Product rich-result data
///
/// Mirrors the fields of a schema.org `Product` with an `Offer` and an
/// `AggregateRating`, as consumed by search-engine rich results. See
/// <https://developers.google.com/search/docs/appearance/structured-data/product>.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Product {
    pub name: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub brand_name: Option<String>,
    pub sku: Option<String>,
    /// Aggregate rating, semantically 0-5; not validated
    pub rating_value: Option<f32>,
    pub review_count: Option<u32>,
    /// ISO 4217 code, e.g. `USD`
    pub price_currency: Option<String>,
    pub price: Option<f64>,
    /// Date string, passed through verbatim
    pub price_valid_until: Option<String>,
    pub seller_name: Option<String>,
}

impl BindValue for Product {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "Name" => text_field(&self.name),
            "Image" => text_field(&self.image),
            "Description" => text_field(&self.description),
            "BrandName" => text_field(&self.brand_name),
            "SKU" => text_field(&self.sku),
            "RatingValue" => display_field(&self.rating_value),
            "ReviewCount" => display_field(&self.review_count),
            "PriceCurrency" => text_field(&self.price_currency),
            "Price" => display_field(&self.price),
            "PriceValidUntil" => text_field(&self.price_valid_until),
            "SellerName" => text_field(&self.seller_name),
            _ => None,
        }
    }
}

impl StructuredData for Product {
    fn template_name(&self) -> &'static str {
        "product"
    }
}

/// Sitelinks search-box action
///
/// `target` is a URL template carrying whatever placeholder token the
/// deployment uses (e.g. `https://example.com/search?q={keyword}`); the
/// token is substituted by the search engine, never by this crate. See
/// <https://developers.google.com/search/docs/appearance/structured-data/sitelinks-searchbox>.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteSearch {
    pub url: Option<String>,
    pub target: Option<String>,
    /// Specifier of the form `required name=<param>`; when unset or
    /// empty, [`DEFAULT_QUERY_INPUT`] is bound instead
    pub query_input: Option<String>,
}

impl SiteSearch {
    /// The query-input specifier the search template binds: the configured
    /// value verbatim when non-empty, otherwise [`DEFAULT_QUERY_INPUT`]
    pub fn formatted_query_input(&self) -> &str {
        match self.query_input.as_deref() {
            Some(q) if !q.is_empty() => q,
            _ => DEFAULT_QUERY_INPUT,
        }
    }
}

impl BindValue for SiteSearch {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "URL" => text_field(&self.url),
            "Target" => text_field(&self.target),
            "QueryInput" => text_field(&self.query_input),
            "FormattedQueryInput" => Some(Cow::Borrowed(self.formatted_query_input())),
            _ => None,
        }
    }
}

impl StructuredData for SiteSearch {
    fn template_name(&self) -> &'static str {
        "search"
    }
}

/// Organization contact point
///
/// See <https://developers.google.com/search/docs/appearance/structured-data/organization>.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactPoint {
    pub url: Option<String>,
    pub telephone: Option<String>,
    /// Free-text category, e.g. `customer service`
    pub contact_type: Option<String>,
}

impl BindValue for ContactPoint {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "URL" => text_field(&self.url),
            "Telephone" => text_field(&self.telephone),
            "ContactType" => text_field(&self.contact_type),
            _ => None,
        }
    }
}

impl StructuredData for ContactPoint {
    fn template_name(&self) -> &'static str {
        "contact"
    }
}

fn text_field(value: &Option<String>) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(value.as_deref().unwrap_or("")))
}

fn display_field<T: Display>(value: &Option<T>) -> Option<Cow<'static, str>> {
    match value {
        Some(v) => Some(Cow::Owned(v.to_string())),
        None => Some(Cow::Borrowed("")),
    }
}
