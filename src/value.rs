//! Binding context for template rendering
//!
//! This module defines the [`BindValue`] trait: the data-side interface of
//! the renderer. A binding context is a flat, read-only view of named
//! fields as display strings. The record types in [`crate::records`]
//! implement it, and an implementation for `serde_json::Value` lets ad-hoc
//! JSON drive a template in tests and host applications.
//!
//! # Field Semantics
//!
//! [`field`] distinguishes two kinds of absence:
//!
//! - `Some("")` - the type has the field, but no value is set; the template
//!   renders it as the empty string
//! - `None` - the type exposes no field with that name; a template
//!   referencing it fails to bind
//!
//! [`field`]: BindValue::field

use std::borrow::Cow;

use serde_json::Value as JsonValue;

/// Trait for data that can be bound into a template
///
/// # Examples
///
/// ```rust,ignore
/// use seo_microdata::BindValue;
/// use std::borrow::Cow;
///
/// struct Breadcrumb {
///     label: String,
/// }
///
/// impl BindValue for Breadcrumb {
///     fn field(&self, name: &str) -> Option<Cow<'_, str>> {
///         match name {
///             "Label" => Some(Cow::Borrowed(&self.label)),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait BindValue {
    /// Look up a field by name
    ///
    /// Returns the field's display value, `Cow::Borrowed` where the value
    /// is stored as a string and `Cow::Owned` for computed or numeric
    /// fields. Returns `None` when the type has no field with that name.
    fn field(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl BindValue for JsonValue {
    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match self {
            JsonValue::Object(map) => match map.get(name)? {
                JsonValue::String(s) => Some(Cow::Borrowed(s.as_str())),
                JsonValue::Number(n) => Some(Cow::Owned(n.to_string())),
                JsonValue::Bool(b) => Some(Cow::Owned(b.to_string())),
                JsonValue::Null => Some(Cow::Borrowed("")),
                // arrays and objects have no single display value
                _ => None,
            },
            _ => None,
        }
    }
}
