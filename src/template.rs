//! Template parsing and binding
//!
//! A template is plain markup with `{{ .FieldName }}` placeholders. Parsing
//! splits the source into literal and placeholder segments and records, for
//! each placeholder, the markup context it sits in: element body text, a
//! quoted attribute value, or the inside of a `<script>` element. Binding
//! substitutes field values escaped for that context; literal text passes
//! through untouched.
//!
//! Parsing is strict. Control actions (`{{ if }}`, `{{ range }}`) are not
//! supported, unclosed placeholders are rejected, and a placeholder inside
//! a tag but outside any quoted attribute value is rejected because it has
//! no deterministic escaping context.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::escape::EscapeContext;
use crate::markup::Markup;
use crate::value::BindValue;

static FIELD_REF_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.([A-Za-z_][A-Za-z0-9_]*)$").expect("invalid field ref regex"));

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed template, ready to bind against any [`BindValue`]
///
/// Parsing and binding are separate steps so a bind failure says nothing
/// about the template asset itself; the same `Template` can bind a
/// different record immediately afterwards.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
    fields: IndexSet<String>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Placeholder {
        field: String,
        context: EscapeContext,
    },
}

impl Template {
    /// Parse template source into literal and placeholder segments
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut fields = IndexSet::new();
        let mut tracker = ContextTracker::new();
        let mut rest = source;

        while let Some(open) = rest.find(OPEN) {
            let literal = &rest[..open];
            let after_open = &rest[open + OPEN.len()..];
            let close = after_open
                .find(CLOSE)
                .ok_or_else(|| Error::parse_static("unclosed placeholder: missing `}}`"))?;
            let field = parse_field_reference(after_open[..close].trim())?;

            tracker.feed(literal);
            let context = tracker.context().ok_or_else(|| {
                Error::parse_owned(format!(
                    "placeholder for field `{field}` sits inside a tag but outside \
                     a quoted attribute value"
                ))
            })?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }
            fields.insert(field.clone());
            segments.push(Segment::Placeholder { field, context });
            rest = &after_open[close + CLOSE.len()..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Template { segments, fields })
    }

    /// Field names referenced by the template, in first-reference order
    pub fn fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(String::as_str)
    }

    /// Bind `data` into the template, producing trusted markup
    ///
    /// Fails with [`Error::Bind`] on the first placeholder whose field
    /// `data` does not expose. The template itself is unaffected by a
    /// failed bind.
    pub fn bind(&self, data: &dyn BindValue) -> Result<Markup> {
        let mut output = String::with_capacity(self.capacity_hint());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder { field, context } => {
                    let value = data.field(field).ok_or_else(|| {
                        Error::bind_owned(format!("template references unknown field `{field}`"))
                    })?;
                    output.push_str(&context.escape(&value));
                }
            }
        }

        Ok(Markup::new(output))
    }

    fn capacity_hint(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.len(),
                Segment::Placeholder { .. } => 16,
            })
            .sum()
    }
}

fn parse_field_reference(body: &str) -> Result<String> {
    if body.is_empty() {
        return Err(Error::parse_static("empty placeholder"));
    }

    if let Some(captures) = FIELD_REF_REGEX.captures(body) {
        return Ok(captures[1].to_string());
    }

    let keyword = body.split_whitespace().next().unwrap_or(body);
    if matches!(
        keyword,
        "if" | "else" | "end" | "range" | "with" | "define" | "template" | "block"
    ) {
        return Err(Error::parse_owned(format!(
            "control action `{keyword}` is not supported; templates are \
             field substitution only"
        )));
    }

    Err(Error::parse_owned(format!(
        "malformed placeholder `{body}`; expected `.FieldName`"
    )))
}

/// Tracks the markup context while scanning literal template text
///
/// A minimal lexer, not an HTML parser: it follows tag opens and closes,
/// quoted attribute values, and `<script>` raw-text content, which is all
/// the placeholder positions the escaping rules distinguish.
struct ContextTracker {
    state: State,
    in_script: bool,
    tag_name: String,
    closing_tag: bool,
    self_closing: bool,
    name_done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Text,
    Tag,
    Attribute(char),
}

impl ContextTracker {
    fn new() -> Self {
        Self {
            state: State::Text,
            in_script: false,
            tag_name: String::new(),
            closing_tag: false,
            self_closing: false,
            name_done: false,
        }
    }

    /// Context in force at the current position, `None` inside a tag but
    /// outside an attribute value
    fn context(&self) -> Option<EscapeContext> {
        match self.state {
            State::Attribute(_) => Some(EscapeContext::Attribute),
            State::Text if self.in_script => Some(EscapeContext::Script),
            State::Text => Some(EscapeContext::Text),
            State::Tag => None,
        }
    }

    fn feed(&mut self, mut text: &str) {
        loop {
            // script content is raw text: nothing matters until "</script"
            if self.in_script && self.state == State::Text {
                match find_ascii_case_insensitive(text, "</script") {
                    Some(pos) => {
                        self.in_script = false;
                        self.state = State::Tag;
                        self.tag_name.clear();
                        self.tag_name.push_str("script");
                        self.closing_tag = true;
                        self.self_closing = false;
                        self.name_done = true;
                        text = &text[pos + "</script".len()..];
                    }
                    None => return,
                }
                continue;
            }

            let mut entered_script_at = None;
            for (i, c) in text.char_indices() {
                self.step(c);
                if self.in_script && self.state == State::Text {
                    entered_script_at = Some(i + c.len_utf8());
                    break;
                }
            }

            match entered_script_at {
                Some(n) => text = &text[n..],
                None => return,
            }
        }
    }

    fn step(&mut self, c: char) {
        match self.state {
            State::Text => {
                if c == '<' {
                    self.state = State::Tag;
                    self.tag_name.clear();
                    self.closing_tag = false;
                    self.self_closing = false;
                    self.name_done = false;
                }
            }
            State::Tag => match c {
                '>' => {
                    if !self.closing_tag
                        && !self.self_closing
                        && self.tag_name.eq_ignore_ascii_case("script")
                    {
                        self.in_script = true;
                    }
                    self.state = State::Text;
                }
                '"' | '\'' => {
                    self.name_done = true;
                    self.self_closing = false;
                    self.state = State::Attribute(c);
                }
                '/' => {
                    if self.tag_name.is_empty() && !self.name_done {
                        self.closing_tag = true;
                    } else {
                        self.name_done = true;
                        self.self_closing = true;
                    }
                }
                c if !self.name_done && (c.is_ascii_alphanumeric() || c == '-') => {
                    self.tag_name.push(c.to_ascii_lowercase());
                }
                _ => {
                    self.name_done = true;
                    self.self_closing = false;
                }
            },
            State::Attribute(quote) => {
                if c == quote {
                    self.state = State::Tag;
                }
            }
        }
    }
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_parse_and_bind_text_context() {
        let template = Template::parse("<span>{{ .Name }}</span>").unwrap();
        let markup = template.bind(&json!({"Name": "Widget"})).unwrap();
        assert_eq!(markup.as_str(), "<span>Widget</span>");
    }

    #[test]
    fn test_text_context_escapes_markup() {
        let template = Template::parse("<span>{{ .Name }}</span>").unwrap();
        let markup = template
            .bind(&json!({"Name": "<b>bold</b> & co"}))
            .unwrap();
        assert_eq!(
            markup.as_str(),
            "<span>&lt;b&gt;bold&lt;/b&gt; &amp; co</span>"
        );
    }

    #[test]
    fn test_attribute_context() {
        let template = Template::parse(r#"<img src="{{ .Image }}" alt="{{ .Name }}">"#).unwrap();
        let markup = template
            .bind(&json!({"Image": "/w.png?a=1&b=2", "Name": "say \"hi\""}))
            .unwrap();
        assert_eq!(
            markup.as_str(),
            r#"<img src="/w.png?a=1&amp;b=2" alt="say &quot;hi&quot;">"#
        );
    }

    #[test]
    fn test_single_quoted_attribute_context() {
        let template = Template::parse("<a href='{{ .URL }}'>x</a>").unwrap();
        let markup = template.bind(&json!({"URL": "it's"})).unwrap();
        assert_eq!(markup.as_str(), "<a href='it&#x27;s'>x</a>");
    }

    #[test]
    fn test_script_context() {
        let source = "<script type=\"application/ld+json\">{\"url\": \"{{ .URL }}\"}</script>";
        let template = Template::parse(source).unwrap();
        let markup = template
            .bind(&json!({"URL": "https://example.com/?q=\"x\"&y=1"}))
            .unwrap();
        assert_eq!(
            markup.as_str(),
            "<script type=\"application/ld+json\">{\"url\": \"https://example.com/?q=\\\"x\\\"\\u0026y=1\"}</script>"
        );
    }

    #[test]
    fn test_context_returns_to_text_after_script() {
        let source = "<script>var x = \"{{ .A }}\";</script><p>{{ .B }}</p>";
        let template = Template::parse(source).unwrap();
        let markup = template.bind(&json!({"A": "<", "B": "<"})).unwrap();
        // script escape inside, text escape outside
        assert_eq!(
            markup.as_str(),
            "<script>var x = \"\\u003c\";</script><p>&lt;</p>"
        );
    }

    #[test]
    fn test_fields_in_first_reference_order() {
        let template =
            Template::parse("{{ .B }} {{ .A }} {{ .B }} {{ .C }}").unwrap();
        let fields: Vec<&str> = template.fields().collect();
        assert_eq!(fields, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_whitespace_in_placeholder_is_flexible() {
        let template = Template::parse("{{.Name}} {{  .Name  }}").unwrap();
        let markup = template.bind(&json!({"Name": "x"})).unwrap();
        assert_eq!(markup.as_str(), "x x");
    }

    #[test]
    fn test_unknown_field_is_bind_error() {
        let template = Template::parse("<span>{{ .Nope }}</span>").unwrap();
        let err = template.bind(&json!({"Name": "x"})).unwrap_err();
        assert!(matches!(err, Error::Bind(_)));
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn test_failed_bind_does_not_poison_template() {
        let template = Template::parse("<span>{{ .Name }}</span>").unwrap();
        assert!(template.bind(&json!({})).is_err());

        let markup = template.bind(&json!({"Name": "recovered"})).unwrap();
        assert_eq!(markup.as_str(), "<span>recovered</span>");
    }

    #[test]
    fn test_unclosed_placeholder_is_parse_error() {
        let err = Template::parse("<span>{{ .Name</span>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("unclosed"));
    }

    #[test]
    fn test_control_action_is_parse_error() {
        let err = Template::parse("{{ if .Name }}x{{ end }}").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("control action"));
    }

    #[test]
    fn test_malformed_placeholder_is_parse_error() {
        let err = Template::parse("{{ Name }}").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = Template::parse("{{ .user.name }}").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let err = Template::parse("{{ }}").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_placeholder_in_tag_without_quotes_is_parse_error() {
        let err = Template::parse("<div {{ .Attrs }}>x</div>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("attribute"));
    }

    #[test]
    fn test_template_without_placeholders() {
        let template = Template::parse("<hr>").unwrap();
        assert_eq!(template.fields().count(), 0);
        let markup = template.bind(&json!({})).unwrap();
        assert_eq!(markup.as_str(), "<hr>");
    }

    #[test]
    fn test_literal_braces_outside_placeholders_pass_through() {
        let template = Template::parse("<p>{ \"x\": 1 }</p>").unwrap();
        let markup = template.bind(&json!({})).unwrap();
        assert_eq!(markup.as_str(), "<p>{ \"x\": 1 }</p>");
    }

    #[test]
    fn test_bound_value_does_not_change_context() {
        // value text resembling markup must not flip the tracker state
        let template =
            Template::parse("<span>{{ .A }}</span><i title=\"{{ .B }}\">y</i>").unwrap();
        let markup = template
            .bind(&json!({"A": "<script>", "B": "end"}))
            .unwrap();
        assert_eq!(
            markup.as_str(),
            "<span>&lt;script&gt;</span><i title=\"end\">y</i>"
        );
    }

    #[test]
    fn test_uppercase_script_tag_detected() {
        let source = "<SCRIPT>{\"a\": \"{{ .A }}\"}</SCRIPT><b>{{ .B }}</b>";
        let template = Template::parse(source).unwrap();
        let markup = template.bind(&json!({"A": "\"", "B": "&"})).unwrap();
        assert_eq!(
            markup.as_str(),
            "<SCRIPT>{\"a\": \"\\\"\"}</SCRIPT><b>&amp;</b>"
        );
    }
}
