//! Layer name grammar.
//!
//! A layer name is up to three optional clauses, in this order and with
//! nothing between them:
//!
//! ```text
//! <tag>identifier[key="value", key="value"]
//! ```
//!
//! - `<tag>`: ASCII letters in angle brackets, `div` when absent. `<>` gives
//!   an empty tag, which marks an element that is never written out.
//! - `identifier`: ASCII letters, `-` and `_`; becomes the element id.
//! - `[...]`: comma-separated `key="value"` pairs. Values are taken verbatim
//!   from between the quotes and may contain `=` and `,`.

use std::collections::BTreeMap;

use crate::error::{Result, StrataError};

/// Tag used when a layer name has no `<tag>` clause.
pub const DEFAULT_TAG: &str = "div";

/// The pieces of a layer name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLayerName {
    pub tag: String,
    pub id: String,
    /// Raw attribute entries, keyed by their full `namespace:key` text.
    pub attributes: BTreeMap<String, String>,
}

impl ParsedLayerName {
    /// The result used for a name that failed to parse: no tag, no id, no
    /// attributes.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Parse a layer display name.
pub fn parse_layer_name(name: &str) -> Result<ParsedLayerName> {
    let mut cursor = Cursor::new(name);

    let tag = if cursor.eat('<') {
        let tag = cursor.take_while(|c| c.is_ascii_alphabetic());
        if !cursor.eat('>') {
            return Err(cursor.error("expected '>' to close the tag name"));
        }
        tag.to_string()
    } else {
        DEFAULT_TAG.to_string()
    };

    let id = cursor
        .take_while(|c| c.is_ascii_alphabetic() || c == '-' || c == '_')
        .to_string();

    let attributes = if cursor.eat('[') {
        parse_attributes(&mut cursor)?
    } else {
        BTreeMap::new()
    };

    if !cursor.at_end() {
        return Err(cursor.error("unexpected character"));
    }

    Ok(ParsedLayerName {
        tag,
        id,
        attributes,
    })
}

/// Parse `key="value", ...]` after the opening bracket.
fn parse_attributes(cursor: &mut Cursor<'_>) -> Result<BTreeMap<String, String>> {
    let mut attributes = BTreeMap::new();

    cursor.skip_whitespace();
    if cursor.eat(']') {
        return Ok(attributes);
    }

    loop {
        cursor.skip_whitespace();
        let key = cursor
            .take_while(|c| !matches!(c, '=' | ',' | ']' | '"'))
            .trim()
            .to_string();
        if key.is_empty() {
            return Err(cursor.error("expected an attribute key"));
        }
        if !cursor.eat('=') {
            return Err(cursor.error("expected '=' after attribute key"));
        }

        cursor.skip_whitespace();
        if !cursor.eat('"') {
            return Err(cursor.error("attribute values must be double-quoted"));
        }
        let value = cursor.take_while(|c| c != '"').to_string();
        if !cursor.eat('"') {
            return Err(cursor.error("unterminated attribute value"));
        }
        attributes.insert(key, value);

        cursor.skip_whitespace();
        if cursor.eat(']') {
            return Ok(attributes);
        }
        if !cursor.eat(',') {
            return Err(cursor.error("expected ',' or ']' after attribute value"));
        }
    }
}

/// Character cursor over a layer name.
struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn error(&self, message: &str) -> StrataError {
        StrataError::Parse {
            message: format!(
                "couldn't parse layer name '{}' at offset {}: {}",
                self.source, self.pos, message
            ),
            help: Some(
                "Layer names look like <tag>identifier[namespace:key=\"value\"]".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_full_name() {
        let parsed = parse_layer_name("<section>hero[attr:class=\"wide\"]").unwrap();
        assert_eq!(parsed.tag, "section");
        assert_eq!(parsed.id, "hero");
        assert_eq!(parsed.attributes, attrs(&[("attr:class", "wide")]));
    }

    #[test]
    fn test_defaults() {
        let parsed = parse_layer_name("").unwrap();
        assert_eq!(parsed.tag, "div");
        assert_eq!(parsed.id, "");
        assert!(parsed.attributes.is_empty());
    }

    #[test]
    fn test_tag_only() {
        let parsed = parse_layer_name("<body>").unwrap();
        assert_eq!(parsed.tag, "body");
        assert_eq!(parsed.id, "");
    }

    #[test]
    fn test_identifier_with_hyphen_and_underscore() {
        let parsed = parse_layer_name("main-nav_left").unwrap();
        assert_eq!(parsed.tag, "div");
        assert_eq!(parsed.id, "main-nav_left");
    }

    #[test]
    fn test_empty_tag_marker() {
        let parsed = parse_layer_name("<>wrapper").unwrap();
        assert_eq!(parsed.tag, "");
        assert_eq!(parsed.id, "wrapper");
    }

    #[test]
    fn test_multiple_attributes() {
        let parsed =
            parse_layer_name("box[attr:class=\"hero\", css:color=\"red\",attr:title=\"x\"]")
                .unwrap();
        assert_eq!(
            parsed.attributes,
            attrs(&[
                ("attr:class", "hero"),
                ("css:color", "red"),
                ("attr:title", "x")
            ])
        );
    }

    #[test]
    fn test_value_with_equals_and_comma() {
        let parsed = parse_layer_name("[attr:href=\"/search?q=a,b\"]").unwrap();
        assert_eq!(parsed.attributes, attrs(&[("attr:href", "/search?q=a,b")]));
    }

    #[test]
    fn test_empty_attribute_clause() {
        let parsed = parse_layer_name("box[]").unwrap();
        assert!(parsed.attributes.is_empty());
    }

    #[test]
    fn test_malformed_names() {
        for name in [
            "???",
            "<body",
            "box[attr:class=hero]",
            "box[attr:class=\"hero\"",
            "box[=\"x\"]",
            "box[attr:class=\"a\" attr:id=\"b\"]",
            "box[attr:class=\"a\"]trailing",
            "<h1>title",
        ] {
            assert!(parse_layer_name(name).is_err(), "expected failure for {name:?}");
        }
    }

    #[test]
    fn test_error_mentions_name() {
        let err = parse_layer_name("???").unwrap_err();
        assert!(err.to_string().contains("???"));
        assert!(err.to_string().contains("offset 0"));
    }
}
