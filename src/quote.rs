//! The quote record and the body accepted when creating one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored quote. Serialized with the field names the HTTP API exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "AttributedTo")]
    pub attributed_to: String,
    #[serde(rename = "Text")]
    pub text: String,
}

impl Quote {
    /// Creates a quote under a freshly generated identifier.
    ///
    /// Identifiers are UUIDv7: the leading 48 bits are a millisecond Unix
    /// timestamp, so ids sort in creation order.
    pub fn new(attributed_to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            attributed_to: attributed_to.into(),
            text: text.into(),
        }
    }

    /// Path the quote is served from.
    pub fn location(&self) -> String {
        format!("/quotes/{}", self.id)
    }
}

/// Body of `PUT /quotes`.
///
/// Both fields are optional at the parsing stage so that a missing field is
/// reported as a validation failure rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewQuote {
    #[serde(rename = "AttributedTo", default)]
    pub attributed_to: Option<String>,
    #[serde(rename = "Text", default)]
    pub text: Option<String>,
}

impl NewQuote {
    pub fn new(attributed_to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            attributed_to: Some(attributed_to.into()),
            text: Some(text.into()),
        }
    }

    /// Parses a request body.
    ///
    /// Only a JSON object can carry the fields. A blank body, an array, a
    /// string or a number parses to an empty `NewQuote`, which then fails
    /// validation. serde's derived impl would otherwise fill the fields
    /// from an array by position.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            _ => Ok(Self::default()),
        }
    }

    /// Returns `(attributed_to, text)` when both are present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        fn present(f: &Option<String>) -> Option<&str> {
            f.as_deref().filter(|s| !s.is_empty())
        }
        Some((present(&self.attributed_to)?, present(&self.text)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_api_field_names() {
        let quote = Quote {
            id: "abc".into(),
            attributed_to: "Yoda".into(),
            text: "Do or do not.".into(),
        };
        assert_eq!(
            serde_json::to_value(&quote).unwrap(),
            serde_json::json!({ "ID": "abc", "AttributedTo": "Yoda", "Text": "Do or do not." })
        );
    }

    #[test]
    fn ids_are_unique_v7_uuids() {
        let first = Quote::new("a", "b");
        let second = Quote::new("a", "b");
        assert_ne!(first.id, second.id);
        assert_eq!(Uuid::parse_str(&first.id).unwrap().get_version_num(), 7);
    }

    #[test]
    fn missing_null_and_empty_fields_are_absent() {
        let parse = |v: serde_json::Value| serde_json::from_value::<NewQuote>(v).unwrap();

        assert!(parse(serde_json::json!({ "Text": "t" })).fields().is_none());
        assert!(parse(serde_json::json!({ "AttributedTo": null, "Text": "t" })).fields().is_none());
        assert!(parse(serde_json::json!({ "AttributedTo": "a", "Text": "" })).fields().is_none());
        assert_eq!(
            parse(serde_json::json!({ "AttributedTo": "a", "Text": "t", "Extra": 1 })).fields(),
            Some(("a", "t"))
        );
    }

    #[test]
    fn only_object_bodies_carry_fields() {
        let bodies: [&[u8]; 5] = [br#"["Yoda","Do or do not."]"#, br#""Yoda""#, b"42", b"null", b"  "];
        for body in bodies {
            let parsed = NewQuote::from_body(body).unwrap();
            assert!(parsed.fields().is_none(), "{}", String::from_utf8_lossy(body));
        }

        let parsed = NewQuote::from_body(br#"{"AttributedTo":"Yoda","Text":"Do or do not."}"#).unwrap();
        assert_eq!(parsed.fields(), Some(("Yoda", "Do or do not.")));
    }

    #[test]
    fn unparseable_body_is_an_error() {
        assert!(NewQuote::from_body(b"{\"Text\":").is_err());
        assert!(NewQuote::from_body(br#"{"Text": 5}"#).is_err());
    }
}
