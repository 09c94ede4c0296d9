//! Type codec registry.
//!
//! Each [`TypeTag`] maps to one codec through a fixed lookup. `render` is
//! total: a value that does not match the codec's kind falls back to its own
//! textual form. `parse` validates operator-entered text.

use crate::{ParseError, TypeTag, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Render/parse pair for one semantic type.
pub trait Codec: Send + Sync {
    /// Display text for a value. Never fails.
    fn render(&self, value: &Value) -> String;

    /// Convert non-blank text into a typed value.
    fn parse(&self, text: &str) -> Result<Value, ParseError>;
}

pub struct StringCodec;
pub struct IntegerCodec;
pub struct FloatCodec;
pub struct BooleanCodec;
pub struct TimestampCodec;
pub struct IdentifierCodec;

static STRING: StringCodec = StringCodec;
static INTEGER: IntegerCodec = IntegerCodec;
static FLOAT: FloatCodec = FloatCodec;
static BOOLEAN: BooleanCodec = BooleanCodec;
static TIMESTAMP: TimestampCodec = TimestampCodec;
static IDENTIFIER: IdentifierCodec = IdentifierCodec;

/// Codec registered for `tag`, if any.
pub fn codec_for(tag: &TypeTag) -> Option<&'static dyn Codec> {
    match tag {
        TypeTag::String => Some(&STRING),
        TypeTag::Integer => Some(&INTEGER),
        TypeTag::Float => Some(&FLOAT),
        TypeTag::Boolean => Some(&BOOLEAN),
        TypeTag::Timestamp => Some(&TIMESTAMP),
        TypeTag::Identifier => Some(&IDENTIFIER),
        TypeTag::Other(_) => None,
    }
}

/// Whether the registry can render and parse `tag`.
pub fn is_supported(tag: &TypeTag) -> bool {
    codec_for(tag).is_some()
}

/// Display text for `value` under `tag`. `Null` renders empty.
pub fn render(tag: &TypeTag, value: &Value) -> String {
    if value.is_null() {
        return String::new();
    }
    match codec_for(tag) {
        Some(codec) => codec.render(value),
        None => value.to_string(),
    }
}

/// Parse operator text for a field of type `tag`.
///
/// Blank text is `Null` for nullable fields and [`ParseError::Required`]
/// otherwise. For strings only empty text is blank; whitespace is kept.
pub fn parse(tag: &TypeTag, text: &str, nullable: bool) -> Result<Value, ParseError> {
    let codec = codec_for(tag).ok_or_else(|| ParseError::Unsupported {
        type_name: tag.name().to_string(),
    })?;
    let blank = match tag {
        TypeTag::String => text.is_empty(),
        _ => text.trim().is_empty(),
    };
    if blank {
        return if nullable {
            Ok(Value::Null)
        } else {
            Err(ParseError::Required)
        };
    }
    codec.parse(text)
}

impl Codec for StringCodec {
    fn render(&self, value: &Value) -> String {
        value.to_string()
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        Ok(Value::String(text.to_string()))
    }
}

impl Codec for IntegerCodec {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Integer(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        text.trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| ParseError::InvalidInteger {
                text: text.to_string(),
                reason: e.to_string(),
            })
    }
}

impl Codec for FloatCodec {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Float(x) => x.to_string(),
            Value::Integer(n) => n.to_string(),
            other => other.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        match text.trim().parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Value::Float(x)),
            _ => Err(ParseError::InvalidFloat {
                text: text.to_string(),
            }),
        }
    }
}

impl Codec for BooleanCodec {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Boolean(true) => "true".to_string(),
            Value::Boolean(false) => "false".to_string(),
            other => other.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "on" => Ok(Value::Boolean(true)),
            "false" | "no" | "n" | "0" | "off" => Ok(Value::Boolean(false)),
            _ => Err(ParseError::InvalidBoolean {
                text: text.to_string(),
            }),
        }
    }
}

impl Codec for TimestampCodec {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            other => other.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        let trimmed = text.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Value::Timestamp(ts.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(Value::Timestamp(naive.and_utc()));
        }
        if let Some(naive) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
        {
            return Ok(Value::Timestamp(naive.and_utc()));
        }
        Err(ParseError::InvalidTimestamp {
            text: text.to_string(),
        })
    }
}

impl Codec for IdentifierCodec {
    fn render(&self, value: &Value) -> String {
        match value {
            Value::Identifier(id) => id.hyphenated().to_string(),
            other => other.to_string(),
        }
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        Uuid::parse_str(text.trim())
            .map(Value::Identifier)
            .map_err(|e| ParseError::InvalidIdentifier {
                text: text.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_every_builtin_tag_has_codec() {
        for tag in [
            TypeTag::String,
            TypeTag::Integer,
            TypeTag::Float,
            TypeTag::Boolean,
            TypeTag::Timestamp,
            TypeTag::Identifier,
        ] {
            assert!(is_supported(&tag), "{} should be supported", tag);
        }
        assert!(!is_supported(&TypeTag::Other("map".into())));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse(&TypeTag::Integer, "12", false), Ok(Value::Integer(12)));
        assert_eq!(parse(&TypeTag::Integer, " -3 ", false), Ok(Value::Integer(-3)));
        assert!(matches!(
            parse(&TypeTag::Integer, "abc", false),
            Err(ParseError::InvalidInteger { .. })
        ));
        assert!(matches!(
            parse(&TypeTag::Integer, "1.5", false),
            Err(ParseError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_blank_text_required_unless_nullable() {
        assert_eq!(parse(&TypeTag::Integer, "  ", false), Err(ParseError::Required));
        assert_eq!(parse(&TypeTag::Integer, "", true), Ok(Value::Null));
        assert_eq!(parse(&TypeTag::String, "", false), Err(ParseError::Required));
        assert_eq!(parse(&TypeTag::String, "", true), Ok(Value::Null));
    }

    #[test]
    fn test_parse_string_keeps_whitespace() {
        assert_eq!(
            parse(&TypeTag::String, " bolt ", false),
            Ok(Value::String(" bolt ".to_string()))
        );
    }

    #[test]
    fn test_whitespace_only_string_roundtrips() {
        let value = Value::String("  ".to_string());
        let text = render(&TypeTag::String, &value);
        assert_eq!(parse(&TypeTag::String, &text, false), Ok(value.clone()));
        assert_eq!(parse(&TypeTag::String, &text, true), Ok(value));
        assert_eq!(parse(&TypeTag::String, "\t", true), Ok(Value::String("\t".to_string())));
    }

    #[test]
    fn test_parse_boolean_aliases() {
        for text in ["true", "YES", "y", "1", "On"] {
            assert_eq!(parse(&TypeTag::Boolean, text, false), Ok(Value::Boolean(true)));
        }
        for text in ["false", "No", "n", "0", "off"] {
            assert_eq!(parse(&TypeTag::Boolean, text, false), Ok(Value::Boolean(false)));
        }
        assert!(parse(&TypeTag::Boolean, "maybe", false).is_err());
    }

    #[test]
    fn test_parse_float_rejects_non_finite() {
        assert_eq!(parse(&TypeTag::Float, "2.5", false), Ok(Value::Float(2.5)));
        assert!(parse(&TypeTag::Float, "NaN", false).is_err());
        assert!(parse(&TypeTag::Float, "inf", false).is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(
            parse(&TypeTag::Timestamp, "2024-03-09T14:05:00Z", false),
            Ok(Value::Timestamp(expected))
        );
        assert_eq!(
            parse(&TypeTag::Timestamp, "2024-03-09T16:05:00+02:00", false),
            Ok(Value::Timestamp(expected))
        );
        assert_eq!(
            parse(&TypeTag::Timestamp, "2024-03-09 14:05:00", false),
            Ok(Value::Timestamp(expected))
        );
        assert_eq!(
            parse(&TypeTag::Timestamp, "2024-03-09", false),
            Ok(Value::Timestamp(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap()))
        );
        assert!(matches!(
            parse(&TypeTag::Timestamp, "yesterday", false),
            Err(ParseError::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_parse_identifier() {
        let id = Uuid::now_v7();
        assert_eq!(
            parse(&TypeTag::Identifier, &id.to_string(), false),
            Ok(Value::Identifier(id))
        );
        assert!(matches!(
            parse(&TypeTag::Identifier, "7", false),
            Err(ParseError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_parse_unsupported_tag() {
        assert_eq!(
            parse(&TypeTag::Other("blob".into()), "x", false),
            Err(ParseError::Unsupported {
                type_name: "blob".to_string()
            })
        );
    }

    #[test]
    fn test_render_is_total_on_mismatched_values() {
        assert_eq!(render(&TypeTag::Integer, &Value::String("n/a".into())), "n/a");
        assert_eq!(render(&TypeTag::Boolean, &Value::Integer(1)), "1");
        assert_eq!(render(&TypeTag::Other("blob".into()), &Value::Integer(4)), "4");
        assert_eq!(render(&TypeTag::Timestamp, &Value::Null), "");
    }

    #[test]
    fn test_render_integer_is_decimal() {
        assert_eq!(render(&TypeTag::Integer, &Value::Integer(12)), "12");
        assert_eq!(render(&TypeTag::Float, &Value::Float(0.1)), "0.1");
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn arb_timestamp() -> impl Strategy<Value = Value> {
        // 1970..2200, with sub-second precision.
        (0i64..7_258_118_400, 0u32..1_000_000_000).prop_map(|(secs, nanos)| {
            Value::Timestamp(Utc.timestamp_opt(secs, nanos).unwrap())
        })
    }

    /// Representative (tag, value) pairs for every supported tag.
    fn arb_tagged_value() -> impl Strategy<Value = (TypeTag, Value)> {
        prop_oneof![
            "[\\PC]{1,40}".prop_map(|s| (TypeTag::String, Value::String(s))),
            any::<i64>().prop_map(|n| (TypeTag::Integer, Value::Integer(n))),
            (-1.0e12f64..1.0e12f64).prop_map(|x| (TypeTag::Float, Value::Float(x))),
            any::<bool>().prop_map(|b| (TypeTag::Boolean, Value::Boolean(b))),
            arb_timestamp().prop_map(|v| (TypeTag::Timestamp, v)),
            any::<[u8; 16]>()
                .prop_map(|bytes| (TypeTag::Identifier, Value::Identifier(Uuid::from_bytes(bytes)))),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        /// Property: parse(tag, render(tag, v)) == v
        #[test]
        fn prop_render_parse_roundtrip((tag, value) in arb_tagged_value()) {
            let text = render(&tag, &value);
            prop_assert_eq!(parse(&tag, &text, false), Ok(value));
        }

        /// Property: Null round-trips through any nullable field
        #[test]
        fn prop_null_roundtrip_nullable((tag, _value) in arb_tagged_value()) {
            let text = render(&tag, &Value::Null);
            prop_assert_eq!(parse(&tag, &text, true), Ok(Value::Null));
        }

        /// Property: render never panics, whatever the value variant
        #[test]
        fn prop_render_total((tag, _v) in arb_tagged_value(), (_t, value) in arb_tagged_value()) {
            let _ = render(&tag, &value);
        }

        /// Property: non-numeric text never parses as an integer
        #[test]
        fn prop_alpha_text_rejected_for_integer(text in "[a-zA-Z]{1,10}") {
            prop_assert!(parse(&TypeTag::Integer, &text, false).is_err());
        }
    }
}
