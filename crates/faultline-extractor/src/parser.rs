//! Parse completion output into extraction structures
//!
//! Completion text is sanitized first, then parsed strictly. If the strict
//! parse fails, the outermost `{...}` or `[...]` slice is tried before giving
//! up. Callers receive a [`ParseOutcome`] and never an error.

use faultline_domain::{EntityCategory, EntityMap, RelationTriple, RelationType};
use serde_json::{Map, Value};
use tracing::debug;

/// Result of parsing a completion payload
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// The payload had the expected shape
    Parsed(T),

    /// The payload could not be parsed; carries the reason
    Failed(String),
}

impl<T> ParseOutcome<T> {
    /// Whether parsing succeeded
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    /// Transform the parsed value
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseOutcome<U> {
        match self {
            ParseOutcome::Parsed(value) => ParseOutcome::Parsed(f(value)),
            ParseOutcome::Failed(reason) => ParseOutcome::Failed(reason),
        }
    }

    /// The parsed value, or `T::default()` on failure
    pub fn or_default(self) -> T
    where
        T: Default,
    {
        match self {
            ParseOutcome::Parsed(value) => value,
            ParseOutcome::Failed(_) => T::default(),
        }
    }
}

/// Strip a surrounding code fence, and its optional language tag, from `raw`
///
/// Input without both an opening and a closing fence is only trimmed.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() < 6 || !trimmed.starts_with("```") || !trimmed.ends_with("```") {
        return trimmed.to_string();
    }

    let inner = &trimmed[3..trimmed.len() - 3];
    let body = match inner.split_once('\n') {
        Some((first, rest)) if first.trim().chars().all(is_tag_char) => rest,
        Some(_) => inner,
        None => {
            let after_tag = inner.trim_start_matches(is_tag_char);
            if after_tag.starts_with(|c| c == '{' || c == '[') {
                after_tag
            } else {
                inner
            }
        }
    };

    body.trim().to_string()
}

fn is_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')
}

#[derive(Debug, Clone, Copy)]
enum Shape {
    Object,
    Array,
}

impl Shape {
    fn delimiters(self) -> (char, char) {
        match self {
            Shape::Object => ('{', '}'),
            Shape::Array => ('[', ']'),
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            Shape::Object => value.is_object(),
            Shape::Array => value.is_array(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Shape::Object => "JSON object",
            Shape::Array => "JSON array",
        }
    }
}

fn parse_shape(raw: &str, shape: Shape) -> ParseOutcome<Value> {
    let text = sanitize(raw);
    if text.is_empty() {
        return ParseOutcome::Failed("empty response".to_string());
    }

    let strict_error = match serde_json::from_str::<Value>(&text) {
        Ok(value) if shape.matches(&value) => return ParseOutcome::Parsed(value),
        Ok(_) => format!("expected {}", shape.name()),
        Err(e) => e.to_string(),
    };

    let (open, close) = shape.delimiters();
    if let (Some(start), Some(end)) = (text.find(open), text.rfind(close)) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&text[start..=end]) {
                if shape.matches(&value) {
                    debug!("Recovered {} from surrounding text", shape.name());
                    return ParseOutcome::Parsed(value);
                }
            }
        }
    }

    ParseOutcome::Failed(strict_error)
}

/// Parse an entity-extraction payload
///
/// Keys are matched against [`EntityCategory`] labels; unknown keys are
/// dropped. A bare string value counts as a one-element list. Blank names
/// are dropped.
pub fn parse_entity_map(raw: &str) -> ParseOutcome<EntityMap> {
    parse_shape(raw, Shape::Object).map(|value| match value {
        Value::Object(object) => entity_map_from_object(object),
        _ => EntityMap::new(),
    })
}

fn entity_map_from_object(object: Map<String, Value>) -> EntityMap {
    let mut entities = EntityMap::new();

    for (key, value) in object {
        let Some(category) = EntityCategory::parse(&key) else {
            debug!("Dropping unknown entity category '{}'", key);
            continue;
        };

        let names = match value {
            Value::Array(items) => items.iter().filter_map(non_blank).collect(),
            other => non_blank(&other).into_iter().collect(),
        };
        entities.insert(category, names);
    }

    entities
}

/// Parse a relation-extraction payload
///
/// Non-object items are dropped. Missing fields become empty strings and an
/// unrecognized relation type becomes `None`, leaving the triple incomplete.
pub fn parse_relations(raw: &str) -> ParseOutcome<Vec<RelationTriple>> {
    parse_shape(raw, Shape::Array).map(|value| match value {
        Value::Array(items) => items.iter().filter_map(relation_from_value).collect(),
        _ => Vec::new(),
    })
}

fn relation_from_value(value: &Value) -> Option<RelationTriple> {
    let object = value.as_object()?;
    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let relation_type = field("relation_type");
    Some(RelationTriple {
        source: field("source"),
        target: field("target"),
        relation_type: RelationType::parse(&relation_type),
    })
}

/// Parse a paraphrase-variant payload into its non-blank strings
pub fn parse_variations(raw: &str) -> ParseOutcome<Vec<String>> {
    parse_shape(raw, Shape::Array).map(|value| match value {
        Value::Array(items) => items.iter().filter_map(non_blank).collect(),
        _ => Vec::new(),
    })
}

fn non_blank(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
