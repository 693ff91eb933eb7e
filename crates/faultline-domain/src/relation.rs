//! Relation triples and their generated descriptions

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Closed set of relation types between incident entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// An event sets off a response
    Triggers,

    /// Causal relationship
    Causes,

    /// Detection of a condition
    Detects,

    /// An actor performs an action
    Performs,

    /// An actor uses a tool
    Uses,

    /// An impact on another entity
    Affects,

    /// Restoration of a service or element
    Recovers,

    /// Ongoing observation
    Monitors,
}

impl RelationType {
    /// All relation types in declaration order
    pub const ALL: [RelationType; 8] = [
        RelationType::Triggers,
        RelationType::Causes,
        RelationType::Detects,
        RelationType::Performs,
        RelationType::Uses,
        RelationType::Affects,
        RelationType::Recovers,
        RelationType::Monitors,
    ];

    /// Get the wire label (`TRIGGERS`, `CAUSES`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Triggers => "TRIGGERS",
            RelationType::Causes => "CAUSES",
            RelationType::Detects => "DETECTS",
            RelationType::Performs => "PERFORMS",
            RelationType::Uses => "USES",
            RelationType::Affects => "AFFECTS",
            RelationType::Recovers => "RECOVERS",
            RelationType::Monitors => "MONITORS",
        }
    }

    /// Short description used when prompting
    pub fn description(&self) -> &'static str {
        match self {
            RelationType::Triggers => "triggering relationship",
            RelationType::Causes => "causal relationship",
            RelationType::Detects => "detection relationship",
            RelationType::Performs => "execution relationship",
            RelationType::Uses => "usage relationship",
            RelationType::Affects => "impact relationship",
            RelationType::Recovers => "recovery relationship",
            RelationType::Monitors => "monitoring relationship",
        }
    }

    /// Third-person verb, for plain-sentence renderings
    pub fn verb(&self) -> &'static str {
        match self {
            RelationType::Triggers => "triggers",
            RelationType::Causes => "causes",
            RelationType::Detects => "detects",
            RelationType::Performs => "performs",
            RelationType::Uses => "uses",
            RelationType::Affects => "affects",
            RelationType::Recovers => "recovers",
            RelationType::Monitors => "monitors",
        }
    }

    /// Parse a relation label, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "TRIGGERS" => Some(RelationType::Triggers),
            "CAUSES" => Some(RelationType::Causes),
            "DETECTS" => Some(RelationType::Detects),
            "PERFORMS" => Some(RelationType::Performs),
            "USES" => Some(RelationType::Uses),
            "AFFECTS" => Some(RelationType::Affects),
            "RECOVERS" => Some(RelationType::Recovers),
            "MONITORS" => Some(RelationType::Monitors),
            _ => None,
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation type: {}", s))
    }
}

/// A (source, target, relation type) fact as returned by relation extraction
///
/// Fields may be empty (or the type absent) when the completion service
/// returned an incomplete item; such triples are kept in the document's
/// relation list but are never described.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTriple {
    /// Source entity name
    pub source: String,

    /// Target entity name
    pub target: String,

    /// Relation type, absent if the service returned an unknown label
    pub relation_type: Option<RelationType>,
}

impl RelationTriple {
    /// Create a complete triple
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relation_type: RelationType,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relation_type: Some(relation_type),
        }
    }

    /// Whether all three fields are non-empty
    pub fn is_complete(&self) -> bool {
        !self.source.trim().is_empty()
            && !self.target.trim().is_empty()
            && self.relation_type.is_some()
    }
}

impl std::fmt::Display for RelationTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let relation = self.relation_type.map(|r| r.as_str()).unwrap_or("?");
        write!(f, "{} --{}--> {}", self.source, relation, self.target)
    }
}

/// Natural-language sentences generated for one complete triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescription {
    /// The described triple
    #[serde(flatten)]
    pub relation: RelationTriple,

    /// Canonical single-sentence description
    pub detailed_description: String,

    /// Paraphrase variants, possibly empty
    pub variations: Vec<String>,

    /// Canonical description plus variations, deduplicated
    pub all_descriptions: BTreeSet<String>,
}

impl RelationDescription {
    /// Build a description, deriving `all_descriptions`
    pub fn new(
        relation: RelationTriple,
        detailed_description: impl Into<String>,
        variations: Vec<String>,
    ) -> Self {
        let detailed_description = detailed_description.into();
        let all_descriptions = std::iter::once(detailed_description.clone())
            .chain(variations.iter().cloned())
            .collect();

        Self {
            relation,
            detailed_description,
            variations,
            all_descriptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relation_type() {
        assert_eq!(RelationType::parse("CAUSES"), Some(RelationType::Causes));
        assert_eq!(RelationType::parse(" triggers "), Some(RelationType::Triggers));
        assert_eq!(RelationType::parse("CAUSED_BY"), None);
        assert_eq!(RelationType::parse(""), None);
    }

    #[test]
    fn test_relation_type_serializes_upper_case() {
        let json = serde_json::to_string(&RelationType::Recovers).unwrap();
        assert_eq!(json, r#""RECOVERS""#);
    }

    #[test]
    fn test_triple_completeness() {
        assert!(RelationTriple::new("alarm", "engineer", RelationType::Triggers).is_complete());
        assert!(!RelationTriple::new("", "engineer", RelationType::Triggers).is_complete());
        assert!(!RelationTriple::new("alarm", "  ", RelationType::Triggers).is_complete());

        let untyped = RelationTriple {
            source: "alarm".to_string(),
            target: "engineer".to_string(),
            relation_type: None,
        };
        assert!(!untyped.is_complete());
    }

    #[test]
    fn test_all_descriptions_deduplicates() {
        let description = RelationDescription::new(
            RelationTriple::new("DB outage", "UDM failure", RelationType::Causes),
            "DB outage causes UDM failure.",
            vec![
                "UDM failure was caused by the DB outage.".to_string(),
                "DB outage causes UDM failure.".to_string(),
            ],
        );

        assert_eq!(description.all_descriptions.len(), 2);
        assert!(description.all_descriptions.contains(&description.detailed_description));
    }

    #[test]
    fn test_description_json_flattens_triple() {
        let description = RelationDescription::new(
            RelationTriple::new("engineer", "platform", RelationType::Uses),
            "The engineer uses the platform.",
            Vec::new(),
        );

        let value = serde_json::to_value(&description).unwrap();
        assert_eq!(value["source"], "engineer");
        assert_eq!(value["relation_type"], "USES");

        let parsed: RelationDescription = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, description);
    }
}
