//! Entity categories and the per-document entity map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of entity categories recognized in incident reports
///
/// Declaration order is the canonical order used when flattening an
/// [`EntityMap`] into a single name list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Network devices, services, instances
    NetworkElement,

    /// Alarm names, levels, times
    Alarm,

    /// Engineers, teams
    Person,

    /// Platforms, systems, tools
    Tool,

    /// Business functions and services
    Business,

    /// Fault causes and problems
    Cause,

    /// Handling actions and operations
    Action,

    /// Running states and outcomes
    Status,
}

impl EntityCategory {
    /// All categories in canonical order
    pub const ALL: [EntityCategory; 8] = [
        EntityCategory::NetworkElement,
        EntityCategory::Alarm,
        EntityCategory::Person,
        EntityCategory::Tool,
        EntityCategory::Business,
        EntityCategory::Cause,
        EntityCategory::Action,
        EntityCategory::Status,
    ];

    /// Get the category label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityCategory::NetworkElement => "network_element",
            EntityCategory::Alarm => "alarm",
            EntityCategory::Person => "person",
            EntityCategory::Tool => "tool",
            EntityCategory::Business => "business",
            EntityCategory::Cause => "cause",
            EntityCategory::Action => "action",
            EntityCategory::Status => "status",
        }
    }

    /// Short description of what belongs in the category
    pub fn description(&self) -> &'static str {
        match self {
            EntityCategory::NetworkElement => "network devices, services, instances",
            EntityCategory::Alarm => "alarm names, severities, times",
            EntityCategory::Person => "engineers, teams",
            EntityCategory::Tool => "platforms, systems, tools",
            EntityCategory::Business => "business functions, services",
            EntityCategory::Cause => "fault causes, problems",
            EntityCategory::Action => "handling actions, operations",
            EntityCategory::Status => "running states, outcomes",
        }
    }

    /// Parse a category label
    ///
    /// Case and separators (`-`, `_`, space) are ignored, and the Chinese
    /// labels used by upstream incident tooling are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "networkelement" | "网络元素" => Some(EntityCategory::NetworkElement),
            "alarm" | "告警" => Some(EntityCategory::Alarm),
            "person" | "人员" => Some(EntityCategory::Person),
            "tool" | "工具" => Some(EntityCategory::Tool),
            "business" | "业务" => Some(EntityCategory::Business),
            "cause" | "原因" => Some(EntityCategory::Cause),
            "action" | "动作" => Some(EntityCategory::Action),
            "status" | "状态" => Some(EntityCategory::Status),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid entity category: {}", s))
    }
}

/// Mapping from entity category to the ordered names found in one document
///
/// Built once per document by the entity extraction stage and not mutated
/// afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityMap(BTreeMap<EntityCategory, Vec<String>>);

impl EntityMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append names to a category
    pub fn insert(&mut self, category: EntityCategory, names: Vec<String>) {
        self.0.entry(category).or_default().extend(names);
    }

    /// Names recorded for a category
    pub fn get(&self, category: EntityCategory) -> &[String] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate categories and their names in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, &[String])> {
        self.0.iter().map(|(category, names)| (*category, names.as_slice()))
    }

    /// All names flattened into one list, categories in canonical order
    pub fn names(&self) -> Vec<&str> {
        self.0
            .values()
            .flat_map(|names| names.iter().map(String::as_str))
            .collect()
    }

    /// Total number of names across all categories
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Whether no names were found
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl FromIterator<(EntityCategory, Vec<String>)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (EntityCategory, Vec<String>)>>(iter: I) -> Self {
        let mut map = EntityMap::new();
        for (category, names) in iter {
            map.insert(category, names);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(EntityCategory::parse("network_element"), Some(EntityCategory::NetworkElement));
        assert_eq!(EntityCategory::parse("Network Element"), Some(EntityCategory::NetworkElement));
        assert_eq!(EntityCategory::parse("network-element"), Some(EntityCategory::NetworkElement));
        assert_eq!(EntityCategory::parse("ALARM"), Some(EntityCategory::Alarm));
        assert_eq!(EntityCategory::parse("告警"), Some(EntityCategory::Alarm));
        assert_eq!(EntityCategory::parse("location"), None);
    }

    #[test]
    fn test_as_str_round_trip() {
        for category in EntityCategory::ALL {
            assert_eq!(EntityCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_names_follow_canonical_order() {
        let map: EntityMap = vec![
            (EntityCategory::Status, vec!["recovered".to_string()]),
            (EntityCategory::NetworkElement, vec!["UDM".to_string(), "AMF".to_string()]),
            (EntityCategory::Person, vec!["on-call engineer".to_string()]),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.names(), vec!["UDM", "AMF", "on-call engineer", "recovered"]);
        assert_eq!(map.total(), 4);
        assert!(!map.is_empty());
    }

    #[test]
    fn test_missing_category_is_empty_slice() {
        let map = EntityMap::new();
        assert!(map.get(EntityCategory::Tool).is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let mut map = EntityMap::new();
        map.insert(EntityCategory::NetworkElement, vec!["UDM".to_string()]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"network_element":["UDM"]}"#);

        let parsed: EntityMap = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, map);
    }
}
