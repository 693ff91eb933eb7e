//! Prompt construction for the extraction stages
//!
//! Each prompt opens with a fixed task line (the `*_TASK` constants) so that
//! logs and test doubles can tell the four call kinds apart.

use faultline_domain::{EntityCategory, RelationTriple, RelationType};

/// First line of every entity-extraction prompt
pub const ENTITY_TASK: &str = "Extract the key entities from the incident report below.";

/// First line of every relation-extraction prompt
pub const RELATION_TASK: &str = "Identify the relations between entities in the incident report below.";

/// First line of every canonical-description prompt
pub const DESCRIPTION_TASK: &str = "Write one detailed natural-language sentence describing the relation below.";

/// First line of every paraphrase-variant prompt
pub const VARIATION_TASK: &str = "Write 3-5 different natural-language sentences expressing the relation below.";

/// Build the entity-extraction prompt
pub fn entity_prompt(text: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(ENTITY_TASK);
    prompt.push_str("\n\nEntity categories:\n");
    for category in EntityCategory::ALL {
        prompt.push_str(&format!("- {}: {}\n", category.as_str(), category.description()));
    }

    prompt.push_str("\nReport:\n---\n");
    prompt.push_str(text);
    prompt.push_str("\n---\n\n");

    prompt.push_str("Respond with a single JSON object mapping every category to a list of entity names:\n{\n");
    let keys: Vec<String> = EntityCategory::ALL
        .iter()
        .map(|category| format!("    \"{}\": [\"entity 1\", \"entity 2\"]", category.as_str()))
        .collect();
    prompt.push_str(&keys.join(",\n"));
    prompt.push_str("\n}\n");

    prompt
}

/// Build the relation-extraction prompt over the flattened entity names
pub fn relation_prompt(text: &str, entity_names: &[&str]) -> String {
    let mut prompt = String::new();
    prompt.push_str(RELATION_TASK);

    prompt.push_str("\n\nReport:\n---\n");
    prompt.push_str(text);
    prompt.push_str("\n---\n\n");

    prompt.push_str("Entities:\n");
    if entity_names.is_empty() {
        prompt.push_str("(none identified; use entities named in the report)\n");
    } else {
        for name in entity_names {
            prompt.push_str(&format!("- {}\n", name));
        }
    }

    prompt.push_str("\nRelation types:\n");
    for relation in RelationType::ALL {
        prompt.push_str(&format!("- {}: {}\n", relation.as_str(), relation.description()));
    }

    prompt.push_str(RELATION_FORMAT);
    prompt
}

const RELATION_FORMAT: &str = r#"
Respond with a JSON array and nothing else. Use only the relation types listed above:
[
    {
        "source": "source entity",
        "target": "target entity",
        "relation_type": "RELATION_TYPE"
    }
]
"#;

/// Build the canonical-description prompt for one complete triple
pub fn description_prompt(relation: &RelationTriple, context: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(DESCRIPTION_TASK);
    prompt.push_str("\n\n");
    push_relation(&mut prompt, relation, context);
    prompt.push_str(
        "\nRequirements:\n\
         1. One complete sentence\n\
         2. Include the technical details the context gives\n\
         3. Make the specific relationship between the entities explicit\n\n\
         Return only the sentence.\n",
    );
    prompt
}

/// Build the paraphrase-variant prompt for one complete triple
pub fn variation_prompt(relation: &RelationTriple, context: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(VARIATION_TASK);
    prompt.push_str("\n\n");
    push_relation(&mut prompt, relation, context);
    prompt.push_str(
        "\nRequirements:\n\
         1. Every variant is a complete sentence\n\
         2. Vary the sentence structure between variants\n\n\
         Respond with a JSON array of strings, for example:\n\
         [\"variant 1\", \"variant 2\", \"variant 3\"]\n",
    );
    prompt
}

fn push_relation(prompt: &mut String, relation: &RelationTriple, context: &str) {
    let relation_type = relation
        .relation_type
        .map(|r| format!("{} ({})", r.as_str(), r.description()))
        .unwrap_or_default();

    prompt.push_str(&format!("Source entity: {}\n", relation.source));
    prompt.push_str(&format!("Target entity: {}\n", relation.target));
    prompt.push_str(&format!("Relation type: {}\n", relation_type));
    prompt.push_str(&format!("Context: {}\n", context));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_prompt_lists_categories() {
        let prompt = entity_prompt("UDM went down at 03:00");

        assert!(prompt.starts_with(ENTITY_TASK));
        assert!(prompt.contains("UDM went down at 03:00"));
        for category in EntityCategory::ALL {
            assert!(prompt.contains(category.as_str()));
        }
    }

    #[test]
    fn test_relation_prompt_embeds_entities() {
        let prompt = relation_prompt("report", &["UDM", "on-call engineer"]);

        assert!(prompt.starts_with(RELATION_TASK));
        assert!(prompt.contains("- UDM\n"));
        assert!(prompt.contains("- on-call engineer\n"));
        assert!(prompt.contains("MONITORS"));
    }

    #[test]
    fn test_relation_prompt_without_entities() {
        let prompt = relation_prompt("report", &[]);
        assert!(prompt.contains("none identified"));
    }

    #[test]
    fn test_description_prompts_carry_triple() {
        let relation = RelationTriple::new("DB outage", "UDM failure", RelationType::Causes);

        let description = description_prompt(&relation, "context text");
        assert!(description.starts_with(DESCRIPTION_TASK));
        assert!(description.contains("Source entity: DB outage"));
        assert!(description.contains("CAUSES (causal relationship)"));
        assert!(description.contains("context text"));

        let variation = variation_prompt(&relation, "context text");
        assert!(variation.starts_with(VARIATION_TASK));
        assert!(variation.contains("Target entity: UDM failure"));
    }
}
