//! Judgment prompts, one per dimension

use crate::types::Dimension;

/// First line of the prompt for `dimension`
pub fn task_line(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::FactualConsistency => {
            "Judge whether the generated knowledge is factually consistent with the original incident report."
        }
        Dimension::ReasoningQuality => {
            "Judge the quality of the causal and logical reasoning in the generated knowledge."
        }
        Dimension::FundamentalErrors => {
            "Check the generated knowledge for fundamental errors against the original incident report."
        }
    }
}

fn criteria(dimension: Dimension) -> &'static [&'static str] {
    match dimension {
        Dimension::FactualConsistency => &[
            "Every entity, time, and quantity in the generated knowledge appears in the report",
            "No fact contradicts the report",
            "Nothing is added that the report does not state or clearly imply",
        ],
        Dimension::ReasoningQuality => &[
            "Cause and effect are attributed in the same direction as the report",
            "Inferences follow from the stated facts",
            "Uncertain conclusions are not presented as certain",
        ],
        Dimension::FundamentalErrors => &[
            "Source and target of each relation are not swapped",
            "No root cause or impact is invented",
            "The incident's main subject is not misidentified",
        ],
    }
}

/// Build the judgment prompt for one dimension
///
/// Replies are expected to carry an `### Analysis` section and a
/// `### Score:` section holding a single number between 0.0 and 1.0.
pub fn judgment_prompt(dimension: Dimension, original: &str, generated: &str) -> String {
    let mut prompt = String::new();
    prompt.push_str(task_line(dimension));

    prompt.push_str("\n\nOriginal report:\n---\n");
    prompt.push_str(original);
    prompt.push_str("\n---\n\nGenerated knowledge:\n---\n");
    prompt.push_str(generated);
    prompt.push_str("\n---\n\nCriteria:\n");
    for criterion in criteria(dimension) {
        prompt.push_str(&format!("- {}\n", criterion));
    }

    prompt.push_str(
        "\nRespond in exactly this format:\n\n### Analysis\n<your reasoning>\n\n### Score:\n<a number between 0.0 and 1.0, where 1.0 is fully consistent>\n",
    );
    prompt
}
