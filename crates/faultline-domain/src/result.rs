//! Per-document extraction outcome

use crate::{EntityMap, RelationDescription, RelationTriple};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the extraction stages produced for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Entities by category
    pub entities: EntityMap,

    /// Triples exactly as returned by relation extraction
    pub relations: Vec<RelationTriple>,

    /// Descriptions for the complete triples
    pub descriptions: Vec<RelationDescription>,

    /// Deduplicated union of every generated sentence
    pub sentences: BTreeSet<String>,
}

/// Counts derived from the final extraction structures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Entity names across all categories
    pub total_entities: usize,

    /// Triples returned by relation extraction, before the completeness filter
    pub total_relations: usize,

    /// Triples that were described, after the completeness filter
    pub descriptions_generated: usize,
}

impl DocumentMetadata {
    /// Derive counts from an extraction
    pub fn from_extraction(extraction: &Extraction) -> Self {
        Self {
            total_entities: extraction.entities.total(),
            total_relations: extraction.relations.len(),
            descriptions_generated: extraction.descriptions.len(),
        }
    }
}

/// Outcome of running the extraction pipeline over one document
///
/// Either the success fields (`entities`, `relations`, `descriptions`,
/// `sentences`) or `error` is populated, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Position of the document in the input collection
    pub document_index: usize,

    /// Whether the pipeline completed
    pub success: bool,

    /// Leading characters of the document text
    #[serde(default)]
    pub text_preview: String,

    /// Entities by category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<EntityMap>,

    /// Triples as returned by relation extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<RelationTriple>>,

    /// Per-relation description breakdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptions: Option<Vec<RelationDescription>>,

    /// Document-level sentence set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentences: Option<BTreeSet<String>>,

    /// Derived counts, all zero on failure
    #[serde(default)]
    pub metadata: DocumentMetadata,

    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentResult {
    /// Build a successful result; metadata is computed from the extraction
    pub fn succeeded(document_index: usize, text_preview: String, extraction: Extraction) -> Self {
        let metadata = DocumentMetadata::from_extraction(&extraction);

        Self {
            document_index,
            success: true,
            text_preview,
            entities: Some(extraction.entities),
            relations: Some(extraction.relations),
            descriptions: Some(extraction.descriptions),
            sentences: Some(extraction.sentences),
            metadata,
            error: None,
        }
    }

    /// Build a failed result
    pub fn failed(document_index: usize, text_preview: String, error: impl Into<String>) -> Self {
        Self {
            document_index,
            success: false,
            text_preview,
            entities: None,
            relations: None,
            descriptions: None,
            sentences: None,
            metadata: DocumentMetadata::default(),
            error: Some(error.into()),
        }
    }
}
