//! Per-document extraction pipeline

use crate::config::ExtractorConfig;
use crate::descriptions::DescriptionGenerationStage;
use crate::entities::EntityExtractionStage;
use crate::error::ExtractorError;
use crate::relations::RelationExtractionStage;
use faultline_domain::{text_preview, CompletionClient, DocumentResult, Extraction};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs entity extraction, relation extraction and description generation
/// over one document
///
/// Stage failures degrade to empty values, so the only document-level
/// failure is over-long text, reported as a `DocumentResult` with
/// `success == false`.
pub struct ExtractionPipeline<C> {
    entities: EntityExtractionStage<C>,
    relations: RelationExtractionStage<C>,
    descriptions: DescriptionGenerationStage<C>,
    config: ExtractorConfig,
}

impl<C: CompletionClient> ExtractionPipeline<C> {
    /// Create a pipeline that owns its client, validating `config`
    pub fn new(client: C, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::from_shared(Arc::new(client), config)
    }

    /// Create a pipeline over a client shared with other components
    pub fn from_shared(client: Arc<C>, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            entities: EntityExtractionStage::new(Arc::clone(&client), &config),
            relations: RelationExtractionStage::new(Arc::clone(&client), &config),
            descriptions: DescriptionGenerationStage::new(client, &config),
            config,
        })
    }

    /// Pipeline configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract knowledge from the document at `document_index`
    pub async fn run(&self, document_index: usize, text: &str) -> DocumentResult {
        let preview = text_preview(text, self.config.preview_chars);
        info!(
            "Processing document {} ({} chars)",
            document_index,
            text.chars().count()
        );

        match self.extract(text).await {
            Ok(extraction) => {
                let result = DocumentResult::succeeded(document_index, preview, extraction);
                info!(
                    "Document {} done: {} entities, {} relations, {} descriptions",
                    document_index,
                    result.metadata.total_entities,
                    result.metadata.total_relations,
                    result.metadata.descriptions_generated
                );
                result
            }
            Err(e) => {
                warn!("Document {} failed: {}", document_index, e);
                DocumentResult::failed(document_index, preview, e.to_string())
            }
        }
    }

    async fn extract(&self, text: &str) -> Result<Extraction, ExtractorError> {
        let length = text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        let entities = self.entities.extract(text).await;
        let relations = self.relations.extract(text, &entities).await;
        let output = self.descriptions.describe(&relations, text).await;
        debug!(
            "Stages complete: {} entities, {} relations, {} sentences",
            entities.total(),
            relations.len(),
            output.sentences.len()
        );

        Ok(Extraction {
            entities,
            relations,
            descriptions: output.descriptions,
            sentences: output.sentences,
        })
    }
}
