//! Faultline Extractor
//!
//! Turns free-form incident reports into entities, typed relations and
//! natural-language relation descriptions using a text-completion service.
//!
//! # Architecture
//!
//! ```text
//! Text → EntityExtractionStage → RelationExtractionStage → DescriptionGenerationStage → DocumentResult
//! ```
//!
//! Every completion payload passes through [`sanitize`] and a
//! strict-then-fallback JSON parse that yields a [`ParseOutcome`]. Malformed
//! payloads degrade to empty values; transport failures, timeouts and
//! over-long input fail the document. [`ExtractionPipeline::run`] turns any
//! failure into a `DocumentResult` with `success == false`, so nothing
//! escapes to the caller.
//!
//! # Example Usage
//!
//! ```
//! use faultline_extractor::{ExtractionPipeline, ExtractorConfig};
//! use faultline_llm::MockCompletionClient;
//!
//! # async fn example() -> Result<(), faultline_extractor::ExtractorError> {
//! let client = MockCompletionClient::new("[]");
//! let pipeline = ExtractionPipeline::new(client, ExtractorConfig::default())?;
//!
//! let result = pipeline.run(0, "UDM became unavailable after the DB outage.").await;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod descriptions;
mod entities;
mod error;
mod parser;
mod pipeline;
pub mod prompt;
mod relations;


pub use config::ExtractorConfig;
pub use descriptions::{
    aggregate_sentences, fallback_sentence, DescriptionGenerationStage, DescriptionOutput,
};
pub use entities::EntityExtractionStage;
pub use error::ExtractorError;
pub use parser::{parse_entity_map, parse_relations, parse_variations, sanitize, ParseOutcome};
pub use pipeline::ExtractionPipeline;
pub use relations::RelationExtractionStage;
