//! Faultline Domain Layer
//!
//! This crate contains the data model shared by every other Faultline crate
//! and the trait boundaries to the two external collaborators the core
//! depends on: a text-completion service and a checkpoint store.
//!
//! ## Key Concepts
//!
//! - **Document**: One incident report, identified by its position in the input
//! - **EntityMap**: Category-scoped entity names extracted from a document
//! - **RelationTriple**: A typed (source, target, relation) fact
//! - **RelationDescription**: Natural-language sentences generated for a triple
//! - **DocumentResult**: The per-document outcome of the extraction pipeline
//! - **BatchState**: Append-only results of a batch run, with derived counters
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No I/O and no async runtime
//! - Pure data and derived values only
//! - Collaborator implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod document;
pub mod entity;
pub mod relation;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use batch::{BatchReport, BatchState, BatchSummary, CheckpointKey};
pub use document::{text_preview, Document};
pub use entity::{EntityCategory, EntityMap};
pub use relation::{RelationDescription, RelationTriple, RelationType};
pub use result::{DocumentMetadata, DocumentResult, Extraction};
pub use traits::{CheckpointStore, CompletionClient};
