//! Batch input loading

use crate::error::BatchError;
use faultline_domain::Document;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Parse batch input
///
/// Accepts a JSON array of records or a single record object. Every array
/// item keeps its position; an item without a string `text` field becomes a
/// document with no text and is skipped at run time. A single object must
/// carry `text`.
pub fn parse_documents(json: &str) -> Result<Vec<Document>, BatchError> {
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Array(items) => {
            let documents: Vec<Document> = items
                .iter()
                .enumerate()
                .map(|(index, item)| match record_text(item) {
                    Some(text) => Document::new(index, text),
                    None => {
                        debug!("Input record {} has no text field", index);
                        Document::missing(index)
                    }
                })
                .collect();
            Ok(documents)
        }
        Value::Object(_) => record_text(&value)
            .map(|text| vec![Document::new(0, text)])
            .ok_or_else(|| BatchError::InvalidInput("record has no 'text' field".to_string())),
        other => Err(BatchError::InvalidInput(format!(
            "expected a record or an array of records, found {}",
            kind(&other)
        ))),
    }
}

/// Read and parse batch input from a file
pub async fn load_documents(path: impl AsRef<Path>) -> Result<Vec<Document>, BatchError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let documents = parse_documents(&json)?;
    info!("Loaded {} documents from {}", documents.len(), path.display());
    Ok(documents)
}

fn record_text(record: &Value) -> Option<&str> {
    record.get("text").and_then(Value::as_str)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
