//! Three-dimension consistency scorer

use crate::config::ScorerConfig;
use crate::error::ScorerError;
use crate::extract::{extract_score, NEUTRAL_SCORE};
use crate::prompt::judgment_prompt;
use crate::synthesis::synthesize;
use crate::types::{Dimension, ScoreResult, ScoreSource, Verdict};
use faultline_domain::{CompletionClient, DocumentResult};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info};

/// Judges generated knowledge against its source text
///
/// Each dimension is evaluated with its own completion call. A failed call
/// scores that dimension 0.5 and never affects the other two.
pub struct ConsistencyScorer<C> {
    client: Arc<C>,
    config: ScorerConfig,
}

impl<C: CompletionClient> ConsistencyScorer<C> {
    /// Create a scorer that owns its client
    pub fn new(client: C, config: ScorerConfig) -> Result<Self, ScorerError> {
        Self::from_shared(Arc::new(client), config)
    }

    /// Create a scorer over a client shared with other components
    pub fn from_shared(client: Arc<C>, config: ScorerConfig) -> Result<Self, ScorerError> {
        config.validate().map_err(ScorerError::Config)?;
        Ok(Self { client, config })
    }

    /// Scorer configuration
    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score `generated` against `original` on every dimension
    pub async fn score(&self, original: &str, generated: &str) -> Verdict {
        info!("Scoring {} chars of generated knowledge", generated.chars().count());

        let mut results = Vec::with_capacity(Dimension::ALL.len());
        for dimension in Dimension::ALL {
            results.push(self.evaluate(dimension, original, generated).await);
        }

        let verdict = synthesize(&results, self.config.weights);
        info!(
            "Verdict: {} ({}), overall {:.3}",
            verdict.category.as_str(),
            verdict.hallucination_status.as_str(),
            verdict.overall_score
        );
        verdict
    }

    /// Score the sentences of a successful document result against its text
    ///
    /// Returns `None` for failed results and results without sentences.
    pub async fn score_document(&self, text: &str, result: &DocumentResult) -> Option<Verdict> {
        if !result.success {
            return None;
        }
        let sentences = result.sentences.as_ref().filter(|s| !s.is_empty())?;
        let generated = sentences.iter().map(String::as_str).collect::<Vec<_>>().join("\n");
        Some(self.score(text, &generated).await)
    }

    /// Evaluate one dimension, substituting the neutral score on failure
    pub async fn evaluate(&self, dimension: Dimension, original: &str, generated: &str) -> ScoreResult {
        match self.judge(dimension, original, generated).await {
            Ok(response) => {
                let (score, source) = extract_score(&response);
                debug!("{} scored {} ({:?})", dimension, score, source);
                ScoreResult {
                    dimension,
                    score,
                    analysis: response,
                    source,
                }
            }
            Err(e) => {
                error!("Evaluating {} failed: {}", dimension, e);
                ScoreResult {
                    dimension,
                    score: NEUTRAL_SCORE,
                    analysis: e.to_string(),
                    source: ScoreSource::Error,
                }
            }
        }
    }

    async fn judge(
        &self,
        dimension: Dimension,
        original: &str,
        generated: &str,
    ) -> Result<String, ScorerError> {
        let prompt = judgment_prompt(dimension, original, generated);
        let call_timeout = self.config.call_timeout();
        timeout(
            call_timeout,
            self.client
                .complete(&prompt, self.config.max_tokens, self.config.temperature),
        )
        .await
        .map_err(|_| ScorerError::Timeout(call_timeout.as_secs()))?
        .map_err(|e| ScorerError::Llm(e.to_string()))
    }
}
