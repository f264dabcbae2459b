//! Observability hooks for the similarity engine.
//!
//! The engine reports through a `SimilarityObserver` instead of logging
//! directly, so callers can swap the sink and tests can record the calls.

use crate::models::{CompanyProfile, SimilarityScore};

/// Receives diagnostic events from the engine. All methods default to no-ops.
pub trait SimilarityObserver: Send + Sync {
    /// Called once per scored target/candidate pair.
    fn on_pair_scored(
        &self,
        _target: &CompanyProfile,
        _candidate: &CompanyProfile,
        _score: &SimilarityScore,
    ) {
    }

    /// Called when a single-pair score falls below the configured `min_score`.
    fn on_below_threshold(&self, _candidate: &CompanyProfile, _score: u8, _min_score: u8) {}

    /// Called after a batch run with the number of candidates scored and kept.
    fn on_batch_complete(&self, _scored: usize, _retained: usize) {}
}

/// Default observer: emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SimilarityObserver for TracingObserver {
    fn on_pair_scored(
        &self,
        target: &CompanyProfile,
        candidate: &CompanyProfile,
        score: &SimilarityScore,
    ) {
        tracing::debug!(
            target_name = %target.name,
            candidate_name = %candidate.name,
            overall_score = score.overall_score,
            tier = ?score.tier,
            confidence = ?score.confidence,
            reasons = score.reasons.len(),
            "Similarity calculated"
        );
    }

    fn on_below_threshold(&self, candidate: &CompanyProfile, score: u8, min_score: u8) {
        tracing::debug!(
            "Score below threshold for {}: {} < {}",
            candidate.name,
            score,
            min_score
        );
    }

    fn on_batch_complete(&self, scored: usize, retained: usize) {
        tracing::info!(
            "Batch similarity: {} candidates scored, {} retained after filter",
            scored,
            retained
        );
    }
}

/// Observer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SimilarityObserver for NoopObserver {}
