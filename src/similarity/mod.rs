//! Multi-dimensional company similarity scoring.
//!
//! Five independent scorers each turn a pair of `CompanyProfile`s into a
//! 0-100 score plus human-readable reasons:
//!
//! - `firmographics`: revenue, headcount, growth and size class.
//! - `technographics`: technology, cloud, marketing-tool and ERP overlap.
//! - `geographic`: state, region, city and great-circle distance.
//! - `industry`: classification-code prefix and sector matching.
//! - `behavioral`: hiring, funding, buying signals and activity.
//!
//! `engine` combines them into a weighted, tiered `SimilarityScore` and runs
//! batch ranking over many candidates.

pub mod behavioral;
pub mod engine;
pub mod firmographics;
pub mod geographic;
pub mod industry;
pub mod technographics;
pub mod text;
pub mod thresholds;

pub use engine::{
    calculate_batch_similarity, calculate_similarity, compare_similarities, SimilarityEngine,
};

/// Raw output of a single dimension scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionScore {
    /// Unrounded score, clamped to 0..=100.
    pub score: f64,
    pub reasons: Vec<String>,
}

impl DimensionScore {
    pub fn new(score: f64, reasons: Vec<String>) -> Self {
        let score = if score.is_nan() {
            thresholds::NEUTRAL_SCORE
        } else {
            score.clamp(0.0, 100.0)
        };
        Self { score, reasons }
    }

    /// Score rounded for the public breakdown.
    pub fn rounded(&self) -> u8 {
        self.score.round() as u8
    }
}
