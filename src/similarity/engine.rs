//! Weighted aggregation, tiering and batch ranking.

use super::thresholds::*;
use super::{behavioral, firmographics, geographic, industry, technographics, DimensionScore};
use crate::models::{
    BatchMatch, CompanyProfile, ComparisonReport, ComparisonStatistics, Confidence,
    RankedComparison, ScoreBreakdown, SimilarityOptions, SimilarityScore, SimilarityTier,
};
use crate::obs::{SimilarityObserver, TracingObserver};
use std::sync::Arc;

/// Scores company pairs and ranks candidate lists.
///
/// Scoring is pure; the engine only carries the observer that receives
/// diagnostic events.
#[derive(Clone)]
pub struct SimilarityEngine {
    observer: Arc<dyn SimilarityObserver>,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(Arc::new(TracingObserver))
    }
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine").finish_non_exhaustive()
    }
}

/// Per-dimension raw results for one pair.
struct Dimensions {
    firmographics: DimensionScore,
    technographics: DimensionScore,
    geographic: DimensionScore,
    industry: DimensionScore,
    behavioral: DimensionScore,
}

impl SimilarityEngine {
    pub fn new(observer: Arc<dyn SimilarityObserver>) -> Self {
        Self { observer }
    }

    /// Computes the similarity of `candidate` to `target`.
    ///
    /// `options.min_score` is reported to the observer but never filters here.
    pub fn calculate(
        &self,
        target: &CompanyProfile,
        candidate: &CompanyProfile,
        options: &SimilarityOptions,
    ) -> SimilarityScore {
        let weights = &options.weights;
        let dims = Dimensions {
            firmographics: firmographics::score(target, candidate),
            technographics: technographics::score(target, candidate),
            geographic: geographic::score(target, candidate),
            industry: industry::score(target, candidate),
            behavioral: behavioral::score(target, candidate),
        };

        let weighted = dims.firmographics.score * weights.firmographics
            + dims.technographics.score * weights.technographics
            + dims.geographic.score * weights.geographic
            + dims.industry.score * weights.industry
            + dims.behavioral.score * weights.behavioral;

        let adjusted = apply_option_adjustments(
            weighted,
            dims.geographic.score,
            dims.technographics.score,
            dims.industry.score,
            options,
        );
        let overall_score = round_score(adjusted);

        if let Some(min_score) = options.min_score {
            if overall_score < min_score {
                self.observer
                    .on_below_threshold(candidate, overall_score, min_score);
            }
        }

        let breakdown = ScoreBreakdown {
            firmographics: dims.firmographics.rounded(),
            technographics: dims.technographics.rounded(),
            geographic: dims.geographic.rounded(),
            industry: dims.industry.rounded(),
            behavioral: dims.behavioral.rounded(),
        };
        let reasons: Vec<String> = [
            dims.firmographics.reasons,
            dims.technographics.reasons,
            dims.geographic.reasons,
            dims.industry.reasons,
            dims.behavioral.reasons,
        ]
        .into_iter()
        .flatten()
        .take(MAX_REASONS)
        .collect();

        let score = SimilarityScore {
            overall_score,
            breakdown,
            reasons,
            confidence: determine_confidence(target, candidate),
            tier: SimilarityTier::from_score(overall_score),
        };

        self.observer.on_pair_scored(target, candidate, &score);
        score
    }

    /// Scores every candidate, keeps those at or above `min_score` and sorts
    /// them by descending score.
    ///
    /// Ties keep the original candidate order.
    pub fn batch(
        &self,
        target: &CompanyProfile,
        candidates: &[CompanyProfile],
        options: &SimilarityOptions,
    ) -> Vec<BatchMatch> {
        let mut results: Vec<BatchMatch> = candidates
            .iter()
            .filter(|candidate| !(options.exclude_target && target.is_same_company(candidate)))
            .map(|candidate| BatchMatch {
                similarity: self.calculate(target, candidate, options),
                candidate: candidate.clone(),
            })
            .collect();
        let scored = results.len();

        if let Some(min_score) = options.min_score {
            results.retain(|r| r.similarity.overall_score >= min_score);
        }
        results.sort_by(|a, b| b.similarity.overall_score.cmp(&a.similarity.overall_score));
        if let Some(max_results) = options.max_results {
            results.truncate(max_results);
        }

        self.observer.on_batch_complete(scored, results.len());
        results
    }

    /// Ranks the batch result and summarises it.
    pub fn compare(
        &self,
        target: &CompanyProfile,
        candidates: &[CompanyProfile],
        options: &SimilarityOptions,
    ) -> ComparisonReport {
        let results = self.batch(target, candidates, options);
        let statistics = summarize(&results);

        let comparisons = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| RankedComparison {
                candidate: result.candidate,
                similarity: result.similarity,
                rank: index + 1,
            })
            .collect();

        ComparisonReport {
            target: target.clone(),
            comparisons,
            statistics,
        }
    }
}

/// Scores one pair with the default tracing observer.
pub fn calculate_similarity(
    target: &CompanyProfile,
    candidate: &CompanyProfile,
    options: &SimilarityOptions,
) -> SimilarityScore {
    SimilarityEngine::default().calculate(target, candidate, options)
}

/// Batch-scores candidates with the default tracing observer.
pub fn calculate_batch_similarity(
    target: &CompanyProfile,
    candidates: &[CompanyProfile],
    options: &SimilarityOptions,
) -> Vec<BatchMatch> {
    SimilarityEngine::default().batch(target, candidates, options)
}

/// Ranks candidates and computes statistics with the default tracing observer.
pub fn compare_similarities(
    target: &CompanyProfile,
    candidates: &[CompanyProfile],
    options: &SimilarityOptions,
) -> ComparisonReport {
    SimilarityEngine::default().compare(target, candidates, options)
}

/// Applies the optional boosts and penalty in fixed order: geo, tech, industry.
pub(crate) fn apply_option_adjustments(
    base: f64,
    geographic: f64,
    technographics: f64,
    industry: f64,
    options: &SimilarityOptions,
) -> f64 {
    let mut adjusted = base;
    if options.prioritize_geo && geographic >= GEO_PRIORITY_GATE {
        adjusted = (adjusted + PRIORITY_BONUS).min(100.0);
    }
    if options.prioritize_tech && technographics >= TECH_PRIORITY_GATE {
        adjusted = (adjusted + PRIORITY_BONUS).min(100.0);
    }
    if options.strict_industry && industry < STRICT_INDUSTRY_GATE {
        adjusted = (adjusted - STRICT_INDUSTRY_PENALTY).max(0.0);
    }
    adjusted
}

/// Rounds to the nearest integer and clamps into 0..=100; weights summing
/// above 1 would otherwise overflow the range.
fn round_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

fn has_number(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v != 0.0)
}

fn has_text(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.trim().is_empty())
}

/// Counts how much of the 20-point data checklist both profiles populate.
pub(crate) fn data_points(target: &CompanyProfile, candidate: &CompanyProfile) -> u32 {
    let both_numbers = |a: Option<f64>, b: Option<f64>| has_number(a) && has_number(b);
    let both_text = |a: Option<&String>, b: Option<&String>| {
        has_text(a.map(String::as_str)) && has_text(b.map(String::as_str))
    };
    let both_lists = |a: &[String], b: &[String]| !a.is_empty() && !b.is_empty();

    let checklist = [
        // Firmographics (5)
        both_numbers(target.revenue, candidate.revenue),
        both_numbers(target.employees, candidate.employees),
        target.size_class.is_some() && candidate.size_class.is_some(),
        target.growth_rate.is_some() && candidate.growth_rate.is_some(),
        both_numbers(target.registered_capital, candidate.registered_capital),
        // Technographics (4 + 1 base point)
        both_lists(&target.technologies, &candidate.technologies),
        both_lists(&target.cloud_providers, &candidate.cloud_providers),
        both_lists(&target.marketing_tools, &candidate.marketing_tools),
        both_text(target.erp_system.as_ref(), candidate.erp_system.as_ref()),
        true,
        // Geography (3 + 1 base point)
        both_text(target.state.as_ref(), candidate.state.as_ref()),
        both_text(target.city.as_ref(), candidate.city.as_ref()),
        has_number(target.latitude)
            && has_number(target.longitude)
            && has_number(candidate.latitude)
            && has_number(candidate.longitude),
        true,
        // Industry (3)
        both_text(
            target.classification_code.as_ref(),
            candidate.classification_code.as_ref(),
        ),
        both_text(target.sector.as_ref(), candidate.sector.as_ref()),
        both_text(target.subsector.as_ref(), candidate.subsector.as_ref()),
        // Behavioral (3)
        target.hiring_trend.is_some() && candidate.hiring_trend.is_some(),
        target.funding_stage.is_some() && candidate.funding_stage.is_some(),
        both_lists(&target.buying_signals, &candidate.buying_signals),
    ];

    checklist.iter().filter(|populated| **populated).count() as u32
}

fn determine_confidence(target: &CompanyProfile, candidate: &CompanyProfile) -> Confidence {
    let completeness = f64::from(data_points(target, candidate)) / CONFIDENCE_CHECKLIST_SIZE;
    Confidence::from_completeness(completeness)
}

fn summarize(results: &[BatchMatch]) -> ComparisonStatistics {
    if results.is_empty() {
        return ComparisonStatistics::default();
    }

    let scores: Vec<u8> = results.iter().map(|r| r.similarity.overall_score).collect();
    let total: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    let count_tier =
        |tier: SimilarityTier| results.iter().filter(|r| r.similarity.tier == tier).count();

    ComparisonStatistics {
        avg_score: (f64::from(total) / scores.len() as f64).round() as u8,
        max_score: scores.iter().copied().max().unwrap_or(0),
        min_score: scores.iter().copied().min().unwrap_or(0),
        excellent_count: count_tier(SimilarityTier::Excellent),
        premium_count: count_tier(SimilarityTier::Premium),
        qualified_count: count_tier(SimilarityTier::Qualified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obs::NoopObserver;

    fn engine() -> SimilarityEngine {
        SimilarityEngine::new(Arc::new(NoopObserver))
    }

    #[test]
    fn test_strict_industry_penalty() {
        let options = SimilarityOptions {
            strict_industry: true,
            ..Default::default()
        };
        assert_eq!(apply_option_adjustments(70.0, 50.0, 50.0, 50.0, &options), 50.0);
        assert_eq!(apply_option_adjustments(12.0, 50.0, 50.0, 50.0, &options), 0.0);
        assert_eq!(apply_option_adjustments(70.0, 50.0, 50.0, 60.0, &options), 70.0);
    }

    #[test]
    fn test_priority_boosts_stack_and_cap() {
        let options = SimilarityOptions {
            prioritize_geo: true,
            prioritize_tech: true,
            ..Default::default()
        };
        assert_eq!(apply_option_adjustments(60.0, 80.0, 75.0, 50.0, &options), 70.0);
        assert_eq!(apply_option_adjustments(60.0, 79.0, 75.0, 50.0, &options), 65.0);
        assert_eq!(apply_option_adjustments(98.0, 90.0, 90.0, 50.0, &options), 100.0);
    }

    #[test]
    fn test_empty_profiles_checklist_has_only_base_points() {
        let a = CompanyProfile::named("A");
        let b = CompanyProfile::named("B");
        assert_eq!(data_points(&a, &b), 2);
        assert_eq!(determine_confidence(&a, &b), Confidence::Low);
    }

    #[test]
    fn test_zero_revenue_not_counted_as_populated() {
        let a = CompanyProfile {
            revenue: Some(0.0),
            ..CompanyProfile::named("A")
        };
        let b = CompanyProfile {
            revenue: Some(10.0),
            ..CompanyProfile::named("B")
        };
        assert_eq!(data_points(&a, &b), 2);
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), ComparisonStatistics::default());
    }

    #[test]
    fn test_round_score_clamps_overweighted_results() {
        assert_eq!(round_score(149.6), 100);
        assert_eq!(round_score(-3.0), 0);
        assert_eq!(round_score(54.5), 55);
    }

    #[test]
    fn test_batch_ties_keep_input_order() {
        let target = CompanyProfile::named("T");
        let candidates: Vec<CompanyProfile> = ["first", "second", "third"]
            .iter()
            .map(|name| CompanyProfile::named(*name))
            .collect();
        let results = engine().batch(&target, &candidates, &SimilarityOptions::default());
        let names: Vec<&str> = results.iter().map(|r| r.candidate.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }
}
