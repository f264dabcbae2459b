//! Hiring, funding, buying-signal and activity similarity.

use super::text::{jaccard_index, normalize_token_set, percent_difference};
use super::thresholds::*;
use super::DimensionScore;
use crate::models::{CompanyProfile, FundingStage};

pub fn score(target: &CompanyProfile, candidate: &CompanyProfile) -> DimensionScore {
    let hiring = hiring_similarity(target.hiring_trend, candidate.hiring_trend);
    let funding = funding_similarity(target.funding_stage, candidate.funding_stage);
    let signals = signal_similarity(&target.buying_signals, &candidate.buying_signals);
    let activity = activity_similarity(target, candidate);

    let overall = hiring * BEHAVIOR_HIRING_WEIGHT
        + funding * BEHAVIOR_FUNDING_WEIGHT
        + signals * BEHAVIOR_SIGNALS_WEIGHT
        + activity * BEHAVIOR_ACTIVITY_WEIGHT;

    let mut reasons = Vec::new();
    if matches!(
        (target.hiring_trend, candidate.hiring_trend),
        (Some(a), Some(b)) if a > 0.0 && b > 0.0
    ) {
        reasons.push("Both companies hiring".to_string());
    }
    if let Some(stage) = target.funding_stage {
        if funding >= 100.0 && stage != FundingStage::None {
            reasons.push(format!("Same funding stage: {}", stage.label()));
        }
    }
    if signals >= SIGNALS_REASON_GATE {
        reasons.push("Similar buying signals".to_string());
    }
    if matches!(
        (target.recent_news_count, candidate.recent_news_count),
        (Some(a), Some(b)) if a > 0 && b > 0
    ) {
        reasons.push("Both recently active in the news".to_string());
    }

    DimensionScore::new(overall, reasons)
}

pub fn hiring_similarity(a: Option<f64>, b: Option<f64>) -> f64 {
    match (a, b) {
        (None, None) => NEUTRAL_SCORE,
        (Some(a), Some(b)) if a > 0.0 && b > 0.0 => 95.0,
        (Some(a), Some(b)) if a < 0.0 && b < 0.0 => 70.0,
        (Some(a), Some(b)) if a == 0.0 && b == 0.0 => 60.0,
        _ => 40.0,
    }
}

/// Ordinal distance on the funding ladder. Missing 50, unrecognised 40.
pub fn funding_similarity(a: Option<FundingStage>, b: Option<FundingStage>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL_SCORE,
    };
    match (a.rank(), b.rank()) {
        (Some(a), Some(b)) => match a.abs_diff(b) {
            0 => 100.0,
            1 => 80.0,
            2 => 60.0,
            _ => 40.0,
        },
        _ => 40.0,
    }
}

/// Jaccard over signal labels plus a flat bonus when both sides show any signal.
pub fn signal_similarity(a: &[String], b: &[String]) -> f64 {
    let a = normalize_token_set(a);
    let b = normalize_token_set(b);
    match (a.is_empty(), b.is_empty()) {
        (true, true) => NEUTRAL_SCORE,
        (true, false) | (false, true) => 40.0,
        (false, false) => (jaccard_index(&a, &b) + SIGNAL_PRESENCE_BONUS).min(100.0),
    }
}

pub fn activity_similarity(target: &CompanyProfile, candidate: &CompanyProfile) -> f64 {
    let news = news_similarity(target.recent_news_count, candidate.recent_news_count);
    let traffic = traffic_similarity(target.website_traffic, candidate.website_traffic);
    news * ACTIVITY_NEWS_WEIGHT + traffic * ACTIVITY_TRAFFIC_WEIGHT
}

fn news_similarity(a: Option<u32>, b: Option<u32>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a > 0 && b > 0 => 90.0,
        (Some(0), Some(0)) => 60.0,
        (Some(_), Some(_)) => 50.0,
        _ => NEUTRAL_SCORE,
    }
}

fn traffic_similarity(a: Option<f64>, b: Option<f64>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => {
            let diff = percent_difference(a, b);
            TRAFFIC_BANDS
                .iter()
                .find(|(limit, _)| diff <= *limit)
                .map(|(_, score)| *score)
                .unwrap_or(TRAFFIC_FLOOR)
        }
        _ => NEUTRAL_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiring_similarity() {
        assert_eq!(hiring_similarity(Some(3.0), Some(10.0)), 95.0);
        assert_eq!(hiring_similarity(Some(0.0), Some(0.0)), 60.0);
        assert_eq!(hiring_similarity(Some(-1.0), Some(-4.0)), 70.0);
        assert_eq!(hiring_similarity(Some(2.0), Some(0.0)), 40.0);
        assert_eq!(hiring_similarity(Some(2.0), None), 40.0);
        assert_eq!(hiring_similarity(None, None), 50.0);
    }

    #[test]
    fn test_funding_ordinal() {
        assert_eq!(funding_similarity(Some(FundingStage::Seed), Some(FundingStage::SeriesA)), 80.0);
        assert_eq!(funding_similarity(Some(FundingStage::None), Some(FundingStage::Ipo)), 40.0);
        assert_eq!(funding_similarity(Some(FundingStage::SeriesB), Some(FundingStage::SeriesB)), 100.0);
        assert_eq!(funding_similarity(Some(FundingStage::Seed), Some(FundingStage::SeriesB)), 60.0);
        assert_eq!(funding_similarity(Some(FundingStage::Seed), Some(FundingStage::Unknown)), 40.0);
        assert_eq!(funding_similarity(None, Some(FundingStage::Seed)), 50.0);
    }

    #[test]
    fn test_signal_bonus() {
        let a = vec!["Hiring sales".to_string(), "New office".to_string()];
        let b = vec!["hiring sales".to_string()];
        assert_eq!(signal_similarity(&a, &b), 80.0);
        assert_eq!(signal_similarity(&a, &[]), 40.0);
        assert_eq!(signal_similarity(&[], &[]), 50.0);
    }

    #[test]
    fn test_activity_blend() {
        let mut a = CompanyProfile::named("A");
        let mut b = CompanyProfile::named("B");
        assert!((activity_similarity(&a, &b) - 50.0).abs() < 1e-9);

        a.recent_news_count = Some(3);
        b.recent_news_count = Some(1);
        a.website_traffic = Some(10_000.0);
        b.website_traffic = Some(11_000.0);
        // 90 * 0.6 + 100 * 0.4
        assert!((activity_similarity(&a, &b) - 94.0).abs() < 1e-9);

        b.website_traffic = Some(40_000.0);
        // 90 * 0.6 + 40 * 0.4
        assert!((activity_similarity(&a, &b) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_funding_reason_skips_none_stage() {
        let a = CompanyProfile {
            funding_stage: Some(FundingStage::None),
            ..CompanyProfile::named("A")
        };
        let b = CompanyProfile {
            funding_stage: Some(FundingStage::None),
            ..CompanyProfile::named("B")
        };
        assert!(score(&a, &b).reasons.is_empty());
    }
}
