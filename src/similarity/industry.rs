//! Classification-code hierarchy and sector/subsector matching.

use super::text::normalize_optional;
use super::thresholds::*;
use super::DimensionScore;
use crate::models::CompanyProfile;

pub fn score(target: &CompanyProfile, candidate: &CompanyProfile) -> DimensionScore {
    let code_a = target.classification_code.as_deref().and_then(normalize_code);
    let code_b = candidate
        .classification_code
        .as_deref()
        .and_then(normalize_code);
    let code = code_similarity(code_a.as_deref(), code_b.as_deref());
    let sector = sector_similarity(target.sector.as_deref(), candidate.sector.as_deref());
    let subsector =
        subsector_similarity(target.subsector.as_deref(), candidate.subsector.as_deref());

    let overall = code * INDUSTRY_CODE_WEIGHT
        + sector * INDUSTRY_SECTOR_WEIGHT
        + subsector * INDUSTRY_SUBSECTOR_WEIGHT;

    let mut reasons = Vec::new();
    if let Some(code_a) = code_a.as_deref() {
        if code >= 100.0 {
            let raw = target.classification_code.as_deref().unwrap_or(code_a);
            reasons.push(format!("Same classification code: {}", raw.trim()));
        } else if code >= 75.0 {
            let group: String = code_a.chars().take(CODE_GROUP_DIGITS).collect();
            reasons.push(format!("Same industry group: {}", group));
        }
    }
    if let (Some(a), Some(b)) = (target.sector.as_deref(), candidate.sector.as_deref()) {
        if sector >= 100.0 {
            reasons.push(format!("Same sector: {}", a.trim()));
        } else if sector >= 70.0 {
            reasons.push(format!("Related sectors: {} / {}", a.trim(), b.trim()));
        }
    }
    if let Some(a) = target.subsector.as_deref() {
        if subsector >= 100.0 {
            reasons.push(format!("Same subsector: {}", a.trim()));
        }
    }

    DimensionScore::new(overall, reasons)
}

/// Strips the CNAE punctuation (`.`, `-`, `/`, whitespace). Blank codes yield `None`.
pub fn normalize_code(code: &str) -> Option<String> {
    let normalized: String = code
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | '/') && !c.is_whitespace())
        .collect();
    (!normalized.is_empty()).then_some(normalized)
}

/// Scores by the length of the shared leading prefix of two normalised codes.
pub fn code_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL_SCORE,
    };
    if a == b {
        return 100.0;
    }
    let shared = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count()
        .min(CODE_PREFIX_SCORES.len() - 1);
    CODE_PREFIX_SCORES[shared]
}

pub fn sector_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    let (a, b) = match (normalize_optional(a), normalize_optional(b)) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL_SCORE,
    };
    if a == b {
        return 100.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return 80.0;
    }
    let buckets_a = sector_buckets(&a);
    if sector_buckets(&b).iter().any(|bucket| buckets_a.contains(bucket)) {
        70.0
    } else {
        30.0
    }
}

pub fn subsector_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (normalize_optional(a), normalize_optional(b)) {
        (Some(a), Some(b)) if a == b => 100.0,
        (Some(a), Some(b)) if a.contains(&b) || b.contains(&a) => 75.0,
        (Some(_), Some(_)) => 30.0,
        _ => NEUTRAL_SCORE,
    }
}

/// Synonym buckets a normalised sector falls into, matched word by word.
fn sector_buckets(sector: &str) -> Vec<&'static str> {
    let words: Vec<&str> = sector
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    SECTOR_SYNONYMS
        .iter()
        .filter(|(_, keywords)| words.iter().any(|w| keywords.contains(w)))
        .map(|(bucket, _)| *bucket)
        .collect()
}
