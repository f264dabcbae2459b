//! Technology stack, cloud, marketing tooling and ERP overlap.

use super::text::{jaccard_index, normalize_optional, normalize_token_set};
use super::thresholds::*;
use super::DimensionScore;
use crate::models::CompanyProfile;

pub fn score(target: &CompanyProfile, candidate: &CompanyProfile) -> DimensionScore {
    let stack = set_similarity(&target.technologies, &candidate.technologies);
    let cloud = cloud_similarity(&target.cloud_providers, &candidate.cloud_providers);
    let marketing = set_similarity(&target.marketing_tools, &candidate.marketing_tools);
    let erp = erp_similarity(
        target.erp_system.as_deref(),
        candidate.erp_system.as_deref(),
    );

    let overall = stack * TECH_STACK_WEIGHT
        + cloud * TECH_CLOUD_WEIGHT
        + marketing * TECH_MARKETING_WEIGHT
        + erp * TECH_ERP_WEIGHT;

    let mut reasons = Vec::new();
    if stack >= TECH_STACK_REASON_GATE {
        let shared = shared_items(&target.technologies, &candidate.technologies);
        if !shared.is_empty() {
            let listed: Vec<&str> = shared
                .iter()
                .take(SHARED_TECH_LISTED)
                .map(String::as_str)
                .collect();
            reasons.push(format!("Shared technologies: {}", listed.join(", ")));
        }
    }
    if cloud >= CLOUD_REASON_GATE {
        let shared = shared_items(&target.cloud_providers, &candidate.cloud_providers);
        if !shared.is_empty() {
            reasons.push(format!("Same cloud provider: {}", shared.join(", ")));
        }
    }
    if let (Some(a), Some(b)) = (target.erp_system.as_deref(), candidate.erp_system.as_deref()) {
        if erp >= 100.0 {
            reasons.push(format!("Same ERP: {}", a.trim()));
        } else if erp >= 80.0 {
            reasons.push(format!("Compatible ERP: {} / {}", a.trim(), b.trim()));
        }
    }

    DimensionScore::new(overall, reasons)
}

/// Jaccard similarity with the empty-set conventions: both empty 50, one empty 30.
pub fn set_similarity(a: &[String], b: &[String]) -> f64 {
    let a = normalize_token_set(a);
    let b = normalize_token_set(b);
    match (a.is_empty(), b.is_empty()) {
        (true, true) => NEUTRAL_SCORE,
        (true, false) | (false, true) => ONE_SIDED_SET_SCORE,
        (false, false) => jaccard_index(&a, &b),
    }
}

/// Using any cloud at all counts, so both-sided usage earns a flat bonus.
pub fn cloud_similarity(a: &[String], b: &[String]) -> f64 {
    let base = set_similarity(a, b);
    let both_present =
        !normalize_token_set(a).is_empty() && !normalize_token_set(b).is_empty();
    if both_present {
        (base + CLOUD_PRESENCE_BONUS).min(100.0)
    } else {
        base
    }
}

/// Exact match 100, containment 80 ("SAP" vs "SAP Business One"), unrelated 30.
pub fn erp_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (normalize_optional(a), normalize_optional(b)) {
        (Some(a), Some(b)) if a == b => 100.0,
        (Some(a), Some(b)) if a.contains(&b) || b.contains(&a) => 80.0,
        (Some(_), Some(_)) => 30.0,
        (None, None) => NEUTRAL_SCORE,
        _ => 40.0,
    }
}

/// Items of `target` also present in `candidate`, in target order, original casing.
fn shared_items(target: &[String], candidate: &[String]) -> Vec<String> {
    let candidate = normalize_token_set(candidate);
    let mut seen = std::collections::BTreeSet::new();
    target
        .iter()
        .filter(|item| {
            let key = item.trim().to_lowercase();
            candidate.contains(&key) && seen.insert(key)
        })
        .map(|item| item.trim().to_string())
        .collect()
}
