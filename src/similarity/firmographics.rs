//! Revenue, headcount, growth and size-class proximity.

use super::text::percent_difference;
use super::thresholds::*;
use super::DimensionScore;
use crate::models::{CompanyProfile, SizeClass};

pub fn score(target: &CompanyProfile, candidate: &CompanyProfile) -> DimensionScore {
    let revenue = revenue_similarity(target.revenue, candidate.revenue);
    let employees = employee_similarity(target.employees, candidate.employees);
    let growth = growth_similarity(target.growth_rate, candidate.growth_rate);
    let size_class = size_class_similarity(target.size_class, candidate.size_class);

    let overall = revenue * FIRMO_REVENUE_WEIGHT
        + employees * FIRMO_EMPLOYEES_WEIGHT
        + growth * FIRMO_GROWTH_WEIGHT
        + size_class * FIRMO_SIZE_CLASS_WEIGHT;

    let mut reasons = Vec::new();
    if let (Some(a), Some(b)) = (target.revenue, candidate.revenue) {
        if revenue >= FIRMO_REASON_GATE {
            reasons.push(format!(
                "Revenue within ±{:.0}%",
                percent_difference(a, b).ceil()
            ));
        }
    }
    if let (Some(a), Some(b)) = (target.employees, candidate.employees) {
        if employees >= FIRMO_REASON_GATE {
            reasons.push(format!("Similar employee count ({:.0} vs {:.0})", a, b));
        }
    }
    if matches!(
        (target.growth_rate, candidate.growth_rate),
        (Some(a), Some(b)) if a > 0.0 && b > 0.0
    ) {
        reasons.push("Both companies growing".to_string());
    }
    if let Some(class) = target.size_class {
        if size_class >= 100.0 {
            reasons.push(format!("Same size class: {}", class.label()));
        }
    }

    DimensionScore::new(overall, reasons)
}

fn proximity(a: Option<f64>, b: Option<f64>, bands: &[(f64, f64)]) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => band_score(bands, percent_difference(a, b)),
        _ => NEUTRAL_SCORE,
    }
}

pub fn revenue_similarity(a: Option<f64>, b: Option<f64>) -> f64 {
    proximity(a, b, &REVENUE_BANDS)
}

pub fn employee_similarity(a: Option<f64>, b: Option<f64>) -> f64 {
    proximity(a, b, &EMPLOYEE_BANDS)
}

/// Same direction of growth matters more than the exact rates.
pub fn growth_similarity(a: Option<f64>, b: Option<f64>) -> f64 {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL_SCORE,
    };
    if a > 0.0 && b > 0.0 {
        return 90.0;
    }
    if a < 0.0 && b < 0.0 {
        return 60.0;
    }
    if (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0) {
        return 30.0;
    }

    let diff = (a - b).abs();
    if diff <= 5.0 {
        95.0
    } else if diff <= 10.0 {
        85.0
    } else if diff <= 20.0 {
        70.0
    } else {
        40.0_f64.max(100.0 - 2.0 * diff)
    }
}

pub fn size_class_similarity(a: Option<SizeClass>, b: Option<SizeClass>) -> f64 {
    let (a, b) = match (a.and_then(SizeClass::rank), b.and_then(SizeClass::rank)) {
        (Some(a), Some(b)) => (a, b),
        _ => return NEUTRAL_SCORE,
    };
    match a.abs_diff(b) {
        0 => 100.0,
        1 => 80.0,
        2 => 60.0,
        _ => 40.0,
    }
}
