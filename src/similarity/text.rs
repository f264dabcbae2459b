//! Normalisation and set/geometry helpers shared by the scorers.

use super::thresholds::EARTH_RADIUS_KM;
use std::collections::BTreeSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases, trims and strips diacritics ("São Paulo" -> "sao paulo").
pub fn normalize_text(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Returns the normalised value, or `None` when it is blank.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value.map(normalize_text).filter(|v| !v.is_empty())
}

/// Lowercase-trimmed token set with blanks removed.
pub fn normalize_token_set(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Jaccard index of two token sets scaled to 0..=100 and rounded.
///
/// Callers handle the empty cases; two empty sets return 0 here.
pub fn jaccard_index(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    (intersection as f64 / union as f64 * 100.0).round()
}

/// Absolute difference as a percentage of the mean of both values.
///
/// Identical values (including both zero) give 0.
pub fn percent_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs();
    if diff == 0.0 {
        return 0.0;
    }
    let mean = (a.abs() + b.abs()) / 2.0;
    diff / mean * 100.0
}

/// Great-circle distance in kilometres between two lat/lon points.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
