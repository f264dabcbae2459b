//! State, region, city and distance proximity.

use super::text::{haversine_km, normalize_optional, normalize_text};
use super::thresholds::*;
use super::DimensionScore;
use crate::models::CompanyProfile;

pub fn score(target: &CompanyProfile, candidate: &CompanyProfile) -> DimensionScore {
    let state = state_similarity(target.state.as_deref(), candidate.state.as_deref());
    let region = region_similarity(target, candidate);
    let city = city_similarity(target.city.as_deref(), candidate.city.as_deref());
    let distance_km = distance_between(target, candidate);

    let overall = match distance_km {
        Some(km) => {
            state * GEO_STATE_WEIGHT
                + region * GEO_REGION_WEIGHT
                + city * GEO_CITY_WEIGHT
                + distance_score(km) * GEO_DISTANCE_WEIGHT
        }
        None => {
            state * GEO_STATE_WEIGHT_NO_COORDS
                + region * GEO_REGION_WEIGHT_NO_COORDS
                + city * GEO_CITY_WEIGHT_NO_COORDS
        }
    };

    let mut reasons = Vec::new();
    if state >= 100.0 {
        if let Some(uf) = target.state.as_deref() {
            reasons.push(format!("Same state: {}", uf.trim()));
        }
    }
    if city >= 100.0 {
        if let Some(name) = target.city.as_deref() {
            reasons.push(format!("Same city: {}", name.trim()));
        }
    }
    if state < 100.0 && region >= 80.0 {
        if let Some(name) = resolve_region(target) {
            reasons.push(format!("Same region: {}", name));
        }
    }
    if let Some(km) = distance_km {
        if distance_score(km) >= PROXIMITY_REASON_GATE {
            reasons.push(format!("Located {:.0} km apart", km));
        }
    }

    DimensionScore::new(overall, reasons)
}

pub fn state_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (normalize_optional(a), normalize_optional(b)) {
        (Some(a), Some(b)) if a == b => 100.0,
        (Some(_), Some(_)) => 30.0,
        _ => NEUTRAL_SCORE,
    }
}

/// Explicit regions on both sides compare strictly; otherwise regions are
/// inferred from the state and a match counts a little less.
pub fn region_similarity(target: &CompanyProfile, candidate: &CompanyProfile) -> f64 {
    let explicit_a = normalize_optional(target.region.as_deref());
    let explicit_b = normalize_optional(candidate.region.as_deref());
    if let (Some(a), Some(b)) = (&explicit_a, &explicit_b) {
        return if a == b { 100.0 } else { 30.0 };
    }

    match (resolve_region(target), resolve_region(candidate)) {
        (Some(a), Some(b)) if a == b => 80.0,
        (Some(_), Some(_)) => 30.0,
        _ => NEUTRAL_SCORE,
    }
}

/// Cities are binary: same city or not. Missing is neutral.
pub fn city_similarity(a: Option<&str>, b: Option<&str>) -> f64 {
    match (normalize_optional(a), normalize_optional(b)) {
        (Some(a), Some(b)) if a == b => 100.0,
        (Some(_), Some(_)) => 20.0,
        _ => NEUTRAL_SCORE,
    }
}

pub fn distance_score(km: f64) -> f64 {
    DISTANCE_BANDS
        .iter()
        .find(|(limit, _)| km <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or_else(|| PROXIMITY_FLOOR.max(100.0 - km / 50.0))
}

/// Distance in km when both sides carry coordinates.
pub fn distance_between(target: &CompanyProfile, candidate: &CompanyProfile) -> Option<f64> {
    match (
        target.latitude,
        target.longitude,
        candidate.latitude,
        candidate.longitude,
    ) {
        (Some(lat1), Some(lon1), Some(lat2), Some(lon2)) => {
            Some(haversine_km(lat1, lon1, lat2, lon2))
        }
        _ => None,
    }
}

/// Macro-region from the explicit field, falling back to the state lookup.
pub fn resolve_region(profile: &CompanyProfile) -> Option<String> {
    normalize_optional(profile.region.as_deref())
        .or_else(|| profile.state.as_deref().and_then(region_for_state))
}

/// Looks up a state by UF code or full name.
pub fn region_for_state(state: &str) -> Option<String> {
    let key = normalize_text(state);
    STATE_REGIONS
        .iter()
        .find(|(uf, name, _)| *uf == key || *name == key)
        .map(|(_, _, region)| region.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(state: &str, city: &str) -> CompanyProfile {
        CompanyProfile {
            state: Some(state.to_string()),
            city: Some(city.to_string()),
            ..CompanyProfile::named("X")
        }
    }

    #[test]
    fn test_state_and_city_matching() {
        assert_eq!(state_similarity(Some(" sp"), Some("SP")), 100.0);
        assert_eq!(state_similarity(Some("SP"), Some("RJ")), 30.0);
        assert_eq!(state_similarity(None, Some("RJ")), 50.0);
        assert_eq!(city_similarity(Some("São Paulo"), Some("sao paulo")), 100.0);
        assert_eq!(city_similarity(Some("Campinas"), Some("Santos")), 20.0);
        assert_eq!(city_similarity(Some("Campinas"), None), 50.0);
    }

    #[test]
    fn test_region_inference() {
        assert_eq!(region_for_state("SP").as_deref(), Some("sudeste"));
        assert_eq!(region_for_state("São Paulo").as_deref(), Some("sudeste"));
        assert_eq!(region_for_state("Atlantis"), None);

        let sp = located("SP", "Campinas");
        let rj = located("RJ", "Niteroi");
        let rs = located("RS", "Porto Alegre");
        assert_eq!(region_similarity(&sp, &rj), 80.0);
        assert_eq!(region_similarity(&sp, &rs), 30.0);

        let explicit_a = CompanyProfile {
            region: Some("Sudeste".to_string()),
            ..sp.clone()
        };
        let explicit_b = CompanyProfile {
            region: Some("sudeste".to_string()),
            ..rj.clone()
        };
        assert_eq!(region_similarity(&explicit_a, &explicit_b), 100.0);
        assert_eq!(
            region_similarity(&CompanyProfile::named("A"), &CompanyProfile::named("B")),
            50.0
        );
    }

    #[test]
    fn test_distance_bands() {
        assert_eq!(distance_score(0.0), 100.0);
        assert_eq!(distance_score(360.0), 60.0);
        assert_eq!(distance_score(1500.0), 70.0);
        assert_eq!(distance_score(5000.0), 20.0);
    }

    #[test]
    fn test_coordinates_change_weighting() {
        let mut a = located("SP", "Sao Paulo");
        let mut b = located("RJ", "Rio de Janeiro");
        let without = score(&a, &b).score;
        // state 30*0.5 + region 80*0.3 + city 20*0.2
        assert!((without - 43.0).abs() < 1e-9);

        a.latitude = Some(-23.5505);
        a.longitude = Some(-46.6333);
        b.latitude = Some(-22.9068);
        b.longitude = Some(-43.1729);
        let with = score(&a, &b).score;
        // state 30*0.4 + region 80*0.25 + city 20*0.2 + distance 60*0.15
        assert!((with - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_reason_only_when_state_differs() {
        let same_state = score(&located("SP", "Campinas"), &located("SP", "Santos"));
        assert_eq!(same_state.reasons, vec!["Same state: SP".to_string()]);

        let neighbours = score(&located("SP", "Campinas"), &located("MG", "Uberaba"));
        assert_eq!(neighbours.reasons, vec!["Same region: sudeste".to_string()]);
    }
}
