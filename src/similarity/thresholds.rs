//! Fixed weights, band limits and lookup tables used by the scorers.
//!
//! Nothing here is mutable; scorers read these tables directly.

/// Score used whenever a signal is missing on either side.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Maximum number of reasons kept on a `SimilarityScore`.
pub const MAX_REASONS: usize = 5;

// ============ Firmographics ============

pub const FIRMO_REVENUE_WEIGHT: f64 = 0.35;
pub const FIRMO_EMPLOYEES_WEIGHT: f64 = 0.35;
pub const FIRMO_GROWTH_WEIGHT: f64 = 0.15;
pub const FIRMO_SIZE_CLASS_WEIGHT: f64 = 0.15;

/// `(max percent difference, score)` bands for revenue proximity.
pub const REVENUE_BANDS: [(f64, f64); 5] = [
    (10.0, 100.0),
    (20.0, 90.0),
    (30.0, 75.0),
    (50.0, 60.0),
    (100.0, 40.0),
];

/// `(max percent difference, score)` bands for headcount proximity.
pub const EMPLOYEE_BANDS: [(f64, f64); 5] = [
    (15.0, 100.0),
    (25.0, 90.0),
    (40.0, 75.0),
    (60.0, 60.0),
    (100.0, 40.0),
];

/// Floor for proximity beyond the last band.
pub const PROXIMITY_FLOOR: f64 = 20.0;

/// Firmographic reasons need at least this sub-score.
pub const FIRMO_REASON_GATE: f64 = 80.0;

// ============ Technographics ============

pub const TECH_STACK_WEIGHT: f64 = 0.50;
pub const TECH_CLOUD_WEIGHT: f64 = 0.20;
pub const TECH_MARKETING_WEIGHT: f64 = 0.15;
pub const TECH_ERP_WEIGHT: f64 = 0.15;

/// Set score when exactly one side has entries.
pub const ONE_SIDED_SET_SCORE: f64 = 30.0;
/// Bonus over raw Jaccard when both sides use at least one cloud.
pub const CLOUD_PRESENCE_BONUS: f64 = 20.0;

pub const TECH_STACK_REASON_GATE: f64 = 40.0;
pub const CLOUD_REASON_GATE: f64 = 60.0;
/// How many shared technologies a reason lists.
pub const SHARED_TECH_LISTED: usize = 3;

// ============ Geography ============

pub const GEO_STATE_WEIGHT: f64 = 0.40;
pub const GEO_REGION_WEIGHT: f64 = 0.25;
pub const GEO_CITY_WEIGHT: f64 = 0.20;
pub const GEO_DISTANCE_WEIGHT: f64 = 0.15;

/// Weights used when coordinates are missing on either side.
pub const GEO_STATE_WEIGHT_NO_COORDS: f64 = 0.50;
pub const GEO_REGION_WEIGHT_NO_COORDS: f64 = 0.30;
pub const GEO_CITY_WEIGHT_NO_COORDS: f64 = 0.20;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// `(max km, score)` bands for great-circle distance.
pub const DISTANCE_BANDS: [(f64, f64); 5] = [
    (50.0, 100.0),
    (100.0, 90.0),
    (200.0, 80.0),
    (500.0, 60.0),
    (1000.0, 40.0),
];

pub const PROXIMITY_REASON_GATE: f64 = 80.0;

/// Brazilian states (UF code and full name) by macro-region.
pub static STATE_REGIONS: &[(&str, &str, &str)] = &[
    ("ac", "acre", "norte"),
    ("am", "amazonas", "norte"),
    ("ap", "amapa", "norte"),
    ("pa", "para", "norte"),
    ("ro", "rondonia", "norte"),
    ("rr", "roraima", "norte"),
    ("to", "tocantins", "norte"),
    ("al", "alagoas", "nordeste"),
    ("ba", "bahia", "nordeste"),
    ("ce", "ceara", "nordeste"),
    ("ma", "maranhao", "nordeste"),
    ("pb", "paraiba", "nordeste"),
    ("pe", "pernambuco", "nordeste"),
    ("pi", "piaui", "nordeste"),
    ("rn", "rio grande do norte", "nordeste"),
    ("se", "sergipe", "nordeste"),
    ("df", "distrito federal", "centro-oeste"),
    ("go", "goias", "centro-oeste"),
    ("ms", "mato grosso do sul", "centro-oeste"),
    ("mt", "mato grosso", "centro-oeste"),
    ("es", "espirito santo", "sudeste"),
    ("mg", "minas gerais", "sudeste"),
    ("rj", "rio de janeiro", "sudeste"),
    ("sp", "sao paulo", "sudeste"),
    ("pr", "parana", "sul"),
    ("rs", "rio grande do sul", "sul"),
    ("sc", "santa catarina", "sul"),
];

// ============ Industry ============

pub const INDUSTRY_CODE_WEIGHT: f64 = 0.50;
pub const INDUSTRY_SECTOR_WEIGHT: f64 = 0.35;
pub const INDUSTRY_SUBSECTOR_WEIGHT: f64 = 0.15;

/// Score by number of leading digits shared, index = shared prefix length (capped at 4).
pub const CODE_PREFIX_SCORES: [f64; 5] = [20.0, 40.0, 60.0, 75.0, 90.0];

/// Digits that make up an industry group.
pub const CODE_GROUP_DIGITS: usize = 3;

/// Related-sector buckets. A sector belongs to a bucket when one of its words
/// is a keyword of that bucket.
pub static SECTOR_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "industria",
        &["industria", "industrial", "fabricante", "fabricacao", "manufatura", "producao"],
    ),
    (
        "servicos",
        &["servicos", "servico", "consultoria", "assessoria", "prestacao", "terceirizacao"],
    ),
    (
        "comercio",
        &["comercio", "varejo", "atacado", "loja", "distribuicao", "distribuidora", "revenda"],
    ),
    (
        "tecnologia",
        &["tecnologia", "software", "ti", "informatica", "saas", "digital", "internet"],
    ),
    (
        "saude",
        &["saude", "hospital", "hospitalar", "clinica", "farmacia", "farmaceutica", "medico", "medicina"],
    ),
    (
        "educacao",
        &["educacao", "ensino", "escola", "universidade", "faculdade", "treinamento", "cursos"],
    ),
    (
        "construcao",
        &["construcao", "construtora", "engenharia", "imobiliario", "imobiliaria", "obras", "incorporadora"],
    ),
    (
        "agronegocio",
        &["agronegocio", "agro", "agricultura", "agricola", "pecuaria", "rural", "agropecuaria"],
    ),
];

// ============ Behavioral ============

pub const BEHAVIOR_HIRING_WEIGHT: f64 = 0.35;
pub const BEHAVIOR_FUNDING_WEIGHT: f64 = 0.20;
pub const BEHAVIOR_SIGNALS_WEIGHT: f64 = 0.25;
pub const BEHAVIOR_ACTIVITY_WEIGHT: f64 = 0.20;

pub const ACTIVITY_NEWS_WEIGHT: f64 = 0.6;
pub const ACTIVITY_TRAFFIC_WEIGHT: f64 = 0.4;

/// Bonus over raw Jaccard when both sides show at least one buying signal.
pub const SIGNAL_PRESENCE_BONUS: f64 = 30.0;

/// `(max percent difference, score)` bands for website traffic.
pub const TRAFFIC_BANDS: [(f64, f64); 3] = [(20.0, 100.0), (50.0, 80.0), (100.0, 60.0)];
pub const TRAFFIC_FLOOR: f64 = 40.0;

pub const SIGNALS_REASON_GATE: f64 = 70.0;

// ============ Aggregation ============

pub const GEO_PRIORITY_GATE: f64 = 80.0;
pub const TECH_PRIORITY_GATE: f64 = 75.0;
pub const PRIORITY_BONUS: f64 = 5.0;
pub const STRICT_INDUSTRY_GATE: f64 = 60.0;
pub const STRICT_INDUSTRY_PENALTY: f64 = 20.0;

/// Number of items on the data-completeness checklist.
pub const CONFIDENCE_CHECKLIST_SIZE: f64 = 20.0;

/// Looks up a proximity band, falling back to `max(floor, 100 - diff)`.
pub fn band_score(bands: &[(f64, f64)], diff: f64) -> f64 {
    bands
        .iter()
        .find(|(limit, _)| diff <= *limit)
        .map(|(_, score)| *score)
        .unwrap_or_else(|| PROXIMITY_FLOOR.max(100.0 - diff))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_score_edges() {
        assert_eq!(band_score(&REVENUE_BANDS, 10.0), 100.0);
        assert_eq!(band_score(&REVENUE_BANDS, 10.5), 90.0);
        assert_eq!(band_score(&REVENUE_BANDS, 100.0), 40.0);
        // Beyond 100% the floor always wins for percent differences.
        assert_eq!(band_score(&REVENUE_BANDS, 150.0), 20.0);
    }

    #[test]
    fn test_every_state_maps_to_known_region() {
        let regions = ["norte", "nordeste", "centro-oeste", "sudeste", "sul"];
        assert_eq!(STATE_REGIONS.len(), 27);
        for (_, _, region) in STATE_REGIONS {
            assert!(regions.contains(region));
        }
    }
}
