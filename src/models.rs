use serde::{Deserialize, Serialize};

// ============ Input Models ============

/// A company snapshot as known at scoring time.
///
/// Every attribute except `name` is optional; absence is a first-class state
/// and degrades to a neutral score instead of being treated as a mismatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Caller-side identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// CNPJ (or equivalent tax id), formatted or digits only.
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Legal or trade name.
    pub name: String,

    // Firmographics
    /// Annual revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Headcount.
    #[serde(default)]
    pub employees: Option<f64>,
    /// Year-over-year growth in percent.
    #[serde(default)]
    pub growth_rate: Option<f64>,
    /// Company size class ("porte").
    #[serde(default)]
    pub size_class: Option<SizeClass>,
    /// Registered share capital ("capital social").
    #[serde(default)]
    pub registered_capital: Option<f64>,

    // Technographics
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub cloud_providers: Vec<String>,
    #[serde(default)]
    pub marketing_tools: Vec<String>,
    #[serde(default)]
    pub erp_system: Option<String>,

    // Geography
    /// State (UF code or full name).
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Macro-region; inferred from `state` when absent.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,

    // Industry
    /// Primary CNAE-like hierarchical code, e.g. "6201-5/01".
    #[serde(default)]
    pub classification_code: Option<String>,
    #[serde(default)]
    pub secondary_classification_codes: Vec<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub subsector: Option<String>,

    // Behavioral
    /// Signed hiring trend: positive growing, negative shrinking.
    #[serde(default)]
    pub hiring_trend: Option<f64>,
    #[serde(default)]
    pub funding_stage: Option<FundingStage>,
    #[serde(default)]
    pub buying_signals: Vec<String>,
    #[serde(default)]
    pub recent_news_count: Option<u32>,
    /// Monthly website visits.
    #[serde(default)]
    pub website_traffic: Option<f64>,
}

impl CompanyProfile {
    /// Creates a profile carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Tax id reduced to its digits, if any remain.
    pub fn tax_id_digits(&self) -> Option<String> {
        let digits: String = self
            .tax_id
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        (!digits.is_empty()).then_some(digits)
    }

    /// Whether `other` refers to the same company (same id or same tax id).
    pub fn is_same_company(&self, other: &CompanyProfile) -> bool {
        let same_id = matches!(
            (self.id.as_deref(), other.id.as_deref()),
            (Some(a), Some(b)) if !a.trim().is_empty() && a.trim() == b.trim()
        );
        let same_tax_id = matches!(
            (self.tax_id_digits(), other.tax_id_digits()),
            (Some(a), Some(b)) if a == b
        );
        same_id || same_tax_id
    }
}

/// Company size class ordered from smallest to largest.
///
/// Accepts the Brazilian "porte" labels used by the federal registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    #[serde(alias = "ME", alias = "MEI", alias = "me", alias = "mei")]
    Micro,
    #[serde(alias = "EPP", alias = "epp", alias = "pequena", alias = "PEQUENA")]
    Small,
    #[serde(alias = "MEDIO", alias = "MEDIA", alias = "medio", alias = "media")]
    Medium,
    #[serde(alias = "DEMAIS", alias = "demais")]
    Other,
    #[serde(alias = "GRANDE", alias = "grande")]
    Large,
    #[serde(other)]
    Unknown,
}

impl SizeClass {
    /// Position in the size hierarchy, `None` for unrecognised labels.
    pub fn rank(self) -> Option<u8> {
        match self {
            SizeClass::Micro => Some(0),
            SizeClass::Small => Some(1),
            SizeClass::Medium => Some(2),
            SizeClass::Other => Some(3),
            SizeClass::Large => Some(4),
            SizeClass::Unknown => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Micro => "micro",
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Other => "other",
            SizeClass::Large => "large",
            SizeClass::Unknown => "unknown",
        }
    }
}

/// Funding stage on a fixed ordinal ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FundingStage {
    None,
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    Ipo,
    #[serde(other)]
    Unknown,
}

impl FundingStage {
    pub fn rank(self) -> Option<u8> {
        match self {
            FundingStage::None => Some(0),
            FundingStage::Seed => Some(1),
            FundingStage::SeriesA => Some(2),
            FundingStage::SeriesB => Some(3),
            FundingStage::SeriesC => Some(4),
            FundingStage::Ipo => Some(5),
            FundingStage::Unknown => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FundingStage::None => "none",
            FundingStage::Seed => "seed",
            FundingStage::SeriesA => "series-a",
            FundingStage::SeriesB => "series-b",
            FundingStage::SeriesC => "series-c",
            FundingStage::Ipo => "ipo",
            FundingStage::Unknown => "unknown",
        }
    }
}

// ============ Scoring Configuration ============

/// Relative weight of each similarity dimension.
///
/// Weights are not required to sum to 1; the overall score scales with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityWeights {
    pub firmographics: f64,
    pub technographics: f64,
    pub geographic: f64,
    pub industry: f64,
    pub behavioral: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            firmographics: 0.40,
            technographics: 0.25,
            geographic: 0.15,
            industry: 0.15,
            behavioral: 0.05,
        }
    }
}

impl SimilarityWeights {
    /// Rejects negative or non-finite weights.
    pub fn validate(&self) -> Result<(), String> {
        let named = [
            ("firmographics", self.firmographics),
            ("technographics", self.technographics),
            ("geographic", self.geographic),
            ("industry", self.industry),
            ("behavioral", self.behavioral),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "weight '{}' must be a finite non-negative number, got {}",
                    name, value
                ));
            }
        }
        Ok(())
    }
}

/// Per-call scoring options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilarityOptions {
    /// Dimension weights; defaults to 40/25/15/15/5.
    pub weights: SimilarityWeights,
    /// Batch filter threshold. Ignored by single-pair scoring.
    pub min_score: Option<u8>,
    /// +5 when the geographic score is at least 80.
    pub prioritize_geo: bool,
    /// +5 when the technographic score is at least 75.
    pub prioritize_tech: bool,
    /// -20 when the industry score is below 60.
    pub strict_industry: bool,
    /// Skip candidates that are the target itself (same id or tax id).
    pub exclude_target: bool,
    /// Keep only the top N ranked candidates.
    pub max_results: Option<usize>,
}

// ============ Output Models ============

/// Rounded per-dimension scores, each within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub firmographics: u8,
    pub technographics: u8,
    pub geographic: u8,
    pub industry: u8,
    pub behavioral: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// Maps the share of populated checklist items (0.0..=1.0) to a level.
    pub fn from_completeness(completeness: f64) -> Self {
        if completeness >= 0.70 {
            Confidence::High
        } else if completeness >= 0.40 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityTier {
    Excellent,
    Premium,
    Qualified,
    Potential,
    Low,
}

impl SimilarityTier {
    /// Lower bounds are inclusive: 85 excellent, 70 premium, 55 qualified, 40 potential.
    pub fn from_score(score: u8) -> Self {
        match score {
            85..=u8::MAX => SimilarityTier::Excellent,
            70..=84 => SimilarityTier::Premium,
            55..=69 => SimilarityTier::Qualified,
            40..=54 => SimilarityTier::Potential,
            _ => SimilarityTier::Low,
        }
    }
}

/// Result of comparing a target with one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityScore {
    pub overall_score: u8,
    pub breakdown: ScoreBreakdown,
    /// At most five reasons, in dimension order.
    pub reasons: Vec<String>,
    pub confidence: Confidence,
    pub tier: SimilarityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchMatch {
    pub candidate: CompanyProfile,
    pub similarity: SimilarityScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedComparison {
    pub candidate: CompanyProfile,
    pub similarity: SimilarityScore,
    /// 1-based position after sorting.
    pub rank: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonStatistics {
    pub avg_score: u8,
    pub max_score: u8,
    pub min_score: u8,
    pub excellent_count: usize,
    pub premium_count: usize,
    pub qualified_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub target: CompanyProfile,
    pub comparisons: Vec<RankedComparison>,
    pub statistics: ComparisonStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_accepts_porte_labels() {
        let parsed: SizeClass = serde_json::from_str(r#""EPP""#).unwrap();
        assert_eq!(parsed, SizeClass::Small);
        let parsed: SizeClass = serde_json::from_str(r#""DEMAIS""#).unwrap();
        assert_eq!(parsed, SizeClass::Other);
        let parsed: SizeClass = serde_json::from_str(r#""gigantic""#).unwrap();
        assert_eq!(parsed, SizeClass::Unknown);
    }

    #[test]
    fn test_funding_stage_kebab_case() {
        let parsed: FundingStage = serde_json::from_str(r#""series-a""#).unwrap();
        assert_eq!(parsed, FundingStage::SeriesA);
        let parsed: FundingStage = serde_json::from_str(r#""pre-seed""#).unwrap();
        assert_eq!(parsed, FundingStage::Unknown);
    }

    #[test]
    fn test_profile_deserializes_camel_case_with_missing_fields() {
        let profile: CompanyProfile = serde_json::from_str(
            r#"{"name":"Acme","taxId":"12.345.678/0001-90","erpSystem":"SAP"}"#,
        )
        .unwrap();
        assert_eq!(profile.name, "Acme");
        assert_eq!(profile.erp_system.as_deref(), Some("SAP"));
        assert_eq!(profile.tax_id_digits().as_deref(), Some("12345678000190"));
        assert!(profile.technologies.is_empty());
    }

    #[test]
    fn test_same_company_by_tax_id() {
        let mut a = CompanyProfile::named("A");
        a.tax_id = Some("12.345.678/0001-90".to_string());
        let mut b = CompanyProfile::named("B");
        b.tax_id = Some("12345678000190".to_string());
        assert!(a.is_same_company(&b));
        assert!(!a.is_same_company(&CompanyProfile::named("C")));
    }

    #[test]
    fn test_weights_validation() {
        assert!(SimilarityWeights::default().validate().is_ok());
        let bad = SimilarityWeights {
            industry: -0.1,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_options_default_when_empty_object() {
        let options: SimilarityOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, SimilarityOptions::default());
        assert_eq!(options.weights.firmographics, 0.40);
    }
}
