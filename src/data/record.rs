use std::{fmt, str::FromStr, sync::Arc};

use anyhow::anyhow;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Stable key for a district across both record collections.
/// Keep the original id text (with leading zeros) but avoid repeated owned Strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistrictId(Arc<str>);

impl DistrictId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DistrictId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Default for DistrictId {
    fn default() -> Self {
        Self(Arc::from(""))
    }
}

/// Ids arrive as numbers in some documents and strings in others; both decode
/// to the same key text so the collections can be joined.
impl<'de> Deserialize<'de> for DistrictId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let id = match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => i.to_string(),
                None => n.to_string(),
            },
            Value::String(s) => s.trim().to_string(),
            _ => String::new(),
        };
        Ok(Self(Arc::from(id)))
    }
}

/// The nine numeric district columns selectable as axis dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    StudentCount,
    SpedPct,
    OverallScoreMean,
    StudentAchievementScoreMean,
    AcademicGrowthScoreMean,
    ClosingGapsScoreMean,
    EconomicallyDisadvantagedPct,
    LepPct,
    OverperformanceScoreMean,
}

impl MetricField {
    /// Every selectable field, in the order the axis menus list them.
    pub const ALL: [MetricField; 9] = [
        MetricField::StudentCount,
        MetricField::SpedPct,
        MetricField::OverallScoreMean,
        MetricField::StudentAchievementScoreMean,
        MetricField::AcademicGrowthScoreMean,
        MetricField::ClosingGapsScoreMean,
        MetricField::EconomicallyDisadvantagedPct,
        MetricField::LepPct,
        MetricField::OverperformanceScoreMean,
    ];

    /// The column name as it appears in the source documents.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricField::StudentCount => "StudentCount",
            MetricField::SpedPct => "SPEDPct",
            MetricField::OverallScoreMean => "OverallScoreMean",
            MetricField::StudentAchievementScoreMean => "StudentAchievementScoreMean",
            MetricField::AcademicGrowthScoreMean => "AcademicGrowthScoreMean",
            MetricField::ClosingGapsScoreMean => "ClosingGapsScoreMean",
            MetricField::EconomicallyDisadvantagedPct => "EconomicallyDisadvantagedPct",
            MetricField::LepPct => "LEPPct",
            MetricField::OverperformanceScoreMean => "OverperformanceScoreMean",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow!(
                    "[MetricField] Unknown metric field: {s:?} (expected one of {})",
                    MetricField::ALL.map(MetricField::as_str).join(", ")
                )
            })
    }
}

/// Campus grade band, decoded from the one-letter source codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchoolType {
    Elementary,
    Middle,
    Secondary,
    Blended,
    #[default]
    Unknown,
}

impl SchoolType {
    /// Decode the one-letter source code. Unrecognized codes map to `Unknown`
    /// rather than rejecting the row.
    pub fn from_code(code: &str) -> Self {
        match code.trim().chars().next() {
            Some('E' | 'e') => SchoolType::Elementary,
            Some('M' | 'm') => SchoolType::Middle,
            Some('S' | 's' | 'H' | 'h') => SchoolType::Secondary,
            Some('B' | 'b') => SchoolType::Blended,
            _ => SchoolType::Unknown,
        }
    }

    /// One-letter code shown in the drill-down table.
    pub fn code(self) -> &'static str {
        match self {
            SchoolType::Elementary => "E",
            SchoolType::Middle => "M",
            SchoolType::Secondary => "S",
            SchoolType::Blended => "B",
            SchoolType::Unknown => "?",
        }
    }
}

impl fmt::Display for SchoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl<'de> Deserialize<'de> for SchoolType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => SchoolType::from_code(&s),
            _ => SchoolType::Unknown,
        })
    }
}

/// Sign of a campus overperformance gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverUnder {
    Over,
    Under,
}

impl fmt::Display for OverUnder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OverUnder::Over => "+",
            OverUnder::Under => "-",
        })
    }
}

fn nan() -> f64 {
    f64::NAN
}

/// Numbers pass through; numeric strings parse; everything else becomes NaN.
/// Malformed fields never reject the row.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// "+"/"-" markers decode to a sign; anything else is left for `normalize`
/// to derive from the scores.
fn lenient_sign<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<OverUnder>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => match s.trim() {
            "+" => Some(OverUnder::Over),
            "-" => Some(OverUnder::Under),
            _ => None,
        },
        _ => None,
    })
}

/// One district row of the district-level document.
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictRecord {
    #[serde(rename = "DistrictID", default)]
    pub district_id: DistrictId,
    #[serde(rename = "DistrictName", default)]
    pub district_name: String,
    #[serde(rename = "RegionName", default)]
    pub region_name: String,
    #[serde(rename = "TEADescription", default)]
    pub tea_description: String, // accountability category, drives the color mapping
    #[serde(rename = "Campuses", default = "nan", deserialize_with = "lenient_f64")]
    pub campuses: f64,
    #[serde(rename = "StudentCount", default = "nan", deserialize_with = "lenient_f64")]
    pub student_count: f64,
    #[serde(rename = "SPEDPct", default = "nan", deserialize_with = "lenient_f64")]
    pub sped_pct: f64,
    #[serde(rename = "OverallScoreMean", default = "nan", deserialize_with = "lenient_f64")]
    pub overall_score_mean: f64,
    #[serde(rename = "StudentAchievementScoreMean", default = "nan", deserialize_with = "lenient_f64")]
    pub student_achievement_score_mean: f64,
    #[serde(rename = "AcademicGrowthScoreMean", default = "nan", deserialize_with = "lenient_f64")]
    pub academic_growth_score_mean: f64,
    #[serde(rename = "ClosingGapsScoreMean", default = "nan", deserialize_with = "lenient_f64")]
    pub closing_gaps_score_mean: f64,
    #[serde(rename = "EconomicallyDisadvantagedPct", default = "nan", deserialize_with = "lenient_f64")]
    pub economically_disadvantaged_pct: f64,
    #[serde(rename = "LEPPct", default = "nan", deserialize_with = "lenient_f64")]
    pub lep_pct: f64,
    #[serde(rename = "OverperformanceScoreMean", default = "nan", deserialize_with = "lenient_f64")]
    pub overperformance_score_mean: f64,
}

impl DistrictRecord {
    /// Value of the given metric column (the typed analog of row lookup by
    /// column name).
    pub fn metric(&self, field: MetricField) -> f64 {
        match field {
            MetricField::StudentCount => self.student_count,
            MetricField::SpedPct => self.sped_pct,
            MetricField::OverallScoreMean => self.overall_score_mean,
            MetricField::StudentAchievementScoreMean => self.student_achievement_score_mean,
            MetricField::AcademicGrowthScoreMean => self.academic_growth_score_mean,
            MetricField::ClosingGapsScoreMean => self.closing_gaps_score_mean,
            MetricField::EconomicallyDisadvantagedPct => self.economically_disadvantaged_pct,
            MetricField::LepPct => self.lep_pct,
            MetricField::OverperformanceScoreMean => self.overperformance_score_mean,
        }
    }
}

impl Default for DistrictRecord {
    fn default() -> Self {
        Self {
            district_id: DistrictId::default(),
            district_name: String::new(),
            region_name: String::new(),
            tea_description: String::new(),
            campuses: f64::NAN,
            student_count: f64::NAN,
            sped_pct: f64::NAN,
            overall_score_mean: f64::NAN,
            student_achievement_score_mean: f64::NAN,
            academic_growth_score_mean: f64::NAN,
            closing_gaps_score_mean: f64::NAN,
            economically_disadvantaged_pct: f64::NAN,
            lep_pct: f64::NAN,
            overperformance_score_mean: f64::NAN,
        }
    }
}

/// One campus row of the campus-level document.
#[derive(Debug, Clone, Deserialize)]
pub struct CampusRecord {
    #[serde(rename = "DistrictID", default)]
    pub district_id: DistrictId,
    #[serde(rename = "DistrictName", default)]
    pub district_name: String,
    #[serde(rename = "CampusName", default)]
    pub campus_name: String,
    #[serde(rename = "SchoolType", default)]
    pub school_type: SchoolType,
    #[serde(rename = "StudentCount", default = "nan", deserialize_with = "lenient_f64")]
    pub student_count: f64,
    #[serde(rename = "EconomicallyDisadvantagedPct", default = "nan", deserialize_with = "lenient_f64")]
    pub economically_disadvantaged_pct: f64,
    #[serde(rename = "LEPPct", default = "nan", deserialize_with = "lenient_f64")]
    pub lep_pct: f64,
    #[serde(rename = "SPEDPct", default = "nan", deserialize_with = "lenient_f64")]
    pub sped_pct: f64,
    #[serde(rename = "StudentMobilityPct", default = "nan", deserialize_with = "lenient_f64")]
    pub student_mobility_pct: f64,
    #[serde(rename = "OverallScore", default = "nan", deserialize_with = "lenient_f64")]
    pub overall_score: f64,
    #[serde(rename = "ModelOverallScore", default = "nan", deserialize_with = "lenient_f64")]
    pub model_overall_score: f64,
    #[serde(rename = "Overperformance", default = "nan", deserialize_with = "lenient_f64")]
    pub overperformance: f64,
    #[serde(rename = "OverUnder", default, deserialize_with = "lenient_sign")]
    pub over_under: Option<OverUnder>,
}

impl CampusRecord {
    /// Fill in the fields the source may omit: the overperformance gap
    /// (actual minus predicted) and its sign marker.
    pub(crate) fn normalize(&mut self) {
        if !self.overperformance.is_finite() {
            self.overperformance = self.overall_score - self.model_overall_score;
        }
        if self.over_under.is_none() && self.overperformance.is_finite() {
            self.over_under = Some(if self.overperformance >= 0.0 {
                OverUnder::Over
            } else {
                OverUnder::Under
            });
        }
    }

    /// Sign of the overperformance gap. Campuses with no decidable sign
    /// count as underperforming.
    #[inline]
    pub fn sign(&self) -> OverUnder {
        self.over_under.unwrap_or(OverUnder::Under)
    }
}

impl Default for CampusRecord {
    fn default() -> Self {
        Self {
            district_id: DistrictId::default(),
            district_name: String::new(),
            campus_name: String::new(),
            school_type: SchoolType::Unknown,
            student_count: f64::NAN,
            economically_disadvantaged_pct: f64::NAN,
            lep_pct: f64::NAN,
            sped_pct: f64::NAN,
            student_mobility_pct: f64::NAN,
            overall_score: f64::NAN,
            model_overall_score: f64::NAN,
            overperformance: f64::NAN,
            over_under: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn district_id_decodes_numbers_and_strings() {
        let from_number: DistrictId = serde_json::from_str("101912").unwrap();
        let from_string: DistrictId = serde_json::from_str(r#" "101912" "#).unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.as_str(), "101912");
    }

    #[test]
    fn lenient_metrics_never_reject_a_row() {
        let row: DistrictRecord = serde_json::from_str(
            r#"{
                "DistrictID": 101912,
                "DistrictName": "Houston ISD",
                "OverallScoreMean": "78.5",
                "SPEDPct": null,
                "LEPPct": "not a number"
            }"#,
        )
        .unwrap();
        assert_eq!(row.district_name, "Houston ISD");
        assert_eq!(row.overall_score_mean, 78.5);
        assert!(row.sped_pct.is_nan());
        assert!(row.lep_pct.is_nan());
        assert!(row.student_count.is_nan()); // absent entirely
    }

    #[test]
    fn metric_field_round_trips_column_names() {
        for field in MetricField::ALL {
            assert_eq!(field.as_str().parse::<MetricField>().unwrap(), field);
        }
        let err = "NotAColumn".parse::<MetricField>().unwrap_err();
        assert!(err.to_string().contains("OverallScoreMean")); // lists the valid names
    }

    #[test]
    fn school_type_decodes_letter_codes() {
        assert_eq!(SchoolType::from_code("E"), SchoolType::Elementary);
        assert_eq!(SchoolType::from_code("S"), SchoolType::Secondary);
        assert_eq!(SchoolType::from_code("B"), SchoolType::Blended);
        assert_eq!(SchoolType::from_code("X"), SchoolType::Unknown);
        assert_eq!(SchoolType::Unknown.code(), "?");
    }

    #[test]
    fn normalize_derives_gap_and_sign() {
        let mut campus = CampusRecord {
            overall_score: 82.0,
            model_overall_score: 79.0,
            ..CampusRecord::default()
        };
        campus.normalize();
        assert_eq!(campus.overperformance, 3.0);
        assert_eq!(campus.sign(), OverUnder::Over);

        let mut campus = CampusRecord {
            overall_score: 70.0,
            model_overall_score: 75.0,
            ..CampusRecord::default()
        };
        campus.normalize();
        assert_eq!(campus.overperformance, -5.0);
        assert_eq!(campus.sign(), OverUnder::Under);
    }

    #[test]
    fn explicit_sign_marker_wins_over_derivation() {
        let mut campus = CampusRecord {
            overall_score: 82.0,
            model_overall_score: 79.0,
            over_under: Some(OverUnder::Under),
            ..CampusRecord::default()
        };
        campus.normalize();
        assert_eq!(campus.sign(), OverUnder::Under);
    }

    #[test]
    fn undecidable_sign_counts_as_under() {
        let campus = CampusRecord::default();
        assert_eq!(campus.sign(), OverUnder::Under);
    }
}
