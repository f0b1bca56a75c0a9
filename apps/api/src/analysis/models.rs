//! Wire types for analysis and keyword extraction.
//!
//! Deserialization is lenient because the values come from a language model:
//! missing or `null` fields fall back to defaults, scores accept any numeric
//! form and are clamped into 0..=100 (non-numeric scores read as 0), and
//! `importance` ignores case with unknown levels read as Medium. A list where
//! a string belongs still fails.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Full analysis of one resume against one job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "score")]
    pub ats_score: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub matched_keywords: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub missing_keywords: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub skill_gaps: Vec<SkillGap>,
    #[serde(default, deserialize_with = "nullable")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub improvement_areas: ImprovementAreas,
    #[serde(default, deserialize_with = "nullable")]
    pub enhanced_sections: EnhancedSections,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGap {
    #[serde(default, deserialize_with = "nullable")]
    pub skill: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default, deserialize_with = "nullable")]
    pub suggestion: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Importance {
    High,
    #[default]
    Medium,
    Low,
}

impl Importance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::High => "High",
            Importance::Medium => "Medium",
            Importance::Low => "Low",
        }
    }
}

impl Serialize for Importance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        // Anything the model invents ("Critical", 3, null) reads as Medium.
        Ok(match raw.as_str().map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("high") => Importance::High,
            Some(s) if s.eq_ignore_ascii_case("low") => Importance::Low,
            _ => Importance::Medium,
        })
    }
}

/// Sub-scores, each 0..=100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImprovementAreas {
    #[serde(default, deserialize_with = "score")]
    pub technical: u8,
    #[serde(default, deserialize_with = "score")]
    pub experience: u8,
    #[serde(default, deserialize_with = "score")]
    pub keywords: u8,
    #[serde(default, deserialize_with = "score")]
    pub formatting: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnhancedSections {
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience: String,
    #[serde(default, deserialize_with = "nullable")]
    pub achievements: Vec<String>,
}

/// Keywords pulled from a job description, grouped six ways.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordExtraction {
    #[serde(default, deserialize_with = "nullable")]
    pub technical_skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub soft_skills: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub tools_technologies: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub industry_keywords: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub experience_keywords: Vec<String>,
}

/// Treats an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `87`, `87.6`, `"87"` or `"87%"`; rounds and clamps into 0..=100.
/// Anything else (null, prose, objects) scores 0.
fn score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(number
        .filter(|n| n.is_finite())
        .map_or(0, |n| n.round().clamp(0.0, 100.0) as u8))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_analysis_json() -> Value {
        json!({
            "atsScore": 78,
            "matchedKeywords": ["Rust", "PostgreSQL"],
            "missingKeywords": ["Kubernetes", "gRPC"],
            "skillGaps": [
                {"skill": "Kubernetes", "importance": "High", "suggestion": "Deploy a side project on k8s"}
            ],
            "suggestions": ["Quantify the latency work"],
            "improvementAreas": {"technical": 80, "experience": 70, "keywords": 65, "formatting": 90},
            "enhancedSections": {
                "summary": "Backend engineer focused on Rust services.",
                "skills": ["Rust", "Tokio"],
                "experience": "Lead with the payments migration.",
                "achievements": ["Cut p99 latency by 40%"]
            }
        })
    }

    #[test]
    fn test_full_analysis_deserializes() {
        let analysis: AnalysisResult = serde_json::from_value(full_analysis_json()).unwrap();
        assert_eq!(analysis.ats_score, 78);
        assert_eq!(analysis.matched_keywords, vec!["Rust", "PostgreSQL"]);
        assert_eq!(analysis.skill_gaps[0].importance, Importance::High);
        assert_eq!(analysis.improvement_areas.formatting, 90);
        assert_eq!(analysis.enhanced_sections.skills.len(), 2);
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let analysis: AnalysisResult = serde_json::from_value(full_analysis_json()).unwrap();
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value, full_analysis_json());
    }

    #[test]
    fn test_missing_and_null_fields_default() {
        let analysis: AnalysisResult =
            serde_json::from_value(json!({"atsScore": 55, "suggestions": null})).unwrap();
        assert_eq!(analysis.ats_score, 55);
        assert!(analysis.suggestions.is_empty());
        assert!(analysis.skill_gaps.is_empty());
        assert_eq!(analysis.improvement_areas, ImprovementAreas::default());
    }

    #[test]
    fn test_scores_are_coerced_and_clamped() {
        let areas: ImprovementAreas = serde_json::from_value(json!({
            "technical": 87.6,
            "experience": "64",
            "keywords": 140,
            "formatting": -5
        }))
        .unwrap();
        assert_eq!(areas.technical, 88);
        assert_eq!(areas.experience, 64);
        assert_eq!(areas.keywords, 100);
        assert_eq!(areas.formatting, 0);
    }

    #[test]
    fn test_non_numeric_score_reads_as_zero() {
        let analysis: AnalysisResult = serde_json::from_value(json!({
            "atsScore": "excellent",
            "improvementAreas": {"technical": {"value": 80}, "experience": [70]}
        }))
        .unwrap();
        assert_eq!(analysis.ats_score, 0);
        assert_eq!(analysis.improvement_areas.technical, 0);
        assert_eq!(analysis.improvement_areas.experience, 0);
    }

    #[test]
    fn test_importance_is_case_insensitive() {
        let gap: SkillGap =
            serde_json::from_value(json!({"skill": "Go", "importance": "low", "suggestion": ""}))
                .unwrap();
        assert_eq!(gap.importance, Importance::Low);
        assert_eq!(serde_json::to_value(gap.importance).unwrap(), json!("Low"));
    }

    #[test]
    fn test_unknown_importance_reads_as_medium() {
        let gap: SkillGap =
            serde_json::from_value(json!({"skill": "Go", "importance": "Critical"})).unwrap();
        assert_eq!(gap.importance, Importance::Medium);

        let gap: SkillGap =
            serde_json::from_value(json!({"skill": "Go", "importance": 3})).unwrap();
        assert_eq!(gap.importance, Importance::Medium);
    }

    #[test]
    fn test_keyword_extraction_uses_snake_case() {
        let keywords: KeywordExtraction = serde_json::from_value(json!({
            "technical_skills": ["Rust"],
            "soft_skills": ["Mentoring"],
            "tools_technologies": ["Docker"],
            "industry_keywords": ["fintech"],
            "certifications": [],
            "experience_keywords": ["5+ years"]
        }))
        .unwrap();
        assert_eq!(keywords.tools_technologies, vec!["Docker"]);
        let value = serde_json::to_value(&keywords).unwrap();
        assert!(value.get("experience_keywords").is_some());
    }
}
