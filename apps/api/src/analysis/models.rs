//! Structured résumé analysis as returned by the model.
//!
//! The model is asked for a fixed schema but does not always honour it, so every
//! field defaults when absent and a few shapes are accepted leniently
//! (a bare string where a list is expected, skills as plain names, percentages
//! as "85%").

use serde::{Deserialize, Deserializer, Serialize};

/// Message stored in `raw` when the model reply could not be used.
pub const ANALYSIS_FAILED: &str = "AI analysis failed.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    #[serde(deserialize_with = "lenient::string")]
    pub summary: String,
    #[serde(alias = "value", deserialize_with = "lenient::string")]
    pub value_proposition: String,
    #[serde(deserialize_with = "lenient::string_or_seq")]
    pub highlights: Vec<String>,
    #[serde(deserialize_with = "lenient::seq_or_null")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "lenient::seq_or_null")]
    pub segments: Vec<ResumeSegment>,
    #[serde(deserialize_with = "lenient::seq_or_null")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(deserialize_with = "lenient::seq_or_null")]
    pub education: Vec<EducationEntry>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub formatting: FormattingAssessment,
    #[serde(deserialize_with = "lenient::string_or_seq")]
    pub missing_keywords: Vec<String>,
    #[serde(deserialize_with = "lenient::string_or_seq")]
    pub improvement_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl AnalysisResult {
    /// The record returned when the model call or its JSON fails.
    /// Callers detect it by the empty lists; `summary` carries the error text.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            summary: message.into(),
            raw: Some(ANALYSIS_FAILED.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    /// 0–100.
    pub percentage: u8,
    pub reason: String,
}

impl<'de> Deserialize<'de> for Skill {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SkillRepr {
            Name(String),
            Detailed {
                #[serde(alias = "skill", default, deserialize_with = "lenient::string")]
                name: String,
                #[serde(default, deserialize_with = "lenient::percentage")]
                percentage: u8,
                #[serde(default, deserialize_with = "lenient::string")]
                reason: String,
            },
        }

        Ok(match SkillRepr::deserialize(deserializer)? {
            SkillRepr::Name(name) => Skill {
                name,
                ..Default::default()
            },
            SkillRepr::Detailed {
                name,
                percentage,
                reason,
            } => Skill {
                name,
                percentage,
                reason,
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeSegment {
    #[serde(deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    #[serde(alias = "role", deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(deserialize_with = "lenient::string_or_seq")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    #[serde(deserialize_with = "lenient::string")]
    pub degree: String,
    #[serde(deserialize_with = "lenient::string")]
    pub institution: String,
    #[serde(deserialize_with = "lenient::string")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormattingAssessment {
    #[serde(deserialize_with = "lenient::percentage")]
    pub score: u8,
    #[serde(deserialize_with = "lenient::string_or_seq")]
    pub feedback: Vec<String>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Accepts a list of strings, a single string, or null.
    pub fn string_or_seq<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => Vec::new(),
            Value::String(s) if s.trim().is_empty() => Vec::new(),
            Value::String(s) => vec![s],
            Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
            other => scalar_to_string(other).into_iter().collect(),
        })
    }

    /// Accepts a list, or null for an empty one. Null items are skipped.
    pub fn seq_or_null<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        let items: Option<Vec<Option<T>>> = Option::deserialize(d)?;
        Ok(items.unwrap_or_default().into_iter().flatten().collect())
    }

    /// Null falls back to the type's default.
    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }

    /// Accepts a string, a number, or null.
    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(scalar_to_string(Value::deserialize(d)?).unwrap_or_default())
    }

    /// Accepts 85, 85.4, "85" or "85%"; clamps into 0–100.
    pub fn percentage<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
        let raw = match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
            _ => 0.0,
        };
        Ok(raw.clamp(0.0, 100.0).round() as u8)
    }

    fn scalar_to_string(value: Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_schema_deserializes() {
        let json = r#"{
            "summary": "Senior backend engineer targeting fintech",
            "valueProposition": "Ships reliable payment systems",
            "highlights": ["Cut latency 40%", "Led migration to Rust"],
            "skills": [
                {"name": "Rust", "percentage": 90, "reason": "Five years of production use"},
                {"name": "Kubernetes", "percentage": 70, "reason": "Operated clusters"}
            ],
            "segments": [{"title": "Experience", "content": "Acme 2019-2024"}],
            "experience": [{"title": "Engineer", "company": "Acme", "duration": "2019-2024", "highlights": ["Built ledger"]}],
            "education": [{"degree": "BTech CS", "institution": "IIT", "year": 2018}],
            "formatting": {"score": 82, "feedback": ["Consistent headings"]},
            "missingKeywords": ["gRPC"],
            "improvementSuggestions": ["Quantify team size"]
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.skills.len(), 2);
        assert_eq!(analysis.skills[0].percentage, 90);
        assert_eq!(analysis.education[0].year, "2018");
        assert_eq!(analysis.formatting.score, 82);
        assert_eq!(analysis.missing_keywords, vec!["gRPC"]);
        assert!(analysis.raw.is_none());
    }

    #[test]
    fn test_short_schema_with_value_alias_and_plain_skills() {
        let json = r#"{
            "summary": "Data analyst",
            "skills": ["SQL", "Python"],
            "highlights": "Built the churn dashboard",
            "value": "Turns data into decisions"
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.value_proposition, "Turns data into decisions");
        assert_eq!(analysis.skills[1].name, "Python");
        assert_eq!(analysis.skills[1].percentage, 0);
        assert_eq!(analysis.highlights, vec!["Built the churn dashboard"]);
        assert!(analysis.experience.is_empty());
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let json = r#"{
            "summary": null,
            "valueProposition": null,
            "skills": [{"name": "Rust", "percentage": 90, "reason": null}, null, "Go"],
            "segments": null,
            "experience": [{"title": null, "company": "Acme", "duration": null, "highlights": null}],
            "education": null,
            "formatting": null,
            "missingKeywords": ["gRPC"]
        }"#;

        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.summary, "");
        assert_eq!(analysis.value_proposition, "");
        let names: Vec<&str> = analysis.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Rust", "Go"]);
        assert_eq!(analysis.skills[0].percentage, 90);
        assert_eq!(analysis.skills[0].reason, "");
        assert_eq!(analysis.experience[0].company, "Acme");
        assert!(analysis.experience[0].title.is_empty());
        assert!(analysis.segments.is_empty());
        assert!(analysis.education.is_empty());
        assert_eq!(analysis.formatting, FormattingAssessment::default());
        assert_eq!(analysis.missing_keywords, vec!["gRPC"]);
    }

    #[test]
    fn test_percentages_are_clamped() {
        let json = r#"{"skills": [
            {"name": "A", "percentage": 140},
            {"name": "B", "percentage": -5},
            {"name": "C", "percentage": "75%"}
        ]}"#;
        let analysis: AnalysisResult = serde_json::from_str(json).unwrap();
        let pct: Vec<u8> = analysis.skills.iter().map(|s| s.percentage).collect();
        assert_eq!(pct, vec![100, 0, 75]);
    }

    #[test]
    fn test_degraded_has_empty_lists_and_error_summary() {
        let analysis = AnalysisResult::degraded("expected value at line 1 column 1");
        assert_eq!(analysis.summary, "expected value at line 1 column 1");
        assert!(analysis.skills.is_empty());
        assert!(analysis.highlights.is_empty());
        assert!(analysis.improvement_suggestions.is_empty());
        assert_eq!(analysis.raw.as_deref(), Some(ANALYSIS_FAILED));
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(AnalysisResult::default()).unwrap();
        assert!(value.get("valueProposition").is_some());
        assert!(value.get("missingKeywords").is_some());
        assert!(value.get("raw").is_none());
    }
}
