use serde::{Deserialize, Serialize};

/// Compatibility report produced by the analysis service for one
/// resume/job-description pair. Consumed read-only by the report view;
/// serialized verbatim into the result slot between views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall match score in 0..=100, may be fractional.
    pub similarity_score: f64,
    pub skills_match: SkillsMatch,
    pub keyword_optimization: KeywordOptimization,
    pub improvement_suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsMatch {
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 0..=100; independent of `similarity_score`, no arithmetic
    /// relationship is assumed between the score fields.
    pub match_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordOptimization {
    pub matching_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub match_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            similarity_score: 72.4,
            skills_match: SkillsMatch {
                matching_skills: vec!["Rust".to_string(), "SQL".to_string()],
                missing_skills: vec!["Kubernetes".to_string()],
                match_percentage: 66.7,
            },
            keyword_optimization: KeywordOptimization {
                matching_keywords: vec!["API".to_string()],
                missing_keywords: vec!["Docker".to_string(), "CI".to_string()],
                match_percentage: 33.3,
            },
            improvement_suggestions: vec!["Quantify project impact".to_string()],
        }
    }

    #[test]
    fn result_round_trips_through_json() {
        let original = sample_result();
        let serialized = serde_json::to_string(&original).expect("serialize");
        let restored: AnalysisResult = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(restored, original);
    }

    #[test]
    fn result_decodes_from_service_shaped_json() {
        let body = r#"{
            "similarity_score": 85,
            "skills_match": {
                "matching_skills": ["Python"],
                "missing_skills": [],
                "match_percentage": 90
            },
            "keyword_optimization": {
                "matching_keywords": ["API"],
                "missing_keywords": ["Docker"],
                "match_percentage": 50
            },
            "improvement_suggestions": ["Add metrics experience"]
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).expect("decode");
        assert_eq!(result.similarity_score, 85.0);
        assert_eq!(result.skills_match.matching_skills, vec!["Python"]);
        assert!(result.skills_match.missing_skills.is_empty());
        assert_eq!(result.keyword_optimization.match_percentage, 50.0);
        assert_eq!(result.improvement_suggestions.len(), 1);
    }
}
