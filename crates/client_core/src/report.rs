//! Report loading and the pure display model derived from a stored result.

use shared::domain::AnalysisResult;
use thiserror::Error;
use tracing::warn;

use crate::{
    store::{ResultStore, ANALYSIS_RESULT_KEY},
    workflow::{Navigator, View},
};

pub const NO_MATCHING_SKILLS: &str = "No matching skills found";
pub const NO_MISSING_SKILLS: &str = "No missing skills found";
pub const NO_MATCHING_KEYWORDS: &str = "No matching keywords found";
pub const NO_MISSING_KEYWORDS: &str = "No missing keywords found";
pub const NO_SUGGESTIONS: &str = "No improvement suggestions found";

/// Display emphasis for a rounded score. Bands never drive control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Good,
    Warning,
    Bad,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            Self::Good
        } else if score >= 60 {
            Self::Warning
        } else {
            Self::Bad
        }
    }
}

/// Rounds a raw 0..=100 score for display, half away from zero.
pub fn round_display_score(raw: f64) -> u8 {
    raw.round() as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: u8,
    pub band: ScoreBand,
}

impl ScoreCard {
    fn from_raw(raw: f64) -> Self {
        let score = round_display_score(raw);
        Self {
            score,
            band: ScoreBand::for_score(score),
        }
    }
}

/// A service-supplied list rendered verbatim, or its fixed empty-state
/// sentence. Never re-sorted, de-duplicated, or filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent {
    Items(Vec<String>),
    Empty(&'static str),
}

impl ListContent {
    fn from_items(items: &[String], placeholder: &'static str) -> Self {
        if items.is_empty() {
            Self::Empty(placeholder)
        } else {
            Self::Items(items.to_vec())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchSection {
    pub score: ScoreCard,
    pub matching: ListContent,
    pub missing: ListContent,
}

/// Everything the report view renders, derived once from the decoded result.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportModel {
    pub overall: ScoreCard,
    pub skills: MatchSection,
    pub keywords: MatchSection,
    pub suggestions: ListContent,
}

impl ReportModel {
    /// Pure function of the result: no I/O, no mutation, same output for the
    /// same input.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            overall: ScoreCard::from_raw(result.similarity_score),
            skills: MatchSection {
                score: ScoreCard::from_raw(result.skills_match.match_percentage),
                matching: ListContent::from_items(
                    &result.skills_match.matching_skills,
                    NO_MATCHING_SKILLS,
                ),
                missing: ListContent::from_items(
                    &result.skills_match.missing_skills,
                    NO_MISSING_SKILLS,
                ),
            },
            keywords: MatchSection {
                score: ScoreCard::from_raw(result.keyword_optimization.match_percentage),
                matching: ListContent::from_items(
                    &result.keyword_optimization.matching_keywords,
                    NO_MATCHING_KEYWORDS,
                ),
                missing: ListContent::from_items(
                    &result.keyword_optimization.missing_keywords,
                    NO_MISSING_KEYWORDS,
                ),
            },
            suggestions: ListContent::from_items(
                &result.improvement_suggestions,
                NO_SUGGESTIONS,
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportLoadError {
    #[error("no analysis result has been stored")]
    Absent,
    #[error("stored analysis result could not be decoded: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("result store read failed: {0}")]
    Store(#[from] anyhow::Error),
}

/// Reads the slot written at submission success. Absent, unreadable, and
/// unparsable slots are separate variants for the logs only; callers treat
/// them all as "no result".
pub fn load_stored_result(store: &dyn ResultStore) -> Result<AnalysisResult, ReportLoadError> {
    let Some(text) = store.get(ANALYSIS_RESULT_KEY)? else {
        return Err(ReportLoadError::Absent);
    };
    Ok(serde_json::from_str(&text)?)
}

/// Report view entry point. On a usable result returns the display model;
/// otherwise redirects to the submission view and returns `None`, with no
/// user-visible error either way.
pub fn enter_report_view(
    store: &dyn ResultStore,
    navigator: &dyn Navigator,
) -> Option<ReportModel> {
    match load_stored_result(store) {
        Ok(result) => Some(ReportModel::from_result(&result)),
        Err(err) => {
            warn!("no usable analysis result, returning to submission: {err}");
            navigator.go_to(View::Submission);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::{KeywordOptimization, SkillsMatch};

    fn scenario_result() -> AnalysisResult {
        AnalysisResult {
            similarity_score: 85.0,
            skills_match: SkillsMatch {
                matching_skills: vec!["Python".to_string()],
                missing_skills: vec![],
                match_percentage: 90.0,
            },
            keyword_optimization: KeywordOptimization {
                matching_keywords: vec!["API".to_string()],
                missing_keywords: vec!["Docker".to_string()],
                match_percentage: 50.0,
            },
            improvement_suggestions: vec!["Add metrics experience".to_string()],
        }
    }

    #[test]
    fn bands_follow_the_threshold_boundaries() {
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Warning);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Warning);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::Bad);
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Good);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Bad);
    }

    #[test]
    fn fractional_scores_round_half_up_before_banding() {
        assert_eq!(round_display_score(79.5), 80);
        assert_eq!(round_display_score(79.4), 79);
        assert_eq!(round_display_score(59.5), 60);
        assert_eq!(ScoreCard::from_raw(79.5).band, ScoreBand::Good);
        assert_eq!(ScoreCard::from_raw(59.5).band, ScoreBand::Warning);
    }

    #[test]
    fn model_matches_the_worked_example() {
        let model = ReportModel::from_result(&scenario_result());

        assert_eq!(model.overall.score, 85);
        assert_eq!(model.overall.band, ScoreBand::Good);

        assert_eq!(model.skills.score.score, 90);
        assert_eq!(model.skills.score.band, ScoreBand::Good);
        assert_eq!(
            model.skills.matching,
            ListContent::Items(vec!["Python".to_string()])
        );
        assert_eq!(model.skills.missing, ListContent::Empty(NO_MISSING_SKILLS));

        assert_eq!(model.keywords.score.score, 50);
        assert_eq!(model.keywords.score.band, ScoreBand::Bad);
        assert_eq!(
            model.keywords.matching,
            ListContent::Items(vec!["API".to_string()])
        );
        assert_eq!(
            model.keywords.missing,
            ListContent::Items(vec!["Docker".to_string()])
        );

        assert_eq!(
            model.suggestions,
            ListContent::Items(vec!["Add metrics experience".to_string()])
        );
    }

    #[test]
    fn every_empty_list_gets_its_own_placeholder() {
        let mut result = scenario_result();
        result.skills_match.matching_skills.clear();
        result.keyword_optimization.matching_keywords.clear();
        result.keyword_optimization.missing_keywords.clear();
        result.improvement_suggestions.clear();

        let model = ReportModel::from_result(&result);
        assert_eq!(model.skills.matching, ListContent::Empty(NO_MATCHING_SKILLS));
        assert_eq!(model.skills.missing, ListContent::Empty(NO_MISSING_SKILLS));
        assert_eq!(
            model.keywords.matching,
            ListContent::Empty(NO_MATCHING_KEYWORDS)
        );
        assert_eq!(
            model.keywords.missing,
            ListContent::Empty(NO_MISSING_KEYWORDS)
        );
        assert_eq!(model.suggestions, ListContent::Empty(NO_SUGGESTIONS));
    }

    #[test]
    fn list_order_is_preserved_verbatim() {
        let mut result = scenario_result();
        result.skills_match.matching_skills = vec![
            "Zig".to_string(),
            "Ada".to_string(),
            "Zig".to_string(),
        ];
        let model = ReportModel::from_result(&result);
        assert_eq!(
            model.skills.matching,
            ListContent::Items(vec![
                "Zig".to_string(),
                "Ada".to_string(),
                "Zig".to_string(),
            ])
        );
    }

    #[test]
    fn derivation_is_idempotent() {
        let result = scenario_result();
        assert_eq!(
            ReportModel::from_result(&result),
            ReportModel::from_result(&result)
        );
    }
}
