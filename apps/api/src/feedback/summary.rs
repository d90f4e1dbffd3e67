use serde::{Deserialize, Serialize};

use crate::feedback::models::Feedback;

/// Qualitative band shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    OnTrack,
    NeedsFocus,
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s > 79 => ScoreBand::Excellent,
            s if s > 59 => ScoreBand::OnTrack,
            _ => ScoreBand::NeedsFocus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::OnTrack => "On Track",
            ScoreBand::NeedsFocus => "Needs Focus",
        }
    }
}

/// Aggregate numbers across every stored review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total: usize,
    pub avg_score: u32,
    pub avg_keyword: u32,
    pub best_score: u32,
}

pub fn summarize<'a, I>(reviews: I) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a Feedback>,
{
    let mut summary = PortfolioSummary::default();
    let mut score_sum = 0u64;
    let mut keyword_sum = 0u64;

    for feedback in reviews {
        summary.total += 1;
        score_sum += u64::from(feedback.overall_score);
        keyword_sum += u64::from(feedback.ats.keyword_match);
        summary.best_score = summary.best_score.max(feedback.overall_score);
    }

    if summary.total > 0 {
        let total = summary.total as f64;
        summary.avg_score = (score_sum as f64 / total).round() as u32;
        summary.avg_keyword = (keyword_sum as f64 / total).round() as u32;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::transform::transform;
    use serde_json::json;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::OnTrack);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::OnTrack);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::NeedsFocus);
        assert_eq!(ScoreBand::OnTrack.label(), "On Track");
    }

    #[test]
    fn test_empty_portfolio_is_zeroed() {
        assert_eq!(summarize(&[]), PortfolioSummary::default());
    }

    #[test]
    fn test_summary_averages_and_best() {
        let reviews = vec![
            transform(&json!({ "overall_rating": 9, "ats_compatibility": 6 })),
            transform(&json!({ "overall_rating": 6, "ats_compatibility": 7 })),
        ];
        let summary = summarize(&reviews);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.avg_score, 75);
        // No keywords analysed, so keyword match mirrors the ATS rating.
        assert_eq!(summary.avg_keyword, 65);
        assert_eq!(summary.best_score, 90);
    }
}
