use serde::{Deserialize, Serialize};

/// Whether a tip affirms something the résumé does well or asks for a change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipKind {
    Good,
    #[default]
    Improve,
}

impl TipKind {
    /// Only the exact string `"good"` maps to `Good`; anything else is `Improve`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("good") => TipKind::Good,
            _ => TipKind::Improve,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTip {
    #[serde(rename = "type")]
    pub kind: TipKind,
    pub tip: String,
    pub explanation: String,
}

/// One scored facet of the review. `score` is always within 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackCategory {
    pub score: u32,
    pub tips: Vec<FeedbackTip>,
}

/// The ATS facet carries sub-metrics and keyword lists on top of score and tips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsCategory {
    pub score: u32,
    pub tips: Vec<FeedbackTip>,
    pub keyword_match: u32,
    pub formatting_score: u32,
    pub readability_score: u32,
    pub compliance_score: u32,
    pub parsing_confidence: u32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub red_flags: Vec<String>,
    pub priority_fixes: Vec<String>,
}

/// Canonical review produced by the transformer and trusted by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub overall_score: u32,
    #[serde(rename = "ATS")]
    pub ats: AtsCategory,
    pub tone_and_style: FeedbackCategory,
    pub content: FeedbackCategory,
    pub structure: FeedbackCategory,
    pub skills: FeedbackCategory,
}

#[cfg(test)]
impl Feedback {
    /// Every score in the record, overall first.
    pub fn scores(&self) -> [u32; 11] {
        [
            self.overall_score,
            self.ats.score,
            self.ats.keyword_match,
            self.ats.formatting_score,
            self.ats.readability_score,
            self.ats.compliance_score,
            self.ats.parsing_confidence,
            self.tone_and_style.score,
            self.content.score,
            self.structure.score,
            self.skills.score,
        ]
    }
}
