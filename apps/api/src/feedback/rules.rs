//! Fixed copy and keyword tables used while normalizing feedback.
//!
//! Everything the normalizers would otherwise hard-code lives in
//! `NormalizationRules` so callers (and tests) can inspect or replace it.

use crate::feedback::models::{FeedbackTip, TipKind};

/// Fallback explanation used when a tip arrives without one.
#[derive(Debug, Clone)]
pub struct FallbackExplanations {
    pub good: &'static str,
    pub improve: &'static str,
}

impl FallbackExplanations {
    pub fn for_kind(&self, kind: TipKind) -> &'static str {
        match kind {
            TipKind::Good => self.good,
            TipKind::Improve => self.improve,
        }
    }
}

/// Category that a free-text improvement suggestion is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionBucket {
    Structure,
    Skills,
    ToneAndStyle,
}

/// One row of the ordered classification table.
#[derive(Debug, Clone)]
pub struct BucketRule {
    pub bucket: SuggestionBucket,
    pub keywords: &'static [&'static str],
}

pub const STRUCTURE_KEYWORDS: &[&str] = &["format", "structure", "layout", "section"];
pub const SKILLS_KEYWORDS: &[&str] = &["skill", "experience", "tool", "technology"];

/// A tip with fixed wording, substituted when a derived list comes out empty.
#[derive(Debug, Clone)]
pub struct StaticTip {
    pub kind: TipKind,
    pub tip: &'static str,
    pub explanation: &'static str,
}

impl StaticTip {
    pub fn to_tip(&self) -> FeedbackTip {
        FeedbackTip {
            kind: self.kind,
            tip: self.tip.to_string(),
            explanation: self.explanation.to_string(),
        }
    }
}

/// Explanations attached to tips derived from the legacy schema, one per bucket.
#[derive(Debug, Clone)]
pub struct LegacyCopy {
    pub keyword_present: &'static str,
    pub keyword_missing: &'static str,
    pub strength: &'static str,
    pub weakness: &'static str,
    pub structure: &'static str,
    pub skills: &'static str,
    pub tone_and_style: &'static str,
    pub tone_from_strength: &'static str,
    pub default_ats_tip: StaticTip,
    pub default_structure_tip: StaticTip,
    pub default_skills_tip: StaticTip,
}

#[derive(Debug, Clone)]
pub struct NormalizationRules {
    pub fallback_explanations: FallbackExplanations,
    /// Checked in order; the first matching rule wins. Unmatched suggestions
    /// fall through to tone and style.
    pub bucket_rules: Vec<BucketRule>,
    pub legacy: LegacyCopy,
    pub priority_fix_limit: usize,
    pub red_flag_limit: usize,
}

impl Default for NormalizationRules {
    fn default() -> Self {
        Self {
            fallback_explanations: FallbackExplanations {
                good: "This part of your resume is working well, so keep it consistent.",
                improve: "Refining this area will boost ATS alignment.",
            },
            bucket_rules: vec![
                BucketRule {
                    bucket: SuggestionBucket::Structure,
                    keywords: STRUCTURE_KEYWORDS,
                },
                BucketRule {
                    bucket: SuggestionBucket::Skills,
                    keywords: SKILLS_KEYWORDS,
                },
            ],
            legacy: LegacyCopy {
                keyword_present: "ATS scanners will find this keyword from the job description.",
                keyword_missing: "The job description asks for this keyword but your resume never mentions it.",
                strength: "This is a strength in your resume.",
                weakness: "This is an area for improvement.",
                structure: "Suggestion to improve your resume's structure.",
                skills: "Suggestion to better highlight your skills.",
                tone_and_style: "Suggestion to improve your resume's tone and style.",
                tone_from_strength: "This strength reads with a confident, professional voice.",
                default_ats_tip: StaticTip {
                    kind: TipKind::Improve,
                    tip: "Mirror the job description wording",
                    explanation: "Repeat exact phrases from the posting so ATS keyword filters can match them.",
                },
                default_structure_tip: StaticTip {
                    kind: TipKind::Improve,
                    tip: "Keep section headings consistent",
                    explanation: "Use the same font size and weight for every heading so ATS parsers can detect sections.",
                },
                default_skills_tip: StaticTip {
                    kind: TipKind::Improve,
                    tip: "Group related skills together",
                    explanation: "Cluster tools and technologies by category so recruiters can scan them quickly.",
                },
            },
            priority_fix_limit: 4,
            red_flag_limit: 3,
        }
    }
}

impl NormalizationRules {
    /// Files a suggestion under the first rule whose keyword it contains
    /// (case-insensitive), or under tone and style when none match.
    pub fn classify(&self, suggestion: &str) -> SuggestionBucket {
        let lower = suggestion.to_lowercase();
        self.bucket_rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| lower.contains(kw)))
            .map(|rule| rule.bucket)
            .unwrap_or(SuggestionBucket::ToneAndStyle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_checked_before_skills() {
        let rules = NormalizationRules::default();
        assert_eq!(
            rules.classify("Improve skill formatting"),
            SuggestionBucket::Structure
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let rules = NormalizationRules::default();
        assert_eq!(rules.classify("Fix LAYOUT spacing"), SuggestionBucket::Structure);
        assert_eq!(rules.classify("List your Tools"), SuggestionBucket::Skills);
        assert_eq!(
            rules.classify("Use stronger action verbs"),
            SuggestionBucket::ToneAndStyle
        );
    }

    #[test]
    fn test_reordered_table_changes_tie_break() {
        let mut rules = NormalizationRules::default();
        rules.bucket_rules.reverse();
        assert_eq!(
            rules.classify("Improve skill formatting"),
            SuggestionBucket::Skills
        );
    }

    #[test]
    fn test_fallback_explanations_are_distinct() {
        let fallbacks = NormalizationRules::default().fallback_explanations;
        assert!(fallbacks.for_kind(TipKind::Good).contains("keep it consistent"));
        assert!(fallbacks.for_kind(TipKind::Improve).contains("boost ATS alignment"));
    }
}
