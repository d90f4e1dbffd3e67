//! Feedback Transformer: the single entry point from raw model output to `Feedback`.
//!
//! Total over its input: null, non-objects and half-formed payloads all come
//! back as a fully populated record.

use serde_json::Value;
use tracing::debug;

use crate::feedback::legacy::reconcile_legacy;
use crate::feedback::models::{AtsCategory, Feedback, TipKind};
use crate::feedback::normalize::{normalize_category, normalize_tips, score_or};
use crate::feedback::payload::{
    FeedbackPayload, LegacyPayload, ModernPayload, RawAts, RawCategory,
};
use crate::feedback::rules::NormalizationRules;

/// Normalizes a raw payload with the default rules.
pub fn transform(raw: &Value) -> Feedback {
    transform_with(raw, &NormalizationRules::default())
}

pub fn transform_with(raw: &Value, rules: &NormalizationRules) -> Feedback {
    let payload = FeedbackPayload::from_value(raw);
    debug!(schema = ?payload.schema(), "Normalizing feedback payload");

    match payload {
        FeedbackPayload::Empty => reconcile_legacy(&LegacyPayload::default(), rules),
        FeedbackPayload::Legacy(legacy) => reconcile_legacy(&legacy, rules),
        FeedbackPayload::Modern(modern) => normalize_modern(&modern, rules),
    }
}

fn normalize_modern(payload: &ModernPayload, rules: &NormalizationRules) -> Feedback {
    let category =
        |raw: Option<&RawCategory>| normalize_category(raw, 0.0, TipKind::Improve, rules);

    Feedback {
        overall_score: score_or(payload.overall_score, 0.0),
        ats: normalize_ats(payload.ats.as_ref(), rules),
        tone_and_style: category(payload.tone_and_style.as_ref()),
        content: category(payload.content.as_ref()),
        structure: category(payload.structure.as_ref()),
        skills: category(payload.skills.as_ref()),
    }
}

/// Clamps the ATS metrics and passes keyword lists through. Unlike the legacy
/// path, an empty tip list stays empty here.
fn normalize_ats(ats: Option<&RawAts>, rules: &NormalizationRules) -> AtsCategory {
    let default_ats = RawAts::default();
    let ats = ats.unwrap_or(&default_ats);

    AtsCategory {
        score: score_or(ats.score, 0.0),
        tips: ats
            .tips
            .as_deref()
            .map(|tips| normalize_tips(tips, TipKind::Improve, None, rules))
            .unwrap_or_default(),
        keyword_match: score_or(ats.keyword_match, 0.0),
        formatting_score: score_or(ats.formatting_score, 0.0),
        readability_score: score_or(ats.readability_score, 0.0),
        compliance_score: score_or(ats.compliance_score, 0.0),
        parsing_confidence: score_or(ats.parsing_confidence, 0.0),
        matched_keywords: ats.matched_keywords.clone(),
        missing_keywords: ats.missing_keywords.clone(),
        red_flags: ats.red_flags.clone(),
        priority_fixes: ats.priority_fixes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::models::{FeedbackCategory, FeedbackTip};
    use serde_json::json;

    fn tip(kind: TipKind, tip: &str, explanation: &str) -> FeedbackTip {
        FeedbackTip {
            kind,
            tip: tip.to_string(),
            explanation: explanation.to_string(),
        }
    }

    fn canonical_feedback() -> Feedback {
        Feedback {
            overall_score: 86,
            ats: AtsCategory {
                score: 88,
                tips: vec![
                    tip(TipKind::Good, "Clean visual structure", "Section hierarchy is easy to parse."),
                    tip(TipKind::Improve, "Expand keyword density", "Mirror the posting's wording."),
                ],
                keyword_match: 82,
                formatting_score: 92,
                readability_score: 84,
                compliance_score: 86,
                parsing_confidence: 91,
                matched_keywords: vec!["React".to_string(), "TypeScript".to_string()],
                missing_keywords: vec!["GraphQL".to_string()],
                red_flags: vec!["Missing measurable impact".to_string()],
                priority_fixes: vec!["Add impact metrics".to_string()],
            },
            tone_and_style: FeedbackCategory {
                score: 90,
                tips: vec![tip(TipKind::Good, "Confident voice", "Action verbs communicate ownership.")],
            },
            content: FeedbackCategory {
                score: 84,
                tips: vec![tip(TipKind::Improve, "Quantify achievements", "Add baseline metrics.")],
            },
            structure: FeedbackCategory {
                score: 92,
                tips: vec![],
            },
            skills: FeedbackCategory {
                score: 78,
                tips: vec![tip(TipKind::Improve, "Highlight testing tools", "The posting asks for them.")],
            },
        }
    }

    fn assert_invariants(feedback: &Feedback) {
        assert!(feedback.scores().iter().all(|s| *s <= 100));
        let all_tips = feedback
            .ats
            .tips
            .iter()
            .chain(&feedback.tone_and_style.tips)
            .chain(&feedback.content.tips)
            .chain(&feedback.structure.tips)
            .chain(&feedback.skills.tips);
        for tip in all_tips {
            assert!(!tip.tip.is_empty());
            assert!(!tip.explanation.is_empty());
        }
    }

    #[test]
    fn test_totality_over_odd_inputs() {
        let inputs = vec![
            Value::Null,
            json!({}),
            json!(""),
            json!(42),
            json!([1, 2, 3]),
            json!({ "ATS": "nope", "toneAndStyle": 3 }),
            json!({ "ATS": { "keywordMatch": 1e9 }, "toneAndStyle": { "tips": [null, 5, {}] } }),
            json!({ "overall_rating": -100, "detailed_feedback": { "strengths": [[], {}] } }),
        ];
        for input in inputs {
            let feedback = transform(&input);
            assert_invariants(&feedback);
        }
    }

    #[test]
    fn test_null_matches_empty_legacy_record() {
        assert_eq!(transform(&Value::Null), transform(&json!({})));
    }

    #[test]
    fn test_canonical_input_is_unchanged() {
        let original = canonical_feedback();
        let raw = serde_json::to_value(&original).unwrap();
        assert_eq!(transform(&raw), original);
    }

    #[test]
    fn test_schema_boundary_routes_to_legacy() {
        let feedback = transform(&json!({ "ATS": { "keywordMatch": 50 }, "toneAndStyle": {} }));
        // The legacy path substitutes default tips; the modern path never would.
        let rules = NormalizationRules::default();
        assert_eq!(feedback.ats.keyword_match, 0);
        assert_eq!(feedback.structure.tips, vec![rules.legacy.default_structure_tip.to_tip()]);
    }

    #[test]
    fn test_modern_clamps_and_defaults() {
        let feedback = transform(&json!({
            "overallScore": 104.6,
            "ATS": {
                "score": -5,
                "keywordMatch": 61.5,
                "formattingScore": "great",
                "matchedKeywords": ["Rust"],
                "tips": ["Add a skills section"]
            },
            "toneAndStyle": { "score": 70, "tips": [{ "type": "good", "tip": "Crisp" }] }
        }));
        assert_eq!(feedback.overall_score, 100);
        assert_eq!(feedback.ats.score, 0);
        assert_eq!(feedback.ats.keyword_match, 62);
        assert_eq!(feedback.ats.formatting_score, 0);
        assert_eq!(feedback.ats.matched_keywords, vec!["Rust"]);
        assert!(feedback.ats.missing_keywords.is_empty());
        assert_eq!(feedback.ats.tips[0].kind, TipKind::Improve);
        assert_eq!(feedback.tone_and_style.tips[0].kind, TipKind::Good);
        assert_eq!(
            feedback.tone_and_style.tips[0].explanation,
            NormalizationRules::default().fallback_explanations.improve
        );
        assert_eq!(feedback.content.score, 0);
        assert!(feedback.content.tips.is_empty());
    }

    #[test]
    fn test_modern_empty_ats_tips_get_no_substitute() {
        let feedback = transform(&json!({
            "ATS": { "keywordMatch": 40, "tips": [] },
            "toneAndStyle": { "tips": [] }
        }));
        assert!(feedback.ats.tips.is_empty());
        assert!(feedback.structure.tips.is_empty());
    }

    #[test]
    fn test_legacy_end_to_end() {
        let feedback = transform(&json!({
            "overall_rating": 9,
            "ats_compatibility": 7,
            "relevance_to_job": 6,
            "format_and_design": 8,
            "content_quality": 7,
            "detailed_feedback": {
                "strengths": ["Clear summary"],
                "weaknesses": ["Too long"],
                "improvement_suggestions": ["Fix layout spacing"],
                "keyword_analysis": {
                    "present_keywords": ["React"],
                    "missing_keywords": ["GraphQL"]
                }
            }
        }));
        assert_eq!(feedback.overall_score, 90);
        assert_eq!(feedback.ats.score, 70);
        assert_eq!(feedback.ats.keyword_match, 50);
        assert_eq!(feedback.structure.tips.len(), 1);
        assert_eq!(feedback.structure.tips[0].tip, "Fix layout spacing");
        assert_eq!(feedback.content.tips.len(), 2);
        assert_eq!(feedback.content.tips[0].kind, TipKind::Good);
        assert_eq!(feedback.content.tips[1].kind, TipKind::Improve);
        assert_eq!(feedback.skills.score, 60);
        assert_eq!(feedback.ats.red_flags, vec!["Too long"]);
        assert_eq!(feedback.ats.priority_fixes, vec!["Fix layout spacing"]);
        assert_invariants(&feedback);
    }

    #[test]
    fn test_custom_rules_flow_through() {
        let mut rules = NormalizationRules::default();
        rules.priority_fix_limit = 1;
        let feedback = transform_with(
            &json!({ "detailed_feedback": { "improvement_suggestions": ["a", "b"] } }),
            &rules,
        );
        assert_eq!(feedback.ats.priority_fixes, vec!["a"]);
    }
}
