//! Legacy Feedback Reconciler. Maps the coarse 0–10 rating schema onto `Feedback`.
//!
//! Algorithm:
//! 1. Rescale every rating to 0–100 (values ≤ 10 are multiplied by 10).
//! 2. keywordMatch = matched / (matched + missing) × 100, or the ATS rating
//!    when no keywords were analysed.
//! 3. Composite scores: tone/style = (content + format) / 2, compliance and
//!    parsing confidence average format with keyword match / tone.
//! 4. Improvement suggestions are filed into structure, skills or tone/style
//!    through the ordered rule table in `NormalizationRules`.
//! 5. Empty tip lists get their substitutes (ATS, structure, skills) or the
//!    strengths fallback (tone/style). Content has no substitute.

use crate::feedback::models::{AtsCategory, Feedback, FeedbackCategory, FeedbackTip, TipKind};
use crate::feedback::normalize::{clamp_score, tips_from_strings};
use crate::feedback::payload::LegacyPayload;
use crate::feedback::rules::{NormalizationRules, SuggestionBucket};

/// Converts a 0–10 rating to a 0–100 score. Values above 10 are assumed to be
/// on the 0–100 scale already; missing ratings are 0.
pub fn rescale_rating(rating: Option<f64>) -> u32 {
    match rating {
        Some(value) if value <= 10.0 => clamp_score(value * 10.0),
        Some(value) => clamp_score(value),
        None => 0,
    }
}

/// Share of analysed keywords that were found, falling back to `ats_score`
/// when nothing was analysed.
pub fn keyword_match_score(matched: usize, missing: usize, ats_score: u32) -> u32 {
    let total = matched + missing;
    if total == 0 {
        return ats_score;
    }
    clamp_score(matched as f64 / total as f64 * 100.0)
}

/// Improvement suggestions split by bucket, order preserved within each.
#[derive(Debug, Default)]
struct ClassifiedSuggestions {
    structure: Vec<String>,
    skills: Vec<String>,
    tone_and_style: Vec<String>,
}

fn classify_suggestions(suggestions: &[String], rules: &NormalizationRules) -> ClassifiedSuggestions {
    let mut classified = ClassifiedSuggestions::default();
    for suggestion in suggestions {
        let bucket = match rules.classify(suggestion) {
            SuggestionBucket::Structure => &mut classified.structure,
            SuggestionBucket::Skills => &mut classified.skills,
            SuggestionBucket::ToneAndStyle => &mut classified.tone_and_style,
        };
        bucket.push(suggestion.clone());
    }
    classified
}

fn or_default_tip(tips: Vec<FeedbackTip>, substitute: FeedbackTip) -> Vec<FeedbackTip> {
    if tips.is_empty() {
        vec![substitute]
    } else {
        tips
    }
}

pub fn reconcile_legacy(payload: &LegacyPayload, rules: &NormalizationRules) -> Feedback {
    let copy = &rules.legacy;

    let overall_score = rescale_rating(payload.overall_rating);
    let ats_score = rescale_rating(payload.ats_compatibility);
    let relevance_score = rescale_rating(payload.relevance_to_job);
    let format_score = rescale_rating(payload.format_and_design);
    let content_score = rescale_rating(payload.content_quality);

    let details = &payload.detailed_feedback;
    let matched = &details.keyword_analysis.present_keywords;
    let missing = &details.keyword_analysis.missing_keywords;

    let keyword_match = keyword_match_score(matched.len(), missing.len(), ats_score);

    // Left unrounded; rounding happens where it becomes a category score.
    let tone_style_score = (content_score + format_score) as f64 / 2.0;
    let compliance_score = clamp_score((format_score + keyword_match) as f64 / 2.0);
    let parsing_confidence = clamp_score((format_score as f64 + tone_style_score) / 2.0);

    // ATS tips: one per keyword, found first, then missing.
    let keyword_tips: Vec<String> = matched
        .iter()
        .map(|kw| format!("Keyword detected: {kw}"))
        .collect();
    let missing_tips: Vec<String> = missing
        .iter()
        .map(|kw| format!("Add keyword: {kw}"))
        .collect();
    let mut ats_tips = tips_from_strings(&keyword_tips, TipKind::Good, copy.keyword_present, rules);
    ats_tips.extend(tips_from_strings(
        &missing_tips,
        TipKind::Improve,
        copy.keyword_missing,
        rules,
    ));
    let ats_tips = or_default_tip(ats_tips, copy.default_ats_tip.to_tip());

    let mut content_tips = tips_from_strings(&details.strengths, TipKind::Good, copy.strength, rules);
    content_tips.extend(tips_from_strings(
        &details.weaknesses,
        TipKind::Improve,
        copy.weakness,
        rules,
    ));

    let classified = classify_suggestions(&details.improvement_suggestions, rules);

    let structure_tips = or_default_tip(
        tips_from_strings(&classified.structure, TipKind::Improve, copy.structure, rules),
        copy.default_structure_tip.to_tip(),
    );
    let skills_tips = or_default_tip(
        tips_from_strings(&classified.skills, TipKind::Improve, copy.skills, rules),
        copy.default_skills_tip.to_tip(),
    );
    let tone_tips = if classified.tone_and_style.is_empty() {
        tips_from_strings(&details.strengths, TipKind::Good, copy.tone_from_strength, rules)
    } else {
        tips_from_strings(
            &classified.tone_and_style,
            TipKind::Improve,
            copy.tone_and_style,
            rules,
        )
    };

    let skills_score = if relevance_score > 0 {
        relevance_score
    } else {
        keyword_match
    };

    Feedback {
        overall_score,
        ats: AtsCategory {
            score: ats_score,
            tips: ats_tips,
            keyword_match,
            formatting_score: format_score,
            readability_score: clamp_score(tone_style_score),
            compliance_score,
            parsing_confidence,
            matched_keywords: matched.clone(),
            missing_keywords: missing.clone(),
            red_flags: details
                .weaknesses
                .iter()
                .take(rules.red_flag_limit)
                .cloned()
                .collect(),
            priority_fixes: details
                .improvement_suggestions
                .iter()
                .take(rules.priority_fix_limit)
                .cloned()
                .collect(),
        },
        tone_and_style: FeedbackCategory {
            score: clamp_score(tone_style_score),
            tips: tone_tips,
        },
        content: FeedbackCategory {
            score: content_score,
            tips: content_tips,
        },
        structure: FeedbackCategory {
            score: format_score,
            tips: structure_tips,
        },
        skills: FeedbackCategory {
            score: skills_score,
            tips: skills_tips,
        },
    }
}
