//! Score clamping plus the tip and category normalizers.

use crate::feedback::models::{FeedbackCategory, FeedbackTip, TipKind};
use crate::feedback::payload::{RawCategory, RawTip};
use crate::feedback::rules::NormalizationRules;

/// Rounds to the nearest integer and clamps into 0..=100.
pub fn clamp_score(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// `clamp_score` of the value when present, else of the fallback.
pub fn score_or(value: Option<f64>, fallback: f64) -> u32 {
    clamp_score(value.unwrap_or(fallback))
}

/// Coerces raw tips into canonical ones.
///
/// Output has the same length and order as the input. Missing tip text becomes
/// `Tip {n}` (1-based); missing explanations use `explanation` when given, else
/// the rules' fallback for `default_kind`.
pub fn normalize_tips(
    tips: &[RawTip],
    default_kind: TipKind,
    explanation: Option<&str>,
    rules: &NormalizationRules,
) -> Vec<FeedbackTip> {
    let fallback = explanation
        .unwrap_or_else(|| rules.fallback_explanations.for_kind(default_kind))
        .to_string();

    tips.iter()
        .enumerate()
        .map(|(index, raw)| {
            let placeholder = || format!("Tip {}", index + 1);
            match raw {
                RawTip::Text(text) => FeedbackTip {
                    kind: default_kind,
                    tip: if text.trim().is_empty() {
                        placeholder()
                    } else {
                        text.clone()
                    },
                    explanation: fallback.clone(),
                },
                RawTip::Entry {
                    kind,
                    tip,
                    explanation,
                } => FeedbackTip {
                    kind: TipKind::from_raw(kind.as_deref()),
                    tip: tip.clone().unwrap_or_else(placeholder),
                    explanation: explanation.clone().unwrap_or_else(|| fallback.clone()),
                },
            }
        })
        .collect()
}

/// Plain strings as tips of one kind, all sharing `explanation`.
pub fn tips_from_strings(
    items: &[String],
    kind: TipKind,
    explanation: &str,
    rules: &NormalizationRules,
) -> Vec<FeedbackTip> {
    let raw: Vec<RawTip> = items.iter().cloned().map(RawTip::Text).collect();
    normalize_tips(&raw, kind, Some(explanation), rules)
}

/// Applies score clamping and tip normalization to one (possibly absent) category.
pub fn normalize_category(
    category: Option<&RawCategory>,
    fallback_score: f64,
    default_kind: TipKind,
    rules: &NormalizationRules,
) -> FeedbackCategory {
    let score = score_or(category.and_then(|c| c.score), fallback_score);
    let tips = category
        .and_then(|c| c.tips.as_deref())
        .map(|tips| normalize_tips(tips, default_kind, None, rules))
        .unwrap_or_default();
    FeedbackCategory { score, tips }
}
