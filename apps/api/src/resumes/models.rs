use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::feedback::{detect_schema, transform, Feedback, SchemaKind, ScoreBand};

pub const RESUME_KEY_PATTERN: &str = "resume:*";

pub fn resume_key(id: Uuid) -> String {
    format!("resume:{id}")
}

/// The rewritten résumé produced after analysis. `content` is kept as the
/// model returned it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedResume {
    #[serde(default)]
    pub pdf_path: String,
    #[serde(default)]
    pub content: Value,
    /// Epoch milliseconds.
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub filename: Option<String>,
}

/// A stored review, as persisted under `resume:{id}`.
/// `feedback` holds the raw AI payload; it is normalized on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub id: Uuid,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub resume_path: String,
    #[serde(default)]
    pub feedback: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_resume: Option<EnhancedResume>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ResumeRecord {
    pub fn updated_at(&self) -> i64 {
        self.enhanced_resume
            .as_ref()
            .and_then(|e| e.updated_at)
            .unwrap_or(0)
    }

    pub fn into_review(self) -> ResumeReview {
        let feedback = transform(&self.feedback);
        ResumeReview {
            id: self.id,
            company_name: self.company_name,
            job_title: self.job_title,
            job_description: self.job_description,
            image_path: self.image_path,
            resume_path: self.resume_path,
            schema: detect_schema(&self.feedback),
            score_band: ScoreBand::from_score(feedback.overall_score),
            feedback,
            enhanced_resume: self.enhanced_resume,
            application_email: self.application_email,
            created_at: self.created_at,
        }
    }

    pub fn to_card(&self) -> ResumeCard {
        let feedback = transform(&self.feedback);
        ResumeCard {
            id: self.id,
            company_name: self.company_name.clone(),
            job_title: self.job_title.clone(),
            image_path: self.image_path.clone(),
            overall_score: feedback.overall_score,
            ats_score: feedback.ats.score,
            content_score: feedback.content.score,
            keyword_match: feedback.ats.keyword_match,
            priority_fix: feedback.ats.priority_fixes.first().cloned(),
            score_band: ScoreBand::from_score(feedback.overall_score),
            band_label: ScoreBand::from_score(feedback.overall_score).label(),
            updated_at: self.updated_at(),
        }
    }
}

/// Full review page: record metadata plus canonical feedback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeReview {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub job_description: Option<String>,
    pub image_path: String,
    pub resume_path: String,
    pub feedback: Feedback,
    pub schema: SchemaKind,
    pub score_band: ScoreBand,
    pub enhanced_resume: Option<EnhancedResume>,
    pub application_email: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Listing entry for the résumé library.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeCard {
    pub id: Uuid,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
    pub image_path: String,
    pub overall_score: u32,
    pub ats_score: u32,
    pub content_score: u32,
    pub keyword_match: u32,
    pub priority_fix: Option<String>,
    pub score_band: ScoreBand,
    pub band_label: &'static str,
    pub updated_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_deserializes_from_stored_json() {
        let id = Uuid::new_v4();
        let stored = json!({
            "id": id,
            "companyName": "Google",
            "jobTitle": "Frontend Developer",
            "imagePath": "/images/resume-01.png",
            "resumePath": "/resumes/resume-1.pdf",
            "feedback": "",
            "enhancedResume": { "pdfPath": "/out.pdf", "updatedAt": 1700000000000_i64 }
        });
        let record: ResumeRecord = serde_json::from_value(stored).unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.updated_at(), 1_700_000_000_000);
        assert!(record.application_email.is_none());
    }

    #[test]
    fn test_review_normalizes_empty_feedback() {
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            company_name: None,
            job_title: None,
            job_description: None,
            image_path: "/img.png".to_string(),
            resume_path: "/cv.pdf".to_string(),
            feedback: json!(""),
            enhanced_resume: None,
            application_email: None,
            created_at: None,
        };
        let review = record.into_review();
        assert_eq!(review.feedback.overall_score, 0);
        assert_eq!(review.schema, SchemaKind::Legacy);
        assert_eq!(review.score_band, ScoreBand::NeedsFocus);
        assert_eq!(review.feedback.structure.tips.len(), 1);
    }

    #[test]
    fn test_card_surfaces_first_priority_fix() {
        let record = ResumeRecord {
            id: Uuid::new_v4(),
            company_name: Some("Microsoft".to_string()),
            job_title: Some("Cloud Engineer".to_string()),
            job_description: None,
            image_path: "/img.png".to_string(),
            resume_path: "/cv.pdf".to_string(),
            feedback: json!({
                "overallScore": 68,
                "ATS": {
                    "score": 64,
                    "keywordMatch": 58,
                    "priorityFixes": ["Convert paragraphs to bullets", "Add Kubernetes"]
                },
                "toneAndStyle": { "score": 62, "tips": [] },
                "content": { "score": 70, "tips": [] }
            }),
            enhanced_resume: None,
            application_email: None,
            created_at: None,
        };
        let card = record.to_card();
        assert_eq!(card.overall_score, 68);
        assert_eq!(card.keyword_match, 58);
        assert_eq!(card.content_score, 70);
        assert_eq!(card.priority_fix.as_deref(), Some("Convert paragraphs to bullets"));
        assert_eq!(card.score_band, ScoreBand::OnTrack);
        assert_eq!(card.band_label, "On Track");
        assert_eq!(card.updated_at, 0);
    }
}
