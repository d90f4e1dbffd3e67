//! Axum route handlers for the résumé library.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{present, resolve_payload, AnalysisInput};
use crate::errors::AppError;
use crate::feedback::{summarize, transform, PortfolioSummary};
use crate::resumes::models::{
    resume_key, EnhancedResume, ResumeCard, ResumeRecord, ResumeReview, RESUME_KEY_PATTERN,
};
use crate::resumes::store::ResumeStore;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub resume_path: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(flatten)]
    pub analysis: AnalysisInput,
}

/// The rewritten résumé and outreach email produced after analysis. Each may
/// arrive already parsed or as the raw model response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceResumeRequest {
    #[serde(default)]
    pub pdf_path: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Value>,
    #[serde(default)]
    pub rewrite_response: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub application_email: Option<Value>,
    #[serde(default)]
    pub email_response: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct WipeResponse {
    pub deleted: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Store helpers
// ────────────────────────────────────────────────────────────────────────────

/// Loads every parseable record. Unparseable values and records without a
/// résumé file are skipped.
async fn load_records(store: &dyn ResumeStore) -> Result<Vec<ResumeRecord>, AppError> {
    let entries = store.list(RESUME_KEY_PATTERN).await?;
    let records = entries
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_str::<ResumeRecord>(&value) {
            Ok(record) if !record.resume_path.is_empty() => Some(record),
            Ok(_) => None,
            Err(e) => {
                warn!("Skipping unparseable record {key}: {e}");
                None
            }
        })
        .collect();
    Ok(records)
}

async fn load_record(store: &dyn ResumeStore, id: Uuid) -> Result<ResumeRecord, AppError> {
    let value = store
        .get(&resume_key(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    serde_json::from_str(&value)
        .map_err(|e| AppError::UnprocessableEntity(format!("Stored resume {id} is malformed: {e}")))
}

async fn save_record(store: &dyn ResumeStore, record: &ResumeRecord) -> Result<(), AppError> {
    let value = serde_json::to_string(record).map_err(|e| AppError::Internal(e.into()))?;
    store.set(&resume_key(record.id), &value).await?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes
///
/// Library cards, most recently rewritten first.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeCard>>, AppError> {
    let mut records = load_records(state.store.as_ref()).await?;
    records.sort_by_key(|r| std::cmp::Reverse(r.updated_at()));
    Ok(Json(records.iter().map(ResumeRecord::to_card).collect()))
}

/// GET /api/v1/resumes/summary
pub async fn handle_summary(
    State(state): State<AppState>,
) -> Result<Json<PortfolioSummary>, AppError> {
    let records = load_records(state.store.as_ref()).await?;
    let reviews: Vec<_> = records.iter().map(|r| transform(&r.feedback)).collect();
    Ok(Json(summarize(&reviews)))
}

/// POST /api/v1/resumes
///
/// Persists résumé metadata. AI output may be attached now or later via
/// PUT /api/v1/resumes/:id/feedback.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(request): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeReview>), AppError> {
    if request.resume_path.trim().is_empty() || request.image_path.trim().is_empty() {
        return Err(AppError::Validation(
            "Unable to locate resume file. Please upload again.".to_string(),
        ));
    }

    let feedback = request.analysis.into_payload()?.unwrap_or(Value::Null);

    let record = ResumeRecord {
        id: Uuid::new_v4(),
        company_name: request.company_name,
        job_title: request.job_title,
        job_description: request.job_description,
        image_path: request.image_path,
        resume_path: request.resume_path,
        feedback,
        enhanced_resume: None,
        application_email: None,
        created_at: Some(Utc::now()),
    };
    save_record(state.store.as_ref(), &record).await?;
    info!("Stored resume {}", record.id);

    Ok((StatusCode::CREATED, Json(record.into_review())))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeReview>, AppError> {
    let record = load_record(state.store.as_ref(), id).await?;
    Ok(Json(record.into_review()))
}

/// PUT /api/v1/resumes/:id/feedback
///
/// Attaches AI output to an existing record, replacing any previous feedback.
pub async fn handle_attach_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AnalysisInput>,
) -> Result<Json<ResumeReview>, AppError> {
    let feedback = input.into_payload()?.ok_or_else(|| {
        AppError::Validation("either `feedback` or `response` must be provided".to_string())
    })?;

    let mut record = load_record(state.store.as_ref(), id).await?;
    record.feedback = feedback;
    save_record(state.store.as_ref(), &record).await?;

    Ok(Json(record.into_review()))
}

/// PUT /api/v1/resumes/:id/enhanced
///
/// Stores the rewritten résumé (and the application email, when sent) and
/// stamps it, which moves the record to the top of the library.
pub async fn handle_attach_enhanced(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<EnhanceResumeRequest>,
) -> Result<Json<ResumeReview>, AppError> {
    if request.pdf_path.trim().is_empty() {
        return Err(AppError::Validation(
            "Failed to upload updated resume PDF".to_string(),
        ));
    }
    let content = resolve_payload(request.content, request.rewrite_response)?.ok_or_else(|| {
        AppError::Validation("either `content` or `rewriteResponse` must be provided".to_string())
    })?;
    let email = resolve_payload(request.application_email, request.email_response)?;

    let mut record = load_record(state.store.as_ref(), id).await?;
    record.enhanced_resume = Some(EnhancedResume {
        pdf_path: request.pdf_path,
        content,
        updated_at: Some(Utc::now().timestamp_millis()),
        filename: request.filename,
    });
    if email.is_some() {
        record.application_email = email;
    }
    save_record(state.store.as_ref(), &record).await?;
    info!("Stored enhanced resume for {id}");
    Ok(Json(record.into_review()))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(&resume_key(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

/// DELETE /api/v1/resumes
///
/// Removes every stored résumé record.
pub async fn handle_wipe_resumes(
    State(state): State<AppState>,
) -> Result<Json<WipeResponse>, AppError> {
    let entries = state.store.list(RESUME_KEY_PATTERN).await?;
    let mut deleted = 0;
    for (key, _) in entries {
        if state.store.delete(&key).await? {
            deleted += 1;
        }
    }
    info!("Wiped {deleted} resume records");
    Ok(Json(WipeResponse { deleted }))
}
