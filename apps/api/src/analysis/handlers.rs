//! Axum route handlers for feedback normalization and analysis prompts.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::prompts::{prepare_instructions, AI_RESPONSE_FORMAT};
use crate::analysis::AnalysisInput;
use crate::errors::AppError;
use crate::feedback::{detect_schema, transform, Feedback, ScoreBand, SchemaKind};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeResponse {
    pub feedback: Feedback,
    pub schema: SchemaKind,
    pub score_band: ScoreBand,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionsRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionsResponse {
    pub instructions: String,
    pub response_format: &'static str,
}

/// POST /api/v1/feedback/normalize
///
/// Accepts parsed `feedback` or the raw model `response` and returns the
/// canonical record. Malformed feedback still normalizes; only an unparsable
/// response is rejected.
pub async fn handle_normalize(
    Json(input): Json<AnalysisInput>,
) -> Result<Json<NormalizeResponse>, AppError> {
    let raw = input.into_payload()?.ok_or_else(|| {
        AppError::Validation("either `feedback` or `response` must be provided".to_string())
    })?;

    let feedback = transform(&raw);
    Ok(Json(NormalizeResponse {
        schema: detect_schema(&raw),
        score_band: ScoreBand::from_score(feedback.overall_score),
        feedback,
    }))
}

/// POST /api/v1/analysis/instructions
///
/// Builds the prompt the client sends to the model for a given job.
pub async fn handle_instructions(
    Json(request): Json<InstructionsRequest>,
) -> Json<InstructionsResponse> {
    Json(InstructionsResponse {
        instructions: prepare_instructions(&request.job_title, &request.job_description),
        response_format: AI_RESPONSE_FORMAT,
    })
}
