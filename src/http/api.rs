use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use axum::Form;
use serde::{Deserialize, Serialize};

use crate::error::SurveyError;
use crate::http::AppState;
use crate::model::QuestionKind;
use crate::services::questions;
use crate::store::now_string;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: now_string(),
    })
}

#[derive(Debug, Deserialize)]
pub struct AddQuestionForm {
    pub question_text: String,
    pub question_type: String,
    #[serde(default)]
    pub options: String,
    #[serde(default = "default_required")]
    pub is_required: bool,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub struct AddQuestionResponse {
    pub status: &'static str,
    pub question_id: i64,
}

pub async fn add_question(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
    Form(form): Form<AddQuestionForm>,
) -> Result<Json<AddQuestionResponse>, SurveyError> {
    let kind = QuestionKind::parse(&form.question_type)?;
    // Options arrive as one comma-separated field from the edit form.
    let options: Vec<String> = form
        .options
        .split(',')
        .map(|option| option.trim().to_string())
        .filter(|option| !option.is_empty())
        .collect();
    let question = questions::add_question(
        &state.store,
        survey_id,
        &form.question_text,
        kind,
        &options,
        form.is_required,
    )?;
    Ok(Json(AddQuestionResponse {
        status: "success",
        question_id: question.id,
    }))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path((survey_id, question_id)): Path<(i64, i64)>,
) -> Result<Json<StatusResponse>, SurveyError> {
    questions::delete_question(&state.store, survey_id, question_id)?;
    Ok(Json(StatusResponse { status: "success" }))
}
