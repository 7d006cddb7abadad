use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use serde::Serialize;
use tera::Tera;

use crate::error::SurveyError;
use crate::store::SurveyStore;

pub mod api;
pub mod pages;

pub struct AppState {
    pub store: SurveyStore,
    pub tera: Tera,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/healthz", get(api::health_check))
        .route(
            "/create",
            get(pages::create_survey_form).post(pages::create_survey),
        )
        .route("/survey/:survey_id", get(pages::view_survey))
        .route("/survey/:survey_id/edit", get(pages::edit_survey))
        .route("/survey/:survey_id/submit", post(pages::submit_survey))
        .route("/survey/:survey_id/thanks", get(pages::survey_thanks))
        .route("/survey/:survey_id/results", get(pages::survey_results))
        .route("/survey/:survey_id/deactivate", post(pages::deactivate_survey))
        .route("/survey/:survey_id/add-question", post(api::add_question))
        .route(
            "/survey/:survey_id/question/:question_id/delete",
            delete(api::delete_question),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for SurveyError {
    fn into_response(self) -> Response {
        let status = match &self {
            SurveyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SurveyError::NotFound(_) => StatusCode::NOT_FOUND,
            SurveyError::Storage(_) | SurveyError::Encoding(_) | SurveyError::Template(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
