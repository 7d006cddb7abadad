use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::{Deserialize, Serialize};
use tera::Context;

use crate::error::SurveyError;
use crate::http::AppState;
use crate::model::Response;
use crate::services::{questions, responses, results, surveys};

fn render(state: &AppState, template: &str, ctx: Context) -> Result<Html<String>, SurveyError> {
    Ok(Html(state.tera.render(template, &ctx)?))
}

pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, SurveyError> {
    let surveys = surveys::list_active_surveys(&state.store)?;
    let mut ctx = Context::new();
    ctx.insert("surveys", &surveys);
    render(&state, "home.html.tera", ctx)
}

pub async fn create_survey_form(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, SurveyError> {
    render(&state, "create_survey.html.tera", Context::new())
}

#[derive(Debug, Deserialize)]
pub struct CreateSurveyForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

pub async fn create_survey(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateSurveyForm>,
) -> Result<Redirect, SurveyError> {
    let survey = surveys::create_survey(&state.store, &form.title, Some(&form.description))?;
    tracing::info!(survey_id = survey.id, "survey created");
    Ok(Redirect::to(&format!("/survey/{}/edit", survey.id)))
}

pub async fn view_survey(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
) -> Result<Html<String>, SurveyError> {
    let survey = surveys::get_survey(&state.store, survey_id)?;
    let questions = questions::list_questions(&state.store, survey_id)?;
    let mut ctx = Context::new();
    ctx.insert("survey", &survey);
    ctx.insert("questions", &questions);
    render(&state, "survey_form.html.tera", ctx)
}

pub async fn edit_survey(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
) -> Result<Html<String>, SurveyError> {
    let survey = surveys::get_survey(&state.store, survey_id)?;
    let questions = questions::list_questions(&state.store, survey_id)?;
    let mut ctx = Context::new();
    ctx.insert("survey", &survey);
    ctx.insert("questions", &questions);
    render(&state, "edit_survey.html.tera", ctx)
}

/// Answer fields arrive as `question_<id>`; anything else in the form body
/// (such as the respondent name) is not an answer.
pub async fn submit_survey(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect, SurveyError> {
    let respondent_name = form.get("respondent_name").map(String::as_str);
    let mut answers = HashMap::new();
    for (field, value) in &form {
        if let Some(raw_id) = field.strip_prefix("question_") {
            if let Ok(question_id) = raw_id.parse::<i64>() {
                answers.insert(question_id, value.clone());
            }
        }
    }
    let response = responses::submit_response(&state.store, survey_id, respondent_name, &answers)?;
    tracing::info!(
        survey_id,
        response_id = response.id,
        "response submitted"
    );
    Ok(Redirect::to(&format!("/survey/{survey_id}/thanks")))
}

pub async fn survey_thanks(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
) -> Result<Html<String>, SurveyError> {
    let mut ctx = Context::new();
    ctx.insert("survey_id", &survey_id);
    render(&state, "thanks.html.tera", ctx)
}

/// One table row per response, with a cell for every question in display
/// order so the template stays a plain nested loop.
#[derive(Debug, Serialize)]
struct ResultRow {
    response: Response,
    cells: Vec<Option<String>>,
}

pub async fn survey_results(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
) -> Result<Html<String>, SurveyError> {
    let results = results::survey_results(&state.store, survey_id)?;

    let mut rows = Vec::new();
    for response in &results.responses {
        let answers = results
            .answers_by_response
            .get(&response.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let cells = results
            .questions
            .iter()
            .map(|question| {
                answers
                    .iter()
                    .find(|answer| answer.question_id == question.id)
                    .map(|answer| answer.text.clone())
            })
            .collect();
        rows.push(ResultRow {
            response: response.clone(),
            cells,
        });
    }

    let mut ctx = Context::new();
    ctx.insert("survey", &results.survey);
    ctx.insert("questions", &results.questions);
    ctx.insert("rows", &rows);
    render(&state, "results.html.tera", ctx)
}

pub async fn deactivate_survey(
    State(state): State<Arc<AppState>>,
    Path(survey_id): Path<i64>,
) -> Result<Redirect, SurveyError> {
    surveys::deactivate_survey(&state.store, survey_id)?;
    tracing::info!(survey_id, "survey deactivated");
    Ok(Redirect::to("/"))
}
