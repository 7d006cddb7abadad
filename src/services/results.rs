use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use crate::error::SurveyError;
use crate::model::{Answer, Question, Response, Survey, SurveyResults};
use crate::store::SurveyStore;

/// Loads everything the results page needs in one call: the survey, its
/// questions in display order, every response in insertion order, and each
/// response's answers keyed by response id.
pub fn survey_results(store: &SurveyStore, survey_id: i64) -> Result<SurveyResults, SurveyError> {
    let conn = store.connect()?;

    let survey = conn
        .query_row(
            "SELECT id, title, description, created_at, is_active FROM surveys WHERE id = ?1",
            params![survey_id],
            Survey::from_row,
        )
        .optional()?
        .ok_or(SurveyError::NotFound("survey"))?;

    let mut stmt = conn.prepare(
        "SELECT id, survey_id, question_text, question_type, options, is_required, display_order \
        FROM questions WHERE survey_id = ?1 ORDER BY display_order",
    )?;
    let mut questions = Vec::new();
    for row in stmt.query_map(params![survey_id], Question::from_row)? {
        questions.push(row?);
    }

    let mut stmt = conn.prepare(
        "SELECT id, survey_id, respondent_name, submitted_at FROM responses \
        WHERE survey_id = ?1 ORDER BY id",
    )?;
    let mut responses: Vec<Response> = Vec::new();
    for row in stmt.query_map(params![survey_id], Response::from_row)? {
        responses.push(row?);
    }

    let mut stmt = conn.prepare(
        "SELECT id, response_id, question_id, answer_text FROM answers \
        WHERE response_id = ?1 ORDER BY id",
    )?;
    let mut answers_by_response: HashMap<i64, Vec<Answer>> = HashMap::new();
    for response in &responses {
        let mut answers = Vec::new();
        for row in stmt.query_map(params![response.id], Answer::from_row)? {
            answers.push(row?);
        }
        answers_by_response.insert(response.id, answers);
    }

    Ok(SurveyResults {
        survey,
        questions,
        responses,
        answers_by_response,
    })
}
