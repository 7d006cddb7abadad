use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};

use crate::error::SurveyError;
use crate::model::Response;
use crate::store::{now_string, SurveyStore};

const ANONYMOUS: &str = "Anonymous";

/// Records one respondent's submission. The response row and all of its
/// answer rows commit as a single transaction; a failure anywhere leaves
/// nothing behind.
///
/// Only questions belonging to the survey are considered, and only answers
/// with non-empty text are stored. `is_required` is deliberately not checked
/// at submission time.
pub fn submit_response(
    store: &SurveyStore,
    survey_id: i64,
    respondent_name: Option<&str>,
    answers_by_question_id: &HashMap<i64, String>,
) -> Result<Response, SurveyError> {
    let name = respondent_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS);

    let mut conn = store.connect()?;
    let tx = conn.transaction()?;

    let survey_exists: Option<i64> = tx
        .query_row(
            "SELECT id FROM surveys WHERE id = ?1",
            params![survey_id],
            |row| row.get(0),
        )
        .optional()?;
    if survey_exists.is_none() {
        return Err(SurveyError::NotFound("survey"));
    }

    let submitted_at = now_string();
    tx.execute(
        "INSERT INTO responses (survey_id, respondent_name, submitted_at) VALUES (?1, ?2, ?3)",
        params![survey_id, name, submitted_at],
    )?;
    let response_id = tx.last_insert_rowid();

    let question_ids: Vec<i64> = {
        let mut stmt = tx.prepare(
            "SELECT id FROM questions WHERE survey_id = ?1 ORDER BY display_order",
        )?;
        let rows = stmt.query_map(params![survey_id], |row| row.get(0))?;
        let mut ids = Vec::new();
        for row in rows {
            ids.push(row?);
        }
        ids
    };

    for question_id in question_ids {
        if let Some(text) = answers_by_question_id.get(&question_id) {
            if text.is_empty() {
                continue;
            }
            tx.execute(
                "INSERT INTO answers (response_id, question_id, answer_text) VALUES (?1, ?2, ?3)",
                params![response_id, question_id, text],
            )?;
        }
    }

    tx.commit()?;

    Ok(Response {
        id: response_id,
        survey_id,
        respondent_name: name.to_string(),
        submitted_at,
    })
}
