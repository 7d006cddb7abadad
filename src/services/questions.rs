use rusqlite::{params, OptionalExtension};

use crate::error::SurveyError;
use crate::model::{Question, QuestionKind};
use crate::store::SurveyStore;

pub fn add_question(
    store: &SurveyStore,
    survey_id: i64,
    text: &str,
    kind: QuestionKind,
    options: &[String],
    is_required: bool,
) -> Result<Question, SurveyError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SurveyError::validation("question text must not be empty"));
    }
    let options: Vec<String> = options
        .iter()
        .map(|option| option.trim().to_string())
        .filter(|option| !option.is_empty())
        .collect();
    if kind.needs_options() && options.is_empty() {
        return Err(SurveyError::validation(format!(
            "question type '{}' requires at least one option",
            kind.as_str()
        )));
    }

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

    // Read-then-write order assignment. Two connections adding to the same
    // survey at once can still produce duplicate order values; see DESIGN.md.
    let existing: i64 = tx.query_row(
        "SELECT COUNT(*) FROM questions WHERE survey_id = ?1",
        params![survey_id],
        |row| row.get(0),
    )?;
    let order = existing + 1;

    let options_json = if options.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&options)?)
    };
    tx.execute(
        "INSERT INTO questions \
        (survey_id, question_text, question_type, options, is_required, display_order) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            survey_id,
            text,
            kind.as_str(),
            options_json,
            is_required,
            order
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(Question {
        id,
        survey_id,
        text: text.to_string(),
        kind,
        options,
        is_required,
        order,
    })
}

/// Questions for a survey in display order. An unknown survey yields an
/// empty list rather than an error.
pub fn list_questions(store: &SurveyStore, survey_id: i64) -> Result<Vec<Question>, SurveyError> {
    let conn = store.connect()?;
    let mut stmt = conn.prepare(
        "SELECT id, survey_id, question_text, question_type, options, is_required, display_order \
        FROM questions WHERE survey_id = ?1 ORDER BY display_order",
    )?;
    let rows = stmt.query_map(params![survey_id], Question::from_row)?;

    let mut questions = Vec::new();
    for row in rows {
        questions.push(row?);
    }
    Ok(questions)
}

/// Deletes a question and every answer referencing it in one transaction.
/// Surviving questions keep their order values, so gaps are possible.
pub fn delete_question(
    store: &SurveyStore,
    survey_id: i64,
    question_id: i64,
) -> Result<(), SurveyError> {
    let mut conn = store.connect()?;
    let tx = conn.transaction()?;

    let found: Option<i64> = tx
        .query_row(
            "SELECT id FROM questions WHERE id = ?1 AND survey_id = ?2",
            params![question_id, survey_id],
            |row| row.get(0),
        )
        .optional()?;
    if found.is_none() {
        return Err(SurveyError::NotFound("question"));
    }

    tx.execute(
        "DELETE FROM answers WHERE question_id = ?1",
        params![question_id],
    )?;
    tx.execute("DELETE FROM questions WHERE id = ?1", params![question_id])?;
    tx.commit()?;
    Ok(())
}
