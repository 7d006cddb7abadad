use std::collections::HashMap;

use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use crate::error::SurveyError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: String,
    pub is_active: bool,
}

/// Closed set of question kinds. Unknown kind strings are rejected at write
/// time instead of being stored as opaque text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    SingleChoice,
    MultipleChoice,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultipleChoice => "multiple_choice",
        }
    }

    pub fn parse(value: &str) -> Result<Self, SurveyError> {
        match value {
            "text" => Ok(QuestionKind::Text),
            "single_choice" => Ok(QuestionKind::SingleChoice),
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            other => Err(SurveyError::validation(format!(
                "unknown question type '{other}'"
            ))),
        }
    }

    pub fn needs_options(&self) -> bool {
        !matches!(self, QuestionKind::Text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub survey_id: i64,
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<String>,
    pub is_required: bool,
    pub order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub id: i64,
    pub survey_id: i64,
    pub respondent_name: String,
    pub submitted_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub response_id: i64,
    pub question_id: i64,
    pub text: String,
}

/// Denormalized view for the results page: everything the tabulation needs
/// in one load, no statistics computed.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyResults {
    pub survey: Survey,
    pub questions: Vec<Question>,
    pub responses: Vec<Response>,
    pub answers_by_response: HashMap<i64, Vec<Answer>>,
}

impl Survey {
    /// Expects columns: id, title, description, created_at, is_active.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Survey {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
            is_active: row.get(4)?,
        })
    }
}

impl Question {
    /// Expects columns: id, survey_id, question_text, question_type, options,
    /// is_required, display_order.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let kind_raw: String = row.get(3)?;
        let kind = QuestionKind::parse(&kind_raw).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("unknown question type '{kind_raw}'").into(),
            )
        })?;
        let options_raw: Option<String> = row.get(4)?;
        let options = match options_raw {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(err))
            })?,
            None => Vec::new(),
        };
        Ok(Question {
            id: row.get(0)?,
            survey_id: row.get(1)?,
            text: row.get(2)?,
            kind,
            options,
            is_required: row.get(5)?,
            order: row.get(6)?,
        })
    }
}

impl Response {
    /// Expects columns: id, survey_id, respondent_name, submitted_at.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Response {
            id: row.get(0)?,
            survey_id: row.get(1)?,
            respondent_name: row.get(2)?,
            submitted_at: row.get(3)?,
        })
    }
}

impl Answer {
    /// Expects columns: id, response_id, question_id, answer_text.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Answer {
            id: row.get(0)?,
            response_id: row.get(1)?,
            question_id: row.get(2)?,
            text: row.get(3)?,
        })
    }
}
