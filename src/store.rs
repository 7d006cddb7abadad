use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::Connection;

use crate::error::SurveyError;

/// Storage client for the survey database. Holds only the database path;
/// every operation opens its own connection and drops it when the call
/// returns, so there is no shared connection state between requests.
#[derive(Debug, Clone)]
pub struct SurveyStore {
  path: PathBuf,
}

impl SurveyStore {
  /// Opens the store at `path`, creating the schema if it does not exist yet.
  pub fn open(path: impl AsRef<Path>) -> Result<Self, SurveyError> {
    let store = SurveyStore {
      path: path.as_ref().to_path_buf()
    };
    let conn = store.connect()?;
    init_schema(&conn)?;
    Ok(store)
  }

  /// Scoped connection for one operation. Foreign keys are enabled per
  /// connection because SQLite defaults them to off.
  pub fn connect(&self) -> Result<Connection, SurveyError> {
    let conn = Connection::open(&self.path)?;
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(conn)
  }
}

fn init_schema(conn: &Connection) -> Result<(), SurveyError> {
  conn.execute_batch(
    "CREATE TABLE IF NOT EXISTS surveys (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT,
        created_at TEXT NOT NULL,
        is_active INTEGER NOT NULL DEFAULT 1
      );
      CREATE TABLE IF NOT EXISTS questions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        survey_id INTEGER NOT NULL,
        question_text TEXT NOT NULL,
        question_type TEXT NOT NULL,
        options TEXT,
        is_required INTEGER NOT NULL DEFAULT 1,
        display_order INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(survey_id) REFERENCES surveys(id) ON DELETE CASCADE
      );
      CREATE INDEX IF NOT EXISTS idx_questions_survey ON questions(survey_id);
      CREATE TABLE IF NOT EXISTS responses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        survey_id INTEGER NOT NULL,
        respondent_name TEXT NOT NULL,
        submitted_at TEXT NOT NULL,
        FOREIGN KEY(survey_id) REFERENCES surveys(id) ON DELETE CASCADE
      );
      CREATE INDEX IF NOT EXISTS idx_responses_survey ON responses(survey_id);
      CREATE TABLE IF NOT EXISTS answers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        response_id INTEGER NOT NULL,
        question_id INTEGER NOT NULL,
        answer_text TEXT NOT NULL,
        FOREIGN KEY(response_id) REFERENCES responses(id) ON DELETE CASCADE,
        FOREIGN KEY(question_id) REFERENCES questions(id) ON DELETE CASCADE
      );
      CREATE INDEX IF NOT EXISTS idx_answers_response ON answers(response_id);
      CREATE INDEX IF NOT EXISTS idx_answers_question ON answers(question_id);"
  )?;
  Ok(())
}

pub fn now_string() -> String {
  Utc::now().to_rfc3339()
}

#[cfg(test)]
pub(crate) mod testutil {
  use super::SurveyStore;
  use uuid::Uuid;

  /// Fresh on-disk store under the system temp dir. In-memory SQLite would
  /// not survive the per-operation connection cycle the store uses.
  pub fn temp_store() -> SurveyStore {
    let path = std::env::temp_dir().join(format!("surveys-test-{}.sqlite3", Uuid::new_v4()));
    SurveyStore::open(&path).expect("open temp store")
  }
}
