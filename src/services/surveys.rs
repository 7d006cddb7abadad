use rusqlite::{params, OptionalExtension};

use crate::error::SurveyError;
use crate::model::Survey;
use crate::store::{now_string, SurveyStore};

const MAX_TITLE_CHARS: usize = 200;

pub fn create_survey(
    store: &SurveyStore,
    title: &str,
    description: Option<&str>,
) -> Result<Survey, SurveyError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(SurveyError::validation("survey title must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(SurveyError::validation(format!(
            "survey title is limited to {MAX_TITLE_CHARS} characters"
        )));
    }
    let description = description
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string);

    let conn = store.connect()?;
    let created_at = now_string();
    conn.execute(
        "INSERT INTO surveys (title, description, created_at, is_active) VALUES (?1, ?2, ?3, 1)",
        params![title, description, created_at],
    )?;

    Ok(Survey {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        description,
        created_at,
        is_active: true,
    })
}

/// Active surveys in insertion order; deactivated ones are filtered out.
pub fn list_active_surveys(store: &SurveyStore) -> Result<Vec<Survey>, SurveyError> {
    let conn = store.connect()?;
    let mut stmt = conn.prepare(
        "SELECT id, title, description, created_at, is_active FROM surveys \
        WHERE is_active = 1 ORDER BY id",
    )?;
    let rows = stmt.query_map([], Survey::from_row)?;

    let mut surveys = Vec::new();
    for row in rows {
        surveys.push(row?);
    }
    Ok(surveys)
}

pub fn get_survey(store: &SurveyStore, survey_id: i64) -> Result<Survey, SurveyError> {
    let conn = store.connect()?;
    conn.query_row(
        "SELECT id, title, description, created_at, is_active FROM surveys WHERE id = ?1",
        params![survey_id],
        Survey::from_row,
    )
    .optional()?
    .ok_or(SurveyError::NotFound("survey"))
}

/// Soft delete: the survey and its data stay in place but drop out of the
/// active listing.
pub fn deactivate_survey(store: &SurveyStore, survey_id: i64) -> Result<(), SurveyError> {
    let conn = store.connect()?;
    let changed = conn.execute(
        "UPDATE surveys SET is_active = 0 WHERE id = ?1",
        params![survey_id],
    )?;
    if changed == 0 {
        return Err(SurveyError::NotFound("survey"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{create_survey, deactivate_survey, get_survey, list_active_surveys};
    use crate::error::SurveyError;
    use crate::store::testutil::temp_store;

    #[test]
    fn created_survey_is_active_and_listed() {
        let store = temp_store();
        let survey = create_survey(&store, "T", None).expect("create");
        assert!(survey.is_active);
        assert!(survey.id > 0);
        assert_eq!(survey.description, None);

        let listed = list_active_surveys(&store).expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, survey.id);
        assert_eq!(listed[0].title, "T");
    }

    #[test]
    fn blank_title_is_rejected() {
        let store = temp_store();
        let err = create_survey(&store, "   ", Some("desc")).expect_err("blank title");
        assert!(matches!(err, SurveyError::Validation(_)));
    }

    #[test]
    fn overlong_title_is_rejected() {
        let store = temp_store();
        let title = "x".repeat(201);
        let err = create_survey(&store, &title, None).expect_err("overlong title");
        assert!(matches!(err, SurveyError::Validation(_)));
    }

    #[test]
    fn blank_description_is_stored_as_none() {
        let store = temp_store();
        let survey = create_survey(&store, "T", Some("  ")).expect("create");
        assert_eq!(survey.description, None);
        let fetched = get_survey(&store, survey.id).expect("get");
        assert_eq!(fetched.description, None);
    }

    #[test]
    fn missing_survey_is_not_found() {
        let store = temp_store();
        let err = get_survey(&store, 42).expect_err("missing survey");
        assert!(matches!(err, SurveyError::NotFound(_)));
    }

    #[test]
    fn deactivated_survey_leaves_the_active_listing() {
        let store = temp_store();
        let survey = create_survey(&store, "Old drive", None).expect("create");
        deactivate_survey(&store, survey.id).expect("deactivate");

        assert!(list_active_surveys(&store).expect("list").is_empty());
        // The record itself survives, only the flag flips.
        let fetched = get_survey(&store, survey.id).expect("get");
        assert!(!fetched.is_active);

        let err = deactivate_survey(&store, 999).expect_err("missing survey");
        assert!(matches!(err, SurveyError::NotFound(_)));
    }
}
