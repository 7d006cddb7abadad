use rusqlite::{params, Transaction};

use crate::error::SurveyError;
use crate::model::QuestionKind;
use crate::store::{now_string, SurveyStore};

#[derive(Debug)]
pub struct SeedReport {
  pub surveys: usize,
  pub questions: usize,
}

struct DemoQuestion {
  text: &'static str,
  kind: QuestionKind,
  options: &'static [&'static str],
  is_required: bool,
}

struct DemoSurvey {
  title: &'static str,
  description: &'static str,
  questions: &'static [DemoQuestion],
}

const DEMO_SURVEYS: &[DemoSurvey] = &[
  DemoSurvey {
    title: "Community Needs Assessment 2025",
    description: "Help us understand the most pressing needs in our barangay to better serve \
      our community.",
    questions: &[
      DemoQuestion {
        text: "What is your age group?",
        kind: QuestionKind::SingleChoice,
        options: &["18-25", "26-35", "36-45", "46-55", "56-65", "65+"],
        is_required: true,
      },
      DemoQuestion {
        text: "What are the most important issues facing our barangay? (Select all that apply)",
        kind: QuestionKind::MultipleChoice,
        options: &[
          "Road maintenance",
          "Water supply",
          "Waste management",
          "Security",
          "Health services",
          "Education",
          "Employment opportunities",
          "Public transportation",
        ],
        is_required: true,
      },
      DemoQuestion {
        text: "How would you rate the current barangay services?",
        kind: QuestionKind::SingleChoice,
        options: &["Excellent", "Good", "Fair", "Poor", "Very Poor"],
        is_required: true,
      },
      DemoQuestion {
        text: "What suggestions do you have to improve our barangay?",
        kind: QuestionKind::Text,
        options: &[],
        is_required: false,
      },
    ],
  },
  DemoSurvey {
    title: "Barangay Fiesta Planning Survey",
    description: "Help us plan the upcoming barangay fiesta by sharing your preferences and \
      ideas.",
    questions: &[
      DemoQuestion {
        text: "Which activities would you like to see during the fiesta? (Select all that apply)",
        kind: QuestionKind::MultipleChoice,
        options: &[
          "Cultural dance competition",
          "Cooking contest",
          "Sports tournament",
          "Talent show",
          "Bingo games",
          "Food fair",
          "Live music",
          "Fireworks display",
        ],
        is_required: true,
      },
      DemoQuestion {
        text: "What type of food would you prefer for the community feast?",
        kind: QuestionKind::SingleChoice,
        options: &[
          "Traditional Filipino dishes",
          "International cuisine",
          "Local specialties",
          "Vegetarian options",
          "All of the above",
        ],
        is_required: true,
      },
      DemoQuestion {
        text: "Would you be willing to volunteer for the fiesta preparations?",
        kind: QuestionKind::SingleChoice,
        options: &[
          "Yes, definitely",
          "Maybe, depending on the task",
          "No, but I can help in other ways",
          "No, I cannot participate",
        ],
        is_required: true,
      },
      DemoQuestion {
        text: "Any additional suggestions or ideas for the fiesta?",
        kind: QuestionKind::Text,
        options: &[],
        is_required: false,
      },
    ],
  },
  DemoSurvey {
    title: "Health and Safety Awareness Survey",
    description: "Help us assess the health and safety needs of our community members.",
    questions: &[
      DemoQuestion {
        text: "How often do you visit the barangay health center?",
        kind: QuestionKind::SingleChoice,
        options: &["Weekly", "Monthly", "Every few months", "Only when needed", "Never"],
        is_required: true,
      },
      DemoQuestion {
        text: "What health services would you like to see improved? (Select all that apply)",
        kind: QuestionKind::MultipleChoice,
        options: &[
          "Medical consultations",
          "Vaccination programs",
          "Health education",
          "Emergency services",
          "Dental care",
          "Mental health support",
          "Maternal and child health",
        ],
        is_required: true,
      },
      DemoQuestion {
        text: "How safe do you feel in your neighborhood?",
        kind: QuestionKind::SingleChoice,
        options: &["Very safe", "Somewhat safe", "Neutral", "Somewhat unsafe", "Very unsafe"],
        is_required: true,
      },
      DemoQuestion {
        text: "What safety concerns do you have in our barangay?",
        kind: QuestionKind::Text,
        options: &[],
        is_required: false,
      },
    ],
  },
];

/// Inserts the sample surveys in one transaction. Any failure rolls the
/// whole batch back and surfaces the error to the caller, which reports it.
pub fn create_demo_data(store: &SurveyStore) -> Result<SeedReport, SurveyError> {
  let mut conn = store.connect()?;
  let tx = conn.transaction()?;

  let mut surveys = 0;
  let mut questions = 0;
  for demo in DEMO_SURVEYS {
    questions += insert_demo_survey(&tx, demo)?;
    surveys += 1;
  }

  tx.commit()?;
  Ok(SeedReport { surveys, questions })
}

fn insert_demo_survey(tx: &Transaction<'_>, demo: &DemoSurvey) -> Result<usize, SurveyError> {
  tx.execute(
    "INSERT INTO surveys (title, description, created_at, is_active) VALUES (?1, ?2, ?3, 1)",
    params![demo.title, demo.description, now_string()]
  )?;
  let survey_id = tx.last_insert_rowid();

  for (index, question) in demo.questions.iter().enumerate() {
    let options_json = if question.options.is_empty() {
      None
    } else {
      Some(serde_json::to_string(question.options)?)
    };
    tx.execute(
      "INSERT INTO questions \
      (survey_id, question_text, question_type, options, is_required, display_order) \
      VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
      params![
        survey_id,
        question.text,
        question.kind.as_str(),
        options_json,
        question.is_required,
        index as i64 + 1
      ]
    )?;
  }
  Ok(demo.questions.len())
}

#[cfg(test)]
mod tests {
  use super::create_demo_data;
  use crate::services::questions::list_questions;
  use crate::services::surveys::list_active_surveys;
  use crate::store::testutil::temp_store;

  #[test]
  fn seeds_three_surveys_with_four_questions_each() {
    let store = temp_store();
    let report = create_demo_data(&store).expect("seed");
    assert_eq!(report.surveys, 3);
    assert_eq!(report.questions, 12);

    let surveys = list_active_surveys(&store).expect("list surveys");
    assert_eq!(surveys.len(), 3);
    for survey in &surveys {
      let questions = list_questions(&store, survey.id).expect("list questions");
      assert_eq!(questions.len(), 4);
      let orders: Vec<i64> = questions.iter().map(|q| q.order).collect();
      assert_eq!(orders, vec![1, 2, 3, 4]);
    }
  }
}
