// Domain model structs. Field names stay wire-compatible with the record
// shapes the original deployment persisted, so old result records still load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub category: String,
    pub question: String,
    /// Present (and non-empty) for multiple-choice questions only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(
        rename = "correctAnswerIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub correct_answer_index: Option<usize>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
}

impl Question {
    /// Multiple-choice is determined by the presence of options, not the
    /// type tag, which the generator does not always emit.
    pub fn is_multiple_choice(&self) -> bool {
        self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}

/// What a student submitted for one question: a selected option index for
/// multiple-choice, raw text for essays. Untagged to match the stored shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(usize),
    Text(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "questionIndex")]
    pub question_index: usize,
    pub answer: AnswerValue,
}

/// The persisted, scored outcome of one completed session. Append-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub username: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "scoreMC")]
    pub score_mc: u32,
    #[serde(rename = "totalMC")]
    pub total_mc: u32,
    pub answers: Vec<Answer>,
    /// Snapshot of the question list at completion time. Absent on records
    /// written by an older data shape; review screens must cope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(
        rename = "studyProgram",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub study_program: Option<String>,
    #[serde(rename = "regNumber", default, skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
}

impl User {
    /// A student account is incomplete until all three profile fields are set.
    pub fn profile_complete(&self) -> bool {
        self.full_name.is_some() && self.study_program.is_some() && self.reg_number.is_some()
    }

    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.username)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Essay,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple-choice"),
            QuestionType::Essay => write!(f, "essay"),
        }
    }
}

/// One row of the admin's question configuration: how many questions of
/// which type to generate for a category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub category: String,
    pub count: u32,
    pub question_type: QuestionType,
}
