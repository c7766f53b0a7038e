// Question generation adapter: one outbound call to a generative service
// with a fixed output schema. At most one attempt per request; any transport
// or parse failure is a single generic condition and no partial output is
// kept.

use std::collections::HashMap;
use std::future::Future;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::models::{Category, GenerationRequest, Question, QuestionType};
use crate::names;

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("generation response did not match the expected shape: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("generation response carried no content")]
    Empty,
}

#[cfg_attr(test, mockall::automock)]
pub trait QuestionGenerator: Send + Sync {
    /// Produce a flat, order-preserving question list from the admin's
    /// per-category requests, each question tagged with its source category.
    fn generate(
        &self,
        requests: Vec<GenerationRequest>,
    ) -> impl Future<Output = Result<Vec<Question>, GenerationError>> + Send;
}

/// Run one generation attempt against the adapter. The binary outcome is
/// all the caller gets: a full question list, or a failure with nothing
/// retained.
pub async fn generate_question_set<G: QuestionGenerator>(
    generator: &G,
    requests: Vec<GenerationRequest>,
) -> Result<Vec<Question>, GenerationError> {
    let sections = requests.len();
    match generator.generate(requests).await {
        Ok(questions) => {
            tracing::info!(
                "generated {} questions across {sections} sections",
                questions.len()
            );
            Ok(questions)
        }
        Err(e) => {
            tracing::error!("question generation failed: {e}");
            Err(e)
        }
    }
}

/// Build generation requests from the question-configuration form: one row
/// per category with fields `count_<id>` and `type_<id>`. Rows with a zero
/// or unparsable count are skipped; counts are clamped to the allowed range.
pub fn prepare_requests(
    categories: &[Category],
    form: &HashMap<String, String>,
) -> Vec<GenerationRequest> {
    categories
        .iter()
        .filter_map(|category| {
            let count: u32 = form
                .get(&format!("count_{}", category.id))
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            if count == 0 {
                return None;
            }
            let question_type = match form.get(&format!("type_{}", category.id)).map(String::as_str)
            {
                Some("essay") => QuestionType::Essay,
                _ => QuestionType::MultipleChoice,
            };
            Some(GenerationRequest {
                category: category.name.clone(),
                count: count.clamp(names::MIN_QUESTION_COUNT, names::MAX_QUESTION_COUNT),
                question_type,
            })
        })
        .collect()
}

/// Adapter backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiGenerator {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }
}

impl QuestionGenerator for GeminiGenerator {
    async fn generate(
        &self,
        requests: Vec<GenerationRequest>,
    ) -> Result<Vec<Question>, GenerationError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_payload(&requests))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateContentResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(GenerationError::Empty)?;

        parse_generated(&text)
    }
}

fn prompt(requests: &[GenerationRequest]) -> String {
    let config_lines = requests
        .iter()
        .map(|r| {
            format!(
                "- Category: \"{}\", Number of questions: {}, Question type: {}",
                r.category, r.count, r.question_type
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Write questions for an academic admissions aptitude test (Tes Potensi \
         Akademik) with the following configuration. Make sure the correct \
         answer is marked correctly in 'correctAnswerIndex'.\n\n\
         Configuration:\n{config_lines}\n\n\
         The output must be a JSON array. Each element of the array is an \
         object representing one category, with 'category' and 'questions' \
         properties. The 'questions' property must be an array of question \
         objects. For 'multiple-choice' questions, each question object must \
         have 'question' (string), 'options' (array of strings), and \
         'correctAnswerIndex' (number, 0-based) properties. For 'essay' \
         questions, each question object must have 'question' (string) and \
         'type' with the value 'essay'."
    )
}

fn request_payload(requests: &[GenerationRequest]) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt(requests) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema(),
        },
    })
}

fn response_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "category": { "type": "STRING" },
                "questions": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "question": { "type": "STRING" },
                            "options": {
                                "type": "ARRAY",
                                "items": { "type": "STRING" },
                                "nullable": true,
                            },
                            "correctAnswerIndex": { "type": "NUMBER", "nullable": true },
                            "type": { "type": "STRING", "nullable": true },
                        },
                    },
                },
            },
        },
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GeneratedSection {
    category: String,
    questions: Vec<GeneratedQuestion>,
}

#[derive(Deserialize)]
struct GeneratedQuestion {
    question: String,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(rename = "correctAnswerIndex", default)]
    correct_answer_index: Option<usize>,
    #[serde(rename = "type", default)]
    question_type: Option<String>,
}

/// Flatten the per-category sections into one ordered question list, each
/// question tagged with its section's category.
fn parse_generated(text: &str) -> Result<Vec<Question>, GenerationError> {
    let sections: Vec<GeneratedSection> = serde_json::from_str(text)?;
    Ok(sections
        .into_iter()
        .flat_map(|section| {
            let category = section.category;
            section
                .questions
                .into_iter()
                .map(move |q| Question {
                    category: category.clone(),
                    question: q.question,
                    options: q.options,
                    correct_answer_index: q.correct_answer_index,
                    question_type: q.question_type,
                })
                .collect::<Vec<_>>()
        })
        .collect())
}
