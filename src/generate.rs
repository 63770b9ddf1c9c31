//! Quiz generation client for the Gemini `generateContent` API.
//!
//! The client sends a fixed prompt plus a JSON response schema, and
//! validates every response against the quiz question contract before the
//! questions reach a session.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

use crate::error::GenerateError;
use crate::models::{validate_questions, QuizQuestion};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client turning document text into a validated question sequence.
#[derive(Clone)]
pub struct QuizGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl QuizGenerator {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the model used for generation.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generate a quiz from extracted document text.
    ///
    /// Callers pass non-empty text; empty input is rejected before this
    /// client is ever invoked.
    pub async fn generate(&self, text: &str) -> Result<Vec<QuizQuestion>, GenerateError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(text),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: quiz_schema(),
            },
        };

        debug!(model = %self.model, chars = text.len(), "requesting quiz generation");

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "model API error: {message}");
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let payload = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| {
                GenerateError::Malformed("response contained no candidates".to_string())
            })?;

        parse_questions(&payload)
    }
}

/// Parse the model's JSON payload and validate it against the contract.
fn parse_questions(payload: &str) -> Result<Vec<QuizQuestion>, GenerateError> {
    let questions: Vec<QuizQuestion> =
        serde_json::from_str(payload.trim()).map_err(|e| GenerateError::Malformed(e.to_string()))?;
    validate_questions(&questions)?;
    Ok(questions)
}

/// The fixed prompt template wrapped around the document text.
fn build_prompt(text: &str) -> String {
    format!(
        "You are an expert instructional designer creating exam questions for a master's level \
         curriculum. Your task is to generate a 20-question multiple-choice quiz based on the \
         provided text from lecture slides. The questions must be difficult and designed to test \
         a deep, integrated understanding of the material, going beyond simple recall to require \
         critical thinking.\n\n\
         Follow these strict requirements for each question:\n\
         1. **Advanced Question Formulation:** Questions should force the user to synthesize \
         concepts from the text. Questions that test on subtle distinctions between closely \
         related concepts are preferred.\n\
         2. **Highly Plausible Distractors:** All incorrect answer choices (distractors) must be \
         highly plausible and represent common errors, subtle misconceptions, or concepts that \
         are true but not the *best* answer to the specific question. There should be exactly 3 \
         distractors for each question, for a total of 4 options.\n\
         3. **Focus on Principles:** Focus on the underlying principles, mechanisms, and \
         classifications presented in the text.\n\
         4. **Avoid Structural Clues:** Ensure all answer choices (correct and incorrect) are of \
         similar length, detail, and grammatical structure. Avoid making the correct answer \
         obvious through formatting or length.\n\
         5. **Comprehensive Coverage:** The questions must be drawn from the entire breadth of \
         the provided document. Do not focus only on the main headings or summaries. Actively \
         seek out and test on a wide variety of concepts, including both major themes and \
         specific, nuanced details found throughout the text.\n\
         6. **Explanations:** For each of the 4 options, provide a brief, condensed explanation \
         for why that specific option is either correct or incorrect.\n\n\
         Here is the lecture content:\n\
         ---\n\
         {text}\n\
         ---\n"
    )
}

/// Response schema sent with the request so the model answers in the quiz
/// wire format.
fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": {
                    "type": "STRING",
                    "description": "The question text."
                },
                "options": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "text": {
                                "type": "STRING",
                                "description": "The answer option text."
                            },
                            "explanation": {
                                "type": "STRING",
                                "description": "A brief and condensed explanation of why this specific option is correct or incorrect."
                            }
                        },
                        "required": ["text", "explanation"]
                    },
                    "description": "An array of 4 possible answer option objects."
                },
                "correctAnswerIndex": {
                    "type": "INTEGER",
                    "description": "The 0-based index of the correct answer in the options array."
                }
            },
            "required": ["question", "options", "correctAnswerIndex"]
        }
    })
}
