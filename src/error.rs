//! Error types for the pdf-quiz library.

use thiserror::Error;

/// Main error type for the pdf-quiz library.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Text extraction error.
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Quiz generation error.
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),

    /// IO error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to reading text out of a PDF document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to parse the PDF structure.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and could not be decrypted.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Failed to extract text from the parsed document.
    #[error("failed to extract text: {0}")]
    Text(String),
}

/// Errors related to calling the question-generation model.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Transport-level failure talking to the model API.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The model API returned a non-success status.
    #[error("model API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not contain usable quiz JSON.
    #[error("malformed model response: {0}")]
    Malformed(String),

    /// The returned questions violated the quiz schema.
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaError),
}

/// Violations of the quiz question schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The response contained no questions at all.
    #[error("response contained no questions")]
    Empty,

    /// A question has empty question text.
    #[error("question {index} has empty question text")]
    EmptyQuestion { index: usize },

    /// A question does not carry exactly four options.
    #[error("question {index} has {count} options, expected 4")]
    OptionCount { index: usize, count: usize },

    /// An option is missing its text or its explanation.
    #[error("question {index}, option {option} has empty text or explanation")]
    EmptyOption { index: usize, option: usize },

    /// The correct answer index does not point at an option.
    #[error("question {index} has out-of-range correct answer index {value}")]
    AnswerIndex { index: usize, value: usize },
}

/// Result type for the pdf-quiz library.
pub type Result<T> = std::result::Result<T, QuizError>;
