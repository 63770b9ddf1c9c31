use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// One answer option with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub explanation: String,
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// The question text.
    #[serde(rename = "question")]
    pub text: String,
    /// Exactly four answer options.
    pub options: Vec<QuizOption>,
    /// 0-based index of the correct option.
    #[serde(rename = "correctAnswerIndex")]
    pub correct_answer_index: usize,
}

/// Validate a generated question sequence against the quiz contract:
/// non-empty question text, exactly four options each with non-empty text
/// and explanation, and an in-range correct answer index. An empty
/// sequence is also rejected.
pub fn validate_questions(questions: &[QuizQuestion]) -> Result<(), SchemaError> {
    if questions.is_empty() {
        return Err(SchemaError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        if question.text.trim().is_empty() {
            return Err(SchemaError::EmptyQuestion { index });
        }
        if question.options.len() != OPTION_COUNT {
            return Err(SchemaError::OptionCount {
                index,
                count: question.options.len(),
            });
        }
        for (option, choice) in question.options.iter().enumerate() {
            if choice.text.trim().is_empty() || choice.explanation.trim().is_empty() {
                return Err(SchemaError::EmptyOption { index, option });
            }
        }
        if question.correct_answer_index >= OPTION_COUNT {
            return Err(SchemaError::AnswerIndex {
                index,
                value: question.correct_answer_index,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str) -> QuizOption {
        QuizOption {
            text: format!("option {label}"),
            explanation: format!("why {label}"),
        }
    }

    fn question(correct: usize) -> QuizQuestion {
        QuizQuestion {
            text: "Which one?".to_string(),
            options: vec![option("a"), option("b"), option("c"), option("d")],
            correct_answer_index: correct,
        }
    }

    #[test]
    fn valid_questions_pass() {
        assert!(validate_questions(&[question(0), question(3)]).is_ok());
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert_eq!(validate_questions(&[]), Err(SchemaError::Empty));
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        let mut q = question(0);
        q.options.pop();
        assert_eq!(
            validate_questions(&[question(0), q]),
            Err(SchemaError::OptionCount { index: 1, count: 3 })
        );
    }

    #[test]
    fn blank_question_text_is_rejected() {
        let mut q = question(0);
        q.text = "   ".to_string();
        assert_eq!(
            validate_questions(&[q]),
            Err(SchemaError::EmptyQuestion { index: 0 })
        );
    }

    #[test]
    fn blank_explanation_is_rejected() {
        let mut q = question(0);
        q.options[2].explanation.clear();
        assert_eq!(
            validate_questions(&[q]),
            Err(SchemaError::EmptyOption { index: 0, option: 2 })
        );
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        assert_eq!(
            validate_questions(&[question(4)]),
            Err(SchemaError::AnswerIndex { index: 0, value: 4 })
        );
    }

    #[test]
    fn question_uses_wire_field_names() {
        let json = r#"{
            "question": "Which one?",
            "options": [
                {"text": "a", "explanation": "ea"},
                {"text": "b", "explanation": "eb"},
                {"text": "c", "explanation": "ec"},
                {"text": "d", "explanation": "ed"}
            ],
            "correctAnswerIndex": 2
        }"#;

        let parsed: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text, "Which one?");
        assert_eq!(parsed.correct_answer_index, 2);

        let back = serde_json::to_string(&parsed).unwrap();
        assert!(back.contains("\"question\""));
        assert!(back.contains("\"correctAnswerIndex\""));
    }
}
