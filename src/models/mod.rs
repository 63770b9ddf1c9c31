mod question;

pub use question::{QuizOption, QuizQuestion, validate_questions, OPTION_COUNT};
