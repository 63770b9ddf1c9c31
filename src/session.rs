//! Quiz session state machine.
//!
//! One session covers a single quiz attempt from generation through
//! completion. The presentation layer owns the session and drives it with
//! the transition methods below; score and review are derived read-only
//! views over the recorded answers.

use crate::models::{QuizQuestion, OPTION_COUNT};

/// Lifecycle phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No active quiz; waiting for a document.
    Idle,
    /// Extraction and generation are in flight.
    Generating,
    /// Questions loaded, user answering.
    InProgress,
    /// All questions visited; summary available.
    Completed,
}

/// Final score of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    /// Rounded percentage of correct answers.
    pub percent: u32,
}

/// One entry of the incorrect-answer review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewEntry {
    /// Index into the session's question list.
    pub index: usize,
    /// The recorded answer, or `None` if the question was left unanswered.
    pub selected: Option<usize>,
}

/// In-memory state of one quiz attempt.
pub struct QuizSession {
    phase: SessionPhase,
    questions: Vec<QuizQuestion>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    error: Option<String>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            error: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Question currently shown, if any.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_index)
    }

    /// Recorded answer for the current question.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current_index).copied().flatten()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// 1-based number of the current question for display.
    pub fn question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    /// Record a validation failure without leaving `Idle`, e.g. when no
    /// document has been selected.
    pub fn reject(&mut self, message: impl Into<String>) {
        if self.phase == SessionPhase::Idle {
            self.error = Some(message.into());
        }
    }

    /// Clear a previously recorded error message.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Move from `Idle` to `Generating`. Returns false from any other
    /// phase; a request already in flight runs to completion before the
    /// session accepts another one.
    pub fn begin_generation(&mut self) -> bool {
        if self.phase != SessionPhase::Idle {
            return false;
        }
        self.error = None;
        self.phase = SessionPhase::Generating;
        true
    }

    /// Seed the session with generated questions and start the quiz.
    /// Seeding happens exactly once per generation cycle.
    pub fn complete_generation(&mut self, questions: Vec<QuizQuestion>) {
        if self.phase != SessionPhase::Generating {
            return;
        }
        self.answers = vec![None; questions.len()];
        self.questions = questions;
        self.current_index = 0;
        self.error = None;
        self.phase = SessionPhase::InProgress;
    }

    /// Abort the generation cycle and return to `Idle` with a message.
    /// No partial quiz state survives a failed generation.
    pub fn fail_generation(&mut self, message: impl Into<String>) {
        if self.phase != SessionPhase::Generating {
            return;
        }
        self.questions.clear();
        self.answers.clear();
        self.current_index = 0;
        self.error = Some(message.into());
        self.phase = SessionPhase::Idle;
    }

    /// Record the answer for the current question. The first recorded
    /// answer is permanent for the attempt; later calls are no-ops.
    pub fn select_answer(&mut self, option_index: usize) {
        if self.phase != SessionPhase::InProgress || option_index >= OPTION_COUNT {
            return;
        }
        if let Some(slot) = self.answers.get_mut(self.current_index) {
            if slot.is_none() {
                *slot = Some(option_index);
            }
        }
    }

    /// Move to the next question, or complete the quiz from the last one.
    /// The current question does not have to be answered; skipped
    /// questions count as incorrect at scoring time.
    pub fn advance(&mut self) {
        if self.phase != SessionPhase::InProgress {
            return;
        }
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.phase = SessionPhase::Completed;
        }
    }

    /// Move back one question. No-op on the first question. Recorded
    /// answers stay visible and stay permanent.
    pub fn retreat(&mut self) {
        if self.phase == SessionPhase::InProgress && self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Discard questions, answers, position and error, back to `Idle`.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    /// Score of the attempt. Unanswered questions never match a correct
    /// index, so they count as incorrect.
    pub fn score(&self) -> Score {
        let total = self.questions.len();
        let correct = self
            .answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| **answer == Some(question.correct_answer_index))
            .count();
        let percent = if total > 0 {
            (correct as f64 / total as f64 * 100.0).round() as u32
        } else {
            0
        };

        Score {
            correct,
            total,
            percent,
        }
    }

    /// Every question answered incorrectly or not at all, in original
    /// order, paired with the recorded answer. The matching question (and
    /// with it the correct option) is found through [`Self::questions`].
    pub fn incorrect_review(&self) -> Vec<ReviewEntry> {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .enumerate()
            .filter(|(_, (answer, question))| **answer != Some(question.correct_answer_index))
            .map(|(index, (answer, _))| ReviewEntry {
                index,
                selected: *answer,
            })
            .collect()
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::QuizOption;

    fn question(correct: usize) -> QuizQuestion {
        let options = (0..OPTION_COUNT)
            .map(|i| QuizOption {
                text: format!("option {i}"),
                explanation: format!("explanation {i}"),
            })
            .collect();

        QuizQuestion {
            text: format!("Question with answer {correct}?"),
            options,
            correct_answer_index: correct,
        }
    }

    fn seeded(corrects: &[usize]) -> QuizSession {
        let mut session = QuizSession::new();
        assert!(session.begin_generation());
        session.complete_generation(corrects.iter().map(|&c| question(c)).collect());
        session
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn seeding_initializes_answers_to_question_count() {
        let session = seeded(&[0, 1, 2]);
        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.answers().len(), session.questions().len());
        assert!(session.answers().iter().all(Option::is_none));
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn begin_generation_only_from_idle() {
        let mut session = QuizSession::new();
        assert!(session.begin_generation());
        assert!(!session.begin_generation());

        let mut session = seeded(&[0]);
        assert!(!session.begin_generation());
        assert_eq!(session.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn begin_generation_clears_previous_error() {
        let mut session = QuizSession::new();
        session.reject("no document selected");
        assert_eq!(session.error(), Some("no document selected"));

        assert!(session.begin_generation());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn failed_generation_returns_to_idle_without_partial_state() {
        let mut session = QuizSession::new();
        assert!(session.begin_generation());
        session.fail_generation("model API unavailable");

        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.error(), Some("model API unavailable"));
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn completion_is_ignored_unless_generating() {
        let mut session = QuizSession::new();
        session.complete_generation(vec![question(0)]);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.questions().is_empty());
    }

    #[test]
    fn first_answer_is_permanent() {
        let mut session = seeded(&[0, 1]);
        session.select_answer(2);
        assert_eq!(session.current_answer(), Some(2));

        session.select_answer(3);
        assert_eq!(session.current_answer(), Some(2));
    }

    #[test]
    fn out_of_range_answer_is_ignored() {
        let mut session = seeded(&[0]);
        session.select_answer(OPTION_COUNT);
        assert_eq!(session.current_answer(), None);
    }

    #[test]
    fn answers_are_ignored_outside_in_progress() {
        let mut session = QuizSession::new();
        session.select_answer(0);
        assert!(session.answers().is_empty());

        let mut session = seeded(&[0]);
        session.advance();
        assert_eq!(session.phase(), SessionPhase::Completed);
        session.select_answer(0);
        assert_eq!(session.answers(), &[None]);
    }

    #[test]
    fn advance_moves_forward_without_requiring_an_answer() {
        let mut session = seeded(&[0, 1, 2]);
        session.advance();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn advance_from_last_question_completes() {
        let mut session = seeded(&[0, 1]);
        session.advance();
        assert_eq!(session.current_index(), 1);

        session.advance();
        assert_eq!(session.phase(), SessionPhase::Completed);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn retreat_at_first_question_is_a_noop() {
        let mut session = seeded(&[0, 1]);
        session.retreat();
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn retreat_keeps_the_recorded_answer_visible_and_permanent() {
        let mut session = seeded(&[0, 1]);
        session.select_answer(3);
        session.advance();
        session.retreat();

        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_answer(), Some(3));

        session.select_answer(0);
        assert_eq!(session.current_answer(), Some(3));
    }

    #[test]
    fn restart_resets_everything_from_any_phase() {
        let mut session = seeded(&[0, 1]);
        session.select_answer(1);
        session.advance();
        session.advance();
        assert_eq!(session.phase(), SessionPhase::Completed);

        session.restart();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.questions().is_empty());
        assert!(session.answers().is_empty());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.error(), None);

        let mut session = QuizSession::new();
        session.reject("no document selected");
        session.restart();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn score_of_fully_unanswered_session_is_zero() {
        let mut session = seeded(&[0, 1, 2, 3]);
        while session.phase() == SessionPhase::InProgress {
            session.advance();
        }

        let score = session.score();
        assert_eq!(score.correct, 0);
        assert_eq!(score.total, 4);
        assert_eq!(score.percent, 0);
    }

    #[test]
    fn score_of_fully_correct_session_is_one_hundred() {
        let mut session = seeded(&[0, 1, 2]);
        for answer in [0, 1, 2] {
            session.select_answer(answer);
            session.advance();
        }

        assert_eq!(session.phase(), SessionPhase::Completed);
        let score = session.score();
        assert_eq!(score.correct, 3);
        assert_eq!(score.total, 3);
        assert_eq!(score.percent, 100);
    }

    #[test]
    fn mixed_attempt_scores_and_reviews_correctly() {
        // Answer the first correctly, the second incorrectly, skip the
        // third entirely.
        let mut session = seeded(&[0, 1, 2]);
        session.select_answer(0);
        session.advance();
        session.select_answer(3);
        session.advance();
        session.advance();

        assert_eq!(session.phase(), SessionPhase::Completed);

        let score = session.score();
        assert_eq!(score.correct, 1);
        assert_eq!(score.total, 3);
        assert_eq!(score.percent, 33);

        let review = session.incorrect_review();
        assert_eq!(
            review,
            vec![
                ReviewEntry {
                    index: 1,
                    selected: Some(3),
                },
                ReviewEntry {
                    index: 2,
                    selected: None,
                },
            ]
        );
    }

    #[test]
    fn reject_records_error_and_stays_idle() {
        let mut session = QuizSession::new();
        session.reject("no document selected");
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.error(), Some("no document selected"));

        session.clear_error();
        assert_eq!(session.error(), None);
    }
}
