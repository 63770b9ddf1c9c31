//! Application driver: owns the quiz session, interprets key presses per
//! lifecycle phase, and runs the extraction/generation pipeline in a
//! background task.

use std::path::PathBuf;

use crossterm::event::KeyCode;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::extract;
use crate::generate::QuizGenerator;
use crate::models::{QuizQuestion, OPTION_COUNT};
use crate::session::{QuizSession, SessionPhase};

const NO_DOCUMENT_MESSAGE: &str = "No document selected. Enter the path to a PDF file.";
const UNREADABLE_MESSAGE: &str = "Could not read the document. It may be corrupt or not a PDF.";
const EMPTY_TEXT_MESSAGE: &str = "The document contains no readable text.";
const GENERATION_FAILED_MESSAGE: &str = "Failed to generate the quiz. The document might be too \
                                         complex or the content unsuitable. Please try a \
                                         different file.";

const READING_MESSAGE: &str = "Reading your document...";
const CRAFTING_MESSAGE: &str = "Crafting challenging questions...";

/// Progress and outcome messages sent back from the generation task.
#[derive(Debug)]
pub enum GenerationEvent {
    /// Progress description for the loading screen.
    Progress(&'static str),
    /// Generation succeeded; seed the session.
    Finished(Vec<QuizQuestion>),
    /// Generation failed; the message is shown to the user.
    Failed(String),
}

pub type EventSender = mpsc::UnboundedSender<GenerationEvent>;

/// Terminal application state around one quiz session.
pub struct App {
    pub session: QuizSession,
    generator: QuizGenerator,
    path_input: String,
    selected_option: usize,
    summary_scroll: usize,
    loading_message: &'static str,
    should_quit: bool,
}

impl App {
    pub fn new(generator: QuizGenerator, document: Option<PathBuf>) -> Self {
        Self {
            session: QuizSession::new(),
            generator,
            path_input: document
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            selected_option: 0,
            summary_scroll: 0,
            loading_message: READING_MESSAGE,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn path_input(&self) -> &str {
        &self.path_input
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn summary_scroll(&self) -> usize {
        self.summary_scroll
    }

    pub fn loading_message(&self) -> &str {
        self.loading_message
    }

    /// Apply an event reported by the generation task.
    pub fn apply(&mut self, event: GenerationEvent) {
        match event {
            GenerationEvent::Progress(message) => self.loading_message = message,
            GenerationEvent::Finished(questions) => {
                info!(count = questions.len(), "quiz generated");
                self.selected_option = 0;
                self.summary_scroll = 0;
                self.session.complete_generation(questions);
            }
            GenerationEvent::Failed(message) => self.session.fail_generation(message),
        }
    }

    /// Handle a key press for the current phase.
    pub fn handle_key(&mut self, key: KeyCode, events: &EventSender) {
        match self.session.phase() {
            SessionPhase::Idle => self.handle_idle_key(key, events),
            SessionPhase::Generating => {
                // The in-flight request runs to completion; only quitting
                // the process is allowed here.
                if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    self.should_quit = true;
                }
            }
            SessionPhase::InProgress => self.handle_quiz_key(key),
            SessionPhase::Completed => self.handle_summary_key(key),
        }
    }

    fn handle_idle_key(&mut self, key: KeyCode, events: &EventSender) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.path_input.is_empty() => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                self.session.clear_error();
                self.path_input.push(c);
            }
            KeyCode::Backspace => {
                self.session.clear_error();
                self.path_input.pop();
            }
            KeyCode::Enter => self.request_generation(events),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_option(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.session.select_answer(self.selected_option);
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.session.advance();
                self.selected_option = 0;
            }
            KeyCode::Left | KeyCode::Char('b') => {
                self.session.retreat();
                self.selected_option = 0;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.scroll_summary_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_summary_up(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.restart();
                self.path_input.clear();
                self.selected_option = 0;
                self.summary_scroll = 0;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn select_next_option(&mut self) {
        self.selected_option = (self.selected_option + 1) % OPTION_COUNT;
    }

    fn select_previous_option(&mut self) {
        self.selected_option = (self.selected_option + OPTION_COUNT - 1) % OPTION_COUNT;
    }

    fn scroll_summary_down(&mut self) {
        // Rough upper bound: each review block renders a handful of lines.
        let max_scroll = self.session.incorrect_review().len() * 6;
        self.summary_scroll = (self.summary_scroll + 1).min(max_scroll);
    }

    fn scroll_summary_up(&mut self) {
        self.summary_scroll = self.summary_scroll.saturating_sub(1);
    }

    /// Kick off extraction and generation for the entered document.
    fn request_generation(&mut self, events: &EventSender) {
        let path = self.path_input.trim();
        if path.is_empty() {
            self.session.reject(NO_DOCUMENT_MESSAGE);
            return;
        }
        if !self.session.begin_generation() {
            return;
        }

        self.loading_message = READING_MESSAGE;
        let path = PathBuf::from(path);
        let generator = self.generator.clone();
        let events = events.clone();
        tokio::spawn(async move {
            run_pipeline(path, generator, events).await;
        });
    }
}

/// Extraction, then generation, strictly in that order. Every failure is
/// reported as a [`GenerationEvent::Failed`] carrying a user-facing
/// message; the underlying error is logged with its full detail.
async fn run_pipeline(path: PathBuf, generator: QuizGenerator, events: EventSender) {
    let _ = events.send(GenerationEvent::Progress(READING_MESSAGE));

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read document");
            let _ = events.send(GenerationEvent::Failed(UNREADABLE_MESSAGE.to_string()));
            return;
        }
    };

    let extracted = tokio::task::spawn_blocking(move || extract::extract_text(&bytes)).await;
    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(err)) => {
            warn!(error = %err, "text extraction failed");
            let _ = events.send(GenerationEvent::Failed(UNREADABLE_MESSAGE.to_string()));
            return;
        }
        Err(err) => {
            warn!(error = %err, "extraction task panicked");
            let _ = events.send(GenerationEvent::Failed(UNREADABLE_MESSAGE.to_string()));
            return;
        }
    };

    generate_from_text(text, generator, events).await;
}

/// Generation half of the pipeline. Empty extracted text is a validation
/// failure and never reaches the model.
async fn generate_from_text(text: String, generator: QuizGenerator, events: EventSender) {
    if text.trim().is_empty() {
        let _ = events.send(GenerationEvent::Failed(EMPTY_TEXT_MESSAGE.to_string()));
        return;
    }

    let _ = events.send(GenerationEvent::Progress(CRAFTING_MESSAGE));

    match generator.generate(&text).await {
        Ok(questions) => {
            let _ = events.send(GenerationEvent::Finished(questions));
        }
        Err(err) => {
            warn!(error = %err, "quiz generation failed");
            let _ = events.send(GenerationEvent::Failed(GENERATION_FAILED_MESSAGE.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A generator pointed at an unroutable address: any request through it
    // fails, so a validation failure arriving instead proves the model was
    // never called.
    fn offline_generator() -> QuizGenerator {
        QuizGenerator::new("test-key".to_string()).with_base_url("http://127.0.0.1:1")
    }

    #[tokio::test]
    async fn empty_text_never_reaches_the_generator() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        generate_from_text("   \n  ".to_string(), offline_generator(), tx).await;

        match rx.recv().await {
            Some(GenerationEvent::Failed(message)) => {
                assert_eq!(message, EMPTY_TEXT_MESSAGE);
            }
            other => panic!("expected a validation failure, got {other:?}"),
        }
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn generator_failure_is_reported_generically() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        generate_from_text("some document text".to_string(), offline_generator(), tx).await;

        assert!(matches!(
            rx.recv().await,
            Some(GenerationEvent::Progress(_))
        ));
        match rx.recv().await {
            Some(GenerationEvent::Failed(message)) => {
                assert_eq!(message, GENERATION_FAILED_MESSAGE);
            }
            other => panic!("expected a generation failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_document_fails_without_generation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        run_pipeline(
            PathBuf::from("/definitely/not/a/real/file.pdf"),
            offline_generator(),
            tx,
        )
        .await;

        assert!(matches!(
            rx.recv().await,
            Some(GenerationEvent::Progress(_))
        ));
        match rx.recv().await {
            Some(GenerationEvent::Failed(message)) => {
                assert_eq!(message, UNREADABLE_MESSAGE);
            }
            other => panic!("expected an extraction failure, got {other:?}"),
        }
    }
}
