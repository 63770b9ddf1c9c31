//! # pdf-quiz
//!
//! Turn a PDF document into an interactive multiple-choice quiz.
//!
//! The pipeline extracts the document's text, asks a generative model for
//! a structured quiz, and runs the quiz in the terminal with a scored
//! summary at the end. The same generation client can also be served over
//! HTTP with [`serve`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pdf_quiz::{App, QuizGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pdf_quiz::QuizError> {
//!     let generator = QuizGenerator::new("api-key".to_string());
//!     let app = App::new(generator, None);
//!     pdf_quiz::run(app).await
//! }
//! ```

mod app;
mod error;
mod extract;
mod generate;
mod models;
mod server;
mod session;
pub mod terminal;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

pub use app::{App, EventSender, GenerationEvent};
pub use error::{ExtractError, GenerateError, QuizError, Result, SchemaError};
pub use extract::extract_text;
pub use generate::{QuizGenerator, DEFAULT_MODEL};
pub use models::{validate_questions, QuizOption, QuizQuestion, OPTION_COUNT};
pub use server::serve;
pub use session::{QuizSession, ReviewEntry, Score, SessionPhase};

/// How long the event loop waits for input before checking on the
/// generation task.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the quiz application in the terminal.
///
/// This takes over the terminal, renders the session lifecycle, and
/// returns when the user quits.
pub async fn run(mut app: App) -> Result<()> {
    let mut terminal = terminal::init()?;
    let result = event_loop(&mut terminal, &mut app).await;
    terminal::restore()?;
    result
}

async fn event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<GenerationEvent>();

    loop {
        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                app.handle_key(key.code, &tx);
            }
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
