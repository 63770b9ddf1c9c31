use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pdf_quiz::{App, QuizGenerator, DEFAULT_MODEL};

const DEFAULT_PORT: u16 = 8712;

/// Generate and play multiple-choice quizzes from PDF documents
#[derive(Parser)]
#[command(name = "pdf-quiz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// PDF document to quiz yourself on
    file: Option<PathBuf>,

    /// Model used for question generation
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the quiz generation API service
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY environment variable is not set")?;
    let generator = QuizGenerator::new(api_key).with_model(cli.model);

    match cli.command {
        Some(Command::Serve { port }) => {
            pdf_quiz::serve(generator, port).await;
            Ok(())
        }
        None => {
            let app = App::new(generator, cli.file);
            pdf_quiz::run(app).await?;
            Ok(())
        }
    }
}
