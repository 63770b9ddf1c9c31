//! HTTP generation service.
//!
//! Exposes the generation client behind a single endpoint: `POST
//! /generate` with a JSON body `{ "text": string }` answers `200` with
//! the question array, `400` when the text field is missing or empty, and
//! `500` with a generic message on any internal failure.

use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::generate::QuizGenerator;

const INVALID_BODY_MESSAGE: &str = "Invalid request body. A non-empty \"text\" field is required.";
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred while generating the quiz.";

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the service routes.
pub fn routes(
    generator: Arc<QuizGenerator>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::post()
        .and(warp::path("generate"))
        .and(warp::path::end())
        .and(warp::body::json::<GenerateRequest>())
        .and(with_generator(generator))
        .and_then(handle_generate)
        .recover(handle_rejection)
}

fn with_generator(
    generator: Arc<QuizGenerator>,
) -> impl Filter<Extract = (Arc<QuizGenerator>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&generator))
}

async fn handle_generate(
    request: GenerateRequest,
    generator: Arc<QuizGenerator>,
) -> Result<impl Reply, Infallible> {
    if request.text.trim().is_empty() {
        return Ok(reply_error(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE));
    }

    match generator.generate(&request.text).await {
        Ok(questions) => {
            info!(count = questions.len(), "generated quiz");
            Ok(warp::reply::with_status(
                warp::reply::json(&questions),
                StatusCode::OK,
            ))
        }
        Err(err) => {
            // Internal detail stays in the log; the client gets a generic
            // message.
            error!(error = %err, "quiz generation failed");
            Ok(reply_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE,
            ))
        }
    }
}

fn reply_error(status: StatusCode, message: &str) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorBody {
            error: message.to_string(),
        }),
        status,
    )
}

async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Rejection> {
    if rejection
        .find::<warp::filters::body::BodyDeserializeError>()
        .is_some()
    {
        return Ok(reply_error(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE));
    }
    if rejection.is_not_found() {
        return Ok(reply_error(StatusCode::NOT_FOUND, "Not found."));
    }
    Err(rejection)
}

/// Run the generation service until the process is stopped.
pub async fn serve(generator: QuizGenerator, port: u16) {
    info!(port, "starting quiz generation service");
    warp::serve(routes(Arc::new(generator)))
        .run(([0, 0, 0, 0], port))
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_generator() -> Arc<QuizGenerator> {
        Arc::new(QuizGenerator::new("test-key".to_string()))
    }

    #[tokio::test]
    async fn empty_text_is_rejected_with_400() {
        let response = warp::test::request()
            .method("POST")
            .path("/generate")
            .json(&serde_json::json!({ "text": "   " }))
            .reply(&routes(test_generator()))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert!(body["error"].as_str().unwrap().contains("text"));
    }

    #[tokio::test]
    async fn missing_text_field_is_rejected_with_400() {
        let response = warp::test::request()
            .method("POST")
            .path("/generate")
            .json(&serde_json::json!({}))
            .reply(&routes(test_generator()))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_body_is_rejected_with_400() {
        let response = warp::test::request()
            .method("POST")
            .path("/generate")
            .header("content-type", "application/json")
            .body("not json at all")
            .reply(&routes(test_generator()))
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_path_is_rejected() {
        let response = warp::test::request()
            .method("POST")
            .path("/other")
            .json(&serde_json::json!({ "text": "hello" }))
            .reply(&routes(test_generator()))
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
