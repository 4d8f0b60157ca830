use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::chat::TutorService;
use crate::config::AppConfig;
use crate::models::{AskRequest, AskResponse, HealthResponse};

const NO_QUESTION_MESSAGE: &str = "No question provided";
const ANSWER_ERROR_MESSAGE: &str = "Error generating answer.";

#[derive(Clone)]
struct AppState {
    chat: TutorService,
}

pub async fn run_server(config: AppConfig, chat_service: TutorService) -> Result<()> {
    let app = router(chat_service);

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.bind_addr))?;
    tracing::info!("textbook tutor listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn router(chat_service: TutorService) -> Router {
    let state = AppState { chat: chat_service };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ask_handler(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(rejection_error)?;
    let question = match request.question {
        Some(question) if !question.is_empty() => question,
        _ => return Err(ApiError::bad_request(NO_QUESTION_MESSAGE)),
    };

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ask", %request_id);

    let answer = state
        .chat
        .answer(&question)
        .instrument(span)
        .await
        .map_err(|err| {
            tracing::error!(%request_id, "failed to answer question: {err:#}");
            ApiError::internal(ANSWER_ERROR_MESSAGE)
        })?;

    Ok(Json(AskResponse {
        answer: answer.answer,
    }))
}

/// A body without a JSON content type, or one that does not parse, counts as
/// no question. Well-formed JSON of the wrong shape is a server-side failure.
fn rejection_error(rejection: JsonRejection) -> ApiError {
    tracing::warn!(
        status = %rejection.status(),
        "rejected /ask body: {}",
        rejection.body_text()
    );
    match rejection {
        JsonRejection::JsonDataError(_) => ApiError::internal(ANSWER_ERROR_MESSAGE),
        _ => ApiError::bad_request(NO_QUESTION_MESSAGE),
    }
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let corpus = state.chat.retriever().corpus();
    Json(HealthResponse {
        status: "ok".to_string(),
        lines: corpus.line_count(),
        source_hash: corpus.source_hash().to_string(),
    })
}

/// Error responses keep the `{"answer": ...}` shape clients already read.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = AskResponse {
            answer: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
