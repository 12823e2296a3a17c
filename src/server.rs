use crate::dispatcher::Dispatcher;
use crate::error::GenerateError;
use crate::model::RegistrySnapshot;
use crate::protocol::ErrorBody;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde_json::Value;
use tokio::net::TcpListener;

/// Build the HTTP routes around a dispatcher.
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/api/ai-generate", post(generate).options(preflight))
        .route("/api/ai-providers", get(providers).options(preflight))
        .route("/health", get(health))
        .layer(middleware::map_response(with_cors))
        .with_state(dispatcher)
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(addr: &str, dispatcher: Dispatcher) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(dispatcher)).await
}

/// Open CORS: the UI may be served from any origin.
async fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn health() -> &'static str {
    "ok"
}

async fn providers(State(dispatcher): State<Dispatcher>) -> Json<RegistrySnapshot> {
    Json(dispatcher.registry().list_configured())
}

/// `word` and optional `provider` pulled from a generate request body.
#[derive(Debug, PartialEq, Eq)]
struct GenerateRequest {
    word: String,
    provider: Option<String>,
}

impl GenerateRequest {
    /// A non-string `provider` is treated as absent.
    fn parse(body: &[u8]) -> Result<Self, GenerateError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| GenerateError::InvalidInput)?;
        let word = value
            .get("word")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .ok_or(GenerateError::InvalidInput)?;
        let provider = value
            .get("provider")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(GenerateRequest {
            word: word.to_string(),
            provider,
        })
    }
}

async fn generate(State(dispatcher): State<Dispatcher>, body: Bytes) -> Response {
    let request = match GenerateRequest::parse(&body) {
        Ok(request) => request,
        Err(e) => return error_response(&e, &dispatcher),
    };

    match dispatcher
        .dispatch(&request.word, request.provider.as_deref())
        .await
    {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(&e, &dispatcher),
    }
}

fn error_response(err: &GenerateError, dispatcher: &Dispatcher) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("generation failed: {}", err);
    }
    (status, Json(ErrorBody::from_error(err, dispatcher.registry()))).into_response()
}
