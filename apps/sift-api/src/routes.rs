use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;

use sift_service::{Error, SearchRequest, SearchResponse};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error_code: &'static str,
	message: String,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error_code: &'static str,
	message: String,
}
impl ApiError {
	fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
		Self { status, error_code, message: message.into() }
	}
}

impl From<Error> for ApiError {
	fn from(err: Error) -> Self {
		let message = err.to_string();

		match err {
			Error::InvalidRequest { .. } =>
				Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message),
			Error::BackendUnavailable { .. } =>
				Self::new(StatusCode::BAD_GATEWAY, "BACKEND_UNAVAILABLE", message),
			// Grammar and resolution failures are degraded inside the service.
			Error::GrammarParse { .. } | Error::Resolution { .. } | Error::Backend { .. } =>
				Self::new(StatusCode::BAD_GATEWAY, "BACKEND_ERROR", message),
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		if self.status.is_server_error() {
			tracing::error!(error_code = self.error_code, message = %self.message, "Search failed.");
		}

		let body = ErrorBody { error_code: self.error_code, message: self.message };

		(self.status, Json(body)).into_response()
	}
}
