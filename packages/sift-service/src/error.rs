use sift_domain::grammar::GrammarError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Backend {backend} unavailable: {message}")]
	BackendUnavailable { backend: String, message: String },
	#[error("Grammar parse failure: {message}")]
	GrammarParse { message: String },
	#[error("Resolution failure: {message}")]
	Resolution { message: String },
	#[error("Backend {backend} error: {message}")]
	Backend { backend: String, message: String },
}
impl Error {
	pub fn from_provider(backend: &str, err: sift_providers::Error) -> Self {
		if err.is_unavailable() {
			Self::BackendUnavailable { backend: backend.to_string(), message: err.to_string() }
		} else {
			Self::Backend { backend: backend.to_string(), message: err.to_string() }
		}
	}
}

impl From<GrammarError> for Error {
	fn from(err: GrammarError) -> Self {
		Self::GrammarParse { message: err.to_string() }
	}
}
