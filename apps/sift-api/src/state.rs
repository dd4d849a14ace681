use std::sync::Arc;

use sift_service::SearchService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SearchService>,
}
impl AppState {
	pub fn new(config: &sift_config::Config) -> Self {
		Self::from_service(SearchService::new(config))
	}

	pub fn from_service(service: SearchService) -> Self {
		Self { service: Arc::new(service) }
	}
}
