use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub search: Search,
	pub backends: Backends,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Disables status search entirely when false.
	#[serde(default = "default_true")]
	pub full_text_enabled: bool,
	/// Lets allowed requesters search every status they can see, not only statuses
	/// explicitly marked searchable by them.
	#[serde(default)]
	pub search_all_content: bool,
	/// Identity ids allowed to use `search_all_content`. Empty means every requester.
	#[serde(default)]
	pub search_all_content_allowed_ids: Vec<String>,
	#[serde(default = "default_max_limit")]
	pub max_limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Backends {
	pub identity: ProviderConfig,
	pub full_text: FullTextConfig,
	pub tags: ProviderConfig,
	pub resolver: ProviderConfig,
	pub relationships: RelationshipsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: Option<String>,
	pub path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FullTextConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: Option<String>,
	/// Index name; requests go to `{api_base}/{index}/_search`.
	pub index: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipsConfig {
	pub provider_id: String,
	pub api_base: String,
	#[serde(default)]
	pub api_key: Option<String>,
	pub accounts_path: String,
	pub domains_path: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

impl Search {
	/// Whether `requester_id` may skip the searchable-by privacy filter.
	pub fn allows_all_content(&self, requester_id: &str) -> bool {
		if !self.search_all_content {
			return false;
		}

		self.search_all_content_allowed_ids.is_empty()
			|| self.search_all_content_allowed_ids.iter().any(|id| id == requester_id)
	}
}

impl Default for Search {
	fn default() -> Self {
		Self {
			full_text_enabled: true,
			search_all_content: false,
			search_all_content_allowed_ids: Vec::new(),
			max_limit: default_max_limit(),
		}
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_true() -> bool {
	true
}

fn default_max_limit() -> u32 {
	40
}
