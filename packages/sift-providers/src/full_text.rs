use serde_json::Value;

use sift_config::FullTextConfig;
use sift_domain::{BackendQuery, Status};

pub async fn search(
	cfg: &FullTextConfig,
	query: &BackendQuery,
) -> crate::Result<Vec<Option<Status>>> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}/{}/_search", cfg.api_base.trim_end_matches('/'), cfg.index);
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&query.to_search_body())
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_hits(json)
}

/// Keeps hit order. A hit whose `_source` is absent or no longer decodes becomes `None`.
fn parse_hits(json: Value) -> crate::Result<Vec<Option<Status>>> {
	let hits = json
		.get("hits")
		.and_then(|hits| hits.get("hits"))
		.and_then(Value::as_array)
		.ok_or_else(|| crate::Error::InvalidResponse {
			message: "Search response is missing hits.hits array.".to_string(),
		})?;

	Ok(hits
		.iter()
		.map(|hit| {
			hit.get("_source")
				.filter(|source| !source.is_null())
				.and_then(|source| serde_json::from_value(source.clone()).ok())
		})
		.collect())
}
