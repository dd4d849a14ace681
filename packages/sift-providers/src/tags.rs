use serde_json::Value;

use sift_config::ProviderConfig;
use sift_domain::Tag;

pub async fn search(
	cfg: &ProviderConfig,
	query: &str,
	limit: u32,
	offset: u32,
	exclude_unreviewed: bool,
) -> crate::Result<Vec<Tag>> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"query": query,
		"limit": limit,
		"offset": offset,
		"exclude_unreviewed": exclude_unreviewed,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	crate::parse_list(json, "hashtags")
}
