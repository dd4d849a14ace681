use serde_json::Value;

use sift_config::ProviderConfig;
use sift_domain::Identity;

pub async fn search(
	cfg: &ProviderConfig,
	query: &str,
	requester: Option<&Identity>,
	limit: u32,
	resolve: bool,
	offset: u32,
) -> crate::Result<Vec<Identity>> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"query": query,
		"requester_id": requester.map(|identity| identity.id.as_str()),
		"limit": limit,
		"offset": offset,
		"resolve": resolve,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	crate::parse_list(json, "accounts")
}
