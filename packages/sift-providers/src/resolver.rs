use reqwest::StatusCode;
use serde_json::Value;

use sift_config::ProviderConfig;
use sift_domain::{Identity, ResolvedEntity};

pub async fn resolve(
	cfg: &ProviderConfig,
	query: &str,
	on_behalf_of: Option<&Identity>,
) -> crate::Result<Option<ResolvedEntity>> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"url": query,
		"on_behalf_of": on_behalf_of.map(|identity| identity.id.as_str()),
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;

	if res.status() == StatusCode::NOT_FOUND {
		return Ok(None);
	}

	let json: Value = res.error_for_status()?.json().await?;

	parse_resolved(json)
}

fn parse_resolved(json: Value) -> crate::Result<Option<ResolvedEntity>> {
	if json.is_null() {
		return Ok(None);
	}

	Ok(Some(serde_json::from_value(json)?))
}
