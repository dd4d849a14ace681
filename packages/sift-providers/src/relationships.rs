use std::collections::HashMap;

use serde_json::Value;

use sift_config::RelationshipsConfig;
use sift_domain::AccountRelations;

pub async fn account_relations(
	cfg: &RelationshipsConfig,
	account_ids: &[String],
	requester_id: &str,
) -> crate::Result<AccountRelations> {
	let body = serde_json::json!({ "account_ids": account_ids, "requester_id": requester_id });
	let json = post(cfg, &cfg.accounts_path, &body).await?;

	Ok(serde_json::from_value(json)?)
}

pub async fn domain_blocks(
	cfg: &RelationshipsConfig,
	domains: &[String],
	requester_id: &str,
) -> crate::Result<HashMap<String, bool>> {
	let body = serde_json::json!({ "domains": domains, "requester_id": requester_id });
	let json = post(cfg, &cfg.domains_path, &body).await?;

	parse_domain_blocks(json)
}

async fn post(cfg: &RelationshipsConfig, path: &str, body: &Value) -> crate::Result<Value> {
	let client = crate::client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, path);
	let res = client
		.post(url)
		.headers(crate::auth_headers(cfg.api_key.as_deref(), &cfg.default_headers)?)
		.json(body)
		.send()
		.await?;

	Ok(res.error_for_status()?.json().await?)
}

fn parse_domain_blocks(json: Value) -> crate::Result<HashMap<String, bool>> {
	let map = json.get("domain_blocking").cloned().unwrap_or(json);

	Ok(serde_json::from_value(map)?)
}
