mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Backends, Config, FullTextConfig, ProviderConfig, RelationshipsConfig, Search, Service,
};

use std::{collections::HashSet, fs, path::Path};

use serde_json::{Map, Value};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::validation("service.http_bind", "must be non-empty."));
	}
	if cfg.search.max_limit == 0 {
		return Err(Error::validation("search.max_limit", "must be greater than zero."));
	}
	if cfg.search.search_all_content_allowed_ids.iter().any(|id| id.is_empty()) {
		return Err(Error::validation(
			"search.search_all_content_allowed_ids",
			"must not contain empty ids.",
		));
	}

	let backends = &cfg.backends;

	for (label, api_base, timeout_ms, headers) in [
		(
			"backends.identity",
			&backends.identity.api_base,
			backends.identity.timeout_ms,
			&backends.identity.default_headers,
		),
		(
			"backends.full_text",
			&backends.full_text.api_base,
			backends.full_text.timeout_ms,
			&backends.full_text.default_headers,
		),
		(
			"backends.tags",
			&backends.tags.api_base,
			backends.tags.timeout_ms,
			&backends.tags.default_headers,
		),
		(
			"backends.resolver",
			&backends.resolver.api_base,
			backends.resolver.timeout_ms,
			&backends.resolver.default_headers,
		),
		(
			"backends.relationships",
			&backends.relationships.api_base,
			backends.relationships.timeout_ms,
			&backends.relationships.default_headers,
		),
	] {
		if api_base.trim().is_empty() {
			return Err(Error::validation(format!("{label}.api_base"), "must be non-empty."));
		}
		if timeout_ms == 0 {
			return Err(Error::validation(
				format!("{label}.timeout_ms"),
				"must be greater than zero.",
			));
		}

		validate_headers(label, headers)?;
	}

	if backends.full_text.index.trim().is_empty() {
		return Err(Error::validation("backends.full_text.index", "must be non-empty."));
	}

	Ok(())
}

fn validate_headers(label: &str, headers: &Map<String, Value>) -> Result<()> {
	if headers.values().any(|value| !value.is_string()) {
		return Err(Error::validation(
			format!("{label}.default_headers"),
			"values must be strings.",
		));
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let backends = &mut cfg.backends;

	for key in [
		&mut backends.identity.api_key,
		&mut backends.full_text.api_key,
		&mut backends.tags.api_key,
		&mut backends.resolver.api_key,
		&mut backends.relationships.api_key,
	] {
		if key.as_deref().map(|value| value.trim().is_empty()).unwrap_or(false) {
			*key = None;
		}
	}

	let mut seen = HashSet::new();

	cfg.search.search_all_content_allowed_ids = cfg
		.search
		.search_all_content_allowed_ids
		.iter()
		.map(|id| id.trim().to_string())
		.filter(|id| seen.insert(id.clone()))
		.collect();
}
