pub mod full_text;
pub mod identity;
pub mod relationships;
pub mod resolver;
pub mod tags;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub fn auth_headers(
	api_key: Option<&str>,
	default_headers: &Map<String, Value>,
) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(api_key) = api_key {
		headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	}

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidConfig {
				message: "Default header values must be strings.".to_string(),
			});
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}

/// Reads a list either from the top-level array or from `json[key]`.
pub(crate) fn parse_list<T>(json: Value, key: &str) -> Result<Vec<T>>
where
	T: DeserializeOwned,
{
	let items = match json {
		Value::Array(items) => items,
		Value::Object(mut map) => match map.remove(key) {
			Some(Value::Array(items)) => items,
			_ =>
				return Err(Error::InvalidResponse {
					message: format!("Response is missing {key} array."),
				}),
		},
		_ =>
			return Err(Error::InvalidResponse {
				message: "Response must be an array or an object.".to_string(),
			}),
	};

	items.into_iter().map(|item| serde_json::from_value(item).map_err(Error::from)).collect()
}
