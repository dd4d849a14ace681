use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One of the three result categories a search can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCategory {
	Accounts,
	Statuses,
	Hashtags,
}
impl SearchCategory {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Accounts => "accounts",
			Self::Statuses => "statuses",
			Self::Hashtags => "hashtags",
		}
	}

	/// Whether a request restricted to `type_filter` may dispatch this category.
	pub fn allowed_by(self, type_filter: Option<Self>) -> bool {
		type_filter.map(|filter| filter == self).unwrap_or(true)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub id: String,
	pub username: String,
	/// `None` for local identities.
	#[serde(default)]
	pub domain: Option<String>,
	#[serde(default)]
	pub display_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
	#[default]
	Public,
	Unlisted,
	Private,
	Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
	pub id: String,
	pub author: Identity,
	pub text: String,
	#[serde(default)]
	pub audience: Audience,
	#[serde(default)]
	pub mentioned_ids: Vec<String>,
	#[serde(with = "time::serde::rfc3339")]
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	pub name: String,
	#[serde(default)]
	pub reviewed: bool,
}

/// What a remote resource URL resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ResolvedEntity {
	Account(Identity),
	Status(Status),
	Hashtag(Tag),
}
impl ResolvedEntity {
	pub fn category(&self) -> SearchCategory {
		match self {
			Self::Account(_) => SearchCategory::Accounts,
			Self::Status(_) => SearchCategory::Statuses,
			Self::Hashtag(_) => SearchCategory::Hashtags,
		}
	}
}
