use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entity::Status;

/// Requester-relative relation maps keyed by author id. Missing keys read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRelations {
	#[serde(default)]
	pub blocking: HashMap<String, bool>,
	#[serde(default)]
	pub blocked_by: HashMap<String, bool>,
	#[serde(default)]
	pub muting: HashMap<String, bool>,
	#[serde(default)]
	pub following: HashMap<String, bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipSnapshot {
	pub accounts: AccountRelations,
	pub domain_blocking: HashMap<String, bool>,
}
impl RelationshipSnapshot {
	pub fn new(accounts: AccountRelations, domain_blocking: HashMap<String, bool>) -> Self {
		Self { accounts, domain_blocking }
	}

	pub fn blocking(&self, account_id: &str) -> bool {
		flag(&self.accounts.blocking, account_id)
	}

	pub fn blocked_by(&self, account_id: &str) -> bool {
		flag(&self.accounts.blocked_by, account_id)
	}

	pub fn muting(&self, account_id: &str) -> bool {
		flag(&self.accounts.muting, account_id)
	}

	pub fn following(&self, account_id: &str) -> bool {
		flag(&self.accounts.following, account_id)
	}

	pub fn domain_blocking(&self, domain: &str) -> bool {
		flag(&self.domain_blocking, domain)
	}
}

/// Distinct author ids and remote domains, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotKeys {
	pub account_ids: Vec<String>,
	pub domains: Vec<String>,
}

pub fn snapshot_keys(statuses: &[Status]) -> SnapshotKeys {
	let mut seen_ids = HashSet::new();
	let mut seen_domains = HashSet::new();
	let mut keys = SnapshotKeys::default();

	for status in statuses {
		let author = &status.author;

		if seen_ids.insert(author.id.as_str()) {
			keys.account_ids.push(author.id.clone());
		}
		if let Some(domain) = author.domain.as_deref()
			&& seen_domains.insert(domain)
		{
			keys.domains.push(domain.to_string());
		}
	}

	keys
}

fn flag(map: &HashMap<String, bool>, key: &str) -> bool {
	map.get(key).copied().unwrap_or(false)
}
