use std::collections::HashMap;

use sift_domain::{Identity, RelationshipSnapshot, Status, relationship};

use crate::{RelationshipLookup, Result, VisibilityPolicy};

/// Drops backend placeholders, then every status `policy` hides from `requester`.
///
/// One snapshot covers the whole page; the policy never triggers a per-status lookup.
pub(crate) async fn filter_statuses(
	lookup: &dyn RelationshipLookup,
	policy: &dyn VisibilityPolicy,
	raw: Vec<Option<Status>>,
	requester: &Identity,
) -> Result<Vec<Status>> {
	let statuses: Vec<Status> = raw.into_iter().flatten().collect();

	if statuses.is_empty() {
		return Ok(statuses);
	}

	let keys = relationship::snapshot_keys(&statuses);
	let domains = async {
		if keys.domains.is_empty() {
			return Ok(HashMap::new());
		}

		lookup.domain_blocks(&keys.domains, &requester.id).await
	};
	let (accounts, domain_blocking) =
		tokio::try_join!(lookup.account_relations(&keys.account_ids, &requester.id), domains)?;
	let snapshot = RelationshipSnapshot::new(accounts, domain_blocking);
	let before = statuses.len();
	let visible: Vec<Status> = statuses
		.into_iter()
		.filter(|status| policy.visible(status, requester, &snapshot))
		.collect();

	tracing::debug!(
		candidates = before,
		authors = keys.account_ids.len(),
		domains = keys.domains.len(),
		hidden = before - visible.len(),
		"Applied status visibility filter."
	);

	Ok(visible)
}
