use crate::{
	entity::{Audience, Identity, Status},
	relationship::RelationshipSnapshot,
};

/// Default read policy for a status surfaced by search.
pub fn status_visible(
	status: &Status,
	requester: &Identity,
	snapshot: &RelationshipSnapshot,
) -> bool {
	let author_id = status.author.id.as_str();

	if author_id == requester.id {
		return true;
	}
	if snapshot.blocking(author_id) || snapshot.blocked_by(author_id) || snapshot.muting(author_id)
	{
		return false;
	}

	let following = snapshot.following(author_id);

	if let Some(domain) = status.author.domain.as_deref()
		&& snapshot.domain_blocking(domain)
		&& !following
	{
		return false;
	}

	let mentioned = status.mentioned_ids.iter().any(|id| id == &requester.id);

	match status.audience {
		Audience::Public | Audience::Unlisted => true,
		Audience::Private => following || mentioned,
		Audience::Direct => mentioned,
	}
}
