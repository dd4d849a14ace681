use crate::entity::SearchCategory;

pub const HASHTAG_SIGIL: char = '#';
pub const MENTION_SIGIL: char = '@';

/// Which categories a request may dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Eligibility {
	pub accounts: bool,
	pub statuses: bool,
	pub hashtags: bool,
}
impl Eligibility {
	pub fn any(&self) -> bool {
		self.accounts || self.statuses || self.hashtags
	}
}

#[derive(Debug, Clone, Copy)]
pub struct EligibilityInput<'a> {
	/// Trimmed query, sigils included.
	pub query: &'a str,
	pub type_filter: Option<SearchCategory>,
	pub has_requester: bool,
	pub full_text_enabled: bool,
}

pub fn eligibility(input: &EligibilityInput<'_>) -> Eligibility {
	let query = input.query;
	let hashtag_query = query.starts_with(HASHTAG_SIGIL);
	let has_mention = query.contains(MENTION_SIGIL);
	let has_whitespace = query.contains(char::is_whitespace);

	Eligibility {
		accounts: SearchCategory::Accounts.allowed_by(input.type_filter)
			&& !(hashtag_query || (has_mention && has_whitespace)),
		statuses: input.full_text_enabled
			&& SearchCategory::Statuses.allowed_by(input.type_filter)
			&& input.has_requester
			&& !(hashtag_query || (has_mention && !has_whitespace)),
		hashtags: SearchCategory::Hashtags.allowed_by(input.type_filter) && !has_mention,
	}
}

/// Pagination is only defined within a single category.
pub fn effective_offset(type_filter: Option<SearchCategory>, offset: u32) -> u32 {
	if type_filter.is_some() { offset } else { 0 }
}
