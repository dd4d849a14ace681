use regex::Regex;
use serde::{Deserialize, Serialize};

/// Selects simple phrase matching against status text.
pub const RANKED_PHRASE_SIGIL: char = '\u{1F50D}';
/// Selects token matching with query-language pass-through.
pub const BOOLEAN_SIGIL: char = '\u{1F50E}';
pub const SORT_ASCENDING_SIGIL: char = '\u{1F4C8}';
pub const SORT_DESCENDING_SIGIL: char = '\u{1F4C9}';

const REMOTE_RESOURCE_PATTERN: &str = r"^https?://\S+$";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
	Asc,
	Desc,
}
impl SortDirection {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Asc => "asc",
			Self::Desc => "desc",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
	RemoteResourceResolution,
	RankedPhrase { text: String, sort_by_date: Option<SortDirection> },
	Boolean { text: String, sort_by_date: Option<SortDirection> },
	/// Grammar text is kept verbatim; parsing happens when the backend query is shaped.
	StructuredGrammar { text: String },
}
impl QueryMode {
	pub fn label(&self) -> &'static str {
		match self {
			Self::RemoteResourceResolution => "remote_resource",
			Self::RankedPhrase { .. } => "ranked_phrase",
			Self::Boolean { .. } => "boolean",
			Self::StructuredGrammar { .. } => "structured_grammar",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SigilMode {
	RankedPhrase,
	Boolean,
}

enum ClassifyState<'a> {
	Start(&'a str),
	ModeStripped { mode: SigilMode, rest: &'a str },
	SortStripped { mode: SigilMode, sort: Option<SortDirection>, rest: &'a str },
}

pub fn classify(query: &str, resolve: bool) -> QueryMode {
	let query = query.trim();

	if resolve && is_remote_resource(query) {
		return QueryMode::RemoteResourceResolution;
	}

	let mut state = ClassifyState::Start(query);

	loop {
		state = match state {
			ClassifyState::Start(rest) => match strip_mode_sigil(rest) {
				Some((mode, rest)) => ClassifyState::ModeStripped { mode, rest: rest.trim_start() },
				None => return QueryMode::StructuredGrammar { text: rest.to_string() },
			},
			ClassifyState::ModeStripped { mode, rest } => {
				let (sort, rest) = strip_sort_sigil(rest);

				ClassifyState::SortStripped { mode, sort, rest }
			},
			ClassifyState::SortStripped { mode, sort, rest } => {
				let text = rest.trim().to_string();

				return match mode {
					SigilMode::RankedPhrase => QueryMode::RankedPhrase { text, sort_by_date: sort },
					SigilMode::Boolean => QueryMode::Boolean { text, sort_by_date: sort },
				};
			},
		};
	}
}

pub fn is_remote_resource(query: &str) -> bool {
	Regex::new(REMOTE_RESOURCE_PATTERN).map(|re| re.is_match(query)).unwrap_or(false)
}

fn strip_mode_sigil(query: &str) -> Option<(SigilMode, &str)> {
	if let Some(rest) = query.strip_prefix(RANKED_PHRASE_SIGIL) {
		return Some((SigilMode::RankedPhrase, rest));
	}

	query.strip_prefix(BOOLEAN_SIGIL).map(|rest| (SigilMode::Boolean, rest))
}

fn strip_sort_sigil(query: &str) -> (Option<SortDirection>, &str) {
	if let Some(rest) = query.strip_prefix(SORT_ASCENDING_SIGIL) {
		return (Some(SortDirection::Asc), rest);
	}
	if let Some(rest) = query.strip_prefix(SORT_DESCENDING_SIGIL) {
		return (Some(SortDirection::Desc), rest);
	}

	(None, query)
}
