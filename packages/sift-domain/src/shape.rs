use sift_config::Search;

use crate::{
	entity::Identity,
	grammar::GrammarError,
	query::{
		AUTHOR_FIELD, BackendQuery, Filter, ID_FIELD, Operator, QueryTree, SEARCHABLE_BY_FIELD,
		Sort, TEXT_FIELD,
	},
	query_mode::{QueryMode, SortDirection},
};

/// Request fields that influence the full-text query.
#[derive(Debug, Clone, Copy)]
pub struct ShapeParams<'a> {
	pub requester: &'a Identity,
	pub author_filter: Option<&'a str>,
	pub min_id: Option<&'a str>,
	pub max_id: Option<&'a str>,
	pub limit: u32,
	pub offset: u32,
}

/// Builds the full-text query for `mode`.
///
/// Returns `Ok(None)` when the mode carries no full-text query: remote resource
/// resolution, or a sigil query whose text is empty once the sigils are stripped.
pub fn shape<F>(
	mode: &QueryMode,
	params: &ShapeParams<'_>,
	search: &Search,
	parse_grammar: F,
) -> Result<Option<BackendQuery>, GrammarError>
where
	F: FnOnce(&str) -> Result<QueryTree, GrammarError>,
{
	let (query, sort) = match mode {
		QueryMode::RemoteResourceResolution => return Ok(None),
		QueryMode::RankedPhrase { text, sort_by_date } => {
			if text.is_empty() {
				return Ok(None);
			}

			(
				QueryTree::SimpleQueryString {
					field: TEXT_FIELD.to_string(),
					query: text.clone(),
					default_operator: Operator::And,
				},
				sort_from_directive(*sort_by_date),
			)
		},
		QueryMode::Boolean { text, sort_by_date } => {
			if text.is_empty() {
				return Ok(None);
			}

			(
				QueryTree::QueryString {
					field: TEXT_FIELD.to_string(),
					query: text.clone(),
					default_operator: Operator::And,
				},
				sort_from_directive(*sort_by_date),
			)
		},
		QueryMode::StructuredGrammar { text } =>
			(parse_grammar(text)?, Sort::Chronological(SortDirection::Desc)),
	};

	Ok(Some(BackendQuery {
		query,
		filters: filters(params, search),
		sort,
		limit: params.limit,
		offset: params.offset,
	}))
}

fn sort_from_directive(directive: Option<SortDirection>) -> Sort {
	directive.map(Sort::Chronological).unwrap_or(Sort::Relevance)
}

fn filters(params: &ShapeParams<'_>, search: &Search) -> Vec<Filter> {
	let mut filters = Vec::new();

	if !search.allows_all_content(&params.requester.id) {
		filters.push(Filter::Term {
			field: SEARCHABLE_BY_FIELD.to_string(),
			value: params.requester.id.clone(),
		});
	}
	if let Some(author_id) = params.author_filter {
		filters
			.push(Filter::Term { field: AUTHOR_FIELD.to_string(), value: author_id.to_string() });
	}
	if params.min_id.is_some() || params.max_id.is_some() {
		filters.push(Filter::Range {
			field: ID_FIELD.to_string(),
			gt: params.min_id.map(str::to_string),
			lt: params.max_id.map(str::to_string),
		});
	}

	filters
}
