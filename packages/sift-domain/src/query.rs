use serde::Serialize;
use serde_json::Value;

use crate::query_mode::SortDirection;

pub const TEXT_FIELD: &str = "text";
pub const AUTHOR_FIELD: &str = "account_id";
pub const ID_FIELD: &str = "id";
pub const SEARCHABLE_BY_FIELD: &str = "searchable_by";
pub const CREATED_AT_FIELD: &str = "created_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
	And,
}

/// Backend-neutral query tree. Rendered into the search body by [`QueryTree::to_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTree {
	Term { field: String, value: String },
	Match { field: String, text: String },
	Phrase { field: String, text: String },
	SimpleQueryString { field: String, query: String, default_operator: Operator },
	QueryString { field: String, query: String, default_operator: Operator },
	Bool { must: Vec<QueryTree>, must_not: Vec<QueryTree>, should: Vec<QueryTree> },
}
impl QueryTree {
	pub fn to_value(&self) -> Value {
		match self {
			Self::Term { field, value } => serde_json::json!({ "term": { field: value } }),
			Self::Match { field, text } => {
				serde_json::json!({ "match": { field: { "query": text, "operator": Operator::And } } })
			},
			Self::Phrase { field, text } => {
				serde_json::json!({ "match_phrase": { field: { "query": text } } })
			},
			Self::SimpleQueryString { field, query, default_operator } => serde_json::json!({
				"simple_query_string": {
					"query": query,
					"fields": [field],
					"default_operator": default_operator,
				}
			}),
			Self::QueryString { field, query, default_operator } => serde_json::json!({
				"query_string": {
					"query": query,
					"fields": [field],
					"default_operator": default_operator,
				}
			}),
			Self::Bool { must, must_not, should } => {
				let mut body = serde_json::Map::new();

				for (key, clauses) in [("must", must), ("must_not", must_not), ("should", should)] {
					if !clauses.is_empty() {
						body.insert(
							key.to_string(),
							Value::Array(clauses.iter().map(Self::to_value).collect()),
						);
					}
				}

				serde_json::json!({ "bool": body })
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
	Term { field: String, value: String },
	/// Exclusive on both ends.
	Range { field: String, gt: Option<String>, lt: Option<String> },
}
impl Filter {
	pub fn to_value(&self) -> Value {
		match self {
			Self::Term { field, value } => serde_json::json!({ "term": { field: value } }),
			Self::Range { field, gt, lt } => {
				let mut bounds = serde_json::Map::new();

				if let Some(gt) = gt {
					bounds.insert("gt".to_string(), Value::String(gt.clone()));
				}
				if let Some(lt) = lt {
					bounds.insert("lt".to_string(), Value::String(lt.clone()));
				}

				serde_json::json!({ "range": { field: bounds } })
			},
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
	Relevance,
	Chronological(SortDirection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendQuery {
	pub query: QueryTree,
	pub filters: Vec<Filter>,
	pub sort: Sort,
	pub limit: u32,
	pub offset: u32,
}
impl BackendQuery {
	pub fn has_filter(&self, field: &str) -> bool {
		self.filters.iter().any(|filter| match filter {
			Filter::Term { field: name, .. } | Filter::Range { field: name, .. } => name == field,
		})
	}

	/// Renders the full search request body: query, filters, sort, and pagination.
	pub fn to_search_body(&self) -> Value {
		let filters: Vec<Value> = self.filters.iter().map(Filter::to_value).collect();
		let mut body = serde_json::json!({
			"query": {
				"bool": {
					"must": [self.query.to_value()],
					"filter": filters,
				}
			},
			"from": self.offset,
			"size": self.limit,
		});

		if let Sort::Chronological(direction) = self.sort {
			body["sort"] = serde_json::json!([
				{ CREATED_AT_FIELD: { "order": direction.as_str() } },
				{ ID_FIELD: { "order": direction.as_str() } },
			]);
		}

		body
	}
}
