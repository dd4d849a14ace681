use serde::{Deserialize, Serialize};

use sift_domain::{
	Identity, QueryMode, ResolvedEntity, SearchCategory, Status, Tag,
	eligibility::{self, EligibilityInput},
	query_mode,
	shape::{self, ShapeParams},
};

use crate::{Error, Result, SearchService, visibility};

const DEFAULT_LIMIT: u32 = 20;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub requester: Option<Identity>,
	#[serde(default = "default_limit")]
	pub limit: u32,
	#[serde(default, rename = "type")]
	pub type_filter: Option<SearchCategory>,
	/// Ignored unless `type_filter` is set.
	#[serde(default)]
	pub offset: u32,
	#[serde(default)]
	pub resolve: bool,
	#[serde(default, rename = "account_id")]
	pub author_filter: Option<String>,
	#[serde(default)]
	pub min_id: Option<String>,
	#[serde(default)]
	pub max_id: Option<String>,
	#[serde(default)]
	pub exclude_unreviewed: bool,
}

/// Every key is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
	pub accounts: Vec<Identity>,
	pub statuses: Vec<Status>,
	pub hashtags: Vec<Tag>,
}
impl SearchResponse {
	fn from_entity(entity: ResolvedEntity) -> Self {
		let mut response = Self::default();

		match entity {
			ResolvedEntity::Account(account) => response.accounts.push(account),
			ResolvedEntity::Status(status) => response.statuses.push(status),
			ResolvedEntity::Hashtag(tag) => response.hashtags.push(tag),
		}

		response
	}

	pub fn is_empty(&self) -> bool {
		self.accounts.is_empty() && self.statuses.is_empty() && self.hashtags.is_empty()
	}
}

#[derive(Clone, Copy)]
struct Dispatch<'a> {
	req: &'a SearchRequest,
	query: &'a str,
	limit: u32,
	offset: u32,
}

impl SearchService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim();
		let limit = req.limit.min(self.search.max_limit);

		if query.is_empty() || limit == 0 {
			return Ok(SearchResponse::default());
		}

		validate_request(&req)?;

		let mode = query_mode::classify(query, req.resolve);
		let offset = eligibility::effective_offset(req.type_filter, req.offset);

		tracing::debug!(mode = mode.label(), limit, offset, "Classified search query.");

		if mode == QueryMode::RemoteResourceResolution {
			return Ok(self.resolve_remote(query, &req, offset).await);
		}

		let eligible = eligibility::eligibility(&EligibilityInput {
			query,
			type_filter: req.type_filter,
			has_requester: req.requester.is_some(),
			full_text_enabled: self.search.full_text_enabled,
		});

		tracing::debug!(
			accounts = eligible.accounts,
			statuses = eligible.statuses,
			hashtags = eligible.hashtags,
			"Resolved category eligibility."
		);

		if !eligible.any() {
			return Ok(SearchResponse::default());
		}

		let dispatch = Dispatch { req: &req, query, limit, offset };
		let (accounts, statuses, hashtags) = tokio::try_join!(
			self.search_accounts(&dispatch, eligible.accounts),
			self.search_statuses(&dispatch, &mode, eligible.statuses),
			self.search_hashtags(&dispatch, eligible.hashtags),
		)?;

		Ok(SearchResponse { accounts, statuses, hashtags })
	}

	async fn resolve_remote(
		&self,
		query: &str,
		req: &SearchRequest,
		offset: u32,
	) -> SearchResponse {
		if offset > 0 {
			return SearchResponse::default();
		}

		match self.backends.resolver.resolve(query, req.requester.as_ref()).await {
			Ok(Some(entity)) if entity.category().allowed_by(req.type_filter) =>
				SearchResponse::from_entity(entity),
			Ok(Some(entity)) => {
				tracing::debug!(
					category = entity.category().as_str(),
					"Resolved resource does not match the requested type."
				);

				SearchResponse::default()
			},
			Ok(None) => SearchResponse::default(),
			Err(err) => {
				tracing::warn!(error = %err, "Remote resource resolution failed.");

				SearchResponse::default()
			},
		}
	}

	async fn search_accounts(
		&self,
		dispatch: &Dispatch<'_>,
		eligible: bool,
	) -> Result<Vec<Identity>> {
		if !eligible {
			return Ok(Vec::new());
		}

		let Dispatch { req, query, limit, offset } = *dispatch;

		self.backends.identity.search(query, req.requester.as_ref(), limit, req.resolve, offset).await
	}

	async fn search_hashtags(&self, dispatch: &Dispatch<'_>, eligible: bool) -> Result<Vec<Tag>> {
		if !eligible {
			return Ok(Vec::new());
		}

		let Dispatch { req, query, limit, offset } = *dispatch;

		self.backends.tags.search(query, limit, offset, req.exclude_unreviewed).await
	}

	async fn search_statuses(
		&self,
		dispatch: &Dispatch<'_>,
		mode: &QueryMode,
		eligible: bool,
	) -> Result<Vec<Status>> {
		let Some(requester) = dispatch.req.requester.as_ref().filter(|_| eligible) else {
			return Ok(Vec::new());
		};
		let raw = match self.fetch_statuses(dispatch, mode, requester).await {
			Ok(raw) => raw,
			Err(err @ (Error::BackendUnavailable { .. } | Error::GrammarParse { .. })) => {
				tracing::warn!(error = %err, "Status search degraded to an empty result.");

				return Ok(Vec::new());
			},
			Err(err) => return Err(err),
		};

		match visibility::filter_statuses(
			self.backends.relationships.as_ref(),
			self.backends.visibility.as_ref(),
			raw,
			requester,
		)
		.await
		{
			Err(err @ Error::BackendUnavailable { .. }) => {
				tracing::warn!(error = %err, "Relationship snapshot unavailable. Dropping statuses.");

				Ok(Vec::new())
			},
			result => result,
		}
	}

	async fn fetch_statuses(
		&self,
		dispatch: &Dispatch<'_>,
		mode: &QueryMode,
		requester: &Identity,
	) -> Result<Vec<Option<Status>>> {
		let req = dispatch.req;
		let params = ShapeParams {
			requester,
			author_filter: req.author_filter.as_deref(),
			min_id: req.min_id.as_deref(),
			max_id: req.max_id.as_deref(),
			limit: dispatch.limit,
			offset: dispatch.offset,
		};
		let grammar = self.backends.grammar.as_ref();
		let Some(backend_query) =
			shape::shape(mode, &params, &self.search, |text| grammar.parse(text))?
		else {
			return Ok(Vec::new());
		};

		self.backends.statuses.search(&backend_query).await
	}
}

fn default_limit() -> u32 {
	DEFAULT_LIMIT
}

fn validate_request(req: &SearchRequest) -> Result<()> {
	for (label, value) in [
		("account_id", &req.author_filter),
		("min_id", &req.min_id),
		("max_id", &req.max_id),
	] {
		if value.as_deref().map(|id| id.trim().is_empty()).unwrap_or(false) {
			return Err(Error::InvalidRequest { message: format!("{label} must be non-empty.") });
		}
	}

	Ok(())
}
