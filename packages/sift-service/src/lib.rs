pub mod search;

mod error;
mod visibility;

pub use error::{Error, Result};
pub use search::{SearchRequest, SearchResponse};

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use sift_config::{Config, Search};
use sift_domain::{
	AccountRelations, BackendQuery, Identity, QueryTree, RelationshipSnapshot, ResolvedEntity,
	Status, Tag, grammar::GrammarError,
};
use sift_providers::{full_text, identity, relationships, resolver, tags};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait IdentitySearch
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		requester: Option<&'a Identity>,
		limit: u32,
		resolve: bool,
		offset: u32,
	) -> BoxFuture<'a, Result<Vec<Identity>>>;
}

/// Full-text status backend. Entries the backend could not materialize come back as `None`.
pub trait StatusSearch
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a BackendQuery,
	) -> BoxFuture<'a, Result<Vec<Option<Status>>>>;
}

pub trait TagSearch
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		query: &'a str,
		limit: u32,
		offset: u32,
		exclude_unreviewed: bool,
	) -> BoxFuture<'a, Result<Vec<Tag>>>;
}

pub trait ResourceResolver
where
	Self: Send + Sync,
{
	fn resolve<'a>(
		&'a self,
		query: &'a str,
		on_behalf_of: Option<&'a Identity>,
	) -> BoxFuture<'a, Result<Option<ResolvedEntity>>>;
}

pub trait RelationshipLookup
where
	Self: Send + Sync,
{
	fn account_relations<'a>(
		&'a self,
		account_ids: &'a [String],
		requester_id: &'a str,
	) -> BoxFuture<'a, Result<AccountRelations>>;

	fn domain_blocks<'a>(
		&'a self,
		domains: &'a [String],
		requester_id: &'a str,
	) -> BoxFuture<'a, Result<HashMap<String, bool>>>;
}

/// Parses the structured query grammar used when no mode sigil is present.
pub trait QueryGrammar
where
	Self: Send + Sync,
{
	fn parse(&self, text: &str) -> std::result::Result<QueryTree, GrammarError>;
}

pub trait VisibilityPolicy
where
	Self: Send + Sync,
{
	fn visible(
		&self,
		status: &Status,
		requester: &Identity,
		snapshot: &RelationshipSnapshot,
	) -> bool;
}

#[derive(Clone)]
pub struct Backends {
	pub identity: Arc<dyn IdentitySearch>,
	pub statuses: Arc<dyn StatusSearch>,
	pub tags: Arc<dyn TagSearch>,
	pub resolver: Arc<dyn ResourceResolver>,
	pub relationships: Arc<dyn RelationshipLookup>,
	pub grammar: Arc<dyn QueryGrammar>,
	pub visibility: Arc<dyn VisibilityPolicy>,
}

pub struct SearchService {
	pub search: Search,
	pub backends: Backends,
}

pub struct DefaultGrammar;

pub struct DefaultVisibility;

struct HttpBackends {
	cfg: sift_config::Backends,
}

impl QueryGrammar for DefaultGrammar {
	fn parse(&self, text: &str) -> std::result::Result<QueryTree, GrammarError> {
		sift_domain::grammar::parse(text)
	}
}

impl VisibilityPolicy for DefaultVisibility {
	fn visible(
		&self,
		status: &Status,
		requester: &Identity,
		snapshot: &RelationshipSnapshot,
	) -> bool {
		sift_domain::visibility::status_visible(status, requester, snapshot)
	}
}

impl IdentitySearch for HttpBackends {
	fn search<'a>(
		&'a self,
		query: &'a str,
		requester: Option<&'a Identity>,
		limit: u32,
		resolve: bool,
		offset: u32,
	) -> BoxFuture<'a, Result<Vec<Identity>>> {
		Box::pin(async move {
			identity::search(&self.cfg.identity, query, requester, limit, resolve, offset)
				.await
				.map_err(|err| Error::from_provider("identity", err))
		})
	}
}

impl StatusSearch for HttpBackends {
	fn search<'a>(
		&'a self,
		query: &'a BackendQuery,
	) -> BoxFuture<'a, Result<Vec<Option<Status>>>> {
		Box::pin(async move {
			full_text::search(&self.cfg.full_text, query)
				.await
				.map_err(|err| Error::from_provider("full_text", err))
		})
	}
}

impl TagSearch for HttpBackends {
	fn search<'a>(
		&'a self,
		query: &'a str,
		limit: u32,
		offset: u32,
		exclude_unreviewed: bool,
	) -> BoxFuture<'a, Result<Vec<Tag>>> {
		Box::pin(async move {
			tags::search(&self.cfg.tags, query, limit, offset, exclude_unreviewed)
				.await
				.map_err(|err| Error::from_provider("tags", err))
		})
	}
}

impl ResourceResolver for HttpBackends {
	fn resolve<'a>(
		&'a self,
		query: &'a str,
		on_behalf_of: Option<&'a Identity>,
	) -> BoxFuture<'a, Result<Option<ResolvedEntity>>> {
		Box::pin(async move {
			resolver::resolve(&self.cfg.resolver, query, on_behalf_of)
				.await
				.map_err(|err| Error::Resolution { message: err.to_string() })
		})
	}
}

impl RelationshipLookup for HttpBackends {
	fn account_relations<'a>(
		&'a self,
		account_ids: &'a [String],
		requester_id: &'a str,
	) -> BoxFuture<'a, Result<AccountRelations>> {
		Box::pin(async move {
			relationships::account_relations(&self.cfg.relationships, account_ids, requester_id)
				.await
				.map_err(|err| Error::from_provider("relationships", err))
		})
	}

	fn domain_blocks<'a>(
		&'a self,
		domains: &'a [String],
		requester_id: &'a str,
	) -> BoxFuture<'a, Result<HashMap<String, bool>>> {
		Box::pin(async move {
			relationships::domain_blocks(&self.cfg.relationships, domains, requester_id)
				.await
				.map_err(|err| Error::from_provider("relationships", err))
		})
	}
}

impl Backends {
	/// HTTP adapters for every backend, with the default grammar and visibility policy.
	pub fn http(cfg: &sift_config::Backends) -> Self {
		let http = Arc::new(HttpBackends { cfg: cfg.clone() });

		Self {
			identity: http.clone(),
			statuses: http.clone(),
			tags: http.clone(),
			resolver: http.clone(),
			relationships: http,
			grammar: Arc::new(DefaultGrammar),
			visibility: Arc::new(DefaultVisibility),
		}
	}
}

impl SearchService {
	pub fn new(cfg: &Config) -> Self {
		Self { search: cfg.search.clone(), backends: Backends::http(&cfg.backends) }
	}

	pub fn with_backends(search: Search, backends: Backends) -> Self {
		Self { search, backends }
	}
}
