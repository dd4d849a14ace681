use std::{
	collections::HashMap,
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
};

use time::macros::datetime;

use sift_config::Search;
use sift_domain::{
	AccountRelations, Audience, BackendQuery, Identity, ResolvedEntity, SearchCategory, Status,
	Tag,
	query::{AUTHOR_FIELD, SEARCHABLE_BY_FIELD},
};
use sift_service::{
	Backends, BoxFuture, DefaultGrammar, DefaultVisibility, Error, IdentitySearch,
	RelationshipLookup, ResourceResolver, Result, SearchRequest, SearchResponse, SearchService,
	StatusSearch, TagSearch,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Failure {
	None,
	StatusesUnavailable,
	StatusesBroken,
	Identity,
	Tags,
	Resolver,
	Relationships,
	RelationshipsUnavailable,
}

#[derive(Default)]
struct Calls {
	identity: AtomicUsize,
	statuses: AtomicUsize,
	tags: AtomicUsize,
	resolver: AtomicUsize,
	relationships: AtomicUsize,
	domains: AtomicUsize,
}

struct Stub {
	calls: Calls,
	failure: Failure,
	accounts: Vec<Identity>,
	statuses: Vec<Option<Status>>,
	tags: Vec<Tag>,
	resolved: Option<ResolvedEntity>,
	relations: AccountRelations,
	domain_blocking: HashMap<String, bool>,
	paging: Mutex<Vec<(u32, u32)>>,
	last_query: Mutex<Option<BackendQuery>>,
}
impl Stub {
	fn new() -> Self {
		Self {
			calls: Calls::default(),
			failure: Failure::None,
			accounts: vec![identity("5", "eve", None)],
			statuses: vec![Some(status("10", identity("2", "bob", None), Audience::Public))],
			tags: vec![Tag { name: "rust".to_string(), reviewed: true }],
			resolved: None,
			relations: AccountRelations::default(),
			domain_blocking: HashMap::new(),
			paging: Mutex::new(Vec::new()),
			last_query: Mutex::new(None),
		}
	}

	fn failing(failure: Failure) -> Self {
		Self { failure, ..Self::new() }
	}

	fn count(counter: &AtomicUsize) -> usize {
		counter.load(Ordering::SeqCst)
	}

	fn total_calls(&self) -> usize {
		Self::count(&self.calls.identity)
			+ Self::count(&self.calls.statuses)
			+ Self::count(&self.calls.tags)
			+ Self::count(&self.calls.resolver)
			+ Self::count(&self.calls.relationships)
	}

	fn broken(&self, backend: &str) -> Error {
		Error::Backend { backend: backend.to_string(), message: "stub failure".to_string() }
	}
}

impl IdentitySearch for Stub {
	fn search<'a>(
		&'a self,
		_query: &'a str,
		_requester: Option<&'a Identity>,
		limit: u32,
		_resolve: bool,
		offset: u32,
	) -> BoxFuture<'a, Result<Vec<Identity>>> {
		Box::pin(async move {
			self.calls.identity.fetch_add(1, Ordering::SeqCst);
			self.paging.lock().expect("Paging lock poisoned.").push((limit, offset));

			if self.failure == Failure::Identity {
				return Err(self.broken("identity"));
			}

			Ok(self.accounts.clone())
		})
	}
}

impl StatusSearch for Stub {
	fn search<'a>(
		&'a self,
		query: &'a BackendQuery,
	) -> BoxFuture<'a, Result<Vec<Option<Status>>>> {
		Box::pin(async move {
			self.calls.statuses.fetch_add(1, Ordering::SeqCst);
			*self.last_query.lock().expect("Query lock poisoned.") = Some(query.clone());

			match self.failure {
				Failure::StatusesUnavailable => Err(Error::BackendUnavailable {
					backend: "full_text".to_string(),
					message: "connection refused".to_string(),
				}),
				Failure::StatusesBroken => Err(self.broken("full_text")),
				_ => Ok(self.statuses.clone()),
			}
		})
	}
}

impl TagSearch for Stub {
	fn search<'a>(
		&'a self,
		_query: &'a str,
		_limit: u32,
		_offset: u32,
		_exclude_unreviewed: bool,
	) -> BoxFuture<'a, Result<Vec<Tag>>> {
		Box::pin(async move {
			self.calls.tags.fetch_add(1, Ordering::SeqCst);

			if self.failure == Failure::Tags {
				return Err(self.broken("tags"));
			}

			Ok(self.tags.clone())
		})
	}
}

impl ResourceResolver for Stub {
	fn resolve<'a>(
		&'a self,
		_query: &'a str,
		_on_behalf_of: Option<&'a Identity>,
	) -> BoxFuture<'a, Result<Option<ResolvedEntity>>> {
		Box::pin(async move {
			self.calls.resolver.fetch_add(1, Ordering::SeqCst);

			if self.failure == Failure::Resolver {
				return Err(Error::Resolution { message: "remote timed out".to_string() });
			}

			Ok(self.resolved.clone())
		})
	}
}

impl RelationshipLookup for Stub {
	fn account_relations<'a>(
		&'a self,
		_account_ids: &'a [String],
		_requester_id: &'a str,
	) -> BoxFuture<'a, Result<AccountRelations>> {
		Box::pin(async move {
			self.calls.relationships.fetch_add(1, Ordering::SeqCst);

			match self.failure {
				Failure::Relationships => return Err(self.broken("relationships")),
				Failure::RelationshipsUnavailable =>
					return Err(Error::BackendUnavailable {
						backend: "relationships".to_string(),
						message: "connection refused".to_string(),
					}),
				_ => {},
			}

			Ok(self.relations.clone())
		})
	}

	fn domain_blocks<'a>(
		&'a self,
		_domains: &'a [String],
		_requester_id: &'a str,
	) -> BoxFuture<'a, Result<HashMap<String, bool>>> {
		Box::pin(async move {
			self.calls.domains.fetch_add(1, Ordering::SeqCst);

			Ok(self.domain_blocking.clone())
		})
	}
}

fn identity(id: &str, username: &str, domain: Option<&str>) -> Identity {
	Identity {
		id: id.to_string(),
		username: username.to_string(),
		domain: domain.map(str::to_string),
		display_name: String::new(),
	}
}

fn status(id: &str, author: Identity, audience: Audience) -> Status {
	Status {
		id: id.to_string(),
		author,
		text: "the quick brown fox".to_string(),
		audience,
		mentioned_ids: Vec::new(),
		created_at: datetime!(2026-01-02 03:04:05 UTC),
	}
}

fn requester() -> Identity {
	identity("1", "alice", None)
}

fn request(query: &str) -> SearchRequest {
	SearchRequest {
		query: query.to_string(),
		requester: Some(requester()),
		limit: 20,
		type_filter: None,
		offset: 0,
		resolve: false,
		author_filter: None,
		min_id: None,
		max_id: None,
		exclude_unreviewed: false,
	}
}

fn service_with(stub: &Arc<Stub>, search: Search) -> SearchService {
	SearchService::with_backends(
		search,
		Backends {
			identity: stub.clone(),
			statuses: stub.clone(),
			tags: stub.clone(),
			resolver: stub.clone(),
			relationships: stub.clone(),
			grammar: Arc::new(DefaultGrammar),
			visibility: Arc::new(DefaultVisibility),
		},
	)
}

fn service(stub: &Arc<Stub>) -> SearchService {
	service_with(stub, Search::default())
}

async fn run(stub: &Arc<Stub>, req: SearchRequest) -> SearchResponse {
	service(stub).search(req).await.expect("Search failed.")
}

#[tokio::test]
async fn blank_query_or_zero_limit_returns_empty_without_backend_calls() {
	let stub = Arc::new(Stub::new());
	let blank = run(&stub, request("   ")).await;
	let zero = run(&stub, SearchRequest { limit: 0, ..request("fox") }).await;

	assert!(blank.is_empty());
	assert!(zero.is_empty());
	assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn plain_query_searches_every_category() {
	let stub = Arc::new(Stub::new());
	let response = run(&stub, request("fox")).await;

	assert_eq!(response.accounts.len(), 1);
	assert_eq!(response.statuses.len(), 1);
	assert_eq!(response.hashtags.len(), 1);
	assert_eq!(Stub::count(&stub.calls.relationships), 1);
}

#[tokio::test]
async fn hashtag_query_only_searches_hashtags() {
	let stub = Arc::new(Stub::new());
	let response = run(&stub, request("#rust")).await;

	assert!(response.accounts.is_empty());
	assert!(response.statuses.is_empty());
	assert_eq!(response.hashtags.len(), 1);
	assert_eq!(Stub::count(&stub.calls.identity), 0);
	assert_eq!(Stub::count(&stub.calls.statuses), 0);
}

#[tokio::test]
async fn mention_with_text_only_searches_statuses() {
	let stub = Arc::new(Stub::new());
	let response = run(&stub, request("@alice hello")).await;

	assert_eq!(response.statuses.len(), 1);
	assert_eq!(Stub::count(&stub.calls.identity), 0);
	assert_eq!(Stub::count(&stub.calls.tags), 0);
}

#[tokio::test]
async fn bare_mention_only_searches_accounts() {
	let stub = Arc::new(Stub::new());
	let response = run(&stub, request("@eve")).await;

	assert_eq!(response.accounts.len(), 1);
	assert_eq!(Stub::count(&stub.calls.statuses), 0);
	assert_eq!(Stub::count(&stub.calls.tags), 0);
}

#[tokio::test]
async fn statuses_need_requester_and_full_text() {
	let stub = Arc::new(Stub::new());
	let anonymous = run(&stub, SearchRequest { requester: None, ..request("fox") }).await;

	assert!(anonymous.statuses.is_empty());
	assert_eq!(anonymous.accounts.len(), 1);

	let disabled = service_with(&stub, Search { full_text_enabled: false, ..Search::default() })
		.search(request("fox"))
		.await
		.expect("Search failed.");

	assert!(disabled.statuses.is_empty());
	assert_eq!(Stub::count(&stub.calls.statuses), 0);
}

#[tokio::test]
async fn ineligible_request_calls_no_backend() {
	let stub = Arc::new(Stub::new());
	let response = run(
		&stub,
		SearchRequest {
			requester: None,
			type_filter: Some(SearchCategory::Statuses),
			..request("fox")
		},
	)
	.await;

	assert!(response.is_empty());
	assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn type_filter_restricts_categories() {
	let stub = Arc::new(Stub::new());
	let response =
		run(&stub, SearchRequest { type_filter: Some(SearchCategory::Hashtags), ..request("fox") })
			.await;

	assert!(response.accounts.is_empty());
	assert_eq!(response.hashtags.len(), 1);
	assert_eq!(stub.total_calls(), 1);
}

#[tokio::test]
async fn unavailable_full_text_degrades_to_empty_statuses() {
	let stub = Arc::new(Stub::failing(Failure::StatusesUnavailable));
	let response = run(&stub, request("fox")).await;

	assert!(response.statuses.is_empty());
	assert_eq!(response.accounts.len(), 1);
	assert_eq!(response.hashtags.len(), 1);
	assert_eq!(Stub::count(&stub.calls.relationships), 0);
}

#[tokio::test]
async fn unavailable_relationships_degrade_to_empty_statuses() {
	let stub = Arc::new(Stub::failing(Failure::RelationshipsUnavailable));
	let response = run(&stub, request("fox")).await;

	assert!(response.statuses.is_empty());
	assert_eq!(response.accounts.len(), 1);
	assert_eq!(response.hashtags.len(), 1);
	assert_eq!(Stub::count(&stub.calls.statuses), 1);
	assert_eq!(Stub::count(&stub.calls.relationships), 1);
}

#[tokio::test]
async fn grammar_failure_degrades_to_empty_statuses() {
	let stub = Arc::new(Stub::new());
	let response = run(&stub, request("\"unterminated fox")).await;

	assert!(response.statuses.is_empty());
	assert_eq!(response.accounts.len(), 1);
	assert_eq!(Stub::count(&stub.calls.statuses), 0);
}

#[tokio::test]
async fn other_backend_failures_propagate() {
	for failure in [Failure::Identity, Failure::Tags, Failure::StatusesBroken, Failure::Relationships]
	{
		let stub = Arc::new(Stub::failing(failure));
		let err = service(&stub)
			.search(request("fox"))
			.await
			.expect_err("Expected the backend failure to propagate.");

		assert!(matches!(err, Error::Backend { .. }), "{failure:?} produced {err}");
	}
}

#[tokio::test]
async fn hidden_statuses_are_filtered_and_own_statuses_kept() {
	let blocked = identity("2", "bob", None);
	let remote = identity("3", "carol", Some("bad.example"));
	let followed_remote = identity("4", "dave", Some("bad.example"));
	let stub = Arc::new(Stub {
		statuses: vec![
			Some(status("10", blocked, Audience::Public)),
			Some(status("11", requester(), Audience::Direct)),
			None,
			Some(status("12", remote, Audience::Public)),
			Some(status("13", followed_remote, Audience::Private)),
		],
		relations: AccountRelations {
			blocking: HashMap::from([("2".to_string(), true)]),
			following: HashMap::from([("4".to_string(), true)]),
			..AccountRelations::default()
		},
		domain_blocking: HashMap::from([("bad.example".to_string(), true)]),
		..Stub::new()
	});
	let response = run(&stub, request("fox")).await;
	let ids: Vec<&str> = response.statuses.iter().map(|status| status.id.as_str()).collect();

	assert_eq!(ids, vec!["11", "13"]);
	assert_eq!(Stub::count(&stub.calls.relationships), 1);
	assert_eq!(Stub::count(&stub.calls.domains), 1);
}

#[tokio::test]
async fn local_only_page_skips_domain_lookup() {
	let stub = Arc::new(Stub::new());

	run(&stub, request("fox")).await;

	assert_eq!(Stub::count(&stub.calls.domains), 0);
}

#[tokio::test]
async fn status_query_carries_request_filters() {
	let stub = Arc::new(Stub::new());

	run(&stub, SearchRequest { author_filter: Some("2".to_string()), ..request("fox") }).await;

	let query = stub
		.last_query
		.lock()
		.expect("Query lock poisoned.")
		.clone()
		.expect("Full-text backend was not called.");

	assert!(query.has_filter(AUTHOR_FIELD));
	assert!(query.has_filter(SEARCHABLE_BY_FIELD));
	assert_eq!(query.limit, 20);
}

#[tokio::test]
async fn offset_only_applies_with_type_filter() {
	let stub = Arc::new(Stub::new());

	run(&stub, SearchRequest { offset: 5, ..request("fox") }).await;
	run(
		&stub,
		SearchRequest { offset: 5, type_filter: Some(SearchCategory::Accounts), ..request("fox") },
	)
	.await;

	let paging = stub.paging.lock().expect("Paging lock poisoned.").clone();

	assert_eq!(paging, vec![(20, 0), (20, 5)]);
}

#[tokio::test]
async fn limit_is_clamped_to_configured_maximum() {
	let stub = Arc::new(Stub::new());

	run(&stub, SearchRequest { limit: 500, ..request("fox") }).await;

	let paging = stub.paging.lock().expect("Paging lock poisoned.").clone();

	assert_eq!(paging, vec![(Search::default().max_limit, 0)]);
}

#[tokio::test]
async fn blank_id_filters_are_rejected() {
	let stub = Arc::new(Stub::new());
	let err = service(&stub)
		.search(SearchRequest { min_id: Some("  ".to_string()), ..request("fox") })
		.await
		.expect_err("Expected an invalid request.");

	assert!(matches!(err, Error::InvalidRequest { .. }));
	assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn resolvable_url_short_circuits_to_resolver() {
	let stub = Arc::new(Stub {
		resolved: Some(ResolvedEntity::Account(identity("9", "zed", Some("remote.example")))),
		..Stub::new()
	});
	let response = run(
		&stub,
		SearchRequest { resolve: true, ..request("https://remote.example/@zed") },
	)
	.await;

	assert_eq!(response.accounts.len(), 1);
	assert_eq!(response.accounts[0].id, "9");
	assert!(response.statuses.is_empty());
	assert!(response.hashtags.is_empty());
	assert_eq!(Stub::count(&stub.calls.resolver), 1);
	assert_eq!(Stub::count(&stub.calls.identity), 0);
}

#[tokio::test]
async fn resolved_entity_must_match_type_filter() {
	let stub = Arc::new(Stub {
		resolved: Some(ResolvedEntity::Account(identity("9", "zed", Some("remote.example")))),
		..Stub::new()
	});
	let response = run(
		&stub,
		SearchRequest {
			resolve: true,
			type_filter: Some(SearchCategory::Statuses),
			..request("https://remote.example/@zed")
		},
	)
	.await;

	assert!(response.is_empty());
	assert_eq!(stub.total_calls(), 1);
}

#[tokio::test]
async fn paged_url_resolution_is_empty() {
	let stub = Arc::new(Stub::new());
	let response = run(
		&stub,
		SearchRequest {
			resolve: true,
			offset: 1,
			type_filter: Some(SearchCategory::Accounts),
			..request("https://remote.example/@zed")
		},
	)
	.await;

	assert!(response.is_empty());
	assert_eq!(stub.total_calls(), 0);
}

#[tokio::test]
async fn resolver_failure_yields_empty_response() {
	let stub = Arc::new(Stub::failing(Failure::Resolver));
	let response =
		run(&stub, SearchRequest { resolve: true, ..request("https://remote.example/@zed") })
			.await;

	assert!(response.is_empty());
}

#[tokio::test]
async fn url_without_resolve_uses_regular_search() {
	let stub = Arc::new(Stub::new());

	run(&stub, request("https://remote.example/@zed")).await;

	assert_eq!(Stub::count(&stub.calls.resolver), 0);
	assert_eq!(Stub::count(&stub.calls.identity), 1);
}

#[tokio::test]
async fn repeated_search_is_stable() {
	let stub = Arc::new(Stub::new());
	let first = run(&stub, request("fox")).await;
	let second = run(&stub, request("fox")).await;

	assert_eq!(first, second);
}

#[test]
fn request_defaults_from_json() {
	let req: SearchRequest =
		serde_json::from_value(serde_json::json!({ "query": "fox", "type": "accounts" }))
			.expect("Failed to decode request.");

	assert_eq!(req.limit, 20);
	assert_eq!(req.type_filter, Some(SearchCategory::Accounts));
	assert!(req.requester.is_none());
	assert!(!req.resolve);
}

#[test]
fn response_always_serializes_every_category() {
	let value = serde_json::to_value(SearchResponse::default()).expect("Failed to encode.");

	assert_eq!(value, serde_json::json!({ "accounts": [], "statuses": [], "hashtags": [] }));
}
