pub mod eligibility;
pub mod entity;
pub mod grammar;
pub mod query;
pub mod query_mode;
pub mod relationship;
pub mod shape;
pub mod visibility;

pub use entity::{Audience, Identity, ResolvedEntity, SearchCategory, Status, Tag};
pub use query::{BackendQuery, Filter, Operator, QueryTree, Sort};
pub use query_mode::{QueryMode, SortDirection};
pub use relationship::{AccountRelations, RelationshipSnapshot};
