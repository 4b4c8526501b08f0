//! Abstract persisted-collection interface consumed by the query pipeline.
//!
//! The core performs no I/O of its own; counting, filtering, ordering and
//! slicing are all delegated through [`Repository`]. Backends narrow
//! themselves immutably, queryset-style: every filter application returns a
//! new, narrower repository value.

use async_trait::async_trait;
use indexmap::IndexMap;

use crate::error::QueryResult;
use crate::plan::{OrderExpr, Window};

/// Arguments passed to a named repository operation.
///
/// Pre-conditions may call operations positionally (`select_related`,
/// `"author"`), with keyword arguments, or with a single bare value; user
/// search predicates always arrive as keyword arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationArgs {
	/// Positional arguments.
	Positional(Vec<String>),
	/// Keyword arguments in declaration order.
	Keyword(IndexMap<String, String>),
	/// A single bare argument.
	Single(String),
}

/// Ordered set of repository operations applied before any user search.
///
/// Application order is the declaration order, which is why this is an
/// ordered map and not a hash map. A pre-condition is fixed by the server
/// side and never exposed to the client.
pub type PreCondition = IndexMap<String, OperationArgs>;

/// One page of repository output plus its paging metadata.
#[derive(Debug, Clone)]
pub struct Page<R> {
	/// Records of the requested window, ordered and filtered.
	pub items: Vec<R>,
	/// Record count after user filtering.
	pub count: u64,
	/// Record count before user filtering (after any pre-condition).
	pub total: u64,
	/// Draw token echoed from the request.
	pub draw: u64,
}

/// Abstract persisted collection supporting count/filter/order/slice.
///
/// Implementations expose named operations (the default `filter` plus any
/// custom ones referenced by a schema's filter specifications) through
/// [`Repository::apply`]. An operation name the backend does not recognize
/// must be answered with [`crate::QueryError::InvalidOperation`]; that is a
/// configuration bug in the table definition, not a user-input error.
#[async_trait]
pub trait Repository: Sized + Send {
	/// Record type produced by [`Repository::slice`].
	type Record: Send;

	/// Counts the records currently selected by this repository.
	async fn count(&self) -> QueryResult<u64>;

	/// Applies a named operation, returning the narrowed repository.
	fn apply(self, operation: &str, args: &OperationArgs) -> QueryResult<Self>;

	/// Orders the selection by the given expression.
	///
	/// A `-` prefix on the rendered expression denotes descending order.
	fn order_by(self, order: &OrderExpr) -> Self;

	/// Materializes the requested window of the selection.
	///
	/// A window without a length returns everything from `start` onward; a
	/// window starting beyond the selection yields an empty vector.
	async fn slice(self, window: &Window) -> QueryResult<Vec<Self::Record>>;
}
