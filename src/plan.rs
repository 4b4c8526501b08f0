//! Query plan builder: from a decoded [`QueryIntent`] and a column schema
//! to repository instructions, and the pipeline that applies them.

use std::fmt;

use indexmap::IndexMap;

use crate::decode::{OrderDirection, QueryIntent};
use crate::error::{QueryError, QueryResult};
use crate::repository::{OperationArgs, Page, PreCondition, Repository};
use crate::schema::ColumnSchema;

/// Filter predicates grouped by repository operation.
///
/// Operation name → keyword arguments. Multiple columns may target the same
/// operation with different keys; they accumulate into one argument set.
pub type Predicates = IndexMap<String, IndexMap<String, String>>;

/// Resolved order instruction: direction plus the column's order key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderExpr {
	/// Field path to order by.
	pub key: String,
	/// Sort direction.
	pub direction: OrderDirection,
}

impl OrderExpr {
	/// Renders the direction-prefixed expression consumed by the
	/// repository's order-by contract (`"-"` prefix for descending).
	pub fn expression(&self) -> String {
		format!("{}{}", self.direction.prefix(), self.key)
	}
}

impl fmt::Display for OrderExpr {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.direction.prefix(), self.key)
	}
}

/// Pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
	/// Offset of the first record to return.
	pub start: u64,
	/// Maximum number of records; `None` returns everything from `start`.
	pub length: Option<u64>,
}

/// Resolved instruction set handed to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
	/// Filter predicates grouped by operation.
	pub predicates: Predicates,
	/// Order instruction.
	pub order: OrderExpr,
	/// Pagination window.
	pub window: Window,
}

impl QueryPlan {
	/// Builds the full plan from a decoded intent.
	///
	/// # Errors
	///
	/// - [`QueryError::UnknownColumn`] when the intent references a
	///   position the schema does not declare (for searching or ordering);
	/// - [`QueryError::UnknownFilter`] when a searched column carries no
	///   filter specification;
	/// - [`QueryError::UnorderableColumn`] when the order column carries no
	///   order key (normally caught already at decode time).
	pub fn build(intent: &QueryIntent, schema: &ColumnSchema) -> QueryResult<Self> {
		Ok(Self {
			predicates: Self::build_predicates(intent, schema)?,
			order: Self::resolve_order(intent, schema)?,
			window: Self::resolve_window(intent),
		})
	}

	/// Resolves the intent's sparse search map into filter predicates.
	pub fn build_predicates(
		intent: &QueryIntent,
		schema: &ColumnSchema,
	) -> QueryResult<Predicates> {
		let mut predicates = Predicates::new();
		for (&position, value) in &intent.search {
			let column = schema
				.descriptor(position)
				.ok_or(QueryError::UnknownColumn { position })?;
			let spec = column
				.filter_spec
				.as_ref()
				.ok_or(QueryError::UnknownFilter { position })?;
			predicates
				.entry(spec.operation().to_string())
				.or_default()
				.insert(spec.field().to_string(), value.clone());
		}
		Ok(predicates)
	}

	/// Resolves the order column and direction into an [`OrderExpr`].
	pub fn resolve_order(intent: &QueryIntent, schema: &ColumnSchema) -> QueryResult<OrderExpr> {
		let position = intent.order_position;
		let column = schema
			.descriptor(position)
			.ok_or(QueryError::UnknownColumn { position })?;
		let key = column
			.order_key
			.as_deref()
			.ok_or(QueryError::UnorderableColumn { position })?;
		Ok(OrderExpr {
			key: key.to_string(),
			direction: intent.direction,
		})
	}

	/// Computes the pagination window; negative lengths mean unbounded.
	pub fn resolve_window(intent: &QueryIntent) -> Window {
		Window {
			start: intent.start,
			length: if intent.length < 0 {
				None
			} else {
				Some(intent.length as u64)
			},
		}
	}
}

/// Runs a plan against a repository.
///
/// Pipeline: pre-condition → `total` count → user predicates → `count` →
/// order → slice. The two counts may diverge if the collection mutates
/// between them; no snapshot isolation is assumed.
///
/// # Errors
///
/// [`QueryError::InvalidOperation`] when a pre-condition or filter
/// specification names an operation the repository does not expose (a
/// configuration bug), or any error the repository itself raises.
pub async fn apply_plan<R: Repository>(
	repo: R,
	plan: &QueryPlan,
	pre_condition: Option<&PreCondition>,
	draw: u64,
) -> QueryResult<Page<R::Record>> {
	let mut repo = repo;
	if let Some(pre_condition) = pre_condition {
		for (operation, args) in pre_condition {
			repo = repo.apply(operation, args)?;
		}
	}
	let total = repo.count().await?;

	for (operation, kwargs) in &plan.predicates {
		repo = repo.apply(operation, &OperationArgs::Keyword(kwargs.clone()))?;
	}
	let count = repo.count().await?;

	let repo = repo.order_by(&plan.order);
	let items = repo.slice(&plan.window).await?;

	tracing::debug!(
		total,
		count,
		returned = items.len(),
		order = %plan.order,
		"applied query plan"
	);

	Ok(Page {
		items,
		count,
		total,
		draw,
	})
}
