//! Wire-protocol decoder: from the flat DataTables payload to a normalized
//! [`QueryIntent`].
//!
//! The decoder owns exactly one schema-level validation: a request that
//! orders by a column the schema marks non-orderable is rejected here, never
//! silently redirected to another column. Column positions the schema does
//! not declare are passed through untouched and rejected later by the plan
//! builder.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::schema::ColumnSchema;
use crate::wire::{WireQuery, coerce};

/// Wire keys for the table-level parameters.
const DRAW: &str = "draw";
const TOTAL_COLS: &str = "total_cols";
const LENGTH: &str = "length";
const START: &str = "start";
const ORDER_COLUMN: &str = "order[0][column]";
const ORDER_DIR: &str = "order[0][dir]";

fn searchable_key(position: u32) -> String {
	format!("columns[{position}][searchable]")
}

fn search_value_key(position: u32) -> String {
	format!("columns[{position}][search][value]")
}

/// Requested sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
	/// Ascending order (the wire default).
	#[default]
	Ascending,
	/// Descending order.
	Descending,
}

impl OrderDirection {
	/// Parses the wire token; `"desc"` selects descending, anything else
	/// falls back to ascending.
	pub fn from_wire(token: &str) -> Self {
		if token.trim() == "desc" {
			OrderDirection::Descending
		} else {
			OrderDirection::Ascending
		}
	}

	/// Prefix consumed by the repository's order-by contract: `"-"` for
	/// descending, empty for ascending.
	pub fn prefix(&self) -> &'static str {
		match self {
			OrderDirection::Ascending => "",
			OrderDirection::Descending => "-",
		}
	}
}

/// Decoded, normalized request.
///
/// All scalars carry documented defaults so a sparse payload still decodes;
/// the search map is sparse and only holds trimmed, non-empty values for
/// columns the request (and the schema) mark searchable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryIntent {
	/// Opaque token echoed back to the client (default 0).
	pub draw: u64,
	/// Column count declared by the caller (default 0).
	pub total_cols: u32,
	/// Page length; any negative value means "all records" (default 0).
	pub length: i64,
	/// Page start offset (default 0).
	pub start: u64,
	/// Wire position of the column to order by (default: the schema's
	/// first position).
	pub order_position: u32,
	/// Requested sort direction (default ascending).
	pub direction: OrderDirection,
	/// Column position → trimmed, non-empty search string.
	pub search: IndexMap<u32, String>,
}

/// Decodes the flat wire payload against a schema.
///
/// # Errors
///
/// [`QueryError::UnorderableColumn`] when the requested order position
/// addresses a declared column whose descriptor forbids ordering.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::decode::decode;
/// use reinhardt_datatables::schema::{ColumnDescriptor, ColumnSchema};
/// use reinhardt_datatables::wire::WireQuery;
///
/// let schema = ColumnSchema::new(vec![
///     ColumnDescriptor::new(1, "id", "ID").order_key("id").orderable(true),
/// ])?;
/// let query = WireQuery::from_pairs([("draw", "2"), ("total_cols", "1")]);
/// let intent = decode(&query, &schema)?;
/// assert_eq!(intent.draw, 2);
/// assert_eq!(intent.order_position, 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(query: &WireQuery, schema: &ColumnSchema) -> QueryResult<QueryIntent> {
	let draw = coerce(query.first(DRAW), 0u64);
	let total_cols = coerce(query.first(TOTAL_COLS), 0u32);
	let length = coerce(query.first(LENGTH), 0i64);
	let start = coerce(query.first(START), 0u64);
	let order_position = coerce(query.first(ORDER_COLUMN), schema.first_position());
	let direction = OrderDirection::from_wire(query.first(ORDER_DIR).unwrap_or("asc"));

	// Illegal ordering is a hard error; falling back to the default column
	// would mask a client bug. Unknown order positions are left for the
	// plan builder to reject.
	if let Some(column) = schema.descriptor(order_position) {
		if !column.orderable {
			return Err(QueryError::UnorderableColumn {
				position: order_position,
			});
		}
	}

	let mut search = IndexMap::new();
	for position in schema.first_position()..total_cols {
		if query.first(&searchable_key(position)) != Some("true") {
			continue;
		}
		let value = query
			.first(&search_value_key(position))
			.unwrap_or("")
			.trim();
		if value.is_empty() {
			continue;
		}
		// The schema can veto a search the request claims is allowed.
		// Positions the schema does not declare stay in the map and fail
		// at plan build with an unknown-column error.
		if let Some(column) = schema.descriptor(position) {
			if !column.searchable {
				continue;
			}
		}
		search.insert(position, value.to_string());
	}

	tracing::debug!(
		draw,
		total_cols,
		start,
		length,
		order_position,
		searched_columns = search.len(),
		"decoded datatables request"
	);

	Ok(QueryIntent {
		draw,
		total_cols,
		length,
		start,
		order_position,
		direction,
		search,
	})
}
