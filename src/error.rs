//! Error types for schema construction and request processing.
//!
//! The two enums mirror the two failure classes of server-side table
//! processing: [`SchemaError`] is raised once, while a table definition is
//! being constructed, and aborts registration of the table entirely.
//! [`QueryError`] is raised per request and rejects only that request.

use thiserror::Error;

/// Result type for per-request query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while constructing a column schema or table definition.
///
/// These are configuration errors: they fire at definition time, before any
/// request is served, and a malformed table is never partially registered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
	/// The column schema contains no descriptors.
	#[error("column schema must contain at least one column")]
	EmptySchema,

	/// Two descriptors declare the same wire position.
	#[error("duplicate column position: {0}")]
	DuplicatePosition(u32),

	/// A descriptor is marked orderable but carries no order key.
	#[error("column at position {0} is orderable but has no order key")]
	MissingOrderKey(u32),

	/// A required table-definition attribute was not supplied.
	#[error("table definition attribute '{0}' must be set")]
	MissingAttribute(&'static str),
}

/// Errors raised while decoding a request or applying a query plan.
///
/// Most variants reject the offending request only. The variants flagged by
/// [`QueryError::is_configuration_error`] indicate a defect in the table
/// definition or the repository wiring rather than bad client input, and
/// transports should surface them as server-side failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
	/// Ordering was requested on a column whose descriptor forbids it.
	///
	/// This is never silently corrected to another column.
	#[error("column at position {position} is not orderable")]
	UnorderableColumn {
		/// Wire position of the offending column.
		position: u32,
	},

	/// A request referenced a column position the schema does not declare.
	#[error("unknown column position: {position}")]
	UnknownColumn {
		/// Wire position the request referenced.
		position: u32,
	},

	/// A search value arrived for a column that has no filter specification.
	#[error("column at position {position} has no filter specification")]
	UnknownFilter {
		/// Wire position of the offending column.
		position: u32,
	},

	/// A filter specification named an operation the repository does not expose.
	#[error("invalid repository operation: {operation}")]
	InvalidOperation {
		/// Name of the missing operation.
		operation: String,
	},

	/// The repository failed while counting, filtering or slicing.
	#[error("repository error: {0}")]
	Repository(String),
}

impl QueryError {
	/// Returns `true` when the error indicates a configuration defect
	/// (a 5xx-equivalent) rather than invalid client input.
	///
	/// [`QueryError::InvalidOperation`] and [`QueryError::UnknownFilter`]
	/// mean the table definition or the repository wiring is wrong; the
	/// remaining variants are caused by the request itself or by the
	/// backend at runtime.
	pub fn is_configuration_error(&self) -> bool {
		matches!(
			self,
			QueryError::InvalidOperation { .. } | QueryError::UnknownFilter { .. }
		)
	}
}
