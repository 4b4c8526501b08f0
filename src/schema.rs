//! Declarative column schema: descriptors, filter specifications and the
//! validated position-indexed lookup.
//!
//! A [`ColumnSchema`] is constructed once, at table-definition time, and is
//! immutable afterwards; all structural rules are enforced eagerly by
//! [`ColumnSchema::new`] so a malformed table fails before any request is
//! served.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// How a column's search box value maps to a repository operation.
///
/// This replaces the loose "string or 2-tuple" convention with an explicit
/// two-variant type, so malformed filter declarations cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterSpec {
	/// Apply the search value under the default `filter` operation, keyed
	/// by the given field path (e.g. `name__icontains`).
	Field(String),
	/// Apply the search value under a caller-named repository operation
	/// (e.g. a custom manager method), keyed by `field`.
	Custom {
		/// Name of the repository operation to invoke.
		operation: String,
		/// Keyword-argument name the search value is passed under.
		field: String,
	},
}

impl FilterSpec {
	/// Name of the synthetic default filter operation.
	pub const DEFAULT_OPERATION: &'static str = "filter";

	/// Repository operation this specification targets.
	pub fn operation(&self) -> &str {
		match self {
			FilterSpec::Field(_) => Self::DEFAULT_OPERATION,
			FilterSpec::Custom { operation, .. } => operation,
		}
	}

	/// Keyword-argument name the search value is applied under.
	pub fn field(&self) -> &str {
		match self {
			FilterSpec::Field(field) => field,
			FilterSpec::Custom { field, .. } => field,
		}
	}
}

/// Kind of search widget rendered for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
	/// No search widget.
	#[default]
	None,
	/// Free-text input box.
	Input,
	/// Choice dropdown, populated by an external form.
	Select,
}

/// Declarative description of one table column.
///
/// The wire `position` plus `order_key`/`filter_spec` drive query
/// translation; the remaining fields are display metadata passed through to
/// the presentation layer unmodified.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::schema::{ColumnDescriptor, FilterKind};
///
/// let column = ColumnDescriptor::new(2, "name", "Name")
///     .order_key("name")
///     .orderable(true)
///     .filter_field("name__icontains")
///     .filter_kind(FilterKind::Input);
///
/// assert_eq!(column.position, 2);
/// assert!(column.searchable);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDescriptor {
	/// Wire position of this column (unique within a schema).
	pub position: u32,
	/// Identifier used for the column's search widget in the rendered frame.
	pub id: String,
	/// Header text displayed for this column.
	pub header: String,
	/// Key used to extract this column's value from a serialized row.
	pub serializer_key: Option<String>,
	/// Field path used to order the collection by this column, if any.
	pub order_key: Option<String>,
	/// Filter specification for this column's search box, if any.
	pub filter_spec: Option<FilterSpec>,
	/// Whether incoming search values for this column are honored.
	pub searchable: bool,
	/// Whether ordering by this column is allowed.
	pub orderable: bool,
	/// Kind of search widget rendered for this column.
	pub filter_kind: FilterKind,
	/// Placeholder text of this column's search widget, if any.
	pub placeholder: Option<String>,
}

impl ColumnDescriptor {
	/// Creates a descriptor at the given wire position.
	///
	/// The column starts out neither searchable nor orderable and with no
	/// search widget; chain the builder methods to opt in.
	pub fn new(position: u32, id: impl Into<String>, header: impl Into<String>) -> Self {
		Self {
			position,
			id: id.into(),
			header: header.into(),
			serializer_key: None,
			order_key: None,
			filter_spec: None,
			searchable: false,
			orderable: false,
			filter_kind: FilterKind::None,
			placeholder: None,
		}
	}

	/// Sets the key used to extract this column's value from a serialized row.
	pub fn serializer_key(mut self, key: impl Into<String>) -> Self {
		self.serializer_key = Some(key.into());
		self
	}

	/// Sets the field path used to order the collection by this column.
	pub fn order_key(mut self, key: impl Into<String>) -> Self {
		self.order_key = Some(key.into());
		self
	}

	/// Sets whether ordering by this column is allowed.
	///
	/// An orderable column must also carry an order key; the schema
	/// constructor rejects `orderable` without one.
	pub fn orderable(mut self, orderable: bool) -> Self {
		self.orderable = orderable;
		self
	}

	/// Maps this column's search box to the default filter operation on
	/// `field`, and marks the column searchable.
	pub fn filter_field(mut self, field: impl Into<String>) -> Self {
		self.filter_spec = Some(FilterSpec::Field(field.into()));
		self.searchable = true;
		self
	}

	/// Maps this column's search box to a custom repository operation, and
	/// marks the column searchable.
	pub fn filter_operation(
		mut self,
		operation: impl Into<String>,
		field: impl Into<String>,
	) -> Self {
		self.filter_spec = Some(FilterSpec::Custom {
			operation: operation.into(),
			field: field.into(),
		});
		self.searchable = true;
		self
	}

	/// Overrides whether incoming search values for this column are honored.
	pub fn searchable(mut self, searchable: bool) -> Self {
		self.searchable = searchable;
		self
	}

	/// Sets the kind of search widget rendered for this column.
	pub fn filter_kind(mut self, kind: FilterKind) -> Self {
		self.filter_kind = kind;
		self
	}

	/// Sets the placeholder text of this column's search widget.
	pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self
	}
}

/// Validated, immutable set of column descriptors with position lookup.
///
/// Column numbering may start at 0 or at 1; the lowest declared position is
/// authoritative and is what the request decoder iterates from. The schema
/// never mutates after construction, so it is safe to share across threads
/// without synchronization.
#[derive(Debug, Clone)]
pub struct ColumnSchema {
	columns: Vec<ColumnDescriptor>,
	by_position: BTreeMap<u32, usize>,
	first_position: u32,
}

impl ColumnSchema {
	/// Validates the descriptors and builds the schema.
	///
	/// # Errors
	///
	/// - [`SchemaError::EmptySchema`] when no descriptor is supplied;
	/// - [`SchemaError::DuplicatePosition`] when two descriptors share a
	///   wire position;
	/// - [`SchemaError::MissingOrderKey`] when an orderable descriptor has
	///   no (or an empty) order key.
	pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, SchemaError> {
		if columns.is_empty() {
			return Err(SchemaError::EmptySchema);
		}
		let mut by_position = BTreeMap::new();
		for (index, column) in columns.iter().enumerate() {
			if by_position.insert(column.position, index).is_some() {
				return Err(SchemaError::DuplicatePosition(column.position));
			}
			if column.orderable && column.order_key.as_deref().unwrap_or("").is_empty() {
				return Err(SchemaError::MissingOrderKey(column.position));
			}
		}
		let first_position = by_position.keys().next().copied().unwrap_or(0);
		Ok(Self {
			columns,
			by_position,
			first_position,
		})
	}

	/// Looks up the descriptor at a wire position.
	pub fn descriptor(&self, position: u32) -> Option<&ColumnDescriptor> {
		self.by_position
			.get(&position)
			.map(|&index| &self.columns[index])
	}

	/// Lowest declared wire position (schemas may number from 0 or 1).
	pub fn first_position(&self) -> u32 {
		self.first_position
	}

	/// Declared wire positions in ascending order.
	pub fn positions(&self) -> impl Iterator<Item = u32> + '_ {
		self.by_position.keys().copied()
	}

	/// Descriptors in declaration order, for presentation.
	pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor> {
		self.columns.iter()
	}

	/// Number of columns in the schema.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	/// Whether the schema has no columns (never true for a constructed schema).
	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rejects_empty_schema() {
		assert!(matches!(
			ColumnSchema::new(Vec::new()),
			Err(SchemaError::EmptySchema)
		));
	}

	#[test]
	fn rejects_duplicate_positions() {
		let columns = vec![
			ColumnDescriptor::new(1, "id", "ID"),
			ColumnDescriptor::new(1, "name", "Name"),
		];
		assert!(matches!(
			ColumnSchema::new(columns),
			Err(SchemaError::DuplicatePosition(1))
		));
	}

	#[test]
	fn rejects_orderable_column_without_order_key() {
		let columns = vec![ColumnDescriptor::new(1, "id", "ID").orderable(true)];
		assert!(matches!(
			ColumnSchema::new(columns),
			Err(SchemaError::MissingOrderKey(1))
		));
	}

	#[test]
	fn rejects_orderable_column_with_empty_order_key() {
		let columns = vec![
			ColumnDescriptor::new(1, "id", "ID")
				.order_key("")
				.orderable(true),
		];
		assert!(matches!(
			ColumnSchema::new(columns),
			Err(SchemaError::MissingOrderKey(1))
		));
	}

	#[test]
	fn first_position_is_lowest_declared() {
		let columns = vec![
			ColumnDescriptor::new(3, "c", "C"),
			ColumnDescriptor::new(1, "a", "A"),
			ColumnDescriptor::new(2, "b", "B"),
		];
		let schema = ColumnSchema::new(columns).unwrap();
		assert_eq!(schema.first_position(), 1);
		assert_eq!(schema.positions().collect::<Vec<_>>(), vec![1, 2, 3]);
	}

	#[test]
	fn iteration_preserves_declaration_order() {
		let columns = vec![
			ColumnDescriptor::new(2, "b", "B"),
			ColumnDescriptor::new(1, "a", "A"),
		];
		let schema = ColumnSchema::new(columns).unwrap();
		let ids: Vec<_> = schema.iter().map(|c| c.id.clone()).collect();
		assert_eq!(ids, vec!["b", "a"]);
	}

	#[test]
	fn filter_spec_resolves_operation_and_field() {
		let default = FilterSpec::Field("name__icontains".to_string());
		assert_eq!(default.operation(), "filter");
		assert_eq!(default.field(), "name__icontains");

		let custom = FilterSpec::Custom {
			operation: "by_nationality".to_string(),
			field: "code".to_string(),
		};
		assert_eq!(custom.operation(), "by_nationality");
		assert_eq!(custom.field(), "code");
	}

	#[test]
	fn filter_field_marks_column_searchable() {
		let column = ColumnDescriptor::new(2, "name", "Name").filter_field("name__icontains");
		assert!(column.searchable);
		assert_eq!(
			column.filter_spec.as_ref().unwrap().field(),
			"name__icontains"
		);
	}
}
