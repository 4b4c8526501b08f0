//! Table frame descriptor: the declarative, framework-agnostic shape handed
//! to presentation layers for the initial page render.
//!
//! Pure data assembly; no filtering or ordering logic lives here.

use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDescriptor, ColumnSchema, FilterKind};

/// Where the per-column search widgets are placed relative to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchArea {
	/// No search widgets at all.
	#[default]
	None,
	/// Widgets rendered in the table header.
	Header,
	/// Widgets rendered in the table footer.
	Footer,
	/// Widgets rendered in a caller-provided container.
	Custom,
}

/// Display metadata of one column, extracted from its descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameColumn {
	/// Identifier of the column's search widget.
	pub id: String,
	/// Header text.
	pub header: String,
	/// Key used to extract this column's value from a serialized row.
	pub serializer_key: Option<String>,
	/// Whether the column accepts search input.
	pub searchable: bool,
	/// Whether the column can be ordered by.
	pub orderable: bool,
	/// Kind of search widget.
	pub filter_kind: FilterKind,
	/// Placeholder text of the search widget, if any.
	pub placeholder: Option<String>,
}

impl From<&ColumnDescriptor> for FrameColumn {
	fn from(column: &ColumnDescriptor) -> Self {
		Self {
			id: column.id.clone(),
			header: column.header.clone(),
			serializer_key: column.serializer_key.clone(),
			searchable: column.searchable,
			orderable: column.orderable,
			filter_kind: column.filter_kind,
			placeholder: column.placeholder.clone(),
		}
	}
}

/// Declarative table shape for the initial page render.
///
/// The filter form, when configured, is carried opaquely: populating choice
/// fields is the responsibility of an external form layer, and the frame
/// only passes its serialized descriptor through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFrame {
	/// HTML id of the table.
	pub id: String,
	/// Columns in declaration order.
	pub columns: Vec<FrameColumn>,
	/// Placement of the search widgets.
	pub search_area: SearchArea,
	/// Opaque filter-form descriptor, if one is configured.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub filter_form: Option<serde_json::Value>,
}

impl TableFrame {
	/// Assembles the frame from a schema's display metadata.
	pub fn from_schema(
		id: impl Into<String>,
		schema: &ColumnSchema,
		search_area: SearchArea,
		filter_form: Option<serde_json::Value>,
	) -> Self {
		Self {
			id: id.into(),
			columns: schema.iter().map(FrameColumn::from).collect(),
			search_area,
			filter_form,
		}
	}
}
