//! Table definition and the request-processing pipeline.
//!
//! [`DataTable`] is the explicit-struct equivalent of a Django
//! `DataTables.Meta` declaration: it binds a validated column schema to a
//! serializer and the presentation metadata, once, at startup. Per-request
//! work flows through [`DataTable::process`].

use crate::decode::decode;
use crate::error::{QueryResult, SchemaError};
use crate::frame::{SearchArea, TableFrame};
use crate::plan::{QueryPlan, apply_plan};
use crate::repository::{PreCondition, Repository};
use crate::response::ResponseEnvelope;
use crate::schema::ColumnSchema;
use crate::serializer::RecordSerializer;
use crate::wire::WireQuery;

/// A fully configured server-side table.
///
/// Immutable after construction; safe to share across concurrent requests.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::schema::{ColumnDescriptor, ColumnSchema};
/// use reinhardt_datatables::serializer::JsonSerializer;
/// use reinhardt_datatables::table::DataTable;
///
/// #[derive(serde::Serialize)]
/// struct Book {
///     id: i64,
///     name: String,
/// }
///
/// let schema = ColumnSchema::new(vec![
///     ColumnDescriptor::new(1, "id", "ID").order_key("id").orderable(true),
///     ColumnDescriptor::new(2, "name", "Name").filter_field("name__icontains"),
/// ])?;
/// let table = DataTable::builder()
///     .id("books")
///     .schema(schema)
///     .serializer(JsonSerializer::<Book>::new())
///     .build()?;
/// assert_eq!(table.table_frame().columns.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct DataTable<S> {
	id: String,
	schema: ColumnSchema,
	serializer: S,
	search_area: SearchArea,
	filter_form: Option<serde_json::Value>,
}

/// Builder for [`DataTable`].
///
/// `id`, `schema` and `serializer` are required; `search_area` defaults to
/// [`SearchArea::None`] and the filter form is optional.
#[derive(Debug)]
pub struct DataTableBuilder<S> {
	id: Option<String>,
	schema: Option<ColumnSchema>,
	serializer: Option<S>,
	search_area: SearchArea,
	filter_form: Option<serde_json::Value>,
}

impl<S> Default for DataTableBuilder<S> {
	fn default() -> Self {
		Self {
			id: None,
			schema: None,
			serializer: None,
			search_area: SearchArea::default(),
			filter_form: None,
		}
	}
}

impl<S> DataTableBuilder<S> {
	/// Sets the HTML id of the table.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Sets the validated column schema.
	pub fn schema(mut self, schema: ColumnSchema) -> Self {
		self.schema = Some(schema);
		self
	}

	/// Sets the record serializer.
	pub fn serializer(mut self, serializer: S) -> Self {
		self.serializer = Some(serializer);
		self
	}

	/// Sets the placement of the search widgets.
	pub fn search_area(mut self, search_area: SearchArea) -> Self {
		self.search_area = search_area;
		self
	}

	/// Attaches an opaque filter-form descriptor.
	pub fn filter_form(mut self, filter_form: serde_json::Value) -> Self {
		self.filter_form = Some(filter_form);
		self
	}

	/// Finalizes the table definition.
	///
	/// # Errors
	///
	/// [`SchemaError::MissingAttribute`] when `id`, `schema` or
	/// `serializer` was not supplied.
	pub fn build(self) -> Result<DataTable<S>, SchemaError> {
		Ok(DataTable {
			id: self.id.ok_or(SchemaError::MissingAttribute("id"))?,
			schema: self.schema.ok_or(SchemaError::MissingAttribute("schema"))?,
			serializer: self
				.serializer
				.ok_or(SchemaError::MissingAttribute("serializer"))?,
			search_area: self.search_area,
			filter_form: self.filter_form,
		})
	}
}

impl<S> DataTable<S> {
	/// Starts building a table definition.
	pub fn builder() -> DataTableBuilder<S> {
		DataTableBuilder::default()
	}

	/// The table's column schema.
	pub fn schema(&self) -> &ColumnSchema {
		&self.schema
	}

	/// Assembles the presentation frame for the initial page render.
	pub fn table_frame(&self) -> TableFrame {
		TableFrame::from_schema(
			&self.id,
			&self.schema,
			self.search_area,
			self.filter_form.clone(),
		)
	}
}

impl<S: RecordSerializer> DataTable<S> {
	/// Processes one wire request against a repository.
	///
	/// Pipeline: decode → plan → apply (pre-condition, counts, filters,
	/// order, window) → serialize → envelope. The draw token is echoed
	/// verbatim.
	///
	/// # Errors
	///
	/// Any [`crate::QueryError`] from decoding or plan application; use
	/// [`crate::QueryError::is_configuration_error`] to pick the response
	/// status, or [`DataTable::process_or_reject`] to fold errors into the
	/// standard rejected envelope.
	pub async fn process<R>(
		&self,
		repo: R,
		query: &WireQuery,
		pre_condition: Option<&PreCondition>,
	) -> QueryResult<ResponseEnvelope>
	where
		R: Repository<Record = S::Record>,
	{
		let intent = decode(query, &self.schema)?;
		let plan = QueryPlan::build(&intent, &self.schema)?;
		let page = apply_plan(repo, &plan, pre_condition, intent.draw).await?;
		let data = self.serializer.serialize_many(&page.items);
		Ok(ResponseEnvelope::new(page.draw, data, page.total, page.count))
	}

	/// Like [`DataTable::process`], but folds failures into the rejected
	/// envelope instead of returning them.
	pub async fn process_or_reject<R>(
		&self,
		repo: R,
		query: &WireQuery,
		pre_condition: Option<&PreCondition>,
	) -> ResponseEnvelope
	where
		R: Repository<Record = S::Record>,
	{
		match self.process(repo, query, pre_condition).await {
			Ok(envelope) => envelope,
			Err(error) => {
				tracing::debug!(%error, "rejecting datatables request");
				ResponseEnvelope::rejected(&error)
			}
		}
	}
}
