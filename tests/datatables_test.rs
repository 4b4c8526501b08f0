
use fixtures::{Book, MemoryRepository, book_schema, repository, sample_books};
use indexmap::indexmap;
use reinhardt_datatables::error::QueryError;
use reinhardt_datatables::repository::{OperationArgs, PreCondition};
use reinhardt_datatables::schema::{ColumnDescriptor, ColumnSchema};
use reinhardt_datatables::serializer::JsonSerializer;
use reinhardt_datatables::table::DataTable;
use reinhardt_datatables::wire::WireQuery;
use rstest::*;

fn book_table(schema: ColumnSchema) -> DataTable<JsonSerializer<Book>> {
	DataTable::builder()
		.id("books")
		.schema(schema)
		.serializer(JsonSerializer::new())
		.build()
		.unwrap()
}

/// The five columns the client renders: an actions column at position 0
/// plus the four data columns of the schema.
const TOTAL_COLS: &str = "5";

#[rstest]
#[tokio::test]
async fn unfiltered_request_returns_first_page(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("draw", "1"),
		("total_cols", TOTAL_COLS),
		("length", "3"),
		("start", "0"),
	]);
	let envelope = table.process(repository, &query, None).await.unwrap();

	assert_eq!(envelope.draw, 1);
	assert_eq!(envelope.records_total, 5);
	assert_eq!(envelope.records_filtered, 5);
	assert_eq!(envelope.data.len(), 3);
	assert_eq!(envelope.data[0]["id"], 1);
	assert!(envelope.error.is_none());
}

#[rstest]
#[tokio::test]
async fn search_filters_and_counts(book_schema: ColumnSchema, repository: MemoryRepository) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("draw", "2"),
		("total_cols", TOTAL_COLS),
		("length", "10"),
		("columns[2][searchable]", "true"),
		("columns[2][search][value]", " widget "),
	]);
	let envelope = table.process(repository, &query, None).await.unwrap();

	assert_eq!(envelope.records_total, 5);
	assert_eq!(envelope.records_filtered, 1);
	assert_eq!(envelope.data.len(), 1);
	assert_eq!(envelope.data[0]["name"], "The Magic Widget");
}

#[rstest]
#[tokio::test]
async fn custom_operation_filters_by_nationality(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("total_cols", TOTAL_COLS),
		("length", "10"),
		("columns[4][searchable]", "true"),
		("columns[4][search][value]", "DE"),
	]);
	let envelope = table.process(repository, &query, None).await.unwrap();

	assert_eq!(envelope.records_filtered, 2);
	assert_eq!(envelope.data[0]["nationality"], "DE");
	assert_eq!(envelope.data[1]["nationality"], "DE");
}

#[rstest]
#[tokio::test]
async fn descending_order_reverses_the_page(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("total_cols", TOTAL_COLS),
		("length", "2"),
		("order[0][column]", "1"),
		("order[0][dir]", "desc"),
	]);
	let envelope = table.process(repository, &query, None).await.unwrap();

	assert_eq!(envelope.data[0]["id"], 5);
	assert_eq!(envelope.data[1]["id"], 4);
}

#[rstest]
#[tokio::test]
async fn negative_length_returns_everything_from_start(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("total_cols", TOTAL_COLS),
		("length", "-1"),
		("start", "2"),
	]);
	let envelope = table.process(repository, &query, None).await.unwrap();

	assert_eq!(envelope.records_filtered, 5);
	assert_eq!(envelope.data.len(), 3);
	assert_eq!(envelope.data[0]["id"], 3);
}

#[rstest]
#[tokio::test]
async fn window_beyond_the_collection_yields_an_empty_page(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("total_cols", TOTAL_COLS),
		("length", "10"),
		("start", "20"),
	]);
	let envelope = table.process(repository, &query, None).await.unwrap();

	assert!(envelope.data.is_empty());
	assert_eq!(envelope.records_filtered, 5);
	assert_eq!(envelope.records_total, 5);
}

#[rstest]
#[tokio::test]
async fn pre_condition_narrows_the_total(book_schema: ColumnSchema, sample_books: Vec<Book>) {
	// A real backend would join here; the in-memory stand-in accepts the
	// operation and the user filter still applies afterwards.
	let pre: PreCondition = indexmap! {
		"select_related".to_string() => OperationArgs::Single("author".to_string()),
	};
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("total_cols", TOTAL_COLS),
		("length", "10"),
		("columns[3][searchable]", "true"),
		("columns[3][search][value]", "mann"),
	]);
	let envelope = table
		.process(MemoryRepository::new(sample_books), &query, Some(&pre))
		.await
		.unwrap();

	assert_eq!(envelope.records_total, 5);
	assert_eq!(envelope.records_filtered, 1);
	assert_eq!(envelope.data[0]["author"], "Thomas Mann");
}

#[rstest]
#[tokio::test]
async fn unknown_pre_condition_operation_is_a_configuration_error(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	let pre: PreCondition = indexmap! {
		"prefetch_everything".to_string() => OperationArgs::Single("author".to_string()),
	};
	let table = book_table(book_schema);
	let err = table
		.process(repository, &WireQuery::new(), Some(&pre))
		.await
		.unwrap_err();

	assert!(matches!(err, QueryError::InvalidOperation { .. }));
	assert!(err.is_configuration_error());
}

#[rstest]
#[tokio::test]
async fn ordering_by_unorderable_column_rejects_the_request(
	book_schema: ColumnSchema,
	repository: MemoryRepository,
) {
	// Position 4 (nationality) declares no ordering.
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([
		("draw", "9"),
		("total_cols", TOTAL_COLS),
		("order[0][column]", "4"),
	]);
	let envelope = table.process_or_reject(repository, &query, None).await;

	assert_eq!(envelope.draw, 0);
	assert!(envelope.data.is_empty());
	assert_eq!(envelope.records_total, 0);
	assert_eq!(envelope.records_filtered, 0);
	assert_eq!(
		envelope.error.as_deref(),
		Some("column at position 4 is not orderable")
	);
}

#[rstest]
#[tokio::test]
async fn search_on_unknown_position_rejects_the_request(repository: MemoryRepository) {
	// Schema only declares positions 1-2; the request searches position 3.
	let schema = ColumnSchema::new(vec![
		ColumnDescriptor::new(1, "id", "ID").order_key("id").orderable(true),
		ColumnDescriptor::new(2, "name", "Name").filter_field("name__icontains"),
	])
	.unwrap();
	let table = book_table(schema);
	let query = WireQuery::from_pairs([
		("total_cols", "4"),
		("columns[3][searchable]", "true"),
		("columns[3][search][value]", "widget"),
	]);
	let envelope = table.process_or_reject(repository, &query, None).await;

	assert!(envelope.data.is_empty());
	assert_eq!(envelope.records_total, 0);
	assert_eq!(envelope.error.as_deref(), Some("unknown column position: 3"));
}

#[rstest]
#[tokio::test]
async fn draw_token_is_echoed_verbatim(book_schema: ColumnSchema, repository: MemoryRepository) {
	let table = book_table(book_schema);
	let query = WireQuery::from_pairs([("draw", "12345"), ("total_cols", TOTAL_COLS)]);
	let envelope = table.process(repository, &query, None).await.unwrap();
	assert_eq!(envelope.draw, 12345);
}
