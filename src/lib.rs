//! Server-side DataTables processing for Reinhardt
//!
//! This crate implements the server side of the DataTables wire protocol:
//! it decodes the flat, index-keyed request a browser-side grid submits,
//! translates it into a structured query plan (filter predicates, an order
//! expression and a pagination window) against a declarative column schema,
//! runs the plan through an abstract repository and assembles the JSON
//! envelope the grid consumes.
//!
//! # Features
//!
//! - **Column Schema**: Declarative, validated-at-startup column mapping
//!   (wire position → order key → filter specification)
//! - **Decoding**: Typed extraction of the flat `columns[i][...]` payload
//!   with best-effort coercion of untrusted scalars
//! - **Query Plans**: Accumulating filter predicates, direction-prefixed
//!   order expressions, offset/limit windows (`length = -1` returns all)
//! - **Collaborator Seams**: Async [`Repository`] for count/filter/order/
//!   slice, [`RecordSerializer`] for row documents
//! - **Presentation**: Read-only [`TableFrame`] descriptor with opaque
//!   filter-form passthrough
//!
//! # Architecture
//!
//! ```mermaid
//! graph LR
//!     A[WireQuery] --> B[decode]
//!     B --> C[QueryIntent]
//!     C --> D[QueryPlan]
//!     S[ColumnSchema] --> B
//!     S --> D
//!     D --> E[Repository]
//!     E --> F[RecordSerializer]
//!     F --> G[ResponseEnvelope]
//! ```
//!
//! # Example
//!
//! ```rust
//! use reinhardt_datatables::schema::{ColumnDescriptor, ColumnSchema};
//!
//! let schema = ColumnSchema::new(vec![
//!     ColumnDescriptor::new(1, "id", "ID").order_key("id").orderable(true),
//!     ColumnDescriptor::new(2, "name", "Name").filter_field("name__icontains"),
//! ])?;
//! assert_eq!(schema.first_position(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod decode;
pub mod error;
pub mod frame;
pub mod plan;
pub mod repository;
pub mod response;
pub mod schema;
pub mod serializer;
pub mod table;
pub mod wire;

// Re-exports for convenience
pub use decode::{OrderDirection, QueryIntent, decode};
pub use error::{QueryError, QueryResult, SchemaError};
pub use frame::{FrameColumn, SearchArea, TableFrame};
pub use plan::{OrderExpr, Predicates, QueryPlan, Window, apply_plan};
pub use repository::{OperationArgs, Page, PreCondition, Repository};
pub use response::ResponseEnvelope;
pub use schema::{ColumnDescriptor, ColumnSchema, FilterKind, FilterSpec};
pub use serializer::{JsonSerializer, RecordSerializer};
pub use table::{DataTable, DataTableBuilder};
pub use wire::WireQuery;
