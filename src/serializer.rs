//! Record serialization seam.
//!
//! Serializing a record into the wire document is delegated to the
//! surrounding application; the pipeline only needs a mapping from record
//! to JSON value. [`JsonSerializer`] covers the common case of records that
//! already implement [`serde::Serialize`].

use std::marker::PhantomData;

use serde::Serialize;

/// Maps repository records to JSON documents for the response envelope.
pub trait RecordSerializer {
	/// Record type this serializer accepts.
	type Record;

	/// Serializes one record to a JSON document.
	fn serialize(&self, record: &Self::Record) -> serde_json::Value;

	/// Serializes a page of records in order.
	fn serialize_many(&self, records: &[Self::Record]) -> Vec<serde_json::Value> {
		records.iter().map(|record| self.serialize(record)).collect()
	}
}

/// Serializer for records that implement [`serde::Serialize`].
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::serializer::{JsonSerializer, RecordSerializer};
///
/// #[derive(serde::Serialize)]
/// struct Book {
///     id: i64,
///     name: String,
/// }
///
/// let serializer = JsonSerializer::<Book>::new();
/// let doc = serializer.serialize(&Book { id: 1, name: "Dune".into() });
/// assert_eq!(doc["name"], "Dune");
/// ```
pub struct JsonSerializer<T> {
	_phantom: PhantomData<T>,
}

impl<T> JsonSerializer<T> {
	/// Creates the serializer.
	pub fn new() -> Self {
		Self {
			_phantom: PhantomData,
		}
	}
}

impl<T> Default for JsonSerializer<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: Serialize> RecordSerializer for JsonSerializer<T> {
	type Record = T;

	fn serialize(&self, record: &Self::Record) -> serde_json::Value {
		match serde_json::to_value(record) {
			Ok(value) => value,
			Err(error) => {
				tracing::warn!(%error, "record failed to serialize; emitting null row");
				serde_json::Value::Null
			}
		}
	}
}
