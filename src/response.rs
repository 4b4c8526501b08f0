//! Response envelope in the exact shape the DataTables client consumes.

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// JSON envelope returned to the client.
///
/// The draw token is echoed verbatim from the request, never recomputed, so
/// the client can discard stale out-of-order responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope {
	/// Draw token echoed from the request.
	pub draw: u64,
	/// Serialized rows of the requested page.
	pub data: Vec<serde_json::Value>,
	/// Record count before user filtering.
	#[serde(rename = "recordsTotal")]
	pub records_total: u64,
	/// Record count after user filtering.
	#[serde(rename = "recordsFiltered")]
	pub records_filtered: u64,
	/// Failure description, present only on rejected requests.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ResponseEnvelope {
	/// Builds a successful envelope.
	pub fn new(draw: u64, data: Vec<serde_json::Value>, total: u64, filtered: u64) -> Self {
		Self {
			draw,
			data,
			records_total: total,
			records_filtered: filtered,
			error: None,
		}
	}

	/// Builds the rejected-request envelope: empty data, zero counts,
	/// `draw: 0` and the error message populated.
	pub fn rejected(error: &QueryError) -> Self {
		Self {
			draw: 0,
			data: Vec::new(),
			records_total: 0,
			records_filtered: 0,
			error: Some(error.to_string()),
		}
	}
}
