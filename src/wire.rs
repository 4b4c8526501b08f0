//! Flat wire payload access and best-effort scalar coercion.
//!
//! DataTables submits its request as a flat, index-keyed form payload in
//! which every key maps to a list of string values (the Django QueryDict
//! shape). [`WireQuery`] wraps that payload, and [`coerce`] converts the
//! untrusted string scalars into typed values with a caller-supplied
//! fallback.

use std::collections::HashMap;
use std::str::FromStr;

/// Flat, index-keyed request payload.
///
/// Every key maps to a list of values; readers only ever consume the first
/// value per key, which matches how DataTables encodes its parameters.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::WireQuery;
///
/// let query = WireQuery::from_pairs([("draw", "3"), ("length", "25")]);
/// assert_eq!(query.first("draw"), Some("3"));
/// assert_eq!(query.first("missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WireQuery {
	params: HashMap<String, Vec<String>>,
}

impl WireQuery {
	/// Creates an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a payload from `(key, value)` pairs.
	///
	/// Repeated keys accumulate in submission order.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut query = Self::new();
		for (key, value) in pairs {
			query.append(key, value);
		}
		query
	}

	/// Appends a value under `key`.
	pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.params.entry(key.into()).or_default().push(value.into());
	}

	/// Returns the first value submitted under `key`, if any.
	pub fn first(&self, key: &str) -> Option<&str> {
		self.params
			.get(key)
			.and_then(|values| values.first())
			.map(String::as_str)
	}
}

impl From<HashMap<String, Vec<String>>> for WireQuery {
	fn from(params: HashMap<String, Vec<String>>) -> Self {
		Self { params }
	}
}

/// Converts a wire scalar to `T`, falling back to `default`.
///
/// Wire values are untrusted and optional, so an absent or unparseable
/// value silently yields the default. This is the only place in the crate
/// where silent fallback is correct behavior; every other illegal input is
/// a hard error.
///
/// # Example
///
/// ```rust
/// use reinhardt_datatables::wire::coerce;
///
/// assert_eq!(coerce(Some("25"), 0i64), 25);
/// assert_eq!(coerce(Some("not a number"), 0i64), 0);
/// assert_eq!(coerce(None, 10u32), 10);
/// ```
pub fn coerce<T: FromStr>(raw: Option<&str>, default: T) -> T {
	match raw {
		Some(value) => value.trim().parse().unwrap_or(default),
		None => default,
	}
}
