//! A single record keyed by column unique id

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One record of a data source
///
/// Maps a column's unique id to the raw value stored for it. Filters and
/// renderers only ever read from a row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
	values: HashMap<String, Value>,
}

impl Row {
	/// Creates an empty row
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the value of a column, builder style
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	/// Sets the value of a column
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
		self.values.insert(key.into(), value.into());
	}

	/// Returns the raw value for a column unique id
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.values.get(key)
	}

	/// Returns true if the row holds a value for the column
	pub fn contains(&self, key: &str) -> bool {
		self.values.contains_key(key)
	}

	/// Number of populated columns
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if no column is populated
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over `(unique id, value)` pairs in arbitrary order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K, V> FromIterator<(K, V)> for Row
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

impl<K, V, const N: usize> From<[(K, V); N]> for Row
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from(pairs: [(K, V); N]) -> Self {
		pairs.into_iter().collect()
	}
}
