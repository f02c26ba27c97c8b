//! Raw cell values and their normalized, comparable form

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A raw cell value as delivered by a data source
///
/// Values are never mutated by filtering or sorting. Before any comparison
/// they are passed through the column's [`ColumnType`](crate::ColumnType)
/// to obtain a [`Comparable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
	/// SQL `NULL` or a missing cell
	#[default]
	Null,
	/// Boolean value
	Bool(bool),
	/// Signed integer
	Integer(i64),
	/// Floating point number
	Float(f64),
	/// Text
	Text(String),
	/// Calendar date
	Date(NaiveDate),
	/// Date and time without timezone
	DateTime(NaiveDateTime),
	/// Multi-valued cell (tags, roles, ...)
	List(Vec<Value>),
}

impl Value {
	/// Returns true for [`Value::Null`]
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Returns the text payload, if this is a text value
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Text(s) => Some(s),
			_ => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => Ok(()),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Integer(i) => write!(f, "{}", i),
			Value::Float(x) => write!(f, "{}", x),
			Value::Text(s) => f.write_str(s),
			Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
			Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
			Value::List(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}", item)?;
				}
				Ok(())
			}
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Text(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Text(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Integer(i64::from(value))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Integer(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Value::Date(value)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(value: NaiveDateTime) -> Self {
		Value::DateTime(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::List(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Null)
	}
}

/// A value after column-type normalization
///
/// Values of the same variant order naturally: numbers numerically, text
/// lexically and date/times chronologically. Values of different variants
/// fall back to comparing their text rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
	/// No value
	Null,
	/// Boolean
	Bool(bool),
	/// Any numeric value
	Number(f64),
	/// Text
	Text(String),
	/// Dates are widened to midnight
	DateTime(NaiveDateTime),
	/// Multi-valued cell; predicates hold when any element satisfies them
	List(Vec<Comparable>),
}

impl Comparable {
	/// Widens a date to a datetime at midnight
	pub fn from_date(date: NaiveDate) -> Self {
		Comparable::DateTime(date.and_time(NaiveTime::MIN))
	}

	/// Text rendering used by substring matching and mixed-variant comparison
	pub fn to_text(&self) -> String {
		match self {
			Comparable::Null => String::new(),
			Comparable::Bool(b) => b.to_string(),
			Comparable::Number(n) => format_number(*n),
			Comparable::Text(s) => s.clone(),
			Comparable::DateTime(dt) => {
				if dt.time() == NaiveTime::MIN {
					dt.format("%Y-%m-%d").to_string()
				} else {
					dt.format("%Y-%m-%d %H:%M:%S").to_string()
				}
			}
			Comparable::List(items) => items
				.iter()
				.map(Comparable::to_text)
				.collect::<Vec<_>>()
				.join(", "),
		}
	}

	/// Equality used by the `EQUAL`/`IN` family
	pub fn equals(&self, other: &Comparable) -> bool {
		match (self, other) {
			(Comparable::Null, Comparable::Null) => true,
			(Comparable::Bool(a), Comparable::Bool(b)) => a == b,
			(Comparable::Number(a), Comparable::Number(b)) => a == b,
			(Comparable::Text(a), Comparable::Text(b)) => a == b,
			(Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
			_ => self.to_text() == other.to_text(),
		}
	}

	/// Ordering used by the range and ordered-comparison operators
	///
	/// Returns `None` when either side is `Null` or a list, or when a
	/// number is NaN: such values never satisfy an ordered comparison.
	pub fn partial_compare(&self, other: &Comparable) -> Option<Ordering> {
		match (self, other) {
			(Comparable::Null, _) | (_, Comparable::Null) => None,
			(Comparable::List(_), _) | (_, Comparable::List(_)) => None,
			(Comparable::Number(a), Comparable::Number(b)) => a.partial_cmp(b),
			(Comparable::Text(a), Comparable::Text(b)) => Some(a.cmp(b)),
			(Comparable::DateTime(a), Comparable::DateTime(b)) => Some(a.cmp(b)),
			(Comparable::Bool(a), Comparable::Bool(b)) => Some(a.cmp(b)),
			_ => Some(self.to_text().cmp(&other.to_text())),
		}
	}

	/// Total ordering for sorting: nulls first, incomparable values by text
	pub fn sort_cmp(&self, other: &Comparable) -> Ordering {
		match (self, other) {
			(Comparable::Null, Comparable::Null) => Ordering::Equal,
			(Comparable::Null, _) => Ordering::Less,
			(_, Comparable::Null) => Ordering::Greater,
			_ => self
				.partial_compare(other)
				.unwrap_or_else(|| self.to_text().cmp(&other.to_text())),
		}
	}
}

fn format_number(n: f64) -> String {
	if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
		format!("{}", n as i64)
	} else {
		n.to_string()
	}
}
