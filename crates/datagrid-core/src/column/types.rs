//! Column types: how raw values are normalized and displayed

use crate::operator::FilterOperator;
use crate::value::{Comparable, Value};
use chrono::{NaiveDate, NaiveDateTime};

/// Formats tried, in order, when parsing text as a date/time
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%dT%H:%M:%S",
	"%Y-%m-%d %H:%M",
	"%Y-%m-%d",
	"%d.%m.%Y",
	"%m/%d/%Y",
];

/// Semantic type of a column
///
/// The filter engine and the sorter only ever see the [`Comparable`]
/// produced by [`ColumnType::normalize`]; they never inspect the variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColumnType {
	/// Free text
	#[default]
	Text,
	/// Integers and decimals
	Number {
		/// Fixed number of decimals used for display
		decimals: Option<usize>,
	},
	/// Dates and date/times
	DateTime {
		/// chrono formats tried when a value arrives as text
		formats: Vec<String>,
	},
	/// Yes/no values
	Boolean,
	/// Multi-valued cells
	Array {
		/// Separator used to split text cells
		separator: String,
	},
	/// A closed set of stored keys with display labels
	Enum {
		/// `(key, label)` pairs
		choices: Vec<(String, String)>,
	},
}

impl ColumnType {
	/// Number column without fixed decimals
	pub fn number() -> Self {
		ColumnType::Number { decimals: None }
	}

	/// Date/time column using [`DEFAULT_DATE_FORMATS`]
	pub fn date_time() -> Self {
		ColumnType::DateTime {
			formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
		}
	}

	/// Array column splitting text on `,`
	pub fn array() -> Self {
		ColumnType::Array {
			separator: ",".to_string(),
		}
	}

	/// Enumerated column from `(key, label)` pairs
	pub fn choices<K, L>(choices: impl IntoIterator<Item = (K, L)>) -> Self
	where
		K: Into<String>,
		L: Into<String>,
	{
		ColumnType::Enum {
			choices: choices
				.into_iter()
				.map(|(k, l)| (k.into(), l.into()))
				.collect(),
		}
	}

	/// Operator used when a filter expression carries no explicit operator
	pub fn default_operator(&self) -> FilterOperator {
		match self {
			ColumnType::Text | ColumnType::Array { .. } => FilterOperator::Like,
			_ => FilterOperator::Equal,
		}
	}

	/// Normalizes a raw cell value into its comparable form
	pub fn normalize(&self, value: &Value) -> Comparable {
		if value.is_null() {
			return Comparable::Null;
		}
		match self {
			ColumnType::Text => Comparable::Text(value.to_string()),
			ColumnType::Number { .. } => normalize_number(value),
			ColumnType::DateTime { formats } => normalize_date(value, formats),
			ColumnType::Boolean => normalize_bool(value),
			ColumnType::Array { separator } => match value {
				Value::List(items) => Comparable::List(
					items
						.iter()
						.filter(|item| !item.is_null())
						.map(|item| Comparable::Text(item.to_string()))
						.collect(),
				),
				other => Comparable::List(
					other
						.to_string()
						.split(separator.as_str())
						.map(str::trim)
						.filter(|part| !part.is_empty())
						.map(|part| Comparable::Text(part.to_string()))
						.collect(),
				),
			},
			ColumnType::Enum { choices } => {
				let text = value.to_string();
				let key = choices
					.iter()
					.find(|(key, label)| *key == text || label.eq_ignore_ascii_case(&text))
					.map(|(key, _)| key.clone())
					.unwrap_or(text);
				Comparable::Text(key)
			}
		}
	}

	/// Normalizes a filter operand entered as text
	///
	/// Array columns compare their elements against single operands, so an
	/// operand is never split.
	pub fn normalize_operand(&self, operand: &str) -> Comparable {
		match self {
			ColumnType::Array { .. } => Comparable::Text(operand.trim().to_string()),
			_ => self.normalize(&Value::Text(operand.to_string())),
		}
	}

	/// Renders a raw value for display or export
	pub fn display(&self, value: &Value) -> String {
		match (self, value) {
			(_, Value::Null) => String::new(),
			(ColumnType::Number { decimals: Some(d) }, Value::Integer(i)) => {
				format!("{:.*}", *d, *i as f64)
			}
			(ColumnType::Number { decimals: Some(d) }, Value::Float(x)) => format!("{:.*}", *d, x),
			(ColumnType::Boolean, _) => match normalize_bool(value) {
				Comparable::Bool(true) => "Yes".to_string(),
				Comparable::Bool(false) => "No".to_string(),
				other => other.to_text(),
			},
			(ColumnType::Enum { choices }, _) => {
				let text = value.to_string();
				choices
					.iter()
					.find(|(key, _)| *key == text)
					.map(|(_, label)| label.clone())
					.unwrap_or(text)
			}
			_ => value.to_string(),
		}
	}
}

fn normalize_number(value: &Value) -> Comparable {
	match value {
		Value::Integer(i) => Comparable::Number(*i as f64),
		Value::Float(x) => Comparable::Number(*x),
		Value::Bool(b) => Comparable::Number(if *b { 1.0 } else { 0.0 }),
		other => {
			let text = other.to_string();
			let cleaned: String = text
				.trim()
				.chars()
				.filter(|c| *c != '_' && *c != ',' && !c.is_whitespace())
				.collect();
			// "nan" and "inf" stay text
			match cleaned.parse::<f64>() {
				Ok(n) if n.is_finite() => Comparable::Number(n),
				_ => Comparable::Text(text),
			}
		}
	}
}

fn normalize_date(value: &Value, formats: &[String]) -> Comparable {
	match value {
		Value::Date(d) => Comparable::from_date(*d),
		Value::DateTime(dt) => Comparable::DateTime(*dt),
		other => {
			let text = other.to_string();
			let trimmed = text.trim();
			parse_date_time(trimmed, formats).unwrap_or(Comparable::Text(text))
		}
	}
}

fn parse_date_time(text: &str, formats: &[String]) -> Option<Comparable> {
	formats
		.iter()
		.find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
		.map(Comparable::DateTime)
		.or_else(|| {
			formats
				.iter()
				.find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
				.map(Comparable::from_date)
		})
}

fn normalize_bool(value: &Value) -> Comparable {
	match value {
		Value::Bool(b) => Comparable::Bool(*b),
		Value::Integer(0) => Comparable::Bool(false),
		Value::Integer(1) => Comparable::Bool(true),
		other => {
			let text = other.to_string();
			match text.trim().to_ascii_lowercase().as_str() {
				"true" | "yes" | "on" | "1" => Comparable::Bool(true),
				"false" | "no" | "off" | "0" => Comparable::Bool(false),
				_ => Comparable::Text(text),
			}
		}
	}
}
