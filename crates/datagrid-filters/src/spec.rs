//! Filter specifications and the filter expression syntax

use crate::error::{FilterError, FilterResult};
use datagrid_core::{Column, Comparable, FilterOperator, Value};

/// One filter applied to one column
///
/// A spec is built once per request and never changes afterwards. Its
/// operands are normalized through the column type at construction, so
/// evaluating it against many rows only normalizes the row values.
///
/// # Examples
///
/// ```
/// use datagrid_core::{Column, FilterOperator, Row};
/// use datagrid_filters::FilterSpec;
///
/// let email = Column::new("email", "E-Mail");
/// let spec = FilterSpec::new(email, FilterOperator::Like, vec!["gmail".into()]).unwrap();
///
/// assert!(spec.apply_filter(&Row::from([("email", "a@gmail.com")])));
/// assert!(!spec.apply_filter(&Row::from([("email", "a@yahoo.com")])));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
	column: Column,
	operator: FilterOperator,
	values: Vec<Value>,
	operands: Vec<Comparable>,
}

impl FilterSpec {
	/// Creates a filter, checking the operand count
	///
	/// At least one operand is required, and `Between` takes exactly two:
	/// the inclusive lower and upper bounds.
	pub fn new(column: Column, operator: FilterOperator, values: Vec<Value>) -> FilterResult<Self> {
		if values.is_empty() {
			return Err(FilterError::EmptyOperands {
				column: column.unique_id().to_string(),
			});
		}
		if operator == FilterOperator::Between && values.len() != 2 {
			return Err(FilterError::BetweenArity {
				column: column.unique_id().to_string(),
				got: values.len(),
			});
		}
		let operands = values
			.iter()
			.map(|value| match value {
				Value::Text(text) => column.column_type().normalize_operand(text),
				other => column.normalize(other),
			})
			.collect();
		Ok(Self {
			column,
			operator,
			values,
			operands,
		})
	}

	/// Parses a user-entered filter expression for a column
	///
	/// | Input | Operator |
	/// |---|---|
	/// | `=(a,b)` / `!=(a,b)` | `In` / `NotIn` |
	/// | `!=a`, `<>a` | `NotEqual` |
	/// | `~a`, `%a%` / `!~a` | `Like` / `NotLike` |
	/// | `%a`, `~%a` / `!~%a` | `LikeLeft` / `NotLikeLeft` |
	/// | `a%`, `~a%` / `!~a%` | `LikeRight` / `NotLikeRight` |
	/// | `>=a`, `>a`, `<=a`, `<a` | ordered comparisons |
	/// | `=a`, `==a` | `Equal` |
	/// | `a <> b` | `Between` |
	///
	/// Anything else uses the column's default operator. Operands are split
	/// on `,` (except for `Between`), trimmed, and blank ones dropped.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::{Column, FilterOperator};
	/// use datagrid_filters::FilterSpec;
	///
	/// let name = Column::new("name", "Name");
	/// let spec = FilterSpec::parse(name, "!=(Bob, Carol)").unwrap();
	/// assert_eq!(spec.operator(), FilterOperator::NotIn);
	/// assert_eq!(spec.values().len(), 2);
	/// ```
	pub fn parse(column: Column, input: &str) -> FilterResult<Self> {
		let input = input.trim();
		if input.is_empty() {
			return Err(FilterError::InvalidParameter(format!(
				"empty filter expression for column '{}'",
				column.unique_id()
			)));
		}

		let (operator, rest) = split_operator(input, column.default_filter_operator());

		let operands: Vec<Value> = if operator == FilterOperator::Between {
			match rest.split_once("<>") {
				Some((low, high)) => vec![low.trim().into(), high.trim().into()],
				None => vec![rest.trim().into()],
			}
		} else {
			rest.split(',')
				.map(str::trim)
				.filter(|part| !part.is_empty())
				.map(Value::from)
				.collect()
		};

		if operands
			.iter()
			.any(|operand| operand.as_str().is_some_and(str::is_empty))
		{
			return Err(FilterError::InvalidParameter(format!(
				"incomplete range '{}' for column '{}'",
				input,
				column.unique_id()
			)));
		}

		Self::new(column, operator, operands)
	}

	/// The filtered column
	pub fn column(&self) -> &Column {
		&self.column
	}

	/// The comparison
	pub fn operator(&self) -> FilterOperator {
		self.operator
	}

	/// Operands as given
	pub fn values(&self) -> &[Value] {
		&self.values
	}

	/// Operands after column-type normalization
	pub fn operands(&self) -> &[Comparable] {
		&self.operands
	}
}

fn split_operator(input: &str, default: FilterOperator) -> (FilterOperator, &str) {
	if let Some(rest) = input.strip_prefix("!=(") {
		return (FilterOperator::NotIn, strip_closing_paren(rest));
	}
	if let Some(rest) = input.strip_prefix("=(") {
		return (FilterOperator::In, strip_closing_paren(rest));
	}
	if let Some(rest) = input.strip_prefix("!~") {
		return like_family(rest, true);
	}
	if let Some(rest) = input.strip_prefix('~') {
		return like_family(rest, false);
	}
	let prefixed = [
		("!=", FilterOperator::NotEqual),
		("<>", FilterOperator::NotEqual),
		(">=", FilterOperator::GreaterEqual),
		("<=", FilterOperator::LessEqual),
		(">", FilterOperator::Greater),
		("<", FilterOperator::Less),
		("==", FilterOperator::Equal),
		("=", FilterOperator::Equal),
	];
	for (prefix, operator) in prefixed {
		if let Some(rest) = input.strip_prefix(prefix) {
			return (operator, rest);
		}
	}
	if input.contains("<>") {
		return (FilterOperator::Between, input);
	}
	if input.starts_with('%') || input.ends_with('%') {
		return like_family(input, false);
	}
	(default, input)
}

fn strip_closing_paren(rest: &str) -> &str {
	rest.trim_end().strip_suffix(')').unwrap_or(rest)
}

fn like_family(rest: &str, negative: bool) -> (FilterOperator, &str) {
	let rest = rest.trim();
	let leading = rest.strip_prefix('%');
	let body = leading.unwrap_or(rest);
	let trailing = body.strip_suffix('%');
	let body = trailing.unwrap_or(body);

	let operator = match (leading.is_some(), trailing.is_some(), negative) {
		(true, false, false) => FilterOperator::LikeLeft,
		(true, false, true) => FilterOperator::NotLikeLeft,
		(false, true, false) => FilterOperator::LikeRight,
		(false, true, true) => FilterOperator::NotLikeRight,
		(_, _, false) => FilterOperator::Like,
		(_, _, true) => FilterOperator::NotLike,
	};
	(operator, body)
}

#[cfg(test)]
mod tests {
	use super::*;
	use datagrid_core::ColumnType;
	use rstest::rstest;

	fn text_column() -> Column {
		Column::new("name", "Name")
	}

	#[rstest]
	#[case("gmail", FilterOperator::Like, &["gmail"])]
	#[case("~gmail", FilterOperator::Like, &["gmail"])]
	#[case("%gmail%", FilterOperator::Like, &["gmail"])]
	#[case("%.com", FilterOperator::LikeLeft, &[".com"])]
	#[case("~%.com", FilterOperator::LikeLeft, &[".com"])]
	#[case("al%", FilterOperator::LikeRight, &["al"])]
	#[case("!~test", FilterOperator::NotLike, &["test"])]
	#[case("!~%.org", FilterOperator::NotLikeLeft, &[".org"])]
	#[case("!~bo%", FilterOperator::NotLikeRight, &["bo"])]
	#[case("=(a, b,c)", FilterOperator::In, &["a", "b", "c"])]
	#[case("!=(a,b)", FilterOperator::NotIn, &["a", "b"])]
	#[case("!=bob", FilterOperator::NotEqual, &["bob"])]
	#[case("<>bob", FilterOperator::NotEqual, &["bob"])]
	#[case(">=10", FilterOperator::GreaterEqual, &["10"])]
	#[case(">10", FilterOperator::Greater, &["10"])]
	#[case("<=10", FilterOperator::LessEqual, &["10"])]
	#[case("<10", FilterOperator::Less, &["10"])]
	#[case("==bob", FilterOperator::Equal, &["bob"])]
	#[case("=bob", FilterOperator::Equal, &["bob"])]
	#[case("10 <> 20", FilterOperator::Between, &["10", "20"])]
	#[case("gmail, test", FilterOperator::Like, &["gmail", "test"])]
	fn test_parse_expression(
		#[case] input: &str,
		#[case] operator: FilterOperator,
		#[case] operands: &[&str],
	) {
		let spec = FilterSpec::parse(text_column(), input).unwrap();
		assert_eq!(spec.operator(), operator);
		let expected: Vec<Value> = operands.iter().map(|s| Value::from(*s)).collect();
		assert_eq!(spec.values(), expected.as_slice());
	}

	#[rstest]
	fn test_parse_uses_column_default_operator() {
		let age = Column::new("age", "Age").with_type(ColumnType::number());
		let spec = FilterSpec::parse(age, "42").unwrap();
		assert_eq!(spec.operator(), FilterOperator::Equal);
		assert_eq!(spec.operands(), &[Comparable::Number(42.0)]);
	}

	#[rstest]
	#[case("")]
	#[case("   ")]
	#[case("=()")]
	#[case("10 <> ")]
	#[case(",,")]
	fn test_parse_rejects_empty_operands(#[case] input: &str) {
		assert!(FilterSpec::parse(text_column(), input).is_err());
	}

	#[rstest]
	fn test_new_rejects_empty_values() {
		let err = FilterSpec::new(text_column(), FilterOperator::Equal, vec![]).unwrap_err();
		assert!(matches!(err, FilterError::EmptyOperands { .. }));
	}

	#[rstest]
	#[case(1)]
	#[case(3)]
	fn test_new_rejects_between_arity(#[case] count: usize) {
		let values = (0..count).map(|i| Value::Integer(i as i64)).collect();
		let err = FilterSpec::new(text_column(), FilterOperator::Between, values).unwrap_err();
		assert!(matches!(err, FilterError::BetweenArity { got, .. } if got == count));
	}
}
