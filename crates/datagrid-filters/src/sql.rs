//! Compilation of filters into parameterized SQL conditions
//!
//! Query-backed grids push filtering into the database. The generated
//! conditions follow the same rules as [`FilterSpec::apply_filter`]:
//! operands of positive operators are OR-ed, operands of negative operators
//! are AND-ed, and `BETWEEN` is a single range check. `NULL` cells pass
//! negative filters, matching the in-memory evaluation of a missing value.
//!
//! Column types shape the SQL the same way they shape row evaluation:
//!
//! - Date/time columns compare through SQLite's `datetime()`, so the stored
//!   text must be ISO-8601.
//! - Array columns match each element of the separated cell text. Spaces
//!   are ignored on both sides. Ordered and range operators have no
//!   element-wise SQL form and are rejected.

use crate::error::{FilterError, FilterResult};
use crate::set::FilterSet;
use crate::spec::FilterSpec;
use datagrid_core::{ColumnType, Comparable, FilterOperator, Value};

/// A SQL boolean expression with `?` placeholders and their bound values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlCondition {
	/// SQL text using `?` placeholders
	pub sql: String,
	/// Values for the placeholders, in order
	pub params: Vec<Value>,
}

impl SqlCondition {
	/// Creates a condition
	pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
		Self {
			sql: sql.into(),
			params,
		}
	}

	/// Joins conditions with `AND`; an empty list yields `None`
	pub fn all(conditions: impl IntoIterator<Item = SqlCondition>) -> Option<SqlCondition> {
		Self::join(conditions, " AND ")
	}

	/// Joins conditions with `OR`; an empty list yields `None`
	pub fn any(conditions: impl IntoIterator<Item = SqlCondition>) -> Option<SqlCondition> {
		Self::join(conditions, " OR ")
	}

	fn join(
		conditions: impl IntoIterator<Item = SqlCondition>,
		separator: &str,
	) -> Option<SqlCondition> {
		let mut parts = Vec::new();
		let mut params = Vec::new();
		for condition in conditions {
			parts.push(condition.sql);
			params.extend(condition.params);
		}
		match parts.len() {
			0 => None,
			1 => Some(SqlCondition::new(parts.remove(0), params)),
			_ => Some(SqlCondition::new(
				format!("({})", parts.join(separator)),
				params,
			)),
		}
	}

	fn never() -> SqlCondition {
		SqlCondition::new("1 = 0", Vec::new())
	}
}

/// Quotes an identifier for SQL, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quotes a string literal for SQL, doubling embedded quotes
pub fn quote_literal(text: &str) -> String {
	format!("'{}'", text.replace('\'', "''"))
}

/// Escapes `%`, `_` and `\` for use in a `LIKE ... ESCAPE '\'` pattern
pub fn escape_like(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, '%' | '_' | '\\') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

impl FilterSpec {
	/// Compiles this filter into a SQL condition on the column's unique id
	///
	/// # Errors
	/// `UnsupportedSql` for ordered or range operators on an array column.
	///
	/// # Examples
	///
	/// ```
	/// use datagrid_core::Column;
	/// use datagrid_filters::FilterSpec;
	///
	/// let spec = FilterSpec::parse(Column::new("email", "E-Mail"), "gmail").unwrap();
	/// let condition = spec.to_sql().unwrap();
	/// assert_eq!(condition.sql, r#"LOWER("email") LIKE LOWER(?) ESCAPE '\'"#);
	/// assert_eq!(condition.params, vec!["%gmail%".into()]);
	/// ```
	pub fn to_sql(&self) -> FilterResult<SqlCondition> {
		let column = quote_identifier(self.column().unique_id());
		let operator = self.operator();
		let operands = self.operands();

		let target = match self.column().column_type() {
			ColumnType::Array { separator } => return self.array_sql(&column, separator),
			ColumnType::DateTime { .. } => format!("datetime({})", column),
			_ => column.clone(),
		};

		if operator == FilterOperator::Between {
			let params = operands.iter().map(to_param).collect();
			return Ok(SqlCondition::new(format!("{} BETWEEN ? AND ?", target), params));
		}

		if matches!(operator, FilterOperator::In | FilterOperator::NotIn) {
			let placeholders = vec!["?"; operands.len()].join(", ");
			let params = operands.iter().map(to_param).collect();
			let sql = if operator == FilterOperator::In {
				format!("{} IN ({})", target, placeholders)
			} else {
				format!("({} IS NULL OR {} NOT IN ({}))", target, target, placeholders)
			};
			return Ok(SqlCondition::new(sql, params));
		}

		let parts = operands
			.iter()
			.map(|operand| operand_condition(operator, &column, &target, operand));
		let joined = if operator.is_negative() {
			SqlCondition::all(parts)
		} else {
			SqlCondition::any(parts)
		};
		// operands are never empty, see FilterSpec::new
		Ok(joined.unwrap_or_else(SqlCondition::never))
	}

	/// Element-wise condition on a separated list stored as text
	///
	/// The cell is padded with the separator on both ends, so an element
	/// is any `sep value sep` run inside it.
	fn array_sql(&self, column: &str, separator: &str) -> FilterResult<SqlCondition> {
		let operator = self.operator();
		let positive = operator.positive();
		if !matches!(
			positive,
			FilterOperator::Equal
				| FilterOperator::In
				| FilterOperator::Like
				| FilterOperator::LikeLeft
				| FilterOperator::LikeRight
		) {
			return Err(FilterError::UnsupportedSql {
				column: self.column().unique_id().to_string(),
				operator,
			});
		}

		let compact = separator.replace(' ', "");
		let strip_spaces = !compact.is_empty();
		let (cell, separator) = if strip_spaces {
			(format!("REPLACE({}, ' ', '')", column), compact)
		} else {
			(format!("TRIM({})", column), separator.to_string())
		};
		let padded = format!(
			"({sep} || {cell} || {sep})",
			sep = quote_literal(&separator),
			cell = cell
		);

		let parts = self.operands().iter().map(|operand| {
			let text = operand.to_text();
			let text = if strip_spaces {
				text.replace(' ', "")
			} else {
				text.trim().to_string()
			};
			element_condition(positive, &padded, &separator, &text)
		});
		let joined = if operator.is_negative() {
			SqlCondition::all(parts.map(|part| {
				SqlCondition::new(
					format!("({} IS NULL OR NOT ({}))", column, part.sql),
					part.params,
				)
			}))
		} else {
			SqlCondition::any(parts)
		};
		Ok(joined.unwrap_or_else(SqlCondition::never))
	}
}

impl FilterSet {
	/// Compiles every filter and joins them with `AND`
	///
	/// Returns `None` for an empty set.
	pub fn to_sql(&self) -> FilterResult<Option<SqlCondition>> {
		let conditions = self
			.iter()
			.map(FilterSpec::to_sql)
			.collect::<FilterResult<Vec<_>>>()?;
		Ok(SqlCondition::all(conditions))
	}
}

fn operand_condition(
	operator: FilterOperator,
	column: &str,
	target: &str,
	operand: &Comparable,
) -> SqlCondition {
	if operator.is_like() {
		let text = escape_like(&operand.to_text());
		let pattern = match operator.positive() {
			FilterOperator::LikeLeft => format!("%{}", text),
			FilterOperator::LikeRight => format!("{}%", text),
			_ => format!("%{}%", text),
		};
		let sql = if operator.is_negative() {
			format!(
				"({} IS NULL OR LOWER({}) NOT LIKE LOWER(?) ESCAPE '\\')",
				column, column
			)
		} else {
			format!("LOWER({}) LIKE LOWER(?) ESCAPE '\\'", column)
		};
		return SqlCondition::new(sql, vec![Value::Text(pattern)]);
	}

	let sql = match operator {
		FilterOperator::NotEqual => format!("({} IS NULL OR {} <> ?)", target, target),
		FilterOperator::Greater => format!("{} > ?", target),
		FilterOperator::GreaterEqual => format!("{} >= ?", target),
		FilterOperator::Less => format!("{} < ?", target),
		FilterOperator::LessEqual => format!("{} <= ?", target),
		_ => format!("{} = ?", target),
	};
	SqlCondition::new(sql, vec![to_param(operand)])
}

fn element_condition(
	operator: FilterOperator,
	padded: &str,
	separator: &str,
	text: &str,
) -> SqlCondition {
	// elements never contain the separator, and blank elements are dropped
	if text.contains(separator) || (text.is_empty() && !operator.is_like()) {
		return SqlCondition::never();
	}
	if !operator.is_like() {
		return SqlCondition::new(
			format!("instr({}, ?) > 0", padded),
			vec![Value::Text(format!("{sep}{text}{sep}", sep = separator))],
		);
	}
	let text = escape_like(text);
	let separator = escape_like(separator);
	let pattern = match operator {
		FilterOperator::LikeLeft => format!("%{}{}%", text, separator),
		FilterOperator::LikeRight => format!("%{}{}%", separator, text),
		_ => format!("%{}%", text),
	};
	SqlCondition::new(
		format!("LOWER({}) LIKE LOWER(?) ESCAPE '\\'", padded),
		vec![Value::Text(pattern)],
	)
}

fn to_param(operand: &Comparable) -> Value {
	match operand {
		Comparable::Null => Value::Null,
		Comparable::Bool(b) => Value::Integer(i64::from(*b)),
		Comparable::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Value::Integer(*n as i64),
		Comparable::Number(n) if n.is_finite() => Value::Float(*n),
		// same text as SQLite's datetime()
		Comparable::DateTime(dt) => Value::Text(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
		Comparable::Number(_) | Comparable::Text(_) | Comparable::List(_) => {
			Value::Text(operand.to_text())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datagrid_core::{Column, ColumnType};
	use rstest::rstest;

	fn parse(column: Column, input: &str) -> SqlCondition {
		FilterSpec::parse(column, input).unwrap().to_sql().unwrap()
	}

	#[rstest]
	fn test_positive_operands_are_or_ed() {
		let condition = parse(Column::new("name", "Name"), "=a,b");
		assert_eq!(condition.sql, r#"("name" = ? OR "name" = ?)"#);
		assert_eq!(condition.params, vec![Value::from("a"), Value::from("b")]);
	}

	#[rstest]
	fn test_negative_operands_are_and_ed() {
		let condition = parse(Column::new("email", "E-Mail"), "!~gmail,test");
		assert_eq!(
			condition.sql,
			r#"(("email" IS NULL OR LOWER("email") NOT LIKE LOWER(?) ESCAPE '\') AND ("email" IS NULL OR LOWER("email") NOT LIKE LOWER(?) ESCAPE '\'))"#
		);
		assert_eq!(
			condition.params,
			vec![Value::from("%gmail%"), Value::from("%test%")]
		);
	}

	#[rstest]
	fn test_between_is_single_condition() {
		let age = Column::new("age", "Age").with_type(ColumnType::number());
		let condition = parse(age, "18 <> 65");
		assert_eq!(condition.sql, r#""age" BETWEEN ? AND ?"#);
		assert_eq!(condition.params, vec![Value::Integer(18), Value::Integer(65)]);
	}

	#[rstest]
	fn test_in_list() {
		let condition = parse(Column::new("status", "Status"), "!=(a,b,c)");
		assert_eq!(condition.sql, r#"("status" IS NULL OR "status" NOT IN (?, ?, ?))"#);
		assert_eq!(condition.params.len(), 3);
	}

	#[rstest]
	#[case("al%", "al%")]
	#[case("%.com", "%.com")]
	#[case("100%_off", "%100\\%\\_off%")]
	fn test_like_patterns(#[case] input: &str, #[case] pattern: &str) {
		let condition = parse(Column::new("t", "T"), input);
		assert_eq!(condition.params, vec![Value::from(pattern)]);
	}

	#[rstest]
	fn test_quote_identifier() {
		assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
	}

	#[rstest]
	fn test_filter_set_joins_with_and() {
		let set: FilterSet = [
			FilterSpec::parse(Column::new("a", "A"), "=1").unwrap(),
			FilterSpec::parse(Column::new("b", "B"), "=2").unwrap(),
		]
		.into_iter()
		.collect();
		let condition = set.to_sql().unwrap().unwrap();
		assert_eq!(condition.sql, r#"("a" = ? AND "b" = ?)"#);
		assert!(FilterSet::new().to_sql().unwrap().is_none());
	}

	fn roles() -> Column {
		Column::new("roles", "Roles").with_type(ColumnType::array())
	}

	#[rstest]
	fn test_array_equal_matches_whole_element() {
		let condition = parse(roles(), "=editor");
		assert_eq!(
			condition.sql,
			r#"instr((',' || REPLACE("roles", ' ', '') || ','), ?) > 0"#
		);
		assert_eq!(condition.params, vec![Value::from(",editor,")]);
	}

	#[rstest]
	#[case("edi%", "%,edi%")]
	#[case("%tor", "%tor,%")]
	#[case("~dmi", "%dmi%")]
	fn test_array_like_patterns_anchor_on_separator(#[case] input: &str, #[case] pattern: &str) {
		let condition = parse(roles(), input);
		assert!(condition.sql.starts_with("LOWER((',' || REPLACE"));
		assert_eq!(condition.params, vec![Value::from(pattern)]);
	}

	#[rstest]
	fn test_array_negative_keeps_null_cells() {
		let condition = parse(roles(), "!=(admin, viewer)");
		assert_eq!(
			condition.sql,
			r#"(("roles" IS NULL OR NOT (instr((',' || REPLACE("roles", ' ', '') || ','), ?) > 0)) AND ("roles" IS NULL OR NOT (instr((',' || REPLACE("roles", ' ', '') || ','), ?) > 0)))"#
		);
		assert_eq!(condition.params.len(), 2);
	}

	#[rstest]
	fn test_array_operand_spanning_elements_never_matches() {
		let spec = FilterSpec::new(roles(), FilterOperator::Equal, vec!["admin,editor".into()])
			.unwrap();
		assert_eq!(spec.to_sql().unwrap().sql, "1 = 0");
	}

	#[rstest]
	#[case(">admin")]
	#[case("a <> m")]
	fn test_array_ordered_filters_are_rejected(#[case] input: &str) {
		let spec = FilterSpec::parse(roles(), input).unwrap();
		assert!(matches!(
			spec.to_sql(),
			Err(FilterError::UnsupportedSql { .. })
		));
		let set = FilterSet::new().with(spec);
		assert!(set.to_sql().is_err());
	}

	#[rstest]
	fn test_date_time_compares_through_datetime() {
		let created = Column::new("created", "Created").with_type(ColumnType::date_time());
		let condition = parse(created, "!=15.01.2024");
		assert_eq!(
			condition.sql,
			r#"(datetime("created") IS NULL OR datetime("created") <> ?)"#
		);
		assert_eq!(condition.params, vec![Value::from("2024-01-15 00:00:00")]);
	}

	#[rstest]
	fn test_non_finite_operand_binds_as_text() {
		let spec = FilterSpec::new(
			Column::new("n", "N").with_type(ColumnType::number()),
			FilterOperator::Equal,
			vec![Value::Float(f64::NAN)],
		)
		.unwrap();
		assert_eq!(spec.to_sql().unwrap().params, vec![Value::from("NaN")]);
	}
}
