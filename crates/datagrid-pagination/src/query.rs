//! SQL select descriptions and their execution against SQLite

use crate::error::Result;
use crate::shape::QueryShape;
use datagrid_core::{Row, Value};
use datagrid_filters::{FilterSet, SqlCondition};
use sqlx::sqlite::{Sqlite, SqlitePool, SqliteRow};
use sqlx::{Column as _, Row as _, TypeInfo as _, ValueRef as _};

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, <Sqlite as sqlx::Database>::Arguments<'q>>;

/// A select statement described by its clauses
///
/// The description is rendered to SQL by the pagination strategies, which
/// wrap or trim it as needed. All values travel as bound parameters.
///
/// # Examples
///
/// ```
/// use datagrid_core::Value;
/// use datagrid_pagination::SelectQuery;
///
/// let query = SelectQuery::table("users")
/// 	.columns(["id", "email"])
/// 	.where_raw("active = ?", vec![Value::Integer(1)])
/// 	.order_by("id", false);
///
/// let (sql, params) = query.to_sql();
/// assert_eq!(sql, "SELECT id, email FROM \"users\" WHERE active = ? ORDER BY id ASC");
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectQuery {
	from: String,
	columns: Vec<String>,
	distinct: bool,
	conditions: Vec<SqlCondition>,
	group_by: Vec<String>,
	having: Option<SqlCondition>,
	order_by: Vec<String>,
}

impl SelectQuery {
	/// Selects from a single table
	pub fn table(name: &str) -> Self {
		Self::from_clause(datagrid_filters::sql::quote_identifier(name))
	}

	/// Selects from a raw `FROM` clause, joins included
	pub fn from_clause(from: impl Into<String>) -> Self {
		Self {
			from: from.into(),
			..Self::default()
		}
	}

	/// Adds a selected expression
	pub fn column(mut self, expression: impl Into<String>) -> Self {
		self.columns.push(expression.into());
		self
	}

	/// Adds several selected expressions
	pub fn columns<I, S>(mut self, expressions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.columns.extend(expressions.into_iter().map(Into::into));
		self
	}

	/// Makes the select `DISTINCT`
	pub fn distinct(mut self) -> Self {
		self.distinct = true;
		self
	}

	/// Adds a `WHERE` condition; conditions are joined with `AND`
	pub fn filter(mut self, condition: SqlCondition) -> Self {
		self.conditions.push(condition);
		self
	}

	/// Adds a raw `WHERE` condition with its parameters
	pub fn where_raw(self, sql: impl Into<String>, params: Vec<Value>) -> Self {
		self.filter(SqlCondition::new(sql, params))
	}

	/// Adds the compiled conditions of a filter set
	///
	/// # Errors
	/// Returns `Filter` when a filter has no SQL form
	pub fn filter_set(self, filters: &FilterSet) -> Result<Self> {
		Ok(match filters.to_sql()? {
			Some(condition) => self.filter(condition),
			None => self,
		})
	}

	/// Adds a `GROUP BY` expression
	pub fn group_by(mut self, expression: impl Into<String>) -> Self {
		self.group_by.push(expression.into());
		self
	}

	/// Sets the `HAVING` clause
	pub fn having(mut self, sql: impl Into<String>, params: Vec<Value>) -> Self {
		self.having = Some(SqlCondition::new(sql, params));
		self
	}

	/// Appends an ordering term
	pub fn order_by(mut self, expression: impl Into<String>, descending: bool) -> Self {
		let direction = if descending { "DESC" } else { "ASC" };
		self.order_by
			.push(format!("{} {}", expression.into(), direction));
		self
	}

	/// Inserts an ordering term ahead of the existing ones
	pub fn order_by_first(mut self, expression: impl Into<String>, descending: bool) -> Self {
		let direction = if descending { "DESC" } else { "ASC" };
		self.order_by
			.insert(0, format!("{} {}", expression.into(), direction));
		self
	}

	/// Drops every ordering term
	pub fn clear_order_by(mut self) -> Self {
		self.order_by.clear();
		self
	}

	/// Structural description used for strategy selection
	pub fn shape(&self) -> QueryShape {
		QueryShape {
			has_having: self.having.is_some(),
			is_distinct: self.distinct,
			has_group_by: !self.group_by.is_empty(),
		}
	}

	/// Renders the full select with its ordering
	pub fn to_sql(&self) -> (String, Vec<Value>) {
		self.render(true)
	}

	/// Renders the full select, optionally without `ORDER BY`
	pub(crate) fn render(&self, with_order: bool) -> (String, Vec<Value>) {
		let mut sql = String::from("SELECT ");
		if self.distinct {
			sql.push_str("DISTINCT ");
		}
		if self.columns.is_empty() {
			sql.push('*');
		} else {
			sql.push_str(&self.columns.join(", "));
		}
		sql.push_str(" FROM ");
		sql.push_str(&self.from);

		let mut params = self.push_where(&mut sql);
		self.push_group_by(&mut sql);
		if let Some(having) = &self.having {
			sql.push_str(" HAVING ");
			sql.push_str(&having.sql);
			params.extend(having.params.iter().cloned());
		}
		if with_order && !self.order_by.is_empty() {
			sql.push_str(" ORDER BY ");
			sql.push_str(&self.order_by.join(", "));
		}
		(sql, params)
	}

	/// Renders `FROM <from> WHERE <conditions>` without the select list
	pub(crate) fn render_from_where(&self) -> (String, Vec<Value>) {
		let mut sql = String::from("FROM ");
		sql.push_str(&self.from);
		let params = self.push_where(&mut sql);
		(sql, params)
	}

	/// Appends `GROUP BY` to `sql` when the query groups
	pub(crate) fn push_group_by(&self, sql: &mut String) {
		if !self.group_by.is_empty() {
			sql.push_str(" GROUP BY ");
			sql.push_str(&self.group_by.join(", "));
		}
	}

	fn push_where(&self, sql: &mut String) -> Vec<Value> {
		match SqlCondition::all(self.conditions.iter().cloned()) {
			Some(condition) => {
				sql.push_str(" WHERE ");
				sql.push_str(&condition.sql);
				condition.params
			}
			None => Vec::new(),
		}
	}
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &Value) -> SqliteQuery<'q> {
	match value {
		Value::Null => query.bind(None::<String>),
		Value::Bool(b) => query.bind(*b),
		Value::Integer(i) => query.bind(*i),
		Value::Float(f) => query.bind(*f),
		Value::Text(s) => query.bind(s.clone()),
		Value::Date(_) | Value::DateTime(_) | Value::List(_) => query.bind(value.to_string()),
	}
}

fn bind_all<'q>(sql: &'q str, params: &[Value]) -> SqliteQuery<'q> {
	params
		.iter()
		.fold(sqlx::query::<Sqlite>(sql), bind_value)
}

/// Runs a select and converts every result row
pub(crate) async fn fetch_rows(pool: &SqlitePool, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
	tracing::trace!("Fetching rows: {} {:?}", sql, params);
	let rows = bind_all(sql, params).fetch_all(pool).await?;
	let decoded = rows
		.iter()
		.map(decode_row)
		.collect::<std::result::Result<Vec<_>, sqlx::Error>>()?;
	Ok(decoded)
}

/// Runs a `SELECT COUNT(*)` statement
pub(crate) async fn fetch_count(pool: &SqlitePool, sql: &str, params: &[Value]) -> Result<usize> {
	tracing::trace!("Counting rows: {} {:?}", sql, params);
	let row = bind_all(sql, params).fetch_one(pool).await?;
	let count: i64 = row.try_get(0)?;
	Ok(usize::try_from(count).unwrap_or(0))
}

/// Converts a SQLite result row into a grid row keyed by column name
///
/// SQLite is dynamically typed, so the storage class of each cell decides
/// the resulting [`Value`].
pub fn decode_row(row: &SqliteRow) -> std::result::Result<Row, sqlx::Error> {
	let mut decoded = Row::new();
	for column in row.columns() {
		let index = column.ordinal();
		let raw = row.try_get_raw(index)?;
		let value = if raw.is_null() {
			Value::Null
		} else {
			match raw.type_info().name() {
				"INTEGER" => Value::Integer(row.try_get::<i64, _>(index)?),
				"REAL" => Value::Float(row.try_get::<f64, _>(index)?),
				"BLOB" => {
					let bytes = row.try_get::<Vec<u8>, _>(index)?;
					Value::Text(String::from_utf8_lossy(&bytes).into_owned())
				}
				_ => Value::Text(row.try_get::<String, _>(index)?),
			}
		};
		decoded.insert(column.name(), value);
	}
	Ok(decoded)
}
