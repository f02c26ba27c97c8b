//! Row evaluation for filter specifications

use crate::spec::FilterSpec;
use datagrid_core::{Comparable, FilterOperator, Row};
use std::cmp::Ordering;

impl FilterSpec {
	/// Decides whether a row satisfies this filter
	///
	/// The row value is normalized through the column type, then compared
	/// against each operand:
	///
	/// - `Between` is a single joint check of both bounds.
	/// - Positive operators include the row when any operand matches.
	/// - Negative operators exclude the row as soon as one operand is
	///   matched by their positive counterpart (`NotIn [a, b]` means neither
	///   `a` nor `b`).
	///
	/// A row without a value for the column is evaluated as `Null`.
	pub fn apply_filter(&self, row: &Row) -> bool {
		let value = match row.get(self.column().unique_id()) {
			Some(raw) => self.column().normalize(raw),
			None => {
				tracing::warn!(
					"Row has no value for filtered column '{}'",
					self.column().unique_id()
				);
				Comparable::Null
			}
		};

		let operands = self.operands();
		if self.operator() == FilterOperator::Between {
			return match operands {
				[low, high] => is_between(&value, low, high),
				_ => false,
			};
		}

		let negative = self.operator().is_negative();
		let positive = self.operator().positive();
		let mut is_apply = false;
		for operand in operands {
			let hit = matches_positive(positive, &value, operand);
			if negative {
				if hit {
					return false;
				}
				is_apply = true;
			} else if hit {
				is_apply = true;
			}
		}
		is_apply
	}
}

fn matches_positive(operator: FilterOperator, value: &Comparable, operand: &Comparable) -> bool {
	if let Comparable::List(items) = value {
		return items
			.iter()
			.any(|item| matches_positive(operator, item, operand));
	}
	match operator {
		FilterOperator::Equal | FilterOperator::In => value.equals(operand),
		FilterOperator::Like => lowercase(value).contains(&lowercase(operand)),
		FilterOperator::LikeLeft => lowercase(value).ends_with(&lowercase(operand)),
		FilterOperator::LikeRight => lowercase(value).starts_with(&lowercase(operand)),
		FilterOperator::Greater => value.partial_compare(operand) == Some(Ordering::Greater),
		FilterOperator::GreaterEqual => matches!(
			value.partial_compare(operand),
			Some(Ordering::Greater | Ordering::Equal)
		),
		FilterOperator::Less => value.partial_compare(operand) == Some(Ordering::Less),
		FilterOperator::LessEqual => matches!(
			value.partial_compare(operand),
			Some(Ordering::Less | Ordering::Equal)
		),
		// negative and range operators never reach the per-operand check
		_ => false,
	}
}

fn is_between(value: &Comparable, low: &Comparable, high: &Comparable) -> bool {
	if let Comparable::List(items) = value {
		return items.iter().any(|item| is_between(item, low, high));
	}
	matches!(
		value.partial_compare(low),
		Some(Ordering::Greater | Ordering::Equal)
	) && matches!(
		value.partial_compare(high),
		Some(Ordering::Less | Ordering::Equal)
	)
}

fn lowercase(value: &Comparable) -> String {
	value.to_text().to_lowercase()
}
