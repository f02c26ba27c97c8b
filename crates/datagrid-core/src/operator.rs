//! Filter operators

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison applied by a column filter
///
/// Negative operators (`NotEqual`, `NotLike`, `NotLikeLeft`, `NotLikeRight`,
/// `NotIn`) are the negation of a positive counterpart, see
/// [`FilterOperator::positive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
	/// Value equals the operand
	Equal,
	/// Value does not equal the operand
	NotEqual,
	/// Value contains the operand
	Like,
	/// Value does not contain the operand
	NotLike,
	/// Value ends with the operand
	LikeLeft,
	/// Value does not end with the operand
	NotLikeLeft,
	/// Value starts with the operand
	LikeRight,
	/// Value does not start with the operand
	NotLikeRight,
	/// Value is one of the operands
	In,
	/// Value is none of the operands
	NotIn,
	/// Value lies in the inclusive range `[operand0, operand1]`
	Between,
	/// Value is greater than the operand
	Greater,
	/// Value is greater than or equal to the operand
	GreaterEqual,
	/// Value is less than the operand
	Less,
	/// Value is less than or equal to the operand
	LessEqual,
}

impl FilterOperator {
	/// Every operator, in declaration order
	pub const ALL: [FilterOperator; 15] = [
		FilterOperator::Equal,
		FilterOperator::NotEqual,
		FilterOperator::Like,
		FilterOperator::NotLike,
		FilterOperator::LikeLeft,
		FilterOperator::NotLikeLeft,
		FilterOperator::LikeRight,
		FilterOperator::NotLikeRight,
		FilterOperator::In,
		FilterOperator::NotIn,
		FilterOperator::Between,
		FilterOperator::Greater,
		FilterOperator::GreaterEqual,
		FilterOperator::Less,
		FilterOperator::LessEqual,
	];

	/// Canonical snake_case name
	pub fn as_str(&self) -> &'static str {
		match self {
			FilterOperator::Equal => "equal",
			FilterOperator::NotEqual => "not_equal",
			FilterOperator::Like => "like",
			FilterOperator::NotLike => "not_like",
			FilterOperator::LikeLeft => "like_left",
			FilterOperator::NotLikeLeft => "not_like_left",
			FilterOperator::LikeRight => "like_right",
			FilterOperator::NotLikeRight => "not_like_right",
			FilterOperator::In => "in",
			FilterOperator::NotIn => "not_in",
			FilterOperator::Between => "between",
			FilterOperator::Greater => "greater",
			FilterOperator::GreaterEqual => "greater_equal",
			FilterOperator::Less => "less",
			FilterOperator::LessEqual => "less_equal",
		}
	}

	/// Returns true for operators that must not match any operand
	pub fn is_negative(&self) -> bool {
		matches!(
			self,
			FilterOperator::NotEqual
				| FilterOperator::NotLike
				| FilterOperator::NotLikeLeft
				| FilterOperator::NotLikeRight
				| FilterOperator::NotIn
		)
	}

	/// The positive operator this one negates, or itself
	pub fn positive(&self) -> FilterOperator {
		match self {
			FilterOperator::NotEqual => FilterOperator::Equal,
			FilterOperator::NotLike => FilterOperator::Like,
			FilterOperator::NotLikeLeft => FilterOperator::LikeLeft,
			FilterOperator::NotLikeRight => FilterOperator::LikeRight,
			FilterOperator::NotIn => FilterOperator::In,
			other => *other,
		}
	}

	/// Returns true for the substring family (`Like*` and `NotLike*`)
	pub fn is_like(&self) -> bool {
		matches!(
			self.positive(),
			FilterOperator::Like | FilterOperator::LikeLeft | FilterOperator::LikeRight
		)
	}

	/// Returns true for `Greater`, `GreaterEqual`, `Less` and `LessEqual`
	pub fn is_ordered(&self) -> bool {
		matches!(
			self,
			FilterOperator::Greater
				| FilterOperator::GreaterEqual
				| FilterOperator::Less
				| FilterOperator::LessEqual
		)
	}
}

impl fmt::Display for FilterOperator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FilterOperator {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let name = s.trim().to_ascii_lowercase();
		FilterOperator::ALL
			.into_iter()
			.find(|op| op.as_str() == name)
			.ok_or_else(|| CoreError::InvalidArgument(format!("unknown filter operator '{}'", s)))
	}
}
