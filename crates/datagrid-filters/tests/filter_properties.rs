//! Property-based tests for filter evaluation
//!
//! Uses proptest to verify:
//! 1. EQUAL with one operand matches exactly the equal normalized values
//! 2. BETWEEN matches exactly the values inside the inclusive range
//! 3. IN / NOT_IN are complementary set membership checks
//! 4. Evaluation is pure: the same row always yields the same decision

use datagrid_core::{Column, ColumnType, FilterOperator, Row, Value};
use datagrid_filters::FilterSpec;
use proptest::prelude::*;
use rstest::rstest;

fn number_column() -> Column {
	Column::new("n", "N").with_type(ColumnType::number())
}

fn word() -> impl Strategy<Value = String> {
	"[a-z]{1,6}"
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(200))]

	#[test]
	fn test_equal_matches_iff_equal(value in -1000i64..1000, operand in -1000i64..1000) {
		let spec = FilterSpec::new(
			number_column(),
			FilterOperator::Equal,
			vec![Value::Integer(operand)],
		).unwrap();
		let row = Row::from([("n", value)]);
		prop_assert_eq!(spec.apply_filter(&row), value == operand);
	}

	#[test]
	fn test_between_matches_iff_in_range(
		value in -500i64..500,
		a in -500i64..500,
		b in -500i64..500,
	) {
		let (low, high) = if a <= b { (a, b) } else { (b, a) };
		let spec = FilterSpec::new(
			number_column(),
			FilterOperator::Between,
			vec![Value::Integer(low), Value::Integer(high)],
		).unwrap();
		let row = Row::from([("n", value)]);
		prop_assert_eq!(spec.apply_filter(&row), low <= value && value <= high);
	}

	#[test]
	fn test_in_and_not_in_are_complementary(
		value in word(),
		set in prop::collection::vec(word(), 1..5),
	) {
		let column = Column::new("w", "W");
		let operands: Vec<Value> = set.iter().map(|s| Value::from(s.as_str())).collect();
		let is_in = FilterSpec::new(column.clone(), FilterOperator::In, operands.clone()).unwrap();
		let not_in = FilterSpec::new(column, FilterOperator::NotIn, operands).unwrap();
		let row = Row::from([("w", value.as_str())]);

		let member = set.contains(&value);
		prop_assert_eq!(is_in.apply_filter(&row), member);
		prop_assert_eq!(not_in.apply_filter(&row), !member);
	}

	#[test]
	fn test_evaluation_is_idempotent(value in word(), operand in word()) {
		for operator in FilterOperator::ALL {
			let values = if operator == FilterOperator::Between {
				vec![Value::from(operand.as_str()), Value::from(value.as_str())]
			} else {
				vec![Value::from(operand.as_str())]
			};
			let spec = FilterSpec::new(Column::new("w", "W"), operator, values).unwrap();
			let row = Row::from([("w", value.as_str())]);
			prop_assert_eq!(spec.apply_filter(&row), spec.apply_filter(&row));
		}
	}
}

#[rstest]
#[case("a@gmail.com", true)]
#[case("a@yahoo.com", false)]
fn test_like_scenario(#[case] email: &str, #[case] expected: bool) {
	let spec = FilterSpec::new(
		Column::new("email", "E-Mail"),
		FilterOperator::Like,
		vec!["gmail".into()],
	)
	.unwrap();
	assert_eq!(spec.apply_filter(&Row::from([("email", email)])), expected);
}

#[rstest]
fn test_not_like_scenario() {
	let spec = FilterSpec::new(
		Column::new("email", "E-Mail"),
		FilterOperator::NotLike,
		vec!["gmail".into(), "test".into()],
	)
	.unwrap();
	assert!(!spec.apply_filter(&Row::from([("email", "a@gmail.com")])));
}

#[rstest]
fn test_not_in_excludes_member_regardless_of_position() {
	let column = Column::new("c", "C");
	let spec = FilterSpec::new(
		column,
		FilterOperator::NotIn,
		vec!["a".into(), "b".into(), "c".into()],
	)
	.unwrap();
	for member in ["a", "b", "c"] {
		assert!(!spec.apply_filter(&Row::from([("c", member)])));
	}
	assert!(spec.apply_filter(&Row::from([("c", "z")])));
}
