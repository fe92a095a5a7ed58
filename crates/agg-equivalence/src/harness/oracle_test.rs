use super::{oracle::assert_function_equals, EqualityRule, HarnessConfig, HarnessError, Strategy};
use crate::base::database::Value;

fn rule_for(expected: &Value) -> EqualityRule {
    EqualityRule::for_expected(expected, &HarnessConfig::default())
}

#[test]
fn we_can_select_the_rule_from_the_expected_value() {
    assert!(matches!(
        rule_for(&Value::Double(1.0)),
        EqualityRule::ApproximateDouble(tolerance) if tolerance == 1e-10
    ));
    assert!(matches!(
        rule_for(&Value::Real(1.0)),
        EqualityRule::ApproximateReal(_)
    ));
    assert!(matches!(rule_for(&Value::Double(f64::NAN)), EqualityRule::Exact));
    assert!(matches!(rule_for(&Value::Real(f32::NAN)), EqualityRule::Exact));
    assert!(matches!(rule_for(&Value::BigInt(1)), EqualityRule::Exact));
    assert!(matches!(rule_for(&Value::Null), EqualityRule::Exact));
}

#[test]
fn we_can_match_doubles_within_the_tolerance() {
    let expected = Value::Double(0.3);
    let rule = rule_for(&expected);
    assert!(rule.matches(&Value::Double(0.1 + 0.2), &expected));
    assert!(rule.matches(&Value::Double(0.3 + 5e-11), &expected));
    assert!(!rule.matches(&Value::Double(0.3 + 1e-9), &expected));
    assert!(!rule.matches(&Value::Double(f64::NAN), &expected));
    assert!(!rule.matches(&Value::Null, &expected));
    assert!(!rule.matches(&Value::Real(0.3), &expected));
}

#[test]
fn we_can_match_doubles_one_ulp_apart_beyond_the_tolerance() {
    let expected = Value::Double(1.0e300);
    let rule = rule_for(&expected);
    let next = f64::from_bits(1.0e300_f64.to_bits() + 1);
    let after_next = f64::from_bits(1.0e300_f64.to_bits() + 2);
    assert!(rule.matches(&Value::Double(next), &expected));
    assert!(!rule.matches(&Value::Double(after_next), &expected));
}

#[test]
fn we_can_match_signed_zeros_and_infinities() {
    let rule = rule_for(&Value::Double(0.0));
    assert!(rule.matches(&Value::Double(-0.0), &Value::Double(0.0)));
    let infinity = Value::Double(f64::INFINITY);
    assert!(rule_for(&infinity).matches(&infinity, &infinity));
    assert!(!rule_for(&infinity).matches(&Value::Double(f64::NEG_INFINITY), &infinity));
}

#[test]
fn we_can_match_reals_within_the_tolerance_or_one_ulp() {
    let expected = Value::Real(1.0e30);
    let rule = rule_for(&expected);
    let next = f32::from_bits(1.0e30_f32.to_bits() + 1);
    let after_next = f32::from_bits(1.0e30_f32.to_bits() + 2);
    assert!(rule.matches(&Value::Real(next), &expected));
    assert!(!rule.matches(&Value::Real(after_next), &expected));
    assert!(rule_for(&Value::Real(0.5)).matches(&Value::Real(0.5), &Value::Real(0.5)));
}

#[test]
fn we_can_match_nan_only_with_nan_when_nan_is_expected() {
    let expected = Value::Double(f64::NAN);
    let rule = rule_for(&expected);
    assert!(rule.matches(&Value::Double(-f64::NAN), &expected));
    assert!(!rule.matches(&Value::Double(1.0), &expected));
    assert!(!rule.matches(&Value::Null, &expected));
}

#[test]
fn we_can_match_discrete_values_exactly() {
    let rule = EqualityRule::Exact;
    assert!(rule.matches(&Value::BigInt(10), &Value::BigInt(10)));
    assert!(!rule.matches(&Value::BigInt(11), &Value::BigInt(10)));
    assert!(rule.matches(&Value::Null, &Value::Null));
    assert!(!rule.matches(&Value::Null, &Value::BigInt(0)));
    assert!(rule.matches(
        &Value::VarChar("a".to_string()),
        &Value::VarChar("a".to_string())
    ));
    assert!(!rule.matches(&Value::Double(0.1 + 0.2), &Value::Double(0.3)));
}

#[test]
fn we_can_match_with_a_custom_predicate() {
    let rule = EqualityRule::Custom(|actual, expected| {
        matches!((actual, expected), (Value::BigInt(a), Value::BigInt(e)) if (a - e).abs() <= 1)
    });
    assert!(rule.matches(&Value::BigInt(11), &Value::BigInt(10)));
    assert!(!rule.matches(&Value::BigInt(12), &Value::BigInt(10)));
}

#[test]
fn we_can_report_an_equivalence_violation_with_a_description() {
    let error = assert_function_equals(
        &EqualityRule::Exact,
        Strategy::PartialMerge,
        Some("sum of small integers"),
        &Value::BigInt(9),
        &Value::BigInt(10),
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "partial aggregation: Test: sum of small integers, Expected: 10, actual: 9"
    );
    assert!(matches!(
        error,
        HarnessError::EquivalenceViolation {
            strategy: Strategy::PartialMerge,
            ..
        }
    ));
}

#[test]
fn we_can_report_an_equivalence_violation_without_a_description() {
    let error = assert_function_equals(
        &EqualityRule::Exact,
        Strategy::Direct,
        None,
        &Value::Null,
        &Value::BigInt(0),
    )
    .unwrap_err();
    assert_eq!(
        error.to_string(),
        "direct aggregation: Expected: 0, actual: null"
    );
    assert!(assert_function_equals(
        &EqualityRule::Exact,
        Strategy::Direct,
        None,
        &Value::BigInt(0),
        &Value::BigInt(0),
    )
    .is_ok());
}
