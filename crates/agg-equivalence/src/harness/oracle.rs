//! Decides whether two aggregation results are the same.
use super::{HarnessConfig, HarnessError, HarnessResult, Strategy};
use crate::base::database::Value;

/// How an actual value is compared with an expected one.
#[derive(Debug, Clone, Copy)]
pub enum EqualityRule {
    /// Strict structural equality; NaN equals NaN.
    Exact,
    /// `DOUBLE` values within one ULP or within the absolute tolerance.
    ApproximateDouble(f64),
    /// `REAL` values within one ULP or within the absolute tolerance.
    ApproximateReal(f32),
    /// A caller-supplied predicate, called as `(actual, expected)`.
    Custom(fn(&Value, &Value) -> bool),
}

impl EqualityRule {
    /// Selects the rule for an expected value: approximate for non-NaN floating point values,
    /// exact for everything else.
    #[must_use]
    pub fn for_expected(expected: &Value, config: &HarnessConfig) -> Self {
        match expected {
            Value::Double(value) if !value.is_nan() => {
                EqualityRule::ApproximateDouble(config.double_tolerance)
            }
            Value::Real(value) if !value.is_nan() => {
                EqualityRule::ApproximateReal(config.real_tolerance)
            }
            _ => EqualityRule::Exact,
        }
    }

    /// Whether `actual` is considered equal to `expected`.
    #[must_use]
    pub fn matches(&self, actual: &Value, expected: &Value) -> bool {
        match (self, actual, expected) {
            (EqualityRule::ApproximateDouble(tolerance), Value::Double(a), Value::Double(e)) => {
                ulps_equal_f64(*a, *e) || (e - a).abs() <= *tolerance
            }
            (EqualityRule::ApproximateReal(tolerance), Value::Real(a), Value::Real(e)) => {
                ulps_equal_f32(*a, *e) || (e - a).abs() <= *tolerance
            }
            (
                EqualityRule::Exact | EqualityRule::ApproximateDouble(_) | EqualityRule::ApproximateReal(_),
                _,
                _,
            ) => actual.strict_eq(expected),
            (EqualityRule::Custom(predicate), _, _) => predicate(actual, expected),
        }
    }
}

/// Whether two doubles are at most one representable value apart. NaN is never equal.
fn ulps_equal_f64(x: f64, y: f64) -> bool {
    if x.is_nan() || y.is_nan() {
        return false;
    }
    #[allow(clippy::cast_possible_wrap)]
    let (x_bits, y_bits) = (x.to_bits() as i64, y.to_bits() as i64);
    if (x_bits ^ y_bits) >= 0 {
        (x_bits - y_bits).abs() <= 1
    } else {
        // Opposite signs: count the steps from each value to its signed zero.
        let (positive, negative) = if x_bits >= 0 {
            (x_bits, y_bits)
        } else {
            (y_bits, x_bits)
        };
        let delta_minus = negative.wrapping_sub(i64::MIN);
        positive <= 1 && delta_minus <= 1 - positive
    }
}

/// Whether two reals are at most one representable value apart. NaN is never equal.
fn ulps_equal_f32(x: f32, y: f32) -> bool {
    if x.is_nan() || y.is_nan() {
        return false;
    }
    #[allow(clippy::cast_possible_wrap)]
    let (x_bits, y_bits) = (x.to_bits() as i32, y.to_bits() as i32);
    if (x_bits ^ y_bits) >= 0 {
        (x_bits - y_bits).abs() <= 1
    } else {
        let (positive, negative) = if x_bits >= 0 {
            (x_bits, y_bits)
        } else {
            (y_bits, x_bits)
        };
        let delta_minus = negative.wrapping_sub(i32::MIN);
        positive <= 1 && delta_minus <= 1 - positive
    }
}

/// Fails with [`HarnessError::EquivalenceViolation`] unless `rule` considers `actual` equal to `expected`.
pub fn assert_function_equals(
    rule: &EqualityRule,
    strategy: Strategy,
    description: Option<&str>,
    actual: &Value,
    expected: &Value,
) -> HarnessResult<()> {
    if rule.matches(actual, expected) {
        Ok(())
    } else {
        Err(HarnessError::EquivalenceViolation {
            strategy,
            description: description.map(ToString::to_string),
            expected: expected.clone(),
            actual: actual.clone(),
        })
    }
}
