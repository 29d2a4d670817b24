//! Bound checks shared by the field validators.
//!
//! Every helper degrades to "not applicable" on malformed input: a bound that
//! cannot be read never reports a violation.

use cms_fields_domain::{BoundValue, FieldValue};
use std::cmp::Ordering;

/// Coerce text to a number the way a form control's `Number()` does.
///
/// Surrounding whitespace is ignored, empty text is `0`, and anything that is
/// not a decimal, `0x`/`0o`/`0b` literal, or `Infinity` becomes `NaN`.
#[must_use]
pub fn to_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {},
    }

    if let Some(value) = parse_radix_literal(text) {
        return value;
    }

    let decimal_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_chars {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let prefix = text.get(..2)?;
    let radix = match prefix {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = text.get(2..)?;
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|digit| acc.mul_add(f64::from(radix), f64::from(digit)))
        })
        .unwrap_or(f64::NAN);
    Some(value)
}

/// Numeric reading of a candidate value.
#[must_use]
pub fn value_to_number(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Number(number) => *number,
        FieldValue::Text(text) => to_number(text),
        FieldValue::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        },
    }
}

/// Numeric reading of a configured bound, used when comparing length bounds.
#[must_use]
pub fn bound_to_number(bound: &BoundValue) -> f64 {
    match bound {
        BoundValue::Number(number) => *number,
        BoundValue::Text(text) => to_number(text),
    }
}

/// Resolved minimum/maximum length pair.
///
/// A pair whose minimum exceeds its maximum is misconfigured; neither side
/// applies then.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthBounds {
    /// Usable minimum length.
    pub min: Option<f64>,
    /// Usable maximum length.
    pub max: Option<f64>,
}

impl LengthBounds {
    /// Resolve raw `minlength`/`maxlength` settings.
    #[must_use]
    pub fn resolve(minlength: Option<&BoundValue>, maxlength: Option<&BoundValue>) -> Self {
        let upper = maxlength.map_or(f64::INFINITY, bound_to_number);
        let lower = minlength.map_or(0.0, bound_to_number);

        let min = minlength
            .and_then(BoundValue::as_integer)
            .filter(|min| *min >= 0.0 && *min <= upper);
        let max = maxlength
            .and_then(BoundValue::as_integer)
            .filter(|max| lower <= *max);

        Self { min, max }
    }

    /// True when `count` is below the minimum.
    #[must_use]
    pub fn too_short(&self, count: usize) -> bool {
        self.min.is_some_and(|min| below(count_as_f64(count), min))
    }

    /// True when `count` is above the maximum.
    #[must_use]
    pub fn too_long(&self, count: usize) -> bool {
        self.max.is_some_and(|max| above(count_as_f64(count), max))
    }
}

fn count_as_f64(count: usize) -> f64 {
    f64::from(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Strictly below an inclusive minimum. `NaN` on either side is never below.
#[must_use]
pub fn below(value: f64, min: f64) -> bool {
    value.partial_cmp(&min) == Some(Ordering::Less)
}

/// Strictly above an inclusive maximum. `NaN` on either side is never above.
#[must_use]
pub fn above(value: f64, max: f64) -> bool {
    value.partial_cmp(&max) == Some(Ordering::Greater)
}

/// Range check inclusive on both ends.
///
/// Returns `(underflow, overflow)`.
#[must_use]
pub fn range_violation<T: PartialOrd + ?Sized>(value: &T, min: Option<&T>, max: Option<&T>) -> (bool, bool) {
    let underflow = min.is_some_and(|min| value < min);
    let overflow = max.is_some_and(|max| value > max);
    (underflow, overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_number_follows_form_coercion() {
        assert!((to_number("  42 ") - 42.0).abs() < f64::EPSILON);
        assert!(to_number("").abs() < f64::EPSILON);
        assert!((to_number("0x1F") - 31.0).abs() < f64::EPSILON);
        assert!((to_number("-.5") + 0.5).abs() < f64::EPSILON);
        assert!((to_number("1e3") - 1000.0).abs() < f64::EPSILON);
        assert_eq!(to_number("Infinity"), f64::INFINITY);
        assert!(to_number("inf").is_nan());
        assert!(to_number("nan").is_nan());
        assert!(to_number("12abc").is_nan());
        assert!(to_number("0x").is_nan());
    }

    #[test]
    fn nan_never_violates_a_bound() {
        assert!(!below(f64::NAN, 1.0));
        assert!(!above(f64::NAN, 1.0));
    }

    #[test]
    fn inverted_length_pair_disables_both_bounds() {
        let bounds = LengthBounds::resolve(
            Some(&BoundValue::Number(10.0)),
            Some(&BoundValue::Number(5.0)),
        );
        assert_eq!(bounds.min, None);
        assert_eq!(bounds.max, None);
    }

    #[test]
    fn negative_or_fractional_minimum_is_ignored() {
        let bounds = LengthBounds::resolve(Some(&BoundValue::Number(-1.0)), None);
        assert_eq!(bounds.min, None);
        let bounds = LengthBounds::resolve(Some(&BoundValue::Number(1.5)), None);
        assert_eq!(bounds.min, None);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert_eq!(
            range_violation("2023-06-15", Some("2023-06-15"), Some("2023-06-15")),
            (false, false)
        );
        assert_eq!(
            range_violation("08:00", Some("09:00"), None),
            (true, false)
        );
    }
}
