//! Validity flags and per-kind diagnostic detail.
//!
//! The flags mirror native form-control validity states so that callers can
//! render one message per violated constraint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validity of a string or text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringValidity {
    /// Fewer characters than `minlength`.
    pub too_short: bool,
    /// More characters than `maxlength`.
    pub too_long: bool,
    /// Value does not match the e-mail or URL format.
    pub type_mismatch: bool,
}

/// Validity of a number field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberValidity {
    /// Below `min`.
    pub range_underflow: bool,
    /// Above `max`; never set together with `range_underflow`.
    pub range_overflow: bool,
    /// Required strictly numeric value is missing.
    pub type_mismatch: bool,
}

/// Validity of a date/time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeValidity {
    /// Earlier than `min`.
    pub range_underflow: bool,
    /// Later than `max`.
    pub range_overflow: bool,
}

/// Union of every validity flag, used when results of different kinds are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityState {
    /// See [`NumberValidity::range_underflow`].
    pub range_underflow: bool,
    /// See [`NumberValidity::range_overflow`].
    pub range_overflow: bool,
    /// See [`StringValidity::too_short`].
    pub too_short: bool,
    /// See [`StringValidity::too_long`].
    pub too_long: bool,
    /// See [`StringValidity::type_mismatch`].
    pub type_mismatch: bool,
}

impl ValidityState {
    /// Returns true when no flag is set.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        !(self.range_underflow
            || self.range_overflow
            || self.too_short
            || self.too_long
            || self.type_mismatch)
    }
}

impl From<StringValidity> for ValidityState {
    fn from(validity: StringValidity) -> Self {
        Self {
            too_short: validity.too_short,
            too_long: validity.too_long,
            type_mismatch: validity.type_mismatch,
            ..Self::default()
        }
    }
}

impl From<NumberValidity> for ValidityState {
    fn from(validity: NumberValidity) -> Self {
        Self {
            range_underflow: validity.range_underflow,
            range_overflow: validity.range_overflow,
            type_mismatch: validity.type_mismatch,
            ..Self::default()
        }
    }
}

impl From<DateTimeValidity> for ValidityState {
    fn from(validity: DateTimeValidity) -> Self {
        Self {
            range_underflow: validity.range_underflow,
            range_overflow: validity.range_overflow,
            ..Self::default()
        }
    }
}

/// UI hints for a string or text field (e.g. "12/100 characters").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFieldDetail {
    /// Code points in the trimmed value.
    pub count: usize,
    /// A usable minimum length is configured.
    pub has_min: bool,
    /// A usable maximum length is configured.
    pub has_max: bool,
    /// Any validity flag is set.
    pub invalid: bool,
}

/// UI hints for a date/time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeFieldDetail {
    /// A minimum bound applies.
    pub has_min: bool,
    /// A maximum bound applies (including the implicit far-future default).
    pub has_max: bool,
    /// Any validity flag is set.
    pub invalid: bool,
}

/// Native input kind a date/time field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateTimeInputType {
    /// `YYYY-MM-DD`.
    #[serde(rename = "date")]
    Date,
    /// `HH:mm`.
    #[serde(rename = "time")]
    Time,
    /// `YYYY-MM-DDTHH:mm`.
    #[serde(rename = "datetime-local")]
    DateTimeLocal,
}

impl DateTimeInputType {
    /// Returns the native input type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTimeLocal => "datetime-local",
        }
    }
}

impl fmt::Display for DateTimeInputType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for DateTimeInputType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "datetime-local" | "datetime" => Ok(Self::DateTimeLocal),
            other => Err(format!("unsupported date/time input type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_serializes_camel_case() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(StringValidity {
            too_short: true,
            ..StringValidity::default()
        })?;
        assert_eq!(json["tooShort"], true);
        assert_eq!(json["typeMismatch"], false);
        Ok(())
    }

    #[test]
    fn union_state_reports_any_flag() {
        let state: ValidityState = NumberValidity {
            range_overflow: true,
            ..NumberValidity::default()
        }
        .into();
        assert!(!state.is_valid());
        assert!(ValidityState::default().is_valid());
    }

    #[test]
    fn input_type_parses_aliases() {
        assert_eq!("datetime".parse(), Ok(DateTimeInputType::DateTimeLocal));
        assert_eq!("time".parse(), Ok(DateTimeInputType::Time));
        assert!("week".parse::<DateTimeInputType>().is_err());
    }
}
