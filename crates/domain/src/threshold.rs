//! Threshold evaluation — bounds and verdicts for temperature readings.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default lower limit in °C.
pub const DEFAULT_LOWER_LIMIT: f64 = 15.0;

/// Default upper limit in °C.
pub const DEFAULT_UPPER_LIMIT: f64 = 30.0;

/// Where a reading sits relative to the configured [`Bounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The value is inside the safe range (limits included).
    InRange,
    /// The value is strictly below the lower limit.
    BelowLower,
    /// The value is strictly above the upper limit.
    AboveUpper,
}

impl Verdict {
    /// Whether this verdict warrants a notification.
    #[must_use]
    pub fn is_violation(self) -> bool {
        !matches!(self, Self::InRange)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InRange => f.write_str("in_range"),
            Self::BelowLower => f.write_str("below_lower"),
            Self::AboveUpper => f.write_str("above_upper"),
        }
    }
}

/// The safe temperature range, fixed for the whole process at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    lower: f64,
    upper: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_LIMIT,
            upper: DEFAULT_UPPER_LIMIT,
        }
    }
}

impl Bounds {
    /// Create bounds after checking the `lower < upper` invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvertedBounds`] when `lower` is not
    /// strictly below `upper` (equal limits included — an empty safe
    /// range is a configuration mistake, not a policy).
    pub fn new(lower: f64, upper: f64) -> Result<Self, ValidationError> {
        if lower < upper {
            Ok(Self { lower, upper })
        } else {
            Err(ValidationError::InvertedBounds { lower, upper })
        }
    }

    /// The lower limit.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// The upper limit.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Classify a reading against these bounds.
    ///
    /// The limits themselves are in range: only values strictly below
    /// `lower` or strictly above `upper` are violations. `NaN` is the
    /// representation of a malformed upstream reading and evaluates to
    /// [`Verdict::InRange`] — heatwatch never alerts on data it cannot
    /// trust.
    #[must_use]
    pub fn evaluate(&self, value: f64) -> Verdict {
        if value.is_nan() {
            return Verdict::InRange;
        }
        if value < self.lower {
            Verdict::BelowLower
        } else if value > self.upper {
            Verdict::AboveUpper
        } else {
            Verdict::InRange
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_fifteen_thirty() {
        let bounds = Bounds::default();
        assert_eq!(bounds.lower(), 15.0);
        assert_eq!(bounds.upper(), 30.0);
    }

    #[test]
    fn should_reject_inverted_bounds() {
        let result = Bounds::new(30.0, 15.0);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::InvertedBounds {
                lower: 30.0,
                upper: 15.0
            }
        );
    }

    #[test]
    fn should_reject_equal_bounds() {
        assert!(Bounds::new(20.0, 20.0).is_err());
    }

    #[test]
    fn should_return_in_range_for_values_between_limits() {
        let bounds = Bounds::default();
        assert_eq!(bounds.evaluate(15.1), Verdict::InRange);
        assert_eq!(bounds.evaluate(22.5), Verdict::InRange);
        assert_eq!(bounds.evaluate(29.9), Verdict::InRange);
    }

    #[test]
    fn should_treat_limits_themselves_as_in_range() {
        let bounds = Bounds::default();
        assert_eq!(bounds.evaluate(15.0), Verdict::InRange);
        assert_eq!(bounds.evaluate(30.0), Verdict::InRange);
    }

    #[test]
    fn should_return_below_lower_for_values_under_the_lower_limit() {
        let bounds = Bounds::default();
        assert_eq!(bounds.evaluate(14.9), Verdict::BelowLower);
        assert_eq!(bounds.evaluate(-40.0), Verdict::BelowLower);
        assert_eq!(bounds.evaluate(f64::NEG_INFINITY), Verdict::BelowLower);
    }

    #[test]
    fn should_return_above_upper_for_values_over_the_upper_limit() {
        let bounds = Bounds::default();
        assert_eq!(bounds.evaluate(30.1), Verdict::AboveUpper);
        assert_eq!(bounds.evaluate(95.0), Verdict::AboveUpper);
        assert_eq!(bounds.evaluate(f64::INFINITY), Verdict::AboveUpper);
    }

    #[test]
    fn should_fail_safe_to_in_range_on_nan() {
        let bounds = Bounds::default();
        assert_eq!(bounds.evaluate(f64::NAN), Verdict::InRange);
    }

    #[test]
    fn should_evaluate_identically_on_repeated_calls() {
        let bounds = Bounds::default();
        assert_eq!(bounds.evaluate(32.0), bounds.evaluate(32.0));
        assert_eq!(bounds.evaluate(12.0), bounds.evaluate(12.0));
    }

    #[test]
    fn should_report_violation_only_for_out_of_range_verdicts() {
        assert!(!Verdict::InRange.is_violation());
        assert!(Verdict::BelowLower.is_violation());
        assert!(Verdict::AboveUpper.is_violation());
    }

    #[test]
    fn should_display_snake_case_verdicts() {
        assert_eq!(Verdict::InRange.to_string(), "in_range");
        assert_eq!(Verdict::BelowLower.to_string(), "below_lower");
        assert_eq!(Verdict::AboveUpper.to_string(), "above_upper");
    }

    #[test]
    fn should_roundtrip_bounds_through_serde_json() {
        let bounds = Bounds::new(10.0, 25.0).unwrap();
        let json = serde_json::to_string(&bounds).unwrap();
        let parsed: Bounds = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bounds);
    }
}
