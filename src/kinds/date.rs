//! Date-time values.
//!
//! JSON has no date type, so a date travels as text. [`DateKind`] accepts
//! RFC 3339 strings as already typed; conversion additionally reads calendar
//! dates (`2024-03-01`, midnight UTC) and integer epoch milliseconds.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::check::{
    create_as_check, create_is_check, create_maybe_as_check, create_maybe_check, Check, MaybeCheck,
};
use crate::config::{self, ConfigError};
use crate::issue::{Issue, Issues, Outcome, Reason};
use crate::kind::{Convert, Kind};
use crate::stage::{MaybeOptions, Next, WithDefault};

/// Coercion and validation settings for dates.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use vetted::{as_date, DateOptions, WithDefault};
/// use serde_json::json;
///
/// let launch = as_date(
///     WithDefault::none(),
///     DateOptions {
///         min: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
///         ..Default::default()
///     },
/// )
/// .unwrap();
///
/// let at = launch.process(&json!("2024-03-01")).into_result().unwrap();
/// assert_eq!(at, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
/// assert!(launch.process(&json!("1999-12-31")).is_failure());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateOptions {
    /// Earlier instants are raised to it.
    pub coerce_min: Option<DateTime<Utc>>,
    /// Later instants are lowered to it.
    pub coerce_max: Option<DateTime<Utc>>,
    /// Earlier instants are rejected with `min`.
    pub min: Option<DateTime<Utc>>,
    /// Later instants are rejected with `max`.
    pub max: Option<DateTime<Utc>>,
}

/// Instants in UTC, rendered as RFC 3339 with millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateKind;

impl Kind for DateKind {
    type Target = DateTime<Utc>;
    type Options = DateOptions;

    fn type_name(&self) -> &str {
        "date"
    }

    fn check(&self, value: &Value) -> Option<DateTime<Utc>> {
        let text = value.as_str()?;
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }

    fn coerce(
        &self,
        value: DateTime<Utc>,
        options: &DateOptions,
        next: Next<'_, DateTime<Utc>, DateTime<Utc>>,
    ) -> Outcome<DateTime<Utc>> {
        let mut at = value;
        if let Some(lower) = options.coerce_min {
            at = at.max(lower);
        }
        if let Some(upper) = options.coerce_max {
            at = at.min(upper);
        }
        next(at)
    }

    fn validate(&self, value: &DateTime<Utc>, options: &DateOptions) -> Option<Issues> {
        let mut issues = Vec::new();

        if let Some(min) = options.min {
            if *value < min {
                issues.push(
                    Issue::from(&render(*value), Reason::Min, None)
                        .with_context("min", render(min)),
                );
            }
        }
        if let Some(max) = options.max {
            if *value > max {
                issues.push(
                    Issue::from(&render(*value), Reason::Max, None)
                        .with_context("max", render(max)),
                );
            }
        }

        Issues::try_from_vec(issues)
    }

    fn verify(&self, options: &DateOptions) -> Result<(), ConfigError> {
        let kind = self.type_name();
        config::ordered(
            kind,
            ("coerce_min", options.coerce_min),
            ("coerce_max", options.coerce_max),
        )?;
        config::ordered(kind, ("min", options.min), ("max", options.max))
    }

    fn to_value(&self, value: DateTime<Utc>) -> Value {
        render(value)
    }
}

impl Convert for DateKind {
    /// RFC 3339 text, `YYYY-MM-DD` at midnight UTC, or integer epoch milliseconds.
    fn convert(&self, value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(s) => {
                let text = s.trim();
                if let Ok(at) = DateTime::parse_from_rfc3339(text) {
                    return Some(at.with_timezone(&Utc));
                }
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .ok()?
                    .and_hms_opt(0, 0, 0)
                    .map(|naive| naive.and_utc())
            }
            Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
            _ => None,
        }
    }
}

fn render(at: DateTime<Utc>) -> Value {
    json!(at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Required date, RFC 3339 text only.
pub fn is_date(options: DateOptions) -> Result<Check<DateKind>, ConfigError> {
    create_is_check(DateKind, options)
}

/// Optional date, RFC 3339 text only.
pub fn maybe_date(
    mode: MaybeOptions,
    options: DateOptions,
) -> Result<MaybeCheck<DateKind>, ConfigError> {
    create_maybe_check(DateKind, mode, options)
}

/// Required date, converting calendar dates and epoch milliseconds.
pub fn as_date(
    default: WithDefault<DateTime<Utc>>,
    options: DateOptions,
) -> Result<Check<DateKind>, ConfigError> {
    create_as_check(DateKind, default, options)
}

/// Optional date, converting calendar dates and epoch milliseconds.
pub fn maybe_as_date(
    mode: MaybeOptions,
    default: WithDefault<DateTime<Utc>>,
    options: DateOptions,
) -> Result<MaybeCheck<DateKind>, ConfigError> {
    create_maybe_as_check(DateKind, mode, default, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::ValueProcessor;
    use chrono::TimeZone;
    use stillwater::Validation;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_is_date_accepts_rfc3339_only() {
        let schema = is_date(DateOptions::default()).unwrap();
        assert_eq!(
            unwrap_success(schema.process(&json!("2024-03-01T12:00:00+02:00"))),
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );

        for value in [json!("2024-03-01"), json!(1_700_000_000_000i64), json!(true)] {
            let issues = unwrap_failure(schema.process(&value));
            assert!(issues.is_single(&Reason::IncorrectType));
            assert_eq!(issues.first().context_value("expectedType"), Some(&json!("date")));
        }
    }

    #[test]
    fn test_conversion() {
        let kind = DateKind;
        assert_eq!(kind.convert(&json!(" 2024-03-01 ")), Some(ymd(2024, 3, 1)));
        assert_eq!(kind.convert(&json!("2024-03-01T00:00:00Z")), Some(ymd(2024, 3, 1)));
        assert_eq!(kind.convert(&json!(0)), Some(ymd(1970, 1, 1)));
        assert_eq!(kind.convert(&json!(86_400_000)), Some(ymd(1970, 1, 2)));
        assert_eq!(kind.convert(&json!("2024-02-30")), None);
        assert_eq!(kind.convert(&json!("yesterday")), None);
        assert_eq!(kind.convert(&json!(1.5)), None);
        assert_eq!(kind.convert(&json!([])), None);
    }

    #[test]
    fn test_no_conversion() {
        let schema = as_date(WithDefault::none(), DateOptions::default()).unwrap();
        let issues = unwrap_failure(schema.process(&json!("soon")));
        assert!(issues.is_single(&Reason::NoConversion));
        assert_eq!(issues.first().context_value("toType"), Some(&json!("date")));

        let lenient =
            maybe_as_date(MaybeOptions::new(), WithDefault::none(), DateOptions::default())
                .unwrap();
        assert_eq!(unwrap_success(lenient.process(&json!("soon"))), None);
    }

    #[test]
    fn test_bounds() {
        let schema = as_date(
            WithDefault::none(),
            DateOptions {
                min: Some(ymd(2020, 1, 1)),
                max: Some(ymd(2030, 1, 1)),
                ..Default::default()
            },
        )
        .unwrap();

        assert!(schema.process(&json!("2020-01-01")).is_success());
        let issues = unwrap_failure(schema.process(&json!("2019-12-31")));
        assert!(issues.is_single(&Reason::Min));
        assert_eq!(
            issues.first().context_value("min"),
            Some(&json!("2020-01-01T00:00:00.000Z"))
        );
        assert!(unwrap_failure(schema.process(&json!("2031-06-01"))).is_single(&Reason::Max));
    }

    #[test]
    fn test_clamping_runs_before_bounds() {
        let schema = as_date(
            WithDefault::none(),
            DateOptions {
                coerce_max: Some(ymd(2025, 1, 1)),
                max: Some(ymd(2025, 1, 1)),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(unwrap_success(schema.process(&json!("2099-01-01"))), ymd(2025, 1, 1));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let schema = as_date(WithDefault::none(), DateOptions::default()).unwrap();
        let once = unwrap_success(schema.process_to_value(&json!(1_700_000_000_123i64)));
        assert_eq!(once, json!("2023-11-14T22:13:20.123Z"));

        let strict = is_date(DateOptions::default()).unwrap();
        assert_eq!(unwrap_success(strict.process_to_value(&once)), once);
    }

    #[test]
    fn test_default_and_optional() {
        let schema = as_date(WithDefault::value(ymd(2000, 1, 1)), DateOptions::default()).unwrap();
        assert_eq!(unwrap_success(schema.process(&json!(null))), ymd(2000, 1, 1));

        let optional = maybe_date(MaybeOptions::new(), DateOptions::default()).unwrap();
        assert_eq!(unwrap_success(optional.process(&json!(null))), None);
    }

    #[test]
    fn test_verify_rejects_inverted_bounds() {
        assert!(is_date(DateOptions {
            min: Some(ymd(2030, 1, 1)),
            max: Some(ymd(2020, 1, 1)),
            ..Default::default()
        })
        .is_err());
    }
}
