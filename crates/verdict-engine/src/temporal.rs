//! Temporal comparison and relative-time parsing
//!
//! The actual side of a temporal operator must already be a timestamp; the
//! expected side also accepts a relative-time expression string such as
//! `now`, `today-1d`, `thisMonth` or `thisYear+1y`. Relative bases resolve
//! against wall-clock "now" at evaluation time; the functions here take
//! `now` as a parameter so tests can pin it.
//!
//! `WITHIN_LAST` / `WITHIN_NEXT` windows accept a flexible duration string
//! with composable unit suffixes (`1h30m`, `1.5y`, `250ms`), summed into a
//! single offset. Months count as 30 days and years as 365.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;
use verdict_core::{error::Result, EvalError, Operator, Value};

static RELATIVE_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(now|today|thisday|thismonth|thisyear)\s*(?:([+-])\s*(\d+)\s*([a-zA-Z]+)?)?\s*$")
        .expect("relative-time pattern is valid")
});

// Longer unit tokens listed before their prefixes (`mo` before `m`,
// `ms` before `s`) so alternation picks the right one.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(ns|us|µs|ms|mo|s|m|h|d|w|y)")
        .expect("duration pattern is valid")
});

const NANOS_PER_SEC: f64 = 1e9;

pub(crate) fn compare_time(
    actual: &Value,
    expected: &Value,
    op: Operator,
    now: DateTime<Utc>,
) -> Result<bool> {
    let a = actual
        .as_timestamp()
        .ok_or_else(|| EvalError::invalid_type(actual.type_name()))?;
    let b = resolve_expected_time(expected, now)?;
    Ok(match op {
        Operator::Before => a < b,
        Operator::After => a > b,
        _ => false,
    })
}

/// Inclusive range check; `range` is a two-element array of timestamps or
/// relative-time expressions.
pub(crate) fn time_between(actual: &Value, range: &Value, now: DateTime<Utc>) -> Result<bool> {
    let t = actual
        .as_timestamp()
        .ok_or_else(|| EvalError::invalid_type(actual.type_name()))?;
    let bounds = range
        .as_array()
        .filter(|items| items.len() == 2)
        .ok_or_else(|| EvalError::invalid_type(range))?;
    let start = resolve_expected_time(&bounds[0], now)?;
    let end = resolve_expected_time(&bounds[1], now)?;
    Ok(t >= start && t <= end)
}

pub(crate) fn within_window(
    actual: &Value,
    window: &Value,
    op: Operator,
    now: DateTime<Utc>,
) -> Result<bool> {
    let t = actual
        .as_timestamp()
        .ok_or_else(|| EvalError::invalid_type(actual.type_name()))?;
    let dur = match window {
        Value::Duration(d) => {
            TimeDelta::from_std(*d).map_err(|_| EvalError::invalid_type(window))?
        }
        Value::String(s) => parse_flexible_duration(s)?,
        other => return Err(EvalError::invalid_type(other.type_name())),
    };
    Ok(match op {
        Operator::WithinLast => t > now - dur,
        Operator::WithinNext => t < now + dur,
        _ => false,
    })
}

/// `YEAR_EQ` / `MONTH_EQ`: compare one calendar part of the timestamp
/// against the operand. A numeric operand names the part directly
/// (`2024`, `6`); a relative-time expression string (`"thisYear-1"`,
/// `"thisMonth"`) resolves to a timestamp whose part is compared.
pub(crate) fn time_part_eq(
    actual: &Value,
    expected: &Value,
    op: Operator,
    now: DateTime<Utc>,
) -> Result<bool> {
    let t = actual
        .as_timestamp()
        .ok_or_else(|| EvalError::invalid_type(actual.type_name()))?;
    let part_of = |t: DateTime<Utc>| match op {
        Operator::YearEq => i64::from(t.year()),
        _ => i64::from(t.month()),
    };
    let part = match expected {
        Value::String(s) if RELATIVE_TIME_RE.is_match(s) => {
            part_of(parse_relative_time(s, now)?)
        }
        other => other
            .as_f64()
            .ok_or_else(|| EvalError::not_numeric(other))? as i64,
    };
    Ok(part_of(t) == part)
}

/// The expected side of a temporal comparison: a timestamp passes through,
/// a string is parsed as a relative-time expression.
pub(crate) fn resolve_expected_time(expected: &Value, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match expected {
        Value::Timestamp(t) => Ok(*t),
        Value::String(s) => parse_relative_time(s, now),
        other => Err(EvalError::invalid_type(other.type_name())),
    }
}

/// Parse a relative-time expression: a base (`now`, `today`/`thisDay`,
/// `thisMonth`, `thisYear`), optionally followed by a signed offset with a
/// unit (`+1y`, `-3d`). A bare offset magnitude without a unit defaults to
/// the base's natural unit (`thisYear+1` means one year).
pub(crate) fn parse_relative_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let caps = RELATIVE_TIME_RE
        .captures(input)
        .ok_or_else(|| EvalError::invalid_type(input))?;

    let base = caps[1].to_ascii_lowercase();
    let base_time = relative_base_time(&base, now)?;

    let Some(magnitude) = caps.get(3) else {
        return Ok(base_time);
    };
    let unit = match caps.get(4) {
        Some(m) => m.as_str().to_ascii_lowercase(),
        None => default_unit_for_base(&base)
            .ok_or_else(|| EvalError::invalid_type(input))?
            .to_string(),
    };

    let mut value: i64 = magnitude
        .as_str()
        .parse()
        .map_err(|_| EvalError::invalid_type(input))?;
    if &caps[2] == "-" {
        value = -value;
    }

    shift(base_time, value, &unit).ok_or_else(|| EvalError::invalid_type(input))
}

fn relative_base_time(base: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    let midnight = |date: Option<NaiveDate>| {
        date.map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .ok_or_else(|| EvalError::invalid_type(base))
    };
    match base {
        "now" => Ok(now),
        "today" | "thisday" => midnight(Some(now.date_naive())),
        "thismonth" => midnight(NaiveDate::from_ymd_opt(now.year(), now.month(), 1)),
        "thisyear" => midnight(NaiveDate::from_ymd_opt(now.year(), 1, 1)),
        other => Err(EvalError::invalid_type(other)),
    }
}

fn default_unit_for_base(base: &str) -> Option<&'static str> {
    match base {
        "thisyear" => Some("y"),
        "thismonth" => Some("mo"),
        "today" | "thisday" => Some("d"),
        _ => None,
    }
}

fn shift(base: DateTime<Utc>, value: i64, unit: &str) -> Option<DateTime<Utc>> {
    match unit {
        "y" | "yr" | "yrs" | "year" | "years" => shift_months(base, value.checked_mul(12)?),
        "mo" | "mon" | "month" | "months" => shift_months(base, value),
        "w" | "week" | "weeks" => base.checked_add_signed(TimeDelta::try_weeks(value)?),
        "d" | "day" | "days" => base.checked_add_signed(TimeDelta::try_days(value)?),
        "h" | "hr" | "hrs" | "hour" | "hours" => {
            base.checked_add_signed(TimeDelta::try_hours(value)?)
        }
        "m" | "min" | "mins" | "minute" | "minutes" => {
            base.checked_add_signed(TimeDelta::try_minutes(value)?)
        }
        "s" | "sec" | "secs" | "second" | "seconds" => {
            base.checked_add_signed(TimeDelta::try_seconds(value)?)
        }
        "ms" | "millisecond" | "milliseconds" => {
            base.checked_add_signed(TimeDelta::try_milliseconds(value)?)
        }
        "us" | "microsecond" | "microseconds" => {
            base.checked_add_signed(TimeDelta::microseconds(value))
        }
        "ns" | "nanosecond" | "nanoseconds" => {
            base.checked_add_signed(TimeDelta::nanoseconds(value))
        }
        _ => None,
    }
}

fn shift_months(base: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    if months >= 0 {
        base.checked_add_months(Months::new(u32::try_from(months).ok()?))
    } else {
        base.checked_sub_months(Months::new(u32::try_from(-months).ok()?))
    }
}

/// Parse a flexible duration like `"5h"`, `"1h30m"`, `"2d"`, `"1.5y"`;
/// every matched `<number><unit>` component is summed.
pub(crate) fn parse_flexible_duration(input: &str) -> Result<TimeDelta> {
    let mut total_nanos = 0.0_f64;
    let mut matched = false;

    for caps in DURATION_RE.captures_iter(input) {
        matched = true;
        let value: f64 = caps[1]
            .parse()
            .map_err(|_| EvalError::invalid_type(input))?;
        let unit_nanos = match caps[2].to_ascii_lowercase().as_str() {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => NANOS_PER_SEC,
            "m" => 60.0 * NANOS_PER_SEC,
            "h" => 3_600.0 * NANOS_PER_SEC,
            "d" => 86_400.0 * NANOS_PER_SEC,
            "w" => 7.0 * 86_400.0 * NANOS_PER_SEC,
            // Approximate month = 30 days, year = 365 days.
            "mo" => 30.0 * 86_400.0 * NANOS_PER_SEC,
            "y" => 365.0 * 86_400.0 * NANOS_PER_SEC,
            _ => return Err(EvalError::invalid_type(input)),
        };
        total_nanos += value * unit_nanos;
    }

    if !matched {
        return Err(EvalError::invalid_type(input));
    }
    Ok(TimeDelta::nanoseconds(total_nanos as i64))
}
