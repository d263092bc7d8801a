//! Go-style duration strings (`5m`, `1h30m`, `1.5s`, `250ms`)

use std::fmt::Write;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:\d+(?:\.\d*)?|\.\d+)(?:ns|us|µs|μs|ms|s|m|h))+$")
        .expect("duration pattern is valid")
});

static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d*)?|\.\d+)(ns|us|µs|μs|ms|s|m|h)").expect("component pattern is valid")
});

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration \"{0}\"")]
    Invalid(String),

    #[error("duration \"{0}\" is out of range")]
    Overflow(String),
}

/// Parse a duration written the way `--timeout` accepts it.
///
/// A sequence of decimal numbers each followed by a unit (`ns`, `us`, `µs`,
/// `ms`, `s`, `m`, `h`). A bare `0` is also accepted.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let input = input.trim();
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if !DURATION.is_match(input) {
        return Err(DurationError::Invalid(input.to_string()));
    }

    let mut total: u128 = 0;
    for caps in COMPONENT.captures_iter(input) {
        let nanos = component_nanos(&caps[1], unit_nanos(&caps[2]))
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        total = total
            .checked_add(nanos)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
    }

    let total = u64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
    Ok(Duration::from_nanos(total))
}

/// Render a duration the way `parse_duration` reads it, e.g. `5m0s`
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", decimal(nanos, NANOS_PER_MICRO));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", decimal(nanos, NANOS_PER_MILLI));
    }

    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos / NANOS_PER_MINUTE) % 60;
    let seconds = decimal(nanos % NANOS_PER_MINUTE, NANOS_PER_SEC);

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{seconds}s");
    out
}

fn unit_nanos(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => NANOS_PER_MICRO,
        "ms" => NANOS_PER_MILLI,
        "s" => NANOS_PER_SEC,
        "m" => NANOS_PER_MINUTE,
        _ => NANOS_PER_HOUR,
    }
}

/// Nanoseconds for one `<number><unit>` pair, `None` on overflow
fn component_nanos(number: &str, unit: u128) -> Option<u128> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut nanos = whole.checked_mul(unit)?;

    if !frac.is_empty() {
        let scale = 10u128.checked_pow(u32::try_from(frac.len()).ok()?)?;
        let frac: u128 = frac.parse().ok()?;
        nanos = nanos.checked_add(frac.checked_mul(unit)? / scale)?;
    }

    Some(nanos)
}

/// `value / unit` as a decimal without trailing zeros
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let rem = value % unit;
    if rem == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let frac = format!("{rem:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}
