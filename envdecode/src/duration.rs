//! Parsing of unit-suffixed durations such as `300ms`, `1m30s` or `1.5h`

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Errors produced while parsing a duration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("duration is empty")]
    Empty,

    #[error("negative durations are not supported")]
    Negative,

    #[error("expected a number at {0:?}")]
    InvalidNumber(String),

    #[error("missing unit after {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {0:?}")]
    UnknownUnit(String),

    #[error("duration is too large")]
    Overflow,
}

/// Parse a duration made of one or more `<number><unit>` components.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. Numbers may carry
/// a fractional part. A bare `0` is accepted without a unit.
pub fn parse(input: &str) -> Result<Duration, DurationError> {
    if input.starts_with('-') {
        return Err(DurationError::Negative);
    }
    let mut rest = input.strip_prefix('+').unwrap_or(input);

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationError::Empty);
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let number_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_end);

        let unit_end = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_end);

        if number.is_empty() {
            return Err(DurationError::InvalidNumber(rest.to_owned()));
        }
        if unit.is_empty() {
            return Err(DurationError::MissingUnit(number.to_owned()));
        }

        let nanos = scale(number, unit_nanos(unit)?)?;
        total = total.checked_add(nanos).ok_or(DurationError::Overflow)?;
        rest = tail;
    }

    let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| DurationError::Overflow)?;
    // Always below one second, so the cast is lossless.
    let subsec = (total % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, subsec))
}

fn unit_nanos(unit: &str) -> Result<u128, DurationError> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 60 * 60 * NANOS_PER_SEC,
        other => return Err(DurationError::UnknownUnit(other.to_owned())),
    };
    Ok(nanos)
}

/// Multiply a decimal `number` by `unit` nanoseconds, truncating below 1ns.
fn scale(number: &str, unit: u128) -> Result<u128, DurationError> {
    let invalid = || DurationError::InvalidNumber(number.to_owned());

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(invalid());
    }

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| DurationError::Overflow)?
    };
    let mut nanos = whole.checked_mul(unit).ok_or(DurationError::Overflow)?;

    let mut place = unit;
    for digit in fraction.bytes() {
        place /= 10;
        if place == 0 {
            break;
        }
        nanos = nanos
            .checked_add(u128::from(digit - b'0') * place)
            .ok_or(DurationError::Overflow)?;
    }

    Ok(nanos)
}
