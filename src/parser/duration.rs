use std::convert::TryFrom;
use std::time::Duration;

use nom::{branch::alt, bytes::complete::tag, character::complete::digit1, combinator::all_consuming};

use super::result::{IResult, ParseError, Span};
use crate::error::{Error, Result};

/// Parses the `--timeout` value.
pub fn parse_duration(s: &str) -> Result<Duration> {
    match all_consuming(duration)(Span::new(s)) {
        Ok((_, d)) => Ok(d),
        Err(err) => {
            let err = ParseError::from(err);
            Err(Error::config(&format!(
                "invalid duration '{}': {}",
                s,
                err.message()
            )))
        }
    }
}

/// Parse Go-like duration string: `1s`, `1m30s`, `500ms`.
/// - Only positive durations.
/// - No fractional units.
/// - Units are always ordered from longest to shortest.
fn duration(input: Span) -> IResult<Duration> {
    let (rest, duration) = duration_inner(input, Unit::Hour)?;

    if duration.eq(&Duration::from_millis(0)) {
        return Err(nom::Err::Failure(ParseError::new(
            "duration must be greater than 0".to_owned(),
            input,
        )));
    }

    Ok((rest, duration))
}

enum Unit {
    Millisecond,
    Second, // 1000 milliseconds
    Minute, // 60 seconds
    Hour,   // 60 minutes
}

impl Unit {
    fn milliseconds(&self) -> u64 {
        use Unit::*;
        match self {
            Millisecond => 1,
            Second => 1000,
            Minute => 60 * 1000,
            Hour => 60 * 60 * 1000,
        }
    }

    fn descendant(&self) -> Option<Self> {
        use Unit::*;
        match self {
            Millisecond => None,
            Second => Some(Millisecond),
            Minute => Some(Second),
            Hour => Some(Minute),
        }
    }
}

impl TryFrom<&str> for Unit {
    type Error = Error;

    fn try_from(u: &str) -> Result<Self> {
        use Unit::*;

        match u {
            "h" => Ok(Hour),
            "m" => Ok(Minute),
            "s" => Ok(Second),
            "ms" => Ok(Millisecond),
            _ => Err(Error::config("unknown duration unit")),
        }
    }
}

fn duration_inner(input: Span, max_allowed_unit: Unit) -> IResult<Duration> {
    let (rest, multiplier) = digit1::<Span, ParseError>(input)?;

    let (rest, unit) = alt((
        tag::<_, Span, ParseError>("ms"),
        tag("s"),
        tag("m"),
        tag("h"),
    ))(rest)?;

    let unit = match Unit::try_from(*unit.fragment()) {
        Ok(unit) if unit.milliseconds() <= max_allowed_unit.milliseconds() => unit,
        _ => {
            return Err(nom::Err::Failure(ParseError::new(
                "invalid duration literal".to_owned(),
                input,
            )))
        }
    };

    let duration = multiplier
        .fragment()
        .parse::<u32>()
        .ok()
        .and_then(|m| Duration::from_millis(unit.milliseconds()).checked_mul(m));
    let duration = match duration {
        Some(d) => d,
        None => {
            return Err(nom::Err::Failure(ParseError::new(
                "duration overflow occurred".to_owned(),
                input,
            )))
        }
    };

    if let Some(next_unit) = unit.descendant() {
        let (rest, more_duration) = match duration_inner(rest, next_unit) {
            Ok((rest, more_duration)) => (rest, more_duration),
            Err(nom::Err::Error(_)) => (rest, Duration::from_millis(0)),
            Err(e) => return Err(e),
        };
        Ok((rest, duration + more_duration))
    } else {
        Ok((rest, duration))
    }
}
