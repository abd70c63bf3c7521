//! Unit-suffixed scalar parsing.

use super::ScalarParser;
use crate::context::CompileContext;
use crate::descriptor::Value;
use crate::error::{CompileError, Result};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

impl ScalarParser {
	pub(super) fn parse(self, text: &str, ctx: &CompileContext<'_>) -> Result<Value> {
		let malformed = |kind| CompileError::MalformedScalar {
			location: ctx.location(),
			text: text.to_string(),
			kind,
		};
		match self {
			Self::Text => Ok(Value::Text(text.to_string())),
			Self::Duration => parse_duration_secs(text).map(Value::Integer).ok_or_else(|| malformed("duration")),
			Self::Size => parse_size(text).map(Value::Integer).ok_or_else(|| malformed("size")),
		}
	}
}

/// Parses a duration (`ms`, `s`, `m`, `h`; bare numbers are milliseconds) into whole
/// seconds.
///
/// The magnitude is scaled by 1000, converted to milliseconds and truncated back to
/// seconds, so sub-second precision is lost: `"500ms"` is `0` and `"1.5s"` is `1`.
/// Downstream consumers rely on second granularity.
pub fn parse_duration_secs(text: &str) -> Option<i64> {
	let text = text.trim().to_lowercase();
	let (number, unit_millis) = if let Some(n) = text.strip_suffix("ms") {
		(n, 1)
	} else if let Some(n) = text.strip_suffix('s') {
		(n, MILLIS_PER_SECOND)
	} else if let Some(n) = text.strip_suffix('m') {
		(n, MILLIS_PER_MINUTE)
	} else if let Some(n) = text.strip_suffix('h') {
		(n, MILLIS_PER_HOUR)
	} else {
		(text.as_str(), 1)
	};

	let magnitude = parse_finite(number)?;
	let milli_units = (magnitude * 1000.0) as i64;
	let millis = milli_units.saturating_mul(unit_millis) / 1000;
	Some(millis / MILLIS_PER_SECOND)
}

/// Parses a byte size with an optional `b` and an optional `k`/`m`/`g`/`t` binary
/// multiplier. Fractional results are truncated.
pub fn parse_size(text: &str) -> Option<i64> {
	let text = text.trim().to_lowercase();
	let text = text.strip_suffix('b').unwrap_or(&text);
	let (number, shift) = match text.char_indices().last() {
		Some((i, 'k')) => (&text[..i], 10),
		Some((i, 'm')) => (&text[..i], 20),
		Some((i, 'g')) => (&text[..i], 30),
		Some((i, 't')) => (&text[..i], 40),
		_ => (text, 0),
	};
	let magnitude = parse_finite(number)?;
	Some((magnitude * (1u64 << shift) as f64) as i64)
}

fn parse_finite(number: &str) -> Option<f64> {
	number.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
