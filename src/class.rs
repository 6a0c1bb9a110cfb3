use crate::error::{CompileError, Result};

/// Upper bound used for `*`, `+` and `{m,}`.
pub const REPEAT_CAP: usize = 999;

/// Test whether `ch` belongs to the bracket class written as `set`.
///
/// A `-` with a character on both sides is a range between them; everything
/// else is a member as written.
pub fn class_contains(set: &str, ch: char) -> bool {
    if set.contains(ch) {
        return true;
    }
    let mut prev = None;
    let mut chars = set.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let (Some(lo), Some(&hi)) = (prev, chars.peek()) {
                if lo <= ch && ch <= hi {
                    return true;
                }
            }
        }
        prev = Some(c);
    }
    false
}

/// Read `min,max` from the text between `{` and `}`. Either side may be
/// omitted: a missing `min` is 0, a missing `max` is [`REPEAT_CAP`], raised
/// to `min` when the lower bound is written above it.
///
/// `position` is where the text starts in the pattern, for error reporting.
pub fn parse_bounds(text: &str, position: usize) -> Result<(usize, usize)> {
    let Some(comma) = text.find(',') else {
        return Err(CompileError::parse(position + text.len(), "`,` in repetition bounds"));
    };
    let min = parse_bound(&text[..comma], position)?.unwrap_or(0);
    let Some(max) = parse_bound(&text[comma + 1..], position + comma + 1)? else {
        return Ok((min, REPEAT_CAP.max(min)));
    };
    if min > max {
        return Err(CompileError::parse(
            position,
            format!("lower bound {min} not above upper bound {max}"),
        ));
    }
    Ok((min, max))
}

fn parse_bound(digits: &str, position: usize) -> Result<Option<usize>> {
    if digits.is_empty() {
        return Ok(None);
    }
    if let Some(bad) = digits.find(|c: char| !c.is_ascii_digit()) {
        return Err(CompileError::parse(position + bad, "digit in repetition bounds"));
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| CompileError::parse(position, "repetition bound that fits in usize"))
}
