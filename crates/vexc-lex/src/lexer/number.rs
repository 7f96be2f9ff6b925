//! Real-literal body scanning.

use crate::cursor::Cursor;
use super::operator::is_unary_sign;

/// Consumes a real literal starting at the cursor's current position and
/// returns its verbatim spelling.
///
/// A literal is an optional unary sign, then a digit run containing at
/// most one `.`. A second `.` is left unconsumed for the next token
/// rather than folded into this one, so `1..2` lexes as `1.` then `.2`
/// (both malformed) instead of silently swallowing the stray dot.
pub fn scan_real<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    let start = cursor.position();

    if is_unary_sign(cursor.current()) {
        cursor.advance();
    }

    let mut seen_dot = false;
    loop {
        let c = cursor.current();
        if c.is_ascii_digit() {
            cursor.advance();
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            cursor.advance();
        } else {
            break;
        }
    }

    cursor.slice_from(start)
}
