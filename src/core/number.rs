//! Called numbers and the text boundary that produces them.
//!
//! Collaborators (console loops, web forms) hand raw operator input to
//! `parse_called_number` before anything reaches the registry.
//!
//! ```
//! use bingo_tracker::core::{parse_called_number, InputError};
//!
//! assert_eq!(parse_called_number(" 42 "), Ok(42));
//! assert_eq!(parse_called_number("free"), Err(InputError::FreeCell));
//! assert_eq!(parse_called_number("76"), Err(InputError::OutOfRange(76)));
//! ```

use thiserror::Error;

/// Lowest number that can be called.
pub const MIN_NUMBER: u8 = 1;

/// Highest number that can be called.
pub const MAX_NUMBER: u8 = 75;

/// Check whether `n` is a callable number.
#[must_use]
pub const fn is_callable(n: u8) -> bool {
    n >= MIN_NUMBER && n <= MAX_NUMBER
}

/// Rejected operator input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no number entered")]
    Empty,

    #[error("FREE cannot be called")]
    FreeCell,

    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("{0} is outside 1-75")]
    OutOfRange(i64),
}

/// Parse operator text into a callable number.
pub fn parse_called_number(text: &str) -> Result<u8, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    if text.eq_ignore_ascii_case("free") {
        return Err(InputError::FreeCell);
    }

    let value: i64 = text
        .parse()
        .map_err(|_| InputError::NotANumber(text.to_string()))?;

    match u8::try_from(value) {
        Ok(n) if is_callable(n) => Ok(n),
        _ => Err(InputError::OutOfRange(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(!is_callable(0));
        assert!(is_callable(1));
        assert!(is_callable(75));
        assert!(!is_callable(76));
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse_called_number("1"), Ok(1));
        assert_eq!(parse_called_number("75"), Ok(75));
        assert_eq!(parse_called_number("\t13\n"), Ok(13));
        assert_eq!(parse_called_number("+8"), Ok(8));
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(parse_called_number(""), Err(InputError::Empty));
        assert_eq!(parse_called_number("   "), Err(InputError::Empty));
        assert_eq!(parse_called_number("FREE"), Err(InputError::FreeCell));
        assert_eq!(parse_called_number("Free"), Err(InputError::FreeCell));
        assert_eq!(
            parse_called_number("twelve"),
            Err(InputError::NotANumber("twelve".to_string()))
        );
        assert_eq!(
            parse_called_number("4.5"),
            Err(InputError::NotANumber("4.5".to_string()))
        );
        assert_eq!(parse_called_number("0"), Err(InputError::OutOfRange(0)));
        assert_eq!(parse_called_number("-3"), Err(InputError::OutOfRange(-3)));
        assert_eq!(parse_called_number("300"), Err(InputError::OutOfRange(300)));
    }
}
