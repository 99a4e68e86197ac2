//! Turning a line of player input into an index into the action list.

use crate::error::SelectionError;

/// Parse `input` as a choice among `available` options, numbered from zero.
///
/// Surrounding whitespace is ignored. Negative numbers and numbers past the
/// end of the list are out of range.
pub fn parse_selection(input: &str, available: usize) -> Result<usize, SelectionError> {
    if available == 0 {
        return Err(SelectionError::NoActions);
    }

    let trimmed = input.trim();
    let choice: i64 = trimmed.parse().map_err(|_| SelectionError::NotANumber {
        input: trimmed.to_string(),
    })?;

    match usize::try_from(choice) {
        Ok(index) if index < available => Ok(index),
        _ => Err(SelectionError::OutOfRange {
            choice,
            max: available - 1,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_choices() {
        assert_eq!(parse_selection("0", 3), Ok(0));
        assert_eq!(parse_selection("2", 3), Ok(2));
        assert_eq!(parse_selection("  1\n", 3), Ok(1));
    }

    #[test]
    fn test_not_a_number() {
        assert_eq!(
            parse_selection("abc", 3),
            Err(SelectionError::NotANumber {
                input: "abc".to_string()
            })
        );
        assert!(parse_selection("", 3).is_err());
        assert!(parse_selection("1.5", 3).is_err());
    }

    #[test]
    fn test_out_of_range() {
        let err = parse_selection("3", 3).unwrap_err();
        assert_eq!(err, SelectionError::OutOfRange { choice: 3, max: 2 });
        assert_eq!(
            err.to_string(),
            "Invalid choice. Please enter a number between 0 and 2"
        );

        assert_eq!(
            parse_selection("-1", 3),
            Err(SelectionError::OutOfRange { choice: -1, max: 2 })
        );
    }

    #[test]
    fn test_no_actions() {
        assert_eq!(parse_selection("0", 0), Err(SelectionError::NoActions));
    }
}
