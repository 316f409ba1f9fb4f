use std::io::{self, BufRead, Write};

use crate::error::Result;

pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this user?";

/// Guard in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Asks on stdout and reads a y/N answer from stdin. Anything but `y`/`yes` declines.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{question} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }

        match read_line(&mut io::stdin().lock()) {
            Ok(Some(answer)) => is_yes(&answer),
            _ => false,
        }
    }
}

/// `--yes`: every confirmation is accepted.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

/// Read one line, `None` on end of input.
pub fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("Y\n"));
        assert!(is_yes(" yes "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_read_line() {
        let mut input = io::Cursor::new("first\r\nsecond\n");
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("first"));
        assert_eq!(read_line(&mut input).unwrap().as_deref(), Some("second"));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }

    #[test]
    fn test_assume_yes() {
        assert!(AssumeYes.confirm(DELETE_CONFIRMATION));
    }
}
