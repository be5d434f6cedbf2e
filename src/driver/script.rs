//! Job script parsing.
//!
//! A script holds one command per line:
//!
//! ```text
//! p 3     submit a job with value 3
//! w 2     producer pauses for 2 time units
//! ```
//!
//! Blank lines are ignored. Anything else is rejected with the line number;
//! a script is parsed completely before any worker starts, so a malformed
//! record halts the run instead of being skipped.

use crate::core::{Result, SumsqError};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One producer directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Submit a job with this value
    Push(i64),
    /// Pause the producer for this many time units
    Wait(u64),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Push(value) => write!(f, "p {}", value),
            Command::Wait(units) => write!(f, "w {}", units),
        }
    }
}

/// Parse one non-blank line
fn parse_line(line_no: usize, line: &str) -> Result<Command> {
    let mut fields = line.split_whitespace();
    let (Some(action), Some(arg), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(SumsqError::script(
            line_no,
            format!("expected '<action> <number>', got '{}'", line.trim()),
        ));
    };

    match action {
        "p" => i64::from_str(arg).map(Command::Push).map_err(|e| {
            SumsqError::script(line_no, format!("invalid job value '{}': {}", arg, e))
        }),
        "w" => u64::from_str(arg).map(Command::Wait).map_err(|e| {
            SumsqError::script(line_no, format!("invalid wait duration '{}': {}", arg, e))
        }),
        other => Err(SumsqError::script(
            line_no,
            format!("unrecognized action '{}'", other),
        )),
    }
}

/// Parse a whole script
pub fn parse_script(source: &str) -> Result<Vec<Command>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line(idx + 1, line))
        .collect()
}

/// Read and parse a script file
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<Command>> {
    let source = std::fs::read_to_string(path.as_ref())?;
    parse_script(&source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let script = "p 3\nw 2\np -4\n\n  p 10  \n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Push(3),
                Command::Wait(2),
                Command::Push(-4),
                Command::Push(10),
            ]
        );
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_script("").unwrap().is_empty());
        assert!(parse_script("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_action() {
        let err = parse_script("p 1\nx 5\n").unwrap_err();
        match err {
            SumsqError::Script { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("unrecognized action 'x'"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_script("p 1\np 2\np three\n").unwrap_err();
        assert!(matches!(err, SumsqError::Script { line: 3, .. }));

        let err = parse_script("w -1\n").unwrap_err();
        assert!(matches!(err, SumsqError::Script { line: 1, .. }));
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            parse_script("p\n").unwrap_err(),
            SumsqError::Script { line: 1, .. }
        ));
        assert!(matches!(
            parse_script("p 1 2\n").unwrap_err(),
            SumsqError::Script { line: 1, .. }
        ));
    }

    #[test]
    fn test_display_round_trip() {
        let commands = vec![Command::Push(-7), Command::Wait(3)];
        let rendered: Vec<String> = commands.iter().map(ToString::to_string).collect();
        assert_eq!(parse_script(&rendered.join("\n")).unwrap(), commands);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_script("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, SumsqError::Io(_)));
    }
}
