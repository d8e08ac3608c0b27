//! Turns a raw input line into command groups.
//!
//! A line is split on [`GROUP_SEPARATOR`] first, then every piece is tokenized on
//! its own. A group may end with `> file`, which is removed from its argv and
//! recorded as the group's redirection target.

use crate::command::LaunchMode;
use crate::lexer;
use std::path::PathBuf;

/// Separates groups that run concurrently.
pub const GROUP_SEPARATOR: char = '&';

/// Redirects stdout and stderr of a group to a file.
pub const REDIRECT_MARKER: &str = ">";

/// One command of a line, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGroup {
    /// Command word followed by its arguments; never empty.
    pub argv: Vec<String>,
    /// File receiving stdout and stderr, if the group had `> file`.
    pub redirect: Option<PathBuf>,
    /// Whether the group is alone on its line or part of a concurrent batch.
    pub mode: LaunchMode,
}

impl CommandGroup {
    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> Vec<&str> {
        self.argv[1..].iter().map(String::as_str).collect()
    }
}

/// Errors that make a single group invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsingError {
    /// `>` was the last token.
    #[error("redirection without a target file")]
    MissingTarget,
    /// More than one token followed `>`.
    #[error("redirection followed by {0} tokens, expected exactly one")]
    ExtraTokens(usize),
    /// The token after `>` was another `>`.
    #[error("more than one redirection in a command")]
    RepeatedRedirect,
    /// Nothing precedes `>`.
    #[error("redirection without a command")]
    MissingCommand,
}

/// Splits a line on `&`, dropping pieces that hold only whitespace.
pub fn split_groups(line: &str) -> Vec<&str> {
    line.split(GROUP_SEPARATOR)
        .filter(|piece| !lexer::split_into_tokens(piece).is_empty())
        .collect()
}

/// Extracts the redirection from a non-empty token vector.
pub fn parse_group(
    mut tokens: Vec<String>,
    mode: LaunchMode,
) -> Result<CommandGroup, ParsingError> {
    let redirect = match tokens.iter().position(|t| t == REDIRECT_MARKER) {
        None => None,
        Some(marker) => {
            let target = match &tokens[marker + 1..] {
                [] => return Err(ParsingError::MissingTarget),
                [target] if target == REDIRECT_MARKER => {
                    return Err(ParsingError::RepeatedRedirect);
                }
                [target] => PathBuf::from(target),
                rest => return Err(ParsingError::ExtraTokens(rest.len())),
            };
            if marker == 0 {
                return Err(ParsingError::MissingCommand);
            }
            tokens.truncate(marker);
            Some(target)
        }
    };

    Ok(CommandGroup {
        argv: tokens,
        redirect,
        mode,
    })
}

/// Parses every group of `line`, in order.
///
/// A line with exactly one group yields a [`LaunchMode::Foreground`] group;
/// otherwise all groups are [`LaunchMode::Background`]. Invalid groups are
/// returned as errors in their position so the caller can skip just them.
pub fn parse_line(line: &str) -> Vec<Result<CommandGroup, ParsingError>> {
    let groups = split_groups(line);
    let mode = if groups.len() == 1 {
        LaunchMode::Foreground
    } else {
        LaunchMode::Background
    };
    groups
        .into_iter()
        .map(|piece| parse_group(lexer::split_into_tokens(piece), mode))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn single_group_is_foreground() {
        let groups = parse_line("ls -la /tmp\n");
        assert_eq!(
            groups,
            vec![Ok(CommandGroup {
                argv: argv(&["ls", "-la", "/tmp"]),
                redirect: None,
                mode: LaunchMode::Foreground,
            })]
        );
    }

    #[test]
    fn ampersand_splits_into_background_groups() {
        let groups: Vec<_> = parse_line("ls & pwd&echo hi")
            .into_iter()
            .map(Result::unwrap)
            .collect();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].argv, argv(&["ls"]));
        assert_eq!(groups[1].argv, argv(&["pwd"]));
        assert_eq!(groups[2].argv, argv(&["echo", "hi"]));
        assert!(groups.iter().all(|g| g.mode == LaunchMode::Background));
    }

    #[test]
    fn empty_pieces_are_dropped() {
        assert!(parse_line("").is_empty());
        assert!(parse_line("  \t\n").is_empty());
        assert!(parse_line("&  & &").is_empty());

        let groups = parse_line("ls & \t & ");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].as_ref().unwrap().mode, LaunchMode::Foreground);
    }

    #[test]
    fn redirection_is_stripped_from_argv() {
        let group =
            parse_group(argv(&["ls", "-l", ">", "out.txt"]), LaunchMode::Foreground).unwrap();
        assert_eq!(group.argv, argv(&["ls", "-l"]));
        assert_eq!(group.redirect, Some(PathBuf::from("out.txt")));
        assert_eq!(group.name(), "ls");
        assert_eq!(group.args(), vec!["-l"]);
    }

    #[test]
    fn redirection_needs_exactly_one_target() {
        assert_eq!(
            parse_group(argv(&["ls", ">"]), LaunchMode::Foreground),
            Err(ParsingError::MissingTarget)
        );
        assert_eq!(
            parse_group(argv(&["ls", ">", "f1", "f2"]), LaunchMode::Foreground),
            Err(ParsingError::ExtraTokens(2))
        );
        assert_eq!(
            parse_group(argv(&["ls", ">", "f1", ">", "f2"]), LaunchMode::Foreground),
            Err(ParsingError::ExtraTokens(3))
        );
        assert_eq!(
            parse_group(argv(&["ls", ">", ">"]), LaunchMode::Foreground),
            Err(ParsingError::RepeatedRedirect)
        );
        assert_eq!(
            parse_group(argv(&[">", "out"]), LaunchMode::Foreground),
            Err(ParsingError::MissingCommand)
        );
    }

    #[test]
    fn marker_must_be_its_own_token() {
        let group = parse_group(argv(&["ls>out"]), LaunchMode::Foreground).unwrap();
        assert_eq!(group.argv, argv(&["ls>out"]));
        assert_eq!(group.redirect, None);
    }

    #[test]
    fn invalid_group_keeps_its_position() {
        let groups = parse_line("ls > a b & pwd");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], Err(ParsingError::ExtraTokens(2)));
        assert_eq!(groups[1].as_ref().unwrap().argv, argv(&["pwd"]));
    }
}
