//! Parsing chat messages into game commands.
//!
//! Only messages starting with the configured prefix are commands;
//! everything else in the channel is none of our business.

use gridmatch_protocol::UserId;

/// A recognized chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Challenge another user to a game.
    Play { opponent: UserId },
}

/// Parses one message into a command, if it is one.
///
/// Returns `None` for anything that isn't a well-formed command —
/// ordinary chatter, unknown verbs, missing or malformed arguments.
/// A chat bot must never respond to messages not addressed to it.
pub fn parse_command(prefix: &str, content: &str) -> Option<Command> {
    let rest = content.strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    match words.next()? {
        "play" => {
            let opponent = parse_mention(words.next()?)?;
            Some(Command::Play { opponent })
        }
        _ => None,
    }
}

/// Extracts the user id from a mention token.
///
/// Chat services render mentions as `<@123>`, with a nickname variant
/// `<@!123>`; both resolve to the same user.
pub fn parse_mention(word: &str) -> Option<UserId> {
    let inner = word.strip_prefix("<@")?.strip_suffix('>')?;
    let inner = inner.strip_prefix('!').unwrap_or(inner);
    inner.parse().ok().map(UserId)
}
