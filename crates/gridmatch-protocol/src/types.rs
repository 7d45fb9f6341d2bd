//! Core types shared across Gridmatch layers.
//!
//! Everything here is small, cheap to copy (or clone), and serializable,
//! so higher layers can log it, snapshot it, and pass it between tasks
//! without ceremony.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a user on the external chat service.
///
/// Newtype over `u64` so a user id can't be confused with a message id
/// even though both are plain integers underneath.
/// `#[serde(transparent)]` keeps the JSON form a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// A unique identifier for a message published on the chat surface.
///
/// Every game session lives on exactly one message; reaction events
/// carry the message id so the registry can route them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M-{}", self.0)
    }
}

/// A unique identifier for a running game session.
///
/// Assigned by the session registry; never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PlayerHandle
// ---------------------------------------------------------------------------

/// A resolved player: their identity plus the text used to address them.
///
/// Identity resolution is the chat service's job — by the time a handle
/// reaches the session layer, the mention string is already final.
/// `Display` prints the mention, so handles can be dropped straight into
/// rendered payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHandle {
    /// The user's identity on the chat service.
    pub id: UserId,
    /// How to address them in message text (e.g. `<@42>`).
    pub mention: String,
}

impl PlayerHandle {
    /// Creates a handle from an id and its mention text.
    pub fn new(id: UserId, mention: impl Into<String>) -> Self {
        Self {
            id,
            mention: mention.into(),
        }
    }
}

impl fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mention)
    }
}

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// One of the three digit symbols, doubling as a grid index.
///
/// A digit means "column N" during column selection and "row N" during
/// row selection. Row digits are labeled bottom-up on the rendered
/// board, so the session inverts them before touching storage — the
/// digit itself is just an index 0–2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Digit {
    One,
    Two,
    Three,
}

impl Digit {
    /// All digits in display order.
    pub const ALL: [Digit; 3] = [Digit::One, Digit::Two, Digit::Three];

    /// Maps a zero-based grid index to its digit.
    pub fn from_index(index: usize) -> Result<Self, ProtocolError> {
        match index {
            0 => Ok(Digit::One),
            1 => Ok(Digit::Two),
            2 => Ok(Digit::Three),
            n => Err(ProtocolError::DigitOutOfRange(n)),
        }
    }

    /// The zero-based grid index this digit stands for.
    pub fn index(self) -> usize {
        match self {
            Digit::One => 0,
            Digit::Two => 1,
            Digit::Three => 2,
        }
    }

    /// The reaction string for this digit.
    pub fn as_str(self) -> &'static str {
        match self {
            Digit::One => "1⃣",
            Digit::Two => "2⃣",
            Digit::Three => "3⃣",
        }
    }
}

/// A reaction symbol the game recognizes.
///
/// The full set is fixed: two invitation symbols plus the three digits.
/// Which subset is currently accepted is the input gate's business, not
/// the symbol's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Accept an invitation.
    Accept,
    /// Decline an invitation.
    Decline,
    /// Pick a column or row.
    Digit(Digit),
}

impl Symbol {
    /// The reaction string for this symbol, as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Accept => "✅",
            Symbol::Decline => "❎",
            Symbol::Digit(d) => d.as_str(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "✅" => Ok(Symbol::Accept),
            "❎" => Ok(Symbol::Decline),
            "1⃣" => Ok(Symbol::Digit(Digit::One)),
            "2⃣" => Ok(Symbol::Digit(Digit::Two)),
            "3⃣" => Ok(Symbol::Digit(Digit::Three)),
            other => Err(ProtocolError::UnknownSymbol(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// InputEvent
// ---------------------------------------------------------------------------

/// One symbol press, as delivered by the chat surface.
///
/// This is the only thing the outside world can do to a running game.
/// The event says nothing about validity — the input gate decides that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// The message the symbol was pressed on.
    pub message: MessageId,
    /// Who pressed it.
    pub actor: UserId,
    /// Which symbol.
    pub symbol: Symbol,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId(7).to_string(), "U-7");
    }

    #[test]
    fn test_message_id_display() {
        assert_eq!(MessageId(3).to_string(), "M-3");
    }

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId(9).to_string(), "S-9");
    }

    #[test]
    fn test_player_handle_displays_mention() {
        let handle = PlayerHandle::new(UserId(42), "<@42>");
        assert_eq!(handle.to_string(), "<@42>");
        assert_eq!(handle.id, UserId(42));
    }

    #[test]
    fn test_digit_index_round_trip() {
        for (i, digit) in Digit::ALL.iter().enumerate() {
            assert_eq!(digit.index(), i);
            assert_eq!(Digit::from_index(i).unwrap(), *digit);
        }
    }

    #[test]
    fn test_digit_from_index_rejects_out_of_range() {
        assert!(matches!(
            Digit::from_index(3),
            Err(ProtocolError::DigitOutOfRange(3))
        ));
    }

    #[test]
    fn test_symbol_parse_round_trip() {
        let all = [
            Symbol::Accept,
            Symbol::Decline,
            Symbol::Digit(Digit::One),
            Symbol::Digit(Digit::Two),
            Symbol::Digit(Digit::Three),
        ];
        for symbol in all {
            let parsed: Symbol = symbol.as_str().parse().unwrap();
            assert_eq!(parsed, symbol);
        }
    }

    #[test]
    fn test_symbol_parse_rejects_unknown() {
        let result = "🎲".parse::<Symbol>();
        assert!(matches!(result, Err(ProtocolError::UnknownSymbol(_))));
    }

    #[test]
    fn test_input_event_serde_round_trip() {
        let event = InputEvent {
            message: MessageId(5),
            actor: UserId(2),
            symbol: Symbol::Digit(Digit::Two),
        };
        let bytes = serde_json::to_vec(&event).unwrap();
        let decoded: InputEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(event, decoded);
    }
}
