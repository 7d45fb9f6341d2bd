//! Error types for the protocol layer.

/// Errors that can occur when interpreting external input.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The reaction string doesn't map to any known [`Symbol`](crate::Symbol).
    ///
    /// The chat service lets users react with arbitrary emoji; anything
    /// outside the game's fixed symbol set ends up here.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// A digit index outside the grid range (valid indices are 0–2).
    #[error("digit index {0} out of range")]
    DigitOutOfRange(usize),
}
