/// Reasons a move is refused. All of them leave the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("game-not-active")]
    GameNotActive,

    #[error("not-your-turn")]
    NotYourTurn,

    #[error("invalid-row")]
    InvalidRow,

    #[error("row-full")]
    RowFull,
}

/// Errors that can occur while reading the server configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    NotANumber { name: &'static str, value: String },

    #[error("board size must be at least 1")]
    EmptyBoard,

    #[error("win length {win_length} must be between 1 and the board size {size}")]
    WinLength { win_length: usize, size: usize },
}

impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
