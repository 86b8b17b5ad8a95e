use thiserror::Error;

/// Driver-level failures. The resolver itself never errors: an invalid
/// pit simply produces no steps.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("a move is already in progress")]
    MoveInProgress,

    #[error("game is already over")]
    GameOver,

    #[error("illegal move: pit {pit}")]
    InvalidMove { pit: usize },

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("invalid player: {0}")]
    InvalidPlayer(u8),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(
            GameError::InvalidMove { pit: 9 }.to_string(),
            "illegal move: pit 9"
        );
        assert_eq!(GameError::InvalidPlayer(3).to_string(), "invalid player: 3");
    }
}
