use crate::types::Position;

/// Errors raised while decoding a board token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("board token must be {expected} symbols, got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("invalid board symbol {symbol:?} at index {index}")]
    InvalidSymbol { index: usize, symbol: char },
}

/// Errors raised when a submitted move cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal move from {from} to {to}")]
    InvalidMove { from: Position, to: Position },

    #[error("game is already over")]
    GameOver,

    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("row/col out of range: ({row},{col})")]
    OutOfRange { row: u8, col: u8 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = DecodeError::Length {
            expected: 49,
            actual: 3,
        };
        assert_eq!(err.to_string(), "board token must be 49 symbols, got 3");

        let err = DecodeError::InvalidSymbol {
            index: 4,
            symbol: 'x',
        };
        assert_eq!(err.to_string(), "invalid board symbol 'x' at index 4");
    }

    #[test]
    fn game_error_display() {
        let err = GameError::InvalidMove {
            from: Position { row: 0, col: 0 },
            to: Position { row: 3, col: 3 },
        };
        assert_eq!(err.to_string(), "illegal move from (0,0) to (3,3)");
        assert_eq!(GameError::GameOver.to_string(), "game is already over");
        assert_eq!(
            GameError::OutOfRange { row: 9, col: 1 }.to_string(),
            "row/col out of range: (9,1)"
        );
    }
}
