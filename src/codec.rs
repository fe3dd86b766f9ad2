//! Board transport token: 49 digits, row-major, `0`=empty, `1`/`2`=owner.

use tracing::warn;

use crate::board::{Board, NUM_CELLS};
use crate::error::DecodeError;
use crate::types::{Player, Position};

pub fn encode(board: &Board) -> String {
    board
        .to_array()
        .iter()
        .map(|&cell| char::from(b'0' + cell))
        .collect()
}

pub fn decode(token: &str) -> Result<Board, DecodeError> {
    let actual = token.chars().count();
    if actual != NUM_CELLS {
        return Err(DecodeError::Length {
            expected: NUM_CELLS,
            actual,
        });
    }

    let mut board = Board::empty();
    for (index, symbol) in token.chars().enumerate() {
        let cell = match symbol {
            '0' => None,
            '1' => Some(Player::One),
            '2' => Some(Player::Two),
            _ => return Err(DecodeError::InvalidSymbol { index, symbol }),
        };
        board.set(Position::from_index(index), cell);
    }

    Ok(board)
}

/// Boundary form of [`decode`]: a malformed token becomes the empty board.
pub fn decode_or_empty(token: &str) -> Board {
    decode(token).unwrap_or_else(|err| {
        warn!(%err, "malformed board token, falling back to empty board");
        Board::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_TOKEN: &str = "1000002000000000000000000000000000000000002000001";

    #[test]
    fn seed_board_encodes_row_major() {
        assert_eq!(encode(&Board::new()), SEED_TOKEN);
        assert_eq!(encode(&Board::empty()), "0".repeat(49));
    }

    #[test]
    fn decode_restores_encoded_boards() {
        let mut mixed = Board::new();
        for (row, col, cell) in [(1, 1, Player::One), (2, 3, Player::Two), (3, 4, Player::Two)] {
            mixed.set(Position::new(row, col).unwrap(), Some(cell));
        }

        let mut boards = vec![Board::new(), Board::empty(), mixed];
        for player in [Player::One, Player::Two] {
            boards.extend(
                mixed
                    .all_moves(player)
                    .into_iter()
                    .map(|mv| mixed.apply_move(mv, player)),
            );
        }

        assert!(boards.len() > 40);
        for board in boards {
            let token = encode(&board);
            assert_eq!(token.len(), 49);
            assert_eq!(decode(&token), Ok(board), "token {token}");
        }
        assert_eq!(decode(SEED_TOKEN), Ok(Board::new()));
    }

    #[test]
    fn wrong_length_is_a_length_error() {
        assert_eq!(
            decode("123"),
            Err(DecodeError::Length {
                expected: 49,
                actual: 3
            })
        );
        assert!(matches!(decode(""), Err(DecodeError::Length { actual: 0, .. })));
        assert!(decode(&"0".repeat(50)).is_err());
    }

    #[test]
    fn non_cell_symbols_are_rejected() {
        let mut token = SEED_TOKEN.to_string();
        token.replace_range(5..6, "x");
        assert_eq!(
            decode(&token),
            Err(DecodeError::InvalidSymbol {
                index: 5,
                symbol: 'x'
            })
        );

        let digit_out_of_range = format!("3{}", &SEED_TOKEN[1..]);
        assert!(matches!(
            decode(&digit_out_of_range),
            Err(DecodeError::InvalidSymbol { index: 0, symbol: '3' })
        ));
    }

    #[test]
    fn malformed_tokens_fall_back_to_empty_board() {
        assert_eq!(decode_or_empty("garbage"), Board::empty());
        assert_eq!(decode_or_empty(&"9".repeat(49)), Board::empty());
        assert_eq!(decode_or_empty(&"é".repeat(49)), Board::empty());
        assert_eq!(decode_or_empty(SEED_TOKEN), Board::new());
    }
}
