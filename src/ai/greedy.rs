use crate::board::Board;
use crate::game::MoveSelector;
use crate::types::{Move, Player};

/// One-ply greedy opponent: plays the move that leaves `player` with the
/// most cells. No lookahead, no positional weighting.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySelector;

impl GreedySelector {
    /// Ties keep the first candidate in `Board::all_moves` order.
    pub fn choose_move(board: &Board, player: Player) -> Option<Move> {
        let mut best: Option<(Move, u8)> = None;

        for mv in board.all_moves(player) {
            let score = board.apply_move(mv, player).count_for(player);
            if is_better_move(score, best) {
                best = Some((mv, score));
            }
        }

        best.map(|(mv, _)| mv)
    }
}

impl MoveSelector for GreedySelector {
    fn select_move(&self, board: &Board, player: Player) -> Option<Move> {
        Self::choose_move(board, player)
    }
}

fn is_better_move(score: u8, best: Option<(Move, u8)>) -> bool {
    best.is_none_or(|(_, best_score)| score > best_score)
}
