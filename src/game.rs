use tracing::{debug, instrument, warn};

use crate::ai::GreedySelector;
use crate::board::Board;
use crate::codec;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::id;
use crate::types::{
    Controller, GameResult, GameState, Move, Outcome, Player, Position, Request, Target,
};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, player: Player) -> Option<Move>;
}

pub struct GameInstance {
    board: Board,
    pub current_player: Player,
    pub selected: Option<Position>,
    pub config: GameConfig,
    /// Last move applied, human or computer.
    pub last_move: Option<Move>,
    pub computer_move: Option<Move>,
    pub converted: Vec<Position>,
    evaluator: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, evaluator: Box<dyn MoveSelector>) -> Self {
        Self::from_parts(Board::new(), Player::One, config, evaluator)
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(GreedySelector))
    }

    /// Resumes a game from state carried by the client.
    pub fn from_parts(
        board: Board,
        current_player: Player,
        config: GameConfig,
        evaluator: Box<dyn MoveSelector>,
    ) -> Self {
        Self {
            board,
            current_player,
            selected: None,
            config,
            last_move: None,
            computer_move: None,
            converted: Vec::new(),
            evaluator,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn is_computer_turn(&self) -> bool {
        self.config.is_computer(self.current_player)
    }

    /// Marks `pos` as selected when it holds a piece of the side to move.
    /// Anything else clears the selection.
    pub fn select(&mut self, pos: Position) -> bool {
        self.selected = (self.board.get(pos) == Some(self.current_player)).then_some(pos);
        self.selected.is_some()
    }

    /// Legal destinations for the selected piece.
    pub fn targets(&self) -> Vec<Target> {
        self.selected
            .map(|pos| {
                self.board
                    .valid_moves(pos)
                    .into_iter()
                    .map(Target::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Plays a move for the side to move, then lets the computer reply when
    /// it is its turn. On error the board is left unchanged.
    pub fn play(&mut self, from: Position, to: Position) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if self.is_computer_turn() {
            return Err(GameError::NotYourTurn);
        }

        let player = self.current_player;
        let mv = self.legal_move(from, to, player)?;
        self.apply_move(mv, player);
        self.selected = None;
        self.computer_move = None;

        if self.is_computer_turn() && !self.is_game_over() {
            self.do_ai_move()?;
        }

        Ok(())
    }

    /// Lets the selector pick a move for the computer side. With no legal
    /// move the board stays as it is and the turn returns to the human.
    pub fn do_ai_move(&mut self) -> Result<Option<Move>, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.is_computer_turn() {
            return Err(GameError::NotYourTurn);
        }

        let player = self.current_player;
        let selected = match self.evaluator.select_move(&self.board, player) {
            Some(mv) => self.legal_move(mv.from, mv.to, player)?,
            None => {
                debug!(?player, "computer has no legal move, passing");
                self.current_player = player.opponent();
                return Ok(None);
            }
        };

        debug!(?player, from = %selected.from, to = %selected.to, "computer reply");
        self.apply_move(selected, player);
        self.computer_move = Some(selected);
        Ok(Some(selected))
    }

    pub fn to_game_state(&self, game_id: &str) -> GameState {
        let (player_one_count, player_two_count) = self.board.count();
        let is_game_over = self.is_game_over();
        let current_controller = (!is_game_over).then(|| {
            if self.is_computer_turn() {
                Controller::Computer
            } else {
                Controller::Human
            }
        });

        GameState {
            game_id: game_id.to_string(),
            mode: self.config.mode,
            board: codec::encode(&self.board),
            cells: self.board.to_array().to_vec(),
            current_player: self.current_player.tag(),
            current_controller,
            selected: self.selected,
            targets: self.targets(),
            player_one_count,
            player_two_count,
            is_game_over,
            result: self.to_game_result(),
            last_move: self.last_move,
            computer_move: self.computer_move,
            converted: self.converted.clone(),
            error: None,
        }
    }

    /// `None` while the game is still running.
    pub fn to_game_result(&self) -> Option<GameResult> {
        let (player_one_count, player_two_count) = self.board.count();
        self.board.outcome().map(|outcome| GameResult {
            winner: match outcome {
                Outcome::Winner(player) => player.tag(),
                Outcome::Tie => 0,
            },
            player_one_count,
            player_two_count,
        })
    }

    fn legal_move(
        &self,
        from: Position,
        to: Position,
        player: Player,
    ) -> Result<Move, GameError> {
        for pos in [from, to] {
            if !pos.is_on_board() {
                return Err(GameError::OutOfRange {
                    row: pos.row,
                    col: pos.col,
                });
            }
        }
        if self.board.get(from) != Some(player) {
            return Err(GameError::InvalidMove { from, to });
        }

        self.board
            .valid_moves(from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(GameError::InvalidMove { from, to })
    }

    fn apply_move(&mut self, mv: Move, player: Player) {
        self.converted = self.board.conversions(mv.to, player);
        self.board = self.board.apply_move(mv, player);
        self.last_move = Some(mv);
        self.current_player = player.opponent();
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.selected = None;
        self.last_move = None;
        self.computer_move = None;
        self.converted.clear();
    }
}

/// Runs one request through the game: decode, select, move, computer reply,
/// encode. Rejected moves leave the board unchanged and are reported in
/// `GameState::error`.
pub fn handle_request(request: &Request) -> GameState {
    handle_request_with(request, Box::new(GreedySelector))
}

#[instrument(skip_all, fields(game_id = tracing::field::Empty))]
pub fn handle_request_with(request: &Request, evaluator: Box<dyn MoveSelector>) -> GameState {
    let game_id = match request.game_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => id::new_game_id(),
    };
    tracing::Span::current().record("game_id", game_id.as_str());

    let config = GameConfig::from_request(request);
    let current_player = match request.player {
        Some(tag) => Player::from_tag(tag).unwrap_or_else(|| {
            warn!(tag, "invalid player tag, defaulting to player one");
            Player::One
        }),
        None => Player::One,
    };

    let (board, fresh) = match request.board.as_deref() {
        Some(token) if !token.is_empty() => (codec::decode_or_empty(token), false),
        _ => (Board::new(), true),
    };

    let mut game = GameInstance::from_parts(board, current_player, config, evaluator);
    let mut error = None;

    if fresh {
        debug!(mode = ?config.mode, "new game");
        if game.is_computer_turn() && !game.is_game_over() {
            // Computer owns the opening move.
            if let Err(err) = game.do_ai_move() {
                error = Some(err.to_string());
            }
        }
    }

    if let Some(pos) = request.select
        && !game.select(pos)
    {
        debug!(%pos, "ignoring selection of a cell the side to move does not own");
    }

    if let Some(mv) = request.mv {
        match game.play(mv.from, mv.to) {
            Ok(()) => debug!(from = %mv.from, to = %mv.to, "move applied"),
            Err(err) => {
                warn!(%err, "move rejected");
                error = Some(err.to_string());
            }
        }
    }

    let mut state = game.to_game_state(&game_id);
    state.error = error;
    state
}
