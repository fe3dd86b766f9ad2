use serde::{Deserialize, Serialize};

use crate::config::GameMode;

pub const BOARD_SIZE: u8 = 7;

/// One of the two sides. Serialized as its numeric tag (1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Player::from_tag(tag).ok_or_else(|| format!("invalid player tag: {tag}"))
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.tag()
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Returns `None` when the coordinate lies off the 7x7 grid.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self {
            row: (idx / BOARD_SIZE as usize) as u8,
            col: (idx % BOARD_SIZE as usize) as u8,
        }
    }

    /// Row-major index. Only meaningful for in-bounds positions.
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Chebyshev (king-move) distance.
    pub fn distance(self, other: Position) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// Distance 1; the origin stays occupied.
    Copy,
    /// Distance 2; the origin is vacated.
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
}

impl Move {
    /// Derives the kind from the distance between `from` and `to`.
    /// Returns `None` for any distance other than 1 or 2.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let kind = match from.distance(to) {
            1 => MoveKind::Copy,
            2 => MoveKind::Jump,
            _ => return None,
        };
        Some(Self { from, to, kind })
    }
}

/// Final outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Player),
    Tie,
}

/// Who controls the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Controller {
    Human,
    Computer,
}

/// A destination the selected piece may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Target {
    pub position: Position,
    pub kind: MoveKind,
}

impl From<Move> for Target {
    fn from(mv: Move) -> Self {
        Self {
            position: mv.to,
            kind: mv.kind,
        }
    }
}

/// A move as submitted by the client; validated before it touches the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
}

/// Per-request input from the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Encoded board token. Missing or empty starts a new game.
    pub board: Option<String>,
    pub select: Option<Position>,
    #[serde(rename = "move")]
    pub mv: Option<MoveRequest>,
    pub player: Option<u8>,
    pub mode: Option<GameMode>,
    pub game_id: Option<String>,
    /// Side controlled by the human in computer mode.
    pub human: Option<u8>,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub game_id: String,
    pub mode: GameMode,
    /// Transport token for the next request.
    pub board: String,
    /// 49 cell tags, row-major: 0=empty, 1=player one, 2=player two.
    pub cells: Vec<u8>,
    pub current_player: u8,
    /// `None` once the game is over.
    pub current_controller: Option<Controller>,
    pub selected: Option<Position>,
    pub targets: Vec<Target>,
    pub player_one_count: u8,
    pub player_two_count: u8,
    pub is_game_over: bool,
    pub result: Option<GameResult>,
    pub last_move: Option<Move>,
    pub computer_move: Option<Move>,
    /// Cells whose owner flipped because of `last_move`.
    pub converted: Vec<Position>,
    pub error: Option<String>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// 0 on a tie.
    pub winner: u8,
    pub player_one_count: u8,
    pub player_two_count: u8,
}
