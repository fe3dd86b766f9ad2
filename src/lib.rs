pub mod ai;
pub mod api;
pub mod board;
pub mod codec;
pub mod config;
pub mod error;
pub mod game;
pub mod id;
pub mod types;

pub use board::Board;
pub use config::{GameConfig, GameMode};
pub use error::{DecodeError, GameError};
pub use game::{GameInstance, MoveSelector, handle_request};
pub use types::{GameState, Move, MoveKind, Player, Position, Request};
