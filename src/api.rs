//! wasm-bindgen exports consumed by the presentation layer.

use wasm_bindgen::prelude::*;

use crate::codec;
use crate::config::GameMode;
use crate::game;
use crate::id;
use crate::types::{Position, Request, Target};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

/// Runs one request. Takes a `Request` object and returns a `GameState`.
#[wasm_bindgen(js_name = handleRequest)]
pub fn handle_request(request: JsValue) -> Result<JsValue, JsValue> {
    let request: Request = serde_wasm_bindgen::from_value(request)?;
    to_js(&game::handle_request(&request))
}

/// Starts a fresh game; unknown modes play the computer.
#[wasm_bindgen(js_name = newGame)]
pub fn new_game(mode: &str) -> Result<JsValue, JsValue> {
    let request = Request {
        mode: Some(GameMode::parse_or_default(mode)),
        ..Request::default()
    };
    to_js(&game::handle_request(&request))
}

/// Highlight targets for the piece at `(row, col)` on an encoded board.
#[wasm_bindgen(js_name = validMoves)]
pub fn valid_moves(board: &str, row: u8, col: u8) -> Result<JsValue, JsValue> {
    to_js(&targets_for(board, row, col))
}

#[wasm_bindgen(js_name = newGameId)]
pub fn new_game_id() -> String {
    id::new_game_id()
}

fn targets_for(board: &str, row: u8, col: u8) -> Vec<Target> {
    let board = codec::decode_or_empty(board);
    Position::new(row, col)
        .map(|pos| board.valid_moves(pos).into_iter().map(Target::from).collect())
        .unwrap_or_default()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}
