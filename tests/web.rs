#![cfg(target_arch = "wasm32")]

use bacteria::api;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &JsValue::from_str(key)).unwrap()
}

fn position(row: u8, col: u8) -> JsValue {
    let pos = Object::new();
    Reflect::set(&pos, &"row".into(), &JsValue::from(row)).unwrap();
    Reflect::set(&pos, &"col".into(), &JsValue::from(col)).unwrap();
    pos.into()
}

#[wasm_bindgen_test]
fn wasm_is_ready() {
    assert!(api::wasm_ready());
}

#[wasm_bindgen_test]
fn new_game_returns_seed_board() {
    let state = api::new_game("human").unwrap();

    assert_eq!(
        get(&state, "board").as_string().unwrap(),
        "1000002000000000000000000000000000000000002000001"
    );
    assert_eq!(get(&state, "mode").as_string().unwrap(), "human");
    assert_eq!(get(&state, "current_player").as_f64(), Some(1.0));
    assert_eq!(get(&state, "game_id").as_string().unwrap().len(), 8);
}

#[wasm_bindgen_test]
fn handle_request_applies_move_and_computer_reply() {
    let mv = Object::new();
    Reflect::set(&mv, &"from".into(), &position(0, 0)).unwrap();
    Reflect::set(&mv, &"to".into(), &position(1, 1)).unwrap();

    let request = Object::new();
    Reflect::set(
        &request,
        &"board".into(),
        &"1000002000000000000000000000000000000000002000001".into(),
    )
    .unwrap();
    Reflect::set(&request, &"move".into(), &mv).unwrap();
    Reflect::set(&request, &"mode".into(), &"computer".into()).unwrap();
    Reflect::set(&request, &"game_id".into(), &"deadbeef".into()).unwrap();

    let state = api::handle_request(request.into()).unwrap();

    assert_eq!(get(&state, "game_id").as_string().unwrap(), "deadbeef");
    assert_eq!(get(&state, "player_one_count").as_f64(), Some(3.0));
    assert_eq!(get(&state, "player_two_count").as_f64(), Some(3.0));
    assert!(!get(&state, "computer_move").is_null());
    assert!(get(&state, "error").is_null() || get(&state, "error").is_undefined());
}

#[wasm_bindgen_test]
fn valid_moves_lists_copy_and_jump_targets() {
    let targets = api::valid_moves("1000002000000000000000000000000000000000002000001", 0, 0)
        .unwrap();
    let targets = Array::from(&targets);

    assert_eq!(targets.length(), 6);
    assert_eq!(get(&targets.get(0), "kind").as_string().unwrap(), "copy");
    assert_eq!(get(&targets.get(1), "kind").as_string().unwrap(), "jump");
}

#[wasm_bindgen_test]
fn malformed_request_is_a_js_error() {
    assert!(api::handle_request(JsValue::from_str("not an object")).is_err());
}
