use std::sync::atomic::{AtomicU32, Ordering};

use web_time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Short opaque identifier for a new game: 8 lowercase hex characters.
/// Display-only; nothing in the engine reads it back.
pub fn new_game_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    game_id_from(nanos, COUNTER.fetch_add(1, Ordering::Relaxed))
}

fn game_id_from(nanos: u128, sequence: u32) -> String {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&sequence.to_le_bytes());
    format!("{:08x}", hasher.finalize())
}
