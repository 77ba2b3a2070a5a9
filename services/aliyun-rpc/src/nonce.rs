//! Per-request nonce generation.

use rpcsign_core::time::now;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Generate a `SignatureNonce`.
///
/// The nonce concatenates a random 128-bit identifier (hex), the current UTC
/// time in milliseconds and an id of the calling thread. The server uses it
/// to reject replays, so it only has to be unique, not secret.
pub fn generate_nonce() -> String {
    let id: [u8; 16] = rand::random();
    let millis = now().timestamp_millis();
    let thread = THREAD_ID.with(|id| *id);

    format!("{}{millis}{thread}", hex::encode(id))
}
