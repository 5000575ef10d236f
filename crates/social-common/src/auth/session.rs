//! Session identifiers

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// Random bytes per session id (256 bits)
const SESSION_ID_BYTES: usize = 32;

/// Generate an unguessable, cookie-safe session id
#[must_use]
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
