//! Random token generation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

/// Generate a token from `num_bytes` random bytes, encoded URL-safe base64 without padding
///
/// Uses OsRng (OS-provided CSPRNG).
pub fn generate_token(num_bytes: usize) -> String {
    let mut bytes = vec![0u8; num_bytes];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(&bytes)
}
