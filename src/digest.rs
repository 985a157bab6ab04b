use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use sha2::{Digest, Sha512};

/// SHA-512 of `secret`, encoded as URL-safe base64 with padding.
pub fn digest(secret: &[u8]) -> String {
    URL_SAFE.encode(Sha512::digest(secret))
}
