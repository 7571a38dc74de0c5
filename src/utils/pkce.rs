//! PKCE material and the provider's client-secret masking transform.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use sha2::{Digest, Sha256};

/// High-entropy code verifier: 32 random bytes, base64url encoded
/// (43 characters, all within the RFC 7636 unreserved set).
pub fn generate_code_verifier() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// S256 code challenge for a verifier.
pub fn code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// The provider requires the client secret to be sent masked:
/// base64 of sha256(secret + lowercase(client id)).
pub fn mask_client_secret(client_secret: &str, client_id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(client_secret.as_bytes());
    hasher.update(client_id.to_lowercase().as_bytes());
    STANDARD.encode(hasher.finalize())
}
