//! Deterministic cache keys.
//!
//! Keys are a sha256 over a canonical, field-ordered encoding, so two
//! logically equal requests always hash the same regardless of how the
//! request was constructed, and changing any one field changes the key.

use sha2::{Digest, Sha256};

use crate::types::GenerationRequest;

/// Cache key for a generation request.
pub fn generation_key(request: &GenerationRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"generate\x00");
    hasher.update(request.task.as_str().as_bytes());
    hasher.update(b"\x00");
    hasher.update(request.tone.as_str().as_bytes());
    hasher.update(b"\x00");
    hasher.update(request.length.as_str().as_bytes());
    hasher.update(b"\x00");
    hasher.update(request.language.as_str().as_bytes());
    hasher.update(b"\x00");
    hasher.update(request.persona.as_str().as_bytes());
    hasher.update(b"\x00");
    hasher.update(request.text.trim().as_bytes());
    hex_digest(hasher)
}

/// Cache key for a URL extraction.
pub fn extraction_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"extract\x00");
    hasher.update(url.trim().as_bytes());
    hex_digest(hasher)
}

fn hex_digest(hasher: Sha256) -> String {
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
