//! Identifiers for controls and button clusters.
//!
//! IDs are UUID strings in hyphenated form. Entities created interactively get
//! a random v4 UUID; entities decoded from legacy payloads that carried no ID
//! get a UUIDv8 derived from their position, so decoding the same document
//! twice yields the same IDs.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Returns a new random ID.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Derives a UUIDv8 ID from input bytes using SHA-256.
///
/// ```text
/// hash = SHA-256(input_bytes)[0:16]
/// hash[6] = (hash[6] & 0x0F) | 0x80  // version 8
/// hash[8] = (hash[8] & 0x3F) | 0x80  // RFC 4122 variant
/// ```
pub fn derived_id(input: &[u8]) -> String {
    let hash = Sha256::digest(input);
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    bytes[6] = (bytes[6] & 0x0F) | 0x80;
    bytes[8] = (bytes[8] & 0x3F) | 0x80;

    Uuid::from_bytes(bytes).to_string()
}

/// Derives the ID of a legacy control from its position in the document.
///
/// ```text
/// id = derived_id("control:" || set_index || ":" || control_index || ":" || name)
/// ```
pub fn legacy_control_id(set_index: usize, control_index: usize, name: &str) -> String {
    derived_id(format!("control:{set_index}:{control_index}:{name}").as_bytes())
}
