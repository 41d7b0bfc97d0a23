//! Content fingerprint of a user's three questionnaire rows.

use crate::error::Result;
use psyche_calc::RawPersonaAnswers;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Version of the derivation rules. Bump it whenever tables or formulas
/// change so every stored record reads as stale.
pub const DERIVATION_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct FingerprintInput<'a> {
    schema_version: u32,
    innate: &'a RawPersonaAnswers,
    surface: &'a RawPersonaAnswers,
    imposed: &'a RawPersonaAnswers,
}

/// Hex SHA-256 over the canonical JSON of the three rows.
pub fn fingerprint(
    innate: &RawPersonaAnswers,
    surface: &RawPersonaAnswers,
    imposed: &RawPersonaAnswers,
) -> Result<String> {
    let canonical = serde_json::to_vec(&FingerprintInput {
        schema_version: DERIVATION_SCHEMA_VERSION,
        innate,
        surface,
        imposed,
    })?;
    Ok(sha256_hex(&canonical))
}

/// Compute SHA-256 hex digest of data.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}
