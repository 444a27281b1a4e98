//! Session identifier decoding.
//!
//! Session identifiers are minted by the platform and are opaque to every
//! caller. Internally they are a 2-character version tag followed by an
//! unpadded, URL-safe base64 encoding of a `~`-delimited claims string:
//!
//! ```text
//! 1_MX4xMjM0NTZ-fjE3MDAwMDAwMDAwMDB-...
//! ^^ ^-------------------------------- base64("1~123456~~1700000000000~...")
//! tag
//! ```
//!
//! The second claims field is the account that created the session. Nothing
//! else in the claims string is interpreted.
//!
//! The padding that the platform strips is restored by trial: the decoder
//! appends zero, one and then two `=` characters and accepts the first attempt
//! whose decoded text contains the delimiter. This bounded retry decides which
//! inputs are decodable and must be kept as is.
//!
//! Each attempt decodes leniently. ASCII characters outside the base64
//! alphabet are skipped and a trailing partial 4-character group is dropped,
//! so the claims of an unpadded id may lose their last one or two bytes. The
//! owner field sits near the front and survives.

use crate::errors::TokenError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

/// Length of the version tag preceding the encoded claims.
pub const SESSION_ID_PREFIX_LEN: usize = 2;

/// Maximum number of `=` characters appended while repairing padding.
pub const MAX_PADDING_REPAIR: usize = 2;

/// Delimiter of the decoded claims string.
pub const CLAIMS_DELIMITER: char = '~';

/// Index of the owning account field in the claims string.
const OWNER_FIELD_INDEX: usize = 1;

/// Standard alphabet; padding and non-zero trailing bits tolerated.
const SESSION_ID_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Size of one base64 group.
const GROUP_LEN: usize = 4;

/// Decode a session identifier into its `~`-delimited claims string.
///
/// # Errors
///
/// Returns `TokenError::MalformedSessionId` if the input is empty, too short
/// to carry the version tag, contains non-ASCII characters after the tag, or
/// none of the three padding attempts yields text containing `~`.
pub fn decode_claims(session_id: &str) -> Result<String, TokenError> {
    if session_id.is_empty() {
        tracing::debug!(target: "token.session_id", "Session id rejected: empty");
        return Err(TokenError::MalformedSessionId);
    }

    let encoded = session_id.get(SESSION_ID_PREFIX_LEN..).ok_or_else(|| {
        tracing::debug!(
            target: "token.session_id",
            length = session_id.len(),
            "Session id rejected: missing version tag"
        );
        TokenError::MalformedSessionId
    })?;

    if !encoded.is_ascii() {
        tracing::debug!(target: "token.session_id", "Session id rejected: non-ASCII body");
        return Err(TokenError::MalformedSessionId);
    }

    let normalized = encoded.replace('-', "+").replace('_', "/");

    for padding in 0..=MAX_PADDING_REPAIR {
        let candidate = whole_groups(&format!("{normalized}{}", "=".repeat(padding)));

        match SESSION_ID_ENGINE.decode(candidate.as_bytes()) {
            Ok(bytes) => {
                let text = latin1_to_string(&bytes);
                if text.contains(CLAIMS_DELIMITER) {
                    return Ok(text);
                }
                tracing::trace!(
                    target: "token.session_id",
                    padding = padding,
                    "Decoded text has no claims delimiter"
                );
            }
            Err(e) => {
                tracing::trace!(
                    target: "token.session_id",
                    padding = padding,
                    error = %e,
                    "Base64 decode attempt failed"
                );
            }
        }
    }

    tracing::debug!(
        target: "token.session_id",
        "Session id rejected: no padding attempt produced a claims string"
    );
    Err(TokenError::MalformedSessionId)
}

/// Recover the account identifier that owns a session.
///
/// The owner is returned as the raw claims field. Comparing it against an
/// account is the validator's job, so a non-numeric owner is not a decode
/// error here.
///
/// # Errors
///
/// Returns `TokenError::MalformedSessionId` if [`decode_claims`] fails or the
/// claims string has no non-empty second field.
pub fn decode_owner(session_id: &str) -> Result<String, TokenError> {
    let claims = decode_claims(session_id)?;

    claims
        .split(CLAIMS_DELIMITER)
        .nth(OWNER_FIELD_INDEX)
        .filter(|owner| !owner.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| {
            tracing::debug!(
                target: "token.session_id",
                "Session id rejected: claims string has no owner field"
            );
            TokenError::MalformedSessionId
        })
}

/// Keep only base64 alphabet and padding characters, cut to whole groups.
fn whole_groups(candidate: &str) -> String {
    let mut kept: String = candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    kept.truncate(kept.len() - kept.len() % GROUP_LEN);
    kept
}

/// Decode bytes as ISO-8859-1, where every byte is its own code point.
fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
