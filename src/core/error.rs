// ============================================================================
// live-store - Errors
// ============================================================================
//
// The only typed error in the crate. Every other failure mode in this
// subsystem has a defined fallback value and never surfaces as a Result:
// missing host capabilities read as zero values, double-unsubscribe is a
// no-op, and decode failures fall back to the declared default.
// ============================================================================

use thiserror::Error;

/// Failure while encoding or decoding a persisted value.
///
/// Decode failures are recovered locally by the storage adapter (reported
/// via `tracing`, corrupt entry deleted, default returned); this type exists
/// so custom codecs have a uniform error to return.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stored raw entry could not be decoded.
    #[error("failed to decode stored value: {0}")]
    Decode(String),

    /// The value could not be encoded for persistence.
    #[error("failed to encode value: {0}")]
    Encode(String),
}
