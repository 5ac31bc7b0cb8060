use thiserror::Error;

/// Errors from key handling and message encoding.
///
/// Derivation failures indicate malformed input and are never retried.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid private key scalar: zero or not below the curve order")]
    InvalidScalar,

    #[error("invalid public key: not a point on secp256k1")]
    InvalidPublicKey,

    #[error("invalid chunk index: sequence {sequence} of total {total}")]
    InvalidChunkIndex { sequence: u32, total: u32 },

    #[error("message is empty")]
    EmptyMessage,

    #[error("invalid hex encoding")]
    InvalidHex(#[from] hex::FromHexError),
}
