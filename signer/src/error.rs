use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("failed to read key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("key material is not valid base64: {0}")]
    BadEncoding(String),

    #[error("key material has wrong length: expected 32 bytes, got {0}")]
    BadLength(usize),

    #[error("payload could not be encoded for signing: {0}")]
    Payload(String),
}
