use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction carries no instructions")]
    Empty,

    #[error("instruction amount must be non-zero")]
    ZeroAmount,

    #[error("transfer source and destination must differ")]
    SelfTransfer,

    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("royalty share {0} exceeds 10000 basis points")]
    RoyaltyOutOfRange(u16),

    #[error("creator share {0} exceeds 100 percent")]
    CreatorShareOutOfRange(u8),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("signature does not verify against the payload")]
    BadSignature,
}
