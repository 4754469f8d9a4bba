//! The engine's operating identity.
//!
//! [`SigningAuthority`] owns the keypair that pays fees, holds mint
//! authority, and signs every transaction the engine submits. The private
//! key never leaves this crate: callers get the owner address, the public
//! key, and a `sign` method, nothing else.

mod authority;
mod error;

pub use authority::SigningAuthority;
pub use error::SignerError;
