//! Ledger transactions for the aurum asset engine.
//!
//! A transaction is a signed payload carrying a reference point, a fee
//! payer, and an ordered list of instructions. Instructions that prepare
//! state (account creation, mint creation) ride in the same transaction as
//! the primary operation so there is never a window where an account exists
//! but is uninitialized.

pub mod builder;
pub mod error;
pub mod instruction;
pub mod payload;
pub mod validation;

pub use builder::TransactionBuilder;
pub use error::TransactionError;
pub use instruction::Instruction;
pub use payload::{SignedTransaction, TransactionPayload};
pub use validation::validate_instruction;
