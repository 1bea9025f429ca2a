//! Core redaction engine for logscrub
//!
//! This crate contains:
//! - Address classification (loopback / private / public)
//! - Token scrubbing for fixed secret patterns
//! - Replacement bookkeeping and report rendering
//! - The per-run redaction session

pub mod address;
pub mod ledger;
pub mod session;
pub mod token;

pub use address::{AddressClassifier, AddressRole, Classification};
pub use ledger::{ReplacementEntry, ReplacementLedger};
pub use session::{RedactionOutcome, RedactionSession};
pub use token::TokenScrubber;
