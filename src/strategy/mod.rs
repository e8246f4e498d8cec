//! Decoding Strategy Module
//!
//! - Parallel: decode many independent documents on rayon's pool
//! - Session: owned buffer plus parked state for call-by-call decoding

pub mod parallel;
pub mod session;

pub use parallel::decode_parallel;
pub use session::Session;
