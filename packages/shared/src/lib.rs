//! Utilities shared by the Hiroba binaries: logger setup and clock abstraction.

pub mod logger;
pub mod time;
