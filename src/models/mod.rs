//! Domain records and request payloads.

pub mod memory;
pub mod user;

pub use memory::{Memory, MemoryInput, MemorySummary, EXCERPT_CHARS};
pub use user::{User, UserInput};
