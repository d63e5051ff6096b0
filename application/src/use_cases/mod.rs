//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod build_frame;
pub mod inspect_log;
pub mod watch_log;

#[cfg(test)]
pub(crate) mod test_support;
