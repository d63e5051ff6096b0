//! Live worker status tracking
//!
//! Each in-flight round owns a [`WorkerRoster`]: a slot-indexed mapping of
//! [`WorkerStatus`] records that the builder updates as pending, complete
//! and aborted events arrive. A status reaches a terminal state exactly
//! once; later terminal events for the same slot are ignored.

pub mod status;

pub use status::{WorkerRoster, WorkerStatus};
