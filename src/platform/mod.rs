//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (single-slot press queue)
//! - Storage lives in `persistence`

pub mod input;

pub use input::InputQueue;
