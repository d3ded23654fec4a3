//! Platform abstraction layer
//!
//! Translates host events into simulation input and wall-clock time into
//! fixed ticks:
//! - `input`: key/pointer events to [`crate::sim::TickInput`]
//! - `time`: fixed-step accumulator

pub mod input;
pub mod time;

pub use input::{InputAdapter, Key, RawEvent};
pub use time::FixedStep;
