//! Glimmer Runtime - frame loop building blocks
//!
//! - `GameClock`: frame delta plus accumulated, pause-safe animation time
//! - `RuntimeSystem` / `FrameContext`: trait for systems ticked once per frame
//! - `SystemSchedule`: registered systems, updated in order

mod clock;
mod schedule;
mod system;

pub use clock::{GameClock, MAX_FRAME_DELTA};
pub use schedule::SystemSchedule;
pub use system::{AsAny, FrameContext, RuntimeSystem};
