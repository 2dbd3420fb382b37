//! Input handling: pointer event types and the trail sampling throttle.

/// Platform-agnostic pointer events.
pub mod event;
/// Rate limiting for pointer-move driven trails.
pub mod mouse;

pub use event::PointerEvent;
pub use mouse::{TrailThrottle, TRAIL_INTERVAL};
