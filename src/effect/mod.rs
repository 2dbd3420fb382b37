//! Effect instances, their bounded queues, and the manager that drives
//! them.

mod instance;
mod manager;
mod queue;

pub use instance::{EffectId, EffectInstance, EffectKind, Position, RIPPLE_LIFETIME};
pub use manager::{EffectManager, Host, Subscriptions, TRAIL_CAPACITY};
pub use queue::BoundedQueue;
