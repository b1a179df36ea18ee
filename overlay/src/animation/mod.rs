//! Animation lifecycle management
//!
//! This module provides:
//! - **Tween**: the time-driven interpolation primitive (start/end value,
//!   optional midpoint keyframe, duration, easing curve)
//! - **Manager**: a name-keyed registry of running animations with an
//!   explicit per-slot state machine:
//!
//! ```text
//! Idle ──start──▶ Running ──┬─ natural end ─▶ Completed ─▶ Idle
//!                           └─ cancel/supersede ─▶ Canceled ─▶ Idle
//! ```
//!
//! At most one animation runs per name; starting under a live name cancels
//! and releases the old slot first. Completion side effects are plain data
//! (`Finish`) surfaced by `advance`, never stored callbacks, so canceling
//! everything at teardown structurally guarantees that no completion hook
//! can fire afterwards.

mod manager;
mod tween;


pub use manager::{AnimationManager, AnimationSpec, AnimationUpdate, Finish, Property, SlotState};
pub use tween::{Easing, Tween};
