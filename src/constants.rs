//! This module contains the fixed tuning constants of the engine.
//!
//! Anything a user would reasonably want to change lives in
//! [`crate::config::PetConfig`] instead; these are the internal thresholds
//! that define what "moving", "settled" and "facing" mean. Velocities are in
//! pixels per second, durations in seconds.

use std::time::Duration;

/// Target duration of one simulation tick (60 Hz).
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// Ticks per second at the target cadence, used to normalize per-tick
/// damping factors into rate-independent ones.
pub const TICK_RATE: f32 = 60.0;

/// Upper clamp for a single frame delta; protects against clock anomalies
/// (suspend/resume, debugger pauses) flinging the pet across the screen.
pub const MAX_DT: f32 = 0.25;

/// Horizontal speed above which the pet is considered walking.
pub const WALK_SPEED_THRESHOLD: f32 = 15.0;

/// Horizontal speed below which the mirror flag keeps its previous value.
pub const MIRROR_EPSILON: f32 = 3.0;

/// Downward speed below which a floor contact settles instead of bouncing.
pub const BOUNCE_REST_SPEED: f32 = 84.0;

/// Launch speeds with both components below this are treated as "no throw".
pub const MIN_THROW_SPEED: f32 = 12.0;

/// Number of drag samples retained while the pet is held.
pub const DRAG_SAMPLE_CAPACITY: usize = 12;

/// Preferred age gap between the release sample and the reference sample
/// when estimating throw velocity.
pub const DRAG_REFERENCE_WINDOW: f32 = 0.06;

/// Time the pointer must rest inside the pet before an escape jump fires.
pub const HOVER_TRIGGER_DELAY: f32 = 0.15;
