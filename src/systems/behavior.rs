//! The behavior controller: random hops, walk pushes and pointer-escape
//! jumps, all gated by cooldown timestamps on the simulation clock.

use bevy_ecs::system::{Query, Res, ResMut};
use rand::rngs::SmallRng;
use rand::Rng;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::PetConfig;
use crate::constants::{HOVER_TRIGGER_DELAY, WALK_SPEED_THRESHOLD};
use crate::systems::components::{
    BehaviorTimers, Body, DragState, HoverState, PetRng, Position, SimClock, Velocity,
};

/// A discrete action decided for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BehaviorEvent {
    /// Add a horizontal velocity delta (random walk push).
    Push { dvx: f32 },
    /// Leave the ground with the given upward speed.
    Hop { impulse: f32 },
    /// Escape jump away from the pointer: upward impulse plus a horizontal
    /// push whose sign points away from the pointer.
    EscapeHop { impulse: f32, push: f32 },
}

/// Read-only view of the pet handed to [`decide`].
#[derive(Debug, Clone, Copy)]
pub struct BehaviorContext {
    pub now: f32,
    pub on_ground: bool,
    pub vx: f32,
    /// Horizontal center of the pet, screen coordinates.
    pub center_x: f32,
    pub dragging: bool,
    pub hover: HoverState,
}

/// Decides this tick's discrete events and advances the timers they consume.
///
/// The escape jump preempts everything else for the tick: a pet fleeing the
/// pointer should not also wander. A push whose sign would reverse the
/// current horizontal motion is suppressed until the turn cooldown elapses;
/// applying one starts the next cooldown.
pub fn decide(
    ctx: &BehaviorContext,
    timers: &mut BehaviorTimers,
    config: &PetConfig,
    rng: &mut SmallRng,
) -> SmallVec<[BehaviorEvent; 4]> {
    let mut events = SmallVec::new();
    if ctx.dragging {
        return events;
    }

    if ctx.hover.inside && ctx.on_ground {
        if let Some(pointer) = ctx.hover.pointer {
            let settled = ctx.now - ctx.hover.entered_at >= HOVER_TRIGGER_DELAY;
            if settled && ctx.now >= timers.hover_cooldown_until {
                let push = escape_direction(ctx.center_x, pointer.x) * random_push_magnitude(config, rng);
                events.push(BehaviorEvent::EscapeHop {
                    impulse: config.physics.hover_impulse,
                    push,
                });
                timers.hover_cooldown_until = ctx.now + config.physics.hover_cooldown_ms as f32 / 1000.0;
                timers.next_hop_at = ctx.now + random_interval(config.physics.hop_interval_ms, rng);
                timers.next_push_at = ctx.now + random_interval(config.movement.walk_interval_ms, rng);
                return events;
            }
        }
    }

    if ctx.on_ground && ctx.now >= timers.next_hop_at {
        events.push(BehaviorEvent::Hop {
            impulse: config.physics.hop_impulse,
        });
        timers.next_hop_at = ctx.now + random_interval(config.physics.hop_interval_ms, rng);
    }

    if ctx.on_ground && ctx.now >= timers.next_push_at && ctx.vx.abs() < WALK_SPEED_THRESHOLD {
        let magnitude = random_push_magnitude(config, rng);
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let dvx = sign * magnitude;

        let reverses = ctx.vx * dvx < 0.0;
        if !reverses || ctx.now >= timers.turn_cooldown_until {
            if reverses {
                timers.turn_cooldown_until = ctx.now + config.movement.turn_cooldown_ms as f32 / 1000.0;
            }
            events.push(BehaviorEvent::Push { dvx });
            timers.next_push_at = ctx.now + random_interval(config.movement.walk_interval_ms, rng);
        }
        // A suppressed push is retried next tick; its interval is not reset.
    }

    events
}

/// Pushes away from the pointer: positive when the pet's center is to the
/// right of it. A pointer dead-center pushes right.
fn escape_direction(center_x: f32, pointer_x: f32) -> f32 {
    if center_x - pointer_x < 0.0 {
        -1.0
    } else {
        1.0
    }
}

fn random_push_magnitude(config: &PetConfig, rng: &mut SmallRng) -> f32 {
    let (min, max) = config.movement.walk_speed_range;
    rng.random_range(min..=max)
}

fn random_interval(range_ms: (u32, u32), rng: &mut SmallRng) -> f32 {
    rng.random_range(range_ms.0..=range_ms.1) as f32 / 1000.0
}

/// Applies this tick's decided events to the pet.
pub fn behavior_system(
    clock: Res<SimClock>,
    config: Res<PetConfig>,
    mut rng: ResMut<PetRng>,
    mut query: Query<(
        &Position,
        &mut Velocity,
        &mut Body,
        &mut BehaviorTimers,
        &HoverState,
        &DragState,
    )>,
) {
    for (position, mut velocity, mut body, mut timers, hover, drag) in query.iter_mut() {
        let ctx = BehaviorContext {
            now: clock.now,
            on_ground: body.on_ground,
            vx: velocity.0.x,
            center_x: position.0.x + config.window.size.0 as f32 / 2.0,
            dragging: drag.is_dragging(),
            hover: *hover,
        };

        for event in decide(&ctx, &mut timers, &config, &mut rng.0) {
            match event {
                BehaviorEvent::Push { dvx } => {
                    debug!(dvx, "walk push");
                    velocity.0.x += dvx;
                }
                BehaviorEvent::Hop { impulse } => {
                    debug!(impulse, "random hop");
                    velocity.0.y = -impulse.abs();
                    body.on_ground = false;
                }
                BehaviorEvent::EscapeHop { impulse, push } => {
                    debug!(impulse, push, "pointer escape jump");
                    velocity.0.y = -impulse.abs();
                    velocity.0.x += push;
                    body.on_ground = false;
                }
            }
        }
    }
}
