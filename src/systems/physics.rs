//! Physics integration: gravity, floor bounces, wall clamping and drag decay.

use bevy_ecs::system::{Query, Res};
use tracing::trace;

use crate::config::PetConfig;
use crate::constants::{BOUNCE_REST_SPEED, TICK_RATE};
use crate::systems::components::{Body, DeltaTime, DragState, Position, ScreenBounds, Velocity};

/// Integrates the body one tick forward.
///
/// Skipped entirely for a non-positive delta (clock anomaly) and while the
/// pet is held; during a drag, pointer input drives the position directly
/// and velocity is only recorded into the gesture samples.
///
/// The floor is the only reflective collision: a contact faster than the
/// rest threshold inverts and damps vy and leaves the body airborne, so
/// successive bounce peaks shrink until a sub-threshold contact settles it.
/// Screen edges are pure position stops; clamping x never modifies vx, the
/// ground drag bleeds it off instead. After integration `y <= floor_y`
/// always holds.
pub fn physics_system(
    dt: Res<DeltaTime>,
    config: Res<PetConfig>,
    bounds: Res<ScreenBounds>,
    mut query: Query<(&mut Position, &mut Velocity, &mut Body, &DragState)>,
) {
    let dt = dt.seconds;
    if dt <= 0.0 {
        return;
    }

    let physics = &config.physics;
    for (mut position, mut velocity, mut body, drag) in query.iter_mut() {
        if drag.is_dragging() {
            continue;
        }

        velocity.0.y += physics.gravity * dt;
        velocity.0.x = velocity.0.x.clamp(-physics.max_speed_x, physics.max_speed_x);
        velocity.0.y = velocity.0.y.clamp(-physics.max_speed_y, physics.max_speed_y);

        position.0 += velocity.0 * dt;

        // Walls stop drift; they do not reflect.
        position.0.x = position.0.x.clamp(bounds.min_x, bounds.max_x);

        if position.0.y >= bounds.floor_y {
            position.0.y = bounds.floor_y;
            if velocity.0.y > BOUNCE_REST_SPEED {
                velocity.0.y = -velocity.0.y * physics.bounce_damping;
                body.on_ground = false;
                trace!(vy = velocity.0.y, "floor bounce");
            } else {
                if velocity.0.y > 0.0 {
                    velocity.0.y = 0.0;
                }
                body.on_ground = true;
            }
        } else {
            body.on_ground = false;
        }

        // Per-tick damping factor, normalized so behavior is rate-independent.
        // Decays toward zero without ever reversing sign.
        let drag_factor = if body.on_ground { physics.ground_drag } else { physics.air_drag };
        velocity.0.x *= (1.0 - drag_factor).powf(dt * TICK_RATE);
    }
}
