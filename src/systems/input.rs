//! Applies buffered pointer events at tick start: hover tracking and the
//! drag-and-throw lifecycle.

use bevy_ecs::system::{Query, Res, ResMut};
use circular_buffer::CircularBuffer;
use glam::Vec2;
use tracing::{debug, trace};

use crate::config::PetConfig;
use crate::constants::{DRAG_REFERENCE_WINDOW, DRAG_SAMPLE_CAPACITY, MIN_THROW_SPEED};
use crate::events::{PendingEvents, PetEvent};
use crate::systems::components::{ActiveDrag, Body, DragSample, DragState, HoverState, Position, SimClock, Velocity};

/// Drains [`PendingEvents`] and applies them to the pet.
///
/// Runs first in the tick chain, so external handlers only ever observe the
/// buffer: no event is interleaved with an in-progress tick, and events
/// pushed before the first tick are applied on the first tick.
pub fn drain_events_system(
    mut pending: ResMut<PendingEvents>,
    clock: Res<SimClock>,
    config: Res<PetConfig>,
    mut query: Query<(&mut Position, &mut Velocity, &mut Body, &mut DragState, &mut HoverState)>,
) {
    if pending.0.is_empty() {
        return;
    }
    let events: Vec<PetEvent> = pending.0.drain(..).collect();

    for (mut position, mut velocity, mut body, mut drag, mut hover) in query.iter_mut() {
        for event in &events {
            match *event {
                PetEvent::PointerEntered { pos } => {
                    hover.inside = true;
                    hover.pointer = Some(pos);
                    hover.entered_at = clock.now;
                    trace!(x = pos.x, y = pos.y, "pointer entered");
                }
                PetEvent::PointerMoved { pos } => {
                    if hover.inside {
                        hover.pointer = Some(pos);
                    }
                }
                PetEvent::PointerLeft => {
                    hover.inside = false;
                    hover.pointer = None;
                    hover.entered_at = 0.0;
                }
                PetEvent::DragBegan { pointer, at } => {
                    debug!(x = pointer.x, y = pointer.y, "drag began");
                    let mut samples = CircularBuffer::new();
                    samples.push_back(DragSample { pos: pointer, at });
                    drag.active = Some(ActiveDrag {
                        grab_offset: pointer - position.0,
                        samples,
                    });
                    velocity.0 = Vec2::ZERO;
                    // The pet is in the user's hand now, not on the floor.
                    body.on_ground = false;
                }
                PetEvent::DragMoved { pointer, at } => {
                    if let Some(active) = drag.active.as_mut() {
                        position.0 = pointer - active.grab_offset;
                        active.samples.push_back(DragSample { pos: pointer, at });
                    }
                }
                PetEvent::DragEnded { at } => {
                    if let Some(active) = drag.active.take() {
                        velocity.0 = launch_velocity(&active.samples, at, config.physics.launch_multiplier);
                        debug!(vx = velocity.0.x, vy = velocity.0.y, "drag released");
                    }
                }
            }
        }
    }
}

/// Estimates the throw velocity of a released drag.
///
/// Uses the slope between a reference sample and the newest one: the
/// reference is the newest sample at least [`DRAG_REFERENCE_WINDOW`] older
/// than the release, falling back to the oldest retained sample. A gesture
/// with fewer than two samples, or one whose estimate is negligible on both
/// axes, yields zero velocity. A near-instant pickup-and-drop is not a
/// throw, and never an error.
fn launch_velocity(
    samples: &CircularBuffer<DRAG_SAMPLE_CAPACITY, DragSample>,
    released_at: f32,
    multiplier: f32,
) -> Vec2 {
    if samples.len() < 2 {
        return Vec2::ZERO;
    }
    let (Some(oldest), Some(newest)) = (samples.front(), samples.back()) else {
        return Vec2::ZERO;
    };

    let reference = samples
        .iter()
        .rev()
        .find(|sample| released_at - sample.at >= DRAG_REFERENCE_WINDOW)
        .unwrap_or(oldest);

    let dt = (newest.at - reference.at).max(0.001);
    let launch = (newest.pos - reference.pos) / dt * multiplier;

    if launch.x.abs() < MIN_THROW_SPEED && launch.y.abs() < MIN_THROW_SPEED {
        Vec2::ZERO
    } else {
        launch
    }
}
