//! The published pose: the engine's per-frame output contract.
//!
//! The rendering surface reads one [`Pose`] per frame and needs nothing else
//! from the simulation; it asks its sprite provider for "state name, frame
//! index, mirrored" and paints. Publishing is a plain resource write at the
//! end of the tick chain, so a snapshot always reflects a consistent
//! same-tick view and reading it can never block.

use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::config::PetConfig;
use crate::constants::TICK_RATE;
use crate::systems::{AnimationState, BobPhase, Body, DeltaTime, Position, ScreenBounds};

/// The closed set of logical animation states.
///
/// `idle` and `walk` may share a sprite sheet (the animation table falls back
/// to `idle` for states without their own entry) but remain distinct logical
/// states in the published pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum_macros::Display, strum_macros::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PetState {
    #[default]
    Idle,
    Walk,
    Jump,
}

/// A single frame's output: window position, logical state, sprite frame and
/// horizontal mirror flag. Copied out of the engine, never shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    pub state: PetState,
    pub frame: usize,
    pub mirrored: bool,
}

/// Resource holding the most recently published pose.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PoseSnapshot(pub Pose);

/// Copies the derived state of the pet into the [`PoseSnapshot`] resource.
///
/// Also advances the walking bob, a purely visual sinusoidal offset: it
/// shifts the published y while walking on the floor but never the physics
/// position, and never below the floor line.
pub fn publish_pose_system(
    dt: Res<DeltaTime>,
    config: Res<PetConfig>,
    bounds: Res<ScreenBounds>,
    mut snapshot: ResMut<PoseSnapshot>,
    mut query: Query<(&Position, &Body, &AnimationState, &mut BobPhase)>,
) {
    for (position, body, anim, mut bob) in query.iter_mut() {
        let mut y = position.0.y;

        if body.on_ground && anim.state == PetState::Walk && config.movement.bob_amplitude > 0.0 {
            bob.0 += config.movement.bob_speed * dt.seconds * TICK_RATE;
            y = (bounds.floor_y + bob.0.sin() * config.movement.bob_amplitude).min(bounds.floor_y);
        }

        snapshot.0 = Pose {
            x: position.0.x,
            y,
            state: anim.state,
            frame: anim.frame,
            mirrored: anim.mirrored,
        };
    }
}
