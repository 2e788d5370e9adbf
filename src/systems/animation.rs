//! The animation state machine and the per-state frame table.

use std::collections::HashMap;

use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res};

use crate::config::SpriteConfig;
use crate::constants::{MIRROR_EPSILON, WALK_SPEED_THRESHOLD};
use crate::error::ConfigError;
use crate::pose::PetState;
use crate::systems::components::{AnimationState, Body, DeltaTime, DragState, Velocity};

/// Frame timing for one animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSpec {
    pub frames: usize,
    /// Seconds per frame.
    pub frame_interval: f32,
}

/// Fixed mapping from state name to frame timing, compiled from the sprite
/// config at engine construction. Lookups at runtime never touch the raw
/// config and never fail: states without their own entry resolve to `idle`.
#[derive(Resource, Debug, Clone)]
pub struct AnimationTable {
    states: HashMap<String, FrameSpec>,
}

impl AnimationTable {
    /// Compiles the sprite config into a fixed table, re-checking the frame
    /// invariants so a table can never hold undefined timing.
    ///
    /// An empty sprite section yields a single static `idle` entry; the
    /// engine then animates nothing but still publishes coherent poses.
    pub fn new(sprites: &SpriteConfig) -> Result<Self, ConfigError> {
        let mut states = HashMap::new();

        if sprites.states.is_empty() {
            states.insert(
                PetState::Idle.to_string(),
                FrameSpec {
                    frames: 1,
                    frame_interval: 1.0 / 8.0,
                },
            );
            return Ok(Self { states });
        }

        if !sprites.states.contains_key(PetState::Idle.as_ref()) {
            return Err(ConfigError::MissingState(PetState::Idle.to_string()));
        }

        for (name, state) in &sprites.states {
            if state.frames == 0 {
                return Err(ConfigError::ZeroFrameCount { state: name.clone() });
            }
            if state.fps == 0 {
                return Err(ConfigError::ZeroFps { state: name.clone() });
            }
            states.insert(
                name.clone(),
                FrameSpec {
                    frames: state.frames as usize,
                    frame_interval: state.frame_interval(),
                },
            );
        }

        Ok(Self { states })
    }

    /// Frame timing for a state, falling back to `idle`.
    pub fn resolve(&self, state: PetState) -> &FrameSpec {
        match self.states.get(state.as_ref()) {
            Some(frame_spec) => frame_spec,
            None => self
                .states
                .get(PetState::Idle.as_ref())
                .expect("animation table always holds an idle entry"),
        }
    }

    /// Declared state names, for callers preloading sprite sheets.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }
}

/// Derives the animation state from the physics result, in priority order:
/// airborne (or held) is `jump` regardless of horizontal speed, then `walk`
/// above the speed threshold, else `idle`.
///
/// Entering a new state resets the frame cursor; within a state the frame
/// advances at the configured fps, modulo the frame count. The mirror flag
/// follows the sign of vx only while there is meaningful horizontal motion;
/// it is sticky at rest, so the facing never flickers.
pub fn animation_system(
    dt: Res<DeltaTime>,
    table: Res<AnimationTable>,
    mut query: Query<(&Velocity, &Body, &DragState, &mut AnimationState)>,
) {
    for (velocity, body, drag, mut anim) in query.iter_mut() {
        let vx = velocity.0.x;

        let desired = if drag.is_dragging() || !body.on_ground {
            PetState::Jump
        } else if vx.abs() > WALK_SPEED_THRESHOLD {
            PetState::Walk
        } else {
            PetState::Idle
        };

        if desired != anim.state {
            anim.state = desired;
            anim.frame = 0;
            anim.time_bank = 0.0;
        }

        if vx.abs() > MIRROR_EPSILON {
            anim.mirrored = vx < 0.0;
        }

        let frame_spec = table.resolve(anim.state);
        if frame_spec.frames > 1 && dt.seconds > 0.0 {
            anim.time_bank += dt.seconds;
            while anim.time_bank >= frame_spec.frame_interval {
                anim.time_bank -= frame_spec.frame_interval;
                anim.frame = (anim.frame + 1) % frame_spec.frames;
            }
        }
    }
}
