//! Strongly-typed engine configuration, loaded from a RON file.
//!
//! The configuration is an immutable value object injected once at engine
//! construction; the simulation reads it but never hardcodes any of these
//! values. [`PetConfig::validate`] fails fast on anything the dynamics cannot
//! run with (see [`ConfigError`]), so a constructed engine never has to
//! re-check a config field.
//!
//! Units: velocities and impulses are pixels per second, accelerations pixels
//! per second squared, intervals milliseconds (mirroring the source config
//! file), damping factors are per-tick fractions in `[0, 1]`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bevy_ecs::resource::Resource;
use serde::Deserialize;

use crate::error::ConfigError;

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Window geometry as far as the simulation cares: the sprite's on-screen
/// size and how far above the bottom screen edge the floor sits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width and height of the pet window, in pixels.
    pub size: (u32, u32),
    /// Gap between the bottom of the screen and the floor line, in pixels.
    pub bottom_offset: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: (96, 96),
            bottom_offset: 4.0,
        }
    }
}

/// Parameters for the pet's voluntary movement.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Base movement speed, px/s; parsed for config-format compatibility,
    /// not consulted by the engine (push magnitudes come from
    /// `walk_speed_range`).
    pub speed: f32,
    /// Target simulation update interval, in milliseconds.
    pub update_rate_ms: u32,
    /// Magnitude range for random horizontal pushes, px/s.
    pub walk_speed_range: (f32, f32),
    /// Interval range between random pushes, in milliseconds.
    pub walk_interval_ms: (u32, u32),
    /// Probability weight for direction changes; parsed and validated for
    /// config compatibility, not consulted by the engine (push sign is
    /// uniform, gated only by the turn cooldown).
    pub turn_probability: f32,
    /// Minimum time between direction-reversing pushes, in milliseconds.
    pub turn_cooldown_ms: u32,
    /// Amplitude of the walking bob, in pixels. Zero disables bobbing.
    pub bob_amplitude: f32,
    /// Bob phase advance per tick, in radians.
    pub bob_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 60.0,
            update_rate_ms: 16,
            walk_speed_range: (30.0, 90.0),
            walk_interval_ms: (1500, 4000),
            turn_probability: 0.3,
            turn_cooldown_ms: 1200,
            bob_amplitude: 2.0,
            bob_speed: 0.35,
        }
    }
}

/// Parameters for the physics body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration, px/s².
    pub gravity: f32,
    /// Upward speed applied by a random hop, px/s.
    pub hop_impulse: f32,
    /// Upward speed applied by a pointer-escape jump, px/s.
    pub hover_impulse: f32,
    /// Interval range between random hops, in milliseconds.
    pub hop_interval_ms: (u32, u32),
    /// Minimum time between pointer-escape jumps, in milliseconds.
    pub hover_cooldown_ms: u32,
    /// Per-tick horizontal damping while on the floor.
    pub ground_drag: f32,
    /// Per-tick horizontal damping while airborne.
    pub air_drag: f32,
    /// Fraction of vertical speed kept (inverted) by a floor bounce.
    pub bounce_damping: f32,
    /// Scalar converting the drag-release velocity estimate into the applied
    /// throw velocity.
    pub launch_multiplier: f32,
    /// Horizontal speed clamp, px/s.
    pub max_speed_x: f32,
    /// Vertical speed clamp, px/s.
    pub max_speed_y: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1260.0,
            hop_impulse: 240.0,
            hover_impulse: 360.0,
            hop_interval_ms: (800, 2000),
            hover_cooldown_ms: 900,
            ground_drag: 0.12,
            air_drag: 0.02,
            bounce_damping: 0.5,
            launch_multiplier: 1.2,
            max_speed_x: 480.0,
            max_speed_y: 840.0,
        }
    }
}

/// How the frames of a sprite sheet are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteLayout {
    #[default]
    Horizontal,
    Vertical,
}

/// Frame specification for one animation state.
///
/// The engine only consumes `frames` and `fps`; the rest is the contract the
/// external sprite provider slices sheets by.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpriteStateConfig {
    /// Sheet file name, relative to [`SpriteConfig::base_path`].
    pub file: String,
    #[serde(default = "default_frames")]
    pub frames: u32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub layout: SpriteLayout,
    /// Explicit frame size override; inferred from the sheet otherwise.
    #[serde(default)]
    pub frame_size: Option<(u32, u32)>,
}

fn default_frames() -> u32 {
    1
}

fn default_fps() -> u32 {
    8
}

impl SpriteStateConfig {
    /// Seconds each frame of this state stays on screen.
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}

/// Sprite definitions, keyed by state name. The `idle` state is mandatory;
/// states without their own entry fall back to it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    pub base_path: String,
    pub states: HashMap<String, SpriteStateConfig>,
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Resource)]
#[serde(default)]
pub struct PetConfig {
    pub window: WindowConfig,
    pub movement: MovementConfig,
    pub physics: PhysicsConfig,
    pub sprites: SpriteConfig,
}

impl PetConfig {
    /// Parses a configuration from RON text. Does not validate; call
    /// [`PetConfig::validate`] (the engine constructor does).
    pub fn from_ron(contents: &str) -> Result<Self, ConfigError> {
        ron_options()
            .from_str(contents)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Checks every field the dynamics depend on, failing on the first
    /// value the engine could not run meaningfully with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.movement.update_rate_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "movement.update_rate_ms",
                value: 0.0,
            });
        }
        check_range(
            "movement.walk_speed_range",
            self.movement.walk_speed_range.0,
            self.movement.walk_speed_range.1,
        )?;
        check_range(
            "movement.walk_interval_ms",
            self.movement.walk_interval_ms.0 as f32,
            self.movement.walk_interval_ms.1 as f32,
        )?;
        check_unit_interval("movement.turn_probability", self.movement.turn_probability, true)?;
        if self.movement.bob_amplitude < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "movement.bob_amplitude",
                value: self.movement.bob_amplitude,
            });
        }

        if self.physics.gravity < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "physics.gravity",
                value: self.physics.gravity,
            });
        }
        check_range(
            "physics.hop_interval_ms",
            self.physics.hop_interval_ms.0 as f32,
            self.physics.hop_interval_ms.1 as f32,
        )?;
        check_unit_interval("physics.ground_drag", self.physics.ground_drag, true)?;
        check_unit_interval("physics.air_drag", self.physics.air_drag, true)?;
        // A bounce factor of 1.0 would never settle.
        check_unit_interval("physics.bounce_damping", self.physics.bounce_damping, false)?;
        if self.physics.launch_multiplier < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "physics.launch_multiplier",
                value: self.physics.launch_multiplier,
            });
        }
        if self.physics.max_speed_x <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "physics.max_speed_x",
                value: self.physics.max_speed_x,
            });
        }
        if self.physics.max_speed_y <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "physics.max_speed_y",
                value: self.physics.max_speed_y,
            });
        }

        if !self.sprites.states.is_empty() && !self.sprites.states.contains_key("idle") {
            return Err(ConfigError::MissingState("idle".to_string()));
        }
        for (name, state) in &self.sprites.states {
            if state.frames == 0 {
                return Err(ConfigError::ZeroFrameCount { state: name.clone() });
            }
            if state.fps == 0 {
                return Err(ConfigError::ZeroFps { state: name.clone() });
            }
        }

        Ok(())
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min > max {
        return Err(ConfigError::InvertedRange { field, min, max });
    }
    Ok(())
}

fn check_unit_interval(field: &'static str, value: f32, inclusive: bool) -> Result<(), ConfigError> {
    let ok = if inclusive {
        (0.0..=1.0).contains(&value)
    } else {
        (0.0..1.0).contains(&value)
    };
    if !ok {
        return Err(ConfigError::OutOfRange { field, value });
    }
    Ok(())
}
