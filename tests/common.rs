#![allow(dead_code)]

use deskpet::config::{PetConfig, SpriteConfig, SpriteStateConfig};
use deskpet::engine::{Engine, ScreenRect};
use deskpet::events::PetEvent;
use glam::Vec2;

/// Screen used by most tests: floor line at y = 500 with the default
/// 96x96 window and 4px bottom offset.
pub const SCREEN: ScreenRect = ScreenRect {
    x: 0.0,
    y: 0.0,
    width: 800.0,
    height: 600.0,
};

pub const FLOOR_Y: f32 = 500.0;
pub const DT: f32 = 1.0 / 60.0;

/// A config whose autonomous behavior never fires within a test run, so
/// physics and gesture tests observe only the dynamics under test.
pub fn calm_config() -> PetConfig {
    let mut config = PetConfig::default();
    config.physics.hop_interval_ms = (3_600_000, 3_600_000);
    config.movement.walk_interval_ms = (3_600_000, 3_600_000);
    config
}

/// A calm config with a three-state sprite sheet set, for animation tests.
pub fn animated_config() -> PetConfig {
    let mut config = calm_config();
    config.sprites = SpriteConfig {
        base_path: "sprites".to_string(),
        states: [
            ("idle", sprite_state("idle.png", 4, 8)),
            ("walk", sprite_state("walk.png", 6, 10)),
            ("jump", sprite_state("jump.png", 1, 8)),
        ]
        .into_iter()
        .map(|(name, state)| (name.to_string(), state))
        .collect(),
    };
    config
}

pub fn sprite_state(file: &str, frames: u32, fps: u32) -> SpriteStateConfig {
    SpriteStateConfig {
        file: file.to_string(),
        frames,
        fps,
        layout: Default::default(),
        frame_size: None,
    }
}

pub fn calm_engine() -> Engine {
    Engine::with_seed(calm_config(), SCREEN, 42).expect("engine construction failed")
}

/// Places the pet at an arbitrary position with a still drag: the gesture
/// ends with two coincident samples well apart in time, so the release
/// velocity estimate is zero. Consumes one tick.
pub fn lift_to(engine: &mut Engine, x: f32, y: f32) {
    let pose = engine.pose();
    let t0 = engine.now();
    let target = Vec2::new(x, y);

    engine.handle_event(PetEvent::DragBegan {
        pointer: Vec2::new(pose.x, pose.y),
        at: t0,
    });
    engine.handle_event(PetEvent::DragMoved { pointer: target, at: t0 + 0.1 });
    engine.handle_event(PetEvent::DragMoved { pointer: target, at: t0 + 0.5 });
    engine.handle_event(PetEvent::DragEnded { at: t0 + 0.6 });
    engine.tick(DT);
}

/// Performs a half-second straight-line drag at the given gesture velocity,
/// starting at the pet's current position. The release applies that velocity
/// scaled by the configured launch multiplier (and clamped to the speed
/// limits). Consumes one tick.
pub fn throw(engine: &mut Engine, gesture_velocity: Vec2) {
    let pose = engine.pose();
    let t0 = engine.now();
    let start = Vec2::new(pose.x, pose.y);

    engine.handle_event(PetEvent::DragBegan { pointer: start, at: t0 });
    for step in 1..=5 {
        let t = step as f32 * 0.1;
        engine.handle_event(PetEvent::DragMoved {
            pointer: start + gesture_velocity * t,
            at: t0 + t,
        });
    }
    engine.handle_event(PetEvent::DragEnded { at: t0 + 0.5 });
    engine.tick(DT);
}

/// Advances the engine at the nominal 60 Hz cadence for roughly `seconds`.
pub fn run_for(engine: &mut Engine, seconds: f32) {
    let steps = (seconds / DT).round() as u32;
    for _ in 0..steps {
        engine.tick(DT);
    }
}
