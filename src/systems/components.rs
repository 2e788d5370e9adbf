//! Components, bundle and shared resources of the pet simulation.

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use circular_buffer::CircularBuffer;
use glam::Vec2;
use rand::rngs::SmallRng;

use crate::constants::DRAG_SAMPLE_CAPACITY;
use crate::pose::PetState;

/// Window position of the pet (top-left corner), as sub-pixel floats.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Velocity in pixels per second. Positive y points down.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

/// Physics flags of the body.
#[derive(Component, Debug, Clone, Copy)]
pub struct Body {
    /// True while the body rests at the floor boundary.
    pub on_ground: bool,
}

/// One recorded pointer position during a drag, with the caller's timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    pub pos: Vec2,
    pub at: f32,
}

/// State of an in-progress drag gesture.
#[derive(Debug)]
pub struct ActiveDrag {
    /// Pointer position minus window position at grab time, so the pet does
    /// not snap its corner to the cursor.
    pub grab_offset: Vec2,
    /// Most recent pointer samples; older ones fall off the ring.
    pub samples: CircularBuffer<DRAG_SAMPLE_CAPACITY, DragSample>,
}

/// Drag mode: while `active` is set, pointer input drives the position
/// directly and physics integration is suspended.
#[derive(Component, Debug, Default)]
pub struct DragState {
    pub active: Option<ActiveDrag>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }
}

/// Pointer-proximity state, fed by hover events.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HoverState {
    /// True while the pointer is inside the pet's bounding region.
    pub inside: bool,
    /// Last reported pointer position while inside, screen coordinates.
    pub pointer: Option<Vec2>,
    /// Simulation time at which the pointer entered.
    pub entered_at: f32,
}

/// Scheduling state of the behavior controller, all on the simulation clock.
/// An action cannot re-fire before its timestamp elapses.
#[derive(Component, Debug, Clone, Copy)]
pub struct BehaviorTimers {
    /// Next random hop fires at this time.
    pub next_hop_at: f32,
    /// Next random walk push fires at this time.
    pub next_push_at: f32,
    /// Direction-reversing pushes are suppressed until this time.
    pub turn_cooldown_until: f32,
    /// Pointer-escape jumps are suppressed until this time.
    pub hover_cooldown_until: f32,
}

impl Default for BehaviorTimers {
    fn default() -> Self {
        Self {
            next_hop_at: 0.0,
            next_push_at: 0.0,
            turn_cooldown_until: 0.0,
            hover_cooldown_until: 0.0,
        }
    }
}

/// Phase accumulator for the visual walking bob.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BobPhase(pub f32);

/// Derived animation state: logical state, sprite frame cursor and the
/// sticky mirror flag.
#[derive(Component, Debug, Clone)]
pub struct AnimationState {
    pub state: PetState,
    pub frame: usize,
    /// Accumulated time toward the next frame advance.
    pub time_bank: f32,
    /// True when the sprite faces left. Holds its value while the pet is
    /// effectively at rest so the facing never flickers.
    pub mirrored: bool,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            state: PetState::Idle,
            frame: 0,
            time_bank: 0.0,
            mirrored: false,
        }
    }
}

/// Everything a pet entity is made of.
#[derive(Bundle)]
pub struct PetBundle {
    pub position: Position,
    pub velocity: Velocity,
    pub body: Body,
    pub drag: DragState,
    pub hover: HoverState,
    pub timers: BehaviorTimers,
    pub bob: BobPhase,
    pub animation: AnimationState,
}

/// Frame delta for the current tick, clamped by the engine before systems run.
#[derive(Resource, Debug, Clone, Copy)]
pub struct DeltaTime {
    pub seconds: f32,
}

/// Accumulated simulation time and tick counter.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    /// Seconds of simulated time since engine construction.
    pub now: f32,
    pub tick: u64,
}

/// Horizontal travel limits and the floor line, in screen coordinates,
/// already adjusted for the window size and bottom offset.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ScreenBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub floor_y: f32,
}

/// The behavior controller's random source. Seedable for deterministic tests.
#[derive(Resource)]
pub struct PetRng(pub SmallRng);
