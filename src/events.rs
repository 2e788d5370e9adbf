//! Pointer events fed into the engine by the windowing layer.
//!
//! Handlers run on the same thread as the simulation but between ticks; they
//! append to [`PendingEvents`] and the buffer is consumed atomically at the
//! start of the next tick. Events delivered before the first tick are simply
//! buffered until it runs, never dropped.

use bevy_ecs::event::Event;
use bevy_ecs::resource::Resource;
use glam::Vec2;

/// A pointer interaction, in screen coordinates.
///
/// Drag events carry the caller's monotonic timestamp in seconds; the engine
/// only ever uses differences between them, so any epoch works as long as it
/// is consistent within one gesture.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum PetEvent {
    /// The pointer entered the pet's bounding region.
    PointerEntered { pos: Vec2 },
    /// The pointer moved while inside the pet's bounding region.
    PointerMoved { pos: Vec2 },
    /// The pointer left the pet's bounding region.
    PointerLeft,
    /// A drag grabbed the pet at the given pointer position.
    DragBegan { pointer: Vec2, at: f32 },
    /// The pointer moved while holding the pet.
    DragMoved { pointer: Vec2, at: f32 },
    /// The pet was released.
    DragEnded { at: f32 },
}

/// Buffer of events waiting to be applied at the next tick start.
#[derive(Resource, Debug, Default)]
pub struct PendingEvents(pub Vec<PetEvent>);
