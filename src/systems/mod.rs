//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic: the pet's components, the
//! per-tick systems, and the resources they share. The tick chain runs
//! `drain_events` → `physics` → `behavior` → `animation` → `publish_pose`.

pub mod animation;
pub mod behavior;
pub mod components;
pub mod input;
pub mod physics;

pub use animation::{animation_system, AnimationTable, FrameSpec};
pub use behavior::{behavior_system, decide, BehaviorContext, BehaviorEvent};
pub use components::{
    ActiveDrag, AnimationState, BehaviorTimers, BobPhase, Body, DeltaTime, DragSample, DragState, HoverState, PetBundle,
    PetRng, Position, ScreenBounds, SimClock, Velocity,
};
pub use input::drain_events_system;
pub use physics::physics_system;
