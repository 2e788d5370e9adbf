//! Desktop pet physics and animation engine library crate.
//!
//! The engine owns the per-frame simulation of a small animated companion:
//! gravity, floor bounces, random hops and walk pushes, pointer-escape jumps,
//! and drag-and-throw gestures. Window management, sprite decoding and
//! painting are external collaborators; they feed pointer events in through
//! [`engine::Engine::handle_event`] and read the resulting pose back out with
//! [`engine::Engine::pose`] once per frame.

pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod events;
pub mod formatter;
pub mod pose;
pub mod systems;
