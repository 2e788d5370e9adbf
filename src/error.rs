//! Centralized error types for the pet engine.
//!
//! This module defines all error types used throughout the crate, providing a
//! consistent error handling approach. Everything here is a startup-time
//! failure: once an [`crate::engine::Engine`] is constructed, the simulation
//! resolves degenerate inputs (empty drag gestures, clock anomalies) locally
//! and never surfaces them as errors.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the pet engine.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while loading or validating a [`crate::config::PetConfig`].
///
/// The engine cannot run meaningfully with undefined dynamics, so all of
/// these are fatal at construction rather than recoverable per tick.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config parsing failed: {0}")]
    Parse(String),

    #[error("Missing required sprite state: {0}")]
    MissingState(String),

    #[error("Sprite state '{state}' declares zero frames")]
    ZeroFrameCount { state: String },

    #[error("Sprite state '{state}' declares zero fps")]
    ZeroFps { state: String },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("{field} range is inverted: ({min}, {max})")]
    InvertedRange { field: &'static str, min: f32, max: f32 },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
