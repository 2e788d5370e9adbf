//! Headless demo: runs the engine for ten seconds at 60 Hz with a scripted
//! hover and a scripted drag-throw, logging the published pose. Useful for
//! eyeballing the dynamics and the log output without a windowing layer.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use glam::Vec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deskpet::config::PetConfig;
use deskpet::constants::LOOP_TIME;
use deskpet::engine::{Engine, ScreenRect};
use deskpet::events::PetEvent;
use deskpet::formatter::TickFormatter;

const FRAMES: u64 = 600;
const CONFIG_PATH: &str = "deskpet.ron";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .event_format(TickFormatter)
        .init();

    let config = if Path::new(CONFIG_PATH).exists() {
        info!(path = CONFIG_PATH, "loading config");
        PetConfig::load(Path::new(CONFIG_PATH))?
    } else {
        info!("no config file found, using defaults");
        PetConfig::default()
    };

    let screen = ScreenRect {
        x: 0.0,
        y: 0.0,
        width: 1920.0,
        height: 1080.0,
    };
    let mut engine = Engine::new(config, screen)?;

    let started = Instant::now();
    let mut last = started;
    for frame in 0..FRAMES {
        let frame_start = Instant::now();

        script_events(&mut engine, frame);

        let now = Instant::now();
        engine.tick(now.duration_since(last).as_secs_f32());
        last = now;

        if frame % 60 == 0 {
            let pose = engine.pose();
            info!(
                frame,
                x = pose.x,
                y = pose.y,
                state = %pose.state,
                sprite_frame = pose.frame,
                mirrored = pose.mirrored,
                "pose"
            );
        }

        let remaining = LOOP_TIME.saturating_sub(frame_start.elapsed());
        if remaining != Duration::ZERO {
            spin_sleep::sleep(remaining);
        }
    }

    info!(elapsed = ?started.elapsed(), "demo finished");
    Ok(())
}

/// Pokes the pet twice: a hover at the two second mark and a leftward
/// drag-throw at the five second mark.
///
/// The drag pointer stays 12 pixels left of the current grab point each
/// frame, which works out to a steady 720 px/s leftward gesture.
fn script_events(engine: &mut Engine, frame: u64) {
    let pose = engine.pose();
    let at = frame as f32 / 60.0;

    match frame {
        120 => engine.handle_event(PetEvent::PointerEntered {
            pos: Vec2::new(pose.x + 10.0, pose.y + 10.0),
        }),
        135 => engine.handle_event(PetEvent::PointerLeft),
        300 => engine.handle_event(PetEvent::DragBegan {
            pointer: Vec2::new(pose.x + 40.0, pose.y + 40.0),
            at,
        }),
        301..=314 => engine.handle_event(PetEvent::DragMoved {
            pointer: Vec2::new(pose.x + 40.0 - 12.0, pose.y + 40.0 - 3.0),
            at,
        }),
        315 => engine.handle_event(PetEvent::DragEnded { at }),
        _ => {}
    }
}
