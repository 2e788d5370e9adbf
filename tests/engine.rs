use glam::Vec2;
use pretty_assertions::assert_eq;

use deskpet::config::PetConfig;
use deskpet::engine::{Engine, ScreenRect};
use deskpet::error::EngineError;
use deskpet::events::PetEvent;
use deskpet::pose::PetState;

mod common;
use common::{calm_config, calm_engine, run_for, DT, FLOOR_Y, SCREEN};

#[test]
fn test_construction_spawns_at_bottom_center() {
    let engine = calm_engine();
    let pose = engine.pose();

    // 800px screen, 96px window: travel is 0..704, center 352.
    assert_eq!(pose.x, 352.0);
    assert_eq!(pose.y, FLOOR_Y);
    assert_eq!(pose.state, PetState::Idle);
    assert_eq!(pose.frame, 0);
}

#[test]
fn test_rejects_invalid_config() {
    let mut config = calm_config();
    config.physics.bounce_damping = 2.0;

    let err = Engine::with_seed(config, SCREEN, 1).unwrap_err();
    assert!(matches!(err, EngineError::Config(_)));
}

#[test]
fn test_rejects_screen_smaller_than_the_pet() {
    let screen = ScreenRect {
        x: 0.0,
        y: 0.0,
        width: 64.0,
        height: 64.0,
    };
    let err = Engine::with_seed(calm_config(), screen, 1).unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[test]
fn test_offset_screen_shifts_the_floor() {
    let screen = ScreenRect {
        x: 100.0,
        y: 50.0,
        width: 800.0,
        height: 600.0,
    };
    let mut engine = Engine::with_seed(calm_config(), screen, 1).unwrap();
    engine.tick(DT);

    let pose = engine.pose();
    assert_eq!(pose.x, 452.0);
    assert_eq!(pose.y, 550.0);
}

#[test]
fn test_same_seed_same_trajectory() {
    let mut a = Engine::with_seed(PetConfig::default(), SCREEN, 1234).unwrap();
    let mut b = Engine::with_seed(PetConfig::default(), SCREEN, 1234).unwrap();

    // Default intervals let hops and pushes fire within ten seconds, so
    // this exercises the random branches too.
    for _ in 0..600 {
        a.tick(DT);
        b.tick(DT);
        assert_eq!(a.pose(), b.pose());
    }
}

#[test]
fn test_events_before_the_first_tick_are_buffered() {
    let mut engine = calm_engine();
    let pose = engine.pose();

    engine.handle_event(PetEvent::DragBegan {
        pointer: Vec2::new(pose.x, pose.y),
        at: 0.0,
    });
    // Nothing applies until the tick runs.
    assert_eq!(engine.pose().state, PetState::Idle);

    engine.tick(DT);
    assert_eq!(engine.pose().state, PetState::Jump);
}

#[test]
fn test_hover_triggers_an_escape_jump() {
    let mut engine = calm_engine();
    engine.tick(DT);
    let pose = engine.pose();

    engine.handle_event(PetEvent::PointerEntered {
        pos: Vec2::new(pose.x + 10.0, pose.y + 10.0),
    });
    // Give the trigger delay time to elapse.
    run_for(&mut engine, 0.5);

    assert_eq!(engine.pose().state, PetState::Jump);
    assert!(engine.pose().y < FLOOR_Y);
}

#[test]
fn test_pointer_leaving_cancels_the_pending_escape() {
    let mut engine = calm_engine();
    engine.tick(DT);
    let pose = engine.pose();

    engine.handle_event(PetEvent::PointerEntered {
        pos: Vec2::new(pose.x + 10.0, pose.y + 10.0),
    });
    engine.handle_event(PetEvent::PointerLeft);
    run_for(&mut engine, 1.0);

    assert_eq!(engine.pose().state, PetState::Idle);
    assert_eq!(engine.pose().y, FLOOR_Y);
}

#[test]
fn test_simulation_clock_accumulates_ticks() {
    let mut engine = calm_engine();
    run_for(&mut engine, 1.0);
    assert!((engine.now() - 1.0).abs() < 0.001);
}
