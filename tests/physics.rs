use glam::Vec2;
use pretty_assertions::assert_eq;

use deskpet::events::PetEvent;
use deskpet::pose::PetState;

mod common;
use common::{calm_engine, lift_to, run_for, throw, DT, FLOOR_Y};

#[test]
fn test_spawns_resting_on_floor() {
    let mut engine = calm_engine();
    engine.tick(DT);

    let pose = engine.pose();
    assert_eq!(pose.y, FLOOR_Y);
    assert_eq!(pose.state, PetState::Idle);
    assert!(!pose.mirrored);
}

#[test]
fn test_falls_under_gravity_and_never_sinks_below_floor() {
    let mut engine = calm_engine();
    lift_to(&mut engine, 400.0, 100.0);

    let mut previous_y = engine.pose().y;
    let mut reached_floor = false;
    for _ in 0..600 {
        engine.tick(DT);
        let pose = engine.pose();

        assert!(pose.y <= FLOOR_Y, "pet sank below the floor: y={}", pose.y);
        if !reached_floor {
            // Descent is monotonic until the first floor contact.
            assert!(pose.y >= previous_y, "pet rose mid-fall: {} -> {}", previous_y, pose.y);
        }
        if pose.y == FLOOR_Y {
            reached_floor = true;
        }
        previous_y = pose.y;
    }
    assert!(reached_floor);
}

#[test]
fn test_bounces_then_settles_idle() {
    let mut engine = calm_engine();
    lift_to(&mut engine, 400.0, 100.0);

    let mut bounced = false;
    let mut reached_floor = false;
    for _ in 0..600 {
        engine.tick(DT);
        let pose = engine.pose();
        if pose.y == FLOOR_Y {
            reached_floor = true;
        } else if reached_floor {
            // Airborne again after a floor contact means a bounce happened.
            bounced = true;
        }
    }
    assert!(bounced, "a 400px drop should rebound at least once");

    // Well past the last rebound; the pet must be at rest.
    run_for(&mut engine, 4.0);
    let pose = engine.pose();
    assert_eq!(pose.y, FLOOR_Y);
    assert_eq!(pose.state, PetState::Idle);
}

#[test]
fn test_bounce_peaks_strictly_decrease() {
    let mut engine = calm_engine();
    lift_to(&mut engine, 400.0, 100.0);

    // Apex of each airborne stretch between floor contacts; smaller y is
    // a higher rebound.
    let mut peaks: Vec<f32> = Vec::new();
    let mut apex_y = f32::MAX;
    let mut had_contact = false;
    for _ in 0..600 {
        engine.tick(DT);
        let y = engine.pose().y;
        if y == FLOOR_Y {
            if had_contact && apex_y < FLOOR_Y {
                peaks.push(apex_y);
            }
            apex_y = f32::MAX;
            had_contact = true;
        } else if had_contact {
            apex_y = apex_y.min(y);
        }
    }

    assert!(peaks.len() >= 2, "expected multiple rebounds, got {:?}", peaks);
    for pair in peaks.windows(2) {
        assert!(
            pair[1] > pair[0],
            "rebound peaks must shrink every bounce: {:?}",
            peaks
        );
    }
}

#[test]
fn test_slow_contact_settles_without_bounce() {
    let mut engine = calm_engine();
    lift_to(&mut engine, 400.0, FLOOR_Y - 2.0);

    let mut previous_y = engine.pose().y;
    for _ in 0..60 {
        engine.tick(DT);
        let pose = engine.pose();
        assert!(
            pose.y >= previous_y,
            "a sub-threshold contact must not rebound: {} -> {}",
            previous_y,
            pose.y
        );
        previous_y = pose.y;
    }
    assert_eq!(engine.pose().y, FLOOR_Y);
    assert_eq!(engine.pose().state, PetState::Idle);
}

#[test]
fn test_left_wall_clamps_without_reflection() {
    let mut engine = calm_engine();
    throw(&mut engine, Vec2::new(-600.0, 0.0));

    let mut hit_wall = false;
    for _ in 0..600 {
        engine.tick(DT);
        let x = engine.pose().x;
        assert!(x >= 0.0, "pet escaped the left edge: x={}", x);
        if x == 0.0 {
            hit_wall = true;
        } else if hit_wall {
            // Walls absorb; leftover leftward velocity must not push back out.
            panic!("pet rebounded off the wall to x={}", x);
        }
    }
    assert!(hit_wall, "a hard leftward throw should reach the wall");
    assert_eq!(engine.pose().x, 0.0);
}

#[test]
fn test_launch_speed_is_clamped() {
    let mut engine = calm_engine();
    engine.tick(DT);
    let start = engine.pose();
    let t0 = engine.now();

    // A 1000 px/s gesture times the 1.2 multiplier is well past the
    // 480 px/s horizontal limit.
    engine.handle_event(PetEvent::DragBegan {
        pointer: Vec2::new(start.x, start.y),
        at: t0,
    });
    engine.handle_event(PetEvent::DragMoved {
        pointer: Vec2::new(start.x - 50.0, start.y),
        at: t0 + 0.05,
    });
    engine.handle_event(PetEvent::DragMoved {
        pointer: Vec2::new(start.x - 100.0, start.y),
        at: t0 + 0.1,
    });
    engine.handle_event(PetEvent::DragEnded { at: t0 + 0.1 });
    engine.tick(DT);

    // The release tick integrates from the drag-end position; the step it
    // takes is exactly one tick at the clamped speed, not the raw estimate.
    let max_step = 480.0 * DT;
    let displacement = (start.x - 100.0) - engine.pose().x;
    assert!(
        (displacement - max_step).abs() < 0.01,
        "expected a clamped step of {}, got {}",
        max_step,
        displacement
    );
}

#[test]
fn test_drag_decay_never_reverses_motion() {
    let mut engine = calm_engine();
    engine.tick(DT);
    throw(&mut engine, Vec2::new(200.0, 0.0));

    let mut previous_x = engine.pose().x;
    for _ in 0..300 {
        engine.tick(DT);
        let x = engine.pose().x;
        assert!(
            x >= previous_x,
            "decaying rightward motion stepped left: {} -> {}",
            previous_x,
            x
        );
        previous_x = x;
    }
    // Five seconds of ground drag is more than enough to stop.
    assert_eq!(engine.pose().state, PetState::Idle);
}

#[test]
fn test_zero_delta_is_a_no_op_for_motion() {
    let mut engine = calm_engine();
    lift_to(&mut engine, 400.0, 100.0);
    let before = engine.pose();

    engine.tick(0.0);
    let after = engine.pose();
    assert_eq!(before.x, after.x);
    assert_eq!(before.y, after.y);
}

#[test]
fn test_huge_delta_is_clamped() {
    let mut engine = calm_engine();
    lift_to(&mut engine, 400.0, 100.0);

    // A 10 minute suspend must not integrate as ten minutes of gravity.
    engine.tick(600.0);
    let pose = engine.pose();
    assert!(pose.y <= FLOOR_Y);
    assert!(engine.now() < 2.0);
}

#[test]
fn test_non_finite_delta_is_ignored() {
    let mut engine = calm_engine();
    engine.tick(DT);
    let before = engine.pose();

    engine.tick(f32::NAN);
    engine.tick(f32::INFINITY);
    let after = engine.pose();
    assert_eq!(before, after);
}
