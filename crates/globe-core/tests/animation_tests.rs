// Per-frame integration: idle spin, smoothing toward focus, clamping.

use globe_core::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn params() -> MotionParams {
    MotionParams::default()
}

#[test]
fn defaults_match_documented_motion() {
    let p = params();
    assert_eq!(p.idle_step, 0.005);
    assert_eq!(p.smoothing, 0.05);
}

#[test]
fn idle_phase_advances_by_velocity_per_tick() {
    let mut state = AnimationState::default();
    for n in 1..=1000 {
        state.step(None, &params());
        assert!((state.idle_phi - n as f64 * 0.005).abs() < 1e-9);
    }
    assert!((state.idle_phi - 5.0).abs() < 1e-9);
}

#[test]
fn idle_phase_never_decreases() {
    let mut state = AnimationState::default();
    let mut prev = state.idle_phi;
    for _ in 0..5000 {
        state.step(None, &params());
        assert!(state.idle_phi >= prev);
        prev = state.idle_phi;
    }
}

#[test]
fn idle_phase_is_frozen_while_focused() {
    let mut state = AnimationState::default();
    for _ in 0..10 {
        state.step(None, &params());
    }
    let frozen = state.idle_phi;
    let focus = Some(location_to_angles(20.0, 30.0));
    for _ in 0..100 {
        state.step(focus, &params());
    }
    assert_eq!(state.idle_phi, frozen);
    state.step(None, &params());
    assert!((state.idle_phi - (frozen + 0.005)).abs() < 1e-12);
}

#[test]
fn idle_rotation_follows_idle_phase() {
    let mut state = AnimationState::default();
    for _ in 0..3000 {
        state.step(None, &params());
    }
    // lag behind the idle phase settles at step * (1 - s) / s
    let lag = state.idle_phi - state.current_phi;
    assert!((lag - 0.005 * 0.95 / 0.05).abs() < 1e-6, "lag {lag}");
    assert_eq!(state.current_theta, 0.0);
}

#[test]
fn focus_on_origin_converges_the_short_way() {
    let mut state = AnimationState::default();
    let target = location_to_angles(0.0, 0.0);
    assert!((target.phi - 3.0 * FRAC_PI_2).abs() < 1e-12);

    for _ in 0..60 {
        state.step(Some(target), &params());
    }
    // 3π/2 is reached by turning back a quarter turn
    assert!(state.current_phi < 0.0);
    let remaining = shortest_angular_distance(normalize_angle(state.current_phi), target.phi);
    let fraction = remaining.abs() / FRAC_PI_2;
    assert!((fraction - 0.95_f64.powi(60)).abs() < 1e-9, "fraction {fraction}");

    for _ in 60..90 {
        state.step(Some(target), &params());
    }
    let remaining = shortest_angular_distance(normalize_angle(state.current_phi), target.phi);
    assert!(remaining.abs() < 0.01 * FRAC_PI_2);
}

#[test]
fn theta_converges_without_overshoot() {
    for &s in &[0.01, 0.05, 0.3, 0.9] {
        let p = MotionParams {
            idle_step: 0.005,
            smoothing: s,
        };
        let mut state = AnimationState::default();
        let target = location_to_angles(40.0, 0.0);
        let mut prev = state.current_theta;
        for _ in 0..2000 {
            state.step(Some(target), &p);
            assert!(state.current_theta <= target.theta + 1e-12);
            assert!(state.current_theta >= prev);
            prev = state.current_theta;
        }
        assert!((state.current_theta - target.theta).abs() < 1e-6);
    }
}

#[test]
fn theta_is_clamped_for_extreme_latitudes() {
    let mut state = AnimationState::default();
    let target = location_to_angles(170.0, 0.0);
    for _ in 0..500 {
        let o = state.step(Some(target), &params());
        assert!(o.theta <= FRAC_PI_2);
        assert!(state.current_theta <= FRAC_PI_2);
    }
    assert!((state.current_theta - FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn near_opposite_targets_turn_toward_the_nearer_side() {
    let mut state = AnimationState::default();
    state.step(Some(Orientation::new(PI - 0.01, 0.0)), &params());
    assert!(state.current_phi > 0.0);

    let mut state = AnimationState::default();
    state.step(Some(Orientation::new(PI + 0.01, 0.0)), &params());
    assert!(state.current_phi < 0.0);
}

#[test]
fn step_returns_displayed_orientation() {
    let mut state = AnimationState::default();
    let o = state.step(Some(location_to_angles(10.0, 10.0)), &params());
    assert_eq!(o, state.orientation());
}

#[test]
fn controller_counts_frames_and_focuses() {
    let mut controller = OrientationController::new(params());
    controller.tick();
    controller.tick();
    assert_eq!(controller.frames(), 2);
    assert!(controller.set_focus(0.0, 0.0, || TimerId(1)));
    assert_eq!(controller.phase(), FocusPhase::Focused);
    assert!(!controller.set_focus(5.0, 5.0, || TimerId(2)));
    assert!(controller.expire(TimerId(1)));
    assert_eq!(controller.phase(), FocusPhase::Idle);
}
