#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::kinematics::{
    JUMP_VELOCITY, MAX_DISPLACEMENT, MAX_ROTATION, MIN_TILT, displacement, next_tilt,
    step_displacement,
};

#[test]
fn test_displacement_formula() {
    for v in [JUMP_VELOCITY, -3.0, 0.0, 4.0] {
        for t in 0..60u32 {
            let tf = t as f32;
            assert_eq!(displacement(v, t), v * tf + 1.5 * tf * tf);
        }
    }
}

#[test]
fn test_step_displacement_is_clamped() {
    for v in [JUMP_VELOCITY, 0.0, 8.0] {
        for t in 0..200u32 {
            assert!(step_displacement(v, t) <= MAX_DISPLACEMENT);
        }
    }
    assert_eq!(step_displacement(0.0, 5), MAX_DISPLACEMENT);
}

#[test]
fn test_rising_gets_extra_lift() {
    // -10 + 1.5 = -8.5, minus the rise bias
    assert_eq!(step_displacement(JUMP_VELOCITY, 1), -10.5);
    // -70 + 73.5 = 3.5, falling: no bias
    assert_eq!(step_displacement(JUMP_VELOCITY, 7), 3.5);
}

#[test]
fn test_jump_resets_counter_and_velocity() {
    let mut bird = Bird::new(230.0, 350.0);
    for _ in 0..5 {
        bird.advance();
    }
    assert_eq!(bird.tick_count, 5);

    bird.jump();
    assert_eq!(bird.tick_count, 0);
    assert_eq!(bird.vel, JUMP_VELOCITY);
    assert_eq!(bird.height, bird.y);

    // Displacement restarts from the jump
    let before = bird.y;
    bird.advance();
    assert_eq!(bird.y, before - 10.5);
}

#[test]
fn test_bird_never_goes_above_zero() {
    let mut bird = Bird::new(230.0, 5.0);
    bird.jump();
    bird.advance();
    assert_eq!(bird.y, 0.0);
}

#[test]
fn test_falling_bird_trajectory() {
    let mut bird = Bird::new(230.0, 350.0);
    let expected = [351.5, 357.5, 371.0, 387.0, 403.0];
    for y in expected {
        bird.advance();
        assert_eq!(bird.y, y);
    }
}

#[test]
fn test_tilt_rules() {
    assert_eq!(next_tilt(10.0, true), MAX_ROTATION);
    assert_eq!(next_tilt(30.0, true), 30.0);
    assert_eq!(next_tilt(25.0, false), 5.0);
    assert_eq!(next_tilt(-80.0, false), MIN_TILT);
    assert_eq!(next_tilt(MIN_TILT, false), MIN_TILT);
}

#[test]
fn test_tilt_decays_while_falling() {
    let mut bird = Bird::new(230.0, 350.0);
    bird.advance();
    // Still within 50 px of the start height
    assert_eq!(bird.tilt, MAX_ROTATION);

    for _ in 0..20 {
        bird.advance();
    }
    assert_eq!(bird.tilt, MIN_TILT);
}

#[test]
fn test_flap_cycles_three_frames() {
    let mut bird = Bird::new(0.0, 0.0);
    let mut frames = Vec::new();
    for _ in 0..6 {
        bird.flap();
        frames.push(bird.frame);
    }
    assert_eq!(frames, vec![1, 2, 0, 1, 2, 0]);
}
