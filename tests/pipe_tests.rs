#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::mask::OpacityMask;
use flappy_evo::simulation::pipe::{GAP, GAP_RANGE, Pipe};
use flappy_evo::simulation::scene::{BIRD_START, PIPE_SIZE, SpriteMasks};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_spawn_scenario() {
    let masks = SpriteMasks::procedural();
    let pipe = Pipe::with_gap(500.0, 400.0, &masks);

    assert_eq!(pipe.top, 400.0 - PIPE_SIZE.1 as f32);
    assert_eq!(pipe.top, -240.0);
    assert_eq!(pipe.bottom, 600.0);
    assert_eq!(pipe.bottom - pipe.gap_top, GAP);
    assert!(!pipe.passed);

    let bird = Bird::new(BIRD_START.0, BIRD_START.1);
    assert!(!pipe.collides(&bird, &masks));
}

#[test]
fn test_random_gaps_stay_in_range() {
    let masks = SpriteMasks::procedural();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let pipe = Pipe::new_random(500.0, &mut rng, &masks);
        assert!(pipe.gap_top >= GAP_RANGE.start as f32);
        assert!(pipe.gap_top < GAP_RANGE.end as f32);
        assert_eq!(pipe.x, 500.0);
    }
}

#[test]
fn test_pass_flag_transitions_once() {
    let masks = SpriteMasks::procedural();
    let mut pipe = Pipe::with_gap(240.0, 300.0, &masks);

    assert!(!pipe.update_pass(230.0));
    pipe.scroll();
    pipe.scroll();
    assert_eq!(pipe.x, 230.0);
    // Strictly beyond the left edge
    assert!(!pipe.update_pass(230.0));

    pipe.scroll();
    assert!(pipe.update_pass(230.0));
    assert!(pipe.passed);
    assert!(!pipe.update_pass(230.0));
    pipe.scroll();
    assert!(!pipe.update_pass(230.0));
}

#[test]
fn test_off_scene_after_right_edge_leaves() {
    let masks = SpriteMasks::procedural();
    let mut pipe = Pipe::with_gap(-(PIPE_SIZE.0 as f32), 300.0, &masks);
    assert_eq!(pipe.right(), 0.0);
    assert!(!pipe.is_off_scene());
    pipe.scroll();
    assert!(pipe.is_off_scene());
}

#[test]
fn test_collision_with_each_half() {
    let masks = SpriteMasks::procedural();
    let pipe = Pipe::with_gap(200.0, 400.0, &masks);

    // Inside the top half
    let bird = Bird::new(230.0, 350.0);
    assert!(pipe.collides(&bird, &masks));

    // Clear inside the gap
    let bird = Bird::new(230.0, 420.0);
    assert!(!pipe.collides(&bird, &masks));

    // Dipping into the bottom half
    let bird = Bird::new(230.0, 580.0);
    assert!(pipe.collides(&bird, &masks));
}

#[test]
fn test_transparent_corner_does_not_collide() {
    let masks = SpriteMasks::procedural();
    // The pipe's left edge touches only the bird's bounding box corner,
    // where the elliptical mask is empty.
    let bird = Bird::new(230.0, 398.0);
    let pipe = Pipe::with_gap(296.0, 400.0, &masks);
    assert!(!pipe.collides(&bird, &masks));

    // Moving the pipe onto the bird's widest row does collide.
    let bird = Bird::new(230.0, 380.0);
    assert!(pipe.collides(&bird, &masks));
}

#[test]
fn test_mask_overlap_offsets() {
    let a = OpacityMask::filled(4, 4);
    let b = OpacityMask::filled(4, 4);

    assert_eq!(a.overlap_point(&b, (0, 0)), Some((0, 0)));
    assert_eq!(a.overlap_point(&b, (3, 3)), Some((3, 3)));
    assert_eq!(a.overlap_point(&b, (-3, -3)), Some((0, 0)));
    assert_eq!(a.overlap_point(&b, (4, 0)), None);
    assert_eq!(a.overlap_point(&b, (0, -4)), None);
}

#[test]
fn test_mask_transparency() {
    let bird = OpacityMask::ellipse(68, 48);
    assert!(!bird.get(0, 0));
    assert!(bird.get(34, 24));
    assert!(!bird.get(-1, 24));
    assert!(!bird.get(68, 24));

    let dot = OpacityMask::from_fn(4, 4, |x, y| x == 3 && y == 3);
    let block = OpacityMask::filled(2, 2);
    assert!(!dot.overlaps(&block, (0, 0)));
    assert!(dot.overlaps(&block, (2, 2)));
}

#[test]
fn test_flipped_mask_is_mirrored() {
    let mask = OpacityMask::from_fn(2, 3, |_, y| y == 0);
    let flipped = mask.flipped_vertically();
    assert!(flipped.get(0, 2));
    assert!(!flipped.get(0, 0));
    assert_eq!(flipped.count(), mask.count());
}

#[test]
fn test_half_pixel_height_rounds_to_even() {
    let masks = SpriteMasks::procedural();
    // Bottom half starts at 400, right under a 48 px tall bird
    let pipe = Pipe::with_gap(230.0, 200.0, &masks);

    // 352.5 rounds to 352: the bird's last row ends at 399
    let bird = Bird::new(230.0, 352.5);
    assert!(!pipe.collides(&bird, &masks));

    // 353.5 rounds to 354: two rows reach into the pipe
    let bird = Bird::new(230.0, 353.5);
    assert!(pipe.collides(&bird, &masks));
}
