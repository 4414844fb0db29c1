#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::base::Base;
use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::locatable::Locatable;
use flappy_evo::simulation::pipe::Pipe;
use flappy_evo::simulation::scene::{BASE_WIDTH, GROUND_Y, SCROLL_VELOCITY, SpriteMasks};

#[test]
fn test_bird_locatable() {
    let mut bird = Bird::new(230.0, 350.0);
    assert_eq!(bird.pos(), (230.0, 350.0));

    // Update applies one tick of kinematics; x never changes
    bird.update();
    assert_eq!(bird.pos(), (230.0, 351.5));
}

#[test]
fn test_pipe_locatable() {
    let masks = SpriteMasks::procedural();
    let mut pipe = Pipe::with_gap(500.0, 300.0, &masks);
    assert_eq!(pipe.pos(), (500.0, pipe.top));

    pipe.update();
    assert_eq!(pipe.pos().0, 500.0 - SCROLL_VELOCITY);
}

#[test]
fn test_base_cycles_tiles() {
    let mut base = Base::new(GROUND_Y);
    assert_eq!((base.x1, base.x2), (0.0, BASE_WIDTH));

    for _ in 0..134 {
        base.scroll();
    }
    assert_eq!(base.x1, -670.0);

    // The first tile leaves the scene and jumps behind the second
    base.scroll();
    assert_eq!(base.x2, -3.0);
    assert_eq!(base.x1, base.x2 + BASE_WIDTH);
}

#[test]
fn test_locatable_trait_polymorphism() {
    let masks = SpriteMasks::procedural();
    let mut entities: Vec<Box<dyn Locatable>> = vec![
        Box::new(Bird::new(230.0, 350.0)),
        Box::new(Pipe::with_gap(500.0, 300.0, &masks)),
        Box::new(Base::new(GROUND_Y)),
    ];

    let before: Vec<(f32, f32)> = entities.iter().map(|e| e.pos()).collect();
    for entity in entities.iter_mut() {
        entity.update();
    }
    let after: Vec<(f32, f32)> = entities.iter().map(|e| e.pos()).collect();

    // Bird falls, pipe and ground scroll left
    assert!(after[0].1 > before[0].1);
    assert_eq!(after[1].0, before[1].0 - SCROLL_VELOCITY);
    assert_eq!(after[2].0, before[2].0 - SCROLL_VELOCITY);
}
