//! Scene dimensions and the sprite masks the simulation collides against.

use super::mask::OpacityMask;

/// Scene width in pixels.
pub const SCENE_WIDTH: f32 = 500.0;
/// Scene height in pixels.
pub const SCENE_HEIGHT: f32 = 800.0;
/// Height of the ground strip at the bottom of the scene.
pub const GROUND_HEIGHT: f32 = 70.0;
/// y of the ground line.
pub const GROUND_Y: f32 = SCENE_HEIGHT - GROUND_HEIGHT;
/// Spawn position of every bird.
pub const BIRD_START: (f32, f32) = (230.0, 350.0);
/// Horizontal scroll speed of pipes and ground, pixels per tick.
pub const SCROLL_VELOCITY: f32 = 5.0;

/// Bird sprite size (2× of a 34 × 24 sprite).
pub const BIRD_SIZE: (usize, usize) = (68, 48);
/// Pipe sprite size (2× of a 52 × 320 sprite).
pub const PIPE_SIZE: (usize, usize) = (104, 640);
/// Ground tile width (2× of a 336 px tile).
pub const BASE_WIDTH: f32 = 672.0;
/// Number of wing-flap frames.
pub const BIRD_FRAMES: usize = 3;

/// Opacity masks for every sprite that takes part in collisions.
#[derive(Debug, Clone)]
pub struct SpriteMasks {
    /// One mask per animation frame.
    pub bird: [OpacityMask; BIRD_FRAMES],
    /// Upside-down pipe hanging from the top.
    pub pipe_top: OpacityMask,
    /// Pipe standing on the ground.
    pub pipe_bottom: OpacityMask,
}

impl SpriteMasks {
    /// Masks matching the procedurally drawn sprites: an elliptical bird and
    /// solid rectangular pipes.
    pub fn procedural() -> Self {
        let bird = OpacityMask::ellipse(BIRD_SIZE.0, BIRD_SIZE.1);
        let pipe = OpacityMask::filled(PIPE_SIZE.0, PIPE_SIZE.1);
        Self {
            bird: [bird.clone(), bird.clone(), bird],
            pipe_top: pipe.flipped_vertically(),
            pipe_bottom: pipe,
        }
    }

    /// Builds the set from a pipe mask and per-frame bird masks, flipping the
    /// pipe for the top half.
    pub fn from_masks(bird: [OpacityMask; BIRD_FRAMES], pipe: OpacityMask) -> Self {
        Self {
            bird,
            pipe_top: pipe.flipped_vertically(),
            pipe_bottom: pipe,
        }
    }

    /// Width of the pipe sprites.
    pub fn pipe_width(&self) -> f32 {
        self.pipe_bottom.width() as f32
    }

    /// Height of the top pipe sprite.
    pub fn pipe_height(&self) -> f32 {
        self.pipe_top.height() as f32
    }
}

impl Default for SpriteMasks {
    fn default() -> Self {
        Self::procedural()
    }
}
