//! Pipe pairs scrolling across the scene, with the gap the bird flies through.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::geometric_utils::{rects_touch, sprite_rect};
use super::locatable::Locatable;
use super::scene::{SCROLL_VELOCITY, SpriteMasks};

/// Vertical size of the opening between the two halves.
pub const GAP: f32 = 200.0;
/// Range the gap's upper edge is drawn from.
pub const GAP_RANGE: std::ops::Range<i32> = 50..450;

/// A top/bottom pipe pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge of both halves.
    pub x: f32,
    /// y of the gap's upper edge.
    pub gap_top: f32,
    /// y where the top half's sprite is drawn (above the scene).
    pub top: f32,
    /// y where the bottom half's sprite is drawn, the gap's lower edge.
    pub bottom: f32,
    /// Set once the first bird has flown past the left edge.
    pub passed: bool,
    width: f32,
}

impl Pipe {
    /// Creates a pipe at `x` with a random gap.
    pub fn new_random<R: Rng>(x: f32, rng: &mut R, masks: &SpriteMasks) -> Self {
        let gap_top = rng.random_range(GAP_RANGE) as f32;
        Self::with_gap(x, gap_top, masks)
    }

    /// Creates a pipe at `x` whose gap starts at `gap_top`.
    pub fn with_gap(x: f32, gap_top: f32, masks: &SpriteMasks) -> Self {
        Self {
            x,
            gap_top,
            top: gap_top - masks.pipe_height(),
            bottom: gap_top + GAP,
            passed: false,
            width: masks.pipe_width(),
        }
    }

    /// Width of the pipe sprites.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// x of the right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Moves the pipe one tick to the left.
    pub fn scroll(&mut self) {
        self.x -= SCROLL_VELOCITY;
    }

    /// Whether the pipe has left the scene on the left.
    pub fn is_off_scene(&self) -> bool {
        self.right() < 0.0
    }

    /// Sets `passed` the first time `bird_x` is beyond the pipe's left edge.
    ///
    /// Returns `true` only on that transition.
    pub fn update_pass(&mut self, bird_x: f32) -> bool {
        if !self.passed && self.x < bird_x {
            self.passed = true;
            return true;
        }
        false
    }

    /// Whether the bird's current frame overlaps either half.
    pub fn collides(&self, bird: &Bird, masks: &SpriteMasks) -> bool {
        let bird_mask = &masks.bird[bird.frame];
        let bird_box = sprite_rect(
            bird.x,
            bird.y,
            bird_mask.width() as f32,
            bird_mask.height() as f32,
        );

        let dx = (self.x - bird.x) as i32;
        // Half-pixel heights round to even.
        let bird_y = bird.y.round_ties_even();

        let halves = [
            (&masks.pipe_top, self.top),
            (&masks.pipe_bottom, self.bottom),
        ];
        halves.into_iter().any(|(mask, y)| {
            let pipe_box = sprite_rect(self.x, y, mask.width() as f32, mask.height() as f32);
            rects_touch(&bird_box, &pipe_box)
                && bird_mask.overlaps(mask, (dx, (y - bird_y) as i32))
        })
    }
}

impl Locatable for Pipe {
    fn pos(&self) -> (f32, f32) {
        (self.x, self.top)
    }

    fn update(&mut self) {
        self.scroll();
    }
}
