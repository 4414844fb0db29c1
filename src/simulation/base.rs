//! The scrolling ground: two tiles leapfrogging each other.

use serde::{Deserialize, Serialize};

use super::locatable::Locatable;
use super::scene::{BASE_WIDTH, SCROLL_VELOCITY};

/// Two side-by-side copies of the ground texture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    /// Top edge of the ground.
    pub y: f32,
    /// Left edge of the first tile.
    pub x1: f32,
    /// Left edge of the second tile.
    pub x2: f32,
}

impl Base {
    /// Creates the ground with the second tile directly after the first.
    pub fn new(y: f32) -> Self {
        Self {
            y,
            x1: 0.0,
            x2: BASE_WIDTH,
        }
    }

    /// Scrolls both tiles and moves any tile that left the scene behind the
    /// other one.
    pub fn scroll(&mut self) {
        self.x1 -= SCROLL_VELOCITY;
        self.x2 -= SCROLL_VELOCITY;

        if self.x1 + BASE_WIDTH < 0.0 {
            self.x1 = self.x2 + BASE_WIDTH;
        }
        if self.x2 + BASE_WIDTH < 0.0 {
            self.x2 = self.x1 + BASE_WIDTH;
        }
    }
}

impl Locatable for Base {
    fn pos(&self) -> (f32, f32) {
        (self.x1, self.y)
    }

    fn update(&mut self) {
        self.scroll();
    }
}
