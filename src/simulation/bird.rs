//! The player entity: a bird that falls under gravity and jumps on command.

use serde::{Deserialize, Serialize};

use super::kinematics;
use super::locatable::Locatable;
use super::scene::{BIRD_FRAMES, GROUND_Y};

/// Ticks each wing frame stays on screen before the cycle restarts.
pub const ANIMATION_TIME: u32 = 5;

/// A bird's position, motion and animation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Horizontal position, fixed for the whole episode.
    pub x: f32,
    /// Vertical position of the sprite's top edge, never negative.
    pub y: f32,
    /// Tilt in degrees, positive is nose up.
    pub tilt: f32,
    /// Ticks since the last jump.
    pub tick_count: u32,
    /// Velocity set by the last jump.
    pub vel: f32,
    /// y at the last jump.
    pub height: f32,
    /// Animation tick counter.
    pub anim_count: u32,
    /// Index of the current wing frame.
    pub frame: usize,
}

impl Bird {
    /// Creates a resting bird at the given position.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            tilt: 0.0,
            tick_count: 0,
            vel: 0.0,
            height: y,
            anim_count: 0,
            frame: 0,
        }
    }

    /// Starts a jump from the current height.
    pub fn jump(&mut self) {
        self.vel = kinematics::JUMP_VELOCITY;
        self.tick_count = 0;
        self.height = self.y;
    }

    /// Moves the bird by one tick of kinematics and updates its tilt.
    ///
    /// Returns the displacement applied.
    pub fn advance(&mut self) -> f32 {
        self.tick_count += 1;
        let d = kinematics::step_displacement(self.vel, self.tick_count);

        self.y = (self.y + d).max(0.0);

        let tilt_up = kinematics::should_tilt_up(d, self.y, self.height);
        self.tilt = kinematics::next_tilt(self.tilt, tilt_up);
        d
    }

    /// Advances the wing animation one step.
    pub fn flap(&mut self) {
        self.anim_count += 1;
        let next = (self.anim_count % ANIMATION_TIME) as usize;
        if next >= BIRD_FRAMES {
            self.frame = 0;
            self.anim_count = 0;
        } else {
            self.frame = next;
        }
    }

    /// Whether a sprite of `sprite_height` has reached the ground line.
    pub fn hit_floor(&self, sprite_height: f32) -> bool {
        self.y + sprite_height >= GROUND_Y
    }
}

impl Locatable for Bird {
    fn pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn update(&mut self) {
        self.advance();
    }
}
