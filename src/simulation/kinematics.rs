//! Vertical motion of a jumping bird.
//!
//! Displacement is computed from the ticks elapsed since the last jump, not
//! from absolute time, so a jump restarts the curve.

/// Velocity set by a jump (negative is up).
pub const JUMP_VELOCITY: f32 = -10.0;
/// Coefficient of the quadratic gravity term.
pub const GRAVITY: f32 = 1.5;
/// Largest downward displacement in one tick.
pub const MAX_DISPLACEMENT: f32 = 16.0;
/// Extra upward push applied while rising.
pub const RISE_BIAS: f32 = 2.0;
/// Nose-up tilt in degrees.
pub const MAX_ROTATION: f32 = 25.0;
/// Nose-down tilt change per tick in degrees.
pub const ROTATION_VELOCITY: f32 = 20.0;
/// Steepest nose-down tilt in degrees.
pub const MIN_TILT: f32 = -90.0;
/// A bird within this many pixels below its jump height still tilts up.
pub const TILT_UP_MARGIN: f32 = 50.0;

/// Unclamped displacement `t` ticks after a jump with velocity `vel`.
pub fn displacement(vel: f32, ticks: u32) -> f32 {
    let t = ticks as f32;
    vel * t + GRAVITY * t * t
}

/// Displacement actually applied in a tick: capped at [`MAX_DISPLACEMENT`]
/// and biased upwards while rising.
pub fn step_displacement(vel: f32, ticks: u32) -> f32 {
    let d = displacement(vel, ticks).min(MAX_DISPLACEMENT);
    if d < 0.0 { d - RISE_BIAS } else { d }
}

/// Whether a bird that just moved by `displacement` to `y` should face up.
///
/// `jump_height` is the bird's y at its last jump.
pub fn should_tilt_up(displacement: f32, y: f32, jump_height: f32) -> bool {
    displacement < 0.0 || y < jump_height + TILT_UP_MARGIN
}

/// Tilt after one tick.
pub fn next_tilt(tilt: f32, tilt_up: bool) -> f32 {
    if tilt_up {
        tilt.max(MAX_ROTATION)
    } else {
        (tilt - ROTATION_VELOCITY).max(MIN_TILT)
    }
}
