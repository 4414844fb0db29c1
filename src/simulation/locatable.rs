//! Trait for scene entities that have a position and advance once per tick.
//!
//! Birds, pipes and the ground all move on a fixed tick clock, so the update
//! takes no time delta.

/// Trait for entities with a position that advance one tick at a time.
///
/// Any type that implements this trait:
/// - Has a top-left position in scene pixels
/// - Can be advanced by exactly one simulation tick
pub trait Locatable {
    /// Returns the entity's top-left corner as `(x, y)`.
    fn pos(&self) -> (f32, f32);

    /// Advances the entity by one tick.
    fn update(&mut self);
}
