// UI module - keyboard controls and the egui stats overlay

mod overlay;
mod stats;

// Re-export the public interface
pub use overlay::{FitnessHistory, UIState, draw_ui, process_egui};
