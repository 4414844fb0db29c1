use egui_macroquad::egui;
use flappy_evo::evolution::statistics::Statistics;
use flappy_evo::simulation::episode::Episode;
use macroquad::prelude::*;

/// Upper bound for simulation speed-up.
pub const MAX_TICKS_PER_FRAME: u32 = 64;

pub struct UIState {
    pub show_stats: bool,
    pub ticks_per_frame: u32,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            show_stats: false,
            ticks_per_frame: 1,
        }
    }

    /// Tab toggles the overlay, Up/Down double or halve the speed.
    pub fn handle_input(&mut self) {
        if is_key_pressed(KeyCode::Tab) {
            self.show_stats = !self.show_stats;
        }
        if is_key_pressed(KeyCode::Up) {
            self.ticks_per_frame = (self.ticks_per_frame * 2).min(MAX_TICKS_PER_FRAME);
        }
        if is_key_pressed(KeyCode::Down) {
            self.ticks_per_frame = (self.ticks_per_frame / 2).max(1);
        }
    }
}

/// Fitness curves of every finished generation, captured before an episode
/// borrows the genomes.
#[derive(Default)]
pub struct FitnessHistory {
    pub best: Vec<[f64; 2]>,
    pub mean: Vec<[f64; 2]>,
    pub species: usize,
}

impl FitnessHistory {
    pub fn new(statistics: &Statistics, species: usize) -> Self {
        Self {
            best: statistics.best_fitness_points(),
            mean: statistics.mean_fitness_points(),
            species,
        }
    }
}

pub fn draw_ui(state: &mut UIState, episode: &Episode, history: &FitnessHistory) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        super::stats::draw_stats_window(egui_ctx, state, episode, history);
    });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
