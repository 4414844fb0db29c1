use egui_macroquad::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use flappy_evo::simulation::episode::{Elimination, Episode};

use super::overlay::{FitnessHistory, MAX_TICKS_PER_FRAME, UIState};

pub(super) fn draw_stats_window(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    episode: &Episode,
    history: &FitnessHistory,
) {
    egui::Window::new("Stats")
        .default_pos([10.0, 80.0])
        .default_width(320.0)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.label(format!("Generation: {}", episode.generation()));
            ui.label(format!("Alive: {}", episode.alive()));
            ui.label(format!("Score: {}", episode.score()));
            ui.label(format!("Ticks: {}", episode.ticks()));
            ui.label(format!("Species: {}", history.species));

            let crashed = episode
                .eliminations()
                .iter()
                .filter(|e| e.reason == Elimination::Collision)
                .count();
            let grounded = episode.eliminations().len() - crashed;
            ui.label(format!("Hit pipe: {}  Hit ground: {}", crashed, grounded));

            let leader = episode
                .contestants()
                .iter()
                .max_by(|a, b| a.fitness().total_cmp(&b.fitness()));
            if let Some(leader) = leader {
                ui.label(format!(
                    "Leader: genome {} ({:.2})",
                    leader.genome_id(),
                    leader.fitness()
                ));
            }

            ui.separator();

            ui.label("Simulation Speed");
            ui.add(
                egui::Slider::new(&mut state.ticks_per_frame, 1..=MAX_TICKS_PER_FRAME)
                    .text("ticks/frame"),
            );

            ui.separator();

            // Fitness plot
            if history.best.is_empty() {
                ui.label("No finished generation yet");
            } else {
                ui.heading("Fitness");
                let best: PlotPoints = history.best.iter().copied().collect();
                let mean: PlotPoints = history.mean.iter().copied().collect();
                Plot::new("fitness_plot")
                    .height(180.0)
                    .show_axes([true, true])
                    .legend(Legend::default())
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(best).name("best"));
                        plot_ui.line(Line::new(mean).name("mean"));
                    });
            }
        });
}
