use flappy_evo::simulation::base::Base;
use flappy_evo::simulation::bird::Bird;
use flappy_evo::simulation::episode::Episode;
use flappy_evo::simulation::pipe::Pipe;
use flappy_evo::simulation::scene::{
    BASE_WIDTH, BIRD_SIZE, GROUND_HEIGHT, SCENE_HEIGHT, SCENE_WIDTH,
};
use macroquad::prelude::*;

use crate::assets::{Sprites, Textures};

const SKY_TOP: Color = Color::new(0.27, 0.71, 0.78, 1.0);
const SKY_BOTTOM: Color = Color::new(0.75, 0.91, 0.96, 1.0);
const GRASS: Color = Color::new(0.33, 0.66, 0.22, 1.0);
const DIRT: Color = Color::new(0.82, 0.73, 0.43, 1.0);
const PIPE_BODY: Color = Color::new(0.39, 0.67, 0.16, 1.0);
const PIPE_EDGE: Color = Color::new(0.24, 0.39, 0.08, 1.0);
const BIRD_BODY: Color = Color::new(0.96, 0.78, 0.26, 1.0);
const BIRD_WING: Color = Color::new(0.98, 0.9, 0.6, 1.0);
const BEAK: Color = Color::new(0.95, 0.45, 0.15, 1.0);

const SKY_BANDS: usize = 32;
const PIPE_CAP: f32 = 30.0;
const GRASS_HEIGHT: f32 = 12.0;
const FONT_SIZE: f32 = 50.0;

/// Paints the current state of `episode`.
///
/// Layers, back to front: background, pipes, generation, score, ground,
/// birds.
pub fn draw_scene(episode: &Episode, sprites: &Sprites) {
    clear_background(SKY_TOP);

    match sprites {
        Sprites::Procedural => {
            draw_sky();
            for pipe in episode.pipes() {
                draw_pipe(pipe, episode.masks().pipe_width(), episode.masks().pipe_height());
            }
        }
        Sprites::Textured(textures) => {
            draw_scaled(&textures.background, 0.0, 0.0, false);
            for pipe in episode.pipes() {
                draw_scaled(&textures.pipe, pipe.x, pipe.top, true);
                draw_scaled(&textures.pipe, pipe.x, pipe.bottom, false);
            }
        }
    }

    draw_text(
        &format!("Gen: {}", episode.generation()),
        10.0,
        50.0,
        FONT_SIZE,
        WHITE,
    );
    let score = format!("Score: {}", episode.score());
    let size = measure_text(&score, None, FONT_SIZE as u16, 1.0);
    draw_text(&score, SCENE_WIDTH - 10.0 - size.width, 50.0, FONT_SIZE, WHITE);

    match sprites {
        Sprites::Procedural => {
            draw_ground(episode.base());
            for bird in episode.birds() {
                draw_bird(bird);
            }
        }
        Sprites::Textured(textures) => {
            draw_scaled(&textures.base, episode.base().x1, episode.base().y, false);
            draw_scaled(&textures.base, episode.base().x2, episode.base().y, false);
            for bird in episode.birds() {
                draw_textured_bird(bird, textures);
            }
        }
    }
}

fn draw_sky() {
    let band = SCENE_HEIGHT / SKY_BANDS as f32;
    for i in 0..SKY_BANDS {
        let t = i as f32 / (SKY_BANDS - 1) as f32;
        let color = Color::new(
            SKY_TOP.r + (SKY_BOTTOM.r - SKY_TOP.r) * t,
            SKY_TOP.g + (SKY_BOTTOM.g - SKY_TOP.g) * t,
            SKY_TOP.b + (SKY_BOTTOM.b - SKY_TOP.b) * t,
            1.0,
        );
        draw_rectangle(0.0, i as f32 * band, SCENE_WIDTH, band + 1.0, color);
    }
}

fn draw_pipe(pipe: &Pipe, width: f32, height: f32) {
    // Top half hangs down to gap_top, bottom half starts at `bottom`.
    draw_rectangle(pipe.x, pipe.top, width, height, PIPE_BODY);
    draw_rectangle(pipe.x, pipe.top + height - PIPE_CAP, width, PIPE_CAP, PIPE_EDGE);
    draw_rectangle_lines(pipe.x, pipe.top, width, height, 3.0, PIPE_EDGE);

    draw_rectangle(pipe.x, pipe.bottom, width, height, PIPE_BODY);
    draw_rectangle(pipe.x, pipe.bottom, width, PIPE_CAP, PIPE_EDGE);
    draw_rectangle_lines(pipe.x, pipe.bottom, width, height, 3.0, PIPE_EDGE);
}

fn draw_ground(base: &Base) {
    for x in [base.x1, base.x2] {
        draw_rectangle(x, base.y, BASE_WIDTH, GROUND_HEIGHT, DIRT);
        draw_rectangle(x, base.y, BASE_WIDTH, GRASS_HEIGHT, GRASS);
    }
}

/// Elliptical bird tilted nose-up for positive tilt, with the wing position
/// following the animation frame.
fn draw_bird(bird: &Bird) {
    let (w, h) = (BIRD_SIZE.0 as f32, BIRD_SIZE.1 as f32);
    let center = vec2(bird.x + w / 2.0, bird.y + h / 2.0);
    let angle = (-bird.tilt).to_radians();
    let rotate = |offset: Vec2| center + Vec2::from_angle(angle).rotate(offset);

    draw_ellipse(center.x, center.y, w / 2.0, h / 2.0, -bird.tilt, BIRD_BODY);

    let wing_y = match bird.frame {
        0 => -6.0,
        1 => 0.0,
        _ => 6.0,
    };
    let wing = rotate(vec2(-10.0, wing_y));
    draw_ellipse(wing.x, wing.y, 14.0, 8.0, -bird.tilt, BIRD_WING);

    let eye = rotate(vec2(16.0, -8.0));
    draw_circle(eye.x, eye.y, 6.0, WHITE);
    draw_circle(eye.x + 2.0, eye.y, 3.0, BLACK);

    draw_triangle(
        rotate(vec2(22.0, 0.0)),
        rotate(vec2(34.0, 5.0)),
        rotate(vec2(22.0, 10.0)),
        BEAK,
    );
}

fn draw_textured_bird(bird: &Bird, textures: &Textures) {
    let texture = &textures.bird[bird.frame.min(textures.bird.len() - 1)];
    draw_texture_ex(
        texture,
        bird.x,
        bird.y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(texture.width() * 2.0, texture.height() * 2.0)),
            rotation: (-bird.tilt).to_radians(),
            ..Default::default()
        },
    );
}

fn draw_scaled(texture: &Texture2D, x: f32, y: f32, flip_y: bool) {
    draw_texture_ex(
        texture,
        x,
        y,
        WHITE,
        DrawTextureParams {
            dest_size: Some(vec2(texture.width() * 2.0, texture.height() * 2.0)),
            flip_y,
            ..Default::default()
        },
    );
}
