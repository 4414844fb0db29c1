//! Sprite loading for the windowed binary.
//!
//! Textures are drawn at twice their pixel size, so the collision masks are
//! derived from the image alpha and scaled the same way.

use std::path::Path;

use flappy_evo::error::{Error, Result};
use flappy_evo::simulation::mask::OpacityMask;
use flappy_evo::simulation::scene::SpriteMasks;
use log::info;
use macroquad::prelude::*;

/// Textures loaded from an asset directory.
pub struct Textures {
    pub bird: [Texture2D; 3],
    pub pipe: Texture2D,
    pub background: Texture2D,
    pub base: Texture2D,
}

/// How the scene is painted.
pub enum Sprites {
    /// Flat shapes matching [`SpriteMasks::procedural`].
    Procedural,
    /// Image sprites.
    Textured(Textures),
}

/// Loads every sprite from `dir` and builds matching collision masks.
pub async fn load(dir: &Path) -> Result<(Textures, SpriteMasks)> {
    let (bird1, mask1) = load_sprite(dir, "bird1.png").await?;
    let (bird2, mask2) = load_sprite(dir, "bird2.png").await?;
    let (bird3, mask3) = load_sprite(dir, "bird3.png").await?;
    let (pipe, pipe_mask) = load_sprite(dir, "pipe.png").await?;
    let (background, _) = load_sprite(dir, "bg.png").await?;
    let (base, _) = load_sprite(dir, "base.png").await?;

    info!("Loaded sprites from {}", dir.display());

    let textures = Textures {
        bird: [bird1, bird2, bird3],
        pipe,
        background,
        base,
    };
    let masks = SpriteMasks::from_masks([mask1, mask2, mask3], pipe_mask);
    Ok((textures, masks))
}

async fn load_sprite(dir: &Path, name: &str) -> Result<(Texture2D, OpacityMask)> {
    let path = dir.join(name).display().to_string();
    let image = load_image(&path).await.map_err(|e| Error::Asset {
        path: path.clone(),
        reason: format!("{:?}", e),
    })?;

    let mask = OpacityMask::from_rgba(image.width as usize, image.height as usize, &image.bytes)
        .ok_or_else(|| Error::Asset {
            path: path.clone(),
            reason: "pixel data does not match the image size".to_string(),
        })?
        .scaled2x();

    let texture = Texture2D::from_image(&image);
    texture.set_filter(FilterMode::Nearest);
    Ok((texture, mask))
}
