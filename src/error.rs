use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Heightmap has no pixels")]
    EmptyHeightmap,
}

pub type Result<T> = std::result::Result<T, TerrainError>;
