use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("song {song} references unknown album {album}")]
    InvalidReference { song: String, album: String },
}
