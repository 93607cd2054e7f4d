//! Recipe tree discovery: identity, layout, and profile classification

mod identity;
mod locator;
mod profiles;

pub use identity::RecipeIdentity;
pub use locator::{RecipeLocator, PROFILE_FILES};
pub use profiles::{classify_profiles, Profile, ProfileCount, ProfileKind};

use crate::ini::ConfigReadError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("recipe name {name:?} does not follow the EQP-Group-Stage-E-Version format")]
    InvalidName { name: String },

    #[error("{count} recipe folders under {path}, expected at most 2; remove the extras")]
    TooManyProfiles { count: usize, path: PathBuf },

    #[error("required folder not found: {0}")]
    MissingFolder(PathBuf),

    #[error(transparent)]
    Config(#[from] ConfigReadError),
}
