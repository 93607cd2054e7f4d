//! Profile classification: Default-only vs Default plus one sibling

use super::RecipeError;
use crate::fs::DirEntry;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Logical profile slot. `Secondary` keeps the real on-disk folder name
/// because zone-file lookups must use it, not the logical label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileKind {
    Primary,
    Secondary,
}

impl ProfileKind {
    /// Logical label used in reports and cell-mapping tables.
    pub fn label(&self) -> &'static str {
        match self {
            ProfileKind::Primary => "Default",
            ProfileKind::Secondary => "Default1",
        }
    }
}

/// One configuration profile of a recipe.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub kind: ProfileKind,
    /// On-disk folder name ("Default", or the secondary folder's real name).
    pub folder_name: String,
    pub path: PathBuf,
}

/// Whether the recipe carries one or two profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileCount {
    Single,
    Multi,
}

impl fmt::Display for ProfileCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileCount::Single => write!(f, "Single"),
            ProfileCount::Multi => write!(f, "Multi"),
        }
    }
}

/// Classify the non-Default siblings of `Recipes`.
///
/// Zero extras is `Single`; exactly one is `Multi`. Two or more is operator
/// data damage and aborts the run with the folder count (Default included)
/// and the path to inspect.
pub fn classify_profiles(
    recipes_dir: &Path,
    default_dir: &Path,
    extras: &[DirEntry],
) -> Result<(ProfileCount, Vec<Profile>), RecipeError> {
    if extras.len() >= 2 {
        return Err(RecipeError::TooManyProfiles {
            count: extras.len() + 1,
            path: recipes_dir.to_path_buf(),
        });
    }

    let mut profiles = vec![Profile {
        kind: ProfileKind::Primary,
        folder_name: "Default".to_string(),
        path: default_dir.to_path_buf(),
    }];

    let count = if let Some(extra) = extras.first() {
        profiles.push(Profile {
            kind: ProfileKind::Secondary,
            folder_name: extra.file_name().to_string(),
            path: extra.path.clone(),
        });
        ProfileCount::Multi
    } else {
        ProfileCount::Single
    };

    Ok((count, profiles))
}
