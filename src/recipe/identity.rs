//! Recipe identity parsed from the selected directory name

use super::RecipeError;
use serde::Serialize;
use std::path::Path;

/// The five dash-separated tokens of a recipe directory name, e.g.
/// `EQP1-GRP2-S-E-V1`. Parsing happens before any file I/O; a name that does
/// not split into exactly five tokens aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeIdentity {
    pub name: String,
    pub equipment_id: String,
    pub group_id: String,
    pub stage: String,
    pub e_mark: String,
    pub version: String,
}

impl RecipeIdentity {
    /// Derive the recipe name from the selected path and parse it.
    ///
    /// When the path has an ancestor component named `Recipe`, the name is
    /// the remainder of the path below it; otherwise the directory basename.
    pub fn from_path(path: &Path) -> Result<Self, RecipeError> {
        let components: Vec<String> = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let name = match components.iter().rposition(|c| c == "Recipe") {
            Some(idx) if idx + 1 < components.len() => components[idx + 1..].join("/"),
            _ => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        Self::parse(&name)
    }

    /// Parse the five tokens. A name derived below a `Recipe` ancestor can
    /// contain `/`; only its last segment is tokenized.
    pub fn parse(name: &str) -> Result<Self, RecipeError> {
        let basename = name.rsplit('/').next().unwrap_or(name);
        let tokens: Vec<&str> = basename.split('-').collect();
        if tokens.len() != 5 {
            return Err(RecipeError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            equipment_id: tokens[0].to_string(),
            group_id: tokens[1].to_string(),
            stage: tokens[2].to_string(),
            e_mark: tokens[3].to_string(),
            version: tokens[4].to_string(),
        })
    }
}
