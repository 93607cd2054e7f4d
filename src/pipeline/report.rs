//! Extraction result handed to the checklist assembler

use crate::namespace::FlatNamespace;
use crate::recipe::{ProfileCount, RecipeIdentity};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything extracted from one recipe tree. Namespaces are read-only once
/// the report exists.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeReport {
    pub identity: RecipeIdentity,
    pub profile_count: ProfileCount,
    pub generated_at: DateTime<Utc>,
    /// Recipe-scoped keys (identity, WaferMapRecipe, Recipe_file_count).
    pub globals: FlatNamespace,
    pub profiles: Vec<ProfileReport>,
}

impl RecipeReport {
    pub fn profile(&self, label: &str) -> Option<&ProfileReport> {
        self.profiles.iter().find(|p| p.profile == label)
    }

    pub fn total_keys(&self) -> usize {
        self.globals.len() + self.profiles.iter().map(|p| p.values.len()).sum::<usize>()
    }
}

/// One profile's extracted namespace plus assembler-facing flags.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    /// Logical label: "Default" or "Default1".
    pub profile: String,
    /// Real on-disk folder name (differs from the label for Default1).
    pub folder_name: String,
    /// `[Surface] Enable` from `Zones/Scan Area.ini`; the assembler drops
    /// the surface sheet when false.
    pub surface_enabled: bool,
    pub values: FlatNamespace,
}
