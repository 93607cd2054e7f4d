//! Read-only discovery of the files that make up a recipe tree

use super::RecipeError;
use crate::fs::{DirEntry, FileSystem};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Files expected inside each profile folder, found by recursive search.
pub const PROFILE_FILES: [&str; 6] = [
    "OpticsPreset.ini",
    "AlignRtp.ini",
    "ProductInfo.ini",
    "AlignmentData.ini",
    "Recipe.ini",
    "RTP.txt",
];

const SETUP_DIR: &str = "Setup1";
const RECIPES_DIR: &str = "Recipes";
const DEFAULT_DIR: &str = "Default";
const ZONES_DIR: &str = "Zones";
const WAFER_MAP_RECIPE: &str = "WaferMapRecipe.ini";

/// Walks a recipe root directory and resolves the fixed subpaths the
/// extraction pipeline needs. All lookups are read-only.
pub struct RecipeLocator<'a, F: FileSystem> {
    fs: &'a F,
    root: PathBuf,
}

impl<'a, F: FileSystem> RecipeLocator<'a, F> {
    pub fn new(fs: &'a F, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/Setup1`, which must exist.
    pub fn setup_dir(&self) -> Result<PathBuf, RecipeError> {
        let path = self.root.join(SETUP_DIR);
        if !self.fs.is_dir(&path) {
            return Err(RecipeError::MissingFolder(path));
        }
        Ok(path)
    }

    /// `<root>/Setup1/Recipes`, which must exist and contain `Default`.
    pub fn recipes_dir(&self) -> Result<PathBuf, RecipeError> {
        let path = self.setup_dir()?.join(RECIPES_DIR);
        if !self.fs.is_dir(&path) {
            return Err(RecipeError::MissingFolder(path));
        }
        let default = path.join(DEFAULT_DIR);
        if !self.fs.is_dir(&default) {
            return Err(RecipeError::MissingFolder(default));
        }
        Ok(path)
    }

    /// `<root>/Setup1/Recipes/Default`.
    pub fn default_profile_dir(&self) -> Result<PathBuf, RecipeError> {
        Ok(self.recipes_dir()?.join(DEFAULT_DIR))
    }

    /// Subfolders of `Recipes` other than `Default`, sorted by name.
    pub fn extra_profile_dirs(&self) -> Result<Vec<DirEntry>, RecipeError> {
        let recipes = self.recipes_dir()?;
        let entries = self
            .fs
            .read_dir(&recipes)
            .map_err(|_| RecipeError::MissingFolder(recipes.clone()))?;
        Ok(entries
            .into_iter()
            .filter(|e| e.is_dir() && e.file_name() != DEFAULT_DIR)
            .collect())
    }

    /// `<root>/Setup1/WaferMapRecipe.ini` if present. The file is global,
    /// not profile-scoped, and optional.
    pub fn wafer_map_recipe(&self) -> Option<PathBuf> {
        let path = self.root.join(SETUP_DIR).join(WAFER_MAP_RECIPE);
        self.fs.is_file(&path).then_some(path)
    }

    /// `Zones` folder of a profile directory.
    pub fn zones_dir(&self, profile_dir: &Path) -> PathBuf {
        profile_dir.join(ZONES_DIR)
    }

    /// Recursive, case-sensitive search for `filename` below `dir`.
    ///
    /// Directory entries are visited in lexical order, so the first match is
    /// deterministic for a given tree even when duplicates exist.
    pub fn find_file(&self, dir: &Path, filename: &str) -> Option<PathBuf> {
        let entries = self.fs.read_dir(dir).ok()?;
        for entry in &entries {
            if !entry.is_dir() && entry.file_name() == filename {
                return Some(entry.path.clone());
            }
        }
        for entry in &entries {
            if entry.is_dir() {
                if let Some(found) = self.find_file(&entry.path, filename) {
                    return Some(found);
                }
            }
        }
        debug!(dir = %dir.display(), filename, "file not found");
        None
    }

    /// Case-insensitive lookup of `filename` directly inside `dir`.
    pub fn find_file_case_insensitive(&self, dir: &Path, filename: &str) -> Option<PathBuf> {
        let wanted = filename.to_lowercase();
        self.fs
            .read_dir(dir)
            .ok()?
            .into_iter()
            .find(|e| !e.is_dir() && e.file_name().to_lowercase() == wanted)
            .map(|e| e.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn locator_fixture() -> MockFileSystem {
        let fs = MockFileSystem::new();
        fs.add_file("/r/Setup1/WaferMapRecipe.ini", "[GENERAL]\n");
        fs.add_file("/r/Setup1/Recipes/Default/Recipe.ini", "[AutoCycle]\n");
        fs.add_file("/r/Setup1/Recipes/Default/Sub/RTP.txt", "");
        fs.add_file("/r/Setup1/Recipes/Default/Zones/Pad A.ini", "[Surface]\n");
        fs.add_dir("/r/Setup1/Recipes/ProdB");
        fs
    }

    #[test]
    fn test_setup_and_recipes_dirs() {
        let fs = locator_fixture();
        let locator = RecipeLocator::new(&fs, "/r");
        assert_eq!(locator.setup_dir().unwrap(), PathBuf::from("/r/Setup1"));
        assert_eq!(
            locator.recipes_dir().unwrap(),
            PathBuf::from("/r/Setup1/Recipes")
        );
    }

    #[test]
    fn test_missing_setup_is_error() {
        let fs = MockFileSystem::new();
        fs.add_dir("/r");
        let locator = RecipeLocator::new(&fs, "/r");
        match locator.setup_dir().unwrap_err() {
            RecipeError::MissingFolder(path) => {
                assert_eq!(path, PathBuf::from("/r/Setup1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_default_is_error() {
        let fs = MockFileSystem::new();
        fs.add_dir("/r/Setup1/Recipes/OnlyOther");
        let locator = RecipeLocator::new(&fs, "/r");
        assert!(matches!(
            locator.recipes_dir(),
            Err(RecipeError::MissingFolder(_))
        ));
    }

    #[test]
    fn test_extra_profile_dirs_excludes_default() {
        let fs = locator_fixture();
        let locator = RecipeLocator::new(&fs, "/r");
        let extras = locator.extra_profile_dirs().unwrap();
        assert_eq!(extras.len(), 1);
        assert_eq!(extras[0].file_name(), "ProdB");
    }

    #[test]
    fn test_find_file_recursive() {
        let fs = locator_fixture();
        let locator = RecipeLocator::new(&fs, "/r");
        let dir = PathBuf::from("/r/Setup1/Recipes/Default");
        assert_eq!(
            locator.find_file(&dir, "RTP.txt"),
            Some(PathBuf::from("/r/Setup1/Recipes/Default/Sub/RTP.txt"))
        );
        assert_eq!(locator.find_file(&dir, "Missing.ini"), None);
        // Case-sensitive by contract.
        assert_eq!(locator.find_file(&dir, "rtp.txt"), None);
    }

    #[test]
    fn test_find_file_prefers_shallow_match() {
        let fs = locator_fixture();
        fs.add_file("/r/Setup1/Recipes/Default/RTP.txt", "top");
        let locator = RecipeLocator::new(&fs, "/r");
        let dir = PathBuf::from("/r/Setup1/Recipes/Default");
        assert_eq!(
            locator.find_file(&dir, "RTP.txt"),
            Some(PathBuf::from("/r/Setup1/Recipes/Default/RTP.txt"))
        );
    }

    #[test]
    fn test_find_file_case_insensitive() {
        let fs = locator_fixture();
        let locator = RecipeLocator::new(&fs, "/r");
        let zones = PathBuf::from("/r/Setup1/Recipes/Default/Zones");
        assert_eq!(
            locator.find_file_case_insensitive(&zones, "pad a.INI"),
            Some(PathBuf::from("/r/Setup1/Recipes/Default/Zones/Pad A.ini"))
        );
        assert_eq!(locator.find_file_case_insensitive(&zones, "pad b.ini"), None);
    }

    #[test]
    fn test_wafer_map_recipe_optional() {
        let fs = locator_fixture();
        let locator = RecipeLocator::new(&fs, "/r");
        assert!(locator.wafer_map_recipe().is_some());

        let empty = MockFileSystem::new();
        empty.add_dir("/r/Setup1");
        let locator = RecipeLocator::new(&empty, "/r");
        assert!(locator.wafer_map_recipe().is_none());
    }
}
