//! Sequential extraction pipeline
//!
//! Single-threaded and synchronous by design: profiles are processed fully,
//! in order (Primary, then Secondary), each with its own namespace and zone
//! state. Naming and structural errors abort; missing files degrade to
//! absent fields so a partial recipe still yields a best-effort checklist.

mod report;

pub use report::{ProfileReport, RecipeReport};

use crate::extract::{extract_fixed_fields, extract_optics, extract_wafer_map_recipe};
use crate::fs::FileSystem;
use crate::namespace::NamespaceBuilder;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::recipe::{classify_profiles, Profile, RecipeError, RecipeIdentity, RecipeLocator};
use crate::zones::{
    extract as extract_zone_params, rewrite, scan_area_surface_enabled, scan_zones,
    ZoneStatusResolver,
};
use chrono::Utc;
use std::path::Path;
use tracing::{debug, info, warn};

/// Runs the whole extraction for one recipe root.
pub struct Pipeline<'a, F: FileSystem> {
    fs: &'a F,
    progress: &'a dyn ProgressHandler,
}

impl<'a, F: FileSystem> Pipeline<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        static NO_OP: NoOpHandler = NoOpHandler;
        Self {
            fs,
            progress: &NO_OP,
        }
    }

    pub fn with_progress(fs: &'a F, progress: &'a dyn ProgressHandler) -> Self {
        Self { fs, progress }
    }

    pub fn run(&self, recipe_root: &Path) -> Result<RecipeReport, RecipeError> {
        match self.run_inner(recipe_root) {
            Ok(report) => {
                self.progress.on_progress(&ProgressEvent::Completed {
                    profiles: report.profiles.len(),
                    total_keys: report.total_keys(),
                });
                Ok(report)
            }
            Err(err) => {
                self.progress.on_progress(&ProgressEvent::Failed {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    fn run_inner(&self, recipe_root: &Path) -> Result<RecipeReport, RecipeError> {
        // Identity is validated before any file I/O.
        let identity = RecipeIdentity::from_path(recipe_root)?;
        self.progress.on_progress(&ProgressEvent::Started {
            recipe: identity.name.clone(),
        });
        info!(recipe = %identity.name, root = %recipe_root.display(), "extracting recipe");

        let locator = RecipeLocator::new(self.fs, recipe_root);
        let recipes_dir = locator.recipes_dir()?;
        let default_dir = locator.default_profile_dir()?;
        let extras = locator.extra_profile_dirs()?;
        let (profile_count, profiles) = classify_profiles(&recipes_dir, &default_dir, &extras)?;
        info!(count = %profile_count, "profiles classified");

        let mut globals = NamespaceBuilder::new("recipe");
        globals.insert("AVI_recipe_name", identity.name.as_str());
        globals.insert("AVI_recipe_EQP_ID", identity.equipment_id.as_str());
        globals.insert("AVI_recipe_group_ID", identity.group_id.as_str());
        globals.insert("Recipe_file_count", profile_count.to_string());

        match locator.wafer_map_recipe() {
            Some(path) => extract_wafer_map_recipe(self.fs, &path, &mut globals),
            None => warn!("WaferMapRecipe.ini not found under Setup1"),
        }

        let profile_reports = profiles
            .iter()
            .map(|profile| self.process_profile(&locator, profile))
            .collect();

        Ok(RecipeReport {
            identity,
            profile_count,
            generated_at: Utc::now(),
            globals: globals.finish(),
            profiles: profile_reports,
        })
    }

    fn process_profile(
        &self,
        locator: &RecipeLocator<'_, F>,
        profile: &Profile,
    ) -> ProfileReport {
        let label = profile.kind.label();
        self.progress.on_progress(&ProgressEvent::ProfileStarted {
            profile: label.to_string(),
        });

        let mut builder = NamespaceBuilder::new(label);
        extract_optics(self.fs, locator, &profile.path, &mut builder);
        extract_fixed_fields(self.fs, locator, &profile.path, &mut builder);
        self.process_zone_text(locator, profile, &mut builder);

        let zones_dir = locator.zones_dir(&profile.path);
        let surface_enabled = scan_area_surface_enabled(self.fs, locator, &zones_dir);

        let values = builder.finish();
        self.progress.on_progress(&ProgressEvent::ProfileComplete {
            profile: label.to_string(),
            keys: values.len(),
        });

        ProfileReport {
            profile: label.to_string(),
            folder_name: profile.folder_name.clone(),
            surface_enabled,
            values,
        }
    }

    fn process_zone_text(
        &self,
        locator: &RecipeLocator<'_, F>,
        profile: &Profile,
        builder: &mut NamespaceBuilder,
    ) {
        let Some(rtp_path) = locator.find_file(&profile.path, "RTP.txt") else {
            warn!(profile = profile.kind.label(), "RTP.txt not found");
            return;
        };
        let raw = match self.fs.read_to_string(&rtp_path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %rtp_path.display(), error = %err, "unreadable RTP.txt");
                return;
            }
        };
        let text = crate::ini::scrub_ascii(&raw);

        let scan = scan_zones(&text);
        let zones_dir = locator.zones_dir(&profile.path);
        let resolver = ZoneStatusResolver::new(self.fs, locator, zones_dir);
        let status = resolver.resolve(&scan);
        self.progress.on_progress(&ProgressEvent::ZonesResolved {
            profile: profile.kind.label().to_string(),
            zones: scan.assigned.len() + scan.overflow.len(),
            assigned: scan.assigned.len(),
        });

        let rewritten = rewrite(&text, &scan, &status);
        debug!(profile = profile.kind.label(), "zone text rewritten");
        extract_zone_params(&rewritten, &status, builder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::recipe::ProfileCount;
    use std::path::PathBuf;

    const RECIPE_ROOT: &str = "/data/EQP1-GRP2-S-E-V1";

    fn single_profile_fixture() -> MockFileSystem {
        let fs = MockFileSystem::new();
        let root = PathBuf::from(RECIPE_ROOT);
        let default = root.join("Setup1/Recipes/Default");

        fs.add_file(
            root.join("Setup1/WaferMapRecipe.ini"),
            "[GENERAL]\nExportInAutoCycle = 1\n[Input_Update]\nEnable = 0\n",
        );
        fs.add_file(
            default.join("AlignmentData.ini"),
            "[General]\nMinScore = 80\n",
        );
        fs.add_file(
            default.join("RTP.txt"),
            "[Pad_A]   ; Zone name\nAlg = Solder_Bump\nHeight = .5\nAlg = Surface\nCluster_Area = 3\n[Scan_Area]\nAlg = Surface\nMaxAreaSum = 100\n",
        );
        fs.add_file(
            default.join("Zones/Pad A.ini"),
            "[Solder Bump]\nEnable = 1\n",
        );
        fs
    }

    #[test]
    fn test_end_to_end_single_profile() {
        let fs = single_profile_fixture();
        let pipeline = Pipeline::new(&fs);
        let report = pipeline.run(Path::new(RECIPE_ROOT)).unwrap();

        assert_eq!(report.profile_count, ProfileCount::Single);
        assert_eq!(report.globals.get("Recipe_file_count"), Some("Single"));
        assert_eq!(report.globals.get("AVI_recipe_EQP_ID"), Some("EQP1"));
        assert_eq!(report.globals.get("AVI_recipe_group_ID"), Some("GRP2"));
        assert_eq!(
            report.globals.get("WaferMapRecipe_GENERAL_ExportInAutoCycle"),
            Some("1")
        );

        let profile = report.profile("Default").unwrap();
        assert_eq!(
            profile.values.get("AlignmentData_General_MinScore"),
            Some("80")
        );
        // Solder Bump enabled: parameters land, bare decimal padded.
        assert_eq!(
            profile.values.get("RTP_Bump_Map_1_Solder_Bump_Alg"),
            Some("Solder_Bump")
        );
        assert_eq!(
            profile.values.get("RTP_Bump_Map_1_Solder_Bump_Height"),
            Some("0.5")
        );
        // Surface disabled for the zone: nothing under its prefix.
        assert_eq!(
            profile.values.keys_with_prefix("RTP_Bump_Map_1_Surface_").count(),
            0
        );
        // Scan area parsed unconditionally.
        assert_eq!(
            profile.values.get("RTP_Scan_Area_Surface_MaxAreaSum"),
            Some("100")
        );
        assert!(profile.surface_enabled);
    }

    #[test]
    fn test_invalid_recipe_name_fails_before_io() {
        let fs = MockFileSystem::new();
        let pipeline = Pipeline::new(&fs);
        let err = pipeline.run(Path::new("/data/BadName")).unwrap_err();
        assert!(matches!(err, RecipeError::InvalidName { .. }));
    }

    #[test]
    fn test_two_extra_folders_abort() {
        let fs = single_profile_fixture();
        fs.add_dir(PathBuf::from(RECIPE_ROOT).join("Setup1/Recipes/ExtraA"));
        fs.add_dir(PathBuf::from(RECIPE_ROOT).join("Setup1/Recipes/ExtraB"));
        let pipeline = Pipeline::new(&fs);
        match pipeline.run(Path::new(RECIPE_ROOT)).unwrap_err() {
            RecipeError::TooManyProfiles { count, path } => {
                assert_eq!(count, 3);
                assert!(path.ends_with("Recipes"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_secondary_profile_uses_real_folder_name() {
        let fs = single_profile_fixture();
        let root = PathBuf::from(RECIPE_ROOT);
        let second = root.join("Setup1/Recipes/ProdB");
        fs.add_file(second.join("RTP.txt"), "[Pad_X]   ; Zone name\nAlg = Surface\nCluster_Area = 7\n");
        fs.add_file(second.join("Zones/Pad X.ini"), "[Surface]\nEnable = 1\n");

        let pipeline = Pipeline::new(&fs);
        let report = pipeline.run(Path::new(RECIPE_ROOT)).unwrap();

        assert_eq!(report.profile_count, ProfileCount::Multi);
        assert_eq!(report.globals.get("Recipe_file_count"), Some("Multi"));
        let secondary = report.profile("Default1").unwrap();
        assert_eq!(secondary.folder_name, "ProdB");
        assert_eq!(
            secondary.values.get("RTP_Bump_Map_1_Surface_Cluster_Area"),
            Some("7")
        );
    }

    #[test]
    fn test_idempotent_namespaces() {
        let fs = single_profile_fixture();
        let pipeline = Pipeline::new(&fs);
        let first = pipeline.run(Path::new(RECIPE_ROOT)).unwrap();
        let second = pipeline.run(Path::new(RECIPE_ROOT)).unwrap();
        assert_eq!(first.globals, second.globals);
        assert_eq!(first.profiles[0].values, second.profiles[0].values);
    }

    #[test]
    fn test_missing_zone_ini_marks_fail_and_drops_params() {
        let fs = MockFileSystem::new();
        let root = PathBuf::from(RECIPE_ROOT);
        let default = root.join("Setup1/Recipes/Default");
        fs.add_file(
            default.join("RTP.txt"),
            "[Pad_Z]   ; Zone name\nAlg = Surface\nCluster_Area = 9\n",
        );
        fs.add_dir(default.join("Zones"));

        let pipeline = Pipeline::new(&fs);
        let report = pipeline.run(Path::new(RECIPE_ROOT)).unwrap();
        let profile = report.profile("Default").unwrap();
        assert_eq!(profile.values.keys_with_prefix("RTP_Bump_Map_").count(), 0);
    }
}
