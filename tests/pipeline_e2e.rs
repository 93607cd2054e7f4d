//! End-to-end pipeline tests against real on-disk recipe trees

use avicheck::fs::RealFileSystem;
use avicheck::pipeline::Pipeline;
use avicheck::recipe::{ProfileCount, RecipeError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const RECIPE_NAME: &str = "AVI01-GRP2-CU-E-V450";

/// Builds a complete single-profile recipe tree under `dir` and returns the
/// recipe root path.
fn create_recipe_tree(dir: &TempDir) -> PathBuf {
    let root = dir.path().join(RECIPE_NAME);
    let default = root.join("Setup1/Recipes/Default");
    let zones = default.join("Zones");
    fs::create_dir_all(&zones).expect("Failed to create recipe tree");

    fs::write(
        root.join("Setup1/WaferMapRecipe.ini"),
        "[GENERAL]\nExportInAutoCycle = 1\n\
         [Input_Update]\nEnable = 1\nFileMask = *.map\n\
         ImportDirectory = D:\\Maps\nConverterName = SINF\n",
    )
    .expect("Failed to write WaferMapRecipe.ini");

    fs::write(
        default.join("OpticsPreset.ini"),
        "[RobotSetup]\nName = PresetA\n\
         [General]\nScan2d-Mag2 = 10x\nVerifyColorMag3-Mag = 20x\n\
         DiffLight = 42.35\nRefLight = 55\nVerifyColorMag3-RefLight = 7\n",
    )
    .expect("Failed to write OpticsPreset.ini");

    fs::write(
        default.join("AlignRtp.ini"),
        "[DIE Alignment]\nDie__MinScore = 80\n",
    )
    .expect("Failed to write AlignRtp.ini");

    fs::write(
        default.join("ProductInfo.ini"),
        "[General]\nOCRWaferIDMask = ****\n\
         [Geometric]\nXDieIndex = 12\nYDieIndex = 8\nDiameter = 300\n\
         [UpperIdReader]\nEnabled = 1\nJobName = JOB7\n",
    )
    .expect("Failed to write ProductInfo.ini");

    fs::write(
        default.join("AlignmentData.ini"),
        "[General]\nMinScore = 70\n",
    )
    .expect("Failed to write AlignmentData.ini");

    fs::write(
        default.join("Recipe.ini"),
        "[AutoCycle]\nExportPMdata = 1\nMaxImagesToGrabDie = 20\n",
    )
    .expect("Failed to write Recipe.ini");

    // Pad_A has Solder Bump enabled, Pad_B has no zone INI at all.
    fs::write(
        default.join("RTP.txt"),
        "[PostProcess]\nSomeKey = 1\n\
         [Pad_A]                 ; Zone name\n\
         Alg = Solder Bump\nHeight = 12\nDiameter = .5 ; microns\n\
         Alg = Surface\nStray = 4\n\
         [Pad_B]                 ; Zone name\n\
         Alg = Surface\nCluster_Area = 3\n\
         [Scan_Area]             ; Zone name\n\
         Alg = Surface\nMaxAreaSum = 100\n",
    )
    .expect("Failed to write RTP.txt");

    fs::write(
        zones.join("Pad A.ini"),
        "[Solder Bump]\nEnable = 1\n[Surface]\nEnable = 0\n",
    )
    .expect("Failed to write Pad A.ini");

    fs::write(zones.join("Scan Area.ini"), "[Surface]\nEnable = 1\n")
        .expect("Failed to write Scan Area.ini");

    root
}

fn add_secondary_profile(root: &Path, name: &str) {
    let profile = root.join("Setup1/Recipes").join(name);
    fs::create_dir_all(&profile).expect("Failed to create profile dir");
    fs::write(
        profile.join("Recipe.ini"),
        "[AutoCycle]\nExportPMdata = 0\nMaxImagesToGrabDie = 5\n",
    )
    .expect("Failed to write Recipe.ini");
}

#[test]
fn test_single_profile_extraction() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = create_recipe_tree(&temp_dir);

    let fs = RealFileSystem;
    let report = Pipeline::new(&fs).run(&root).expect("extraction failed");

    assert_eq!(report.identity.name, RECIPE_NAME);
    assert_eq!(report.identity.equipment_id, "AVI01");
    assert_eq!(report.identity.group_id, "GRP2");
    assert_eq!(report.identity.stage, "CU");
    assert_eq!(report.identity.version, "V450");
    assert_eq!(report.profile_count, ProfileCount::Single);

    assert_eq!(report.globals.get("AVI_recipe_name"), Some(RECIPE_NAME));
    assert_eq!(report.globals.get("AVI_recipe_EQP_ID"), Some("AVI01"));
    assert_eq!(report.globals.get("Recipe_file_count"), Some("Single"));
    assert_eq!(
        report.globals.get("WaferMapRecipe_Input_Update_FileMask"),
        Some("*.map")
    );

    assert_eq!(report.profiles.len(), 1);
    let profile = &report.profiles[0];
    assert_eq!(profile.profile, "Default");
    assert_eq!(profile.folder_name, "Default");
    assert!(profile.surface_enabled);

    // Pad_A maps to slot 1; only its enabled algorithm contributes keys.
    assert_eq!(
        profile.values.get("RTP_Bump_Map_1_Solder_Bump_Alg"),
        Some("Solder_Bump")
    );
    assert_eq!(
        profile.values.get("RTP_Bump_Map_1_Solder_Bump_Height"),
        Some("12")
    );
    assert_eq!(
        profile.values.get("RTP_Bump_Map_1_Solder_Bump_Diameter"),
        Some("0.5")
    );
    assert_eq!(
        profile.values.keys_with_prefix("RTP_Bump_Map_1_Surface_").count(),
        0
    );

    // Pad_B has no zone INI: rewritten to a Fail block, no slot 2 keys.
    assert_eq!(
        profile.values.keys_with_prefix("RTP_Bump_Map_2_").count(),
        0
    );

    // Scan area parses unconditionally with its algorithm pinned.
    assert_eq!(
        profile.values.get("RTP_Scan_Area_Surface_Alg"),
        Some("Surface")
    );
    assert_eq!(
        profile.values.get("RTP_Scan_Area_Surface_MaxAreaSum"),
        Some("100")
    );

    // Fixed and optics fields.
    assert_eq!(
        profile.values.get("AlignRtp_DIE_Alignment_Die__MinScore"),
        Some("80")
    );
    assert_eq!(
        profile.values.get("ProductInfo_Geometric_Diameter"),
        Some("300")
    );
    assert_eq!(
        profile.values.get("OpticsPreset_General_DiffLight"),
        Some("42.3")
    );
    assert_eq!(
        profile.values.get("OpticsPreset_General_RefLight"),
        Some("55.0")
    );
}

#[test]
fn test_extraction_is_idempotent() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = create_recipe_tree(&temp_dir);

    let fs = RealFileSystem;
    let first = Pipeline::new(&fs).run(&root).expect("first run failed");
    let second = Pipeline::new(&fs).run(&root).expect("second run failed");

    assert_eq!(
        serde_json::to_value(&first.globals).unwrap(),
        serde_json::to_value(&second.globals).unwrap()
    );
    assert_eq!(first.profiles.len(), second.profiles.len());
    for (a, b) in first.profiles.iter().zip(&second.profiles) {
        assert_eq!(
            serde_json::to_value(&a.values).unwrap(),
            serde_json::to_value(&b.values).unwrap()
        );
    }
}

#[test]
fn test_two_profiles_reported_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = create_recipe_tree(&temp_dir);
    add_secondary_profile(&root, "ProdB");

    let fs = RealFileSystem;
    let report = Pipeline::new(&fs).run(&root).expect("extraction failed");

    assert_eq!(report.profile_count, ProfileCount::Multi);
    assert_eq!(report.globals.get("Recipe_file_count"), Some("Multi"));
    assert_eq!(report.profiles.len(), 2);
    assert_eq!(report.profiles[0].profile, "Default");
    assert_eq!(report.profiles[1].profile, "Default1");
    assert_eq!(report.profiles[1].folder_name, "ProdB");
    assert_eq!(
        report.profiles[1].values.get("Recipe_AutoCycle_MaxImagesToGrabDie"),
        Some("5")
    );
}

#[test]
fn test_three_profiles_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = create_recipe_tree(&temp_dir);
    add_secondary_profile(&root, "ProdB");
    add_secondary_profile(&root, "ProdC");

    let fs = RealFileSystem;
    match Pipeline::new(&fs).run(&root) {
        Err(RecipeError::TooManyProfiles { count, .. }) => assert_eq!(count, 3),
        other => panic!("expected TooManyProfiles, got {other:?}"),
    }
}

#[test]
fn test_invalid_recipe_name_is_rejected_before_io() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("not-a-recipe");
    // Deliberately no Setup1 tree: the name check must come first.
    fs::create_dir_all(&root).expect("Failed to create dir");

    let fs = RealFileSystem;
    match Pipeline::new(&fs).run(&root) {
        Err(RecipeError::InvalidName { name }) => assert_eq!(name, "not-a-recipe"),
        other => panic!("expected InvalidName, got {other:?}"),
    }
}

#[test]
fn test_missing_setup_folder_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join(RECIPE_NAME);
    fs::create_dir_all(&root).expect("Failed to create dir");

    let fs = RealFileSystem;
    match Pipeline::new(&fs).run(&root) {
        Err(RecipeError::MissingFolder(path)) => {
            assert!(path.ends_with("Setup1"));
        }
        other => panic!("expected MissingFolder, got {other:?}"),
    }
}

#[test]
fn test_report_serializes_to_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = create_recipe_tree(&temp_dir);

    let fs = RealFileSystem;
    let report = Pipeline::new(&fs).run(&root).expect("extraction failed");
    let json = serde_json::to_string_pretty(&report).expect("serialization failed");

    assert!(json.contains("\"AVI_recipe_EQP_ID\""));
    assert!(json.contains("\"RTP_Bump_Map_1_Solder_Bump_Alg\""));
    assert!(json.contains("\"surface_enabled\": true"));
}
