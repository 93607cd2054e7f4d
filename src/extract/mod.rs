//! Fixed-schema field extraction from per-profile and global INI files

use crate::fs::FileSystem;
use crate::ini::IniDocument;
use crate::namespace::NamespaceBuilder;
use crate::recipe::RecipeLocator;
use std::path::Path;
use tracing::{debug, warn};

/// One fixed extraction: file, section, key, destination namespace key.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub file: &'static str,
    pub section: &'static str,
    pub key: &'static str,
    pub dest: &'static str,
}

/// Exact-name fields pulled from each profile folder. OpticsPreset fields
/// are pattern-keyed and handled separately.
pub const PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        file: "AlignRtp.ini",
        section: "DIE Alignment",
        key: "Die__MinScore",
        dest: "AlignRtp_DIE_Alignment_Die__MinScore",
    },
    FieldSpec {
        file: "ProductInfo.ini",
        section: "General",
        key: "OCRWaferIDMask",
        dest: "ProductInfo_General_OCRWaferIDMask",
    },
    FieldSpec {
        file: "ProductInfo.ini",
        section: "Geometric",
        key: "XDieIndex",
        dest: "ProductInfo_Geometric_XDieIndex",
    },
    FieldSpec {
        file: "ProductInfo.ini",
        section: "Geometric",
        key: "YDieIndex",
        dest: "ProductInfo_Geometric_YDieIndex",
    },
    FieldSpec {
        file: "ProductInfo.ini",
        section: "Geometric",
        key: "Diameter",
        dest: "ProductInfo_Geometric_Diameter",
    },
    FieldSpec {
        file: "ProductInfo.ini",
        section: "UpperIdReader",
        key: "Enabled",
        dest: "ProductInfo_UpperIdReader_Enabled",
    },
    FieldSpec {
        file: "ProductInfo.ini",
        section: "UpperIdReader",
        key: "JobName",
        dest: "ProductInfo_UpperIdReader_JobName",
    },
    FieldSpec {
        file: "AlignmentData.ini",
        section: "General",
        key: "MinScore",
        dest: "AlignmentData_General_MinScore",
    },
    FieldSpec {
        file: "Recipe.ini",
        section: "AutoCycle",
        key: "ExportPMdata",
        dest: "Recipe_AutoCycle_ExportPMdata",
    },
    FieldSpec {
        file: "Recipe.ini",
        section: "AutoCycle",
        key: "MaxImagesToGrabDie",
        dest: "Recipe_AutoCycle_MaxImagesToGrabDie",
    },
];

/// Extract the exact-name fields for one profile folder. Missing files and
/// fields are recorded as absent; unreadable files are logged and skipped.
pub fn extract_fixed_fields<F: FileSystem>(
    fs: &F,
    locator: &RecipeLocator<'_, F>,
    profile_dir: &Path,
    builder: &mut NamespaceBuilder,
) {
    let mut files: Vec<&'static str> = PROFILE_FIELDS.iter().map(|s| s.file).collect();
    files.dedup();

    for file in files {
        let Some(path) = locator.find_file(profile_dir, file) else {
            debug!(file, profile = builder.scope(), "profile file not found");
            continue;
        };
        let doc = match IniDocument::read(fs, &path) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(path = %err.path().display(), error = %err, "skipping unreadable file");
                continue;
            }
        };
        for spec in PROFILE_FIELDS.iter().filter(|s| s.file == file) {
            let value = doc.get(spec.section, spec.key, "");
            if !value.is_empty() {
                builder.insert(spec.dest, value);
            }
        }
    }
}

/// Extract the pattern-keyed optics fields.
///
/// The tool suffixes `[General]` keys with preset indices, so fields are
/// matched by prefix/suffix rather than exact name; the first match in file
/// order wins. Light-intensity values are rounded to one decimal place.
pub fn extract_optics<F: FileSystem>(
    fs: &F,
    locator: &RecipeLocator<'_, F>,
    profile_dir: &Path,
    builder: &mut NamespaceBuilder,
) {
    let Some(path) = locator.find_file(profile_dir, "OpticsPreset.ini") else {
        debug!(profile = builder.scope(), "OpticsPreset.ini not found");
        return;
    };
    let doc = match IniDocument::read(fs, &path) {
        Ok(doc) => doc,
        Err(err) => {
            warn!(path = %err.path().display(), error = %err, "skipping unreadable file");
            return;
        }
    };

    let name = doc.get("RobotSetup", "Name", "");
    if !name.is_empty() {
        builder.insert("OpticsPreset_Robotsetup_Name", name);
    }

    let Some(general) = doc.section("General") else {
        return;
    };

    let first = |pred: &dyn Fn(&str) -> bool| {
        general.find_first(pred).filter(|v| !v.is_empty())
    };

    if let Some(value) = first(&|k| k.starts_with("Scan2d-Mag")) {
        builder.insert("OpticsPreset_General_Scan2d_Mag", value);
    }
    if let Some(value) = first(&|k| k.contains("VerifyColorMag") && k.ends_with("-Mag")) {
        builder.insert("OpticsPreset_General_VerifyColorMag_Mag", value);
    }
    if let Some(value) = first(&|k| k.starts_with("DiffLight") && !k.contains('-')) {
        builder.insert("OpticsPreset_General_DiffLight", round_to_one_decimal(value));
    }
    if let Some(value) = first(&|k| k.starts_with("RefLight") && !k.contains('-')) {
        builder.insert("OpticsPreset_General_RefLight", round_to_one_decimal(value));
    }
    if let Some(value) = first(&|k| k.contains("VerifyColorMag") && k.ends_with("-RefLight")) {
        builder.insert(
            "OpticsPreset_General_VerifyColorMag_RefLight",
            round_to_one_decimal(value),
        );
    }
}

/// Global (recipe-scoped) fields from `Setup1/WaferMapRecipe.ini`.
pub fn extract_wafer_map_recipe<F: FileSystem>(
    fs: &F,
    path: &Path,
    builder: &mut NamespaceBuilder,
) {
    let doc = match IniDocument::read(fs, path) {
        Ok(doc) => doc,
        Err(err) => {
            warn!(path = %err.path().display(), error = %err, "skipping unreadable file");
            return;
        }
    };
    const FIELDS: &[(&str, &str, &str)] = &[
        (
            "GENERAL",
            "ExportInAutoCycle",
            "WaferMapRecipe_GENERAL_ExportInAutoCycle",
        ),
        ("Input_Update", "Enable", "WaferMapRecipe_Input_Update_Enable"),
        (
            "Input_Update",
            "FileMask",
            "WaferMapRecipe_Input_Update_FileMask",
        ),
        (
            "Input_Update",
            "ImportDirectory",
            "WaferMapRecipe_Input_Update_ImportDirectory",
        ),
        (
            "Input_Update",
            "ConverterName",
            "WaferMapRecipe_Input_Update_ConverterName",
        ),
    ];
    for (section, key, dest) in FIELDS {
        builder.insert(*dest, doc.get(section, key, ""));
    }
}

/// Round a numeric string to one decimal place, formatted as text. A value
/// that does not parse passes through unchanged.
pub fn round_to_one_decimal(value: &str) -> String {
    match value.trim().parse::<f64>() {
        Ok(number) => format!("{number:.1}"),
        Err(_) => value.to_string(),
    }
}
