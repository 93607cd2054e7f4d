//! Checklist assembler boundary
//!
//! The assembler that writes the actual checklist document lives outside
//! this crate. The core's obligation ends at a stable, profile-scoped
//! namespace plus the cell-mapping resolution below.

use crate::pipeline::RecipeReport;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Renders a report into a checklist document. Implemented by the external
/// document layer; the CLI's JSON/YAML output stands in for it here.
pub trait ChecklistAssembler {
    fn render(&self, report: &RecipeReport) -> Result<()>;
}

/// Destination of one field in the checklist document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellAddress {
    pub sheet: String,
    pub cell: String,
}

/// One entry of the static field-to-cell table: which profile's namespace
/// the key is read from (`None` for recipe globals) and where it lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellMapEntry {
    pub profile: Option<String>,
    pub key: String,
    pub address: CellAddress,
}

/// A resolved value ready for the document writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellAssignment {
    pub address: CellAddress,
    pub value: String,
}

/// Static, versioned field-to-cell mapping table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellMap {
    pub version: String,
    pub entries: Vec<CellMapEntry>,
}

impl CellMap {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            entries: Vec::new(),
        }
    }

    pub fn insert(
        &mut self,
        profile: Option<&str>,
        key: &str,
        sheet: &str,
        cell: &str,
    ) -> &mut Self {
        self.entries.push(CellMapEntry {
            profile: profile.map(str::to_string),
            key: key.to_string(),
            address: CellAddress {
                sheet: sheet.to_string(),
                cell: cell.to_string(),
            },
        });
        self
    }

    /// Look up each entry in the report. Keys missing from the namespaces
    /// are skipped; the document keeps its template value there.
    pub fn resolve(&self, report: &RecipeReport) -> Vec<CellAssignment> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let value = match &entry.profile {
                    Some(label) => report.profile(label)?.values.get(&entry.key),
                    None => report.globals.get(&entry.key),
                }?;
                Some(CellAssignment {
                    address: entry.address.clone(),
                    value: value.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceBuilder;
    use crate::pipeline::ProfileReport;
    use crate::recipe::{ProfileCount, RecipeIdentity};
    use chrono::Utc;

    fn report_fixture() -> RecipeReport {
        let mut globals = NamespaceBuilder::new("recipe");
        globals.insert("AVI_recipe_group_ID", "GRP2");
        let mut values = NamespaceBuilder::new("Default");
        values.insert("ProductInfo_Geometric_Diameter", "300");
        RecipeReport {
            identity: RecipeIdentity::parse("EQP1-GRP2-S-E-V1").unwrap(),
            profile_count: ProfileCount::Single,
            generated_at: Utc::now(),
            globals: globals.finish(),
            profiles: vec![ProfileReport {
                profile: "Default".to_string(),
                folder_name: "Default".to_string(),
                surface_enabled: true,
                values: values.finish(),
            }],
        }
    }

    #[test]
    fn test_resolve_global_and_profile_keys() {
        let mut map = CellMap::new("V4");
        map.insert(None, "AVI_recipe_group_ID", "Check list", "C4")
            .insert(Some("Default"), "ProductInfo_Geometric_Diameter", "Check list", "C5")
            .insert(Some("Default"), "Missing_Key", "Check list", "C6")
            .insert(Some("Default1"), "ProductInfo_Geometric_Diameter", "Check list", "C7");

        let assignments = map.resolve(&report_fixture());
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].value, "GRP2");
        assert_eq!(assignments[0].address.cell, "C4");
        assert_eq!(assignments[1].value, "300");
    }
}
