//! Output formatting for extraction reports

use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::pipeline::RecipeReport;

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for extraction reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, report: &RecipeReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize report to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &RecipeReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Recipe: {}", report.identity.name);
        let _ = writeln!(
            out,
            "  Equipment: {}  Group: {}  Stage: {}  Version: {}",
            report.identity.equipment_id,
            report.identity.group_id,
            report.identity.stage,
            report.identity.version
        );
        let _ = writeln!(out, "  Profiles: {}", report.profile_count);
        let _ = writeln!(out);

        let _ = writeln!(out, "Global fields ({}):", report.globals.len());
        for (key, value) in report.globals.iter() {
            let _ = writeln!(out, "  {key} = {value}");
        }

        for profile in &report.profiles {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Profile {} (folder {:?}, surface {}):",
                profile.profile,
                profile.folder_name,
                if profile.surface_enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            for (key, value) in profile.values.iter() {
                let _ = writeln!(out, "  {key} = {value}");
            }
        }
        out
    }
}
