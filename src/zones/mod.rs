//! Zone text parsing, slot remapping, and parameter extraction

mod algorithm;
pub mod lexer;
mod remapper;
mod status;

pub use algorithm::{Algorithm, AlgorithmEnableSet, Slot};
pub use remapper::{extract, rewrite};
pub use status::{scan_area_surface_enabled, scan_zones, ZoneScan, ZoneStatusResolver};

/// Zone names excluded from slot remapping.
pub const RESERVED_ZONES: [&str; 2] = ["PostProcess", "Scan_Area"];

/// The reserved zone whose block is parsed unconditionally.
pub const SCAN_AREA_ZONE: &str = "Scan_Area";
