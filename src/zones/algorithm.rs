//! Closed enumerations for inspection algorithms and bump-map slots

use serde::Serialize;
use std::fmt;

/// The six inspection algorithms a zone can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Algorithm {
    SolderBump,
    SurfaceOnSb,
    UniformSurfaceOnSb,
    Surface,
    PmiAdvanced,
    ProbeMarkInspection,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::SolderBump,
        Algorithm::SurfaceOnSb,
        Algorithm::UniformSurfaceOnSb,
        Algorithm::Surface,
        Algorithm::PmiAdvanced,
        Algorithm::ProbeMarkInspection,
    ];

    /// Section name inside a per-zone INI file.
    pub fn ini_name(&self) -> &'static str {
        match self {
            Algorithm::SolderBump => "Solder Bump",
            Algorithm::SurfaceOnSb => "Surface on SB",
            Algorithm::UniformSurfaceOnSb => "Uniform Surface on SB",
            Algorithm::Surface => "Surface",
            Algorithm::PmiAdvanced => "PMI Advanced",
            Algorithm::ProbeMarkInspection => "Probe Mark Inspection",
        }
    }

    /// Underscored name used in namespace keys, e.g. `Solder_Bump`.
    pub fn key_name(&self) -> &'static str {
        match self {
            Algorithm::SolderBump => "Solder_Bump",
            Algorithm::SurfaceOnSb => "Surface_on_SB",
            Algorithm::UniformSurfaceOnSb => "Uniform_Surface_on_SB",
            Algorithm::Surface => "Surface",
            Algorithm::PmiAdvanced => "PMI_Advanced",
            Algorithm::ProbeMarkInspection => "Probe_Mark_Inspection",
        }
    }

    /// Parse an `Alg = ...` marker value; accepts spaces or underscores.
    pub fn from_marker(marker: &str) -> Option<Algorithm> {
        let normalized = marker.trim().replace('_', " ");
        Algorithm::ALL
            .into_iter()
            .find(|a| a.ini_name() == normalized)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ini_name())
    }
}

/// Canonical bump-map slot, 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Slot(u8);

impl Slot {
    pub const MAX: u8 = 5;

    pub fn new(index: u8) -> Option<Slot> {
        (1..=Self::MAX).contains(&index).then_some(Slot(index))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    /// Header label, e.g. `Bump_Map_3`.
    pub fn label(&self) -> String {
        format!("Bump_Map_{}", self.0)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bump_Map_{}", self.0)
    }
}

/// Per-zone enable flags, one per algorithm. Defaults to all disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlgorithmEnableSet {
    enabled: [bool; 6],
}

impl AlgorithmEnableSet {
    pub fn set(&mut self, algorithm: Algorithm, enabled: bool) {
        self.enabled[Self::position(algorithm)] = enabled;
    }

    pub fn is_enabled(&self, algorithm: Algorithm) -> bool {
        self.enabled[Self::position(algorithm)]
    }

    /// A zone passes iff at least one algorithm is enabled.
    pub fn any_enabled(&self) -> bool {
        self.enabled.iter().any(|e| *e)
    }

    fn position(algorithm: Algorithm) -> usize {
        Algorithm::ALL
            .iter()
            .position(|a| *a == algorithm)
            .unwrap_or(0)
    }
}
