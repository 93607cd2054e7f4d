//! Zone discovery and per-zone algorithm enable resolution

use super::algorithm::{Algorithm, AlgorithmEnableSet, Slot};
use super::lexer::{tokenize, Token};
use super::RESERVED_ZONES;
use crate::fs::FileSystem;
use crate::ini::IniDocument;
use crate::recipe::RecipeLocator;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Result of the single discovery pass over one profile's zone text.
///
/// Slots are assigned in first-appearance order of the zone headers, never
/// filesystem or alphabetical order. Non-reserved zones beyond the fifth are
/// recognized (counted in `overflow`) but never assigned a slot.
#[derive(Debug, Clone, Default)]
pub struct ZoneScan {
    /// (zone name, slot) in textual order.
    pub assigned: Vec<(String, Slot)>,
    /// Zone names past the slot limit, in textual order.
    pub overflow: Vec<String>,
}

impl ZoneScan {
    pub fn slot_for(&self, zone_name: &str) -> Option<Slot> {
        self.assigned
            .iter()
            .find(|(name, _)| name == zone_name)
            .map(|(_, slot)| *slot)
    }

    pub fn is_overflow(&self, zone_name: &str) -> bool {
        self.overflow.iter().any(|name| name == zone_name)
    }
}

/// Discover non-reserved zone headers and assign slots 1..=5 in the order
/// the headers first appear.
pub fn scan_zones(text: &str) -> ZoneScan {
    let mut scan = ZoneScan::default();
    for token in tokenize(text) {
        if let Token::ZoneHeader { name, .. } = token {
            if RESERVED_ZONES.contains(&name) {
                continue;
            }
            if scan.slot_for(name).is_some() || scan.is_overflow(name) {
                continue;
            }
            let next = scan.assigned.len() as u8 + 1;
            match Slot::new(next) {
                Some(slot) => scan.assigned.push((name.to_string(), slot)),
                None => {
                    warn!(zone = name, "zone exceeds slot limit, dropping");
                    scan.overflow.push(name.to_string());
                }
            }
        }
    }
    scan
}

/// Loads each assigned zone's own INI file and reads the six algorithm
/// enable flags.
pub struct ZoneStatusResolver<'a, F: FileSystem> {
    fs: &'a F,
    locator: &'a RecipeLocator<'a, F>,
    zones_dir: PathBuf,
}

impl<'a, F: FileSystem> ZoneStatusResolver<'a, F> {
    pub fn new(fs: &'a F, locator: &'a RecipeLocator<'a, F>, zones_dir: PathBuf) -> Self {
        Self {
            fs,
            locator,
            zones_dir,
        }
    }

    /// Enable flags per assigned slot. A missing zone INI means all six
    /// algorithms are disabled; a malformed one is logged and treated the
    /// same way.
    pub fn resolve(&self, scan: &ZoneScan) -> BTreeMap<Slot, AlgorithmEnableSet> {
        let mut status = BTreeMap::new();
        for (zone_name, slot) in &scan.assigned {
            status.insert(*slot, self.resolve_zone(zone_name, *slot));
        }
        status
    }

    fn resolve_zone(&self, zone_name: &str, slot: Slot) -> AlgorithmEnableSet {
        // Zone names use underscores in the RTP text but spaces on disk.
        let normalized = zone_name.replace('_', " ");
        let filename = format!("{normalized}.ini");

        let Some(ini_path) = self
            .locator
            .find_file_case_insensitive(&self.zones_dir, &filename)
        else {
            warn!(
                zone = zone_name,
                slot = %slot,
                dir = %self.zones_dir.display(),
                "zone INI not found, treating all algorithms as disabled"
            );
            return AlgorithmEnableSet::default();
        };

        match IniDocument::read(self.fs, &ini_path) {
            Ok(doc) => {
                let mut set = AlgorithmEnableSet::default();
                for algorithm in Algorithm::ALL {
                    set.set(
                        algorithm,
                        doc.get_bool(algorithm.ini_name(), "Enable", false),
                    );
                }
                debug!(zone = zone_name, slot = %slot, passing = set.any_enabled(), "zone resolved");
                set
            }
            Err(err) => {
                warn!(
                    zone = zone_name,
                    path = %err.path().display(),
                    error = %err,
                    "unreadable zone INI, treating all algorithms as disabled"
                );
                AlgorithmEnableSet::default()
            }
        }
    }
}

/// `[Surface] Enable` from the profile's `Zones/Scan Area.ini`, used by the
/// assembler to decide whether the surface sheet applies. Missing file or
/// key means enabled.
pub fn scan_area_surface_enabled<F: FileSystem>(
    fs: &F,
    locator: &RecipeLocator<'_, F>,
    zones_dir: &Path,
) -> bool {
    let Some(path) = locator.find_file_case_insensitive(zones_dir, "Scan Area.ini") else {
        debug!(dir = %zones_dir.display(), "Scan Area.ini not found, surface assumed enabled");
        return true;
    };
    match IniDocument::read(fs, &path) {
        Ok(doc) => doc.get("Surface", "Enable", "1") != "0",
        Err(err) => {
            warn!(path = %err.path().display(), error = %err, "unreadable Scan Area.ini");
            true
        }
    }
}
