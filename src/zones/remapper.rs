//! Zone-to-slot remapping and parameter extraction
//!
//! Two passes over the token stream. The rewrite pass renumbers recognized
//! zone headers into `[Bump_Map_N]` (passing) or `[Fail]` (no algorithm
//! enabled) and drops zones past the slot limit together with their bodies.
//! The extraction pass walks the rewritten text with an explicit state
//! machine and collects enabled algorithms' parameters into the namespace.

use super::algorithm::{Algorithm, AlgorithmEnableSet, Slot};
use super::lexer::{tokenize, Token, ZONE_NAME_MARKER};
use super::status::ZoneScan;
use super::{RESERVED_ZONES, SCAN_AREA_ZONE};
use crate::namespace::NamespaceBuilder;
use std::collections::BTreeMap;
use tracing::debug;

const FAIL_HEADER: &str = "Fail";

/// Rewrite one profile's zone text with canonical slot headers.
pub fn rewrite(
    text: &str,
    scan: &ZoneScan,
    status: &BTreeMap<Slot, AlgorithmEnableSet>,
) -> String {
    let mut out = Vec::new();
    let mut skipping = false;

    for token in tokenize(text) {
        match token {
            Token::ZoneHeader { name, raw } => {
                skipping = false;
                if RESERVED_ZONES.contains(&name) {
                    out.push(raw.to_string());
                } else if let Some(slot) = scan.slot_for(name) {
                    let passing = status.get(&slot).is_some_and(|s| s.any_enabled());
                    let header = if passing {
                        slot.label()
                    } else {
                        FAIL_HEADER.to_string()
                    };
                    debug!(zone = name, header = %header, "zone header rewritten");
                    out.push(format!("[{header}]   {ZONE_NAME_MARKER}"));
                } else {
                    // Past the slot limit: drop the header and its body.
                    skipping = true;
                }
            }
            Token::Header { raw, .. } => {
                skipping = false;
                out.push(raw.to_string());
            }
            other => {
                if !skipping {
                    out.push(other.raw().to_string());
                }
            }
        }
    }

    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    result
}

/// Extraction state, one per block of the rewritten text. No backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    /// Before the first header, or inside a block nothing extracts from.
    Scanning,
    /// Inside `[Bump_Map_N]`, before/after `Alg = ...` markers.
    SlotBlock { slot: Slot },
    /// Inside `[Scan_Area]`, parsed unconditionally.
    ScanArea,
    /// Inside `[Fail]`, recognized but never parsed.
    FailBlock,
}

/// Parse the rewritten text into `RTP_*` namespace keys.
///
/// Within a slot block, each `Alg = <name>` marker opens a sub-section;
/// parameters are collected only while the current algorithm is enabled for
/// that slot. Lines before the first marker belong to no algorithm and are
/// skipped. The scan-area block is parsed regardless of any enable flag.
pub fn extract(
    rewritten: &str,
    status: &BTreeMap<Slot, AlgorithmEnableSet>,
    builder: &mut NamespaceBuilder,
) {
    let mut state = BlockState::Scanning;
    // Current algorithm within a slot block, and whether it is enabled.
    let mut active: Option<(Algorithm, bool)> = None;

    for token in tokenize(rewritten) {
        match token {
            Token::ZoneHeader { name, .. } | Token::Header { name, .. } => {
                active = None;
                state = if name == FAIL_HEADER {
                    BlockState::FailBlock
                } else if name == SCAN_AREA_ZONE {
                    builder.insert(
                        scan_area_key("Alg"),
                        Algorithm::Surface.key_name(),
                    );
                    BlockState::ScanArea
                } else if let Some(slot) = parse_slot_header(name) {
                    BlockState::SlotBlock { slot }
                } else {
                    BlockState::Scanning
                };
            }
            Token::AlgMarker { name, .. } => match state {
                BlockState::SlotBlock { slot } => {
                    let algorithm = Algorithm::from_marker(name);
                    let enabled = algorithm.is_some_and(|a| {
                        status.get(&slot).is_some_and(|s| s.is_enabled(a))
                    });
                    active = algorithm.map(|a| (a, enabled));
                    if let Some((algorithm, true)) = active {
                        builder.insert(
                            slot_key(slot, algorithm, "Alg"),
                            algorithm.key_name(),
                        );
                    } else {
                        debug!(slot = %slot, alg = name, "skipping disabled algorithm");
                    }
                }
                // The scan-area Alg value is pinned to Surface on entry.
                BlockState::ScanArea | BlockState::FailBlock | BlockState::Scanning => {}
            },
            Token::KeyValue { key, value, .. } => match state {
                BlockState::SlotBlock { slot } => {
                    if let Some((algorithm, true)) = active {
                        builder.insert(
                            slot_key(slot, algorithm, key),
                            normalize_value(value),
                        );
                    }
                }
                BlockState::ScanArea => {
                    builder.insert(scan_area_key(key), normalize_value(value));
                }
                BlockState::FailBlock | BlockState::Scanning => {}
            },
            Token::Other { .. } => {}
        }
    }
}

fn slot_key(slot: Slot, algorithm: Algorithm, param: &str) -> String {
    format!("RTP_{}_{}_{}", slot.label(), algorithm.key_name(), param)
}

fn scan_area_key(param: &str) -> String {
    format!("RTP_Scan_Area_Surface_{param}")
}

fn parse_slot_header(name: &str) -> Option<Slot> {
    let index = name.strip_prefix("Bump_Map_")?.parse::<u8>().ok()?;
    Slot::new(index)
}

/// Strip the inline comment, trim, and left-pad bare decimals (`.5` -> `0.5`).
fn normalize_value(value: &str) -> String {
    let value = value.split(';').next().unwrap_or("").trim();
    if value.starts_with('.') {
        format!("0{value}")
    } else {
        value.to_string()
    }
}
