//! avicheck - AVI recipe checklist extraction
//!
//! This library reads an automated optical inspection (AVI) recipe directory,
//! remaps its zone definitions onto a fixed set of bump-map slots, and
//! flattens the per-profile configuration into a deterministic key/value
//! namespace suitable for checklist reports.
//!
//! # Core Concepts
//!
//! - **Recipe**: A vendor recipe folder whose name encodes equipment, group,
//!   stage, and version, containing a `Setup1/Recipes` tree with one or two
//!   inspection profiles
//! - **Zone remapping**: The `Recipe.RTP.txt` zone list is rewritten so the
//!   first five non-reserved zones become `Bump_Map_1..5` and zones with no
//!   enabled algorithm become `[Fail]` blocks
//! - **Flat namespace**: Every extracted field lands in a sorted key/value
//!   map, keyed by its slot and algorithm, so repeated runs over the same
//!   recipe produce identical output
//!
//! # Example Usage
//!
//! ```ignore
//! use avicheck::fs::RealFileSystem;
//! use avicheck::pipeline::Pipeline;
//! use std::path::Path;
//!
//! fn report(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
//!     let fs = RealFileSystem;
//!     let report = Pipeline::new(&fs).run(path)?;
//!     println!("{} profiles", report.profiles.len());
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`recipe`]: Recipe identity parsing and directory layout
//! - [`zones`]: Zone scanning, slot assignment, and RTP rewriting
//! - [`extract`]: Fixed-field and optics extraction from recipe INI files
//! - [`pipeline`]: End-to-end extraction orchestration

// Public modules
pub mod assemble;
pub mod cli;
pub mod extract;
pub mod fs;
pub mod ini;
pub mod namespace;
pub mod pipeline;
pub mod progress;
pub mod recipe;
pub mod zones;

// Re-export key types for convenient access
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use ini::{ConfigReadError, IniDocument};
pub use namespace::{FlatNamespace, NamespaceBuilder};
pub use pipeline::{Pipeline, ProfileReport, RecipeReport};
pub use recipe::{Profile, ProfileCount, RecipeError, RecipeIdentity, RecipeLocator};
pub use zones::{Algorithm, Slot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
