//! Tolerant INI reader for inspection-tool configuration files
//!
//! The source tool writes INI files with inconsistent encodings and stray
//! non-ASCII bytes. Everything outside the printable ASCII range is stripped
//! before parsing so that noise never breaks section or key recognition.
//! Key case is preserved exactly as written.

use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigReadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("malformed section header at {path}:{line}: {text:?}")]
    MalformedSection {
        path: PathBuf,
        line: usize,
        text: String,
    },
}

impl ConfigReadError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigReadError::Io { path, .. } => path,
            ConfigReadError::MalformedSection { path, .. } => path,
        }
    }
}

/// One `[section]` worth of entries, in file order. Lookups are
/// case-sensitive; duplicate keys resolve to the last occurrence.
#[derive(Debug, Clone, Default)]
pub struct Section {
    entries: Vec<(String, String)>,
}

impl Section {
    /// Last value written for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First entry whose key satisfies `pred`, in file order.
    pub fn find_first(&self, pred: impl Fn(&str) -> bool) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| pred(k))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parsed section -> key -> value view of a single INI file.
#[derive(Debug, Clone, Default)]
pub struct IniDocument {
    sections: Vec<(String, Section)>,
}

impl IniDocument {
    /// Read and parse `path` through the given file system. Non-ASCII noise
    /// is scrubbed before parsing.
    pub fn read<F: FileSystem>(fs: &F, path: &Path) -> Result<Self, ConfigReadError> {
        let raw = fs.read_to_string(path).map_err(|source| ConfigReadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&scrub_ascii(&raw), path)
    }

    /// Parse already-scrubbed text. Fails only on unbalanced section
    /// brackets; everything else degrades to "key absent".
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigReadError> {
        let mut sections: Vec<(String, Section)> = Vec::new();
        let mut current: Option<usize> = None;

        for (lineno, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                continue;
            }
            if trimmed.starts_with('[') {
                let end = trimmed.find(']').ok_or_else(|| ConfigReadError::MalformedSection {
                    path: path.to_path_buf(),
                    line: lineno + 1,
                    text: trimmed.to_string(),
                })?;
                let name = trimmed[1..end].trim().to_string();
                // Duplicate sections merge into the first occurrence.
                let idx = match sections.iter().position(|(n, _)| *n == name) {
                    Some(idx) => idx,
                    None => {
                        sections.push((name, Section::default()));
                        sections.len() - 1
                    }
                };
                current = Some(idx);
                continue;
            }
            if let Some((key, value)) = trimmed.split_once('=') {
                if let Some(idx) = current {
                    sections[idx]
                        .1
                        .entries
                        .push((key.trim().to_string(), value.trim().to_string()));
                }
            }
            // Lines without '=' outside a header are tool noise; skip them.
        }

        Ok(Self { sections })
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Value of `section.key`, or `fallback` when either is missing.
    pub fn get(&self, section: &str, key: &str, fallback: &str) -> String {
        self.section(section)
            .and_then(|s| s.get(key))
            .unwrap_or(fallback)
            .to_string()
    }

    /// Boolean value of `section.key` using the tool's conventions
    /// (1/yes/true/on), or `fallback` when missing or unrecognizable.
    pub fn get_bool(&self, section: &str, key: &str, fallback: bool) -> bool {
        match self.section(section).and_then(|s| s.get(key)) {
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => true,
                "0" | "no" | "false" | "off" => false,
                _ => fallback,
            },
            None => fallback,
        }
    }
}

/// Drop every character outside the printable ASCII range, keeping line
/// structure intact.
pub fn scrub_ascii(text: &str) -> String {
    text.chars()
        .filter(|c| matches!(c, ' '..='~' | '\n' | '\r' | '\t'))
        .collect()
}
