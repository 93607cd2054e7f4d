//! Flat key/value namespace handed to the checklist assembler
//!
//! Keys follow `{SourceFile}_{Section}_{Field}` for fixed fields and
//! `RTP_{Slot}_{Algorithm}_{Param}` for zone parameters. Each profile owns an
//! independent namespace; the recipe itself owns one more for global keys.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

/// Read-only, deterministically ordered view of extracted values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatNamespace {
    values: BTreeMap<String, String>,
}

impl FlatNamespace {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys under `prefix`, for assertions and prefix scans.
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(move |k| k.starts_with(prefix))
    }
}

/// Accumulates one namespace for one scope (a profile or the recipe globals).
///
/// A second write to the same key is logged at warn level, then overwrites.
#[derive(Debug)]
pub struct NamespaceBuilder {
    scope: String,
    namespace: FlatNamespace,
}

impl NamespaceBuilder {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            namespace: FlatNamespace::default(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(previous) = self.namespace.values.get(&key) {
            if *previous != value {
                warn!(
                    scope = %self.scope,
                    key = %key,
                    previous = %previous,
                    new = %value,
                    "namespace key collision, keeping the newer value"
                );
            }
        }
        self.namespace.values.insert(key, value);
    }

    pub fn namespace(&self) -> &FlatNamespace {
        &self.namespace
    }

    pub fn finish(self) -> FlatNamespace {
        self.namespace
    }
}
