//! Alias-indexed set.
//!
//! Every entry is reachable through its primary name and each of its
//! aliases. Names are matched exactly (case-sensitive), and a name can belong
//! to at most one entry.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

/// Something with a primary name and alternative names
pub trait Alias {
    /// Primary name
    fn name(&self) -> &str;

    /// Alternative names
    fn aliases(&self) -> &[String];

    /// Primary name followed by the aliases
    fn all_names(&self) -> Vec<&str> {
        std::iter::once(self.name())
            .chain(self.aliases().iter().map(String::as_str))
            .collect()
    }
}

/// A name is already taken by another entry
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{name}' is already registered by '{existing}'")]
pub struct AliasConflict {
    /// Colliding name or alias
    pub name: String,
    /// Primary name of the entry that owns it
    pub existing: String,
}

/// Set of entries indexed by name and alias
#[derive(Debug)]
pub struct AliasSet<T> {
    /// Entries by primary name, in insertion order
    entries: IndexMap<String, Arc<T>>,
    /// Every name and alias, pointing at a primary name
    index: HashMap<String, String>,
}

impl<T> Default for AliasSet<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Alias> AliasSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` under its name and aliases.
    ///
    /// Nothing is inserted if any of them is already taken, including by an
    /// earlier name of the same entry.
    pub fn insert(&mut self, entry: Arc<T>) -> Result<(), AliasConflict> {
        let names = entry.all_names();

        for (position, name) in names.iter().enumerate() {
            if let Some(existing) = self.index.get(*name) {
                return Err(AliasConflict {
                    name: (*name).to_string(),
                    existing: existing.clone(),
                });
            }
            if names[..position].contains(name) {
                return Err(AliasConflict {
                    name: (*name).to_string(),
                    existing: entry.name().to_string(),
                });
            }
        }

        let primary = entry.name().to_string();
        for name in names {
            self.index.insert(name.to_string(), primary.clone());
        }
        self.entries.insert(primary, entry);
        Ok(())
    }

    /// Remove `entry` and every name pointing at it.
    ///
    /// Matches by identity, so a different entry registered under the same
    /// name is left alone. Returns whether anything was removed.
    pub fn remove(&mut self, entry: &Arc<T>) -> bool {
        let primary = entry.name();
        match self.entries.get(primary) {
            Some(current) if Arc::ptr_eq(current, entry) => {}
            _ => return false,
        }

        self.entries.shift_remove(primary);
        self.index.retain(|_, owner| owner.as_str() != primary);
        true
    }

    /// Entry registered under `name`, either as primary name or alias
    pub fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.index
            .get(name)
            .and_then(|primary| self.entries.get(primary))
    }

    /// Check if `name` resolves to an entry
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.values()
    }

    /// Every registered name and alias
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
