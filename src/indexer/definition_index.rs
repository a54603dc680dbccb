use std::collections::{HashMap, HashSet};

use crate::models::Identifier;

/// Names recorded for one type key, in first-seen order
#[derive(Debug, Clone, Default)]
struct DefinitionBucket {
    def_type: String,
    names: Vec<String>,
    seen: HashSet<String>,
}

/// In-memory mapping from type key to an ordered, deduplicated list of names
///
/// Type keys are lowercased on insert and keep the order in which they were first seen.
/// Within a type, a name is stored once; later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct DefinitionIndex {
    buckets: Vec<DefinitionBucket>,
    positions: HashMap<String, usize>,
}

impl DefinitionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an index from `(type key, names)` pairs, such as a cache snapshot
    pub fn from_pairs<I, N>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, N)>,
        N: IntoIterator<Item = String>,
    {
        let mut index = Self::new();
        index.merge_pairs(pairs);
        index
    }

    /// Insert a name under a type key. Returns `false` if it was already present.
    pub fn insert(&mut self, def_type: &str, name: &str) -> bool {
        let key = def_type.to_lowercase();
        let position = match self.positions.get(&key) {
            Some(&position) => position,
            None => {
                self.buckets.push(DefinitionBucket { def_type: key.clone(), ..Default::default() });
                self.positions.insert(key, self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };

        let bucket = &mut self.buckets[position];
        if bucket.seen.contains(name) {
            return false;
        }
        bucket.seen.insert(name.to_string());
        bucket.names.push(name.to_string());
        true
    }

    /// Merge extracted identifiers, returning how many were new
    pub fn extend<'a, I>(&mut self, identifiers: I) -> usize
    where
        I: IntoIterator<Item = &'a Identifier>,
    {
        identifiers.into_iter().filter(|id| self.insert(&id.def_type, &id.name)).count()
    }

    /// Merge `(type key, names)` batches, returning how many names were new
    pub fn merge_pairs<I, N>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (String, N)>,
        N: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for (def_type, names) in pairs {
            for name in names {
                if self.insert(&def_type, &name) {
                    added += 1;
                }
            }
        }
        added
    }

    /// Names for a type key (case-insensitive); empty if the type is unknown
    pub fn names(&self, def_type: &str) -> &[String] {
        self.positions
            .get(&def_type.to_lowercase())
            .map(|&position| self.buckets[position].names.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_type(&self, def_type: &str) -> bool {
        self.positions.contains_key(&def_type.to_lowercase())
    }

    /// Iterate `(type key, names)` in first-seen type order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets.iter().map(|bucket| (bucket.def_type.as_str(), bucket.names.as_slice()))
    }

    /// Owned `(type key, names)` pairs, as persisted in the cache file
    pub fn to_pairs(&self) -> Vec<(String, Vec<String>)> {
        self.buckets.iter().map(|bucket| (bucket.def_type.clone(), bucket.names.clone())).collect()
    }

    /// Number of type keys
    pub fn type_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of names across all types
    pub fn definition_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.names.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.positions.clear();
    }
}

impl PartialEq for DefinitionIndex {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for DefinitionIndex {}
