use crate::geometry::canonicalize;
use crate::model::{AtlasDocument, Page};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered frame ids; a frame's index is its position in this sequence.
///
/// The reverse lookup is built once and resolves duplicate ids to their first
/// position. Serializes as a plain list of ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FrameCatalog {
    ids: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl FrameCatalog {
    pub fn new(ids: Vec<String>) -> Self {
        let mut lookup = HashMap::with_capacity(ids.len());
        for (i, id) in ids.iter().enumerate() {
            lookup.entry(id.clone()).or_insert(i);
        }
        Self { ids, lookup }
    }

    /// First position of `id`, if present.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.lookup.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup.contains_key(id)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids that occur more than once, in order of first occurrence.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for id in &self.ids {
            *counts.entry(id.as_str()).or_insert(0) += 1;
        }
        self.ids
            .iter()
            .enumerate()
            .filter(|(i, id)| counts[id.as_str()] > 1 && self.lookup[id.as_str()] == *i)
            .map(|(_, id)| id.as_str())
            .collect()
    }
}

impl PartialEq for FrameCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl From<Vec<String>> for FrameCatalog {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

impl From<FrameCatalog> for Vec<String> {
    fn from(catalog: FrameCatalog) -> Self {
        catalog.ids
    }
}

/// Walks pages then sprites in document order, canonicalizing each sprite.
///
/// Page indices are assigned 0,1,2,... in document order. Duplicate ids are
/// kept as-is (see `FrameCatalog::duplicates`).
pub fn build_catalog(document: &AtlasDocument) -> (FrameCatalog, Vec<Page>) {
    let mut ids = Vec::new();
    let mut pages = Vec::with_capacity(document.pages.len());
    for (index, src) in document.pages.iter().enumerate() {
        let mut frames = Vec::with_capacity(src.sprites.len());
        for sprite in &src.sprites {
            ids.push(sprite.name.clone());
            frames.push(canonicalize(sprite));
        }
        pages.push(Page {
            index,
            name: src.name.clone(),
            size: src.size,
            frames,
        });
    }
    (FrameCatalog::new(ids), pages)
}
