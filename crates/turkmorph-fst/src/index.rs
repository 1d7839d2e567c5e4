// Stem transition index
//
// Maps root spellings to the stem transitions that start with them. The
// index is shared between concurrent analyses and mutated when runtime
// items are added or removed, so all tables sit behind one read/write lock:
// lookups take the read side, add/remove (including stem generation) the
// write side.

use std::sync::Arc;

use hashbrown::HashMap;
use log::{info, warn};
use parking_lot::RwLock;
use smallvec::SmallVec;
use turkmorph_core::{DictionaryItem, alphabet};

use crate::stem::{StemError, StemGenerator, StemTransition};

type Bucket = SmallVec<[StemTransition; 2]>;

#[derive(Default)]
struct Tables {
    by_surface: HashMap<String, Bucket>,
    /// Keys folded to ASCII for diacritic-tolerant lookup.
    by_ascii: HashMap<String, Bucket>,
    by_item: HashMap<String, Vec<StemTransition>>,
}

impl Tables {
    fn insert(&mut self, transitions: &[StemTransition]) {
        for t in transitions {
            self.by_surface
                .entry(t.surface.to_string())
                .or_default()
                .push(t.clone());
            self.by_ascii
                .entry(alphabet::to_ascii(&t.surface))
                .or_default()
                .push(t.clone());
        }
    }

    fn remove(&mut self, transitions: &[StemTransition]) {
        for t in transitions {
            remove_from(&mut self.by_surface, &t.surface, t);
            remove_from(&mut self.by_ascii, &alphabet::to_ascii(&t.surface), t);
        }
    }
}

fn remove_from(map: &mut HashMap<String, Bucket>, key: &str, t: &StemTransition) {
    if let Some(bucket) = map.get_mut(key) {
        bucket.retain(|x| x != t);
        if bucket.is_empty() {
            map.remove(key);
        }
    }
}

/// Concurrent registry of stem transitions keyed by spelling.
pub struct StemIndex<G> {
    generator: G,
    tables: RwLock<Tables>,
}

impl<G: StemGenerator> StemIndex<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            tables: RwLock::new(Tables::default()),
        }
    }

    #[inline]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Index the stem transitions of `item`. Adding an item that is already
    /// indexed is a no-op. Returns the number of transitions added.
    pub fn add(&self, item: Arc<DictionaryItem>) -> Result<usize, StemError> {
        let mut tables = self.tables.write();
        if tables.by_item.contains_key(&item.id) {
            return Ok(0);
        }
        let transitions = self.generator.generate(&item)?;
        tables.insert(&transitions);
        let n = transitions.len();
        tables.by_item.insert(item.id.clone(), transitions);
        Ok(n)
    }

    /// Index many items. Items that fail generation are logged and skipped.
    pub fn add_all<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = Arc<DictionaryItem>>,
    {
        let mut indexed = 0;
        let mut skipped = 0;
        for item in items {
            let id = item.id.clone();
            match self.add(item) {
                Ok(_) => indexed += 1,
                Err(e) => {
                    warn!("Cannot generate stem transition for {id}: {e}");
                    skipped += 1;
                }
            }
        }
        info!("stem index: {indexed} items indexed, {skipped} skipped");
        indexed
    }

    /// Remove every stem transition of `item`. Returns whether it was present.
    pub fn remove(&self, item: &DictionaryItem) -> bool {
        let mut tables = self.tables.write();
        match tables.by_item.remove(&item.id) {
            Some(transitions) => {
                tables.remove(&transitions);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, item: &DictionaryItem) -> bool {
        self.tables.read().by_item.contains_key(&item.id)
    }

    /// Stem transitions generated for `item`.
    pub fn transitions_of(&self, item: &DictionaryItem) -> Vec<StemTransition> {
        self.tables
            .read()
            .by_item
            .get(&item.id)
            .cloned()
            .unwrap_or_default()
    }

    /// Stem transitions whose spelling is exactly `surface`.
    pub fn lookup(&self, surface: &str) -> Vec<StemTransition> {
        self.tables
            .read()
            .by_surface
            .get(surface)
            .map(|b| b.to_vec())
            .unwrap_or_default()
    }

    /// Stem transitions whose spelling is a non-empty prefix of `input`,
    /// shortest prefix first. With `ascii_tolerant`, spellings are compared
    /// after folding both sides to ASCII.
    pub fn prefix_matches(&self, input: &str, ascii_tolerant: bool) -> Vec<StemTransition> {
        let tables = self.tables.read();
        let mut matches = Vec::new();
        if ascii_tolerant {
            let folded = alphabet::to_ascii(input);
            for end in char_ends(&folded) {
                if let Some(bucket) = tables.by_ascii.get(&folded[..end]) {
                    matches.extend(bucket.iter().cloned());
                }
            }
        } else {
            for end in char_ends(input) {
                if let Some(bucket) = tables.by_surface.get(&input[..end]) {
                    matches.extend(bucket.iter().cloned());
                }
            }
        }
        matches
    }

    /// Snapshot of all indexed transitions.
    pub fn all_transitions(&self) -> Vec<StemTransition> {
        self.tables
            .read()
            .by_item
            .values()
            .flat_map(|v| v.iter().cloned())
            .collect()
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.tables.read().by_item.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn char_ends(s: &str) -> impl Iterator<Item = usize> + '_ {
    s.char_indices().map(|(i, c)| i + c.len_utf8())
}
