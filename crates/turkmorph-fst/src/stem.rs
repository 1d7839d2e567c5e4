// Stem transitions
//
// Entry points into the morpheme graph. A dictionary item yields one stem
// transition per spelling it can take at the start of a word (`kitap` and
// `kitab`), each bound to a root state and carrying its phonetic attributes.

use std::fmt;
use std::sync::Arc;

use turkmorph_core::{DictionaryItem, PhoneticAttributes};

use crate::graph::{Graph, StateId};

/// Error for dictionary items that cannot be turned into stem transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StemError {
    #[error("voicing is not applicable to the last letter of `{root}` ({item})")]
    Voicing { item: String, root: String },
    #[error("root of {item} is empty")]
    EmptyRoot { item: String },
    #[error("special root {item} needs state `{state}` which the graph does not have")]
    MissingState { item: String, state: String },
}

/// A root spelling bound to its entry state.
#[derive(Debug, Clone)]
pub struct StemTransition {
    pub surface: Arc<str>,
    pub item: Arc<DictionaryItem>,
    pub attributes: PhoneticAttributes,
    pub state: StateId,
}

impl StemTransition {
    pub fn new(
        surface: impl Into<Arc<str>>,
        item: Arc<DictionaryItem>,
        attributes: PhoneticAttributes,
        state: StateId,
    ) -> Self {
        Self {
            surface: surface.into(),
            item,
            attributes,
            state,
        }
    }

    /// `[(kitap_Noun) kitab → noun_S [LLC, LVB, ...]]`
    pub fn debug_form(&self, graph: &Graph) -> String {
        format!(
            "[({}) {} → {} {}]",
            self.item.id,
            self.surface,
            graph.state(self.state).id,
            self.attributes
        )
    }
}

impl PartialEq for StemTransition {
    fn eq(&self, other: &Self) -> bool {
        self.surface == other.surface
            && self.item.id == other.item.id
            && self.attributes == other.attributes
            && self.state == other.state
    }
}

impl Eq for StemTransition {}

impl fmt::Display for StemTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.surface, self.item.id)
    }
}

/// Converts dictionary items into stem transitions.
pub trait StemGenerator: Send + Sync {
    /// Produce every stem transition for `item`. Never empty on success.
    fn generate(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>, StemError>;
}
