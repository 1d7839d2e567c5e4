// Search paths
//
// Paths are stored in an arena as parent-linked nodes: extending a path
// pushes one node holding only the new transition, the consumed surface and
// the updated attributes. The full morpheme history is walked through the
// parent links when a condition needs it or a result is finalized.

use std::fmt;
use std::sync::Arc;

use turkmorph_core::{DictionaryItem, PhoneticAttributes};

use crate::graph::{Graph, StateId, SuffixTransition};
use crate::stem::StemTransition;

/// Index of a node in a [`PathArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One step of a path: the stem for a root node, a suffix otherwise.
#[derive(Debug, Clone)]
pub struct PathNode {
    pub parent: Option<NodeId>,
    /// Index of the stem candidate this path started from.
    pub stem: usize,
    /// State reached by this step.
    pub state: StateId,
    pub surface: Arc<str>,
    /// Byte offset of the unconsumed input after this step.
    pub tail_start: usize,
    pub attributes: PhoneticAttributes,
    pub terminal: bool,
    pub contains_derivation: bool,
    pub contains_suffix_with_surface: bool,
}

/// Append-only storage for the nodes of one analysis.
#[derive(Debug, Default)]
pub struct PathArena {
    nodes: Vec<PathNode>,
}

impl PathArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: PathNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Start a path from a stem candidate.
    pub fn root(&mut self, graph: &Graph, stem_index: usize, stem: &StemTransition, tail_start: usize) -> NodeId {
        self.push(PathNode {
            parent: None,
            stem: stem_index,
            state: stem.state,
            surface: Arc::clone(&stem.surface),
            tail_start,
            attributes: stem.attributes,
            terminal: graph.state(stem.state).terminal,
            contains_derivation: false,
            contains_suffix_with_surface: false,
        })
    }

    /// Extend `parent` through `transition`, consuming `consumed` bytes of
    /// input for `surface`.
    pub fn extend(
        &mut self,
        graph: &Graph,
        parent: NodeId,
        transition: &SuffixTransition,
        surface: Arc<str>,
        consumed: usize,
        attributes: PhoneticAttributes,
    ) -> NodeId {
        let p = self.node(parent);
        let target = graph.state(transition.to);
        let node = PathNode {
            parent: Some(parent),
            stem: p.stem,
            state: transition.to,
            tail_start: p.tail_start + consumed,
            attributes,
            terminal: target.terminal,
            contains_derivation: p.contains_derivation || target.derivative,
            contains_suffix_with_surface: p.contains_suffix_with_surface || !surface.is_empty(),
            surface,
        };
        self.push(node)
    }

    /// Iterate from `id` back to its root node.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: Some(id),
        }
    }
}

pub struct Ancestors<'a> {
    arena: &'a PathArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a PathNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.arena.node(id);
        self.next = node.parent;
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Path view
// ---------------------------------------------------------------------------

/// Read-only view of one path, as seen by conditions and formatters.
#[derive(Clone, Copy)]
pub struct SearchPath<'a> {
    pub graph: &'a Graph,
    pub arena: &'a PathArena,
    pub stems: &'a [StemTransition],
    pub input: &'a str,
    pub id: NodeId,
}

impl<'a> SearchPath<'a> {
    #[inline]
    pub fn node(&self) -> &'a PathNode {
        self.arena.node(self.id)
    }

    #[inline]
    pub fn stem(&self) -> &'a StemTransition {
        &self.stems[self.node().stem]
    }

    #[inline]
    pub fn item(&self) -> &'a DictionaryItem {
        &self.stem().item
    }

    #[inline]
    pub fn attributes(&self) -> PhoneticAttributes {
        self.node().attributes
    }

    #[inline]
    pub fn head(&self) -> &'a str {
        &self.input[..self.node().tail_start]
    }

    #[inline]
    pub fn tail(&self) -> &'a str {
        &self.input[self.node().tail_start..]
    }

    #[inline]
    pub fn current_state(&self) -> StateId {
        self.node().state
    }

    /// State reached by the step before the current one.
    pub fn previous_state(&self) -> Option<StateId> {
        self.node().parent.map(|p| self.arena.node(p).state)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.node().terminal
    }

    #[inline]
    pub fn contains_derivation(&self) -> bool {
        self.node().contains_derivation
    }

    #[inline]
    pub fn contains_suffix_with_surface(&self) -> bool {
        self.node().contains_suffix_with_surface
    }

    /// Steps from the current one back to the stem.
    pub fn steps_rev(&self) -> Ancestors<'a> {
        self.arena.ancestors(self.id)
    }

    /// Suffix steps from the current one back, excluding the stem.
    pub fn suffixes_rev(&self) -> impl Iterator<Item = &'a PathNode> {
        self.steps_rev().filter(|n| n.parent.is_some())
    }

    /// All steps, stem first.
    pub fn history(&self) -> Vec<&'a PathNode> {
        let mut steps: Vec<_> = self.steps_rev().collect();
        steps.reverse();
        steps
    }

    /// Same path, another node.
    #[inline]
    pub fn at(&self, id: NodeId) -> SearchPath<'a> {
        SearchPath { id, ..*self }
    }
}

impl fmt::Display for SearchPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[({})({}-{}) ", self.item().id, self.head(), self.tail())?;
        for (i, step) in self.history().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            if !step.surface.is_empty() {
                write!(f, "{}:", step.surface)?;
            }
            f.write_str(&self.graph.state(step.state).id)?;
        }
        f.write_str("]")
    }
}
