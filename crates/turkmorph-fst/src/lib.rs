//! Morpheme graph engine for rule-based morphological analysis.
//!
//! This crate holds the language-neutral machinery: suffix templates and
//! their surface realization, the morpheme state graph with conditional
//! transitions, stem transitions and their index, and the breadth-first
//! search that turns an input word into analyses.
//!
//! # Architecture
//!
//! - [`template`] -- Suffix template tokenizer (`+yA`, `lAr`, `>dI`, `~k`, `!`)
//! - [`surface`] -- Surface generation under vowel harmony and voicing, with memo
//! - [`condition`] -- Composable transition conditions
//! - [`graph`] -- Morphemes, states, suffix transitions and the graph builder
//! - [`stem`] -- Stem transitions and the `StemGenerator` trait
//! - [`index`] -- Concurrent stem index keyed by spelling
//! - [`path`] -- Parent-linked search path arena
//! - [`search`] -- Breadth-first analyzer
//! - [`analysis`] -- Analysis results and serializable views
//! - [`format`] -- Text formatters for analyses
//! - [`debug`] -- Search trace hooks and the recorded debug data

pub mod analysis;
pub mod condition;
pub mod debug;
pub mod format;
pub mod graph;
pub mod index;
pub mod path;
pub mod search;
pub mod stem;
pub mod surface;
pub mod template;

use turkmorph_core::{DictionaryItem, PhoneticAttributes};

pub use analysis::{AnalysisKind, AnalysisView, MorphemeData, SingleAnalysis, WordAnalysis};
pub use condition::Condition;
pub use debug::AnalysisDebugData;
pub use format::AnalysisFormat;
pub use graph::{Graph, GraphBuilder, GraphError, Morpheme, MorphemeId, StateId};
pub use index::StemIndex;
pub use search::{RuleBasedAnalyzer, SearchOptions};
pub use stem::{StemError, StemGenerator, StemTransition};

/// A language's word formation rules, expressed as a morpheme graph.
pub trait Morphotactics: Send + Sync {
    fn graph(&self) -> &Graph;

    /// Entry state for a stem of `item` spelled with `attributes`.
    fn root_state(&self, item: &DictionaryItem, attributes: PhoneticAttributes) -> StateId;
}
