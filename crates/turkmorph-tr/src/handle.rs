// TurkishMorphology: top-level handle for Turkish morphological analysis.
//
// Owns the morphotactics graph, the root lexicon and the stem index built
// from it, and provides word analysis with input normalization, apostrophe
// filtering and guesses for unknown tokens.
//
// Design notes:
// - A `RuleBasedAnalyzer` borrows the graph and the index, so one is created
//   per call instead of being stored next to what it borrows.
// - Runtime items (guessed proper nouns, numerals) go straight into the stem
//   index, which is internally locked, so adding and removing them only needs
//   `&self`. The lexicon itself is fixed after construction.
// - Analyses of hidden compound roots (`Dummy` items) are reported against
//   the item they refer to.
// - A word with an apostrophe is analyzed without it, keeping only noun
//   analyses whose stem is the part before the quote or that carry `P3sg`
//   (`Ankara'da`, `Hastanesi'ne`).

use std::sync::Arc;

use hashbrown::HashSet;
use log::info;
use turkmorph_core::{DictionaryItem, PrimaryPos, RootAttribute, alphabet};
use turkmorph_fst::debug::AnalysisDebugData;
use turkmorph_fst::{
    AnalysisKind, GraphError, Morphotactics, RuleBasedAnalyzer, SearchOptions, SingleAnalysis, StemError,
    StemIndex, WordAnalysis,
};

use crate::lexicon::{LexiconError, RootLexicon};
use crate::morphotactics::TurkishMorphotactics;
use crate::stems::TurkishStemGenerator;
use crate::unidentified::UnidentifiedTokenAnalyzer;

/// Error type for handle construction failures.
#[derive(Debug, thiserror::Error)]
pub enum MorphologyError {
    /// The morphotactics graph could not be built.
    #[error("failed to build morphotactics: {0}")]
    Graph(#[from] GraphError),

    /// The lexicon text could not be read.
    #[error("failed to load lexicon: {0}")]
    Lexicon(#[from] LexiconError),

    /// A numeral shape pattern did not compile.
    #[error("invalid numeral pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Analysis options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphologyOptions {
    /// Match input ignoring Turkish diacritics (`cicek` finds `çiçek`).
    pub ascii_tolerant: bool,
    /// Generation size above which cyclic search paths are pruned.
    pub prune_threshold: usize,
    /// Visits of one state after which a path counts as cyclic.
    pub max_state_repeats: usize,
    /// Guess proper nouns (`Ahmet'e`) and numerals (`3'te`) for words
    /// without an analysis.
    pub guess_unidentified: bool,
}

impl Default for MorphologyOptions {
    fn default() -> Self {
        let search = SearchOptions::default();
        Self {
            ascii_tolerant: search.ascii_tolerant,
            prune_threshold: search.prune_threshold,
            max_state_repeats: search.max_state_repeats,
            guess_unidentified: true,
        }
    }
}

impl From<MorphologyOptions> for SearchOptions {
    fn from(o: MorphologyOptions) -> Self {
        SearchOptions {
            ascii_tolerant: o.ascii_tolerant,
            prune_threshold: o.prune_threshold,
            max_state_repeats: o.max_state_repeats,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`TurkishMorphology`].
#[derive(Debug, Default)]
pub struct TurkishMorphologyBuilder {
    lexicon: Option<RootLexicon>,
    options: MorphologyOptions,
}

impl TurkishMorphologyBuilder {
    /// Use `lexicon` instead of the built-in one.
    pub fn lexicon(mut self, lexicon: RootLexicon) -> Self {
        self.lexicon = Some(lexicon);
        self
    }

    pub fn options(mut self, options: MorphologyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ascii_tolerant(mut self, on: bool) -> Self {
        self.options.ascii_tolerant = on;
        self
    }

    pub fn guess_unidentified(mut self, on: bool) -> Self {
        self.options.guess_unidentified = on;
        self
    }

    pub fn build(self) -> Result<TurkishMorphology, MorphologyError> {
        let lexicon = match self.lexicon {
            Some(lexicon) => lexicon,
            None => RootLexicon::default_lexicon()?,
        };
        let morphotactics = Arc::new(TurkishMorphotactics::new()?);
        let index = StemIndex::new(TurkishStemGenerator::new(Arc::clone(&morphotactics)));
        let indexed = index.add_all(lexicon.iter().cloned());
        info!(
            "TurkishMorphology ready: {indexed} of {} lexicon items indexed, {} stem transitions",
            lexicon.len(),
            index.len()
        );
        Ok(TurkishMorphology {
            morphotactics,
            lexicon,
            index,
            unidentified: UnidentifiedTokenAnalyzer::new()?,
            options: self.options,
        })
    }
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// Turkish morphological analyzer with its lexicon.
pub struct TurkishMorphology {
    morphotactics: Arc<TurkishMorphotactics>,

    /// Items loaded at construction. Used to resolve item references.
    lexicon: RootLexicon,

    /// Stem transitions of the lexicon plus any runtime items.
    index: StemIndex<TurkishStemGenerator>,

    unidentified: UnidentifiedTokenAnalyzer,

    options: MorphologyOptions,
}

impl TurkishMorphology {
    pub fn builder() -> TurkishMorphologyBuilder {
        TurkishMorphologyBuilder::default()
    }

    /// Handle over the built-in lexicon with default options.
    pub fn with_default_lexicon() -> Result<Self, MorphologyError> {
        Self::builder().build()
    }

    #[inline]
    pub fn lexicon(&self) -> &RootLexicon {
        &self.lexicon
    }

    #[inline]
    pub fn morphotactics(&self) -> &TurkishMorphotactics {
        &self.morphotactics
    }

    #[inline]
    pub fn index(&self) -> &StemIndex<TurkishStemGenerator> {
        &self.index
    }

    #[inline]
    pub fn options(&self) -> MorphologyOptions {
        self.options
    }

    pub fn set_ascii_tolerant(&mut self, on: bool) {
        self.options.ascii_tolerant = on;
    }

    pub fn set_guess_unidentified(&mut self, on: bool) {
        self.options.guess_unidentified = on;
    }

    fn analyzer(&self) -> RuleBasedAnalyzer<'_, TurkishStemGenerator> {
        RuleBasedAnalyzer::new(self.morphotactics.graph(), &self.index, self.options.into())
    }

    /// Bare graph search over normalized `input`, without apostrophe
    /// filtering, guesses or reference resolution.
    pub(crate) fn search(&self, input: &str) -> Vec<SingleAnalysis> {
        self.analyzer().analyze(input)
    }

    /// All analyses of `word`.
    pub fn analyze(&self, word: &str) -> WordAnalysis {
        let normalized = normalize(word);
        if normalized.is_empty() {
            return WordAnalysis::empty_input(word);
        }
        let analyses = self.search(&without_apostrophes(&normalized));
        self.word_analysis(word, normalized, analyses)
    }

    /// Like [`analyze`](Self::analyze), also returning the search trace of
    /// the regular analysis.
    pub fn analyze_with_debug(&self, word: &str) -> (WordAnalysis, AnalysisDebugData) {
        let normalized = normalize(word);
        if normalized.is_empty() {
            return (WordAnalysis::empty_input(word), AnalysisDebugData::new(word));
        }
        let (analyses, debug) = self
            .analyzer()
            .analyze_with_debug(&without_apostrophes(&normalized));
        (self.word_analysis(word, normalized, analyses), debug)
    }

    fn word_analysis(&self, word: &str, normalized: String, mut analyses: Vec<SingleAnalysis>) -> WordAnalysis {
        if normalized.contains('\'') {
            analyses = self.filter_apostrophe(&normalized, analyses);
        }
        if analyses.is_empty() && self.options.guess_unidentified {
            analyses = self.unidentified.analyze(self, word);
        }
        let mut seen = HashSet::new();
        let analyses = analyses
            .into_iter()
            .map(|a| self.resolve_reference(a))
            .filter(|a| seen.insert(a.clone()))
            .collect();
        WordAnalysis {
            input: word.to_string(),
            normalized,
            kind: AnalysisKind::Analyses(analyses),
        }
    }

    /// Analyses of `normalized` with its quote removed that agree with where
    /// the quote was.
    fn filter_apostrophe(&self, normalized: &str, analyses: Vec<SingleAnalysis>) -> Vec<SingleAnalysis> {
        let Some((stem, ending)) = normalized.split_once('\'') else {
            return analyses;
        };
        if stem.is_empty() || ending.is_empty() {
            return Vec::new();
        }
        let same_stem = |a: &SingleAnalysis| {
            if self.options.ascii_tolerant {
                alphabet::equals_ignore_diacritics(a.stem(), stem)
            } else {
                a.stem() == stem
            }
        };
        analyses
            .into_iter()
            .filter(|a| a.item().primary_pos == PrimaryPos::Noun && (a.contains_morpheme("P3sg") || same_stem(a)))
            .collect()
    }

    fn resolve_reference(&self, analysis: SingleAnalysis) -> SingleAnalysis {
        let item = analysis.item();
        if !item.has_attribute(RootAttribute::Dummy) {
            return analysis;
        }
        match item.reference_id.as_deref().and_then(|id| self.lexicon.get(id)) {
            Some(reference) => SingleAnalysis::new(Arc::clone(reference), analysis.morphemes().to_vec()),
            None => analysis,
        }
    }

    /// Make `item` available to analysis until it is removed. Returns the
    /// number of stem transitions added.
    pub fn add_dictionary_item(&self, item: DictionaryItem) -> Result<usize, StemError> {
        self.index.add(Arc::new(item))
    }

    /// Returns whether the item was indexed.
    pub fn remove_dictionary_item(&self, item: &DictionaryItem) -> bool {
        self.index.remove(item)
    }
}

/// Turkish lowercase without circumflexes or dots, with apostrophe
/// lookalikes read as `'`. Dots are kept when nothing else is left (`.`).
/// Whitespace-only input normalizes to the empty string.
pub fn normalize(word: &str) -> String {
    let lower = alphabet::normalize_circumflex(&alphabet::to_lowercase(word.trim()));
    let no_dot: String = lower.chars().filter(|c| *c != '.').collect();
    let s = if no_dot.is_empty() { lower } else { no_dot };
    alphabet::normalize_apostrophes(&s)
}

fn without_apostrophes(s: &str) -> String {
    s.chars().filter(|c| *c != '\'').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        assert_eq!(normalize("Ankara'da"), "ankara'da");
        assert_eq!(normalize("Ankara’da"), "ankara'da");
        assert_eq!(normalize("İSTANBUL"), "istanbul");
        assert_eq!(normalize("ev."), "ev");
        assert_eq!(normalize("A.B.D."), "abd");
        assert_eq!(normalize("."), ".");
        assert_eq!(normalize("..."), "...");
        assert_eq!(normalize("ILIK"), "ılık");
        assert_eq!(normalize("kâğıt"), "kağıt");
        assert_eq!(normalize("  \t "), "");
    }

    #[test]
    fn options_map_to_search_options() {
        let o = MorphologyOptions {
            ascii_tolerant: true,
            ..MorphologyOptions::default()
        };
        let s: SearchOptions = o.into();
        assert!(s.ascii_tolerant);
        assert!(MorphologyOptions::default().guess_unidentified);
        assert_eq!(s.prune_threshold, 30);
        assert_eq!(s.max_state_repeats, 3);
    }

    #[test]
    fn lexicon_error_converts() {
        let err: MorphologyError = RootLexicon::parse("ev [A:Frobnicate]").unwrap_err().into();
        assert!(matches!(err, MorphologyError::Lexicon(_)));
        assert!(err.to_string().starts_with("failed to load lexicon: lexicon line 1"));
    }

    #[test]
    fn builder_options() {
        let mut m = TurkishMorphology::builder()
            .ascii_tolerant(true)
            .guess_unidentified(false)
            .build()
            .unwrap();
        assert!(m.options().ascii_tolerant);
        assert!(!m.options().guess_unidentified);
        m.set_ascii_tolerant(false);
        m.set_guess_unidentified(true);
        assert!(!m.options().ascii_tolerant);
        assert!(m.options().guess_unidentified);
        assert!(!m.lexicon().is_empty());
        assert!(m.index().len() >= m.lexicon().len());
    }
}
