// Analysis results
//
// A `SingleAnalysis` is one accepted decomposition: the dictionary item and
// the ordered morphemes with the surfaces they took, root first. Morphemes
// are split into inflectional groups at every derivational morpheme.
// `WordAnalysis` bundles all analyses of one input word.

use std::sync::Arc;

use serde::Serialize;
use turkmorph_core::{DictionaryItem, PrimaryPos, RootAttribute};

use crate::format::AnalysisFormat;
use crate::graph::Morpheme;
use crate::path::SearchPath;

/// A morpheme together with the surface it produced (empty for epsilon).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MorphemeData {
    pub morpheme: Arc<Morpheme>,
    pub surface: String,
}

impl MorphemeData {
    /// `lar:A3pl`, or just `A3sg` when the surface is empty.
    pub fn to_morpheme_string(&self) -> String {
        if self.surface.is_empty() {
            self.morpheme.id.clone()
        } else {
            format!("{}:{}", self.surface, self.morpheme.id)
        }
    }
}

/// A run of morphemes between two derivations.
#[derive(Debug, Clone, Copy)]
pub struct MorphemeGroup<'a> {
    morphemes: &'a [MorphemeData],
}

impl<'a> MorphemeGroup<'a> {
    #[inline]
    pub fn morphemes(&self) -> &'a [MorphemeData] {
        self.morphemes
    }

    pub fn surface_form(&self) -> String {
        self.morphemes.iter().map(|m| m.surface.as_str()).collect()
    }

    /// First POS carried by a morpheme of the group.
    pub fn pos(&self) -> Option<PrimaryPos> {
        self.morphemes
            .iter()
            .filter_map(|m| m.morpheme.pos)
            .find(|p| *p != PrimaryPos::Unknown)
    }

    pub fn lexical_form(&self) -> String {
        self.morphemes
            .iter()
            .map(|m| m.morpheme.id.as_str())
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// One morphological analysis of a word.
#[derive(Debug, Clone)]
pub struct SingleAnalysis {
    item: Arc<DictionaryItem>,
    morphemes: Vec<MorphemeData>,
    /// Start index of each group in `morphemes`; the first is always 0.
    group_boundaries: Vec<usize>,
}

impl SingleAnalysis {
    pub fn new(item: Arc<DictionaryItem>, morphemes: Vec<MorphemeData>) -> Self {
        let mut group_boundaries = vec![0];
        group_boundaries.extend(
            morphemes
                .iter()
                .enumerate()
                .filter(|(i, m)| *i > 0 && m.morpheme.derivational)
                .map(|(i, _)| i),
        );
        Self {
            item,
            morphemes,
            group_boundaries,
        }
    }

    /// Build the analysis for an accepted path. Hidden morphemes are left out.
    pub fn from_path(path: &SearchPath<'_>) -> Self {
        let graph = path.graph;
        let morphemes = path
            .history()
            .into_iter()
            .filter_map(|step| {
                let morpheme = graph.state_morpheme(step.state);
                (!morpheme.hidden).then(|| MorphemeData {
                    morpheme: Arc::clone(morpheme),
                    surface: step.surface.to_string(),
                })
            })
            .collect();
        Self::new(Arc::clone(&path.stem().item), morphemes)
    }

    /// Placeholder analysis for a word nothing matched.
    pub fn unknown(input: &str) -> Self {
        Self::new(
            Arc::new(DictionaryItem::unknown()),
            vec![MorphemeData {
                morpheme: Arc::new(Morpheme::unknown()),
                surface: input.to_string(),
            }],
        )
    }

    /// The same analysis reported against `item`, with the root spelled
    /// `stem`.
    pub fn copy_for(&self, item: Arc<DictionaryItem>, stem: &str) -> Self {
        let mut morphemes = self.morphemes.clone();
        if let Some(root) = morphemes.first_mut() {
            root.surface = stem.to_string();
        }
        Self {
            item,
            morphemes,
            group_boundaries: self.group_boundaries.clone(),
        }
    }

    #[inline]
    pub fn item(&self) -> &Arc<DictionaryItem> {
        &self.item
    }

    #[inline]
    pub fn morphemes(&self) -> &[MorphemeData] {
        &self.morphemes
    }

    pub fn is_unknown(&self) -> bool {
        self.item.is_unknown()
    }

    pub fn is_runtime(&self) -> bool {
        self.item.has_attribute(RootAttribute::Runtime)
    }

    /// Surface of the root.
    pub fn stem(&self) -> &str {
        self.morphemes.first().map_or("", |m| m.surface.as_str())
    }

    /// Surfaces of all suffixes.
    pub fn ending(&self) -> String {
        self.morphemes
            .iter()
            .skip(1)
            .map(|m| m.surface.as_str())
            .collect()
    }

    pub fn surface_form(&self) -> String {
        let mut s = self.stem().to_string();
        s.push_str(&self.ending());
        s
    }

    pub fn group_count(&self) -> usize {
        self.group_boundaries.len()
    }

    pub fn group(&self, i: usize) -> MorphemeGroup<'_> {
        let start = self.group_boundaries[i];
        let end = self
            .group_boundaries
            .get(i + 1)
            .copied()
            .unwrap_or(self.morphemes.len());
        MorphemeGroup {
            morphemes: &self.morphemes[start..end],
        }
    }

    pub fn groups(&self) -> Vec<MorphemeGroup<'_>> {
        (0..self.group_count()).map(|i| self.group(i)).collect()
    }

    /// POS of the last group.
    pub fn pos(&self) -> Option<PrimaryPos> {
        self.group(self.group_count() - 1).pos()
    }

    pub fn contains_morpheme(&self, id: &str) -> bool {
        self.morphemes.iter().any(|m| m.morpheme.id == id)
    }

    /// The root surface followed by the surface up to each derivation:
    /// `kitaplık` → `[kitap, kitaplık]`.
    pub fn stems(&self) -> Vec<String> {
        let mut stems = vec![self.stem().to_string()];
        let mut previous = self.group(0).surface_form();
        for i in 1..self.group_count() {
            let group = self.group(i);
            let stem = format!("{previous}{}", group.morphemes()[0].surface);
            if !stems.contains(&stem) {
                stems.push(stem);
            }
            previous.push_str(&group.surface_form());
        }
        stems
    }

    /// Like [`stems`](Self::stems) but starting from the dictionary root, with
    /// a final `ğ` restored to `k` (`kitabı` → `kitap`, `yapacağı` → `yapacak`).
    pub fn lemmas(&self) -> Vec<String> {
        let root = self.item.root.clone();
        let mut lemmas = vec![root.clone()];
        let mut previous = self.group(0).surface_form();
        if previous != root {
            restore_k(&mut previous);
        }
        for i in 1..self.group_count() {
            let group = self.group(i);
            let mut stem = format!("{previous}{}", group.morphemes()[0].surface);
            restore_k(&mut stem);
            if !lemmas.contains(&stem) {
                lemmas.push(stem);
            }
            previous.push_str(&group.surface_form());
        }
        lemmas
    }

    pub fn format(&self, format: AnalysisFormat) -> String {
        format.format(self)
    }

    /// `Noun + A3sg + Dat`
    pub fn format_lexical(&self) -> String {
        AnalysisFormat::LexicalSequence.format(self)
    }

    /// `kitab:Noun + a:Dat`
    pub fn format_surface(&self) -> String {
        AnalysisFormat::SurfaceAndLexicalSequence.format(self)
    }

    pub fn view(&self) -> AnalysisView {
        AnalysisView {
            item_id: self.item.id.clone(),
            lemma: self.item.lemma.clone(),
            primary_pos: self.item.primary_pos.short_form(),
            secondary_pos: (!self.item.secondary_pos.is_unspecified())
                .then(|| self.item.secondary_pos.short_form()),
            pos: self.pos().map(|p| p.short_form()),
            stems: self.stems(),
            lemmas: self.lemmas(),
            morphemes: self
                .morphemes
                .iter()
                .map(|m| MorphemeView {
                    id: m.morpheme.id.clone(),
                    surface: m.surface.clone(),
                })
                .collect(),
            formatted: AnalysisFormat::Default.format(self),
        }
    }
}

fn restore_k(s: &mut String) {
    if s.ends_with('ğ') {
        s.pop();
        s.push('k');
    }
}

impl PartialEq for SingleAnalysis {
    fn eq(&self, other: &Self) -> bool {
        self.item.id == other.item.id && self.morphemes == other.morphemes
    }
}

impl Eq for SingleAnalysis {}

impl std::hash::Hash for SingleAnalysis {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.item.id.hash(state);
        self.morphemes.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Word analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisKind {
    /// The input had no letters to analyze.
    EmptyInput,
    /// Zero or more analyses.
    Analyses(Vec<SingleAnalysis>),
}

/// All analyses of one input word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAnalysis {
    pub input: String,
    /// Input after Turkish lowercasing and apostrophe removal.
    pub normalized: String,
    pub kind: AnalysisKind,
}

impl WordAnalysis {
    pub fn empty_input(input: &str) -> Self {
        Self {
            input: input.to_string(),
            normalized: String::new(),
            kind: AnalysisKind::EmptyInput,
        }
    }

    #[inline]
    pub fn is_empty_input(&self) -> bool {
        matches!(self.kind, AnalysisKind::EmptyInput)
    }

    pub fn analyses(&self) -> &[SingleAnalysis] {
        match &self.kind {
            AnalysisKind::EmptyInput => &[],
            AnalysisKind::Analyses(a) => a,
        }
    }

    /// True if at least one analysis was found.
    pub fn is_correct(&self) -> bool {
        !self.analyses().is_empty()
    }

    pub fn len(&self) -> usize {
        self.analyses().len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses().is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SingleAnalysis> {
        self.analyses().iter()
    }
}

impl<'a> IntoIterator for &'a WordAnalysis {
    type Item = &'a SingleAnalysis;
    type IntoIter = std::slice::Iter<'a, SingleAnalysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Serializable view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphemeView {
    pub id: String,
    pub surface: String,
}

/// Flat, serializable summary of a [`SingleAnalysis`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisView {
    pub item_id: String,
    pub lemma: String,
    pub primary_pos: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_pos: Option<&'static str>,
    pub pos: Option<&'static str>,
    pub stems: Vec<String>,
    pub lemmas: Vec<String>,
    pub morphemes: Vec<MorphemeView>,
    pub formatted: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use turkmorph_core::SecondaryPos;

    pub(crate) fn m(id: &str, derivational: bool, pos: Option<PrimaryPos>) -> Arc<Morpheme> {
        Arc::new(Morpheme {
            id: id.to_string(),
            name: id.to_string(),
            pos,
            derivational,
            hidden: false,
        })
    }

    pub(crate) fn data(morpheme: &Arc<Morpheme>, surface: &str) -> MorphemeData {
        MorphemeData {
            morpheme: Arc::clone(morpheme),
            surface: surface.to_string(),
        }
    }

    /// kitaplığa: kitap+Noun+A3sg | lığ:Ness → Noun+A3sg+a:Dat
    pub(crate) fn kitapligi() -> SingleAnalysis {
        let item = Arc::new(DictionaryItem::new(
            "kitap",
            "kitap",
            "kitap",
            PrimaryPos::Noun,
            SecondaryPos::None,
            vec![RootAttribute::Voicing],
        ));
        let noun = m("Noun", false, Some(PrimaryPos::Noun));
        let a3sg = m("A3sg", false, None);
        let ness = m("Ness", true, None);
        let dat = m("Dat", false, None);
        SingleAnalysis::new(
            item,
            vec![
                data(&noun, "kitap"),
                data(&a3sg, ""),
                data(&ness, "lığ"),
                data(&noun, ""),
                data(&a3sg, ""),
                data(&dat, "a"),
            ],
        )
    }

    #[test]
    fn surfaces() {
        let a = kitapligi();
        assert_eq!(a.stem(), "kitap");
        assert_eq!(a.ending(), "lığa");
        assert_eq!(a.surface_form(), "kitaplığa");
    }

    #[test]
    fn groups_split_at_derivations() {
        let a = kitapligi();
        assert_eq!(a.group_count(), 2);
        assert_eq!(a.group(0).lexical_form(), "Noun+A3sg");
        assert_eq!(a.group(1).lexical_form(), "Ness+Noun+A3sg+Dat");
        assert_eq!(a.group(1).surface_form(), "lığa");
        assert_eq!(a.pos(), Some(PrimaryPos::Noun));
    }

    #[test]
    fn stems_and_lemmas() {
        let a = kitapligi();
        assert_eq!(a.stems(), vec!["kitap", "kitaplığ"]);
        assert_eq!(a.lemmas(), vec!["kitap", "kitaplık"]);
    }

    #[test]
    fn morpheme_strings() {
        let a = kitapligi();
        assert_eq!(a.morphemes()[5].to_morpheme_string(), "a:Dat");
        assert_eq!(a.morphemes()[1].to_morpheme_string(), "A3sg");
        assert!(a.contains_morpheme("Ness"));
        assert!(!a.contains_morpheme("Loc"));
    }

    #[test]
    fn unknown_analysis() {
        let a = SingleAnalysis::unknown("qxz");
        assert!(a.is_unknown());
        assert_eq!(a.surface_form(), "qxz");
        assert_eq!(a.pos(), None);
    }

    #[test]
    fn equality_ignores_item_identity() {
        assert_eq!(kitapligi(), kitapligi());
    }

    #[test]
    fn word_analysis_empty_input_is_distinct() {
        let empty = WordAnalysis::empty_input("");
        let none = WordAnalysis {
            input: "qxz".into(),
            normalized: "qxz".into(),
            kind: AnalysisKind::Analyses(vec![]),
        };
        assert!(empty.is_empty_input());
        assert!(!none.is_empty_input());
        assert!(empty.is_empty() && none.is_empty());
        assert_ne!(empty.kind, none.kind);
    }
}
