// Breadth-first analysis search
//
// Every stem candidate whose spelling prefixes the input starts a path. Each
// generation expands all live paths through the outgoing transitions of
// their current state whose surface matches the remaining input and whose
// condition holds. A path that has consumed the whole input in a terminal
// state becomes a result. Paths stay alive as long as some transition can
// follow, so results can still be extended by epsilon edges.

use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, error, trace};
use turkmorph_core::alphabet;
use turkmorph_core::phonetics::{PhoneticAttribute, PhoneticAttributes, morphemic_attributes};

use crate::analysis::SingleAnalysis;
use crate::debug::{AnalysisDebugData, Rejection, SearchTrace};
use crate::graph::{Graph, StateId, SuffixTransition};
use crate::index::StemIndex;
use crate::path::{NodeId, PathArena, SearchPath};
use crate::stem::StemGenerator;
use crate::template::TokenKind;

/// Search tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Match surfaces and stems ignoring Turkish diacritics.
    pub ascii_tolerant: bool,
    /// Generation size above which cyclic paths are pruned.
    pub prune_threshold: usize,
    /// A path visiting one state more often than this is cyclic.
    pub max_state_repeats: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ascii_tolerant: false,
            prune_threshold: 30,
            max_state_repeats: 3,
        }
    }
}

/// A successful step, applied to the arena once the parent view is released.
struct Step<'g> {
    transition: &'g SuffixTransition,
    surface: Arc<str>,
    consumed: usize,
    attributes: PhoneticAttributes,
}

/// Analyzer over a morpheme graph and a stem index.
pub struct RuleBasedAnalyzer<'a, G> {
    graph: &'a Graph,
    index: &'a StemIndex<G>,
    options: SearchOptions,
}

impl<'a, G: StemGenerator> RuleBasedAnalyzer<'a, G> {
    pub fn new(graph: &'a Graph, index: &'a StemIndex<G>, options: SearchOptions) -> Self {
        Self { graph, index, options }
    }

    #[inline]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// All analyses of `input`, which must already be normalized. Equal
    /// analyses reached through different paths are reported once.
    pub fn analyze(&self, input: &str) -> Vec<SingleAnalysis> {
        self.run(input, &mut ())
    }

    /// Like [`analyze`](Self::analyze), also recording a full trace.
    pub fn analyze_with_debug(&self, input: &str) -> (Vec<SingleAnalysis>, AnalysisDebugData) {
        let mut data = AnalysisDebugData::new(input);
        let results = self.run(input, &mut data);
        (results, data)
    }

    fn run<T: SearchTrace>(&self, input: &str, tracer: &mut T) -> Vec<SingleAnalysis> {
        let stems = self.index.prefix_matches(input, self.options.ascii_tolerant);
        tracer.candidates(self.graph, &stems);
        if stems.is_empty() {
            return Vec::new();
        }

        let mut arena = PathArena::new();
        let mut current: Vec<NodeId> = stems
            .iter()
            .enumerate()
            .filter_map(|(i, stem)| {
                let tail_start = byte_offset(input, stem.surface.chars().count())?;
                Some(arena.root(self.graph, i, stem, tail_start))
            })
            .collect();

        let mut accepted = Vec::new();
        let mut generation = 0usize;
        while !current.is_empty() {
            if current.len() > self.options.prune_threshold {
                current = self.prune_cyclic(&arena, current);
            }
            trace!("generation {generation}: {} paths", current.len());
            let mut next = Vec::with_capacity(current.len());
            for id in current {
                let path = SearchPath {
                    graph: self.graph,
                    arena: &arena,
                    stems: &stems,
                    input,
                    id,
                };
                tracer.visit(&path);
                let finished = path.tail().is_empty();
                let is_result = finished
                    && path.is_terminal()
                    && !path.attributes().contains(PhoneticAttribute::CannotTerminate);
                if is_result {
                    accepted.push(id);
                    tracer.accepted(&path);
                }
                let steps = self.advance(&path, tracer);
                if steps.is_empty() {
                    if !finished {
                        tracer.failed(&path, "No transition");
                    } else if !is_result {
                        tracer.failed(&path, "Finished but path not terminal");
                    }
                }
                for step in steps {
                    next.push(arena.extend(
                        self.graph,
                        id,
                        step.transition,
                        step.surface,
                        step.consumed,
                        step.attributes,
                    ));
                }
            }
            current = next;
            generation += 1;
        }

        let view = |id| SearchPath {
            graph: self.graph,
            arena: &arena,
            stems: &stems,
            input,
            id,
        };
        let mut results: Vec<SingleAnalysis> = Vec::with_capacity(accepted.len());
        let mut result_paths = Vec::with_capacity(accepted.len());
        for id in accepted {
            let path = view(id);
            let analysis = SingleAnalysis::from_path(&path);
            if !results.contains(&analysis) {
                results.push(analysis);
                result_paths.push(path);
            }
        }
        debug!(
            "analyzed `{input}`: {} stems, {} nodes, {} results",
            stems.len(),
            arena.len(),
            results.len()
        );
        tracer.finished(&result_paths, &results);
        results
    }

    fn advance<T: SearchTrace>(&self, path: &SearchPath<'_>, tracer: &mut T) -> Vec<Step<'a>> {
        let tail = path.tail();
        let attributes = path.attributes();
        let mut steps = Vec::new();
        for transition in self.graph.outgoing(path.current_state()) {
            if tail.is_empty() && transition.has_surface_form() {
                tracer.rejected(path, transition, Rejection::EmptySurfaceExpected);
                continue;
            }
            let surface = match transition.surface(attributes) {
                Ok(s) => s,
                Err(e) => {
                    error!("{transition}: {e}");
                    tracer.rejected(path, transition, Rejection::Harmony(&e));
                    continue;
                }
            };
            let consumed = if self.options.ascii_tolerant {
                prefix_len_ignoring_diacritics(tail, &surface)
            } else {
                tail.starts_with(&*surface).then_some(surface.len())
            };
            let Some(consumed) = consumed else {
                tracer.rejected(path, transition, Rejection::SurfaceMismatch(&surface));
                continue;
            };
            if let Some(condition) = transition.condition() {
                if !condition.accept(path) {
                    let failing = condition.failing_condition(path).unwrap_or(condition);
                    tracer.rejected(path, transition, Rejection::Condition(failing));
                    continue;
                }
            }

            if !transition.has_surface_form() {
                steps.push(Step {
                    transition,
                    surface,
                    consumed: 0,
                    attributes,
                });
                continue;
            }

            let mut next = if self.spells_tail(&surface, tail) {
                attributes
            } else {
                morphemic_attributes(&surface, attributes)
            };
            next.remove(PhoneticAttribute::CannotTerminate);
            match transition.last_token().map(|t| t.kind) {
                Some(TokenKind::LastVoiced) => next.insert(PhoneticAttribute::ExpectsConsonant),
                Some(TokenKind::LastNotVoiced) => {
                    next.insert(PhoneticAttribute::ExpectsVowel);
                    next.insert(PhoneticAttribute::CannotTerminate);
                }
                _ => {}
            }
            steps.push(Step {
                transition,
                surface,
                consumed,
                attributes: next,
            });
        }
        steps
    }

    /// True if `surface` is the whole remaining input.
    fn spells_tail(&self, surface: &str, tail: &str) -> bool {
        if self.options.ascii_tolerant {
            alphabet::equals_ignore_diacritics(surface, tail)
        } else {
            surface == tail
        }
    }

    fn prune_cyclic(&self, arena: &PathArena, paths: Vec<NodeId>) -> Vec<NodeId> {
        let before = paths.len();
        let kept: Vec<NodeId> = paths
            .into_iter()
            .filter(|&id| !self.is_cyclic(arena, id))
            .collect();
        if kept.len() < before {
            debug!("pruned {} cyclic paths of {before}", before - kept.len());
        }
        kept
    }

    fn is_cyclic(&self, arena: &PathArena, id: NodeId) -> bool {
        let mut visits: HashMap<StateId, usize> = HashMap::new();
        for node in arena.ancestors(id) {
            let n = visits.entry(node.state).or_insert(0);
            *n += 1;
            if *n > self.options.max_state_repeats {
                return true;
            }
        }
        false
    }
}

/// Byte offset just after the first `chars` characters of `s`.
fn byte_offset(s: &str, chars: usize) -> Option<usize> {
    if chars == 0 {
        return Some(0);
    }
    s.char_indices()
        .nth(chars - 1)
        .map(|(i, c)| i + c.len_utf8())
}

/// Length in bytes of the prefix of `tail` that spells `surface` up to
/// diacritics, if there is one.
fn prefix_len_ignoring_diacritics(tail: &str, surface: &str) -> Option<usize> {
    let mut consumed = 0;
    let mut chars = tail.chars();
    for expected in surface.chars() {
        let c = chars.next()?;
        if alphabet::ascii_fold(c) != alphabet::ascii_fold(expected) {
            return None;
        }
        consumed += c.len_utf8();
    }
    Some(consumed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::debug::PathStatus;
    use crate::graph::GraphBuilder;
    use crate::stem::{StemError, StemTransition};
    use turkmorph_core::phonetics::attributes_of;
    use turkmorph_core::{DictionaryItem, PrimaryPos, RootAttribute, SecondaryPos};

    /// noun_S -[lAr]-> a3pl_S, noun_S -ε-> a3sg_S, a*_S -[+yA]-> dat_S,
    /// a*_S -[>dA]-> loc_S, a*_S -ε-> nom_ST. Only nom_ST, dat_S and loc_S are
    /// terminal.
    fn mini_graph() -> (Graph, StateId) {
        let mut b = GraphBuilder::new();
        let noun_m = b.pos_morpheme("Noun", "Noun", PrimaryPos::Noun);
        let a3pl_m = b.morpheme("Plural", "A3pl");
        let a3sg_m = b.morpheme("Singular", "A3sg");
        let dat_m = b.morpheme("Dative", "Dat");
        let loc_m = b.morpheme("Locative", "Loc");
        let nom_m = b.hidden_morpheme("Nominal", "Nom");
        let noun = b.non_terminal("noun_S", noun_m);
        let a3pl = b.non_terminal("a3pl_S", a3pl_m);
        let a3sg = b.non_terminal("a3sg_S", a3sg_m);
        let dat = b.terminal("dat_ST", dat_m);
        let loc = b.terminal("loc_ST", loc_m);
        let nom = b.terminal("nom_ST", nom_m);
        b.add(noun, a3pl, "lAr")
            .add_empty_if(noun, a3sg, Condition::not_have_root(RootAttribute::ImplicitPlural))
            .add(a3pl, dat, "+yA")
            .add(a3sg, dat, "+yA")
            .add(a3pl, loc, ">dA")
            .add(a3sg, loc, ">dA")
            .add_empty(a3pl, nom)
            .add_empty(a3sg, nom);
        (b.build().unwrap(), noun)
    }

    struct Voicer {
        state: StateId,
    }

    impl StemGenerator for Voicer {
        fn generate(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>, StemError> {
            let root = item.root.clone();
            let mut out = vec![StemTransition::new(
                root.as_str(),
                Arc::clone(item),
                attributes_of(&root),
                self.state,
            )];
            if item.has_attribute(RootAttribute::Voicing) {
                let mut voiced: Vec<char> = root.chars().collect();
                if let Some(last) = voiced.pop().and_then(alphabet::voice) {
                    voiced.push(last);
                    let voiced: String = voiced.into_iter().collect();
                    let mut attrs = attributes_of(&voiced);
                    attrs.insert(PhoneticAttribute::ExpectsVowel);
                    attrs.insert(PhoneticAttribute::CannotTerminate);
                    out.push(StemTransition::new(voiced, Arc::clone(item), attrs, self.state));
                    out[0].attributes.insert(PhoneticAttribute::ExpectsConsonant);
                }
            }
            Ok(out)
        }
    }

    fn noun(lemma: &str, attrs: Vec<RootAttribute>) -> Arc<DictionaryItem> {
        Arc::new(DictionaryItem::new(
            lemma,
            lemma,
            lemma,
            PrimaryPos::Noun,
            SecondaryPos::None,
            attrs,
        ))
    }

    fn setup() -> (Graph, StemIndex<Voicer>) {
        let (graph, noun_state) = mini_graph();
        let index = StemIndex::new(Voicer { state: noun_state });
        index.add(noun("kitap", vec![RootAttribute::Voicing])).unwrap();
        index.add(noun("ev", vec![])).unwrap();
        index.add(noun("elma", vec![])).unwrap();
        (graph, index)
    }

    fn lexical(results: &[SingleAnalysis]) -> Vec<String> {
        results
            .iter()
            .map(SingleAnalysis::format_surface)
            .collect()
    }

    #[test]
    fn plural_locative() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert_eq!(lexical(&a.analyze("evlerde")), vec!["ev:Noun + ler:A3pl + de:Loc"]);
    }

    #[test]
    fn bare_root_hides_nominative() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert_eq!(lexical(&a.analyze("ev")), vec!["ev:Noun + A3sg"]);
    }

    #[test]
    fn buffer_letter_after_vowel() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert_eq!(lexical(&a.analyze("elmaya")), vec!["elma:Noun + A3sg + ya:Dat"]);
        assert!(a.analyze("elmaa").is_empty());
    }

    #[test]
    fn voiced_stem_needs_vowel_suffix() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert_eq!(lexical(&a.analyze("kitaba")), vec!["kitab:Noun + A3sg + a:Dat"]);
        assert_eq!(lexical(&a.analyze("kitapta")), vec!["kitap:Noun + A3sg + ta:Loc"]);
        assert!(a.analyze("kitab").is_empty());
        assert!(a.analyze("kitapa").is_empty());
    }

    #[test]
    fn unknown_input_has_no_results() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert!(a.analyze("qxz").is_empty());
        let (_, debug) = a.analyze_with_debug("qxz");
        assert_eq!(
            debug.detailed_info().last().map(String::as_str),
            Some("No Stem Candidates. Analysis Failed.")
        );
    }

    #[test]
    fn ascii_tolerant_reports_dictionary_spelling() {
        let (graph, index) = setup();
        index.add(noun("çiçek", vec![])).unwrap();
        let strict = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert!(strict.analyze("ciceklerde").is_empty());
        let options = SearchOptions {
            ascii_tolerant: true,
            ..SearchOptions::default()
        };
        let a = RuleBasedAnalyzer::new(&graph, &index, options);
        let results = a.analyze("ciceklerde");
        assert_eq!(lexical(&results), vec!["çiçek:Noun + ler:A3pl + de:Loc"]);
        assert_eq!(results[0].stem(), "çiçek");
    }

    #[test]
    fn debug_trace_records_rejections() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        let (results, debug) = a.analyze_with_debug("kitab");
        assert!(results.is_empty());
        assert_eq!(debug.candidate_stem_transitions.len(), 1);
        assert!(
            debug
                .failed_paths()
                .any(|p| p.status == PathStatus::Failed("Finished but path not terminal"))
        );
        assert!(
            debug
                .rejected_transitions()
                .any(|r| r.reason == "Empty surface expected.")
        );
        let info = debug.detailed_info();
        assert_eq!(info[0], "----------------------");
        assert_eq!(info[1], "Debug data for input = kitab");
        assert!(info.iter().any(|l| l == "Analyses [0] (Surface + Morpheme):"));
    }

    #[test]
    fn debug_and_plain_agree() {
        let (graph, index) = setup();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        for word in ["ev", "evde", "evlere", "kitaplar", "kitaba"] {
            let (with_debug, data) = a.analyze_with_debug(word);
            assert_eq!(a.analyze(word), with_debug, "{word}");
            assert_eq!(data.results.len(), with_debug.len());
        }
    }

    #[test]
    fn condition_rejection_names_failing_part() {
        let (graph, index) = setup();
        index
            .add(noun("halk", vec![RootAttribute::ImplicitPlural]))
            .unwrap();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        let (results, debug) = a.analyze_with_debug("halkta");
        assert!(results.is_empty());
        assert!(
            debug
                .rejected_transitions()
                .any(|r| r.reason.starts_with("Condition → "))
        );
    }

    #[test]
    fn whole_tail_match_follows_tolerance() {
        let (graph, index) = setup();
        let strict = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        assert!(strict.spells_tail("de", "de"));
        assert!(!strict.spells_tail("dı", "di"));
        let options = SearchOptions {
            ascii_tolerant: true,
            ..SearchOptions::default()
        };
        let tolerant = RuleBasedAnalyzer::new(&graph, &index, options);
        assert!(tolerant.spells_tail("dı", "di"));
        assert!(tolerant.spells_tail("çe", "ce"));
        assert!(!tolerant.spells_tail("de", "dea"));
    }

    #[test]
    fn harmony_fault_skips_transition() {
        let (graph, index) = setup();
        // no vowel, so `lAr` has nothing to harmonize with
        index.add(noun("tv", vec![])).unwrap();
        let a = RuleBasedAnalyzer::new(&graph, &index, SearchOptions::default());
        let (results, debug) = a.analyze_with_debug("tvler");
        assert!(results.is_empty());
        assert!(
            debug
                .rejected_transitions()
                .any(|r| r.reason.starts_with("Harmony fault: cannot harmonize A vowel"))
        );
        // the bare root still analyzes
        assert_eq!(lexical(&a.analyze("tv")), vec!["tv:Noun + A3sg"]);
    }

    #[test]
    fn byte_offsets() {
        assert_eq!(byte_offset("çiçek", 0), Some(0));
        assert_eq!(byte_offset("çiçek", 2), Some(3));
        assert_eq!(byte_offset("çiçek", 5), Some(7));
        assert_eq!(byte_offset("çiçek", 6), None);
        assert_eq!(prefix_len_ignoring_diacritics("çiçekler", "cicek"), Some(7));
        assert_eq!(prefix_len_ignoring_diacritics("ci", "cicek"), None);
    }
}
