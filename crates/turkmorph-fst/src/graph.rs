// Morpheme state graph
//
// Morphemes, the states that own them and the suffix transitions between
// states. A `GraphBuilder` collects the declarations; `build` tokenizes
// every template, derives the implicit phonetic conditions and freezes the
// result into an immutable `Graph` that is shared by all analyses.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use turkmorph_core::PrimaryPos;
use turkmorph_core::alphabet;
use turkmorph_core::phonetics::PhoneticAttribute;

use crate::condition::Condition;
use crate::surface::{SurfaceCache, SurfaceError};
use crate::template::{self, TemplateError, TemplateToken};

/// Error raised while freezing a graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("bad template on transition {transition}: {source}")]
    Template {
        transition: String,
        #[source]
        source: TemplateError,
    },
    #[error("duplicate state id `{0}`")]
    DuplicateState(String),
    #[error("duplicate morpheme id `{0}`")]
    DuplicateMorpheme(String),
}

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Index of a [`MorphemeState`] in its graph.
    StateId
);
arena_id!(
    /// Index of a [`SuffixTransition`] in its graph.
    TransitionId
);
arena_id!(
    /// Index of a [`Morpheme`] in its graph.
    MorphemeId
);

// ---------------------------------------------------------------------------
// Nodes and edges
// ---------------------------------------------------------------------------

/// A morpheme: the linguistic unit a state stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Morpheme {
    /// Short tag printed in analyses, e.g. `A3pl`.
    pub id: String,
    /// Descriptive name, e.g. `ThirdPersonPlural`.
    pub name: String,
    /// POS the morpheme sets for its group, for root and zero morphemes.
    pub pos: Option<PrimaryPos>,
    /// Starts a new inflectional group.
    pub derivational: bool,
    /// Omitted from analysis results (Pnon, Nom).
    pub hidden: bool,
}

impl Morpheme {
    /// Morpheme attached to results for words with no analysis.
    pub fn unknown() -> Self {
        Self {
            id: "Unknown".to_string(),
            name: "Unknown".to_string(),
            pos: Some(PrimaryPos::Unknown),
            derivational: false,
            hidden: false,
        }
    }
}

impl fmt::Display for Morpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.id)
    }
}

#[derive(Debug, Clone)]
pub struct MorphemeState {
    pub id: String,
    pub morpheme: MorphemeId,
    pub terminal: bool,
    pub derivative: bool,
    pub pos_root: bool,
    outgoing: Vec<TransitionId>,
}

impl MorphemeState {
    #[inline]
    pub fn outgoing(&self) -> &[TransitionId] {
        &self.outgoing
    }
}

/// A graph edge whose surface depends on the phonetic context.
#[derive(Debug)]
pub struct SuffixTransition {
    pub from: StateId,
    pub to: StateId,
    pub template: String,
    tokens: Vec<TemplateToken>,
    condition: Option<Condition>,
    cache: SurfaceCache,
    label: String,
}

impl SuffixTransition {
    #[inline]
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    #[inline]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// False for epsilon transitions.
    #[inline]
    pub fn has_surface_form(&self) -> bool {
        !self.tokens.is_empty()
    }

    #[inline]
    pub fn last_token(&self) -> Option<&TemplateToken> {
        self.tokens.last()
    }

    /// Memoized surface of this transition after `attributes`.
    pub fn surface(
        &self,
        attributes: turkmorph_core::PhoneticAttributes,
    ) -> Result<Arc<str>, SurfaceError> {
        self.cache.get_or_generate(&self.tokens, attributes)
    }
}

impl fmt::Display for SuffixTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

// ---------------------------------------------------------------------------
// Frozen graph
// ---------------------------------------------------------------------------

/// Immutable morpheme state graph.
#[derive(Debug)]
pub struct Graph {
    morphemes: Vec<Arc<Morpheme>>,
    states: Vec<MorphemeState>,
    transitions: Vec<SuffixTransition>,
    state_ids: HashMap<String, StateId>,
    morpheme_ids: HashMap<String, MorphemeId>,
}

impl Graph {
    #[inline]
    pub fn state(&self, id: StateId) -> &MorphemeState {
        &self.states[id.index()]
    }

    #[inline]
    pub fn transition(&self, id: TransitionId) -> &SuffixTransition {
        &self.transitions[id.index()]
    }

    #[inline]
    pub fn morpheme(&self, id: MorphemeId) -> &Arc<Morpheme> {
        &self.morphemes[id.index()]
    }

    /// Morpheme owned by a state.
    #[inline]
    pub fn state_morpheme(&self, id: StateId) -> &Arc<Morpheme> {
        self.morpheme(self.state(id).morpheme)
    }

    pub fn outgoing(&self, id: StateId) -> impl Iterator<Item = &SuffixTransition> {
        self.state(id)
            .outgoing
            .iter()
            .map(move |t| self.transition(*t))
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.state_ids.get(name).copied()
    }

    pub fn morpheme_by_id(&self, id: &str) -> Option<MorphemeId> {
        self.morpheme_ids.get(id).copied()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    pub fn morpheme_count(&self) -> usize {
        self.morphemes.len()
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &MorphemeState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId(i as u32), s))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

struct PendingTransition {
    from: StateId,
    to: StateId,
    template: String,
    condition: Option<Condition>,
}

/// Mutable graph declaration. States and morphemes get their ids at once;
/// transitions are validated in [`GraphBuilder::build`].
#[derive(Default)]
pub struct GraphBuilder {
    morphemes: Vec<Arc<Morpheme>>,
    states: Vec<MorphemeState>,
    transitions: Vec<Option<PendingTransition>>,
    state_ids: HashMap<String, StateId>,
    morpheme_ids: HashMap<String, MorphemeId>,
    duplicate: Option<GraphError>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Morphemes ----------------------------------------------------------

    fn push_morpheme(&mut self, morpheme: Morpheme) -> MorphemeId {
        let id = MorphemeId(self.morphemes.len() as u32);
        if self.morpheme_ids.insert(morpheme.id.clone(), id).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(GraphError::DuplicateMorpheme(morpheme.id.clone()));
        }
        self.morphemes.push(Arc::new(morpheme));
        id
    }

    /// Inflectional morpheme.
    pub fn morpheme(&mut self, name: &str, id: &str) -> MorphemeId {
        self.push_morpheme(Morpheme {
            id: id.to_string(),
            name: name.to_string(),
            pos: None,
            derivational: false,
            hidden: false,
        })
    }

    /// Morpheme that carries a POS (roots and zero derivations).
    pub fn pos_morpheme(&mut self, name: &str, id: &str, pos: PrimaryPos) -> MorphemeId {
        self.push_morpheme(Morpheme {
            id: id.to_string(),
            name: name.to_string(),
            pos: Some(pos),
            derivational: false,
            hidden: false,
        })
    }

    pub fn derivational(&mut self, name: &str, id: &str) -> MorphemeId {
        self.push_morpheme(Morpheme {
            id: id.to_string(),
            name: name.to_string(),
            pos: None,
            derivational: true,
            hidden: false,
        })
    }

    /// Inflectional morpheme left out of analysis results.
    pub fn hidden_morpheme(&mut self, name: &str, id: &str) -> MorphemeId {
        self.push_morpheme(Morpheme {
            id: id.to_string(),
            name: name.to_string(),
            pos: None,
            derivational: false,
            hidden: true,
        })
    }

    // -- States -------------------------------------------------------------

    fn push_state(&mut self, id: &str, morpheme: MorphemeId, terminal: bool, derivative: bool) -> StateId {
        let state_id = StateId(self.states.len() as u32);
        if self.state_ids.insert(id.to_string(), state_id).is_some() && self.duplicate.is_none() {
            self.duplicate = Some(GraphError::DuplicateState(id.to_string()));
        }
        self.states.push(MorphemeState {
            id: id.to_string(),
            morpheme,
            terminal,
            derivative,
            pos_root: false,
            outgoing: Vec::new(),
        });
        state_id
    }

    pub fn terminal(&mut self, id: &str, morpheme: MorphemeId) -> StateId {
        self.push_state(id, morpheme, true, false)
    }

    pub fn non_terminal(&mut self, id: &str, morpheme: MorphemeId) -> StateId {
        self.push_state(id, morpheme, false, false)
    }

    pub fn terminal_derivative(&mut self, id: &str, morpheme: MorphemeId) -> StateId {
        self.push_state(id, morpheme, true, true)
    }

    pub fn non_terminal_derivative(&mut self, id: &str, morpheme: MorphemeId) -> StateId {
        self.push_state(id, morpheme, false, true)
    }

    /// Mark a state as a POS root entry point.
    pub fn pos_root(&mut self, state: StateId) -> StateId {
        self.states[state.index()].pos_root = true;
        state
    }

    // -- Transitions --------------------------------------------------------

    fn push_transition(&mut self, from: StateId, to: StateId, template: &str, condition: Option<Condition>) {
        let id = TransitionId(self.transitions.len() as u32);
        self.transitions.push(Some(PendingTransition {
            from,
            to,
            template: template.to_string(),
            condition,
        }));
        self.states[from.index()].outgoing.push(id);
    }

    pub fn add(&mut self, from: StateId, to: StateId, template: &str) -> &mut Self {
        self.push_transition(from, to, template, None);
        self
    }

    pub fn add_if(&mut self, from: StateId, to: StateId, template: &str, condition: Condition) -> &mut Self {
        self.push_transition(from, to, template, Some(condition));
        self
    }

    /// Epsilon transition.
    pub fn add_empty(&mut self, from: StateId, to: StateId) -> &mut Self {
        self.push_transition(from, to, "", None);
        self
    }

    pub fn add_empty_if(&mut self, from: StateId, to: StateId, condition: Condition) -> &mut Self {
        self.push_transition(from, to, "", Some(condition));
        self
    }

    /// Give `target` a copy of every current outgoing transition of `source`.
    pub fn copy_outgoing(&mut self, source: StateId, target: StateId) -> &mut Self {
        let copies: Vec<(StateId, String, Option<Condition>)> = self.states[source.index()]
            .outgoing
            .iter()
            .filter_map(|t| self.transitions[t.index()].as_ref())
            .map(|t| (t.to, t.template.clone(), t.condition.clone()))
            .collect();
        for (to, template, condition) in copies {
            self.push_transition(target, to, &template, condition);
        }
        self
    }

    /// Drop the outgoing transitions of `state` whose target owns `morpheme`.
    pub fn remove_transitions_to_morpheme(&mut self, state: StateId, morpheme: MorphemeId) -> &mut Self {
        let outgoing = std::mem::take(&mut self.states[state.index()].outgoing);
        let mut kept = Vec::with_capacity(outgoing.len());
        for t in outgoing {
            let leads_to_morpheme = self.transitions[t.index()]
                .as_ref()
                .is_some_and(|p| self.states[p.to.index()].morpheme == morpheme);
            if leads_to_morpheme {
                self.transitions[t.index()] = None;
            } else {
                kept.push(t);
            }
        }
        self.states[state.index()].outgoing = kept;
        self
    }

    /// Tokenize all templates, attach the implicit conditions and freeze.
    pub fn build(self) -> Result<Graph, GraphError> {
        if let Some(err) = self.duplicate {
            return Err(err);
        }
        let mut states = self.states;
        let mut transitions = Vec::with_capacity(self.transitions.len());
        let mut remap: Vec<Option<TransitionId>> = Vec::with_capacity(self.transitions.len());

        for pending in self.transitions {
            let Some(p) = pending else {
                remap.push(None);
                continue;
            };
            let label = transition_label(&states[p.from.index()].id, &states[p.to.index()].id, &p.template);
            let tokens = template::tokenize(&p.template).map_err(|source| GraphError::Template {
                transition: label.clone(),
                source,
            })?;
            let condition = match (template_condition(&p.template), p.condition) {
                (Some(implicit), Some(explicit)) => Some(implicit.and(explicit)),
                (implicit, explicit) => implicit.or(explicit),
            };
            remap.push(Some(TransitionId(transitions.len() as u32)));
            transitions.push(SuffixTransition {
                from: p.from,
                to: p.to,
                template: p.template,
                tokens,
                condition,
                cache: SurfaceCache::new(),
                label,
            });
        }
        for state in &mut states {
            state.outgoing = state
                .outgoing
                .iter()
                .filter_map(|t| remap[t.index()])
                .collect();
        }
        Ok(Graph {
            morphemes: self.morphemes,
            states,
            transitions,
            state_ids: self.state_ids,
            morpheme_ids: self.morpheme_ids,
        })
    }
}

fn transition_label(from: &str, to: &str, template: &str) -> String {
    if template.is_empty() {
        format!("[{from}→{to}]")
    } else {
        format!("[{from}→{to}:{template}]")
    }
}

/// Condition implied by the first letter of a template.
///
/// A consonant-initial template (or a devoicing one) cannot follow a stem
/// that expects a vowel; a vowel-initial one, possibly behind a glide,
/// cannot follow a stem that expects a consonant.
fn template_condition(template: &str) -> Option<Condition> {
    if template.is_empty() {
        return None;
    }
    let lower: Vec<char> = template.chars().map(alphabet::to_lower_char).collect();
    let first_vowel = alphabet::is_vowel(lower[0]);
    let glide_vowel = lower[0] == '+' && lower.get(2).is_some_and(|c| alphabet::is_vowel(*c));
    if glide_vowel || first_vowel {
        Some(Condition::not_have(PhoneticAttribute::ExpectsConsonant))
    } else {
        Some(Condition::not_have(PhoneticAttribute::ExpectsVowel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use turkmorph_core::RootAttribute;

    fn small_graph() -> (GraphBuilder, StateId, StateId, StateId) {
        let mut b = GraphBuilder::new();
        let noun = b.pos_morpheme("Noun", "Noun", PrimaryPos::Noun);
        let a3pl = b.morpheme("ThirdPersonPlural", "A3pl");
        let loc = b.morpheme("Locative", "Loc");
        let root = b.non_terminal("noun_S", noun);
        let pl = b.terminal("a3pl_ST", a3pl);
        let lc = b.terminal("loc_ST", loc);
        b.pos_root(root);
        (b, root, pl, lc)
    }

    #[test]
    fn build_tokenizes_and_links() {
        let (mut b, root, pl, lc) = small_graph();
        b.add(root, pl, "lAr").add(pl, lc, ">dA").add_empty(root, lc);
        let g = b.build().unwrap();
        assert_eq!(g.state_count(), 3);
        assert_eq!(g.transition_count(), 3);
        assert_eq!(g.state(root).outgoing().len(), 2);
        let t: Vec<_> = g.outgoing(root).collect();
        assert_eq!(t[0].tokens().len(), 3);
        assert!(!t[1].has_surface_form());
        assert_eq!(t[0].to_string(), "[noun_S→a3pl_ST:lAr]");
        assert_eq!(g.state_by_name("loc_ST"), Some(lc));
        assert!(g.state(root).pos_root);
        assert_eq!(g.state_morpheme(pl).id, "A3pl");
    }

    #[test]
    fn bad_template_fails_build() {
        let (mut b, root, pl, _) = small_graph();
        b.add(root, pl, "lA>");
        assert!(matches!(b.build(), Err(GraphError::Template { .. })));
    }

    #[test]
    fn duplicate_state_fails_build() {
        let (mut b, _, _, _) = small_graph();
        let m = b.morpheme("X", "X");
        b.terminal("noun_S", m);
        assert!(matches!(b.build(), Err(GraphError::DuplicateState(s)) if s == "noun_S"));
    }

    #[test]
    fn template_conditions() {
        let expects_vowel = Condition::not_have(PhoneticAttribute::ExpectsVowel);
        let expects_consonant = Condition::not_have(PhoneticAttribute::ExpectsConsonant);
        assert_eq!(template_condition(""), None);
        assert_eq!(template_condition("lAr"), Some(expects_vowel.clone()));
        assert_eq!(template_condition(">dA"), Some(expects_vowel.clone()));
        assert_eq!(template_condition("Im"), Some(expects_consonant.clone()));
        assert_eq!(template_condition("+yA"), Some(expects_consonant.clone()));
        assert_eq!(template_condition("+nIn"), Some(expects_consonant.clone()));
        assert_eq!(template_condition("+msI"), Some(expects_vowel));
        assert_eq!(template_condition("A"), Some(expects_consonant));
    }

    #[test]
    fn explicit_and_implicit_conditions_combine() {
        let (mut b, root, pl, _) = small_graph();
        b.add_if(root, pl, "lAr", Condition::not_have_root(RootAttribute::ImplicitPlural));
        let g = b.build().unwrap();
        let t = g.outgoing(root).next().unwrap();
        assert!(matches!(t.condition(), Some(Condition::And(c)) if c.len() == 2));
    }

    #[test]
    fn copy_and_remove_transitions() {
        let (mut b, root, pl, lc) = small_graph();
        let m = b.morpheme("Copy", "Copy");
        let copy = b.non_terminal("copy_S", m);
        b.add(root, pl, "lAr").add(root, lc, ">dA");
        b.copy_outgoing(root, copy);
        let loc = b.states[lc.index()].morpheme;
        b.remove_transitions_to_morpheme(copy, loc);
        let g = b.build().unwrap();
        assert_eq!(g.state(root).outgoing().len(), 2);
        let copied: Vec<_> = g.outgoing(copy).collect();
        assert_eq!(copied.len(), 1);
        assert_eq!(copied[0].to, pl);
        assert_eq!(g.transition_count(), 3);
    }
}
