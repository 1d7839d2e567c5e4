// Transition conditions
//
// Predicates over a search path that decide whether a suffix transition may
// be taken. They read the path as it is before the transition: the root
// item, the current attributes, the remaining tail and the morpheme/state
// history. Conditions compose with `and`, `or` and `!`.

use std::fmt::Write as _;
use std::ops::Not;

use turkmorph_core::{PhoneticAttribute, PrimaryPos, RootAttribute, SecondaryPos};

use crate::graph::{Graph, MorphemeId, StateId};
use crate::path::SearchPath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    HasRootAttribute(RootAttribute),
    HasAnyRootAttribute(Vec<RootAttribute>),
    HasPhoneticAttribute(PhoneticAttribute),
    /// Root item id is one of these.
    RootIsAny(Vec<String>),
    RootPrimaryPosIs(PrimaryPos),
    SecondaryPosIs(SecondaryPos),
    /// Unconsumed input remains.
    HasTail,
    /// Some suffix on the path produced letters.
    HasAnySuffixSurface,
    HasDerivation,
    /// No suffix since the last derivation (or the root) produced letters.
    NoSurfaceAfterDerivation,
    ContainsMorpheme(Vec<MorphemeId>),
    /// The morphemes appear consecutively somewhere on the path.
    ContainsMorphemeSequence(Vec<MorphemeId>),
    /// The path ends with these morphemes.
    HasTailSequence(Vec<MorphemeId>),
    CurrentMorphemeIsAny(Vec<MorphemeId>),
    PreviousMorphemeIsAny(Vec<MorphemeId>),
    CurrentStateIsAny(Vec<StateId>),
    PreviousStateIsAny(Vec<StateId>),
    RootSurfaceIsAny(Vec<String>),
    LastDerivationIsAny(Vec<StateId>),
    CurrentGroupContainsAny(Vec<StateId>),
    PreviousGroupContains(Vec<StateId>),
    PreviousGroupContainsMorpheme(Vec<MorphemeId>),
    Not(Box<Condition>),
    And(Vec<Condition>),
    Or(Vec<Condition>),
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

impl Condition {
    pub fn has(attr: PhoneticAttribute) -> Self {
        Condition::HasPhoneticAttribute(attr)
    }

    pub fn not_have(attr: PhoneticAttribute) -> Self {
        !Condition::HasPhoneticAttribute(attr)
    }

    pub fn has_root(attr: RootAttribute) -> Self {
        Condition::HasRootAttribute(attr)
    }

    pub fn not_have_root(attr: RootAttribute) -> Self {
        !Condition::HasRootAttribute(attr)
    }

    pub fn has_any_root(attrs: &[RootAttribute]) -> Self {
        Condition::HasAnyRootAttribute(attrs.to_vec())
    }

    pub fn root_is(id: &str) -> Self {
        Condition::RootIsAny(vec![id.to_string()])
    }

    pub fn root_is_not(id: &str) -> Self {
        !Condition::root_is(id)
    }

    pub fn root_is_any(ids: &[&str]) -> Self {
        Condition::RootIsAny(owned(ids))
    }

    pub fn root_is_none(ids: &[&str]) -> Self {
        !Condition::root_is_any(ids)
    }

    pub fn root_surface_is(surface: &str) -> Self {
        Condition::RootSurfaceIsAny(vec![surface.to_string()])
    }

    pub fn root_surface_is_any(surfaces: &[&str]) -> Self {
        Condition::RootSurfaceIsAny(owned(surfaces))
    }

    pub fn secondary_pos_is(pos: SecondaryPos) -> Self {
        Condition::SecondaryPosIs(pos)
    }

    pub fn contains_morpheme(morphemes: &[MorphemeId]) -> Self {
        Condition::ContainsMorpheme(morphemes.to_vec())
    }

    pub fn previous_state_is(state: StateId) -> Self {
        Condition::PreviousStateIsAny(vec![state])
    }

    pub fn previous_state_is_not(state: StateId) -> Self {
        !Condition::previous_state_is(state)
    }

    pub fn previous_state_is_any(states: &[StateId]) -> Self {
        Condition::PreviousStateIsAny(states.to_vec())
    }

    pub fn current_state_is(state: StateId) -> Self {
        Condition::CurrentStateIsAny(vec![state])
    }

    pub fn current_state_is_not(state: StateId) -> Self {
        !Condition::current_state_is(state)
    }

    pub fn previous_morpheme_is(morpheme: MorphemeId) -> Self {
        Condition::PreviousMorphemeIsAny(vec![morpheme])
    }

    pub fn previous_morpheme_is_not(morpheme: MorphemeId) -> Self {
        !Condition::previous_morpheme_is(morpheme)
    }

    pub fn previous_morpheme_is_any(morphemes: &[MorphemeId]) -> Self {
        Condition::PreviousMorphemeIsAny(morphemes.to_vec())
    }

    pub fn last_derivation_is(state: StateId) -> Self {
        Condition::LastDerivationIsAny(vec![state])
    }

    pub fn last_derivation_is_any(states: &[StateId]) -> Self {
        Condition::LastDerivationIsAny(states.to_vec())
    }

    pub fn current_group_contains_any(states: &[StateId]) -> Self {
        Condition::CurrentGroupContainsAny(states.to_vec())
    }

    /// Both must hold. Nested conjunctions are flattened.
    #[must_use]
    pub fn and(self, other: Condition) -> Self {
        match (self, other) {
            (Condition::And(mut a), Condition::And(b)) => {
                a.extend(b);
                Condition::And(a)
            }
            (Condition::And(mut a), c) => {
                a.push(c);
                Condition::And(a)
            }
            (c, Condition::And(mut b)) => {
                b.insert(0, c);
                Condition::And(b)
            }
            (a, b) => Condition::And(vec![a, b]),
        }
    }

    /// Either may hold. Nested disjunctions are flattened.
    #[must_use]
    pub fn or(self, other: Condition) -> Self {
        match (self, other) {
            (Condition::Or(mut a), Condition::Or(b)) => {
                a.extend(b);
                Condition::Or(a)
            }
            (Condition::Or(mut a), c) => {
                a.push(c);
                Condition::Or(a)
            }
            (a, b) => Condition::Or(vec![a, b]),
        }
    }

    #[must_use]
    pub fn and_not(self, other: Condition) -> Self {
        self.and(!other)
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        match self {
            Condition::Not(inner) => *inner,
            c => Condition::Not(Box::new(c)),
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

impl Condition {
    /// Evaluate against a path.
    pub fn accept(&self, path: &SearchPath<'_>) -> bool {
        let graph = path.graph;
        match self {
            Condition::HasRootAttribute(a) => path.item().has_attribute(*a),
            Condition::HasAnyRootAttribute(attrs) => path.item().has_any_attribute(attrs),
            Condition::HasPhoneticAttribute(a) => path.attributes().contains(*a),
            Condition::RootIsAny(ids) => ids.iter().any(|id| *id == path.item().id),
            Condition::RootPrimaryPosIs(pos) => path.item().primary_pos == *pos,
            Condition::SecondaryPosIs(pos) => path.item().secondary_pos == *pos,
            Condition::HasTail => !path.tail().is_empty(),
            Condition::HasAnySuffixSurface => path.contains_suffix_with_surface(),
            Condition::HasDerivation => path.contains_derivation(),
            Condition::NoSurfaceAfterDerivation => {
                for step in path.suffixes_rev() {
                    if graph.state(step.state).derivative {
                        return true;
                    }
                    if !step.surface.is_empty() {
                        return false;
                    }
                }
                true
            }
            Condition::ContainsMorpheme(morphemes) => path
                .steps_rev()
                .any(|s| morphemes.contains(&graph.state(s.state).morpheme)),
            Condition::ContainsMorphemeSequence(sequence) => {
                if sequence.is_empty() {
                    return false;
                }
                let mut matched = 0;
                for step in path.history() {
                    if graph.state(step.state).morpheme == sequence[matched] {
                        matched += 1;
                        if matched == sequence.len() {
                            return true;
                        }
                    } else {
                        matched = 0;
                    }
                }
                false
            }
            Condition::HasTailSequence(sequence) => {
                let mut steps = path.steps_rev();
                sequence.iter().rev().all(|m| {
                    steps
                        .next()
                        .is_some_and(|s| graph.state(s.state).morpheme == *m)
                })
            }
            Condition::CurrentMorphemeIsAny(morphemes) => {
                morphemes.contains(&graph.state(path.current_state()).morpheme)
            }
            Condition::PreviousMorphemeIsAny(morphemes) => path
                .previous_state()
                .is_some_and(|s| morphemes.contains(&graph.state(s).morpheme)),
            Condition::CurrentStateIsAny(states) => states.contains(&path.current_state()),
            Condition::PreviousStateIsAny(states) => path
                .previous_state()
                .is_some_and(|s| states.contains(&s)),
            Condition::RootSurfaceIsAny(surfaces) => {
                let root = &*path.stem().surface;
                surfaces.iter().any(|s| s == root)
            }
            Condition::LastDerivationIsAny(states) => path
                .suffixes_rev()
                .find(|s| graph.state(s.state).derivative)
                .is_some_and(|s| states.contains(&s.state)),
            Condition::CurrentGroupContainsAny(states) => {
                for step in path.suffixes_rev() {
                    if states.contains(&step.state) {
                        return true;
                    }
                    if graph.state(step.state).derivative {
                        return false;
                    }
                }
                false
            }
            Condition::PreviousGroupContains(states) => {
                previous_group_contains(path, |step| states.contains(&step))
            }
            Condition::PreviousGroupContainsMorpheme(morphemes) => {
                previous_group_contains(path, |step| morphemes.contains(&graph.state(step).morpheme))
            }
            Condition::Not(inner) => !inner.accept(path),
            Condition::And(all) => all.iter().all(|c| c.accept(path)),
            Condition::Or(any) => any.iter().any(|c| c.accept(path)),
        }
    }

    /// The innermost sub-condition responsible for a rejection, or `None`
    /// if the condition accepts the path.
    pub fn failing_condition(&self, path: &SearchPath<'_>) -> Option<&Condition> {
        match self {
            Condition::And(all) => all.iter().find_map(|c| c.failing_condition(path)),
            _ if self.accept(path) => None,
            _ => Some(self),
        }
    }

    /// Human readable form with state and morpheme names resolved.
    pub fn describe(&self, graph: &Graph) -> String {
        let mut out = String::new();
        self.describe_into(graph, &mut out);
        out
    }

    fn describe_into(&self, graph: &Graph, out: &mut String) {
        let states = |ids: &[StateId]| -> String {
            ids.iter()
                .map(|s| graph.state(*s).id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let morphemes = |ids: &[MorphemeId]| -> String {
            ids.iter()
                .map(|m| graph.morpheme(*m).id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = match self {
            Condition::HasRootAttribute(a) => write!(out, "HasRootAttribute{{{}}}", a.name()),
            Condition::HasAnyRootAttribute(attrs) => write!(
                out,
                "HasAnyRootAttribute{{{}}}",
                attrs.iter().map(|a| a.name()).collect::<Vec<_>>().join(", ")
            ),
            Condition::HasPhoneticAttribute(a) => write!(out, "HasPhoneticAttribute{{{a}}}"),
            Condition::RootIsAny(ids) => write!(out, "RootIsAny{{{}}}", ids.join(", ")),
            Condition::RootPrimaryPosIs(p) => write!(out, "RootPrimaryPosIs{{{}}}", p.short_form()),
            Condition::SecondaryPosIs(p) => write!(out, "SecondaryPosIs{{{}}}", p.short_form()),
            Condition::HasTail => write!(out, "HasTail"),
            Condition::HasAnySuffixSurface => write!(out, "HasAnySuffixSurface"),
            Condition::HasDerivation => write!(out, "HasDerivation"),
            Condition::NoSurfaceAfterDerivation => write!(out, "NoSurfaceAfterDerivation"),
            Condition::ContainsMorpheme(m) => write!(out, "ContainsMorpheme{{{}}}", morphemes(m)),
            Condition::ContainsMorphemeSequence(m) => {
                write!(out, "ContainsMorphemeSequence{{{}}}", morphemes(m))
            }
            Condition::HasTailSequence(m) => write!(out, "HasTailSequence{{{}}}", morphemes(m)),
            Condition::CurrentMorphemeIsAny(m) => write!(out, "CurrentMorphemeIsAny{{{}}}", morphemes(m)),
            Condition::PreviousMorphemeIsAny(m) => {
                write!(out, "PreviousMorphemeIsAny{{{}}}", morphemes(m))
            }
            Condition::CurrentStateIsAny(s) => write!(out, "CurrentStateIsAny{{{}}}", states(s)),
            Condition::PreviousStateIsAny(s) => write!(out, "PreviousStateIsAny{{{}}}", states(s)),
            Condition::RootSurfaceIsAny(s) => write!(out, "RootSurfaceIsAny{{{}}}", s.join(", ")),
            Condition::LastDerivationIsAny(s) => write!(out, "LastDerivationIsAny{{{}}}", states(s)),
            Condition::CurrentGroupContainsAny(s) => {
                write!(out, "CurrentGroupContainsAny{{{}}}", states(s))
            }
            Condition::PreviousGroupContains(s) => write!(out, "PreviousGroupContains{{{}}}", states(s)),
            Condition::PreviousGroupContainsMorpheme(m) => {
                write!(out, "PreviousGroupContainsMorpheme{{{}}}", morphemes(m))
            }
            Condition::Not(inner) => {
                out.push_str("Not(");
                inner.describe_into(graph, out);
                out.push(')');
                Ok(())
            }
            Condition::And(all) | Condition::Or(all) => {
                let sep = if matches!(self, Condition::And(_)) { " AND " } else { " OR " };
                out.push('[');
                for (i, c) in all.iter().enumerate() {
                    if i > 0 {
                        out.push_str(sep);
                    }
                    c.describe_into(graph, out);
                }
                out.push(']');
                Ok(())
            }
        };
    }
}

/// Scan the inflectional group before the current one.
fn previous_group_contains(path: &SearchPath<'_>, mut matches: impl FnMut(StateId) -> bool) -> bool {
    let graph = path.graph;
    let mut steps = path.steps_rev();
    // walk back to the derivation that opened the current group
    loop {
        match steps.next() {
            Some(step) if step.parent.is_none() => return false,
            Some(step) if graph.state(step.state).derivative => break,
            Some(_) => {}
            None => return false,
        }
    }
    for step in steps {
        if step.parent.is_none() {
            break;
        }
        if matches(step.state) {
            return true;
        }
        if graph.state(step.state).derivative {
            return false;
        }
    }
    false
}
