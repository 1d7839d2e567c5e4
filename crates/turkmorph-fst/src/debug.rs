// Search tracing
//
// The analyzer reports its progress to a `SearchTrace`. The unit type is the
// no-op trace used by plain `analyze`; every hook is an empty default method,
// so that path compiles down to the bare search. `AnalysisDebugData` records
// everything for `analyze_with_debug`.

use std::fmt;

use hashbrown::HashMap;

use crate::analysis::SingleAnalysis;
use crate::condition::Condition;
use crate::format::AnalysisFormat;
use crate::graph::{Graph, SuffixTransition};
use crate::path::{NodeId, SearchPath};
use crate::stem::StemTransition;
use crate::surface::SurfaceError;

/// Why a transition was not taken.
#[derive(Debug, Clone, Copy)]
pub enum Rejection<'a> {
    /// The input is consumed but the transition would add letters.
    EmptySurfaceExpected,
    /// The generated surface is not a prefix of the remaining input.
    SurfaceMismatch(&'a str),
    /// The failing part of the transition's condition.
    Condition(&'a Condition),
    /// No surface exists for the path's attributes.
    Harmony(&'a SurfaceError),
}

/// Observer of one search.
pub trait SearchTrace {
    fn candidates(&mut self, _graph: &Graph, _stems: &[StemTransition]) {}

    /// A path is about to be expanded.
    fn visit(&mut self, _path: &SearchPath<'_>) {}

    fn rejected(&mut self, _path: &SearchPath<'_>, _transition: &SuffixTransition, _reason: Rejection<'_>) {}

    fn accepted(&mut self, _path: &SearchPath<'_>) {}

    fn failed(&mut self, _path: &SearchPath<'_>, _reason: &'static str) {}

    /// Search is done; `paths` are the accepted ones, in result order.
    fn finished(&mut self, _paths: &[SearchPath<'_>], _results: &[SingleAnalysis]) {}
}

impl SearchTrace for () {}

// ---------------------------------------------------------------------------
// Recorded trace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTransition {
    pub transition: String,
    pub reason: String,
}

impl fmt::Display for RejectedTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.transition, self.reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    Open,
    Accepted,
    Failed(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugPath {
    pub path: String,
    pub status: PathStatus,
    pub rejected_transitions: Vec<RejectedTransition>,
}

/// Everything the search did for one input.
#[derive(Debug, Clone, Default)]
pub struct AnalysisDebugData {
    pub input: String,
    pub candidate_stem_transitions: Vec<String>,
    /// Every visited path, in visiting order.
    pub paths: Vec<DebugPath>,
    pub result_paths: Vec<String>,
    pub results: Vec<String>,
    slots: HashMap<NodeId, usize>,
}

impl AnalysisDebugData {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
            ..Self::default()
        }
    }

    fn slot(&mut self, path: &SearchPath<'_>) -> &mut DebugPath {
        let i = match self.slots.get(&path.id) {
            Some(&i) => i,
            None => {
                self.paths.push(DebugPath {
                    path: path.to_string(),
                    status: PathStatus::Open,
                    rejected_transitions: Vec::new(),
                });
                let i = self.paths.len() - 1;
                self.slots.insert(path.id, i);
                i
            }
        };
        &mut self.paths[i]
    }

    pub fn failed_paths(&self) -> impl Iterator<Item = &DebugPath> {
        self.paths
            .iter()
            .filter(|p| matches!(p.status, PathStatus::Failed(_)))
    }

    pub fn rejected_transitions(&self) -> impl Iterator<Item = &RejectedTransition> {
        self.paths.iter().flat_map(|p| p.rejected_transitions.iter())
    }

    /// Human-readable dump of the trace.
    pub fn detailed_info(&self) -> Vec<String> {
        let mut lines = vec![
            "----------------------".to_string(),
            format!("Debug data for input = {}", self.input),
        ];
        if self.candidate_stem_transitions.is_empty() {
            lines.push("No Stem Candidates. Analysis Failed.".to_string());
            return lines;
        }
        lines.push("Stem Candidate Transitions: ".to_string());
        lines.extend(self.candidate_stem_transitions.iter().map(|c| format!("  {c}")));
        lines.push("All paths:".to_string());
        for p in &self.paths {
            lines.push(match p.status {
                PathStatus::Open => format!("  {}", p.path),
                PathStatus::Accepted => format!("  {} Accepted", p.path),
                PathStatus::Failed(reason) => format!("  {} Fail → {reason}", p.path),
            });
            if !p.rejected_transitions.is_empty() {
                lines.push("    Failed Transitions:".to_string());
                lines.extend(p.rejected_transitions.iter().map(|r| format!("    {r}")));
            }
        }
        lines.push(format!(
            "Paths    [{}] (Surface + Morpheme State):",
            self.result_paths.len()
        ));
        lines.extend(self.result_paths.iter().map(|p| format!("  {p}")));
        lines.push(format!("Analyses [{}] (Surface + Morpheme):", self.results.len()));
        lines.extend(self.results.iter().map(|r| format!("  {r}")));
        lines
    }
}

impl fmt::Display for AnalysisDebugData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.detailed_info() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl SearchTrace for AnalysisDebugData {
    fn candidates(&mut self, graph: &Graph, stems: &[StemTransition]) {
        self.candidate_stem_transitions = stems.iter().map(|s| s.debug_form(graph)).collect();
    }

    fn visit(&mut self, path: &SearchPath<'_>) {
        self.slot(path);
    }

    fn rejected(&mut self, path: &SearchPath<'_>, transition: &SuffixTransition, reason: Rejection<'_>) {
        let reason = match reason {
            Rejection::EmptySurfaceExpected => "Empty surface expected.".to_string(),
            Rejection::SurfaceMismatch(surface) => format!("Surface mismatch: {surface}"),
            Rejection::Condition(c) => format!("Condition → {}", c.describe(path.graph)),
            Rejection::Harmony(e) => format!("Harmony fault: {e}"),
        };
        self.slot(path).rejected_transitions.push(RejectedTransition {
            transition: transition.to_string(),
            reason,
        });
    }

    fn accepted(&mut self, path: &SearchPath<'_>) {
        self.slot(path).status = PathStatus::Accepted;
    }

    fn failed(&mut self, path: &SearchPath<'_>, reason: &'static str) {
        self.slot(path).status = PathStatus::Failed(reason);
    }

    fn finished(&mut self, paths: &[SearchPath<'_>], results: &[SingleAnalysis]) {
        self.result_paths = paths.iter().map(ToString::to_string).collect();
        self.results = results
            .iter()
            .map(|r| AnalysisFormat::SurfaceAndLexicalSequence.format(r))
            .collect();
    }
}
