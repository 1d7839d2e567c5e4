// Analysis formatters

use crate::analysis::{MorphemeData, SingleAnalysis};

/// Text renderings of a [`SingleAnalysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisFormat {
    /// `Noun + A3sg + Dat`
    LexicalSequence,
    /// `kitab:Noun + A3sg + a:Dat`
    SurfaceAndLexicalSequence,
    /// `kitab a`
    SurfaceSequence,
    /// `[kitap:Noun] kitab:Noun+A3sg+a:Dat`
    #[default]
    Default,
    /// `[kitap:Noun] Noun+A3sg+Dat`
    DefaultLexical,
    /// `kitap+Noun+A3sg+Dat`
    OflazerStyle,
}

impl AnalysisFormat {
    pub const ALL: [AnalysisFormat; 6] = [
        AnalysisFormat::LexicalSequence,
        AnalysisFormat::SurfaceAndLexicalSequence,
        AnalysisFormat::SurfaceSequence,
        AnalysisFormat::Default,
        AnalysisFormat::DefaultLexical,
        AnalysisFormat::OflazerStyle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnalysisFormat::LexicalSequence => "lexical",
            AnalysisFormat::SurfaceAndLexicalSequence => "surface-lexical",
            AnalysisFormat::SurfaceSequence => "surface",
            AnalysisFormat::Default => "default",
            AnalysisFormat::DefaultLexical => "default-lexical",
            AnalysisFormat::OflazerStyle => "oflazer",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn format(self, analysis: &SingleAnalysis) -> String {
        let morphemes = analysis.morphemes();
        match self {
            AnalysisFormat::LexicalSequence => morphemes
                .iter()
                .map(|m| m.morpheme.id.as_str())
                .collect::<Vec<_>>()
                .join(" + "),
            AnalysisFormat::SurfaceAndLexicalSequence => morphemes
                .iter()
                .map(MorphemeData::to_morpheme_string)
                .collect::<Vec<_>>()
                .join(" + "),
            AnalysisFormat::SurfaceSequence => morphemes
                .iter()
                .filter(|m| !m.surface.is_empty())
                .map(|m| m.surface.as_str())
                .collect::<Vec<_>>()
                .join(" "),
            AnalysisFormat::Default => default_form(analysis, true),
            AnalysisFormat::DefaultLexical => default_form(analysis, false),
            AnalysisFormat::OflazerStyle => oflazer(analysis),
        }
    }
}

fn dictionary_head(analysis: &SingleAnalysis) -> String {
    let item = analysis.item();
    if item.secondary_pos.is_unspecified() {
        format!("[{}:{}]", item.lemma, item.primary_pos.short_form())
    } else {
        format!(
            "[{}:{},{}]",
            item.lemma,
            item.primary_pos.short_form(),
            item.secondary_pos.short_form()
        )
    }
}

fn default_form(analysis: &SingleAnalysis, with_surface: bool) -> String {
    let mut out = dictionary_head(analysis);
    out.push(' ');
    let mut previous_derivational = false;
    for (i, m) in analysis.morphemes().iter().enumerate() {
        if i > 0 {
            if m.morpheme.derivational {
                out.push('|');
            } else if previous_derivational {
                out.push('→');
            } else {
                out.push('+');
            }
        }
        if with_surface {
            out.push_str(&m.to_morpheme_string());
        } else {
            out.push_str(&m.morpheme.id);
        }
        previous_derivational = m.morpheme.derivational;
    }
    out
}

fn oflazer_tag(id: &str) -> &str {
    match id {
        "Adv" => "Adverb",
        other => other,
    }
}

fn oflazer(analysis: &SingleAnalysis) -> String {
    let item = analysis.item();
    let mut out = item.normalized_lemma().to_string();
    for (g, group) in analysis.groups().into_iter().enumerate() {
        let morphemes = group.morphemes();
        if g == 0 {
            for (i, m) in morphemes.iter().enumerate() {
                out.push('+');
                out.push_str(oflazer_tag(&m.morpheme.id));
                if i == 0 && !item.secondary_pos.is_unspecified() {
                    out.push('+');
                    out.push_str(item.secondary_pos.short_form());
                }
            }
            continue;
        }
        // The POS of a derived group leads, then the derivation itself.
        out.push_str("^DB");
        let pos_index = morphemes.iter().position(|m| m.morpheme.pos.is_some());
        if let Some(p) = pos_index {
            out.push('+');
            out.push_str(oflazer_tag(&morphemes[p].morpheme.id));
        }
        for (i, m) in morphemes.iter().enumerate() {
            if Some(i) == pos_index {
                continue;
            }
            out.push('+');
            out.push_str(oflazer_tag(&m.morpheme.id));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::kitapligi;

    #[test]
    fn sequences() {
        let a = kitapligi();
        assert_eq!(
            AnalysisFormat::LexicalSequence.format(&a),
            "Noun + A3sg + Ness + Noun + A3sg + Dat"
        );
        assert_eq!(
            AnalysisFormat::SurfaceAndLexicalSequence.format(&a),
            "kitap:Noun + A3sg + lığ:Ness + Noun + A3sg + a:Dat"
        );
        assert_eq!(AnalysisFormat::SurfaceSequence.format(&a), "kitap lığ a");
    }

    #[test]
    fn default_marks_derivations() {
        let a = kitapligi();
        assert_eq!(
            AnalysisFormat::Default.format(&a),
            "[kitap:Noun] kitap:Noun+A3sg|lığ:Ness→Noun+A3sg+a:Dat"
        );
        assert_eq!(
            AnalysisFormat::DefaultLexical.format(&a),
            "[kitap:Noun] Noun+A3sg|Ness→Noun+A3sg+Dat"
        );
    }

    #[test]
    fn oflazer_style() {
        let a = kitapligi();
        assert_eq!(
            AnalysisFormat::OflazerStyle.format(&a),
            "kitap+Noun+A3sg^DB+Noun+Ness+A3sg+Dat"
        );
    }

    #[test]
    fn names_round_trip() {
        for f in AnalysisFormat::ALL {
            assert_eq!(AnalysisFormat::from_name(f.name()), Some(f));
        }
        assert_eq!(AnalysisFormat::from_name("xml"), None);
    }
}
