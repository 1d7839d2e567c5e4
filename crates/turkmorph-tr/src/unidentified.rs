// Guesses for tokens the lexicon does not cover
//
// Run only when regular analysis finds nothing:
// - a token with digits is read through the numeral word its trailing digits
//   spell (`3'te` as `üçte`, `1990'larda` as `doksanlarda`) and reported
//   against a runtime numeral item spelled with the digits;
// - any other token with an apostrophe is read as a proper noun: a runtime
//   item for the part before the quote is indexed while the word is analyzed
//   and removed afterwards.
//
// Proper noun guesses hold a lock for the whole add/analyze/remove cycle, so
// two guesses never share or remove each other's item. Concurrent regular
// analyses may see the transient item while it is indexed.

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use regex::Regex;
use turkmorph_core::{DictionaryItem, PrimaryPos, RootAttribute, SecondaryPos, alphabet};
use turkmorph_fst::SingleAnalysis;

use crate::handle::TurkishMorphology;
use crate::numerals::{last_numeral_word, ordinal_of};

/// Shapes of digit tokens and the secondary POS each one gets.
const NUMERAL_SHAPES: [(&str, SecondaryPos); 8] = [
    (r"^[+\-]?[0-9]+$", SecondaryPos::Cardinal),
    (r"^[+\-]?[0-9]+[.]$", SecondaryPos::Ordinal),
    (r"^[+\-]?[0-9]+-[0-9]+$", SecondaryPos::Range),
    (r"^[+\-]?[0-9]+/[0-9]+$", SecondaryPos::Ratio),
    (r"^[+\-]?[0-9]+[,.][0-9]+$", SecondaryPos::Real),
    (r"(^|[+\-])%[0-9]+([.,][0-9]+)?$", SecondaryPos::Percentage),
    (r"^([012][0-9]|[1-9])[.:][0-5][0-9]$", SecondaryPos::Clock),
    (r"^([0-3][0-9]|[1-9])[./]([01][0-9]|[1-9])[./][0-9]{4}$", SecondaryPos::Date),
];

/// Proper noun and numeral guesser.
#[derive(Debug)]
pub struct UnidentifiedTokenAnalyzer {
    numeral_shapes: Vec<(Regex, SecondaryPos)>,
    guess: Mutex<()>,
}

impl UnidentifiedTokenAnalyzer {
    pub fn new() -> Result<Self, regex::Error> {
        let numeral_shapes = NUMERAL_SHAPES
            .iter()
            .map(|(pattern, spos)| Ok((Regex::new(pattern)?, *spos)))
            .collect::<Result<_, regex::Error>>()?;
        Ok(Self {
            numeral_shapes,
            guess: Mutex::new(()),
        })
    }

    /// Guessed analyses of the raw token `word`.
    pub fn analyze(&self, morphology: &TurkishMorphology, word: &str) -> Vec<SingleAnalysis> {
        let word = alphabet::normalize_apostrophes(word.trim());
        if word.contains('?') {
            Vec::new()
        } else if word.chars().any(|c| c.is_ascii_digit()) {
            self.numeral(morphology, &word)
        } else if word.contains('\'') {
            self.proper_noun(morphology, &word)
        } else {
            Vec::new()
        }
    }

    fn proper_noun(&self, morphology: &TurkishMorphology, word: &str) -> Vec<SingleAnalysis> {
        let Some((stem, ending)) = split_at_apostrophe(word) else {
            return Vec::new();
        };
        let root: String = alphabet::to_lowercase(stem).chars().filter(|c| *c != '.').collect();
        let ending: String = alphabet::to_lowercase(ending).chars().filter(|c| *c != '\'').collect();
        let pronunciation = if alphabet::contains_vowel(&root) {
            root.clone()
        } else {
            alphabet::spell_out(&root)
        };
        if !alphabet::contains_vowel(&pronunciation) {
            return Vec::new();
        }

        let item = DictionaryItem::new(
            alphabet::capitalize(stem),
            root.as_str(),
            pronunciation,
            PrimaryPos::Noun,
            SecondaryPos::ProperNoun,
            vec![RootAttribute::Runtime],
        );
        let input = format!("{root}{ending}");
        let analyses = self.with_runtime_item(morphology, item, |m| m.search(&input));
        analyses.into_iter().filter(|a| a.stem() == root).collect()
    }

    /// Run `f` with `item` indexed. An item that is already indexed is left
    /// in place.
    fn with_runtime_item<T>(
        &self,
        morphology: &TurkishMorphology,
        item: DictionaryItem,
        f: impl FnOnce(&TurkishMorphology) -> T,
    ) -> T {
        let _guess = self.guess.lock();
        if morphology.index().contains(&item) {
            return f(morphology);
        }
        if let Err(e) = morphology.add_dictionary_item(item.clone()) {
            debug!("cannot index runtime item {}: {e}", item.id);
            return f(morphology);
        }
        let result = f(morphology);
        morphology.remove_dictionary_item(&item);
        result
    }

    fn numeral(&self, morphology: &TurkishMorphology, word: &str) -> Vec<SingleAnalysis> {
        let lower = alphabet::to_lowercase(word);
        let (stem, ending) = split_numeral(&lower);
        let cardinal = last_numeral_word(stem.strip_suffix('.').unwrap_or(stem));
        let lemma = match (cardinal, stem.ends_with('.')) {
            (Some(c), true) => ordinal_of(c),
            (c, false) => c,
            (None, true) => None,
        };
        let Some(lemma) = lemma else {
            return Vec::new();
        };
        let ending: String = ending.chars().filter(|c| *c != '\'').collect();
        let input = if lemma == "dört" && ending.starts_with(alphabet::is_vowel) {
            format!("dörd{ending}")
        } else {
            format!("{lemma}{ending}")
        };

        let analyses: Vec<SingleAnalysis> = morphology
            .search(&input)
            .into_iter()
            .filter(|a| a.item().primary_pos == PrimaryPos::Numeral)
            .collect();
        let mut results = Vec::new();
        for (shape, spos) in &self.numeral_shapes {
            if !shape.is_match(stem) {
                continue;
            }
            let item = Arc::new(DictionaryItem::new(
                stem,
                stem,
                format!("{lower}{lemma}"),
                PrimaryPos::Numeral,
                *spos,
                vec![RootAttribute::Runtime],
            ));
            results.extend(analyses.iter().map(|a| a.copy_for(Arc::clone(&item), stem)));
        }
        results
    }
}

/// `Ankara'da` → (`Ankara`, `da`). `None` when the quote starts or ends the
/// word.
fn split_at_apostrophe(word: &str) -> Option<(&str, &str)> {
    let (stem, ending) = word.split_once('\'')?;
    (!stem.is_empty() && !ending.is_empty()).then_some((stem, ending))
}

/// `3'te` → (`3`, `te`), `1990larda` → (`1990`, `larda`), `3.` → (`3.`, ``).
/// Without a quote, the ending is the run of non-digits at the end, stopping
/// at a dot.
fn split_numeral(s: &str) -> (&str, &str) {
    if let Some(split) = s.split_once('\'') {
        return split;
    }
    let cut = s
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_ascii_digit() || *c == '.')
        .map_or(0, |(i, c)| i + c.len_utf8());
    s.split_at(cut)
}
