// Turkish stem generation
//
// Turns a dictionary item into the spellings its root takes at the start of
// a word: `kitap`/`kitab`, `ağız`/`ağz`, `ara`/`ar`. Irregular roots are not
// computed. They come from `IRREGULAR_ROOTS`, which names each extra spelling
// and the state it enters.

use std::sync::Arc;

use turkmorph_core::alphabet;
use turkmorph_core::phonetics::attributes_of;
use turkmorph_core::{DictionaryItem, PhoneticAttribute, PhoneticAttributes, PrimaryPos, RootAttribute};
use turkmorph_fst::{Morphotactics, StateId, StemError, StemGenerator, StemTransition};

use crate::morphotactics::TurkishMorphotactics;

// ---------------------------------------------------------------------------
// Irregular roots
// ---------------------------------------------------------------------------

/// How an irregular root is spelled besides its dictionary root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrregularRoot {
    /// `içeri` → `içer-de`: the last vowel drops and the short form enters
    /// the given state.
    LastVowelDropped { state: &'static str },
    /// `ben` → `ban-a`.
    ModifiedPronoun { modified: &'static str },
    /// `demek` → `de-r`, `di-yor`: both spellings enter the de/ye root.
    DeYe { modified: &'static str },
    /// `imek` → `i-di`, `i-miş`.
    Imek,
    /// `birbiri` → `birbir-leri`.
    ModifiedQuantifier { modified: &'static str },
}

const NOUN_LVD: &str = "nounLastVowelDropRoot_S";
const ADJ_LVD: &str = "adjLastVowelDropRoot_S";

/// Items whose stems are listed here instead of being derived from their
/// root attributes.
pub const IRREGULAR_ROOTS: &[(&str, IrregularRoot)] = &[
    ("içeri_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("içeri_Adj", IrregularRoot::LastVowelDropped { state: ADJ_LVD }),
    ("dışarı_Adj", IrregularRoot::LastVowelDropped { state: ADJ_LVD }),
    ("dışarı_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("dışarı_Postp", IrregularRoot::LastVowelDropped { state: ADJ_LVD }),
    ("yukarı_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("yukarı_Adj", IrregularRoot::LastVowelDropped { state: ADJ_LVD }),
    ("ileri_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("şura_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("bura_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("ora_Noun", IrregularRoot::LastVowelDropped { state: NOUN_LVD }),
    ("ben_Pron_Pers", IrregularRoot::ModifiedPronoun { modified: "ban" }),
    ("sen_Pron_Pers", IrregularRoot::ModifiedPronoun { modified: "san" }),
    ("demek_Verb", IrregularRoot::DeYe { modified: "di" }),
    ("yemek_Verb", IrregularRoot::DeYe { modified: "yi" }),
    ("imek_Verb", IrregularRoot::Imek),
    ("birbiri_Pron_Quant", IrregularRoot::ModifiedQuantifier { modified: "birbir" }),
    ("çoğu_Pron_Quant", IrregularRoot::ModifiedQuantifier { modified: "çok" }),
    ("öbürü_Pron_Quant", IrregularRoot::ModifiedQuantifier { modified: "öbür" }),
    ("birçoğu_Pron_Quant", IrregularRoot::ModifiedQuantifier { modified: "birçok" }),
];

pub fn irregular_root(id: &str) -> Option<IrregularRoot> {
    IRREGULAR_ROOTS
        .iter()
        .find(|(item, _)| *item == id)
        .map(|(_, root)| *root)
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Stem generator for Turkish dictionary items.
pub struct TurkishStemGenerator {
    morphotactics: Arc<TurkishMorphotactics>,
}

impl TurkishStemGenerator {
    pub fn new(morphotactics: Arc<TurkishMorphotactics>) -> Self {
        Self { morphotactics }
    }

    pub fn morphotactics(&self) -> &Arc<TurkishMorphotactics> {
        &self.morphotactics
    }

    fn named_state(&self, item: &DictionaryItem, name: &str) -> Result<StateId, StemError> {
        self.morphotactics
            .state(name)
            .ok_or_else(|| StemError::MissingState {
                item: item.id.clone(),
                state: name.to_string(),
            })
    }

    fn transition(
        &self,
        surface: &str,
        item: &Arc<DictionaryItem>,
        attributes: PhoneticAttributes,
        state: Option<StateId>,
    ) -> StemTransition {
        let state = state.unwrap_or_else(|| self.morphotactics.root_state(item, attributes));
        StemTransition::new(surface, Arc::clone(item), attributes, state)
    }

    fn irregular(&self, item: &Arc<DictionaryItem>, root: IrregularRoot) -> Result<Vec<StemTransition>, StemError> {
        use PhoneticAttribute::*;

        let original = attributes_of(&item.pronunciation);
        let transitions = match root {
            IrregularRoot::LastVowelDropped { state } => {
                let mut chars = item.root.chars();
                chars.next_back();
                let dropped = chars.as_str();
                let attrs = attributes_of(dropped).with(ExpectsConsonant).with(CannotTerminate);
                vec![
                    self.transition(&item.root, item, original, None),
                    self.transition(dropped, item, attrs, Some(self.named_state(item, state)?)),
                ]
            }
            IrregularRoot::ModifiedPronoun { modified } => {
                let attrs = attributes_of(modified).with(ModifiedPronoun);
                vec![
                    self.transition(&item.root, item, original.with(UnModifiedPronoun), None),
                    self.transition(modified, item, attrs, Some(self.named_state(item, "pronPers_Mod_S")?)),
                ]
            }
            IrregularRoot::DeYe { modified } => {
                let state = self.named_state(item, "vDeYeRoot_S")?;
                vec![
                    self.transition(&item.root, item, original, Some(state)),
                    self.transition(modified, item, attributes_of(modified), Some(state)),
                ]
            }
            IrregularRoot::Imek => {
                let state = self.named_state(item, "imekRoot_S")?;
                vec![self.transition(&item.root, item, original, Some(state))]
            }
            IrregularRoot::ModifiedQuantifier { modified } => {
                let attrs = attributes_of(modified).with(ModifiedPronoun);
                vec![
                    self.transition(
                        &item.root,
                        item,
                        original.with(UnModifiedPronoun),
                        Some(self.named_state(item, "pronQuant_S")?),
                    ),
                    self.transition(
                        modified,
                        item,
                        attrs,
                        Some(self.named_state(item, "pronQuantModified_S")?),
                    ),
                ]
            }
        };
        Ok(transitions)
    }

    /// Stems computed from the root attributes: the dictionary spelling plus,
    /// for modifier attributes, one phonetically modified spelling.
    fn regular(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>, StemError> {
        use PhoneticAttribute::*;

        let mut original_attrs = attributes_of(&item.pronunciation);
        if !item.attributes.iter().any(|a| a.is_modifier()) {
            return Ok(vec![self.transition(&item.root, item, original_attrs, None)]);
        }

        let mut modified: Vec<char> = item.pronunciation.chars().collect();
        let mut modified_attrs = original_attrs;
        let mut original_state = None;
        let mut modified_state = None;

        for attr in &item.attributes {
            match attr {
                RootAttribute::Voicing => {
                    let Some(&last) = modified.last() else {
                        return Err(StemError::EmptyRoot { item: item.id.clone() });
                    };
                    let voiced = if item.lemma.ends_with("nk") && last == 'k' {
                        Some('g')
                    } else {
                        alphabet::voice(last)
                    };
                    let Some(voiced) = voiced else {
                        return Err(StemError::Voicing {
                            item: item.id.clone(),
                            root: item.root.clone(),
                        });
                    };
                    if let Some(l) = modified.last_mut() {
                        *l = voiced;
                    }
                    modified_attrs.remove(LastLetterVoicelessStop);
                    original_attrs.insert(ExpectsConsonant);
                    modified_attrs.insert(ExpectsVowel);
                    modified_attrs.insert(CannotTerminate);
                }
                RootAttribute::Doubling => {
                    let Some(&last) = modified.last() else {
                        return Err(StemError::EmptyRoot { item: item.id.clone() });
                    };
                    modified.push(last);
                    original_attrs.insert(ExpectsConsonant);
                    modified_attrs.insert(ExpectsVowel);
                    modified_attrs.insert(CannotTerminate);
                }
                RootAttribute::LastVowelDrop => {
                    let Some(&last) = modified.last() else {
                        return Err(StemError::EmptyRoot { item: item.id.clone() });
                    };
                    if alphabet::is_vowel(last) {
                        modified.pop();
                        modified_attrs.insert(ExpectsConsonant);
                        modified_attrs.insert(CannotTerminate);
                    } else if modified.len() > 1 {
                        modified.remove(modified.len() - 2);
                        if item.primary_pos != PrimaryPos::Verb {
                            original_attrs.insert(ExpectsConsonant);
                        } else {
                            original_state = Some(self.named_state(item, "verbLastVowelDropUnmodRoot_S")?);
                            modified_state = Some(self.named_state(item, "verbLastVowelDropModRoot_S")?);
                        }
                        modified_attrs.insert(ExpectsVowel);
                        modified_attrs.insert(CannotTerminate);
                    }
                }
                RootAttribute::InverseHarmony => {
                    for attrs in [&mut original_attrs, &mut modified_attrs] {
                        attrs.insert(LastVowelFrontal);
                        attrs.remove(LastVowelBack);
                    }
                }
                RootAttribute::ProgressiveVowelDrop => {
                    if modified.len() > 1 {
                        modified.pop();
                        let shortened: String = modified.iter().collect();
                        if alphabet::contains_vowel(&shortened) {
                            modified_attrs = attributes_of(&shortened);
                        }
                        modified_attrs.insert(LastLetterDropped);
                    }
                }
                _ => {}
            }
        }

        let modified: String = modified.into_iter().collect();
        let original = self.transition(&item.root, item, original_attrs, original_state);
        if modified == item.root {
            return Ok(vec![original]);
        }
        let modified = self.transition(&modified, item, modified_attrs, modified_state);
        Ok(vec![original, modified])
    }
}

impl StemGenerator for TurkishStemGenerator {
    fn generate(&self, item: &Arc<DictionaryItem>) -> Result<Vec<StemTransition>, StemError> {
        if item.root.is_empty() {
            return Err(StemError::EmptyRoot { item: item.id.clone() });
        }
        match irregular_root(&item.id) {
            Some(root) => self.irregular(item, root),
            None => self.regular(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turkmorph_core::SecondaryPos;
    use turkmorph_fst::Morphotactics;

    fn generator() -> TurkishStemGenerator {
        TurkishStemGenerator::new(Arc::new(TurkishMorphotactics::new().unwrap()))
    }

    fn item(lemma: &str, root: &str, pos: PrimaryPos, spos: SecondaryPos, attrs: Vec<RootAttribute>) -> Arc<DictionaryItem> {
        Arc::new(DictionaryItem::new(lemma, root, root, pos, spos, attrs))
    }

    fn noun(lemma: &str, attrs: Vec<RootAttribute>) -> Arc<DictionaryItem> {
        item(lemma, lemma, PrimaryPos::Noun, SecondaryPos::None, attrs)
    }

    fn surfaces(stems: &[StemTransition]) -> Vec<&str> {
        stems.iter().map(|s| &*s.surface).collect()
    }

    fn state_name<'a>(g: &'a TurkishStemGenerator, stem: &StemTransition) -> &'a str {
        &g.morphotactics().graph().state(stem.state).id
    }

    #[test]
    fn plain_root_has_one_stem() {
        let g = generator();
        let stems = g.generate(&noun("elma", vec![])).unwrap();
        assert_eq!(surfaces(&stems), ["elma"]);
        assert_eq!(state_name(&g, &stems[0]), "noun_S");
        assert_eq!(stems[0].attributes, attributes_of("elma"));
    }

    #[test]
    fn voicing() {
        let g = generator();
        let stems = g.generate(&noun("kitap", vec![RootAttribute::Voicing])).unwrap();
        assert_eq!(surfaces(&stems), ["kitap", "kitab"]);
        assert!(stems[0].attributes.contains(PhoneticAttribute::ExpectsConsonant));
        assert!(stems[1].attributes.contains(PhoneticAttribute::ExpectsVowel));
        assert!(stems[1].attributes.contains(PhoneticAttribute::CannotTerminate));
        assert!(!stems[1].attributes.contains(PhoneticAttribute::LastLetterVoicelessStop));

        let stems = g.generate(&noun("renk", vec![RootAttribute::Voicing])).unwrap();
        assert_eq!(surfaces(&stems), ["renk", "reng"]);
    }

    #[test]
    fn voicing_without_voiced_form_fails() {
        let g = generator();
        let err = g.generate(&noun("kalem", vec![RootAttribute::Voicing])).unwrap_err();
        assert!(matches!(err, StemError::Voicing { .. }));
    }

    #[test]
    fn doubling_and_last_vowel_drop() {
        let g = generator();
        let stems = g.generate(&noun("hak", vec![RootAttribute::Doubling])).unwrap();
        assert_eq!(surfaces(&stems), ["hak", "hakk"]);

        let stems = g.generate(&noun("ağız", vec![RootAttribute::LastVowelDrop])).unwrap();
        assert_eq!(surfaces(&stems), ["ağız", "ağz"]);
        assert!(stems[0].attributes.contains(PhoneticAttribute::ExpectsConsonant));
        assert!(stems[1].attributes.contains(PhoneticAttribute::ExpectsVowel));
    }

    #[test]
    fn verb_last_vowel_drop_uses_dedicated_roots() {
        let g = generator();
        let kavur = item("kavurmak", "kavur", PrimaryPos::Verb, SecondaryPos::None, vec![RootAttribute::LastVowelDrop]);
        let stems = g.generate(&kavur).unwrap();
        assert_eq!(surfaces(&stems), ["kavur", "kavr"]);
        assert_eq!(state_name(&g, &stems[0]), "verbLastVowelDropUnmodRoot_S");
        assert_eq!(state_name(&g, &stems[1]), "verbLastVowelDropModRoot_S");
    }

    #[test]
    fn progressive_vowel_drop() {
        let g = generator();
        let ara = item(
            "aramak",
            "ara",
            PrimaryPos::Verb,
            SecondaryPos::None,
            vec![RootAttribute::ProgressiveVowelDrop],
        );
        let stems = g.generate(&ara).unwrap();
        assert_eq!(surfaces(&stems), ["ara", "ar"]);
        assert_eq!(state_name(&g, &stems[0]), "verbRoot_S");
        assert_eq!(state_name(&g, &stems[1]), "verbRoot_VowelDrop_S");
        assert!(stems[1].attributes.contains(PhoneticAttribute::LastLetterDropped));
    }

    #[test]
    fn inverse_harmony_collapses_to_one_stem() {
        let g = generator();
        let stems = g.generate(&noun("saat", vec![RootAttribute::InverseHarmony])).unwrap();
        assert_eq!(surfaces(&stems), ["saat"]);
        assert!(stems[0].attributes.contains(PhoneticAttribute::LastVowelFrontal));
        assert!(!stems[0].attributes.contains(PhoneticAttribute::LastVowelBack));
    }

    #[test]
    fn irregular_pronouns() {
        let g = generator();
        let ben = item("ben", "ben", PrimaryPos::Pronoun, SecondaryPos::PersonalPron, vec![]);
        let stems = g.generate(&ben).unwrap();
        assert_eq!(surfaces(&stems), ["ben", "ban"]);
        assert_eq!(state_name(&g, &stems[0]), "pronPers_S");
        assert_eq!(state_name(&g, &stems[1]), "pronPers_Mod_S");
        assert!(stems[0].attributes.contains(PhoneticAttribute::UnModifiedPronoun));
        assert!(stems[1].attributes.contains(PhoneticAttribute::ModifiedPronoun));

        let cogu = item("çoğu", "çoğu", PrimaryPos::Pronoun, SecondaryPos::QuantitivePron, vec![]);
        let stems = g.generate(&cogu).unwrap();
        assert_eq!(surfaces(&stems), ["çoğu", "çok"]);
        assert_eq!(state_name(&g, &stems[1]), "pronQuantModified_S");
    }

    #[test]
    fn irregular_verbs_and_locatives() {
        let g = generator();
        let demek = item("demek", "de", PrimaryPos::Verb, SecondaryPos::None, vec![]);
        let stems = g.generate(&demek).unwrap();
        assert_eq!(surfaces(&stems), ["de", "di"]);
        assert!(stems.iter().all(|s| state_name(&g, s) == "vDeYeRoot_S"));

        let iceri = noun("içeri", vec![]);
        let stems = g.generate(&iceri).unwrap();
        assert_eq!(surfaces(&stems), ["içeri", "içer"]);
        assert_eq!(state_name(&g, &stems[1]), "nounLastVowelDropRoot_S");
        assert!(stems[1].attributes.contains(PhoneticAttribute::CannotTerminate));
    }

    #[test]
    fn empty_root_is_an_error() {
        let g = generator();
        let err = g.generate(&noun("", vec![])).unwrap_err();
        assert!(matches!(err, StemError::EmptyRoot { .. }));
    }

    #[test]
    fn irregular_table_has_unique_items() {
        for (i, (id, _)) in IRREGULAR_ROOTS.iter().enumerate() {
            assert!(IRREGULAR_ROOTS[i + 1..].iter().all(|(other, _)| other != id), "{id}");
        }
        assert_eq!(irregular_root("imek_Verb"), Some(IrregularRoot::Imek));
        assert_eq!(irregular_root("kitap_Noun"), None);
    }
}
