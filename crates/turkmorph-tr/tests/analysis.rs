//! Analysis tests against the built-in lexicon.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use turkmorph_core::{DictionaryItem, PrimaryPos, SecondaryPos};
use turkmorph_fst::{AnalysisFormat, SingleAnalysis, WordAnalysis};
use turkmorph_tr::{RootLexicon, TurkishMorphology};

fn morphology() -> &'static TurkishMorphology {
    static MORPHOLOGY: OnceLock<TurkishMorphology> = OnceLock::new();
    MORPHOLOGY.get_or_init(|| TurkishMorphology::with_default_lexicon().unwrap())
}

fn surfaces(result: &WordAnalysis) -> Vec<String> {
    result.iter().map(SingleAnalysis::format_surface).collect()
}

fn lexical_set(result: &WordAnalysis) -> BTreeSet<String> {
    result.iter().map(|a| a.format(AnalysisFormat::Default)).collect()
}

fn assert_has(word: &str, expected: &str) {
    let result = morphology().analyze(word);
    let found = surfaces(&result);
    assert!(
        found.iter().any(|s| s == expected),
        "{word}: expected `{expected}` in {found:?}"
    );
}

// ---------------------------------------------------------------------------
// Core scenarios
// ---------------------------------------------------------------------------

#[test]
fn voiced_stem_takes_vowel_suffix() {
    let result = morphology().analyze("kitaba");
    assert!(result.is_correct());
    for a in result.iter() {
        assert_eq!(a.stem(), "kitab", "{}", a.format_surface());
    }
    assert_has("kitaba", "kitab:Noun + A3sg + a:Dat");

    // the unvoiced stem keeps consonant suffixes
    assert_has("kitaplar", "kitap:Noun + lar:A3pl");
    assert!(!morphology().analyze("kitapa").is_correct());
}

#[test]
fn plural_locative() {
    let result = morphology().analyze("evlerde");
    let a = result
        .iter()
        .find(|a| a.format_surface() == "ev:Noun + ler:A3pl + de:Loc")
        .unwrap();
    let ids: Vec<&str> = a.morphemes().iter().map(|m| m.morpheme.id.as_str()).collect();
    assert_eq!(ids, ["Noun", "A3pl", "Loc"]);
    assert_eq!(a.surface_form(), "evlerde");
    assert_eq!(a.item().id, "ev_Noun");
}

#[test]
fn demek_stems() {
    let diyor = morphology().analyze("diyor");
    assert!(
        diyor
            .iter()
            .any(|a| a.stem() == "di" && a.contains_morpheme("Prog1") && a.item().lemma == "demek"),
        "{:?}",
        surfaces(&diyor)
    );

    let demiyor = morphology().analyze("demiyor");
    assert!(
        demiyor
            .iter()
            .any(|a| a.stem() == "de" && a.contains_morpheme("Neg") && a.contains_morpheme("Prog1")),
        "{:?}",
        surfaces(&demiyor)
    );

    assert_has("dedi", "de:Verb + di:Past + A3sg");
    assert_has("diyecek", "di:Verb + yecek:Fut + A3sg");
}

#[test]
fn empty_input_is_a_sentinel() {
    for input in ["", "   ", "\t"] {
        let result = morphology().analyze(input);
        assert!(result.is_empty_input(), "{input:?}");
        assert!(result.is_empty());
    }
}

#[test]
fn unknown_word_has_no_analyses() {
    let result = morphology().analyze("qxzqxz");
    assert!(!result.is_empty_input());
    assert!(result.is_empty());
    assert_eq!(result.normalized, "qxzqxz");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

const WORDS: &[&str] = &[
    "kitaba",
    "kitaplarımızdan",
    "evlerde",
    "evdeki",
    "elmalar",
    "masada",
    "güzeller",
    "gözlük",
    "meyveli",
    "geldim",
    "gideceğim",
    "okuyor",
    "arıyor",
    "yapmadı",
    "bakacaklar",
    "diyor",
    "demiyor",
    "bana",
    "sende",
    "içerde",
    "dışarda",
    "suyu",
    "zeytinyağında",
    "hakkı",
    "ağzı",
    "saate",
    "birbirleri",
    "hepsini",
];

#[test]
fn surfaces_reconstruct_the_input() {
    for word in WORDS {
        let result = morphology().analyze(word);
        assert!(result.is_correct(), "{word}: no analysis");
        for a in result.iter() {
            let joined: String = a.morphemes().iter().map(|m| m.surface.as_str()).collect();
            assert_eq!(joined, *word, "{}", a.format_surface());
            assert_eq!(a.surface_form(), *word);
        }
    }
}

#[test]
fn analysis_is_deterministic() {
    for word in WORDS {
        let first = lexical_set(&morphology().analyze(word));
        let second = lexical_set(&morphology().analyze(word));
        assert_eq!(first, second, "{word}");
    }
}

#[test]
fn no_duplicate_analyses() {
    for word in WORDS {
        let result = morphology().analyze(word);
        assert_eq!(lexical_set(&result).len(), result.len(), "{word}: {:?}", surfaces(&result));
    }
}

#[test]
fn concurrent_analysis() {
    let m = morphology();
    let expected: Vec<_> = WORDS.iter().map(|w| lexical_set(&m.analyze(w))).collect();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (word, want) in WORDS.iter().zip(&expected) {
                    assert_eq!(&lexical_set(&m.analyze(word)), want);
                }
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Word classes and irregular roots
// ---------------------------------------------------------------------------

#[test]
fn nouns() {
    assert_has("kitaplarımızdan", "kitap:Noun + lar:A3pl + ımız:P1pl + dan:Abl");
    assert_has("evdeki", "ev:Noun + A3sg + de:Loc + ki:Rel + Adj");
    assert_has("masada", "masa:Noun + A3sg + da:Loc");
    assert_has("meyveli", "meyve:Noun + A3sg + li:With + Adj");
    assert_has("gözlük", "göz:Noun + A3sg + lük:Ness + Noun + A3sg");
}

#[test]
fn root_modifiers() {
    assert_has("hakkı", "hakk:Noun + A3sg + ı:P3sg");
    assert_has("ağzı", "ağz:Noun + A3sg + ı:P3sg");
    assert_has("saate", "saat:Noun + A3sg + e:Dat");
    assert_has("renge", "reng:Noun + A3sg + e:Dat");
    assert!(!morphology().analyze("saata").is_correct());
}

#[test]
fn su_root() {
    assert_has("suyu", "su:Noun + A3sg + yu:P3sg");
    assert_has("suyun", "su:Noun + A3sg + yun:P2sg");
}

#[test]
fn verbs() {
    assert_has("geldim", "gel:Verb + di:Past + m:A1sg");
    assert_has("gideceğim", "gid:Verb + eceğ:Fut + im:A1sg");
    assert_has("okuyor", "ok:Verb + uyor:Prog1 + A3sg");
    assert_has("arıyor", "ar:Verb + ıyor:Prog1 + A3sg");
    assert_has("yapmadı", "yap:Verb + ma:Neg + dı:Past + A3sg");
    assert_has("bakacaklar", "bak:Verb + acak:Fut + lar:A3pl");
    assert_has("gelmiyor", "gel:Verb + m:Neg + iyor:Prog1 + A3sg");
}

#[test]
fn adjectives_derive_nouns() {
    let result = morphology().analyze("güzeller");
    assert!(
        result
            .iter()
            .any(|a| a.item().primary_pos == PrimaryPos::Adjective && a.contains_morpheme("Zero") && a.contains_morpheme("A3pl")),
        "{:?}",
        surfaces(&result)
    );
    assert_has("güzel", "güzel:Adj");
}

#[test]
fn irregular_pronouns() {
    assert_has("bana", "ban:Pron + A1sg + a:Dat");
    assert_has("sana", "san:Pron + A2sg + a:Dat");
    assert_has("sende", "sen:Pron + A2sg + de:Loc");

    let result = morphology().analyze("birbirleri");
    assert!(result.iter().any(|a| a.item().lemma == "birbiri"), "{:?}", surfaces(&result));
    let result = morphology().analyze("hepsini");
    assert!(result.iter().any(|a| a.item().lemma == "hepsi"), "{:?}", surfaces(&result));
}

#[test]
fn last_vowel_drop_adverbial_roots() {
    assert_has("içerde", "içer:Noun + A3sg + de:Loc");
    let result = morphology().analyze("dışarda");
    assert!(
        result
            .iter()
            .any(|a| a.stem() == "dışar" && a.item().lemma == "dışarı" && a.contains_morpheme("Loc")),
        "{:?}",
        surfaces(&result)
    );
}

#[test]
fn compound_words() {
    assert_has("zeytinyağında", "zeytinyağı:Noun + A3sg + P3sg + nda:Loc");

    // hidden compound roots are reported against the compound
    let result = morphology().analyze("zeytinyağları");
    assert!(result.is_correct());
    for a in result.iter() {
        assert_eq!(a.item().id, "zeytinyağı_Noun", "{}", a.format_surface());
    }
}

#[test]
fn closed_classes() {
    assert_has("ve", "ve:Conj");
    assert_has("hemen", "hemen:Adv");
    assert_has("için", "için:Postp");
    assert_has("mi", "mi:Ques + Pres + A3sg");
}

// ---------------------------------------------------------------------------
// Normalization, ASCII tolerance, runtime items
// ---------------------------------------------------------------------------

#[test]
fn input_is_normalized() {
    let result = morphology().analyze("Ankara'da");
    assert_eq!(result.input, "Ankara'da");
    assert_eq!(result.normalized, "ankara'da");
    assert!(result.iter().any(|a| a.item().lemma == "Ankara"), "{:?}", surfaces(&result));

    let upper = morphology().analyze("EVLERDE");
    assert_eq!(lexical_set(&upper), lexical_set(&morphology().analyze("evlerde")));

    // Turkish dotted capital
    assert!(morphology().analyze("İSTANBUL'A").is_correct());

    let dotted = morphology().analyze("ev.");
    assert_eq!(dotted.normalized, "ev");
    assert!(dotted.is_correct());
    assert_eq!(morphology().analyze(".").normalized, ".");
}

fn without_guesses() -> &'static TurkishMorphology {
    static MORPHOLOGY: OnceLock<TurkishMorphology> = OnceLock::new();
    MORPHOLOGY.get_or_init(|| TurkishMorphology::builder().guess_unidentified(false).build().unwrap())
}

#[test]
fn apostrophe_must_follow_the_stem() {
    let m = without_guesses();
    for word in ["kita'plar", "evl'erde", "Ankar'ada", "'evler", "evler'"] {
        let result = m.analyze(word);
        assert!(!result.is_correct(), "{word}: {:?}", surfaces(&result));
    }

    let result = m.analyze("kitap'lar");
    assert_eq!(result.normalized, "kitap'lar");
    assert!(surfaces(&result).iter().any(|s| s == "kitap:Noun + lar:A3pl"), "{:?}", surfaces(&result));
    assert!(result.iter().all(|a| a.item().primary_pos == PrimaryPos::Noun));

    // a possessive may move the quote inside the stem
    let result = m.analyze("zeytinyağ'ında");
    assert!(
        result.iter().any(|a| a.stem() == "zeytinyağı" && a.contains_morpheme("P3sg")),
        "{:?}",
        surfaces(&result)
    );
}

#[test]
fn proper_nouns_are_guessed() {
    let m = TurkishMorphology::with_default_lexicon().unwrap();
    let before = m.index().len();
    let result = m.analyze("Mehmet'e");
    assert!(result.is_correct());
    let a = result
        .iter()
        .find(|a| a.format_surface() == "mehmet:Noun + A3sg + e:Dat")
        .unwrap_or_else(|| panic!("{:?}", surfaces(&result)));
    assert_eq!(a.item().lemma, "Mehmet");
    assert_eq!(a.item().secondary_pos, SecondaryPos::ProperNoun);
    assert!(a.is_runtime());
    assert_eq!(m.index().len(), before);

    // consonant-only stems are read by their letter names
    let result = m.analyze("TRT'ye");
    assert!(result.iter().any(|a| a.stem() == "trt" && a.contains_morpheme("Dat")), "{:?}", surfaces(&result));

    assert!(!m.analyze("Mehmete").is_correct());
    assert!(!without_guesses().analyze("Mehmet'e").is_correct());
}

#[test]
fn numerals_are_guessed() {
    let m = morphology();

    let result = m.analyze("3'te");
    let a = result
        .iter()
        .find(|a| a.contains_morpheme("Loc"))
        .unwrap_or_else(|| panic!("{:?}", surfaces(&result)));
    assert_eq!(a.stem(), "3");
    assert_eq!(a.item().lemma, "3");
    assert_eq!(a.item().primary_pos, PrimaryPos::Numeral);
    assert_eq!(a.item().secondary_pos, SecondaryPos::Cardinal);

    assert!(m.analyze("1990'larda").iter().any(|a| a.stem() == "1990" && a.contains_morpheme("A3pl")));
    assert!(m.analyze("4'e").iter().any(|a| a.stem() == "4" && a.contains_morpheme("Dat")));
    assert!(m.analyze("3").iter().any(|a| a.format_surface() == "3:Num"));

    let ordinal = m.analyze("3.'de");
    assert!(
        ordinal
            .iter()
            .any(|a| a.item().secondary_pos == SecondaryPos::Ordinal && a.contains_morpheme("Loc")),
        "{:?}",
        surfaces(&ordinal)
    );

    assert!(!without_guesses().analyze("3'te").is_correct());
}

#[test]
fn concurrent_guesses() {
    let m = morphology();
    let words = ["Mehmet'e", "Ayşe'nin", "3'te", "Mehmet'ten"];
    let expected: Vec<_> = words.iter().map(|w| lexical_set(&m.analyze(w))).collect();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..10 {
                    for (word, want) in words.iter().zip(&expected) {
                        assert_eq!(&lexical_set(&m.analyze(word)), want, "{word}");
                    }
                }
            });
        }
    });
}

#[test]
fn ascii_tolerant_analysis() {
    let strict = morphology();
    assert!(!strict.analyze("gozlerde").is_correct());

    let tolerant = TurkishMorphology::builder().ascii_tolerant(true).build().unwrap();
    let result = tolerant.analyze("gozlerde");
    assert!(
        result.iter().any(|a| a.item().lemma == "göz" && a.stem() == "göz"),
        "{:?}",
        surfaces(&result)
    );
    assert!(tolerant.analyze("guzel").iter().any(|a| a.item().lemma == "güzel"));
}

#[test]
fn runtime_dictionary_items() {
    let m = TurkishMorphology::builder().guess_unidentified(false).build().unwrap();
    assert!(!m.analyze("Ahmet'e").is_correct());

    let item = DictionaryItem::new("Ahmet", "ahmet", "ahmet", PrimaryPos::Noun, SecondaryPos::ProperNoun, vec![]);
    assert_eq!(m.add_dictionary_item(item.clone()).unwrap(), 1);
    let result = m.analyze("Ahmet'e");
    assert!(
        result.iter().any(|a| a.format_surface() == "ahmet:Noun + A3sg + e:Dat"),
        "{:?}",
        surfaces(&result)
    );

    assert!(m.remove_dictionary_item(&item));
    assert!(!m.analyze("Ahmet'e").is_correct());
    assert!(!m.remove_dictionary_item(&item));
}

#[test]
fn items_change_while_analyzing() {
    let m = TurkishMorphology::builder().guess_unidentified(false).build().unwrap();
    let expected: Vec<_> = WORDS.iter().map(|w| lexical_set(&m.analyze(w))).collect();
    let item = DictionaryItem::new("Zeynep", "zeynep", "zeynep", PrimaryPos::Noun, SecondaryPos::ProperNoun, vec![]);
    std::thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..50 {
                assert!(m.add_dictionary_item(item.clone()).unwrap() > 0);
                assert!(m.remove_dictionary_item(&item));
            }
        });
        for _ in 0..3 {
            scope.spawn(|| {
                for _ in 0..5 {
                    for (word, want) in WORDS.iter().zip(&expected) {
                        assert_eq!(&lexical_set(&m.analyze(word)), want, "{word}");
                    }
                    // either absent or fully indexed
                    let found = m.analyze("Zeynep'e");
                    assert!(found.is_empty() || found.iter().any(|a| a.stem() == "zeynep"));
                }
            });
        }
    });
    assert!(!m.index().contains(&item));
    assert!(!m.analyze("Zeynep'e").is_correct());
}

#[test]
fn custom_lexicon() {
    let lexicon = RootLexicon::parse("kalem\nyazmak\n").unwrap();
    let m = TurkishMorphology::builder().lexicon(lexicon).build().unwrap();
    assert_eq!(m.lexicon().len(), 2);
    assert!(m.analyze("kalemler").is_correct());
    assert!(m.analyze("yazdık").is_correct());
    assert!(!m.analyze("evler").is_correct());
}

#[test]
fn bad_items_are_skipped() {
    // a voicing root without a voiceable final letter cannot produce stems
    let lexicon = RootLexicon::parse("kalem [A:Voicing]\nev\n").unwrap();
    let m = TurkishMorphology::builder().lexicon(lexicon).build().unwrap();
    assert!(m.analyze("evde").is_correct());
    assert!(!m.analyze("kalemde").is_correct());
}

// ---------------------------------------------------------------------------
// Views, formats and debug data
// ---------------------------------------------------------------------------

fn kitaplarda() -> SingleAnalysis {
    morphology()
        .analyze("kitaplarda")
        .iter()
        .find(|a| a.format_surface() == "kitap:Noun + lar:A3pl + da:Loc")
        .cloned()
        .unwrap()
}

#[test]
fn formats() {
    let a = kitaplarda();
    assert_eq!(a.format(AnalysisFormat::LexicalSequence), "Noun + A3pl + Loc");
    assert_eq!(a.format(AnalysisFormat::SurfaceSequence), "kitap lar da");
    assert_eq!(a.format(AnalysisFormat::Default), "[kitap:Noun] kitap:Noun+lar:A3pl+da:Loc");
    assert_eq!(a.format(AnalysisFormat::DefaultLexical), "[kitap:Noun] Noun+A3pl+Loc");
    assert_eq!(a.format(AnalysisFormat::OflazerStyle), "kitap+Noun+A3pl+Loc");
}

#[test]
fn derivation_formats() {
    let result = morphology().analyze("gözlük");
    let a = result
        .iter()
        .find(|a| a.contains_morpheme("Ness"))
        .unwrap();
    assert_eq!(a.group_count(), 2);
    assert_eq!(a.stems(), ["göz", "gözlük"]);
    assert_eq!(a.format(AnalysisFormat::Default), "[göz:Noun] göz:Noun+A3sg|lük:Ness→Noun+A3sg");
    assert_eq!(a.format(AnalysisFormat::OflazerStyle), "göz+Noun+A3sg^DB+Noun+Ness+A3sg");
}

#[test]
fn json_view() {
    let view = kitaplarda().view();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["item_id"], "kitap_Noun");
    assert_eq!(json["lemma"], "kitap");
    assert_eq!(json["primary_pos"], "Noun");
    assert!(json.get("secondary_pos").is_none());
    assert_eq!(json["morphemes"][1]["id"], "A3pl");
    assert_eq!(json["morphemes"][1]["surface"], "lar");
    assert_eq!(json["formatted"], "[kitap:Noun] kitap:Noun+lar:A3pl+da:Loc");
}

#[test]
fn lemmas_start_from_dictionary_root() {
    let result = morphology().analyze("gideceğim");
    let a = result.iter().find(|a| a.contains_morpheme("Fut")).unwrap();
    assert_eq!(a.stem(), "gid");
    assert_eq!(a.lemmas()[0], "git");
}

#[test]
fn debug_trace() {
    let (result, debug) = morphology().analyze_with_debug("kitaba");
    assert!(result.is_correct());
    let info = debug.detailed_info();
    assert!(!info.is_empty());
    assert!(debug.rejected_transitions().next().is_some());

    let (empty, _) = morphology().analyze_with_debug(" ");
    assert!(empty.is_empty_input());
}
