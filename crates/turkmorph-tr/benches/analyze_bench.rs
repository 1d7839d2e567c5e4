// Criterion benchmarks for turkmorph-tr.
//
// All benchmarks run against the built-in lexicon.
//
// Run:
//   cargo bench -p turkmorph-tr

use criterion::{Criterion, criterion_group, criterion_main};
use turkmorph_core::{DictionaryItem, PrimaryPos, SecondaryPos};
use turkmorph_tr::{TurkishMorphology, TurkishMorphotactics};

const WORDS: &[&str] = &[
    "kitaba",
    "kitaplarımızdan",
    "evlerde",
    "evdekiler",
    "masadaydı",
    "güzelleşti",
    "gözlükçü",
    "geldim",
    "gideceğim",
    "okuyorlar",
    "arıyordu",
    "yapmadı",
    "bakacaklarmış",
    "diyor",
    "bana",
    "içerde",
    "zeytinyağında",
    "ağzı",
    "birbirleri",
    "qxzqxz",
];

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Build the morphotactics graph alone.
fn bench_build_graph(c: &mut Criterion) {
    c.bench_function("build_morphotactics", |b| {
        b.iter(|| std::hint::black_box(TurkishMorphotactics::new().expect("morphotactics")));
    });
}

/// Build the graph, parse the lexicon and index every item.
fn bench_build_handle(c: &mut Criterion) {
    c.bench_function("build_handle", |b| {
        b.iter(|| std::hint::black_box(TurkishMorphology::with_default_lexicon().expect("handle")));
    });
}

fn bench_analyze_words(c: &mut Criterion) {
    let morphology = TurkishMorphology::with_default_lexicon().expect("handle");
    c.bench_function("analyze_20_words", |b| {
        b.iter(|| {
            for word in WORDS {
                std::hint::black_box(morphology.analyze(word));
            }
        });
    });
}

fn bench_analyze_ascii_tolerant(c: &mut Criterion) {
    let morphology = TurkishMorphology::builder()
        .ascii_tolerant(true)
        .build()
        .expect("handle");
    let words: Vec<String> = WORDS.iter().map(|w| turkmorph_core::alphabet::to_ascii(w)).collect();
    c.bench_function("analyze_20_words_ascii", |b| {
        b.iter(|| {
            for word in &words {
                std::hint::black_box(morphology.analyze(word));
            }
        });
    });
}

/// Add a runtime proper noun, analyze with it, remove it.
fn bench_runtime_item(c: &mut Criterion) {
    let morphology = TurkishMorphology::with_default_lexicon().expect("handle");
    let item = DictionaryItem::new("Ahmet", "ahmet", "ahmet", PrimaryPos::Noun, SecondaryPos::ProperNoun, vec![]);
    c.bench_function("runtime_item_add_analyze_remove", |b| {
        b.iter(|| {
            morphology.add_dictionary_item(item.clone()).expect("stems");
            std::hint::black_box(morphology.analyze("Ahmet'e"));
            morphology.remove_dictionary_item(&item);
        });
    });
}

criterion_group!(
    benches,
    bench_build_graph,
    bench_build_handle,
    bench_analyze_words,
    bench_analyze_ascii_tolerant,
    bench_runtime_item,
);
criterion_main!(benches);
