//! Turkish morphological analysis.
//!
//! Builds the Turkish morphotactics on top of the `turkmorph-fst` graph
//! engine, generates stem variants for dictionary items, loads the text
//! lexicon, and ties them together in [`TurkishMorphology`].
//!
//! # Architecture
//!
//! - [`morphotactics`] -- Turkish morphemes, states and suffix transitions
//! - [`stems`] -- Stem variants of dictionary items (voicing, doubling, vowel drop, irregular roots)
//! - [`lexicon`] -- Text lexicon parser with attribute inference
//! - [`numerals`] -- Digit strings read as numeral words
//! - [`unidentified`] -- Proper noun and numeral guesses for unknown tokens
//! - [`handle`] -- `TurkishMorphology` handle, input normalization and runtime items
//!
//! # Example
//!
//! ```
//! use turkmorph_tr::TurkishMorphology;
//!
//! let morphology = TurkishMorphology::with_default_lexicon().unwrap();
//! let result = morphology.analyze("evlerde");
//! assert!(!result.analyses().is_empty());
//! ```

pub mod handle;
pub mod lexicon;
pub mod morphotactics;
pub mod numerals;
pub mod stems;
pub mod unidentified;

pub use handle::{MorphologyError, MorphologyOptions, TurkishMorphology, TurkishMorphologyBuilder, normalize};
pub use lexicon::{LexiconError, RootLexicon};
pub use morphotactics::TurkishMorphotactics;
pub use stems::TurkishStemGenerator;
pub use unidentified::UnidentifiedTokenAnalyzer;
