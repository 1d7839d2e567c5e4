//! Shared types for turkmorph.
//!
//! Leaf crate with no knowledge of the morphotactics graph: the Turkish
//! letter table, phonetic attribute sets, POS enums and dictionary items.
//!
//! # Architecture
//!
//! - [`alphabet`] -- Letter facts, Turkish case mapping, diacritic folding
//! - [`phonetics`] -- Phonetic attribute bitset and its derivation
//! - [`pos`] -- Primary/secondary POS and root attributes
//! - [`item`] -- Dictionary items and id generation

pub mod alphabet;
pub mod item;
pub mod phonetics;
pub mod pos;

pub use item::DictionaryItem;
pub use phonetics::{PhoneticAttribute, PhoneticAttributes};
pub use pos::{ParseError, PrimaryPos, RootAttribute, SecondaryPos};
