// Dictionary items
//
// A lexicon entry: lemma, root spelling, pronunciation, POS and root
// attributes. Items are immutable once built and shared behind `Arc` by the
// stem index and analysis results.

use std::fmt;

use serde::Serialize;

use crate::pos::{PrimaryPos, RootAttribute, SecondaryPos};

/// A single lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DictionaryItem {
    /// Dictionary form, e.g. `kitap`, `gelmek`.
    pub lemma: String,
    /// Spelling the stem generator starts from, e.g. `gel` for `gelmek`.
    pub root: String,
    /// Pronunciation used for phonetic attributes. Usually equal to `root`.
    pub pronunciation: String,
    pub primary_pos: PrimaryPos,
    pub secondary_pos: SecondaryPos,
    /// Root attributes in declaration order.
    pub attributes: Vec<RootAttribute>,
    /// Disambiguates homographs sharing lemma and POS. Zero for the first.
    pub index: u32,
    /// Id of the item this one stands in for (compounds, dummies).
    pub reference_id: Option<String>,
    /// Unique id, e.g. `kitap_Noun`, `ben_Pron_Pers`, `yüz_Num_Card`.
    pub id: String,
}

impl DictionaryItem {
    pub fn new(
        lemma: impl Into<String>,
        root: impl Into<String>,
        pronunciation: impl Into<String>,
        primary_pos: PrimaryPos,
        secondary_pos: SecondaryPos,
        attributes: Vec<RootAttribute>,
    ) -> Self {
        Self::with_index(lemma, root, pronunciation, primary_pos, secondary_pos, attributes, 0)
    }

    pub fn with_index(
        lemma: impl Into<String>,
        root: impl Into<String>,
        pronunciation: impl Into<String>,
        primary_pos: PrimaryPos,
        secondary_pos: SecondaryPos,
        attributes: Vec<RootAttribute>,
        index: u32,
    ) -> Self {
        let lemma = lemma.into();
        let id = generate_id(&lemma, primary_pos, secondary_pos, index);
        Self {
            lemma,
            root: root.into(),
            pronunciation: pronunciation.into(),
            primary_pos,
            secondary_pos,
            attributes,
            index,
            reference_id: None,
            id,
        }
    }

    /// The placeholder item used for words without any analysis.
    pub fn unknown() -> Self {
        Self::new(
            "UNK",
            "UNK",
            "UNK",
            PrimaryPos::Unknown,
            SecondaryPos::Unknown,
            Vec::new(),
        )
    }

    #[inline]
    pub fn is_unknown(&self) -> bool {
        self.primary_pos == PrimaryPos::Unknown && self.lemma == "UNK"
    }

    #[inline]
    pub fn has_attribute(&self, attr: RootAttribute) -> bool {
        self.attributes.contains(&attr)
    }

    pub fn has_any_attribute(&self, attrs: &[RootAttribute]) -> bool {
        attrs.iter().any(|a| self.has_attribute(*a))
    }

    /// Lemma without the infinitive ending for verbs (`gelmek` → `gel`).
    pub fn normalized_lemma(&self) -> &str {
        if self.primary_pos == PrimaryPos::Verb {
            &self.root
        } else {
            &self.lemma
        }
    }
}

/// Build an item id: `lemma_Pos`, plus `_SecPos` unless the secondary POS is
/// `None`, plus `_index` when the index is positive.
pub fn generate_id(
    lemma: &str,
    primary_pos: PrimaryPos,
    secondary_pos: SecondaryPos,
    index: u32,
) -> String {
    let mut id = format!("{lemma}_{}", primary_pos.short_form());
    if secondary_pos != SecondaryPos::None {
        id.push('_');
        id.push_str(secondary_pos.short_form());
    }
    if index > 0 {
        id.push('_');
        id.push_str(&index.to_string());
    }
    id
}

impl fmt::Display for DictionaryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [P:{}", self.lemma, self.primary_pos.short_form())?;
        if !self.secondary_pos.is_unspecified() {
            write!(f, ", {}", self.secondary_pos.short_form())?;
        }
        if !self.attributes.is_empty() {
            f.write_str("; A:")?;
            for (i, a) in self.attributes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                f.write_str(a.name())?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generation() {
        assert_eq!(
            generate_id("kitap", PrimaryPos::Noun, SecondaryPos::None, 0),
            "kitap_Noun"
        );
        assert_eq!(
            generate_id("ben", PrimaryPos::Pronoun, SecondaryPos::PersonalPron, 0),
            "ben_Pron_Pers"
        );
        assert_eq!(
            generate_id("yüz", PrimaryPos::Noun, SecondaryPos::None, 2),
            "yüz_Noun_2"
        );
    }

    #[test]
    fn attribute_queries() {
        let item = DictionaryItem::new(
            "kitap",
            "kitap",
            "kitap",
            PrimaryPos::Noun,
            SecondaryPos::None,
            vec![RootAttribute::Voicing],
        );
        assert!(item.has_attribute(RootAttribute::Voicing));
        assert!(!item.has_attribute(RootAttribute::NoVoicing));
        assert!(item.has_any_attribute(&[RootAttribute::Doubling, RootAttribute::Voicing]));
        assert_eq!(item.to_string(), "kitap [P:Noun; A:Voicing]");
    }

    #[test]
    fn unknown_item() {
        let unk = DictionaryItem::unknown();
        assert!(unk.is_unknown());
        assert_eq!(unk.id, "UNK_Unk_Unk");
    }

    #[test]
    fn verb_normalized_lemma() {
        let item = DictionaryItem::new(
            "gelmek",
            "gel",
            "gel",
            PrimaryPos::Verb,
            SecondaryPos::None,
            vec![RootAttribute::Aorist_I],
        );
        assert_eq!(item.normalized_lemma(), "gel");
    }
}
