// Phonetic attributes of letter sequences
//
// A word or suffix surface is summarised by a small set of boolean facts
// about its last letter, last vowel and first letter. Suffix surfaces are
// chosen from these facts (vowel harmony, glide insertion, devoicing), so
// the set travels along every search path and is recomputed after each
// suffix that adds letters.

use std::fmt;

use crate::alphabet;

// ---------------------------------------------------------------------------
// Attribute enumeration
// ---------------------------------------------------------------------------

/// One phonetic fact. Each variant owns a single bit in [`PhoneticAttributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PhoneticAttribute {
    LastLetterVowel,
    LastLetterConsonant,
    LastVowelFrontal,
    LastVowelBack,
    LastVowelRounded,
    LastVowelUnrounded,
    LastLetterVoiceless,
    LastLetterVoiced,
    LastLetterVoicelessStop,
    FirstLetterVowel,
    FirstLetterConsonant,
    HasNoVowel,
    ExpectsVowel,
    ExpectsConsonant,
    ModifiedPronoun,
    UnModifiedPronoun,
    LastLetterDropped,
    CannotTerminate,
}

impl PhoneticAttribute {
    pub const ALL: [PhoneticAttribute; 18] = [
        PhoneticAttribute::LastLetterVowel,
        PhoneticAttribute::LastLetterConsonant,
        PhoneticAttribute::LastVowelFrontal,
        PhoneticAttribute::LastVowelBack,
        PhoneticAttribute::LastVowelRounded,
        PhoneticAttribute::LastVowelUnrounded,
        PhoneticAttribute::LastLetterVoiceless,
        PhoneticAttribute::LastLetterVoiced,
        PhoneticAttribute::LastLetterVoicelessStop,
        PhoneticAttribute::FirstLetterVowel,
        PhoneticAttribute::FirstLetterConsonant,
        PhoneticAttribute::HasNoVowel,
        PhoneticAttribute::ExpectsVowel,
        PhoneticAttribute::ExpectsConsonant,
        PhoneticAttribute::ModifiedPronoun,
        PhoneticAttribute::UnModifiedPronoun,
        PhoneticAttribute::LastLetterDropped,
        PhoneticAttribute::CannotTerminate,
    ];

    #[inline]
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }

    /// Short tag used in debug output.
    pub fn short_form(self) -> &'static str {
        match self {
            PhoneticAttribute::LastLetterVowel => "LLV",
            PhoneticAttribute::LastLetterConsonant => "LLC",
            PhoneticAttribute::LastVowelFrontal => "LVF",
            PhoneticAttribute::LastVowelBack => "LVB",
            PhoneticAttribute::LastVowelRounded => "LVR",
            PhoneticAttribute::LastVowelUnrounded => "LVuR",
            PhoneticAttribute::LastLetterVoiceless => "LLVless",
            PhoneticAttribute::LastLetterVoiced => "LLVo",
            PhoneticAttribute::LastLetterVoicelessStop => "LLVlessStop",
            PhoneticAttribute::FirstLetterVowel => "FLV",
            PhoneticAttribute::FirstLetterConsonant => "FLC",
            PhoneticAttribute::HasNoVowel => "NoVow",
            PhoneticAttribute::ExpectsVowel => "EV",
            PhoneticAttribute::ExpectsConsonant => "EC",
            PhoneticAttribute::ModifiedPronoun => "MP",
            PhoneticAttribute::UnModifiedPronoun => "UMP",
            PhoneticAttribute::LastLetterDropped => "LWD",
            PhoneticAttribute::CannotTerminate => "CNT",
        }
    }
}

impl fmt::Display for PhoneticAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_form())
    }
}

// ---------------------------------------------------------------------------
// Attribute set
// ---------------------------------------------------------------------------

/// A set of [`PhoneticAttribute`]s packed into one word.
///
/// Copying is a register move, so search paths fork it freely. The raw bits
/// double as a memo key for generated suffix surfaces.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PhoneticAttributes(u32);

impl PhoneticAttributes {
    pub const EMPTY: PhoneticAttributes = PhoneticAttributes(0);

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn contains(self, attr: PhoneticAttribute) -> bool {
        self.0 & attr.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, attr: PhoneticAttribute) {
        self.0 |= attr.bit();
    }

    #[inline]
    pub fn remove(&mut self, attr: PhoneticAttribute) {
        self.0 &= !attr.bit();
    }

    /// Builder-style insert.
    #[inline]
    #[must_use]
    pub const fn with(self, attr: PhoneticAttribute) -> Self {
        PhoneticAttributes(self.0 | attr.bit())
    }

    /// Builder-style remove.
    #[inline]
    #[must_use]
    pub const fn without(self, attr: PhoneticAttribute) -> Self {
        PhoneticAttributes(self.0 & !attr.bit())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = PhoneticAttribute> {
        PhoneticAttribute::ALL
            .into_iter()
            .filter(move |a| self.contains(*a))
    }
}

impl FromIterator<PhoneticAttribute> for PhoneticAttributes {
    fn from_iter<I: IntoIterator<Item = PhoneticAttribute>>(iter: I) -> Self {
        let mut set = PhoneticAttributes::EMPTY;
        for a in iter {
            set.insert(a);
        }
        set
    }
}

impl<const N: usize> From<[PhoneticAttribute; N]> for PhoneticAttributes {
    fn from(attrs: [PhoneticAttribute; N]) -> Self {
        attrs.into_iter().collect()
    }
}

impl fmt::Debug for PhoneticAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for PhoneticAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, a) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(a.short_form())?;
        }
        f.write_str("]")
    }
}

// ---------------------------------------------------------------------------
// Attribute derivation
// ---------------------------------------------------------------------------

/// Compute the attributes of `seq` when it follows a sequence whose
/// attributes are `predecessor`.
///
/// An empty sequence returns `predecessor` unchanged. A vowel-less sequence
/// carries the predecessor's vowel harmony facts forward; its consonant and
/// voicing facts are always computed locally.
pub fn morphemic_attributes(seq: &str, predecessor: PhoneticAttributes) -> PhoneticAttributes {
    use PhoneticAttribute::*;

    if seq.is_empty() {
        return predecessor;
    }
    let mut attrs = PhoneticAttributes::EMPTY;
    match alphabet::last_vowel(seq) {
        Some(last_vowel) => {
            let last = alphabet::last_letter(seq);
            attrs.insert(if last.vowel { LastLetterVowel } else { LastLetterConsonant });
            attrs.insert(if last_vowel.frontal { LastVowelFrontal } else { LastVowelBack });
            attrs.insert(if last_vowel.rounded { LastVowelRounded } else { LastVowelUnrounded });
            attrs.insert(if alphabet::first_letter(seq).vowel {
                FirstLetterVowel
            } else {
                FirstLetterConsonant
            });
        }
        None => {
            attrs = predecessor
                .without(LastLetterVowel)
                .without(LastLetterVoiceless)
                .without(LastLetterVoiced)
                .without(LastLetterVoicelessStop)
                .with(LastLetterConsonant)
                .with(FirstLetterConsonant)
                .with(HasNoVowel);
        }
    }
    let last = alphabet::last_letter(seq);
    if last.voiceless {
        attrs.insert(LastLetterVoiceless);
        if last.is_stop_consonant() {
            attrs.insert(LastLetterVoicelessStop);
        }
    } else {
        attrs.insert(LastLetterVoiced);
    }
    attrs
}

/// Attributes of a standalone sequence with no predecessor.
#[inline]
pub fn attributes_of(seq: &str) -> PhoneticAttributes {
    morphemic_attributes(seq, PhoneticAttributes::EMPTY)
}
