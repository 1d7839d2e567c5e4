// Part-of-speech and root attribute enums
//
// Primary and secondary POS tags with their short lexicon forms, and the
// root attributes a lexicon line may carry.

use serde::Serialize;

/// Error for unknown short forms in lexicon data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown primary POS: {0}")]
    PrimaryPos(String),
    #[error("unknown secondary POS: {0}")]
    SecondaryPos(String),
    #[error("unknown root attribute: {0}")]
    RootAttribute(String),
}

// ---------------------------------------------------------------------------
// Primary POS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimaryPos {
    Noun,
    Adjective,
    Adverb,
    Conjunction,
    Interjection,
    Verb,
    Pronoun,
    Numeral,
    Determiner,
    PostPositive,
    Question,
    Duplicator,
    Punctuation,
    Unknown,
}

impl PrimaryPos {
    pub const ALL: [PrimaryPos; 14] = [
        PrimaryPos::Noun,
        PrimaryPos::Adjective,
        PrimaryPos::Adverb,
        PrimaryPos::Conjunction,
        PrimaryPos::Interjection,
        PrimaryPos::Verb,
        PrimaryPos::Pronoun,
        PrimaryPos::Numeral,
        PrimaryPos::Determiner,
        PrimaryPos::PostPositive,
        PrimaryPos::Question,
        PrimaryPos::Duplicator,
        PrimaryPos::Punctuation,
        PrimaryPos::Unknown,
    ];

    pub fn short_form(self) -> &'static str {
        match self {
            PrimaryPos::Noun => "Noun",
            PrimaryPos::Adjective => "Adj",
            PrimaryPos::Adverb => "Adv",
            PrimaryPos::Conjunction => "Conj",
            PrimaryPos::Interjection => "Interj",
            PrimaryPos::Verb => "Verb",
            PrimaryPos::Pronoun => "Pron",
            PrimaryPos::Numeral => "Num",
            PrimaryPos::Determiner => "Det",
            PrimaryPos::PostPositive => "Postp",
            PrimaryPos::Question => "Ques",
            PrimaryPos::Duplicator => "Dup",
            PrimaryPos::Punctuation => "Punc",
            PrimaryPos::Unknown => "Unk",
        }
    }

    pub fn from_short_form(s: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|p| p.short_form() == s)
            .ok_or_else(|| ParseError::PrimaryPos(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Secondary POS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SecondaryPos {
    Unknown,
    DemonstrativePron,
    Time,
    QuantitivePron,
    QuestionPron,
    ProperNoun,
    PersonalPron,
    ReflexivePron,
    None,
    Ordinal,
    Cardinal,
    Percentage,
    Ratio,
    Range,
    Real,
    Distribution,
    Clock,
    Date,
    Email,
    Url,
    Mention,
    HashTag,
    Emoticon,
    RomanNumeral,
    RegularAbbreviation,
    Abbreviation,
}

impl SecondaryPos {
    pub const ALL: [SecondaryPos; 26] = [
        SecondaryPos::Unknown,
        SecondaryPos::DemonstrativePron,
        SecondaryPos::Time,
        SecondaryPos::QuantitivePron,
        SecondaryPos::QuestionPron,
        SecondaryPos::ProperNoun,
        SecondaryPos::PersonalPron,
        SecondaryPos::ReflexivePron,
        SecondaryPos::None,
        SecondaryPos::Ordinal,
        SecondaryPos::Cardinal,
        SecondaryPos::Percentage,
        SecondaryPos::Ratio,
        SecondaryPos::Range,
        SecondaryPos::Real,
        SecondaryPos::Distribution,
        SecondaryPos::Clock,
        SecondaryPos::Date,
        SecondaryPos::Email,
        SecondaryPos::Url,
        SecondaryPos::Mention,
        SecondaryPos::HashTag,
        SecondaryPos::Emoticon,
        SecondaryPos::RomanNumeral,
        SecondaryPos::RegularAbbreviation,
        SecondaryPos::Abbreviation,
    ];

    pub fn short_form(self) -> &'static str {
        match self {
            SecondaryPos::Unknown => "Unk",
            SecondaryPos::DemonstrativePron => "Demons",
            SecondaryPos::Time => "Time",
            SecondaryPos::QuantitivePron => "Quant",
            SecondaryPos::QuestionPron => "Ques",
            SecondaryPos::ProperNoun => "Prop",
            SecondaryPos::PersonalPron => "Pers",
            SecondaryPos::ReflexivePron => "Reflex",
            SecondaryPos::None => "None",
            SecondaryPos::Ordinal => "Ord",
            SecondaryPos::Cardinal => "Card",
            SecondaryPos::Percentage => "Percent",
            SecondaryPos::Ratio => "Ratio",
            SecondaryPos::Range => "Range",
            SecondaryPos::Real => "Real",
            SecondaryPos::Distribution => "Dist",
            SecondaryPos::Clock => "Clock",
            SecondaryPos::Date => "Date",
            SecondaryPos::Email => "Email",
            SecondaryPos::Url => "Url",
            SecondaryPos::Mention => "Mention",
            SecondaryPos::HashTag => "HashTag",
            SecondaryPos::Emoticon => "Emoticon",
            SecondaryPos::RomanNumeral => "RomanNumeral",
            SecondaryPos::RegularAbbreviation => "RegAbbrv",
            SecondaryPos::Abbreviation => "Abbrv",
        }
    }

    pub fn from_short_form(s: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|p| p.short_form() == s)
            .ok_or_else(|| ParseError::SecondaryPos(s.to_string()))
    }

    /// True for `None` and `Unknown`, which are not printed in analyses.
    #[inline]
    pub fn is_unspecified(self) -> bool {
        matches!(self, SecondaryPos::None | SecondaryPos::Unknown)
    }
}

// ---------------------------------------------------------------------------
// Root attributes
// ---------------------------------------------------------------------------

/// Lexical properties of a root that steer stem generation and suffixation.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RootAttribute {
    Aorist_I,
    Aorist_A,
    ProgressiveVowelDrop,
    Passive_In,
    Causative_t,
    Voicing,
    NoVoicing,
    InverseHarmony,
    Doubling,
    LastVowelDrop,
    CompoundP3sg,
    CompoundP3sgRoot,
    NoSuffix,
    Reflexive,
    Reciprocal,
    NonReciprocal,
    Ext,
    Runtime,
    Dummy,
    ImplicitDative,
    ImplicitPlural,
    ImplicitP1sg,
    ImplicitP2sg,
    FamilyMember,
    PronunciationGuessed,
    Informal,
    Unknown,
}

impl RootAttribute {
    pub const ALL: [RootAttribute; 27] = [
        RootAttribute::Aorist_I,
        RootAttribute::Aorist_A,
        RootAttribute::ProgressiveVowelDrop,
        RootAttribute::Passive_In,
        RootAttribute::Causative_t,
        RootAttribute::Voicing,
        RootAttribute::NoVoicing,
        RootAttribute::InverseHarmony,
        RootAttribute::Doubling,
        RootAttribute::LastVowelDrop,
        RootAttribute::CompoundP3sg,
        RootAttribute::CompoundP3sgRoot,
        RootAttribute::NoSuffix,
        RootAttribute::Reflexive,
        RootAttribute::Reciprocal,
        RootAttribute::NonReciprocal,
        RootAttribute::Ext,
        RootAttribute::Runtime,
        RootAttribute::Dummy,
        RootAttribute::ImplicitDative,
        RootAttribute::ImplicitPlural,
        RootAttribute::ImplicitP1sg,
        RootAttribute::ImplicitP2sg,
        RootAttribute::FamilyMember,
        RootAttribute::PronunciationGuessed,
        RootAttribute::Informal,
        RootAttribute::Unknown,
    ];

    /// Attributes that make the stem generator produce a second,
    /// phonetically modified stem.
    pub const MODIFIERS: [RootAttribute; 7] = [
        RootAttribute::Doubling,
        RootAttribute::LastVowelDrop,
        RootAttribute::ProgressiveVowelDrop,
        RootAttribute::InverseHarmony,
        RootAttribute::Voicing,
        RootAttribute::CompoundP3sg,
        RootAttribute::CompoundP3sgRoot,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RootAttribute::Aorist_I => "Aorist_I",
            RootAttribute::Aorist_A => "Aorist_A",
            RootAttribute::ProgressiveVowelDrop => "ProgressiveVowelDrop",
            RootAttribute::Passive_In => "Passive_In",
            RootAttribute::Causative_t => "Causative_t",
            RootAttribute::Voicing => "Voicing",
            RootAttribute::NoVoicing => "NoVoicing",
            RootAttribute::InverseHarmony => "InverseHarmony",
            RootAttribute::Doubling => "Doubling",
            RootAttribute::LastVowelDrop => "LastVowelDrop",
            RootAttribute::CompoundP3sg => "CompoundP3sg",
            RootAttribute::CompoundP3sgRoot => "CompoundP3sgRoot",
            RootAttribute::NoSuffix => "NoSuffix",
            RootAttribute::Reflexive => "Reflexive",
            RootAttribute::Reciprocal => "Reciprocal",
            RootAttribute::NonReciprocal => "NonReciprocal",
            RootAttribute::Ext => "Ext",
            RootAttribute::Runtime => "Runtime",
            RootAttribute::Dummy => "Dummy",
            RootAttribute::ImplicitDative => "ImplicitDative",
            RootAttribute::ImplicitPlural => "ImplicitPlural",
            RootAttribute::ImplicitP1sg => "ImplicitP1sg",
            RootAttribute::ImplicitP2sg => "ImplicitP2sg",
            RootAttribute::FamilyMember => "FamilyMember",
            RootAttribute::PronunciationGuessed => "PronunciationGuessed",
            RootAttribute::Informal => "Informal",
            RootAttribute::Unknown => "Unknown",
        }
    }

    pub fn from_name(s: &str) -> Result<Self, ParseError> {
        Self::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ParseError::RootAttribute(s.to_string()))
    }

    #[inline]
    pub fn is_modifier(self) -> bool {
        Self::MODIFIERS.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_pos_short_forms_round_trip() {
        for p in PrimaryPos::ALL {
            assert_eq!(PrimaryPos::from_short_form(p.short_form()), Ok(p));
        }
        assert_eq!(
            PrimaryPos::from_short_form("Xyz"),
            Err(ParseError::PrimaryPos("Xyz".into()))
        );
    }

    #[test]
    fn ques_is_both_primary_and_secondary() {
        assert_eq!(PrimaryPos::from_short_form("Ques"), Ok(PrimaryPos::Question));
        assert_eq!(SecondaryPos::from_short_form("Ques"), Ok(SecondaryPos::QuestionPron));
    }

    #[test]
    fn root_attribute_names() {
        assert_eq!(RootAttribute::from_name("Voicing"), Ok(RootAttribute::Voicing));
        assert!(RootAttribute::from_name("voicing").is_err());
        assert!(RootAttribute::Voicing.is_modifier());
        assert!(RootAttribute::CompoundP3sgRoot.is_modifier());
        assert!(!RootAttribute::NoVoicing.is_modifier());
        assert!(!RootAttribute::Aorist_A.is_modifier());
    }

    #[test]
    fn unspecified_secondary() {
        assert!(SecondaryPos::None.is_unspecified());
        assert!(SecondaryPos::Unknown.is_unspecified());
        assert!(!SecondaryPos::ProperNoun.is_unspecified());
    }
}
