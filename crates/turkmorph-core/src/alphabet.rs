// Turkish letter table and character utilities
//
// A static table of per-letter phonetic facts (vowel, frontness, roundedness,
// voicing, continuance) plus the string helpers built on it: Turkish case
// mapping, voicing alternations and diacritic-insensitive comparison.

// ---------------------------------------------------------------------------
// Letter facts
// ---------------------------------------------------------------------------

/// Immutable phonetic facts for one character of the Turkish alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Letter {
    pub ch: char,
    pub vowel: bool,
    pub frontal: bool,
    pub rounded: bool,
    pub voiceless: bool,
    pub continuant: bool,
    pub in_ascii: bool,
    /// ASCII lookalike used for diacritic-insensitive matching.
    pub ascii_equivalent: char,
}

impl Letter {
    /// Sentinel for characters outside the alphabet. Every predicate is false.
    pub const UNDEFINED: Letter = Letter {
        ch: '\0',
        vowel: false,
        frontal: false,
        rounded: false,
        voiceless: false,
        continuant: false,
        in_ascii: false,
        ascii_equivalent: '\0',
    };

    const fn consonant(ch: char) -> Letter {
        Letter {
            ch,
            vowel: false,
            frontal: false,
            rounded: false,
            voiceless: false,
            continuant: false,
            in_ascii: true,
            ascii_equivalent: ch,
        }
    }

    const fn vowel(ch: char, frontal: bool, rounded: bool) -> Letter {
        Letter {
            ch,
            vowel: true,
            frontal,
            rounded,
            voiceless: false,
            continuant: false,
            in_ascii: true,
            ascii_equivalent: ch,
        }
    }

    const fn voiceless(mut self) -> Letter {
        self.voiceless = true;
        self
    }

    const fn continuant(mut self) -> Letter {
        self.continuant = true;
        self
    }

    const fn similar_ascii(mut self, ascii: char) -> Letter {
        self.in_ascii = false;
        self.ascii_equivalent = ascii;
        self
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        self.ch == '\0'
    }

    /// Voiceless and not continuant: ç, k, p, t.
    #[inline]
    pub fn is_stop_consonant(&self) -> bool {
        self.voiceless && !self.continuant
    }

    #[inline]
    pub fn is_consonant(&self) -> bool {
        !self.is_undefined() && !self.vowel
    }
}

static LETTERS: [Letter; 35] = [
    Letter::vowel('a', false, false),
    Letter::consonant('b'),
    Letter::consonant('c'),
    Letter::consonant('ç').voiceless().similar_ascii('c'),
    Letter::consonant('d'),
    Letter::vowel('e', true, false),
    Letter::consonant('f').continuant().voiceless(),
    Letter::consonant('g'),
    Letter::consonant('ğ').continuant().similar_ascii('g'),
    Letter::consonant('h').continuant().voiceless(),
    Letter::vowel('ı', false, false).similar_ascii('i'),
    Letter::vowel('i', true, false),
    Letter::consonant('j').continuant(),
    Letter::consonant('k').voiceless(),
    Letter::consonant('l').continuant(),
    Letter::consonant('m').continuant(),
    Letter::consonant('n').continuant(),
    Letter::vowel('o', false, true),
    Letter::vowel('ö', true, true).similar_ascii('o'),
    Letter::consonant('p').voiceless(),
    Letter::consonant('r').continuant(),
    Letter::consonant('s').continuant().voiceless(),
    Letter::consonant('ş').continuant().voiceless().similar_ascii('s'),
    Letter::consonant('t').voiceless(),
    Letter::vowel('u', false, true),
    Letter::vowel('ü', true, true).similar_ascii('u'),
    Letter::consonant('v').continuant(),
    Letter::consonant('y').continuant(),
    Letter::consonant('z').continuant(),
    Letter::consonant('q'),
    Letter::consonant('w'),
    Letter::consonant('x'),
    Letter::vowel('â', false, false).similar_ascii('a'),
    Letter::vowel('î', true, false).similar_ascii('i'),
    Letter::vowel('û', true, true).similar_ascii('u'),
];

/// Look up the facts for a character. Uppercase letters are mapped with
/// Turkish case rules first. Unknown characters yield [`Letter::UNDEFINED`].
pub fn letter(c: char) -> &'static Letter {
    let c = to_lower_char(c);
    LETTERS
        .iter()
        .find(|l| l.ch == c)
        .unwrap_or(&Letter::UNDEFINED)
}

// ---------------------------------------------------------------------------
// Sequence queries
// ---------------------------------------------------------------------------

#[inline]
pub fn is_vowel(c: char) -> bool {
    letter(c).vowel
}

pub fn contains_vowel(s: &str) -> bool {
    s.chars().any(is_vowel)
}

pub fn vowel_count(s: &str) -> usize {
    s.chars().filter(|&c| is_vowel(c)).count()
}

/// The last vowel of the sequence, or `None` if it has no vowel.
pub fn last_vowel(s: &str) -> Option<&'static Letter> {
    s.chars().rev().map(letter).find(|l| l.vowel)
}

pub fn last_letter(s: &str) -> &'static Letter {
    s.chars().next_back().map_or(&Letter::UNDEFINED, letter)
}

pub fn first_letter(s: &str) -> &'static Letter {
    s.chars().next().map_or(&Letter::UNDEFINED, letter)
}

// ---------------------------------------------------------------------------
// Voicing alternations
// ---------------------------------------------------------------------------

/// Voiced counterpart used when a vowel-initial suffix follows:
/// p→b, k→ğ, ç→c, t→d, g→ğ.
pub fn voice(c: char) -> Option<char> {
    match c {
        'p' => Some('b'),
        'k' => Some('ğ'),
        'ç' => Some('c'),
        't' => Some('d'),
        'g' => Some('ğ'),
        _ => None,
    }
}

/// Voiceless counterpart used by devoicing suffix heads:
/// b→p, c→ç, d→t, g→k, ğ→k.
pub fn devoice(c: char) -> Option<char> {
    match c {
        'b' => Some('p'),
        'c' => Some('ç'),
        'd' => Some('t'),
        'g' => Some('k'),
        'ğ' => Some('k'),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Case mapping and normalization
// ---------------------------------------------------------------------------

/// Lowercase a single character with Turkish rules (I→ı, İ→i).
pub fn to_lower_char(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        c if c.is_ascii() => c.to_ascii_lowercase(),
        c => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Lowercase a string with Turkish rules.
pub fn to_lowercase(s: &str) -> String {
    s.chars().map(to_lower_char).collect()
}

/// Uppercase a single character with Turkish rules (i→İ, ı→I).
pub fn to_upper_char(c: char) -> char {
    match c {
        'i' => 'İ',
        'ı' => 'I',
        c if c.is_ascii() => c.to_ascii_uppercase(),
        c => c.to_uppercase().next().unwrap_or(c),
    }
}

/// Replace circumflexed vowels with their plain forms (â→a, î→i, û→u).
pub fn normalize_circumflex(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'â' => 'a',
            'î' => 'i',
            'û' => 'u',
            'Â' => 'A',
            'Î' => 'İ',
            'Û' => 'U',
            c => c,
        })
        .collect()
}

/// Apostrophe lookalikes that are read as `'`.
const APOSTROPHES: [char; 6] = ['’', '‘', 'ʼ', '´', '`', '′'];

/// Replace apostrophe lookalikes with `'`.
pub fn normalize_apostrophes(s: &str) -> String {
    s.chars()
        .map(|c| if APOSTROPHES.contains(&c) { '\'' } else { c })
        .collect()
}

/// First letter upper case, the rest lower case, with Turkish rules.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => std::iter::once(to_upper_char(first))
            .chain(chars.map(to_lower_char))
            .collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Letter names
// ---------------------------------------------------------------------------

/// How a consonant is read out on its own (`t` → `te`).
fn letter_name(c: char) -> Option<&'static str> {
    Some(match c {
        'b' => "be",
        'c' => "ce",
        'ç' => "çe",
        'd' => "de",
        'f' => "fe",
        'g' => "ge",
        'ğ' => "yumuşakge",
        'h' => "he",
        'j' => "je",
        'k' => "ke",
        'l' => "le",
        'm' => "me",
        'n' => "ne",
        'p' => "pe",
        'q' => "kü",
        'r' => "re",
        's' => "se",
        'ş' => "şe",
        't' => "te",
        'v' => "ve",
        'w' => "ve",
        'x' => "iks",
        'y' => "ye",
        'z' => "ze",
        _ => return None,
    })
}

/// Pronunciation of an abbreviation read letter by letter (`trt` →
/// `terete`). A final `k` reads as `ka`. Characters without a name are
/// dropped.
pub fn spell_out(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() * 2);
    for (i, &c) in chars.iter().enumerate() {
        if is_vowel(c) {
            out.push(c);
        } else if c == 'k' && i + 1 == chars.len() {
            out.push_str("ka");
        } else if let Some(name) = letter_name(c) {
            out.push_str(name);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Diacritic-insensitive comparison
// ---------------------------------------------------------------------------

/// Fold a character to its ASCII lookalike. Characters outside the table
/// are returned unchanged.
#[inline]
pub fn ascii_fold(c: char) -> char {
    let l = letter(c);
    if l.is_undefined() { c } else { l.ascii_equivalent }
}

/// Fold every character of `s` to its ASCII lookalike.
pub fn to_ascii(s: &str) -> String {
    s.chars().map(ascii_fold).collect()
}

/// True if `s` contains a letter that has a distinct ASCII lookalike.
pub fn contains_ascii_related(s: &str) -> bool {
    s.chars().any(|c| {
        let l = letter(c);
        !l.is_undefined() && !l.in_ascii
    })
}

pub fn equals_ignore_diacritics(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| ascii_fold(x) == ascii_fold(y))
}

/// True if `s` starts with `prefix` when both are folded to ASCII.
pub fn starts_with_ignore_diacritics(s: &str, prefix: &str) -> bool {
    let mut chars = s.chars();
    for p in prefix.chars() {
        match chars.next() {
            Some(c) if ascii_fold(c) == ascii_fold(p) => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vowel_facts() {
        assert!(letter('a').vowel);
        assert!(!letter('a').frontal);
        assert!(letter('ö').frontal && letter('ö').rounded);
        assert!(letter('ı').vowel && !letter('ı').frontal && !letter('ı').rounded);
        assert!(!letter('k').vowel);
    }

    #[test]
    fn stop_consonants() {
        for c in ['ç', 'k', 'p', 't'] {
            assert!(letter(c).is_stop_consonant(), "{c}");
        }
        for c in ['s', 'ş', 'f', 'h', 'b', 'd', 'g'] {
            assert!(!letter(c).is_stop_consonant(), "{c}");
        }
    }

    #[test]
    fn undefined_letter_answers_false() {
        let l = letter('%');
        assert!(l.is_undefined());
        assert!(!l.vowel && !l.frontal && !l.rounded && !l.voiceless && !l.continuant);
        assert!(!l.is_consonant());
        assert!(!l.is_stop_consonant());
    }

    #[test]
    fn uppercase_lookup_uses_turkish_rules() {
        assert_eq!(letter('I').ch, 'ı');
        assert_eq!(letter('İ').ch, 'i');
        assert_eq!(to_lowercase("IĞDIR"), "ığdır");
        assert_eq!(to_lowercase("İstanbul"), "istanbul");
    }

    #[test]
    fn sequence_queries() {
        assert_eq!(vowel_count("kitap"), 2);
        assert_eq!(last_vowel("kitap").map(|l| l.ch), Some('a'));
        assert!(last_vowel("krd").is_none());
        assert_eq!(last_letter("ev").ch, 'v');
        assert!(last_letter("").is_undefined());
        assert_eq!(first_letter("ağaç").ch, 'a');
    }

    #[test]
    fn voicing_pairs() {
        assert_eq!(voice('p'), Some('b'));
        assert_eq!(voice('k'), Some('ğ'));
        assert_eq!(voice('ç'), Some('c'));
        assert_eq!(voice('t'), Some('d'));
        assert_eq!(voice('m'), None);
        assert_eq!(devoice('d'), Some('t'));
        assert_eq!(devoice('c'), Some('ç'));
        assert_eq!(devoice('ğ'), Some('k'));
        assert_eq!(devoice('a'), None);
    }

    #[test]
    fn diacritic_insensitive_matching() {
        assert_eq!(to_ascii("çağşıöü"), "cagsiou");
        assert!(contains_ascii_related("kitabı"));
        assert!(!contains_ascii_related("kitabi"));
        assert!(equals_ignore_diacritics("kitabı", "kitabi"));
        assert!(!equals_ignore_diacritics("kitabı", "kitab"));
        assert!(starts_with_ignore_diacritics("gozlukcu", "gözlük"));
        assert!(!starts_with_ignore_diacritics("goz", "gözlük"));
    }

    #[test]
    fn apostrophes_and_capitals() {
        assert_eq!(normalize_apostrophes("Ankara’da"), "Ankara'da");
        assert_eq!(normalize_apostrophes("TRT`ye"), "TRT'ye");
        assert_eq!(normalize_apostrophes("ev"), "ev");
        assert_eq!(capitalize("istanbul"), "İstanbul");
        assert_eq!(capitalize("ILGAZ"), "Ilgaz");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn abbreviations_spelled_out() {
        assert_eq!(spell_out("trt"), "terete");
        assert_eq!(spell_out("thk"), "teheka");
        assert_eq!(spell_out("abd"), "abede");
        assert!(contains_vowel(&spell_out("pttk")));
    }

    #[test]
    fn circumflex_normalization() {
        assert_eq!(normalize_circumflex("kâğıt"), "kağıt");
        assert_eq!(normalize_circumflex("hâlâ"), "hala");
    }
}
