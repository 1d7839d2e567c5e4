// Reading digit strings as Turkish numeral words
//
// Only the last word of a number matters for its suffixes: `123` ends in
// `üç`, `12300` in `yüz`, `1990` in `doksan`.

const ONES: [&str; 10] = [
    "sıfır", "bir", "iki", "üç", "dört", "beş", "altı", "yedi", "sekiz", "dokuz",
];

const TENS: [&str; 10] = [
    "", "on", "yirmi", "otuz", "kırk", "elli", "altmış", "yetmiş", "seksen", "doksan",
];

/// Cardinal numeral words with their ordinal forms.
pub const ORDINALS: [(&str, &str); 23] = [
    ("sıfır", "sıfırıncı"),
    ("bir", "birinci"),
    ("iki", "ikinci"),
    ("üç", "üçüncü"),
    ("dört", "dördüncü"),
    ("beş", "beşinci"),
    ("altı", "altıncı"),
    ("yedi", "yedinci"),
    ("sekiz", "sekizinci"),
    ("dokuz", "dokuzuncu"),
    ("on", "onuncu"),
    ("yirmi", "yirminci"),
    ("otuz", "otuzuncu"),
    ("kırk", "kırkıncı"),
    ("elli", "ellinci"),
    ("altmış", "altmışıncı"),
    ("yetmiş", "yetmişinci"),
    ("seksen", "sekseninci"),
    ("doksan", "doksanıncı"),
    ("yüz", "yüzüncü"),
    ("bin", "bininci"),
    ("milyon", "milyonuncu"),
    ("milyar", "milyarıncı"),
];

/// Last word of the number spelled by the trailing digits of `s`.
///
/// `None` when `s` does not end in a digit or the number is too large
/// (a trillion and up).
pub fn last_numeral_word(s: &str) -> Option<&'static str> {
    let digits: Vec<usize> = s
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .map(|b| usize::from(b - b'0'))
        .collect();
    let first = *digits.first()?;
    if first != 0 {
        return Some(ONES[first]);
    }
    let zeros = digits.iter().take_while(|d| **d == 0).count();
    let Some(&next) = digits.get(zeros) else {
        return Some(ONES[0]);
    };
    Some(match zeros {
        1 => TENS[next],
        2 => "yüz",
        3..=5 => "bin",
        6..=8 => "milyon",
        9..=11 => "milyar",
        _ => return None,
    })
}

/// Ordinal form of a cardinal numeral word (`üç` → `üçüncü`).
pub fn ordinal_of(cardinal: &str) -> Option<&'static str> {
    ORDINALS
        .iter()
        .find(|(c, _)| *c == cardinal)
        .map(|(_, o)| *o)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_word_of_numbers() {
        assert_eq!(last_numeral_word("3"), Some("üç"));
        assert_eq!(last_numeral_word("123"), Some("üç"));
        assert_eq!(last_numeral_word("20"), Some("yirmi"));
        assert_eq!(last_numeral_word("1990"), Some("doksan"));
        assert_eq!(last_numeral_word("12300"), Some("yüz"));
        assert_eq!(last_numeral_word("1000"), Some("bin"));
        assert_eq!(last_numeral_word("10000"), Some("bin"));
        assert_eq!(last_numeral_word("250000"), Some("bin"));
        assert_eq!(last_numeral_word("3000000"), Some("milyon"));
        assert_eq!(last_numeral_word("7000000000"), Some("milyar"));
    }

    #[test]
    fn zeros_and_non_numbers() {
        assert_eq!(last_numeral_word("0"), Some("sıfır"));
        assert_eq!(last_numeral_word("00"), Some("sıfır"));
        assert_eq!(last_numeral_word("a20"), Some("yirmi"));
        assert_eq!(last_numeral_word("12:30"), Some("otuz"));
        assert_eq!(last_numeral_word("abc"), None);
        assert_eq!(last_numeral_word("1abc"), None);
        assert_eq!(last_numeral_word(""), None);
        assert_eq!(last_numeral_word("1000000000000"), None);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal_of("üç"), Some("üçüncü"));
        assert_eq!(ordinal_of("doksan"), Some("doksanıncı"));
        assert_eq!(ordinal_of("kitap"), None);
        for (cardinal, _) in ORDINALS {
            assert!(ordinal_of(cardinal).is_some(), "{cardinal}");
        }
    }
}
