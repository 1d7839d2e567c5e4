// Suffix template tokenizer
//
// Suffix surfaces are written in a compact template language:
//
//   A      harmonized a/e
//   I      harmonized ı/i/u/ü
//   +x     x only after a vowel (glide), `+A`/`+I` are plain harmonized vowels
//   >x     x, devoiced after a voiceless letter
//   ~x     x, the path then expects a consonant-initial suffix
//   !x     x, the path then expects a vowel-initial suffix and cannot end
//
// Any other character is a literal letter. Tokenizing is purely syntactic.

/// Error for malformed suffix templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template `{template}` ends with modifier `{modifier}` and no letter to apply it to")]
    DanglingModifier { template: String, modifier: char },
}

/// Kind of one template instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Letter,
    AVowel,
    IVowel,
    Append,
    DevoiceFirst,
    LastVoiced,
    LastNotVoiced,
}

/// One instruction of a suffix template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TemplateToken {
    pub kind: TokenKind,
    /// The literal letter for letter-carrying kinds, `'\0'` for vowels.
    pub letter: char,
}

impl TemplateToken {
    #[inline]
    pub const fn new(kind: TokenKind, letter: char) -> Self {
        Self { kind, letter }
    }
}

/// Iterator over the tokens of a template string.
pub struct Tokenizer<'a> {
    template: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(template: &'a str) -> Self {
        Self {
            template,
            chars: template.chars().peekable(),
        }
    }

    fn modified(&mut self, modifier: char, kind: TokenKind) -> Result<TemplateToken, TemplateError> {
        match self.chars.next() {
            Some(c) => Ok(TemplateToken::new(kind, c)),
            None => Err(TemplateError::DanglingModifier {
                template: self.template.to_string(),
                modifier,
            }),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<TemplateToken, TemplateError>;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let token = match c {
            '+' => match self.chars.peek() {
                Some('I') => {
                    self.chars.next();
                    Ok(TemplateToken::new(TokenKind::IVowel, '\0'))
                }
                Some('A') => {
                    self.chars.next();
                    Ok(TemplateToken::new(TokenKind::AVowel, '\0'))
                }
                _ => self.modified('+', TokenKind::Append),
            },
            '>' => self.modified('>', TokenKind::DevoiceFirst),
            '~' => self.modified('~', TokenKind::LastVoiced),
            '!' => self.modified('!', TokenKind::LastNotVoiced),
            'I' => Ok(TemplateToken::new(TokenKind::IVowel, '\0')),
            'A' => Ok(TemplateToken::new(TokenKind::AVowel, '\0')),
            c => Ok(TemplateToken::new(TokenKind::Letter, c)),
        };
        Some(token)
    }
}

/// Tokenize a whole template.
pub fn tokenize(template: &str) -> Result<Vec<TemplateToken>, TemplateError> {
    Tokenizer::new(template).collect()
}

#[cfg(test)]
mod tests {
    use super::TokenKind::*;
    use super::*;

    fn kinds(template: &str) -> Vec<(TokenKind, char)> {
        tokenize(template)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.letter))
            .collect()
    }

    #[test]
    fn literal_letters() {
        assert_eq!(kinds("ki"), vec![(Letter, 'k'), (Letter, 'i')]);
        assert!(kinds("").is_empty());
    }

    #[test]
    fn harmonized_vowels() {
        assert_eq!(
            kinds("lAr"),
            vec![(Letter, 'l'), (AVowel, '\0'), (Letter, 'r')]
        );
        assert_eq!(kinds("Im"), vec![(IVowel, '\0'), (Letter, 'm')]);
        assert_eq!(kinds("+I"), vec![(IVowel, '\0')]);
        assert_eq!(kinds("+A"), vec![(AVowel, '\0')]);
    }

    #[test]
    fn glide_append() {
        assert_eq!(kinds("+yA"), vec![(Append, 'y'), (AVowel, '\0')]);
        assert_eq!(
            kinds("+nIn"),
            vec![(Append, 'n'), (IVowel, '\0'), (Letter, 'n')]
        );
    }

    #[test]
    fn devoice_and_voicing_markers() {
        assert_eq!(
            kinds(">dA"),
            vec![(DevoiceFirst, 'd'), (AVowel, '\0')]
        );
        assert_eq!(
            kinds(">cI~k"),
            vec![(DevoiceFirst, 'c'), (IVowel, '\0'), (LastVoiced, 'k')]
        );
        assert_eq!(
            kinds(">cI!ğ"),
            vec![(DevoiceFirst, 'c'), (IVowel, '\0'), (LastNotVoiced, 'ğ')]
        );
    }

    #[test]
    fn dangling_modifier_is_an_error() {
        for (template, modifier) in [("lA>", '>'), ("cI~", '~'), ("cI!", '!'), ("+", '+')] {
            assert_eq!(
                tokenize(template),
                Err(TemplateError::DanglingModifier {
                    template: template.to_string(),
                    modifier,
                })
            );
        }
    }
}
