// Surface generation
//
// Turns a suffix template into the concrete string it takes after a given
// phonetic context, and memoizes the result per attribute set.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use turkmorph_core::alphabet;
use turkmorph_core::phonetics::{self, PhoneticAttribute, PhoneticAttributes};

use crate::template::{TemplateToken, TokenKind};

/// Internal consistency fault: a harmonized vowel was requested in a
/// context that has no last-vowel frontness.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("cannot harmonize {vowel} vowel after `{built}` with attributes {attributes}")]
    Harmony {
        vowel: char,
        built: String,
        attributes: PhoneticAttributes,
    },
}

/// Generate the surface of `tokens` following a sequence with `attributes`.
///
/// A harmonized vowel in first position is elided when the preceding
/// sequence already ends in a vowel.
pub fn generate_surface(
    tokens: &[TemplateToken],
    attributes: PhoneticAttributes,
) -> Result<String, SurfaceError> {
    use PhoneticAttribute::*;

    let mut out = String::with_capacity(tokens.len() + 2);
    for (index, token) in tokens.iter().enumerate() {
        let local = phonetics::morphemic_attributes(&out, attributes);
        match token.kind {
            TokenKind::Letter | TokenKind::LastVoiced | TokenKind::LastNotVoiced => {
                out.push(token.letter)
            }
            TokenKind::AVowel => {
                if index == 0 && attributes.contains(LastLetterVowel) {
                    continue;
                }
                if local.contains(LastVowelBack) {
                    out.push('a');
                } else if local.contains(LastVowelFrontal) {
                    out.push('e');
                } else {
                    return Err(harmony_error('A', out, local));
                }
            }
            TokenKind::IVowel => {
                if index == 0 && attributes.contains(LastLetterVowel) {
                    continue;
                }
                let rounded = local.contains(LastVowelRounded);
                if local.contains(LastVowelFrontal) {
                    out.push(if rounded { 'ü' } else { 'i' });
                } else if local.contains(LastVowelBack) {
                    out.push(if rounded { 'u' } else { 'ı' });
                } else {
                    return Err(harmony_error('I', out, local));
                }
            }
            TokenKind::Append => {
                if local.contains(LastLetterVowel) {
                    out.push(token.letter);
                }
            }
            TokenKind::DevoiceFirst => {
                let c = if local.contains(LastLetterVoiceless) {
                    alphabet::devoice(token.letter).unwrap_or(token.letter)
                } else {
                    token.letter
                };
                out.push(c);
            }
        }
    }
    Ok(out)
}

fn harmony_error(vowel: char, built: String, attributes: PhoneticAttributes) -> SurfaceError {
    SurfaceError::Harmony {
        vowel,
        built,
        attributes,
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// Per-transition memo of generated surfaces keyed by attribute bits.
///
/// Generation is pure, so concurrent fills of the same key store equal
/// values. Failures are not cached.
#[derive(Debug, Default)]
pub struct SurfaceCache {
    map: RwLock<HashMap<u32, Arc<str>>>,
}

impl SurfaceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(
        &self,
        tokens: &[TemplateToken],
        attributes: PhoneticAttributes,
    ) -> Result<Arc<str>, SurfaceError> {
        if let Some(s) = self.map.read().get(&attributes.bits()) {
            return Ok(Arc::clone(s));
        }
        let surface: Arc<str> = generate_surface(tokens, attributes)?.into();
        self.map
            .write()
            .entry(attributes.bits())
            .or_insert_with(|| Arc::clone(&surface));
        Ok(surface)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}
