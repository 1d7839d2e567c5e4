// Root lexicon and its text loader
//
// Line format:
//
//     kitap
//     Ankara [P:Noun,Prop]
//     ağız [A:LastVowelDrop]
//     zeytinyağı [A:CompoundP3sg; Roots:zeytin-yağ]
//     gitmek [A:Voicing, Aorist_A]
//
// `##` starts a comment line. Missing POS and root attributes are inferred
// from the word. Lines carrying `Ref` or `Roots` are resolved after every
// plain line has been read, since they point at other items.

use std::sync::Arc;

use hashbrown::HashMap;
use log::warn;
use turkmorph_core::alphabet;
use turkmorph_core::item::generate_id;
use turkmorph_core::{DictionaryItem, PrimaryPos, RootAttribute, SecondaryPos};

/// The lexicon compiled into the crate.
pub const DEFAULT_LEXICON: &str = include_str!("../data/lexicon.txt");

/// Error for a lexicon line that cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("lexicon line {line}: {reason}")]
pub struct LexiconError {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// RootLexicon
// ---------------------------------------------------------------------------

/// Dictionary items in load order, addressable by id and by lemma.
#[derive(Debug, Clone, Default)]
pub struct RootLexicon {
    items: Vec<Arc<DictionaryItem>>,
    by_id: HashMap<String, usize>,
}

impl RootLexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in lexicon.
    pub fn default_lexicon() -> Result<Self, LexiconError> {
        Self::parse(DEFAULT_LEXICON)
    }

    /// Parse lexicon text. The first malformed line is an error.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        TextLoader::default().load(text, false)
    }

    /// Parse lexicon text, skipping malformed lines with a warning.
    pub fn parse_lenient(text: &str) -> Self {
        match TextLoader::default().load(text, true) {
            Ok(lexicon) => lexicon,
            Err(_) => Self::default(),
        }
    }

    /// Add `item` unless an item with the same id is present. Returns the
    /// shared item that is in the lexicon afterwards.
    pub fn add(&mut self, item: DictionaryItem) -> Arc<DictionaryItem> {
        if let Some(&i) = self.by_id.get(&item.id) {
            return Arc::clone(&self.items[i]);
        }
        let item = Arc::new(item);
        self.by_id.insert(item.id.clone(), self.items.len());
        self.items.push(Arc::clone(&item));
        item
    }

    pub fn remove(&mut self, id: &str) -> Option<Arc<DictionaryItem>> {
        let i = self.by_id.remove(id)?;
        let item = self.items.remove(i);
        for slot in self.by_id.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(item)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<DictionaryItem>> {
        self.by_id.get(id).map(|&i| &self.items[i])
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Items whose lemma is `lemma`, lowest index first.
    pub fn items_by_lemma(&self, lemma: &str) -> Vec<&Arc<DictionaryItem>> {
        let mut items: Vec<_> = self.items.iter().filter(|i| i.lemma == lemma).collect();
        items.sort_by_key(|i| i.index);
        items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DictionaryItem>> {
        self.items.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// One lexicon line split into its word and metadata chunks.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct LineData<'a> {
    word: &'a str,
    pos: Option<&'a str>,
    attributes: Option<&'a str>,
    pronunciation: Option<&'a str>,
    reference: Option<&'a str>,
    roots: Option<&'a str>,
    index: Option<&'a str>,
}

impl<'a> LineData<'a> {
    fn parse(line: &'a str) -> Result<Self, String> {
        let (word, meta) = match line.split_once(char::is_whitespace) {
            Some((word, meta)) => (word, meta.trim()),
            None => (line, ""),
        };
        let mut data = LineData {
            word,
            ..Self::default()
        };
        if meta.is_empty() {
            return Ok(data);
        }
        let Some(meta) = meta.strip_prefix('[').and_then(|m| m.strip_suffix(']')) else {
            return Err(format!("malformed metadata, expected [..]: {meta}"));
        };
        for chunk in meta.split(';') {
            let Some((key, value)) = chunk.split_once(':') else {
                return Err(format!("metadata chunk `{}` has no `:`", chunk.trim()));
            };
            let value = value.trim();
            if value.is_empty() {
                return Err(format!("metadata chunk `{}` has no data", chunk.trim()));
            }
            let slot = match key.trim() {
                "P" => &mut data.pos,
                "A" => &mut data.attributes,
                "Pr" => &mut data.pronunciation,
                "Ref" => &mut data.reference,
                "Roots" => &mut data.roots,
                "Index" => &mut data.index,
                other => return Err(format!("unknown metadata id `{other}`")),
            };
            *slot = Some(value);
        }
        Ok(data)
    }
}

fn is_verb(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_lowercase)
        && word.chars().count() > 3
        && (word.ends_with("mek") || word.ends_with("mak"))
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn parse_pos(pos: Option<&str>, word: &str) -> Result<(PrimaryPos, SecondaryPos), String> {
    let mut primary = None;
    let mut secondary = None;
    if let Some(pos) = pos {
        let tokens: Vec<&str> = pos.split(',').map(str::trim).filter(|t| !t.is_empty()).collect();
        if tokens.len() > 2 {
            return Err(format!("only two POS tokens are allowed: {pos}"));
        }
        for token in tokens {
            // `Ques` is both a primary and a secondary POS: primary first.
            let as_primary = PrimaryPos::from_short_form(token).ok();
            let as_secondary = SecondaryPos::from_short_form(token).ok();
            match (as_primary, as_secondary) {
                (Some(p), _) if primary.is_none() => primary = Some(p),
                (_, Some(s)) if secondary.is_none() => secondary = Some(s),
                (None, None) => return Err(format!("unrecognized POS `{token}`")),
                _ => return Err(format!("duplicate POS `{token}` in {pos}")),
            }
        }
    }
    let primary = primary.unwrap_or(if is_verb(word) { PrimaryPos::Verb } else { PrimaryPos::Noun });
    let secondary = secondary.unwrap_or(if is_capitalized(word) {
        SecondaryPos::ProperNoun
    } else {
        SecondaryPos::None
    });
    Ok((primary, secondary))
}

/// Root spelling: verbs lose `mek`/`mak`, then Turkish lowercase without
/// circumflexes, dashes and apostrophes.
fn clean_root(word: &str, primary: PrimaryPos) -> String {
    if primary == PrimaryPos::Punctuation {
        return word.to_string();
    }
    let word = if primary == PrimaryPos::Verb && is_verb(word) {
        &word[..word.len() - 3]
    } else {
        word
    };
    alphabet::normalize_circumflex(&alphabet::to_lowercase(word))
        .chars()
        .filter(|c| !matches!(c, '-' | '\''))
        .collect()
}

fn parse_attributes(attributes: Option<&str>) -> Result<Vec<RootAttribute>, String> {
    let mut out = Vec::new();
    for name in attributes.into_iter().flat_map(|a| a.split(',')) {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let attr = RootAttribute::from_name(name).map_err(|e| e.to_string())?;
        if !out.contains(&attr) {
            out.push(attr);
        }
    }
    Ok(out)
}

/// Add the root attributes Turkish spelling rules imply for `word`.
pub fn infer_attributes(word: &str, primary: PrimaryPos, secondary: SecondaryPos, attrs: &mut Vec<RootAttribute>) {
    use RootAttribute::*;

    let Some(last) = word.chars().next_back() else {
        return;
    };
    fn add(a: RootAttribute, attrs: &mut Vec<RootAttribute>) {
        if !attrs.contains(&a) {
            attrs.push(a);
        }
    }
    let last_is_vowel = alphabet::is_vowel(last);
    let vowels = alphabet::vowel_count(word);
    match primary {
        PrimaryPos::Verb => {
            if last_is_vowel {
                add(ProgressiveVowelDrop, attrs);
                add(Passive_In, attrs);
            }
            if vowels > 1 && !attrs.contains(&Aorist_A) {
                add(Aorist_I, attrs);
            }
            if vowels == 1 && !attrs.contains(&Aorist_I) {
                add(Aorist_A, attrs);
            }
            if last == 'l' {
                add(Passive_In, attrs);
            }
            if last_is_vowel || (matches!(last, 'l' | 'r') && vowels > 1) {
                add(Causative_t, attrs);
            }
        }
        PrimaryPos::Noun | PrimaryPos::Adjective | PrimaryPos::Duplicator => {
            let proper = secondary == SecondaryPos::ProperNoun;
            if vowels > 1
                && alphabet::letter(last).is_stop_consonant()
                && !proper
                && !attrs.contains(&NoVoicing)
                && !attrs.contains(&InverseHarmony)
            {
                add(Voicing, attrs);
            }
            if word.ends_with("nk") || word.ends_with("og") {
                if !attrs.contains(&NoVoicing) && !proper {
                    add(Voicing, attrs);
                }
            } else if vowels < 2 && !attrs.contains(&Voicing) {
                add(NoVoicing, attrs);
            }
        }
        _ => {}
    }
}

fn item_from_line(data: &LineData<'_>) -> Result<DictionaryItem, String> {
    let (primary, secondary) = parse_pos(data.pos, data.word)?;
    let root = clean_root(data.word, primary);
    if root.is_empty() {
        return Err(format!("word `{}` has an empty root", data.word));
    }
    let index = match data.index {
        Some(i) => i.parse::<u32>().map_err(|e| format!("bad index `{i}`: {e}"))?,
        None => 0,
    };
    let pronunciation = match data.pronunciation {
        Some(p) => alphabet::to_lowercase(p),
        None if primary == PrimaryPos::Punctuation => "a".to_string(),
        None => root.clone(),
    };
    let mut attributes = parse_attributes(data.attributes)?;
    infer_attributes(&pronunciation, primary, secondary, &mut attributes);
    Ok(DictionaryItem::with_index(
        data.word,
        root,
        pronunciation,
        primary,
        secondary,
        attributes,
        index,
    ))
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TextLoader<'a> {
    lexicon: RootLexicon,
    /// Lines with `Ref` or `Roots`, with their line numbers.
    late: Vec<(usize, LineData<'a>)>,
}

impl<'a> TextLoader<'a> {
    fn load(mut self, text: &'a str, lenient: bool) -> Result<RootLexicon, LexiconError> {
        for (n, line) in text.lines().enumerate() {
            let line_no = n + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with("##") {
                continue;
            }
            if let Err(reason) = self.line(line_no, line) {
                let err = LexiconError { line: line_no, reason };
                if !lenient {
                    return Err(err);
                }
                warn!("Skipping {err}");
            }
        }
        for (line_no, data) in std::mem::take(&mut self.late) {
            if let Err(reason) = self.late_line(&data) {
                let err = LexiconError { line: line_no, reason };
                if !lenient {
                    return Err(err);
                }
                warn!("Skipping {err}");
            }
        }
        Ok(self.lexicon)
    }

    fn line(&mut self, line_no: usize, line: &'a str) -> Result<(), String> {
        let data = LineData::parse(line)?;
        if data.reference.is_some() || data.roots.is_some() {
            self.late.push((line_no, data));
        } else {
            self.lexicon.add(item_from_line(&data)?);
        }
        Ok(())
    }

    fn late_line(&mut self, data: &LineData<'_>) -> Result<(), String> {
        if let Some(reference) = data.reference {
            let reference = if reference.contains('_') {
                reference.to_string()
            } else {
                format!("{reference}_Noun")
            };
            if !self.lexicon.contains(&reference) {
                warn!("Cannot find reference item id {reference}");
            }
            let mut item = item_from_line(data)?;
            item.reference_id = Some(reference);
            self.lexicon.add(item);
        }
        if let Some(roots) = data.roots {
            self.compound_root(data, roots)?;
        }
        Ok(())
    }

    /// `zeytinyağı [A:CompoundP3sg; Roots:zeytin-yağ]` adds a hidden
    /// `zeytinyağ` root that takes the attributes of `yağ` and refers back to
    /// the compound.
    fn compound_root(&mut self, data: &LineData<'_>, roots: &str) -> Result<(), String> {
        let (primary, secondary) = parse_pos(data.pos, data.word)?;
        let compound_id = generate_id(data.word, primary, secondary, 0);
        let compound = match self.lexicon.get(&compound_id) {
            Some(item) => Arc::clone(item),
            None => self.lexicon.add(item_from_line(data)?),
        };

        let root: String = roots.chars().filter(|c| *c != '-').collect();
        let last_part = roots.rsplit('-').next().unwrap_or(roots);
        let mut attributes = match self.lexicon.items_by_lemma(last_part).first() {
            Some(part) => part.attributes.clone(),
            None => {
                let mut inferred = Vec::new();
                infer_attributes(&root, primary, secondary, &mut inferred);
                inferred
            }
        };
        attributes.retain(|a| *a != RootAttribute::Voicing);
        for extra in [RootAttribute::CompoundP3sgRoot, RootAttribute::Dummy] {
            if !attributes.contains(&extra) {
                attributes.push(extra);
            }
        }
        if compound.has_attribute(RootAttribute::Ext) && !attributes.contains(&RootAttribute::Ext) {
            attributes.push(RootAttribute::Ext);
        }

        let index = u32::from(self.lexicon.contains(&generate_id(&root, primary, secondary, 0)));
        let mut fake = DictionaryItem::with_index(
            root.clone(),
            root.clone(),
            root,
            compound.primary_pos,
            compound.secondary_pos,
            attributes,
            index,
        );
        fake.reference_id = Some(compound.id.clone());
        self.lexicon.add(fake);
        Ok(())
    }
}
