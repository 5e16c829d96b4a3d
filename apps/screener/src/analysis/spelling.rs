//! Dictionary-based spelling corrector.
//!
//! Norvig-style: a word is kept if it is known, otherwise the most frequent
//! known word one edit away wins, then two edits away. Unknown words with no
//! known neighbour are left as they are and are not counted as misspelled.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::text::words;

const EMBEDDED_WORDS: &str = include_str!("../../data/words.txt");
const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Inflections accepted when the bare stem is in the dictionary.
const SUFFIXES: &[&str] = &[
    "ing", "ed", "es", "s", "er", "ers", "ly", "ment", "ments", "tion", "tions", "ness", "ity",
    "al", "ful", "able",
];

#[derive(Debug, Clone)]
pub struct SpellChecker {
    /// word -> relative frequency (higher is more common)
    frequencies: HashMap<String, u32>,
}

impl SpellChecker {
    /// Builds a checker from a frequency-ordered word list: one or more words
    /// per line, `#` starts a comment line, earlier words are more frequent.
    pub fn from_word_list(list: &str) -> Self {
        let mut checker = Self {
            frequencies: HashMap::new(),
        };
        checker.extend_from_word_list(list);
        checker
    }

    /// Merges another frequency-ordered list. Words already present keep
    /// their original frequency.
    pub fn extend_from_word_list(&mut self, list: &str) {
        let ordered: Vec<&str> = list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect();

        let total = ordered.len() as u32;
        for (rank, word) in ordered.into_iter().enumerate() {
            self.frequencies
                .entry(word.to_lowercase())
                .or_insert(total - rank as u32);
        }
    }

    /// Merges a word list file from disk.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let list = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read spelling word list {}", path.display()))?;
        let before = self.len();
        self.extend_from_word_list(&list);
        tracing::info!(
            path = %path.display(),
            added = self.len() - before,
            "Extended spelling dictionary"
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Known as-is, or a regular inflection of a known stem.
    pub fn is_known(&self, word: &str) -> bool {
        if self.frequencies.contains_key(word) {
            return true;
        }
        SUFFIXES.iter().any(|suffix| {
            word.strip_suffix(*suffix).is_some_and(|stem| {
                stem.len() >= 3
                    && (self.frequencies.contains_key(stem)
                        || self.frequencies.contains_key(&format!("{stem}e"))
                        || undoubled(stem).is_some_and(|s| self.frequencies.contains_key(s)))
            })
        })
    }

    /// Best correction for a single word.
    ///
    /// Single letters are returned untouched. Title-case input gets a
    /// title-case correction; any other casing is matched verbatim against
    /// the lowercase dictionary.
    pub fn correct(&self, word: &str) -> String {
        if word.chars().count() <= 1 {
            return word.to_string();
        }

        let title = is_title_case(word);
        let lookup = if title {
            word.to_lowercase()
        } else {
            word.to_string()
        };

        if self.is_known(&lookup) {
            return word.to_string();
        }

        let first = edits1(&lookup);
        let best = self.best_known(first.iter()).or_else(|| {
            let second: Vec<String> = first.iter().flat_map(|e| edits1(e)).collect();
            self.best_known(second.iter())
        });

        match best {
            Some(candidate) if title => to_title_case(&candidate),
            Some(candidate) => candidate,
            None => word.to_string(),
        }
    }

    /// Number of words in `text` whose correction differs from the word.
    pub fn count_misspellings(&self, text: &str) -> u32 {
        let mut cache: HashMap<&str, bool> = HashMap::new();
        words(text)
            .into_iter()
            .filter(|word| {
                let word: &str = word;
                *cache
                    .entry(word)
                    .or_insert_with(|| self.correct(word) != word)
            })
            .count() as u32
    }

    fn best_known<'a>(&self, candidates: impl Iterator<Item = &'a String>) -> Option<String> {
        candidates
            .filter_map(|c| self.frequencies.get(c.as_str()).map(|f| (*f, c)))
            .max_by(|(fa, ca), (fb, cb)| fa.cmp(fb).then_with(|| cb.cmp(ca)))
            .map(|(_, c)| c.clone())
    }
}

impl Default for SpellChecker {
    fn default() -> Self {
        Self::from_word_list(EMBEDDED_WORDS)
    }
}

/// All strings one delete, transpose, replace or insert away.
fn edits1(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = Vec::with_capacity(54 * n + 25);

    for i in 0..n {
        let mut w = chars.clone();
        w.remove(i);
        out.push(w.into_iter().collect());
    }
    for i in 0..n.saturating_sub(1) {
        let mut w = chars.clone();
        w.swap(i, i + 1);
        out.push(w.into_iter().collect());
    }
    for i in 0..n {
        for c in ALPHABET.chars() {
            let mut w = chars.clone();
            w[i] = c;
            out.push(w.into_iter().collect());
        }
    }
    for i in 0..=n {
        for c in ALPHABET.chars() {
            let mut w = chars.clone();
            w.insert(i, c);
            out.push(w.into_iter().collect());
        }
    }
    out
}

/// "shipp" -> "ship", for "shipped" / "shipping".
fn undoubled(stem: &str) -> Option<&str> {
    let mut rev = stem.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(a), Some(b)) if a == b && a.is_ascii_alphabetic() => {
            Some(&stem[..stem.len() - a.len_utf8()])
        }
        _ => None,
    }
}

fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| !c.is_uppercase()),
        _ => false,
    }
}

fn to_title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
