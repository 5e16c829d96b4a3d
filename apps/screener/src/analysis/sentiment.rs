//! Lexicon-based sentiment polarity.
//!
//! Polarity is the mean score of the lexicon words found in the text, in
//! [-1, 1]. An intensifier scales the next scored word; a negation flips it
//! and halves it. Both modifiers expire after a few tokens.

use std::collections::HashMap;

/// Modifiers stay pending for this many tokens.
const MODIFIER_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &["not", "never", "no", "without", "hardly", "cannot"];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("really", 1.2),
    ("exceptionally", 1.5),
    ("incredibly", 1.4),
    ("truly", 1.2),
    ("deeply", 1.2),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.6),
];

/// `word polarity` per line.
const EMBEDDED_LEXICON: &str = include_str!("../../data/sentiment.txt");

#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self {
            lexicon: parse_lexicon(EMBEDDED_LEXICON).collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }
}

/// Skips comments and lines that are not a word followed by a number.
fn parse_lexicon(list: &str) -> impl Iterator<Item = (&str, f64)> {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (word, score) = line.split_once(char::is_whitespace)?;
            Some((word, score.trim().parse::<f64>().ok()?))
        })
}

impl SentimentAnalyzer {
    pub fn polarity(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let tokens = lower
            .split(|c: char| !(c.is_alphabetic() || c == '\''))
            .filter(|t| !t.is_empty());

        let mut scores: Vec<f64> = Vec::new();
        let mut negation: Option<usize> = None;
        let mut intensity: Option<(f64, usize)> = None;

        for (i, token) in tokens.enumerate() {
            if let Some(start) = negation {
                if i - start > MODIFIER_WINDOW {
                    negation = None;
                }
            }
            if let Some((_, start)) = intensity {
                if i - start > MODIFIER_WINDOW {
                    intensity = None;
                }
            }

            if NEGATIONS.contains(&token) || token.ends_with("n't") {
                negation = Some(i);
                continue;
            }
            if let Some(factor) = self.intensifiers.get(token) {
                intensity = Some((*factor, i));
                continue;
            }
            if let Some(score) = self.lexicon.get(token) {
                let mut score = *score;
                if let Some((factor, _)) = intensity.take() {
                    score = (score * factor).clamp(-1.0, 1.0);
                }
                if negation.take().is_some() {
                    score *= NEGATION_FACTOR;
                }
                scores.push(score);
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        (scores.iter().sum::<f64>() / scores.len() as f64).clamp(-1.0, 1.0)
    }
}
