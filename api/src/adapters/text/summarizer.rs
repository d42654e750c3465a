//! Local extractive summarizer
//!
//! Picks whole sentences from the source text: a few opening sentences for
//! context, the best-scored middle sentences, then a closing sentence or two.
//! Scores come from stop-word-filtered term frequency with bonuses for
//! position and comfortable sentence length. Runs offline in a few
//! milliseconds.

use std::collections::{BTreeSet, HashMap, HashSet};

use regex::Regex;

use crate::domain::ports::Summarizer;
use crate::error::DomainError;

/// Returned when there is nothing to summarize
pub const EMPTY_TEXT_MESSAGE: &str = "The provided text is empty.";

/// Share of the word budget for the opening sentences
const LEADING_BUDGET: f64 = 0.3;
/// Share of the word budget once the middle sentences are in
const MIDDLE_BUDGET: f64 = 0.8;

const STOPWORDS: &[&str] = &[
    // Portuguese
    "a", "o", "de", "e", "do", "da", "em", "um", "uma", "para", "que", "se", "com", "os", "as",
    "no", "na", "por", "uns", "umas", "ao", "aos", "à", "às", "pelo", "pela", "pelos", "pelas",
    "num", "numa", "nuns", "numas", "dum", "duma", "duns", "dumas", "este", "esta", "estes",
    "estas", "esse", "essa", "esses", "essas", "aquele", "aquela", "aqueles", "aquelas", "isto",
    "isso", "aquilo", "outro", "outra", "outros", "outras", "tal", "tais", "qual", "quais",
    "cujo", "cuja", "cujos", "cujas", "quanto", "quanta", "quantos", "quantas", "qualquer",
    "quaisquer", "algum", "alguma", "alguns", "algumas", "nenhum", "nenhuma", "nenhuns",
    "nenhumas", "todo", "toda", "todos", "todas", "cada", "vários", "várias", "outrem", "tudo",
    "nada", "algo", "alguém", "ninguém", "quem", "sem", "sob", "sobre", "tras", "ante", "apos",
    "ate", "perante", "quando", "enquanto", "antes", "depois", "desde", "onde", "aonde", "como",
    "porque", "pois", "embora", "mesmo", "talvez", "sempre", "nunca", "jamais", "agora", "logo",
    "aqui", "ali", "la",
    // English
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "him", "his", "how", "its", "may", "who", "did", "this", "that",
    "with", "from", "they", "them", "then", "than", "there", "these", "those", "their", "what",
    "when", "where", "which", "while", "will", "would", "been", "being", "have", "were", "into",
    "also", "some", "such", "only", "other", "more", "most", "very", "each", "about",
];

/// Extractive summarizer based on word frequency
pub struct FrequencySummarizer {
    stopwords: HashSet<&'static str>,
    whitespace: Regex,
    sentence_break: Regex,
    non_word: Regex,
}

impl FrequencySummarizer {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            whitespace: Regex::new(r"\s+").unwrap(),
            sentence_break: Regex::new(r"[.!?]\s+").unwrap(),
            non_word: Regex::new(r"\W+").unwrap(),
        }
    }

    fn clean(&self, text: &str) -> String {
        self.whitespace.replace_all(text, " ").trim().to_string()
    }

    /// Split after `.`, `!` or `?` and drop fragments too short to be sentences
    fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut pieces = Vec::new();
        let mut start = 0;
        for m in self.sentence_break.find_iter(text) {
            pieces.push(&text[start..m.start() + 1]);
            start = m.end();
        }
        pieces.push(&text[start..]);

        pieces
            .into_iter()
            .map(str::trim)
            .filter(|s| word_count(s) > 3 && s.chars().count() > 10)
            .collect()
    }

    fn terms<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.non_word.split(lowered).filter(|w| !w.is_empty())
    }

    fn word_frequencies(&self, sentences: &[&str]) -> HashMap<String, u32> {
        let mut frequencies = HashMap::new();
        for sentence in sentences {
            let lowered = sentence.to_lowercase();
            for word in self.terms(&lowered) {
                if word.chars().count() > 2 && !self.stopwords.contains(word) {
                    *frequencies.entry(word.to_string()).or_insert(0) += 1;
                }
            }
        }
        frequencies
    }

    fn sentence_scores(&self, sentences: &[&str], frequencies: &HashMap<String, u32>) -> Vec<f64> {
        let total = sentences.len() as f64;
        let leading = (total * 0.1).min(5.0);
        let trailing = (total * 0.1).min(3.0);

        sentences
            .iter()
            .enumerate()
            .map(|(i, sentence)| {
                let lowered = sentence.to_lowercase();
                let mut score: f64 = self
                    .terms(&lowered)
                    .map(|w| f64::from(frequencies.get(w).copied().unwrap_or(0)))
                    .sum();

                let position = i as f64;
                if position < leading {
                    score *= 1.5;
                }
                if position >= total - trailing {
                    score *= 1.2;
                }

                let words = word_count(sentence);
                if (8..=25).contains(&words) {
                    score *= 1.1;
                }

                score / words as f64
            })
            .collect()
    }

    fn select(&self, sentences: &[&str], scores: &[f64], max_words: usize) -> BTreeSet<usize> {
        let n = sentences.len();
        let budget = max_words as f64;
        let mut selected = BTreeSet::new();
        let mut used = 0usize;

        for (i, sentence) in sentences.iter().enumerate().take(3) {
            let size = word_count(sentence);
            if (used + size) as f64 > budget * LEADING_BUDGET {
                break;
            }
            selected.insert(i);
            used += size;
        }

        let mut ranking: Vec<usize> = (0..n).collect();
        ranking.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        for i in ranking {
            if selected.contains(&i) || i < 3 || i >= n.saturating_sub(2) {
                continue;
            }
            let size = word_count(sentences[i]);
            if (used + size) as f64 <= budget * MIDDLE_BUDGET {
                selected.insert(i);
                used += size;
            }
        }

        let closing = (n / 10).min(2);
        for i in n - closing..n {
            let size = word_count(sentences[i]);
            if used + size > max_words {
                break;
            }
            if selected.insert(i) {
                used += size;
            }
        }

        selected
    }

    /// Plain truncation used when no sentence structure can be found
    fn truncate(&self, text: &str, max_words: usize) -> String {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.len() <= max_words {
            return with_terminal_punctuation(text);
        }
        format!("{}...", words[..max_words].join(" "))
    }
}

impl Default for FrequencySummarizer {
    fn default() -> Self {
        Self::new()
    }
}

fn word_count(sentence: &str) -> usize {
    sentence.split_whitespace().count()
}

fn with_terminal_punctuation(sentence: &str) -> String {
    if sentence.ends_with(['.', '!', '?']) {
        sentence.to_string()
    } else {
        format!("{}.", sentence)
    }
}

impl Summarizer for FrequencySummarizer {
    fn summarize(&self, text: &str, max_words: usize) -> Result<String, DomainError> {
        if text.trim().is_empty() {
            return Ok(EMPTY_TEXT_MESSAGE.to_string());
        }

        let cleaned = self.clean(text);
        let sentences = self.sentences(&cleaned);
        if sentences.is_empty() {
            return Ok(self.truncate(&cleaned, max_words));
        }

        let frequencies = self.word_frequencies(&sentences);
        let scores = self.sentence_scores(&sentences, &frequencies);
        let selected = self.select(&sentences, &scores, max_words);
        if selected.is_empty() {
            return Ok(self.truncate(&cleaned, max_words));
        }

        tracing::debug!(
            sentences = sentences.len(),
            selected = selected.len(),
            "Summary sentences selected"
        );

        Ok(selected
            .into_iter()
            .map(|i| with_terminal_punctuation(sentences[i]))
            .collect::<Vec<_>>()
            .join(" "))
    }
}
