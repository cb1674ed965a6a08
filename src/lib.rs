use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::Serialize;
use tracing::{debug, trace};

pub mod error;
pub mod input;
pub mod report;

pub use error::{ReadabilityError, Result};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// Corpus-level counts derived from normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusMetrics {
    pub total_syllables: usize,
    pub total_words: usize,
    pub total_sentences: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReadabilityScores {
    pub reading_ease: f64,
    pub grade_level: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub metrics: CorpusMetrics,
    pub scores: ReadabilityScores,
    pub top_words: Vec<WordFrequency>,
}

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

/// Token substituted for `.`, `?` and `!`. Uppercase, so it cannot survive
/// the lowercase fold of real input.
pub const SENTENCE_MARKER: &str = "XXX";

pub const DEFAULT_TOP_N: usize = 10;

pub const DEFAULT_REPORT_PATH: &str = "report.csv";

struct Hyperparameters {
    ease_base: f64,
    ease_words_per_sentence: f64,
    ease_syllables_per_word: f64,
    grade_words_per_sentence: f64,
    grade_syllables_per_word: f64,
    grade_offset: f64,
}

static HP: Hyperparameters = Hyperparameters {
    ease_base: 206.835,
    ease_words_per_sentence: 1.015,
    ease_syllables_per_word: 84.6,
    grade_words_per_sentence: 0.39,
    grade_syllables_per_word: 11.8,
    grade_offset: 15.59,
};

// ---------------------------------------------------------------------------
// Lookup lists
// ---------------------------------------------------------------------------

/// Applied in order, as plain substring replacements.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("mr.", "mr"),
    ("mrs.", "mrs"),
    ("ms.", "ms"),
    ("dr.", "dr"),
    ("st.", "st"),
    ("prof.", "prof"),
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Order matters: each pattern is subtracted in turn.
const DIPHTHONGS: &[&str] = &[
    "oi", "oy", "ou", "ow", "ai", "au", "ay", "aw", "oo", "ie", "ea", "ee",
];

static SILENT_E_EXCEPTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "recipe",
        "apostrophe",
        "catastrophe",
        "acne",
        "epitome",
        "karate",
        "sesame",
        "posse",
        "vigilante",
        "cliche",
        "fiance",
        "resume",
        "middle",
        "the",
    ]
    .into_iter()
    .collect()
});

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.?!]").unwrap());

static PADDED_MARKER: Lazy<String> = Lazy::new(|| format!(" {SENTENCE_MARKER} "));

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

fn normalize_line(line: &str) -> String {
    let mut line = line.trim_end().to_lowercase();
    for &(dotted, bare) in ABBREVIATIONS {
        line = line.replace(dotted, bare);
    }
    SENTENCE_END_RE
        .replace_all(&line, NoExpand(PADDED_MARKER.as_str()))
        .into_owned()
}

/// Fold each line to lowercase, un-dot the known abbreviations, swap terminal
/// punctuation for the sentence marker and join the lines with no separator.
pub fn normalize_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| normalize_line(line.as_ref()))
        .collect()
}

pub fn normalize(text: &str) -> String {
    normalize_lines(text.lines())
}

// ---------------------------------------------------------------------------
// Punctuation
// ---------------------------------------------------------------------------

/// Drop every ASCII punctuation character. Neighbouring characters fuse.
pub fn remove_punctuation(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

// ---------------------------------------------------------------------------
// Syllables
// ---------------------------------------------------------------------------

/// Heuristic syllable count: vowels, minus a silent trailing `e`, minus one per
/// diphthong occurrence. Never returns less than 1.
pub fn syllables_per_word(word: &str) -> usize {
    let word = word.to_lowercase();

    let mut count: i64 = VOWELS
        .iter()
        .map(|v| word.matches(*v).count() as i64)
        .sum();
    trace!(word = %word, count, "vowels");

    if word.ends_with('e') && !SILENT_E_EXCEPTIONS.contains(word.as_str()) && count != 0 {
        count -= 1;
    }
    trace!(word = %word, count, "after silent e");

    for diphthong in DIPHTHONGS {
        count -= word.matches(*diphthong).count() as i64;
    }
    trace!(word = %word, count, "after diphthongs");

    if count <= 0 {
        1
    } else {
        count as usize
    }
}

// ---------------------------------------------------------------------------
// Corpus metrics
// ---------------------------------------------------------------------------

fn without_markers(normalized: &str) -> String {
    normalized.replace(SENTENCE_MARKER, " ")
}

pub fn total_words(normalized: &str) -> usize {
    without_markers(normalized).split_whitespace().count()
}

pub fn total_sentences(normalized: &str) -> usize {
    normalized.matches(SENTENCE_MARKER).count()
}

/// No filtering beyond whitespace splitting: every token gets at least 1.
pub fn total_syllables(normalized: &str) -> usize {
    without_markers(normalized)
        .split_whitespace()
        .map(syllables_per_word)
        .sum()
}

impl CorpusMetrics {
    pub fn from_normalized(normalized: &str) -> Self {
        Self {
            total_syllables: total_syllables(normalized),
            total_words: total_words(normalized),
            total_sentences: total_sentences(normalized),
        }
    }

    fn is_degenerate(&self) -> bool {
        self.total_words == 0 || self.total_sentences == 0
    }
}

// ---------------------------------------------------------------------------
// Formulas
// ---------------------------------------------------------------------------

fn ratios(syllables: usize, words: usize, sentences: usize) -> Option<(f64, f64)> {
    if syllables == 0 || words == 0 || sentences == 0 {
        return None;
    }
    let words_per_sentence = words as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words as f64;
    Some((words_per_sentence, syllables_per_word))
}

/// `206.835 - 1.015 * (W/T) - 84.6 * (S/W)`, or 0 if any count is 0.
pub fn flesch_reading_ease(syllables: usize, words: usize, sentences: usize) -> f64 {
    match ratios(syllables, words, sentences) {
        Some((wps, spw)) => {
            HP.ease_base - HP.ease_words_per_sentence * wps - HP.ease_syllables_per_word * spw
        }
        None => 0.0,
    }
}

/// `0.39 * (W/T) + 11.8 * (S/W) - 15.59`, or 0 if any count is 0.
pub fn flesch_kincaid_grade_level(syllables: usize, words: usize, sentences: usize) -> f64 {
    match ratios(syllables, words, sentences) {
        Some((wps, spw)) => {
            HP.grade_words_per_sentence * wps + HP.grade_syllables_per_word * spw
                - HP.grade_offset
        }
        None => 0.0,
    }
}

impl ReadabilityScores {
    pub fn from_metrics(metrics: &CorpusMetrics) -> Self {
        let CorpusMetrics {
            total_syllables,
            total_words,
            total_sentences,
        } = *metrics;
        Self {
            reading_ease: flesch_reading_ease(total_syllables, total_words, total_sentences),
            grade_level: flesch_kincaid_grade_level(total_syllables, total_words, total_sentences),
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// Count punctuation-free tokens, in first-seen order.
pub fn word_frequencies(normalized: &str) -> Vec<WordFrequency> {
    let stripped = remove_punctuation(normalized);
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut table: Vec<WordFrequency> = Vec::new();
    for token in stripped.split_whitespace() {
        match index.get(token) {
            Some(&i) => table[i].count += 1,
            None => {
                index.insert(token, table.len());
                table.push(WordFrequency {
                    word: token.to_string(),
                    count: 1,
                });
            }
        }
    }
    table
}

/// Descending by count. The sort is stable, so ties keep first-seen order.
pub fn rank_words(mut table: Vec<WordFrequency>) -> Vec<WordFrequency> {
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

/// The `n` most frequent words. The sentence marker is skipped without using
/// up a slot.
pub fn top_words(normalized: &str, n: usize) -> Vec<WordFrequency> {
    let ranked = rank_words(word_frequencies(normalized));
    debug!(distinct = ranked.len(), n, "ranked words");
    ranked
        .into_iter()
        .filter(|entry| entry.word != SENTENCE_MARKER)
        .take(n)
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[tracing::instrument(skip(lines))]
pub fn analyze_lines<I, S>(lines: I, top_n: usize) -> Result<AnalysisResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized = normalize_lines(lines);
    let metrics = CorpusMetrics::from_normalized(&normalized);
    debug!(
        syllables = metrics.total_syllables,
        words = metrics.total_words,
        sentences = metrics.total_sentences,
        "corpus metrics"
    );

    if metrics.is_degenerate() {
        return Err(ReadabilityError::DegenerateCorpus {
            words: metrics.total_words,
            sentences: metrics.total_sentences,
        });
    }

    Ok(AnalysisResult {
        metrics,
        scores: ReadabilityScores::from_metrics(&metrics),
        top_words: top_words(&normalized, top_n),
    })
}

pub fn analyze(text: &str, top_n: usize) -> Result<AnalysisResult> {
    analyze_lines(text.lines(), top_n)
}
