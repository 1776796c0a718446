//! Readability scoring
//!
//! Flesch reading ease plus basic text statistics. The syllable counter
//! is a vowel-group heuristic with a silent-e adjustment; it is close
//! enough for scoring generated prose, not a dictionary.

use serde::Serialize;

/// Flesch reading ease: `206.835 - 1.015*(words/sentences) - 84.6*(syllables/words)`.
///
/// Returns 0.0 for text with no words or sentences. Higher is easier;
/// the score is unbounded in theory and usually lands in 0-100.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words = word_count(text);
    let sentences = sentence_count(text);
    if words == 0 || sentences == 0 {
        return 0.0;
    }
    let syllables: usize = text.split_whitespace().map(count_syllables).sum();

    206.835 - 1.015 * (words as f64 / sentences as f64) - 84.6 * (syllables as f64 / words as f64)
}

/// Reading level description for a Flesch score.
pub fn reading_level(score: f64) -> &'static str {
    if score >= 90.0 {
        "Very Easy (5th grade)"
    } else if score >= 80.0 {
        "Easy (6th grade)"
    } else if score >= 70.0 {
        "Fairly Easy (7th grade)"
    } else if score >= 60.0 {
        "Standard (8th-9th grade)"
    } else if score >= 50.0 {
        "Fairly Difficult (10th-12th grade)"
    } else if score >= 30.0 {
        "Difficult (College)"
    } else {
        "Very Difficult (College graduate)"
    }
}

/// Basic statistics about a piece of text
#[derive(Debug, Clone, Serialize)]
pub struct TextStats {
    pub word_count: usize,
    pub sentence_count: usize,
    pub syllable_count: usize,
    pub avg_sentence_length: f64,
}

/// Compute word/sentence/syllable statistics for `text`.
pub fn text_stats(text: &str) -> TextStats {
    let word_count = word_count(text);
    let sentence_count = sentence_count(text);
    let syllable_count = text.split_whitespace().map(count_syllables).sum();
    let avg_sentence_length = if sentence_count > 0 {
        let avg = word_count as f64 / sentence_count as f64;
        (avg * 100.0).round() / 100.0
    } else {
        0.0
    };

    TextStats {
        word_count,
        sentence_count,
        syllable_count,
        avg_sentence_length,
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn sentence_count(text: &str) -> usize {
    text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count()
}

/// Heuristic syllable count: contiguous vowel groups, minus a trailing
/// silent 'e', with a floor of one per word.
fn count_syllables(word: &str) -> usize {
    let cleaned: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_lowercase();
    if cleaned.is_empty() {
        return 0;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0usize;
    let mut prev_vowel = false;
    for c in cleaned.chars() {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    if cleaned.ends_with('e') && !cleaned.ends_with("le") && groups > 1 {
        groups -= 1;
    }

    groups.max(1)
}
