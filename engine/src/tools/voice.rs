//! Brand voice analysis
//!
//! Deterministic scoring of how closely a piece of text matches the
//! configured brand voice: tone indicator hits, avoided-word usage,
//! and sentence length against the stated preference. Advisory only,
//! like the rest of the local tools.

use crate::config::{BrandVoice, VoicePreferences};
use serde::Serialize;

/// Tone indicator match against a target tone
#[derive(Debug, Clone, Serialize)]
pub struct ToneAnalysis {
    pub tone: String,
    pub match_score: f64,
    pub matches_found: usize,
    pub indicators_checked: usize,
}

/// One avoided word found in the text
#[derive(Debug, Clone, Serialize)]
pub struct AvoidedWordUse {
    pub word: String,
    pub count: usize,
}

/// Avoided-word scan result
#[derive(Debug, Clone, Serialize)]
pub struct AvoidedWordsAnalysis {
    pub avoided_words_used: usize,
    pub clean: bool,
    pub details: Vec<AvoidedWordUse>,
}

/// Sentence length distribution against the preference
#[derive(Debug, Clone, Serialize)]
pub struct StructureAnalysis {
    pub avg_sentence_length: f64,
    pub target_range: (usize, usize),
    pub match_percentage: f64,
    pub total_sentences: usize,
}

/// Weighted overall voice match report
#[derive(Debug, Clone, Serialize)]
pub struct VoiceReport {
    pub overall_score: f64,
    pub recommendation: &'static str,
    pub tone: ToneAnalysis,
    pub avoided_words: AvoidedWordsAnalysis,
    pub structure: StructureAnalysis,
}

fn tone_indicators(tone: &str) -> &'static [&'static str] {
    match tone {
        "professional" => &[
            "therefore",
            "however",
            "furthermore",
            "additionally",
            "consequently",
        ],
        "casual" => &["hey", "awesome", "cool", "basically", "stuff", "things"],
        "friendly" => &["you", "your", "we", "our", "together"],
        "authoritative" => &[
            "research shows",
            "studies indicate",
            "evidence suggests",
            "proven",
            "demonstrated",
        ],
        "conversational" => &["you know", "let's", "we'll", "you're", "it's"],
        _ => &[],
    }
}

/// Count tone indicators for the target tone. Unknown tones have no
/// indicator list and score a neutral 50.
pub fn analyze_tone(text: &str, target_tone: &str) -> ToneAnalysis {
    let text_lower = text.to_lowercase();
    let indicators = tone_indicators(target_tone.to_lowercase().trim());
    let matches = indicators
        .iter()
        .filter(|w| text_lower.contains(**w))
        .count();
    let score = if indicators.is_empty() {
        50.0
    } else {
        (matches as f64 / indicators.len() as f64 * 100.0).min(100.0)
    };

    ToneAnalysis {
        tone: target_tone.to_string(),
        match_score: round2(score),
        matches_found: matches,
        indicators_checked: indicators.len(),
    }
}

/// Case-insensitive scan for words the voice profile says to avoid.
pub fn check_avoided_words(text: &str, avoid: &[String]) -> AvoidedWordsAnalysis {
    let text_lower = text.to_lowercase();
    let details: Vec<AvoidedWordUse> = avoid
        .iter()
        .filter_map(|word| {
            let count = text_lower.matches(&word.to_lowercase()).count();
            (count > 0).then(|| AvoidedWordUse {
                word: word.clone(),
                count,
            })
        })
        .collect();

    AvoidedWordsAnalysis {
        avoided_words_used: details.len(),
        clean: details.is_empty(),
        details,
    }
}

/// Share of sentences whose word count falls in the preferred range
/// (short 5-12, medium 12-20, long 20-30).
pub fn analyze_sentence_structure(text: &str, preferences: &VoicePreferences) -> StructureAnalysis {
    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    let word_counts: Vec<usize> = sentences
        .iter()
        .map(|s| s.split_whitespace().count())
        .collect();

    let avg = if word_counts.is_empty() {
        0.0
    } else {
        word_counts.iter().sum::<usize>() as f64 / word_counts.len() as f64
    };

    let target_range = match preferences.sentence_length.as_str() {
        "short" => (5, 12),
        "long" => (20, 30),
        _ => (12, 20),
    };
    let in_range = word_counts
        .iter()
        .filter(|wc| (target_range.0..=target_range.1).contains(*wc))
        .count();
    let match_percentage = if word_counts.is_empty() {
        0.0
    } else {
        in_range as f64 / word_counts.len() as f64 * 100.0
    };

    StructureAnalysis {
        avg_sentence_length: round2(avg),
        target_range,
        match_percentage: round2(match_percentage),
        total_sentences: sentences.len(),
    }
}

/// Weighted overall match: tone 40%, avoided words 30%, structure 30%.
/// Each avoided-word hit costs 10 points off the avoidance score.
pub fn overall_voice_match(text: &str, voice: &BrandVoice) -> VoiceReport {
    let tone = analyze_tone(text, &voice.tone);
    let avoided = check_avoided_words(text, &voice.avoid);
    let structure = analyze_sentence_structure(text, &voice.preferences);

    let avoid_score = if avoided.clean {
        100.0
    } else {
        (100.0 - avoided.avoided_words_used as f64 * 10.0).max(0.0)
    };
    let overall = tone.match_score * 0.4 + avoid_score * 0.3 + structure.match_percentage * 0.3;
    let overall_score = round2(overall);

    VoiceReport {
        overall_score,
        recommendation: if overall_score >= 80.0 {
            "Good match"
        } else {
            "Needs adjustment"
        },
        tone,
        avoided_words: avoided,
        structure,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
