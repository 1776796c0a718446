//! Content validation
//!
//! Deterministic quality checks on generated content: word counts,
//! markdown structure, platform character limits, email structure,
//! video script structure. Advisory only; the pipeline never rejects
//! content on a validation failure.

use crate::pipeline::Platform;
use regex::Regex;
use serde::Serialize;

const BLOG_MIN_WORDS: usize = 1500;
const BLOG_MAX_WORDS: usize = 2500;

/// Outcome of validating one piece of content
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub score: u32,
    pub issues: Vec<String>,
}

impl Validation {
    fn from_issues(score: u32, issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            score,
            issues,
        }
    }
}

/// Blog post: word count in range, an H1 title, H2 section headers.
pub fn validate_blog_post(content: &str) -> Validation {
    let word_count = content.split_whitespace().count();
    let h1_re = Regex::new(r"(?m)^#\s+.+$").unwrap();
    let h2_re = Regex::new(r"(?m)^##\s+.+$").unwrap();
    let has_title = h1_re.is_match(content);
    let has_headers = h2_re.is_match(content);

    let mut issues = Vec::new();
    if word_count < BLOG_MIN_WORDS {
        issues.push(format!(
            "Word count too low: {} (minimum {})",
            word_count, BLOG_MIN_WORDS
        ));
    } else if word_count > BLOG_MAX_WORDS {
        issues.push(format!(
            "Word count too high: {} (maximum {})",
            word_count, BLOG_MAX_WORDS
        ));
    }
    if !has_title {
        issues.push("Missing H1 title".to_string());
    }
    if !has_headers {
        issues.push("Missing H2 headers".to_string());
    }
    if content.trim().is_empty() {
        issues.push("Content is empty".to_string());
    }

    let mut score = 0;
    if (BLOG_MIN_WORDS..=BLOG_MAX_WORDS).contains(&word_count) {
        score += 40;
    } else if word_count as f64 > BLOG_MIN_WORDS as f64 * 0.8 {
        score += 20;
    }
    if has_title {
        score += 30;
    }
    if has_headers {
        score += 30;
    }

    Validation::from_issues(score, issues)
}

/// Per-platform character limit for social posts.
fn char_limit(platform: Platform) -> usize {
    match platform {
        Platform::Twitter => 280,
        Platform::Linkedin => 3000,
        _ => 1000,
    }
}

/// Social post: non-empty, within the platform limit, hashtags present.
pub fn validate_social_post(content: &str, platform: Platform) -> Validation {
    let char_count = content.chars().count();
    let max_chars = char_limit(platform);
    let within_limit = char_count <= max_chars;
    let has_hashtags = content.contains('#');

    let mut issues = Vec::new();
    if content.trim().is_empty() {
        issues.push("Content is empty".to_string());
    }
    if !within_limit {
        issues.push(format!(
            "Exceeds {} limit: {}/{} characters",
            platform, char_count, max_chars
        ));
    }
    if !has_hashtags {
        issues.push(format!("Consider adding hashtags for {}", platform));
    }

    let score = [within_limit, has_hashtags, !content.trim().is_empty()]
        .iter()
        .filter(|ok| **ok)
        .count() as u32
        * 33;

    Validation::from_issues(score, issues)
}

/// Email newsletter: subject line, body length, a call-to-action,
/// word count near the 300-600 target.
pub fn validate_email(content: &str) -> Validation {
    let upper = content.to_uppercase();
    let has_subject = content.contains("Subject:") || upper.contains("SUBJECT LINE");
    let has_body = content.len() > 100;
    let has_cta = ["CLICK", "LEARN MORE", "READ", "GET", "DOWNLOAD"]
        .iter()
        .any(|word| upper.contains(word));
    let word_count = content.split_whitespace().count();
    let optimal_length = (300..=600).contains(&word_count);

    let mut issues = Vec::new();
    if !has_subject {
        issues.push("Missing subject line".to_string());
    }
    if !has_body {
        issues.push("Email body too short".to_string());
    }
    if !has_cta {
        issues.push("Missing clear call-to-action".to_string());
    }
    if !optimal_length {
        issues.push(format!(
            "Word count not optimal: {} (target: 300-600)",
            word_count
        ));
    }

    let score = [has_subject, has_body, has_cta, optimal_length]
        .iter()
        .filter(|ok| **ok)
        .count() as u32
        * 25;

    Validation::from_issues(score, issues)
}

/// Video script: timestamps, an opening hook, multiple sections, and
/// at least 800 words (roughly five minutes of speech).
pub fn validate_video_script(content: &str) -> Validation {
    let timestamp_re = Regex::new(r"\[\d{2}:\d{2}\]").unwrap();
    let has_timestamps = timestamp_re.is_match(content);
    let has_hook = content.contains("[00:00]") || content.contains("[0:00]");
    let has_sections = content.matches('[').count() >= 3;
    let word_count = content.split_whitespace().count();

    let mut issues = Vec::new();
    if !has_timestamps {
        issues.push("Missing timestamps".to_string());
    }
    if !has_hook {
        issues.push("Missing hook section at start".to_string());
    }
    if !has_sections {
        issues.push("Needs more sections/chapters".to_string());
    }
    if word_count < 800 {
        issues.push(format!(
            "Script too short: {} words (minimum 800)",
            word_count
        ));
    }

    let score = [has_timestamps, has_hook, has_sections, word_count >= 800]
        .iter()
        .filter(|ok| **ok)
        .count() as u32
        * 25;

    Validation::from_issues(score, issues)
}
