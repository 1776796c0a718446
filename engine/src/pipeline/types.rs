//! Pipeline data types
//!
//! Platforms, stage identifiers, and the result/metrics structures the
//! pipeline hands back to callers and persists into content history.

use crate::metrics::TimingStats;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A content platform the pipeline can generate for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Blog,
    Linkedin,
    Twitter,
    Email,
    Youtube,
}

impl Platform {
    /// All platforms in generation order, blog first. The blog draft
    /// feeds fact-checking, editing, and SEO, so its generation
    /// failure is fatal while every other platform soft-fails.
    pub const ALL: [Platform; 5] = [
        Platform::Blog,
        Platform::Linkedin,
        Platform::Twitter,
        Platform::Email,
        Platform::Youtube,
    ];

    /// Lowercase key used in content maps, filenames, and metric names.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Blog => "blog",
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Email => "email",
            Platform::Youtube => "youtube",
        }
    }

    /// Display title used in placeholder text and log lines.
    pub fn title(&self) -> &'static str {
        match self {
            Platform::Blog => "Blog",
            Platform::Linkedin => "Linkedin",
            Platform::Twitter => "Twitter",
            Platform::Email => "Email",
            Platform::Youtube => "Youtube",
        }
    }

    /// Placeholder substituted when generation for this platform fails
    /// after retries are exhausted.
    pub fn placeholder(&self) -> String {
        format!("Error: Could not generate {} content", self.title())
    }

    /// JSON keys to try, in order, when extracting this platform's
    /// text from a structured collaborator output.
    pub fn content_keys(&self) -> &'static [&'static str] {
        match self {
            Platform::Blog => &["content"],
            Platform::Linkedin => &["posts", "content"],
            Platform::Twitter => &["threads", "content"],
            Platform::Email => &["email", "content"],
            Platform::Youtube => &["script", "content"],
        }
    }

    /// Parse a user-supplied platform name (case-insensitive).
    pub fn parse(s: &str) -> Option<Platform> {
        match s.trim().to_lowercase().as_str() {
            "blog" => Some(Platform::Blog),
            "linkedin" => Some(Platform::Linkedin),
            "twitter" | "x" => Some(Platform::Twitter),
            "email" => Some(Platform::Email),
            "youtube" | "video" => Some(Platform::Youtube),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The pipeline stage a failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Research,
    GenerateContent,
    FactCheck,
    Edit,
    Seo,
    Learn,
    Finalize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "initialization",
            Stage::Research => "research",
            Stage::GenerateContent => "content generation",
            Stage::FactCheck => "fact checking",
            Stage::Edit => "editing",
            Stage::Seo => "seo optimization",
            Stage::Learn => "learning",
            Stage::Finalize => "finalization",
        };
        f.write_str(name)
    }
}

/// Keywords attached to a piece of optimized content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keywords {
    pub primary: String,
    #[serde(default)]
    pub secondary: Vec<String>,
}

/// One run's record in the persisted content history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub topic: String,
    /// Platform key -> generated text, requested platforms only
    pub content: HashMap<String, String>,
    /// Fact-check report text
    pub verification: String,
    pub metrics: RecordMetrics,
    /// ISO-8601 creation timestamp
    pub timestamp: String,
}

/// Compact per-record quality metrics kept in history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetrics {
    pub confidence: f64,
    pub readability: f64,
    pub seo_score: f64,
}

/// Everything a completed pipeline run produced
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub blog: String,
    pub linkedin: String,
    pub twitter: String,
    pub email: String,
    pub video_script: String,
    /// Fact-check report text ("Fact-checking unavailable" on failure)
    pub verification: String,
    pub meta_description: String,
    pub metrics: PipelineMetrics,
    pub learned_insights: Value,
}

impl PipelineResult {
    /// Generated text for a platform (empty when it was not requested).
    pub fn platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Blog => &self.blog,
            Platform::Linkedin => &self.linkedin,
            Platform::Twitter => &self.twitter,
            Platform::Email => &self.email,
            Platform::Youtube => &self.video_script,
        }
    }
}

/// Aggregate quality and timing metrics for one run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetrics {
    pub duration_seconds: f64,
    pub blog_word_count: usize,
    pub linkedin_posts_count: usize,
    pub twitter_threads_count: usize,
    pub verification_confidence: f64,
    pub readability_score: f64,
    pub seo_score: f64,
    pub sources_used: usize,
    pub flagged_claims: u64,
    pub keywords: Keywords,
    pub timings: HashMap<String, TimingStats>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("Blog"), Some(Platform::Blog));
        assert_eq!(Platform::parse("  LINKEDIN "), Some(Platform::Linkedin));
        assert_eq!(Platform::parse("x"), Some(Platform::Twitter));
        assert_eq!(Platform::parse("video"), Some(Platform::Youtube));
        assert_eq!(Platform::parse("tiktok"), None);
    }

    #[test]
    fn test_platform_order_starts_with_blog() {
        assert_eq!(Platform::ALL[0], Platform::Blog);
        assert_eq!(Platform::ALL.len(), 5);
    }

    #[test]
    fn test_placeholder_text() {
        assert_eq!(
            Platform::Linkedin.placeholder(),
            "Error: Could not generate Linkedin content"
        );
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Research.to_string(), "research");
        assert_eq!(Stage::GenerateContent.to_string(), "content generation");
    }

    #[test]
    fn test_content_record_round_trip() {
        let record = ContentRecord {
            topic: "rust".to_string(),
            content: HashMap::from([("blog".to_string(), "text".to_string())]),
            verification: "9 of 10 claims verified".to_string(),
            metrics: RecordMetrics {
                confidence: 90.0,
                readability: 72.5,
                seo_score: 81.0,
            },
            timestamp: "2026-08-29T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        let back: ContentRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back.topic, "rust");
        assert_eq!(back.verification, "9 of 10 claims verified");
        assert_eq!(back.metrics.seo_score, 81.0);
    }
}
