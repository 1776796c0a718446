//! Output artifact writing
//!
//! Persists a completed run as files: the blog as markdown, the other
//! platforms as plain text, plus the verification report as text and
//! the metrics as JSON. Filenames combine a sanitized topic slug with
//! a timestamp so repeated runs never collide.

use crate::errors::EngineError;
use crate::pipeline::{PipelineResult, Platform};
use std::path::{Path, PathBuf};
use tracing::info;

const MAX_SLUG_LEN: usize = 50;

/// Sanitize a topic into a filename slug: alphanumerics kept,
/// everything else collapsed to underscores, truncated.
fn sanitize_topic(topic: &str) -> String {
    let mut slug = String::new();
    let mut last_underscore = false;
    for c in topic.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore && !slug.is_empty() {
            slug.push('_');
            last_underscore = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }
    let trimmed = slug.trim_end_matches('_');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Write all non-empty artifacts of `result` under `dir`.
///
/// Returns the paths written. The directory is created if needed;
/// empty platform outputs (not requested) are skipped.
pub async fn save_outputs(
    result: &PipelineResult,
    topic: &str,
    dir: &Path,
) -> Result<Vec<PathBuf>, EngineError> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let base = format!("{}_{}", sanitize_topic(topic), stamp);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| EngineError::Output(format!("creating {:?}: {}", dir, e)))?;

    let mut written = Vec::new();
    let mut write = |name: String, body: String| {
        let path = dir.join(name);
        written.push((path, body));
    };

    for platform in Platform::ALL {
        let body = result.platform(platform);
        if body.is_empty() {
            continue;
        }
        let ext = if platform == Platform::Blog { "md" } else { "txt" };
        write(format!("{}_{}.{}", base, platform.key(), ext), body.to_string());
    }

    write(
        format!("{}_verification.txt", base),
        result.verification.clone(),
    );

    let metrics = serde_json::to_string_pretty(&result.metrics)
        .map_err(|e| EngineError::Output(e.to_string()))?;
    write(format!("{}_metrics.json", base), metrics);

    let mut paths = Vec::with_capacity(written.len());
    for (path, body) in written {
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| EngineError::Output(format!("writing {:?}: {}", path, e)))?;
        paths.push(path);
    }

    info!("Saved {} output files to {:?}", paths.len(), dir);
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Keywords, PipelineMetrics, PipelineResult};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn sample_result() -> PipelineResult {
        PipelineResult {
            blog: "# Title\n\nBody".to_string(),
            linkedin: "POST 1: text".to_string(),
            twitter: String::new(),
            email: String::new(),
            video_script: String::new(),
            verification: "all claims verified".to_string(),
            meta_description: "meta".to_string(),
            metrics: PipelineMetrics {
                duration_seconds: 1.5,
                blog_word_count: 2,
                linkedin_posts_count: 1,
                twitter_threads_count: 0,
                verification_confidence: 90.0,
                readability_score: 70.0,
                seo_score: 80.0,
                sources_used: 3,
                flagged_claims: 0,
                keywords: Keywords::default(),
                timings: HashMap::new(),
            },
            learned_insights: serde_json::json!({}),
        }
    }

    #[test]
    fn test_sanitize_topic() {
        assert_eq!(sanitize_topic("Rust Async / Await!"), "rust_async_await");
        assert_eq!(sanitize_topic("???"), "untitled");
        assert!(sanitize_topic(&"a very long topic ".repeat(10)).len() <= MAX_SLUG_LEN);
    }

    #[tokio::test]
    async fn test_save_outputs_skips_empty_platforms() {
        let dir = TempDir::new().unwrap();
        let paths = save_outputs(&sample_result(), "Rust Topic", dir.path())
            .await
            .unwrap();

        // blog + linkedin + verification + metrics
        assert_eq!(paths.len(), 4);
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert!(names.iter().any(|n| n.contains("_blog.") && n.ends_with(".md")));
        assert!(names.iter().any(|n| n.contains("_linkedin.") && n.ends_with(".txt")));
        assert!(names.iter().any(|n| n.ends_with("_verification.txt")));
        assert!(names.iter().any(|n| n.ends_with("_metrics.json")));
        assert!(!names.iter().any(|n| n.contains("twitter")));
    }

    #[tokio::test]
    async fn test_save_outputs_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        let paths = save_outputs(&sample_result(), "t", &nested).await.unwrap();
        assert!(!paths.is_empty());
        assert!(nested.exists());
    }
}
