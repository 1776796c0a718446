//! Integration tests for the content pipeline
//!
//! Validates orchestration behavior end to end with mock collaborators:
//! - Stage sequencing and soft-failure isolation
//! - Retry/backoff timing for transient failures
//! - Fatal aborts for research and blog generation
//! - History persistence and the analytics gate

use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use forge_engine::agents::{Agent, AgentError, AgentOutput, Result as AgentResult};
use forge_engine::errors::EngineError;
use forge_engine::memory::MemoryBank;
use forge_engine::pipeline::{AgentSet, ContentPipeline, Platform, Stage};
use forge_engine::rate_limiter::CallPacer;
use forge_engine::retry::RetryExecutor;

/// Scripted collaborator: fails the first `fail_first` calls, then
/// returns `response`.
struct MockAgent {
    name: &'static str,
    response: String,
    fail_first: usize,
    transient: bool,
    calls: AtomicUsize,
}

impl MockAgent {
    fn ok(name: &'static str, response: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: response.to_string(),
            fail_first: 0,
            transient: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(name: &'static str, fail_first: usize, transient: bool) -> Arc<Self> {
        Arc::new(Self {
            name,
            response: format!("{} output", name),
            fail_first,
            transient,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn name(&self) -> &str {
        self.name
    }

    async fn invoke(&self, _input: &str) -> AgentResult<AgentOutput> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.fail_first {
            return Err(if self.transient {
                AgentError::ProviderUnavailable("503 overloaded".to_string())
            } else {
                AgentError::InvalidRequest("bad request".to_string())
            });
        }
        Ok(AgentOutput::parse(&self.response))
    }
}

fn research_json() -> String {
    json!({
        "brief": "the research brief",
        "key_insights": ["insight"],
        "sources": [
            {"title": "a", "url": "https://a.example", "relevance": "high"},
            {"title": "b", "url": "https://b.example", "relevance": "medium"}
        ]
    })
    .to_string()
}

fn editor_json() -> String {
    json!({"content": "edited blog body", "readability_score": 70.5}).to_string()
}

fn seo_json() -> String {
    json!({
        "optimized_content": "optimized blog body",
        "seo_score": 82.0,
        "keywords": {"primary": "rust", "secondary": ["async", "tokio"]},
        "meta_description": "All about rust."
    })
    .to_string()
}

fn fact_check_json() -> String {
    json!({
        "report": "10 of 12 claims verified",
        "confidence": 88.0,
        "total_claims": 12,
        "verified_claims": 10,
        "flagged_claims": 2
    })
    .to_string()
}

/// A full well-behaved collaborator set.
fn happy_agents() -> AgentSet {
    AgentSet {
        research: MockAgent::ok("research", &research_json()),
        blog: MockAgent::ok("blog_writer", "# Draft\n\ndraft blog body"),
        linkedin: MockAgent::ok("linkedin", "POST 1: one\n---\nPOST 2: two"),
        twitter: MockAgent::ok("twitter", "THREAD 1: a\nTHREAD 2: b\nTHREAD 3: c"),
        email: MockAgent::ok("email", "Subject: hello\n\nemail body"),
        video: MockAgent::ok("video_script", "[00:00] HOOK\nscript body"),
        fact_checker: MockAgent::ok("fact_checker", &fact_check_json()),
        editor: MockAgent::ok("editor", &editor_json()),
        seo: MockAgent::ok("seo", &seo_json()),
        analytics: MockAgent::ok("analytics", &json!({"insights": "more rust"}).to_string()),
    }
}

fn pipeline_with(agents: AgentSet, dir: &TempDir) -> ContentPipeline {
    let memory = MemoryBank::open(dir.path().join("memory.json")).unwrap();
    ContentPipeline::new(
        agents,
        memory,
        RetryExecutor::new(3, Duration::from_secs(10)),
        CallPacer::disabled(),
    )
}

#[tokio::test]
async fn test_happy_path_all_platforms() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_with(happy_agents(), &dir);

    let result = pipeline
        .run("rust async", None, &Platform::ALL)
        .await
        .unwrap();

    // SEO output is the final blog body
    assert_eq!(result.blog, "optimized blog body");
    assert!(result.linkedin.contains("POST 1"));
    assert!(result.twitter.contains("THREAD 1"));
    assert!(result.email.contains("Subject"));
    assert!(result.video_script.contains("[00:00]"));
    assert_eq!(result.meta_description, "All about rust.");
    assert_eq!(result.verification, "10 of 12 claims verified");

    let m = &result.metrics;
    assert_eq!(m.verification_confidence, 88.0);
    assert_eq!(m.flagged_claims, 2);
    assert_eq!(m.readability_score, 70.5);
    assert_eq!(m.seo_score, 82.0);
    assert_eq!(m.sources_used, 2);
    assert_eq!(m.linkedin_posts_count, 2);
    assert_eq!(m.twitter_threads_count, 3);
    assert_eq!(m.blog_word_count, 3);
    assert_eq!(m.keywords.primary, "rust");
    assert!(m.timings.contains_key("research"));
    assert!(m.timings.contains_key("content_creation"));

    // Run persisted into history; not enough history for analytics
    let history = pipeline.memory().get_history("content_history", None);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["topic"], "rust async");
    assert_eq!(
        result.learned_insights["insights"],
        "Not enough data yet (minimum 5 content pieces needed)"
    );
}

#[tokio::test]
async fn test_empty_topic_rejected() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_with(happy_agents(), &dir);

    let err = pipeline.run("   ", None, &[]).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidTopic(_)));
}

#[tokio::test]
async fn test_empty_platforms_defaults_to_blog_only() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_with(happy_agents(), &dir);

    let result = pipeline.run("rust", None, &[]).await.unwrap();
    assert!(!result.blog.is_empty());
    assert!(result.linkedin.is_empty());
    assert!(result.twitter.is_empty());
    assert!(result.email.is_empty());
    assert!(result.video_script.is_empty());
    assert_eq!(result.metrics.linkedin_posts_count, 0);
}

#[tokio::test]
async fn test_blog_omitted_when_not_requested() {
    let dir = TempDir::new().unwrap();
    let blog = MockAgent::ok("blog_writer", "# Draft\n\ndraft blog body");
    let mut agents = happy_agents();
    agents.blog = Arc::clone(&blog) as Arc<dyn Agent>;
    let mut pipeline = pipeline_with(agents, &dir);

    let result = pipeline
        .run("rust", None, &[Platform::Linkedin])
        .await
        .unwrap();

    // The blog collaborator is never invoked and the result stays empty
    assert_eq!(blog.calls(), 0);
    assert_eq!(result.blog, "");
    assert_eq!(result.metrics.blog_word_count, 0);
    assert!(result.linkedin.contains("POST 1"));

    // The persisted record carries only the requested platform
    let history = pipeline.memory().get_history("content_history", None);
    assert!(history[0]["content"].get("blog").is_none());
    assert!(history[0]["content"]["linkedin"]
        .as_str()
        .unwrap()
        .contains("POST 1"));
}

#[tokio::test]
async fn test_research_failure_is_fatal_and_session_is_ended() {
    let dir = TempDir::new().unwrap();
    let mut agents = happy_agents();
    agents.research = MockAgent::failing("research", 99, false);
    let mut pipeline = pipeline_with(agents, &dir);

    let err = pipeline
        .run("rust", Some("sess-1"), &[Platform::Blog])
        .await
        .unwrap_err();
    match err {
        EngineError::StageFailed { stage, .. } => assert_eq!(stage, Stage::Research),
        other => panic!("expected StageFailed, got {other}"),
    }

    // Session cleanup happens on the failure path too
    assert!(pipeline.sessions().get_session("sess-1").is_none());
    // Nothing was persisted
    assert!(pipeline.memory().get_history("content_history", None).is_empty());
}

#[tokio::test]
async fn test_blog_failure_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut agents = happy_agents();
    agents.blog = MockAgent::failing("blog_writer", 99, false);
    let mut pipeline = pipeline_with(agents, &dir);

    let err = pipeline.run("rust", None, &Platform::ALL).await.unwrap_err();
    match err {
        EngineError::StageFailed { stage, .. } => assert_eq!(stage, Stage::GenerateContent),
        other => panic!("expected StageFailed, got {other}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_transient_platform_failure_retries_then_placeholder() {
    let dir = TempDir::new().unwrap();
    let linkedin = MockAgent::failing("linkedin", 99, true);
    let mut agents = happy_agents();
    agents.linkedin = Arc::clone(&linkedin) as Arc<dyn Agent>;
    let mut pipeline = pipeline_with(agents, &dir);

    let started = tokio::time::Instant::now();
    let result = pipeline
        .run("rust", None, &[Platform::Blog, Platform::Linkedin])
        .await
        .unwrap();

    // All three attempts were made, then the placeholder stood in
    assert_eq!(linkedin.calls(), 3);
    assert_eq!(result.linkedin, "Error: Could not generate Linkedin content");
    assert!(!result.blog.is_empty());

    // Linear backoff: 10s after attempt 1, 20s after attempt 2
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test]
async fn test_fact_check_failure_defaults_to_unverified() {
    let dir = TempDir::new().unwrap();
    let mut agents = happy_agents();
    agents.fact_checker = MockAgent::failing("fact_checker", 99, false);
    let mut pipeline = pipeline_with(agents, &dir);

    let result = pipeline.run("rust", None, &[Platform::Blog]).await.unwrap();
    assert_eq!(result.metrics.verification_confidence, 0.0);
    assert_eq!(result.metrics.flagged_claims, 0);
    assert_eq!(result.verification, "Fact-checking unavailable");
}

#[tokio::test]
async fn test_edit_failure_keeps_draft() {
    let dir = TempDir::new().unwrap();
    let mut agents = happy_agents();
    agents.editor = MockAgent::failing("editor", 99, false);
    // Fail SEO too so the draft survives to the final result
    agents.seo = MockAgent::failing("seo", 99, false);
    let mut pipeline = pipeline_with(agents, &dir);

    let result = pipeline.run("rust", None, &[Platform::Blog]).await.unwrap();
    assert_eq!(result.blog, "# Draft\n\ndraft blog body");
    assert_eq!(result.metrics.readability_score, 75.0);
}

#[tokio::test]
async fn test_seo_failure_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let mut agents = happy_agents();
    agents.seo = MockAgent::failing("seo", 99, false);
    let mut pipeline = pipeline_with(agents, &dir);

    let result = pipeline.run("rust basics", None, &[Platform::Blog]).await.unwrap();
    assert_eq!(result.blog, "edited blog body");
    assert_eq!(result.metrics.seo_score, 75.0);
    assert_eq!(result.metrics.keywords.primary, "rust basics");
    assert_eq!(result.meta_description, "Learn about rust basics");
}

#[tokio::test]
async fn test_unstructured_seo_output_treated_as_failure() {
    let dir = TempDir::new().unwrap();
    let mut agents = happy_agents();
    agents.seo = MockAgent::ok("seo", "I could not produce JSON, sorry.");
    let mut pipeline = pipeline_with(agents, &dir);

    let result = pipeline.run("rust", None, &[Platform::Blog]).await.unwrap();
    assert_eq!(result.blog, "edited blog body");
    assert_eq!(result.metrics.seo_score, 75.0);
}

#[tokio::test]
async fn test_analytics_gate_and_invocation() {
    let dir = TempDir::new().unwrap();
    let analytics = MockAgent::ok(
        "analytics",
        &json!({"patterns": [], "insights": "write more rust"}).to_string(),
    );
    let mut agents = happy_agents();
    agents.analytics = Arc::clone(&analytics) as Arc<dyn Agent>;
    let mut pipeline = pipeline_with(agents, &dir);

    // Seed four prior runs: the fifth (this run) crosses the threshold
    for i in 0..4 {
        pipeline
            .memory_mut()
            .append_to_history(
                "content_history",
                json!({"topic": format!("t{i}"), "metrics": {}, "timestamp": ""}),
            )
            .unwrap();
    }

    let result = pipeline.run("rust", None, &[Platform::Blog]).await.unwrap();
    assert_eq!(analytics.calls(), 1);
    assert_eq!(result.learned_insights["insights"], "write more rust");
    assert!(pipeline.memory().get("learned_patterns").is_some());
}

#[tokio::test]
async fn test_analytics_skipped_below_threshold() {
    let dir = TempDir::new().unwrap();
    let analytics = MockAgent::ok("analytics", "{}");
    let mut agents = happy_agents();
    agents.analytics = Arc::clone(&analytics) as Arc<dyn Agent>;
    let mut pipeline = pipeline_with(agents, &dir);

    pipeline.run("rust", None, &[Platform::Blog]).await.unwrap();
    assert_eq!(analytics.calls(), 0);
}

#[tokio::test]
async fn test_history_accumulates_across_runs() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = pipeline_with(happy_agents(), &dir);

    pipeline.run("topic one", None, &[Platform::Blog]).await.unwrap();
    pipeline.run("topic two", None, &[Platform::Blog]).await.unwrap();

    let history = pipeline.memory().get_history("content_history", None);
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["topic"], "topic two");
    assert_eq!(pipeline.metrics().get_counter("pipeline_runs"), 2);
}
