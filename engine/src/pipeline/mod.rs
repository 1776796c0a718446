//! Content pipeline orchestration
//!
//! Runs the full research -> generate -> fact-check -> edit -> SEO ->
//! learn -> finalize sequence for one topic. Stage failure policy:
//!
//! - **Fatal**: research, and blog generation when blog is requested.
//!   Without a research brief nothing downstream has input, so these
//!   abort the run as [`EngineError::StageFailed`].
//! - **Soft**: every other stage. Social/email/video generation,
//!   fact-checking, editing, SEO, and analytics substitute documented
//!   defaults on failure so one flaky call never sinks the run.
//!
//! Every collaborator call goes through the shared [`RetryExecutor`];
//! consecutive generation calls are spaced by the [`CallPacer`].

pub mod types;

pub use types::{
    ContentRecord, Keywords, PipelineMetrics, PipelineResult, Platform, RecordMetrics, Stage,
};

use crate::agents::gemini::GeminiAgent;
use crate::agents::prompts::{self, AgentRole};
use crate::agents::{Agent, AgentOutput};
use crate::config::{BrandVoice, GeminiConfig};
use crate::errors::EngineError;
use crate::memory::MemoryBank;
use crate::metrics::MetricsCollector;
use crate::rate_limiter::CallPacer;
use crate::retry::RetryExecutor;
use crate::session::SessionStore;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Minimum persisted runs before the analytics collaborator is asked
/// to find patterns.
const MIN_HISTORY_FOR_ANALYTICS: usize = 5;

/// History records summarized for one analytics call.
const ANALYTICS_WINDOW: usize = 20;

/// One collaborator per pipeline role
pub struct AgentSet {
    pub research: Arc<dyn Agent>,
    pub blog: Arc<dyn Agent>,
    pub linkedin: Arc<dyn Agent>,
    pub twitter: Arc<dyn Agent>,
    pub email: Arc<dyn Agent>,
    pub video: Arc<dyn Agent>,
    pub fact_checker: Arc<dyn Agent>,
    pub editor: Arc<dyn Agent>,
    pub seo: Arc<dyn Agent>,
    pub analytics: Arc<dyn Agent>,
}

impl AgentSet {
    /// Build the full Gemini-backed set from config.
    pub fn gemini(config: &GeminiConfig, api_key: &str) -> Self {
        let make =
            |role: AgentRole| -> Arc<dyn Agent> { Arc::new(GeminiAgent::new(config, api_key, role)) };
        Self {
            research: make(AgentRole::Research),
            blog: make(AgentRole::BlogWriter),
            linkedin: make(AgentRole::Linkedin),
            twitter: make(AgentRole::Twitter),
            email: make(AgentRole::Email),
            video: make(AgentRole::VideoScript),
            fact_checker: make(AgentRole::FactChecker),
            editor: make(AgentRole::Editor),
            seo: make(AgentRole::Seo),
            analytics: make(AgentRole::Analytics),
        }
    }

    /// Generation collaborator for a platform.
    pub fn platform(&self, platform: Platform) -> &Arc<dyn Agent> {
        match platform {
            Platform::Blog => &self.blog,
            Platform::Linkedin => &self.linkedin,
            Platform::Twitter => &self.twitter,
            Platform::Email => &self.email,
            Platform::Youtube => &self.video,
        }
    }
}

/// The orchestrator: owns the collaborators, the memory bank, sessions,
/// metrics, and the retry/pacing policies.
pub struct ContentPipeline {
    agents: AgentSet,
    memory: MemoryBank,
    sessions: SessionStore,
    metrics: MetricsCollector,
    retry: RetryExecutor,
    pacer: CallPacer,
}

impl ContentPipeline {
    pub fn new(agents: AgentSet, memory: MemoryBank, retry: RetryExecutor, pacer: CallPacer) -> Self {
        Self {
            agents,
            memory,
            sessions: SessionStore::new(),
            metrics: MetricsCollector::new(),
            retry,
            pacer,
        }
    }

    pub fn memory(&self) -> &MemoryBank {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryBank {
        &mut self.memory
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Run the full pipeline for one topic.
    ///
    /// `platforms` selects which content formats to generate; an empty
    /// slice means blog only. Only requested platforms are generated:
    /// fact-checking, editing, and SEO operate on the blog draft,
    /// which is the empty string when blog was not requested, and the
    /// result reports every unrequested platform as an empty string.
    /// The session is ended whether the run succeeds or fails.
    pub async fn run(
        &mut self,
        topic: &str,
        session_id: Option<&str>,
        platforms: &[Platform],
    ) -> Result<PipelineResult, EngineError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(EngineError::InvalidTopic(
                "topic must not be empty".to_string(),
            ));
        }

        let sid = self.sessions.create_session(session_id).id().to_string();
        let result = self.execute(topic, &sid, platforms).await;
        self.sessions.end_session(&sid);
        result
    }

    async fn execute(
        &mut self,
        topic: &str,
        session_id: &str,
        platforms: &[Platform],
    ) -> Result<PipelineResult, EngineError> {
        let started = Instant::now();
        self.metrics.increment_counter("pipeline_runs", 1);
        info!("Starting pipeline for topic: {}", topic);

        // Init: record the topic and make sure a brand voice exists.
        if let Some(session) = self.sessions.get_session_mut(session_id) {
            session.set("topic", json!(topic));
        }
        if self.memory.get("brand_voice").is_none() {
            let default_voice = serde_json::to_value(BrandVoice::default())
                .map_err(|e| EngineError::Memory(e.to_string()))?;
            self.memory
                .set("brand_voice", default_voice)
                .map_err(|e| EngineError::Memory(e.to_string()))?;
        }
        let voice: BrandVoice = self
            .memory
            .get("brand_voice")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        // Research (fatal).
        self.metrics.start_timer("research");
        let research = self
            .invoke_with_retry(Arc::clone(&self.agents.research), prompts::research_prompt(topic))
            .await
            .map_err(|source| EngineError::StageFailed {
                stage: Stage::Research,
                source,
            })?;
        self.metrics.stop_timer("research");

        let brief = research.text(&["brief"]);
        let sources = research
            .field("sources")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let sources_used = sources.len();
        if let Some(session) = self.sessions.get_session_mut(session_id) {
            session.set("research_brief", json!(brief));
            session.set("sources", Value::Array(sources));
        }
        info!("Research complete ({} sources)", sources_used);

        // Content generation. Blog failure is fatal; the other
        // requested platforms soft-fail to a placeholder.
        let requested = requested_platforms(platforms);
        let blog_requested = requested.contains(&Platform::Blog);
        self.metrics.start_timer("content_creation");
        let mut content: HashMap<Platform, String> = HashMap::new();

        for (i, platform) in requested.iter().copied().enumerate() {
            if i > 0 {
                self.pacer.pause().await;
            }

            let prompt = generation_prompt(platform, &brief, &voice);
            let agent = Arc::clone(self.agents.platform(platform));
            match self.invoke_with_retry(agent, prompt).await {
                Ok(output) => {
                    content.insert(platform, output.text(platform.content_keys()));
                    self.metrics.increment_counter("platforms_generated", 1);
                }
                Err(e) if platform == Platform::Blog => {
                    self.metrics.stop_timer("content_creation");
                    return Err(EngineError::StageFailed {
                        stage: Stage::GenerateContent,
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("{} generation failed, using placeholder: {}", platform, e);
                    content.insert(platform, platform.placeholder());
                    self.metrics.increment_counter("platform_failures", 1);
                }
            }
        }
        self.metrics.stop_timer("content_creation");

        // Downstream stages operate on the blog draft, empty when blog
        // was not requested.
        let blog_draft = content
            .get(&Platform::Blog)
            .cloned()
            .unwrap_or_default();

        // Fact-check (soft).
        self.metrics.start_timer("fact_checking");
        let (verification, confidence, flagged_claims) = match self
            .invoke_with_retry(
                Arc::clone(&self.agents.fact_checker),
                prompts::fact_check_prompt(&blog_draft),
            )
            .await
        {
            Ok(output) => {
                let confidence = output.f64_field("confidence").unwrap_or(75.0);
                let flagged = output.u64_field("flagged_claims").unwrap_or(0);
                (output.text(&["report"]), confidence, flagged)
            }
            Err(e) => {
                warn!("Fact-checking failed, continuing unverified: {}", e);
                ("Fact-checking unavailable".to_string(), 0.0, 0)
            }
        };
        self.metrics.stop_timer("fact_checking");

        // Edit (soft). On failure the unedited draft stands.
        self.metrics.start_timer("editing");
        let (edited_blog, readability_score) = match self
            .invoke_with_retry(
                Arc::clone(&self.agents.editor),
                prompts::edit_prompt(&blog_draft, &voice),
            )
            .await
        {
            Ok(output) => {
                let edited = output.text(&["content"]);
                let readability = output.f64_field("readability_score").unwrap_or_else(|| {
                    crate::tools::readability::flesch_reading_ease(&edited).clamp(0.0, 100.0)
                });
                (edited, readability)
            }
            Err(e) => {
                warn!("Editing failed, keeping draft: {}", e);
                (blog_draft.clone(), 75.0)
            }
        };
        self.metrics.stop_timer("editing");
        if blog_requested {
            content.insert(Platform::Blog, edited_blog.clone());
        }

        // SEO (soft). Unstructured output is treated like a failure:
        // without the JSON envelope there is no optimized body to trust.
        self.metrics.start_timer("seo");
        let seo_result = self
            .invoke_with_retry(
                Arc::clone(&self.agents.seo),
                prompts::seo_prompt(&edited_blog, topic),
            )
            .await;
        let (final_blog, seo_score, keywords, meta_description) = match seo_result {
            Ok(output @ AgentOutput::Structured(_)) => {
                let optimized = output
                    .str_field("optimized_content")
                    .map(str::to_string)
                    .unwrap_or_else(|| edited_blog.clone());
                let score = output.f64_field("seo_score").unwrap_or(75.0);
                let keywords = output
                    .field("keywords")
                    .cloned()
                    .and_then(|v| serde_json::from_value(v).ok())
                    .unwrap_or_else(|| Keywords {
                        primary: topic.to_string(),
                        secondary: Vec::new(),
                    });
                let meta = output
                    .str_field("meta_description")
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Learn about {}", topic));
                (optimized, score, keywords, meta)
            }
            other => {
                if let Err(e) = &other {
                    warn!("SEO optimization failed, using defaults: {}", e);
                }
                (
                    edited_blog.clone(),
                    75.0,
                    Keywords {
                        primary: topic.to_string(),
                        secondary: Vec::new(),
                    },
                    format!("Learn about {}", topic),
                )
            }
        };
        self.metrics.stop_timer("seo");
        if blog_requested {
            content.insert(Platform::Blog, final_blog.clone());
        }

        // Learn: persist the run into history first, then ask analytics
        // for patterns once enough history exists.
        let record = ContentRecord {
            topic: topic.to_string(),
            content: content
                .iter()
                .map(|(p, text)| (p.key().to_string(), text.clone()))
                .collect(),
            verification: verification.clone(),
            metrics: RecordMetrics {
                confidence,
                readability: readability_score,
                seo_score,
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let record_value =
            serde_json::to_value(&record).map_err(|e| EngineError::Memory(e.to_string()))?;
        self.memory
            .append_to_history("content_history", record_value)
            .map_err(|e| EngineError::Memory(e.to_string()))?;

        let history = self.memory.get_history("content_history", None);
        let learned_insights = if history.len() < MIN_HISTORY_FOR_ANALYTICS {
            json!({
                "patterns": [],
                "insights": "Not enough data yet (minimum 5 content pieces needed)",
                "data_points": history.len(),
            })
        } else {
            let summary = summarize_history(&history);
            match self
                .invoke_with_retry(
                    Arc::clone(&self.agents.analytics),
                    prompts::analytics_prompt(&summary),
                )
                .await
            {
                Ok(output) => {
                    let insights = output.into_payload("insights");
                    self.memory
                        .set("learned_patterns", insights.clone())
                        .map_err(|e| EngineError::Memory(e.to_string()))?;
                    insights
                }
                Err(e) => {
                    warn!("Analytics failed, no insights this run: {}", e);
                    json!({})
                }
            }
        };

        // Finalize.
        let duration_seconds = round2(started.elapsed().as_secs_f64());
        self.metrics.record_metric("pipeline_duration", duration_seconds);

        let text_for = |p: Platform| content.get(&p).cloned().unwrap_or_default();
        let blog = text_for(Platform::Blog);
        let linkedin = text_for(Platform::Linkedin);
        let twitter = text_for(Platform::Twitter);

        let metrics = PipelineMetrics {
            duration_seconds,
            blog_word_count: blog.split_whitespace().count(),
            linkedin_posts_count: linkedin.matches("POST").count(),
            twitter_threads_count: twitter.matches("THREAD").count(),
            verification_confidence: confidence,
            readability_score,
            seo_score,
            sources_used,
            flagged_claims,
            keywords,
            timings: self.metrics.get_all_timings(),
        };

        info!(
            "Pipeline complete in {:.2}s ({} words)",
            duration_seconds, metrics.blog_word_count
        );

        Ok(PipelineResult {
            blog,
            linkedin,
            twitter,
            email: text_for(Platform::Email),
            video_script: text_for(Platform::Youtube),
            verification,
            meta_description,
            metrics,
            learned_insights,
        })
    }

    async fn invoke_with_retry(
        &self,
        agent: Arc<dyn Agent>,
        prompt: String,
    ) -> crate::agents::Result<AgentOutput> {
        let label = agent.name().to_string();
        self.retry
            .execute(&label, || {
                let agent = Arc::clone(&agent);
                let prompt = prompt.clone();
                async move { agent.invoke(&prompt).await }
            })
            .await
    }
}

/// Requested platforms in fixed generation order, deduplicated. An
/// empty request means blog only.
fn requested_platforms(platforms: &[Platform]) -> Vec<Platform> {
    if platforms.is_empty() {
        return vec![Platform::Blog];
    }
    Platform::ALL
        .iter()
        .copied()
        .filter(|p| platforms.contains(p))
        .collect()
}

fn generation_prompt(platform: Platform, brief: &str, voice: &BrandVoice) -> String {
    match platform {
        Platform::Blog => prompts::blog_prompt(brief, voice),
        Platform::Linkedin => prompts::linkedin_prompt(brief, voice),
        Platform::Twitter => prompts::twitter_prompt(brief, voice),
        Platform::Email => prompts::email_prompt(brief, voice),
        Platform::Youtube => prompts::video_prompt(brief, voice),
    }
}

/// Compact the recent history window into the JSON summary the
/// analytics prompt embeds. Full content bodies stay out of the prompt.
fn summarize_history(history: &[Value]) -> String {
    let window = history
        .iter()
        .rev()
        .take(ANALYTICS_WINDOW)
        .rev()
        .map(|item| {
            json!({
                "topic": item.get("topic").cloned().unwrap_or(Value::Null),
                "metrics": item.get("metrics").cloned().unwrap_or(Value::Null),
                "timestamp": item.get("timestamp").cloned().unwrap_or(Value::Null),
            })
        })
        .collect::<Vec<_>>();
    serde_json::to_string_pretty(&window).unwrap_or_else(|_| "[]".to_string())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::Result as AgentResult;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct CannedAgent(&'static str, String);

    #[async_trait]
    impl Agent for CannedAgent {
        fn name(&self) -> &str {
            self.0
        }

        async fn invoke(&self, _input: &str) -> AgentResult<AgentOutput> {
            Ok(AgentOutput::parse(&self.1))
        }
    }

    fn canned(name: &'static str, response: &str) -> Arc<dyn Agent> {
        Arc::new(CannedAgent(name, response.to_string()))
    }

    #[test]
    fn test_requested_platforms_defaults_to_blog() {
        assert_eq!(requested_platforms(&[]), vec![Platform::Blog]);
    }

    #[test]
    fn test_requested_platforms_fixed_order() {
        let picked = requested_platforms(&[Platform::Twitter, Platform::Linkedin]);
        assert_eq!(picked, vec![Platform::Linkedin, Platform::Twitter]);
    }

    #[test]
    fn test_requested_platforms_dedupes() {
        let picked = requested_platforms(&[Platform::Email, Platform::Email, Platform::Blog]);
        assert_eq!(picked, vec![Platform::Blog, Platform::Email]);
    }

    #[tokio::test]
    async fn test_research_findings_stored_in_session() {
        let dir = TempDir::new().unwrap();
        let research = json!({
            "brief": "brief text",
            "sources": [{"title": "a", "url": "https://a.example"}]
        })
        .to_string();
        let agents = AgentSet {
            research: canned("research", &research),
            blog: canned("blog_writer", "draft"),
            linkedin: canned("linkedin", "posts"),
            twitter: canned("twitter", "threads"),
            email: canned("email", "email"),
            video: canned("video_script", "script"),
            fact_checker: canned("fact_checker", "report"),
            editor: canned("editor", "edited"),
            seo: canned("seo", "{}"),
            analytics: canned("analytics", "{}"),
        };
        let memory = MemoryBank::open(dir.path().join("memory.json")).unwrap();
        let mut pipeline = ContentPipeline::new(
            agents,
            memory,
            RetryExecutor::new(1, std::time::Duration::from_secs(0)),
            CallPacer::disabled(),
        );

        let sid = pipeline
            .sessions
            .create_session(Some("sess"))
            .id()
            .to_string();
        pipeline.execute("rust", &sid, &[Platform::Blog]).await.unwrap();

        let session = pipeline.sessions.get_session(&sid).unwrap();
        assert_eq!(session.get("research_brief"), Some(&json!("brief text")));
        let sources = session.get("sources").and_then(Value::as_array).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0]["title"], "a");
    }

    #[test]
    fn test_summarize_history_keeps_window() {
        let history: Vec<Value> = (0..30)
            .map(|i| json!({"topic": format!("t{}", i), "metrics": {}, "timestamp": ""}))
            .collect();
        let summary = summarize_history(&history);
        assert!(!summary.contains("\"t9\""));
        assert!(summary.contains("\"t10\""));
        assert!(summary.contains("\"t29\""));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(2.999), 3.0);
    }
}
