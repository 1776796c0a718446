// Forge Content Engine
// Main entry point for the forge binary

use anyhow::{bail, Context};
use clap::Parser;
use forge_engine::cli::{Cli, Command};
use forge_engine::config::{BrandVoice, Config};
use forge_engine::memory::MemoryBank;
use forge_engine::output::save_outputs;
use forge_engine::pipeline::{AgentSet, ContentPipeline, PipelineResult, Platform};
use forge_engine::rate_limiter::CallPacer;
use forge_engine::retry::RetryExecutor;
use forge_engine::telemetry::init_telemetry;
use forge_engine::tools::{seo, validate, voice};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_default()?
    };

    init_telemetry(cli.log.as_deref(), &config.core.log_level);

    tracing::info!("Forge Engine v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run {
            topic,
            platforms,
            session,
            no_save,
        } => {
            let platforms = parse_platforms(&platforms)?;

            let api_key = std::env::var(&config.gemini.api_key_env).with_context(|| {
                format!(
                    "environment variable {} is not set",
                    config.gemini.api_key_env
                )
            })?;

            let agents = AgentSet::gemini(&config.gemini, &api_key);
            let memory = MemoryBank::open(config.core.data_dir.join("memory.json"))?;
            let retry = RetryExecutor::new(
                config.retry.max_retries,
                Duration::from_secs(config.retry.retry_delay_secs),
            );
            let pacer = CallPacer::new(Duration::from_secs(config.pacing.inter_call_delay_secs));

            let mut pipeline = ContentPipeline::new(agents, memory, retry, pacer);
            let result = match pipeline.run(&topic, session.as_deref(), &platforms).await {
                Ok(result) => result,
                Err(e) => {
                    if e.is_recoverable() {
                        tracing::warn!("The failure looks transient; rerunning may succeed");
                    }
                    return Err(e.into());
                }
            };

            let voice_profile: BrandVoice = pipeline
                .memory()
                .get("brand_voice")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default();
            print_summary(&result, &voice_profile);

            if !no_save {
                let paths = save_outputs(&result, &topic, &config.core.output_dir).await?;
                println!("\nSaved {} files to {:?}", paths.len(), config.core.output_dir);
            }
            Ok(())
        }

        Command::History { limit } => {
            let memory = MemoryBank::open(config.core.data_dir.join("memory.json"))?;
            let records = memory.get_history("content_history", Some(limit));
            if records.is_empty() {
                println!("No content history yet.");
                return Ok(());
            }
            for record in &records {
                let topic = record
                    .get("topic")
                    .and_then(|v| v.as_str())
                    .unwrap_or("(unknown)");
                let timestamp = record
                    .get("timestamp")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                println!("{}  {}", timestamp, topic);
            }
            Ok(())
        }

        Command::Voice => {
            let memory = MemoryBank::open(config.core.data_dir.join("memory.json"))?;
            let voice: BrandVoice = memory
                .get("brand_voice")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(&voice)?);
            Ok(())
        }
    }
}

fn parse_platforms(names: &[String]) -> anyhow::Result<Vec<Platform>> {
    let mut platforms = Vec::with_capacity(names.len());
    for name in names {
        match Platform::parse(name) {
            Some(p) => platforms.push(p),
            None => bail!(
                "unknown platform {:?} (expected blog, linkedin, twitter, email, or youtube)",
                name
            ),
        }
    }
    Ok(platforms)
}

fn print_summary(result: &PipelineResult, voice_profile: &BrandVoice) {
    let m = &result.metrics;
    println!("\nPipeline complete in {:.2}s", m.duration_seconds);
    println!("  Blog:         {} words", m.blog_word_count);
    if m.linkedin_posts_count > 0 {
        println!("  LinkedIn:     {} posts", m.linkedin_posts_count);
    }
    if m.twitter_threads_count > 0 {
        println!("  Twitter:      {} threads", m.twitter_threads_count);
    }
    println!("  Confidence:   {:.0}%", m.verification_confidence);
    println!("  Readability:  {:.1}", m.readability_score);
    println!("  SEO score:    {:.1}", m.seo_score);
    println!("  Sources used: {}", m.sources_used);
    if m.flagged_claims > 0 {
        println!("  Flagged claims: {}", m.flagged_claims);
    }

    // Advisory local checks over the final blog
    if !result.blog.is_empty() {
        let title = result
            .blog
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .unwrap_or_default();
        let seo_report = seo::overall_seo_score(
            &result.blog,
            title,
            &result.meta_description,
            &m.keywords.primary,
        );
        let voice_report = voice::overall_voice_match(&result.blog, voice_profile);
        println!(
            "  Local SEO:    {:.1} (grade {})",
            seo_report.overall_score, seo_report.grade
        );
        println!(
            "  Voice match:  {:.1} ({})",
            voice_report.overall_score, voice_report.recommendation
        );

        let validation = validate::validate_blog_post(&result.blog);
        if !validation.issues.is_empty() {
            println!("\nContent checks (score {}):", validation.score);
            for issue in &validation.issues {
                println!("  - {}", issue);
            }
        }
    }
}
