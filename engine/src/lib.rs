//! Forge Engine Library
//!
//! This library provides the core functionality of the Forge content
//! engine. It is used by both the main binary and integration tests.

/// Collaborator abstraction layer and Gemini backend
pub mod agents;

/// CLI interface module
pub mod cli;

/// Configuration management module
pub mod config;

/// Engine-level error types
pub mod errors;

/// Persistent memory bank module
pub mod memory;

/// Metrics collection module
pub mod metrics;

/// Output artifact writing module
pub mod output;

/// Content pipeline orchestration module
pub mod pipeline;

/// Upstream call pacing module
pub mod rate_limiter;

/// Retry with linear backoff
pub mod retry;

/// In-memory session management module
pub mod session;

/// Structured logging setup
pub mod telemetry;

/// Deterministic content-analysis tools
pub mod tools;
