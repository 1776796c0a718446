//! Error types and handling
//!
//! This module provides the engine-level error type used at pipeline
//! boundaries. Collaborator-level errors live in [`crate::agents::AgentError`];
//! `EngineError` wraps them with the stage that failed so callers can tell
//! a research abort from a blog-generation abort.

use crate::agents::AgentError;
use crate::pipeline::Stage;
use thiserror::Error;

/// Main engine error type
///
/// Only fatal conditions surface as `EngineError`: soft-failing stages
/// substitute documented defaults instead of raising (see the pipeline
/// module). Every variant is safe to display to end users.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The topic input was empty or otherwise unusable
    #[error("Invalid topic: {0}")]
    InvalidTopic(String),

    /// A fatal stage (research or blog generation) failed after retries
    #[error("{stage} stage failed: {source}")]
    StageFailed {
        /// Which pipeline stage aborted the run
        stage: Stage,
        /// The underlying collaborator error
        #[source]
        source: AgentError,
    },

    /// Memory bank load/persist failure
    #[error("Memory store error: {0}")]
    Memory(String),

    /// Configuration load or validation failure
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output artifact write failure
    #[error("Output error: {0}")]
    Output(String),
}

impl EngineError {
    /// True when retrying the whole run might succeed (transient upstream
    /// condition), false when manual intervention is needed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            EngineError::StageFailed { source, .. } => source.is_transient(),
            EngineError::InvalidTopic(_) | EngineError::Config(_) => false,
            EngineError::Memory(_) | EngineError::Output(_) => true,
        }
    }
}
