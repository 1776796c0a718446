//! Gemini-backed collaborator
//!
//! One [`GeminiAgent`] per pipeline role; each carries its own system
//! instruction, temperature, and model name resolved from the role at
//! construction time.

use super::{Agent, AgentError, AgentOutput, Result};
use crate::agents::prompts::AgentRole;
use crate::config::GeminiConfig;
use async_trait::async_trait;
use serde_json::json;

pub struct GeminiAgent {
    name: &'static str,
    base_url: String,
    model: String,
    api_key: String,
    system_instruction: &'static str,
    temperature: f64,
    client: reqwest::Client,
}

impl GeminiAgent {
    pub fn new(config: &GeminiConfig, api_key: &str, role: AgentRole) -> Self {
        let model = if role.uses_pro_model() {
            config.pro_model.clone()
        } else {
            config.model.clone()
        };

        Self {
            name: role.name(),
            base_url: config.base_url.clone(),
            model,
            api_key: api_key.to_string(),
            system_instruction: role.system_instruction(),
            temperature: role.temperature(),
            client: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Agent for GeminiAgent {
    fn name(&self) -> &str {
        self.name
    }

    async fn invoke(&self, input: &str) -> Result<AgentOutput> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": input}]
            }],
            "systemInstruction": {
                "parts": [{"text": self.system_instruction}]
            },
            "generationConfig": {
                "temperature": self.temperature
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| AgentError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                400 | 404 => AgentError::InvalidRequest(text),
                429 => AgentError::RateLimitExceeded,
                401 | 403 => AgentError::AuthenticationFailed(text),
                _ => AgentError::ProviderUnavailable(format!(
                    "Gemini API error ({}): {}",
                    status, text
                )),
            });
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AgentError::Parse(e.to_string()))?;

        let candidate = data
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| AgentError::Parse("No candidates in response".to_string()))?;

        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| AgentError::Parse("No parts in candidate content".to_string()))?;

        let mut full_text = String::new();
        for part in parts {
            if let Some(text) = part.get("text").and_then(|t| t.as_str()) {
                full_text.push_str(text);
            }
        }

        Ok(AgentOutput::parse(&full_text))
    }
}
