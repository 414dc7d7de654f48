//! # Common Test Utilities
//!
//! Mock AI providers for exercising the extraction engine without a live
//! API, shared across the workspace's test suites.

use async_trait::async_trait;
use showmeta::errors::ProviderError;
use showmeta::providers::ai::AiProvider;
use std::sync::{Arc, RwLock};

/// A scripted AI provider for logic testing.
///
/// Returns the programmed responses in order, one per `generate` call, and
/// records every prompt it receives so tests can assert on the retry flow.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<String>>>,
    responses: Arc<RwLock<Vec<String>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    /// The prompts received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.call_history.read().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, ProviderError> {
        self.call_history.write().unwrap().push(prompt.to_string());

        if let Some(response) = self.responses.write().unwrap().pop() {
            Ok(response)
        } else {
            Err(ProviderError::Api(
                "MockAiProvider: no response programmed for this call".to_string(),
            ))
        }
    }
}

/// A provider whose calls always fail at the service level, for testing how
/// the retry budget treats transport errors.
#[derive(Clone, Debug)]
pub struct FailingAiProvider {
    pub call_history: Arc<RwLock<Vec<String>>>,
}

impl FailingAiProvider {
    pub fn new() -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.call_history.read().unwrap().clone()
    }
}

impl Default for FailingAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiProvider for FailingAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        _max_tokens: u32,
        _temperature: f32,
    ) -> Result<String, ProviderError> {
        self.call_history.write().unwrap().push(prompt.to_string());
        Err(ProviderError::Api("503 service overloaded".to_string()))
    }
}
