//! Text-generation provider abstraction.
//!
//! The endpoints forward a templated prompt to a hosted model and hand the
//! raw text back to the tolerant parsers in slidecraft-core. The actual SDK
//! call lives behind [`TextGenerator`] so the routing, templating, and error
//! surfacing can be exercised without network access.

use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Hosted providers a request may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Google,
    Anthropic,
}

impl ProviderKind {
    /// Resolve the wire name used by the frontend; `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "openai" => Some(ProviderKind::OpenAi),
            "google" => Some(ProviderKind::Google),
            "anthropic" => Some(ProviderKind::Anthropic),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Google => "google",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

/// Provider-side failures, surfaced to the user without retry.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider rejected the credentials.
    #[error("{0}")]
    Auth(String),
    /// The call itself failed (network, quota, model error).
    #[error("{0}")]
    Generation(String),
}

/// A prompt forwarded to a hosted text-generation model.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub prompt: String,
    pub temperature: f64,
}

/// Boxed future for provider calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A hosted text-generation backend.
pub trait TextGenerator: Send + Sync {
    /// Forward the prompt and return the model's raw text.
    fn generate(&self, request: PromptRequest) -> BoxFuture<'_, Result<String, ProviderError>>;
}

/// Placeholder generator used until a real provider binding is wired in:
/// every call fails with a configuration error the routes surface as-is.
pub struct UnconfiguredGenerator;

impl TextGenerator for UnconfiguredGenerator {
    fn generate(&self, request: PromptRequest) -> BoxFuture<'_, Result<String, ProviderError>> {
        let provider = request.provider.name();
        Box::pin(async move {
            Err(ProviderError::Generation(format!(
                "no {provider} binding configured on this server"
            )))
        })
    }
}

/// Test double that replays queued responses in order.
#[cfg(test)]
pub struct ScriptedGenerator {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, ProviderError>>>,
}

#[cfg(test)]
impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into_iter().collect()),
        }
    }

    pub fn ok(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn err(message: &str) -> Self {
        Self::new(vec![Err(ProviderError::Generation(message.to_string()))])
    }

    pub fn auth_err(message: &str) -> Self {
        Self::new(vec![Err(ProviderError::Auth(message.to_string()))])
    }
}

#[cfg(test)]
impl TextGenerator for ScriptedGenerator {
    fn generate(&self, _request: PromptRequest) -> BoxFuture<'_, Result<String, ProviderError>> {
        let next = self
            .responses
            .lock()
            .expect("scripted responses")
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Generation("script exhausted".to_string())));
        Box::pin(async move { next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_names_round_trip() {
        for kind in [ProviderKind::OpenAi, ProviderKind::Google, ProviderKind::Anthropic] {
            assert_eq!(ProviderKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ProviderKind::from_name("azure"), None);
    }
}
