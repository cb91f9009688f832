//! HTTP adapter for the inference gateway port
//!
//! Talks to an OpenAI-compatible `/chat/completions` endpoint. The adapter
//! owns the transport concerns only: request shaping, auth, status-code
//! mapping, and envelope extraction. What the model actually said is
//! handed to the defensive parsers in `nyay_domain::intake::parsing`.

use crate::config::file_config::GatewayConfig;
use async_trait::async_trait;
use nyay_application::ports::inference_gateway::{
    DialogueAction, DialogueRequest, GatewayError, InferenceGateway,
};
use nyay_domain::{
    CaseDescription, DialogueTurn, InitialAnalysis, PromptTemplate, Role,
    parse_detailed_analysis, parse_dialogue_turn, parse_initial_analysis,
};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Map a non-success HTTP status to the gateway error taxonomy.
///
/// 429 and 402 are the two distinguished cases shown to the user verbatim;
/// everything else is a generic failure.
fn error_for_status(status: StatusCode) -> GatewayError {
    match status.as_u16() {
        429 => GatewayError::RateLimited,
        402 => GatewayError::QuotaExhausted,
        code => GatewayError::RequestFailed(format!(
            "HTTP {} {}",
            code,
            status.canonical_reason().unwrap_or("Unknown")
        )),
    }
}

/// Inference gateway adapter over HTTPS.
pub struct HttpInferenceGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpInferenceGateway {
    /// Create a gateway from configuration.
    ///
    /// The API key is read from the environment variable named in the
    /// config; it never lives in the config file itself. A missing key is
    /// not an error here; the gateway may be anonymous behind a proxy.
    pub fn new(config: &GatewayConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            warn!(
                "Environment variable {} not set; calling the gateway unauthenticated",
                config.api_key_env
            );
        }
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        }
    }

    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, GatewayError> {
        let body = ChatRequest {
            model: &self.model,
            messages,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status));
        }

        let envelope: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(format!("Malformed gateway envelope: {}", e)))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(GatewayError::EmptyResponse);
        }

        debug!("Gateway returned {} bytes", content.len());
        Ok(content)
    }

    fn dialogue_messages(&self, request: &DialogueRequest) -> Vec<ChatMessage> {
        let mut messages = vec![
            ChatMessage::system(PromptTemplate::dialogue_system()),
            ChatMessage::user(PromptTemplate::dialogue_context(
                &request.case_description,
                &request.initial_analysis,
            )),
        ];

        for entry in request.history.messages() {
            messages.push(match entry.role {
                Role::User => ChatMessage::user(entry.content.clone()),
                Role::Assistant => ChatMessage::assistant(entry.content.clone()),
            });
        }

        if request.action == DialogueAction::Generate {
            messages.push(ChatMessage::user(PromptTemplate::generation_instruction()));
        }

        messages
    }
}

#[async_trait]
impl InferenceGateway for HttpInferenceGateway {
    async fn classify(
        &self,
        description: &CaseDescription,
    ) -> Result<InitialAnalysis, GatewayError> {
        let messages = vec![
            ChatMessage::system(PromptTemplate::classification_system()),
            ChatMessage::user(PromptTemplate::classification_prompt(description)),
        ];
        let completion = self.complete(messages).await?;
        // Malformed completions degrade to the fallback analysis
        Ok(parse_initial_analysis(&completion))
    }

    async fn dialogue(&self, request: DialogueRequest) -> Result<DialogueTurn, GatewayError> {
        let messages = self.dialogue_messages(&request);
        let completion = self.complete(messages).await?;

        let turn = match request.action {
            DialogueAction::Generate => {
                DialogueTurn::DetailedAnalysis(parse_detailed_analysis(&completion))
            }
            DialogueAction::Start | DialogueAction::Respond => parse_dialogue_turn(&completion),
        };
        Ok(turn)
    }
}
