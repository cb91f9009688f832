//! Configuration file schema

use nyay_domain::UiSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inference gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// OpenAI-compatible chat-completions endpoint
    pub endpoint: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Name of the environment variable holding the API key.
    /// The key itself never lives in a config file.
    pub api_key_env: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://ai.gateway.lovable.dev/v1/chat/completions".to_string(),
            model: "google/gemini-2.5-flash".to_string(),
            api_key_env: "LOVABLE_API_KEY".to_string(),
        }
    }
}

/// Conversation-log settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Where to write the JSONL session transcript; `None` disables it
    pub conversation_log: Option<PathBuf>,
}

/// Root of the merged configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: GatewayConfig,
    pub ui: UiSettings,
    pub logging: LoggingConfig,
}
