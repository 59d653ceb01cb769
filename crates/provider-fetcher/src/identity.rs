//! Assistant identity caching. Creating an assistant is a billable remote
//! operation, so the identifier is written to a local file and reused on
//! later launches.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde_json::Value;
use tracing::info;

use crate::prompt::ASSISTANT_INSTRUCTIONS;
use crate::providers::base::AssistantProvider;

pub const APP_DIR: &str = "provider-fetcher";
const ASSISTANT_ID_FILE: &str = "assistant_id";

/// What the remote assistant is created as.
#[derive(Debug, Clone)]
pub struct AssistantProfile {
    pub name: String,
    pub model: String,
    pub instructions: String,
}

impl Default for AssistantProfile {
    fn default() -> Self {
        Self {
            name: "ProviderFetcher".to_string(),
            model: "gpt-4o-mini".to_string(),
            instructions: ASSISTANT_INSTRUCTIONS.to_string(),
        }
    }
}

impl AssistantProfile {
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }
}

/// Where the cached assistant id lives, creating the config directory if
/// needed.
pub fn assistant_id_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow!("could not determine config directory"))?
        .join(APP_DIR);
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create {}", config_dir.display()))?;
    Ok(config_dir.join(ASSISTANT_ID_FILE))
}

/// Reuse the assistant id cached in `id_file`, or create a fresh assistant
/// and cache its id for next time.
pub async fn get_or_create_assistant(
    provider: &dyn AssistantProvider,
    profile: &AssistantProfile,
    tool_specs: &[Value],
    id_file: &Path,
) -> Result<String> {
    if id_file.exists() {
        let cached = std::fs::read_to_string(id_file)
            .with_context(|| format!("failed to read {}", id_file.display()))?;
        let cached = cached.trim();
        if !cached.is_empty() {
            info!(assistant_id = cached, "reusing cached assistant");
            return Ok(cached.to_string());
        }
    }

    let assistant_id = provider
        .create_assistant(
            &profile.name,
            &profile.instructions,
            &profile.model,
            tool_specs,
        )
        .await?;
    std::fs::write(id_file, &assistant_id)
        .with_context(|| format!("failed to write {}", id_file.display()))?;
    info!(assistant_id = %assistant_id, "created and cached new assistant");
    Ok(assistant_id)
}
