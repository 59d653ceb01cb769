use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::error;

use crate::errors::{ToolError, ToolResult};
use crate::models::tool::{Tool, ToolCall};
use crate::scrape::content::ContentExtractor;
use crate::scrape::listing::ListingExtractor;
use crate::scrape::proxy::{ProxyClient, ProxyConfig};
use crate::scrape::search::scrape_provider_search;
use crate::tools::System;

pub const SEARCH_TOOL: &str = "scrape_provider_search";
pub const CONTENT_TOOL: &str = "scrape_content";

/// The directory-scraping capability: provider search plus general page
/// scraping, both routed through the proxy.
pub struct ScrapeSystem {
    client: ProxyClient,
    extractor: ListingExtractor,
    content: ContentExtractor,
    tools: Vec<Tool>,
}

impl ScrapeSystem {
    pub fn new(config: ProxyConfig) -> Result<Self> {
        Ok(Self {
            client: ProxyClient::new(config)?,
            extractor: ListingExtractor::new()?,
            content: ContentExtractor::new()?,
            tools: vec![
                Tool::new(
                    SEARCH_TOOL,
                    "Scrape provider search results from a given URL and return the data in JSON format.",
                    url_schema("The provider search URL to scrape listings from."),
                ),
                Tool::new(
                    CONTENT_TOOL,
                    "Scrape text content and links from a given URL.",
                    url_schema("The URL to scrape content from."),
                ),
            ],
        })
    }
}

#[async_trait]
impl System for ScrapeSystem {
    fn name(&self) -> &str {
        "scrape"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: &ToolCall) -> ToolResult<Option<String>> {
        match tool_call.name.as_str() {
            SEARCH_TOOL => {
                let url = require_url(&tool_call.arguments)?;
                let result = scrape_provider_search(&self.client, &self.extractor, url).await;
                Ok(Some(result))
            }
            CONTENT_TOOL => {
                let url = require_url(&tool_call.arguments)?;
                match self.content.scrape_page(&self.client, url).await {
                    Ok(page) => {
                        let serialized = serde_json::to_string(&page)
                            .map_err(|e| ToolError::ExecutionError(e.to_string()))?;
                        Ok(Some(serialized))
                    }
                    Err(e) => {
                        // The caller only needs to know there was no data.
                        error!(url, error = %e, "content scrape failed");
                        Ok(None)
                    }
                }
            }
            other => Err(ToolError::NotFound(other.to_string())),
        }
    }
}

fn url_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "url": {
                "type": "string",
                "description": description,
            }
        },
        "required": ["url"]
    })
}

fn require_url(arguments: &Value) -> ToolResult<&str> {
    arguments
        .get("url")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidParameters("missing required parameter 'url'".to_string()))
}
