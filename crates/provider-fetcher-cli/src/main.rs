use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use provider_fetcher::agent::Agent;
use provider_fetcher::identity::{assistant_id_path, get_or_create_assistant, AssistantProfile};
use provider_fetcher::providers::openai::{OpenAiAssistantProvider, OpenAiProviderConfig};
use provider_fetcher::scrape::proxy::ProxyConfig;
use provider_fetcher::tools::scrape::ScrapeSystem;
use provider_fetcher::tools::Dispatcher;

mod prompt;
mod session;

use prompt::cliclack::CliclackPrompt;
use session::session_file::{ensure_downloads_dir, ensure_session_dir};
use session::Session;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OpenAI API Key (can also be set via OPENAI_API_KEY environment variable)
    #[arg(long)]
    api_key: Option<String>,

    /// ScrapeOps proxy API Key (can also be set via SCRAPEOPS_API_KEY environment variable)
    #[arg(long)]
    proxy_key: Option<String>,

    /// Model to use
    #[arg(short, long, default_value = "gpt-4o-mini")]
    model: String,

    /// OpenAI API host
    #[arg(long, default_value = "https://api.openai.com")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let api_key = cli
        .api_key
        .or_else(|| env::var("OPENAI_API_KEY").ok())
        .context("OpenAI API key must be provided via --api-key or OPENAI_API_KEY")?;
    let proxy_key = cli
        .proxy_key
        .or_else(|| env::var("SCRAPEOPS_API_KEY").ok())
        .context("ScrapeOps API key must be provided via --proxy-key or SCRAPEOPS_API_KEY")?;

    let mut dispatcher = Dispatcher::new();
    dispatcher.add_system(Box::new(ScrapeSystem::new(ProxyConfig::new(proxy_key))?));
    let tool_specs = dispatcher.assistant_tool_specs();

    let provider = OpenAiAssistantProvider::new(OpenAiProviderConfig {
        host: cli.host,
        api_key,
    })?;

    let profile = AssistantProfile::default().with_model(cli.model);
    let id_file = assistant_id_path()?;
    let assistant_id =
        get_or_create_assistant(&provider, &profile, &tool_specs, &id_file).await?;

    let agent = Agent::connect(Box::new(provider), dispatcher, assistant_id).await?;

    let started = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let session_file = ensure_session_dir()?.join(format!("session-{started}.jsonl"));
    let downloads_dir = ensure_downloads_dir()?;

    let prompt = Box::new(CliclackPrompt::new());
    let mut session = Session::new(Box::new(agent), prompt, session_file, downloads_dir);
    session.start().await
}
