use anyhow::{anyhow, Result};
use scraper::Selector;

pub mod content;
pub mod listing;
pub mod proxy;
pub mod search;

pub(crate) fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css}: {e}"))
}
