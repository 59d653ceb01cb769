use std::collections::BTreeSet;

use anyhow::Result;
use scraper::{Html, Selector};
use tracing::info;

use crate::errors::FetchError;
use crate::models::record::PageContent;
use crate::scrape::parse_selector;
use crate::scrape::proxy::ProxyClient;

/// Reduces arbitrary pages to visible text plus outbound links. The anchor
/// selector is parsed once at construction.
pub struct ContentExtractor {
    anchors: Selector,
}

impl ContentExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            anchors: parse_selector("a[href]")?,
        })
    }

    /// Fetch a page with client-side rendering enabled and reduce it. Callers
    /// treat a fetch failure as "no data".
    pub async fn scrape_page(
        &self,
        client: &ProxyClient,
        url: &str,
    ) -> Result<PageContent, FetchError> {
        let markup = client.fetch(url, true).await?;
        let page = self.page_content(&markup);
        info!(url, links = page.links.len(), "scraped page content");
        Ok(page)
    }

    /// Pure reduction of markup: text chunks are trimmed and newline-joined;
    /// hrefs are deduplicated, stripped of empties, and sorted
    /// lexicographically.
    pub fn page_content(&self, markup: &str) -> PageContent {
        let document = Html::parse_document(markup);

        let content = document
            .root_element()
            .text()
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        // BTreeSet keeps the links sorted and unique.
        let links: BTreeSet<String> = document
            .select(&self.anchors)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(str::to_string)
            .collect();

        PageContent {
            content,
            links: links.into_iter().collect(),
        }
    }
}
