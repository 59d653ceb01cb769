use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::record::ProviderRecord;
use crate::scrape::parse_selector;

const HEADER_CLASS: &str = "directorist-listing-single__header";

/// Parses provider listings out of a Sonder directory search-results page.
/// The page layout is fixed: each listing is a header div (name + link)
/// followed by a content div holding an icon-keyed info list.
pub struct ListingExtractor {
    listing: Selector,
    info_list: Selector,
    item: Selector,
    card_text: Selector,
    icon: Selector,
    phone: Selector,
    select_card: Selector,
    link: Selector,
}

impl ListingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            listing: parse_selector("div.directorist-listing-single__content")?,
            info_list: parse_selector("div.directorist-listing-single__info--list")?,
            item: parse_selector("li")?,
            card_text: parse_selector("div.directorist-listing-card-text")?,
            icon: parse_selector("i")?,
            phone: parse_selector("div.directorist-listing-card-phone")?,
            select_card: parse_selector("div.directorist-listing-card-select")?,
            link: parse_selector("a")?,
        })
    }

    /// Extract every provider record from one page of markup, in document
    /// order. Pure function of its input: a listing with no recognizable
    /// details still yields a (possibly empty) record.
    pub fn extract(&self, markup: &str) -> Vec<ProviderRecord> {
        let document = Html::parse_document(markup);
        let mut records = Vec::new();

        for listing in document.select(&self.listing) {
            let mut record = ProviderRecord::default();

            if let Some(header) = previous_header(&listing) {
                if let Some(link) = header.select(&self.link).next() {
                    record.href = link.value().attr("href").map(str::to_string);
                    record.name = Some(trimmed_text(&link));
                }
            }

            if let Some(info) = listing.select(&self.info_list).next() {
                for item in info.select(&self.item) {
                    self.extract_item(&item, &mut record);
                }
            }

            records.push(record);
        }

        debug!(count = records.len(), "extracted provider listings");
        records
    }

    // One info-list item can carry at most a text card, a phone card, and an
    // acceptance card; all are checked so nested markup never loses a field.
    fn extract_item(&self, item: &ElementRef<'_>, record: &mut ProviderRecord) {
        if let Some(text_div) = item.select(&self.card_text).next() {
            if let Some(icon) = text_div.select(&self.icon).next() {
                let style = icon.value().attr("style").unwrap_or("");
                let text = trimmed_text(&text_div);

                if style.contains("comment-solid") && !text.contains("NPI") {
                    record.clinic = Some(text.clone());
                } else if style.contains("comment-solid") {
                    record.npi = after_colon(&text);
                }

                if style.contains("map-marker-solid") {
                    record.address = Some(text);
                }
            }
        }

        if let Some(phone_div) = item.select(&self.phone).next() {
            if let Some(link) = phone_div.select(&self.link).next() {
                record.phone = Some(trimmed_text(&link));
            }
        }

        if let Some(select_div) = item.select(&self.select_card).next() {
            let style = select_div
                .select(&self.icon)
                .next()
                .and_then(|icon| icon.value().attr("style"))
                .unwrap_or("");
            if style.contains("check-circle-solid") {
                record.accepting_patients = after_colon(&trimmed_text(&select_div));
            }
        }
    }
}

/// The listing header precedes the content block as a sibling; listings never
/// share headers, so the search stops at the nearest match.
fn previous_header<'a>(listing: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    listing
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().classes().any(|class| class == HEADER_CLASS))
}

fn trimmed_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn after_colon(text: &str) -> Option<String> {
    text.split_once(':').map(|(_, rest)| rest.trim().to_string())
}
