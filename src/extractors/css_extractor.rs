//! CSS selector-based field extraction
//!
//! Fields read straight from the page markup rather than the JSON-LD record.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::{element_text, FilmPage};
use crate::error::ExtractError;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));
static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits pattern"));

impl FilmPage<'_> {
    /// Numeric film id from the lazy-load container's data attribute. Hard-fail.
    pub fn id(&self) -> Result<u64, ExtractError> {
        let profile = self.profile();
        let element = self
            .document
            .select(&self.extractor.film_id)
            .next()
            .ok_or_else(|| ExtractError::MissingNode(profile.film_id_selector.clone()))?;

        let raw = element
            .value()
            .attr(&profile.film_id_attr)
            .ok_or_else(|| ExtractError::MissingAttribute {
                selector: profile.film_id_selector.clone(),
                attr: profile.film_id_attr.clone(),
            })?;

        raw.trim()
            .parse()
            .map_err(|_| ExtractError::InvalidInteger(raw.to_string()))
    }

    /// Runtime in minutes: the first run of digits in the footer text
    pub fn runtime(&self) -> Option<u32> {
        let footer = self.document.select(&self.extractor.runtime).next()?;
        let text = element_text(footer);
        DIGITS.find(&text)?.as_str().parse().ok()
    }

    /// Spoken languages, from every anchor linking to a language page
    pub fn languages(&self) -> Option<String> {
        self.linked_text(&ANCHOR_SELECTOR, &self.extractor.language_href)
    }

    /// Alternative titles paragraph with newlines and tabs removed
    pub fn alt_titles(&self) -> Option<String> {
        let container = self.document.select(&self.extractor.alt_titles).next()?;
        let paragraph = container.select(&PARAGRAPH_SELECTOR).next()?;
        Some(
            element_text(paragraph)
                .chars()
                .filter(|c| !matches!(c, '\n' | '\t'))
                .collect(),
        )
    }

    /// Names of people whose link matches `role` (a regex, e.g. "writer"),
    /// in document order. An invalid pattern is a missing value.
    pub fn people(&self, role: &str) -> Option<String> {
        let pattern = Regex::new(role).ok()?;
        self.linked_text(&self.extractor.people, &pattern)
    }

    /// Join the text of every `selector` match whose `href` matches `pattern`.
    /// Anchors without an `href` never match.
    fn linked_text(&self, selector: &Selector, pattern: &Regex) -> Option<String> {
        let names = self
            .document
            .select(selector)
            .filter(|el| el.value().attr("href").is_some_and(|href| pattern.is_match(href)))
            .map(element_text);
        self.join(names)
    }
}
