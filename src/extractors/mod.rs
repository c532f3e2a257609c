//! HTML field extractors
//!
//! A [`FilmPage`] wraps one parsed document. Field accessors live in the
//! per-source modules:
//! - `jsonld_extractor`: fields read from the embedded JSON-LD record
//! - `css_extractor`: fields read straight from the DOM

mod css_extractor;
mod jsonld_extractor;

pub use jsonld_extractor::{clean_record_text, StructuredRecord};

use std::cell::OnceCell;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ExtractError;
use crate::profile::SiteProfile;

static DEFAULT_EXTRACTOR: Lazy<Extractor> = Lazy::new(|| {
    Extractor::new(&SiteProfile::default()).expect("default site profile compiles")
});

/// A [`SiteProfile`] with its selectors and patterns compiled.
///
/// Immutable after construction, so one instance can serve any number of
/// pages across threads.
#[derive(Debug)]
pub struct Extractor {
    profile: SiteProfile,
    film_id: Selector,
    record: Selector,
    runtime: Selector,
    alt_titles: Selector,
    people: Selector,
    language_href: Regex,
}

impl Extractor {
    /// Compile a profile. Fails on the first selector or pattern that does not parse.
    pub fn new(profile: &SiteProfile) -> Result<Self, ExtractError> {
        Ok(Self {
            film_id: compile_selector(&profile.film_id_selector)?,
            record: compile_selector(&profile.record_selector)?,
            runtime: compile_selector(&profile.runtime_selector)?,
            alt_titles: compile_selector(&profile.alt_titles_selector)?,
            people: compile_selector(&profile.people_selector)?,
            language_href: compile_pattern(&profile.language_href_pattern)?,
            profile: profile.clone(),
        })
    }

    /// Extractor for the default profile
    pub fn shared() -> &'static Extractor {
        &DEFAULT_EXTRACTOR
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// Parse raw HTML into a page bound to this extractor
    pub fn page(&self, html: &str) -> FilmPage<'_> {
        self.document(Html::parse_document(html))
    }

    /// Wrap an already parsed document
    pub fn document(&self, document: Html) -> FilmPage<'_> {
        FilmPage {
            extractor: self,
            document,
            record: OnceCell::new(),
        }
    }
}

/// One film page, ready for field extraction.
///
/// The structured record is decoded on first use and reused by every later
/// record-backed field, failures included.
pub struct FilmPage<'a> {
    extractor: &'a Extractor,
    document: Html,
    record: OnceCell<Result<StructuredRecord, ExtractError>>,
}

impl FilmPage<'static> {
    /// Parse raw HTML using the default profile
    pub fn parse(html: &str) -> Self {
        Extractor::shared().page(html)
    }
}

impl From<Html> for FilmPage<'static> {
    fn from(document: Html) -> Self {
        Extractor::shared().document(document)
    }
}

impl<'a> FilmPage<'a> {
    pub fn document(&self) -> &Html {
        &self.document
    }

    pub fn profile(&self) -> &'a SiteProfile {
        &self.extractor.profile
    }

    /// The decoded JSON-LD record, or the error that prevented decoding it
    pub fn record(&self) -> Result<&StructuredRecord, &ExtractError> {
        self.record
            .get_or_init(|| {
                StructuredRecord::locate(
                    &self.document,
                    &self.extractor.record,
                    &self.extractor.profile.record_selector,
                )
            })
            .as_ref()
    }

    fn join(&self, names: impl IntoIterator<Item = String>) -> Option<String> {
        join_names(names, self.extractor.profile.delimiter)
    }
}

/// Join names with `delimiter`. An empty sequence is a missing value, not `""`.
pub fn join_names(names: impl IntoIterator<Item = String>, delimiter: char) -> Option<String> {
    let names: Vec<String> = names.into_iter().collect();
    if names.is_empty() {
        return None;
    }
    Some(names.join(delimiter.to_string().as_str()))
}

/// Concatenated text of all descendant text nodes, untrimmed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn compile_selector(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|_| ExtractError::InvalidSelector(selector.to_string()))
}

fn compile_pattern(pattern: &str) -> Result<Regex, ExtractError> {
    Regex::new(pattern).map_err(|e| ExtractError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_names() {
        let names = vec!["A".to_string(), "B".to_string()];
        assert_eq!(join_names(names, ';'), Some("A;B".to_string()));
        assert_eq!(join_names(Vec::new(), ';'), None);
        assert_eq!(
            join_names(vec!["".to_string()], ';'),
            Some("".to_string())
        );
    }

    #[test]
    fn test_invalid_profile_selector() {
        let profile = SiteProfile {
            runtime_selector: "p..footer".to_string(),
            ..SiteProfile::default()
        };

        let err = Extractor::new(&profile).unwrap_err();
        assert_eq!(err, ExtractError::InvalidSelector("p..footer".to_string()));
    }

    #[test]
    fn test_invalid_profile_pattern() {
        let profile = SiteProfile {
            language_href_pattern: "lang(".to_string(),
            ..SiteProfile::default()
        };

        let err = Extractor::new(&profile).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidPattern { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let profile = SiteProfile {
            delimiter: '|',
            ..SiteProfile::default()
        };
        let extractor = Extractor::new(&profile).unwrap();
        let page = extractor.page(
            r#"<script type="application/ld+json">{"genre": ["Drama", "War"]}</script>"#,
        );

        assert_eq!(page.genre(), Some("Drama|War".to_string()));
    }

    #[test]
    fn test_page_from_parsed_document() {
        let document = Html::parse_document(r#"<div class="really-lazy-load" data-film-id="7"></div>"#);
        let page = FilmPage::from(document);

        assert_eq!(page.id(), Ok(7));
    }
}
