//! JSON-LD structured record extraction
//!
//! Film pages carry one `<script type="application/ld+json">` whose payload
//! is wrapped in CDATA comment markers. The record is decoded one top-level
//! key at a time: nested values under keys that no field reads are skipped
//! without being built, however deep they go.

use std::collections::HashMap;

use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;
use serde_json::Value;

use super::{element_text, FilmPage};
use crate::error::ExtractError;

const CDATA_OPEN: &str = "\n/* <![CDATA[ */\n";
const CDATA_CLOSE: &str = "\n/* ]]> */\n";

/// Remove the CDATA comment markers surrounding the JSON payload.
///
/// Only the exact marker lines are removed; any other whitespace stays.
pub fn clean_record_text(text: &str) -> String {
    text.replace(CDATA_OPEN, "").replace(CDATA_CLOSE, "")
}

/// Decoded top level of the embedded JSON-LD record
#[derive(Debug)]
pub struct StructuredRecord {
    fields: HashMap<String, Box<RawValue>>,
}

impl StructuredRecord {
    /// Decode record text (CDATA markers allowed). The top level must be an object.
    pub fn parse(text: &str) -> Result<Self, ExtractError> {
        let cleaned = clean_record_text(text);
        let fields = serde_json::from_str(&cleaned)
            .map_err(|e| ExtractError::MalformedRecord(e.to_string()))?;
        Ok(Self { fields })
    }

    /// Find the first element matching `selector` and decode its text
    pub(crate) fn locate(
        document: &Html,
        selector: &Selector,
        selector_str: &str,
    ) -> Result<Self, ExtractError> {
        let element = document
            .select(selector)
            .next()
            .ok_or_else(|| ExtractError::MissingNode(selector_str.to_string()))?;
        Self::parse(&element_text(element))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Decode one key as `T`. `None` when the key is absent or has another shape.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        serde_json::from_str(self.fields.get(key)?.get()).ok()
    }

    fn require<T: DeserializeOwned>(&self, key: &str, expected: &'static str) -> Result<T, ExtractError> {
        let raw = self
            .fields
            .get(key)
            .ok_or_else(|| ExtractError::MissingKey(key.to_string()))?;
        serde_json::from_str(raw.get()).map_err(|_| ExtractError::UnexpectedType {
            key: key.to_string(),
            expected,
        })
    }
}

/// Person, company or country entry; only the name is read
#[derive(Deserialize)]
struct Named {
    name: String,
}

#[derive(Deserialize)]
struct ReleaseEvent {
    #[serde(rename = "startDate")]
    start_date: Value,
}

/// `genre` is normally a list, but single-genre films may carry a bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum Genres {
    Many(Vec<String>),
    One(String),
}

impl FilmPage<'_> {
    /// Film title from the record's `name`. Hard-fail.
    pub fn title(&self) -> Result<String, ExtractError> {
        let record = self.record().map_err(ExtractError::clone)?;
        record.require("name", "string")
    }

    /// Release year from `releasedEvent[0].startDate`
    pub fn year(&self) -> Option<i32> {
        let events: Vec<Box<RawValue>> = self.record().ok()?.get("releasedEvent")?;
        let first: ReleaseEvent = serde_json::from_str(events.first()?.get()).ok()?;
        parse_year(&first.start_date)
    }

    pub fn director(&self) -> Option<String> {
        self.record_names("director")
    }

    /// Cast from the record's `actors` list
    pub fn cast(&self) -> Option<String> {
        self.record_names("actors")
    }

    pub fn country(&self) -> Option<String> {
        self.record_names("countryOfOrigin")
    }

    pub fn genre(&self) -> Option<String> {
        let genres = match self.record().ok()?.get::<Genres>("genre")? {
            Genres::Many(genres) => genres,
            Genres::One(genre) => vec![genre],
        };
        self.join(genres)
    }

    pub fn production_company(&self) -> Option<String> {
        self.record_names("productionCompany")
    }

    /// Join the `name` of every entry under `key`. One entry without a
    /// string name fails the whole field.
    fn record_names(&self, key: &str) -> Option<String> {
        let entries: Vec<Named> = self.record().ok()?.get(key)?;
        self.join(entries.into_iter().map(|entry| entry.name))
    }
}

/// Integer, or a string holding one. Fractional numbers are truncated.
fn parse_year(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => {
                let f = n.as_f64()?.trunc();
                (f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)).then_some(f as i32)
            }
        },
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
