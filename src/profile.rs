//! Site profile: where each field lives on the page
//!
//! Defaults describe the film site's current markup. A profile can be
//! supplied as JSON to follow markup changes without a rebuild.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Selectors, patterns and output settings used by the extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Element carrying the numeric film id
    pub film_id_selector: String,
    /// Attribute on that element holding the id
    pub film_id_attr: String,
    /// Script element holding the JSON-LD record (first match wins)
    pub record_selector: String,
    /// Footer paragraph whose text contains the runtime in minutes
    pub runtime_selector: String,
    /// Regex matched against anchor `href`s to find spoken languages
    pub language_href_pattern: String,
    /// Container whose first paragraph lists alternative titles
    pub alt_titles_selector: String,
    /// Anchors linking to people pages (cast and crew)
    pub people_selector: String,
    /// Roles collected into `FilmMetadata::crew`
    pub crew_roles: Vec<String>,
    /// Separator for joined lists
    pub delimiter: char,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            film_id_selector: "div.really-lazy-load".to_string(),
            film_id_attr: "data-film-id".to_string(),
            record_selector: r#"script[type="application/ld+json"]"#.to_string(),
            runtime_selector: "p.text-link.text-footer".to_string(),
            language_href_pattern: "language".to_string(),
            alt_titles_selector: "div.text-indentedlist".to_string(),
            people_selector: "a.text-slug".to_string(),
            crew_roles: ["writer", "producer", "editor", "cinematography", "composer"]
                .into_iter()
                .map(String::from)
                .collect(),
            delimiter: ';',
        }
    }
}

impl SiteProfile {
    /// Parse a profile from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json).map_err(|e| ExtractError::InvalidProfile(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_keeps_defaults() {
        let profile = SiteProfile::from_json(r#"{"delimiter": "|", "crew_roles": ["writer"]}"#)
            .unwrap();

        assert_eq!(profile.delimiter, '|');
        assert_eq!(profile.crew_roles, vec!["writer".to_string()]);
        assert_eq!(profile.film_id_attr, "data-film-id");
        assert_eq!(profile.runtime_selector, "p.text-link.text-footer");
    }

    #[test]
    fn test_invalid_profile_json() {
        let err = SiteProfile::from_json("{not json").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidProfile(_)));
    }
}
