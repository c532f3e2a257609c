//! Whole-page film metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExtractError;
use crate::extractors::FilmPage;

/// Every field of one film page.
///
/// `None` (JSON `null`) marks a field that could not be extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilmMetadata {
    pub id: u64,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub genre: Option<String>,
    pub production_company: Option<String>,
    pub runtime: Option<u32>,
    pub languages: Option<String>,
    pub alt_titles: Option<String>,
    /// Joined names per configured crew role
    pub crew: BTreeMap<String, Option<String>>,
}

impl FilmPage<'_> {
    /// Extract every field. Stops at the first hard-fail field (`id`, then
    /// `title`) that cannot be read, so a broken page is rejected early.
    pub fn metadata(&self) -> Result<FilmMetadata, ExtractError> {
        let id = self.id()?;
        let title = self.title()?;

        let crew = self
            .profile()
            .crew_roles
            .iter()
            .map(|role| (role.clone(), self.people(role)))
            .collect();

        let metadata = FilmMetadata {
            id,
            title,
            year: self.year(),
            director: self.director(),
            cast: self.cast(),
            country: self.country(),
            genre: self.genre(),
            production_company: self.production_company(),
            runtime: self.runtime(),
            languages: self.languages(),
            alt_titles: self.alt_titles(),
            crew,
        };

        debug!(film_id = metadata.id, title = %metadata.title, "extracted film metadata");
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Extractor;
    use crate::profile::SiteProfile;

    const PAGE: &str = r#"
    <html>
    <head>
        <script type="application/ld+json">
/* <![CDATA[ */
{"@type": "Movie", "name": "La Jetée", "releasedEvent": [{"startDate": 1962}], "director": [{"name": "Chris Marker"}], "genre": ["Science Fiction"]}
/* ]]> */
</script>
    </head>
    <body>
        <div class="really-lazy-load" data-film-id="26371"></div>
        <a href="/writer/chris-marker/" class="text-slug">Chris Marker</a>
        <a href="/composer/trevor-duncan/" class="text-slug">Trevor Duncan</a>
        <p class="text-link text-footer">28 mins</p>
    </body>
    </html>
    "#;

    #[test]
    fn test_metadata() {
        let metadata = FilmPage::parse(PAGE).metadata().unwrap();

        assert_eq!(metadata.id, 26371);
        assert_eq!(metadata.title, "La Jetée");
        assert_eq!(metadata.year, Some(1962));
        assert_eq!(metadata.director, Some("Chris Marker".to_string()));
        assert_eq!(metadata.cast, None);
        assert_eq!(metadata.genre, Some("Science Fiction".to_string()));
        assert_eq!(metadata.runtime, Some(28));
        assert_eq!(metadata.languages, None);
        assert_eq!(metadata.crew["writer"], Some("Chris Marker".to_string()));
        assert_eq!(metadata.crew["composer"], Some("Trevor Duncan".to_string()));
        assert_eq!(metadata.crew["editor"], None);
    }

    #[test]
    fn test_missing_fields_serialize_as_null() {
        let metadata = FilmPage::parse(PAGE).metadata().unwrap();
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["title"], "La Jetée");
        assert!(json["cast"].is_null());
        assert!(json["crew"]["producer"].is_null());
    }

    #[test]
    fn test_hard_fail_rejects_page() {
        let page = FilmPage::parse(&PAGE.replace("data-film-id", "data-other"));
        assert!(matches!(
            page.metadata(),
            Err(ExtractError::MissingAttribute { .. })
        ));

        let page = FilmPage::parse(&PAGE.replace("\"name\": \"La Jetée\", ", ""));
        assert_eq!(
            page.metadata(),
            Err(ExtractError::MissingKey("name".to_string()))
        );
    }

    #[test]
    fn test_configured_crew_roles() {
        let profile = SiteProfile {
            crew_roles: vec!["composer".to_string()],
            ..SiteProfile::default()
        };
        let extractor = Extractor::new(&profile).unwrap();
        let metadata = extractor.page(PAGE).metadata().unwrap();

        assert_eq!(metadata.crew.len(), 1);
        assert_eq!(metadata.crew["composer"], Some("Trevor Duncan".to_string()));
    }
}
