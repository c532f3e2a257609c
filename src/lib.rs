//! Film page metadata extraction
//!
//! Pulls film metadata out of a single HTML page:
//! - JSON-LD structured record (title, year, director, cast, country, genre, production company)
//! - DOM lookups (film id, runtime, languages, alternative titles, people by role)
//!
//! Every field except `id` and `title` degrades to `None` when it cannot be
//! extracted. Those two return an [`ExtractError`] instead.

pub mod error;
pub mod extractors;
pub mod ffi;
pub mod metadata;
pub mod profile;

pub use error::ExtractError;
pub use extractors::*;
pub use ffi::*;
pub use metadata::FilmMetadata;
pub use profile::SiteProfile;
