//! Data models for scraped episodes and the generated feed.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawRecord`]: Unvalidated strings pulled out of one listing block
//! - [`Episode`]: A normalized feed item
//! - [`Feed`]: The JSON Feed document written to disk
//!
//! Field order in the serialized output follows declaration order, so the
//! structs below define the on-disk key order.

use serde::{Deserialize, Serialize};

/// JSON Feed schema identifier written to `version`.
pub const JSON_FEED_VERSION: &str = "https://jsonfeed.org/version/1";

/// One content block as found on the listing page.
///
/// Every field is the empty string when the block had no matching node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: String,
    pub lead: String,
    /// Link target exactly as written in the `href` attribute.
    pub href: String,
    /// Image source exactly as written in the markup.
    pub image: String,
    pub published: String,
}

/// A single show episode, ready to be serialized as a feed item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Episode {
    pub id: String,
    pub url: String,
    pub title: String,
    /// Lead text of the episode.
    #[serde(rename = "content_html")]
    pub description: String,
    /// Absolute image URL, or empty when the block had none.
    pub image: String,
    #[serde(rename = "date_published")]
    pub published_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// The feed document root.
///
/// `items` keeps page order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feed {
    #[serde(rename = "version")]
    pub schema_version: String,
    pub title: String,
    pub description: String,
    pub home_page_url: String,
    pub feed_url: String,
    pub author: Author,
    pub icon: String,
    pub favicon: String,
    pub items: Vec<Episode>,
}
