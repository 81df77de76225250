//! Field normalization: [`RawRecord`] in, [`Episode`] out.
//!
//! Nothing here fails. A block with no usable fields still becomes an
//! (almost empty) episode so the feed mirrors the page one-to-one.

use crate::models::{Episode, RawRecord};
use crate::utils::{Clock, truncate_for_log};
use chrono::DateTime;
use tracing::{debug, warn};
use url::Url;

/// Resolve `raw` against the site origin.
///
/// Absolute http(s) URLs are returned exactly as given. Empty input, other
/// schemes (`javascript:`, `mailto:`, `data:`) and unresolvable values
/// become the empty string.
pub fn absolute_url(raw: &str, origin: &Url) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if is_absolute_http(raw) {
        return raw.to_string();
    }
    match origin.join(raw) {
        Ok(resolved) if matches!(resolved.scheme(), "http" | "https") => resolved.to_string(),
        Ok(resolved) => {
            debug!(href = %raw, scheme = resolved.scheme(), "Dropping non-web link");
            String::new()
        }
        Err(e) => {
            warn!(href = %raw, error = %e, "Could not resolve link; dropping it");
            String::new()
        }
    }
}

/// Normalize an image source.
///
/// Protocol-relative sources (`//host/path`) get an `https:` scheme; other
/// relative paths resolve like links.
pub fn image_url(raw: &str, origin: &Url) -> String {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("//") {
        return format!("https://{rest}");
    }
    absolute_url(raw, origin)
}

/// Keep the page's date when it is valid RFC 3339, otherwise stamp it with
/// the clock.
pub fn published_at(raw: &str, clock: &dyn Clock) -> String {
    let raw = raw.trim();
    if DateTime::parse_from_rfc3339(raw).is_ok() {
        return raw.to_string();
    }
    if !raw.is_empty() {
        debug!(date = %raw, "Unparseable publish date; using generation time");
    }
    clock.now_rfc3339()
}

pub fn normalize(raw: RawRecord, origin: &Url, clock: &dyn Clock) -> Episode {
    let url = absolute_url(&raw.href, origin);
    if url.is_empty() {
        debug!(title = %truncate_for_log(&raw.title, 80), "Episode block has no link");
    }
    Episode {
        id: url.clone(),
        url,
        title: raw.title,
        description: raw.lead,
        image: image_url(&raw.image, origin),
        published_at: published_at(&raw.published, clock),
    }
}

fn is_absolute_http(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
