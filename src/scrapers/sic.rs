//! SIC programme video listing scraper.
//!
//! Programme pages such as
//! `https://sic.pt/Programas/governo-sombra/videos` render one `<article>`
//! per episode:
//!
//! ```html
//! <article>
//!   <a href="/Programas/governo-sombra/videos/2025-05-06-ep"><img src="//images.impresa.pt/sic/ep.jpg"></a>
//!   <div class="textDetails">
//!     <h2 class="title"><a href="...">Episode title</a></h2>
//!     <p class="lead">Lead text</p>
//!     <time class="publishedDate" datetime="2025-05-06T21:00:00Z">6 maio</time>
//!   </div>
//! </article>
//! ```
//!
//! Any of the inner nodes may be missing; the corresponding field is then
//! left empty.

use crate::models::RawRecord;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

const E: &str = "Invalid selector";

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect(E));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(".textDetails .title a").expect(E));
static LEAD: Lazy<Selector> = Lazy::new(|| Selector::parse(".textDetails .lead").expect(E));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect(E));
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect(E));
static PUBLISHED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".publishedDate, time[datetime]").expect(E));

/// A parsed listing page.
pub struct EpisodePage {
    document: Html,
}

impl EpisodePage {
    /// Parse raw response bytes. Invalid UTF-8 is replaced, never rejected.
    pub fn parse(content: &[u8]) -> Self {
        let html = String::from_utf8_lossy(content);
        let document = Html::parse_document(&html);
        debug!(bytes = content.len(), "Parsed listing page");
        Self { document }
    }

    /// One record per `article` block, in document order.
    pub fn records(&self) -> impl Iterator<Item = RawRecord> + '_ {
        self.document.select(&ARTICLE).map(record_from_block)
    }
}

fn record_from_block(block: ElementRef<'_>) -> RawRecord {
    RawRecord {
        title: first_text(block, &TITLE),
        lead: first_text(block, &LEAD),
        href: first_attr(block, &LINK, &["href"]),
        image: first_attr(block, &IMAGE, &["src", "data-src"]),
        published: block
            .select(&PUBLISHED)
            .next()
            .map(|node| match node.value().attr("datetime") {
                Some(stamp) if !stamp.trim().is_empty() => stamp.trim().to_string(),
                _ => element_text(node),
            })
            .unwrap_or_default(),
    }
}

fn first_text(block: ElementRef<'_>, selector: &Selector) -> String {
    block
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// First web reference among `attrs` on the first node that has one.
///
/// `javascript:`, `mailto:`, `data:` and similar values are skipped.
fn first_attr(block: ElementRef<'_>, selector: &Selector, attrs: &[&str]) -> String {
    block
        .select(selector)
        .find_map(|node| {
            attrs
                .iter()
                .filter_map(|name| node.value().attr(name))
                .map(str::trim)
                .find(|value| is_web_reference(value))
        })
        .unwrap_or_default()
        .to_string()
}

/// Relative references and absolute http(s) URLs. Fragment-only links
/// point back at the listing itself.
fn is_web_reference(value: &str) -> bool {
    if value.is_empty() || value.starts_with('#') {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

fn element_text(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &[u8]) -> Vec<RawRecord> {
        EpisodePage::parse(content).records().collect()
    }

    const LISTING: &str = r#"
        <html><body>
          <section class="videos">
            <article>
              <a href="/Programas/governo-sombra/videos/2025-05-06-ep">
                <img src="//images.impresa.pt/sic/ep1.jpg" alt="">
              </a>
              <div class="textDetails">
                <h2 class="title"><a href="/Programas/governo-sombra/videos/2025-05-06-ep">  Governo Sombra de 6 de maio </a></h2>
                <p class="lead">O programa desta semana</p>
                <time class="publishedDate" datetime="2025-05-06T21:00:00Z">6 maio</time>
              </div>
            </article>
            <article>
              <a href="Programas/governo-sombra/videos/2025-04-29-ep"></a>
              <div class="textDetails">
                <h2 class="title"><a>Governo Sombra de 29 de abril</a></h2>
                <p class="lead">Edição anterior</p>
              </div>
            </article>
          </section>
        </body></html>
    "#;

    #[test]
    fn test_extracts_one_record_per_article_in_order() {
        let records = extract(LISTING.as_bytes());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Governo Sombra de 6 de maio");
        assert_eq!(records[1].title, "Governo Sombra de 29 de abril");
    }

    #[test]
    fn test_extracts_all_fields() {
        let record = &extract(LISTING.as_bytes())[0];
        assert_eq!(record.lead, "O programa desta semana");
        assert_eq!(record.href, "/Programas/governo-sombra/videos/2025-05-06-ep");
        assert_eq!(record.image, "//images.impresa.pt/sic/ep1.jpg");
        assert_eq!(record.published, "2025-05-06T21:00:00Z");
    }

    #[test]
    fn test_missing_nodes_yield_empty_strings() {
        let record = &extract(LISTING.as_bytes())[1];
        assert_eq!(record.href, "Programas/governo-sombra/videos/2025-04-29-ep");
        assert_eq!(record.image, "");
        assert_eq!(record.published, "");
    }

    #[test]
    fn test_empty_article_yields_empty_record() {
        let records = extract(b"<article></article>");
        assert_eq!(records, vec![RawRecord::default()]);
    }

    #[test]
    fn test_no_articles_yields_nothing() {
        let page = EpisodePage::parse(b"<html><body><p>Sem episodios</p></body></html>");
        assert_eq!(page.records().count(), 0);
    }

    #[test]
    fn test_date_text_used_without_datetime_attribute() {
        let html = r#"<article><div class="textDetails">
            <span class="publishedDate"> 2025-05-06T21:00:00+01:00 </span>
        </div></article>"#;
        let records = extract(html.as_bytes());
        assert_eq!(records[0].published, "2025-05-06T21:00:00+01:00");
    }

    #[test]
    fn test_lazy_image_source_is_used() {
        let html = r#"<article><img data-src="https://images.impresa.pt/lazy.jpg"></article>"#;
        let records = extract(html.as_bytes());
        assert_eq!(records[0].image, "https://images.impresa.pt/lazy.jpg");
    }

    #[test]
    fn test_non_navigable_links_are_skipped() {
        let html = r##"<article>
            <a href="javascript:void(0)">share</a>
            <a href="mailto:geral@sic.pt">mail</a>
            <a href="#comments">comments</a>
            <a href="/Programas/governo-sombra/videos/ep">watch</a>
        </article>"##;
        let records = extract(html.as_bytes());
        assert_eq!(records[0].href, "/Programas/governo-sombra/videos/ep");
    }

    #[test]
    fn test_only_non_navigable_links_yield_empty_href() {
        let html = r#"<article><a href="javascript:void(0)">x</a><a href="tel:+351210000000">y</a></article>"#;
        let records = extract(html.as_bytes());
        assert_eq!(records[0].href, "");
    }

    #[test]
    fn test_data_placeholder_falls_back_to_lazy_source() {
        let html = r#"<article>
            <img src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" data-src="//images.impresa.pt/real.jpg">
        </article>"#;
        let records = extract(html.as_bytes());
        assert_eq!(records[0].image, "//images.impresa.pt/real.jpg");
    }

    #[test]
    fn test_record_count_matches_article_count() {
        let html = "<article></article>".repeat(7);
        let page = EpisodePage::parse(html.as_bytes());
        assert_eq!(page.records().count(), 7);
    }

    #[test]
    fn test_invalid_utf8_does_not_fail() {
        let mut bytes = b"<article><div class=\"textDetails\"><p class=\"lead\">ok".to_vec();
        bytes.push(0xff);
        bytes.extend_from_slice(b"</p></div></article>");
        let records = extract(&bytes);
        assert_eq!(records.len(), 1);
        assert!(records[0].lead.starts_with("ok"));
    }
}
