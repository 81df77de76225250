//! Feed assembly.

use crate::config::Config;
use crate::models::{Author, Episode, Feed, JSON_FEED_VERSION};

/// Build the feed document from static configuration and the episodes.
///
/// Items are attached unchanged and in the order received. An empty list
/// is valid and yields a feed with no items.
pub fn assemble(config: &Config, items: Vec<Episode>) -> Feed {
    Feed {
        schema_version: JSON_FEED_VERSION.to_string(),
        title: config.feed.title.clone(),
        description: config.feed.description.clone(),
        home_page_url: config.home_page_url(),
        feed_url: config.feed_url(),
        author: Author {
            name: config.feed.author_name.clone(),
            url: config.domain.clone(),
        },
        icon: config.feed.icon.clone(),
        favicon: config.feed.favicon.clone(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn config() -> Config {
        let cli = Cli {
            domain: Some("https://feeds.example.org".to_string()),
            no_cache: true,
            ..Cli::default()
        };
        Config::from_cli(&cli).unwrap()
    }

    fn episode(n: u32) -> Episode {
        Episode {
            id: format!("https://sic.pt/ep/{n}"),
            url: format!("https://sic.pt/ep/{n}"),
            title: format!("Episode {n}"),
            description: String::new(),
            image: String::new(),
            published_at: "2025-05-06T21:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_assemble_preserves_item_order() {
        let items = vec![episode(1), episode(2), episode(3)];
        let feed = assemble(&config(), items.clone());
        assert_eq!(feed.items, items);
    }

    #[test]
    fn test_assemble_envelope() {
        let feed = assemble(&config(), Vec::new());

        assert_eq!(feed.schema_version, "https://jsonfeed.org/version/1");
        assert_eq!(feed.title, "Governo Sombra");
        assert_eq!(feed.home_page_url, "https://sic.pt/Programas/governo-sombra/videos");
        assert_eq!(
            feed.feed_url,
            "https://feeds.example.org/go-verno-sombra/feeds/json"
        );
        assert_eq!(feed.author.name, "Nuno Lopes");
        assert_eq!(feed.author.url, "https://feeds.example.org");
        assert_eq!(feed.favicon, "https://sic.pt/favicon.ico?v=2");
        assert!(feed.items.is_empty());
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let cfg = config();
        let a = assemble(&cfg, vec![episode(1)]);
        let b = assemble(&cfg, vec![episode(1)]);
        assert_eq!(a, b);
    }
}
