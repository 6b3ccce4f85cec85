//! Decodes Atom/RSS payloads into the provider-neutral [`FeedItem`] shape the
//! station adapters work with.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to parse feed")]
    Parse(#[from] feed_rs::parser::ParseFeedError),
}

/// A decoded feed: its title and entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedDocument {
    pub title: String,
    pub items: Vec<FeedItem>,
}

/// One entry of a feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    /// The entry's summary (or content body when there is no summary), still
    /// containing any markup the provider put in it.
    pub description: String,
    pub categories: Vec<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
}

impl FeedItem {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Parses raw Atom or RSS bytes.
pub fn decode_feed(bytes: &[u8]) -> Result<FeedDocument, FeedError> {
    let feed = feed_rs::parser::parse(bytes)?;

    let items = feed
        .entries
        .into_iter()
        .map(|entry| FeedItem {
            id: entry.id,
            title: entry.title.map(|t| t.content).unwrap_or_default(),
            description: entry
                .summary
                .map(|t| t.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .unwrap_or_default(),
            categories: entry.categories.into_iter().map(|c| c.term).collect(),
            published: entry.published,
            updated: entry.updated,
        })
        .collect();

    Ok(FeedDocument {
        title: feed.title.map(|t| t.content).unwrap_or_default(),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ATOM: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en-ca">
  <title>Kitchener-Waterloo - Weather - Environment Canada</title>
  <updated>2019-01-05T16:00:00Z</updated>
  <id>tag:weather.gc.ca,2013-04-16:20190105160000</id>
  <entry>
    <title>Current Conditions: -1.3&#xB0;C</title>
    <updated>2019-01-05T15:00:00Z</updated>
    <published>2019-01-05T15:00:00Z</published>
    <category term="Current Conditions"/>
    <summary type="html">&lt;b&gt;Condition:&lt;/b&gt; Cloudy &lt;br/&gt;</summary>
    <id>tag:weather.gc.ca,2013-04-16:on-82_cc:20190105150000</id>
  </entry>
</feed>"#;

    #[test]
    fn test_decode_atom() {
        let doc = decode_feed(ATOM.as_bytes()).unwrap();
        assert_eq!(doc.title, "Kitchener-Waterloo - Weather - Environment Canada");
        assert_eq!(doc.items.len(), 1);

        let item = &doc.items[0];
        assert_eq!(item.id, "tag:weather.gc.ca,2013-04-16:on-82_cc:20190105150000");
        assert_eq!(item.title, "Current Conditions: -1.3°C");
        assert!(item.has_category("Current Conditions"));
        assert!(!item.has_category("Weather Forecasts"));
        assert!(item.description.contains("Condition:"));
        assert!(item.description.contains("Cloudy"));
        assert_eq!(
            item.published,
            Some(Utc.with_ymd_and_hms(2019, 1, 5, 15, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_feed(b"this is not a feed").is_err());
    }
}
