//! Finds Environment Canada city feeds by probing `{base}/{province}-{index}_e.xml`.

use crate::discovery::province_codes::ProvinceCodes;
use crate::providers::feed::decode_feed;
use crate::providers::fetch::HttpFetcher;
use bon::bon;
use futures_util::future::join_all;
use log::{debug, info, warn};
use serde::Serialize;

pub const DEFAULT_BASE_URL: &str = "https://weather.gc.ca/rss/city";
pub const DEFAULT_MAX_INDEX: u32 = 200;

/// A city feed found by the crawler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveredStation {
    pub url: String,
    pub title: String,
    pub city: String,
    pub province: String,
    pub province_code: u32,
}

#[derive(Debug)]
pub struct StationCrawler {
    fetcher: HttpFetcher,
    codes: ProvinceCodes,
    max_index: u32,
    base_url: String,
}

#[bon]
impl StationCrawler {
    /// Creates a crawler.
    ///
    /// # Arguments
    ///
    /// * `codes` - Provinces to scan. Defaults to all thirteen provinces and territories.
    /// * `max_index` - Indices `1..max_index` are probed per province. Defaults to [`DEFAULT_MAX_INDEX`].
    /// * `base_url` - Defaults to [`DEFAULT_BASE_URL`].
    #[builder]
    pub fn new(
        fetcher: HttpFetcher,
        #[builder(default)] codes: ProvinceCodes,
        #[builder(default = DEFAULT_MAX_INDEX)] max_index: u32,
        #[builder(into, default = DEFAULT_BASE_URL.to_string())] base_url: String,
    ) -> Self {
        Self {
            fetcher,
            codes,
            max_index,
            base_url,
        }
    }

    /// Probes every province concurrently. Missing feeds are skipped silently,
    /// any other failure is logged and skipped.
    pub async fn discover(&self) -> Vec<DiscoveredStation> {
        let scans = self
            .codes
            .iter()
            .map(|(abbr, code)| self.scan_province(abbr, code));

        let found: Vec<DiscoveredStation> = join_all(scans).await.into_iter().flatten().collect();
        info!("Discovered {} station feeds", found.len());
        found
    }

    async fn scan_province(&self, province: &str, code: u32) -> Vec<DiscoveredStation> {
        let mut found = Vec::new();
        for index in 1..self.max_index {
            let url = format!("{}/{}-{}_e.xml", self.base_url, province, index);
            let bytes = match self.fetcher.fetch(&url).await {
                Ok(bytes) => bytes,
                Err(e) if e.is_not_found() => continue,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            let title = match decode_feed(&bytes) {
                Ok(doc) => doc.title,
                Err(e) => {
                    warn!("Skipping {}: {}", url, e);
                    continue;
                }
            };

            debug!("Found feed {} ({})", url, title);
            found.push(DiscoveredStation {
                city: city_from_title(&title),
                url,
                title,
                province: province.to_string(),
                province_code: code,
            });
        }
        found
    }
}

/// `"Kitchener-Waterloo - Weather - Environment Canada"` gives `"Kitchener"`;
/// a parenthesised suffix is dropped too.
pub fn city_from_title(title: &str) -> String {
    let before_dash = title.split('-').next().unwrap_or_default();
    let before_paren = before_dash.split('(').next().unwrap_or_default();
    before_paren.trim().to_string()
}
