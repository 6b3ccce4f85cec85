//! Environment Canada city weather feeds (`https://weather.gc.ca/rss/city/...`).
//!
//! Each feed carries one "Current Conditions" entry, whose summary is a
//! `Label: value` block, and a series of "Weather Forecasts" entries whose
//! summaries are short narratives ("Mainly cloudy. High plus 4.").

use crate::providers::feed::{decode_feed, FeedItem};
use crate::providers::fetch::{FetchError, HttpFetcher, DEFAULT_REQUEST_TIMEOUT};
use crate::stations::cache::RefreshCache;
use crate::stations::error::StationError;
use crate::stations::station::{Station, StationInfo};
use crate::text::current_conditions::parse_current_conditions;
use crate::text::forecast_narrative::parse_forecast_narrative;
use crate::text::relative_date::forecast_time_for_title;
use crate::types::report::{WeatherForecast, WeatherReport};
use async_trait::async_trait;
use bon::bon;
use log::{debug, warn};
use std::time::Duration;

const CURRENT_CONDITIONS: &str = "Current Conditions";
const WEATHER_FORECASTS: &str = "Weather Forecasts";

pub struct EnvCanStation {
    info: StationInfo,
    fetcher: HttpFetcher,
    cache: RefreshCache,
}

#[bon]
impl EnvCanStation {
    /// Creates a station backed by an Environment Canada city feed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use weatherd::EnvCanStation;
    /// # fn run() -> Result<(), weatherd::FetchError> {
    /// let station = EnvCanStation::builder()
    ///     .name("Kitchener Waterloo")
    ///     .latitude(43.451)
    ///     .longitude(-80.488)
    ///     .url("https://weather.gc.ca/rss/weather/43.451_-80.488_e.xml")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn new(
        #[builder(into)] name: String,
        latitude: f64,
        longitude: f64,
        #[builder(into)] url: String,
        fetcher: Option<HttpFetcher>,
        refresh_interval: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let fetcher = match fetcher {
            Some(f) => f,
            None => HttpFetcher::new(DEFAULT_REQUEST_TIMEOUT)?,
        };
        let cache = refresh_interval.map(RefreshCache::new).unwrap_or_default();
        Ok(Self {
            info: StationInfo {
                name,
                latitude,
                longitude,
                url,
            },
            fetcher,
            cache,
        })
    }

    pub fn info(&self) -> &StationInfo {
        &self.info
    }

    async fn refresh(&self) -> Result<(WeatherReport, Vec<WeatherForecast>), StationError> {
        let bytes = self.fetcher.fetch(&self.info.url).await.inspect_err(|e| {
            warn!("Error getting feed for station '{}': {}", self.info.name, e);
        })?;

        let feed = decode_feed(&bytes).inspect_err(|e| {
            warn!("Error parsing feed for station '{}': {}", self.info.name, e);
        })?;

        let parsed = parse_feed_items(&feed.items);
        debug!(
            "Refreshed station '{}' ({} forecast slots)",
            self.info.name,
            parsed.1.len()
        );
        Ok(parsed)
    }
}

#[async_trait]
impl Station for EnvCanStation {
    fn name(&self) -> &str {
        &self.info.name
    }

    fn latitude(&self) -> f64 {
        self.info.latitude
    }

    fn longitude(&self) -> f64 {
        self.info.longitude
    }

    async fn get_report(&self) -> Result<WeatherReport, StationError> {
        let snapshot = self.cache.get_or_refresh(|| self.refresh()).await?;
        Ok(snapshot.report.clone())
    }

    async fn get_forecast(&self) -> Result<Vec<WeatherForecast>, StationError> {
        let snapshot = self.cache.get_or_refresh(|| self.refresh()).await?;
        Ok(snapshot.forecasts.clone())
    }
}

/// Turns decoded feed entries into a report and forecast list.
///
/// Entries outside the two known categories are ignored. When the feed has no
/// current-conditions entry the report is left at its defaults.
pub fn parse_feed_items(items: &[FeedItem]) -> (WeatherReport, Vec<WeatherForecast>) {
    let mut report = WeatherReport::default();
    let mut forecasts = Vec::new();

    for item in items {
        if item.has_category(CURRENT_CONDITIONS) {
            report = WeatherReport {
                observation_id: item.id.clone(),
                condition: parse_current_conditions(&item.description),
                observed_at: item.updated,
                created_at: item.published,
                updated_at: item.updated,
            };
        } else if item.has_category(WEATHER_FORECASTS) {
            // A title we can't date still yields a forecast, just without `forecasted_for`.
            let forecasted_for = item
                .published
                .and_then(|published| forecast_time_for_title(&published, &item.title).ok());

            forecasts.push(WeatherForecast {
                forecast_id: item.id.clone(),
                condition: parse_forecast_narrative(&item.description),
                created_at: item.published,
                updated_at: item.updated,
                forecasted_for,
            });
        }
    }

    (report, forecasts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::weather_condition::WeatherIcon;
    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FEED: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<feed xmlns="http://www.w3.org/2005/Atom" xml:lang="en-ca">
  <title>Kitchener-Waterloo - Weather - Environment Canada</title>
  <updated>2019-01-05T16:00:00Z</updated>
  <id>tag:weather.gc.ca,2013-04-16:20190105160000</id>
  <entry>
    <title>No watches or warnings in effect, Kitchener-Waterloo</title>
    <updated>2019-01-05T15:00:00Z</updated>
    <category term="Warnings and Watches"/>
    <summary type="html">No watches or warnings in effect.</summary>
    <id>tag:weather.gc.ca,2013-04-16:on-82_w1:20190105150000</id>
  </entry>
  <entry>
    <title>Current Conditions: -1.3&#xB0;C</title>
    <updated>2019-01-05T15:00:00Z</updated>
    <published>2019-01-05T15:00:00Z</published>
    <category term="Current Conditions"/>
    <summary type="html">&lt;b&gt;Observed at:&lt;/b&gt; Region of Waterloo Int'l Airport 10:00 AM EST Saturday 05 January 2019 &lt;br/&gt;
&lt;b&gt;Condition:&lt;/b&gt; Cloudy &lt;br/&gt;
&lt;b&gt;Temperature:&lt;/b&gt; -1.3&amp;deg;C &lt;br/&gt;
&lt;b&gt;Pressure:&lt;/b&gt; 101.4 kPa &lt;br/&gt;
&lt;b&gt;Humidity:&lt;/b&gt; 86 %&lt;br/&gt;
&lt;b&gt;Wind:&lt;/b&gt; SW 21 km/h&lt;br/&gt;</summary>
    <id>tag:weather.gc.ca,2013-04-16:on-82_cc:20190105150000</id>
  </entry>
  <entry>
    <title>Monday: Mainly cloudy. High plus 4.</title>
    <updated>2019-01-05T16:00:00Z</updated>
    <published>2019-01-05T16:00:00Z</published>
    <category term="Weather Forecasts"/>
    <summary type="html">Mainly cloudy. Wind becoming west 20 km/h late this afternoon. High plus 4. UV index 1 or low. Forecast issued 11:00 AM EST Saturday 05 January 2019</summary>
    <id>tag:weather.gc.ca,2013-04-16:on-82_fc1:20190105160000</id>
  </entry>
  <entry>
    <title>Monday night: Periods of snow. Low minus 9.</title>
    <updated>2019-01-05T16:00:00Z</updated>
    <published>2019-01-05T16:00:00Z</published>
    <category term="Weather Forecasts"/>
    <summary type="html">Periods of snow. Low minus 9. Forecast issued 11:00 AM EST Saturday 05 January 2019</summary>
    <id>tag:weather.gc.ca,2013-04-16:on-82_fc2:20190105160000</id>
  </entry>
  <entry>
    <title>Extended: Outlook for next week.</title>
    <updated>2019-01-05T16:00:00Z</updated>
    <published>2019-01-05T16:00:00Z</published>
    <category term="Weather Forecasts"/>
    <summary type="html">Sunny. High minus 2.</summary>
    <id>tag:weather.gc.ca,2013-04-16:on-82_fc3:20190105160000</id>
  </entry>
</feed>"#;

    fn item(category: &str, title: &str, description: &str) -> FeedItem {
        FeedItem {
            id: format!("{}-id", title),
            title: title.to_string(),
            description: description.to_string(),
            categories: vec![category.to_string()],
            published: Some(Utc.with_ymd_and_hms(2019, 1, 5, 16, 0, 0).unwrap()),
            updated: Some(Utc.with_ymd_and_hms(2019, 1, 5, 16, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_parse_feed_items() {
        let items = vec![
            item(
                CURRENT_CONDITIONS,
                "Current Conditions: 2.0°C",
                "<b>Condition:</b> Light Rain <br/><b>Temperature:</b> 2.0°C <br/>",
            ),
            item(WEATHER_FORECASTS, "Sunday: Sunny. High 5.", "Sunny. High 5."),
            item("Warnings and Watches", "Nothing", "No watches."),
        ];

        let (report, forecasts) = parse_feed_items(&items);
        assert_eq!(report.observation_id, "Current Conditions: 2.0°C-id");
        assert_eq!(report.condition.summary, "Light Rain");
        assert_eq!(report.condition.summary_icon, WeatherIcon::Rain);
        assert_eq!(report.condition.temperature, 2.0);
        assert_eq!(report.observed_at, items[0].updated);
        assert_eq!(report.created_at, items[0].published);

        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].condition.temperature, 5.0);
        assert_eq!(
            forecasts[0].forecasted_for,
            Some(Utc.with_ymd_and_hms(2019, 1, 6, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_undatable_forecast_is_kept() {
        let items = vec![item(WEATHER_FORECASTS, "Tonight: Clear.", "Clear. Low minus 3.")];
        let (_, forecasts) = parse_feed_items(&items);
        assert_eq!(forecasts.len(), 1);
        assert_eq!(forecasts[0].forecasted_for, None);
        assert_eq!(forecasts[0].condition.temperature, -3.0);
        assert_eq!(forecasts[0].forecast_id, "Tonight: Clear.-id");
    }

    #[test]
    fn test_missing_published_leaves_forecast_undated() {
        let mut forecast = item(WEATHER_FORECASTS, "Monday: Sunny.", "Sunny.");
        forecast.published = None;
        let (_, forecasts) = parse_feed_items(&[forecast]);
        assert_eq!(forecasts[0].forecasted_for, None);
    }

    async fn station_for(server: &MockServer) -> EnvCanStation {
        EnvCanStation::builder()
            .name("Kitchener Waterloo")
            .latitude(43.451)
            .longitude(-80.488)
            .url(format!("{}/rss/city/on-82_e.xml", server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_station_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rss/city/on-82_e.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
            .expect(1)
            .mount(&server)
            .await;

        let station = station_for(&server).await;
        assert_eq!(station.name(), "Kitchener Waterloo");

        let report = station.get_report().await.unwrap();
        assert_eq!(report.condition.summary, "Cloudy");
        assert_eq!(report.condition.summary_icon, WeatherIcon::Cloudy);
        assert_eq!(report.condition.temperature, -1.3);
        assert_eq!(report.condition.pressure, 101.4);
        assert_eq!(report.condition.humidity, 86);
        assert_eq!(report.condition.wind_speed, 21);

        // Served from cache; the mock expects exactly one request.
        let forecasts = station.get_forecast().await.unwrap();
        assert_eq!(forecasts.len(), 3);

        assert_eq!(forecasts[0].condition.summary, "Mainly cloudy");
        assert_eq!(forecasts[0].condition.uv_index, 1);
        assert_eq!(
            forecasts[0].forecasted_for,
            Some(Utc.with_ymd_and_hms(2019, 1, 7, 12, 0, 0).unwrap())
        );

        assert_eq!(forecasts[1].condition.summary_icon, WeatherIcon::Snow);
        assert_eq!(forecasts[1].condition.temperature, -9.0);
        assert_eq!(
            forecasts[1].forecasted_for,
            Some(Utc.with_ymd_and_hms(2019, 1, 7, 23, 0, 0).unwrap())
        );

        assert_eq!(forecasts[2].forecasted_for, None);
        assert_eq!(forecasts[2].condition.temperature, -2.0);
    }

    #[tokio::test]
    async fn test_station_upstream_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&server)
            .await;

        let station = station_for(&server).await;
        assert!(station.get_report().await.is_err());
        // Nothing was cached, so the next call goes upstream again.
        assert!(station.get_forecast().await.is_err());
    }
}
