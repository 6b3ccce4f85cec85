use anyhow::Context;
use argh::FromArgs;
use std::path::PathBuf;
use weatherd::{
    default_config_path, HttpFetcher, LatLon, ProvinceCodes, ServiceConfig, StationCrawler,
    WeatherService, DEFAULT_MAX_INDEX,
};

#[derive(FromArgs)]
/// Nearest-station weather reports and forecasts
struct Args {
    /// path to the stations configuration file (JSON)
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Report(ReportArgs),
    Forecast(ForecastArgs),
    Discover(DiscoverArgs),
}

#[derive(FromArgs)]
/// Print the current report of the station closest to a coordinate
#[argh(subcommand, name = "report")]
struct ReportArgs {
    /// latitude in degrees
    #[argh(option)]
    lat: f64,
    /// longitude in degrees
    #[argh(option)]
    lon: f64,
}

#[derive(FromArgs)]
/// Print the forecast of the station closest to a coordinate
#[argh(subcommand, name = "forecast")]
struct ForecastArgs {
    /// latitude in degrees
    #[argh(option)]
    lat: f64,
    /// longitude in degrees
    #[argh(option)]
    lon: f64,
}

#[derive(FromArgs)]
/// Crawl Environment Canada for city feeds and print one JSON line per feed
#[argh(subcommand, name = "discover")]
struct DiscoverArgs {
    /// highest feed index probed per province (exclusive)
    #[argh(option, default = "DEFAULT_MAX_INDEX")]
    max_index: u32,
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServiceConfig> {
    if let Some(path) = path {
        return ServiceConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => ServiceConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from '{}'", path.display())),
        _ => {
            log::info!("No config file found, using built-in stations");
            Ok(ServiceConfig::default())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::init_from_env(env);

    let args: Args = argh::from_env();
    let config = load_config(args.config)?;

    match args.command {
        Command::Report(ReportArgs { lat, lon }) => {
            let service = WeatherService::from_config(&config)?;
            let report = service.get_current_report(LatLon(lat, lon)).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Forecast(ForecastArgs { lat, lon }) => {
            let service = WeatherService::from_config(&config)?;
            let forecast = service.get_forecast(LatLon(lat, lon)).await?;
            println!("{}", serde_json::to_string_pretty(&forecast)?);
        }
        Command::Discover(DiscoverArgs { max_index }) => {
            let crawler = StationCrawler::builder()
                .fetcher(HttpFetcher::new(config.request_timeout())?)
                .codes(ProvinceCodes::default())
                .max_index(max_index)
                .build();
            for station in crawler.discover().await {
                println!("{}", serde_json::to_string(&station)?);
            }
        }
    }

    Ok(())
}
