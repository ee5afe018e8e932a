use clap::Parser;
use meteo::{
    aggregation::samples_from_hourly,
    day_buckets,
    weather::{Coordinates, OpenMeteoClient, WeatherSource},
    DEFAULT_WEATHER_API_URL,
};
use std::time::Duration;

/// Print the daily mean temperature forecast for a location.
#[derive(Debug, Parser)]
#[command(name = "meteo-cli", version)]
struct Args {
    #[arg(long, allow_hyphen_values = true)]
    latitude: f64,

    #[arg(long, allow_hyphen_values = true)]
    longitude: f64,

    /// Forecast endpoint
    #[arg(long, env = "WEATHER_API_URL", default_value = DEFAULT_WEATHER_API_URL)]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let coords = Coordinates::new(args.latitude, args.longitude);
    coords.validate()?;

    let client = OpenMeteoClient::new(args.url, Duration::from_secs(args.timeout))?;
    let forecast = client.fetch_hourly(coords).await?;

    let samples = samples_from_hourly(&forecast.hourly.time, &forecast.hourly.temperature_2m)?;
    let buckets = day_buckets(&samples)?;

    println!(
        "Daily mean temperature for ({}, {})",
        args.latitude, args.longitude
    );
    println!("{:<12} {:>8} {:>8}", "date", "mean", "samples");
    for bucket in &buckets {
        println!(
            "{:<12} {:>8.2} {:>8}",
            bucket.day().to_string(),
            bucket.mean,
            bucket.count
        );
    }

    Ok(())
}
