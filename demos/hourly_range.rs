use darksky::{DarkSky, DarkSkyError, LatLon, TimestampZone};
use polars::prelude::*;

fn main() -> Result<(), DarkSkyError> {
    env_logger::init();

    let client = DarkSky::configure(DarkSky::api_key_from_env()?)
        .timestamps(TimestampZone::Utc)
        .build();

    // One request per day: 2020-01-01 through 2020-01-07.
    let hourly = client.hourly_range(
        LatLon(51.5074, -0.1278),
        "2020-01-01T00:00:00",
        "2020-01-08T00:00:00",
    )?;
    println!("Fetched {} hours", hourly.height());

    let daily_mean = hourly
        .lazy()
        .with_column(col("time").str().slice(lit(0), lit(10)).alias("date"))
        .group_by_stable([col("date")])
        .agg([col("temperature").mean().alias("mean_temperature")])
        .collect()?;
    println!("{}", daily_mean);

    Ok(())
}
