use darksky::{DarkSky, DarkSkyError, LatLon};
use std::env;

fn main() -> Result<(), DarkSkyError> {
    // Set RUST_LOG=info (or debug) to see the requests being made.
    env_logger::init();
    configure_polars_display();

    let client = DarkSky::from_env()?;
    let forecast = client.current_data(LatLon(37.8267, -122.4233))?;

    println!("Currently: {:#}", forecast.current);
    for alert in &forecast.alerts {
        println!("Alert: {} (until {})", alert["title"], alert["expires"]);
    }
    println!("Next hour:\n{}", forecast.minutely.head(Some(10)));
    println!("Next 48 hours:\n{}", forecast.hourly);
    println!("This week:\n{}", forecast.daily);

    Ok(())
}

fn configure_polars_display() {
    // show every column
    env::set_var("POLARS_FMT_MAX_COLS", "-1");
    // show 20 rows
    env::set_var("POLARS_FMT_MAX_ROWS", "20");
}
