use bikeshare_weather::{fetch_current_weather, ApiConfig, LatLon, WeatherError};

fn main() {
    println!("DC Bikeshare Weather");
    println!("{}", "=".repeat(50));

    let dc = LatLon::WASHINGTON_DC;
    println!("DC Coordinates: {}, {}", dc.lat(), dc.lon());

    let config = ApiConfig::from_env();
    println!(
        "API Key loaded: {}",
        if config.is_ok() { "Yes" } else { "No" }
    );

    let current = config
        .map_err(WeatherError::from)
        .and_then(|config| fetch_current_weather(&config).map_err(WeatherError::from));

    match current {
        Ok(current) => {
            println!("\nCurrent Weather in DC:");
            println!("  Temperature: {:.1}°F", current.temp);
            println!("  Conditions: {}", current.weather_desc);
            println!("  Humidity: {}%", current.humidity);
            println!("  Wind Speed: {} mph", current.wind_speed);
        }
        Err(e) => println!("\nCould not fetch current weather: {}", e),
    }
}
