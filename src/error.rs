use crate::climate::error::ClimateLoadError;
use crate::config::ConfigError;
use crate::features::error::FeatureError;
use crate::weather_api::error::WeatherApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] WeatherApiError),

    #[error(transparent)]
    ClimateLoad(#[from] ClimateLoadError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}
