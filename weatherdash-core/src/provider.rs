use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config, DashError,
    model::{Coordinates, Location, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// Trimmed city name, or an input error when nothing is left.
pub fn city_query(name: &str) -> Result<&str, DashError> {
    match name.trim() {
        "" => Err(DashError::empty_city()),
        trimmed => Ok(trimmed),
    }
}

/// Source of current conditions plus the 3-hour forecast for a location.
///
/// Implementations fetch both halves together; the report is all-or-nothing.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch(&self, location: &Location) -> Result<WeatherReport, DashError>;

    /// Blank names are rejected before any request is made.
    async fn fetch_by_city(&self, name: &str) -> Result<WeatherReport, DashError> {
        let name = city_query(name)?;
        self.fetch(&Location::City(name.to_string())).await
    }

    async fn fetch_by_coordinates(&self, coords: Coordinates) -> Result<WeatherReport, DashError> {
        self.fetch(&Location::Coordinates(coords)).await
    }
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key()?;

    let provider = OpenWeatherProvider::new(api_key, config.units)
        .with_base_url(config.api_base_url());

    Ok(Box::new(provider))
}
