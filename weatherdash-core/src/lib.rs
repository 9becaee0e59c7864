//! Core library for the `weatherdash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration and persistent storage (favorites, theme)
//! - The OpenWeather client and the geolocation lookup
//! - Forecast aggregation into day summaries
//! - Dashboard session state driven by user actions
//!
//! It is used by `weatherdash-cli`, but does no terminal I/O itself.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod favorites;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod storage;
pub mod theme;

pub use aggregate::aggregate;
pub use chart::TrendChart;
pub use config::Config;
pub use dashboard::{Dashboard, FetchTicket, Status, StatusKind};
pub use error::DashError;
pub use favorites::FavoritesStore;
pub use geolocation::{FixedLocator, IpLocator, Locator};
pub use model::{
    Coordinates, CurrentConditions, DaySummary, ForecastSample, Location, Units, WeatherReport,
};
pub use provider::{
    WeatherProvider, city_query, openweather::OpenWeatherProvider, provider_from_config,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::{Palette, Rgb, Theme};
