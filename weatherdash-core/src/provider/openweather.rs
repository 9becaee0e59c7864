use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    DashError,
    model::{CurrentConditions, ForecastSample, Location, Units, WeatherReport},
};

use super::WeatherProvider;

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    units: Units,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, units: Units) -> Self {
        Self {
            api_key,
            units,
            base_url: crate::config::DEFAULT_API_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn fetch_current(&self, location: &Location) -> Result<CurrentConditions, DashError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT_PATH, location).await?;

        let (description, icon) = first_weather(parsed.weather);

        Ok(CurrentConditions {
            city: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            description,
            icon,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed: parsed.wind.speed,
        })
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<Vec<ForecastSample>, DashError> {
        let parsed: OwForecastResponse = self.get_json(FORECAST_PATH, location).await?;

        let offset = parsed
            .city
            .and_then(|c| c.timezone)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<ForecastSample, DashError> {
                let time = DateTime::from_timestamp(entry.dt, 0)
                    .ok_or_else(|| {
                        DashError::request(format!(
                            "OpenWeather forecast contained an invalid timestamp: {}",
                            entry.dt
                        ))
                    })?
                    .with_timezone(&offset);
                let (description, icon) = first_weather(entry.weather);

                Ok(ForecastSample { time, temperature: entry.main.temp, icon, description })
            })
            .collect()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        location: &Location,
    ) -> Result<T, DashError> {
        let url = format!("{}{}", self.base_url, path);

        let mut query: Vec<(&str, String)> = match location {
            Location::City(name) => vec![("q", name.clone())],
            Location::Coordinates(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        };
        query.push(("units", self.units.as_str().to_string()));
        query.push(("appid", self.api_key.clone()));

        tracing::debug!(%url, %location, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| DashError::request(format!("Failed to reach OpenWeather: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            DashError::request(format!("Failed to read OpenWeather response: {e}"))
        })?;

        if !status.is_success() {
            tracing::debug!(%status, body = %truncate_body(&body), "OpenWeather request failed");
            return Err(DashError::Request(error_message(status, &body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| DashError::request(format!("Failed to parse OpenWeather response: {e}")))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, location: &Location) -> Result<WeatherReport, DashError> {
        // Either failure aborts the pair; the other result is dropped.
        let (current, forecast) =
            tokio::try_join!(self.fetch_current(location), self.fetch_forecast(location))?;

        tracing::debug!(
            city = %current.city,
            samples = forecast.len(),
            "OpenWeather report received"
        );

        Ok(WeatherReport { current, forecast })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    #[serde(default)]
    feels_like: f64,
    #[serde(default)]
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    timezone: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: Option<OwCity>,
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn first_weather(weather: Vec<OwWeather>) -> (String, String) {
    weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()))
}

/// Prefer the API's own `message`, then the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty());

    from_body
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Failed to fetch data".to_string())
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
