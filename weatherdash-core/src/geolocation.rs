//! One-shot position lookup used by "use my location".

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{DashError, model::Coordinates};

#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, DashError>;
}

/// Coordinates supplied up front, e.g. from `--lat/--lon`.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn locate(&self) -> Result<Coordinates, DashError> {
        Ok(self.0)
    }
}

/// Approximate position of the public IP address, via ip-api.com.
#[derive(Debug, Clone)]
pub struct IpLocator {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpLocator {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), http: Client::new() }
    }
}

#[async_trait]
impl Locator for IpLocator {
    async fn locate(&self) -> Result<Coordinates, DashError> {
        let url = format!("{}/json/", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(|e| DashError::geolocation(format!("lookup failed: {e}")))?;

        if !res.status().is_success() {
            return Err(DashError::geolocation(format!(
                "lookup failed with status {}",
                res.status()
            )));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| DashError::geolocation(format!("unreadable lookup response: {e}")))?;

        if body.status != "success" {
            return Err(DashError::geolocation(
                body.message.unwrap_or_else(|| "position unavailable".to_string()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => {
                tracing::debug!(latitude, longitude, "located via IP");
                Ok(Coordinates { latitude, longitude })
            }
            _ => Err(DashError::geolocation("position unavailable")),
        }
    }
}
