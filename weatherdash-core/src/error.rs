use thiserror::Error;

/// Status text for a blank city search.
pub const EMPTY_CITY_MESSAGE: &str = "Enter a city name.";

/// Failures a dashboard action can run into.
///
/// `Input`, `Request` and `Geolocation` are recoverable: the dashboard turns
/// them into an error-styled status line. `Environment` means persistent
/// storage is unusable and is propagated to the caller.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Request(String),

    #[error("{0}")]
    Geolocation(String),

    #[error("Storage unavailable: {0}")]
    Environment(String),
}

impl DashError {
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn geolocation(msg: impl Into<String>) -> Self {
        Self::Geolocation(msg.into())
    }

    pub fn empty_city() -> Self {
        Self::Input(EMPTY_CITY_MESSAGE.to_string())
    }

    /// Text shown on the status line for a recoverable error.
    pub fn status_message(&self) -> String {
        match self {
            Self::Input(msg) => msg.clone(),
            Self::Request(msg) => format!("Error: {msg}"),
            Self::Geolocation(msg) => format!("Location error: {msg}"),
            Self::Environment(msg) => format!("Storage unavailable: {msg}"),
        }
    }
}

impl From<anyhow::Error> for DashError {
    fn from(err: anyhow::Error) -> Self {
        Self::Environment(format!("{err:#}"))
    }
}
