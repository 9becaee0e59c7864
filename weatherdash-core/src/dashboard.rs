//! Session state behind the rendered dashboard.
//!
//! Every user action goes through [`Dashboard`]: it owns the status line,
//! the displayed report, the trend chart and the theme, and records the last
//! location that was shown successfully so "save favorite" never has to read
//! it back out of rendered text.

use crate::{
    DashError,
    aggregate::aggregate,
    chart::TrendChart,
    favorites::FavoritesStore,
    geolocation::Locator,
    model::{CurrentConditions, DaySummary, Location, WeatherReport},
    provider::{WeatherProvider, city_query},
    storage::KeyValueStore,
    theme::Theme,
};

pub const READY_MESSAGE: &str = "Ready. Search a city or use your location.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

/// Issued when a fetch starts; completions carrying an older ticket than the
/// newest one already applied are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub struct Dashboard {
    theme: Theme,
    status: Status,
    current: Option<CurrentConditions>,
    days: Vec<DaySummary>,
    chart: Option<TrendChart>,
    panels_visible: bool,
    last_location: Option<String>,
    issued: u64,
    applied: u64,
}

impl Dashboard {
    /// Start a session with the persisted theme and nothing displayed.
    pub fn init<S: KeyValueStore + ?Sized>(store: &S) -> anyhow::Result<Self> {
        let theme = Theme::load(store)?;
        tracing::debug!(%theme, "dashboard initialized");

        Ok(Self {
            theme,
            status: Status { message: READY_MESSAGE.to_string(), kind: StatusKind::Info },
            current: None,
            days: Vec::new(),
            chart: None,
            panels_visible: false,
            last_location: None,
            issued: 0,
            applied: 0,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    pub fn days(&self) -> &[DaySummary] {
        &self.days
    }

    pub fn chart(&self) -> Option<&TrendChart> {
        self.chart.as_ref()
    }

    pub fn panels_visible(&self) -> bool {
        self.panels_visible
    }

    pub fn last_location(&self) -> Option<&str> {
        self.last_location.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Status { message: message.into(), kind: StatusKind::Info };
    }

    pub fn set_error(&mut self, err: &DashError) {
        self.status = Status { message: err.status_message(), kind: StatusKind::Error };
    }

    /// Enter the loading state: only the status line changes.
    pub fn begin_fetch(&mut self, message: impl Into<String>) -> FetchTicket {
        self.issued += 1;
        self.set_status(message);
        FetchTicket(self.issued)
    }

    fn is_stale(&self, ticket: FetchTicket) -> bool {
        ticket.0 < self.applied
    }

    /// Show a report and reveal every panel. Returns false for a stale ticket.
    pub fn apply_report(&mut self, ticket: FetchTicket, report: WeatherReport) -> bool {
        if self.is_stale(ticket) {
            tracing::warn!(ticket = ticket.0, applied = self.applied, "dropping stale report");
            return false;
        }
        self.applied = ticket.0;

        let days = aggregate(&report.forecast);
        match self.chart.as_mut() {
            Some(chart) => chart.update(&days),
            None => self.chart = Some(TrendChart::new(&days, self.theme.palette())),
        }

        let current = report.current;
        self.set_status(format!("Showing weather for {}, {}", current.city, current.country));
        tracing::info!(city = %current.city, days = days.len(), "report displayed");

        self.last_location = Some(current.city.clone());
        self.current = Some(current);
        self.days = days;
        self.panels_visible = true;
        true
    }

    /// Report a failed fetch; displayed data stays as it was.
    pub fn apply_failure(&mut self, ticket: FetchTicket, err: &DashError) -> bool {
        if self.is_stale(ticket) {
            tracing::warn!(ticket = ticket.0, applied = self.applied, "dropping stale failure");
            return false;
        }
        self.applied = ticket.0;
        self.set_error(err);
        false
    }

    fn complete(&mut self, ticket: FetchTicket, result: Result<WeatherReport, DashError>) -> bool {
        match result {
            Ok(report) => self.apply_report(ticket, report),
            Err(err) => {
                tracing::debug!(error = %err, "fetch failed");
                self.apply_failure(ticket, &err)
            }
        }
    }

    /// Fetch and show a city. Returns whether the report was displayed.
    pub async fn search(&mut self, provider: &dyn WeatherProvider, city: &str) -> bool {
        let city = match city_query(city) {
            Ok(city) => city,
            Err(err) => {
                self.set_error(&err);
                return false;
            }
        };

        let ticket = self.begin_fetch(format!("Loading weather for {city}..."));
        let result = provider.fetch(&Location::City(city.to_string())).await;
        self.complete(ticket, result)
    }

    /// Picking a saved city is a plain search for it.
    pub async fn open_favorite(&mut self, provider: &dyn WeatherProvider, name: &str) -> bool {
        self.search(provider, name).await
    }

    /// Ask the locator for a position, then fetch and show it.
    pub async fn locate(&mut self, locator: &dyn Locator, provider: &dyn WeatherProvider) -> bool {
        self.set_status("Requesting location...");

        let coords = match locator.locate().await {
            Ok(coords) => coords,
            Err(err) => {
                self.set_error(&err);
                return false;
            }
        };

        let ticket = self.begin_fetch("Loading weather for your location...");
        let result = provider.fetch_by_coordinates(coords).await;
        self.complete(ticket, result)
    }

    /// Save the last successfully shown city.
    pub fn save_favorite<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Result<(), DashError> {
        let Some(name) = self.last_location.clone() else {
            self.set_error(&DashError::Input("No city to save.".to_string()));
            return Ok(());
        };

        if FavoritesStore::new(store).add(&name)? {
            self.set_status(format!("Saved {name}"));
        } else {
            self.set_status(format!("{name} is already saved"));
        }
        Ok(())
    }

    /// Drop a saved city; never triggers a fetch.
    pub fn remove_favorite<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
    ) -> Result<(), DashError> {
        FavoritesStore::new(store).remove(name)?;
        self.set_status(format!("Removed {name}"));
        Ok(())
    }

    pub fn favorites<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<Vec<String>, DashError> {
        Ok(FavoritesStore::new(store).list()?)
    }

    /// Flip and persist the theme, re-coloring the chart if there is one.
    pub fn toggle_theme<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Result<Theme, DashError> {
        self.theme = self.theme.toggled();
        self.theme.save(store)?;

        if let Some(chart) = self.chart.as_mut() {
            chart.apply_palette(self.theme.palette());
        }

        tracing::info!(theme = %self.theme, "theme toggled");
        Ok(self.theme)
    }
}
