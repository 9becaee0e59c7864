use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select};
use std::io::IsTerminal;
use weatherdash_core::{
    Config, Coordinates, Dashboard, FavoritesStore, FileStore, FixedLocator, IpLocator,
    KeyValueStore, Locator, Theme, Units, city_query, provider_from_config,
};

use crate::{interactive, render::Renderer};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the OpenWeather API key and units.
    Configure,

    /// Show the dashboard for a city.
    Show {
        /// City name, e.g. "Paris" or "Paris,FR".
        city: String,

        /// Add the city to favorites once it has been shown.
        #[arg(long)]
        save: bool,
    },

    /// Show the dashboard for the current location.
    Here {
        /// Latitude; skips the IP lookup when given with --lon.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; skips the IP lookup when given with --lat.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
    },

    /// List or edit saved cities.
    Favorites {
        #[command(subcommand)]
        action: Option<FavoritesAction>,
    },

    /// Show or toggle the color theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Interactive dashboard (the default).
    Dash,
}

#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    List,
    Add { city: String },
    Remove { city: String },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    Toggle,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dash) {
            Command::Configure => configure(),
            Command::Show { city, save } => Session::load()?.show(&city, save).await,
            Command::Here { lat, lon } => Session::load()?.here(lat, lon).await,
            Command::Favorites { action } => {
                Session::load()?.favorites(action.unwrap_or(FavoritesAction::List))
            }
            Command::Theme { action } => Session::load()?.theme(action),
            Command::Dash => Session::load()?.dash().await,
        }
    }
}

/// Config, storage and renderer shared by every non-configure command.
struct Session {
    config: Config,
    store: FileStore,
    renderer: Renderer,
}

impl Session {
    fn load() -> anyhow::Result<Self> {
        let config = Config::load()?;
        let store = FileStore::new(Config::storage_file_path()?);
        let renderer = Renderer::new(config.units, color_enabled());

        tracing::debug!(
            storage = %store.path().display(),
            units = config.units.as_str(),
            "session loaded"
        );
        Ok(Self { config, store, renderer })
    }

    async fn show(self, city: &str, save: bool) -> anyhow::Result<()> {
        let provider = provider_from_config(&self.config)?;
        let mut dash = Dashboard::init(&self.store)?;

        if dash.search(provider.as_ref(), city).await && save {
            dash.save_favorite(&self.store)?;
        }

        print!("{}", self.renderer.render(&dash, &dash.favorites(&self.store)?));
        Ok(())
    }

    async fn here(self, lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<()> {
        let provider = provider_from_config(&self.config)?;
        let locator: Box<dyn Locator> = match (lat, lon) {
            (Some(latitude), Some(longitude)) => {
                Box::new(FixedLocator(Coordinates { latitude, longitude }))
            }
            _ => Box::new(IpLocator::new(self.config.geo_base_url())),
        };
        let mut dash = Dashboard::init(&self.store)?;

        dash.locate(locator.as_ref(), provider.as_ref()).await;

        print!("{}", self.renderer.render(&dash, &dash.favorites(&self.store)?));
        Ok(())
    }

    fn favorites(self, action: FavoritesAction) -> anyhow::Result<()> {
        match action {
            FavoritesAction::List => {
                let list = FavoritesStore::new(&self.store).list()?;
                if list.is_empty() {
                    println!("No saved cities");
                }
                for city in list {
                    println!("{city}");
                }
            }
            FavoritesAction::Add { city } => println!("{}", add_favorite(&self.store, &city)?),
            FavoritesAction::Remove { city } => {
                FavoritesStore::new(&self.store).remove(&city)?;
                println!("Removed {city}");
            }
        }
        Ok(())
    }

    fn theme(self, action: Option<ThemeAction>) -> anyhow::Result<()> {
        match action {
            None => println!("Theme: {}", Theme::load(&self.store)?),
            Some(ThemeAction::Toggle) => {
                let mut dash = Dashboard::init(&self.store)?;
                println!("Theme: {}", dash.toggle_theme(&self.store)?);
            }
        }
        Ok(())
    }

    async fn dash(self) -> anyhow::Result<()> {
        let provider = provider_from_config(&self.config)?;
        let locator = IpLocator::new(self.config.geo_base_url());
        interactive::run(provider.as_ref(), &locator, &self.store, self.renderer).await
    }
}

/// Save a city by name and return the line to print.
fn add_favorite<S: KeyValueStore>(store: &S, city: &str) -> anyhow::Result<String> {
    let city = city_query(city)?;
    if FavoritesStore::new(store).add(city)? {
        Ok(format!("Saved {city}"))
    } else {
        Ok(format!("{city} is already saved"))
    }
}

/// Interactive configuration: API key and units.
fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Create one at https://home.openweathermap.org/api_keys")
        .prompt()
        .context("API key prompt aborted")?;

    let current_units = match config.units {
        Units::Metric => 0,
        Units::Imperial => 1,
    };
    let units = Select::new("Units:", vec!["metric", "imperial"])
        .with_starting_cursor(current_units)
        .prompt()
        .context("Units prompt aborted")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.api_key = Some(api_key.to_string());
    }
    config.units = Units::try_from(units)?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}
