//! Menu-driven dashboard loop.

use inquire::{InquireError, Select, Text};
use std::fmt;
use weatherdash_core::{Dashboard, KeyValueStore, Locator, WeatherProvider};

use crate::render::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    UseLocation,
    OpenFavorite,
    SaveFavorite,
    RemoveFavorite,
    ToggleTheme,
    Quit,
}

impl Action {
    fn menu(has_favorites: bool) -> Vec<Action> {
        let mut actions = vec![Action::Search, Action::UseLocation];
        if has_favorites {
            actions.push(Action::OpenFavorite);
        }
        actions.push(Action::SaveFavorite);
        if has_favorites {
            actions.push(Action::RemoveFavorite);
        }
        actions.extend([Action::ToggleTheme, Action::Quit]);
        actions
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search city",
            Action::UseLocation => "Use my location",
            Action::OpenFavorite => "Open favorite",
            Action::SaveFavorite => "Save current city",
            Action::RemoveFavorite => "Remove favorite",
            Action::ToggleTheme => "Toggle theme",
            Action::Quit => "Quit",
        })
    }
}

/// `None` when the user backed out of a prompt.
fn answered<T>(result: Result<T, InquireError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

pub async fn run<S: KeyValueStore + ?Sized>(
    provider: &dyn WeatherProvider,
    locator: &dyn Locator,
    store: &S,
    renderer: Renderer,
) -> anyhow::Result<()> {
    let mut dash = Dashboard::init(store)?;

    loop {
        let favorites = dash.favorites(store)?;
        println!();
        print!("{}", renderer.render(&dash, &favorites));
        println!();

        let Some(action) =
            answered(Select::new("Action:", Action::menu(!favorites.is_empty())).prompt())?
        else {
            break;
        };

        match action {
            Action::Search => {
                if let Some(city) = answered(Text::new("City:").prompt())? {
                    dash.search(provider, &city).await;
                }
            }
            Action::UseLocation => {
                dash.locate(locator, provider).await;
            }
            Action::OpenFavorite => {
                if let Some(city) = answered(Select::new("Favorite:", favorites).prompt())? {
                    dash.open_favorite(provider, &city).await;
                }
            }
            Action::SaveFavorite => dash.save_favorite(store)?,
            Action::RemoveFavorite => {
                if let Some(city) = answered(Select::new("Remove:", favorites).prompt())? {
                    dash.remove_favorite(store, &city)?;
                }
            }
            Action::ToggleTheme => {
                dash.toggle_theme(store)?;
            }
            Action::Quit => break,
        }
    }

    Ok(())
}
