pub mod admin;
pub mod auth;
pub mod quiz;
pub mod student;

use maud::Markup;

use crate::{views, views::Screen, AppState};

/// Render a screen with the configured site background applied.
fn render(state: &AppState, screen: Screen) -> Markup {
    let background = state.store.background();
    views::render(screen, Some(&background))
}
