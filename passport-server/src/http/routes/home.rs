//! Home page

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};

use crate::db::VisitStore;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::views::{render_home, HomeView};
use crate::models::User;

/// GET / - home page for the configured active user
async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let users = state.store.list_users().await?;
    let active = state.active_user.select(&users).cloned();
    let codes = match &active {
        Some(user) => state.store.list_visited_country_codes(user.id).await?,
        None => Vec::new(),
    };

    Ok(Html(render_home(&HomeView::new(users, active, codes))))
}

/// Render the home page with `user` active.
pub(super) async fn home_for(store: &dyn VisitStore, user: User) -> Result<Html<String>, ApiError> {
    let codes = store.list_visited_country_codes(user.id).await?;
    let users = store.list_users().await?;

    Ok(Html(render_home(&HomeView::new(users, Some(user), codes))))
}

/// Home routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}
