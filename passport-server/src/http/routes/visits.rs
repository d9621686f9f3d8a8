//! Visited country endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Form, Router,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidUserId;
use crate::http::server::AppState;
use crate::models::{CountryFragment, VisitOutcome};

/// Add-country form
#[derive(Deserialize)]
pub struct AddCountryForm {
    #[serde(default)]
    pub country: String,
}

/// POST /add/{id} - record a visit by country name, then back to the home page
async fn add_country(
    State(state): State<Arc<AppState>>,
    ValidUserId(user_id): ValidUserId,
    Form(form): Form<AddCountryForm>,
) -> Result<impl IntoResponse, ApiError> {
    let fragment = CountryFragment::new(&form.country)?;
    let outcome = state
        .store
        .visit_by_name(user_id, &fragment, state.visit_policy)
        .await?;

    match &outcome {
        VisitOutcome::Recorded { country_code } => {
            tracing::info!(user_id, %country_code, "visit recorded");
        }
        VisitOutcome::AlreadyVisited { country_code } => {
            tracing::debug!(user_id, %country_code, "visit already recorded");
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]))
}

/// Visit routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/add/{id}", post(add_country))
}
