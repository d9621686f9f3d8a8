//! User selection and creation endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::post,
    Form, Router,
};
use serde::Deserialize;

use super::home::home_for;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::http::views::render_new_user;
use crate::models::{parse_user_id, UserColor, UserName, ValidationError};

/// Tab form on the home page: either `add=new` or `user=<id>`
#[derive(Deserialize)]
pub struct UserIntentForm {
    pub add: Option<String>,
    pub user: Option<String>,
}

/// New-user form
#[derive(Deserialize)]
pub struct NewUserForm {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// POST /user - open the new-user form or switch the active user
async fn user_intent(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UserIntentForm>,
) -> Result<Response, ApiError> {
    if form.add.as_deref() == Some("new") {
        return Ok(Html(render_new_user()).into_response());
    }

    let raw = form
        .user
        .ok_or(ValidationError::Empty { field: "user id" })?;
    let user_id = parse_user_id(&raw)?;

    let user = state.store.get_user(user_id).await?.ok_or(ApiError::NotFound {
        resource: "user",
        id: user_id.to_string(),
    })?;

    Ok(home_for(state.store.as_ref(), user).await?.into_response())
}

/// POST /new - create a user and show them as active
async fn create_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NewUserForm>,
) -> Result<Html<String>, ApiError> {
    let name = UserName::from_form(form.name.as_deref())?;
    let color = UserColor::from_form(form.color.as_deref())?;

    let user = state.store.register_user(&name, &color).await?;
    tracing::info!(user_id = user.id, name = %user.name, "user created");

    home_for(state.store.as_ref(), user).await
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", post(user_intent))
        .route("/new", post(create_user))
}
