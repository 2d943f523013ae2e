pub mod health;
pub mod templates;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /templates                 list own, create (auth required)
/// /templates/public          list public
/// /templates/{id}            get, update, delete (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/templates", templates::router())
}
