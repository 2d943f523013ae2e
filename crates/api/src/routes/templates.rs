//! Route definitions for prompt templates, mounted at `/templates`.
//!
//! ```text
//! GET    /          list_my_templates
//! POST   /          create_template
//! GET    /public    list_public_templates
//! GET    /{id}      get_template
//! PUT    /{id}      update_template
//! DELETE /{id}      delete_template
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Template routes, mounted at `/templates`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(templates::list_my_templates).post(templates::create_template),
        )
        .route("/public", get(templates::list_public_templates))
        .route(
            "/{id}",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
}
