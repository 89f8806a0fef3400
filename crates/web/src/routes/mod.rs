//! HTTP route handlers for the cafe catalogue.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Home page
//! GET  /cafes               - Listing with headers and contributor names
//! GET  /retrieve/{user_id}  - Contributor display name (internal helper)
//! GET  /search              - Search form
//! POST /search              - Exact-match search by cafe name
//! GET  /add                 - Add-cafe form
//! POST /add                 - Create a cafe (requires authentication)
//! GET  /delete/{cafe_id}    - Delete a cafe (admin identity only)
//! GET  /register            - Registration form
//! POST /register            - Create a user, auto-login
//! GET  /login               - Login form
//! POST /login               - Authenticate, establish session
//! GET  /secret              - Authenticated-only placeholder page
//! GET  /logout              - Clear session
//! ```

pub mod auth;
pub mod cafes;
pub mod home;
pub mod search;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all routes for the cafe catalogue.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/secret", get(home::secret))
        .route("/cafes", get(cafes::list))
        .route("/add", get(cafes::add_page).post(cafes::add))
        .route("/delete/{cafe_id}", get(cafes::delete))
        .route("/retrieve/{user_id}", get(cafes::retrieve_contributor))
        .route("/search", get(search::search_page).post(search::search))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}
