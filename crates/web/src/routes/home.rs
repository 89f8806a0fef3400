//! Home page and the authenticated-only placeholder page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::middleware::{OptionalAuth, RequireAuth};
use crate::models::CurrentUser;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Authenticated-only placeholder page template.
#[derive(Template, WebTemplate)]
#[template(path = "secret.html")]
pub struct SecretTemplate {
    pub current_user: Option<CurrentUser>,
}

/// Display the home page.
pub async fn home(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate { current_user }
}

/// Display the authenticated-only placeholder page.
pub async fn secret(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    SecretTemplate {
        current_user: Some(user),
    }
}
