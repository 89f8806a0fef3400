//! Cafe search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::db::CafeRepository;
use crate::error::AppError;
use crate::forms::{self, FormErrors};
use crate::middleware::{AdminDecision, OptionalAuth, authorize_delete};
use crate::models::{CafeView, CurrentUser};
use crate::routes::cafes::{CafesTemplate, LISTING_HEADERS};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Search form data.
///
/// The schema accepts a `location` field but the filter applies
/// exact-match-by-name only; the extra field is deliberately ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl SearchForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        forms::require(&mut errors, "name", &self.name, "Cafe name");
        errors
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Search form template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub form: SearchForm,
    pub errors: FormErrors,
    pub current_user: Option<CurrentUser>,
}

// =============================================================================
// Routes
// =============================================================================

/// Display the search form.
pub async fn search_page(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    SearchTemplate {
        form: SearchForm::default(),
        errors: FormErrors::default(),
        current_user,
    }
}

/// Handle search form submission.
///
/// Filters by exact cafe name and reuses the listing template without the
/// contributor column. No match renders an empty listing, not an error.
pub async fn search(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<SearchForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(SearchTemplate {
            form,
            errors,
            current_user,
        }
        .into_response());
    }

    let cafes = CafeRepository::new(state.pool())
        .find_by_name(form.name.trim())
        .await?;

    let views = cafes
        .iter()
        .map(|cafe| CafeView::project(cafe, None))
        .collect();

    Ok(CafesTemplate {
        headers: LISTING_HEADERS,
        cafes: views,
        show_contributor: false,
        is_admin: authorize_delete(current_user.as_ref()) == AdminDecision::Allowed,
        current_user,
    }
    .into_response())
}
