//! Cafe listing, creation and deletion route handlers.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use coffee_wifi_core::{CafeId, UserId};

use crate::db::{CafeRepository, RepositoryError, UserRepository};
use crate::error::AppError;
use crate::forms::{self, FormErrors};
use crate::middleware::{AdminDecision, OptionalAuth, RequireAdmin, authorize_delete};
use crate::models::{Cafe, CafeView, CurrentUser, NewCafe};
use crate::state::AppState;

/// Column headers for the listing table.
pub const LISTING_HEADERS: &[&str] = &[
    "Cafe Name",
    "Location",
    "Seats",
    "Toilet",
    "Wifi",
    "Calls",
    "Power",
    "Coffee",
];

// =============================================================================
// Form Types
// =============================================================================

/// Add-cafe form data.
///
/// Checkbox fields arrive as `Option<String>` because browsers omit
/// unchecked checkboxes entirely; absence coerces to false.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CafeForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub map_url: String,
    #[serde(default)]
    pub coffee_price: String,
    #[serde(default)]
    pub seats: String,
    #[serde(default)]
    pub has_toilet: Option<String>,
    #[serde(default)]
    pub has_wifi: Option<String>,
    #[serde(default)]
    pub has_sockets: Option<String>,
    #[serde(default)]
    pub can_take_calls: Option<String>,
}

impl CafeForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        forms::require(&mut errors, "name", &self.name, "Cafe name");
        forms::require(&mut errors, "location", &self.location, "Location");
        forms::require_url(&mut errors, "map_url", &self.map_url, "Location URL");
        forms::require(&mut errors, "seats", &self.seats, "Seats");
        errors
    }

    /// Enumerated field-by-field mapping from the validated form to the
    /// record to persist.
    fn to_new_cafe(&self, user_id: UserId) -> NewCafe {
        NewCafe {
            name: self.name.trim().to_owned(),
            map_url: self.map_url.trim().to_owned(),
            img_url: non_empty(&self.img_url),
            location: self.location.trim().to_owned(),
            seats: self.seats.trim().to_owned(),
            has_toilet: forms::checkbox_checked(self.has_toilet.as_ref()),
            has_wifi: forms::checkbox_checked(self.has_wifi.as_ref()),
            has_sockets: forms::checkbox_checked(self.has_sockets.as_ref()),
            can_take_calls: forms::checkbox_checked(self.can_take_calls.as_ref()),
            coffee_price: non_empty(&self.coffee_price),
            user_id: Some(user_id),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cafe listing template, shared by `/cafes` and `/search` results.
#[derive(Template, WebTemplate)]
#[template(path = "cafes.html")]
pub struct CafesTemplate {
    pub headers: &'static [&'static str],
    pub cafes: Vec<CafeView>,
    /// The search results view reuses this template without the
    /// contributor column.
    pub show_contributor: bool,
    pub is_admin: bool,
    pub current_user: Option<CurrentUser>,
}

/// Add-cafe form template.
#[derive(Template, WebTemplate)]
#[template(path = "add.html")]
pub struct AddTemplate {
    pub form: CafeForm,
    pub errors: FormErrors,
    pub current_user: Option<CurrentUser>,
}

// =============================================================================
// Listing Routes
// =============================================================================

/// Resolve each distinct contributing user id to a display name.
async fn contributor_names(
    users: &UserRepository<'_>,
    cafes: &[Cafe],
) -> Result<HashMap<i64, String>, RepositoryError> {
    let mut names: HashMap<i64, String> = HashMap::new();
    for user_id in cafes.iter().filter_map(|c| c.user_id) {
        if names.contains_key(&user_id.as_i64()) {
            continue;
        }
        if let Some(name) = users.get_name_by_id(user_id).await? {
            names.insert(user_id.as_i64(), name);
        }
    }
    Ok(names)
}

/// Display all cafes with column headers and contributor names.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
) -> Result<CafesTemplate, AppError> {
    let cafes = CafeRepository::new(state.pool()).list_all().await?;

    let users = UserRepository::new(state.pool());
    let names = contributor_names(&users, &cafes).await?;

    let views = cafes
        .iter()
        .map(|cafe| {
            let contributor = cafe
                .user_id
                .and_then(|id| names.get(&id.as_i64()).cloned());
            CafeView::project(cafe, contributor)
        })
        .collect();

    Ok(CafesTemplate {
        headers: LISTING_HEADERS,
        cafes: views,
        show_contributor: true,
        is_admin: authorize_delete(current_user.as_ref()) == AdminDecision::Allowed,
        current_user,
    })
}

/// Return a contributor's display name (internal helper route).
pub async fn retrieve_contributor(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<String, AppError> {
    UserRepository::new(state.pool())
        .get_name_by_id(UserId::new(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no user with id {user_id}")))
}

// =============================================================================
// Add Routes
// =============================================================================

/// Display the add-cafe form.
pub async fn add_page(OptionalAuth(current_user): OptionalAuth) -> impl IntoResponse {
    AddTemplate {
        form: CafeForm::default(),
        errors: FormErrors::default(),
        current_user,
    }
}

/// Handle add-cafe form submission.
///
/// Validation runs before the authentication check: a fully valid submission
/// from an anonymous visitor is flashed to the login page only after its
/// fields pass.
pub async fn add(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(AddTemplate {
            form,
            errors,
            current_user,
        }
        .into_response());
    }

    let Some(user) = current_user else {
        return Ok(Redirect::to("/login?error=login_required").into_response());
    };

    let new_cafe = form.to_new_cafe(user.id);
    match CafeRepository::new(state.pool()).create(&new_cafe).await {
        Ok(cafe) => {
            tracing::info!(cafe_id = %cafe.id, user_id = %user.id, "Cafe added");
            Ok(Redirect::to("/cafes").into_response())
        }
        Err(RepositoryError::Conflict(_)) => {
            let mut errors = FormErrors::default();
            errors.push("name", "A cafe with this name is already listed");
            Ok(AddTemplate {
                form,
                errors,
                current_user: Some(user),
            }
            .into_response())
        }
        Err(e) => Err(e.into()),
    }
}

// =============================================================================
// Delete Route
// =============================================================================

/// Delete a cafe (admin identity only).
///
/// A missing id is an explicit not-found outcome, never a silent success.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(cafe_id): Path<i64>,
) -> Result<Response, AppError> {
    let id = CafeId::new(cafe_id);
    match CafeRepository::new(state.pool()).delete(id).await {
        Ok(()) => {
            tracing::info!(cafe_id = %id, admin_id = %admin.id, "Cafe deleted");
            Ok(Redirect::to("/cafes").into_response())
        }
        Err(RepositoryError::NotFound) => {
            Err(AppError::NotFound(format!("no cafe with id {cafe_id}")))
        }
        Err(e) => Err(e.into()),
    }
}
