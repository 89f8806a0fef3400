//! Authentication route handlers.
//!
//! Handles registration, login and logout. Failed logins and duplicate
//! registrations bounce back to the login view with a flash message carried
//! in the query string.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::AppError;
use crate::forms::{self, FormErrors};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::{AuthError, AuthService};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        forms::require(&mut errors, "email", &self.email, "Email");
        forms::require(&mut errors, "password", &self.password, "Password");
        errors
    }
}

/// Registration form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();
        forms::require(&mut errors, "name", &self.name, "Name");
        forms::require_email(&mut errors, "email", &self.email);
        forms::require(&mut errors, "password", &self.password, "Password");
        errors
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for flash message display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

/// Map a flash code from the query string to a user-facing message.
fn flash_message(code: &str) -> &'static str {
    match code {
        "login_required" => "You need to log in or register to add a cafe.",
        "email_taken" => "You've already signed up with that email, log in instead.",
        "unknown_user" => "That email does not exist, please try again.",
        "wrong_password" => "Password incorrect, please try again.",
        _ => "Something went wrong, please try again.",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub form: LoginForm,
    pub errors: FormErrors,
    pub current_user: Option<CurrentUser>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub form: RegisterForm,
    pub errors: FormErrors,
    pub current_user: Option<CurrentUser>,
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page() -> impl IntoResponse {
    RegisterTemplate {
        form: RegisterForm::default(),
        errors: FormErrors::default(),
        current_user: None,
    }
}

/// Handle registration form submission.
///
/// On success the new user is logged in immediately and sent to the listing.
/// A duplicate email redirects to login with a flash message instead of
/// creating a second account.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let mut errors = form.validate();
    if !errors.is_empty() {
        return Ok(RegisterTemplate {
            form,
            errors,
            current_user: None,
        }
        .into_response());
    }

    let auth = AuthService::new(state.pool());
    match auth
        .register(form.name.trim(), form.email.trim(), &form.password)
        .await
    {
        Ok(user) => {
            set_current_user(&session, &CurrentUser::from(&user))
                .await
                .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))?;
            tracing::info!(user_id = %user.id, "New user registered");
            Ok(Redirect::to("/cafes").into_response())
        }
        Err(AuthError::UserAlreadyExists) => {
            Ok(Redirect::to("/login?error=email_taken").into_response())
        }
        Err(AuthError::NameTaken) => {
            errors.push("name", "That display name is already taken");
            Ok(RegisterTemplate {
                form,
                errors,
                current_user: None,
            }
            .into_response())
        }
        Err(AuthError::InvalidEmail(e)) => {
            errors.push("email", e.to_string());
            Ok(RegisterTemplate {
                form,
                errors,
                current_user: None,
            }
            .into_response())
        }
        Err(AuthError::WeakPassword(message)) => {
            errors.push("password", message);
            Ok(RegisterTemplate {
                form,
                errors,
                current_user: None,
            }
            .into_response())
        }
        Err(AuthError::Repository(e)) => Err(e.into()),
        Err(other) => Err(AppError::Internal(other.to_string())),
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.as_deref().map(flash_message),
        form: LoginForm::default(),
        errors: FormErrors::default(),
        current_user: None,
    }
}

/// Handle login form submission.
///
/// Looks the user up by exact email. An unknown email and a wrong password
/// produce distinct flash messages; neither touches session state.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(LoginTemplate {
            error: None,
            form,
            errors,
            current_user: None,
        }
        .into_response());
    }

    let auth = AuthService::new(state.pool());
    match auth.login(form.email.trim(), &form.password).await {
        Ok(user) => {
            set_current_user(&session, &CurrentUser::from(&user))
                .await
                .map_err(|e| AppError::Internal(format!("failed to set session: {e}")))?;
            Ok(Redirect::to("/cafes").into_response())
        }
        Err(AuthError::UserNotFound) => {
            Ok(Redirect::to("/login?error=unknown_user").into_response())
        }
        Err(AuthError::WrongPassword) => {
            Ok(Redirect::to("/login?error=wrong_password").into_response())
        }
        Err(AuthError::Repository(e)) => Err(e.into()),
        Err(other) => Err(AppError::Internal(other.to_string())),
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the stored user and destroys the session, then redirects home.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}
