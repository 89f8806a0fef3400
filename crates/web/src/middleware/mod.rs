//! Request middleware: sessions, authentication extractors, admin guard.

pub mod auth;
pub mod session;

pub use auth::{
    ADMIN_USER_ID, AdminDecision, OptionalAuth, RequireAdmin, RequireAuth, authorize_delete,
    clear_current_user, set_current_user,
};
pub use session::create_session_layer;
