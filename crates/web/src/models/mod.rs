//! Domain types for the cafe catalogue.

pub mod cafe;
pub mod session;
pub mod user;

pub use cafe::{Cafe, CafeView, NewCafe};
pub use session::{CurrentUser, session_keys};
pub use user::User;
