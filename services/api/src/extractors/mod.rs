mod auth;
mod database;
mod json;

pub use auth::AuthUser;
pub use database::DatabaseConnection;
pub use json::{AppJson, AppPath, AppQuery};
