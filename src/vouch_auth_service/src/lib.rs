pub mod auth_service;
pub mod helpers;
pub mod request_tracing;

pub use auth_service::AuthService;
pub use helpers::{configure_postgresql, get_postgres_pool};
