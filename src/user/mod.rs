// Public API - what other modules can use
pub use handlers::{create_user, list_users};
pub use types::{CreateUserRequest, PhoneDto, UserListEntry, UserResponse};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
