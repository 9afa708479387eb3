//! Application Layer
//!
//! Token codec, use cases, and configuration.

pub mod check_session;
pub mod config;
pub mod login;
pub mod logout;
pub mod manage_users;
pub mod register;
pub mod token;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use manage_users::{Actor, CreateUserInput, ManageUsersUseCase, UpdateUserInput};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::{Claims, TokenCodec, TokenError, TokenLifetime};
