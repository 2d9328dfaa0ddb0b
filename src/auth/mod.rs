pub mod auth_dto;
pub mod auth_handlers;
pub mod auth_service;
pub mod jwt;
pub mod mailer;
pub mod password;

pub use auth_dto::{AuthResponse, LoginRequest, RegisterRequest};
pub use auth_handlers::{forgot_password, login, register, reset_password};
pub use auth_service::AuthService;
pub use jwt::{create_jwt, create_reset_token, verify_jwt, Claims};
pub use mailer::Mailer;
pub use password::{hash_password, verify_password};
