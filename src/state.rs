use crate::db::DbPool;
use std::sync::Arc;

use crate::appointment::appointment_repository::AppointmentRepository;
use crate::appointment::appointment_service::AppointmentService;
use crate::auth::auth_service::AuthService;
use crate::auth::mailer::Mailer;
use crate::finance::finance_repository::FinanceRepository;
use crate::grocery::grocery_repository::GroceryRepository;
use crate::subscription::subscription_repository::SubscriptionRepository;
use crate::task::task_repository::TaskRepository;
use crate::task::task_service::TaskService;
use crate::user::user_repository::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub task_repository: TaskRepository,
    pub appointment_repository: AppointmentRepository,
    pub finance_repository: FinanceRepository,
    pub grocery_repository: GroceryRepository,
    pub subscription_repository: SubscriptionRepository,
    pub task_service: TaskService,
    pub appointment_service: AppointmentService,
    pub auth_service: AuthService,
    pub mailer: Mailer,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub vapid_private_key: String,
    pub vapid_subject: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_from: String,
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("JWT_EXPIRATION_HOURS must be a number"),
            vapid_private_key: std::env::var("VAPID_PRIVATE_KEY")
                .expect("VAPID_PRIVATE_KEY must be set"),
            vapid_subject: std::env::var("VAPID_SUBJECT")
                .unwrap_or_else(|_| "mailto:admin@example.com".to_string()),
            mail_api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.sendgrid.com/v3/mail/send".to_string()),
            mail_api_key: std::env::var("MAIL_API_KEY")
                .expect("MAIL_API_KEY must be set"),
            mail_from: std::env::var("MAIL_FROM")
                .expect("MAIL_FROM must be set"),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }
}
