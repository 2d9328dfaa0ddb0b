mod appointment;
mod auth;
mod db;
mod error;
mod finance;
mod grocery;
mod middleware;
mod notifier;
mod routes;
mod state;
mod subscription;
mod task;
mod user;

use auth::mailer::Mailer;
use db::{create_pool, run_migrations};
use notifier::{start_notifier, PgNotifierStore, WebPushSender};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,personal_assistant=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Create repositories
    let user_repository = user::UserRepository::new(db.clone());
    let task_repository = task::TaskRepository::new(db.clone());
    let appointment_repository = appointment::AppointmentRepository::new(db.clone());
    let finance_repository = finance::FinanceRepository::new(db.clone());
    let grocery_repository = grocery::GroceryRepository::new(db.clone());
    let subscription_repository = subscription::SubscriptionRepository::new(db.clone());

    // Create services
    let mailer = Mailer::new(
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
    );
    let task_service = task::TaskService::new(task_repository.clone());
    let appointment_service = appointment::AppointmentService::new(appointment_repository.clone());
    let auth_service = auth::AuthService::new(
        user_repository.clone(),
        mailer.clone(),
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
        config.frontend_url.clone(),
    );

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        user_repository,
        task_repository: task_repository.clone(),
        appointment_repository: appointment_repository.clone(),
        finance_repository,
        grocery_repository,
        subscription_repository: subscription_repository.clone(),
        task_service,
        appointment_service,
        auth_service,
        mailer,
    };

    // Start the due-window notifier
    let notifier_store = PgNotifierStore::new(
        task_repository,
        appointment_repository,
        subscription_repository,
    );
    let push_sender = WebPushSender::new(
        config.vapid_private_key.clone(),
        config.vapid_subject.clone(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to create push client: {:?}", e))?;

    tokio::spawn(async move {
        if let Err(e) = start_notifier(notifier_store, push_sender).await {
            tracing::error!("Notification scheduler error: {:?}", e);
        }
    });

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
