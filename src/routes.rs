use crate::{
    appointment::appointment_handlers,
    auth::auth_handlers,
    finance::finance_handlers,
    grocery::grocery_handlers,
    middleware::auth_middleware,
    state::AppState,
    subscription::subscription_handlers,
    task::task_handlers,
};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::forgot_password,
        task_handlers::get_tasks,
        task_handlers::create_task,
        appointment_handlers::get_appointments,
        appointment_handlers::get_appointment,
        appointment_handlers::create_appointment,
        finance_handlers::get_transactions,
        finance_handlers::get_summary,
        grocery_handlers::get_items,
        subscription_handlers::subscribe,
    ),
    components(
        schemas(
            crate::auth::auth_dto::RegisterRequest,
            crate::auth::auth_dto::LoginRequest,
            crate::auth::auth_dto::ForgotPasswordRequest,
            crate::auth::auth_dto::ResetPasswordRequest,
            crate::auth::auth_dto::AuthResponse,
            crate::user::user_models::UserResponse,
            crate::task::task_models::Task,
            crate::task::task_models::TaskStatus,
            crate::task::task_dto::CreateTaskRequest,
            crate::task::task_dto::UpdateTaskRequest,
            crate::appointment::appointment_models::Appointment,
            crate::appointment::appointment_dto::CreateAppointmentRequest,
            crate::appointment::appointment_dto::UpdateAppointmentRequest,
            crate::finance::finance_models::Transaction,
            crate::finance::finance_models::CategoryTotal,
            crate::finance::finance_models::FinanceSummary,
            crate::finance::finance_dto::CreateTransactionRequest,
            crate::finance::finance_dto::UpdateTransactionRequest,
            crate::grocery::grocery_models::GroceryItem,
            crate::grocery::grocery_dto::CreateGroceryItemRequest,
            crate::grocery::grocery_dto::UpdateGroceryItemRequest,
            crate::subscription::subscription_dto::SubscribeRequest,
            crate::subscription::subscription_dto::SubscriptionKeys,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "appointments", description = "Calendar endpoints"),
        (name = "finances", description = "Finance tracking endpoints"),
        (name = "grocery", description = "Grocery list endpoints"),
        (name = "subscriptions", description = "Push subscription endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/forgot-password", post(auth_handlers::forgot_password))
        .route("/reset-password/:token", post(auth_handlers::reset_password));

    // Protected routes (auth required)
    let task_routes = Router::new()
        .route(
            "/",
            get(task_handlers::get_tasks).post(task_handlers::create_task),
        )
        .route(
            "/:id",
            get(task_handlers::get_task)
                .put(task_handlers::update_task)
                .delete(task_handlers::delete_task),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let appointment_routes = Router::new()
        .route(
            "/",
            get(appointment_handlers::get_appointments)
                .post(appointment_handlers::create_appointment),
        )
        .route(
            "/:id",
            get(appointment_handlers::get_appointment)
                .put(appointment_handlers::update_appointment)
                .delete(appointment_handlers::delete_appointment),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let finance_routes = Router::new()
        .route(
            "/",
            get(finance_handlers::get_transactions).post(finance_handlers::create_transaction),
        )
        .route("/summary", get(finance_handlers::get_summary))
        .route(
            "/:id",
            axum::routing::put(finance_handlers::update_transaction)
                .delete(finance_handlers::delete_transaction),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let grocery_routes = Router::new()
        .route(
            "/",
            get(grocery_handlers::get_items).post(grocery_handlers::create_item),
        )
        .route(
            "/:id",
            axum::routing::put(grocery_handlers::update_item)
                .delete(grocery_handlers::delete_item),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let subscription_routes = Router::new()
        .route(
            "/",
            post(subscription_handlers::subscribe).delete(subscription_handlers::unsubscribe),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes)
        .nest("/appointments", appointment_routes)
        .nest("/finances", finance_routes)
        .nest("/grocery", grocery_routes)
        .nest("/subscriptions", subscription_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_doc_exposes_single_appointment_lookup() {
        let doc = ApiDoc::openapi();
        let path = doc
            .paths
            .paths
            .get("/api/appointments/{id}")
            .expect("single-appointment path documented");
        assert!(path.operations.contains_key(&utoipa::openapi::PathItemType::Get));
    }
}
