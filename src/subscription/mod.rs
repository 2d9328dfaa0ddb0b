pub mod subscription_dto;
pub mod subscription_handlers;
pub mod subscription_models;
pub mod subscription_repository;

pub use subscription_dto::{SubscribeRequest, SubscriptionKeys};
pub use subscription_handlers::{subscribe, unsubscribe};
pub use subscription_models::PushSubscription;
pub use subscription_repository::SubscriptionRepository;
