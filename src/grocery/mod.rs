pub mod grocery_dto;
pub mod grocery_handlers;
pub mod grocery_models;
pub mod grocery_repository;

pub use grocery_dto::{CreateGroceryItemRequest, UpdateGroceryItemRequest};
pub use grocery_handlers::{create_item, delete_item, get_items, update_item};
pub use grocery_models::GroceryItem;
pub use grocery_repository::GroceryRepository;
