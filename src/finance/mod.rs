pub mod finance_dto;
pub mod finance_handlers;
pub mod finance_models;
pub mod finance_repository;

pub use finance_dto::{CreateTransactionRequest, FinanceFilters, UpdateTransactionRequest};
pub use finance_handlers::{
    create_transaction, delete_transaction, get_summary, get_transactions, update_transaction,
};
pub use finance_models::{CategoryTotal, FinanceSummary, Transaction};
pub use finance_repository::FinanceRepository;
