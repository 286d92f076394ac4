//! Entity module - Contains the SeaORM entity definitions for the database.
//! A transaction is a recorded sale header; each transaction owns many detail line items.

pub mod transaction;
pub mod transaction_detail;

// Re-export specific types to avoid conflicts
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
pub use transaction_detail::{
    Column as TransactionDetailColumn, Entity as TransactionDetail,
    Model as TransactionDetailModel,
};
