//! Transaction detail entity - One line item of a transaction.
//!
//! `transaction_id` references the owning transaction. The reference is enforced by the
//! foreign key; no delete rule is declared, so removing a transaction does not remove its details.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction detail database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction_detail")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
    /// ID of the transaction this line belongs to
    pub transaction_id: i64,
    /// Name of the item sold
    pub stuff: String,
    /// Unit price
    pub price: i64,
    /// Quantity sold
    pub qty: i64,
    /// Line total
    pub total: i64,
}

/// Defines relationships between `TransactionDetail` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each detail belongs to one transaction
    #[sea_orm(
        belongs_to = "super::transaction::Entity",
        from = "Column::TransactionId",
        to = "super::transaction::Column::Id"
    )]
    Transaction,
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
