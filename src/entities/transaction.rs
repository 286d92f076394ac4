//! Transaction entity - A single recorded sale header.
//!
//! Each transaction has a reference number, the date it was recorded, the customer's name,
//! the cost of the goods and the shipping cost. The `id` is generated by the database.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transaction")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier, assigned by the database
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the row was inserted
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
    /// External reference number of the sale
    pub transaction_ref_number: String,
    /// When the sale was recorded
    pub transaction_date: DateTimeUtc,
    /// Name of the buying customer
    pub customer_name: String,
    /// Cost of the goods
    pub cost: i64,
    /// Cost of shipping
    pub shipping_cost: i64,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One transaction has many detail lines
    #[sea_orm(has_many = "super::transaction_detail::Entity")]
    Details,
}

impl Related<super::transaction_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
