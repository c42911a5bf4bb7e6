//! Plan entity - A purchasable subscription template.
//!
//! A plan fixes the delivery quota, diet type, and price. Buying a plan
//! creates a subscription whose counters are seeded from these fields.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{DietType, PlanType};

/// Plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g. "Monthly Pure Veg")
    pub name: String,
    /// Weekly or monthly cadence
    pub plan_type: PlanType,
    /// Diet the plan serves
    pub diet_type: DietType,
    /// Number of delivery days the plan includes
    pub total_deliveries: i32,
    /// Price paid when purchasing this plan
    pub price: f64,
    /// Soft-delete flag; inactive plans cannot be purchased
    pub is_active: bool,
    /// When the plan was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Plan and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One plan is referenced by many subscriptions
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
