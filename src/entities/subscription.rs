//! Subscription entity - A customer's active instance of a purchased plan.
//!
//! Counter invariants (see `core::lifecycle`): `total_deliveries` equals the
//! plan quota plus `extended_deliveries`; a delivered meal moves one unit from
//! `remaining_deliveries` to `completed_deliveries`; a cancelled or skipped
//! meal grows `total_deliveries` and `extended_deliveries` by one so the
//! customer never loses a paid meal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{DietType, SubscriptionStatus};

/// Subscription database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    /// Unique identifier for the subscription
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning customer
    pub user_id: i64,
    /// Kitchen fulfilling the subscription
    pub kitchen_id: i64,
    /// Plan this subscription was purchased from
    pub plan_id: i64,
    /// Diet preference chosen at purchase
    pub diet_type: DietType,
    /// Ordered comma-separated meal periods (e.g. "breakfast,dinner")
    pub meal_periods: String,
    /// Comma-separated allowed weekdays (e.g. "monday,wednesday,friday")
    pub delivery_days: String,
    /// First calendar date deliveries may land on
    pub start_date: Date,
    /// Plan quota plus auto-extensions
    pub total_deliveries: i32,
    /// Delivery days completed so far
    pub completed_deliveries: i32,
    /// Delivery days still owed to the customer
    pub remaining_deliveries: i32,
    /// Delivery days auto-added because of cancellations/skips
    pub extended_deliveries: i32,
    /// Amount the customer paid for the plan
    pub amount_paid: f64,
    /// Lifecycle status
    pub status: SubscriptionStatus,
    /// When the subscription was purchased
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Subscription and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each subscription belongs to one customer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each subscription is served by one kitchen
    #[sea_orm(
        belongs_to = "super::kitchen::Entity",
        from = "Column::KitchenId",
        to = "super::kitchen::Column::Id"
    )]
    Kitchen,
    /// Each subscription was purchased from one plan
    #[sea_orm(
        belongs_to = "super::plan::Entity",
        from = "Column::PlanId",
        to = "super::plan::Column::Id"
    )]
    Plan,
    /// One subscription owns many deliveries
    #[sea_orm(has_many = "super::delivery::Entity")]
    Deliveries,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::kitchen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kitchen.def()
    }
}

impl Related<super::plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plan.def()
    }
}

impl Related<super::delivery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliveries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
