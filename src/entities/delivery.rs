//! Delivery entity - One meal-period drop-off on one calendar date.
//!
//! Deliveries are generated in a batch when a subscription is created and are
//! never deleted afterwards; they only move through the status state machine.
//! Address, location, and allergy notes are snapshots of the customer profile
//! at generation time, so later profile edits do not rewrite history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{DeliveryStatus, MealPeriod};

/// Delivery database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deliveries")]
pub struct Model {
    /// Unique identifier for the delivery
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning subscription
    pub subscription_id: i64,
    /// Owning customer
    pub user_id: i64,
    /// Kitchen fulfilling this delivery
    pub kitchen_id: i64,
    /// Assigned delivery boy, once routed
    pub delivery_boy_id: Option<i64>,
    /// Calendar date of the drop-off
    pub delivery_date: Date,
    /// Logical delivery day within the plan (1-based, shared by all meal
    /// periods on the same date, counting only dates that were scheduled)
    pub day_number: i32,
    /// Meal period of this drop-off
    pub meal_period: MealPeriod,
    /// Current status
    pub status: DeliveryStatus,
    /// Address snapshot taken at generation time
    pub address: String,
    /// Latitude snapshot taken at generation time
    pub location_lat: f64,
    /// Longitude snapshot taken at generation time
    pub location_lng: f64,
    /// Allergy-notes snapshot taken at generation time
    pub allergy_notes: Option<String>,
    /// True when cancelling/skipping this delivery extended the subscription
    pub auto_extended: bool,
    /// When the kitchen marked the meal ready
    pub ready_at: Option<DateTimeUtc>,
    /// When the meal left the kitchen
    pub dispatched_at: Option<DateTimeUtc>,
    /// When the meal reached the customer
    pub delivered_at: Option<DateTimeUtc>,
    /// When the delivery was cancelled or skipped
    pub cancelled_at: Option<DateTimeUtc>,
    /// Who cancelled: "customer", "staff", or "system"
    pub cancelled_by: Option<String>,
    /// Free-text cancellation reason
    pub cancellation_reason: Option<String>,
    /// When the delivery row was generated
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Delivery and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each delivery belongs to one subscription
    #[sea_orm(
        belongs_to = "super::subscription::Entity",
        from = "Column::SubscriptionId",
        to = "super::subscription::Column::Id"
    )]
    Subscription,
    /// Each delivery belongs to one customer
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each delivery is fulfilled by one kitchen
    #[sea_orm(
        belongs_to = "super::kitchen::Entity",
        from = "Column::KitchenId",
        to = "super::kitchen::Column::Id"
    )]
    Kitchen,
    /// One delivery can be targeted by many requests
    #[sea_orm(has_many = "super::delivery_request::Entity")]
    Requests,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscription.def()
    }
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

impl Related<super::delivery_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
