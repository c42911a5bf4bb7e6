//! User entity - Every account in the system: customers, staff, delivery boys.
//!
//! Customer rows carry the profile fields (address, location, allergy notes)
//! that get snapshotted onto deliveries at generation time. Staff and delivery
//! boys carry a `kitchen_id` tying them to their kitchen.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::UserRole;

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address, if provided
    pub email: Option<String>,
    /// Phone number, if provided
    pub phone: Option<String>,
    /// Role deciding what the account may do
    pub role: UserRole,
    /// Kitchen this user works at (kitchen staff and delivery boys only)
    pub kitchen_id: Option<i64>,
    /// Delivery address (customers)
    pub address: Option<String>,
    /// Latitude of the delivery location
    pub location_lat: Option<f64>,
    /// Longitude of the delivery location
    pub location_lng: Option<f64>,
    /// City the user lives in
    pub city: Option<String>,
    /// Free-text allergy notes shown to the kitchen
    pub allergy_notes: Option<String>,
    /// Soft-delete flag; inactive users are hidden from listings
    pub is_active: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One customer has many subscriptions
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
    /// One customer has many deliveries
    #[sea_orm(has_many = "super::delivery::Entity")]
    Deliveries,
    /// One user receives many notifications
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subscriptions.def()
    }
}

impl Related<super::delivery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliveries.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
