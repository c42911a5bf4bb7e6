//! Kitchen entity - A physical kitchen that prepares and dispatches meals.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kitchen database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kitchens")]
pub struct Model {
    /// Unique identifier for the kitchen
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable kitchen name
    pub name: String,
    /// City the kitchen serves
    pub city: String,
    /// Street address
    pub address: String,
    /// Latitude of the kitchen
    pub location_lat: f64,
    /// Longitude of the kitchen
    pub location_lng: f64,
    /// Contact phone number
    pub contact_phone: String,
    /// Soft-delete flag; inactive kitchens are hidden from listings
    pub is_active: bool,
    /// When the kitchen was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Kitchen and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One kitchen serves many subscriptions
    #[sea_orm(has_many = "super::subscription::Entity")]
    Subscriptions,
    /// One kitchen fulfills many deliveries
    #[sea_orm(has_many = "super::delivery::Entity")]
    Deliveries,
    /// One kitchen publishes many menu items
    #[sea_orm(has_many = "super::menu_item::Entity")]
    MenuItems,
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

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
