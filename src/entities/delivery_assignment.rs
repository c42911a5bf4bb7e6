//! Delivery assignment entity - One delivery boy's route for one day.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::AssignmentStatus;

/// Delivery assignment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "delivery_assignments")]
pub struct Model {
    /// Unique identifier for the assignment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Delivery boy the route belongs to
    pub delivery_boy_id: i64,
    /// Kitchen the route departs from
    pub kitchen_id: i64,
    /// Calendar date of the route
    pub date: Date,
    /// Comma-separated delivery IDs on this route
    pub delivery_ids: String,
    /// Comma-separated delivery IDs in visiting order
    pub route_order: String,
    /// Last reported latitude of the delivery boy
    pub current_lat: Option<f64>,
    /// Last reported longitude of the delivery boy
    pub current_lng: Option<f64>,
    /// Route progress
    pub status: AssignmentStatus,
    /// When the assignment was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `DeliveryAssignment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each assignment departs from one kitchen
    #[sea_orm(
        belongs_to = "super::kitchen::Entity",
        from = "Column::KitchenId",
        to = "super::kitchen::Column::Id"
    )]
    Kitchen,
}

impl Related<super::kitchen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kitchen.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
