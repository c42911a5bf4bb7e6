//! Delivery request entity - A customer's ask to skip or reschedule one delivery.
//!
//! A request only affects delivery and subscription state once approved;
//! rejection leaves everything unchanged. Pending requests against the same
//! delivery are not deduplicated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{RequestStatus, RequestType};

/// Delivery request database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "delivery_requests")]
pub struct Model {
    /// Unique identifier for the request
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Delivery the request targets
    pub delivery_id: i64,
    /// Customer who filed the request
    pub user_id: i64,
    /// Skip or reschedule
    pub request_type: RequestType,
    /// Date the delivery was originally scheduled for
    pub original_date: Date,
    /// Requested new date (reschedule only)
    pub requested_date: Option<Date>,
    /// Requested time window (reschedule only, free text)
    pub time_window: Option<String>,
    /// Why the customer filed the request
    pub reason: String,
    /// Review status
    pub status: RequestStatus,
    /// Staff user who reviewed the request
    pub reviewed_by: Option<i64>,
    /// When the request was reviewed
    pub reviewed_at: Option<DateTimeUtc>,
    /// When the request was filed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `DeliveryRequest` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each request targets one delivery (non-owning reference)
    #[sea_orm(
        belongs_to = "super::delivery::Entity",
        from = "Column::DeliveryId",
        to = "super::delivery::Column::Id"
    )]
    Delivery,
}

impl Related<super::delivery::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Delivery.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
