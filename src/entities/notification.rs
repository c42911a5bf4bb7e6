//! Notification entity - An in-app message for one user.
//!
//! Notifications are best-effort: delivery status transitions record them but
//! never fail because one could not be written.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::NotificationKind;

/// Notification database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// Unique identifier for the notification
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User the notification is addressed to
    pub user_id: i64,
    /// Short title
    pub title: String,
    /// Message body
    pub message: String,
    /// Category of the notification
    pub kind: NotificationKind,
    /// Related delivery, when the notification concerns one
    pub delivery_id: Option<i64>,
    /// Whether the user has read it
    pub is_read: bool,
    /// When the notification was recorded
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Notification and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each notification is addressed to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
