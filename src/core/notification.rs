//! Notification business logic.
//!
//! Notifications are fire-and-forget: status transitions record them through
//! [`notify_best_effort`], which logs failures instead of propagating them,
//! so a delivery update never fails because its notification could not be
//! written.

use crate::{
    entities::{Notification, enums::NotificationKind, notification},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Records a notification for a user.
pub async fn record_notification<C>(
    db: &C,
    user_id: i64,
    title: &str,
    message: &str,
    kind: NotificationKind,
    delivery_id: Option<i64>,
) -> Result<notification::Model>
where
    C: ConnectionTrait,
{
    let row = notification::ActiveModel {
        user_id: Set(user_id),
        title: Set(title.to_string()),
        message: Set(message.to_string()),
        kind: Set(kind),
        delivery_id: Set(delivery_id),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Best-effort variant of [`record_notification`]: a write failure is logged
/// and swallowed.
pub async fn notify_best_effort<C>(
    db: &C,
    user_id: i64,
    title: &str,
    message: &str,
    kind: NotificationKind,
    delivery_id: Option<i64>,
) where
    C: ConnectionTrait,
{
    if let Err(e) = record_notification(db, user_id, title, message, kind, delivery_id).await {
        tracing::warn!(error = %e, user_id, title, "failed to record notification");
    }
}

/// Retrieves a user's notifications, newest first.
pub async fn get_notifications_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<notification::Model>> {
    Notification::find()
        .filter(notification::Column::UserId.eq(user_id))
        .order_by_desc(notification::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks one notification as read. Scoped to the owning user so one customer
/// cannot touch another's notifications.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    notification_id: i64,
    user_id: i64,
) -> Result<()> {
    Notification::update_many()
        .set(notification::ActiveModel {
            is_read: Set(true),
            ..Default::default()
        })
        .filter(notification::Column::Id.eq(notification_id))
        .filter(notification::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Marks all of a user's notifications as read.
pub async fn mark_all_notifications_read(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    Notification::update_many()
        .set(notification::ActiveModel {
            is_read: Set(true),
            ..Default::default()
        })
        .filter(notification::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_record_and_list_notifications() -> Result<()> {
        let ctx = setup_base_records().await?;

        record_notification(
            &ctx.db,
            ctx.customer.id,
            "Food ready",
            "Your lunch is packed.",
            NotificationKind::DeliveryUpdate,
            Some(1),
        )
        .await?;
        record_notification(
            &ctx.db,
            ctx.customer.id,
            "Renewal reminder",
            "3 deliveries left.",
            NotificationKind::SubscriptionUpdate,
            None,
        )
        .await?;

        let list = get_notifications_for_user(&ctx.db, ctx.customer.id).await?;
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|n| !n.is_read));

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_read_scoped_to_owner() -> Result<()> {
        let ctx = setup_base_records().await?;

        let n = record_notification(
            &ctx.db,
            ctx.customer.id,
            "Hello",
            "World",
            NotificationKind::General,
            None,
        )
        .await?;

        // Wrong user: no effect
        mark_notification_read(&ctx.db, n.id, ctx.customer.id + 1).await?;
        let list = get_notifications_for_user(&ctx.db, ctx.customer.id).await?;
        assert!(!list[0].is_read);

        // Owner: marked
        mark_notification_read(&ctx.db, n.id, ctx.customer.id).await?;
        let list = get_notifications_for_user(&ctx.db, ctx.customer.id).await?;
        assert!(list[0].is_read);

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_all_read() -> Result<()> {
        let ctx = setup_base_records().await?;

        for i in 0..3 {
            record_notification(
                &ctx.db,
                ctx.customer.id,
                &format!("n{i}"),
                "body",
                NotificationKind::General,
                None,
            )
            .await?;
        }

        mark_all_notifications_read(&ctx.db, ctx.customer.id).await?;
        let list = get_notifications_for_user(&ctx.db, ctx.customer.id).await?;
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|n| n.is_read));

        Ok(())
    }
}
