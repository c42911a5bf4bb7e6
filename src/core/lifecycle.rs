//! Subscription lifecycle management.
//!
//! Keeps subscription counters consistent as constituent deliveries resolve.
//! Counters are mutated with atomic column increments, never read-modify-write
//! in application code, so concurrent status updates on different deliveries
//! of the same subscription cannot lose updates.
//!
//! Counter model: `total_deliveries = plan quota + extended_deliveries`.
//! A delivered meal moves one unit from `remaining_deliveries` to
//! `completed_deliveries`. A cancelled or skipped meal leaves
//! `remaining_deliveries` alone (the cancelled row exits the scheduled pool
//! and its make-up slot replaces it) while `total_deliveries` and
//! `extended_deliveries` both grow by one.

use crate::{
    config::policy::DeliveryPolicy,
    core::notification::notify_best_effort,
    entities::{
        Subscription, delivery,
        enums::{DeliveryStatus, NotificationKind, SubscriptionStatus},
        subscription,
    },
    errors::{Error, Result},
};
use sea_orm::sea_query::Expr;
use sea_orm::{Set, prelude::*};

async fn find_subscription<C>(conn: &C, subscription_id: i64) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    Subscription::find_by_id(subscription_id)
        .one(conn)
        .await?
        .ok_or(Error::SubscriptionNotFound {
            id: subscription_id,
        })
}

/// Reacts to a delivery reaching `delivered`: atomically moves one unit from
/// `remaining_deliveries` to `completed_deliveries`.
///
/// When the post-update remaining count lands exactly on the policy's
/// renewal-reminder threshold, a reminder notification is recorded. Each
/// delivery decrements remaining by one, so the reminder fires exactly once
/// per downward crossing.
///
/// Callers must only invoke this from a guarded `delivered` transition;
/// the state machine's terminal-state check is what prevents double counting.
pub async fn on_delivery_delivered<C>(
    conn: &C,
    subscription_id: i64,
    policy: &DeliveryPolicy,
) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    // Existence check up front so a bad ID surfaces as NotFound, not a no-op
    find_subscription(conn, subscription_id).await?;

    Subscription::update_many()
        .col_expr(
            subscription::Column::CompletedDeliveries,
            Expr::col(subscription::Column::CompletedDeliveries).add(1),
        )
        .col_expr(
            subscription::Column::RemainingDeliveries,
            Expr::col(subscription::Column::RemainingDeliveries).sub(1),
        )
        .filter(subscription::Column::Id.eq(subscription_id))
        .exec(conn)
        .await?;

    let updated = find_subscription(conn, subscription_id).await?;

    if updated.remaining_deliveries == policy.renewal_reminder_threshold {
        notify_best_effort(
            conn,
            updated.user_id,
            "Time to renew your plan",
            &format!(
                "Only {} deliveries left on your subscription. Renew now to keep your meals coming.",
                updated.remaining_deliveries
            ),
            NotificationKind::SubscriptionUpdate,
            None,
        )
        .await;
    }

    Ok(updated)
}

/// Reacts to a delivery being cancelled or skipped: atomically grows
/// `total_deliveries` and `extended_deliveries` by one so the customer gets a
/// make-up delivery instead of losing a paid meal. `remaining_deliveries` is
/// deliberately untouched.
pub async fn on_delivery_cancelled_or_skipped<C>(
    conn: &C,
    subscription_id: i64,
) -> Result<subscription::Model>
where
    C: ConnectionTrait,
{
    find_subscription(conn, subscription_id).await?;

    Subscription::update_many()
        .col_expr(
            subscription::Column::TotalDeliveries,
            Expr::col(subscription::Column::TotalDeliveries).add(1),
        )
        .col_expr(
            subscription::Column::ExtendedDeliveries,
            Expr::col(subscription::Column::ExtendedDeliveries).add(1),
        )
        .filter(subscription::Column::Id.eq(subscription_id))
        .exec(conn)
        .await?;

    find_subscription(conn, subscription_id).await
}

/// Cancels a subscription: sets status to cancelled and bulk-transitions every
/// delivery still in `scheduled` to `cancelled` with reason "subscription
/// cancelled". Deliveries already in flight (preparing, ready, out for
/// delivery) are left untouched, and the bulk cancellation does not
/// auto-extend anything.
pub async fn on_subscription_cancelled(
    db: &DatabaseConnection,
    subscription_id: i64,
) -> Result<subscription::Model> {
    let sub = find_subscription(db, subscription_id).await?;

    let mut active: subscription::ActiveModel = sub.into();
    active.status = Set(SubscriptionStatus::Cancelled);
    let updated = active.update(db).await?;

    let now = chrono::Utc::now();
    let cancelled = crate::entities::Delivery::update_many()
        .set(delivery::ActiveModel {
            status: Set(DeliveryStatus::Cancelled),
            cancelled_at: Set(Some(now)),
            cancelled_by: Set(Some("system".to_string())),
            cancellation_reason: Set(Some("subscription cancelled".to_string())),
            ..Default::default()
        })
        .filter(delivery::Column::SubscriptionId.eq(subscription_id))
        .filter(delivery::Column::Status.eq(DeliveryStatus::Scheduled))
        .exec(db)
        .await?;

    tracing::info!(
        subscription_id,
        cancelled_deliveries = cancelled.rows_affected,
        "subscription cancelled"
    );

    notify_best_effort(
        db,
        updated.user_id,
        "Subscription cancelled",
        "Your subscription has been cancelled. Scheduled deliveries were removed.",
        NotificationKind::SubscriptionUpdate,
        None,
    )
    .await;

    Ok(updated)
}
