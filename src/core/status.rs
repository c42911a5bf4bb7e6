//! Delivery status state machine.
//!
//! The happy path is forward-only: scheduled, preparing, ready, out for
//! delivery, delivered. Forward jumps are legal (a delivery may go straight
//! from scheduled to delivered); moving backwards is not. Cancelled and
//! skipped are reachable from any non-terminal state. Delivered, cancelled,
//! and skipped are terminal, which doubles as the idempotence guard: a second
//! `delivered` transition is rejected before any counter is touched, so a
//! subscription can never be double-counted.
//!
//! A delivery-status write and its subscription-counter increment are two
//! separate store operations. A crash between them leaves a transient
//! inconsistency that is never reconciled; this is an accepted loss window.

use crate::{
    config::policy::DeliveryPolicy,
    core::{lifecycle, notification::notify_best_effort},
    entities::{
        Delivery, delivery,
        enums::{DeliveryStatus, NotificationKind},
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{Set, prelude::*};

impl DeliveryStatus {
    /// Position on the forward-only happy path; terminal side states have no
    /// rank.
    const fn rank(self) -> Option<u8> {
        match self {
            Self::Scheduled => Some(0),
            Self::Preparing => Some(1),
            Self::Ready => Some(2),
            Self::OutForDelivery => Some(3),
            Self::Delivered => Some(4),
            Self::Cancelled | Self::Skipped => None,
        }
    }

    /// Whether this status accepts no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Skipped)
    }

    /// Whether a transition from `self` to `next` is legal.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Cancelled | Self::Skipped => true,
            _ => match (self.rank(), next.rank()) {
                (Some(from), Some(to)) => to > from,
                _ => false,
            },
        }
    }
}

/// Who asked for a cancellation. Customers are subject to the meal-period
/// cutoff; staff are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancellationActor {
    /// The subscribing customer
    Customer,
    /// Kitchen staff or an administrator
    Staff,
}

impl CancellationActor {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Staff => "staff",
        }
    }
}

async fn find_delivery<C>(conn: &C, delivery_id: i64) -> Result<delivery::Model>
where
    C: ConnectionTrait,
{
    Delivery::find_by_id(delivery_id)
        .one(conn)
        .await?
        .ok_or(Error::DeliveryNotFound { id: delivery_id })
}

fn check_transition(current: DeliveryStatus, next: DeliveryStatus) -> Result<()> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(Error::InvalidTransition {
            from: current,
            to: next,
        })
    }
}

/// Advances a delivery along the happy path (preparing, ready, out for
/// delivery, delivered), stamping the matching timestamp and firing the
/// customer notification for the states that have one. Reaching `delivered`
/// also updates the subscription counters.
///
/// Cancellations and skips go through [`cancel_delivery`] and
/// [`skip_delivery`]; asking for them here is a configuration error.
pub async fn update_delivery_status(
    db: &DatabaseConnection,
    policy: &DeliveryPolicy,
    delivery_id: i64,
    new_status: DeliveryStatus,
) -> Result<delivery::Model> {
    if matches!(
        new_status,
        DeliveryStatus::Cancelled | DeliveryStatus::Skipped
    ) {
        return Err(Error::Config {
            message: "Cancellations and skips must go through cancel_delivery/skip_delivery"
                .to_string(),
        });
    }

    let current = find_delivery(db, delivery_id).await?;
    check_transition(current.status, new_status)?;

    let now = Utc::now();
    let user_id = current.user_id;
    let subscription_id = current.subscription_id;

    let mut active: delivery::ActiveModel = current.into();
    active.status = Set(new_status);
    match new_status {
        DeliveryStatus::Ready => active.ready_at = Set(Some(now)),
        DeliveryStatus::OutForDelivery => active.dispatched_at = Set(Some(now)),
        DeliveryStatus::Delivered => active.delivered_at = Set(Some(now)),
        _ => {}
    }
    let updated = active.update(db).await?;

    tracing::info!(delivery_id, status = ?new_status, "delivery status updated");

    match new_status {
        DeliveryStatus::Ready => {
            notify_best_effort(
                db,
                user_id,
                "Your food is ready!",
                "Your meal has been packed and will leave the kitchen shortly.",
                NotificationKind::DeliveryUpdate,
                Some(delivery_id),
            )
            .await;
        }
        DeliveryStatus::OutForDelivery => {
            notify_best_effort(
                db,
                user_id,
                "Your meal is on the way!",
                "Your food has been prepared and is being delivered. Track your delivery in the app.",
                NotificationKind::DeliveryUpdate,
                Some(delivery_id),
            )
            .await;
        }
        DeliveryStatus::Delivered => {
            notify_best_effort(
                db,
                user_id,
                "Delivered. Enjoy your meal!",
                "Your meal has been delivered.",
                NotificationKind::DeliveryUpdate,
                Some(delivery_id),
            )
            .await;
            lifecycle::on_delivery_delivered(db, subscription_id, policy).await?;
        }
        _ => {}
    }

    Ok(updated)
}

/// Cancels one delivery.
///
/// Customer-initiated cancellations are only permitted strictly before the
/// meal period's cutoff time-of-day, evaluated against `requested_at`;
/// at or past the cutoff the call fails with [`Error::CutoffExceeded`] and
/// the delivery is left unchanged. Staff cancellations skip the cutoff.
/// Successful cancellation stamps actor and reason, marks the delivery
/// auto-extended, and grows the subscription quota by one make-up delivery.
pub async fn cancel_delivery(
    db: &DatabaseConnection,
    policy: &DeliveryPolicy,
    delivery_id: i64,
    actor: CancellationActor,
    reason: &str,
    requested_at: DateTime<Utc>,
) -> Result<delivery::Model> {
    let current = find_delivery(db, delivery_id).await?;
    check_transition(current.status, DeliveryStatus::Cancelled)?;

    if actor == CancellationActor::Customer {
        let cutoff = policy.cutoff_for(current.meal_period);
        if requested_at.time() >= cutoff {
            return Err(Error::CutoffExceeded {
                meal_period: current.meal_period,
                cutoff,
            });
        }
    }

    let subscription_id = current.subscription_id;

    let mut active: delivery::ActiveModel = current.into();
    active.status = Set(DeliveryStatus::Cancelled);
    active.cancelled_at = Set(Some(requested_at));
    active.cancelled_by = Set(Some(actor.as_str().to_string()));
    active.cancellation_reason = Set(Some(reason.to_string()));
    active.auto_extended = Set(true);
    let updated = active.update(db).await?;

    tracing::info!(delivery_id, actor = actor.as_str(), "delivery cancelled");

    lifecycle::on_delivery_cancelled_or_skipped(db, subscription_id).await?;

    Ok(updated)
}

/// Skips one delivery on behalf of an approved skip request. No cutoff
/// applies; the reviewer's approval is the gate. Counter effects match
/// [`cancel_delivery`].
pub async fn skip_delivery(
    db: &DatabaseConnection,
    delivery_id: i64,
    reason: &str,
) -> Result<delivery::Model> {
    let current = find_delivery(db, delivery_id).await?;
    check_transition(current.status, DeliveryStatus::Skipped)?;

    let subscription_id = current.subscription_id;

    let mut active: delivery::ActiveModel = current.into();
    active.status = Set(DeliveryStatus::Skipped);
    active.cancelled_at = Set(Some(Utc::now()));
    active.cancelled_by = Set(Some(CancellationActor::Staff.as_str().to_string()));
    active.cancellation_reason = Set(Some(reason.to_string()));
    active.auto_extended = Set(true);
    let updated = active.update(db).await?;

    tracing::info!(delivery_id, "delivery skipped");

    lifecycle::on_delivery_cancelled_or_skipped(db, subscription_id).await?;

    Ok(updated)
}
