//! Dashboard reporting.
//!
//! Read-only aggregates for the kitchen and admin dashboards. Everything here
//! is computed with count queries; no rows are mutated.

use crate::{
    entities::{
        Delivery, Kitchen, Subscription, User, delivery,
        enums::{DeliveryStatus, SubscriptionStatus, UserRole},
        kitchen, subscription, user,
    },
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{PaginatorTrait, prelude::*};

/// One day of a kitchen's delivery workload, bucketed by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KitchenDashboard {
    /// Deliveries due today in total
    pub total_today: u64,
    /// Not yet started
    pub scheduled: u64,
    /// Being cooked
    pub preparing: u64,
    /// Packed and waiting for pickup
    pub ready: u64,
    /// On the road
    pub out_for_delivery: u64,
    /// Handed to the customer
    pub delivered: u64,
    /// Cancelled or skipped
    pub cancelled: u64,
    /// Subscriptions currently active at this kitchen
    pub active_subscriptions: u64,
}

async fn count_status(
    db: &DatabaseConnection,
    kitchen_id: i64,
    date: NaiveDate,
    statuses: &[DeliveryStatus],
) -> Result<u64> {
    Delivery::find()
        .filter(delivery::Column::KitchenId.eq(kitchen_id))
        .filter(delivery::Column::DeliveryDate.eq(date))
        .filter(delivery::Column::Status.is_in(statuses.iter().copied()))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Builds a kitchen's dashboard for one date.
pub async fn kitchen_dashboard(
    db: &DatabaseConnection,
    kitchen_id: i64,
    date: NaiveDate,
) -> Result<KitchenDashboard> {
    let total_today = Delivery::find()
        .filter(delivery::Column::KitchenId.eq(kitchen_id))
        .filter(delivery::Column::DeliveryDate.eq(date))
        .count(db)
        .await?;

    let scheduled = count_status(db, kitchen_id, date, &[DeliveryStatus::Scheduled]).await?;
    let preparing = count_status(db, kitchen_id, date, &[DeliveryStatus::Preparing]).await?;
    let ready = count_status(db, kitchen_id, date, &[DeliveryStatus::Ready]).await?;
    let out_for_delivery =
        count_status(db, kitchen_id, date, &[DeliveryStatus::OutForDelivery]).await?;
    let delivered = count_status(db, kitchen_id, date, &[DeliveryStatus::Delivered]).await?;
    let cancelled = count_status(
        db,
        kitchen_id,
        date,
        &[DeliveryStatus::Cancelled, DeliveryStatus::Skipped],
    )
    .await?;

    let active_subscriptions = Subscription::find()
        .filter(subscription::Column::KitchenId.eq(kitchen_id))
        .filter(subscription::Column::Status.eq(SubscriptionStatus::Active))
        .count(db)
        .await?;

    Ok(KitchenDashboard {
        total_today,
        scheduled,
        preparing,
        ready,
        out_for_delivery,
        delivered,
        cancelled,
        active_subscriptions,
    })
}

/// Fleet-wide totals for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminDashboard {
    /// Active kitchens
    pub kitchens: u64,
    /// Active customer accounts
    pub customers: u64,
    /// Active delivery boy accounts
    pub delivery_boys: u64,
    /// Active subscriptions across all kitchens
    pub active_subscriptions: u64,
    /// Deliveries due today across all kitchens
    pub deliveries_today: u64,
}

/// Builds the admin dashboard for one date.
pub async fn admin_dashboard(db: &DatabaseConnection, date: NaiveDate) -> Result<AdminDashboard> {
    let kitchens = Kitchen::find()
        .filter(kitchen::Column::IsActive.eq(true))
        .count(db)
        .await?;

    let customers = User::find()
        .filter(user::Column::Role.eq(UserRole::Customer))
        .filter(user::Column::IsActive.eq(true))
        .count(db)
        .await?;

    let delivery_boys = User::find()
        .filter(user::Column::Role.eq(UserRole::DeliveryBoy))
        .filter(user::Column::IsActive.eq(true))
        .count(db)
        .await?;

    let active_subscriptions = Subscription::find()
        .filter(subscription::Column::Status.eq(SubscriptionStatus::Active))
        .count(db)
        .await?;

    let deliveries_today = Delivery::find()
        .filter(delivery::Column::DeliveryDate.eq(date))
        .count(db)
        .await?;

    Ok(AdminDashboard {
        kitchens,
        customers,
        delivery_boys,
        active_subscriptions,
        deliveries_today,
    })
}
