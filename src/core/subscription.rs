//! Subscription business logic.
//!
//! Purchasing a plan creates the subscription row and its full delivery batch
//! in one database transaction; if generation fails nothing is persisted.

use crate::{
    config::policy::DeliveryPolicy,
    core::{calendar::format_weekday_list, generator, lifecycle},
    entities::{
        Kitchen, Plan, Subscription, User, delivery,
        enums::{DietType, MealPeriod, SubscriptionStatus},
        subscription,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, Weekday};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Everything needed to purchase a plan for a customer.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    /// Subscribing customer
    pub user_id: i64,
    /// Kitchen that will fulfill the deliveries
    pub kitchen_id: i64,
    /// Plan being purchased
    pub plan_id: i64,
    /// Diet preference
    pub diet_type: DietType,
    /// Meal periods, in delivery order
    pub meal_periods: Vec<MealPeriod>,
    /// Weekdays deliveries may land on
    pub delivery_days: Vec<Weekday>,
    /// First calendar date deliveries may land on
    pub start_date: NaiveDate,
}

/// Creates a subscription from a purchased plan and generates its delivery
/// batch, all inside one transaction.
///
/// Counters are seeded from the plan: `total_deliveries` and
/// `remaining_deliveries` start at the plan quota, `completed_deliveries` and
/// `extended_deliveries` at zero, `amount_paid` at the plan price.
pub async fn create_subscription(
    db: &DatabaseConnection,
    policy: &DeliveryPolicy,
    input: NewSubscription,
) -> Result<(subscription::Model, Vec<delivery::Model>)> {
    if input.meal_periods.is_empty() {
        return Err(Error::Config {
            message: "A subscription needs at least one meal period".to_string(),
        });
    }

    let customer = User::find_by_id(input.user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: input.user_id })?;

    Kitchen::find_by_id(input.kitchen_id)
        .one(db)
        .await?
        .ok_or(Error::KitchenNotFound {
            id: input.kitchen_id,
        })?;

    let plan = Plan::find_by_id(input.plan_id)
        .one(db)
        .await?
        .filter(|p| p.is_active)
        .ok_or(Error::PlanNotFound { id: input.plan_id })?;

    let txn = db.begin().await?;

    let sub = subscription::ActiveModel {
        user_id: Set(input.user_id),
        kitchen_id: Set(input.kitchen_id),
        plan_id: Set(input.plan_id),
        diet_type: Set(input.diet_type),
        meal_periods: Set(MealPeriod::format_list(&input.meal_periods)),
        delivery_days: Set(format_weekday_list(&input.delivery_days)),
        start_date: Set(input.start_date),
        total_deliveries: Set(plan.total_deliveries),
        completed_deliveries: Set(0),
        remaining_deliveries: Set(plan.total_deliveries),
        extended_deliveries: Set(0),
        amount_paid: Set(plan.price),
        status: Set(SubscriptionStatus::Active),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let sub = sub.insert(&txn).await?;

    let deliveries = generator::generate_deliveries(&txn, &sub, &customer, policy).await?;

    txn.commit().await?;

    tracing::info!(
        subscription_id = sub.id,
        user_id = sub.user_id,
        plan_id = sub.plan_id,
        "subscription created"
    );

    Ok((sub, deliveries))
}

/// Finds a subscription by ID.
pub async fn get_subscription_by_id(
    db: &DatabaseConnection,
    subscription_id: i64,
) -> Result<Option<subscription::Model>> {
    Subscription::find_by_id(subscription_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists a customer's subscriptions, newest first.
pub async fn get_subscriptions_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<subscription::Model>> {
    Subscription::find()
        .filter(subscription::Column::UserId.eq(user_id))
        .order_by_desc(subscription::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists a kitchen's subscriptions, optionally restricted to one status.
pub async fn get_subscriptions_for_kitchen(
    db: &DatabaseConnection,
    kitchen_id: i64,
    status: Option<SubscriptionStatus>,
) -> Result<Vec<subscription::Model>> {
    let mut query =
        Subscription::find().filter(subscription::Column::KitchenId.eq(kitchen_id));
    if let Some(status) = status {
        query = query.filter(subscription::Column::Status.eq(status));
    }
    query.all(db).await.map_err(Into::into)
}

async fn set_status(
    db: &DatabaseConnection,
    subscription_id: i64,
    from: SubscriptionStatus,
    to: SubscriptionStatus,
) -> Result<subscription::Model> {
    let sub = Subscription::find_by_id(subscription_id)
        .one(db)
        .await?
        .ok_or(Error::SubscriptionNotFound {
            id: subscription_id,
        })?;

    if sub.status != from {
        return Err(Error::Config {
            message: format!(
                "Subscription {subscription_id} is {:?}, expected {from:?}",
                sub.status
            ),
        });
    }

    let mut active: subscription::ActiveModel = sub.into();
    active.status = Set(to);
    active.update(db).await.map_err(Into::into)
}

/// Puts an active subscription on hold. Deliveries stay scheduled; kitchens
/// filter paused subscriptions out of their prep lists.
pub async fn pause_subscription(
    db: &DatabaseConnection,
    subscription_id: i64,
) -> Result<subscription::Model> {
    set_status(
        db,
        subscription_id,
        SubscriptionStatus::Active,
        SubscriptionStatus::Paused,
    )
    .await
}

/// Reactivates a paused subscription.
pub async fn resume_subscription(
    db: &DatabaseConnection,
    subscription_id: i64,
) -> Result<subscription::Model> {
    set_status(
        db,
        subscription_id,
        SubscriptionStatus::Paused,
        SubscriptionStatus::Active,
    )
    .await
}

/// Cancels a subscription and its still-scheduled deliveries. See
/// [`lifecycle::on_subscription_cancelled`] for the exact semantics.
pub async fn cancel_subscription(
    db: &DatabaseConnection,
    subscription_id: i64,
) -> Result<subscription::Model> {
    lifecycle::on_subscription_cancelled(db, subscription_id).await
}
