//! Delivery generation - expands a subscription into its delivery batch.
//!
//! Generation happens once, synchronously, inside the subscription-creation
//! transaction. The customer's address, location, and allergy notes are
//! snapshotted onto every row so later profile edits do not retroactively
//! change already-generated deliveries.

use crate::{
    config::policy::DeliveryPolicy,
    core::calendar::{DeliveryCalendar, parse_weekday_list},
    entities::{
        delivery,
        enums::{DeliveryStatus, MealPeriod},
        subscription, user,
    },
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};

/// Expands one subscription into its full initial batch of deliveries.
///
/// Walks the delivery calendar from the subscription's start date and creates
/// one delivery per meal period on each valid date. The logical day counter
/// starts at 1 and increments once per date, never per meal period; skipped
/// (holiday or disallowed-weekday) dates consume neither a delivery nor a day
/// number. Exactly `total_deliveries * meal_periods.len()` rows come out.
///
/// Runs on any [`ConnectionTrait`] so the caller can wrap it in a transaction;
/// validation failures happen before the first insert, and a transaction
/// rollback discards any partial batch.
pub async fn generate_deliveries<C>(
    conn: &C,
    subscription: &subscription::Model,
    customer: &user::Model,
    policy: &DeliveryPolicy,
) -> Result<Vec<delivery::Model>>
where
    C: ConnectionTrait,
{
    let meal_periods = MealPeriod::parse_list(&subscription.meal_periods)?;
    if meal_periods.is_empty() {
        return Err(Error::Config {
            message: "Subscription has no meal periods".to_string(),
        });
    }

    let allowed_days = parse_weekday_list(&subscription.delivery_days)?;
    let calendar = DeliveryCalendar::new(
        subscription.start_date,
        &allowed_days,
        policy.holiday_weekday,
    )?;

    let total_days = usize::try_from(subscription.total_deliveries).map_err(|_| Error::Config {
        message: format!(
            "Subscription has a negative delivery quota: {}",
            subscription.total_deliveries
        ),
    })?;

    let now = chrono::Utc::now();
    let mut deliveries = Vec::with_capacity(total_days * meal_periods.len());

    for (index, date) in calendar.take(total_days).enumerate() {
        let day_number = i32::try_from(index).unwrap_or(i32::MAX - 1) + 1;

        for meal_period in &meal_periods {
            let row = delivery::ActiveModel {
                subscription_id: Set(subscription.id),
                user_id: Set(subscription.user_id),
                kitchen_id: Set(subscription.kitchen_id),
                delivery_boy_id: Set(None),
                delivery_date: Set(date),
                day_number: Set(day_number),
                meal_period: Set(*meal_period),
                status: Set(DeliveryStatus::Scheduled),
                address: Set(customer.address.clone().unwrap_or_default()),
                location_lat: Set(customer.location_lat.unwrap_or(0.0)),
                location_lng: Set(customer.location_lng.unwrap_or(0.0)),
                allergy_notes: Set(customer.allergy_notes.clone()),
                auto_extended: Set(false),
                created_at: Set(now),
                ..Default::default()
            };
            deliveries.push(row.insert(conn).await?);
        }
    }

    tracing::info!(
        subscription_id = subscription.id,
        count = deliveries.len(),
        "generated delivery batch"
    );

    Ok(deliveries)
}
