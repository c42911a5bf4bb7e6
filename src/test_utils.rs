//! Shared test utilities for `FoodFleet`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    config::policy::DeliveryPolicy,
    core::{kitchen, plan, subscription, user},
    entities::{
        self,
        enums::{DietType, MealPeriod, PlanType, SubscriptionStatus, UserRole},
    },
    errors::Result,
};
use chrono::{NaiveDate, Weekday};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// The default delivery-day set used by test subscriptions: every day except
/// the Sunday holiday.
pub const WEEKDAYS_MON_SAT: &[Weekday] = &[
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A ready-to-use test environment: one kitchen, one customer with a full
/// delivery profile, one admin, and one purchasable plan.
pub struct TestContext {
    /// In-memory database with all tables created
    pub db: DatabaseConnection,
    /// Customer with address, location, and allergy notes filled in
    pub customer: entities::user::Model,
    /// Admin account, used as the reviewer in request tests
    pub admin: entities::user::Model,
    /// Active kitchen
    pub kitchen: entities::kitchen::Model,
    /// Active weekly plan with a quota of 6 deliveries
    pub plan: entities::plan::Model,
}

/// Sets up the base records nearly every test needs.
pub async fn setup_base_records() -> Result<TestContext> {
    let db = setup_test_db().await?;

    let kitchen = kitchen::create_kitchen(
        &db,
        "Test Kitchen".to_string(),
        "Pune".to_string(),
        "1 Kitchen Rd".to_string(),
        18.52,
        73.85,
        "555-0100".to_string(),
    )
    .await?;

    let customer = user::create_user(
        &db,
        "Test Customer".to_string(),
        UserRole::Customer,
        Some("customer@example.com".to_string()),
        Some("555-0111".to_string()),
        None,
    )
    .await?;
    let customer = user::update_profile(
        &db,
        customer.id,
        user::UserPatch {
            address: Some("42 Test Lane".to_string()),
            location_lat: Some(18.53),
            location_lng: Some(73.86),
            city: Some("Pune".to_string()),
            allergy_notes: Some("no peanuts".to_string()),
            ..Default::default()
        },
    )
    .await?;

    let admin = user::create_user(
        &db,
        "Test Admin".to_string(),
        UserRole::Admin,
        Some("admin@example.com".to_string()),
        None,
        None,
    )
    .await?;

    let plan = plan::create_plan(
        &db,
        "Weekly Lunch".to_string(),
        PlanType::Weekly,
        DietType::Mixed,
        6,
        699.0,
    )
    .await?;

    Ok(TestContext {
        db,
        customer,
        admin,
        kitchen,
        plan,
    })
}

/// Purchases the context's plan for its customer with sensible defaults:
/// lunch only, Monday through Saturday, starting 2024-01-01 (a Monday).
pub async fn create_test_subscription(
    ctx: &TestContext,
) -> Result<(
    entities::subscription::Model,
    Vec<entities::delivery::Model>,
)> {
    subscription::create_subscription(
        &ctx.db,
        &DeliveryPolicy::default(),
        subscription::NewSubscription {
            user_id: ctx.customer.id,
            kitchen_id: ctx.kitchen.id,
            plan_id: ctx.plan.id,
            diet_type: DietType::Mixed,
            meal_periods: vec![MealPeriod::Lunch],
            delivery_days: WEEKDAYS_MON_SAT.to_vec(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        },
    )
    .await
}

/// Purchases a fresh plan with a custom quota and meal-period set.
/// Use this when a test needs specific counters or cutoff behavior.
pub async fn create_custom_subscription(
    ctx: &TestContext,
    meal_periods: &str,
    delivery_days: &[Weekday],
    total_deliveries: i32,
) -> Result<(
    entities::subscription::Model,
    Vec<entities::delivery::Model>,
)> {
    let custom_plan = plan::create_plan(
        &ctx.db,
        format!("Custom {meal_periods} x{total_deliveries}"),
        PlanType::Weekly,
        DietType::Mixed,
        total_deliveries,
        499.0,
    )
    .await?;

    subscription::create_subscription(
        &ctx.db,
        &DeliveryPolicy::default(),
        subscription::NewSubscription {
            user_id: ctx.customer.id,
            kitchen_id: ctx.kitchen.id,
            plan_id: custom_plan.id,
            diet_type: DietType::Mixed,
            meal_periods: MealPeriod::parse_list(meal_periods)?,
            delivery_days: delivery_days.to_vec(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        },
    )
    .await
}

/// Inserts a bare subscription row without generating any deliveries.
/// Generator tests use this to drive generation by hand.
pub async fn insert_subscription_row(
    db: &DatabaseConnection,
    ctx: &TestContext,
    meal_periods: &str,
    delivery_days: &str,
    start_date: NaiveDate,
    total_deliveries: i32,
) -> Result<entities::subscription::Model> {
    let row = entities::subscription::ActiveModel {
        user_id: Set(ctx.customer.id),
        kitchen_id: Set(ctx.kitchen.id),
        plan_id: Set(ctx.plan.id),
        diet_type: Set(DietType::Mixed),
        meal_periods: Set(meal_periods.to_string()),
        delivery_days: Set(delivery_days.to_string()),
        start_date: Set(start_date),
        total_deliveries: Set(total_deliveries),
        completed_deliveries: Set(0),
        remaining_deliveries: Set(total_deliveries),
        extended_deliveries: Set(0),
        amount_paid: Set(0.0),
        status: Set(SubscriptionStatus::Active),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}
