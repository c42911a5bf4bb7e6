//! Plan catalog business logic.

use crate::{
    entities::{
        Plan,
        enums::{DietType, PlanType},
        plan,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Creates a purchasable plan.
pub async fn create_plan(
    db: &DatabaseConnection,
    name: String,
    plan_type: PlanType,
    diet_type: DietType,
    total_deliveries: i32,
    price: f64,
) -> Result<plan::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Plan name cannot be empty".to_string(),
        });
    }
    if total_deliveries <= 0 {
        return Err(Error::Config {
            message: format!("Plan delivery quota must be positive, got {total_deliveries}"),
        });
    }
    if price < 0.0 {
        return Err(Error::Config {
            message: format!("Plan price cannot be negative, got {price}"),
        });
    }

    let row = plan::ActiveModel {
        name: Set(name.trim().to_string()),
        plan_type: Set(plan_type),
        diet_type: Set(diet_type),
        total_deliveries: Set(total_deliveries),
        price: Set(price),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Finds a plan by ID.
pub async fn get_plan_by_id(db: &DatabaseConnection, plan_id: i64) -> Result<plan::Model> {
    Plan::find_by_id(plan_id)
        .one(db)
        .await?
        .ok_or(Error::PlanNotFound { id: plan_id })
}

/// Lists purchasable plans, optionally filtered by diet type.
pub async fn get_active_plans(
    db: &DatabaseConnection,
    diet_type: Option<DietType>,
) -> Result<Vec<plan::Model>> {
    let mut query = Plan::find()
        .filter(plan::Column::IsActive.eq(true))
        .order_by_asc(plan::Column::Name);
    if let Some(diet) = diet_type {
        query = query.filter(plan::Column::DietType.eq(diet));
    }
    query.all(db).await.map_err(Into::into)
}

/// Retires a plan so it can no longer be purchased. Existing subscriptions
/// keep running.
pub async fn retire_plan(db: &DatabaseConnection, plan_id: i64) -> Result<plan::Model> {
    let plan = get_plan_by_id(db, plan_id).await?;
    let mut active: plan::ActiveModel = plan.into();
    active.is_active = Set(false);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_plan_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let empty_name = create_plan(
            &db,
            " ".to_string(),
            PlanType::Weekly,
            DietType::Mixed,
            6,
            499.0,
        )
        .await;
        assert!(matches!(empty_name, Err(Error::Config { .. })));

        let zero_quota = create_plan(
            &db,
            "Weekly".to_string(),
            PlanType::Weekly,
            DietType::Mixed,
            0,
            499.0,
        )
        .await;
        assert!(matches!(zero_quota, Err(Error::Config { .. })));

        let negative_price = create_plan(
            &db,
            "Weekly".to_string(),
            PlanType::Weekly,
            DietType::Mixed,
            6,
            -1.0,
        )
        .await;
        assert!(matches!(negative_price, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_retire_plans() -> Result<()> {
        let db = setup_test_db().await?;

        let weekly = create_plan(
            &db,
            "Weekly Veg".to_string(),
            PlanType::Weekly,
            DietType::PureVeg,
            6,
            699.0,
        )
        .await?;
        create_plan(
            &db,
            "Monthly Mixed".to_string(),
            PlanType::Monthly,
            DietType::Mixed,
            24,
            2499.0,
        )
        .await?;

        let veg_only = get_active_plans(&db, Some(DietType::PureVeg)).await?;
        assert_eq!(veg_only.len(), 1);
        assert_eq!(veg_only[0].total_deliveries, 6);

        retire_plan(&db, weekly.id).await?;
        let remaining = get_active_plans(&db, None).await?;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Monthly Mixed");

        Ok(())
    }
}
