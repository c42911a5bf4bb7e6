//! Delivery routing business logic.
//!
//! An assignment bundles one delivery boy's drop-offs for one date into a
//! route. Creating it stamps `delivery_boy_id` onto every delivery in the
//! bundle; the route order starts as the given order and can be re-sequenced
//! later.

use crate::{
    entities::{
        Delivery, DeliveryAssignment, User, delivery, delivery_assignment,
        enums::{AssignmentStatus, UserRole},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

fn format_id_list(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a comma-separated ID list as stored in `delivery_ids`/`route_order`.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim().parse::<i64>().map_err(|_| Error::Config {
                message: format!("Invalid delivery ID in route: {s:?}"),
            })
        })
        .collect()
}

/// Creates a route for one delivery boy on one date and stamps the boy onto
/// every bundled delivery, all inside one transaction.
pub async fn create_assignment(
    db: &DatabaseConnection,
    delivery_boy_id: i64,
    kitchen_id: i64,
    date: NaiveDate,
    delivery_ids: Vec<i64>,
) -> Result<delivery_assignment::Model> {
    if delivery_ids.is_empty() {
        return Err(Error::Config {
            message: "A route needs at least one delivery".to_string(),
        });
    }

    let boy = User::find_by_id(delivery_boy_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound {
            id: delivery_boy_id,
        })?;
    if boy.role != UserRole::DeliveryBoy {
        return Err(Error::Config {
            message: format!("User {delivery_boy_id} is not a delivery boy"),
        });
    }

    for delivery_id in &delivery_ids {
        Delivery::find_by_id(*delivery_id)
            .one(db)
            .await?
            .ok_or(Error::DeliveryNotFound { id: *delivery_id })?;
    }

    let txn = db.begin().await?;

    let row = delivery_assignment::ActiveModel {
        delivery_boy_id: Set(delivery_boy_id),
        kitchen_id: Set(kitchen_id),
        date: Set(date),
        delivery_ids: Set(format_id_list(&delivery_ids)),
        route_order: Set(format_id_list(&delivery_ids)),
        status: Set(AssignmentStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let assignment = row.insert(&txn).await?;

    Delivery::update_many()
        .col_expr(
            delivery::Column::DeliveryBoyId,
            Expr::value(Some(delivery_boy_id)),
        )
        .filter(delivery::Column::Id.is_in(delivery_ids))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        assignment_id = assignment.id,
        delivery_boy_id,
        %date,
        "route assigned"
    );

    Ok(assignment)
}

/// Finds an assignment by ID.
pub async fn get_assignment_by_id(
    db: &DatabaseConnection,
    assignment_id: i64,
) -> Result<delivery_assignment::Model> {
    DeliveryAssignment::find_by_id(assignment_id)
        .one(db)
        .await?
        .ok_or(Error::AssignmentNotFound { id: assignment_id })
}

/// Lists a delivery boy's assignments, optionally for one date.
pub async fn get_assignments_for_boy(
    db: &DatabaseConnection,
    delivery_boy_id: i64,
    date: Option<NaiveDate>,
) -> Result<Vec<delivery_assignment::Model>> {
    let mut query = DeliveryAssignment::find()
        .filter(delivery_assignment::Column::DeliveryBoyId.eq(delivery_boy_id))
        .order_by_desc(delivery_assignment::Column::Date);
    if let Some(date) = date {
        query = query.filter(delivery_assignment::Column::Date.eq(date));
    }
    query.all(db).await.map_err(Into::into)
}

/// Lists a kitchen's assignments for one date.
pub async fn get_assignments_for_kitchen(
    db: &DatabaseConnection,
    kitchen_id: i64,
    date: NaiveDate,
) -> Result<Vec<delivery_assignment::Model>> {
    DeliveryAssignment::find()
        .filter(delivery_assignment::Column::KitchenId.eq(kitchen_id))
        .filter(delivery_assignment::Column::Date.eq(date))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Records the delivery boy's last reported position and marks the route
/// in progress if it had not been started yet.
pub async fn update_location(
    db: &DatabaseConnection,
    assignment_id: i64,
    lat: f64,
    lng: f64,
) -> Result<delivery_assignment::Model> {
    let assignment = get_assignment_by_id(db, assignment_id).await?;
    let not_started = assignment.status == AssignmentStatus::Pending;

    let mut active: delivery_assignment::ActiveModel = assignment.into();
    active.current_lat = Set(Some(lat));
    active.current_lng = Set(Some(lng));
    if not_started {
        active.status = Set(AssignmentStatus::InProgress);
    }
    active.update(db).await.map_err(Into::into)
}

/// Re-sequences the route. The new order must be a permutation of the
/// bundled deliveries.
pub async fn reorder_route(
    db: &DatabaseConnection,
    assignment_id: i64,
    new_order: Vec<i64>,
) -> Result<delivery_assignment::Model> {
    let assignment = get_assignment_by_id(db, assignment_id).await?;

    let mut bundled = parse_id_list(&assignment.delivery_ids)?;
    let mut proposed = new_order.clone();
    bundled.sort_unstable();
    proposed.sort_unstable();
    if bundled != proposed {
        return Err(Error::Config {
            message: format!(
                "Route order for assignment {assignment_id} must cover exactly its deliveries"
            ),
        });
    }

    let mut active: delivery_assignment::ActiveModel = assignment.into();
    active.route_order = Set(format_id_list(&new_order));
    active.update(db).await.map_err(Into::into)
}

/// Marks a route finished.
pub async fn complete_assignment(
    db: &DatabaseConnection,
    assignment_id: i64,
) -> Result<delivery_assignment::Model> {
    let assignment = get_assignment_by_id(db, assignment_id).await?;
    let mut active: delivery_assignment::ActiveModel = assignment.into();
    active.status = Set(AssignmentStatus::Completed);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::user::create_user, test_utils::*};

    async fn setup_route(ctx: &TestContext) -> Result<(i64, Vec<i64>)> {
        let boy = create_user(
            &ctx.db,
            "Rider".to_string(),
            UserRole::DeliveryBoy,
            None,
            None,
            Some(ctx.kitchen.id),
        )
        .await?;
        let (_, deliveries) = create_test_subscription(ctx).await?;
        let ids: Vec<i64> = deliveries.iter().take(3).map(|d| d.id).collect();
        Ok((boy.id, ids))
    }

    #[tokio::test]
    async fn test_create_assignment_stamps_deliveries() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (boy_id, ids) = setup_route(&ctx).await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let assignment = create_assignment(&ctx.db, boy_id, ctx.kitchen.id, date, ids.clone())
            .await?;
        assert_eq!(assignment.status, AssignmentStatus::Pending);
        assert_eq!(parse_id_list(&assignment.delivery_ids)?, ids);
        assert_eq!(parse_id_list(&assignment.route_order)?, ids);

        for id in &ids {
            let row = Delivery::find_by_id(*id).one(&ctx.db).await?.unwrap();
            assert_eq!(row.delivery_boy_id, Some(boy_id));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_rejects_non_delivery_boy() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (_, deliveries) = create_test_subscription(&ctx).await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let result = create_assignment(
            &ctx.db,
            ctx.customer.id,
            ctx.kitchen.id,
            date,
            vec![deliveries[0].id],
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_assignment_rejects_unknown_delivery() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (boy_id, _) = setup_route(&ctx).await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let result =
            create_assignment(&ctx.db, boy_id, ctx.kitchen.id, date, vec![9999]).await;
        assert!(matches!(result, Err(Error::DeliveryNotFound { id: 9999 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_location_update_starts_route() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (boy_id, ids) = setup_route(&ctx).await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let assignment =
            create_assignment(&ctx.db, boy_id, ctx.kitchen.id, date, ids).await?;
        let updated = update_location(&ctx.db, assignment.id, 18.51, 73.86).await?;

        assert_eq!(updated.current_lat, Some(18.51));
        assert_eq!(updated.current_lng, Some(73.86));
        assert_eq!(updated.status, AssignmentStatus::InProgress);

        let completed = complete_assignment(&ctx.db, assignment.id).await?;
        assert_eq!(completed.status, AssignmentStatus::Completed);

        Ok(())
    }

    #[tokio::test]
    async fn test_reorder_route_must_be_permutation() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (boy_id, ids) = setup_route(&ctx).await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let assignment =
            create_assignment(&ctx.db, boy_id, ctx.kitchen.id, date, ids.clone()).await?;

        let mut reversed = ids.clone();
        reversed.reverse();
        let reordered = reorder_route(&ctx.db, assignment.id, reversed.clone()).await?;
        assert_eq!(parse_id_list(&reordered.route_order)?, reversed);

        let result = reorder_route(&ctx.db, assignment.id, vec![ids[0]]).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_assignments_by_boy_and_kitchen() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (boy_id, ids) = setup_route(&ctx).await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        create_assignment(&ctx.db, boy_id, ctx.kitchen.id, date, ids).await?;

        let for_boy = get_assignments_for_boy(&ctx.db, boy_id, Some(date)).await?;
        assert_eq!(for_boy.len(), 1);

        let other_day = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(
            get_assignments_for_boy(&ctx.db, boy_id, Some(other_day))
                .await?
                .is_empty()
        );

        let for_kitchen = get_assignments_for_kitchen(&ctx.db, ctx.kitchen.id, date).await?;
        assert_eq!(for_kitchen.len(), 1);

        Ok(())
    }
}
