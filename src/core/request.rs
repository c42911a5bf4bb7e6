//! Cancellation/reschedule request workflow.
//!
//! A secondary approval state machine: customers file requests against one
//! delivery, staff approve or reject them. Only approval has side effects.
//! Approving a skip request skips the target delivery with the usual
//! auto-extension; approving a reschedule request only records the review,
//! because picking the make-up date is a manual step. Multiple pending
//! requests against the same delivery are not deduplicated.

use crate::{
    core::status::skip_delivery,
    entities::{
        Delivery, DeliveryRequest, delivery_request,
        enums::{RequestStatus, RequestType},
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Files a skip or reschedule request against one delivery.
///
/// The target delivery must exist and still be in a non-terminal state;
/// there is nothing to skip or move once it has resolved.
pub async fn create_request(
    db: &DatabaseConnection,
    delivery_id: i64,
    user_id: i64,
    request_type: RequestType,
    requested_date: Option<NaiveDate>,
    time_window: Option<String>,
    reason: String,
) -> Result<delivery_request::Model> {
    let delivery = Delivery::find_by_id(delivery_id)
        .one(db)
        .await?
        .ok_or(Error::DeliveryNotFound { id: delivery_id })?;

    if delivery.status.is_terminal() {
        return Err(Error::InvalidTransition {
            from: delivery.status,
            to: crate::entities::enums::DeliveryStatus::Skipped,
        });
    }

    let row = delivery_request::ActiveModel {
        delivery_id: Set(delivery_id),
        user_id: Set(user_id),
        request_type: Set(request_type),
        original_date: Set(delivery.delivery_date),
        requested_date: Set(requested_date),
        time_window: Set(time_window),
        reason: Set(reason),
        status: Set(RequestStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

async fn find_pending_request(
    db: &DatabaseConnection,
    request_id: i64,
) -> Result<delivery_request::Model> {
    let request = DeliveryRequest::find_by_id(request_id)
        .one(db)
        .await?
        .ok_or(Error::RequestNotFound { id: request_id })?;

    if request.status != RequestStatus::Pending {
        return Err(Error::RequestAlreadyReviewed { id: request_id });
    }

    Ok(request)
}

/// Approves a pending request.
///
/// For a skip request the target delivery is transitioned to `skipped` and the
/// subscription gets its make-up slot. For a reschedule request only the
/// review is recorded; assigning the new date is left to the reviewer.
pub async fn approve_request(
    db: &DatabaseConnection,
    request_id: i64,
    reviewer_id: i64,
) -> Result<delivery_request::Model> {
    let request = find_pending_request(db, request_id).await?;

    if request.request_type == RequestType::Skip {
        skip_delivery(db, request.delivery_id, &request.reason).await?;
    }

    let mut active: delivery_request::ActiveModel = request.into();
    active.status = Set(RequestStatus::Approved);
    active.reviewed_by = Set(Some(reviewer_id));
    active.reviewed_at = Set(Some(chrono::Utc::now()));
    let updated = active.update(db).await?;

    tracing::info!(request_id, reviewer_id, "delivery request approved");

    Ok(updated)
}

/// Rejects a pending request. The target delivery is left unchanged.
pub async fn reject_request(
    db: &DatabaseConnection,
    request_id: i64,
    reviewer_id: i64,
) -> Result<delivery_request::Model> {
    let request = find_pending_request(db, request_id).await?;

    let mut active: delivery_request::ActiveModel = request.into();
    active.status = Set(RequestStatus::Rejected);
    active.reviewed_by = Set(Some(reviewer_id));
    active.reviewed_at = Set(Some(chrono::Utc::now()));
    let updated = active.update(db).await?;

    tracing::info!(request_id, reviewer_id, "delivery request rejected");

    Ok(updated)
}

/// Lists requests awaiting review, oldest first.
pub async fn get_pending_requests(
    db: &DatabaseConnection,
) -> Result<Vec<delivery_request::Model>> {
    DeliveryRequest::find()
        .filter(delivery_request::Column::Status.eq(RequestStatus::Pending))
        .order_by_asc(delivery_request::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
