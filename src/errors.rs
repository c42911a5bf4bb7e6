//! Unified error types for the `FoodFleet` backend.
//!
//! Every fallible operation in the crate returns [`Result`]. All variants are
//! local validation or lookup failures surfaced to the caller; nothing here is
//! retried automatically.

use crate::entities::enums::{DeliveryStatus, MealPeriod};
use chrono::NaiveTime;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration detected before an operation starts (e.g. an
    /// empty delivery-day set). Nothing is persisted when this is returned.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what is misconfigured
        message: String,
    },

    /// Database error from the underlying `SeaORM` layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Referenced user does not exist
    #[error("User not found: {id}")]
    UserNotFound {
        /// The user ID that was looked up
        id: i64,
    },

    /// Referenced kitchen does not exist
    #[error("Kitchen not found: {id}")]
    KitchenNotFound {
        /// The kitchen ID that was looked up
        id: i64,
    },

    /// Referenced plan does not exist or is inactive
    #[error("Plan not found: {id}")]
    PlanNotFound {
        /// The plan ID that was looked up
        id: i64,
    },

    /// Referenced menu item does not exist
    #[error("Menu item not found: {id}")]
    MenuItemNotFound {
        /// The menu item ID that was looked up
        id: i64,
    },

    /// Referenced subscription does not exist
    #[error("Subscription not found: {id}")]
    SubscriptionNotFound {
        /// The subscription ID that was looked up
        id: i64,
    },

    /// Referenced delivery does not exist
    #[error("Delivery not found: {id}")]
    DeliveryNotFound {
        /// The delivery ID that was looked up
        id: i64,
    },

    /// Referenced cancellation/reschedule request does not exist
    #[error("Delivery request not found: {id}")]
    RequestNotFound {
        /// The request ID that was looked up
        id: i64,
    },

    /// Referenced delivery assignment does not exist
    #[error("Delivery assignment not found: {id}")]
    AssignmentNotFound {
        /// The assignment ID that was looked up
        id: i64,
    },

    /// Attempted delivery status change not reachable from the current state
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Status the delivery is currently in
        from: DeliveryStatus,
        /// Status the caller asked for
        to: DeliveryStatus,
    },

    /// Customer attempted a cancellation at or past the meal-period cutoff
    #[error("Cancellation cutoff exceeded for {meal_period:?} (cutoff {cutoff})")]
    CutoffExceeded {
        /// Meal period whose cutoff applies
        meal_period: MealPeriod,
        /// The cutoff time-of-day that was missed
        cutoff: NaiveTime,
    },

    /// A cancellation/reschedule request was reviewed twice
    #[error("Request {id} has already been reviewed")]
    RequestAlreadyReviewed {
        /// The request ID
        id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
