//! String-valued active enums shared across entities.
//!
//! Each enum maps to a plain text column so the stored values stay readable
//! in the database ("breakfast", "out_for_delivery", ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Role attached to every user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum UserRole {
    /// Full administrative access
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Manages customers and subscriptions
    #[sea_orm(string_value = "sales_manager")]
    SalesManager,
    /// Prepares meals at a kitchen
    #[sea_orm(string_value = "kitchen_staff")]
    KitchenStaff,
    /// Delivers meals for a kitchen
    #[sea_orm(string_value = "delivery_boy")]
    DeliveryBoy,
    /// Subscribing customer
    #[sea_orm(string_value = "customer")]
    Customer,
}

/// Meal period a delivery or menu item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MealPeriod {
    /// Morning delivery
    #[sea_orm(string_value = "breakfast")]
    Breakfast,
    /// Midday delivery
    #[sea_orm(string_value = "lunch")]
    Lunch,
    /// Evening delivery
    #[sea_orm(string_value = "dinner")]
    Dinner,
}

impl MealPeriod {
    /// Stored column value for this meal period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Parses a single stored value ("breakfast", "lunch", "dinner").
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim() {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            other => Err(Error::Config {
                message: format!("Unknown meal period: {other}"),
            }),
        }
    }

    /// Parses a comma-separated list, preserving order ("breakfast,dinner").
    pub fn parse_list(csv: &str) -> Result<Vec<Self>> {
        csv.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    /// Joins meal periods back into the comma-separated column format.
    #[must_use]
    pub fn format_list(periods: &[Self]) -> String {
        periods
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Diet preference for plans, subscriptions, and menu items
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum DietType {
    /// Strictly vegetarian meals
    #[sea_orm(string_value = "pure_veg")]
    PureVeg,
    /// Vegetarian and non-vegetarian mix
    #[sea_orm(string_value = "mixed")]
    Mixed,
    /// Non-vegetarian meals
    #[sea_orm(string_value = "non_veg")]
    NonVeg,
}

/// Cadence of a purchasable plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PlanType {
    /// One week of deliveries
    #[sea_orm(string_value = "weekly")]
    Weekly,
    /// One month of deliveries
    #[sea_orm(string_value = "monthly")]
    Monthly,
}

/// Subscription lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum SubscriptionStatus {
    /// Deliveries are being fulfilled
    #[sea_orm(string_value = "active")]
    Active,
    /// Temporarily on hold at the customer's request
    #[sea_orm(string_value = "paused")]
    Paused,
    /// All paid deliveries have been completed
    #[sea_orm(string_value = "expired")]
    Expired,
    /// Terminated before completion
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Status of a single delivery.
///
/// The happy path is strictly forward: scheduled, preparing, ready,
/// out for delivery, delivered. Cancelled and skipped are reachable from any
/// non-terminal state. Transition rules live in [`crate::core::status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum DeliveryStatus {
    /// Generated and waiting for the kitchen
    #[sea_orm(string_value = "scheduled")]
    Scheduled,
    /// Kitchen is preparing the meal
    #[sea_orm(string_value = "preparing")]
    Preparing,
    /// Meal packed and ready for pickup
    #[sea_orm(string_value = "ready")]
    Ready,
    /// Handed to a delivery boy
    #[sea_orm(string_value = "out_for_delivery")]
    OutForDelivery,
    /// Delivered to the customer (terminal)
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Cancelled before delivery (terminal)
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    /// Skipped via an approved request (terminal)
    #[sea_orm(string_value = "skipped")]
    Skipped,
}

/// Kind of customer-initiated delivery request
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RequestType {
    /// Skip the delivery entirely; a make-up slot is added to the plan
    #[sea_orm(string_value = "skip")]
    Skip,
    /// Move the delivery to another date/time (re-slotting is manual)
    #[sea_orm(string_value = "reschedule")]
    Reschedule,
}

/// Review status of a delivery request
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum RequestStatus {
    /// Awaiting staff review
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved; side effects applied (terminal)
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Rejected; delivery untouched (terminal)
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Progress of a delivery boy's daily route
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum AssignmentStatus {
    /// Route created but not started
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Delivery boy is on the route
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// All stops resolved
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Category of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum NotificationKind {
    /// Status change on a specific delivery
    #[sea_orm(string_value = "delivery_update")]
    DeliveryUpdate,
    /// Subscription-level event (renewal reminder, cancellation)
    #[sea_orm(string_value = "subscription_update")]
    SubscriptionUpdate,
    /// Anything else
    #[sea_orm(string_value = "general")]
    General,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_meal_period_list_round_trip() {
        let periods = vec![MealPeriod::Breakfast, MealPeriod::Dinner];
        let csv = MealPeriod::format_list(&periods);
        assert_eq!(csv, "breakfast,dinner");
        assert_eq!(MealPeriod::parse_list(&csv).unwrap(), periods);
    }

    #[test]
    fn test_meal_period_list_preserves_order() {
        let parsed = MealPeriod::parse_list("dinner,breakfast,lunch").unwrap();
        assert_eq!(
            parsed,
            vec![MealPeriod::Dinner, MealPeriod::Breakfast, MealPeriod::Lunch]
        );
    }

    #[test]
    fn test_meal_period_parse_rejects_unknown() {
        let result = MealPeriod::parse_list("breakfast,brunch");
        assert!(result.is_err());
    }

    #[test]
    fn test_meal_period_parse_empty_csv() {
        let parsed = MealPeriod::parse_list("").unwrap();
        assert!(parsed.is_empty());
    }
}
