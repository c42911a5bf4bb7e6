//! Core business logic - framework-agnostic operations over the entities.

/// Delivery boy routing and live location updates
pub mod assignment;
/// The delivery calendar walker: which dates deliveries may land on
pub mod calendar;
/// Batch delivery generation from a new subscription
pub mod generator;
/// Kitchen registry
pub mod kitchen;
/// Subscription counter maintenance and renewal reminders
pub mod lifecycle;
/// Kitchen menu calendar
pub mod menu;
/// Best-effort user notifications
pub mod notification;
/// Plan catalog
pub mod plan;
/// Kitchen and admin dashboards
pub mod report;
/// Customer cancellation and reschedule request workflow
pub mod request;
/// The delivery status state machine
pub mod status;
/// Subscription purchase and lifecycle
pub mod subscription;
/// User accounts and profiles
pub mod user;
