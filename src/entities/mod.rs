//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod delivery;
pub mod delivery_assignment;
pub mod delivery_request;
pub mod enums;
pub mod kitchen;
pub mod menu_item;
pub mod notification;
pub mod plan;
pub mod subscription;
pub mod user;

// Re-export specific types to avoid conflicts
pub use delivery::{Column as DeliveryColumn, Entity as Delivery, Model as DeliveryModel};
pub use delivery_assignment::{
    Column as DeliveryAssignmentColumn, Entity as DeliveryAssignment,
    Model as DeliveryAssignmentModel,
};
pub use delivery_request::{
    Column as DeliveryRequestColumn, Entity as DeliveryRequest, Model as DeliveryRequestModel,
};
pub use kitchen::{Column as KitchenColumn, Entity as Kitchen, Model as KitchenModel};
pub use menu_item::{Column as MenuItemColumn, Entity as MenuItem, Model as MenuItemModel};
pub use notification::{
    Column as NotificationColumn, Entity as Notification, Model as NotificationModel,
};
pub use plan::{Column as PlanColumn, Entity as Plan, Model as PlanModel};
pub use subscription::{
    Column as SubscriptionColumn, Entity as Subscription, Model as SubscriptionModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
