//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated straight from the entity definitions via
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without hand-written SQL.

use crate::entities::{
    Delivery, DeliveryAssignment, DeliveryRequest, Kitchen, MenuItem, Notification, Plan,
    Subscription, User,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is
/// set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/foodfleet.sqlite".to_string());

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let user_table = schema.create_table_from_entity(User);
    let kitchen_table = schema.create_table_from_entity(Kitchen);
    let plan_table = schema.create_table_from_entity(Plan);
    let menu_item_table = schema.create_table_from_entity(MenuItem);
    let subscription_table = schema.create_table_from_entity(Subscription);
    let delivery_table = schema.create_table_from_entity(Delivery);
    let request_table = schema.create_table_from_entity(DeliveryRequest);
    let assignment_table = schema.create_table_from_entity(DeliveryAssignment);
    let notification_table = schema.create_table_from_entity(Notification);

    db.execute(builder.build(&user_table)).await?;
    db.execute(builder.build(&kitchen_table)).await?;
    db.execute(builder.build(&plan_table)).await?;
    db.execute(builder.build(&menu_item_table)).await?;
    db.execute(builder.build(&subscription_table)).await?;
    db.execute(builder.build(&delivery_table)).await?;
    db.execute(builder.build(&request_table)).await?;
    db.execute(builder.build(&assignment_table)).await?;
    db.execute(builder.build(&notification_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Query each table to verify it exists
        let _ = User::find().limit(1).all(&db).await?;
        let _ = Kitchen::find().limit(1).all(&db).await?;
        let _ = Plan::find().limit(1).all(&db).await?;
        let _ = MenuItem::find().limit(1).all(&db).await?;
        let _ = Subscription::find().limit(1).all(&db).await?;
        let _ = Delivery::find().limit(1).all(&db).await?;
        let _ = DeliveryRequest::find().limit(1).all(&db).await?;
        let _ = DeliveryAssignment::find().limit(1).all(&db).await?;
        let _ = Notification::find().limit(1).all(&db).await?;

        Ok(())
    }
}
