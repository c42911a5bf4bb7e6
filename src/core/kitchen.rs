//! Kitchen business logic.

use crate::{
    entities::{Kitchen, kitchen},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// Registers a kitchen.
pub async fn create_kitchen(
    db: &DatabaseConnection,
    name: String,
    city: String,
    address: String,
    location_lat: f64,
    location_lng: f64,
    contact_phone: String,
) -> Result<kitchen::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Kitchen name cannot be empty".to_string(),
        });
    }

    let row = kitchen::ActiveModel {
        name: Set(name.trim().to_string()),
        city: Set(city),
        address: Set(address),
        location_lat: Set(location_lat),
        location_lng: Set(location_lng),
        contact_phone: Set(contact_phone),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Finds a kitchen by ID.
pub async fn get_kitchen_by_id(
    db: &DatabaseConnection,
    kitchen_id: i64,
) -> Result<kitchen::Model> {
    Kitchen::find_by_id(kitchen_id)
        .one(db)
        .await?
        .ok_or(Error::KitchenNotFound { id: kitchen_id })
}

/// Lists active kitchens, optionally restricted to one city.
pub async fn get_kitchens(
    db: &DatabaseConnection,
    city: Option<&str>,
) -> Result<Vec<kitchen::Model>> {
    let mut query = Kitchen::find()
        .filter(kitchen::Column::IsActive.eq(true))
        .order_by_asc(kitchen::Column::Name);
    if let Some(city) = city {
        query = query.filter(kitchen::Column::City.eq(city));
    }
    query.all(db).await.map_err(Into::into)
}

/// Lists the distinct cities that have an active kitchen.
pub async fn get_cities(db: &DatabaseConnection) -> Result<Vec<String>> {
    let rows: Vec<String> = Kitchen::find()
        .filter(kitchen::Column::IsActive.eq(true))
        .select_only()
        .column(kitchen::Column::City)
        .distinct()
        .order_by_asc(kitchen::Column::City)
        .into_tuple()
        .all(db)
        .await?;
    Ok(rows)
}

/// The legally updatable kitchen fields.
#[derive(Debug, Clone, Default)]
pub struct KitchenPatch {
    /// New kitchen name
    pub name: Option<String>,
    /// New street address
    pub address: Option<String>,
    /// New contact phone
    pub contact_phone: Option<String>,
    /// Activate or deactivate the kitchen
    pub is_active: Option<bool>,
}

/// Applies a kitchen patch.
pub async fn update_kitchen(
    db: &DatabaseConnection,
    kitchen_id: i64,
    patch: KitchenPatch,
) -> Result<kitchen::Model> {
    let kitchen = get_kitchen_by_id(db, kitchen_id).await?;

    let mut active: kitchen::ActiveModel = kitchen.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(address) = patch.address {
        active.address = Set(address);
    }
    if let Some(phone) = patch.contact_phone {
        active.contact_phone = Set(phone);
    }
    if let Some(is_active) = patch.is_active {
        active.is_active = Set(is_active);
    }

    active.update(db).await.map_err(Into::into)
}
