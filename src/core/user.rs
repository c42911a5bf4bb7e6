//! User business logic.
//!
//! Account creation and profile reads/edits. Profile edits go through a typed
//! [`UserPatch`] enumerating exactly the fields that may change, instead of
//! merging arbitrary key/value maps into the stored row.

use crate::{
    entities::{User, enums::UserRole, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};

/// Creates a user account.
pub async fn create_user(
    db: &DatabaseConnection,
    name: String,
    role: UserRole,
    email: Option<String>,
    phone: Option<String>,
    kitchen_id: Option<i64>,
) -> Result<user::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "User name cannot be empty".to_string(),
        });
    }

    let row = user::ActiveModel {
        name: Set(name.trim().to_string()),
        email: Set(email),
        phone: Set(phone),
        role: Set(role),
        kitchen_id: Set(kitchen_id),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Reads one user's profile. This is the snapshot source the delivery
/// generator reads once per subscription; it is never live-joined afterwards.
pub async fn get_profile(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::UserNotFound { id: user_id })
}

/// Lists users, optionally filtered by role and kitchen.
pub async fn get_users(
    db: &DatabaseConnection,
    role: Option<UserRole>,
    kitchen_id: Option<i64>,
) -> Result<Vec<user::Model>> {
    let mut query = User::find().filter(user::Column::IsActive.eq(true));
    if let Some(role) = role {
        query = query.filter(user::Column::Role.eq(role));
    }
    if let Some(kitchen_id) = kitchen_id {
        query = query.filter(user::Column::KitchenId.eq(kitchen_id));
    }
    query.all(db).await.map_err(Into::into)
}

/// The legally updatable profile fields. Anything not listed here cannot be
/// changed through a patch.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// New display name
    pub name: Option<String>,
    /// New phone number
    pub phone: Option<String>,
    /// New delivery address
    pub address: Option<String>,
    /// New delivery latitude
    pub location_lat: Option<f64>,
    /// New delivery longitude
    pub location_lng: Option<f64>,
    /// New city
    pub city: Option<String>,
    /// New allergy notes
    pub allergy_notes: Option<String>,
}

/// Applies a profile patch. Already-generated deliveries keep their snapshots;
/// only future generations see the new values.
pub async fn update_profile(
    db: &DatabaseConnection,
    user_id: i64,
    patch: UserPatch,
) -> Result<user::Model> {
    let user = get_profile(db, user_id).await?;

    let mut active: user::ActiveModel = user.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(phone) = patch.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = patch.address {
        active.address = Set(Some(address));
    }
    if let Some(lat) = patch.location_lat {
        active.location_lat = Set(Some(lat));
    }
    if let Some(lng) = patch.location_lng {
        active.location_lng = Set(Some(lng));
    }
    if let Some(city) = patch.city {
        active.city = Set(Some(city));
    }
    if let Some(notes) = patch.allergy_notes {
        active.allergy_notes = Set(Some(notes));
    }

    active.update(db).await.map_err(Into::into)
}

/// Soft-deletes a user account.
pub async fn deactivate_user(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    let user = get_profile(db, user_id).await?;
    let mut active: user::ActiveModel = user.into();
    active.is_active = Set(false);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_user_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;

        let result =
            create_user(&db, "   ".to_string(), UserRole::Customer, None, None, None).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_profile_patch_only_touches_given_fields() -> Result<()> {
        let ctx = setup_base_records().await?;

        let patched = update_profile(
            &ctx.db,
            ctx.customer.id,
            UserPatch {
                address: Some("9 New Lane".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(patched.address.as_deref(), Some("9 New Lane"));
        // Untouched fields survive
        assert_eq!(patched.name, ctx.customer.name);
        assert_eq!(patched.allergy_notes, ctx.customer.allergy_notes);

        Ok(())
    }

    #[tokio::test]
    async fn test_profile_edit_does_not_rewrite_snapshots() -> Result<()> {
        let ctx = setup_base_records().await?;
        let (_, deliveries) = create_test_subscription(&ctx).await?;
        let before = deliveries[0].address.clone();

        update_profile(
            &ctx.db,
            ctx.customer.id,
            UserPatch {
                address: Some("moved away".to_string()),
                ..Default::default()
            },
        )
        .await?;

        let row = crate::entities::Delivery::find_by_id(deliveries[0].id)
            .one(&ctx.db)
            .await?
            .unwrap();
        assert_eq!(row.address, before);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_filters_role_and_kitchen() -> Result<()> {
        let ctx = setup_base_records().await?;
        create_user(
            &ctx.db,
            "Rider One".to_string(),
            UserRole::DeliveryBoy,
            None,
            Some("555-0100".to_string()),
            Some(ctx.kitchen.id),
        )
        .await?;

        let boys = get_users(&ctx.db, Some(UserRole::DeliveryBoy), Some(ctx.kitchen.id)).await?;
        assert_eq!(boys.len(), 1);
        assert_eq!(boys[0].name, "Rider One");

        let customers = get_users(&ctx.db, Some(UserRole::Customer), None).await?;
        assert_eq!(customers.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_deactivated_user_hidden_from_listing() -> Result<()> {
        let ctx = setup_base_records().await?;

        deactivate_user(&ctx.db, ctx.customer.id).await?;
        let customers = get_users(&ctx.db, Some(UserRole::Customer), None).await?;
        assert!(customers.is_empty());

        Ok(())
    }
}
