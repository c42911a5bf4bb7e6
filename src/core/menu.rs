//! Menu catalog business logic.
//!
//! Menu items live on a per-kitchen calendar: one row per dish per date per
//! meal period, so the daily prep list is a plain equality filter.

use crate::{
    entities::{
        MenuItem,
        enums::{DietType, MealPeriod},
        menu_item,
    },
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Nutrition facts for a dish.
#[derive(Debug, Clone, Copy, Default)]
pub struct NutritionFacts {
    /// Calories per serving
    pub calories: i32,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

/// Publishes a dish on a kitchen's menu calendar.
#[allow(clippy::too_many_arguments)]
pub async fn create_menu_item(
    db: &DatabaseConnection,
    kitchen_id: i64,
    name: String,
    description: String,
    meal_period: MealPeriod,
    diet_type: DietType,
    nutrition: NutritionFacts,
    menu_date: NaiveDate,
    image_url: Option<String>,
) -> Result<menu_item::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Menu item name cannot be empty".to_string(),
        });
    }

    let row = menu_item::ActiveModel {
        kitchen_id: Set(kitchen_id),
        name: Set(name.trim().to_string()),
        description: Set(description),
        meal_period: Set(meal_period),
        diet_type: Set(diet_type),
        calories: Set(nutrition.calories),
        protein: Set(nutrition.protein),
        carbs: Set(nutrition.carbs),
        fat: Set(nutrition.fat),
        image_url: Set(image_url),
        menu_date: Set(menu_date),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    row.insert(db).await.map_err(Into::into)
}

/// Lists a kitchen's active menu for one date, optionally filtered by diet.
pub async fn get_menu_for_date(
    db: &DatabaseConnection,
    kitchen_id: i64,
    date: NaiveDate,
    diet_type: Option<DietType>,
) -> Result<Vec<menu_item::Model>> {
    let mut query = MenuItem::find()
        .filter(menu_item::Column::KitchenId.eq(kitchen_id))
        .filter(menu_item::Column::MenuDate.eq(date))
        .filter(menu_item::Column::IsActive.eq(true))
        .order_by_asc(menu_item::Column::Name);
    if let Some(diet) = diet_type {
        query = query.filter(menu_item::Column::DietType.eq(diet));
    }
    query.all(db).await.map_err(Into::into)
}

/// Lists a kitchen's active menu over a date range (inclusive).
pub async fn get_menu_for_range(
    db: &DatabaseConnection,
    kitchen_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<menu_item::Model>> {
    MenuItem::find()
        .filter(menu_item::Column::KitchenId.eq(kitchen_id))
        .filter(menu_item::Column::MenuDate.gte(from))
        .filter(menu_item::Column::MenuDate.lte(to))
        .filter(menu_item::Column::IsActive.eq(true))
        .order_by_asc(menu_item::Column::MenuDate)
        .all(db)
        .await
        .map_err(Into::into)
}

/// The legally updatable menu item fields.
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    /// New dish name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New nutrition facts
    pub nutrition: Option<NutritionFacts>,
    /// New image URL
    pub image_url: Option<String>,
}

/// Applies a menu item patch.
pub async fn update_menu_item(
    db: &DatabaseConnection,
    item_id: i64,
    patch: MenuItemPatch,
) -> Result<menu_item::Model> {
    let item = MenuItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::MenuItemNotFound { id: item_id })?;

    let mut active: menu_item::ActiveModel = item.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(description) = patch.description {
        active.description = Set(description);
    }
    if let Some(nutrition) = patch.nutrition {
        active.calories = Set(nutrition.calories);
        active.protein = Set(nutrition.protein);
        active.carbs = Set(nutrition.carbs);
        active.fat = Set(nutrition.fat);
    }
    if let Some(url) = patch.image_url {
        active.image_url = Set(Some(url));
    }

    active.update(db).await.map_err(Into::into)
}

/// Soft-deletes a menu item.
pub async fn deactivate_menu_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<menu_item::Model> {
    let item = MenuItem::find_by_id(item_id)
        .one(db)
        .await?
        .ok_or(Error::MenuItemNotFound { id: item_id })?;

    let mut active: menu_item::ActiveModel = item.into();
    active.is_active = Set(false);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn lunch_facts() -> NutritionFacts {
        NutritionFacts {
            calories: 650,
            protein: 32.0,
            carbs: 80.0,
            fat: 18.0,
        }
    }

    #[tokio::test]
    async fn test_menu_for_date_filters_kitchen_date_and_diet() -> Result<()> {
        let ctx = setup_base_records().await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        create_menu_item(
            &ctx.db,
            ctx.kitchen.id,
            "Dal Rice".to_string(),
            "Comfort bowl".to_string(),
            MealPeriod::Lunch,
            DietType::PureVeg,
            lunch_facts(),
            date,
            None,
        )
        .await?;
        create_menu_item(
            &ctx.db,
            ctx.kitchen.id,
            "Chicken Curry".to_string(),
            "With roti".to_string(),
            MealPeriod::Dinner,
            DietType::NonVeg,
            lunch_facts(),
            date,
            None,
        )
        .await?;
        // Different date: must not show up
        create_menu_item(
            &ctx.db,
            ctx.kitchen.id,
            "Poha".to_string(),
            "Breakfast".to_string(),
            MealPeriod::Breakfast,
            DietType::PureVeg,
            lunch_facts(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            None,
        )
        .await?;

        let todays = get_menu_for_date(&ctx.db, ctx.kitchen.id, date, None).await?;
        assert_eq!(todays.len(), 2);

        let veg = get_menu_for_date(&ctx.db, ctx.kitchen.id, date, Some(DietType::PureVeg)).await?;
        assert_eq!(veg.len(), 1);
        assert_eq!(veg[0].name, "Dal Rice");

        Ok(())
    }

    #[tokio::test]
    async fn test_menu_range_ordered_by_date() -> Result<()> {
        let ctx = setup_base_records().await?;

        for day in [3, 1, 2] {
            create_menu_item(
                &ctx.db,
                ctx.kitchen.id,
                format!("Dish {day}"),
                String::new(),
                MealPeriod::Lunch,
                DietType::Mixed,
                lunch_facts(),
                chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                None,
            )
            .await?;
        }

        let month = get_menu_for_range(
            &ctx.db,
            ctx.kitchen.id,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .await?;
        assert_eq!(month.len(), 3);
        assert!(month.windows(2).all(|w| w[0].menu_date <= w[1].menu_date));

        Ok(())
    }

    #[tokio::test]
    async fn test_patch_and_deactivate_menu_item() -> Result<()> {
        let ctx = setup_base_records().await?;
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let item = create_menu_item(
            &ctx.db,
            ctx.kitchen.id,
            "Khichdi".to_string(),
            String::new(),
            MealPeriod::Lunch,
            DietType::PureVeg,
            lunch_facts(),
            date,
            None,
        )
        .await?;

        let patched = update_menu_item(
            &ctx.db,
            item.id,
            MenuItemPatch {
                description: Some("Slow cooked".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(patched.description, "Slow cooked");
        assert_eq!(patched.name, "Khichdi");

        deactivate_menu_item(&ctx.db, item.id).await?;
        let listed = get_menu_for_date(&ctx.db, ctx.kitchen.id, date, None).await?;
        assert!(listed.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_menu_item_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = deactivate_menu_item(&db, 5).await;
        assert!(matches!(result, Err(Error::MenuItemNotFound { id: 5 })));
        Ok(())
    }
}
