//! Menu item entity - One dish on a kitchen's calendar.
//!
//! Items are keyed by kitchen, date, and meal period so the daily menu is a
//! simple equality filter.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::{DietType, MealPeriod};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Kitchen publishing this item
    pub kitchen_id: i64,
    /// Dish name
    pub name: String,
    /// Dish description
    pub description: String,
    /// Meal period the dish is served in
    pub meal_period: MealPeriod,
    /// Diet classification of the dish
    pub diet_type: DietType,
    /// Calories per serving
    pub calories: i32,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Optional image URL
    pub image_url: Option<String>,
    /// Calendar date the dish is served on
    pub menu_date: Date,
    /// Soft-delete flag; inactive items are hidden from the menu
    pub is_active: bool,
    /// When the item was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `MenuItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each menu item belongs to one kitchen
    #[sea_orm(
        belongs_to = "super::kitchen::Entity",
        from = "Column::KitchenId",
        to = "super::kitchen::Column::Id"
    )]
    Kitchen,
}

impl Related<super::kitchen::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Kitchen.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
