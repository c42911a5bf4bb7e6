//! Delivery policy configuration.
//!
//! The scheduling rules the core reads at runtime: which weekday is the fixed
//! holiday, the per-meal cancellation cutoff times, and the remaining-delivery
//! count that triggers a renewal reminder. The policy is built once (from
//! `config.toml` or the defaults) and passed into the core functions that need
//! it, instead of living in module-level constant tables.

use crate::entities::enums::MealPeriod;
use crate::errors::{Error, Result};
use chrono::{NaiveTime, Weekday};
use serde::Deserialize;
use std::path::Path;

/// Runtime scheduling policy.
#[derive(Debug, Clone)]
pub struct DeliveryPolicy {
    /// Weekday on which no deliveries are ever scheduled
    pub holiday_weekday: Weekday,
    /// Latest time-of-day a customer may cancel a breakfast delivery
    pub breakfast_cutoff: NaiveTime,
    /// Latest time-of-day a customer may cancel a lunch delivery
    pub lunch_cutoff: NaiveTime,
    /// Latest time-of-day a customer may cancel a dinner delivery
    pub dinner_cutoff: NaiveTime,
    /// Remaining-delivery count at which a renewal reminder is sent
    pub renewal_reminder_threshold: i32,
}

impl DeliveryPolicy {
    /// Cutoff time-of-day for cancelling a delivery in the given meal period.
    #[must_use]
    pub const fn cutoff_for(&self, meal_period: MealPeriod) -> NaiveTime {
        match meal_period {
            MealPeriod::Breakfast => self.breakfast_cutoff,
            MealPeriod::Lunch => self.lunch_cutoff,
            MealPeriod::Dinner => self.dinner_cutoff,
        }
    }
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        // Kitchens are closed on Sundays; cutoffs sit at the start of each
        // meal's preparation window.
        Self {
            holiday_weekday: Weekday::Sun,
            breakfast_cutoff: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            lunch_cutoff: NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default(),
            dinner_cutoff: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            renewal_reminder_threshold: 3,
        }
    }
}

/// Raw policy section of `config.toml`. All fields are optional; missing
/// fields fall back to the defaults.
#[derive(Debug, Deserialize, Default)]
pub struct PolicyConfig {
    /// Holiday weekday name, e.g. "sunday"
    pub holiday_weekday: Option<String>,
    /// Breakfast cutoff in "HH:MM" form
    pub breakfast_cutoff: Option<String>,
    /// Lunch cutoff in "HH:MM" form
    pub lunch_cutoff: Option<String>,
    /// Dinner cutoff in "HH:MM" form
    pub dinner_cutoff: Option<String>,
    /// Remaining-delivery threshold for the renewal reminder
    pub renewal_reminder_threshold: Option<i32>,
}

/// Top-level structure of `config.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Optional `[policy]` section
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl PolicyConfig {
    /// Builds the typed policy, validating every provided field.
    pub fn build(&self) -> Result<DeliveryPolicy> {
        let mut policy = DeliveryPolicy::default();

        if let Some(day) = &self.holiday_weekday {
            policy.holiday_weekday = parse_weekday(day)?;
        }
        if let Some(t) = &self.breakfast_cutoff {
            policy.breakfast_cutoff = parse_cutoff(t)?;
        }
        if let Some(t) = &self.lunch_cutoff {
            policy.lunch_cutoff = parse_cutoff(t)?;
        }
        if let Some(t) = &self.dinner_cutoff {
            policy.dinner_cutoff = parse_cutoff(t)?;
        }
        if let Some(threshold) = self.renewal_reminder_threshold {
            if threshold < 0 {
                return Err(Error::Config {
                    message: format!("renewal_reminder_threshold must be >= 0, got {threshold}"),
                });
            }
            policy.renewal_reminder_threshold = threshold;
        }

        Ok(policy)
    }
}

/// Parses a lowercase weekday name as stored in configuration and in the
/// `delivery_days` column ("monday" .. "sunday").
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    match name.trim().to_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        other => Err(Error::Config {
            message: format!("Unknown weekday: {other}"),
        }),
    }
}

fn parse_cutoff(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|e| Error::Config {
        message: format!("Invalid cutoff time {value:?}: {e}"),
    })
}

/// Loads the delivery policy from a TOML file, falling back to defaults for
/// anything the file leaves out.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<DeliveryPolicy> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    config.policy.build()
}
