/// Database connection and schema creation
pub mod database;

/// Delivery policy (cutoff times, holiday weekday, renewal threshold)
pub mod policy;
