pub mod budget;
pub mod catalog;
pub mod models;
pub mod query;

pub use budget::{extract_budget, extract_fenced_json, parse_budget, BudgetParseError};
pub use models::*;
pub use query::{compose_query, normalize_text, trip_length_days, DEFAULT_COMPOSITE_QUERY};
