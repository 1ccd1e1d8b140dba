// Core engine exports
pub mod engine;
pub mod filters;
pub mod stats;

pub use engine::QueryEngine;
pub use filters::{matches_country, matches_cpv, matches_filter, matches_value_range};
pub use stats::{category_key, month_key, summarize};
