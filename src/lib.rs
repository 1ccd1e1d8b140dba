//! Procurement intelligence core.
//!
//! This library provides the tender query and aggregation engine behind the
//! procurement dashboards: multi-predicate filtering over an in-memory
//! notice corpus, KPI and chart aggregates, and per-user favorites gated by
//! bearer-token identity.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{summarize, QueryEngine};
pub use models::{Corpus, FavoriteEntry, FilterSpec, StatisticsResult, TenderRecord};
pub use services::{FavoritesStore, TenderStore, TokenVerifier};
