// Service exports
pub mod auth;
pub mod cache;
pub mod favorites;
pub mod store;
pub mod ted;

pub use auth::{bearer_token, AuthError, TokenVerifier};
pub use cache::{CacheKey, StatsCache};
pub use favorites::FavoritesStore;
pub use store::TenderStore;
pub use ted::{TedClient, TedError};
