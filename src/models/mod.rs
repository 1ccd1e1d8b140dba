// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    clamp_limit, Corpus, FavoriteEntry, FilterSpec, GroupStat, StatisticsResult, TenderRecord,
    DEFAULT_LIMIT, MAX_LIMIT,
};
pub use requests::{FavoritePayload, SearchQuery, StatsQuery};
pub use responses::{
    AuthFailureResponse, ErrorResponse, FavoriteActionResponse, FavoriteListResponse,
    HealthResponse, SearchResponse,
};
