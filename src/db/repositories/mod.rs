pub mod trend;
pub mod user_search;
