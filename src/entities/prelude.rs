pub use super::trends::Entity as Trends;
pub use super::user_searches::Entity as UserSearches;
