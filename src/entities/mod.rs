pub mod prelude;

pub mod trends;
pub mod user_searches;
