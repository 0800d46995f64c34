mod history;
mod ranking;
mod refresh;
mod search;

pub use history::cmd_history;
pub use ranking::cmd_ranking;
pub use refresh::cmd_refresh;
pub use search::cmd_search;
