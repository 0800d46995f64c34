use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let searches = store.recent_user_searches(limit).await?;

    if searches.is_empty() {
        println!("No searches recorded yet.");
        return Ok(());
    }

    println!("Recent Searches (last {}):", searches.len());
    println!("{:-<50}", "");

    for search in searches {
        println!("• {}  ({})", search.search_term, search.search_date);
    }

    Ok(())
}
