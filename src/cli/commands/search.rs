use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_search(config: &Config, term: &str, dry_run: bool) -> anyhow::Result<()> {
    let term = term.trim();
    if term.is_empty() {
        anyhow::bail!("Search term cannot be empty");
    }

    let state = SharedState::new(config.clone()).await?;

    let results = if dry_run {
        state.trend_service.live_search(term).await
    } else {
        state.trend_service.search_term(term).await?
    };

    println!("Results for: {term}");
    println!("{:-<60}", "");

    for record in &results {
        println!("{:<10} volume {}", record.platform, record.volume);
        for (region, volume) in record.regions.iter() {
            println!("    {region:<22} {volume}");
        }
    }

    if !dry_run {
        println!();
        println!("✓ Stored {} platform results.", results.len());
    }

    Ok(())
}
