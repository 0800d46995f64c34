use crate::config::Config;
use crate::models::trend::Platform;
use crate::state::SharedState;

pub async fn cmd_refresh(config: &Config) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    println!("Collecting trends from every platform...");
    let trends = state.trend_service.collect_trending(None).await?;

    println!("✓ {} terms collected.", trends.len());
    println!();

    for platform in Platform::ALL {
        let count = trends.iter().filter(|t| t.platform == platform).count();
        println!("  {platform:<10} {count}");
    }

    if let Some(top) = trends.first() {
        println!();
        println!("Top term: {} ({}, {})", top.term, top.platform, top.volume);
    }

    Ok(())
}
