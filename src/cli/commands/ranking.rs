use crate::config::Config;
use crate::db::Store;
use crate::models::trend::Platform;
use crate::services::format_trends_for_display;

pub async fn cmd_ranking(config: &Config, platform: Option<&str>, limit: u64) -> anyhow::Result<()> {
    let platform = platform.map(str::parse::<Platform>).transpose()?;

    let store = Store::new(&config.general.database_path)
        .await?
        .with_window_days(config.trends.default_search_days);
    let rows = store
        .get_trends(platform.map(Platform::as_str), limit)
        .await?;
    let trends = format_trends_for_display(rows);

    if trends.is_empty() {
        println!(
            "No trends collected in the last {} days.",
            config.trends.default_search_days
        );
        println!();
        println!("Collect some with: trendboard refresh");
        return Ok(());
    }

    println!("Trend Ranking ({} rows)", trends.len());
    println!("{:-<78}", "");

    for (i, trend) in trends.iter().enumerate() {
        println!(
            "{:>3}. {:<28} {:<10} {:>8}  {:<20} {}",
            i + 1,
            trend.term,
            trend.platform,
            trend.search_volume,
            trend.region,
            trend.date
        );
    }

    Ok(())
}
