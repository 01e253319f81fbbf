//! Insights command implementation

use anyhow::Result;
use tracing::{debug, info};

use super::{footer, header, Desk};

pub fn run(desk: &Desk) -> Result<()> {
    let user = desk.user();
    info!("Building sentiment insights for {}", user.profile.name);

    header("HOLDING INSIGHTS");
    let insights = desk.store.sentiment.holding_insights(&user.holdings);
    if insights.is_empty() {
        println!("No holdings");
    }
    for (holding, sentiment) in insights {
        match sentiment {
            Some(s) => println!(
                "{:<12} {:<14} {:?} (score {}), analysts {:?}, {:?}, news {}",
                holding.symbol,
                s.industry(),
                s.sentiment,
                s.score,
                s.analyst_rating.consensus,
                s.technicals,
                if s.news.is_net_positive() { "positive" } else { "mixed" }
            ),
            None => {
                debug!("No sentiment record for {}", holding.symbol);
                println!("{:<12} no coverage", holding.symbol);
            }
        }
    }
    footer();
    Ok(())
}
