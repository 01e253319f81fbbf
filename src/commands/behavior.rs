//! Behavior command implementation

use anyhow::Result;
use broker_desk::behavior::BehaviorView;
use tracing::info;

use super::{footer, header, rule, Desk};

pub fn run(desk: &Desk) -> Result<()> {
    let user = desk.user();
    info!("Building behavior report for {}", user.profile.name);

    header("TRADING BEHAVIOR");
    match BehaviorView::for_profile(user.behavior.as_ref()) {
        BehaviorView::NoData => {
            println!("No trading data yet. Start trading to see your behavioral analysis.");
        }
        BehaviorView::Profile { profile, band } => {
            println!("{} (score {}/100)", band.headline(), profile.score);
            rule();
            let m = &profile.metrics;
            println!("Stop-loss usage:    {:.0}%", m.sl_usage_percent);
            println!("Win streak:         {}", m.win_streak);
            println!("Trades last hour:   {}", m.trades_last_hour);
            println!("Loss recovery:      {}", m.avg_loss_recovery);
            println!("Exposure:           {:.0}%", m.exposure_percent);

            let warnings = profile.warnings();
            if !warnings.is_empty() {
                rule();
                for alert in warnings {
                    println!("[{:?}] {}", alert.severity, alert.message);
                    println!("    {}", alert.suggestion);
                }
            }
        }
    }
    footer();
    Ok(())
}
