//! Dashboard command implementation

use anyhow::Result;
use broker_desk::metrics;
use tracing::info;

use super::{footer, header, rule, signed, Desk};

pub fn run(desk: &Desk) -> Result<()> {
    info!("Building dashboard");
    let user = desk.user();

    header(&format!("DASHBOARD - {}", user.profile.name));
    for index in &desk.store.indices {
        println!(
            "{:<12} {:>12.2} {:>10} ({}%)",
            index.name,
            index.value,
            signed(index.change),
            signed(index.percent_change)
        );
    }
    rule();

    let totals = metrics::portfolio_totals(&user.holdings);
    let day = metrics::day_change(&user.holdings, &desk.store.stocks);

    println!("Invested:           ₹{}", totals.total_invested);
    println!("Current Value:      ₹{}", totals.total_current);
    println!(
        "Total P&L:          ₹{} ({}%)",
        totals.total_pnl,
        signed(totals.total_pnl_percent)
    );
    println!("Day's Change:       ₹{} ({}%)", day.change, signed(day.percent));

    let positions = metrics::position_summary(&user.positions);
    println!(
        "Open Positions:     {} (P&L ₹{})",
        positions.count, positions.total_pnl
    );
    footer();

    info!("Dashboard completed");
    Ok(())
}
