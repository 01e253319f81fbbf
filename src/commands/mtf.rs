//! MTF dashboard command implementation

use anyhow::Result;
use broker_desk::metrics;
use tracing::info;

use super::{footer, header, rule, signed, Desk};

pub fn run(desk: &Desk) -> Result<()> {
    info!("Building MTF dashboard");
    let stats = &desk.store.mtf_stats;
    let positions = &desk.store.mtf_positions;
    let summary = metrics::mtf_summary(stats, positions);

    header("MARGIN TRADE FUNDING");
    println!("Total Debt:         ₹{:.2}", stats.total_debt);
    println!("Accrued Interest:   ₹{:.2}", stats.accrued_interest);
    println!("Interest Rate:      {:.3}% per day", stats.interest_rate);
    println!("Margin Used:        ₹{:.2}", stats.margin_used);
    println!("Available Limit:    ₹{:.2}", stats.available_limit);
    println!("Utilization:        {:.1}%", summary.utilization_percent);
    println!("Risk Status:        {}", stats.risk_status);
    rule();

    for p in positions {
        println!(
            "{:<12} {:>6} @ {:>9.2}  LTP {:>9.2}  P&L {:>10}",
            p.symbol,
            p.qty,
            p.avg_price,
            p.ltp,
            signed(p.pnl)
        );
    }
    println!(
        "MTF positions: {}, P&L ₹{}",
        summary.positions.count, summary.positions.total_pnl
    );
    footer();

    info!("MTF dashboard completed");
    Ok(())
}
