//! Portfolio command implementation

use anyhow::{anyhow, Result};
use broker_desk::metrics;
use broker_desk::orders::OrderFilter;
use tracing::{debug, info};

use super::{footer, header, rule, signed, Desk};

pub fn run(desk: &Desk, orders: &str) -> Result<()> {
    let filter: OrderFilter = orders.parse().map_err(|e: String| anyhow!(e))?;
    info!("Building portfolio report (orders: {:?})", filter);
    let user = desk.user();

    header(&format!("HOLDINGS - {}", user.profile.name));
    if user.holdings.is_empty() {
        println!("No holdings");
    }
    for h in &user.holdings {
        println!(
            "{:<12} {:>6} @ {:>9.2}  LTP {:>9.2}  P&L {:>11} ({}%)",
            h.symbol,
            h.qty,
            h.avg_price,
            h.ltp,
            signed(h.pnl),
            signed(h.pnl_percent)
        );
    }
    let totals = metrics::portfolio_totals(&user.holdings);
    rule();
    println!(
        "Total P&L:          ₹{} ({}%)",
        totals.total_pnl,
        signed(totals.total_pnl_percent)
    );

    header("POSITIONS");
    for p in &user.positions {
        println!(
            "{:<26} {:<5} {:?} {:>5}  P&L {:>10}",
            p.symbol,
            p.product,
            p.side,
            p.qty,
            signed(p.pnl)
        );
    }
    let summary = metrics::position_summary(&user.positions);
    for (product, pnl) in &summary.pnl_by_product {
        debug!("{} P&L: {}", product, pnl);
    }
    println!("Open positions: {}, P&L ₹{}", summary.count, summary.total_pnl);

    header(&format!("ORDERS ({:?})", filter));
    let shown = filter.apply(&user.orders);
    if shown.is_empty() {
        println!("No orders");
    }
    for o in shown {
        println!(
            "{:<8} {:<10} {:?} {:>5} @ {:>9.2}  {:?}  {}",
            o.id, o.symbol, o.side, o.qty, o.price, o.status, o.time
        );
        if let Some(message) = &o.message {
            println!("         {}", message);
        }
    }
    footer();

    info!("Portfolio report completed");
    Ok(())
}
