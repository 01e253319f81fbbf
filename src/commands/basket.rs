//! Basket detail command implementation

use anyhow::{bail, Result};
use broker_desk::basket;
use tracing::{info, warn};

use super::{footer, header, rule, Desk};

pub fn run(desk: &Desk, id: &str, amount: Option<f64>) -> Result<()> {
    let Some(b) = basket::find_basket(&desk.store.baskets, id) else {
        bail!("Basket not found: {}", id);
    };
    info!("Basket {} ({})", b.name, b.id);

    header(&b.name.to_uppercase());
    println!("{}", b.description);
    println!("Kind: {:?}  Risk: {:?}  Volatility: {:?}  Popularity: {:?}", b.kind, b.risk, b.volatility, b.popularity);
    println!("3Y CAGR: {:.1}%", b.cagr);
    rule();

    let plan = match amount {
        Some(amount) => b.plan(amount),
        None => b.min_plan(),
    };
    if plan.total_weight != 100 {
        warn!("Weights of {} sum to {}", b.id, plan.total_weight);
    }
    for a in &plan.allocations {
        let quote = desk
            .store
            .stock(&a.symbol)
            .map(|s| format!("LTP {:.2}", s.ltp))
            .unwrap_or_default();
        println!("{:<12} {:>3}%  ₹{:>10.2}  {}", a.symbol, a.weight, a.amount, quote);
    }
    rule();
    println!("Investment:         ₹{:.2}", plan.amount);
    footer();
    Ok(())
}
