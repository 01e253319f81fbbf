//! Order pad command implementation

use anyhow::{anyhow, bail, Result};
use broker_desk::orders::{estimate_order, LimitPrice, PriceMode};
use broker_desk::{ProductType, Side, Symbol};
use tracing::info;

use super::{footer, header, rule, Desk};

pub fn run(
    desk: &Desk,
    symbol: &str,
    qty: u64,
    product: &str,
    limit: Option<f64>,
    side: &str,
) -> Result<()> {
    let product: ProductType = product.parse().map_err(|e: String| anyhow!(e))?;
    let side: Side = side.parse().map_err(|e: String| anyhow!(e))?;
    let symbol = Symbol::new(symbol.to_ascii_uppercase());
    let Some(stock) = desk.store.stock(&symbol) else {
        bail!("Unknown symbol: {}", symbol);
    };
    if qty == 0 {
        bail!("Quantity must be at least 1");
    }

    let mode = match limit {
        Some(price) => PriceMode::Limit(LimitPrice::from_rupees(price)),
        None => PriceMode::Market,
    };
    let estimate = estimate_order(stock.ltp, qty, mode, product);
    info!(
        "Order pad {:?} {} x{} {} ({:?})",
        side, symbol, qty, product, mode
    );

    header(&format!("{:?} {} ({})", side, stock.symbol, stock.exchange).to_uppercase());
    println!("LTP:                ₹{:.2}", stock.ltp);
    match mode {
        PriceMode::Market => println!("Price:              MARKET"),
        PriceMode::Limit(price) => println!("Price:              ₹{:.2} LIMIT", price.rupees()),
    }
    println!("Quantity:           {}", qty);
    println!("Product:            {}", product);
    rule();
    println!("Order Value:        ₹{:.2}", estimate.value);
    println!("Margin Required:    ₹{:.2}", estimate.margin_required);
    if product == ProductType::Mtf {
        println!("Daily Interest:     ₹{:.2}", estimate.daily_interest);
    }
    footer();
    Ok(())
}
