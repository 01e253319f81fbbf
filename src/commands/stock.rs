//! Stock detail command implementation

use anyhow::{bail, Result};
use broker_desk::Symbol;
use tracing::{debug, info};

use super::{footer, header, rule, signed, Desk};

pub fn run(desk: &Desk, symbol: &str) -> Result<()> {
    let symbol = Symbol::new(symbol.to_ascii_uppercase());
    let Some(stock) = desk.store.stock(&symbol) else {
        bail!("Unknown symbol: {}", symbol);
    };
    info!("Stock detail for {}", symbol);

    header(&format!("{} - {}", stock.symbol, stock.name));
    println!(
        "LTP:                ₹{:.2} {} ({}%)",
        stock.ltp,
        signed(stock.change),
        signed(stock.percent_change)
    );
    println!(
        "Open/High/Low:      {:.2} / {:.2} / {:.2}  Prev close {:.2}",
        stock.open, stock.high, stock.low, stock.prev_close
    );
    println!("Volume:             {}  ({})", stock.volume, stock.exchange);

    rule();
    println!("{:>12} {:>8}   {:>12} {:>8}", "BID", "QTY", "OFFER", "QTY");
    let levels = stock.depth.buy.len().max(stock.depth.sell.len());
    for i in 0..levels {
        let bid = stock.depth.buy.get(i);
        let ask = stock.depth.sell.get(i);
        println!(
            "{:>12} {:>8}   {:>12} {:>8}",
            bid.map(|l| format!("{:.2}", l.price)).unwrap_or_default(),
            bid.map(|l| l.qty.to_string()).unwrap_or_default(),
            ask.map(|l| format!("{:.2}", l.price)).unwrap_or_default(),
            ask.map(|l| l.qty.to_string()).unwrap_or_default()
        );
    }
    println!(
        "Total bid qty {}  Total offer qty {}",
        stock.depth.total_buy_qty(),
        stock.depth.total_sell_qty()
    );

    rule();
    match desk.store.sentiment.get(&symbol) {
        Some(s) => {
            println!("Sentiment:          {:?} (score {})", s.sentiment, s.score);
            println!(
                "News:               {}% positive, {}% negative{}",
                s.news.positive,
                s.news.negative,
                if s.news.is_net_positive() { " (net positive)" } else { "" }
            );
            if let Some(q) = &s.quant {
                println!("Quant rating:       {} ({:?})", q.score, q.label);
            }
            if let Some(f) = &s.forecast {
                println!("Forecast median:    ₹{:.2} ({:+.1}%)", f.median, f.upside);
            }
        }
        None => {
            debug!("No sentiment record for {}", symbol);
            println!("No research coverage");
        }
    }
    footer();
    Ok(())
}
