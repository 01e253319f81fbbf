//! Baskets command implementation

use anyhow::{anyhow, Result};
use broker_desk::basket::{self, BasketKind};
use tracing::info;

use super::{footer, header, Desk};

pub fn run(desk: &Desk, kind: Option<String>) -> Result<()> {
    let kind: Option<BasketKind> = kind
        .map(|k| k.parse().map_err(|e: String| anyhow!(e)))
        .transpose()?;
    info!("Listing baskets (kind: {:?})", kind);

    header("BASKETS");
    let baskets = basket::filter_by_kind(&desk.store.baskets, kind);
    if baskets.is_empty() {
        println!("No baskets");
    }
    for b in baskets {
        println!(
            "{:<4} {:<24} {:<10} CAGR {:>5.1}%  min ₹{:>8.0}  risk {:?}",
            b.id, b.name, format!("{:?}", b.kind), b.cagr, b.min_invest, b.risk
        );
    }
    footer();
    Ok(())
}
