//! Allocation command implementation

use anyhow::Result;
use broker_desk::fixtures::AllocationSlice;
use broker_desk::metrics::{self, CONCENTRATION_LIMIT_PCT};
use tracing::{info, warn};

use super::{footer, header, Desk};

fn print_table(title: &str, slices: &[AllocationSlice]) {
    println!("\n{}", title);
    for s in slices {
        let extra = match (&s.return_pct, &s.risk) {
            (Some(r), _) => format!("return {:+.1}%", r),
            (None, Some(risk)) => format!("risk {}", risk),
            (None, None) => String::new(),
        };
        println!("  {:<16} {:>6.1}%  {}", s.name, s.value, extra);
    }
}

pub fn run(desk: &Desk) -> Result<()> {
    info!("Building allocation report");
    let user = desk.user();

    header("ALLOCATION BY HOLDING");
    let weights = metrics::holding_weights(&user.holdings);
    if weights.is_empty() {
        println!("No holdings");
    }
    for w in &weights {
        let flag = if w.is_concentrated { "  CONCENTRATED" } else { "" };
        println!("{:<12} ₹{:>12.2} {:>6.2}%{}", w.symbol, w.current, w.weight, flag);
    }
    if metrics::has_concentration_risk(&weights) {
        warn!(
            "Concentration risk: a holding exceeds {:.0}% of the portfolio",
            CONCENTRATION_LIMIT_PCT
        );
    }

    let tables = &desk.store.allocation;
    print_table("Sectors", &tables.sectors);
    print_table("Sub-sectors", &tables.sub_sectors);
    print_table("Market cap", &tables.market_cap);
    print_table("Risk", &tables.risk_distribution);
    footer();

    info!("Allocation report completed");
    Ok(())
}
