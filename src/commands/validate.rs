//! Validate command implementation

use anyhow::{bail, Result};
use tracing::info;

use super::{footer, header, Desk};

pub fn run(desk: &Desk) -> Result<()> {
    info!("Validating fixtures");
    let issues = desk.store.validate();

    header("FIXTURE VALIDATION");
    println!("Stocks:             {}", desk.store.stocks.len());
    println!("Baskets:            {}", desk.store.baskets.len());
    println!("Users:              {}", desk.store.users.len());
    for issue in &issues {
        println!("  {}", issue);
    }
    footer();

    if !issues.is_empty() {
        bail!("{} fixture issue(s) found", issues.len());
    }
    info!("Fixtures are consistent");
    Ok(())
}
