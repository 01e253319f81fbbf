//! Route command implementation

use anyhow::Result;
use broker_desk::Route;
use tracing::info;

pub fn run(path: &str) -> Result<()> {
    let route = Route::parse(path);
    info!("Resolved '{}' to {}", path, route);
    println!("{:?} -> {}", route, route);
    Ok(())
}
