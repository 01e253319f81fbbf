//! What-if market simulator
//!
//! Projects a quote under a hypothetical market-wide move. Each symbol moves
//! by `market_move * beta` on top of its own percent change:
//!
//! ```text
//! percent = stock.percent_change + market_move * beta
//! change  = stock.ltp * percent / 100
//! price   = stock.prev_close + change
//! ```
//!
//! A zero move returns the quote unchanged.

use serde::Serialize;
use tracing::debug;

use crate::types::{Stock, Symbol};

/// Range offered by the scenario slider. Moves outside it are still simulated.
pub const MARKET_MOVE_RANGE: (f64, f64) = (-5.0, 5.0);

pub const DEFAULT_BETA: f64 = 1.0;
pub const HIGH_BETA: f64 = 1.5;
pub const DEFENSIVE_BETA: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BetaClass {
    HighBeta,
    Defensive,
    Market,
}

impl BetaClass {
    pub fn beta(&self) -> f64 {
        match self {
            BetaClass::HighBeta => HIGH_BETA,
            BetaClass::Defensive => DEFENSIVE_BETA,
            BetaClass::Market => DEFAULT_BETA,
        }
    }
}

/// Closed beta classification. Symbols not listed trade with the market.
pub struct BetaTable;

impl BetaTable {
    const HIGH_BETA_SYMBOLS: [&'static str; 3] = ["ADANIENT", "TATAMOTORS", "DLF"];
    const DEFENSIVE_SYMBOLS: [&'static str; 2] = ["HINDUNILVR", "ITC"];

    pub fn classify(symbol: &Symbol) -> BetaClass {
        let s = symbol.as_str();
        if Self::HIGH_BETA_SYMBOLS.contains(&s) {
            BetaClass::HighBeta
        } else if Self::DEFENSIVE_SYMBOLS.contains(&s) {
            BetaClass::Defensive
        } else {
            BetaClass::Market
        }
    }

    pub fn beta(symbol: &Symbol) -> f64 {
        Self::classify(symbol).beta()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulatedQuote {
    pub price: f64,
    pub change: f64,
    pub percent: f64,
}

impl SimulatedQuote {
    fn live(stock: &Stock) -> Self {
        Self {
            price: stock.ltp,
            change: stock.change,
            percent: stock.percent_change,
        }
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Project `stock` under a market move of `market_move` percent
pub fn simulate(stock: &Stock, market_move: f64) -> SimulatedQuote {
    if market_move == 0.0 {
        return SimulatedQuote::live(stock);
    }

    let beta = BetaTable::beta(&stock.symbol);
    let percent = stock.percent_change + market_move * beta;
    let change = stock.ltp * percent / 100.0;
    let price = stock.prev_close + change;

    debug!(
        "Simulated {} at {:+.2}% market (beta {:.1}): {:.2} ({:+.2}%)",
        stock.symbol, market_move, beta, price, percent
    );

    SimulatedQuote {
        price,
        change,
        percent,
    }
}

/// Simulate every stock of a list, keeping its order
pub fn simulate_group<'a>(stocks: &'a [Stock], market_move: f64) -> Vec<(&'a Stock, SimulatedQuote)> {
    stocks.iter().map(|s| (s, simulate(s, market_move))).collect()
}
