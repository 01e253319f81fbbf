//! Derived portfolio metrics
//!
//! Pure functions over fixture records. Nothing here fails: a symbol that
//! cannot be found contributes zero and every percentage with a zero or
//! negative denominator is 0.
//!
//! ```text
//! total_pnl         = total_current - total_invested
//! total_pnl_percent = total_pnl / total_invested * 100
//! day_change        = Σ stock.change * holding.qty
//! day_change_pct    = day_change / (total_current - day_change) * 100
//! weight            = holding.current / total_current * 100
//! ```

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::fixtures::MtfStats;
use crate::types::{Holding, Money, Position, ProductType, Stock, Symbol};

/// Weight above which a single holding is flagged as concentration risk
pub const CONCENTRATION_LIMIT_PCT: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PortfolioTotals {
    pub total_invested: Money,
    pub total_current: Money,
    pub total_pnl: Money,
    pub total_pnl_percent: f64,
}

impl PortfolioTotals {
    pub fn is_profit(&self) -> bool {
        !self.total_pnl.is_negative()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayChange {
    pub change: Money,
    pub previous_value: Money,
    pub percent: f64,
}

impl DayChange {
    pub fn is_profit(&self) -> bool {
        !self.change.is_negative()
    }
}

/// One row of the allocation breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationWeight {
    pub symbol: Symbol,
    pub current: f64,
    pub weight: f64,
    pub is_concentrated: bool,
}

/// Sum invested and current value across holdings
pub fn portfolio_totals(holdings: &[Holding]) -> PortfolioTotals {
    let total_invested: Money = holdings.iter().map(|h| Money::from_f64(h.invested)).sum();
    let total_current: Money = holdings.iter().map(|h| Money::from_f64(h.current)).sum();
    let total_pnl = total_current - total_invested;
    let total_pnl_percent = total_pnl.percent_of(total_invested);

    debug!(
        "Portfolio totals: invested={}, current={}, pnl={} ({:.2}%)",
        total_invested, total_current, total_pnl, total_pnl_percent
    );

    PortfolioTotals {
        total_invested,
        total_current,
        total_pnl,
        total_pnl_percent,
    }
}

/// Today's move of the holdings, priced from the stock quotes.
///
/// Holdings whose symbol has no quote contribute nothing.
pub fn day_change(holdings: &[Holding], stocks: &[Stock]) -> DayChange {
    let change: Money = holdings
        .iter()
        .map(|h| match stocks.iter().find(|s| s.symbol == h.symbol) {
            Some(stock) => Money::from_f64(stock.change) * Money::from_f64(h.qty as f64),
            None => {
                debug!("No quote for {}, skipping in day change", h.symbol);
                Money::ZERO
            }
        })
        .sum();

    let total_current: Money = holdings.iter().map(|h| Money::from_f64(h.current)).sum();
    let previous_value = total_current - change;

    DayChange {
        change,
        previous_value,
        percent: change.percent_of(previous_value),
    }
}

/// Weight of each holding in `total`, largest first.
///
/// `total` is normally `Σ current`; a zero or negative total gives every
/// holding a weight of 0.
pub fn allocation_weights(holdings: &[Holding], total: f64) -> Vec<AllocationWeight> {
    holdings
        .iter()
        .sorted_by_key(|h| std::cmp::Reverse(OrderedFloat(h.current)))
        .map(|h| {
            let weight = if total > 0.0 {
                h.current / total * 100.0
            } else {
                0.0
            };
            AllocationWeight {
                symbol: h.symbol.clone(),
                current: h.current,
                weight,
                is_concentrated: weight > CONCENTRATION_LIMIT_PCT,
            }
        })
        .collect()
}

/// Allocation weights against the holdings' own current value
pub fn holding_weights(holdings: &[Holding]) -> Vec<AllocationWeight> {
    let total: f64 = holdings.iter().map(|h| h.current).sum();
    allocation_weights(holdings, total)
}

pub fn has_concentration_risk(weights: &[AllocationWeight]) -> bool {
    weights.iter().any(|w| w.is_concentrated)
}

/// Aggregate P&L of open positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionSummary {
    pub count: usize,
    pub total_pnl: Money,
    pub pnl_by_product: BTreeMap<ProductType, Money>,
}

pub fn position_summary(positions: &[Position]) -> PositionSummary {
    let pnl_by_product = positions
        .iter()
        .into_group_map_by(|p| p.product)
        .into_iter()
        .map(|(product, group)| {
            let pnl: Money = group.iter().map(|p| Money::from_f64(p.pnl)).sum();
            (product, pnl)
        })
        .collect();

    PositionSummary {
        count: positions.len(),
        total_pnl: positions.iter().map(|p| Money::from_f64(p.pnl)).sum(),
        pnl_by_product,
    }
}

/// Margin trade funding account with its open positions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MtfSummary {
    pub positions: PositionSummary,
    /// Margin already blocked as a percent of the whole MTF limit
    pub utilization_percent: f64,
}

pub fn mtf_summary(stats: &MtfStats, positions: &[Position]) -> MtfSummary {
    let limit = stats.margin_used + stats.available_limit;
    let utilization_percent = if limit > 0.0 {
        stats.margin_used / limit * 100.0
    } else {
        0.0
    };
    debug!(
        "MTF utilization {:.1}% of {:.2} ({})",
        utilization_percent, limit, stats.risk_status
    );

    MtfSummary {
        positions: position_summary(positions),
        utilization_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn quote(symbol: &str, ltp: f64, change: f64) -> Stock {
        Stock {
            symbol: Symbol::new(symbol),
            name: symbol.to_string(),
            ltp,
            change,
            percent_change: 0.0,
            exchange: crate::types::Exchange::Nse,
            volume: "1M".to_string(),
            open: ltp,
            high: ltp,
            low: ltp,
            prev_close: ltp - change,
            depth: Default::default(),
        }
    }

    fn john_holdings() -> Vec<Holding> {
        let held = |symbol: &str, qty, avg_price, ltp, invested: f64, current: f64| Holding {
            symbol: Symbol::new(symbol),
            qty,
            avg_price,
            ltp,
            invested,
            current,
            pnl: current - invested,
            pnl_percent: (current - invested) / invested * 100.0,
        };
        vec![
            held("RELIANCE", 50, 2800.0, 2980.45, 140_000.0, 149_022.5),
            held("TATASTEEL", 1000, 145.0, 152.40, 145_000.0, 152_400.0),
        ]
    }

    #[test]
    fn test_portfolio_totals() {
        let totals = portfolio_totals(&john_holdings());
        assert_eq!(totals.total_invested.inner(), dec!(285000));
        assert_eq!(totals.total_current.inner(), dec!(301422.5));
        assert_eq!(totals.total_pnl.inner(), dec!(16422.5));
        assert_relative_eq!(totals.total_pnl_percent, 16422.5 / 285000.0 * 100.0, epsilon = 1e-9);
        assert!(totals.is_profit());
    }

    #[test]
    fn test_pnl_identity_is_exact() {
        let holdings = vec![
            Holding::new("A", 3, 0.1, 0.3),
            Holding::new("B", 7, 10.07, 9.93),
            Holding::new("C", 11, 123.45, 130.01),
        ];
        let totals = portfolio_totals(&holdings);
        assert_eq!(totals.total_current - totals.total_invested, totals.total_pnl);
    }

    #[test]
    fn test_empty_holdings_have_zero_percent() {
        let totals = portfolio_totals(&[]);
        assert!(totals.total_invested.is_zero());
        assert_eq!(totals.total_pnl_percent, 0.0);
    }

    #[test]
    fn test_zero_invested_has_zero_percent() {
        let holdings = vec![Holding::new("GIFT", 10, 0.0, 50.0)];
        let totals = portfolio_totals(&holdings);
        assert_eq!(totals.total_pnl.to_f64(), 500.0);
        assert_eq!(totals.total_pnl_percent, 0.0);
    }

    #[test]
    fn test_day_change_skips_missing_quotes() {
        let stocks = vec![quote("RELIANCE", 2980.45, 15.20)];
        let dc = day_change(&john_holdings(), &stocks);
        // Only RELIANCE: 15.20 * 50
        assert_eq!(dc.change.inner(), dec!(760));
        assert_eq!(dc.previous_value.inner(), dec!(300662.5));
        assert_relative_eq!(dc.percent, 760.0 / 300_662.5 * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_day_change_with_no_quotes_is_zero() {
        let dc = day_change(&john_holdings(), &[]);
        assert!(dc.change.is_zero());
        assert_eq!(dc.percent, 0.0);
    }

    #[test]
    fn test_day_change_non_positive_previous_value() {
        // A quote that moved more than the whole position is worth
        let holdings = vec![Holding::new("X", 1, 10.0, 5.0)];
        let stocks = vec![quote("X", 5.0, 8.0)];
        let dc = day_change(&holdings, &stocks);
        assert!(dc.previous_value.is_negative());
        assert_eq!(dc.percent, 0.0);
    }

    #[test]
    fn test_single_holding_is_fully_concentrated() {
        let mut h = Holding::new("X", 10, 100.0, 120.0);
        h.current = 1200.0;
        let weights = allocation_weights(&[h], 1200.0);
        assert_eq!(weights.len(), 1);
        assert_relative_eq!(weights[0].weight, 100.0);
        assert!(weights[0].is_concentrated);
        assert!(has_concentration_risk(&weights));
    }

    #[test]
    fn test_weights_sum_to_100_and_are_sorted() {
        let holdings = vec![
            Holding::new("A", 10, 10.0, 10.0),
            Holding::new("B", 10, 10.0, 50.0),
            Holding::new("C", 10, 10.0, 25.0),
        ];
        let weights = holding_weights(&holdings);
        let sum: f64 = weights.iter().map(|w| w.weight).sum();
        assert_relative_eq!(sum, 100.0, epsilon = 1e-9);
        let order: Vec<&str> = weights.iter().map(|w| w.symbol.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_weight_at_limit_is_not_concentrated() {
        let holdings: Vec<Holding> = (0..5)
            .map(|i| Holding::new(format!("S{}", i).as_str(), 1, 100.0, 100.0))
            .collect();
        let weights = holding_weights(&holdings);
        assert!(weights.iter().all(|w| (w.weight - 20.0).abs() < 1e-9));
        assert!(!has_concentration_risk(&weights));
    }

    #[test]
    fn test_zero_total_gives_zero_weights() {
        let weights = allocation_weights(&john_holdings(), 0.0);
        assert!(weights.iter().all(|w| w.weight == 0.0 && !w.is_concentrated));
    }

    #[test]
    fn test_position_summary() {
        let positions = vec![
            Position {
                symbol: Symbol::new("NIFTY 23MAY 22500 CE"),
                product: ProductType::Nrml,
                qty: 50,
                avg_price: 120.5,
                ltp: 145.0,
                pnl: 1225.0,
                side: Side::Buy,
            },
            Position {
                symbol: Symbol::new("BANKNIFTY 23MAY 48000 PE"),
                product: ProductType::Mis,
                qty: 15,
                avg_price: 340.0,
                ltp: 310.0,
                pnl: -450.0,
                side: Side::Buy,
            },
        ];
        let summary = position_summary(&positions);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_pnl.inner(), dec!(775));
        assert_eq!(summary.pnl_by_product[&ProductType::Mis].inner(), dec!(-450));
    }

    #[test]
    fn test_tiny_invested_huge_current_does_not_panic() {
        let holding = Holding {
            symbol: Symbol::new("PENNY"),
            qty: 1,
            avg_price: 1e-10,
            ltp: 1e20,
            invested: 1e-10,
            current: 1e20,
            pnl: 1e20,
            pnl_percent: 0.0,
        };
        let totals = portfolio_totals(&[holding]);
        assert!(totals.total_pnl.is_positive());
        assert!(totals.total_pnl_percent.is_finite());
    }

    #[test]
    fn test_day_change_overflow_saturates() {
        let holdings = vec![Holding::new("X", u64::MAX / 2, 5.0, 5.0)];
        let stocks = vec![quote("X", 5.0, 1e10)];
        let dc = day_change(&holdings, &stocks);
        assert_eq!(dc.change, Money::MAX);
        assert_eq!(dc.percent, 0.0);
    }

    #[test]
    fn test_total_current_overflow_saturates() {
        let huge = |symbol: &str| Holding {
            symbol: Symbol::new(symbol),
            qty: 1,
            avg_price: 1.0,
            ltp: 5e28,
            invested: 1.0,
            current: 5e28,
            pnl: 5e28,
            pnl_percent: 0.0,
        };
        let totals = portfolio_totals(&[huge("A"), huge("B")]);
        assert_eq!(totals.total_current, Money::MAX);
        assert_eq!(totals.total_invested.inner(), dec!(2));
        assert!(totals.total_pnl_percent.is_finite());
    }

    #[test]
    fn test_mtf_summary_utilization() {
        let store = crate::fixtures::FixtureStore::builtin();
        let summary = mtf_summary(&store.mtf_stats, &store.mtf_positions);
        assert_relative_eq!(summary.utilization_percent, 62_500.0 / 87_500.0 * 100.0, epsilon = 1e-9);
        assert_eq!(summary.positions.count, 2);
        assert_eq!(summary.positions.total_pnl.inner(), dec!(11830));

        let mut empty = store.mtf_stats.clone();
        empty.margin_used = 0.0;
        empty.available_limit = 0.0;
        assert_eq!(mtf_summary(&empty, &[]).utilization_percent, 0.0);
    }
}
