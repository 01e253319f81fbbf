//! Core data types shared by the fixture store, metrics and watchlists

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute tolerance when checking stored monetary fields against qty × price
pub const VALUE_TOLERANCE: f64 = 0.01;

/// Tolerance for stored percentages, which the fixtures round to two places
pub const PERCENT_TOLERANCE: f64 = 0.01;

/// Validation errors for fixture records
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FixtureValidationError {
    #[error("{symbol}: high ({high}) must be >= low ({low})")]
    HighLessThanLow { symbol: Symbol, high: f64, low: f64 },

    #[error("{symbol}: prices must be positive: ltp={ltp}, prev_close={prev_close}")]
    NonPositivePrice {
        symbol: Symbol,
        ltp: f64,
        prev_close: f64,
    },

    #[error("{symbol}: invested ({actual}) != qty * avg_price ({expected})")]
    InvestedMismatch {
        symbol: Symbol,
        expected: f64,
        actual: f64,
    },

    #[error("{symbol}: current ({actual}) != qty * ltp ({expected})")]
    CurrentMismatch {
        symbol: Symbol,
        expected: f64,
        actual: f64,
    },

    #[error("{symbol}: pnl ({actual}) != current - invested ({expected})")]
    PnlMismatch {
        symbol: Symbol,
        expected: f64,
        actual: f64,
    },

    #[error("{symbol}: pnl_percent ({actual}) != pnl / invested * 100 ({expected})")]
    PnlPercentMismatch {
        symbol: Symbol,
        expected: f64,
        actual: f64,
    },

    #[error("basket '{basket}': weights sum to {total}, expected 100")]
    BasketWeights { basket: String, total: u32 },

    #[error("duplicate stock symbol: {0}")]
    DuplicateSymbol(Symbol),

    #[error("duplicate order id: {0}")]
    DuplicateOrderId(String),
}

/// Ticker symbol using Arc<str> for cheap cloning
///
/// Stocks are copied into several watchlist groups and looked up by symbol
/// from holdings, baskets and sentiment records, so clones must stay cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(#[serde(with = "arc_str_serde")] std::sync::Arc<str>);

mod arc_str_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::sync::Arc;

    pub fn serialize<S>(value: &Arc<str>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Arc<str>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Arc::from(s.as_str()))
    }
}

impl Symbol {
    pub fn new(s: impl AsRef<str>) -> Self {
        Symbol(std::sync::Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::new(s)
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::Buy),
            "sell" => Ok(Side::Sell),
            other => Err(format!("unknown side '{}' (expected buy or sell)", other)),
        }
    }
}

/// Listing exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    Nse,
    Bse,
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exchange::Nse => write!(f, "NSE"),
            Exchange::Bse => write!(f, "BSE"),
        }
    }
}

/// Brokerage product type. Opaque tag: no product behaves differently
/// except MTF in the order-pad margin estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    /// Intraday
    Mis,
    /// Carry-forward derivatives
    Nrml,
    /// Delivery
    Cnc,
    /// Margin trade funding
    Mtf,
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ProductType::Mis => "MIS",
            ProductType::Nrml => "NRML",
            ProductType::Cnc => "CNC",
            ProductType::Mtf => "MTF",
        };
        f.pad(tag)
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MIS" => Ok(ProductType::Mis),
            "NRML" => Ok(ProductType::Nrml),
            "CNC" => Ok(ProductType::Cnc),
            "MTF" => Ok(ProductType::Mtf),
            other => Err(format!("unknown product '{}' (expected MIS, NRML, CNC or MTF)", other)),
        }
    }
}

/// Order status, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Executed,
    Pending,
    Rejected,
    Cancelled,
}

/// One price level of the order book
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: f64,
    pub qty: u64,
}

/// Bid and ask ladders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketDepth {
    pub buy: Vec<DepthLevel>,
    pub sell: Vec<DepthLevel>,
}

impl MarketDepth {
    pub fn total_buy_qty(&self) -> u64 {
        self.buy.iter().map(|l| l.qty).sum()
    }

    pub fn total_sell_qty(&self) -> u64 {
        self.sell.iter().map(|l| l.qty).sum()
    }
}

/// Equity quote snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub symbol: Symbol,
    pub name: String,
    pub ltp: f64,
    pub change: f64,
    pub percent_change: f64,
    pub exchange: Exchange,
    /// Display label such as "4.2M"
    pub volume: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub prev_close: f64,
    #[serde(default)]
    pub depth: MarketDepth,
}

impl Stock {
    /// Check the OHLC invariants. `ltp` is deliberately not required to sit
    /// inside `[low, high]`.
    pub fn validate(&self) -> Result<(), FixtureValidationError> {
        if self.ltp <= 0.0 || self.prev_close <= 0.0 {
            return Err(FixtureValidationError::NonPositivePrice {
                symbol: self.symbol.clone(),
                ltp: self.ltp,
                prev_close: self.prev_close,
            });
        }

        if self.high < self.low {
            return Err(FixtureValidationError::HighLessThanLow {
                symbol: self.symbol.clone(),
                high: self.high,
                low: self.low,
            });
        }

        Ok(())
    }

    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}

/// Market index with sparkline points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub percent_change: f64,
    #[serde(default)]
    pub data: Vec<f64>,
}

/// Delivery holding. `ltp` duplicates the stock quote and may drift from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: Symbol,
    pub qty: u64,
    pub avg_price: f64,
    pub ltp: f64,
    pub invested: f64,
    pub current: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
}

impl Holding {
    /// Build a holding with all derived fields consistent with qty and prices
    pub fn new(symbol: impl Into<Symbol>, qty: u64, avg_price: f64, ltp: f64) -> Self {
        let invested = qty as f64 * avg_price;
        let current = qty as f64 * ltp;
        let pnl = current - invested;
        let pnl_percent = if invested > 0.0 {
            pnl / invested * 100.0
        } else {
            0.0
        };
        Self {
            symbol: symbol.into(),
            qty,
            avg_price,
            ltp,
            invested,
            current,
            pnl,
            pnl_percent,
        }
    }

    /// Check the stored derived fields against qty and prices
    pub fn validate(&self) -> Result<(), FixtureValidationError> {
        let qty = self.qty as f64;

        let expected_invested = qty * self.avg_price;
        if (expected_invested - self.invested).abs() > VALUE_TOLERANCE {
            return Err(FixtureValidationError::InvestedMismatch {
                symbol: self.symbol.clone(),
                expected: expected_invested,
                actual: self.invested,
            });
        }

        let expected_current = qty * self.ltp;
        if (expected_current - self.current).abs() > VALUE_TOLERANCE {
            return Err(FixtureValidationError::CurrentMismatch {
                symbol: self.symbol.clone(),
                expected: expected_current,
                actual: self.current,
            });
        }

        let expected_pnl = self.current - self.invested;
        if (expected_pnl - self.pnl).abs() > VALUE_TOLERANCE {
            return Err(FixtureValidationError::PnlMismatch {
                symbol: self.symbol.clone(),
                expected: expected_pnl,
                actual: self.pnl,
            });
        }

        if self.invested > 0.0 {
            let expected_pct = self.pnl / self.invested * 100.0;
            if (expected_pct - self.pnl_percent).abs() > PERCENT_TOLERANCE {
                return Err(FixtureValidationError::PnlPercentMismatch {
                    symbol: self.symbol.clone(),
                    expected: expected_pct,
                    actual: self.pnl_percent,
                });
            }
        }

        Ok(())
    }
}

/// Open position (no lifecycle is modeled)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub product: ProductType,
    pub qty: u64,
    pub avg_price: f64,
    pub ltp: f64,
    pub pnl: f64,
    pub side: Side,
}

/// Order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: Symbol,
    pub side: Side,
    pub product: ProductType,
    pub qty: u64,
    pub price: f64,
    pub status: OrderStatus,
    /// Display label ("10:30:24", "Yesterday")
    pub time: String,
    /// Rejection reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    pub fn value(&self) -> f64 {
        self.qty as f64 * self.price
    }
}

// ============================================================================
// Money Type - Decimal arithmetic for portfolio sums
// ============================================================================

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};
use tracing::debug;

/// Monetary amount backed by `rust_decimal::Decimal`.
///
/// Portfolio totals are summed in `Money` so that
/// `total_current - total_invested == total_pnl` holds exactly.
///
/// # Example
/// ```
/// use broker_desk::Money;
/// let invested = Money::from_f64(140000.0) + Money::from_f64(145000.0);
/// assert_eq!(invested.to_f64(), 285000.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const MAX: Money = Money(Decimal::MAX);
    pub const MIN: Money = Money(Decimal::MIN);

    /// Convert from f64. NaN, infinities and values outside the decimal
    /// range map to zero.
    pub fn from_f64(value: f64) -> Self {
        match Decimal::try_from(value) {
            Ok(d) => Money(d),
            Err(e) => {
                debug!("Cannot represent {} as money ({}), using 0", value, e);
                Money::ZERO
            }
        }
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn inner(self) -> Decimal {
        self.0
    }

    fn saturated(positive: bool) -> Self {
        if positive {
            Money::MAX
        } else {
            Money::MIN
        }
    }

    /// `self / denominator * 100` as f64; zero or negative denominators give 0.
    ///
    /// Ratios beyond the decimal range are computed in f64 instead.
    pub fn percent_of(self, denominator: Money) -> f64 {
        if !denominator.is_positive() {
            return 0.0;
        }
        let exact = self
            .0
            .checked_div(denominator.0)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .and_then(|pct| pct.to_f64());
        let pct = exact.unwrap_or_else(|| {
            debug!("Percent of {} / {} overflows, using f64", self, denominator);
            self.to_f64() / denominator.to_f64() * 100.0
        });
        if pct.is_finite() {
            pct
        } else {
            0.0
        }
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Money::from_f64(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.round_dp(2))
    }
}

// Arithmetic saturates at the decimal range instead of panicking.

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Money(sum),
            None => Money::saturated(rhs.0.is_sign_positive()),
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        match self.0.checked_sub(rhs.0) {
            Some(diff) => Money(diff),
            None => Money::saturated(rhs.0.is_sign_negative()),
        }
    }
}

impl Mul for Money {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        match self.0.checked_mul(rhs.0) {
            Some(product) => Money(product),
            None => Money::saturated(self.0.is_sign_negative() == rhs.0.is_sign_negative()),
        }
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reliance() -> Stock {
        Stock {
            symbol: Symbol::new("RELIANCE"),
            name: "Reliance Industries".to_string(),
            ltp: 2980.45,
            change: 15.20,
            percent_change: 0.51,
            exchange: Exchange::Nse,
            volume: "4.2M".to_string(),
            open: 2960.0,
            high: 2995.0,
            low: 2950.0,
            prev_close: 2965.25,
            depth: MarketDepth::default(),
        }
    }

    #[test]
    fn test_stock_validation() {
        assert!(reliance().validate().is_ok());

        let mut inverted = reliance();
        inverted.high = 2900.0;
        assert!(matches!(
            inverted.validate(),
            Err(FixtureValidationError::HighLessThanLow { .. })
        ));

        let mut zero = reliance();
        zero.ltp = 0.0;
        assert!(matches!(
            zero.validate(),
            Err(FixtureValidationError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn test_stock_ltp_outside_range_is_accepted() {
        let mut stock = reliance();
        stock.ltp = 3100.0;
        assert!(stock.validate().is_ok());
    }

    #[test]
    fn test_holding_new_is_consistent() {
        let h = Holding::new("RELIANCE", 50, 2800.0, 2980.45);
        assert_eq!(h.invested, 140_000.0);
        assert!((h.current - 149_022.5).abs() < 1e-9);
        assert!((h.pnl - 9_022.5).abs() < 1e-9);
        assert!(h.validate().is_ok());
    }

    #[test]
    fn test_holding_drift_detected() {
        let mut h = Holding::new("TATASTEEL", 1000, 145.0, 152.40);
        h.current = 150_000.0;
        assert!(matches!(
            h.validate(),
            Err(FixtureValidationError::CurrentMismatch { .. })
        ));
    }

    #[test]
    fn test_symbol_serde_is_plain_string() {
        let json = serde_json::to_string(&Symbol::new("TCS")).unwrap();
        assert_eq!(json, "\"TCS\"");
        let parsed: Symbol = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_str(), "TCS");
    }

    #[test]
    fn test_enum_tags_are_uppercase() {
        assert_eq!(serde_json::to_string(&ProductType::Mtf).unwrap(), "\"MTF\"");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        assert_eq!(serde_json::to_string(&Side::Sell).unwrap(), "\"SELL\"");
    }

    #[test]
    fn test_money_sum_is_exact() {
        let total: Money = [0.1, 0.2].iter().map(|v| Money::from_f64(*v)).sum();
        assert_eq!(total.inner(), dec!(0.3));
    }

    #[test]
    fn test_money_percent_of_guards_zero() {
        assert_eq!(Money::from_f64(10.0).percent_of(Money::ZERO), 0.0);
        assert_eq!(Money::from_f64(10.0).percent_of(Money::from_f64(-5.0)), 0.0);
        assert_eq!(Money::from_f64(25.0).percent_of(Money::from_f64(200.0)), 12.5);
    }

    #[test]
    fn test_money_non_finite_is_zero() {
        assert!(Money::from_f64(f64::NAN).is_zero());
        assert!(Money::from_f64(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_money_out_of_range_is_zero() {
        assert!(Money::from_f64(1e30).is_zero());
        assert!(Money::from_f64(-1e30).is_zero());
    }

    #[test]
    fn test_money_arithmetic_saturates() {
        let big = Money::from_f64(5e28);
        assert_eq!(big + big, Money::MAX);
        assert_eq!(-big - big, Money::MIN);
        assert_eq!(big * Money::from_f64(-2.0), Money::MIN);
        assert_eq!(big * big, Money::MAX);

        let mut acc = Money::MAX;
        acc += Money::from_f64(1.0);
        assert_eq!(acc, Money::MAX);
    }

    #[test]
    fn test_money_percent_of_huge_ratio() {
        let pct = Money::from_f64(1e20).percent_of(Money::from_f64(1e-10));
        assert!(pct.is_finite());
        assert!(pct > 1e30);
    }

    #[test]
    fn test_depth_totals() {
        let depth = MarketDepth {
            buy: vec![
                DepthLevel { price: 10.0, qty: 100 },
                DepthLevel { price: 9.9, qty: 250 },
            ],
            sell: vec![DepthLevel { price: 10.1, qty: 40 }],
        };
        assert_eq!(depth.total_buy_qty(), 350);
        assert_eq!(depth.total_sell_qty(), 40);
        assert_eq!(MarketDepth::default().total_buy_qty(), 0);
    }

    #[test]
    fn test_product_and_side_parse() {
        assert_eq!("mtf".parse::<ProductType>(), Ok(ProductType::Mtf));
        assert_eq!("CNC".parse::<ProductType>(), Ok(ProductType::Cnc));
        assert!("BO".parse::<ProductType>().is_err());
        assert_eq!("Sell".parse::<Side>(), Ok(Side::Sell));
        assert!("short".parse::<Side>().is_err());
    }
}
