//! Order book views and order-pad estimates

use serde::Serialize;

use crate::types::{Order, OrderStatus, ProductType};

/// Synthetic leverage applied to MTF orders
pub const MTF_LEVERAGE: f64 = 4.0;

/// Synthetic daily interest on the funded part of an MTF order (0.05%)
pub const MTF_DAILY_INTEREST: f64 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderFilter {
    #[default]
    All,
    /// Pending orders
    Open,
    /// Executed, rejected or cancelled orders
    History,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Open => order.status == OrderStatus::Pending,
            OrderFilter::History => matches!(
                order.status,
                OrderStatus::Executed | OrderStatus::Rejected | OrderStatus::Cancelled
            ),
        }
    }

    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        orders.iter().filter(|o| self.matches(o)).collect()
    }
}

impl std::str::FromStr for OrderFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(OrderFilter::All),
            "open" => Ok(OrderFilter::Open),
            "history" => Ok(OrderFilter::History),
            other => Err(format!("unknown order filter '{}' (expected all, open or history)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMode {
    Market,
    Limit(LimitPrice),
}

/// Limit price in paise so the mode stays `Eq`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPrice(u64);

impl LimitPrice {
    pub fn from_rupees(price: f64) -> Self {
        LimitPrice((price.max(0.0) * 100.0).round() as u64)
    }

    pub fn rupees(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Cost preview shown before placing an order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderEstimate {
    pub value: f64,
    pub margin_required: f64,
    pub daily_interest: f64,
}

/// Estimate order value and margin. Market orders are priced at `ltp`.
pub fn estimate_order(ltp: f64, qty: u64, mode: PriceMode, product: ProductType) -> OrderEstimate {
    let price = match mode {
        PriceMode::Market => ltp,
        PriceMode::Limit(limit) => limit.rupees(),
    };
    let value = price * qty as f64;

    let (margin_required, daily_interest) = if product == ProductType::Mtf {
        let margin = value / MTF_LEVERAGE;
        (margin, (value - margin) * MTF_DAILY_INTEREST)
    } else {
        (value, 0.0)
    };

    OrderEstimate {
        value,
        margin_required,
        daily_interest,
    }
}
