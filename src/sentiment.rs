//! Per-stock sentiment and quant ratings
//!
//! Coverage is partial: most symbols have no record, so lookups return
//! `Option` and every caller decides what a missing record means.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Holding, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consensus {
    Buy,
    Hold,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Uptrend,
    Downtrend,
    Sideways,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volatility {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantLabel {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Hold,
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

/// Letter grade ("A+" .. "F")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    C,
    D,
    F,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystRating {
    pub buy: u8,
    pub hold: u8,
    pub sell: u8,
    pub consensus: Consensus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsSplit {
    pub positive: u8,
    pub neutral: u8,
    pub negative: u8,
}

impl NewsSplit {
    pub fn is_net_positive(&self) -> bool {
        self.positive > self.negative
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantGrades {
    pub valuation: Grade,
    pub growth: Grade,
    pub profitability: Grade,
    pub momentum: Grade,
    pub risk: Volatility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantRating {
    /// 0–100
    pub score: u8,
    pub label: QuantLabel,
    pub metrics: QuantGrades,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockOverview {
    /// Display label ("19.5L Cr")
    pub market_cap: String,
    pub industry: String,
    pub pe: f64,
    pub sector_pe: f64,
    pub pb: f64,
    pub dividend_yield: f64,
    pub roe: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    #[serde(default)]
    pub market_leader: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceForecast {
    pub low: f64,
    pub high: f64,
    pub median: f64,
    pub current: f64,
    /// Percent
    pub upside: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSentiment {
    pub symbol: Symbol,
    /// 0–100
    pub score: u8,
    pub sentiment: Mood,
    pub analyst_rating: AnalystRating,
    pub news: NewsSplit,
    pub technicals: Trend,
    pub volatility: Volatility,
    pub earnings_outlook: Outlook,
    pub next_event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quant: Option<QuantRating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<StockOverview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<PriceForecast>,
}

impl StockSentiment {
    pub fn industry(&self) -> &str {
        self.overview
            .as_ref()
            .map(|o| o.industry.as_str())
            .unwrap_or("Equity")
    }
}

/// Symbol → sentiment record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentimentBook {
    records: HashMap<Symbol, StockSentiment>,
}

impl SentimentBook {
    pub fn new(records: impl IntoIterator<Item = StockSentiment>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|r| (r.symbol.clone(), r))
                .collect(),
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&StockSentiment> {
        self.records.get(symbol)
    }

    /// Quant score, treating a missing record or rating as 0
    pub fn quant_score(&self, symbol: &Symbol) -> u8 {
        self.get(symbol)
            .and_then(|s| s.quant.as_ref())
            .map_or(0, |q| q.score)
    }

    pub fn is_bullish(&self, symbol: &Symbol) -> bool {
        self.get(symbol)
            .is_some_and(|s| s.sentiment == Mood::Bullish)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pair every holding with its sentiment record, if any
    pub fn holding_insights<'a>(
        &'a self,
        holdings: &'a [Holding],
    ) -> Vec<(&'a Holding, Option<&'a StockSentiment>)> {
        holdings.iter().map(|h| (h, self.get(&h.symbol))).collect()
    }
}
