//! Fixture store
//!
//! All market and account data is compiled in. [`FixtureStore::builtin`]
//! builds the default data set; [`FixtureStore::from_file`] loads the same
//! shapes from JSON so a different data source can be swapped in without
//! touching the metrics or simulator.

use anyhow::{Context, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::basket::{Basket, BasketKind, Constituent, Level, Popularity};
use crate::behavior::{
    AlertKind, AlertSeverity, BehaviorAlert, BehaviorMetrics, BehaviorProfile, RiskLevel,
};
use crate::sentiment::{
    AnalystRating, Consensus, Grade, Mood, NewsSplit, Outlook, PriceForecast, QuantGrades,
    QuantLabel, QuantRating, SentimentBook, StockOverview, StockSentiment, Trend, Volatility,
};
use crate::session::{UserData, UserId, UserProfile};
use crate::types::{
    DepthLevel, Exchange, FixtureValidationError, Holding, Index, MarketDepth, Order,
    OrderStatus, Position, ProductType, Side, Stock, Symbol,
};
use crate::watchlist::{WatchlistGroup, WatchlistKind};

/// One slice of a static distribution table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub name: String,
    /// Percent of portfolio
    pub value: f64,
    /// Period return in percent, where the table carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
}

/// Static distribution tables. These are display fixtures and are not
/// reconciled with any user's holdings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationTables {
    pub sectors: Vec<AllocationSlice>,
    pub sub_sectors: Vec<AllocationSlice>,
    pub market_cap: Vec<AllocationSlice>,
    pub risk_distribution: Vec<AllocationSlice>,
}

/// Margin trade funding account summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MtfStats {
    pub total_debt: f64,
    pub margin_used: f64,
    pub available_limit: f64,
    pub accrued_interest: f64,
    /// Percent per day
    pub interest_rate: f64,
    pub risk_status: String,
}

/// Read-only fixture collections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureStore {
    pub indices: Vec<Index>,
    pub stocks: Vec<Stock>,
    pub smart_lists: Vec<WatchlistGroup>,
    pub theme_lists: Vec<WatchlistGroup>,
    pub mtf_positions: Vec<Position>,
    pub mtf_stats: MtfStats,
    pub baskets: Vec<Basket>,
    pub allocation: AllocationTables,
    #[serde(default)]
    pub sentiment: SentimentBook,
    pub users: Vec<UserData>,
}

impl FixtureStore {
    /// Load fixtures from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture file: {}", path.display()))?;
        let store: FixtureStore =
            serde_json::from_str(&contents).context("Failed to parse fixture JSON")?;
        info!(
            "Loaded fixtures from {}: {} stocks, {} baskets, {} users",
            path.display(),
            store.stocks.len(),
            store.baskets.len(),
            store.users.len()
        );
        Ok(store)
    }

    pub fn stock(&self, symbol: &Symbol) -> Option<&Stock> {
        self.stocks.iter().find(|s| &s.symbol == symbol)
    }

    /// Check every fixture invariant and collect all violations
    pub fn validate(&self) -> Vec<FixtureValidationError> {
        let mut issues = Vec::new();

        for stock in &self.stocks {
            if let Err(e) = stock.validate() {
                issues.push(e);
            }
        }
        for symbol in self.stocks.iter().map(|s| &s.symbol).duplicates() {
            issues.push(FixtureValidationError::DuplicateSymbol(symbol.clone()));
        }

        for user in &self.users {
            for holding in &user.holdings {
                if let Err(e) = holding.validate() {
                    issues.push(e);
                }
            }
            for id in user.orders.iter().map(|o| &o.id).duplicates() {
                issues.push(FixtureValidationError::DuplicateOrderId(id.clone()));
            }
        }

        for basket in &self.baskets {
            if let Err(e) = basket.validate() {
                issues.push(e);
            }
        }

        issues
    }

    /// Validate and log each violation. Returns the number of violations;
    /// the data is used as-is either way.
    pub fn validate_and_report(&self) -> usize {
        let issues = self.validate();
        if issues.is_empty() {
            debug!("Fixture validation passed");
        }
        for issue in &issues {
            warn!("Fixture validation: {}", issue);
        }
        issues.len()
    }

    /// The compiled-in data set
    pub fn builtin() -> Self {
        let stocks = builtin_stocks();
        let pick = |idx: &[usize]| -> Vec<Stock> { idx.iter().map(|&i| stocks[i].clone()).collect() };

        let smart_lists = vec![
            group("smart-1", "High Momentum", WatchlistKind::Smart, "Stocks showing strong upward trend & volume", pick(&[0, 4])),
            group("smart-2", "F&O Heat", WatchlistKind::Smart, "Highest OI Buildup for May Series", pick(&[2, 5])),
            group("smart-3", "Social Buzz", WatchlistKind::Smart, "Most discussed on Twitter & News", pick(&[0, 1])),
        ];
        let theme_lists = vec![
            group("theme-1", "EV Revolution", WatchlistKind::Theme, "Battery, Auto & Power stocks", pick(&[5, 0])),
            group("theme-2", "PSU Rally", WatchlistKind::Theme, "Public Sector Undertakings", pick(&[5])),
            group("theme-3", "AI Winners", WatchlistKind::Theme, "IT Services & Tech Infra", pick(&[1, 3])),
        ];

        FixtureStore {
            indices: builtin_indices(),
            stocks,
            smart_lists,
            theme_lists,
            mtf_positions: vec![
                position("TATASTEEL", ProductType::Mtf, 2000, 148.00, 152.40, 8800.0, Side::Buy),
                position("INFY", ProductType::Mtf, 100, 1620.00, 1650.30, 3030.0, Side::Buy),
            ],
            mtf_stats: MtfStats {
                total_debt: 185_000.0,
                margin_used: 62_500.0,
                available_limit: 25_000.0,
                accrued_interest: 345.50,
                interest_rate: 0.049,
                risk_status: "Safe".to_string(),
            },
            baskets: builtin_baskets(),
            allocation: builtin_allocation(),
            sentiment: builtin_sentiment(),
            users: builtin_users(),
        }
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Builders
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn stock(
    symbol: &str,
    name: &str,
    ltp: f64,
    change: f64,
    percent_change: f64,
    volume: &str,
    low: f64,
    high: f64,
    open: f64,
    prev_close: f64,
    buy: &[(f64, u64)],
    sell: &[(f64, u64)],
) -> Stock {
    let ladder = |levels: &[(f64, u64)]| -> Vec<DepthLevel> {
        levels
            .iter()
            .map(|&(price, qty)| DepthLevel { price, qty })
            .collect()
    };
    Stock {
        symbol: Symbol::new(symbol),
        name: name.to_string(),
        ltp,
        change,
        percent_change,
        exchange: Exchange::Nse,
        volume: volume.to_string(),
        open,
        high,
        low,
        prev_close,
        depth: MarketDepth {
            buy: ladder(buy),
            sell: ladder(sell),
        },
    }
}

fn group(id: &str, name: &str, kind: WatchlistKind, description: &str, stocks: Vec<Stock>) -> WatchlistGroup {
    WatchlistGroup {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: Some(description.to_string()),
        stocks,
    }
}

fn position(symbol: &str, product: ProductType, qty: u64, avg_price: f64, ltp: f64, pnl: f64, side: Side) -> Position {
    Position {
        symbol: Symbol::new(symbol),
        product,
        qty,
        avg_price,
        ltp,
        pnl,
        side,
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    symbol: &str,
    side: Side,
    product: ProductType,
    qty: u64,
    price: f64,
    status: OrderStatus,
    time: &str,
    message: Option<&str>,
) -> Order {
    Order {
        id: id.to_string(),
        symbol: Symbol::new(symbol),
        side,
        product,
        qty,
        price,
        status,
        time: time.to_string(),
        message: message.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn basket(
    id: &str,
    name: &str,
    kind: BasketKind,
    description: &str,
    cagr: f64,
    min_invest: f64,
    levels: (Level, Level, Popularity),
    stocks: &[(&str, u32)],
) -> Basket {
    Basket {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: description.to_string(),
        cagr,
        min_invest,
        risk: levels.0,
        volatility: levels.1,
        popularity: levels.2,
        stocks: stocks
            .iter()
            .map(|&(symbol, weight)| Constituent {
                symbol: Symbol::new(symbol),
                weight,
            })
            .collect(),
    }
}

fn slice(name: &str, value: f64, return_pct: Option<f64>, risk: Option<&str>) -> AllocationSlice {
    AllocationSlice {
        name: name.to_string(),
        value,
        return_pct,
        risk: risk.map(str::to_string),
    }
}

fn alert(id: &str, kind: AlertKind, severity: AlertSeverity, message: &str, suggestion: &str, timestamp: &str) -> BehaviorAlert {
    BehaviorAlert {
        id: id.to_string(),
        kind,
        severity,
        message: message.to_string(),
        suggestion: suggestion.to_string(),
        timestamp: timestamp.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn stored_holding(symbol: &str, qty: u64, avg_price: f64, ltp: f64, invested: f64, current: f64, pnl: f64, pnl_percent: f64) -> Holding {
    Holding {
        symbol: Symbol::new(symbol),
        qty,
        avg_price,
        ltp,
        invested,
        current,
        pnl,
        pnl_percent,
    }
}

// =============================================================================
// Data
// =============================================================================

fn builtin_indices() -> Vec<Index> {
    let index = |name: &str, value: f64, change: f64, percent_change: f64, data: &[f64]| Index {
        name: name.to_string(),
        value,
        change,
        percent_change,
        data: data.to_vec(),
    };
    vec![
        index("NIFTY 50", 22450.30, 124.50, 0.56, &[22300.0, 22350.0, 22320.0, 22380.0, 22400.0, 22420.0, 22450.0]),
        index("BANKNIFTY", 47890.10, -210.40, -0.44, &[48100.0, 48050.0, 48000.0, 47950.0, 47900.0, 47850.0, 47890.0]),
        index("FINNIFTY", 21200.55, 45.10, 0.21, &[21150.0, 21180.0, 21160.0, 21190.0, 21210.0, 21200.0, 21200.55]),
        index("SENSEX", 73850.20, 350.10, 0.48, &[]),
        index("NIFTY IT", 36500.00, -120.50, -0.33, &[]),
    ]
}

fn builtin_stocks() -> Vec<Stock> {
    vec![
        stock(
            "RELIANCE", "Reliance Industries", 2980.45, 15.20, 0.51, "4.2M",
            2950.00, 2995.00, 2960.00, 2965.25,
            &[(2980.40, 500), (2980.35, 1200), (2980.30, 450)],
            &[(2980.50, 300), (2980.55, 800), (2980.60, 1500)],
        ),
        stock(
            "TCS", "Tata Consultancy Svcs", 4120.10, -25.50, -0.62, "1.1M",
            4100.00, 4160.00, 4150.00, 4145.60,
            &[(4120.00, 100), (4119.50, 200), (4119.00, 50)],
            &[(4120.20, 400), (4120.50, 100), (4121.00, 250)],
        ),
        stock(
            "HDFCBANK", "HDFC Bank Ltd", 1450.60, 10.10, 0.70, "12.5M",
            1435.00, 1460.00, 1440.00, 1440.50,
            &[(1450.50, 5000), (1450.40, 2000), (1450.00, 10000)],
            &[(1450.70, 4000), (1450.80, 1500), (1451.00, 8000)],
        ),
        stock(
            "INFY", "Infosys Ltd", 1650.30, 5.40, 0.33, "3.8M",
            1640.00, 1665.00, 1645.00, 1644.90,
            &[(1650.00, 300), (1649.80, 600), (1649.50, 900)],
            &[(1650.50, 200), (1650.70, 400), (1651.00, 700)],
        ),
        stock(
            "ADANIENT", "Adani Enterprises", 3200.00, -45.00, -1.39, "2.1M",
            3180.00, 3250.00, 3240.00, 3245.00,
            &[(3199.00, 200), (3198.00, 500), (3195.00, 1000)],
            &[(3200.50, 100), (3201.00, 300), (3202.00, 600)],
        ),
        stock(
            "TATASTEEL", "Tata Steel Ltd", 152.40, 2.40, 1.60, "8.5M",
            149.00, 153.00, 150.00, 150.00,
            &[(152.30, 1500), (152.20, 3000), (152.00, 5000)],
            &[(152.45, 2000), (152.50, 4000), (152.60, 1200)],
        ),
    ]
}

fn builtin_baskets() -> Vec<Basket> {
    use Level::{High, Low, Medium};
    vec![
        basket(
            "ev-revolution", "EV Revolution", BasketKind::Theme,
            "Invest in companies leading the Electric Vehicle transition in India.",
            28.5, 15_500.0, (High, High, Popularity::High),
            &[("TATAMOTORS", 30), ("TATAPOWER", 25), ("OLECTRA", 20), ("EXIDEIND", 25)],
        ),
        basket(
            "banking-leaders", "Banking Leaders", BasketKind::Theme,
            "Top private and public sector banks with strong balance sheets.",
            16.2, 22_000.0, (Medium, Medium, Popularity::High),
            &[("HDFCBANK", 35), ("ICICIBANK", 30), ("SBIN", 20), ("AXISBANK", 15)],
        ),
        basket(
            "fmcg-shield", "FMCG Shield", BasketKind::Defensive,
            "Low volatility stocks for stable returns during market uncertainty.",
            12.4, 12_000.0, (Low, Low, Popularity::Medium),
            &[("HINDUNILVR", 40), ("ITC", 30), ("NESTLEIND", 30)],
        ),
        basket(
            "high-beta", "High Beta Movers", BasketKind::Volatility,
            "Aggressive basket for traders seeking high short-term momentum.",
            35.8, 8_000.0, (High, High, Popularity::Medium),
            &[("ADANIENT", 30), ("DLF", 25), ("INDUSINDBK", 25), ("METROPOLIS", 20)],
        ),
        basket(
            "dividend-kings", "Dividend Aristocrats", BasketKind::Dividend,
            "Companies with a consistent track record of high dividend payouts.",
            14.5, 18_000.0, (Low, Low, Popularity::Medium),
            &[("VEDL", 30), ("COALINDIA", 25), ("IOC", 25), ("PFC", 20)],
        ),
    ]
}

fn builtin_allocation() -> AllocationTables {
    AllocationTables {
        sectors: vec![
            slice("Financials", 32.5, Some(12.5), None),
            slice("Technology", 24.2, Some(-2.3), None),
            slice("Energy", 18.5, Some(8.1), None),
            slice("Consumer", 12.8, Some(4.2), None),
            slice("Metals", 8.5, Some(5.4), None),
            slice("Others", 3.5, Some(1.2), None),
        ],
        sub_sectors: vec![
            slice("Private Banks", 22.5, None, None),
            slice("IT Services", 24.2, None, None),
            slice("Oil & Gas", 18.5, None, None),
            slice("FMCG", 12.8, None, None),
            slice("PSU Banks", 10.0, None, None),
            slice("Steel", 8.5, None, None),
        ],
        market_cap: vec![
            slice("Large Cap", 62.0, None, Some("Low")),
            slice("Mid Cap", 28.0, None, Some("Moderate")),
            slice("Small Cap", 10.0, None, Some("High")),
        ],
        risk_distribution: vec![
            slice("Low Risk", 45.0, None, None),
            slice("Moderate", 35.0, None, None),
            slice("High Risk", 20.0, None, None),
        ],
    }
}

fn builtin_sentiment() -> SentimentBook {
    let rating = |buy, hold, sell, consensus| AnalystRating {
        buy,
        hold,
        sell,
        consensus,
    };
    let news = |positive, neutral, negative| NewsSplit {
        positive,
        neutral,
        negative,
    };
    let quant = |score, label, v, g, p, m, risk| QuantRating {
        score,
        label,
        metrics: QuantGrades {
            valuation: v,
            growth: g,
            profitability: p,
            momentum: m,
            risk,
        },
    };

    SentimentBook::new(vec![
        StockSentiment {
            symbol: Symbol::new("RELIANCE"),
            score: 82,
            sentiment: Mood::Bullish,
            analyst_rating: rating(85, 10, 5, Consensus::Buy),
            news: news(70, 20, 10),
            technicals: Trend::Uptrend,
            volatility: Volatility::Low,
            earnings_outlook: Outlook::Positive,
            next_event: "AGM in 15 Days".to_string(),
            quant: Some(quant(82, QuantLabel::StrongBuy, Grade::BPlus, Grade::A, Grade::APlus, Grade::B, Volatility::Low)),
            overview: Some(StockOverview {
                market_cap: "19.5L Cr".to_string(),
                industry: "Oil & Gas / Telecom".to_string(),
                pe: 28.5,
                sector_pe: 24.1,
                pb: 2.4,
                dividend_yield: 0.3,
                roe: 9.8,
                high_52w: 3025.0,
                low_52w: 2250.0,
                market_leader: true,
            }),
            forecast: Some(PriceForecast {
                low: 2750.0,
                high: 3350.0,
                median: 3100.0,
                current: 2980.45,
                upside: 12.4,
            }),
        },
        StockSentiment {
            symbol: Symbol::new("TATASTEEL"),
            score: 65,
            sentiment: Mood::Neutral,
            analyst_rating: rating(45, 40, 15, Consensus::Hold),
            news: news(40, 40, 20),
            technicals: Trend::Sideways,
            volatility: Volatility::Medium,
            earnings_outlook: Outlook::Neutral,
            next_event: "Results on 25th May".to_string(),
            quant: Some(quant(39, QuantLabel::Sell, Grade::A, Grade::D, Grade::C, Grade::D, Volatility::Medium)),
            overview: Some(StockOverview {
                market_cap: "1.9L Cr".to_string(),
                industry: "Metals".to_string(),
                pe: 14.2,
                sector_pe: 16.5,
                pb: 1.8,
                dividend_yield: 2.4,
                roe: 12.5,
                high_52w: 165.0,
                low_52w: 128.0,
                market_leader: false,
            }),
            forecast: Some(PriceForecast {
                low: 130.0,
                high: 175.0,
                median: 158.0,
                current: 152.40,
                upside: 3.6,
            }),
        },
        StockSentiment {
            symbol: Symbol::new("TCS"),
            score: 45,
            sentiment: Mood::Bearish,
            analyst_rating: rating(30, 40, 30, Consensus::Hold),
            news: news(20, 50, 30),
            technicals: Trend::Downtrend,
            volatility: Volatility::Low,
            earnings_outlook: Outlook::Negative,
            next_event: "Dividend Ex-Date Tom".to_string(),
            quant: Some(quant(84, QuantLabel::StrongBuy, Grade::C, Grade::A, Grade::APlus, Grade::A, Volatility::Low)),
            overview: Some(StockOverview {
                market_cap: "14.5L Cr".to_string(),
                industry: "IT Services".to_string(),
                pe: 32.1,
                sector_pe: 28.4,
                pb: 12.5,
                dividend_yield: 1.2,
                roe: 45.8,
                high_52w: 4250.0,
                low_52w: 3300.0,
                market_leader: true,
            }),
            forecast: None,
        },
        StockSentiment {
            symbol: Symbol::new("INFY"),
            score: 46,
            sentiment: Mood::Bearish,
            analyst_rating: rating(20, 50, 30, Consensus::Hold),
            news: news(30, 40, 30),
            technicals: Trend::Downtrend,
            volatility: Volatility::Medium,
            earnings_outlook: Outlook::Neutral,
            next_event: "Results soon".to_string(),
            quant: Some(quant(46, QuantLabel::Sell, Grade::C, Grade::C, Grade::A, Grade::D, Volatility::Low)),
            overview: None,
            forecast: None,
        },
        StockSentiment {
            symbol: Symbol::new("HDFCBANK"),
            score: 65,
            sentiment: Mood::Neutral,
            analyst_rating: rating(70, 20, 10, Consensus::Buy),
            news: news(50, 30, 20),
            technicals: Trend::Sideways,
            volatility: Volatility::Low,
            earnings_outlook: Outlook::Positive,
            next_event: "None".to_string(),
            quant: Some(quant(65, QuantLabel::Hold, Grade::B, Grade::B, Grade::A, Grade::C, Volatility::Low)),
            overview: None,
            forecast: None,
        },
    ])
}

fn builtin_users() -> Vec<UserData> {
    let john = UserData {
        profile: UserProfile::new(UserId::JohnDoe, "John Doe", "JD", true, "SHR8821"),
        holdings: vec![
            stored_holding("RELIANCE", 50, 2800.00, 2980.45, 140_000.0, 149_022.50, 9_022.50, 6.44),
            stored_holding("TATASTEEL", 1000, 145.00, 152.40, 145_000.0, 152_400.0, 7_400.0, 5.10),
        ],
        positions: vec![
            position("NIFTY 23MAY 22500 CE", ProductType::Nrml, 50, 120.50, 145.00, 1225.00, Side::Buy),
            position("BANKNIFTY 23MAY 48000 PE", ProductType::Mis, 15, 340.00, 310.00, -450.00, Side::Buy),
        ],
        orders: vec![
            order("ORD101", "RELIANCE", Side::Buy, ProductType::Cnc, 50, 2980.45, OrderStatus::Executed, "10:30:24", None),
            order("ORD102", "TATASTEEL", Side::Sell, ProductType::Mis, 200, 155.00, OrderStatus::Pending, "11:15:10", None),
            order("ORD103", "HDFCBANK", Side::Buy, ProductType::Cnc, 10, 1460.00, OrderStatus::Rejected, "09:20:05", Some("Insufficient Funds")),
            order("ORD104", "NIFTY 23MAY 22500 CE", Side::Buy, ProductType::Nrml, 50, 120.00, OrderStatus::Executed, "09:16:00", None),
        ],
        behavior: Some(BehaviorProfile {
            score: 54,
            risk_level: RiskLevel::High,
            metrics: BehaviorMetrics {
                sl_usage_percent: 18.0,
                win_streak: 5,
                trades_last_hour: 27,
                avg_loss_recovery: "90s".to_string(),
                exposure_percent: 68.0,
            },
            alerts: vec![
                alert("a1", AlertKind::Revenge, AlertSeverity::High, "Revenge Trading Detected",
                    "You placed a trade 90s after a loss. Take a 5 min break.", "2 mins ago"),
                alert("a2", AlertKind::NoSl, AlertSeverity::Critical, "Stop-Loss Missing",
                    "82% of your active trades have no SL. Protect capital now.", "Just now"),
            ],
        }),
    };

    let sarah = UserData::empty(UserProfile::new(UserId::SarahParker, "Sarah Parker", "SP", true, "SHR9902"));

    let david = UserData {
        profile: UserProfile::new(UserId::DavidMorgan, "David Morgan", "DM", true, "SHR7743"),
        holdings: vec![
            stored_holding("TCS", 200, 3800.00, 4120.10, 760_000.0, 824_020.0, 64_020.0, 8.42),
            stored_holding("HDFCBANK", 500, 1420.00, 1450.60, 710_000.0, 725_300.0, 15_300.0, 2.15),
        ],
        positions: vec![],
        orders: vec![order("ORD201", "TCS", Side::Buy, ProductType::Cnc, 50, 4050.00, OrderStatus::Executed, "Yesterday", None)],
        behavior: Some(BehaviorProfile {
            score: 92,
            risk_level: RiskLevel::Disciplined,
            metrics: BehaviorMetrics {
                sl_usage_percent: 98.0,
                win_streak: 12,
                trades_last_hour: 1,
                avg_loss_recovery: "N/A".to_string(),
                exposure_percent: 25.0,
            },
            alerts: vec![
                alert("d1", AlertKind::Discipline, AlertSeverity::Positive, "Smart Risk Management",
                    "You consistently set stop-loss and avoid revenge trading.", "Ongoing"),
                alert("d2", AlertKind::Strategy, AlertSeverity::Positive, "Capital Protected",
                    "Your losses are small and controlled, allowing long-term compounding.", "Ongoing"),
                alert("d3", AlertKind::Patience, AlertSeverity::Positive, "Low Emotional Volatility",
                    "Your trade timing and sizing indicates high discipline.", "Ongoing"),
            ],
        }),
    };

    vec![john, sarah, david]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fixtures_are_valid() {
        let store = FixtureStore::builtin();
        assert_eq!(store.validate(), vec![]);
    }

    #[test]
    fn test_builtin_counts() {
        let store = FixtureStore::builtin();
        assert_eq!(store.stocks.len(), 6);
        assert_eq!(store.indices.len(), 5);
        assert_eq!(store.baskets.len(), 5);
        assert_eq!(store.smart_lists.len(), 3);
        assert_eq!(store.theme_lists.len(), 3);
        assert_eq!(store.users.len(), 3);
        assert_eq!(store.sentiment.len(), 5);
    }

    #[test]
    fn test_smart_lists_reference_stock_universe() {
        let store = FixtureStore::builtin();
        let momentum = &store.smart_lists[0];
        let symbols: Vec<&str> = momentum.stocks.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["RELIANCE", "ADANIENT"]);
        assert!(store
            .smart_lists
            .iter()
            .chain(&store.theme_lists)
            .flat_map(|g| &g.stocks)
            .all(|s| store.stock(&s.symbol).is_some()));
    }

    #[test]
    fn test_validation_reports_every_issue() {
        let mut store = FixtureStore::builtin();
        store.stocks[0].high = 1.0;
        store.stocks.push(store.stocks[1].clone());
        store.baskets[0].stocks.pop();
        store.users[0].holdings[0].invested = 1.0;

        let issues = store.validate();
        assert_eq!(issues.len(), 4);
        assert!(issues
            .iter()
            .any(|e| matches!(e, FixtureValidationError::DuplicateSymbol(s) if s.as_str() == "TCS")));
        assert!(issues
            .iter()
            .any(|e| matches!(e, FixtureValidationError::BasketWeights { total: 75, .. })));
    }

    #[test]
    fn test_json_round_trip_through_file() {
        let store = FixtureStore::builtin();
        let path = std::env::temp_dir().join(format!("broker_desk_fixtures_{}.json", std::process::id()));
        fs::write(&path, serde_json::to_string_pretty(&store).unwrap()).unwrap();

        let loaded = FixtureStore::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.stocks, store.stocks);
        assert_eq!(loaded.baskets, store.baskets);
        assert_eq!(loaded.sentiment.len(), store.sentiment.len());
        assert!(loaded.validate().is_empty());
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(FixtureStore::from_file("/nonexistent/fixtures.json").is_err());
    }
}
