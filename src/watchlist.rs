//! Watchlist groups and their runtime mutations
//!
//! Three categories of groups are shown: the user's own lists (editable) and
//! the read-only smart and thematic lists shipped with the fixtures.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, info, warn};

use crate::sentiment::SentimentBook;
use crate::types::{Stock, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WatchlistKind {
    Custom,
    Smart,
    Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistGroup {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WatchlistKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stocks: Vec<Stock>,
}

impl WatchlistGroup {
    pub fn custom(id: &str, name: &str, stocks: Vec<Stock>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: WatchlistKind::Custom,
            description: None,
            stocks,
        }
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.stocks.iter().any(|s| &s.symbol == symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WatchlistCategory {
    #[default]
    MyLists,
    Smart,
    Themes,
}

impl std::str::FromStr for WatchlistCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "mylists" | "my" | "custom" => Ok(WatchlistCategory::MyLists),
            "smart" => Ok(WatchlistCategory::Smart),
            "themes" | "theme" => Ok(WatchlistCategory::Themes),
            other => Err(format!("unknown watchlist category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// List order
    #[default]
    Default,
    /// Percent change, highest first
    Change,
    /// Last traded price, highest first
    Ltp,
    /// Quant score, highest first; unrated stocks score 0
    Quant,
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(SortBy::Default),
            "change" => Ok(SortBy::Change),
            "ltp" => Ok(SortBy::Ltp),
            "quant" => Ok(SortBy::Quant),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    /// Smart and thematic lists are read-only
    ReadOnlyCategory,
}

/// Private note pinned to a stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub symbol: Symbol,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Stocks split by sentiment
#[derive(Debug, Clone, PartialEq)]
pub struct Clusters<'a> {
    pub bullish: Vec<&'a Stock>,
    /// Bearish, neutral or without a sentiment record
    pub other: Vec<&'a Stock>,
}

#[derive(Debug, Clone)]
pub struct WatchlistBook {
    universe: Vec<Stock>,
    custom: Vec<WatchlistGroup>,
    smart: Vec<WatchlistGroup>,
    themes: Vec<WatchlistGroup>,
    category: WatchlistCategory,
    active_group_id: String,
    notes: Vec<Note>,
}

impl WatchlistBook {
    /// Build the book with the default custom groups over `universe`
    pub fn new(universe: Vec<Stock>, smart: Vec<WatchlistGroup>, themes: Vec<WatchlistGroup>) -> Self {
        let custom = vec![
            WatchlistGroup::custom("default", "My Watchlist", universe.clone()),
            WatchlistGroup::custom("nifty", "Nifty 50", universe.iter().take(3).cloned().collect()),
            WatchlistGroup::custom(
                "banks",
                "Banking",
                universe
                    .iter()
                    .filter(|s| s.symbol.as_str() == "HDFCBANK")
                    .cloned()
                    .collect(),
            ),
        ];

        Self {
            universe,
            custom,
            smart,
            themes,
            category: WatchlistCategory::MyLists,
            active_group_id: "default".to_string(),
            notes: Vec::new(),
        }
    }

    pub fn category(&self) -> WatchlistCategory {
        self.category
    }

    pub fn groups(&self, category: WatchlistCategory) -> &[WatchlistGroup] {
        match category {
            WatchlistCategory::MyLists => &self.custom,
            WatchlistCategory::Smart => &self.smart,
            WatchlistCategory::Themes => &self.themes,
        }
    }

    /// Groups of the active category
    pub fn current_groups(&self) -> &[WatchlistGroup] {
        self.groups(self.category)
    }

    /// The selected group, else the first group of the active category,
    /// else the first custom group
    pub fn active_group(&self) -> Option<&WatchlistGroup> {
        let groups = self.current_groups();
        groups
            .iter()
            .find(|g| g.id == self.active_group_id)
            .or_else(|| groups.first())
            .or_else(|| self.custom.first())
    }

    /// Change category and select its first group in one step
    pub fn switch_category(&mut self, category: WatchlistCategory) {
        self.category = category;
        if let Some(first) = self.groups(category).first() {
            self.active_group_id = first.id.clone();
        }
        debug!("Watchlist category {:?}, group '{}'", category, self.active_group_id);
    }

    /// Select a group of the active category. Unknown ids are ignored.
    pub fn select_group(&mut self, id: &str) -> bool {
        if self.current_groups().iter().any(|g| g.id == id) {
            self.active_group_id = id.to_string();
            true
        } else {
            warn!("No watchlist group '{}' in {:?}", id, self.category);
            false
        }
    }

    /// Prepend `stock` to the active custom group
    pub fn add_stock(&mut self, stock: &Stock) -> AddOutcome {
        if self.category != WatchlistCategory::MyLists {
            warn!("You can only add stocks to your custom watchlists.");
            return AddOutcome::ReadOnlyCategory;
        }

        let active_id = self.active_group_id.clone();
        match self.custom.iter_mut().find(|g| g.id == active_id) {
            Some(group) if group.contains(&stock.symbol) => AddOutcome::AlreadyPresent,
            Some(group) => {
                group.stocks.insert(0, stock.clone());
                info!("Added {} to '{}'", stock.symbol, group.name);
                AddOutcome::Added
            }
            None => {
                warn!("Active watchlist group '{}' is not a custom list", active_id);
                AddOutcome::ReadOnlyCategory
            }
        }
    }

    /// Remove `symbol` from the active custom group. Absent symbols are a no-op.
    pub fn remove_stock(&mut self, symbol: &Symbol) -> bool {
        let active_id = self.active_group_id.as_str();
        let Some(group) = self.custom.iter_mut().find(|g| g.id == active_id) else {
            return false;
        };
        let before = group.stocks.len();
        group.stocks.retain(|s| &s.symbol != symbol);
        before != group.stocks.len()
    }

    /// Case-insensitive match on symbol or name over the stock universe
    pub fn search(&self, query: &str) -> Vec<&Stock> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.universe
            .iter()
            .filter(|s| {
                s.symbol.as_str().to_lowercase().contains(&query)
                    || s.name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Stocks of the active group in the requested order
    pub fn sorted_stocks(&self, sort: SortBy, sentiment: &SentimentBook) -> Vec<&Stock> {
        let stocks = self.active_group().map(|g| g.stocks.as_slice()).unwrap_or(&[]);
        sort_stocks(stocks, sort, sentiment)
    }

    /// Attach a note to `symbol`. An existing note is kept and returned;
    /// blank text adds nothing.
    pub fn add_note(&mut self, symbol: &Symbol, text: &str) -> Option<&Note> {
        if let Some(pos) = self.notes.iter().position(|n| &n.symbol == symbol) {
            return self.notes.get(pos);
        }
        if text.trim().is_empty() {
            return None;
        }

        let created_at = Utc::now();
        self.notes.push(Note {
            id: format!("{}-{}", created_at.timestamp_millis(), self.notes.len()),
            symbol: symbol.clone(),
            text: text.to_string(),
            created_at,
        });
        self.notes.last()
    }

    pub fn note(&self, symbol: &Symbol) -> Option<&Note> {
        self.notes.iter().find(|n| &n.symbol == symbol)
    }
}

pub fn sort_stocks<'a>(stocks: &'a [Stock], sort: SortBy, sentiment: &SentimentBook) -> Vec<&'a Stock> {
    match sort {
        SortBy::Default => stocks.iter().collect(),
        SortBy::Change => stocks
            .iter()
            .sorted_by_key(|s| Reverse(OrderedFloat(s.percent_change)))
            .collect(),
        SortBy::Ltp => stocks
            .iter()
            .sorted_by_key(|s| Reverse(OrderedFloat(s.ltp)))
            .collect(),
        SortBy::Quant => stocks
            .iter()
            .sorted_by_key(|s| Reverse(sentiment.quant_score(&s.symbol)))
            .collect(),
    }
}

pub fn clusters<'a>(stocks: &'a [Stock], sentiment: &SentimentBook) -> Clusters<'a> {
    let (bullish, other): (Vec<&Stock>, Vec<&Stock>) = stocks
        .iter()
        .partition(|s| sentiment.is_bullish(&s.symbol));
    Clusters { bullish, other }
}
