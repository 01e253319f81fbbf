//! Curated stock baskets
//!
//! Baskets are fixture records. Constituent symbols are not required to
//! exist in the stock universe.

use serde::{Deserialize, Serialize};

use crate::types::{FixtureValidationError, Symbol};

/// Basket category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BasketKind {
    Theme,
    Defensive,
    Volatility,
    Dividend,
}

impl std::str::FromStr for BasketKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "theme" => Ok(BasketKind::Theme),
            "defensive" => Ok(BasketKind::Defensive),
            "volatility" => Ok(BasketKind::Volatility),
            "dividend" => Ok(BasketKind::Dividend),
            other => Err(format!(
                "unknown basket kind '{}' (expected theme, defensive, volatility or dividend)",
                other
            )),
        }
    }
}

/// Three-step label used for risk and volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Popularity {
    High,
    Medium,
}

/// Basket member with an integer weight percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    pub symbol: Symbol,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    pub id: String,
    pub name: String,
    pub kind: BasketKind,
    pub description: String,
    /// Historical CAGR in percent
    pub cagr: f64,
    pub min_invest: f64,
    pub risk: Level,
    pub volatility: Level,
    pub popularity: Popularity,
    pub stocks: Vec<Constituent>,
}

/// Amount routed to one constituent when investing the basket minimum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstituentAllocation {
    pub symbol: Symbol,
    pub weight: u32,
    pub amount: f64,
}

/// Aggregate view of a basket investment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketPlan {
    pub basket_id: String,
    pub total_weight: u32,
    pub amount: f64,
    pub allocations: Vec<ConstituentAllocation>,
}

impl Basket {
    pub fn total_weight(&self) -> u32 {
        self.stocks.iter().map(|c| c.weight).sum()
    }

    /// Weights must sum to 100
    pub fn validate(&self) -> Result<(), FixtureValidationError> {
        let total = self.total_weight();
        if total != 100 {
            return Err(FixtureValidationError::BasketWeights {
                basket: self.id.clone(),
                total,
            });
        }
        Ok(())
    }

    /// Split `amount` across constituents by weight.
    ///
    /// Each constituent receives `amount * weight / 100`; if the weights do
    /// not sum to 100 the amounts will not sum to `amount` either.
    pub fn plan(&self, amount: f64) -> BasketPlan {
        let allocations = self
            .stocks
            .iter()
            .map(|c| ConstituentAllocation {
                symbol: c.symbol.clone(),
                weight: c.weight,
                amount: amount * c.weight as f64 / 100.0,
            })
            .collect();

        BasketPlan {
            basket_id: self.id.clone(),
            total_weight: self.total_weight(),
            amount,
            allocations,
        }
    }

    /// Plan for the basket's minimum investment
    pub fn min_plan(&self) -> BasketPlan {
        self.plan(self.min_invest)
    }
}

/// Baskets of the given kind, or all baskets for `None`
pub fn filter_by_kind(baskets: &[Basket], kind: Option<BasketKind>) -> Vec<&Basket> {
    baskets
        .iter()
        .filter(|b| kind.map_or(true, |k| b.kind == k))
        .collect()
}

pub fn find_basket<'a>(baskets: &'a [Basket], id: &str) -> Option<&'a Basket> {
    baskets.iter().find(|b| b.id == id)
}
