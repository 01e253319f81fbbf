//! Hash-route table
//!
//! Paths look like `#/stock/RELIANCE`. A leading `#` and a trailing `/` are
//! accepted; anything unknown redirects to the landing page.

use std::fmt;
use tracing::debug;

use crate::types::Symbol;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Onboarding,
    Dashboard,
    Watchlist,
    Stock(Symbol),
    Portfolio,
    Funds,
    Insights,
    OptionChain,
    Profile,
    Baskets,
    Basket(String),
    MtfDashboard,
    Behavior,
    Allocation,
}

impl Route {
    /// Resolve a path. Unknown paths fall back to [`Route::Root`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let trimmed = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let trimmed = trimmed.trim_end_matches('/');

        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["onboarding"] => Route::Onboarding,
            ["dashboard"] => Route::Dashboard,
            ["watchlist"] => Route::Watchlist,
            ["stock", symbol] => Route::Stock(Symbol::new(symbol)),
            ["portfolio"] => Route::Portfolio,
            ["funds"] => Route::Funds,
            ["insights"] => Route::Insights,
            ["option-chain"] => Route::OptionChain,
            ["profile"] => Route::Profile,
            ["baskets"] => Route::Baskets,
            ["basket", id] => Route::Basket(id.to_string()),
            ["mtf-dashboard"] => Route::MtfDashboard,
            ["behavior"] => Route::Behavior,
            ["allocation"] => Route::Allocation,
            _ => {
                debug!("Unknown route '{}', redirecting to /", path);
                Route::Root
            }
        }
    }

    /// Pages rendered without the bottom navigation bar
    pub fn is_full_screen(&self) -> bool {
        matches!(self, Route::Root | Route::Onboarding)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Root => write!(f, "/"),
            Route::Onboarding => write!(f, "/onboarding"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Watchlist => write!(f, "/watchlist"),
            Route::Stock(symbol) => write!(f, "/stock/{}", symbol),
            Route::Portfolio => write!(f, "/portfolio"),
            Route::Funds => write!(f, "/funds"),
            Route::Insights => write!(f, "/insights"),
            Route::OptionChain => write!(f, "/option-chain"),
            Route::Profile => write!(f, "/profile"),
            Route::Baskets => write!(f, "/baskets"),
            Route::Basket(id) => write!(f, "/basket/{}", id),
            Route::MtfDashboard => write!(f, "/mtf-dashboard"),
            Route::Behavior => write!(f, "/behavior"),
            Route::Allocation => write!(f, "/allocation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes() {
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(Route::parse("#/option-chain"), Route::OptionChain);
        assert_eq!(Route::parse("/mtf-dashboard/"), Route::MtfDashboard);
        assert_eq!(Route::parse("#/"), Route::Root);
        assert_eq!(Route::parse(""), Route::Root);
    }

    #[test]
    fn test_parameterised_routes() {
        assert_eq!(
            Route::parse("#/stock/RELIANCE"),
            Route::Stock(Symbol::new("RELIANCE"))
        );
        assert_eq!(Route::parse("/basket/b2/"), Route::Basket("b2".to_string()));
    }

    #[test]
    fn test_unknown_routes_redirect_to_root() {
        assert_eq!(Route::parse("/settings"), Route::Root);
        assert_eq!(Route::parse("/stock"), Route::Root);
        assert_eq!(Route::parse("/stock/TCS/chart"), Route::Root);
    }

    #[test]
    fn test_display_matches_parse() {
        for route in [
            Route::Allocation,
            Route::Stock(Symbol::new("INFY")),
            Route::Basket("b1".to_string()),
        ] {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
        assert!(Route::Onboarding.is_full_screen());
        assert!(!Route::Dashboard.is_full_screen());
    }
}
